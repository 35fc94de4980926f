//! V8-backed [`ScriptHost`]: one isolate and one global context per document.
//!
//! The global object doubles as `window`, and `console.*` goes to the log
//! under the script target. `document` is an inert stand-in: lookups find
//! nothing and listeners never fire, so scripts that only wire up handlers
//! run to completion instead of throwing.

use std::pin::pin;

use engine_logging::{engine_info, engine_script, engine_warn};
use once_cell::sync::OnceCell;
use uiforge_engine::{ScriptError, ScriptHost, ScriptUnit};

const DOCUMENT_STUB: &str = r#"
(function (global) {
  function noop() {}
  function element(tag) {
    return {
      tagName: String(tag).toUpperCase(),
      style: {},
      dataset: {},
      children: [],
      classList: { add: noop, remove: noop, toggle: noop, contains: function () { return false; } },
      appendChild: function (child) { this.children.push(child); return child; },
      removeChild: function (child) { return child; },
      setAttribute: noop,
      getAttribute: function () { return null; },
      addEventListener: noop,
      removeEventListener: noop,
      querySelector: function () { return null; },
      querySelectorAll: function () { return []; }
    };
  }
  global.document = {
    title: "",
    readyState: "complete",
    body: element("body"),
    head: element("head"),
    getElementById: function () { return null; },
    querySelector: function () { return null; },
    querySelectorAll: function () { return []; },
    getElementsByClassName: function () { return []; },
    getElementsByTagName: function () { return []; },
    createElement: element,
    addEventListener: noop,
    removeEventListener: noop
  };
  global.addEventListener = noop;
  global.removeEventListener = noop;
})(this);
"#;

static V8_PLATFORM: OnceCell<v8::SharedRef<v8::Platform>> = OnceCell::new();

pub fn initialize_v8_platform() {
    V8_PLATFORM.get_or_init(|| {
        let platform = v8::new_default_platform(0, false).make_shared();
        v8::V8::initialize_platform(platform.clone());
        v8::V8::initialize();
        engine_info!("V8 platform initialized");
        platform
    });
}

pub struct V8ScriptHost {
    // Dropped before the isolate that owns it.
    context: v8::Global<v8::Context>,
    isolate: v8::OwnedIsolate,
}

impl V8ScriptHost {
    pub fn new() -> Self {
        initialize_v8_platform();

        let mut isolate = v8::Isolate::new(v8::CreateParams::default());
        let context = fresh_context(&mut isolate);
        Self { context, isolate }
    }

    /// Evaluates `expression` in the document's context and returns its
    /// string form.
    pub fn eval(&mut self, expression: &str) -> Result<String, ScriptError> {
        self.run(expression)
    }

    fn run(&mut self, source: &str) -> Result<String, ScriptError> {
        let scope = pin!(v8::HandleScope::new(&mut self.isolate));
        let scope = &mut scope.init();
        let context = v8::Local::new(scope, &self.context);
        let scope = &mut v8::ContextScope::new(scope, context);

        let code = v8::String::new(scope, source)
            .ok_or_else(|| ScriptError::new("script source too large"))?;

        let scope = pin!(v8::TryCatch::new(scope));
        let scope = &mut scope.init();

        let completed = v8::Script::compile(scope, code, None).and_then(|script| script.run(scope));
        if let Some(value) = completed {
            return Ok(value
                .to_string(scope)
                .map(|text| text.to_rust_string_lossy(scope))
                .unwrap_or_default());
        }

        if scope.has_terminated() {
            return Err(ScriptError::new("script execution terminated"));
        }
        let message = scope
            .exception()
            .and_then(|exception| exception.to_string(scope))
            .map(|text| text.to_rust_string_lossy(scope))
            .unwrap_or_else(|| "unknown script error".to_string());
        Err(ScriptError::new(message))
    }
}

impl Default for V8ScriptHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptHost for V8ScriptHost {
    fn execute(&mut self, unit: &ScriptUnit) -> Result<(), ScriptError> {
        self.run(&unit.source).map(|_| ())
    }

    fn reset(&mut self) {
        self.context = fresh_context(&mut self.isolate);
    }
}

/// A new global context with `window`, `console` and `document` installed.
fn fresh_context(isolate: &mut v8::OwnedIsolate) -> v8::Global<v8::Context> {
    let scope = pin!(v8::HandleScope::new(isolate));
    let scope = &mut scope.init();
    let context = v8::Context::new(scope, Default::default());
    let global_context = v8::Global::new(scope, context);
    let scope = &mut v8::ContextScope::new(scope, context);
    install_window(scope);
    install_console(scope);
    install_document(scope);
    global_context
}

fn install_window(scope: &mut v8::ContextScope<'_, '_, v8::HandleScope<'_>>) {
    let global = scope.get_current_context().global(scope);
    if let Some(key) = v8::String::new(scope, "window") {
        global.set(scope, key.into(), global.into());
    }
}

fn install_console(scope: &mut v8::ContextScope<'_, '_, v8::HandleScope<'_>>) {
    let global = scope.get_current_context().global(scope);
    let console = v8::Object::new(scope);

    set_method(scope, console, "log", console_log);
    set_method(scope, console, "info", console_log);
    set_method(scope, console, "debug", console_debug);
    set_method(scope, console, "warn", console_warn);
    set_method(scope, console, "error", console_error);

    if let Some(key) = v8::String::new(scope, "console") {
        global.set(scope, key.into(), console.into());
    }
}

fn install_document(scope: &mut v8::ContextScope<'_, '_, v8::HandleScope<'_>>) {
    let Some(code) = v8::String::new(scope, DOCUMENT_STUB) else {
        return;
    };
    let installed = v8::Script::compile(scope, code, None).and_then(|script| script.run(scope));
    if installed.is_none() {
        engine_warn!("document stand-in could not be installed");
    }
}

fn set_method(
    scope: &mut v8::ContextScope<'_, '_, v8::HandleScope<'_>>,
    target: v8::Local<'_, v8::Object>,
    name: &str,
    callback: impl v8::MapFnTo<v8::FunctionCallback>,
) {
    let (Some(key), Some(function)) = (
        v8::String::new(scope, name),
        v8::Function::builder(callback).build(scope),
    ) else {
        return;
    };
    target.set(scope, key.into(), function.into());
}

fn console_log(
    scope: &mut v8::PinScope<'_, '_>,
    args: v8::FunctionCallbackArguments<'_>,
    _rv: v8::ReturnValue<'_>,
) {
    engine_script!(log::Level::Info, "{}", format_console_args(scope, &args));
}

fn console_debug(
    scope: &mut v8::PinScope<'_, '_>,
    args: v8::FunctionCallbackArguments<'_>,
    _rv: v8::ReturnValue<'_>,
) {
    engine_script!(log::Level::Debug, "{}", format_console_args(scope, &args));
}

fn console_warn(
    scope: &mut v8::PinScope<'_, '_>,
    args: v8::FunctionCallbackArguments<'_>,
    _rv: v8::ReturnValue<'_>,
) {
    engine_script!(log::Level::Warn, "{}", format_console_args(scope, &args));
}

fn console_error(
    scope: &mut v8::PinScope<'_, '_>,
    args: v8::FunctionCallbackArguments<'_>,
    _rv: v8::ReturnValue<'_>,
) {
    engine_script!(log::Level::Error, "{}", format_console_args(scope, &args));
}

fn format_console_args(
    scope: &mut v8::PinScope<'_, '_>,
    args: &v8::FunctionCallbackArguments<'_>,
) -> String {
    let mut parts = Vec::new();
    for i in 0..args.length() {
        if let Some(text) = args.get(i).to_string(scope) {
            parts.push(text.to_rust_string_lossy(scope));
        }
    }
    parts.join(" ")
}
