use engine_logging::{engine_debug, engine_script};

use crate::fragment::{mount_fragment, select_text};

/// A freshly created executable script carrying an inline script's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptUnit {
    pub position: usize,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ScriptError {
    pub message: String,
}

impl ScriptError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Executes script units attached to the live document.
///
/// All units of one document share a single global context: whatever one
/// script defines is visible to the next.
pub trait ScriptHost {
    fn execute(&mut self, unit: &ScriptUnit) -> Result<(), ScriptError>;

    /// Discards every global the scripts defined so far.
    fn reset(&mut self);
}

/// The preview container's current content, as serialized markup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewSurface {
    markup: String,
}

impl PreviewSurface {
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn is_empty(&self) -> bool {
        self.markup.trim().is_empty()
    }

    /// Text of every element under the surface matching `css`.
    pub fn select_text(&self, css: &str) -> Vec<String> {
        select_text(&self.markup, css)
    }

    fn replace(&mut self, markup: String) {
        self.markup = markup;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderReport {
    /// Scripts attached and run, including ones that threw.
    pub materialized: usize,
    pub failed: usize,
}

/// A page: the preview surface plus the body that scripts get attached to.
///
/// Both the live generation path and the history replay path go through
/// [`LiveDocument::render`].
pub struct LiveDocument<H> {
    surface: PreviewSurface,
    body: Vec<ScriptUnit>,
    host: H,
}

impl<H: ScriptHost> LiveDocument<H> {
    pub fn new(host: H) -> Self {
        Self {
            surface: PreviewSurface::default(),
            body: Vec::new(),
            host,
        }
    }

    pub fn surface(&self) -> &PreviewSurface {
        &self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Script units currently attached to the body; zero outside `render`.
    pub fn attached_scripts(&self) -> usize {
        self.body.len()
    }

    /// Starts over as a fresh page: empty surface, empty script context.
    pub fn reset(&mut self) {
        self.surface.replace(String::new());
        self.body.clear();
        self.host.reset();
    }

    /// Replaces the surface with static markup (markers, lists). Scripts in
    /// it are not run.
    pub fn show_placeholder(&mut self, markup: impl Into<String>) {
        self.surface.replace(markup.into());
    }

    /// Mounts `fragment_html` on the surface, then runs each inline script
    /// once, in document order.
    ///
    /// Assigning markup does not run the scripts inside it, so each one is
    /// re-created as a fresh unit, attached to the body (which runs it) and
    /// detached again. A failing script is logged and the scan continues;
    /// this never fails.
    pub fn render(&mut self, fragment_html: &str) -> RenderReport {
        let mounted = mount_fragment(fragment_html);
        self.surface.replace(mounted.markup);

        let mut report = RenderReport::default();
        for script in mounted.scripts {
            let position = script.position;
            let unit = ScriptUnit {
                position,
                source: script.source,
            };
            report.materialized += 1;
            if let Err(err) = self.materialize(unit) {
                report.failed += 1;
                engine_script!(
                    log::Level::Error,
                    "Inline script #{} failed: {}",
                    position,
                    err
                );
            }
        }

        engine_debug!(
            "Rendered fragment: {} bytes, {} scripts, {} failed",
            fragment_html.len(),
            report.materialized,
            report.failed
        );
        report
    }

    fn materialize(&mut self, unit: ScriptUnit) -> Result<(), ScriptError> {
        self.body.push(unit);
        let outcome = match self.body.last() {
            Some(attached) => self.host.execute(attached),
            None => Ok(()),
        };
        self.body.pop();
        outcome
    }
}
