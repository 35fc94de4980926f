use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context as _;
use engine_logging::{engine_info, engine_warn};
use uiforge_core::{Msg, Route};
use uiforge_engine::{EngineHandle, Epoch, PreviewWriter};

use super::config::{AppConfig, CONFIG_FILENAME};
use super::controller::Controller;
use super::effects::{EffectRunner, MsgSink};
use super::logging::{self, LogDestination};
use super::script_host::V8ScriptHost;
use super::ui::input::{parse_command, Command, HELP};
use super::ui::render::render;

/// Startup options from the command line; `None` keeps the config value.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub route: String,
    pub backend_url: Option<String>,
    pub config_path: Option<PathBuf>,
    pub log_destination: Option<LogDestination>,
}

enum LoopEvent {
    Input(String),
    InputClosed,
    Engine(Epoch, Msg),
}

pub fn run_app(options: LaunchOptions) -> anyhow::Result<()> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let mut config = AppConfig::load(&config_path);
    if let Some(backend_url) = options.backend_url {
        config.backend_url = backend_url;
    }
    if let Some(destination) = options.log_destination {
        config.log_destination = destination;
    }

    logging::initialize(config.log_destination);
    engine_info!("Starting uiforge against {}", config.backend_url);

    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();
    let sink = Arc::new(MsgSink::new(event_tx.clone(), LoopEvent::Engine));
    let engine = EngineHandle::new(config.backend_settings(), sink)
        .with_context(|| format!("cannot use backend {}", config.backend_url))?;
    let runner = EffectRunner::new(
        engine,
        PreviewWriter::new(config.output_dir.clone(), config.stylesheet_href()),
    );

    spawn_input_reader(event_tx);

    let mut controller = Controller::new(V8ScriptHost::new());
    let effects = controller.navigate(Route::parse(&options.route));
    let notices = runner.run(controller.epoch(), effects);
    redraw(&mut controller, notices)?;

    while let Ok(event) = event_rx.recv() {
        let effects = match event {
            LoopEvent::Engine(epoch, msg) => controller.deliver(epoch, msg),
            LoopEvent::InputClosed => break,
            LoopEvent::Input(line) => match parse_command(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Dispatch(msg))) => controller.dispatch(msg),
                Ok(Some(Command::Go(route))) => controller.navigate(route),
                Ok(Some(Command::Inspect(expression))) => {
                    let answer = match controller.document_mut().host_mut().eval(&expression) {
                        Ok(value) => value,
                        Err(err) => format!("Uncaught {err}"),
                    };
                    println!("{answer}");
                    continue;
                }
                Ok(Some(Command::Help)) => {
                    println!("{HELP}");
                    continue;
                }
                Ok(Some(Command::Quit)) => break,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            },
        };
        let notices = runner.run(controller.epoch(), effects);
        redraw(&mut controller, notices)?;
    }

    engine_info!("uiforge shutting down");
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(LoopEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    engine_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(LoopEvent::InputClosed);
    });
}

fn redraw(controller: &mut Controller<V8ScriptHost>, effect_notices: Vec<String>) -> io::Result<()> {
    let mut notices = controller.take_notices();
    notices.extend(effect_notices);
    let dirty = controller.consume_dirty();
    if !dirty && notices.is_empty() {
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    if dirty {
        writeln!(stdout, "[{}]", controller.route())?;
        write!(
            stdout,
            "{}",
            render(&controller.view(), controller.document().surface())
        )?;
    }
    for notice in notices {
        writeln!(stdout, "! {notice}")?;
    }
    write!(stdout, "> ")?;
    stdout.flush()
}
