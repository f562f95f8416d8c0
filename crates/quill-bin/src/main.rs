//! Quill entrypoint: startup wiring and the key/frame loop.

use anyhow::{Context, Result};
use clap::Parser;
use core_actions::io_ops::{self, OpenFileResult};
use core_actions::{Outcome, dispatch};
use core_input::{KeyDecoder, StdinByteSource};
use core_render::compose;
use core_state::EditorState;
use core_terminal::{CrosstermBackend, window_size};
use core_text::TextBuffer;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Instant;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Quill editor")]
struct Args {
    /// Optional path to open at startup. If omitted an empty buffer is used.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `quill.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// Log to `quill.log`; stdout belongs to the compositor.
fn configure_logging() -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(Path::new("."), "quill.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global subscriber already installed; drop the guard so the
        // writer shuts down.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;
    let tab_stop = config.tab_stop();

    let (buffer, file_name, open_error) = match args.path.as_deref() {
        Some(path) => match io_ops::open_file(path, tab_stop) {
            OpenFileResult::Opened(buffer) => (buffer, Some(path.to_path_buf()), None),
            OpenFileResult::Error(e) => (
                TextBuffer::new(tab_stop),
                None,
                Some(format!("Can't open {}: {e}", path.display())),
            ),
        },
        None => (TextBuffer::new(tab_stop), None, None),
    };

    let mut backend = CrosstermBackend::new();
    let _terminal_guard = backend.enter_guard()?;

    let (cols, rows) = window_size().context("query window size")?;
    let mut state = EditorState::new(buffer, cols as usize, rows as usize);
    state.file_name = file_name;
    match open_error {
        Some(msg) => state.set_status(msg),
        None => state.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit"),
    }

    let mut decoder = KeyDecoder::new(StdinByteSource::spawn()?);
    info!(
        target: "runtime.startup",
        cols,
        rows,
        tab_stop,
        file = ?state.file_name,
        "bootstrap_complete"
    );

    loop {
        state.scroll();
        compose(&state, Instant::now()).flush()?;
        let key = decoder.read_key()?;
        if dispatch(&mut state, key) == Outcome::Quit {
            info!(target: "runtime", "quit_requested");
            break;
        }
    }

    Ok(())
}
