#![deny(clippy::all)]
use std::io::{stdin, stdout, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;

use anyhow::{Context, Result};
use bitflip::{BitView, BitflipError, FileStorage, InputMode};
use clap::Parser;
use crossterm::{cursor, execute};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const STDOUT_BUF: usize = 8192;
const LOG_ENV: &str = "BITFLIP_LOG";

/// Edit a file one bit at a time.
#[derive(Parser, Debug)]
#[command(name = "bitflip", version, about)]
struct Args {
    /// File to edit. Created empty if it does not exist.
    #[arg(allow_hyphen_values = true)]
    path: Option<PathBuf>,
}

/// Logs go to the file named by `BITFLIP_LOG`, never to the terminal we draw on.
fn configure_logging() -> Option<WorkerGuard> {
    let log_path = PathBuf::from(std::env::var_os(LOG_ENV)?);
    let file_name = log_path.file_name()?.to_owned();
    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            error!(target: "bitflip.runtime", %info, "panic");
            let _ = execute!(std::io::stdout(), cursor::Show);
            default_panic(info);
        }));
    });
}

fn run(path: PathBuf) -> Result<()> {
    let input_mode = InputMode::capture();
    info!(target: "bitflip.runtime", detached = input_mode.is_detached(), "input mode captured");
    input_mode
        .install_interrupt_handler()
        .context("could not install interrupt handler")?;

    let view = BitView::with_storage(FileStorage::new(path))?;

    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(STDOUT_BUF, stdout.lock());
    let stdin = stdin();
    let mut stdin = stdin.lock();

    view.run_event_loop(&mut stdin, &mut stdout, input_mode)
        .map_err(BitflipError::Terminal)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();

    let Some(path) = args.path else {
        println!("error: need a file path");
        return ExitCode::FAILURE;
    };
    info!(target: "bitflip.runtime", path = %path.display(), "startup");

    match run(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "bitflip.runtime", error = %err, "fatal");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
