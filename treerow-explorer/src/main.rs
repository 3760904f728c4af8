mod app;
mod args;
mod commands;
mod error;
mod fs_store;
mod grid;
mod paths;
mod state;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use app::{Explorer, Flow};
use args::Args;
use commands::{Command, HELP};
use error::ExplorerError;
use fs_store::FsStore;
use state::ExpansionState;

fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return;
    };
    match paths::create_log_file(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("warning: logging disabled: {e}");
            }
        }
        Err(e) => eprintln!("warning: no log file at {}: {e}", path.display()),
    }
}

fn run(args: Args) -> Result<(), ExplorerError> {
    let root = args.root.canonicalize()?;
    let state_path = if args.no_state {
        None
    } else {
        args.state.clone().or_else(paths::state_file)
    };

    let mut state = match &state_path {
        Some(path) => ExpansionState::load(path).unwrap_or_else(|e| {
            log::warn!("ignoring state file {}: {e}", path.display());
            ExpansionState::default()
        }),
        None => ExpansionState::default(),
    };

    let mut store = FsStore::open(&root, args.hidden)?;
    store.restore_expanded(state.expanded(&root).iter().cloned());
    let mut explorer = Explorer::new(
        store,
        args.height,
        args.style.into(),
        args.index_config(),
    )?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    explorer.render(&mut stdout)?;

    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let flow = line
            .parse::<Command>()
            .map_err(ExplorerError::from)
            .and_then(|command| explorer.execute(command));
        match flow {
            Ok(Flow::Redraw) => explorer.render(&mut stdout)?,
            Ok(Flow::Help) => writeln!(stdout, "{HELP}")?,
            Ok(Flow::Quit) => break,
            Err(e) => {
                log::debug!("command '{}' failed: {e}", line.trim());
                writeln!(stdout, "error: {e}")?;
            }
        }
    }

    if let Some(path) = state_path {
        explorer.save_state(&mut state);
        state.save(&path)?;
        log::info!("saved expansion state to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level());
    log::info!("treerow {} starting", env!("CARGO_PKG_VERSION"));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
