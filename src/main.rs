//! Headless tile-match runner.
//!
//! Loads a level, prints the board, then plays swaps read from stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tile_match::cli::{parse_args, parse_command, render_board, Command};
use tile_match::engine::{start_session, EngineConfig, Session};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let mut config = EngineConfig::from_env();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    info!(level = %args.level, seed = config.seed, "starting");

    let mut session = start_session(&args.level, config)
        .await
        .with_context(|| format!("failed to load level {}", args.level))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    show(&mut out, &session, args.json)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {}", err)?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Hint => match session.find_swap() {
                Some((a, b)) => writeln!(out, "try {} {} {} {}", a.row, a.col, b.row, b.col)?,
                None => writeln!(out, "no swap produces a match")?,
            },
            Command::Reset => {
                session.reset()?;
                show(&mut out, &session, args.json)?;
            }
            Command::Swap(a, b) => match session.swap(a, b) {
                Ok(outcome) => {
                    writeln!(
                        out,
                        "cleared {} tiles in {} step(s)",
                        outcome.tiles_cleared(),
                        outcome.steps.len()
                    )?;
                    show(&mut out, &session, args.json)?;
                    if outcome.status.is_terminal() {
                        break;
                    }
                }
                Err(err) => writeln!(out, "error [{}]: {}", err.code(), err.message())?,
            },
        }
    }

    Ok(())
}

fn show(out: &mut impl Write, session: &Session, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &session.snapshot())?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render_board(session.grid(), session.tracker()))?;
    }
    Ok(())
}
