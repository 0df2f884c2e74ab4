//! Blotto tournament CLI.
//!
//! Reads the player roster from stdin and the matchup list from a file,
//! scores every matchup against the command-line battlefield weights, and
//! prints the ranking for the requested mode.

use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use blotto::{parse_matchups, Mode, Roster, Tournament};

fn print_usage() {
    eprintln!("Blotto tournament scorer");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  blotto <matchup-file> win|score <weight>...");
    eprintln!();
    eprintln!("The player roster is read from stdin, one player per line:");
    eprintln!("  <id> <allocation per battlefield>...");
    eprintln!("terminated by a blank line or end of input. The matchup file");
    eprintln!("holds one matchup per line: two player ids.");
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  win     rank by wins per game, ties worth half a win");
    eprintln!("  score   rank by accumulated score per game");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  blotto matchups.txt win 1 2 1 < players.txt");
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 3 {
        print_usage();
        bail!("expected <matchup-file> win|score <weight>...");
    }

    let matchup_file =
        File::open(&args[0]).with_context(|| format!("could not open {}", args[0]))?;
    let mode: Mode = args[1].parse()?;
    let weights = args[2..]
        .iter()
        .map(|arg| {
            arg.parse::<f64>()
                .with_context(|| format!("invalid battlefield weight {arg:?}"))
        })
        .collect::<Result<Vec<f64>>>()?;

    let matchups = parse_matchups(BufReader::new(matchup_file))
        .with_context(|| format!("reading {}", args[0]))?;
    let roster = Roster::parse(io::stdin().lock(), weights.len()).context("reading roster")?;

    let tournament = Tournament::new(&roster, &weights)?;
    let standings = tournament.play(&matchups)?;
    for row in standings.rankings(mode) {
        println!("{}", row.report_row());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("blotto: {err:#}");
            ExitCode::FAILURE
        }
    }
}
