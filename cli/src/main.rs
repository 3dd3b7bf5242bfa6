use std::error::Error;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use base::KeyCode;

mod clock;
mod output;
mod sleep;
mod trailers;

use clock::{parse_instant, run_clock, ClockOptions};
use output::TerminalWriter;
use trailers::run_trailers;

/// Trailer keys and the accelerated clock, in a terminal.
#[derive(Parser, Debug)]
#[command(name = "showtime", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed key codes to the trailer keys program and show what
    /// changes on the page.
    Trailers {
        /// Key codes, as numbers (116) or function key names (F5).
        /// When none are given, codes are read from standard input.
        codes: Vec<KeyCode>,
    },
    /// Show the accelerated clock.
    Clock {
        /// Stop after this many renders (default: run until
        /// interrupted).
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        ticks: Option<u64>,

        /// Sampling period in milliseconds.
        #[arg(long, default_value_t = 100)]
        interval_ms: u64,

        /// Render the clock once, as it would appear at this RFC 3339
        /// instant.
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
}

fn set_up_logging() -> Result<(), Box<dyn Error>> {
    // See
    // https://docs.rs/tracing-subscriber/0.3/tracing_subscriber/fmt/index.html#filtering-events-with-environment-variables
    // for instructions on how to select which trace messages get
    // printed.  Standard output is reserved for the programs'
    // display.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    set_up_logging()?;

    let mut out = TerminalWriter::new();
    let result = match cli.command {
        Command::Trailers { codes } => run_trailers(&codes, &mut out),
        Command::Clock {
            ticks,
            interval_ms,
            at,
        } => {
            let options = ClockOptions {
                renders: ticks.and_then(|n| usize::try_from(n).ok()),
                interval: Duration::from_millis(interval_ms),
                at,
            };
            event!(
                Level::DEBUG,
                "clock: sampling every {:?}, render limit {:?}",
                options.interval,
                options.renders
            );
            run_clock(&options, &mut out)
        }
    };
    out.disconnect();
    result
}

fn main() {
    match run() {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}

#[test]
fn test_cli_is_well_formed() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_parse_clock_arguments() {
    let cli = Cli::try_parse_from(["showtime", "clock", "--ticks", "3", "--interval-ms", "250"])
        .expect("arguments should parse");
    match cli.command {
        Command::Clock {
            ticks,
            interval_ms,
            at,
        } => {
            assert_eq!(ticks, Some(3u64));
            assert_eq!(interval_ms, 250);
            assert_eq!(at, None);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_zero_ticks_is_rejected() {
    assert!(Cli::try_parse_from(["showtime", "clock", "--ticks", "0"]).is_err());
    assert!(Cli::try_parse_from(["showtime", "clock", "--ticks", "1"]).is_ok());
}

#[test]
fn test_parse_trailer_codes() {
    let cli = Cli::try_parse_from(["showtime", "trailers", "116", "F1", "32"])
        .expect("arguments should parse");
    match cli.command {
        Command::Trailers { codes } => assert_eq!(
            codes,
            vec![KeyCode::new(116), KeyCode::new(112), KeyCode::new(32)]
        ),
        other => panic!("unexpected command {other:?}"),
    }
    assert!(Cli::try_parse_from(["showtime", "trailers", "nope"]).is_err());
}
