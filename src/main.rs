use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rangeagg::checker::{self, Comparator};
use rangeagg::tasks;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log verbosity on stderr (-v for debug, -vv for trace).
    ///
    /// `RUST_LOG` overrides this when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer range maximum queries read from stdin
    RangeMax,
    /// Answer range gcd queries and point updates read from stdin
    RangeGcd,
    /// Compare an output file with the reference output, printing OK or WA
    Check {
        #[arg(short, long, value_enum, default_value_t = Comparator::Tokens)]
        mode: Comparator,
        /// Reference output
        expected: PathBuf,
        /// Output under test
        actual: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::RangeMax => run_task(tasks::range_max),
        Command::RangeGcd => run_task(tasks::range_gcd),
        Command::Check {
            mode,
            expected,
            actual,
        } => {
            let verdict = checker::check_files(mode, &expected, &actual)?;
            let mut stdout = io::stdout().lock();
            write!(stdout, "{verdict}")?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_task<F>(task: F) -> anyhow::Result<()>
where
    F: FnOnce(&str, &mut BufWriter<io::StdoutLock<'static>>) -> anyhow::Result<()>,
{
    let input = io::read_to_string(io::stdin()).context("reading stdin")?;
    let mut out = BufWriter::new(io::stdout().lock());
    task(&input, &mut out)?;
    out.flush()?;
    Ok(())
}
