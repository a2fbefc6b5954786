use clap::{Parser, Subcommand};
use context_expression::commands::{eval_command, filter_command};
use context_expression::errors::Result;
use context_expression::LabelSet;
use tracing::{debug, Level};

/// Checks context expressions against runtime labels.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Runtime labels, comma-separated
    #[arg(long, global = true, env = "CTXMATCH_CONTEXTS")]
    contexts: Option<String>,
    /// Log matching decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print whether a context expression applies
    Eval {
        /// Context expression, e.g. "dev, qa and !eu"
        expression: String,
    },
    /// Print the change records (JSON array file) that apply
    Filter {
        /// Path to a JSON array of change records
        records: std::path::PathBuf,
    },
}

fn run(args: &Args) -> Result<()> {
    let runtime = args.contexts.as_deref().map(LabelSet::parse);
    debug!(contexts = ?runtime, "runtime labels");

    let out = match &args.command {
        Command::Eval { expression } => eval_command(expression, runtime.as_ref())?,
        Command::Filter { records } => filter_command(records, runtime.as_ref())?,
    };
    println!("{out}");
    Ok(())
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
