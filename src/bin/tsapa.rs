use std::{
    fs,
    io::{self, IsTerminal},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tsapa::{LineOutcome, Repl, TsapaError};

#[derive(Parser)]
#[command(author, version, about = "Tsapa language interpreter")]
struct Args {
    /// Do not print the startup banner
    #[arg(long, global = true)]
    no_banner: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive session
    Repl,
    /// Evaluate one line and print its result
    Eval { source: String },
    /// Evaluate a script file line by line, printing each result
    Run { script: PathBuf },
}

fn main() -> Result<(), TsapaError> {
    install_tracing();
    let args = Args::parse();
    match args.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            let mut repl = Repl::new();
            if io::stdin().is_terminal() {
                repl.run(!args.no_banner)
            } else {
                if !args.no_banner {
                    println!("{}", Repl::banner());
                }
                repl.run_lines(io::stdin().lock())
            }
        }
        Command::Eval { source } => eval_line(&source),
        Command::Run { script } => {
            let source = fs::read_to_string(&script)?;
            Repl::new().run_lines(source.as_bytes())
        }
    }
}

fn eval_line(source: &str) -> Result<(), TsapaError> {
    match Repl::new().process_line(source) {
        LineOutcome::Value(text) => println!("{text}"),
        LineOutcome::Error(report) => {
            eprintln!("{report}");
            std::process::exit(1);
        }
        LineOutcome::Exit => println!("{}", tsapa::repl::FAREWELL),
    }
    Ok(())
}

fn install_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tsapa::trace=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
