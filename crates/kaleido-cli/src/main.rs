mod commands;
mod util;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::lower::LowerArgs;
use commands::subset::SubsetArgs;
use commands::thompson::ThompsonArgs;

/// Two compiler front-end pipelines: prefix regex → NFA → DFA, and a small
/// expression language → SSA IR.
#[derive(Parser)]
#[command(name = "kaleido", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build an NFA from a prefix regex file (Thompson's construction)
    Thompson {
        /// Input file: alphabet line, then the prefix expression
        input: PathBuf,
        /// Output file for the textual NFA
        #[arg(short, long, default_value = "nfa.txt")]
        output: PathBuf,
        /// Also write a Graphviz rendering next to the output
        #[arg(long)]
        dot: bool,
    },
    /// Determinize a textual NFA via the subset construction
    Subset {
        /// Input file in the NFA layout (alphabet, accept state, rows)
        input: PathBuf,
        /// Output file for the textual DFA
        #[arg(short, long, default_value = "dfa.txt")]
        output: PathBuf,
        /// Also write a Graphviz rendering next to the output
        #[arg(long)]
        dot: bool,
    },
    /// Lower a source file to SSA IR on stdout
    Lower {
        /// Source file
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Thompson { input, output, dot } => {
            commands::thompson::run(ThompsonArgs { input, output, dot });
        }
        Command::Subset { input, output, dot } => {
            commands::subset::run(SubsetArgs { input, output, dot });
        }
        Command::Lower { input } => {
            commands::lower::run(LowerArgs { input });
        }
    }
}
