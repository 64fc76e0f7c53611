use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use onenote_hierarchy_tools::summary::PageFilter;
use onenote_hierarchy_tools::{OutputFormat, ParserStrategy, commands, utils};

#[derive(Parser)]
#[command(name = "onenote-hierarchy")]
#[command(about = "OneNote hierarchy parser and inspection tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// Exported hierarchy XML file (optionally .zst compressed)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Parser used to read the file
    #[arg(short, long, default_value = "tree")]
    strategy: ParserStrategy,
}

#[derive(Subcommand)]
enum Commands {
    /// Show item counts
    Info {
        #[command(flatten)]
        input: Input,
    },

    /// Print the notebook hierarchy
    Tree {
        #[command(flatten)]
        input: Input,

        /// Levels below the notebooks to expand
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// List pages
    Pages {
        #[command(flatten)]
        input: Input,

        /// Only pages whose name contains this text (case-insensitive)
        #[arg(short, long)]
        query: Option<String>,

        /// Include pages from the recycle bin
        #[arg(long)]
        include_recycle_bin: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize color handling (respects NO_COLOR)
    utils::color::init_color();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Info { input } => commands::info::execute(&input.file, input.format, input.strategy),

        Commands::Tree { input, depth } => {
            commands::tree::execute(&input.file, input.format, input.strategy, depth)
        }

        Commands::Pages {
            input,
            query,
            include_recycle_bin,
        } => commands::pages::execute(
            &input.file,
            input.format,
            input.strategy,
            PageFilter {
                query,
                include_recycle_bin,
            },
        ),
    }
}
