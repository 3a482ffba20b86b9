use clap::{Parser, Subcommand};
use codepatch::config::EngineConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "codepatch",
    about = "Build token-budgeted prompt context and apply LLM SEARCH/REPLACE edits",
    long_about = None,
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// JSON file with engine settings.
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// Log engine decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the token count of files (or stdin).
    Tokens {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file_paths: Vec<PathBuf>,
    },
    /// Show how much of the context window is left for history.
    Budget {
        #[arg(long, default_value_t = 0)]
        system_prompt_tokens: u32,
    },
    /// Trim a JSON chat history to the configured budget.
    Trim {
        /// JSON array of {role, content} messages [default: stdin].
        #[arg(long)]
        history: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        system_prompt_tokens: u32,
    },
    /// Render the prompt snapshot of the given files.
    Context {
        /// File to include in full.
        #[arg(long)]
        active: Option<String>,
        /// Override the configured file context budget.
        #[arg(long)]
        max_tokens: Option<u32>,
        #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
        file_paths: Vec<PathBuf>,
    },
    /// Parse a model reply and print its blocks as JSON.
    Parse {
        /// Reply text [default: stdin].
        reply: Option<PathBuf>,
    },
    /// Merge a model reply into the given files.
    ///
    /// Prints a unified diff of the merged result. Nothing is written unless
    /// --write is given. Fails when any search block could not be applied.
    Apply {
        #[arg(long)]
        reply: PathBuf,
        /// Persist changed files.
        #[arg(long)]
        write: bool,
        /// Keep files whose edits only partially applied.
        #[arg(long)]
        keep_partial: bool,
        /// Print a JSON summary instead of a diff.
        #[arg(long)]
        json: bool,
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file_paths: Vec<PathBuf>,
    },
    /// Print the system prompt that teaches the reply format.
    Prompt {
        #[arg(long, default_value = "medium")]
        autonomy: String,
        #[arg(long, default_value = "fast")]
        build_mode: String,
        #[arg(long)]
        custom: Option<String>,
        /// Include the edit-mode instructions.
        #[arg(long)]
        existing_files: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else warnings only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "codepatch=debug"
        } else {
            "codepatch=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let result = EngineConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Tokens { file_paths } => codepatch::commands::tokens::run(file_paths),
        Commands::Budget {
            system_prompt_tokens,
        } => codepatch::commands::budget::run(&config, system_prompt_tokens),
        Commands::Trim {
            history,
            system_prompt_tokens,
        } => codepatch::commands::trim::run(&config, history.as_deref(), system_prompt_tokens),
        Commands::Context {
            active,
            max_tokens,
            file_paths,
        } => codepatch::commands::context::run(&config, active, max_tokens, file_paths),
        Commands::Parse { reply } => codepatch::commands::parse::run(reply.as_deref()),
        Commands::Apply {
            reply,
            write,
            keep_partial,
            json,
            file_paths,
        } => codepatch::commands::apply::run(
            &config,
            codepatch::commands::apply::ApplyArgs {
                reply,
                file_paths,
                write,
                keep_partial,
                json,
            },
        ),
        Commands::Prompt {
            autonomy,
            build_mode,
            custom,
            existing_files,
        } => codepatch::commands::prompt::run(&autonomy, &build_mode, custom, existing_files),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
