use clap::{Parser, Subcommand};

use blend_cli::commands::{config_ops, retrieve_ops, screen_ops};
use blend_cli::trace_init;

#[derive(Parser)]
#[command(name = "blendtool", about = "Lexical blend detection tool")]
struct Cli {
    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean a corpus, run the candidate filters and write a checkpoint
    Screen {
        /// Corpus file, one tweet per line
        #[arg(long)]
        corpus: String,
        /// Dictionary file, one word per line
        #[arg(long)]
        dict: String,
        /// Output checkpoint file
        #[arg(short, long)]
        output: String,
        /// Custom settings TOML
        #[arg(long)]
        settings: Option<String>,
    },
    /// Find source words for the candidates in a checkpoint
    Retrieve {
        /// Checkpoint written by `screen`
        checkpoint: String,
        /// Known blends, one "blend start end" per line
        #[arg(long)]
        answers: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Custom settings TOML
        #[arg(long)]
        settings: Option<String>,
    },
    /// Screen and retrieve in one pass
    Run {
        /// Corpus file, one tweet per line
        #[arg(long)]
        corpus: String,
        /// Dictionary file, one word per line
        #[arg(long)]
        dict: String,
        /// Known blends; also enables a per-stage audit
        #[arg(long)]
        answers: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Custom settings TOML
        #[arg(long)]
        settings: Option<String>,
    },
    /// Show checkpoint info
    Info {
        /// Checkpoint file
        checkpoint: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    trace_init::init_tracing(cli.verbose);

    match cli.command {
        Command::Screen {
            corpus,
            dict,
            output,
            settings,
        } => screen_ops::screen(&corpus, &dict, &output, settings.as_deref()),
        Command::Retrieve {
            checkpoint,
            answers,
            json,
            settings,
        } => retrieve_ops::retrieve(&checkpoint, answers.as_deref(), json, settings.as_deref()),
        Command::Run {
            corpus,
            dict,
            answers,
            json,
            settings,
        } => screen_ops::run(
            &corpus,
            &dict,
            answers.as_deref(),
            json,
            settings.as_deref(),
        ),
        Command::Info { checkpoint } => screen_ops::info(&checkpoint),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
