mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mdslate_core::config::loader::ConfigLoader;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mdslate",
    version,
    about = "Convert Markdown with front matter to and from editable document trees"
)]
struct Cli {
    /// Config file (default: ~/.config/mdslate/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a document and print front matter and body tree
    Split(SplitArgs),

    /// Render a {"frontMatter", "body"} JSON document back to Markdown
    Merge(MergeArgs),

    /// Load and save a document, printing the saved text
    Roundtrip(RoundtripArgs),

    /// Report Markdown files under a directory that do not round-trip
    Check(CheckArgs),

    /// Print the form template inferred from a document's front matter
    Schema(SchemaArgs),

    /// Validate configuration and print resolved settings
    Doctor,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Markdown, YAML or JSON file
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// JSON document as printed by `split`
    pub file: PathBuf,

    /// Write the Markdown here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RoundtripArgs {
    pub file: PathBuf,

    /// Only verify that the saved text loads back to the same document
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Directory to scan recursively
    pub dir: PathBuf,

    /// Print a JSON report instead of one line per file
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();

    let loaded = ConfigLoader::load(cli.config.as_deref());
    if let Ok(ref rc) = loaded {
        logging::init(&rc.logging);
    }

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref(), loaded),
        Commands::Split(args) => cmd::split::run(&cmd::require_config(loaded), &args),
        Commands::Merge(args) => cmd::merge::run(&cmd::require_config(loaded), &args),
        Commands::Roundtrip(args) => cmd::roundtrip::run(&cmd::require_config(loaded), &args),
        Commands::Check(args) => cmd::check::run(&cmd::require_config(loaded), &args),
        Commands::Schema(args) => cmd::schema::run(&cmd::require_config(loaded), &args),
    }

    logging::flush();
}
