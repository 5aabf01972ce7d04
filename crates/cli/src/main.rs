mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "notemigrate",
    version,
    about = "Migrate a markdown vault into categorized folders with attachments and remote contents"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// Classify every note without copying anything
    Scan(ScanArgs),

    /// Copy notes, attachments and remote folder contents into the output tree
    Migrate(MigrateArgs),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Quiet,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long)]
    pub json: bool,

    /// Only print note paths
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Archive password (overrides [archive].password)
    #[arg(long)]
    pub password: Option<String>,

    /// Remote-storage token (overrides [remote].token)
    #[arg(long)]
    pub token: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => {
            cmd::doctor::run(cli.config.as_deref(), cli.profile.as_deref());
            Ok(())
        }
        Commands::Scan(args) => {
            cmd::scan::run(cli.config.as_deref(), cli.profile.as_deref(), args)
        }
        Commands::Migrate(args) => {
            cmd::migrate::run(cli.config.as_deref(), cli.profile.as_deref(), args)
        }
    }
}
