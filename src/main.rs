use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, Level};

use repo_mirror::{GithubSource, Mirror, MirrorError};

/// Mirror a repository onto the local filesystem via its contents API.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Repository URL, e.g. https://github.com/owner/repo
    repo_url: String,

    /// Existing directory the repository tree is mirrored into
    download_path: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Maximum number of concurrent fetch/write operations
    #[arg(short, long, default_value = "3")]
    tasks: NonZeroUsize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    if let Err(err) = run(cli).await {
        error!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<(), MirrorError> {
    if !cli.download_path.is_dir() {
        return Err(MirrorError::InvalidConfig {
            message: format!("{} is not a directory", cli.download_path.display()),
        });
    }

    let source = GithubSource::from_repo_url(&cli.repo_url)?;
    let mirror = Mirror::new(source, cli.tasks);
    mirror.download(&cli.download_path).await
}
