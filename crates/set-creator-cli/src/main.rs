use clap::{ArgAction, Parser};
use color_eyre::eyre::{eyre, Context};
use commands::create::{self, CreateArgs};
use set_creator_config::PathManager;
use set_creator_sources::http::DEFAULT_TIMEOUT_SECS;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser, Debug)]
#[command(name = "metadata-set-creator")]
#[command(about = "Build Plex-Meta-Manager metadata and set files from a list URL")]
#[command(version)]
struct Cli {
    /// PMM config file (defaults to config.yml in the config directory)
    #[arg(short = 'c', long = "pmm-config", env = "PMM_CONFIG", value_name = "FILE")]
    pmm_config: Option<PathBuf>,

    /// Trakt, MDbList, IMDb, or TMDb list URL
    #[arg(short, long, env = "URL")]
    url: Option<String>,

    /// Request timeout in seconds, greater than 0
    #[arg(
        short,
        long,
        env = "TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Add season poster placeholders
    #[arg(short, long, env = "SEASON")]
    season: bool,

    /// Add episode poster placeholders
    #[arg(short, long, env = "EPISODE")]
    episode: bool,

    /// Run with extra trace logs
    #[arg(long, env = "TRACE")]
    trace: bool,

    /// Log every request (secrets are masked)
    #[arg(long, env = "LOG_REQUESTS")]
    log_requests: bool,

    /// Directory for the output files and logs
    #[arg(long, env = "CONFIG_DIR", value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Output format
    #[arg(long, default_value = "human", value_enum)]
    output: output::OutputFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = cli.config_dir.clone().map(PathManager::new).unwrap_or_default();
    paths
        .ensure_directories()
        .wrap_err_with(|| format!("Failed to create {}", paths.config_dir().display()))?;
    logging::init_logging(cli.verbose, cli.quiet, cli.trace, Some(&paths.log_file()))
        .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let args = CreateArgs {
        pmm_config: cli.pmm_config,
        url: cli.url,
        timeout: cli.timeout,
        season: cli.season,
        episode: cli.episode,
        log_requests: cli.log_requests,
    };

    let result = create::run_create(args, paths, &output).await;
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
        if output.format() != output::OutputFormat::Human {
            output.error(format!("{:#}", e));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "metadata-set-creator",
            "-u",
            "https://trakt.tv/users/a/lists/b",
            "-s",
            "-e",
            "-t",
            "30",
            "-c",
            "/tmp/config.yml",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("https://trakt.tv/users/a/lists/b"));
        assert!(cli.season);
        assert!(cli.episode);
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.pmm_config, Some(PathBuf::from("/tmp/config.yml")));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, output::OutputFormat::Human);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["metadata-set-creator", "--timeout", "0"]).is_err());
    }
}
