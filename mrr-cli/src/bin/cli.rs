//! Command-line interface for the MiningRigRentals API.
//!
//! Starts an interactive shell by default. Trailing arguments run a single
//! shell command and exit, e.g. `mrr-cli get_algo sha256`.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;

use mrr_cli::api_client::ApiClient;
use mrr_cli::config::{self, Config, RawConfig};
use mrr_cli::shell::{Shell, Style};
use mrr_cli::tracing;

/// Raccoon MRR API client
#[derive(Parser)]
#[command(name = "mrr-cli")]
#[command(about = "Interactive client for the MiningRigRentals API")]
#[command(version)]
struct Cli {
    /// API base URL [default: $API_BASE_URL]
    #[arg(long)]
    base_url: Option<String>,

    /// API key [default: $API_KEY]. The secret is only read from $API_SECRET.
    #[arg(long)]
    api_key: Option<String>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Log requests at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Run one command and exit instead of starting the shell
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing::init_stderr(cli.verbose);

    config::load_dotenv(cli.env_file.as_deref())?;
    let raw = RawConfig::from_env().with_overrides(cli.base_url, cli.api_key);
    let config = Config::from_raw(raw)?;
    let client = ApiClient::new(&config)?;

    let stdout = std::io::stdout();
    let style = if stdout.is_terminal() {
        Style::colored()
    } else {
        Style::plain()
    };
    let mut shell = Shell::new(client, stdout.lock(), style);

    if !cli.command.is_empty() {
        shell.execute_line(&cli.command.join(" ")).await?;
        return Ok(());
    }

    shell.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}
