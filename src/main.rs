use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use tinylink::{cli, config, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Base URL of the shortening backend (overrides TINYLINK_BACKEND_URL)
    #[clap(long, global = true)]
    backend: Option<String>,

    /// Print diagnostic logs to stderr
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Shorten a long URL
    Shorten(ShortenOptions),

    /// Show click statistics for a short URL or short code
    Stats(StatsOptions),

    /// Start an interactive session
    Session,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ShortenOptions {
    /// The URL to shorten
    pub url: String,

    /// Copy the short URL to the clipboard
    #[clap(long)]
    pub copy: bool,

    /// Fetch statistics for the new short URL right away
    #[clap(long)]
    pub stats: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// Short URL (or bare short code) to look up
    pub target: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "tinylink=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let mut client_config = match config::ClientConfig::from_env() {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };
    if let Some(backend) = &cli.backend {
        client_config = match client_config.with_base_url(backend) {
            Ok(c) => c,
            Err(e) => error!("{}", e),
        };
    }

    match cli.command {
        Command::Shorten(opt) => cli::shorten(client_config, opt.url, opt.copy, opt.stats).await,
        Command::Stats(opt) => cli::stats(client_config, opt.target).await,
        Command::Session => cli::session(client_config).await,
        Command::Completions(_) => {}
    }
}
