use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use profile_badges::render::{render_card, render_error_card};
use profile_badges::{
    AppState, CardKind, Config, GitHubClient, PipelineConfig, ProfileAggregator, Theme,
};

#[derive(Parser, Debug)]
#[command(name = "profile-badges")]
#[command(version = "0.1.0")]
#[command(about = "Serve or render SVG cards summarizing a GitHub profile")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the cards over HTTP
    Serve {
        /// Address to listen on (overrides BIND_ADDR)
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// Render a single card once
    Render {
        /// Card to render
        #[arg(value_enum)]
        kind: CardKind,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Color theme (overrides THEME)
        #[arg(short, long)]
        theme: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("profile_badges=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::from_env()?;

    match args.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            let addr = config.bind_addr;
            let state = AppState::from_config(config)?;
            profile_badges::server::serve(state, addr).await?;
        }
        Command::Render {
            kind,
            output,
            theme,
        } => {
            let theme = Theme::named(theme.as_deref().unwrap_or(&config.theme));
            render_once(&config, kind, &theme, output).await?;
        }
    }

    Ok(())
}

/// Renders one card. On failure the error card is still written so the
/// output file is never left stale, and the error is returned.
async fn render_once(
    config: &Config,
    kind: CardKind,
    theme: &Theme,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Building {} card", kind));

    let rendered = match config.credentials() {
        Ok(credentials) => {
            let client = GitHubClient::with_base_url(&credentials.token, &config.api_base_url)?;
            let aggregator = ProfileAggregator::new(
                Arc::new(client),
                &credentials.login,
                PipelineConfig::from(config),
            );
            render_card(&aggregator, kind, theme).await
        }
        Err(e) => Err(e),
    };
    spinner.finish_and_clear();

    let (svg, result) = match rendered {
        Ok(svg) => (svg, Ok(())),
        Err(e) => {
            tracing::error!("Failed to build {} card: {}", kind, e);
            (render_error_card(&e.card_message(), theme), Err(e.into()))
        }
    };

    if let Some(ref path) = output {
        std::fs::write(path, &svg)?;
        tracing::info!("Card written to: {}", path.display());
    } else {
        println!("{}", svg);
    }

    result
}
