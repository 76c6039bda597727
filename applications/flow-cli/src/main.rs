/// Flow Player - command-line music client
use anyhow::bail;
use clap::{Parser, Subcommand};
use flow_api_client::{ApiClient, CatalogSource, RedirectOutcome};
use flow_cli::{AppEvent, Controller, FlowConfig, ShellCommand};
use flow_core::{Genre, OAuthTokenSet, SearchQuery};
use flow_playback::time::format_seconds;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flow")]
#[command(about = "Flow Player music client", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "FLOW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the authorization page URL
    AuthorizeUrl,
    /// Parse the URL the authorization page redirected to
    Login {
        /// Redirect URL from the browser address bar
        redirect: String,
    },
    /// Fetch a playlist and list its tracks
    Fetch {
        #[command(subcommand)]
        source: FetchSource,
        /// Redirect URL carrying the access token
        #[arg(short, long)]
        redirect: String,
    },
    /// List the popular-music genres
    Genres,
    /// Interactive player
    Shell {
        /// Redirect URL carrying the access token
        #[arg(short, long)]
        redirect: String,
    },
}

#[derive(Subcommand)]
enum FetchSource {
    /// Your own tracks
    Owned,
    /// Suggestions for you
    Suggested,
    /// Popular tracks in a genre
    Popular {
        #[arg(short, long)]
        genre: Genre,
    },
    /// Search the catalog
    Search {
        #[arg(short, long)]
        query: String,
        /// Match performer names only
        #[arg(short, long)]
        artist_only: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flow_cli=info,flow_playback=info,flow_api_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = FlowConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::AuthorizeUrl => {
            let client = ApiClient::new(config.api_config())?;
            println!("{}", client.authorize_url()?);
        }
        Commands::Login { redirect } => {
            let client = ApiClient::new(config.api_config())?;
            let tokens = authorize(&client, &redirect)?;
            println!("user_id:      {}", tokens.user_id);
            println!("expires_in:   {}", tokens.expires_in);
            println!("access_token: {}", tokens.access_token);
        }
        Commands::Fetch { source, redirect } => {
            fetch(&config, source, &redirect).await?;
        }
        Commands::Genres => {
            for genre in Genre::ALL {
                println!("{:>3}  {}", genre.id(), genre);
            }
        }
        Commands::Shell { redirect } => {
            shell(&config, &redirect).await?;
        }
    }

    Ok(())
}

fn authorize(client: &ApiClient, redirect: &str) -> anyhow::Result<OAuthTokenSet> {
    match client.handle_redirect(redirect)? {
        RedirectOutcome::Authorized(tokens) => Ok(tokens),
        RedirectOutcome::Denied { description } => bail!("Authorization denied: {}", description),
        RedirectOutcome::Ignored => bail!("Not an authorization redirect: {}", redirect),
    }
}

async fn fetch(config: &FlowConfig, source: FetchSource, redirect: &str) -> anyhow::Result<()> {
    let client = ApiClient::new(config.api_config())?;
    let tokens = authorize(&client, redirect)?;

    let tracks = match source {
        FetchSource::Owned => client.fetch_owned(&tokens).await?,
        FetchSource::Suggested => client.fetch_suggested(&tokens).await?,
        FetchSource::Popular { genre } => client.fetch_popular(&tokens, genre).await?,
        FetchSource::Search { query, artist_only } => {
            let query = SearchQuery::new(query).artist_only(artist_only);
            client.fetch_search(&tokens, &query).await?
        }
    };

    for (i, track) in tracks.iter().enumerate() {
        println!(
            "{:>4}. {}  [{}]",
            i + 1,
            track.display_title(),
            format_seconds(track.duration_secs())
        );
    }
    println!("{} tracks", tracks.len());

    Ok(())
}

async fn shell(config: &FlowConfig, redirect: &str) -> anyhow::Result<()> {
    let client = ApiClient::new(config.api_config())?;
    let tokens = authorize(&client, redirect)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let controller = Controller::new(config, tokens, Arc::new(client), tx.clone());

    // Stdin reader feeds commands into the same channel as everything else
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read input");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<ShellCommand>() {
                Ok(command) => {
                    if tx.send(AppEvent::Command(command)).is_err() {
                        return;
                    }
                }
                Err(e) => eprintln!("{}", e),
            }
        }
        let _ = tx.send(AppEvent::Command(ShellCommand::Quit));
    });

    println!("Type help for commands.");
    controller
        .run(rx, |notice| println!("{}", notice))
        .await;

    Ok(())
}

