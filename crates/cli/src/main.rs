use anyhow::{Context, Result};
use catalog::{SearchQuery, Suggestion};
use clap::{Parser, Subcommand};
use colored::Colorize;
use server::{AppState, Settings, SuggestOrchestrator};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

/// tunescout - music suggestions from YouTube search, curated by an LLM
#[derive(Parser)]
#[command(name = "tunescout")]
#[command(about = "Music video suggestions with optional LLM re-ranking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind
        #[arg(long, default_value = "8000")]
        port: u16,
    },

    /// Run one suggestion request and print the results
    Suggest {
        /// Music genre, e.g. "lofi"
        #[arg(long)]
        genre: String,

        /// Mood hint, e.g. "chill"
        #[arg(long)]
        mood: Option<String>,

        /// Era hint, e.g. "90s"
        #[arg(long)]
        era: Option<String>,

        /// Language hint, e.g. "es"
        #[arg(long)]
        language: Option<String>,

        /// Number of suggestions to return (1-25)
        #[arg(long)]
        limit: Option<i64>,

        /// Show the curator's reason and tags for each suggestion
        #[arg(long)]
        explain: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env().context("Failed to load settings from environment")?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Serve { host, port } => handle_serve(settings, host, port).await?,
        Commands::Suggest {
            genre,
            mood,
            era,
            language,
            limit,
            explain,
        } => {
            let query = SearchQuery::new(genre, mood, era, language, limit)
                .context("Invalid suggestion request")?;
            handle_suggest(settings, query, explain).await?
        }
    }

    Ok(())
}

/// Handle the 'serve' command
async fn handle_serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

    info!(
        "Starting tunescout (llm_provider: {}, rate_limit: {}/{:?}, auth: {})",
        settings.llm_provider,
        settings.rate_limit.max_requests,
        settings.rate_limit.window,
        if settings.api_token.is_some() { "on" } else { "off" }
    );

    let state = AppState::from_settings(settings)?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    server::serve(listener, state, shutdown_signal()).await
}

/// Handle the 'suggest' command
async fn handle_suggest(settings: Settings, query: SearchQuery, explain: bool) -> Result<()> {
    let orchestrator = SuggestOrchestrator::new(Arc::new(settings))?;

    let start = Instant::now();
    let response = orchestrator.suggest(&query).await?;

    print_suggestions(&query, &response.suggestions, explain);
    println!(
        "{} {} of {} candidates in {:.2?}",
        "✓".green(),
        response.source_counts.suggestion_count,
        response.source_counts.candidate_count,
        start.elapsed()
    );
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}

/// Helper function to format and print suggestions
fn print_suggestions(query: &SearchQuery, suggestions: &[Suggestion], explain: bool) {
    println!(
        "{}",
        format!("Suggestions for '{}':", query.search_text()).bold().blue()
    );
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!(
            "{}. {} - {}",
            (i + 1).to_string().green(),
            suggestion.title.as_deref().unwrap_or("(untitled)"),
            suggestion
                .channel_title
                .as_deref()
                .unwrap_or("unknown channel")
                .dimmed()
        );
        if let Some(url) = &suggestion.url {
            println!("   {}", url.cyan());
        }
        if explain {
            if !suggestion.reason.is_empty() {
                println!("   Reason: {}", suggestion.reason);
            }
            if !suggestion.tags.is_empty() {
                println!("   Tags: {}", suggestion.tags.join(", "));
            }
        }
    }
}
