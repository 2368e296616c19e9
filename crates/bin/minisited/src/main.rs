//! # minisited — minisite daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize logging
//! - Construct the remote sources (adapters)
//! - Construct application services, injecting sources via port traits
//! - Generate the static pages before accepting requests
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), then stop every poller
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use minisite_adapter_http_axum::state::AppState;
use minisite_adapter_remote_reqwest::{
    RemoteBlogSource, RemoteClient, RemoteClockSource, RemotePokemonSource,
};
use minisite_app::services::blog_service::BlogService;
use minisite_app::services::pokemon_service::PokemonService;
use minisite_app::services::time_service::TimeService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_logging(&config.logging.filter);
    for (page, settings) in config.pages.entries() {
        tracing::info!(page, load = ?settings.load, on_error = ?settings.on_error, "page settings");
    }

    // Sources
    let client = RemoteClient::new(&config.remote)?;
    let blog_source = RemoteBlogSource::new(client.clone());
    let pokemon_source = RemotePokemonSource::new(client.clone());
    let clock_source = RemoteClockSource::new(client);

    // Services
    let blog_service = Arc::new(BlogService::new(
        blog_source,
        config.pages.blogs,
        config.pages.blog_detail,
    ));
    let pokemon_service = Arc::new(PokemonService::new(pokemon_source, config.pages.pokemon));
    let time_service = Arc::new(TimeService::new(clock_source, config.pages.home));

    // Static generation
    let (blog_pages, pokemon_pages, ()) = tokio::join!(
        blog_service.prerender(),
        pokemon_service.prerender(),
        time_service.prerender(),
    );
    tracing::info!(blog_pages, pokemon_pages, "static pages generated");

    // HTTP
    let state = AppState::from_arcs(
        Arc::clone(&blog_service),
        Arc::clone(&pokemon_service),
        Arc::clone(&time_service),
    );
    let app = minisite_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "minisited listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    blog_service.shutdown();
    pokemon_service.shutdown();
    time_service.shutdown();
    tracing::info!("minisited stopped");

    Ok(())
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?}: {err}, falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves on the first SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
