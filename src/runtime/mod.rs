use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};

use anyhow::Context;

use crate::api;
use crate::app::App;
use crate::backend;
use crate::library::{PlaylistFile, PlaylistStore};

mod cli;
mod settings;
mod startup;

pub use cli::Cli;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = settings::load_settings(&cli)?;

    startup::prepare_music_folder(&settings.library).with_context(|| {
        format!(
            "failed to prepare music folder {}",
            settings.library.music_folder.display()
        )
    })?;

    let backend = backend::select(&settings);
    let store = PlaylistStore::open(PlaylistFile::from_settings(&settings.library))
        .context("failed to load the playlist")?;
    let app: api::SharedApp = Arc::new(Mutex::new(App::new(store, backend, &settings.gpio)));

    let router = api::router(app.clone(), settings.server.static_dir.as_deref());

    let addr = SocketAddr::from((
        settings
            .server
            .host
            .parse::<IpAddr>()
            .with_context(|| format!("invalid server.host {:?}", settings.server.host))?,
        settings.server.port,
    ));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        music_folder = %settings.library.music_folder.display(),
        "pijukebox listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tokio::task::spawn_blocking(move || match app.lock() {
        Ok(mut app) => app.shutdown(),
        Err(_) => tracing::warn!("player state lock poisoned, skipping shutdown"),
    })
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
