use qamar_server::core::{AppState, Config, StoreBackendKind};
use qamar_server::create_router;
use qamar_server::monitoring::{PremiumMonitorConfig, start_premium_monitoring};
use qamar_server::repositories::{Backend, JsonFilePersistence, MemoryPersistence, Store};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inizializza il logging, RUST_LOG sovrascrive il filtro di default
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("qamar_server=debug,tower_http=info")),
        )
        .init();

    // Carica la configurazione dalle variabili d'ambiente
    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    config.print_info();

    // Apre lo store sul backend configurato
    let backend = match &config.store_backend {
        StoreBackendKind::Memory => Backend::Memory(MemoryPersistence::new()),
        StoreBackendKind::File(path) => Backend::JsonFile(JsonFilePersistence::new(path.clone())),
    };
    let store = Store::open(backend).await;
    let state = Arc::new(AppState::from_config(store, &config));

    // Avvia il controllo periodico delle scadenze premium
    tokio::spawn(start_premium_monitoring(
        state.clone(),
        PremiumMonitorConfig {
            interval_secs: config.premium_poll_secs,
        },
    ));

    let app = create_router(state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
