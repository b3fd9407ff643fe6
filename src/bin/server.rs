use movie_corner::server::{self, AppState, ServerConfig};
use movie_corner::store::InMemoryDocumentStore;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return Err(err.into());
        }
    };
    init_tracing(config.log_json);

    let state = AppState::new(InMemoryDocumentStore::new(), &config);
    let addr = format!("0.0.0.0:{}", config.port);
    info!(port = config.port, origins = ?config.cors_origins, "starting auth backend");

    if let Err(err) = server::serve(state, &addr).await {
        error!(error = %err, "server stopped");
        return Err(err.into());
    }
    Ok(())
}
