use tracing_subscriber::EnvFilter;

use travellersmeet::server::{
    config::Config, model::app::AppState, router, scheduler::Scheduler, startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), travellersmeet::server::error::Error> {
    let db = startup::connect_to_database(&config).await?;
    let session = startup::build_session_layer(&db);
    let http_client = startup::build_http_client()?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let mut scheduler = Scheduler::new(db.clone()).await?.start().await?;

    if config.email.resend_api_key.is_none() {
        tracing::warn!("RESEND_API_KEY is not set, verification codes will be logged instead of emailed");
    }
    if config.chat.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set, the chat assistant is disabled");
    }

    let app = router::routes()
        .with_state(AppState::new(db, http_client, &config))
        .layer(session);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Starting server on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    scheduler.shutdown().await?;

    Ok(())
}
