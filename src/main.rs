use dotenvy::dotenv;
use tracing::info;
use tutordesk::logging::init_tracing;
use tutordesk::router::init_router;
use tutordesk::state::init_app_state;
use tutordesk_config::ServerConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();
    let state = init_app_state(&server_config).await;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&server_config.addr)
        .await
        .expect("Failed to bind server address");

    info!(addr = %server_config.addr, "Server running");
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app).await.expect("Server error");
}
