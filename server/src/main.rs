use hoops_server::config::ServerConfig;
use hoops_server::game_loop::{run_game_loop, GameBroadcast, GameCommand};
use hoops_server::ws::{router, AppState};
use tokio::sync::{broadcast, mpsc};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();

    // Validate configuration before starting
    if let Err(e) = config.validate() {
        tracing::error!("Invalid server configuration: {}", e);
        std::process::exit(1);
    }

    let listen_addr = config.listen_addr.clone();

    let (game_tx, game_rx) = mpsc::channel::<GameCommand>(256);
    let (broadcast_tx, _) = broadcast::channel::<GameBroadcast>(64);

    let bc_tx = broadcast_tx.clone();
    tokio::spawn(async move {
        run_game_loop(game_rx, bc_tx, config).await;
    });

    let app = router(AppState {
        game_tx,
        broadcast_tx,
    });

    let listener = match tokio::net::TcpListener::bind(&listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", listen_addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Hoops server listening on {}", listen_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
