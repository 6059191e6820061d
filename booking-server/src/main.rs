use std::net::SocketAddr;

use booking_server::policy::BookingConfig;
use booking_server::scheduling::{MockSchedulingClient, SchedulingClient, SchedulingConfig};
use booking_server::web::{AppState, SlotBackend, create_router};

/// Directory of mock slot inventories used when no API key is set.
const DEFAULT_MOCK_DATA_DIR: &str = "data/mock_slots";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_server=debug,tower_http=info".into()),
        )
        .init();

    // Pick the slot backend from the environment
    let backend = match std::env::var("SCHEDULING_API_KEY") {
        Ok(api_key) => {
            let mut config = SchedulingConfig::new(api_key);
            if let Ok(base_url) = std::env::var("SCHEDULING_BASE_URL") {
                config = config.with_base_url(base_url);
            }
            let client =
                SchedulingClient::new(config).expect("Failed to create scheduling client");
            SlotBackend::Api(client)
        }
        Err(_) => {
            let data_dir = std::env::var("MOCK_DATA_DIR")
                .unwrap_or_else(|_| DEFAULT_MOCK_DATA_DIR.to_string());
            eprintln!(
                "Warning: SCHEDULING_API_KEY not set. Serving mock slots from {data_dir}."
            );
            let client =
                MockSchedulingClient::new(&data_dir).expect("Failed to load mock slot data");
            SlotBackend::Mock(client)
        }
    };

    let state = AppState::new(backend, BookingConfig::default());
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Booking engine listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health             - Health check");
    println!("  POST /session            - Start a booking attempt");
    println!("  PUT  /session/centre     - Record the chosen test centre");
    println!("  POST /session/edit       - Enter re-scheduling mode");
    println!("  GET  /appointments       - Date/slot selection page data");
    println!("  POST /appointments/slot  - Record a chosen slot");
    println!("  POST /appointments/date  - Validate a day/month/year form");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
