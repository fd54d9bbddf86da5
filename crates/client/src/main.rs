//! `eventboard-client` -- terminal UI for the Eventboard API.
//!
//! # Environment variables
//!
//! | Variable         | Default                               |
//! |------------------|---------------------------------------|
//! | `EVENTS_API_URL` | `http://localhost:3000/api/v1/events` |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventboard_client::api::EventsClient;
use eventboard_client::config::ClientConfig;
use eventboard_client::session::Session;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they do not interleave with the UI on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventboard_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.api_url, "Starting eventboard-client");

    let client = EventsClient::new(config.api_url.clone());
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();

    let mut session = Session::new(client, config, input, output);
    if let Err(e) = session.run().await {
        tracing::error!(error = %e, "Terminal I/O failed");
        std::process::exit(1);
    }
}
