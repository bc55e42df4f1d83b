//! # ration-hub
//!
//! Line-oriented shell over the ration stores.  Reads one JSON request per
//! line from stdin and answers with one JSON response per line on stdout.
//! See [`ration_app::ipc`] for the command set.

use anyhow::Context;
use ration_app::ipc::{self, Request, Response};
use ration_app::{init_tracing, AppConfig, AppState};
use ration_shared::constants::APP_NAME;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("Starting {APP_NAME} v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env();
    info!(?config, "Loaded configuration");

    let state = AppState::new(config);

    // Store change feed, surfaced at debug level.
    let mut events = state.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::debug!(?event, "store event"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event listener lagged")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut line = Vec::new();

    loop {
        line.clear();
        // Raw bytes, so a line that is not UTF-8 gets an error reply
        // instead of ending the session.
        if stdin.read_until(b'\n', &mut line).await.context("reading stdin")? == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = match ipc::parse_bytes(&line) {
            Ok(Request::Quit) => break,
            Ok(request) => ipc::dispatch(&state, request).await,
            Err(e) => Response::failure(&e),
        };

        let mut out = serde_json::to_vec(&response).context("encoding response")?;
        out.push(b'\n');
        stdout.write_all(&out).await.context("writing stdout")?;
        stdout.flush().await?;
    }

    info!("{APP_NAME} shutting down");
    Ok(())
}
