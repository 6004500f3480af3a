//! Handler for rotation redirects.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use metrics::counter;
use std::net::SocketAddr;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Serves the next destination in a link's rotation.
///
/// # Endpoint
///
/// `GET /r/{key}`
///
/// # Request Flow
///
/// 1. Resolve the key to a destination (cache first, database on a miss)
/// 2. Enqueue a click event on the bounded channel (fire-and-forget)
/// 3. Return 302 Found with the destination in `Location`
///
/// # Click Tracking
///
/// Click events are sent to a bounded channel for async processing. If the
/// queue is full the click is dropped and counted; the redirect is never
/// delayed by accounting.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown key, an inactive link, or a link
/// with no destinations. The response body never reveals which.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let resolution = state.resolver.resolve(&key).await?;

    let click_event = ClickEvent::new(
        resolution.link_id,
        resolution.destination_id,
        resolution.url.clone(),
        Some(client_ip(&headers, addr, state.behind_proxy)),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    if state.click_sender.try_send(click_event).is_err() {
        warn!(key, "click queue full or closed, dropping click");
        counter!("clicks_dropped_total").increment(1);
    }

    // 302, matching longstanding client expectations for rotating links:
    // intermediaries must not cache the destination of any single hit.
    Ok((StatusCode::FOUND, [(header::LOCATION, resolution.url)]))
}
