//! Inbound webhook surface: axum router and the event dispatcher.
//!
//! A single `POST /slack/events` route receives Slack Events API deliveries.
//! The handler keeps the raw body bytes so the signature is computed over
//! the exact wire payload, runs the dispatch state machine, and maps its
//! outcome to an HTTP response exactly once. No component below this module
//! knows about status codes.

pub mod signature;

use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{error, info, instrument, warn};

use crate::{
    base::{
        prompts,
        types::{Admission, EventPayload, Intent, Outcome, Res, Void},
    },
    interaction::{intent, review},
    runtime::Runtime,
};

/// `X-Slack-Request-Timestamp`: the timestamp used in the signature base string.
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
/// `X-Slack-Signature`: the `v0=` hex signature.
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// Bind the webhook server and serve until shutdown.
pub async fn serve(runtime: Runtime) -> Void {
    let addr = runtime.config.bind_addr.clone();
    let app = router(runtime);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Build the webhook router.
pub fn router(runtime: Runtime) -> Router {
    Router::new().route("/slack/events", post(handle_event)).with_state(runtime)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

/// HTTP boundary: runs the dispatcher and maps its outcome to a response.
#[instrument(skip_all)]
async fn handle_event(State(runtime): State<Runtime>, headers: HeaderMap, body: Bytes) -> Response {
    match dispatch(&runtime, &headers, &body).await {
        Ok(Outcome::Unauthorized) => (StatusCode::UNAUTHORIZED, "Invalid signature").into_response(),
        Ok(Outcome::Challenge(challenge)) => (StatusCode::OK, challenge).into_response(),
        Ok(Outcome::Duplicate) => (StatusCode::OK, "Duplicate").into_response(),
        Ok(Outcome::Cancelled) => (StatusCode::OK, "Canceled").into_response(),
        Ok(Outcome::Ignored) => (StatusCode::OK, "OK").into_response(),
        Ok(Outcome::Reviewed) => (StatusCode::OK, "Review complete").into_response(),
        Err(err) => {
            error!("Error while handling event: {err:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Dispatch one inbound request through the pipeline.
///
/// Sequence: signature verification → payload parse → challenge
/// short-circuit → dedup admission → intent classification → branch. The
/// challenge answer comes before dedup because verification handshakes carry
/// no event `ts`. The dedup marker is written at admission, so a run that
/// fails downstream is not retried within the TTL window.
pub async fn dispatch(runtime: &Runtime, headers: &HeaderMap, body: &[u8]) -> Res<Outcome> {
    let timestamp = header_str(headers, TIMESTAMP_HEADER);
    let sig = header_str(headers, SIGNATURE_HEADER);

    let (Some(timestamp), Some(sig)) = (timestamp, sig) else {
        return Ok(Outcome::Unauthorized);
    };

    let tolerance = runtime.config.signature_tolerance_secs as i64;
    if !signature::verify(timestamp, sig, body, &runtime.config.slack_signing_secret, tolerance) {
        return Ok(Outcome::Unauthorized);
    }

    let payload: EventPayload = serde_json::from_slice(body)?;

    let event = match payload {
        EventPayload::UrlVerification { challenge } => return Ok(Outcome::Challenge(challenge)),
        EventPayload::Other => {
            warn!("Received unhandled payload type.");
            return Ok(Outcome::Ignored);
        }
        EventPayload::EventCallback { event } => event,
    };

    let ttl = Duration::from_secs(runtime.config.dedup_ttl_secs);
    if runtime.cache.set_if_absent(&event.ts, ttl).await? == Admission::Duplicate {
        info!("Duplicate event: {}", event.ts);
        return Ok(Outcome::Duplicate);
    }

    match intent::classify(event.text.as_deref()) {
        Intent::Cancel => {
            runtime.chat.send_message(&event.channel, &event.ts, prompts::CANCEL_ACK).await?;
            Ok(Outcome::Cancelled)
        }
        Intent::Trigger(article) => {
            review::run(&runtime.article, &runtime.llm, &runtime.chat, &event.channel, &event.ts, &article).await?;
            Ok(Outcome::Reviewed)
        }
        Intent::Ignore => Ok(Outcome::Ignored),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
