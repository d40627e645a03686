//! Request-level logging, request IDs, and parent trace extraction.

mod headers;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Wraps every request in an `http.request` span and logs its outcome.
///
/// `/metrics` scrapes pass straight through.
#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id = headers::request_id(req);
    headers::echo_request_id(res, &request_id);
    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let route = spans::request_span_name(&method, &path);
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %route.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent) = headers::trace_parent(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let status = res.status_code.unwrap_or(StatusCode::OK);
    let elapsed = started.elapsed();

    metrics::observe_request(
        &method,
        &route.otel_path,
        status.as_u16(),
        elapsed.as_secs_f64(),
    );

    span.record("status", status.as_u16());
    span.record("duration_ms", elapsed.as_millis());

    span.in_scope(|| log_completion(status, elapsed, settings::slow_request_threshold_ms()));
}

/// Emits `request.completed` at a level matching the status class.
fn log_completion(status: StatusCode, elapsed: Duration, slow_after_ms: u64) {
    let status = status.as_u16();
    let duration_ms = elapsed.as_millis();

    match status {
        500.. => error!(status, duration_ms, "request.completed"),
        400..=499 => warn!(status, duration_ms, "request.completed"),
        _ => info!(status, duration_ms, "request.completed"),
    }

    if duration_ms > u128::from(slow_after_ms) {
        warn!(duration_ms, threshold_ms = slow_after_ms, "request.slow");
    }
}
