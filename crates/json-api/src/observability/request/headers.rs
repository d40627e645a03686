//! Inbound header handling for request ids and W3C trace parents.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::{
    Request,
    http::{HeaderMap, HeaderName, header::HeaderValue},
    prelude::Response,
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID: &str = "x-request-id";

/// Reuse the caller's request id, minting a fresh one when it is missing or blank.
pub(super) fn request_id(req: &Request) -> String {
    req.header::<String>(REQUEST_ID)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

pub(super) fn echo_request_id(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID, value);
        }
        Err(source) => warn!(request_id, "request id is not a valid header value: {source}"),
    }
}

pub(super) fn trace_parent(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so requests without trace headers become roots.
        let context = propagator.extract_with_context(&Context::new(), &Carrier(headers));
        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

#[derive(Debug)]
struct Carrier<'a>(&'a HeaderMap);

impl Extractor for Carrier<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
