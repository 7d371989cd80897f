//! Subscriber setup and the per-request span used by the HTTP trace layer.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Response},
};
use tracing::{field, Span};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "recipebook=debug,axum=info,tower_http=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Anything other than `json` falls back to human-readable text.
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter and
/// `LOG_FORMAT=json` switches to one JSON object per line.
pub fn init() {
    let format = LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = match format {
        LogFormat::Json => fmt::layer().json().with_target(false).boxed(),
        LogFormat::Text => fmt::layer().with_target(true).boxed(),
    };

    tracing_subscriber::registry().with(layer).with(filter).init();
}

pub fn request_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %req.method(),
        path = req.uri().path(),
        status = field::Empty,
        latency_ms = field::Empty,
    )
}

pub fn record_response(res: &Response<Body>, latency: Duration, span: &Span) {
    let status = res.status();
    span.record("status", status.as_u16());
    span.record("latency_ms", latency.as_millis() as u64);
    if status.is_server_error() {
        tracing::error!(parent: span, "request failed");
    } else {
        tracing::debug!(parent: span, "request finished");
    }
}
