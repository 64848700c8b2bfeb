//! Global admission middleware.
//!
//! Runs for every inbound path. Auth-subtree requests skip security
//! evaluation here (their own gate runs in the route handlers) and go
//! straight to the cross-origin step. Everything else is evaluated under
//! the global bundle; denials return early, errors fall through.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::decision::RequestMeta;
use crate::http::server::AppState;
use crate::security::cors::apply_cors;
use crate::security::{Admission, GLOBAL_DENIALS};

pub async fn global_admission(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let is_auth_path = request
        .uri()
        .path()
        .starts_with(state.config.auth.path_prefix.as_str());

    if is_auth_path {
        let mut response = next.run(request).await;
        apply_cors(response.headers_mut(), &state.config.cors.origin);
        return response;
    }

    let meta = RequestMeta::from_request(addr.ip(), &request);
    match state.global_gate.admit(&meta, &GLOBAL_DENIALS).await {
        Admission::Denied(response) => response,
        Admission::Pass => {
            let mut response = next.run(request).await;
            apply_cors(response.headers_mut(), &state.config.cors.origin);
            response
        }
    }
}
