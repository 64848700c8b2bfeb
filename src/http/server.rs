//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: auth subtree handlers + catch-all forwarder
//! - Wire up middleware (timeout, request ID, tracing, global admission)
//! - Instantiate the two gates against the shared decision client
//! - Forward passed-through requests to the delegated upstreams
//! - Graceful shutdown

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{
        uri::{Authority, Scheme},
        Request, StatusCode, Uri,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GateConfig;
use crate::decision::types::DecisionError;
use crate::decision::{DecisionClient, RequestMeta};
use crate::http::middleware::global_admission;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::security::{
    Admission, Gate, PolicyBundle, AUTH_READ_DENIALS, AUTH_WRITE_DENIALS,
};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub global_gate: Arc<Gate>,
    pub auth_gate: Arc<Gate>,
    pub client: Client<HttpConnector, Body>,
    pub config: Arc<GateConfig>,
}

/// HTTP server for the admission gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new server with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the decision client cannot be built from the
    /// configured endpoint.
    pub fn new(config: GateConfig) -> Result<Self, DecisionError> {
        let decision_client = DecisionClient::new(&config.decision)?;

        let global_gate = Arc::new(Gate::new(
            decision_client.clone(),
            PolicyBundle::global(&config.policies.global),
        ));
        let auth_gate = Arc::new(Gate::new(
            decision_client,
            PolicyBundle::auth(&config.policies.auth),
        ));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            global_gate,
            auth_gate,
            client,
            config: Arc::new(config),
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let auth_route = format!("{}{{*rest}}", state.config.auth.path_prefix);
        let request_timeout = Duration::from_secs(state.config.timeouts.request_secs);

        Router::new()
            .route(&auth_route, get(auth_read).post(auth_write))
            .route("/{*path}", any(app_handler))
            .route("/", any(app_handler))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                global_admission,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops on Ctrl+C or when the shutdown receiver fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {}
                    () = shutdown_signal() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Auth subtree reads: evaluate the auth bundle, then delegate.
async fn auth_read(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let meta = RequestMeta::from_request(addr.ip(), &request);
    match state.auth_gate.admit(&meta, &AUTH_READ_DENIALS).await {
        Admission::Denied(response) => response,
        Admission::Pass => forward(&state, request, Upstream::Auth).await,
    }
}

/// Auth subtree writes: same policy, write-flavored denial payloads.
async fn auth_write(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let meta = RequestMeta::from_request(addr.ip(), &request);
    match state.auth_gate.admit(&meta, &AUTH_WRITE_DENIALS).await {
        Admission::Denied(response) => response,
        Admission::Pass => forward(&state, request, Upstream::Auth).await,
    }
}

/// Everything outside the auth subtree: the global admission middleware has
/// already run; just forward to the application backend.
async fn app_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    forward(&state, request, Upstream::App).await
}

/// Which delegated backend a pass-through goes to.
#[derive(Debug, Clone, Copy)]
enum Upstream {
    App,
    Auth,
}

impl Upstream {
    fn label(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Auth => "auth",
        }
    }

    fn address(self, config: &GateConfig) -> &str {
        match self {
            Self::App => &config.upstreams.app_address,
            Self::Auth => &config.upstreams.auth_address,
        }
    }
}

/// Forward a request verbatim to the selected upstream and stream the
/// response back. The request ID inserted at ingress rides along in the
/// headers.
async fn forward(state: &AppState, request: Request<Body>, upstream: Upstream) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let address = upstream.address(&state.config).to_string();
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = match Authority::from_str(&address) {
        Ok(authority) => Some(authority),
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                upstream = upstream.label(),
                error = %e,
                "Invalid upstream authority"
            );
            metrics::record_request(&method, 502, upstream.label(), started);
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };
    parts.uri = Uri::from_parts(uri_parts).unwrap_or(parts.uri);

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let status = response.status();
            tracing::debug!(
                request_id = %request_id,
                upstream = upstream.label(),
                status = %status,
                "Forwarded request"
            );
            metrics::record_request(&method, status.as_u16(), upstream.label(), started);

            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                upstream = upstream.label(),
                error = %e,
                "Upstream error"
            );
            metrics::record_request(&method, 502, upstream.label(), started);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
