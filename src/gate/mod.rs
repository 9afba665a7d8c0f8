use crate::cli::actions::server::Args;
use anyhow::Result;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug, debug_span, info, Span};
use ulid::Ulid;
use utoipa::OpenApi;

pub mod confirm;
pub mod decision;
pub mod routes;
pub mod session;
pub mod verifier;

mod handlers;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health::health, confirm::confirm),
    tags(
        (name = "dogana", description = "Edge access gate API"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Redirect targets and the observed session cookie. Immutable once the
/// server is up.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub sign_in_path: String,
    pub landing_path: String,
    pub session_cookie: String,
}

#[derive(Clone)]
pub struct AppState {
    pub table: Arc<routes::RouteTable>,
    pub config: Arc<GateConfig>,
    pub verifier: verifier::Verifier,
}

/// Gate adapter: resolves the session, runs the decision table, and either
/// forwards the request or answers with the redirect. The table and decision
/// logic live in their own modules so they stay testable without a server.
async fn access_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    if routes::bypass(&path) {
        return next.run(request).await;
    }

    let session = match session::credential(request.headers(), &state.config.session_cookie) {
        Some(token) => state.verifier.verify(&token).await,
        None => verifier::VerifiedSession::absent(),
    };

    let original = match request.uri().query() {
        Some(query) => format!("{path}?{query}"),
        None => path.clone(),
    };

    let decision = decision::decide(&state.table, &state.config, &path, &original, session.valid);
    debug!(path, session.valid, ?decision, "gate decision");

    match decision.location() {
        None => {
            if let Some(subject) = session.subject_id {
                debug!(subject, "session verified");
            }
            next.run(request).await
        }
        Some(location) => Redirect::temporary(&location).into_response(),
    }
}

/// Assemble the gate router around the given state.
///
/// `/auth` and `/health` sit outside the gate layer: the confirmation page
/// performs its own check, and health must answer without a session.
#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        // allow `GET` and `POST` when accessing the resource
        .allow_methods([Method::GET, Method::POST])
        // allow requests from any origin
        .allow_origin(Any);

    Router::new()
        .fallback(handlers::passthrough)
        .layer(middleware::from_fn_with_state(state.clone(), access_gate))
        .route("/auth", get(confirm::confirm))
        .route("/health", get(handlers::health).options(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors),
        )
        .with_state(state)
}

/// Bind and serve the access gate.
/// # Errors
/// Returns an error if the route table is invalid or the server fails to start
pub async fn serve(args: Args) -> Result<()> {
    let table = routes::RouteTable::with_defaults(&args.public_routes)?;

    let config = GateConfig {
        sign_in_path: args.sign_in_path,
        landing_path: args.landing_path,
        session_cookie: args.session_cookie,
    };

    let verifier = verifier::Verifier::new(args.verify_url, args.verify_timeout)?;

    let state = AppState {
        table: Arc::new(table),
        config: Arc::new(config),
        verifier,
    };

    let listener = TcpListener::bind(format!("::0:{}", args.port)).await?;

    info!("Listening on [::]:{}", args.port);

    axum::serve(listener, app(state).into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, request_id)
}
