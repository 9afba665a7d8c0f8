use crate::gate::{session, AppState};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use std::{future::Future, time::Duration};
use tracing::{debug, instrument};

/// Resolved authentication state as seen from the confirmation page. A
/// tri-state rather than two booleans so "still loading" cannot be confused
/// with "signed out".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// How long the confirmation page waits for the state to settle before it
/// gives up and renders the holding page instead.
pub const CONFIRM_PATIENCE: Duration = Duration::from_millis(800);

/// Wait for the asynchronous authentication check to settle, up to
/// `patience`. While the state is unknown the caller must not redirect.
pub async fn resolve<F>(check: F, patience: Duration) -> AuthState
where
    F: Future<Output = AuthState>,
{
    tokio::time::timeout(patience, check)
        .await
        .unwrap_or(AuthState::Unknown)
}

/// Second-stage confirmation for the generic auth landing page.
///
/// The edge gate may have decided on stale state, or the page was reached
/// directly. Once the session state settles this answers with the definitive
/// redirect; while it is still unknown it renders a neutral holding page
/// that retries, never a premature redirect.
#[utoipa::path(
    get,
    path = "/auth",
    responses(
        (status = 307, description = "Authentication state resolved, follow the redirect"),
        (status = 200, description = "State not resolved yet, holding page with retry"),
    ),
    tag = "auth",
)]
#[instrument(skip(state, headers))]
pub async fn confirm(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let check = async {
        match session::credential(&headers, &state.config.session_cookie) {
            Some(token) => {
                if state.verifier.verify(&token).await.valid {
                    AuthState::Authenticated
                } else {
                    AuthState::Unauthenticated
                }
            }
            None => AuthState::Unauthenticated,
        }
    };

    let resolved = resolve(check, CONFIRM_PATIENCE).await;
    debug!(?resolved, "confirmation state");

    match resolved {
        AuthState::Authenticated => Redirect::temporary(&state.config.landing_path).into_response(),
        AuthState::Unauthenticated => {
            Redirect::temporary(&state.config.sign_in_path).into_response()
        }
        AuthState::Unknown => {
            (StatusCode::OK, [("refresh", "1")], "Checking your session...").into_response()
        }
    }
}
