use crate::gate;
use anyhow::Result;
use std::time::Duration;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub verify_url: Url,
    pub verify_timeout: Duration,
    pub session_cookie: String,
    pub sign_in_path: String,
    pub landing_path: String,
    pub public_routes: Vec<String>,
}

/// Run the access gate server.
/// # Errors
/// Returns an error if the route table is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    gate::serve(args).await
}
