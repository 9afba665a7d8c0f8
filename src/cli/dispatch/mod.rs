use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let verify_url = matches
        .get_one::<String>("verify-url")
        .context("missing required argument: --verify-url")?;
    let verify_url = Url::parse(verify_url).context("invalid DOGANA_VERIFY_URL")?;

    let verify_timeout = Duration::from_millis(
        matches
            .get_one::<u64>("verify-timeout-ms")
            .copied()
            .unwrap_or(3000),
    );

    let session_cookie = matches
        .get_one::<String>("session-cookie")
        .cloned()
        .unwrap_or_else(|| "__session".to_string());

    let sign_in_path = matches
        .get_one::<String>("sign-in-path")
        .cloned()
        .unwrap_or_else(|| "/sign-in".to_string());

    let landing_path = matches
        .get_one::<String>("landing-path")
        .cloned()
        .unwrap_or_else(|| "/dashboard".to_string());

    let public_routes = matches
        .get_many::<String>("public-route")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    Ok(Action::Server(Args {
        port,
        verify_url,
        verify_timeout,
        session_cookie,
        sign_in_path,
        landing_path,
        public_routes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_defaults() {
        let matches = commands::new()
            .get_matches_from(vec!["dogana", "--verify-url", "https://id.tld/verify"]);

        let Action::Server(args) = handler(&matches).expect("handler should succeed");

        assert_eq!(args.port, 8080);
        assert_eq!(args.verify_url.as_str(), "https://id.tld/verify");
        assert_eq!(args.verify_timeout, Duration::from_millis(3000));
        assert_eq!(args.session_cookie, "__session");
        assert_eq!(args.sign_in_path, "/sign-in");
        assert_eq!(args.landing_path, "/dashboard");
        assert!(args.public_routes.is_empty());
    }

    #[test]
    fn test_handler_rejects_bad_url() {
        let matches =
            commands::new().get_matches_from(vec!["dogana", "--verify-url", "not a url"]);

        assert!(handler(&matches).is_err());
    }
}
