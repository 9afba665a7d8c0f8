use anyhow::{Context, Result};
use regex::Regex;

/// Routes reachable without a session. Patterns are regex fragments anchored
/// to the full path component at compile time.
pub const DEFAULT_PUBLIC_ROUTES: &[&str] =
    &["/", "/sign-in(.*)", "/sign-up(.*)", "/sso-callback(.*)"];

/// External callback endpoints. Kept as a dedicated rule, never folded into
/// the public list: the caller is another system, not a browser session.
pub const WEBHOOK_ROUTE: &str = "/api/webhooks(.*)";

const STATIC_PREFIXES: &[&str] = &["/static/", "/assets/"];

const STATIC_EXTENSIONS: &[&str] = &[
    "css", "js", "map", "ico", "png", "jpg", "jpeg", "gif", "svg", "webp", "avif", "woff",
    "woff2", "ttf", "txt", "xml", "webmanifest",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
}

/// Compiled route matcher table, immutable after startup.
#[derive(Debug)]
pub struct RouteTable {
    public: Vec<Regex>,
    webhooks: Regex,
}

impl RouteTable {
    /// Compile the matcher table.
    ///
    /// # Errors
    /// Returns an error if any pattern fails to compile; the server must not
    /// start serving with an invalid table.
    pub fn new<I, S>(public: I, webhooks: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let public = public
            .into_iter()
            .map(|pattern| compile(pattern.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            public,
            webhooks: compile(webhooks)?,
        })
    }

    /// Default table plus any extra public patterns from the configuration.
    ///
    /// # Errors
    /// Returns an error if any pattern fails to compile.
    pub fn with_defaults(extra: &[String]) -> Result<Self> {
        let patterns = DEFAULT_PUBLIC_ROUTES
            .iter()
            .map(|pattern| (*pattern).to_string())
            .chain(extra.iter().cloned());

        Self::new(patterns, WEBHOOK_ROUTE)
    }

    /// Classify a path. Matching is case-sensitive and considers the path
    /// component only. Unrecognized paths are protected.
    #[must_use]
    pub fn classify(&self, path: &str) -> Visibility {
        if self.is_webhook(path) || self.public.iter().any(|re| re.is_match(path)) {
            Visibility::Public
        } else {
            Visibility::Protected
        }
    }

    #[must_use]
    pub fn is_webhook(&self, path: &str) -> bool {
        self.webhooks.is_match(path)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^{pattern}$"))
        .with_context(|| format!("invalid route pattern: {pattern}"))
}

/// Paths the gate never intercepts: static asset namespaces, the favicon and
/// non-API paths carrying a common static file extension.
#[must_use]
pub fn bypass(path: &str) -> bool {
    if path == "/favicon.ico" || STATIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return true;
    }

    if path.starts_with("/api/") {
        return false;
    }

    match path.rsplit_once('.') {
        Some((_, extension)) => STATIC_EXTENSIONS.contains(&extension),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::with_defaults(&[]).expect("default table should compile")
    }

    #[test]
    fn test_default_public_routes() {
        let table = table();

        assert_eq!(table.classify("/"), Visibility::Public);
        assert_eq!(table.classify("/sign-in"), Visibility::Public);
        assert_eq!(table.classify("/sign-in/factor-one"), Visibility::Public);
        assert_eq!(table.classify("/sign-up"), Visibility::Public);
        assert_eq!(table.classify("/sso-callback"), Visibility::Public);
        assert_eq!(table.classify("/api/webhooks/courier"), Visibility::Public);
    }

    #[test]
    fn test_protected_routes() {
        let table = table();

        assert_eq!(table.classify("/dashboard"), Visibility::Protected);
        assert_eq!(table.classify("/orders/new"), Visibility::Protected);
        assert_eq!(table.classify("/settings/addresses"), Visibility::Protected);
    }

    #[test]
    fn test_unknown_paths_default_to_protected() {
        let table = table();

        assert_eq!(table.classify("/no-such-page"), Visibility::Protected);
        assert_eq!(table.classify("/api/orders"), Visibility::Protected);
    }

    #[test]
    fn test_root_pattern_is_exact() {
        let table = table();

        // "/" must not shadow every other path
        assert_eq!(table.classify("/dashboard"), Visibility::Protected);
        assert_eq!(table.classify("/"), Visibility::Public);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let table = table();

        assert_eq!(table.classify("/Sign-In"), Visibility::Protected);
    }

    #[test]
    fn test_webhooks_are_dedicated() {
        let table = table();

        assert!(table.is_webhook("/api/webhooks/courier"));
        assert!(table.is_webhook("/api/webhooks"));
        assert!(!table.is_webhook("/api/orders"));
        assert!(!table.is_webhook("/sign-in"));
    }

    #[test]
    fn test_extra_patterns() {
        let table = RouteTable::with_defaults(&["/pricing(.*)".to_string()])
            .expect("table should compile");

        assert_eq!(table.classify("/pricing"), Visibility::Public);
        assert_eq!(table.classify("/pricing/enterprise"), Visibility::Public);
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let result = RouteTable::new(["/sign-in("], WEBHOOK_ROUTE);
        assert!(result.is_err());

        let result = RouteTable::with_defaults(&["(".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bypass_static_assets() {
        assert!(bypass("/favicon.ico"));
        assert!(bypass("/static/logo.png"));
        assert!(bypass("/assets/app.css"));
        assert!(bypass("/app.js"));
        assert!(bypass("/fonts/inter.woff2"));
    }

    #[test]
    fn test_bypass_does_not_swallow_pages_or_api() {
        assert!(!bypass("/"));
        assert!(!bypass("/dashboard"));
        assert!(!bypass("/api/orders.json"));
        assert!(!bypass("/api/webhooks/courier"));
    }
}
