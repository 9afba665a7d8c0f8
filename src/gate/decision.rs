use crate::gate::{
    routes::{RouteTable, Visibility},
    GateConfig,
};
use url::form_urlencoded;

/// Outcome of the gate for a single request. Computed fresh per request and
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect {
        path: String,
        query: Vec<(String, String)>,
    },
}

impl Decision {
    fn sign_in(config: &GateConfig, original: &str) -> Self {
        Self::Redirect {
            path: config.sign_in_path.clone(),
            query: vec![("redirect_url".to_string(), original.to_string())],
        }
    }

    fn landing(config: &GateConfig) -> Self {
        Self::Redirect {
            path: config.landing_path.clone(),
            query: Vec::new(),
        }
    }

    /// The `Location` value for a redirect, `None` for `Allow`.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Allow => None,
            Self::Redirect { path, query } if query.is_empty() => Some(path.clone()),
            Self::Redirect { path, query } => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                    .finish();
                Some(format!("{path}?{encoded}"))
            }
        }
    }
}

/// The gate's decision table. Pure over `(path, session_present)`: the same
/// inputs always yield the same decision.
///
/// `original` is the originally requested path with its query string, carried
/// into `redirect_url` so the user can resume after signing in.
#[must_use]
pub fn decide(
    table: &RouteTable,
    config: &GateConfig,
    path: &str,
    original: &str,
    session_present: bool,
) -> Decision {
    // External callers are never a browser session; let them through before
    // the generic table is consulted.
    if table.is_webhook(path) {
        return Decision::Allow;
    }

    match (session_present, table.classify(path)) {
        (false, Visibility::Public) | (true, Visibility::Protected) => Decision::Allow,
        (false, Visibility::Protected) => Decision::sign_in(config, original),
        (true, Visibility::Public) => Decision::landing(config),
    }
}
