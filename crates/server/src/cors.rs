//! Cross-origin policy
//!
//! All CORS decisions for the HTTP API are made here. The default policy
//! is deliberately open: it mirrors the request's origin, method and
//! headers back and allows credentials. That fits an internal dashboard
//! on a trusted network. Deployments exposed further should set
//! `allowed_origins`.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Cross-origin policy applied to every route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    /// When false no CORS headers are emitted at all
    pub enabled: bool,
    /// Origins allowed to call the API. Empty mirrors any origin.
    pub allowed_origins: Vec<String>,
    /// Whether browsers may send cookies and auth headers
    pub allow_credentials: bool,
}

impl CorsPolicy {
    /// Any origin, any method, any header, credentials allowed
    pub fn permissive() -> Self {
        Self {
            enabled: true,
            allowed_origins: Vec::new(),
            allow_credentials: true,
        }
    }

    /// Only the listed origins
    pub fn restricted(origins: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            enabled: true,
            allowed_origins: origins.into_iter().map(Into::into).collect(),
            allow_credentials: true,
        }
    }

    /// No CORS headers
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            allow_credentials: false,
        }
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Build the CORS layer for a policy
///
/// Wildcard (`*`) values cannot be combined with credentials, so the
/// permissive policy mirrors request values instead.
pub fn build_cors_layer(policy: &CorsPolicy) -> CorsLayer {
    if !policy.enabled {
        info!("CORS disabled");
        return CorsLayer::new();
    }

    let origin = if policy.allowed_origins.is_empty() {
        warn!(
            credentials = policy.allow_credentials,
            "CORS mirrors any request origin"
        );
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = policy
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Skipping unparsable CORS origin");
                    None
                }
            })
            .collect();
        info!(?origins, "CORS restricted to configured origins");
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(policy.allow_credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_constructors() {
        assert_eq!(CorsPolicy::default(), CorsPolicy::permissive());
        assert!(CorsPolicy::permissive().allowed_origins.is_empty());
        assert!(CorsPolicy::permissive().allow_credentials);
        assert!(!CorsPolicy::disabled().enabled);

        let restricted = CorsPolicy::restricted(["http://localhost:3000"]);
        assert_eq!(restricted.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_layers_apply_cleanly() {
        // tower-http rejects wildcard origin plus credentials when the layer is applied
        for policy in [
            CorsPolicy::permissive(),
            CorsPolicy::restricted(["http://a.example", "bad\norigin"]),
            CorsPolicy::disabled(),
        ] {
            let _router: axum::Router = axum::Router::new()
                .route("/", axum::routing::get(|| async { "ok" }))
                .layer(build_cors_layer(&policy));
        }
    }
}
