//! Cross-origin policy.
//!
//! Every route group gets its own layer so a preflight advertises exactly the
//! methods that group serves.

use axum::http::{header, HeaderValue, Method, StatusCode};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Which origins may call the API. Empty means any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsPolicy {
    origins: Vec<String>,
}

impl CorsPolicy {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn from_origins<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origins: origins
                .into_iter()
                .map(Into::into)
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        }
    }

    pub fn allows_any(&self) -> bool {
        self.origins.is_empty()
    }

    /// Builds the layer for a route group serving `methods`.
    pub fn layer(&self, methods: &[Method]) -> CorsLayer {
        let origin = if self.allows_any() {
            AllowOrigin::from(Any)
        } else {
            let values: Vec<HeaderValue> = self
                .origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok())
                .collect();
            AllowOrigin::list(values)
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods.to_vec())
            .allow_headers([header::CONTENT_TYPE])
            .max_age(Duration::from_secs(3600))
    }
}

/// Answers a bare OPTIONS request, one without CORS request headers.
///
/// Real preflights are answered by the layer before reaching this.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
