//! Route value - path template plus parameters.

use std::fmt;

use serde::Serialize;

use super::Params;

/// Built route handed unchanged to a [`UrlGenerator`](crate::url::UrlGenerator).
///
/// ```text
/// RouteValue {
///     route:  /users/photos/view
///     params: { id: 123, pid: 456 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteValue {
    route: String,
    params: Params,
}

impl RouteValue {
    pub(crate) fn new(route: String, params: Params) -> Self {
        Self { route, params }
    }

    /// Path template (always starts with `/`).
    #[inline]
    pub fn route(&self) -> &str {
        &self.route
    }

    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn into_parts(self) -> (String, Params) {
        (self.route, self.params)
    }
}

impl fmt::Display for RouteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.route)?;
        if !self.params.is_empty() {
            write!(f, " {}", serde_json::Value::Object(self.params.clone()))?;
        }
        Ok(())
    }
}
