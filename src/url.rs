//! URL generation for built routes.
//!
//! - Relative: `/users/view?id=123` (prefixed by the base url's path)
//! - Absolute: `https://example.com/users/view?id=123`
//!
//! Query strings use `application/x-www-form-urlencoded` with bracket
//! notation for nested values: `tags[0]=a&filter[year]=2024`.

use std::fmt::Write;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::Value;
use url::Url;
use url::form_urlencoded;

use crate::core::{LinkError, Params, Result, RouteValue};

/// Characters percent-encoded inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Turns a [`RouteValue`] into a URL string.
pub trait UrlGenerator {
    fn to(&self, route: &RouteValue, absolute: bool) -> Result<String>;
}

/// Default [`UrlGenerator`] with an optional base url.
#[derive(Debug, Clone, Default)]
pub struct UrlBuilder {
    base: Option<Url>,
    /// Path of the base url without trailing slash (e.g. `/blog`)
    prefix: String,
}

impl UrlBuilder {
    /// Builder without base url: relative urls only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with a base url such as `https://example.github.io/project`.
    ///
    /// The base must be hierarchical with a host; `mailto:` or `data:` urls
    /// are rejected.
    pub fn with_base(base: &str) -> Result<Self> {
        let url =
            Url::parse(base).map_err(|err| LinkError::InvalidBaseUrl(base.to_string(), err))?;
        if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
            return Err(LinkError::InvalidBaseUrl(
                base.to_string(),
                url::ParseError::EmptyHost,
            ));
        }
        let prefix = url.path().trim_end_matches('/').to_string();
        Ok(Self {
            base: Some(url),
            prefix,
        })
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Relative url: base path prefix + encoded route + query string.
    fn relative(&self, route: &RouteValue) -> String {
        let mut out = self.prefix.clone();
        out.push_str(&encode_path(route.route()));

        let query = encode_query(route.params());
        if !query.is_empty() {
            out.push('?');
            out.push_str(&query);
        }
        out
    }

    /// `scheme://host[:port]` of the base url.
    fn origin(base: &Url) -> String {
        let mut origin = format!("{}://", base.scheme());
        if let Some(host) = base.host_str() {
            origin.push_str(host);
        }
        if let Some(port) = base.port() {
            write!(origin, ":{port}").ok();
        }
        origin
    }
}

impl UrlGenerator for UrlBuilder {
    fn to(&self, route: &RouteValue, absolute: bool) -> Result<String> {
        let relative = self.relative(route);
        if !absolute {
            return Ok(relative);
        }

        let base = self.base.as_ref().ok_or(LinkError::MissingBaseUrl)?;
        Ok(format!("{}{}", Self::origin(base), relative))
    }
}

/// Percent-encode each `/`-separated segment of a route path.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Encode params as a query string. `null` values are skipped.
fn encode_query(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten(key, value, &mut pairs);
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

fn flatten(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key.to_string(), if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => out.push((key.to_string(), n.to_string())),
        Value::String(s) => out.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&format!("{key}[{i}]"), item, out);
            }
        }
        Value::Object(map) => {
            for (name, item) in map {
                flatten(&format!("{key}[{name}]"), item, out);
            }
        }
    }
}
