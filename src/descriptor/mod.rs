//! Route descriptors - per entity type route configuration.
//!
//! A [`RouteDescriptor`] describes how an entity type maps to URL routes:
//!
//! ```text
//! RouteDescriptor<User> {
//!     route:           None              -> "/users" (derived from class name)
//!     default_action:  "view"
//!     default_params:  |u| { id: u.id }
//!     linkable_params: {}                -> { uid: u.id } (prefixed fallback)
//! }
//! ```
//!
//! Bind it to an entity with [`RouteDescriptor::bind`] (or
//! [`Linkable::linked`]) to build routes and hotlinks through [`Linked`].

mod linked;

pub use linked::Linked;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::core::{CapabilityId, Entity, Params, Result};

/// Capability registered by every entity that carries a route descriptor.
pub const ROUTE_DESCRIPTOR: CapabilityId = CapabilityId::new("linkable.route-descriptor");

/// Default action used when none is given.
pub const DEFAULT_ACTION: &str = "view";

/// Parameter function evaluated against the owning entity.
pub type ParamsFn<E> = dyn Fn(&E) -> anyhow::Result<Params> + Send + Sync;

/// Static params or a function producing them from the entity.
pub enum ParamsSource<E: ?Sized> {
    Static(Params),
    Computed(Arc<ParamsFn<E>>),
}

impl<E: ?Sized> ParamsSource<E> {
    /// Wrap a parameter function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&E) -> anyhow::Result<Params> + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Resolve against `owner`.
    ///
    /// Function results are returned as-is, their errors propagate unchanged.
    pub fn resolve(&self, owner: &E) -> Result<Params> {
        match self {
            Self::Static(params) => Ok(params.clone()),
            Self::Computed(f) => Ok(f(owner)?),
        }
    }
}

impl<E: Entity + ?Sized + 'static> ParamsSource<E> {
    /// Params read from entity attributes, keyed by attribute name.
    ///
    /// Missing attributes resolve to `null` (skipped in query strings).
    pub fn attributes<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::renamed(names.into_iter().map(|name| {
            let name = name.into();
            (name.clone(), name)
        }))
    }

    /// Params read from entity attributes under different keys: `(key, attribute)`.
    pub fn renamed<I, K, A>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: Into<String>,
    {
        let bindings: Vec<(String, String)> = bindings
            .into_iter()
            .map(|(key, attr)| (key.into(), attr.into()))
            .collect();

        Self::from_fn(move |owner: &E| {
            Ok(bindings
                .iter()
                .map(|(key, attr)| (key.clone(), owner.attribute(attr).unwrap_or(Value::Null)))
                .collect())
        })
    }
}

impl<E: ?Sized> Default for ParamsSource<E> {
    fn default() -> Self {
        Self::Static(Params::new())
    }
}

impl<E: ?Sized> Clone for ParamsSource<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(params) => Self::Static(params.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<E: ?Sized> fmt::Debug for ParamsSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(params) => f.debug_tuple("Static").field(params).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<E: ?Sized> From<Params> for ParamsSource<E> {
    fn from(params: Params) -> Self {
        Self::Static(params)
    }
}

/// Route configuration for one entity type.
pub struct RouteDescriptor<E: ?Sized> {
    /// Explicit route segment without action, stored without surrounding `/`
    route: Option<String>,
    default_action: String,
    default_params: ParamsSource<E>,
    linkable_params: ParamsSource<E>,
    /// Owner attribute used as hotlink text (url text when unset)
    hotlink_text_attr: Option<String>,
    disable_hotlink: bool,
    use_absolute_url: bool,
}

impl<E: ?Sized> Clone for RouteDescriptor<E> {
    fn clone(&self) -> Self {
        Self {
            route: self.route.clone(),
            default_action: self.default_action.clone(),
            default_params: self.default_params.clone(),
            linkable_params: self.linkable_params.clone(),
            hotlink_text_attr: self.hotlink_text_attr.clone(),
            disable_hotlink: self.disable_hotlink,
            use_absolute_url: self.use_absolute_url,
        }
    }
}

impl<E: ?Sized> fmt::Debug for RouteDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("route", &self.route)
            .field("default_action", &self.default_action)
            .field("default_params", &self.default_params)
            .field("linkable_params", &self.linkable_params)
            .field("hotlink_text_attr", &self.hotlink_text_attr)
            .field("disable_hotlink", &self.disable_hotlink)
            .field("use_absolute_url", &self.use_absolute_url)
            .finish()
    }
}

impl<E: ?Sized> Default for RouteDescriptor<E> {
    fn default() -> Self {
        Self {
            route: None,
            default_action: DEFAULT_ACTION.to_string(),
            default_params: ParamsSource::default(),
            linkable_params: ParamsSource::default(),
            hotlink_text_attr: None,
            disable_hotlink: false,
            use_absolute_url: false,
        }
    }
}

impl<E: ?Sized> RouteDescriptor<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit route without action: `/article`, `product/review/`, ...
    pub fn with_route(mut self, route: impl AsRef<str>) -> Self {
        self.route = Some(route.as_ref().trim_matches('/').to_string());
        self
    }

    pub fn with_default_action(mut self, action: impl Into<String>) -> Self {
        self.default_action = action.into();
        self
    }

    pub fn with_default_params(mut self, params: impl Into<ParamsSource<E>>) -> Self {
        self.default_params = params.into();
        self
    }

    pub fn with_linkable_params(mut self, params: impl Into<ParamsSource<E>>) -> Self {
        self.linkable_params = params.into();
        self
    }

    pub fn with_hotlink_text(mut self, attribute: impl Into<String>) -> Self {
        self.hotlink_text_attr = Some(attribute.into());
        self
    }

    pub fn disable_hotlink(mut self, disable: bool) -> Self {
        self.disable_hotlink = disable;
        self
    }

    pub fn use_absolute_url(mut self, absolute: bool) -> Self {
        self.use_absolute_url = absolute;
        self
    }

    /// Shorthand for [`with_default_params`](Self::with_default_params) with a function.
    pub fn with_default_params_fn<F>(self, f: F) -> Self
    where
        F: Fn(&E) -> anyhow::Result<Params> + Send + Sync + 'static,
    {
        self.with_default_params(ParamsSource::from_fn(f))
    }

    /// Shorthand for [`with_linkable_params`](Self::with_linkable_params) with a function.
    pub fn with_linkable_params_fn<F>(self, f: F) -> Self
    where
        F: Fn(&E) -> anyhow::Result<Params> + Send + Sync + 'static,
    {
        self.with_linkable_params(ParamsSource::from_fn(f))
    }

    /// Explicit route segment, if configured (no surrounding `/`).
    pub fn explicit_route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn default_action(&self) -> &str {
        &self.default_action
    }

    pub fn hotlink_text_attr(&self) -> Option<&str> {
        self.hotlink_text_attr.as_deref()
    }

    pub fn is_hotlink_disabled(&self) -> bool {
        self.disable_hotlink
    }

    pub fn uses_absolute_url(&self) -> bool {
        self.use_absolute_url
    }

    /// Capability id this descriptor requires on cross-link targets.
    #[inline]
    pub const fn capability(&self) -> CapabilityId {
        ROUTE_DESCRIPTOR
    }

    /// Bind to an owning entity for route building.
    pub fn bind<'a>(&'a self, owner: &'a E) -> Linked<'a, E> {
        Linked::new(self, owner)
    }
}

/// Entity type carrying its own route descriptor.
///
/// ```ignore
/// static USER_ROUTES: LazyLock<RouteDescriptor<User>> = LazyLock::new(|| {
///     RouteDescriptor::new().with_default_params(ParamsSource::attributes(["id"]))
/// });
///
/// impl Linkable for User {
///     fn route_descriptor(&self) -> &RouteDescriptor<Self> {
///         &USER_ROUTES
///     }
/// }
///
/// let route = user.linked().url_route(Some("update"), Params::new())?;
/// ```
pub trait Linkable: Entity {
    fn route_descriptor(&self) -> &RouteDescriptor<Self>;

    fn linked(&self) -> Linked<'_, Self> {
        self.route_descriptor().bind(self)
    }
}

#[cfg(test)]
mod tests;
