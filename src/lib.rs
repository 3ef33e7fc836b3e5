//! Linkable - canonical url routes and hotlinks for domain entities.
//!
//! A [`RouteDescriptor`] attached to an entity type derives routes such as
//! `/articles/view?id=5` from the entity's class name and attributes, and
//! cross-links between two linkable entities such as
//! `/users/photos/view?id=123&pid=456`.
//!
//! # Example
//!
//! ```
//! use linkable::{Params, ParamsSource, Record, RouteDescriptor, UrlBuilder, UrlGenerator};
//! use linkable::descriptor::ROUTE_DESCRIPTOR;
//!
//! let users = RouteDescriptor::<Record>::new()
//!     .with_default_params(ParamsSource::<Record>::attributes(["id"]));
//! let photos = users.clone();
//!
//! let user = Record::new("app::User").with_attribute("id", 123).with_capability(ROUTE_DESCRIPTOR);
//! let photo = Record::new("app::Photo").with_attribute("id", 456).with_capability(ROUTE_DESCRIPTOR);
//!
//! let urls = UrlBuilder::new();
//! let route = users.bind(&user).url_route(Some("update"), Params::new()).unwrap();
//! assert_eq!(urls.to(&route, false).unwrap(), "/users/update?id=123");
//!
//! let route = users.bind(&user).url_route_to(&photos.bind(&photo), None).unwrap();
//! assert_eq!(urls.to(&route, false).unwrap(), "/users/photos/view?id=123&pid=456");
//! ```

pub mod logger;

pub mod config;
pub mod core;
pub mod descriptor;
pub mod url;
pub mod utils;

pub use crate::core::{CapabilityId, Entity, LinkError, Params, Record, RouteValue};
pub use config::{ConfigError, LinkableConfig, Registry};
pub use descriptor::{Linkable, Linked, ParamsSource, RouteDescriptor};
pub use crate::url::{UrlBuilder, UrlGenerator};
