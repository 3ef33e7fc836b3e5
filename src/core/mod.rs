//! Core types - pure abstractions shared across the codebase.

mod entity;
mod error;
mod params;
mod route;

pub use entity::{CapabilityId, Entity, Record, value_text};
pub use error::{LinkError, Result};
pub use params::{Params, merge, merge_into, params, prefix_keys};
pub use route::RouteValue;
