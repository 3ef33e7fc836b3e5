//! Route descriptors built from configuration, keyed by entity name.

use rustc_hash::FxHashMap;

use super::{ConfigError, LinkableConfig};
use crate::core::{LinkError, Params, Record, Result};
use crate::descriptor::{Linked, ROUTE_DESCRIPTOR, RouteDescriptor};
use crate::url::UrlBuilder;

/// Configured entity: class name, capability flag and descriptor.
#[derive(Debug, Clone)]
struct Registered {
    class: String,
    linkable: bool,
    descriptor: RouteDescriptor<Record>,
}

/// Registry of [`RouteDescriptor`]s for dynamic [`Record`] entities.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    urls: UrlBuilder,
    entities: FxHashMap<String, Registered>,
}

impl Registry {
    pub fn from_config(config: &LinkableConfig) -> Result<Self, ConfigError> {
        let entities = config
            .entities
            .iter()
            .map(|(name, entity)| {
                let registered = Registered {
                    class: entity.class_name(name).to_string(),
                    linkable: entity.linkable,
                    descriptor: entity.descriptor(),
                };
                (name.clone(), registered)
            })
            .collect();

        crate::debug!("config"; "registered {} entities", config.entities.len());
        Ok(Self {
            urls: config.url_builder()?,
            entities,
        })
    }

    #[inline]
    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Registered entity names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn get(&self, name: &str) -> Result<&Registered> {
        self.entities
            .get(name)
            .ok_or_else(|| LinkError::UnknownEntity(name.to_string()))
    }

    pub fn descriptor(&self, name: &str) -> Result<&RouteDescriptor<Record>> {
        self.get(name).map(|entry| &entry.descriptor)
    }

    /// Create a record of entity `name` with the given attributes.
    ///
    /// The record registers the route descriptor capability unless the
    /// entity is configured with `linkable = false`.
    pub fn record(&self, name: &str, attributes: Params) -> Result<Record> {
        let entry = self.get(name)?;
        let mut record = attributes
            .into_iter()
            .fold(Record::new(entry.class.as_str()), |record, (key, value)| {
                record.with_attribute(key, value)
            });
        if entry.linkable {
            record = record.with_capability(ROUTE_DESCRIPTOR);
        }
        Ok(record)
    }

    /// Bind the descriptor of entity `name` to `record`.
    pub fn bind<'a>(&'a self, name: &str, record: &'a Record) -> Result<Linked<'a, Record>> {
        Ok(self.descriptor(name)?.bind(record))
    }
}
