//! Entity abstraction - anything that can be addressed by a route.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use super::Params;

/// Identifier of a capability an entity registers (e.g. a route descriptor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapabilityId(&'static str);

impl CapabilityId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// An addressable domain object.
///
/// Route descriptors only read entities, never mutate them.
pub trait Entity {
    /// Fully qualified class name, e.g. `app::models::User`.
    fn class_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    /// Attribute value by name, `None` when the entity has no such attribute.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Attribute value by dotted path such as `author.name`.
    ///
    /// An attribute whose name contains the dots wins; otherwise the first
    /// component is looked up and the rest walks nested objects (and arrays
    /// by index).
    fn attribute_path(&self, path: &str) -> Option<Value> {
        if let Some(value) = self.attribute(path) {
            return Some(value);
        }

        let (head, rest) = path.split_once('.')?;
        rest.split('.').try_fold(self.attribute(head)?, |value, key| match value {
            Value::Object(mut map) => map.remove(key),
            Value::Array(mut items) => {
                let index: usize = key.parse().ok()?;
                (index < items.len()).then(|| items.swap_remove(index))
            }
            _ => None,
        })
    }

    /// Capabilities registered by this entity.
    fn capabilities(&self) -> &[CapabilityId] {
        &[]
    }

    #[inline]
    fn has_capability(&self, id: CapabilityId) -> bool {
        self.capabilities().contains(&id)
    }
}

/// Dynamic entity: class name, ordered attributes and capabilities.
///
/// Used where entity types are only known at runtime (config files, CLI).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    class: String,
    attributes: Params,
    capabilities: Vec<CapabilityId>,
}

impl Record {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_capability(mut self, id: CapabilityId) -> Self {
        if !self.capabilities.contains(&id) {
            self.capabilities.push(id);
        }
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn attributes(&self) -> &Params {
        &self.attributes
    }
}

impl Entity for Record {
    fn class_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.class)
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }

    fn capabilities(&self) -> &[CapabilityId] {
        &self.capabilities
    }
}

/// Render an attribute value as display text.
///
/// Strings are used verbatim, `null` becomes empty, everything else uses
/// its JSON form.
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
