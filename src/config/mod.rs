//! Route configuration loaded from `linkable.toml`.
//!
//! # Sections
//!
//! | Section           | Purpose                                          |
//! |-------------------|--------------------------------------------------|
//! | `[url]`           | Base url for absolute urls and path prefix       |
//! | `[entity.<Name>]` | Route descriptor for one entity type             |
//!
//! ```toml
//! [url]
//! base = "https://example.com"
//!
//! [entity.User]
//! class = "app::models::User"
//! params = ["id"]
//! hotlink_text = "name"
//!
//! [entity.Photo]
//! route = "/gallery"
//! params = { id = "id" }
//! linkable_params = { photo = "id" }
//! ```

mod error;
mod registry;

pub use error::ConfigError;
pub use registry::Registry;

use crate::core::Entity;
use crate::descriptor::{DEFAULT_ACTION, ParamsSource, RouteDescriptor};
use crate::log;
use crate::url::UrlBuilder;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "linkable.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing linkable.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkableConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Url generation settings
    #[serde(default)]
    pub url: UrlConfig,

    /// Route descriptors keyed by entity name
    #[serde(default, rename = "entity")]
    pub entities: BTreeMap<String, EntityConfig>,
}

/// `[url]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UrlConfig {
    /// Base url, e.g. `https://example.github.io/project`
    pub base: Option<String>,
}

/// `[entity.<Name>]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EntityConfig {
    /// Qualified class name (defaults to the section name)
    pub class: Option<String>,
    /// Explicit route without action
    pub route: Option<String>,
    pub default_action: String,
    pub params: ParamBinding,
    pub linkable_params: ParamBinding,
    /// Attribute used as hotlink text
    pub hotlink_text: Option<String>,
    pub disable_hotlink: bool,
    /// Use absolute urls as hotlink text
    pub absolute: bool,
    /// Register the route descriptor capability (cross-link target)
    pub linkable: bool,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            class: None,
            route: None,
            default_action: DEFAULT_ACTION.to_string(),
            params: ParamBinding::default(),
            linkable_params: ParamBinding::default(),
            hotlink_text: None,
            disable_hotlink: false,
            absolute: false,
            linkable: true,
        }
    }
}

/// Params bound to entity attributes.
///
/// - List: `["id", "slug"]` -> `{ id: <id>, slug: <slug> }`
/// - Table: `{ uid = "id" }` -> `{ uid: <id> }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ParamBinding {
    Attributes(Vec<String>),
    Renamed(BTreeMap<String, String>),
}

impl Default for ParamBinding {
    fn default() -> Self {
        Self::Attributes(Vec::new())
    }
}

impl ParamBinding {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Attributes(names) => names.is_empty(),
            Self::Renamed(bindings) => bindings.is_empty(),
        }
    }

    /// Keys produced by this binding.
    fn keys(&self) -> Vec<&str> {
        match self {
            Self::Attributes(names) => names.iter().map(String::as_str).collect(),
            Self::Renamed(bindings) => bindings.keys().map(String::as_str).collect(),
        }
    }

    /// Params source reading the bound attributes.
    pub fn source<E: Entity + ?Sized + 'static>(&self) -> ParamsSource<E> {
        if self.is_empty() {
            return ParamsSource::default();
        }
        match self {
            Self::Attributes(names) => ParamsSource::attributes(names.iter().cloned()),
            Self::Renamed(bindings) => ParamsSource::renamed(bindings.clone()),
        }
    }
}

impl EntityConfig {
    /// Class name for the entity registered as `name`.
    pub fn class_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.class.as_deref().unwrap_or(name)
    }

    /// Build the route descriptor this section describes.
    pub fn descriptor<E: Entity + ?Sized + 'static>(&self) -> RouteDescriptor<E> {
        let mut descriptor = RouteDescriptor::new()
            .with_default_action(self.default_action.as_str())
            .with_default_params(self.params.source::<E>())
            .with_linkable_params(self.linkable_params.source::<E>())
            .disable_hotlink(self.disable_hotlink)
            .use_absolute_url(self.absolute);

        if let Some(route) = &self.route {
            descriptor = descriptor.with_route(route);
        }
        if let Some(attr) = &self.hotlink_text {
            descriptor = descriptor.with_hotlink_text(attr.as_str());
        }
        descriptor
    }
}

impl LinkableConfig {
    /// Parse configuration from TOML string, warning about unknown fields.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let (config, ignored) = Self::parse_with_ignored(content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, CONFIG_FILE);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            Self::print_unknown_fields_warning(&ignored, &display_path);
        }

        config.validate()?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], file: &str) {
        log!("warning"; "unknown fields in {}, ignoring:", file);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Check values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Some(base) = &self.url.base
            && let Err(err) = UrlBuilder::with_base(base)
        {
            errors.push(format!("[url.base] {err}"));
        }

        for (name, entity) in &self.entities {
            if entity.default_action.trim().is_empty() {
                errors.push(format!("[entity.{name}.default_action] must not be empty"));
            }
            if entity.class_name(name).trim().is_empty() {
                errors.push(format!("[entity.{name}.class] must not be empty"));
            }
            let bindings = [
                ("params", &entity.params),
                ("linkable_params", &entity.linkable_params),
            ];
            for (field, binding) in bindings {
                if binding.keys().iter().any(|key| key.is_empty()) {
                    errors.push(format!("[entity.{name}.{field}] contains an empty key"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Url builder for the `[url]` section.
    pub fn url_builder(&self) -> Result<UrlBuilder, ConfigError> {
        match &self.url.base {
            Some(base) => {
                UrlBuilder::with_base(base).map_err(|err| ConfigError::Validation(err.to_string()))
            }
            None => Ok(UrlBuilder::new()),
        }
    }
}

// ============================================================================
// tests
// ============================================================================
