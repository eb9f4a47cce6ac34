//! Switcher Configuration
//!
//! Attribute names and the active class, fixed once per switcher.

use serde::Deserialize;

use crate::Result;

/// Prefix applied to all three marker attributes by default
pub const DEFAULT_PREFIX: &str = "data-";
pub const DEFAULT_LINK_OF_GROUP: &str = "link-of-group";
pub const DEFAULT_CONTENT_OF_GROUP: &str = "content-of-group";
pub const DEFAULT_KEY_IN_GROUP: &str = "key-in-group";
pub const DEFAULT_ACTIVE_CLASS: &str = "active";

/// JSON names of the recognized options
const OPTION_NAMES: [&str; 6] = [
    "prefix",
    "linkOfGroup",
    "contentOfGroup",
    "keyInGroup",
    "activeClass",
    "ignoredToActivateGroups",
];

/// Host-supplied overrides. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwitcherOptions {
    /// Prefix for the marker attributes (default `data-`)
    pub prefix: Option<String>,
    /// Unprefixed link-of-group attribute name
    pub link_of_group: Option<String>,
    /// Unprefixed content-of-group attribute name
    pub content_of_group: Option<String>,
    /// Unprefixed key-in-group attribute name
    pub key_in_group: Option<String>,
    /// Class marking active elements
    pub active_class: Option<String>,
    /// Groups left alone by bootstrap activation
    pub ignored_to_activate_groups: Vec<String>,
}

impl SwitcherOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object such as
    /// `{"prefix": "x-", "ignoredToActivateGroups": ["menu"]}`.
    /// Unrecognized keys are logged and skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(object) = value.as_object() {
            for name in object.keys().filter(|name| !OPTION_NAMES.contains(&name.as_str())) {
                tracing::debug!("Ignoring unknown switcher option {:?}", name);
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn link_of_group(mut self, name: &str) -> Self {
        self.link_of_group = Some(name.to_string());
        self
    }

    pub fn content_of_group(mut self, name: &str) -> Self {
        self.content_of_group = Some(name.to_string());
        self
    }

    pub fn key_in_group(mut self, name: &str) -> Self {
        self.key_in_group = Some(name.to_string());
        self
    }

    pub fn active_class(mut self, class: &str) -> Self {
        self.active_class = Some(class.to_string());
        self
    }

    pub fn ignore_group(mut self, group: &str) -> Self {
        self.ignored_to_activate_groups.push(group.to_string());
        self
    }
}

/// Resolved attribute schema with the prefix already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    link_attr: String,
    content_attr: String,
    key_attr: String,
    active_class: String,
}

impl Schema {
    /// Merge `options` over the defaults. The prefix is applied here and
    /// only here, so a schema never carries a doubled prefix.
    pub fn from_options(options: &SwitcherOptions) -> Self {
        let prefix = options.prefix.as_deref().unwrap_or(DEFAULT_PREFIX);
        let attr = |name: &Option<String>, default: &str| {
            format!("{prefix}{}", name.as_deref().unwrap_or(default))
        };
        Self {
            link_attr: attr(&options.link_of_group, DEFAULT_LINK_OF_GROUP),
            content_attr: attr(&options.content_of_group, DEFAULT_CONTENT_OF_GROUP),
            key_attr: attr(&options.key_in_group, DEFAULT_KEY_IN_GROUP),
            active_class: options
                .active_class
                .clone()
                .unwrap_or_else(|| DEFAULT_ACTIVE_CLASS.to_string()),
        }
    }

    pub fn link_attr(&self) -> &str {
        &self.link_attr
    }

    pub fn content_attr(&self) -> &str {
        &self.content_attr
    }

    pub fn key_attr(&self) -> &str {
        &self.key_attr
    }

    pub fn active_class(&self) -> &str {
        &self.active_class
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::from_options(&SwitcherOptions::default())
    }
}
