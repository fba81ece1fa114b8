//! In-memory launcher configuration record.
//!
//! A record is an ordered list of named sections, each an ordered map from
//! property name to a single string or a list of strings. Lookups return
//! `Option` so a missing property stays distinguishable from an empty one.

use std::collections::BTreeMap;

use indexmap::IndexMap;

/// Section names read by the launcher.
pub mod section {
    pub const APPLICATION: &str = "Application";
    pub const ARG_OPTIONS: &str = "ArgOptions";
    pub const JAVA_OPTIONS: &str = "JavaOptions";
}

/// Property names read by the launcher.
pub mod property {
    /// `Application`: runtime directory override.
    pub const RUNTIME: &str = "runtime";
    /// `ArgOptions`: default application arguments.
    pub const ARGUMENTS: &str = "arguments";
    /// `JavaOptions`: options passed to the runtime before the main entry.
    pub const JAVA_OPTIONS: &str = "java-options";
    pub const MAIN_CLASS: &str = "main-class";
    pub const MAIN_MODULE: &str = "main-module";
    pub const CLASS_PATH: &str = "class-path";
    pub const MODULE_PATH: &str = "module-path";
}

/// Placeholder tokens substituted into every configuration value.
pub mod placeholder {
    pub const APP_DIR: &str = "$APPDIR";
    pub const BIN_DIR: &str = "$BINDIR";
    pub const ROOT_DIR: &str = "$ROOTDIR";
}

/// Token → replacement. Ordered so expansion is deterministic.
pub type Macros = BTreeMap<String, String>;

pub type Section = IndexMap<String, PropertyValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Single(String),
    List(Vec<String>),
}

impl PropertyValue {
    /// Scalar view of the value. For lists the last entry wins.
    pub fn as_str(&self) -> &str {
        match self {
            PropertyValue::Single(value) => value,
            PropertyValue::List(values) => values.last().map_or("", String::as_str),
        }
    }

    /// List view of the value. A single value is a one-element list.
    pub fn values(&self) -> &[String] {
        match self {
            PropertyValue::Single(value) => std::slice::from_ref(value),
            PropertyValue::List(values) => values,
        }
    }

    fn expand(&self, macros: &Macros) -> PropertyValue {
        match self {
            PropertyValue::Single(value) => PropertyValue::Single(expand_macros(value, macros)),
            PropertyValue::List(values) => PropertyValue::List(
                values
                    .iter()
                    .map(|value| expand_macros(value, macros))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRecord {
    sections: IndexMap<String, Section>,
}

impl ConfigRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections
            .iter()
            .map(|(name, section)| (name.as_str(), section))
    }

    pub fn property(&self, section: &str, name: &str) -> Option<&PropertyValue> {
        self.section(section)?.get(name)
    }

    /// Ensure `name` exists, appending an empty section if needed.
    pub fn add_section(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    /// Set (or overwrite) a property, keeping its position when it already exists.
    pub fn set_property(&mut self, section: &str, name: &str, value: PropertyValue) {
        self.add_section(section).insert(name.to_string(), value);
    }

    /// Builder form of [`ConfigRecord::set_property`].
    pub fn with_property(mut self, section: &str, name: &str, value: PropertyValue) -> Self {
        self.set_property(section, name, value);
        self
    }

    /// Return a copy with every placeholder in every value substituted.
    pub fn expand_macros(&self, macros: &Macros) -> ConfigRecord {
        let sections = self
            .sections
            .iter()
            .map(|(name, section)| {
                let expanded = section
                    .iter()
                    .map(|(key, value)| (key.clone(), value.expand(macros)))
                    .collect();
                (name.clone(), expanded)
            })
            .collect();
        ConfigRecord { sections }
    }
}

/// Replace every occurrence of each macro token in `value`.
///
/// Unknown `$TOKENS` are left as-is.
pub fn expand_macros(value: &str, macros: &Macros) -> String {
    macros
        .iter()
        .fold(value.to_string(), |acc, (token, replacement)| {
            acc.replace(token.as_str(), replacement)
        })
}
