//! Launcher configuration files (TOML).
//!
//! Each top-level table is a section; each value is a string or an array of
//! strings:
//!
//! ```toml
//! [Application]
//! runtime = "$ROOTDIR/runtime"
//! main-class = "com.example.Main"
//!
//! [ArgOptions]
//! arguments = ["--verbose"]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use toml::Value;
use tracing::debug;

use crate::core::config::{ConfigRecord, PropertyValue};

/// Load a config file. The file must exist.
pub fn load_config(path: &Path) -> Result<ConfigRecord> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg = parse_config(&contents).with_context(|| format!("parse {}", path.display()))?;
    debug!(path = %path.display(), "loaded launcher config");
    Ok(cfg)
}

/// Load a config file, returning an empty record if it does not exist.
pub fn load_optional_config(path: &Path) -> Result<ConfigRecord> {
    if !path.exists() {
        debug!(path = %path.display(), "config file not found, using empty config");
        return Ok(ConfigRecord::default());
    }
    load_config(path)
}

/// Parse config text into a record, keeping section and key order.
pub fn parse_config(contents: &str) -> Result<ConfigRecord> {
    let table: toml::Table = toml::from_str(contents).context("parse toml")?;
    let mut cfg = ConfigRecord::new();
    for (section_name, value) in table {
        let section = match value {
            Value::Table(section) => section,
            other => bail!(
                "top-level key `{section_name}` must be a [section], found {}",
                other.type_str()
            ),
        };
        cfg.add_section(&section_name);
        for (key, value) in section {
            let value = property_value(&section_name, &key, value)?;
            cfg.set_property(&section_name, &key, value);
        }
    }
    Ok(cfg)
}

fn property_value(section: &str, key: &str, value: Value) -> Result<PropertyValue> {
    match value {
        Value::String(value) => Ok(PropertyValue::Single(value)),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(value) => Ok(value),
                other => Err(anyhow!(
                    "[{section}] {key}: list entries must be strings, found {}",
                    other.type_str()
                )),
            })
            .collect::<Result<Vec<_>>>()
            .map(PropertyValue::List),
        other => bail!(
            "[{section}] {key}: expected a string or list of strings, found {}",
            other.type_str()
        ),
    }
}
