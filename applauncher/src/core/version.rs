//! Dotted numeric runtime versions and the "at least" floor check.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

/// A version such as `17.0.1`, stored as its numeric components.
///
/// The empty string parses to a version with no components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Version(Vec<u64>);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("version {version:?}: component {index} ({component:?}) is not a non-negative integer")]
pub struct VersionParseError {
    pub version: String,
    pub index: usize,
    pub component: String,
}

impl Version {
    pub fn components(&self) -> &[u64] {
        &self.0
    }

    /// Check this version against a `required` floor, component by component.
    ///
    /// Every required component must be matched by a candidate component that
    /// is not smaller; missing candidate components count as `0` and extra
    /// candidate components are ignored. This is not a lexicographic compare:
    /// `12.0.1` does not satisfy `11.0.2`.
    pub fn is_at_least(&self, required: &Version) -> bool {
        for (index, &needed) in required.0.iter().enumerate() {
            let have = self.0.get(index).copied().unwrap_or(0);
            if have < needed {
                return false;
            }
        }
        true
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Version::default());
        }
        s.split('.')
            .enumerate()
            .map(|(index, component)| parse_component(s, index, component))
            .collect::<Result<Vec<_>, _>>()
            .map(Version)
    }
}

fn parse_component(version: &str, index: usize, component: &str) -> Result<u64, VersionParseError> {
    let invalid = || VersionParseError {
        version: version.to_string(),
        index,
        component: component.to_string(),
    };
    // `u64::from_str` accepts a leading `+`, which is not a version digit.
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    component.parse().map_err(|_| invalid())
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(u64::to_string).collect();
        f.write_str(&rendered.join("."))
    }
}

/// True if `candidate` meets the `required` version floor.
///
/// Either string failing to parse makes the check fail.
pub fn version_at_least(required: &str, candidate: &str) -> bool {
    let required = match required.parse::<Version>() {
        Ok(version) => version,
        Err(err) => {
            debug!(%err, "unparseable required version");
            return false;
        }
    };
    let candidate = match candidate.parse::<Version>() {
        Ok(version) => version,
        Err(err) => {
            debug!(%err, "unparseable candidate version");
            return false;
        }
    };
    candidate.is_at_least(&required)
}
