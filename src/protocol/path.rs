//! Path template resolution.
//!
//! Templates are `/`-separated; a segment of the form `:name` is a
//! placeholder. `:session_id` is reserved for the active session, every
//! other placeholder is filled from [`PathParams`].
//!
//! ```ignore
//! let params = PathParams::new().with("id", "E1").with("name", "href");
//! let path = resolve(
//!     Command::GetElementAttribute,
//!     "/session/:session_id/element/:id/attribute/:name",
//!     Some(&SessionId::new("abc")),
//!     &params,
//! )?;
//! assert_eq!(path, "/session/abc/element/E1/attribute/href");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use crate::error::{Error, Result};
use crate::identifiers::SessionId;

use super::Command;

// ============================================================================
// Constants
// ============================================================================

/// Reserved placeholder filled from the active session.
const SESSION_PLACEHOLDER: &str = "session_id";

// ============================================================================
// PathParams
// ============================================================================

/// Caller-supplied values for path placeholders.
///
/// Values are converted to text on insertion and percent-encoded during
/// resolution. Keys keep insertion order so error messages echo the map as
/// it was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    entries: Vec<(String, String)>,
}

impl PathParams {
    /// Creates an empty parameter map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any earlier value for the same key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Returns the value for `key`, if supplied.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if no parameters were supplied.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for PathParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value:?}")?;
        }
        f.write_str("}")
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Fills every placeholder of `template`.
///
/// # Errors
///
/// - [`Error::NoSession`] if the template needs a session and none is given
/// - [`Error::UnmatchedParameters`] if a key has no placeholder
/// - [`Error::UnresolvedPlaceholder`] if a placeholder has no value
/// - [`Error::InvalidArgument`] if a value is exactly `.` or `..`
pub fn resolve(
    command: Command,
    template: &str,
    session_id: Option<&SessionId>,
    params: &PathParams,
) -> Result<String> {
    let mut used = vec![false; params.entries.len()];
    let mut unresolved = None;
    let mut segments = Vec::new();

    for segment in template.split('/') {
        let Some(name) = segment.strip_prefix(':') else {
            segments.push(segment.to_string());
            continue;
        };

        if name == SESSION_PLACEHOLDER {
            let session_id = session_id.ok_or(Error::NoSession)?;
            segments.push(session_id.as_str().to_string());
            continue;
        }

        match params.entries.iter().position(|(key, _)| key == name) {
            Some(index) if !used[index] => {
                used[index] = true;
                let value = &params.entries[index].1;
                if matches!(value.as_str(), "." | "..") {
                    return Err(Error::invalid_argument(format!(
                        "{name} cannot be {value:?} in {command}: dot segments are rewritten by URL resolution"
                    )));
                }
                segments.push(urlencoding::encode(value).into_owned());
            }
            _ => {
                unresolved.get_or_insert(name);
                segments.push(segment.to_string());
            }
        }
    }

    if used.iter().any(|matched| !matched) {
        return Err(Error::unmatched_parameters(
            params.to_string(),
            command.as_str(),
        ));
    }

    if let Some(placeholder) = unresolved {
        return Err(Error::unresolved_placeholder(command.as_str(), placeholder));
    }

    Ok(segments.join("/"))
}


// ============================================================================
// Tests
// ============================================================================
