//! Legacy-dialect operations with no W3C route.
//!
//! These exist so callers written against the legacy dialect get a clear
//! error instead of an unknown command. None of them touch the transport.

use serde_json::Value;

use crate::error::{Error, Result};

use super::Bridge;

// ============================================================================
// Bridge - Unsupported
// ============================================================================

impl Bridge {
    /// Geolocation lookup.
    ///
    /// # Errors
    ///
    /// Always [`Error::Unsupported`].
    pub async fn location(&self) -> Result<Value> {
        Err(Error::unsupported("location"))
    }

    /// Geolocation override.
    ///
    /// # Errors
    ///
    /// Always [`Error::Unsupported`].
    pub async fn set_location(&self, _latitude: f64, _longitude: f64, _altitude: f64) -> Result<()> {
        Err(Error::unsupported("set_location"))
    }

    /// Mobile network connection type.
    ///
    /// # Errors
    ///
    /// Always [`Error::Unsupported`].
    pub async fn network_connection(&self) -> Result<u32> {
        Err(Error::unsupported("network_connection"))
    }

    /// Mobile network connection override.
    ///
    /// # Errors
    ///
    /// Always [`Error::Unsupported`].
    pub async fn set_network_connection(&self, _connection_type: u32) -> Result<()> {
        Err(Error::unsupported("set_network_connection"))
    }

    /// Legacy mouse interface. Use input action sequences instead.
    ///
    /// # Errors
    ///
    /// Always [`Error::Unsupported`].
    pub fn mouse(&self) -> Result<()> {
        Err(Error::unsupported("mouse"))
    }

    /// Legacy keyboard interface. Use input action sequences instead.
    ///
    /// # Errors
    ///
    /// Always [`Error::Unsupported`].
    pub fn keyboard(&self) -> Result<()> {
        Err(Error::unsupported("keyboard"))
    }
}

// ============================================================================
// Tests
// ============================================================================
