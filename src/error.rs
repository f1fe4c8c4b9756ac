//! Error types for the WebDriver bridge.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use webdriver_bridge::{By, Result};
//!
//! async fn example(bridge: &Bridge) -> Result<()> {
//!     let element = bridge.find_element_by(By::id("submit"), None).await?;
//!     element.click().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Argument | [`Error::UnknownCommand`], [`Error::UnmatchedParameters`], [`Error::UnresolvedPlaceholder`], [`Error::UnknownOptions`], [`Error::InvalidArgument`] |
//! | Session | [`Error::NoSession`], [`Error::MissingSessionId`], [`Error::BridgeDropped`] |
//! | Protocol | [`Error::WebDriver`], [`Error::Protocol`] |
//! | Unsupported | [`Error::Unsupported`] |
//! | Transport | [`Error::TransportClosed`], [`Error::Transport`], [`Error::Http`] |
//! | External | [`Error::Url`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// None of these are retried by the bridge; every error unwinds to the caller.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Argument Errors
    // ========================================================================
    /// Command has no entry in the active command table.
    #[error("unknown command: {command}")]
    UnknownCommand {
        /// Symbolic name of the offending command.
        command: String,
    },

    /// A path parameter did not match any placeholder in the template.
    ///
    /// Carries the whole parameter map so silently dropped options are visible.
    #[error("{params} invalid for {command}")]
    UnmatchedParameters {
        /// Rendered parameter map as supplied by the caller.
        params: String,
        /// Command the parameters were supplied to.
        command: String,
    },

    /// A placeholder in the template was left without a value.
    #[error("unresolved placeholder :{placeholder} for {command}")]
    UnresolvedPlaceholder {
        /// Command being resolved.
        command: String,
        /// Placeholder name without the leading colon.
        placeholder: String,
    },

    /// Constructor options contained unrecognized keys.
    #[error("{}", describe_unknown_options(.keys))]
    UnknownOptions {
        /// Every unrecognized key, in the order given.
        keys: Vec<String>,
    },

    /// Invalid argument value.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// A command requires a session but none is active.
    #[error("no current session exists")]
    NoSession,

    /// The new-session response carried no session id.
    #[error("no sessionId in returned payload")]
    MissingSessionId,

    /// The bridge owning an element handle has been dropped.
    #[error("element {element_id} belongs to a bridge that no longer exists")]
    BridgeDropped {
        /// Raw id of the orphaned element.
        element_id: String,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Error payload returned by the remote end, passed through untouched.
    #[error("{error}: {message}")]
    WebDriver {
        /// W3C error code (e.g. `no such element`).
        error: String,
        /// Human readable message from the server.
        message: String,
        /// HTTP status the payload arrived with.
        status: u16,
    },

    /// Response did not have the expected shape.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    // ========================================================================
    // Unsupported Operations
    // ========================================================================
    /// Feature with no W3C equivalent.
    #[error("{operation} is not supported by the W3C WebDriver protocol")]
    Unsupported {
        /// Name of the rejected operation.
        operation: String,
    },

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// Transport was already closed.
    #[error("Transport closed")]
    TransportClosed,

    /// Transport-level failure not covered by a more specific variant.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // ========================================================================
    // External Errors
    // ========================================================================
    /// URL parse error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders the unknown-option message, pluralized on key count.
fn describe_unknown_options(keys: &[String]) -> String {
    let suffix = if keys.len() == 1 { "" } else { "s" };
    format!("unknown option{suffix}: {}", keys.join(", "))
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an unknown command error.
    #[inline]
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates an unmatched parameters error.
    #[inline]
    pub fn unmatched_parameters(params: impl Into<String>, command: impl Into<String>) -> Self {
        Self::UnmatchedParameters {
            params: params.into(),
            command: command.into(),
        }
    }

    /// Creates an unresolved placeholder error.
    #[inline]
    pub fn unresolved_placeholder(
        command: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self::UnresolvedPlaceholder {
            command: command.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Creates an unknown options error.
    #[inline]
    pub fn unknown_options(keys: Vec<String>) -> Self {
        Self::UnknownOptions { keys }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a bridge dropped error.
    #[inline]
    pub fn bridge_dropped(element_id: impl Into<String>) -> Self {
        Self::BridgeDropped {
            element_id: element_id.into(),
        }
    }

    /// Creates a remote WebDriver error.
    #[inline]
    pub fn webdriver(error: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self::WebDriver {
            error: error.into(),
            message: message.into(),
            status,
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    #[inline]
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Creates a transport error.
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a caller argument error.
    #[inline]
    #[must_use]
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. }
                | Self::UnmatchedParameters { .. }
                | Self::UnresolvedPlaceholder { .. }
                | Self::UnknownOptions { .. }
                | Self::InvalidArgument { .. }
        )
    }

    /// Returns `true` if this is a session or protocol error.
    #[inline]
    #[must_use]
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            Self::NoSession
                | Self::MissingSessionId
                | Self::BridgeDropped { .. }
                | Self::WebDriver { .. }
                | Self::Protocol { .. }
        )
    }

    /// Returns `true` if the operation has no W3C equivalent.
    #[inline]
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Returns `true` if the transport was already closed.
    #[inline]
    #[must_use]
    pub fn is_transport_closed(&self) -> bool {
        matches!(self, Self::TransportClosed)
    }

    /// Returns the W3C error code if this error came from the remote end.
    #[inline]
    #[must_use]
    pub fn webdriver_code(&self) -> Option<&str> {
        match self {
            Self::WebDriver { error, .. } => Some(error),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
