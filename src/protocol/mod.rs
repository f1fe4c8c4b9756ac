//! WebDriver wire protocol vocabulary.
//!
//! This module defines how a symbolic command becomes an HTTP request and
//! how a JSON payload becomes a result.
//!
//! # Protocol Overview
//!
//! | Step | Module |
//! |------|--------|
//! | Command → (verb, template) | `command` |
//! | Template + session + params → path | `path` |
//! | Payload → value, session, error | `response` |
//!
//! # Templates
//!
//! Templates are relative to the server base URL (`http://host:port/wd/hub/`):
//!
//! - `POST /session`
//! - `POST /session/:session_id/url`
//! - `GET /session/:session_id/element/:id/text`

// ============================================================================
// Submodules
// ============================================================================

/// Command registry.
pub mod command;

/// Path template resolution.
pub mod path;

/// Response payload handling.
pub mod response;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{Command, CommandDescriptor, Method, lookup};
pub use path::{PathParams, resolve};
pub use response::{NewSession, WireError, unwrap_value};
