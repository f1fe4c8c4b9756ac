//! Command registry: symbolic command to HTTP verb and path template.
//!
//! The registry is two immutable tables built on first use:
//!
//! | Table | Holds |
//! |-------|-------|
//! | W3C | every command of the W3C dialect |
//! | Common | commands whose wire shape is shared with the legacy dialect |
//!
//! `status` and `is_element_displayed` are always resolved from the common
//! table; everything else from the W3C table. Legacy-only entries in the
//! common table are therefore unreachable through [`lookup`] and report
//! [`Error::UnknownCommand`].

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{Error, Result};

// ============================================================================
// Method
// ============================================================================

/// HTTP verb of a wire command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Returns the upper-case verb.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CommandDescriptor
// ============================================================================

/// Verb and path template for one wire command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// HTTP verb.
    pub method: Method,
    /// Path template with `:name` placeholders.
    pub template: &'static str,
}

impl CommandDescriptor {
    const fn new(method: Method, template: &'static str) -> Self {
        Self { method, template }
    }
}

// ============================================================================
// Command
// ============================================================================

/// Symbolic wire command.
///
/// Parses from and displays as its snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Session
    NewSession,
    DeleteSession,
    Status,

    // Navigation
    Get,
    GetCurrentUrl,
    Back,
    Forward,
    Refresh,
    GetTitle,
    GetPageSource,

    // Windows
    GetWindowHandle,
    CloseWindow,
    SwitchToWindow,
    GetWindowHandles,
    FullscreenWindow,
    MinimizeWindow,
    MaximizeWindow,
    GetWindowRect,
    SetWindowRect,

    // Frames
    SwitchToFrame,
    SwitchToParentFrame,

    // Element lookup
    FindElement,
    FindElements,
    FindChildElement,
    FindChildElements,
    GetActiveElement,

    // Element state
    IsElementSelected,
    IsElementEnabled,
    IsElementDisplayed,
    GetElementAttribute,
    GetElementProperty,
    GetElementCssValue,
    GetElementText,
    GetElementTagName,
    GetElementRect,

    // Element interaction
    ElementClick,
    ElementClear,
    ElementSendKeys,

    // Scripts
    ExecuteScript,
    ExecuteAsyncScript,

    // Cookies
    GetAllCookies,
    GetCookie,
    AddCookie,
    DeleteCookie,
    DeleteAllCookies,

    // Actions
    Actions,
    ReleaseActions,

    // Alerts
    DismissAlert,
    AcceptAlert,
    GetAlertText,
    SendAlertText,

    // Screenshots
    TakeScreenshot,
    TakeElementScreenshot,

    // Timeouts
    SetTimeout,
    GetTimeouts,

    // Legacy dialect only
    GetLocation,
    SetLocation,
    GetNetworkConnection,
    SetNetworkConnection,
    ImplicitlyWait,
}

impl Command {
    /// Every command, in declaration order.
    pub const ALL: &'static [Command] = &[
        Self::NewSession,
        Self::DeleteSession,
        Self::Status,
        Self::Get,
        Self::GetCurrentUrl,
        Self::Back,
        Self::Forward,
        Self::Refresh,
        Self::GetTitle,
        Self::GetPageSource,
        Self::GetWindowHandle,
        Self::CloseWindow,
        Self::SwitchToWindow,
        Self::GetWindowHandles,
        Self::FullscreenWindow,
        Self::MinimizeWindow,
        Self::MaximizeWindow,
        Self::GetWindowRect,
        Self::SetWindowRect,
        Self::SwitchToFrame,
        Self::SwitchToParentFrame,
        Self::FindElement,
        Self::FindElements,
        Self::FindChildElement,
        Self::FindChildElements,
        Self::GetActiveElement,
        Self::IsElementSelected,
        Self::IsElementEnabled,
        Self::IsElementDisplayed,
        Self::GetElementAttribute,
        Self::GetElementProperty,
        Self::GetElementCssValue,
        Self::GetElementText,
        Self::GetElementTagName,
        Self::GetElementRect,
        Self::ElementClick,
        Self::ElementClear,
        Self::ElementSendKeys,
        Self::ExecuteScript,
        Self::ExecuteAsyncScript,
        Self::GetAllCookies,
        Self::GetCookie,
        Self::AddCookie,
        Self::DeleteCookie,
        Self::DeleteAllCookies,
        Self::Actions,
        Self::ReleaseActions,
        Self::DismissAlert,
        Self::AcceptAlert,
        Self::GetAlertText,
        Self::SendAlertText,
        Self::TakeScreenshot,
        Self::TakeElementScreenshot,
        Self::SetTimeout,
        Self::GetTimeouts,
        Self::GetLocation,
        Self::SetLocation,
        Self::GetNetworkConnection,
        Self::SetNetworkConnection,
        Self::ImplicitlyWait,
    ];

    /// Returns the symbolic snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewSession => "new_session",
            Self::DeleteSession => "delete_session",
            Self::Status => "status",
            Self::Get => "get",
            Self::GetCurrentUrl => "get_current_url",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Refresh => "refresh",
            Self::GetTitle => "get_title",
            Self::GetPageSource => "get_page_source",
            Self::GetWindowHandle => "get_window_handle",
            Self::CloseWindow => "close_window",
            Self::SwitchToWindow => "switch_to_window",
            Self::GetWindowHandles => "get_window_handles",
            Self::FullscreenWindow => "fullscreen_window",
            Self::MinimizeWindow => "minimize_window",
            Self::MaximizeWindow => "maximize_window",
            Self::GetWindowRect => "get_window_rect",
            Self::SetWindowRect => "set_window_rect",
            Self::SwitchToFrame => "switch_to_frame",
            Self::SwitchToParentFrame => "switch_to_parent_frame",
            Self::FindElement => "find_element",
            Self::FindElements => "find_elements",
            Self::FindChildElement => "find_child_element",
            Self::FindChildElements => "find_child_elements",
            Self::GetActiveElement => "get_active_element",
            Self::IsElementSelected => "is_element_selected",
            Self::IsElementEnabled => "is_element_enabled",
            Self::IsElementDisplayed => "is_element_displayed",
            Self::GetElementAttribute => "get_element_attribute",
            Self::GetElementProperty => "get_element_property",
            Self::GetElementCssValue => "get_element_css_value",
            Self::GetElementText => "get_element_text",
            Self::GetElementTagName => "get_element_tag_name",
            Self::GetElementRect => "get_element_rect",
            Self::ElementClick => "element_click",
            Self::ElementClear => "element_clear",
            Self::ElementSendKeys => "element_send_keys",
            Self::ExecuteScript => "execute_script",
            Self::ExecuteAsyncScript => "execute_async_script",
            Self::GetAllCookies => "get_all_cookies",
            Self::GetCookie => "get_cookie",
            Self::AddCookie => "add_cookie",
            Self::DeleteCookie => "delete_cookie",
            Self::DeleteAllCookies => "delete_all_cookies",
            Self::Actions => "actions",
            Self::ReleaseActions => "release_actions",
            Self::DismissAlert => "dismiss_alert",
            Self::AcceptAlert => "accept_alert",
            Self::GetAlertText => "get_alert_text",
            Self::SendAlertText => "send_alert_text",
            Self::TakeScreenshot => "take_screenshot",
            Self::TakeElementScreenshot => "take_element_screenshot",
            Self::SetTimeout => "set_timeout",
            Self::GetTimeouts => "get_timeouts",
            Self::GetLocation => "get_location",
            Self::SetLocation => "set_location",
            Self::GetNetworkConnection => "get_network_connection",
            Self::SetNetworkConnection => "set_network_connection",
            Self::ImplicitlyWait => "implicitly_wait",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|command| command.as_str() == name)
            .ok_or_else(|| Error::unknown_command(name))
    }
}

// ============================================================================
// Tables
// ============================================================================

type CommandTable = FxHashMap<Command, CommandDescriptor>;

fn table(entries: &[(Command, Method, &'static str)]) -> CommandTable {
    entries
        .iter()
        .map(|&(command, method, template)| (command, CommandDescriptor::new(method, template)))
        .collect()
}

/// Commands of the W3C dialect.
static W3C_COMMANDS: LazyLock<CommandTable> = LazyLock::new(|| {
    use Command::*;
    use Method::{Delete, Get as GET, Post};

    table(&[
        (NewSession, Post, "/session"),
        (DeleteSession, Delete, "/session/:session_id"),
        // Navigation
        (Get, Post, "/session/:session_id/url"),
        (GetCurrentUrl, GET, "/session/:session_id/url"),
        (Back, Post, "/session/:session_id/back"),
        (Forward, Post, "/session/:session_id/forward"),
        (Refresh, Post, "/session/:session_id/refresh"),
        (GetTitle, GET, "/session/:session_id/title"),
        (GetPageSource, GET, "/session/:session_id/source"),
        // Windows
        (GetWindowHandle, GET, "/session/:session_id/window"),
        (CloseWindow, Delete, "/session/:session_id/window"),
        (SwitchToWindow, Post, "/session/:session_id/window"),
        (GetWindowHandles, GET, "/session/:session_id/window/handles"),
        (FullscreenWindow, Post, "/session/:session_id/window/fullscreen"),
        (MinimizeWindow, Post, "/session/:session_id/window/minimize"),
        (MaximizeWindow, Post, "/session/:session_id/window/maximize"),
        (GetWindowRect, GET, "/session/:session_id/window/rect"),
        (SetWindowRect, Post, "/session/:session_id/window/rect"),
        // Frames
        (SwitchToFrame, Post, "/session/:session_id/frame"),
        (SwitchToParentFrame, Post, "/session/:session_id/frame/parent"),
        // Element lookup
        (FindElement, Post, "/session/:session_id/element"),
        (FindElements, Post, "/session/:session_id/elements"),
        (FindChildElement, Post, "/session/:session_id/element/:id/element"),
        (FindChildElements, Post, "/session/:session_id/element/:id/elements"),
        (GetActiveElement, GET, "/session/:session_id/element/active"),
        // Element state
        (IsElementSelected, GET, "/session/:session_id/element/:id/selected"),
        (IsElementEnabled, GET, "/session/:session_id/element/:id/enabled"),
        (GetElementAttribute, GET, "/session/:session_id/element/:id/attribute/:name"),
        (GetElementProperty, GET, "/session/:session_id/element/:id/property/:name"),
        (GetElementCssValue, GET, "/session/:session_id/element/:id/css/:property_name"),
        (GetElementText, GET, "/session/:session_id/element/:id/text"),
        (GetElementTagName, GET, "/session/:session_id/element/:id/name"),
        (GetElementRect, GET, "/session/:session_id/element/:id/rect"),
        // Element interaction
        (ElementClick, Post, "/session/:session_id/element/:id/click"),
        (ElementClear, Post, "/session/:session_id/element/:id/clear"),
        (ElementSendKeys, Post, "/session/:session_id/element/:id/value"),
        // Scripts
        (ExecuteScript, Post, "/session/:session_id/execute/sync"),
        (ExecuteAsyncScript, Post, "/session/:session_id/execute/async"),
        // Cookies
        (GetAllCookies, GET, "/session/:session_id/cookie"),
        (GetCookie, GET, "/session/:session_id/cookie/:name"),
        (AddCookie, Post, "/session/:session_id/cookie"),
        (DeleteCookie, Delete, "/session/:session_id/cookie/:name"),
        (DeleteAllCookies, Delete, "/session/:session_id/cookie"),
        // Actions
        (Actions, Post, "/session/:session_id/actions"),
        (ReleaseActions, Delete, "/session/:session_id/actions"),
        // Alerts
        (DismissAlert, Post, "/session/:session_id/alert/dismiss"),
        (AcceptAlert, Post, "/session/:session_id/alert/accept"),
        (GetAlertText, GET, "/session/:session_id/alert/text"),
        (SendAlertText, Post, "/session/:session_id/alert/text"),
        // Screenshots
        (TakeScreenshot, GET, "/session/:session_id/screenshot"),
        (TakeElementScreenshot, GET, "/session/:session_id/element/:id/screenshot"),
        // Timeouts
        (SetTimeout, Post, "/session/:session_id/timeouts"),
        (GetTimeouts, GET, "/session/:session_id/timeouts"),
    ])
});

/// Commands shared with the legacy dialect.
static COMMON_COMMANDS: LazyLock<CommandTable> = LazyLock::new(|| {
    use Command::*;
    use Method::{Get as GET, Post};

    table(&[
        (Status, GET, "/status"),
        (IsElementDisplayed, GET, "/session/:session_id/element/:id/displayed"),
        (GetLocation, GET, "/session/:session_id/location"),
        (SetLocation, Post, "/session/:session_id/location"),
        (GetNetworkConnection, GET, "/session/:session_id/network_connection"),
        (SetNetworkConnection, Post, "/session/:session_id/network_connection"),
        (ImplicitlyWait, Post, "/session/:session_id/timeouts/implicit_wait"),
    ])
});

// ============================================================================
// Lookup
// ============================================================================

/// Resolves a command to its verb and path template.
///
/// # Errors
///
/// Returns [`Error::UnknownCommand`] if the command has no W3C entry.
pub fn lookup(command: Command) -> Result<&'static CommandDescriptor> {
    let table = match command {
        Command::Status | Command::IsElementDisplayed => &*COMMON_COMMANDS,
        _ => &*W3C_COMMANDS,
    };

    table
        .get(&command)
        .ok_or_else(|| Error::unknown_command(command.as_str()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_routes_resolve() {
        let cases = [
            (Command::NewSession, Method::Post, "/session"),
            (Command::Get, Method::Post, "/session/:session_id/url"),
            (Command::FindElement, Method::Post, "/session/:session_id/element"),
            (
                Command::FindChildElement,
                Method::Post,
                "/session/:session_id/element/:id/element",
            ),
            (
                Command::GetElementText,
                Method::Get,
                "/session/:session_id/element/:id/text",
            ),
            (Command::DeleteSession, Method::Delete, "/session/:session_id"),
            (Command::SetTimeout, Method::Post, "/session/:session_id/timeouts"),
        ];

        for (command, method, template) in cases {
            let descriptor = lookup(command).expect("registered");
            assert_eq!(descriptor.method, method, "{command}");
            assert_eq!(descriptor.template, template, "{command}");
        }
    }

    #[test]
    fn test_shared_commands_come_from_common_table() {
        assert!(!W3C_COMMANDS.contains_key(&Command::Status));
        assert!(!W3C_COMMANDS.contains_key(&Command::IsElementDisplayed));

        let status = lookup(Command::Status).expect("status");
        assert_eq!(status.template, "/status");
        assert_eq!(status.method, Method::Get);

        let displayed = lookup(Command::IsElementDisplayed).expect("displayed");
        assert_eq!(displayed.template, "/session/:session_id/element/:id/displayed");
    }

    #[test]
    fn test_legacy_only_commands_are_unknown() {
        for command in [
            Command::GetLocation,
            Command::SetLocation,
            Command::GetNetworkConnection,
            Command::SetNetworkConnection,
            Command::ImplicitlyWait,
        ] {
            let err = lookup(command).unwrap_err();
            assert!(err.is_argument_error());
            assert!(err.to_string().contains(command.as_str()));
        }
    }

    #[test]
    fn test_every_command_in_exactly_one_table() {
        for &command in Command::ALL {
            let in_w3c = W3C_COMMANDS.contains_key(&command);
            let in_common = COMMON_COMMANDS.contains_key(&command);
            assert!(in_w3c || in_common, "{command} missing from both tables");
            assert!(!(in_w3c && in_common), "{command} in both tables");
        }
    }

    #[test]
    fn test_from_str_round_trips_names() {
        for &command in Command::ALL {
            assert_eq!(command.as_str().parse::<Command>().expect("parse"), command);
        }
    }

    #[test]
    fn test_from_str_unknown_name() {
        let err = "teleport".parse::<Command>().unwrap_err();
        assert!(matches!(err, Error::UnknownCommand { ref command } if command == "teleport"));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
