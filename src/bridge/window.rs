//! Window handles, geometry and frames.
//!
//! The W3C protocol only manipulates the current window. Size and position
//! methods take an optional handle for parity with the legacy dialect;
//! anything other than the current window is rejected without a request.

use serde_json::{Value, json};
use tracing::debug;

use crate::browser::{Element, Rect};
use crate::error::{Error, Result};
use crate::protocol::{Command, PathParams};

use super::Bridge;

// ============================================================================
// Constants
// ============================================================================

/// Handle alias for the window in focus.
const CURRENT_WINDOW: &str = "current";

// ============================================================================
// FrameTarget
// ============================================================================

/// Frame to switch into.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameTarget {
    /// Top-level browsing context.
    Top,
    /// Frame by index among the current document's frames.
    Index(u16),
    /// Frame by its `<iframe>` / `<frame>` element.
    Element(Element),
}

impl From<u16> for FrameTarget {
    fn from(index: u16) -> Self {
        Self::Index(index)
    }
}

impl From<Element> for FrameTarget {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&Element> for FrameTarget {
    fn from(element: &Element) -> Self {
        Self::Element(element.clone())
    }
}

// ============================================================================
// Bridge - Window Handles
// ============================================================================

impl Bridge {
    /// Gets the current window handle.
    pub async fn window_handle(&self) -> Result<String> {
        self.execute_text(Command::GetWindowHandle).await
    }

    /// Gets every open window handle.
    pub async fn window_handles(&self) -> Result<Vec<String>> {
        let value = self
            .execute(Command::GetWindowHandles, PathParams::new(), None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Switches focus to another window.
    pub async fn switch_to_window(&self, handle: &str) -> Result<()> {
        debug!(bridge_id = %self.inner.id, handle = %handle, "Switching window");
        self.execute(
            Command::SwitchToWindow,
            PathParams::new(),
            Some(json!({ "handle": handle })),
        )
        .await?;
        Ok(())
    }

    /// Closes the current window and returns the remaining handles.
    pub async fn close_window(&self) -> Result<Vec<String>> {
        let value = self
            .execute(Command::CloseWindow, PathParams::new(), None)
            .await?;
        Ok(match value {
            Value::Null => Vec::new(),
            other => serde_json::from_value(other)?,
        })
    }
}

// ============================================================================
// Bridge - Window Geometry
// ============================================================================

impl Bridge {
    /// Gets the current window's rectangle.
    pub async fn window_rect(&self) -> Result<Rect> {
        let value = self
            .execute(Command::GetWindowRect, PathParams::new(), None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Moves and resizes the current window; returns the resulting rectangle.
    pub async fn set_window_rect(&self, rect: Rect) -> Result<Rect> {
        self.post_window_rect(serde_json::to_value(rect)?).await
    }

    /// Gets the size of a window as `(width, height)`.
    ///
    /// `None` means the current window.
    pub async fn window_size(&self, handle: Option<&str>) -> Result<(f64, f64)> {
        require_current("window_size", handle)?;
        let rect = self.window_rect().await?;
        Ok((rect.width, rect.height))
    }

    /// Resizes a window.
    pub async fn resize_window(&self, width: f64, height: f64, handle: Option<&str>) -> Result<()> {
        require_current("resize_window", handle)?;
        self.post_window_rect(json!({ "width": width, "height": height }))
            .await?;
        Ok(())
    }

    /// Gets the position of a window as `(x, y)`.
    pub async fn window_position(&self, handle: Option<&str>) -> Result<(f64, f64)> {
        require_current("window_position", handle)?;
        let rect = self.window_rect().await?;
        Ok((rect.x, rect.y))
    }

    /// Moves a window.
    pub async fn reposition_window(&self, x: f64, y: f64, handle: Option<&str>) -> Result<()> {
        require_current("reposition_window", handle)?;
        self.post_window_rect(json!({ "x": x, "y": y })).await?;
        Ok(())
    }

    /// Maximizes a window.
    pub async fn maximize_window(&self, handle: Option<&str>) -> Result<()> {
        require_current("maximize_window", handle)?;
        self.execute(Command::MaximizeWindow, PathParams::new(), None)
            .await?;
        Ok(())
    }

    /// Minimizes the current window.
    pub async fn minimize_window(&self) -> Result<()> {
        self.execute(Command::MinimizeWindow, PathParams::new(), None)
            .await?;
        Ok(())
    }

    /// Makes the current window fullscreen.
    pub async fn fullscreen_window(&self) -> Result<()> {
        self.execute(Command::FullscreenWindow, PathParams::new(), None)
            .await?;
        Ok(())
    }

    async fn post_window_rect(&self, body: Value) -> Result<Rect> {
        let value = self
            .execute(Command::SetWindowRect, PathParams::new(), Some(body))
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Rejects any handle other than the current window.
fn require_current(operation: &str, handle: Option<&str>) -> Result<()> {
    match handle {
        None | Some(CURRENT_WINDOW) => Ok(()),
        Some(other) => Err(Error::unsupported(format!(
            "{operation} on non-current window {other:?}"
        ))),
    }
}

// ============================================================================
// Bridge - Frames
// ============================================================================

impl Bridge {
    /// Switches into a frame.
    pub async fn switch_to_frame(&self, target: impl Into<FrameTarget>) -> Result<()> {
        let id = match target.into() {
            FrameTarget::Top => Value::Null,
            FrameTarget::Index(index) => Value::from(index),
            FrameTarget::Element(element) => {
                self.element_reference().to_reference(element.id())
            }
        };

        self.execute(
            Command::SwitchToFrame,
            PathParams::new(),
            Some(json!({ "id": id })),
        )
        .await?;
        Ok(())
    }

    /// Switches to the parent of the current frame.
    pub async fn switch_to_parent_frame(&self) -> Result<()> {
        self.execute(Command::SwitchToParentFrame, PathParams::new(), None)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::bridge::test_support::{connected, reference};
    use crate::protocol::Method;
    use crate::transport::scripted::ScriptedTransport;

    #[tokio::test]
    async fn test_window_handles() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;
        transport
            .respond(json!({"value": "w1"}))
            .respond(json!({"value": ["w1", "w2"]}));

        assert_eq!(bridge.window_handle().await.expect("handle"), "w1");
        assert_eq!(
            bridge.window_handles().await.expect("handles"),
            ["w1", "w2"]
        );
        assert_eq!(
            transport.last_call().expect("call").path,
            "/session/abc/window/handles"
        );
    }

    #[tokio::test]
    async fn test_switch_and_close_window() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;
        transport
            .respond(json!({"value": null}))
            .respond(json!({"value": ["w1"]}));

        bridge.switch_to_window("w2").await.expect("switch");
        let switch = transport.last_call().expect("call");
        assert_eq!(switch.method, Method::Post);
        assert_eq!(switch.body, Some(json!({"handle": "w2"})));

        let remaining = bridge.close_window().await.expect("close");
        assert_eq!(remaining, ["w1"]);
        let close = transport.last_call().expect("call");
        assert_eq!(close.method, Method::Delete);
        assert_eq!(close.path, "/session/abc/window");
    }

    #[tokio::test]
    async fn test_resize_current_window() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;
        transport.respond(json!({"value": {"x": 0, "y": 0, "width": 800, "height": 600}}));

        bridge.resize_window(800.0, 600.0, None).await.expect("resize");

        let call = transport.last_call().expect("call");
        assert_eq!(call.path, "/session/abc/window/rect");
        assert_eq!(call.body, Some(json!({"width": 800.0, "height": 600.0})));
    }

    #[tokio::test]
    async fn test_window_size_and_position() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;
        let rect = json!({"value": {"x": 10, "y": 20, "width": 1024, "height": 768}});
        transport.respond(rect.clone()).respond(rect);

        assert_eq!(
            bridge.window_size(Some("current")).await.expect("size"),
            (1024.0, 768.0)
        );
        assert_eq!(
            bridge.window_position(None).await.expect("position"),
            (10.0, 20.0)
        );
    }

    #[tokio::test]
    async fn test_non_current_window_is_unsupported() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;

        let errors = [
            bridge.resize_window(1.0, 1.0, Some("w2")).await.unwrap_err(),
            bridge.window_size(Some("w2")).await.unwrap_err(),
            bridge.maximize_window(Some("w2")).await.unwrap_err(),
            bridge.window_position(Some("w2")).await.unwrap_err(),
            bridge.reposition_window(0.0, 0.0, Some("w2")).await.unwrap_err(),
        ];

        for err in errors {
            assert!(err.is_unsupported(), "{err}");
        }
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_set_window_rect_round_trip() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;
        transport.respond(json!({"value": {"x": 1, "y": 2, "width": 3, "height": 4}}));

        let rect = Rect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        };
        assert_eq!(bridge.set_window_rect(rect).await.expect("rect"), rect);
    }

    #[tokio::test]
    async fn test_window_state_commands() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;
        for _ in 0..3 {
            transport.respond(json!({"value": {"x": 0, "y": 0, "width": 1, "height": 1}}));
        }

        bridge.maximize_window(None).await.expect("maximize");
        bridge.minimize_window().await.expect("minimize");
        bridge.fullscreen_window().await.expect("fullscreen");

        let paths: Vec<String> = transport.calls().into_iter().skip(1).map(|c| c.path).collect();
        assert_eq!(
            paths,
            [
                "/session/abc/window/maximize",
                "/session/abc/window/minimize",
                "/session/abc/window/fullscreen"
            ]
        );
    }

    #[tokio::test]
    async fn test_switch_to_frame_targets() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;
        for _ in 0..4 {
            transport.respond(json!({"value": null}));
        }
        let frame = bridge.element_from(&reference("F1")).expect("frame");

        bridge.switch_to_frame(FrameTarget::Top).await.expect("top");
        bridge.switch_to_frame(2_u16).await.expect("index");
        bridge.switch_to_frame(&frame).await.expect("element");
        bridge.switch_to_parent_frame().await.expect("parent");

        let calls = transport.calls();
        assert_eq!(calls[1].body, Some(json!({"id": null})));
        assert_eq!(calls[2].body, Some(json!({"id": 2})));
        assert_eq!(calls[3].body, Some(json!({"id": reference("F1")})));
        assert_eq!(calls[4].path, "/session/abc/frame/parent");
    }
}
