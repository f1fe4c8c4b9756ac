//! Bridge struct, execution engine and session lifecycle.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::browser::reference::{self, ElementReference};
use crate::browser::script::{self, ScriptValue};
use crate::browser::Element;
use crate::error::{Error, Result};
use crate::identifiers::{BridgeId, SessionId};
use crate::protocol::{Command, Method, NewSession, PathParams, lookup, resolve, unwrap_value};
use crate::transport::Transport;

use super::builder::BridgeBuilder;
use super::capabilities::Capabilities;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a bridge.
///
/// Element handles hold a `Weak` to this, never an `Arc`.
pub(crate) struct BridgeInner {
    /// Local id, for logging and handle identity.
    pub id: BridgeId,

    /// Wire transport. `None` once the bridge has quit.
    ///
    /// The lock is held for the whole exchange, so at most one request per
    /// bridge is ever in flight.
    transport: Mutex<Option<Box<dyn Transport>>>,

    /// Active session id, set once by `create_session`.
    session_id: RwLock<Option<SessionId>>,

    /// Capabilities the remote end returned for the session.
    capabilities: RwLock<Option<Capabilities>>,

    /// Element reference encoding.
    references: Arc<dyn ElementReference>,
}

// ============================================================================
// Bridge
// ============================================================================

/// Client-side connection to one remote WebDriver session.
///
/// Cheap to clone; clones share the session. Every command goes through
/// [`execute`](Self::execute).
///
/// # Example
///
/// ```ignore
/// use webdriver_bridge::{Bridge, By};
///
/// let bridge = Bridge::builder()
///     .url("http://localhost:4444/wd/hub")
///     .connect()
///     .await?;
///
/// bridge.navigate("https://example.com").await?;
/// let heading = bridge.find_element_by(By::tag_name("h1"), None).await?;
/// println!("{}", heading.text().await?);
///
/// bridge.quit().await?;
/// ```
#[derive(Clone)]
pub struct Bridge {
    /// Shared inner state.
    pub(crate) inner: Arc<BridgeInner>,
}

// ============================================================================
// Bridge - Display
// ============================================================================

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("id", &self.inner.id)
            .field("session_id", &*self.inner.session_id.read())
            .field("references", &self.inner.references)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Bridge - Constructors
// ============================================================================

impl Bridge {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> BridgeBuilder {
        BridgeBuilder::new()
    }

    /// Creates a bridge with no session yet.
    pub(crate) fn new(transport: Box<dyn Transport>, references: Arc<dyn ElementReference>) -> Self {
        Self {
            inner: Arc::new(BridgeInner {
                id: BridgeId::generate(),
                transport: Mutex::new(Some(transport)),
                session_id: RwLock::new(None),
                capabilities: RwLock::new(None),
                references,
            }),
        }
    }

    /// Rebuilds a handle from shared state.
    pub(crate) fn from_inner(inner: Arc<BridgeInner>) -> Self {
        Self { inner }
    }

    /// Returns a weak link for element handles.
    pub(crate) fn downgrade(&self) -> Weak<BridgeInner> {
        Arc::downgrade(&self.inner)
    }
}

// ============================================================================
// Bridge - Accessors
// ============================================================================

impl Bridge {
    /// Returns the local bridge id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> BridgeId {
        self.inner.id
    }

    /// Returns the active session id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSession`] if no session was ever created.
    pub fn session_id(&self) -> Result<SessionId> {
        self.inner.session_id.read().clone().ok_or(Error::NoSession)
    }

    /// Returns the capabilities the remote end reported for the session.
    #[must_use]
    pub fn capabilities(&self) -> Option<Capabilities> {
        self.inner.capabilities.read().clone()
    }

    /// Returns the element reference encoding in use.
    #[must_use]
    pub fn element_reference(&self) -> &dyn ElementReference {
        self.inner.references.as_ref()
    }
}

// ============================================================================
// Bridge - Execution
// ============================================================================

impl Bridge {
    /// Runs a command and returns the `value` member of the response.
    ///
    /// If the payload has no `value` member the whole payload is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownCommand`] if the command has no W3C route
    /// - [`Error::NoSession`] if the route needs a session and none exists
    /// - [`Error::UnmatchedParameters`] if `params` has an unused key
    /// - [`Error::TransportClosed`] after [`quit`](Self::quit)
    /// - Any transport or remote error, unchanged
    pub async fn execute(
        &self,
        command: Command,
        params: PathParams,
        body: Option<Value>,
    ) -> Result<Value> {
        let payload = self.raw_execute(command, params, body).await?;
        Ok(unwrap_value(payload))
    }

    /// Runs a command by its snake_case name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] for an unknown name, otherwise as
    /// [`execute`](Self::execute).
    pub async fn execute_named(
        &self,
        name: &str,
        params: PathParams,
        body: Option<Value>,
    ) -> Result<Value> {
        let command: Command = name.parse()?;
        self.execute(command, params, body).await
    }

    /// Runs a command and returns the raw payload.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute).
    pub async fn raw_execute(
        &self,
        command: Command,
        params: PathParams,
        body: Option<Value>,
    ) -> Result<Value> {
        let (method, path) = self.route(command, &params)?;

        let transport = self.inner.transport.lock().await;
        let transport = transport.as_deref().ok_or(Error::TransportClosed)?;
        transport.call(method, &path, body.as_ref()).await
    }

    /// Resolves a command to its verb and concrete path.
    fn route(&self, command: Command, params: &PathParams) -> Result<(Method, String)> {
        let descriptor = lookup(command)?;
        let session_id = self.inner.session_id.read().clone();
        let path = resolve(command, descriptor.template, session_id.as_ref(), params)?;

        info!(bridge_id = %self.inner.id, "-> {} {}", descriptor.method, path);
        Ok((descriptor.method, path))
    }
}

// ============================================================================
// Bridge - Session Lifecycle
// ============================================================================

impl Bridge {
    /// Opens the remote session.
    ///
    /// Sends `{"desiredCapabilities": ..}` and stores the returned session
    /// id and capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSessionId`] if the payload carries no
    /// session id. Nothing is stored in that case.
    pub(crate) async fn create_session(&self, desired: Capabilities) -> Result<()> {
        let body = json!({ "desiredCapabilities": desired });
        let payload = self
            .raw_execute(Command::NewSession, PathParams::new(), Some(body))
            .await?;

        let session = NewSession::from_payload(&payload).ok_or(Error::MissingSessionId)?;
        let capabilities = Capabilities::from_value(session.capabilities);

        info!(
            bridge_id = %self.inner.id,
            session_id = %session.session_id,
            browser = capabilities.browser_name().unwrap_or("unknown"),
            "Session created"
        );

        *self.inner.capabilities.write() = Some(capabilities);
        *self.inner.session_id.write() = Some(session.session_id);
        Ok(())
    }

    /// Ends the session and releases the transport.
    ///
    /// An already-closed transport is not an error. Calling `quit` again
    /// after it succeeded does nothing.
    ///
    /// # Errors
    ///
    /// Any error from `delete_session` or from closing the transport other
    /// than [`Error::TransportClosed`]. The transport is kept in that case.
    pub async fn quit(&self) -> Result<()> {
        let mut guard = self.inner.transport.lock().await;
        let Some(transport) = guard.as_deref() else {
            debug!(bridge_id = %self.inner.id, "Bridge already quit");
            return Ok(());
        };

        let (method, path) = self.route(Command::DeleteSession, &PathParams::new())?;
        match transport.call(method, &path, None).await {
            Ok(_) => {}
            Err(Error::TransportClosed) => {
                debug!(bridge_id = %self.inner.id, "Transport closed before delete_session");
            }
            Err(e) => return Err(e),
        }

        match transport.close().await {
            Ok(()) => {}
            Err(Error::TransportClosed) => {
                debug!(bridge_id = %self.inner.id, "Transport already closed");
            }
            Err(e) => return Err(e),
        }

        *guard = None;
        info!(bridge_id = %self.inner.id, "Session ended");
        Ok(())
    }
}

// ============================================================================
// Bridge - Element Codec
// ============================================================================

impl Bridge {
    /// Wraps an element reference returned by the remote end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if `value` is not a reference object.
    pub fn element_from(&self, value: &Value) -> Result<Element> {
        reference::element_from(value, self.element_reference(), &self.downgrade())
    }

    /// Wraps an array of element references, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if `value` is not an array of references.
    pub fn elements_from(&self, value: Value) -> Result<Vec<Element>> {
        reference::elements_from(value, self.element_reference(), &self.downgrade())
    }

    /// Converts a script result, turning references into handles.
    #[must_use]
    pub fn unwrap_script_result(&self, value: Value) -> ScriptValue {
        script::unwrap_script_result(value, self.element_reference(), &self.downgrade())
    }
}

// ============================================================================
// Tests
// ============================================================================
