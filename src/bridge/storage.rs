//! Cookie methods.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::protocol::{Command, PathParams};

use super::Bridge;

// ============================================================================
// Cookie
// ============================================================================

/// A browser cookie in W3C serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Secure flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    /// HttpOnly flag.
    #[serde(rename = "httpOnly", default, skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    /// SameSite attribute (`Strict`, `Lax` or `None`).
    #[serde(rename = "sameSite", default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
    /// Expiry in seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<u64>,
}

impl Cookie {
    /// Creates a new cookie with name and value.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            secure: None,
            http_only: None,
            same_site: None,
            expiry: None,
        }
    }

    /// Sets the domain.
    #[inline]
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the path.
    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the secure flag.
    #[inline]
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Sets the httpOnly flag.
    #[inline]
    #[must_use]
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = Some(http_only);
        self
    }

    /// Sets the SameSite attribute.
    #[inline]
    #[must_use]
    pub fn with_same_site(mut self, same_site: impl Into<String>) -> Self {
        self.same_site = Some(same_site.into());
        self
    }

    /// Sets the expiry timestamp.
    #[inline]
    #[must_use]
    pub fn with_expiry(mut self, expiry: u64) -> Self {
        self.expiry = Some(expiry);
        self
    }
}

// ============================================================================
// Bridge - Cookies
// ============================================================================

impl Bridge {
    /// Gets all cookies visible to the current page.
    pub async fn cookies(&self) -> Result<Vec<Cookie>> {
        let value = self
            .execute(Command::GetAllCookies, PathParams::new(), None)
            .await?;
        let cookies: Vec<Cookie> = serde_json::from_value(value)?;

        debug!(bridge_id = %self.inner.id, count = cookies.len(), "Got all cookies");
        Ok(cookies)
    }

    /// Gets a cookie by name.
    ///
    /// Remote ends report a missing cookie as a `no such cookie` error,
    /// which is returned unchanged.
    pub async fn cookie(&self, name: &str) -> Result<Cookie> {
        let params = PathParams::new().with("name", name);
        let value = self.execute(Command::GetCookie, params, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Adds a cookie to the current page's domain.
    pub async fn add_cookie(&self, cookie: &Cookie) -> Result<()> {
        debug!(bridge_id = %self.inner.id, name = %cookie.name, "Adding cookie");
        self.execute(
            Command::AddCookie,
            PathParams::new(),
            Some(json!({ "cookie": cookie })),
        )
        .await?;
        Ok(())
    }

    /// Deletes a cookie by name.
    pub async fn delete_cookie(&self, name: &str) -> Result<()> {
        debug!(bridge_id = %self.inner.id, name = %name, "Deleting cookie");
        let params = PathParams::new().with("name", name);
        self.execute(Command::DeleteCookie, params, None).await?;
        Ok(())
    }

    /// Deletes every cookie visible to the current page.
    pub async fn delete_all_cookies(&self) -> Result<()> {
        self.execute(Command::DeleteAllCookies, PathParams::new(), None)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
