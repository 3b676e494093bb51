//! Client session for the remote sequence database.

use std::fmt;

/// Client tag sent with every E-utilities request.
pub const TOOL_NAME: &str = "taxfetch";

/// Contact identity and credentials for E-utilities.
///
/// Created once at startup and passed explicitly to the client. No
/// validation happens here; a malformed email or key is reported by the
/// service on the first request. The `Debug` output hides the API key.
///
/// # Examples
///
/// ```
/// use taxfetch::core::Session;
///
/// let session = Session::new("me@example.org", "");
/// assert_eq!(session.tool(), "taxfetch");
/// assert!(session.api_key().is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    email: String,
    api_key: String,
    tool: String,
}

impl Session {
    /// Creates a session with the default client tag.
    #[must_use]
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_key: api_key.into(),
            tool: TOOL_NAME.to_string(),
        }
    }

    /// Contact email reported to NCBI.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// API key, or `None` when blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        if key.is_empty() { None } else { Some(key) }
    }

    /// Client tag.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Identity parameters appended to every request.
    #[must_use]
    pub fn identity_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("tool", self.tool.clone())];
        if !self.email.trim().is_empty() {
            params.push(("email", self.email.trim().to_string()));
        }
        if let Some(key) = self.api_key() {
            params.push(("api_key", key.to_string()));
        }
        params
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("email", &self.email)
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("tool", &self.tool)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_params_full() {
        let session = Session::new("me@example.org", "abc123");
        let params = session.identity_params();
        assert_eq!(
            params,
            vec![
                ("tool", "taxfetch".to_string()),
                ("email", "me@example.org".to_string()),
                ("api_key", "abc123".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_key_not_sent() {
        let session = Session::new("me@example.org", "   ");
        assert!(session.api_key().is_none());
        assert!(
            session
                .identity_params()
                .iter()
                .all(|(name, _)| *name != "api_key")
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let session = Session::new("me@example.org", "abc123");
        let shown = format!("{session:?}");
        assert!(shown.contains("me@example.org"));
        assert!(shown.contains("<redacted>"));
        assert!(!shown.contains("abc123"));

        let range = crate::core::LengthRange::new(1, 2);
        let config = crate::core::RetrievalConfig::new(session, "9606", range);
        assert!(!format!("{config:?}").contains("abc123"));
    }
}
