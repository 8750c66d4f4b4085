//! Table Session Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A table's ordering session, created by scanning a table-specific link
///
/// At most one session is active per client; it is persisted so a reload
/// can resume it, subject to re-validation against the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSession {
    /// Opaque credential binding this client to one table
    pub token: String,
    pub table_number: i64,
    /// Session is unusable at or after this instant
    pub expires_at: Option<DateTime<Utc>>,
}

impl TableSession {
    pub fn new(token: impl Into<String>, table_number: i64) -> Self {
        Self {
            token: token.into(),
            table_number,
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether `expires_at` has passed (a session without expiry never
    /// expires locally; the backend remains the authority)
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry() {
        let session = TableSession::new("tok", 5);
        assert!(!session.is_expired());

        let past = TableSession::new("tok", 5).with_expiry(Utc::now() - Duration::hours(1));
        assert!(past.is_expired());

        let future = TableSession::new("tok", 5).with_expiry(Utc::now() + Duration::hours(1));
        assert!(!future.is_expired());
    }
}
