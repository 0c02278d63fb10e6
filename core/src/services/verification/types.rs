//! Types for verification service results

use chrono::{DateTime, Utc};

/// Result of successfully issuing a verification code or reset token
#[derive(Debug, Clone)]
pub struct IssueOutcome {
    /// The mail provider message id, if dispatch succeeded
    pub message_id: Option<String>,

    /// Seconds until the issued secret expires
    pub expires_in_seconds: i64,

    /// When the user can request another secret
    pub next_resend_at: DateTime<Utc>,
}
