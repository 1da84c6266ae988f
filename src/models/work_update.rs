//! Work update model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A daily work update submitted by a user.
///
/// Only the author and the date matter for attendance reporting; the content
/// is carried along for completeness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkUpdate {
    /// The author of the update.
    #[serde(alias = "clerk_user_id")]
    pub user_id: String,
    /// The calendar day the update is for.
    pub update_date: NaiveDate,
    /// Free-text body of the update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
