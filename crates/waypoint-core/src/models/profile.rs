//! Profile model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// The owner of goals in a database file.
///
/// Authentication is out of scope for this crate; a profile row is created
/// lazily the first time a database file is used, and every goal belongs
/// to one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Unique identifier for the profile
    pub id: u64,

    /// Display name
    pub name: String,

    /// Contact email, if known
    pub email: Option<String>,

    /// Contact phone number, if known
    pub phone: Option<String>,

    /// Timestamp when the profile was created (UTC)
    pub created_at: Timestamp,
}
