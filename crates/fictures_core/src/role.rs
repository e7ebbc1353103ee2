//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Speaker of a message sent to a text model.
///
/// # Examples
///
/// ```
/// use fictures_core::Role;
///
/// assert_eq!(format!("{}", Role::System), "System");
/// assert_ne!(Role::User, Role::Assistant);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation
    System,
    /// Requests from the caller
    User,
    /// Earlier model replies
    Assistant,
}
