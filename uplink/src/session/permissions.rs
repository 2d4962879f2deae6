//! Administrative capability derivation.
//!
//! Capability is granted if and only if the role list contains one of the
//! recognized admin markers. Matching is exact-string: `"admin"` and
//! `"Admin"` are the two recognized spellings, `"ADMIN"` is not. This is a
//! deliberate preservation of observed behavior rather than a general
//! case-insensitive comparison.

/// Role values recognized as granting administrative capability.
pub const ADMIN_MARKERS: &[&str] = &["admin", "Admin"];

/// Result of deriving administrative capability from a role list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminAccess {
    pub is_admin: bool,
    /// Normalized role list to store alongside the flag
    pub roles: Vec<String>,
}

/// Derive administrative capability from an optional role list.
///
/// Absent input yields no capability and an empty normalized list. Pure
/// function: no side effects, no failure mode.
pub fn derive_admin_access(roles: Option<&[String]>) -> AdminAccess {
    match roles {
        Some(list) => AdminAccess {
            is_admin: list.iter().any(|role| ADMIN_MARKERS.contains(&role.as_str())),
            roles: list.to_vec(),
        },
        None => AdminAccess::default(),
    }
}
