//! Typed request principal.
//!
//! Role dispatch happens exactly once, at the authentication boundary: the
//! JWT role claim is resolved into a [`Principal`] variant and every core
//! operation receives the typed principal instead of re-inspecting a role
//! string.

use crate::roles::{ROLE_ADMIN, ROLE_BUILDER, ROLE_INVESTOR};
use crate::types::DbId;

/// An authenticated caller, tagged by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Investor(DbId),
    Builder(DbId),
    Admin(DbId),
}

impl Principal {
    /// Resolve a role name (as carried in JWT claims) into a principal.
    ///
    /// Returns `None` for unknown role names.
    pub fn from_role(role: &str, id: DbId) -> Option<Self> {
        match role {
            ROLE_INVESTOR => Some(Self::Investor(id)),
            ROLE_BUILDER => Some(Self::Builder(id)),
            ROLE_ADMIN => Some(Self::Admin(id)),
            _ => None,
        }
    }

    /// The caller's user id, regardless of role.
    pub fn id(self) -> DbId {
        match self {
            Self::Investor(id) | Self::Builder(id) | Self::Admin(id) => id,
        }
    }

    /// The investor id, if this principal is an investor.
    pub fn investor_id(self) -> Option<DbId> {
        match self {
            Self::Investor(id) => Some(id),
            _ => None,
        }
    }

    /// The builder id, if this principal is a builder.
    pub fn builder_id(self) -> Option<DbId> {
        match self {
            Self::Builder(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_roles() {
        assert_eq!(
            Principal::from_role("investor", 7),
            Some(Principal::Investor(7))
        );
        assert_eq!(
            Principal::from_role("builder", 8),
            Some(Principal::Builder(8))
        );
        assert_eq!(Principal::from_role("admin", 9), Some(Principal::Admin(9)));
        assert_eq!(Principal::from_role("reviewer", 1), None);
    }

    #[test]
    fn accessors_are_role_gated() {
        let p = Principal::Investor(3);
        assert_eq!(p.investor_id(), Some(3));
        assert_eq!(p.builder_id(), None);
        assert_eq!(p.id(), 3);
        assert!(!p.is_admin());
    }
}
