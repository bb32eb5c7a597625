//! Account roles.

/// What an account may do beyond its own resources.
///
/// Stored as a small integer in `users.role` and carried as the token `role` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum UserRole {
    #[default]
    Normal = 0,
    /// May edit or delete any user or recipe and manage the tag and ingredient catalog.
    Admin = 1,
}

impl UserRole {
    /// `None` for values no role is assigned to.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Normal),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_round_trip_known_roles() {
        for role in [UserRole::Normal, UserRole::Admin] {
            assert_eq!(UserRole::from_u8(role.as_u8()), Some(role));
        }
        assert_eq!(UserRole::from_u8(2), None);
    }

    #[test]
    fn should_default_to_normal_without_admin_rights() {
        assert_eq!(UserRole::default(), UserRole::Normal);
        assert!(!UserRole::default().is_admin());
        assert!(UserRole::Admin.is_admin());
    }
}
