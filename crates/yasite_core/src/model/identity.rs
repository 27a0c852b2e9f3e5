//! Requester identity and ownership contracts.

use crate::model::user::UserId;

/// The requester behind one call: anonymous or a specific authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    Anonymous,
    User(UserId),
}

impl Identity {
    /// Returns the authenticated user id, or `None` for anonymous requesters.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<UserId> for Identity {
    fn from(value: UserId) -> Self {
        Self::User(value)
    }
}

/// Who may see a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Any identity, including anonymous.
    Public,
    /// Only the record owner.
    OwnerOnly,
}

/// Ownership contract consumed by the access policy.
///
/// Ownership is the only authorization axis: there are no roles.
pub trait Authorizable {
    /// Owner fixed at creation; `None` for unowned records.
    fn owner(&self) -> Option<UserId>;
    fn visibility(&self) -> Visibility;
}
