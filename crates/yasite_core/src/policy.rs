//! Ownership-based access policy.
//!
//! # Responsibility
//! - Decide whether an identity may view or mutate one record.
//! - Decide how a refused mutation is reported to the requester.
//!
//! # Invariants
//! - Mutation requires an authenticated identity equal to the record owner.
//! - Unowned records can never be mutated through this policy.
//! - A refused edit/delete never reveals that the record exists.

use crate::config::AnonymousMutation;
use crate::model::identity::{Authorizable, Identity, Visibility};

/// How a refused edit/delete request is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Answer as if the record did not exist.
    NotFound,
    /// Ask the requester to log in and resume.
    LoginRequired,
}

/// Returns whether `identity` may see `item`.
pub fn can_view(identity: &Identity, item: &impl Authorizable) -> bool {
    match item.visibility() {
        Visibility::Public => true,
        Visibility::OwnerOnly => is_owner(identity, item),
    }
}

/// Returns whether `identity` may edit or delete `item`.
pub fn can_mutate(identity: &Identity, item: &impl Authorizable) -> bool {
    is_owner(identity, item)
}

/// Chooses the answer for an edit/delete request that `can_mutate` refused,
/// or that targets a record that does not exist.
pub fn mutation_denial(identity: &Identity, anonymous: AnonymousMutation) -> Denial {
    match (identity, anonymous) {
        (Identity::Anonymous, AnonymousMutation::LoginRedirect) => Denial::LoginRequired,
        _ => Denial::NotFound,
    }
}

fn is_owner(identity: &Identity, item: &impl Authorizable) -> bool {
    match (identity.user_id(), item.owner()) {
        (Some(requester), Some(owner)) => requester == owner,
        _ => false,
    }
}
