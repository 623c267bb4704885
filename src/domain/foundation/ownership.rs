//! Ownership trait for owner-scoped aggregates.
//!
//! ```ignore
//! impl OwnedByUser for Survey {
//!     fn owner_id(&self) -> &UserId {
//!         &self.owner_id
//!     }
//! }
//!
//! survey.check_ownership(ctx.user_id())?; // Err(Forbidden) if not owner
//! ```

use super::{DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning a `Forbidden` error if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(
                DomainError::new(ErrorCode::Forbidden, "User does not own this resource")
                    .with_detail("requested_by", user_id.to_string()),
            )
        }
    }
}
