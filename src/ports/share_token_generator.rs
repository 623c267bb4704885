//! Share token generator port.
//!
//! Uniqueness is not this port's job. Callers check each candidate against
//! the repository and ask again on a collision.

use crate::domain::survey::ShareToken;

pub trait ShareTokenGenerator: Send + Sync {
    fn generate(&self) -> ShareToken;
}
