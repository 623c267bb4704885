//! Share-token generator adapters.

mod random;

pub use random::RandomShareTokenGenerator;
