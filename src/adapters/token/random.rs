//! Random share-token generator backed by the OS RNG.

use crate::domain::survey::ShareToken;
use crate::ports::ShareTokenGenerator;

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShareTokenGenerator;

impl RandomShareTokenGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ShareTokenGenerator for RandomShareTokenGenerator {
    fn generate(&self) -> ShareToken {
        ShareToken::generate()
    }
}
