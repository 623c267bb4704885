//! Keyed critical sections.
//!
//! Every write to a survey (response intake, summary, close) runs its
//! load-validate-commit sequence while holding that survey's lock. Owner
//! profiles get the same treatment: registration, sign-in and rewards all
//! read, modify and save one `User` under that user's lock. Different keys
//! never contend.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::{SurveyId, UserId};

/// One lock per survey.
pub type SurveyLocks = KeyedLocks<SurveyId>;

/// One lock per owner profile.
pub type UserLocks = KeyedLocks<UserId>;

/// Hands out one async mutex per key.
///
/// Entries are kept for the life of the registry.
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> fmt::Debug for KeyedLocks<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedLocks").field("len", &self.len()).finish()
    }
}

impl<K: Eq + Hash> KeyedLocks<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the key.
    pub async fn acquire(&self, key: K) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(locks.entry(key).or_default())
        };
        lock.lock_owned().await
    }
}

impl<K> KeyedLocks<K> {
    /// Number of keys that have been locked at least once.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_survey_is_exclusive() {
        let locks = Arc::new(SurveyLocks::new());
        let id = SurveyId::new();

        let guard = locks.acquire(id).await;
        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_surveys_do_not_contend() {
        let locks = SurveyLocks::new();
        let _a = locks.acquire(SurveyId::new()).await;
        let _b = tokio::time::timeout(Duration::from_millis(50), locks.acquire(SurveyId::new()))
            .await
            .expect("second survey should lock immediately");
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn same_user_is_exclusive() {
        let locks = Arc::new(UserLocks::new());
        let alice = UserId::new("alice").unwrap();

        let guard = locks.acquire(alice.clone()).await;
        let contender = {
            let locks = Arc::clone(&locks);
            let alice = alice.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(alice).await;
            })
        };
        let _bob = tokio::time::timeout(
            Duration::from_millis(50),
            locks.acquire(UserId::new("bob").unwrap()),
        )
        .await
        .expect("another user should lock immediately");

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }
}
