//! GamificationTracker - Event handler that awards owners for survey activity.
//!
//! Listens for survey lifecycle events and updates the owner's points,
//! level, streak and badges. Survey writes never wait on this: a failure
//! here is logged by the bus and leaves the survey untouched.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::UserLocks;
use crate::domain::foundation::{
    DomainError, ErrorCode, EventEnvelope, EventId, Timestamp, UserId,
};
use crate::domain::survey::{ResponseRecorded, ResultsUnlocked, SummaryAttached, SurveyCreated};
use crate::domain::user::{BadgeKind, Reward, POPULAR_RESPONSE_COUNT};
use crate::ports::{EventHandler, EventSubscriber, UserRepository};

const SURVEY_CREATED: &str = "survey.created.v1";
const RESPONSE_RECORDED: &str = "survey.response_recorded.v1";
const RESULTS_UNLOCKED: &str = "survey.results_unlocked.v1";
const SUMMARY_ATTACHED: &str = "survey.summary_attached.v1";

/// Event types the tracker reacts to.
pub const GAMIFICATION_EVENTS: [&str; 4] = [
    SURVEY_CREATED,
    RESPONSE_RECORDED,
    RESULTS_UNLOCKED,
    SUMMARY_ATTACHED,
];

/// What one event does to its owner.
struct Award {
    owner_id: UserId,
    reward: Reward,
    active_at: Option<Timestamp>,
    badge: Option<BadgeKind>,
}

/// How many handled event ids are remembered for duplicate detection.
pub const PROCESSED_WINDOW: usize = 4096;

/// The most recent handled event ids, oldest evicted first.
#[derive(Debug)]
struct RecentEvents {
    ids: HashSet<EventId>,
    order: VecDeque<EventId>,
    capacity: usize,
}

impl RecentEvents {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn contains(&self, id: &EventId) -> bool {
        self.ids.contains(id)
    }

    fn insert(&mut self, id: EventId) {
        if !self.ids.insert(id.clone()) {
            return;
        }
        self.order.push_back(id);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
            }
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

pub struct GamificationTracker {
    users: Arc<dyn UserRepository>,
    /// Shared with every other writer of user records.
    user_locks: Arc<UserLocks>,
    processed: Mutex<RecentEvents>,
}

impl GamificationTracker {
    pub fn new(users: Arc<dyn UserRepository>, user_locks: Arc<UserLocks>) -> Self {
        Self::with_window(users, user_locks, PROCESSED_WINDOW)
    }

    pub fn with_window(
        users: Arc<dyn UserRepository>,
        user_locks: Arc<UserLocks>,
        window: usize,
    ) -> Self {
        Self {
            users,
            user_locks,
            processed: Mutex::new(RecentEvents::with_capacity(window.max(1))),
        }
    }

    /// Number of event ids currently remembered.
    pub fn remembered_events(&self) -> usize {
        self.recent().len()
    }

    fn recent(&self) -> std::sync::MutexGuard<'_, RecentEvents> {
        self.processed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Subscribes one shared tracker to every event type it handles.
    pub fn subscribe_to(self: &Arc<Self>, subscriber: &dyn EventSubscriber) {
        subscriber.subscribe_all(&GAMIFICATION_EVENTS, Arc::clone(self) as Arc<dyn EventHandler>);
    }

    fn award_for(event: &EventEnvelope) -> Result<Option<Award>, DomainError> {
        let award = match event.event_type.as_str() {
            SURVEY_CREATED => {
                let e: SurveyCreated = event.payload_as().map_err(payload_error)?;
                Award {
                    owner_id: e.owner_id,
                    reward: Reward::SurveyCreated,
                    active_at: Some(e.created_at),
                    badge: Some(BadgeKind::FirstSurvey),
                }
            }
            RESPONSE_RECORDED => {
                let e: ResponseRecorded = event.payload_as().map_err(payload_error)?;
                Award {
                    owner_id: e.owner_id,
                    reward: Reward::ResponseReceived,
                    active_at: None,
                    badge: (e.response_count >= POPULAR_RESPONSE_COUNT).then_some(BadgeKind::Popular),
                }
            }
            RESULTS_UNLOCKED => {
                let e: ResultsUnlocked = event.payload_as().map_err(payload_error)?;
                Award {
                    owner_id: e.owner_id,
                    reward: Reward::ResultsUnlocked,
                    active_at: None,
                    badge: None,
                }
            }
            SUMMARY_ATTACHED => {
                let e: SummaryAttached = event.payload_as().map_err(payload_error)?;
                Award {
                    owner_id: e.owner_id,
                    reward: Reward::SummaryAttached,
                    active_at: Some(e.attached_at),
                    badge: None,
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(award))
    }
}

fn payload_error(err: serde_json::Error) -> DomainError {
    DomainError::new(ErrorCode::ValidationFailed, err.to_string())
}

#[async_trait]
impl EventHandler for GamificationTracker {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let Some(award) = Self::award_for(&event)? else {
            return Ok(());
        };

        // Duplicates of one event share an owner, so the owner's lock orders them.
        let _guard = self.user_locks.acquire(award.owner_id.clone()).await;
        if self.recent().contains(&event.event_id) {
            tracing::debug!(event_id = %event.event_id.as_str(), "Event already processed");
            return Ok(());
        }

        let mut user = self
            .users
            .find_by_id(&award.owner_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::UserNotFound,
                    format!("User not found: {}", award.owner_id),
                )
            })?;

        if let Some(level) = user.award(award.reward) {
            tracing::info!(user_id = %award.owner_id, level, "Owner levelled up");
        }
        if let Some(at) = award.active_at {
            if user.record_activity(at.day()) {
                tracing::info!(user_id = %award.owner_id, "Badge earned: on_fire");
            }
        }
        if let Some(kind) = award.badge {
            if user.earn_badge(kind) {
                tracing::info!(user_id = %award.owner_id, badge = kind.display_name(), "Badge earned");
            }
        }

        self.users.save(&user).await?;
        self.recent().insert(event.event_id);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "GamificationTracker"
    }
}
