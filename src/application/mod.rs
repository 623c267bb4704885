//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) are kept apart from query handlers (read).

pub mod handlers;
mod locks;
mod survey_lifecycle;

pub use handlers::{
    // Survey handlers
    AttachSummaryCommand, AttachSummaryHandler, AttachSummaryResult,
    CanViewResultsHandler, CanViewResultsQuery,
    CloseSurveyCommand, CloseSurveyHandler, CloseSurveyResult,
    CreateSurveyCommand, CreateSurveyHandler, CreateSurveyResult,
    GenerateSummaryCommand, GenerateSummaryHandler,
    GetPublicSurveyHandler, GetPublicSurveyQuery, PublicSurveyView,
    GetSurveyHandler, GetSurveyQuery, ListOwnerSurveysHandler,
    GetSurveyResultsHandler, GetSurveyResultsQuery, SurveyResults,
    RecordResponseCommand, RecordResponseHandler, RecordResponseResult,
    // Owner handlers
    GamificationTracker, SignInCommand, SignInHandler, SignInResult, GAMIFICATION_EVENTS,
};
pub use survey_lifecycle::{LifecyclePorts, SurveyLifecycle};
pub use locks::{KeyedLocks, SurveyLocks, UserLocks};
