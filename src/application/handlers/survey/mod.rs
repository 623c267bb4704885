//! Survey command and query handlers.

mod attach_summary;
mod can_view_results;
mod close_survey;
mod create_survey;
mod generate_summary;
mod get_public_survey;
mod get_survey_results;
mod list_owner_surveys;
mod record_response;

pub use attach_summary::{AttachSummaryCommand, AttachSummaryHandler, AttachSummaryResult};
pub use can_view_results::{CanViewResultsHandler, CanViewResultsQuery};
pub use close_survey::{CloseSurveyCommand, CloseSurveyHandler, CloseSurveyResult};
pub use create_survey::{CreateSurveyCommand, CreateSurveyHandler, CreateSurveyResult};
pub use generate_summary::{GenerateSummaryCommand, GenerateSummaryHandler};
pub use get_public_survey::{GetPublicSurveyHandler, GetPublicSurveyQuery, PublicSurveyView};
pub use get_survey_results::{GetSurveyResultsHandler, GetSurveyResultsQuery, SurveyResults};
pub use list_owner_surveys::{GetSurveyHandler, GetSurveyQuery, ListOwnerSurveysHandler};
pub use record_response::{RecordResponseCommand, RecordResponseHandler, RecordResponseResult};
