pub mod project_range;
pub mod record;
pub mod roster;

pub use project_range::ProjectRange;
pub use record::{FeedbackTable, ProjectRecord, StudentFeedback, NOT_SUBMITTED};
pub use roster::Roster;
