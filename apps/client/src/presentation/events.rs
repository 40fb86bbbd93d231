use uuid::Uuid;

use crate::errors::AppError;
use crate::models::AnalyzeResult;
use crate::progress::ProgressState;

/// Messages posted by background tasks to the controller.
#[derive(Debug)]
pub enum UiEvent {
    /// The decorative timeline advanced for a submission.
    Progress {
        submission_id: Uuid,
        state: ProgressState,
    },
    /// Request and timeline have both settled (or the request failed).
    Settled {
        submission_id: Uuid,
        outcome: Result<Box<AnalyzeResult>, AppError>,
    },
    /// A copy indicator's revert delay elapsed.
    CopyExpired { generation: u64 },
}
