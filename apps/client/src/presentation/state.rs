//! Analysis life-cycle as a pure reducer.
//!
//! ```text
//! NoFile ──select──▶ FileSelected ──submit──▶ Submitting ──settled──▶ Success
//!    ▲                  ▲   ▲                     │                     │
//!    │                  │   └──dismiss── Error ◀──┘                     │
//!    └──────────────────┴────────────reset (analyze another)────────────┘
//! ```
//!
//! `next` never mutates: it returns the following phase, `Ok(None)` for an
//! event that no longer applies (a stale submission), or a `ValidationError`
//! when the action is not allowed from the current phase.

use uuid::Uuid;

use crate::errors::ValidationError;
use crate::models::AnalyzeResult;
use crate::progress::ProgressState;
use crate::upload::SelectedFile;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPhase {
    NoFile,
    FileSelected {
        file: SelectedFile,
    },
    Submitting {
        file: SelectedFile,
        submission_id: Uuid,
        progress: Option<ProgressState>,
    },
    Success {
        result: Box<AnalyzeResult>,
    },
    Error {
        message: String,
        /// Kept so the user can dismiss the banner and resubmit the same file.
        file: Option<SelectedFile>,
    },
}

/// Inputs to the reducer.
#[derive(Debug)]
pub enum PhaseAction {
    SelectFile(SelectedFile),
    Submit {
        submission_id: Uuid,
        has_role: bool,
    },
    Progress {
        submission_id: Uuid,
        state: ProgressState,
    },
    Succeeded {
        submission_id: Uuid,
        result: Box<AnalyzeResult>,
    },
    Failed {
        submission_id: Uuid,
        message: String,
    },
    DismissError,
    Reset,
}

impl AnalysisPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoFile => "no file is selected",
            Self::FileSelected { .. } => "a file is selected",
            Self::Submitting { .. } => "an analysis is in progress",
            Self::Success { .. } => "showing results",
            Self::Error { .. } => "showing an error",
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        match self {
            Self::FileSelected { file } | Self::Submitting { file, .. } => Some(file),
            Self::Error { file, .. } => file.as_ref(),
            Self::NoFile | Self::Success { .. } => None,
        }
    }

    pub fn result(&self) -> Option<&AnalyzeResult> {
        match self {
            Self::Success { result } => Some(result.as_ref()),
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<&ProgressState> {
        match self {
            Self::Submitting { progress, .. } => progress.as_ref(),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// The submit trigger is enabled only with a file selected and nothing pending.
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::FileSelected { .. })
    }

    pub fn next(&self, action: PhaseAction) -> Result<Option<AnalysisPhase>, ValidationError> {
        match action {
            PhaseAction::SelectFile(file) => match self {
                Self::NoFile | Self::FileSelected { .. } | Self::Error { .. } => {
                    Ok(Some(Self::FileSelected { file }))
                }
                Self::Submitting { .. } => Err(ValidationError::SubmissionPending),
                Self::Success { .. } => Err(self.invalid("select a new file")),
            },

            PhaseAction::Submit {
                submission_id,
                has_role,
            } => match self {
                Self::FileSelected { file } => {
                    if !has_role {
                        return Err(ValidationError::EmptyRole);
                    }
                    Ok(Some(Self::Submitting {
                        file: file.clone(),
                        submission_id,
                        progress: None,
                    }))
                }
                Self::NoFile => Err(ValidationError::NoFile),
                Self::Submitting { .. } => Err(ValidationError::SubmissionPending),
                Self::Success { .. } | Self::Error { .. } => Err(self.invalid("analyze")),
            },

            PhaseAction::Progress {
                submission_id,
                state,
            } => match self {
                Self::Submitting {
                    file,
                    submission_id: current,
                    ..
                } if *current == submission_id => Ok(Some(Self::Submitting {
                    file: file.clone(),
                    submission_id,
                    progress: Some(state),
                })),
                _ => Ok(None),
            },

            PhaseAction::Succeeded {
                submission_id,
                result,
            } => match self {
                Self::Submitting {
                    submission_id: current,
                    ..
                } if *current == submission_id => Ok(Some(Self::Success { result })),
                _ => Ok(None),
            },

            PhaseAction::Failed {
                submission_id,
                message,
            } => match self {
                Self::Submitting {
                    file,
                    submission_id: current,
                    ..
                } if *current == submission_id => Ok(Some(Self::Error {
                    message,
                    file: Some(file.clone()),
                })),
                _ => Ok(None),
            },

            PhaseAction::DismissError => match self {
                Self::Error { file: Some(file), .. } => {
                    Ok(Some(Self::FileSelected { file: file.clone() }))
                }
                Self::Error { file: None, .. } => Ok(Some(Self::NoFile)),
                _ => Ok(None),
            },

            PhaseAction::Reset => match self {
                Self::Submitting { .. } => Err(ValidationError::SubmissionPending),
                _ => Ok(Some(Self::NoFile)),
            },
        }
    }

    fn invalid(&self, action: &'static str) -> ValidationError {
        ValidationError::InvalidTransition {
            from: self.name(),
            action,
        }
    }
}
