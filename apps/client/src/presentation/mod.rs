// Presentation layer: the controller that owns all view state, the pure phase
// reducer it drives, and the view models the report is rendered from.
// Background work (the submission, timers) only ever talks to the controller
// through `UiEvent`s.

pub mod controller;
pub mod copy_feedback;
pub mod events;
pub mod export;
pub mod panels;
pub mod report;
pub mod state;
pub mod timers;

pub use controller::ReportController;
pub use events::UiEvent;
pub use report::ReportView;
pub use state::AnalysisPhase;
