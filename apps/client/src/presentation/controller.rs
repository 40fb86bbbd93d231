//! Report controller: owns the analysis phase, the candidate's context and the
//! ephemeral UI flags, and is the only place any of them change.
//!
//! # Event flow
//! - User intents (`select_file`, `analyze`, `copy_script`, ...) are methods.
//! - Background work (the submission task, revert timers) posts `UiEvent`s on
//!   the controller's channel; `next_event` + `handle_event` apply them.
//! - Every background task lives in a `TaskSlot`, so reset and drop cancel it.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::AnalysisService;
use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::errors::{AppError, ValidationError};
use crate::models::{AnalyzeResult, Context};
use crate::persistence::ContextStore;
use crate::presentation::copy_feedback::{CopyIndicator, COPY_FEEDBACK_DELAY};
use crate::presentation::events::UiEvent;
use crate::presentation::export::clipboard_summary;
use crate::presentation::panels::PanelState;
use crate::presentation::report::ReportView;
use crate::presentation::state::{AnalysisPhase, PhaseAction};
use crate::presentation::timers::TaskSlot;
use crate::progress::{settle_with_timeline, ProgressSimulator, ProgressState};
use crate::upload::SelectedFile;

pub struct ReportController {
    service: Arc<dyn AnalysisService>,
    store: Arc<dyn ContextStore>,
    simulator: ProgressSimulator,
    max_upload_bytes: u64,
    copy_delay: Duration,

    context: Context,
    phase: AnalysisPhase,
    copy: CopyIndicator,
    panels: PanelState,
    submission: TaskSlot,

    events_tx: UnboundedSender<UiEvent>,
    events_rx: UnboundedReceiver<UiEvent>,
}

impl ReportController {
    /// Loads the persisted context and starts with no file selected.
    pub fn new(service: Arc<dyn AnalysisService>, store: Arc<dyn ContextStore>) -> Self {
        let context = store.read();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            store,
            simulator: ProgressSimulator::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            copy_delay: COPY_FEEDBACK_DELAY,
            context,
            phase: AnalysisPhase::NoFile,
            copy: CopyIndicator::new(),
            panels: PanelState::new(),
            submission: TaskSlot::new(),
            events_tx,
            events_rx,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    // ── Read access ─────────────────────────────────────────────────────────

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn phase(&self) -> &AnalysisPhase {
        &self.phase
    }

    pub fn progress(&self) -> Option<&ProgressState> {
        self.phase.progress()
    }

    pub fn result(&self) -> Option<&AnalyzeResult> {
        self.phase.result()
    }

    /// The report for the current result, if there is one.
    pub fn report(&self) -> Option<ReportView<'_>> {
        self.phase.result().map(ReportView::build)
    }

    /// Whether the analyze trigger is enabled.
    pub fn can_analyze(&self) -> bool {
        self.phase.can_submit() && self.context.has_role()
    }

    pub fn copied_script(&self) -> Option<&str> {
        self.copy.copied_id()
    }

    pub fn panels(&self) -> &PanelState {
        &self.panels
    }

    // ── Context ─────────────────────────────────────────────────────────────

    /// Applies a form edit and persists the context immediately.
    pub fn edit_context(&mut self, edit: impl FnOnce(&mut Context)) {
        edit(&mut self.context);
        self.store.write(&self.context);
    }

    // ── File selection ──────────────────────────────────────────────────────

    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), AppError> {
        self.apply(PhaseAction::SelectFile(file))?;
        Ok(())
    }

    /// Drag-and-drop. Unsupported files, and drops while an analysis is
    /// pending, are ignored. Returns whether the file was taken.
    pub fn drop_file(&mut self, name: &str, mime: Option<&str>, bytes: impl Into<Bytes>) -> bool {
        let Some(file) = SelectedFile::from_drop(name, mime, bytes) else {
            return false;
        };
        match self.apply(PhaseAction::SelectFile(file)) {
            Ok(changed) => changed,
            Err(e) => {
                debug!("drop ignored: {e}");
                false
            }
        }
    }

    // ── Submission ──────────────────────────────────────────────────────────

    /// Starts the analysis of the selected file.
    ///
    /// Validation happens before anything is sent: a file must be selected,
    /// the role must be filled in, and the file must be non-empty and within
    /// the upload limit. Returns the id of the new submission.
    pub fn analyze(&mut self) -> Result<Uuid, AppError> {
        if let Some(file) = self.phase.file().filter(|_| self.phase.can_submit()) {
            file.check_size(self.max_upload_bytes)?;
        }

        let submission_id = Uuid::new_v4();
        self.apply(PhaseAction::Submit {
            submission_id,
            has_role: self.context.has_role(),
        })?;

        // `apply` only moves to Submitting when a file is present.
        let file = self
            .phase
            .file()
            .cloned()
            .ok_or(ValidationError::NoFile)?;
        let context = self.context.clone();
        let service = Arc::clone(&self.service);
        let simulator = self.simulator;
        let tx = self.events_tx.clone();

        info!(%submission_id, file = %file.name, role = %context.role, "analysis submitted");

        self.submission.spawn(async move {
            let progress_tx = tx.clone();
            let outcome = settle_with_timeline(
                &simulator,
                async { service.analyze(&file, &context).await },
                |state| {
                    let _ = progress_tx.send(UiEvent::Progress {
                        submission_id,
                        state,
                    });
                },
            )
            .await;

            let _ = tx.send(UiEvent::Settled {
                submission_id,
                outcome: outcome.map(Box::new),
            });
        });

        Ok(submission_id)
    }

    // ── Events ──────────────────────────────────────────────────────────────

    /// Waits for the next background event.
    pub async fn next_event(&mut self) -> Option<UiEvent> {
        self.events_rx.recv().await
    }

    /// Applies a background event. Returns whether visible state changed.
    pub fn handle_event(&mut self, event: UiEvent) -> bool {
        let action = match event {
            UiEvent::Progress {
                submission_id,
                state,
            } => PhaseAction::Progress {
                submission_id,
                state,
            },
            UiEvent::Settled {
                submission_id,
                outcome,
            } => {
                self.submission.clear();
                match outcome {
                    Ok(result) => {
                        info!(%submission_id, score = result.scoring.overall_score, "analysis complete");
                        PhaseAction::Succeeded {
                            submission_id,
                            result,
                        }
                    }
                    Err(e) => {
                        warn!(%submission_id, "analysis failed: {e}");
                        PhaseAction::Failed {
                            submission_id,
                            message: e.banner_message(),
                        }
                    }
                }
            }
            UiEvent::CopyExpired { generation } => return self.copy.expire(generation),
        };

        // Event-driven transitions are never invalid, only stale.
        self.apply(action).unwrap_or(false)
    }

    /// Pumps events until the pending submission settles. Calls `on_progress`
    /// for every stage shown along the way.
    pub async fn wait_for_settlement<F: FnMut(&ProgressState)>(&mut self, mut on_progress: F) {
        while self.phase.is_submitting() {
            let Some(event) = self.next_event().await else {
                return;
            };
            if self.handle_event(event) {
                if let Some(progress) = self.phase.progress() {
                    on_progress(progress);
                }
            }
        }
    }

    // ── Error banner and reset ──────────────────────────────────────────────

    pub fn dismiss_error(&mut self) {
        let _ = self.apply(PhaseAction::DismissError);
    }

    /// "Analyze another": drops the file, the result and all transient UI
    /// state. The persisted context is kept.
    pub fn analyze_another(&mut self) -> Result<(), AppError> {
        self.apply(PhaseAction::Reset)?;
        self.copy.cancel();
        self.panels.collapse_all();
        Ok(())
    }

    // ── Ephemeral UI ────────────────────────────────────────────────────────

    /// Records that a negotiation script was copied and returns the text that
    /// belongs on the clipboard. The confirmation reverts on its own.
    pub fn copy_script(&mut self, point_id: &str) -> Option<String> {
        let script = self
            .phase
            .result()?
            .negotiation_points
            .iter()
            .find(|p| p.id == point_id)?
            .script
            .clone();
        self.copy
            .mark(point_id, self.copy_delay, self.events_tx.clone());
        Some(script)
    }

    /// Plain-text summary of the current result for the clipboard.
    pub fn copy_summary(&self) -> Option<String> {
        self.phase.result().map(clipboard_summary)
    }

    pub fn toggle_section(&mut self, section: &str) -> bool {
        self.panels.toggle_section(section)
    }

    pub fn toggle_negotiation_point(&mut self, id: &str) -> bool {
        self.panels.toggle_negotiation_point(id)
    }

    fn apply(&mut self, action: PhaseAction) -> Result<bool, ValidationError> {
        match self.phase.next(action)? {
            Some(next) => {
                debug!(from = self.phase.name(), to = next.name(), "phase transition");
                self.phase = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Drop for ReportController {
    fn drop(&mut self) {
        // Teardown: nothing may post into a discarded view.
        self.submission.cancel();
        self.copy.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::fixtures::sample_result;
    use crate::models::CompanyType;
    use crate::persistence::MemoryContextStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Instant;

    /// Fake service that answers after a fixed delay.
    struct FakeService {
        delay: Duration,
        fail_with: Option<String>,
        calls: AtomicUsize,
        completed: AtomicUsize,
    }

    impl FakeService {
        fn ok(delay_ms: u64) -> Arc<Self> {
            Arc::new(Self {
                delay: Duration::from_millis(delay_ms),
                fail_with: None,
                calls: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
            })
        }

        fn failing(delay_ms: u64, message: &str) -> Arc<Self> {
            Arc::new(Self {
                delay: Duration::from_millis(delay_ms),
                fail_with: Some(message.to_string()),
                calls: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl AnalysisService for FakeService {
        async fn analyze(
            &self,
            _file: &SelectedFile,
            _context: &Context,
        ) -> Result<AnalyzeResult, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(message) => Err(AppError::Server {
                    status: 500,
                    code: "INTERNAL_SERVER_ERROR".to_string(),
                    message: message.clone(),
                }),
                None => Ok(sample_result()),
            }
        }
    }

    fn pdf() -> SelectedFile {
        SelectedFile::new("offer.pdf", None, b"%PDF-1.4".to_vec()).unwrap()
    }

    fn controller(service: Arc<FakeService>) -> (ReportController, Arc<MemoryContextStore>) {
        let store = Arc::new(MemoryContextStore::new());
        let mut controller = ReportController::new(service, store.clone());
        controller.edit_context(|ctx| ctx.role = "Software Engineer".to_string());
        (controller, store)
    }

    #[tokio::test(start_paused = true)]
    async fn test_happy_path_waits_for_timeline() {
        let service = FakeService::ok(50);
        let (mut controller, _) = controller(service.clone());

        controller.select_file(pdf()).unwrap();
        assert!(controller.can_analyze());

        let start = Instant::now();
        controller.analyze().unwrap();
        assert!(controller.phase().is_submitting());
        assert!(!controller.can_analyze());

        let mut seen = Vec::new();
        controller
            .wait_for_settlement(|p| seen.push(p.progress))
            .await;

        assert_eq!(seen, vec![20, 40, 50, 70, 90, 100]);
        assert!(start.elapsed() >= Duration::from_millis(3000));
        assert!(controller.result().is_some());
        assert!(controller.progress().is_none());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_surfaces_message_immediately() {
        let (mut controller, _) = controller(FakeService::failing(200, "Parser crashed"));
        controller.select_file(pdf()).unwrap();
        let start = Instant::now();
        controller.analyze().unwrap();

        controller.wait_for_settlement(|_| {}).await;

        assert_eq!(controller.phase().error_message(), Some("Parser crashed"));
        assert!(controller.progress().is_none());
        assert!(start.elapsed() < Duration::from_millis(3000));

        // No retry: dismissing brings back the file, and a new submit is explicit.
        controller.dismiss_error();
        assert!(controller.can_analyze());
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_blocks_before_network() {
        let service = FakeService::ok(10);
        let store = Arc::new(MemoryContextStore::new());
        let mut controller = ReportController::new(service.clone(), store);

        let err = controller.analyze().unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::NoFile)));

        controller.select_file(pdf()).unwrap();
        let err = controller.analyze().unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::EmptyRole)));

        controller.edit_context(|ctx| ctx.role = "QA".to_string());
        let mut controller = controller.with_max_upload_bytes(4);
        let err = controller.analyze().unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::FileTooLarge { .. })
        ));

        tokio::task::yield_now().await;
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submission_refused_while_pending() {
        let service = FakeService::ok(10);
        let (mut controller, _) = controller(service.clone());
        controller.select_file(pdf()).unwrap();
        controller.analyze().unwrap();

        let err = controller.analyze().unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::SubmissionPending)
        ));
        assert!(!controller.drop_file("other.pdf", None, b"x".to_vec()));

        controller.wait_for_settlement(|_| {}).await;
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_rejects_unsupported_silently() {
        let (mut controller, _) = controller(FakeService::ok(10));
        assert!(!controller.drop_file("cat.png", Some("image/png"), b"x".to_vec()));
        assert_eq!(controller.phase(), &AnalysisPhase::NoFile);
        assert!(controller.drop_file("offer.docx", None, b"x".to_vec()));
        assert!(controller.phase().can_submit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_another_keeps_context() {
        let (mut controller, store) = controller(FakeService::ok(10));
        controller.edit_context(|ctx| ctx.company_type = CompanyType::Startup);
        controller.select_file(pdf()).unwrap();
        controller.analyze().unwrap();
        controller.wait_for_settlement(|_| {}).await;
        controller.toggle_section("breakdown");

        controller.analyze_another().unwrap();

        assert_eq!(controller.phase(), &AnalysisPhase::NoFile);
        assert!(controller.result().is_none());
        assert!(!controller.panels().is_section_expanded("breakdown"));
        assert_eq!(controller.context().role, "Software Engineer");
        assert_eq!(store.read(), *controller.context());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_indicator_reverts_and_restarts_per_click() {
        let (mut controller, _) = controller(FakeService::ok(10));
        controller.select_file(pdf()).unwrap();
        controller.analyze().unwrap();
        controller.wait_for_settlement(|_| {}).await;

        let script = controller.copy_script("np1").unwrap();
        assert_eq!(script, "I'd like to discuss the notice period.");
        assert_eq!(controller.copied_script(), Some("np1"));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        controller.copy_script("np2").unwrap();

        // The first click's timer would have fired here; the newer click stays.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        while let Ok(event) = controller.events_rx.try_recv() {
            controller.handle_event(event);
        }
        assert_eq!(controller.copied_script(), Some("np2"));

        let event = controller.next_event().await.unwrap();
        assert!(controller.handle_event(event));
        assert_eq!(controller.copied_script(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_unknown_point_is_noop() {
        let (mut controller, _) = controller(FakeService::ok(10));
        assert!(controller.copy_script("np1").is_none());
        assert!(controller.copied_script().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_context_edits_persist_every_change() {
        let (mut controller, store) = controller(FakeService::ok(10));
        controller.edit_context(|ctx| ctx.set_experience_years(12.0));
        assert_eq!(store.read().experience_level, 15);
        assert_eq!(store.read().role, "Software Engineer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_available_after_success() {
        let (mut controller, _) = controller(FakeService::ok(10));
        assert!(controller.report().is_none());
        controller.select_file(pdf()).unwrap();
        controller.analyze().unwrap();
        controller.wait_for_settlement(|_| {}).await;

        let report = controller.report().unwrap();
        assert_eq!(report.negotiation[0].id, "np1");
        assert!(controller.copy_summary().unwrap().contains("Red flags: 2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_mid_submission_cancels_request() {
        let service = FakeService::ok(1000);
        let (mut controller, _) = controller(service.clone());
        controller.select_file(pdf()).unwrap();
        controller.analyze().unwrap();

        // Let the request start, then tear the view down.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        drop(controller);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(service.completed.load(Ordering::SeqCst), 0);
        // Only the test's handle remains: the aborted task released its clone.
        assert_eq!(Arc::strong_count(&service), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_another_cancels_pending_copy_timer() {
        let (mut controller, _) = controller(FakeService::ok(10));
        controller.select_file(pdf()).unwrap();
        controller.analyze().unwrap();
        controller.wait_for_settlement(|_| {}).await;

        controller.copy_script("np1").unwrap();
        controller.analyze_another().unwrap();
        assert_eq!(controller.copied_script(), None);

        tokio::time::sleep(COPY_FEEDBACK_DELAY * 2).await;
        assert!(controller.events_rx.try_recv().is_err());
    }
}
