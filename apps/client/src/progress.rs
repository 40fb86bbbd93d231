//! Decorative progress timeline shown while the analysis request is in flight.
//!
//! # Timeline
//! Six fixed stages at 20, 40, 50, 70, 90 and 100 %, each held for 500 ms.
//! The stage copy is illustrative only and never reflects the real result.
//!
//! # Joining with the request
//! [`settle_with_timeline`] runs the timeline and the request side by side.
//! A successful result is released only after the last stage has been held;
//! an error is released immediately and the timeline is dropped mid-way.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

/// How long each stage stays on screen.
pub const STAGE_HOLD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    pub stage: &'static str,
    pub progress: u8, // 0 – 100
    pub message: &'static str,
}

pub const STAGES: [ProgressState; 6] = [
    ProgressState {
        stage: "upload",
        progress: 20,
        message: "Uploading contract...",
    },
    ProgressState {
        stage: "parse",
        progress: 40,
        message: "Parsing document structure...",
    },
    ProgressState {
        stage: "extract",
        progress: 50,
        message: "Extracting key terms... found salary ₹18,00,000",
    },
    ProgressState {
        stage: "benchmark",
        progress: 70,
        message: "Benchmarking against 42 similar contracts...",
    },
    ProgressState {
        stage: "score",
        progress: 90,
        message: "Calculating fairness score...",
    },
    ProgressState {
        stage: "complete",
        progress: 100,
        message: "Analysis complete!",
    },
];

#[derive(Debug, Clone, Copy)]
pub struct ProgressSimulator {
    stages: &'static [ProgressState],
    hold: Duration,
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self {
            stages: &STAGES,
            hold: STAGE_HOLD,
        }
    }
}

impl ProgressSimulator {
    /// Time from the first stage until the timeline settles.
    pub fn total_duration(&self) -> Duration {
        self.hold * self.stages.len() as u32
    }

    /// Emits every stage in order, holding each one before advancing.
    pub async fn run<F: FnMut(ProgressState)>(&self, mut on_stage: F) {
        for stage in self.stages {
            debug!(stage = stage.stage, progress = stage.progress, "progress stage");
            on_stage(*stage);
            tokio::time::sleep(self.hold).await;
        }
    }
}

/// Joins the request with the decorative timeline.
///
/// - Request succeeds: wait for the rest of the timeline, then return the value.
/// - Request fails: return the error at once, abandoning the timeline.
/// - Timeline finishes first: wait for the request.
pub async fn settle_with_timeline<T, E, R, F>(
    simulator: &ProgressSimulator,
    request: R,
    on_stage: F,
) -> Result<T, E>
where
    R: Future<Output = Result<T, E>>,
    F: FnMut(ProgressState),
{
    let timeline = simulator.run(on_stage);
    tokio::pin!(timeline);
    tokio::pin!(request);

    tokio::select! {
        outcome = &mut request => match outcome {
            Ok(value) => {
                timeline.await;
                Ok(value)
            }
            Err(e) => Err(e),
        },
        () = &mut timeline => request.await,
    }
}
