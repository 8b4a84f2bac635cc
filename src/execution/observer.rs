use std::time::Duration;

use super::report::Section;

/// Execution events emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionEvent {
    RunStarted { rows: usize, parallel: bool },
    SectionFinished { section: Section, elapsed: Duration },
    RunFinished { elapsed: Duration },
}

/// Observer hook for execution events.
///
/// `SectionFinished` may arrive from worker threads, in any order.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// Logs execution events through `tracing` under the `bikeshare::stats` target.
#[derive(Debug, Default)]
pub struct TracingExecutionObserver;

impl ExecutionObserver for TracingExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunStarted { rows, parallel } => {
                tracing::debug!(target: "bikeshare::stats", rows, parallel, "computing statistics");
            }
            ExecutionEvent::SectionFinished { section, elapsed } => {
                tracing::debug!(target: "bikeshare::stats", %section, ?elapsed, "section finished");
            }
            ExecutionEvent::RunFinished { elapsed } => {
                tracing::info!(target: "bikeshare::stats", ?elapsed, "statistics ready");
            }
        }
    }
}
