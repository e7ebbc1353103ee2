//! Per-phase progress bookkeeping.

use fictures_core::{Phase, PhaseOutput, ProgressEvent};
use fictures_interface::{ProgressReporter, SubProgress};
use std::sync::Mutex;

/// Emits the start, progress and completion events of one phase.
///
/// Progress counters run `1..=total` with no gaps or repeats; reports past
/// `total` are dropped.
pub struct PhaseProgress<'a> {
    reporter: &'a dyn ProgressReporter,
    phase: Phase,
    total: usize,
    current: usize,
}

impl<'a> PhaseProgress<'a> {
    /// Report `{phase}_start` and begin counting towards `total`.
    pub fn start(reporter: &'a dyn ProgressReporter, phase: Phase, total: usize) -> Self {
        tracing::info!(phase = %phase, total, "Phase started");
        reporter.report(ProgressEvent::PhaseStarted {
            phase,
            message: format!("Generating {}...", phase.label()),
        });
        Self {
            reporter,
            phase,
            total,
            current: 0,
        }
    }

    /// Items reported so far.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Items expected in the phase.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Report the next item as finished.
    pub fn item(&mut self, description: impl std::fmt::Display) {
        if self.current >= self.total {
            tracing::debug!(phase = %self.phase, "Ignoring progress beyond phase total");
            return;
        }
        self.current += 1;
        self.reporter.report(ProgressEvent::ItemProgress {
            phase: self.phase,
            message: format!("{} ({}/{})", description, self.current, self.total),
            current_item: self.current,
            total_items: self.total,
        });
    }

    /// Report every item up to and including `current`.
    pub fn advance_to(&mut self, current: usize, noun: &str) {
        while self.current < current.min(self.total) {
            self.item(format!("Generated {} {}", noun, self.current + 1));
        }
    }

    /// Report `{phase}_complete` with the phase's output.
    pub fn complete(self, output: PhaseOutput) {
        tracing::info!(phase = %self.phase, items = output.len(), "Phase complete");
        self.reporter.report(ProgressEvent::PhaseCompleted {
            phase: self.phase,
            message: format!("Generated {} {}", output.len(), self.phase.label()),
            output,
        });
    }
}

/// Relays a batch collaborator's `(current, total)` callbacks as phase
/// progress events.
///
/// Non-increasing reports are ignored and skipped counters are filled in,
/// so the outward sequence stays `1..=total` whatever the collaborator does.
pub struct SubProgressRelay<'a> {
    progress: Mutex<PhaseProgress<'a>>,
    noun: &'static str,
}

impl<'a> SubProgressRelay<'a> {
    /// Wrap a started phase.
    pub fn new(progress: PhaseProgress<'a>, noun: &'static str) -> Self {
        Self {
            progress: Mutex::new(progress),
            noun,
        }
    }

    /// Report any items the collaborator left out and hand the phase back.
    pub fn finish(self) -> PhaseProgress<'a> {
        let mut progress = self
            .progress
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let total = progress.total();
        progress.advance_to(total, self.noun);
        progress
    }
}

impl SubProgress for SubProgressRelay<'_> {
    fn report(&self, current: usize, total: usize) {
        let mut progress = self
            .progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if total != progress.total() {
            tracing::debug!(
                reported = total,
                expected = progress.total(),
                "Collaborator reported a different batch size"
            );
        }
        if current <= progress.current() {
            return;
        }
        progress.advance_to(current, self.noun);
    }
}
