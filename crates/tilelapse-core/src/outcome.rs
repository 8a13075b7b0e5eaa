use std::fmt;

/// Result of processing one unit of a batch (a tile or a frame).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnitOutcome {
    Success,
    /// The unit never produced input (e.g. a tile that exhausted its retries).
    Absent,
    /// The unit had input but processing it failed.
    Failed(String),
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Per-outcome counts for a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub absent: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &UnitOutcome) {
        match outcome {
            UnitOutcome::Success => self.succeeded += 1,
            UnitOutcome::Absent => self.absent += 1,
            UnitOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a UnitOutcome>) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.absent + self.failed
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ok, {} absent, {} failed",
            self.succeeded,
            self.total(),
            self.absent,
            self.failed
        )
    }
}
