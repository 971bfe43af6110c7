//! Benchmark parameter types.

use std::fmt;

/// Shape of a generated deadline sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeadlineShape {
    /// Deadlines drawn uniformly from `[0, n)`.
    Uniform,
    /// Every task due in the first slot, so all but one wrap around.
    FrontLoaded,
    /// Every task due in the last slot, giving one long merge chain.
    BackLoaded,
}

impl DeadlineShape {
    /// All shapes, in benchmark order.
    pub const ALL: [Self; 3] = [Self::Uniform, Self::FrontLoaded, Self::BackLoaded];

    /// Short label used in benchmark ids.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::FrontLoaded => "front",
            Self::BackLoaded => "back",
        }
    }
}

/// Parameters for one scheduling benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleBenchParams {
    /// Number of tasks, which is also the number of slots.
    pub tasks: usize,
    /// Shape of the deadline sequence.
    pub shape: DeadlineShape,
}

impl fmt::Display for ScheduleBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},shape={}", self.tasks, self.shape.label())
    }
}
