use std::fmt;

use super::Stage;

/// The outcome of evaluating a [`Stage`] once.
pub enum NextStep<C, T> {
    /// Not enough bytes are buffered; retry after more arrive.
    Incomplete,
    /// A fully decoded value.
    Emit(T),
    /// Proceed immediately with another stage, against the same buffer.
    Continue(Stage<C, T>),
}

impl<C, T> NextStep<C, T> {
    /// Returns true if more bytes are required
    #[inline]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, NextStep::Incomplete)
    }

    /// Returns true if this step carries a decoded value
    #[inline]
    pub fn is_emit(&self) -> bool {
        matches!(self, NextStep::Emit(_))
    }

    /// Returns true if decoding proceeds with another stage
    #[inline]
    pub fn is_continue(&self) -> bool {
        matches!(self, NextStep::Continue(_))
    }

    /// Consumes the step and returns the decoded value, if any
    pub fn into_emitted(self) -> Option<T> {
        match self {
            NextStep::Emit(value) => Some(value),
            NextStep::Incomplete | NextStep::Continue(_) => None,
        }
    }

    /// Consumes the step and returns the stage to continue with, if any
    pub fn into_stage(self) -> Option<Stage<C, T>> {
        match self {
            NextStep::Continue(stage) => Some(stage),
            NextStep::Incomplete | NextStep::Emit(_) => None,
        }
    }
}

/// A stage can be returned wherever a step is expected, meaning
/// "continue with this stage".
impl<C, T> From<Stage<C, T>> for NextStep<C, T> {
    fn from(stage: Stage<C, T>) -> Self {
        NextStep::Continue(stage)
    }
}

impl<C, T: fmt::Debug> fmt::Debug for NextStep<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextStep::Incomplete => f.write_str("Incomplete"),
            NextStep::Emit(value) => f.debug_tuple("Emit").field(value).finish(),
            NextStep::Continue(stage) => f.debug_tuple("Continue").field(stage).finish(),
        }
    }
}
