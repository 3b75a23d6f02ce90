//! Scoring for crystal-lighting puzzles.
//!
//! Two layers:
//!
//! 1. **Score computation** ([`score`]) - folds a finished playfield into a
//!    single number plus the per-category breakdown, with the invalid-lantern
//!    sentinel dominating everything else.
//! 2. **Evaluation driver** ([`evaluation`]) - owns one playfield for the
//!    duration of a run, routes placements through the validator (recompute
//!    after every change) and replays candidate item lists with fatal-error
//!    semantics.
//!
//! The driver's contract is the same for automated and interactive use: it
//! only ever sees a sequence of place/remove calls followed by a final
//! [`Evaluation::finish`]. What differs is error handling - during replay
//! the first placement failure is fatal, while an interactive caller just
//! reports the rejection and carries on.

pub use self::{evaluation::*, score::*};

pub mod evaluation;
pub mod score;
