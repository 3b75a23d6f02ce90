pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Which budget pool an item counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ItemCategory {
    #[display("lantern")]
    Lantern,
    #[display("mirror")]
    Mirror,
    #[display("obstacle")]
    Obstacle,
}

/// Rejection reasons produced by the placement validator.
///
/// During automated replay the first of these aborts the whole evaluation;
/// during interactive editing it just leaves the board unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("({row}, {col}) is outside the {height}x{width} board")]
    OutOfBounds {
        row: i32,
        col: i32,
        height: usize,
        width: usize,
    },
    #[display("{_0}")]
    UnknownKind(UnknownGlyphError),
    #[display("({row}, {col}) is not an empty cell of the target board")]
    NotEmptyTarget { row: usize, col: usize },
    #[display("({row}, {col}) already holds an item")]
    CellOccupied { row: usize, col: usize },
    #[display("at most {limit} {category}s can be placed")]
    BudgetExceeded {
        category: ItemCategory,
        limit: usize,
    },
    #[display("({row}, {col}) holds no placed item")]
    NoItemAtCell { row: usize, col: usize },
}
