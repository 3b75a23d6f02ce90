pub use self::{cell::*, color::*, direction::*, item::*, result_grid::*, target_grid::*};

pub(crate) mod cell;
pub(crate) mod color;
pub(crate) mod direction;
pub(crate) mod item;
pub(crate) mod result_grid;
pub(crate) mod target_grid;
