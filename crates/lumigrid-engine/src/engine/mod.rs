//! Placement and simulation logic on top of the core data model.
//!
//! - [`Playfield`] - one puzzle in progress: target grid, derived result
//!   grid, placed items and budget enforcement
//! - [`ItemRegistry`] - arena of placed items with stable ids
//! - [`Instance`] - a generated or loaded puzzle (target, costs, budgets)
//!
//! The playfield is the single mutable simulation resource: every accepted
//! placement or removal triggers a full light recompute, so the result grid
//! and the lantern validity flags are always consistent with the registry
//! when control returns to the caller.

pub use self::{instance::*, playfield::*, propagation::Ray, registry::*};

mod instance;
mod playfield;
mod propagation;
mod registry;
