use crate::{
    Item, ItemCategory, ItemKind, PlacementError, ResultGrid, TargetGrid,
    engine::{
        instance::Budgets,
        propagation::{self, Ray},
        registry::{ItemId, ItemRegistry},
    },
};

/// One puzzle in progress: the immutable target grid, the derived result
/// grid, the placed items and the mirror/obstacle budgets.
///
/// The playfield is owned exclusively by the evaluation driver for the
/// duration of one run. Every successful [`try_place`] or [`try_remove`]
/// ends with a full light recompute, so by the time either returns the
/// result grid and every lantern's validity flag reflect the new registry
/// state. There is no partial or deferred state to observe.
///
/// [`try_place`]: Playfield::try_place
/// [`try_remove`]: Playfield::try_remove
#[derive(Debug, Clone)]
pub struct Playfield {
    target: TargetGrid,
    result: ResultGrid,
    registry: ItemRegistry,
    budgets: Budgets,
    rays: Vec<Ray>,
}

impl Playfield {
    #[must_use]
    pub fn new(target: TargetGrid, budgets: Budgets) -> Self {
        let result = ResultGrid::new(target.height(), target.width());
        let mut this = Self {
            target,
            result,
            registry: ItemRegistry::new(),
            budgets,
            rays: Vec::new(),
        };
        this.recompute();
        this
    }

    #[must_use]
    pub fn target(&self) -> &TargetGrid {
        &self.target
    }

    #[must_use]
    pub fn result(&self) -> &ResultGrid {
        &self.result
    }

    #[must_use]
    pub fn budgets(&self) -> Budgets {
        self.budgets
    }

    /// Placed items in placement order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.registry.iter()
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn item_count(&self, category: ItemCategory) -> usize {
        self.registry.category_count(category)
    }

    /// Lanterns struck by a beam during the last recompute.
    pub fn invalid_lanterns(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.registry
            .iter()
            .filter(|(_, item)| matches!(item.kind, ItemKind::Lantern(_)) && !item.valid)
    }

    /// The ray segments expanded by the last recompute, in expansion order.
    #[must_use]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Validates and applies one placement.
    ///
    /// Checks run in a fixed order: bounds, target-cell emptiness, result
    /// occupancy, then the mirror/obstacle budget by recounting the live
    /// registry. On success the glyph lands in the result grid, the item
    /// joins the registry (lanterns start valid) and light is recomputed.
    pub fn try_place(&mut self, row: i32, col: i32, kind: ItemKind) -> Result<ItemId, PlacementError> {
        let (row, col) = self.check_bounds(row, col)?;
        if !self.target.get(row, col).is_empty() {
            return Err(PlacementError::NotEmptyTarget { row, col });
        }
        if !self.result.get(row, col).is_empty() {
            return Err(PlacementError::CellOccupied { row, col });
        }
        match kind.category() {
            ItemCategory::Lantern => {}
            ItemCategory::Mirror => self.check_budget(ItemCategory::Mirror, self.budgets.max_mirrors)?,
            ItemCategory::Obstacle => {
                self.check_budget(ItemCategory::Obstacle, self.budgets.max_obstacles)?;
            }
        }

        let id = self.registry.insert(Item::new(row, col, kind));
        self.recompute();
        Ok(id)
    }

    /// Like [`Self::try_place`], decoding the wire glyph first. Bounds are
    /// still checked before the glyph so a coordinate error wins over an
    /// unknown type.
    pub fn try_place_glyph(
        &mut self,
        row: i32,
        col: i32,
        glyph: char,
    ) -> Result<ItemId, PlacementError> {
        self.check_bounds(row, col)?;
        let kind = ItemKind::from_glyph(glyph).map_err(PlacementError::UnknownKind)?;
        self.try_place(row, col, kind)
    }

    /// Removes the item at the given cell and recomputes.
    pub fn try_remove(&mut self, row: i32, col: i32) -> Result<ItemKind, PlacementError> {
        let (row, col) = self.check_bounds(row, col)?;
        let Some(item) = self.registry.remove_at(row, col) else {
            return Err(PlacementError::NoItemAtCell { row, col });
        };
        self.recompute();
        Ok(item.kind)
    }

    /// Rebuilds the result grid and lantern validity from the registry.
    ///
    /// Runs automatically after every mutation; calling it again without a
    /// change is a no-op by contract.
    pub fn recompute(&mut self) {
        propagation::recompute(
            &self.target,
            &mut self.result,
            &mut self.registry,
            &mut self.rays,
        );
    }

    #[expect(clippy::cast_sign_loss)]
    fn check_bounds(&self, row: i32, col: i32) -> Result<(usize, usize), PlacementError> {
        if !self.target.contains(row, col) {
            return Err(PlacementError::OutOfBounds {
                row,
                col,
                height: self.target.height(),
                width: self.target.width(),
            });
        }
        Ok((row as usize, col as usize))
    }

    fn check_budget(&self, category: ItemCategory, limit: usize) -> Result<(), PlacementError> {
        if self.registry.category_count(category) >= limit {
            return Err(PlacementError::BudgetExceeded { category, limit });
        }
        Ok(())
    }
}
