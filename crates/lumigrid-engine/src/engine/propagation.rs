use std::collections::VecDeque;

use crate::{
    Direction, ItemKind, ResultCell, ResultGrid, TargetGrid,
    engine::registry::{ItemId, ItemRegistry},
};

/// One directional light segment under expansion.
///
/// `source` points back at the lantern that originated the beam; it supplies
/// the color merged into crystals and is the lantern that gets invalidated
/// when the beam reaches any lantern cell (its own included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ray {
    pub from_row: i32,
    pub from_col: i32,
    pub row: i32,
    pub col: i32,
    pub dir: Direction,
    pub source: ItemId,
}

impl Ray {
    fn step(self, dir: Direction) -> Self {
        Self {
            from_row: self.row,
            from_col: self.col,
            row: self.row + dir.drow,
            col: self.col + dir.dcol,
            dir,
            source: self.source,
        }
    }
}

/// Full recomputation of the result grid from the target grid and the
/// registry.
///
/// Resets the grid to its baseline, overlays every item's glyph, then
/// expands light from every lantern until the ray queue is exhausted. The
/// queue is FIFO, so traversal is breadth-first across bounces; since color
/// merging is a commutative OR and validity only ever goes from true to
/// false, the traversal order cannot affect the outcome, and running this
/// twice on an unchanged registry yields identical grids.
///
/// Incremental updates are deliberately not supported: the cost is bounded
/// by board area, and recomputing from scratch keeps the derived state
/// trivially consistent with the registry.
pub(crate) fn recompute(
    target: &TargetGrid,
    result: &mut ResultGrid,
    registry: &mut ItemRegistry,
    rays: &mut Vec<Ray>,
) {
    result.reset_to_baseline(target);
    for (_, item) in registry.iter() {
        result.set(item.row, item.col, ResultCell::Item(item.kind));
    }

    rays.clear();
    let mut queue = VecDeque::new();
    for (id, item) in registry.iter_mut() {
        if !matches!(item.kind, ItemKind::Lantern(_)) {
            continue;
        }
        item.valid = true;
        #[expect(clippy::cast_possible_wrap)]
        let (row, col) = (item.row as i32, item.col as i32);
        for dir in Direction::ALL {
            queue.push_back(Ray {
                from_row: row,
                from_col: col,
                row: row + dir.drow,
                col: col + dir.dcol,
                dir,
                source: id,
            });
        }
    }

    while let Some(ray) = queue.pop_front() {
        rays.push(ray);
        if !target.contains(ray.row, ray.col) {
            continue;
        }
        #[expect(clippy::cast_sign_loss)]
        let (row, col) = (ray.row as usize, ray.col as usize);
        match result.get(row, col) {
            // Obstacles absorb the beam, baseline and placed alike.
            ResultCell::Obstacle | ResultCell::Item(ItemKind::Obstacle) => {}
            ResultCell::Item(ItemKind::MirrorForward) => {
                queue.push_back(ray.step(ray.dir.reflect_forward()));
            }
            ResultCell::Item(ItemKind::MirrorBackward) => {
                queue.push_back(ray.step(ray.dir.reflect_backward()));
            }
            // Crystals absorb and accumulate; they do not retransmit.
            ResultCell::Crystal(lit) => {
                let color = registry
                    .get(ray.source)
                    .and_then(|item| item.kind.lantern_color());
                if let Some(color) = color {
                    result.set(row, col, ResultCell::Crystal(lit.union(color.mask())));
                }
            }
            // Any lantern cell, including the source's own after a mirror
            // loop: the originating lantern is now illuminated.
            ResultCell::Item(ItemKind::Lantern(_)) => {
                if let Some(source) = registry.get_mut(ray.source) {
                    source.valid = false;
                }
            }
            ResultCell::Empty => queue.push_back(ray.step(ray.dir)),
        }
    }
}
