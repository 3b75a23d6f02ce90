use super::{cell::ResultCell, target_grid::TargetGrid};

/// The mutable derived grid: baseline cells plus item glyphs plus
/// accumulated light.
///
/// This grid is owned by the playfield and rebuilt from scratch by every
/// propagation pass; nothing outside the engine writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultGrid {
    height: usize,
    width: usize,
    cells: Vec<ResultCell>,
}

impl ResultGrid {
    #[must_use]
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![ResultCell::Empty; height * width],
        }
    }

    /// Resets every cell to the target's baseline: obstacles and empty cells
    /// copy through, crystals become unlit.
    pub fn reset_to_baseline(&mut self, target: &TargetGrid) {
        debug_assert_eq!((self.height, self.width), (target.height(), target.width()));
        for row in 0..self.height {
            for col in 0..self.width {
                self.cells[row * self.width + col] = ResultCell::baseline(target.get(row, col));
            }
        }
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> ResultCell {
        self.cells[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: ResultCell) {
        self.cells[row * self.width + col] = cell;
    }

    /// Renders the grid as row strings (lit crystals show their accumulated
    /// color digit, `'0'` when never reached).
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_to_baseline() {
        let target = TargetGrid::parse(&[".X3"]).unwrap();
        let mut result = ResultGrid::new(1, 3);
        result.reset_to_baseline(&target);
        assert_eq!(result.rows().collect::<Vec<_>>(), [".X0"]);
    }
}
