use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::cell::TargetCell;

/// The immutable target grid: what the puzzle wants lit, and where the
/// baseline obstacles are.
///
/// Created once per instance (parsed or generated) and never mutated
/// afterwards. Serialized as the list of row strings used on the wire, so a
/// JSON instance file reads the same way as the protocol request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetGrid {
    height: usize,
    width: usize,
    cells: Vec<TargetCell>,
}

/// Rejected target grid text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseTargetGridError {
    #[display("the target board must have at least one non-empty row")]
    Empty,
    #[display("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("the board is {height}x{width}, larger than the {max}x{max} maximum")]
    TooLarge {
        height: usize,
        width: usize,
        max: usize,
    },
    #[display("row {row}, column {col}: {glyph:?} is not '.', 'X' or a crystal color 1..6")]
    UnknownGlyph { row: usize, col: usize, glyph: char },
}

impl TargetGrid {
    /// Largest board side the grader accepts.
    pub const MAX_SIZE: usize = 100;

    /// Parses row strings over the alphabet `'.'`, `'X'`, `'1'..='6'`.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, ParseTargetGridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if height == 0 || width == 0 {
            return Err(ParseTargetGridError::Empty);
        }
        if height > Self::MAX_SIZE || width > Self::MAX_SIZE {
            return Err(ParseTargetGridError::TooLarge {
                height,
                width,
                max: Self::MAX_SIZE,
            });
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row, text) in rows.iter().enumerate() {
            let mut actual = 0;
            for (col, glyph) in text.as_ref().chars().enumerate() {
                let cell = TargetCell::from_glyph(glyph)
                    .ok_or(ParseTargetGridError::UnknownGlyph { row, col, glyph })?;
                cells.push(cell);
                actual += 1;
            }
            if actual != width {
                return Err(ParseTargetGridError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    pub(crate) fn from_cells(height: usize, width: usize, cells: Vec<TargetCell>) -> Self {
        debug_assert_eq!(cells.len(), height * width);
        Self {
            height,
            width,
            cells,
        }
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> TargetCell {
        self.cells[row * self.width + col]
    }

    /// Signed bounds query; rays walk off the board and index with `i32`.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        (0..self.height as i32).contains(&row) && (0..self.width as i32).contains(&col)
    }

    #[must_use]
    pub fn num_crystals(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.crystal_color().is_some())
            .count()
    }

    /// Renders the grid back into wire-format row strings.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
    }
}

impl Serialize for TargetGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows())
    }
}

impl<'de> Deserialize<'de> for TargetGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Self::parse(&rows).map_err(de::Error::custom)
    }
}
