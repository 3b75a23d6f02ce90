/// An axis-aligned unit step for ray expansion.
///
/// Light never travels diagonally; mirrors swap a beam between the row and
/// column axes instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub drow: i32,
    pub dcol: i32,
}

impl Direction {
    pub const UP: Self = Self { drow: -1, dcol: 0 };
    pub const DOWN: Self = Self { drow: 1, dcol: 0 };
    pub const LEFT: Self = Self { drow: 0, dcol: -1 };
    pub const RIGHT: Self = Self { drow: 0, dcol: 1 };

    pub const ALL: [Self; 4] = [Self::UP, Self::DOWN, Self::LEFT, Self::RIGHT];

    /// Reflection off the `/` mirror: `(dr, dc)` becomes `(-dc, -dr)`.
    #[must_use]
    pub const fn reflect_forward(self) -> Self {
        Self {
            drow: -self.dcol,
            dcol: -self.drow,
        }
    }

    /// Reflection off the `\` mirror: `(dr, dc)` becomes `(dc, dr)`.
    #[must_use]
    pub const fn reflect_backward(self) -> Self {
        Self {
            drow: self.dcol,
            dcol: self.drow,
        }
    }
}
