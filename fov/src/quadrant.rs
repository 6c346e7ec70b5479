/// One of the four cardinal quarter-planes the field of view is split into.
///
/// Scanning happens in quadrant-local coordinates where `depth` grows away
/// from the origin and `col` runs across the scan row.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::North,
        Quadrant::East,
        Quadrant::South,
        Quadrant::West,
    ];

    /// Map quadrant-local coordinates to an offset from the origin.
    pub fn transform(self, depth: i32, col: i32) -> [i32; 2] {
        match self {
            Quadrant::North => [col, -depth],
            Quadrant::South => [col, depth],
            Quadrant::East => [depth, col],
            Quadrant::West => [-depth, col],
        }
    }
}

/// Exact rational slope, `num / den` with `den > 0`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    pub const fn new(num: i32, den: i32) -> Self {
        debug_assert!(den > 0);
        Slope { num, den }
    }

    /// Slope of the edge of a cell that faces the start of the row.
    pub fn cell_edge(depth: i32, col: i32) -> Self {
        Slope::new(2 * col - 1, 2 * depth)
    }
}

/// A single row of cells at constant depth, bounded by two slopes.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Row {
    pub depth: i32,
    pub start: Slope,
    pub end: Slope,
}

impl Row {
    pub fn first() -> Self {
        Row {
            depth: 1,
            start: Slope::new(-1, 1),
            end: Slope::new(1, 1),
        }
    }

    pub fn next(&self) -> Self {
        Row {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// First column of the row, `depth * start` rounded with ties going up.
    pub fn min_col(&self) -> i32 {
        let Slope { num, den } = self.start;
        (2 * self.depth * num + den).div_euclid(2 * den)
    }

    /// Last column of the row, `depth * end` rounded with ties going down.
    pub fn max_col(&self) -> i32 {
        let Slope { num, den } = self.end;
        -(-(2 * self.depth * num - den)).div_euclid(2 * den)
    }

    /// Whether the center of the cell at `col` lies inside the row's slopes.
    ///
    /// Floor cells are only seen when this holds, which is what makes the
    /// visibility relation symmetric.
    pub fn is_symmetric(&self, col: i32) -> bool {
        col * self.start.den >= self.depth * self.start.num
            && col * self.end.den <= self.depth * self.end.num
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_row_spans_diagonals() {
        let row = Row::first();
        assert_eq!(row.min_col(), -1);
        assert_eq!(row.max_col(), 1);
        assert!(row.is_symmetric(-1));
        assert!(row.is_symmetric(1));

        let row = row.next().next();
        assert_eq!(row.min_col(), -3);
        assert_eq!(row.max_col(), 3);
    }

    #[test]
    fn rounding_ties() {
        // depth 2 * slope 1/4 = 0.5, rounds up to 1 at the start and down to
        // 0 at the end.
        let row = Row {
            depth: 2,
            start: Slope::new(1, 4),
            end: Slope::new(1, 4),
        };
        assert_eq!(row.min_col(), 1);
        assert_eq!(row.max_col(), 0);

        let row = Row {
            depth: 2,
            start: Slope::new(-1, 4),
            end: Slope::new(-1, 4),
        };
        assert_eq!(row.min_col(), 0);
        assert_eq!(row.max_col(), -1);
    }

    #[test]
    fn quadrant_transforms() {
        assert_eq!(Quadrant::North.transform(2, 1), [1, -2]);
        assert_eq!(Quadrant::South.transform(2, 1), [1, 2]);
        assert_eq!(Quadrant::East.transform(2, 1), [2, 1]);
        assert_eq!(Quadrant::West.transform(2, 1), [-2, 1]);
    }
}
