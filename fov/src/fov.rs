use std::marker::PhantomData;

use crate::quadrant::{Quadrant, Row, Slope};

/// Sight-blocking query for cells given as offsets from the origin.
pub trait Opacity {
    /// Return whether the cell at `offset` from the origin blocks sight.
    fn blocks_sight(&self, offset: [i32; 2]) -> bool;
}

impl<F: Fn([i32; 2]) -> bool> Opacity for F {
    fn blocks_sight(&self, offset: [i32; 2]) -> bool {
        self(offset)
    }
}

/// Symmetric recursive shadowcasting field of view.
///
/// Iterates the offsets from the origin of all cells that are visible within
/// `radius`. A floor cell is visible iff the origin would also be visible
/// from it. A sight-blocking cell is included when it is the first
/// obstruction along a line of sight if `light_walls` is set, and is never
/// included otherwise.
///
/// Radius is Euclidean, a cell at offset `(x, y)` is in range iff `x² + y² <=
/// radius²`. The origin is always visible and is yielded first. Cells on the
/// diagonals between quadrants may be yielded more than once, collect the
/// output into a set if you need unique cells.
pub struct Fov<T, V> {
    opacity: T,
    radius: i32,
    light_walls: bool,
    /// Rows left to scan.
    stack: Vec<(Quadrant, Row)>,
    /// Cells found in the last scanned row that haven't been yielded yet.
    pending: Vec<[i32; 2]>,
    phantom: PhantomData<V>,
}

impl<T: Opacity, V: From<[i32; 2]>> Fov<T, V> {
    pub fn new(opacity: T, radius: i32, light_walls: bool) -> Self {
        let stack = if radius > 0 {
            Quadrant::ALL.iter().rev().map(|&q| (q, Row::first())).collect()
        } else {
            Vec::new()
        };

        Fov {
            opacity,
            radius,
            light_walls,
            stack,
            pending: vec![[0, 0]],
            phantom: PhantomData,
        }
    }

    fn in_range(&self, [x, y]: [i32; 2]) -> bool {
        x * x + y * y <= self.radius * self.radius
    }

    fn reveal(&mut self, offset: [i32; 2]) {
        if self.in_range(offset) {
            self.pending.push(offset);
        }
    }

    fn push_row(&mut self, quadrant: Quadrant, row: Row) {
        if row.depth <= self.radius {
            self.stack.push((quadrant, row));
        }
    }

    /// Walk one row, revealing cells and queueing the rows behind it.
    fn scan(&mut self, quadrant: Quadrant, mut row: Row) {
        // Whether the previous cell on this row was a wall, `None` before the
        // first cell.
        let mut prev_wall: Option<bool> = None;

        for col in row.min_col()..=row.max_col() {
            let offset = quadrant.transform(row.depth, col);
            let is_wall = self.opacity.blocks_sight(offset);

            if is_wall {
                if self.light_walls {
                    self.reveal(offset);
                }
            } else if row.is_symmetric(col) {
                self.reveal(offset);
            }

            match (prev_wall, is_wall) {
                // Coming out of a shadow, the visible span starts here.
                (Some(true), false) => {
                    row.start = Slope::cell_edge(row.depth, col);
                }
                // Went into a shadow, the span so far continues behind.
                (Some(false), true) => {
                    let mut next = row.next();
                    next.end = Slope::cell_edge(row.depth, col);
                    self.push_row(quadrant, next);
                }
                _ => {}
            }

            prev_wall = Some(is_wall);
        }

        if prev_wall == Some(false) {
            self.push_row(quadrant, row.next());
        }
    }
}

impl<T: Opacity, V: From<[i32; 2]>> Iterator for Fov<T, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(offset) = self.pending.pop() {
                return Some(V::from(offset));
            }

            let (quadrant, row) = self.stack.pop()?;
            self.scan(quadrant, row);
        }
    }
}
