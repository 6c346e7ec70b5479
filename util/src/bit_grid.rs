use glam::{ivec2, IVec2};

/// Dense rectangular grid of boolean cells starting from the origin.
///
/// Reads outside the grid are `false` and writes outside the grid are
/// ignored.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct BitGrid {
    size: IVec2,
    bits: Vec<u64>,
}

impl BitGrid {
    pub fn new(size: IVec2) -> Self {
        let size = size.max(IVec2::ZERO);
        let n = (size.x * size.y) as usize;
        BitGrid {
            size,
            bits: vec![0; n.div_ceil(64)],
        }
    }

    /// Build a grid from a cell predicate.
    pub fn from_fn(size: IVec2, f: impl Fn(IVec2) -> bool) -> Self {
        let mut ret = BitGrid::new(size);
        for p in ret.points().collect::<Vec<_>>() {
            if f(p) {
                ret.insert(p);
            }
        }
        ret
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.cmpge(IVec2::ZERO).all() && p.cmplt(self.size).all()
    }

    fn index(&self, p: IVec2) -> Option<(usize, u64)> {
        if !self.contains(p) {
            return None;
        }
        let i = (p.y * self.size.x + p.x) as usize;
        Some((i / 64, 1 << (i % 64)))
    }

    pub fn get(&self, p: IVec2) -> bool {
        self.index(p)
            .map_or(false, |(word, mask)| self.bits[word] & mask != 0)
    }

    /// Set a cell, return whether it was previously unset.
    pub fn insert(&mut self, p: IVec2) -> bool {
        let Some((word, mask)) = self.index(p) else {
            return false;
        };
        let was_unset = self.bits[word] & mask == 0;
        self.bits[word] |= mask;
        was_unset
    }

    /// Set every cell that is set in `other`.
    ///
    /// Grids of different sizes are combined cell by cell over the overlap.
    pub fn union_with(&mut self, other: &BitGrid) {
        if self.size == other.size {
            for (a, b) in self.bits.iter_mut().zip(&other.bits) {
                *a |= *b;
            }
        } else {
            for p in other.iter() {
                self.insert(p);
            }
        }
    }

    /// Iterate all cell positions of the grid in row-major order.
    pub fn points(&self) -> impl Iterator<Item = IVec2> {
        let IVec2 { x: w, y: h } = self.size;
        (0..h).flat_map(move |y| (0..w).map(move |x| ivec2(x, y)))
    }

    /// Iterate the positions of set cells.
    pub fn iter(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.points().filter(|&p| self.get(p))
    }

    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }
}

impl Extend<IVec2> for BitGrid {
    fn extend<T: IntoIterator<Item = IVec2>>(&mut self, iter: T) {
        for p in iter {
            self.insert(p);
        }
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn bounds() {
        let mut grid = BitGrid::new(ivec2(10, 3));
        assert!(!grid.get(ivec2(-1, 0)));
        assert!(!grid.insert(ivec2(10, 0)));
        assert!(!grid.insert(ivec2(0, 3)));
        assert!(grid.is_empty());

        assert!(grid.insert(ivec2(9, 2)));
        assert!(!grid.insert(ivec2(9, 2)));
        assert!(grid.get(ivec2(9, 2)));
        assert_eq!(grid.count(), 1);
        assert_eq!(grid.iter().collect::<Vec<_>>(), vec![ivec2(9, 2)]);
    }

    #[test]
    fn from_fn() {
        let grid = BitGrid::from_fn(ivec2(8, 8), |p| p.x == p.y);
        assert_eq!(grid.count(), 8);
        assert!(grid.get(ivec2(7, 7)));
        assert!(!grid.get(ivec2(7, 6)));
    }

    #[test]
    fn mismatched_union() {
        let mut a = BitGrid::new(ivec2(4, 4));
        let mut b = BitGrid::new(ivec2(2, 8));
        b.insert(ivec2(1, 1));
        b.insert(ivec2(1, 7));
        a.union_with(&b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![ivec2(1, 1)]);
    }

    #[quickcheck]
    fn union_is_monotonic(a: Vec<(u8, u8)>, b: Vec<(u8, u8)>) -> bool {
        let to_grid = |pts: &[(u8, u8)]| {
            let mut g = BitGrid::new(ivec2(100, 70));
            g.extend(pts.iter().map(|&(x, y)| ivec2(x as i32, y as i32)));
            g
        };
        let (ga, gb) = (to_grid(&a), to_grid(&b));

        let mut union = ga.clone();
        union.union_with(&gb);

        ga.iter().all(|p| union.get(p))
            && gb.iter().all(|p| union.get(p))
            && union.count() <= ga.count() + gb.count()
    }
}
