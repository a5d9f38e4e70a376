use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A point of the unbounded integer grid.
///
/// Coordinates are ordered row-major: first by `y`, then by `x`. This is the
/// order in which text formats emit cells, so sorting a list of coordinates
/// yields them in "reading" order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate shifted by `(dx, dy)`.
    ///
    /// The grid wraps at the limits of `i32` instead of overflowing.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// Iterates over the 8 cells of the Moore neighbourhood, row by row.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        const DELTAS: [(i32, i32); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        DELTAS.into_iter().map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Packs both axes into one word, `x` in the high half.
    fn packed(self) -> u64 {
        ((self.x as u32 as u64) << 32) | self.y as u32 as u64
    }
}

impl Hash for Coord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.packed());
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}; {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_order() {
        let mut cells = vec![
            Coord::new(5, 1),
            Coord::new(-3, 2),
            Coord::new(0, 1),
            Coord::new(9, -4),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Coord::new(9, -4),
                Coord::new(0, 1),
                Coord::new(5, 1),
                Coord::new(-3, 2),
            ]
        );
    }

    #[test]
    fn test_neighbors() {
        let center = Coord::new(10, -7);
        let neighbors: Vec<_> = center.neighbors().collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&center));
        for n in &neighbors {
            assert!((n.x - center.x).abs() <= 1 && (n.y - center.y).abs() <= 1);
        }
    }

    #[test]
    fn test_neighbors_wrap_at_limits() {
        let corner = Coord::new(i32::MAX, i32::MIN);
        let neighbors: Vec<_> = corner.neighbors().collect();
        assert!(neighbors.contains(&Coord::new(i32::MIN, i32::MIN)));
        assert!(neighbors.contains(&Coord::new(i32::MAX, i32::MAX)));
    }

    #[test]
    fn test_packed_is_injective_on_sign() {
        assert_ne!(Coord::new(-1, 0).packed(), Coord::new(0, -1).packed());
        assert_ne!(Coord::new(1, 2).packed(), Coord::new(2, 1).packed());
    }
}
