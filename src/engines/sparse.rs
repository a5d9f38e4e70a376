use super::{birth_state, survival_state};
use crate::{CellMap, Coord, LifeEngine, Rule};
use ahash::AHashMap as HashMap;

/// Hash-map based engine whose cost per step is proportional to the
/// population, independent of how far apart the cells are.
///
/// Every step rebuilds a scratch map of neighbour counts: each alive cell
/// registers itself with a zero count and adds one to each of its eight
/// neighbours. The keys of that map are exactly the cells that can be alive
/// in the next generation; whether a key is currently alive is answered by
/// the alive map itself.
///
/// # Example
///
/// ```rust
/// use sparse_life::{LifeEngine, SparseEngine};
///
/// let mut engine = SparseEngine::new();
/// for y in 0..3 {
///     engine.set(1, y, 1);
/// }
/// assert!(!engine.step());
/// assert_eq!(engine.population(), 3);
/// assert_ne!(engine.get(0, 1), 0);
/// assert_eq!(engine.get(1, 0), 0);
/// ```
#[derive(Clone, Default)]
pub struct SparseEngine {
    cells: CellMap,
    /// Neighbour counts of the candidates, only meaningful inside `step`.
    counts: HashMap<Coord, u8>,
    rule: Rule,
}

impl LifeEngine for SparseEngine {
    fn new() -> Self {
        Self::default()
    }

    fn get(&self, x: i32, y: i32) -> u8 {
        self.cells.get(&Coord::new(x, y)).copied().unwrap_or(0)
    }

    fn set(&mut self, x: i32, y: i32, state: u8) {
        let cell = Coord::new(x, y);
        if state == 0 {
            self.cells.remove(&cell);
        } else {
            self.cells.insert(cell, state);
        }
    }

    fn population(&self) -> usize {
        self.cells.len()
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.counts.clear();
    }

    fn step(&mut self) -> bool {
        self.counts.clear();
        for &cell in self.cells.keys() {
            self.counts.entry(cell).or_insert(0);
            for neighbor in cell.neighbors() {
                *self.counts.entry(neighbor).or_insert(0) += 1;
            }
        }

        let rule = self.rule;
        let mut next = CellMap::with_capacity(self.cells.len());
        for (&cell, &count) in &self.counts {
            if self.cells.contains_key(&cell) {
                if rule.is_survival(count) {
                    next.insert(cell, survival_state(count));
                }
            } else if rule.is_birth(count) {
                next.insert(cell, birth_state(count));
            }
        }
        self.cells = next;

        self.cells.is_empty()
    }

    fn rule(&self) -> Rule {
        self.rule
    }

    fn set_rule(&mut self, rule: Rule) {
        self.rule = rule;
    }

    fn cells(&self) -> CellMap {
        self.cells.clone()
    }
}
