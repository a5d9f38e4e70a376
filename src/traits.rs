use crate::{CellMap, Coord, Pattern, Rule};

/// Simulation engine for Life-like cellular automata on an unbounded grid.
///
/// A cell is alive iff its stored state is non-zero. Engines assign states
/// on every step so that consumers can tell births from survivals: a cell
/// born with `n` neighbours stores `n + 1`, a cell that survived with `n`
/// neighbours stores `n + 10`. States written with [`LifeEngine::set`] are
/// kept as they are until the next step.
pub trait LifeEngine {
    /// Creates an engine with an empty grid and the [`Rule::STANDARD_LIFE`] rule.
    fn new() -> Self
    where
        Self: Sized;

    /// Returns the state stored at `(x, y)`, `0` for dead cells.
    fn get(&self, x: i32, y: i32) -> u8;

    /// Stores `state` at `(x, y)`. A zero state removes the cell.
    fn set(&mut self, x: i32, y: i32, state: u8);

    /// Number of alive cells.
    fn population(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.population() == 0
    }

    /// Kills every cell. The rule is left untouched.
    fn clear(&mut self);

    /// Replaces the grid with `cells`. Zero states are skipped.
    fn initialize(&mut self, cells: &CellMap) {
        self.clear();
        for (&Coord { x, y }, &state) in cells {
            self.set(x, y, state);
        }
    }

    /// Advances the grid by exactly one generation.
    ///
    /// # Returns
    ///
    /// `true` if no cell is alive after the step.
    fn step(&mut self) -> bool;

    fn rule(&self) -> Rule;

    fn set_rule(&mut self, rule: Rule);

    /// Returns a copy of the alive cells and their states.
    fn cells(&self) -> CellMap;

    /// Loads the rule and cells of `pattern`. Metadata is ignored.
    fn load_pattern(&mut self, pattern: &Pattern) {
        self.set_rule(pattern.rule);
        self.initialize(&pattern.cells);
    }

    /// Returns the current state of the grid as a [`Pattern`] without metadata.
    fn current_state(&self) -> Pattern {
        Pattern::new(self.rule(), self.cells())
    }

    /// Steps until the grid is empty or `max_generations` steps were made.
    ///
    /// # Returns
    ///
    /// The number of generations actually simulated.
    fn run(&mut self, max_generations: u64) -> u64 {
        for done in 0..max_generations {
            if self.step() {
                return done + 1;
            }
        }
        max_generations
    }
}
