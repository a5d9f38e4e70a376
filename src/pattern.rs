use crate::{
    formats::{self, PatternFormat},
    geometry::{self, Rect},
    CellMap, Coord, FormatError, Rule,
};
use anyhow::{anyhow, Result};
use rand::{Rng, SeedableRng};
use std::path::Path;

/// A Life pattern: optional metadata, a rule and a set of cells.
///
/// `Pattern` is a plain value. Engines copy cells out of it and codecs build
/// fresh ones, so holding a pattern never aliases engine state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pattern {
    pub name: Option<String>,
    pub author: Option<String>,
    /// Free-form comment, lines separated by `\n`.
    pub description: Option<String>,
    pub rule: Rule,
    /// Cell states, see [`LifeEngine`](crate::LifeEngine) for their meaning.
    pub cells: CellMap,
}

impl Pattern {
    pub fn new(rule: Rule, cells: CellMap) -> Self {
        Self {
            rule,
            cells,
            ..Self::default()
        }
    }

    /// Creates a pattern with every coordinate in `cells` set to state 1.
    pub fn from_cells<I>(rule: Rule, cells: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        Self::new(rule, cells.into_iter().map(|cell| (cell, 1)).collect())
    }

    /// Creates a random soup filling `width × height` cells starting at the origin.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Size of the filled area.
    /// * `density` - Probability of each cell being alive, in `[0, 1]`.
    /// * `seed` - Optional seed for the random number generator.
    ///   If None, seeds from the OS.
    ///
    /// # Errors
    ///
    /// Returns an error if `density` is outside `[0, 1]` or the area does not
    /// fit into the coordinate range.
    pub fn random(
        rule: Rule,
        width: u32,
        height: u32,
        density: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(anyhow!("density {} is not in [0, 1]", density));
        }
        let (w, h) = match (i32::try_from(width), i32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(anyhow!("area {}x{} is too large", width, height)),
        };

        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_os_rng()
        };
        let mut cells = CellMap::default();
        for y in 0..h {
            for x in 0..w {
                if rng.random_bool(density) {
                    cells.insert(Coord::new(x, y), 1);
                }
            }
        }
        Ok(Self::new(rule, cells))
    }

    /// Parses `text` in the given format.
    pub fn from_format(format: PatternFormat, text: &str) -> Result<Self, FormatError> {
        format.load(text)
    }

    pub fn to_format(&self, format: PatternFormat) -> String {
        format.save(self)
    }

    /// Loads a pattern file, picking the format by extension.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sparse_life::{LifeEngine, Pattern, SparseEngine};
    ///
    /// let pattern = Pattern::from_file("res/glider.rle").unwrap();
    /// let mut engine = SparseEngine::new();
    /// engine.load_pattern(&pattern);
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        formats::load_file(path).map(|(pattern, _)| pattern)
    }

    /// Saves the pattern in the first format registered for the path's extension.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        formats::save_file(self, path, None).map(|_| ())
    }

    /// Number of alive (non-zero) cells.
    pub fn population(&self) -> usize {
        self.cells.values().filter(|&&state| state != 0).count()
    }

    /// Coordinates of the alive cells in row-major order.
    pub fn alive_cells(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self
            .cells
            .iter()
            .filter(|(_, &state)| state != 0)
            .map(|(&cell, _)| cell)
            .collect();
        cells.sort_unstable();
        cells
    }

    pub fn bounding_rect(&self) -> Rect {
        geometry::bounding_rect(self.alive_cells())
    }

    /// Moves the alive cells so that the top-left corner of
    /// [`Pattern::bounding_rect`] lands on the origin; dead entries are dropped.
    pub fn align_to_origin(&mut self) {
        self.cells = geometry::align_to_origin(&self.cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const SEED: u64 = 42;

    fn glider() -> Pattern {
        Pattern::from_cells(
            Rule::STANDARD_LIFE,
            [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)].map(Coord::from),
        )
    }

    #[test]
    fn test_default_is_empty_standard_life() {
        let pattern = Pattern::default();
        assert_eq!(pattern.rule, Rule::STANDARD_LIFE);
        assert!(pattern.cells.is_empty());
        assert_eq!(pattern.name, None);
        assert_eq!(pattern.bounding_rect(), Rect::default());
    }

    #[test]
    fn test_population_skips_dead_states() {
        let mut pattern = glider();
        pattern.cells.insert(Coord::new(9, 9), 0);
        assert_eq!(pattern.population(), 5);
        assert!(!pattern.alive_cells().contains(&Coord::new(9, 9)));
    }

    #[test]
    fn test_alive_cells_row_major() {
        let cells = glider().alive_cells();
        assert!(cells.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(cells[0], Coord::new(1, 0));
    }

    #[test]
    fn test_random() {
        let a = Pattern::random(Rule::HIGH_LIFE, 64, 32, 0.5, Some(SEED)).unwrap();
        let b = Pattern::random(Rule::HIGH_LIFE, 64, 32, 0.5, Some(SEED)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rule, Rule::HIGH_LIFE);
        assert!(a.population() > 0 && a.population() < 64 * 32);
        assert!(a.alive_cells().iter().all(|c| (0..64).contains(&c.x) && (0..32).contains(&c.y)));

        let full = Pattern::random(Rule::STANDARD_LIFE, 5, 7, 1.0, None).unwrap();
        assert_eq!(full.population(), 35);
        let empty = Pattern::random(Rule::STANDARD_LIFE, 5, 7, 0.0, None).unwrap();
        assert_eq!(empty.population(), 0);
    }

    #[test]
    fn test_random_rejects_bad_arguments() {
        assert!(Pattern::random(Rule::STANDARD_LIFE, 4, 4, 1.5, None).is_err());
        assert!(Pattern::random(Rule::STANDARD_LIFE, 4, 4, f64::NAN, None).is_err());
        assert!(Pattern::random(Rule::STANDARD_LIFE, u32::MAX, 1, 0.5, None).is_err());
    }

    #[test]
    fn test_align_to_origin() {
        let mut pattern = glider();
        pattern.cells = glider()
            .cells
            .keys()
            .map(|cell| (cell.offset(-50, 70), 1))
            .collect();
        assert_eq!(pattern.bounding_rect(), Rect::new(-50, 70, 3, 3));
        pattern.align_to_origin();
        assert_eq!(pattern, glider());
    }

    #[test]
    fn test_align_to_origin_uses_alive_cells() {
        let mut pattern = Pattern::from_cells(Rule::STANDARD_LIFE, [Coord::new(5, 5)]);
        pattern.cells.insert(Coord::new(-100, -100), 0);
        pattern.align_to_origin();
        assert_eq!(pattern.alive_cells(), vec![Coord::new(0, 0)]);
        assert_eq!(pattern.cells.len(), 1);
    }

    #[test]
    fn test_format_round_trips_keep_cells() {
        let mut pattern = glider();
        pattern.rule = Rule::named("Day & Night").unwrap();
        pattern.name = Some("glider".to_string());
        for format in PatternFormat::ALL {
            let text = pattern.to_format(format);
            let loaded = Pattern::from_format(format, &text).unwrap();
            assert_eq!(loaded.cells, pattern.cells, "{}", format.name());
            if format != PatternFormat::Life106 {
                assert_eq!(loaded.rule, pattern.rule, "{}", format.name());
            }
        }
    }

    #[test]
    fn test_round_trip_keeps_position() {
        let pattern = Pattern::from_cells(
            Rule::STANDARD_LIFE,
            [(-7, -3), (-6, -3), (20, 4), (21, 5)].map(Coord::from),
        );
        // Plaintext and RLE are relative to the corner; the others are absolute
        for format in [PatternFormat::Life105, PatternFormat::Life106] {
            let loaded = Pattern::from_format(format, &pattern.to_format(format)).unwrap();
            assert_eq!(loaded.cells, pattern.cells, "{}", format.name());
        }
        for format in [PatternFormat::Rle, PatternFormat::Plaintext] {
            let mut loaded = Pattern::from_format(format, &pattern.to_format(format)).unwrap();
            let mut aligned = pattern.clone();
            aligned.align_to_origin();
            loaded.align_to_origin();
            assert_eq!(loaded.cells, aligned.cells, "{}", format.name());
        }
    }

    #[test]
    fn test_save_writes_only_alive_cells() {
        let mut pattern = glider();
        pattern.cells.insert(Coord::new(100, 100), 0);
        pattern.cells.insert(Coord::new(1, 0), 13);
        for format in PatternFormat::ALL {
            let loaded = Pattern::from_format(format, &pattern.to_format(format)).unwrap();
            assert_eq!(loaded.population(), 5, "{}", format.name());
            assert!(loaded.cells.values().all(|&state| state == 1));
        }
    }
}
