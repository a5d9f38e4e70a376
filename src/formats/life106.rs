use crate::{CellMap, Coord, FormatError, Pattern};

pub(super) const EXTENSIONS: &[&str] = &[".lif", ".life"];
pub(super) const FILTER: &str = "Life 1.06 (*.lif;*.life)|*.lif;*.life";

const SIGNATURE: &str = "#Life";
const HEADER: &str = "#Life 1.06";

/// The format has no metadata, so the rule is always Standard Life.
pub(super) fn load(text: &str) -> Result<Pattern, FormatError> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();
    lines.next_if(|line| line.starts_with(SIGNATURE));

    let mut cells = CellMap::default();
    for line in lines {
        let mut parts = line.split_whitespace();
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(FormatError::InvalidNumber(line.to_string()));
        };
        let parse = |s: &str| {
            s.parse::<i32>()
                .map_err(|_| FormatError::InvalidNumber(s.to_string()))
        };
        cells.insert(Coord::new(parse(x)?, parse(y)?), 1);
    }

    Ok(Pattern {
        cells,
        ..Pattern::default()
    })
}

pub(super) fn save(pattern: &Pattern) -> String {
    let mut cells = pattern.alive_cells();
    cells.sort_unstable_by_key(|cell| (cell.x, cell.y));

    let mut out = format!("{HEADER}\n");
    for Coord { x, y } in cells {
        out.push_str(&format!("{x} {y}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rule;

    #[test]
    fn test_load() {
        let pattern = load("#Life 1.06\n0 -1\n\n  1\t0 \n-1 1\n0 1\n1 1\n").unwrap();
        assert_eq!(pattern.rule, Rule::STANDARD_LIFE);
        assert_eq!(pattern.population(), 5);
        assert!(pattern.cells.contains_key(&Coord::new(1, 0)));
        assert_eq!(pattern.name, None);
    }

    #[test]
    fn test_load_without_signature() {
        let pattern = load("5 5\n5 5\n2147483647 -2147483648").unwrap();
        assert_eq!(
            pattern.alive_cells(),
            [(i32::MAX, i32::MIN), (5, 5)].map(Coord::from).to_vec()
        );
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(load("#Life 1.06\n1"), Err(FormatError::InvalidNumber(_))));
        assert!(matches!(load("1 2 3"), Err(FormatError::InvalidNumber(_))));
        assert!(matches!(load("1 x"), Err(FormatError::InvalidNumber(_))));
        assert!(matches!(load("#Life 1.06\n#D comment\n0 0"), Err(FormatError::InvalidNumber(_))));
        assert!(load("2147483648 0").is_err());
    }

    #[test]
    fn test_save_sorted_by_column() {
        let pattern = Pattern::from_cells(
            Rule::HIGH_LIFE,
            [(1, 0), (0, 2), (2, 1), (1, 2), (-3, 5)].map(Coord::from),
        );
        assert_eq!(save(&pattern), "#Life 1.06\n-3 5\n0 2\n1 0\n1 2\n2 1\n");
    }
}
