use super::{description_lines, draw_rows, header_value, join_comments};
use crate::{geometry::top_left, CellMap, Coord, FormatError, Pattern, Rule};

pub(super) const EXTENSIONS: &[&str] = &[".cells"];
pub(super) const FILTER: &str = "Plaintext (*.cells)|*.cells";

const DEAD: char = '.';
const ALIVE: char = 'O';

pub(super) fn load(text: &str) -> Result<Pattern, FormatError> {
    let mut pattern = Pattern::default();
    let mut comments = Vec::new();
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .skip_while(|(_, line)| line.is_empty())
        .peekable();

    while let Some((_, line)) = lines.next_if(|(_, line)| line.is_empty() || line.starts_with('!')) {
        if let Some(name) = line.strip_prefix("!Name:") {
            pattern.name = Some(name.trim_start().to_string());
        } else if let Some(author) = line.strip_prefix("!Author:") {
            pattern.author = Some(author.trim_start().to_string());
        } else if let Some(rule) = line.strip_prefix("!Rule:") {
            pattern.rule = Rule::parse(rule)?;
        } else if let Some(comment) = line.strip_prefix('!') {
            comments.push(comment.trim_start());
        }
    }
    pattern.description = join_comments(comments);

    let mut cells = CellMap::default();
    for (y, (number, line)) in lines.enumerate() {
        for (x, ch) in line.chars().enumerate() {
            match ch {
                DEAD => {}
                ALIVE => {
                    cells.insert(Coord::new(x as i32, y as i32), 1);
                }
                _ => return Err(FormatError::InvalidCharacter { ch, line: number }),
            }
        }
    }

    pattern.cells = cells;
    Ok(pattern)
}

pub(super) fn save(pattern: &Pattern) -> String {
    let mut out = String::new();
    if let Some(name) = header_value(&pattern.name) {
        out.push_str(&format!("!Name: {name}\n"));
    }
    if let Some(author) = header_value(&pattern.author) {
        out.push_str(&format!("!Author: {author}\n"));
    }
    if pattern.rule != Rule::STANDARD_LIFE {
        out.push_str(&format!("!Rule: {}\n", pattern.rule));
    }
    for line in description_lines(pattern) {
        // the space keeps comments apart from "!Name:"-style keys
        out.push_str(&format!("! {line}\n"));
    }

    let cells = pattern.alive_cells();
    let corner = top_left(cells.iter().copied());
    draw_rows(&mut out, &cells, corner.x, corner.y, DEAD, ALIVE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_header_and_rows() {
        let text = "\n!Name: Glider\n!A comment\n\n!Rule: B36/S23\n!Author: someone\n\
                    .O\n\n  ..O  \r\nOOO";
        let pattern = load(text).unwrap();
        assert_eq!(pattern.name.as_deref(), Some("Glider"));
        assert_eq!(pattern.author.as_deref(), Some("someone"));
        assert_eq!(pattern.description.as_deref(), Some("A comment"));
        assert_eq!(pattern.rule, Rule::HIGH_LIFE);
        assert_eq!(
            pattern.alive_cells(),
            [(1, 0), (2, 2), (0, 3), (1, 3), (2, 3)].map(Coord::from).to_vec()
        );
    }

    #[test]
    fn test_load_without_header() {
        let pattern = load("OO\nOO\n").unwrap();
        assert_eq!(pattern.rule, Rule::STANDARD_LIFE);
        assert_eq!(pattern.name, None);
        assert_eq!(pattern.description, None);
        assert_eq!(pattern.population(), 4);
    }

    #[test]
    fn test_load_errors() {
        assert_eq!(
            load("!Name: x\n.O.\n.*.\n"),
            Err(FormatError::InvalidCharacter { ch: '*', line: 3 })
        );
        assert!(matches!(load("!Rule: B3/S9\nO"), Err(FormatError::InvalidRule(_))));
        assert!(load("o").is_err());
    }

    #[test]
    fn test_save() {
        let pattern = Pattern {
            name: Some("Beehive with tail".to_string()),
            author: Some(String::new()),
            description: Some("two\nlines".to_string()),
            ..Pattern::from_cells(Rule::SEEDS, [(4, 7), (6, 7), (5, 9)].map(Coord::from))
        };
        assert_eq!(
            save(&pattern),
            "!Name: Beehive with tail\n!Rule: B2\n! two\n! lines\nO.O\n.\n.O\n"
        );
    }

    #[test]
    fn test_save_load_keeps_metadata() {
        let pattern = Pattern {
            name: Some("R-pentomino".to_string()),
            author: Some("John Conway".to_string()),
            description: Some("Methuselah".to_string()),
            ..Pattern::from_cells(
                Rule::STANDARD_LIFE,
                [(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)].map(Coord::from),
            )
        };
        assert_eq!(load(&save(&pattern)).unwrap(), pattern);
    }

    #[test]
    fn test_comments_that_look_like_keys() {
        let pattern = Pattern {
            description: Some("Rule: see wiki\nName: not a name\nAuthor:".to_string()),
            ..Pattern::from_cells(Rule::HIGH_LIFE, [Coord::new(0, 0)])
        };
        let loaded = load(&save(&pattern)).unwrap();
        assert_eq!(loaded, pattern);
        assert_eq!(loaded.name, None);
    }

    #[test]
    fn test_multiline_name_and_author() {
        let pattern = Pattern {
            name: Some("two\nlines".to_string()),
            author: Some("first\r\nsecond".to_string()),
            ..Pattern::from_cells(Rule::STANDARD_LIFE, [Coord::new(0, 0)])
        };
        let loaded = load(&save(&pattern)).unwrap();
        assert_eq!(loaded.name.as_deref(), Some("two lines"));
        assert_eq!(loaded.author.as_deref(), Some("first second"));
        assert_eq!(loaded.cells, pattern.cells);
    }
}
