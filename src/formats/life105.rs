use super::{description_lines, draw_rows, join_comments};
use crate::{geometry::bounding_rect, CellMap, Coord, FormatError, Pattern, Rule, RuleFormat};
use ahash::AHashSet;

pub(super) const EXTENSIONS: &[&str] = &[".lif", ".life"];
pub(super) const FILTER: &str = "Life 1.05 (*.lif;*.life)|*.lif;*.life";

const SIGNATURE: &str = "#Life 1.05";
const DEAD: char = '.';
const ALIVE: char = '*';

pub(super) fn load(text: &str) -> Result<Pattern, FormatError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    match lines.next() {
        Some((_, line)) if line.starts_with(SIGNATURE) => {}
        _ => return Err(FormatError::MissingSignature(SIGNATURE)),
    }

    let mut pattern = Pattern::default();
    let mut comments = Vec::new();
    while let Some((_, line)) =
        lines.next_if(|(_, line)| line.starts_with('#') && !line.starts_with("#P"))
    {
        if line.starts_with("#N") {
            pattern.rule = Rule::STANDARD_LIFE;
        } else if let Some(rule) = line.strip_prefix("#R") {
            pattern.rule = Rule::parse(rule)?;
        } else if let Some(comment) = line.strip_prefix("#D") {
            comments.push(comment.trim_start());
        }
    }
    pattern.description = join_comments(comments);

    let mut cells = CellMap::default();
    let mut origin = Coord::new(0, 0);
    let mut row = 0i32;
    for (number, line) in lines {
        if let Some(position) = line.strip_prefix("#P") {
            origin = parse_position(position)?;
            row = 0;
            continue;
        }

        for (column, ch) in line.chars().enumerate() {
            match ch {
                DEAD => {}
                ALIVE => {
                    cells.insert(origin.offset(column as i32, row), 1);
                }
                _ => return Err(FormatError::InvalidCharacter { ch, line: number }),
            }
        }
        row += 1;
    }

    pattern.cells = cells;
    Ok(pattern)
}

/// `#P` arguments: empty for the origin, otherwise exactly `x y`.
fn parse_position(text: &str) -> Result<Coord, FormatError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    match parts.as_slice() {
        [] => Ok(Coord::new(0, 0)),
        [x, y] => {
            let parse = |s: &str| {
                s.parse::<i32>()
                    .map_err(|_| FormatError::InvalidNumber(s.to_string()))
            };
            Ok(Coord::new(parse(x)?, parse(y)?))
        }
        _ => Err(FormatError::InvalidHeader(format!("#P{text}"))),
    }
}

/// Splits sorted `cells` into 8-connected groups.
///
/// Groups come out in the row-major order of their first cell and each
/// group is sorted.
fn connected_blocks(cells: &[Coord]) -> Vec<Vec<Coord>> {
    let mut unvisited: AHashSet<Coord> = cells.iter().copied().collect();
    let mut blocks = Vec::new();

    for &start in cells {
        if !unvisited.remove(&start) {
            continue;
        }
        let mut block = vec![start];
        let mut stack = vec![start];
        while let Some(cell) = stack.pop() {
            for neighbor in cell.neighbors() {
                if unvisited.remove(&neighbor) {
                    block.push(neighbor);
                    stack.push(neighbor);
                }
            }
        }
        block.sort_unstable();
        blocks.push(block);
    }
    blocks
}

pub(super) fn save(pattern: &Pattern) -> String {
    let mut out = format!("{SIGNATURE}\n");
    for line in description_lines(pattern) {
        out.push_str(&format!("#D {line}\n"));
    }

    let rule = pattern.rule;
    if rule == Rule::STANDARD_LIFE {
        out.push_str("#N\n");
    } else if rule.birth().next().is_none() {
        // a bare "23/" would read back as a birth set
        out.push_str(&format!("#R {}\n", rule.format(RuleFormat::BirthSurvival)));
    } else {
        out.push_str(&format!("#R {}\n", rule.format(RuleFormat::SurvivalBirth)));
    }

    for block in connected_blocks(&pattern.alive_cells()) {
        let rect = bounding_rect(block.iter().copied());
        out.push_str(&format!("#P {} {}\n", rect.x, rect.y));
        draw_rows(&mut out, &block, rect.x, rect.y, DEAD, ALIVE);
    }
    out
}
