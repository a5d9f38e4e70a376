use super::{description_lines, header_value, join_comments};
use crate::{geometry::bounding_rect, CellMap, Coord, FormatError, Pattern, Rule};

pub(super) const EXTENSIONS: &[&str] = &[".rle"];
pub(super) const FILTER: &str = "RLE (*.rle)|*.rle";

/// Body lines are wrapped so that they never exceed this many characters.
const LINE_LENGTH_LIMIT: usize = 70;

/// Longest run of alive cells a single token may describe.
///
/// Dead runs and row skips cost nothing and may span the whole grid.
const MAX_ALIVE_RUN: u32 = 1 << 24;

pub(super) fn load(text: &str) -> Result<Pattern, FormatError> {
    let mut pattern = Pattern::default();
    let mut comments = Vec::new();
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let header = loop {
        let Some((_, line)) = lines.next() else {
            return Err(FormatError::MissingHeader);
        };
        if let Some(name) = line.strip_prefix("#N") {
            pattern.name = Some(name.trim_start().to_string());
        } else if let Some(author) = line.strip_prefix("#O") {
            pattern.author = Some(author.trim_start().to_string());
        } else if let Some(comment) = line.strip_prefix("#C").or_else(|| line.strip_prefix("#c")) {
            comments.push(comment.trim_start());
        } else if let Some(comment) = line.strip_prefix('#') {
            comments.push(comment.trim_start());
        } else {
            break line;
        }
    };
    pattern.description = join_comments(comments);
    pattern.rule = parse_header(header)?;

    let mut cells = CellMap::default();
    let (mut x, mut y) = (0i32, 0i32);
    let mut count: Option<u32> = None;

    'lines: for (number, line) in lines {
        for ch in line.chars() {
            if let Some(digit) = ch.to_digit(10) {
                let value = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|c| c.checked_add(digit))
                    .ok_or_else(|| FormatError::InvalidNumber(format!("run count on line {number}")))?;
                count = Some(value);
                continue;
            }

            let pending = count.take();
            let run = pending.unwrap_or(1);
            // counts past i32::MAX wrap around the grid seam
            let step = run as i32;
            match ch {
                'o' => {
                    if run > MAX_ALIVE_RUN {
                        return Err(FormatError::InvalidNumber(format!(
                            "alive run of {run} cells on line {number}"
                        )));
                    }
                    for i in 0..run {
                        cells.insert(Coord::new(x.wrapping_add(i as i32), y), 1);
                    }
                    x = x.wrapping_add(step);
                }
                'b' | '.' => x = x.wrapping_add(step),
                '$' => {
                    y = y.wrapping_add(step);
                    x = 0;
                }
                '!' => break 'lines,
                c if c.is_whitespace() && pending.is_none() => {}
                _ => return Err(FormatError::InvalidCharacter { ch, line: number }),
            }
        }
    }
    if count.is_some() {
        return Err(FormatError::InvalidNumber("dangling run count".to_string()));
    }

    pattern.cells = cells;
    Ok(pattern)
}

/// Parses `x = W, y = H[, rule = R]` and returns the rule.
///
/// The declared size is validated but otherwise informational: cells past
/// it are still loaded.
fn parse_header(line: &str) -> Result<Rule, FormatError> {
    fn extract_value<'a>(part: Option<&'a str>, expected_key: &str) -> Result<&'a str, FormatError> {
        let part = part.ok_or_else(|| {
            FormatError::InvalidHeader(format!("missing \"{expected_key}\""))
        })?;
        let (key, value) = part.split_once('=').ok_or_else(|| {
            FormatError::InvalidHeader(format!("expected \"{expected_key} = ...\", got {part:?}"))
        })?;
        let key = key.trim_end();
        if key != expected_key {
            return Err(FormatError::InvalidHeader(format!(
                "expected {expected_key}, got {key}"
            )));
        }
        if value.contains('=') {
            return Err(FormatError::InvalidHeader(
                "missing ',' between '='".to_string(),
            ));
        }
        Ok(value.trim_start())
    }

    let mut parts = line.split(',').map(str::trim);
    for key in ["x", "y"] {
        let value = extract_value(parts.next(), key)?;
        value
            .parse::<u32>()
            .map_err(|_| FormatError::InvalidNumber(value.to_string()))?;
    }

    // rule is optional
    let rule = match parts.next() {
        Some(part) => Rule::parse(extract_value(Some(part), "rule")?)?,
        None => Rule::STANDARD_LIFE,
    };
    if let Some(extra) = parts.next() {
        return Err(FormatError::InvalidHeader(format!("unexpected {extra:?}")));
    }
    Ok(rule)
}

/// Appends run-length tokens, breaking lines between tokens only.
struct TokenWriter<'a> {
    out: &'a mut String,
    line_length: usize,
}

impl TokenWriter<'_> {
    fn push(&mut self, run: i64, tag: char) {
        let token = if run > 1 {
            format!("{run}{tag}")
        } else {
            tag.to_string()
        };
        if self.line_length > 0 && self.line_length + token.len() > LINE_LENGTH_LIMIT {
            self.out.push('\n');
            self.line_length = 0;
        }
        self.out.push_str(&token);
        self.line_length += token.len();
    }
}

pub(super) fn save(pattern: &Pattern) -> String {
    let mut out = String::new();
    if let Some(name) = header_value(&pattern.name) {
        out.push_str(&format!("#N {name}\n"));
    }
    if let Some(author) = header_value(&pattern.author) {
        out.push_str(&format!("#O {author}\n"));
    }
    for line in description_lines(pattern) {
        out.push_str(&format!("#C {line}\n"));
    }

    let cells = pattern.alive_cells();
    let rect = bounding_rect(cells.iter().copied());
    out.push_str(&format!(
        "x = {}, y = {}, rule = {}\n",
        rect.width, rect.height, pattern.rule
    ));

    let mut writer = TokenWriter {
        out: &mut out,
        line_length: 0,
    };
    let left = rect.x as i64;
    let (mut x, mut y) = (left, rect.y as i64);
    let mut i = 0;
    while i < cells.len() {
        let (cx, cy) = (cells[i].x as i64, cells[i].y as i64);
        if cy != y {
            writer.push(cy - y, '$');
            y = cy;
            x = left;
        }
        if cx > x {
            writer.push(cx - x, 'b');
        }

        // coalesce horizontally adjacent cells into one run
        let mut run = 1;
        while i + run < cells.len()
            && cells[i + run].y as i64 == cy
            && cells[i + run].x as i64 == cx + run as i64
        {
            run += 1;
        }
        writer.push(run as i64, 'o');
        x = cx + run as i64;
        i += run;
    }
    writer.push(1, '!');
    out.push('\n');

    out
}
