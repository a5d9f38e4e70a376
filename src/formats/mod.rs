//! Text pattern formats and the registry that picks between them.
//!
//! Each format lives in its own module and exposes the same four items:
//! `EXTENSIONS`, `FILTER`, `load` and `save`. [`PatternFormat`] ties them
//! together and fixes the priority order used when a file extension (or a
//! clipboard string) could belong to more than one format.

mod life105;
mod life106;
mod plaintext;
mod rle;

use crate::{Coord, FormatError, Pattern};
use anyhow::{anyhow, Context, Result};
use flate2::{
    read::{GzDecoder, GzEncoder},
    Compression,
};
use std::io::{Read, Write};
use std::path::Path;

/// Supported pattern formats, see <https://conwaylife.com/wiki/File_formats>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternFormat {
    /// [Extended RLE](https://conwaylife.com/wiki/Run_Length_Encoded):
    /// run-length encoded rows with a `x = .., y = .., rule = ..` header.
    Rle,

    /// [Plaintext](https://conwaylife.com/wiki/Plaintext): rows of `.` and `O`,
    /// metadata in `!Name:`, `!Author:` and `!Rule:` lines.
    Plaintext,

    /// [Life 1.05](https://conwaylife.com/wiki/Life_1.05): rows of `.` and `*`
    /// grouped in blocks, each positioned by a `#P x y` line.
    Life105,

    /// [Life 1.06](https://conwaylife.com/wiki/Life_1.06): one `x y` pair per
    /// alive cell.
    Life106,
}

impl PatternFormat {
    /// All formats in the order they are tried.
    pub const ALL: [PatternFormat; 4] = [
        PatternFormat::Rle,
        PatternFormat::Plaintext,
        PatternFormat::Life105,
        PatternFormat::Life106,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatternFormat::Rle => "RLE",
            PatternFormat::Plaintext => "Plaintext",
            PatternFormat::Life105 => "Life 1.05",
            PatternFormat::Life106 => "Life 1.06",
        }
    }

    /// File extensions, lower case with the leading dot.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            PatternFormat::Rle => rle::EXTENSIONS,
            PatternFormat::Plaintext => plaintext::EXTENSIONS,
            PatternFormat::Life105 => life105::EXTENSIONS,
            PatternFormat::Life106 => life106::EXTENSIONS,
        }
    }

    /// File dialog filter in the `Description|*.ext` form.
    pub fn filter(&self) -> &'static str {
        match self {
            PatternFormat::Rle => rle::FILTER,
            PatternFormat::Plaintext => plaintext::FILTER,
            PatternFormat::Life105 => life105::FILTER,
            PatternFormat::Life106 => life106::FILTER,
        }
    }

    /// Case-insensitive; the leading dot is optional.
    pub fn matches_extension(&self, extension: &str) -> bool {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        self.extensions()
            .iter()
            .any(|ext| ext[1..].eq_ignore_ascii_case(extension))
    }

    /// The first format, in priority order, that uses `extension`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.matches_extension(extension))
    }

    pub fn load(&self, text: &str) -> Result<Pattern, FormatError> {
        match self {
            PatternFormat::Rle => rle::load(text),
            PatternFormat::Plaintext => plaintext::load(text),
            PatternFormat::Life105 => life105::load(text),
            PatternFormat::Life106 => life106::load(text),
        }
    }

    /// Serializes the alive (non-zero) cells of `pattern`. Never fails.
    pub fn save(&self, pattern: &Pattern) -> String {
        match self {
            PatternFormat::Rle => rle::save(pattern),
            PatternFormat::Plaintext => plaintext::save(pattern),
            PatternFormat::Life105 => life105::save(pattern),
            PatternFormat::Life106 => life106::save(pattern),
        }
    }

    /// Reads UTF-8 text from `reader` and parses it.
    pub fn read_from<R: Read>(&self, mut reader: R) -> Result<Pattern> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .context("Failed to read pattern text")?;
        Ok(self.load(strip_bom(&text))?)
    }

    pub fn write_to<W: Write>(&self, pattern: &Pattern, mut writer: W) -> Result<()> {
        writer
            .write_all(self.save(pattern).as_bytes())
            .context("Failed to write pattern text")
    }
}

/// Parses `text` with the first format that accepts it.
///
/// Used for clipboard contents and other text without a file name.
pub fn load_str(text: &str) -> Result<(Pattern, PatternFormat), FormatError> {
    let text = strip_bom(text);
    PatternFormat::ALL
        .into_iter()
        .find_map(|format| format.load(text).ok().map(|pattern| (pattern, format)))
        .ok_or(FormatError::Unrecognized)
}

/// Serializes `pattern` for clipboard interchange (RLE).
pub fn save_str(pattern: &Pattern) -> String {
    PatternFormat::Rle.save(pattern)
}

/// Loads a pattern file, trying every format registered for its extension.
///
/// A trailing `.gz` marks gzip-compressed content; the extension before it
/// selects the format (`glider.rle.gz`).
///
/// # Errors
///
/// Returns an error if the file can't be read, its extension is unknown, or
/// no candidate format accepts the content (the last format's
/// [`FormatError`] is kept as the source).
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<(Pattern, PatternFormat)> {
    let path = path.as_ref();
    let (extension, compressed) = pattern_extension(path);

    let mut candidates = PatternFormat::ALL
        .into_iter()
        .filter(|format| format.matches_extension(&extension))
        .peekable();
    if candidates.peek().is_none() {
        return Err(anyhow!(
            "Unsupported pattern file extension: {}",
            path.display()
        ));
    }

    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let data = if compressed {
        let mut decoder = GzDecoder::new(&data[..]);
        let mut decompressed_data = Vec::new();
        decoder
            .read_to_end(&mut decompressed_data)
            .with_context(|| format!("Failed to decompress {}", path.display()))?;
        decompressed_data
    } else {
        data
    };
    let text = String::from_utf8(data)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
    let text = strip_bom(&text);

    let mut last_error = FormatError::Unrecognized;
    for format in candidates {
        match format.load(text) {
            Ok(pattern) => return Ok((pattern, format)),
            Err(err) => last_error = err,
        }
    }
    Err(anyhow::Error::new(last_error).context(format!("Failed to parse {}", path.display())))
}

/// Saves `pattern` to `path` in `format`, or in the first format registered
/// for the path's extension when `format` is `None`.
///
/// # Returns
///
/// The format that was written.
pub fn save_file<P: AsRef<Path>>(
    pattern: &Pattern,
    path: P,
    format: Option<PatternFormat>,
) -> Result<PatternFormat> {
    let path = path.as_ref();
    let (extension, compressed) = pattern_extension(path);
    let format = match format {
        Some(format) => format,
        None => PatternFormat::from_extension(&extension).ok_or_else(|| {
            anyhow!("Unsupported pattern file extension: {}", path.display())
        })?,
    };

    let text = format.save(pattern);
    let data = if compressed {
        let mut encoder = GzEncoder::new(text.as_bytes(), Compression::default());
        let mut compressed_data = Vec::new();
        encoder
            .read_to_end(&mut compressed_data)
            .context("Failed to compress pattern data")?;
        compressed_data
    } else {
        text.into_bytes()
    };
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(format)
}

/// Filter string for an "open" dialog: every format plus a catch-all entry.
pub fn open_filter() -> String {
    format!("{}|All Formats|*.*", save_filter())
}

/// Filter string for a "save" dialog.
pub fn save_filter() -> String {
    PatternFormat::ALL
        .iter()
        .map(|format| format.filter())
        .collect::<Vec<_>>()
        .join("|")
}

/// Extension suggested for new files.
pub fn default_extension() -> &'static str {
    PatternFormat::ALL[0].extensions()[0]
}

/// Maps a 1-based filter index of [`save_filter`] back to its format.
pub fn format_from_filter_index(index: usize) -> Option<PatternFormat> {
    index
        .checked_sub(1)
        .and_then(|i| PatternFormat::ALL.get(i).copied())
}

/// 1-based position of `format` in [`save_filter`].
pub fn filter_index(format: PatternFormat) -> usize {
    PatternFormat::ALL
        .iter()
        .position(|&f| f == format)
        .map_or(1, |i| i + 1)
}

/// Returns the format-selecting extension of `path` (lower case, no dot) and
/// whether the file is gzip-compressed.
fn pattern_extension(path: &Path) -> (String, bool) {
    let extension_of = |path: &Path| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase()
    };

    let extension = extension_of(path);
    if extension == "gz" {
        let inner = path.file_stem().map(Path::new).map(extension_of);
        (inner.unwrap_or_default(), true)
    } else {
        (extension, false)
    }
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Comment lines of the pattern description.
fn description_lines(pattern: &Pattern) -> impl Iterator<Item = &str> {
    pattern.description.as_deref().into_iter().flat_map(str::lines)
}

/// A metadata value fit for a one-line header; line breaks become spaces.
fn header_value(value: &Option<String>) -> Option<String> {
    let value = value.as_deref()?.lines().collect::<Vec<_>>().join(" ");
    (!value.trim().is_empty()).then_some(value)
}

/// Joins collected comment lines; `None` when there were none.
fn join_comments(comments: Vec<&str>) -> Option<String> {
    (!comments.is_empty()).then(|| comments.join("\n"))
}

/// Draws `cells` (sorted row-major) as rows of `dead`/`alive` characters,
/// starting at column `left` of row `top`. Every row ends with a newline and
/// rows without alive cells are written as a single `dead` character.
fn draw_rows(out: &mut String, cells: &[Coord], left: i32, top: i32, dead: char, alive: char) {
    let (mut x, mut y) = (left as i64, top as i64);
    for cell in cells {
        let (cx, cy) = (cell.x as i64, cell.y as i64);
        if cy != y {
            out.push('\n');
            for _ in y + 1..cy {
                out.push(dead);
                out.push('\n');
            }
            y = cy;
            x = left as i64;
        }
        for _ in x..cx {
            out.push(dead);
        }
        out.push(alive);
        x = cx + 1;
    }
    if !cells.is_empty() {
        out.push('\n');
    }
}
