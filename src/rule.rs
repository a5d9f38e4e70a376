use crate::{FormatError, RuleError};
use std::fmt;
use std::str::FromStr;

/// Bits `0..=8` of a neighbour-count mask.
const COUNT_MASK: u16 = 0x1ff;

const fn mask(digits: &[u8]) -> u16 {
    let mut result = 0;
    let mut i = 0;
    while i < digits.len() {
        result |= 1 << digits[i];
        i += 1;
    }
    result & COUNT_MASK
}

/// Text templates a [`Rule`] can be rendered with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RuleFormat {
    /// `B{birth}/S{survival}`, e.g. `B3/S23`. The `/S` part is dropped when
    /// the survival set is empty (`B2` for Seeds).
    #[default]
    BirthSurvival,
    /// The historical `{survival}/{birth}` form without letters, e.g. `23/3`.
    SurvivalBirth,
}

/// Birth/survival rule of a Life-like cellular automaton.
///
/// Both sets hold neighbour counts `0..=8` and are stored as bit masks, so
/// every count appears at most once and iteration is always ascending.
/// Two rules are equal iff their canonical `B/S` strings are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    birth: u16,
    survival: u16,
}

impl Rule {
    /// Nothing is ever born and nothing survives.
    pub const EMPTY: Rule = Rule::from_masks(0, 0);
    /// Conway's Game of Life, B3/S23.
    pub const STANDARD_LIFE: Rule = Rule::from_masks(mask(&[3]), mask(&[2, 3]));
    /// B36/S23, known for its replicator.
    pub const HIGH_LIFE: Rule = Rule::from_masks(mask(&[3, 6]), mask(&[2, 3]));
    /// B2/S, every live cell dies each generation.
    pub const SEEDS: Rule = Rule::from_masks(mask(&[2]), 0);

    const fn from_masks(birth: u16, survival: u16) -> Self {
        Self {
            birth: birth & COUNT_MASK,
            survival: survival & COUNT_MASK,
        }
    }

    /// Builds a rule from explicit neighbour counts.
    ///
    /// Duplicates are ignored and the order of `birth` and `survival` does
    /// not matter. Fails if any count is greater than 8.
    pub fn new(birth: &[u8], survival: &[u8]) -> Result<Self, RuleError> {
        fn to_mask(digits: &[u8]) -> Result<u16, RuleError> {
            digits.iter().try_fold(0u16, |acc, &d| {
                if d > 8 {
                    Err(RuleError::DigitOutOfRange(d))
                } else {
                    Ok(acc | 1 << d)
                }
            })
        }

        Ok(Self::from_masks(to_mask(birth)?, to_mask(survival)?))
    }

    /// Parses rule text such as `B3/S23`, `b36/s23`, `S23/B3`, `23/3` or `B2`.
    ///
    /// Two bare digit groups are read in the historical `survival/birth`
    /// order. A single group without a separator is a birth set and leaves
    /// the survival set empty.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidRule(text.to_string());

        let upper = text.trim().to_uppercase();
        let s = upper.strip_suffix('/').unwrap_or(upper.as_str());
        if s.is_empty() {
            return Err(invalid());
        }

        let parts: Vec<&str> = s.split('/').collect();
        let (birth, survival) = match parts.as_slice() {
            [birth] => (birth.strip_prefix('B').unwrap_or(*birth), ""),
            [first, second] => {
                let (mut b, mut s) = (first.trim_end(), second.trim_start());
                if (b.starts_with('S') && s.starts_with('B'))
                    || (!b.starts_with('B') && !s.starts_with('S'))
                {
                    std::mem::swap(&mut b, &mut s);
                }
                if b.is_empty() {
                    return Err(invalid());
                }
                (
                    b.strip_prefix('B').unwrap_or(b),
                    s.strip_prefix('S').unwrap_or(s),
                )
            }
            _ => return Err(invalid()),
        };

        let parse_digits = |part: &str| {
            part.chars().try_fold(0u16, |acc, c| match c.to_digit(10) {
                Some(d) if d <= 8 => Ok(acc | 1 << d),
                _ => Err(invalid()),
            })
        };
        Ok(Self::from_masks(
            parse_digits(birth)?,
            parse_digits(survival)?,
        ))
    }

    /// Like [`Rule::parse`] but discards the error.
    pub fn try_parse(text: &str) -> Option<Self> {
        Self::parse(text).ok()
    }

    /// Looks a rule up in [`NAMED_RULES`], ignoring case.
    pub fn named(name: &str) -> Option<Self> {
        NAMED_RULES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, rule)| rule)
    }

    /// Birth counts in ascending order.
    pub fn birth(&self) -> impl Iterator<Item = u8> {
        Self::iter_mask(self.birth)
    }

    /// Survival counts in ascending order.
    pub fn survival(&self) -> impl Iterator<Item = u8> {
        Self::iter_mask(self.survival)
    }

    #[inline]
    pub fn is_birth(&self, neighbors: u8) -> bool {
        neighbors <= 8 && self.birth & (1 << neighbors) != 0
    }

    #[inline]
    pub fn is_survival(&self, neighbors: u8) -> bool {
        neighbors <= 8 && self.survival & (1 << neighbors) != 0
    }

    pub fn format(&self, format: RuleFormat) -> String {
        let birth = Self::digits(self.birth);
        let survival = Self::digits(self.survival);
        match format {
            RuleFormat::BirthSurvival if survival.is_empty() => format!("B{birth}"),
            RuleFormat::BirthSurvival => format!("B{birth}/S{survival}"),
            RuleFormat::SurvivalBirth => format!("{survival}/{birth}"),
        }
    }

    fn iter_mask(mask: u16) -> impl Iterator<Item = u8> {
        (0u8..=8).filter(move |&n| mask & (1 << n) != 0)
    }

    fn digits(mask: u16) -> String {
        Self::iter_mask(mask).map(|d| char::from(b'0' + d)).collect()
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::STANDARD_LIFE
    }
}

impl FromStr for Rule {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(RuleFormat::BirthSurvival))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({self})")
    }
}

/// Well-known Life-like rules.
pub static NAMED_RULES: [(&str, Rule); 20] = [
    ("Replicator", Rule::from_masks(mask(&[1, 3, 5, 7]), mask(&[1, 3, 5, 7]))),
    ("Seeds", Rule::SEEDS),
    ("Persian Rug", Rule::from_masks(mask(&[2, 3, 4]), 0)),
    (
        "Life Without Death",
        Rule::from_masks(mask(&[3]), mask(&[0, 1, 2, 3, 4, 5, 6, 7, 8])),
    ),
    ("Maze", Rule::from_masks(mask(&[3]), mask(&[1, 2, 3, 4, 5]))),
    ("Standard Life", Rule::STANDARD_LIFE),
    ("Coral", Rule::from_masks(mask(&[3]), mask(&[4, 5, 6, 7, 8]))),
    ("34 Life", Rule::from_masks(mask(&[3, 4]), mask(&[3, 4]))),
    ("Assimilation", Rule::from_masks(mask(&[3, 4, 5]), mask(&[4, 5, 6, 7]))),
    ("Long Life", Rule::from_masks(mask(&[3, 4, 5]), mask(&[5]))),
    ("Diamoeba", Rule::from_masks(mask(&[3, 5, 6, 7, 8]), mask(&[5, 6, 7, 8]))),
    ("Amoeba", Rule::from_masks(mask(&[3, 5, 7]), mask(&[1, 3, 5, 8]))),
    ("Pseudo Life", Rule::from_masks(mask(&[3, 5, 7]), mask(&[2, 3, 8]))),
    ("2x2", Rule::from_masks(mask(&[3, 6]), mask(&[1, 2, 5]))),
    ("HighLife", Rule::HIGH_LIFE),
    ("Stains", Rule::from_masks(mask(&[3, 6, 7, 8]), mask(&[2, 3, 5, 6, 7, 8]))),
    ("Day & Night", Rule::from_masks(mask(&[3, 6, 7, 8]), mask(&[3, 4, 6, 7, 8]))),
    ("Move", Rule::from_masks(mask(&[3, 6, 8]), mask(&[2, 4, 5]))),
    ("Coagulations", Rule::from_masks(mask(&[3, 7, 8]), mask(&[2, 3, 5, 6, 7, 8]))),
    ("Walled Cities", Rule::from_masks(mask(&[4, 5, 6, 7, 8]), mask(&[2, 3, 4, 5]))),
];
