use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::error::{MotionError, MotionResult};

/// A command letter followed by two signed, optionally fractional, numbers.
static TWO_ARG_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z])\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)")
        .unwrap_or_else(|e| panic!("invalid two-argument command regex: {e}"))
});

/// One drawing instruction with exactly two numeric arguments.
///
/// Values are immutable; "changing" a command means building a new one.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathCommand {
    pub kind: char,
    pub x: f64,
    pub y: f64,
}

impl PathCommand {
    pub fn new(kind: char, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    pub fn at(kind: char, p: kurbo::Point) -> Self {
        Self::new(kind, p.x, p.y)
    }

    pub fn point(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

/// Ordered sequence of commands; order is draw order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PathPattern {
    commands: Vec<PathCommand>,
}

impl PathPattern {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PathCommand> {
        self.commands.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathCommand> {
        self.commands.iter()
    }

    pub fn as_slice(&self) -> &[PathCommand] {
        &self.commands
    }

    /// True when both patterns have the same length and the same kind at every index.
    pub fn is_aligned_with(&self, other: &PathPattern) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.kind == b.kind)
    }
}

impl FromIterator<PathCommand> for PathPattern {
    fn from_iter<I: IntoIterator<Item = PathCommand>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PathPattern {
    type Item = &'a PathCommand;
    type IntoIter = std::slice::Iter<'a, PathCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl From<Vec<PathCommand>> for PathPattern {
    fn from(commands: Vec<PathCommand>) -> Self {
        Self::new(commands)
    }
}

/// Outcome of scanning a raw path string.
///
/// `pattern` holds every recognized command; `unrecognized` holds the non-blank text between
/// matches that was skipped (other arities, stray tokens). Blank input gives an empty pattern
/// with nothing unrecognized.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseResult {
    pub pattern: PathPattern,
    pub unrecognized: Vec<String>,
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Every non-blank character of the input belonged to a recognized command.
    pub fn is_complete(&self) -> bool {
        self.unrecognized.is_empty()
    }

    pub fn into_pattern(self) -> PathPattern {
        self.pattern
    }

    /// Treat a parse-miss as an error instead of an empty pattern.
    pub fn require_commands(self) -> MotionResult<PathPattern> {
        if self.pattern.is_empty() {
            return Err(if self.unrecognized.is_empty() {
                MotionError::parse("path contains no commands")
            } else {
                MotionError::parse(format!(
                    "path contains no two-argument commands (skipped: {:?})",
                    self.unrecognized
                ))
            });
        }
        Ok(self.pattern)
    }
}

/// Converts between raw path strings and [`PathPattern`]s.
pub struct PathCodec;

impl PathCodec {
    /// Scan `raw` for two-argument commands.
    ///
    /// Coordinates are truncated toward zero. Text that does not match, including commands whose
    /// numbers overflow `f64`, is skipped and reported in [`ParseResult::unrecognized`]; it is
    /// never an error.
    pub fn parse(raw: &str) -> ParseResult {
        let mut commands = Vec::new();
        let mut unrecognized = Vec::new();
        let mut cursor = 0usize;

        for caps in TWO_ARG_COMMAND.captures_iter(raw) {
            let (Some(whole), Some(kind), Some(x), Some(y)) =
                (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };

            push_gap(&mut unrecognized, &raw[cursor..whole.start()]);
            cursor = whole.end();

            match (
                kind.as_str().chars().next(),
                parse_coord(x.as_str()),
                parse_coord(y.as_str()),
            ) {
                (Some(kind), Some(x), Some(y)) => commands.push(PathCommand::new(kind, x, y)),
                _ => push_gap(&mut unrecognized, whole.as_str()),
            }
        }
        push_gap(&mut unrecognized, &raw[cursor..]);

        ParseResult {
            pattern: PathPattern::new(commands),
            unrecognized,
        }
    }

    /// Render as concatenated `" <kind> <x> <y>"` segments, leading space included.
    pub fn stringify(pattern: &PathPattern) -> String {
        let mut out = String::with_capacity(pattern.len() * 12);
        for cmd in pattern {
            out.push(' ');
            out.push(cmd.kind);
            out.push(' ');
            out.push_str(&format_coord(cmd.x));
            out.push(' ');
            out.push_str(&format_coord(cmd.y));
        }
        out
    }
}

fn push_gap(out: &mut Vec<String>, gap: &str) {
    let gap = gap.trim();
    if !gap.is_empty() {
        out.push(gap.to_string());
    }
}

fn parse_coord(token: &str) -> Option<f64> {
    let v = token.parse::<f64>().ok().filter(|v| v.is_finite())?.trunc();
    // -0 and 0 render the same.
    Some(v + 0.0)
}

fn format_coord(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

#[cfg(test)]
#[path = "../../tests/unit/path/codec.rs"]
mod tests;
