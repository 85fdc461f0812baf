//! SVG path data
//!
//! Icon glyphs morph by handing the engine a target path. Two paths can be
//! interpolated when they share the same command structure; the numbers are
//! blended pairwise. Otherwise the engine snaps to the target.
//!
//! Supported commands: `M L H V C S Q T A Z` in absolute and relative form.
//! Implicit repetition is expanded, so `M0 0 10 10` becomes `M0 0 L10 10`.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{PathError, Result};

/// One path command with its arguments
#[derive(Clone, Debug, PartialEq)]
pub struct PathSegment {
    pub command: char,
    pub args: SmallVec<[f32; 7]>,
}

/// Parsed SVG path data
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PathData {
    segments: Vec<PathSegment>,
}

fn arity(command: char) -> Option<usize> {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => Some(2),
        'H' | 'V' => Some(1),
        'C' => Some(6),
        'S' | 'Q' => Some(4),
        'A' => Some(7),
        'Z' => Some(0),
        _ => None,
    }
}

enum Token {
    Command(char),
    Number(f32),
}

fn tokenize(src: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let bytes = src.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i] as char;
        if ch.is_ascii_whitespace() || ch == ',' {
            i += 1;
        } else if arity(ch).is_some() {
            tokens.push(Token::Command(ch));
            i += 1;
        } else if ch.is_ascii_digit() || ch == '-' || ch == '+' || ch == '.' {
            let start = i;
            let mut seen_dot = ch == '.';
            let mut seen_exp = false;
            i += 1;
            while i < bytes.len() {
                let c = bytes[i] as char;
                if c.is_ascii_digit() {
                    i += 1;
                } else if c == '.' && !seen_dot && !seen_exp {
                    seen_dot = true;
                    i += 1;
                } else if (c == 'e' || c == 'E') && !seen_exp {
                    seen_exp = true;
                    i += 1;
                    if i < bytes.len() && (bytes[i] == b'-' || bytes[i] == b'+') {
                        i += 1;
                    }
                } else {
                    break;
                }
            }
            let text = &src[start..i];
            let value = text
                .parse::<f32>()
                .map_err(|_| PathError::InvalidNumber(text.to_string()))?;
            tokens.push(Token::Number(value));
        } else {
            return Err(PathError::UnexpectedChar { ch, offset: i });
        }
    }

    Ok(tokens)
}

impl PathData {
    /// Parse an SVG `d` attribute
    pub fn parse(src: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut current: Option<char> = None;
        let mut args: Vec<f32> = Vec::new();

        let mut flush = |command: Option<char>, args: &mut Vec<f32>| -> Result<()> {
            let Some(command) = command else {
                return if args.is_empty() {
                    Ok(())
                } else {
                    Err(PathError::MissingCommand)
                };
            };
            let n = arity(command).unwrap_or(0);

            if n == 0 {
                if !args.is_empty() {
                    return Err(PathError::ArgumentCount {
                        command,
                        expected: 0,
                        found: args.len(),
                    });
                }
                segments.push(PathSegment {
                    command,
                    args: SmallVec::new(),
                });
                return Ok(());
            }

            if args.is_empty() || args.len() % n != 0 {
                return Err(PathError::ArgumentCount {
                    command,
                    expected: n,
                    found: args.len(),
                });
            }

            for (i, chunk) in args.chunks(n).enumerate() {
                // Extra pairs after a moveto are implicit linetos
                let command = match (i, command) {
                    (0, c) => c,
                    (_, 'M') => 'L',
                    (_, 'm') => 'l',
                    (_, c) => c,
                };
                segments.push(PathSegment {
                    command,
                    args: SmallVec::from_slice(chunk),
                });
            }
            args.clear();
            Ok(())
        };

        for token in tokenize(src)? {
            match token {
                Token::Command(c) => {
                    flush(current, &mut args)?;
                    current = Some(c);
                }
                Token::Number(v) => args.push(v),
            }
        }
        flush(current, &mut args)?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether two paths can be blended number by number
    pub fn is_compatible(&self, other: &PathData) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.command == b.command && a.args.len() == b.args.len())
    }

    /// Blend toward `other`
    ///
    /// Arc flags are not numbers and switch halfway. Incompatible paths snap to
    /// `other` as soon as progress leaves zero.
    pub fn lerp(&self, other: &PathData, t: f32) -> PathData {
        if !self.is_compatible(other) {
            return if t <= 0.0 { self.clone() } else { other.clone() };
        }

        let segments = self
            .segments
            .iter()
            .zip(&other.segments)
            .map(|(a, b)| {
                let is_arc = a.command.eq_ignore_ascii_case(&'A');
                let args = a
                    .args
                    .iter()
                    .zip(&b.args)
                    .enumerate()
                    .map(|(i, (&x, &y))| {
                        if is_arc && (i == 3 || i == 4) {
                            if t < 0.5 {
                                x
                            } else {
                                y
                            }
                        } else {
                            x + (y - x) * t
                        }
                    })
                    .collect();
                PathSegment {
                    command: a.command,
                    args,
                }
            })
            .collect();

        PathData { segments }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", segment.command)?;
            for (j, arg) in segment.args.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                // Trim float noise so round-tripped glyphs stay readable
                let rounded = (arg * 1000.0).round() / 1000.0;
                write!(f, "{}", rounded)?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for PathData {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        PathData::parse(s)
    }
}

impl From<PathData> for String {
    fn from(path: PathData) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for PathData {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self> {
        PathData::parse(&value)
    }
}
