//! Dice-notation expressions.
//!
//! Parses informal tabletop notation like "2d8 +3", "1d20", "2d6+1d4-1" into
//! an ordered list of terms that can be rolled against a [`Dice`] source.
//! A dice term is `[N]dM` ("d8" means "1d8"); a modifier term is a signed
//! integer. Terms may appear in any order, whitespace between them is
//! ignored, and terms may abut ("1d8+2d6-1"). A term may throw at most
//! [`MAX_DICE_COUNT`] dice of at most [`MAX_DIE_SIDES`] sides, which keeps
//! every accepted expression evaluable in `i32`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::{Dice, MAX_DICE_COUNT, MAX_DIE_SIDES};

/// Why a notation string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedExpression {
    #[error("empty dice expression")]
    Empty,
    #[error("unrecognized dice notation at '{at}'")]
    Unrecognized { at: String },
    #[error("dice count must be at least 1 in '{term}'")]
    ZeroCount { term: String },
    #[error("die sides must be at least 1 in '{term}'")]
    ZeroSides { term: String },
    #[error("dice cannot be subtracted in '{term}'")]
    SubtractedDice { term: String },
    #[error("bare number '{term}' needs a leading + or -")]
    UnsignedModifier { term: String },
    #[error("number out of range in '{term}'")]
    OutOfRange { term: String },
}

/// One term of a dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// `NdM`: N dice of M sides, rolled and summed.
    Dice { count: u32, sides: u32 },
    /// A flat adjustment added to the total.
    Modifier(i32),
}

/// A parsed dice expression. The term list is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceExpression {
    terms: Vec<Term>,
}

impl DiceExpression {
    /// Parse a notation string. Same as `str::parse`.
    pub fn parse(notation: &str) -> Result<Self, MalformedExpression> {
        notation.parse()
    }

    /// Expression with a single dice term, e.g. `dice(1, 8)` for "1d8".
    /// Skips the grammar checks, so crate callers pass literal in-range
    /// constants; notation from outside goes through [`Self::parse`].
    pub(crate) fn dice(count: u32, sides: u32) -> Self {
        Self {
            terms: vec![Term::Dice { count, sides }],
        }
    }

    /// The terms in notation order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Sum of the flat modifier terms.
    pub fn modifier_total(&self) -> i32 {
        self.terms
            .iter()
            .map(|t| match *t {
                Term::Modifier(m) => m,
                Term::Dice { .. } => 0,
            })
            .fold(0, i32::saturating_add)
    }

    /// First dice term, if the expression has one.
    pub fn leading_dice(&self) -> Option<(u32, u32)> {
        self.terms.iter().find_map(|t| match *t {
            Term::Dice { count, sides } => Some((count, sides)),
            Term::Modifier(_) => None,
        })
    }

    /// Minimum possible result (every die shows 1).
    pub fn min(&self) -> i32 {
        self.terms
            .iter()
            .map(|t| match *t {
                Term::Dice { count, .. } => count as i32,
                Term::Modifier(m) => m,
            })
            .fold(0, i32::saturating_add)
    }

    /// Maximum possible result (every die shows its sides).
    pub fn max(&self) -> i32 {
        self.terms
            .iter()
            .map(|t| match *t {
                // Capped at parse, so the product fits.
                Term::Dice { count, sides } => (count * sides) as i32,
                Term::Modifier(m) => m,
            })
            .fold(0, i32::saturating_add)
    }

    /// Roll every dice term once and sum with the modifiers.
    pub fn roll(&self, dice: &mut Dice) -> i32 {
        self.roll_scaled(dice, 1)
    }

    /// Roll with every dice term repeated `dice_factor` times over; flat
    /// modifiers are added once. Factor 2 is the critical-hit case.
    pub fn roll_scaled(&self, dice: &mut Dice, dice_factor: u32) -> i32 {
        let mut total = 0i32;
        for term in &self.terms {
            match *term {
                Term::Dice { count, sides } => {
                    for _ in 0..count * dice_factor {
                        total = total.saturating_add(dice.sample(sides) as i32);
                    }
                }
                Term::Modifier(m) => total = total.saturating_add(m),
            }
        }
        total
    }
}

/// Parse `notation` and roll it once. The primary one-shot entry point.
pub fn evaluate(dice: &mut Dice, notation: &str) -> Result<i32, MalformedExpression> {
    Ok(DiceExpression::parse(notation)?.roll(dice))
}

impl FromStr for DiceExpression {
    type Err = MalformedExpression;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            terms: parse_terms(s)?,
        })
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            match *term {
                Term::Dice { count, sides } => {
                    if i > 0 {
                        write!(f, "+")?;
                    }
                    write!(f, "{}d{}", count, sides)?;
                }
                Term::Modifier(m) => {
                    write!(f, "{:+}", m)?;
                }
            }
        }
        Ok(())
    }
}

// The JSON form of an expression is its notation text.
impl Serialize for DiceExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DiceExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_terms(notation: &str) -> Result<Vec<Term>, MalformedExpression> {
    let mut rest = notation.trim_start();
    if rest.is_empty() {
        return Err(MalformedExpression::Empty);
    }
    let mut terms = Vec::new();
    while !rest.is_empty() {
        let (term, tail) = scan_term(rest)?;
        terms.push(term);
        rest = tail.trim_start();
    }
    Ok(terms)
}

/// Split one term off the front of `rest`, which starts on a non-space char.
fn scan_term(rest: &str) -> Result<(Term, &str), MalformedExpression> {
    let bytes = rest.as_bytes();
    let mut pos = 0;

    let sign = match bytes.first() {
        Some(b'+') => {
            pos += 1;
            Some(1)
        }
        Some(b'-') => {
            pos += 1;
            Some(-1)
        }
        _ => None,
    };
    // "2d8 + 3": whitespace may follow the sign.
    while bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
        pos += 1;
    }

    let digits_start = pos;
    while bytes.get(pos).is_some_and(|b| b.is_ascii_digit()) {
        pos += 1;
    }
    let count_digits = &rest[digits_start..pos];

    if bytes.get(pos).is_some_and(|b| *b == b'd' || *b == b'D') {
        pos += 1;
        let sides_start = pos;
        while bytes.get(pos).is_some_and(|b| b.is_ascii_digit()) {
            pos += 1;
        }
        let sides_digits = &rest[sides_start..pos];
        if sides_digits.is_empty() {
            return Err(MalformedExpression::Unrecognized { at: excerpt(rest) });
        }
        let term = &rest[..pos];
        if sign == Some(-1) {
            return Err(MalformedExpression::SubtractedDice {
                term: term.to_string(),
            });
        }
        let count: u32 = if count_digits.is_empty() {
            1
        } else {
            count_digits
                .parse()
                .map_err(|_| MalformedExpression::OutOfRange {
                    term: term.to_string(),
                })?
        };
        let sides: u32 = sides_digits
            .parse()
            .map_err(|_| MalformedExpression::OutOfRange {
                term: term.to_string(),
            })?;
        if count == 0 {
            return Err(MalformedExpression::ZeroCount {
                term: term.to_string(),
            });
        }
        if sides == 0 {
            return Err(MalformedExpression::ZeroSides {
                term: term.to_string(),
            });
        }
        if count > MAX_DICE_COUNT || sides > MAX_DIE_SIDES {
            return Err(MalformedExpression::OutOfRange {
                term: term.to_string(),
            });
        }
        Ok((Term::Dice { count, sides }, &rest[pos..]))
    } else if !count_digits.is_empty() {
        let term = &rest[..pos];
        let Some(sign) = sign else {
            return Err(MalformedExpression::UnsignedModifier {
                term: term.to_string(),
            });
        };
        let value: i32 = count_digits
            .parse()
            .map_err(|_| MalformedExpression::OutOfRange {
                term: term.to_string(),
            })?;
        Ok((Term::Modifier(sign * value), &rest[pos..]))
    } else {
        Err(MalformedExpression::Unrecognized { at: excerpt(rest) })
    }
}

fn excerpt(rest: &str) -> String {
    rest.chars().take(12).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dice_builder_matches_parsed_notation() {
        assert_eq!(DiceExpression::dice(2, 8), "2d8".parse().unwrap());
        assert_eq!(DiceExpression::dice(1, 4), "1d4".parse().unwrap());
    }
}
