//! Parsing DX check commands.
//!
//! Two notations are accepted, case-insensitively:
//!
//! - `10DX+5@8>=15`: modifier before an `@`-prefixed critical value
//! - `5DX7+7-3>=10`: critical value directly after `DX`, then the modifier
//!
//! The critical value defaults to 10 and the modifier to 0. Modifiers are
//! `+`/`-`/`*` chains where `*` binds tighter. Pools are capped at
//! [`MAX_DICE_COUNT`] dice.

use dx_mechanics::CheckRequest;
use thiserror::Error;

/// Critical value used when the command omits one.
pub const DEFAULT_CRITICAL: i32 = 10;

/// Largest initial pool a command may ask for.
pub const MAX_DICE_COUNT: i32 = 10_000;

/// Errors produced while parsing a check command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing to parse.
    #[error("empty command")]
    Empty,
    /// The command has no `DX` separator.
    #[error("expected a command like 10DX+5@8, got '{0}'")]
    MissingDx(String),
    /// A dice count, critical value or target is not a number.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    /// The modifier is not a `+`/`-`/`*` chain of numbers.
    #[error("invalid modifier '{0}'")]
    InvalidModifier(String),
    /// The initial pool is larger than [`MAX_DICE_COUNT`].
    #[error("too many dice: {0}, at most {MAX_DICE_COUNT}")]
    TooManyDice(i32),
}

/// Parse a command such as `10DX+5@8>=15` into a check request.
pub fn parse_check(input: &str) -> Result<CheckRequest, ParseError> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let (count, rest) = input
        .split_once("dx")
        .ok_or_else(|| ParseError::MissingDx(input.clone()))?;
    let dice_count = parse_number(count)?;
    if dice_count > MAX_DICE_COUNT {
        return Err(ParseError::TooManyDice(dice_count));
    }

    let (body, target_value) = match rest.split_once(">=") {
        Some((body, target)) => (body, Some(parse_number(target)?)),
        None => (rest, None),
    };

    let (critical_threshold, modifier) = match body.split_once('@') {
        Some((modifier, critical)) => (parse_number(critical)?, parse_optional_modifier(modifier)?),
        None => {
            let digits = body
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(body.len());
            let critical = match &body[..digits] {
                "" => DEFAULT_CRITICAL,
                text => parse_number(text)?,
            };
            (critical, parse_optional_modifier(&body[digits..])?)
        }
    };

    Ok(CheckRequest {
        dice_count,
        critical_threshold,
        modifier,
        target_value,
    })
}

fn parse_number(text: &str) -> Result<i32, ParseError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidNumber(text.to_string()));
    }
    text.parse()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}

fn parse_optional_modifier(text: &str) -> Result<i32, ParseError> {
    if text.is_empty() {
        Ok(0)
    } else {
        eval_modifier(text)
    }
}

/// Evaluate a modifier chain like `+2*3-1`.
///
/// The chain must open with `+` or `-`. Overflow is reported as an invalid
/// modifier.
pub fn eval_modifier(text: &str) -> Result<i32, ParseError> {
    let invalid = || ParseError::InvalidModifier(text.to_string());

    let mut total: i32 = 0;
    let mut term: Option<i32> = None;
    let mut rest = text;

    while let Some(op) = rest.chars().next() {
        rest = &rest[op.len_utf8()..];
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return Err(invalid());
        }
        let value: i32 = rest[..digits].parse().map_err(|_| invalid())?;
        rest = &rest[digits..];

        term = Some(match op {
            '+' | '-' => {
                if let Some(prev) = term {
                    total = total.checked_add(prev).ok_or_else(invalid)?;
                }
                if op == '-' { -value } else { value }
            }
            '*' => term.ok_or_else(invalid)?.checked_mul(value).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        });
    }

    total.checked_add(term.unwrap_or(0)).ok_or_else(invalid)
}
