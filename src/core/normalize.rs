//! Single port tokens (`1A`, `2.03`, `5`).

use crate::domain::model::{slot_number, CanonicalPort, Notation};
use crate::utils::error::{PortSpecError, Result};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static ALPHA_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)([A-Da-d])$").expect("alpha port pattern"));
static DECIMAL_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]+)$").expect("decimal port pattern"));
static BARE_BOARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("bare board pattern"));

/// Syntactic shape of one literal token, numbers already parsed but not yet
/// range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Alpha { board: u32, slot: u8 },
    Decimal { board: u32, slot: u8 },
    Bare { board: u32 },
}

impl Literal {
    /// Range-checks the literal. Bare boards default to slot A.
    pub(crate) fn into_port(self, token: &str) -> Result<CanonicalPort> {
        match self {
            Self::Alpha { board, slot } => {
                CanonicalPort::with_token(board, slot, Notation::Alpha, token)
            }
            Self::Decimal { board, slot } => {
                CanonicalPort::with_token(board, slot, Notation::Decimal, token)
            }
            Self::Bare { board } => CanonicalPort::with_token(board, 1, Notation::Alpha, token),
        }
    }
}

fn parse_board(digits: &str, token: &str) -> Result<u32> {
    digits
        .parse()
        .map_err(|_| PortSpecError::invalid_format(token, "board number is too large"))
}

/// Recognizes the three literal forms. Anything else is `InvalidFormat`.
pub(crate) fn classify(token: &str) -> Result<Literal> {
    let trimmed = token.trim();

    if let Some(caps) = DECIMAL_PORT.captures(trimmed) {
        let board = parse_board(&caps[1], token)?;
        // 超過 u8 的槽位一樣視為超出範圍
        let slot = caps[2].parse::<u8>().map_err(|_| {
            PortSpecError::invalid_format(token, format!("slot {} is outside 1..4", &caps[2]))
        })?;
        return Ok(Literal::Decimal { board, slot });
    }

    if let Some(caps) = ALPHA_PORT.captures(trimmed) {
        let board = parse_board(&caps[1], token)?;
        let letter = caps[2].chars().next().and_then(slot_number);
        return match letter {
            Some(slot) => Ok(Literal::Alpha { board, slot }),
            None => Err(PortSpecError::invalid_format(token, "unrecognized slot letter")),
        };
    }

    if BARE_BOARD.is_match(trimmed) {
        return Ok(Literal::Bare {
            board: parse_board(trimmed, token)?,
        });
    }

    Err(PortSpecError::invalid_format(token, "unrecognized port format"))
}

/// Canonicalizes one literal port token (never a range).
///
/// `2.3` becomes `2.03`, `1b` becomes `1B`, and a bare board such as `5`
/// defaults to slot A (`5A`).
pub fn normalize_port(token: &str) -> Result<CanonicalPort> {
    let port = classify(token)?.into_port(token)?;
    tracing::trace!(token, port = %port, "normalized port token");
    Ok(port)
}

impl FromStr for CanonicalPort {
    type Err = PortSpecError;

    fn from_str(s: &str) -> Result<Self> {
        normalize_port(s)
    }
}
