//! `A-B` range tokens.
//!
//! Decimal ranges (`2.01-2.04`) stay on one board and walk the slot number.
//! Alpha ranges (`1C-3B`) may span boards: the first board runs from the
//! start slot to D, boards in between contribute A..D, and the last board
//! runs from A to the end slot. Two bare boards (`1-4`) give slot A of each
//! board.

use crate::core::normalize::{classify, Literal};
use crate::domain::model::{CanonicalPort, Notation, PortRangeSpec, MAX_SLOT};
use crate::utils::error::{PortSpecError, Result};

/// Upper bound on boards covered by a single range token.
pub const MAX_RANGE_BOARDS: u32 = 1024;

/// Expands one range token in device addressing order.
pub fn expand_range(token: &str) -> Result<Vec<CanonicalPort>> {
    let range = PortRangeSpec::split(token)
        .ok_or_else(|| PortSpecError::invalid_format(token, "expected '<start>-<end>'"))?;

    let ports = if range.is_decimal() {
        expand_decimal(token, &range)?
    } else {
        expand_alpha(token, &range)?
    };

    tracing::debug!(token, count = ports.len(), "expanded port range");
    Ok(ports)
}

fn expand_decimal(token: &str, range: &PortRangeSpec<'_>) -> Result<Vec<CanonicalPort>> {
    let (start, end) = match (classify(range.start), classify(range.end)) {
        (
            Ok(Literal::Decimal { board: b1, slot: s1 }),
            Ok(Literal::Decimal { board: b2, slot: s2 }),
        ) => ((b1, s1), (b2, s2)),
        _ => {
            return Err(PortSpecError::invalid_format(
                token,
                "decimal range needs '<board>.<slot>' on both sides",
            ))
        }
    };

    if start.0 != end.0 {
        return Err(PortSpecError::invalid_format(
            token,
            "decimal range must stay within one board",
        ));
    }

    // 先檢查端點，避免 2.01-2.09 這類超出槽位的範圍
    CanonicalPort::with_token(start.0, start.1, Notation::Decimal, token)?;
    CanonicalPort::with_token(end.0, end.1, Notation::Decimal, token)?;

    if start.1 > end.1 {
        return Err(PortSpecError::invalid_format(
            token,
            "start slot must not be after end slot",
        ));
    }

    (start.1..=end.1)
        .map(|slot| CanonicalPort::with_token(start.0, slot, Notation::Decimal, token))
        .collect()
}

fn expand_alpha(token: &str, range: &PortRangeSpec<'_>) -> Result<Vec<CanonicalPort>> {
    let (start, end) = match (classify(range.start), classify(range.end)) {
        (Ok(Literal::Bare { board: first }), Ok(Literal::Bare { board: last })) => {
            check_span(token, first, last)?;
            return (first..=last)
                .map(|board| CanonicalPort::with_token(board, 1, Notation::Alpha, token))
                .collect();
        }
        (Ok(start @ Literal::Alpha { .. }), Ok(end @ Literal::Alpha { .. })) => {
            (start.into_port(token)?, end.into_port(token)?)
        }
        _ => {
            return Err(PortSpecError::invalid_format(
                token,
                "alpha range needs '<board><A-D>' or a bare board on both sides",
            ))
        }
    };

    if start.board_and_slot() > end.board_and_slot() {
        return Err(PortSpecError::invalid_format(
            token,
            "range start must not be after range end",
        ));
    }
    check_span(token, start.board(), end.board())?;

    let mut ports = Vec::new();
    for board in start.board()..=end.board() {
        let first_slot = if board == start.board() { start.slot() } else { 1 };
        let last_slot = if board == end.board() { end.slot() } else { MAX_SLOT };
        for slot in first_slot..=last_slot {
            ports.push(CanonicalPort::with_token(board, slot, Notation::Alpha, token)?);
        }
    }
    Ok(ports)
}

fn check_span(token: &str, first: u32, last: u32) -> Result<()> {
    if first > last {
        return Err(PortSpecError::invalid_format(
            token,
            "range start must not be after range end",
        ));
    }
    if last - first >= MAX_RANGE_BOARDS {
        return Err(PortSpecError::invalid_format(
            token,
            format!("range covers more than {} boards", MAX_RANGE_BOARDS),
        ));
    }
    Ok(())
}
