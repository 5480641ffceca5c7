//! Alpha (`1A`) <-> decimal (`1.01`) conversion and board/slot extraction.

use crate::core::normalize::{classify, Literal};
use crate::domain::model::{Notation, PortList};
use crate::utils::error::{PortSpecError, Result};

/// `1A` -> `1.01`. Decimal input is returned in canonical decimal form.
pub fn port_to_decimal(port: &str) -> Result<String> {
    match classify(port)? {
        literal @ (Literal::Alpha { .. } | Literal::Decimal { .. }) => {
            Ok(literal.into_port(port)?.to_decimal().to_string())
        }
        Literal::Bare { .. } => Err(PortSpecError::invalid_format(
            port,
            "cannot convert port to decimal format",
        )),
    }
}

/// `1.01` -> `1A`. Alpha input is returned upper-cased.
pub fn port_to_alpha(port: &str) -> Result<String> {
    match classify(port)? {
        literal @ (Literal::Alpha { .. } | Literal::Decimal { .. }) => {
            Ok(literal.into_port(port)?.to_alpha().to_string())
        }
        Literal::Bare { .. } => Err(PortSpecError::invalid_format(
            port,
            "cannot convert port to alpha format",
        )),
    }
}

/// Returns `(board, slot)` for alpha, decimal or bare-board input. A bare
/// board is slot 1.
///
/// IMEI writes address the device by these numbers, so out-of-range slots
/// (`1.05`, `1E`) are rejected rather than passed through.
pub fn extract_board_and_slot(port: &str) -> Result<(u32, u8)> {
    Ok(classify(port)?.into_port(port)?.board_and_slot())
}

/// Comma-joined payload for the device API in the requested notation.
///
/// `1A` and `1.01` are separate list entries, so a list holding both yields
/// the same port twice after conversion (`1A,1A`).
pub fn format_ports_for_api(ports: &PortList, notation: Notation) -> String {
    ports
        .iter()
        .map(|port| port.in_notation(notation).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Same as [`format_ports_for_api`] for raw port strings.
pub fn format_port_strs_for_api<S: AsRef<str>>(ports: &[S], notation: Notation) -> Result<String> {
    let converted = ports
        .iter()
        .map(|port| match notation {
            Notation::Alpha => port_to_alpha(port.as_ref()),
            Notation::Decimal => port_to_decimal(port.as_ref()),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(converted.join(","))
}
