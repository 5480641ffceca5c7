//! IMEI batch planning: pairing ports with IMEIs, importing change files and
//! writing change templates.

use crate::core::convert::extract_board_and_slot;
use crate::core::csv_loader::{expand_imeis_if_csv, record_line};
use crate::domain::model::{ImeiChange, ImeiList, PortList, MAX_SLOT};
use crate::utils::error::{PortSpecError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Boards above this number are flagged as suspicious.
pub const MAX_EXPECTED_BOARD: u32 = 64;

const TEMPLATE_IMEI: &str = "123456789012345";

/// Splits a comma-separated IMEI flag value, dropping empty pieces.
pub fn split_imei_list(spec: &str) -> ImeiList {
    spec.split(',')
        .map(str::trim)
        .filter(|imei| !imei.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>()
        .into()
}

/// Reads IMEIs from a CSV reference or a literal comma-separated list.
pub fn expand_imeis(spec: &str) -> Result<ImeiList> {
    if let Some(imeis) = expand_imeis_if_csv(spec)? {
        return Ok(imeis);
    }

    let imeis = split_imei_list(spec);
    if imeis.is_empty() {
        return Err(PortSpecError::invalid_format(spec, "no IMEIs found"));
    }
    Ok(imeis)
}

/// Pairs ports and IMEIs by position. Both lists must have the same length.
pub fn plan_imei_changes(ports: &PortList, imeis: &ImeiList) -> Result<Vec<ImeiChange>> {
    if ports.len() != imeis.len() {
        return Err(PortSpecError::ImeiCountMismatch {
            ports: ports.len(),
            imeis: imeis.len(),
        });
    }

    let changes: Vec<ImeiChange> = ports
        .iter()
        .zip(imeis.iter())
        .map(|(port, imei)| {
            let (board, slot) = extract_board_and_slot(&port.to_string())?;
            Ok(ImeiChange {
                board,
                slot,
                imei: imei.clone(),
            })
        })
        .collect::<Result<_>>()?;

    tracing::debug!(changes = changes.len(), "planned IMEI changes");
    Ok(changes)
}

/// Non-fatal findings about a change batch, one message per finding.
pub fn validate_imei_changes(changes: &[ImeiChange]) -> Vec<String> {
    let mut warnings = Vec::new();

    let mut seen = HashSet::new();
    for change in changes {
        if !seen.insert((change.board, change.slot)) {
            warnings.push(format!("Duplicate port/slot: {}", change.port_label()));
        }
    }

    for change in changes {
        if !change.imei.chars().all(|c| c.is_ascii_digit()) {
            warnings.push(format!(
                "Port {}: IMEI contains non-digit characters",
                change.board
            ));
        } else if change.imei.chars().collect::<HashSet<_>>().len() == 1 {
            warnings.push(format!(
                "Port {}: IMEI appears to be a test pattern (all same digits)",
                change.board
            ));
        }
    }

    for change in changes {
        if change.board > MAX_EXPECTED_BOARD {
            warnings.push(format!(
                "Port {} is unusually high (max typically {})",
                change.board, MAX_EXPECTED_BOARD
            ));
        }
        if change.slot > MAX_SLOT {
            warnings.push(format!(
                "Port {}: Slot {} is unusually high (max typically {})",
                change.board, change.slot, MAX_SLOT
            ));
        }
    }

    warnings
}

/// Port reference in an import file: a board number or a port string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortRef {
    Board(u32),
    Label(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImeiValue {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
struct ImeiChangeRecord {
    port: PortRef,
    slot: Option<u8>,
    imei: ImeiValue,
}

/// Resolves board/slot for one imported row. An explicit slot wins over the
/// slot carried by the port string; neither means slot 1.
fn resolve_change(port: &str, slot: Option<u8>, imei: String) -> Result<ImeiChange> {
    let (board, port_slot) = extract_board_and_slot(port)?;
    let slot = slot.unwrap_or(port_slot);
    if !(1..=MAX_SLOT).contains(&slot) {
        return Err(PortSpecError::invalid_format(
            port,
            format!("slot {} is outside 1..{}", slot, MAX_SLOT),
        ));
    }
    Ok(ImeiChange { board, slot, imei })
}

fn import_from_json(path: &Path) -> Result<Vec<ImeiChange>> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<ImeiChangeRecord> = serde_json::from_str(&content)?;

    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let port = match record.port {
                PortRef::Board(board) => board.to_string(),
                PortRef::Label(label) => label,
            };
            let imei = match record.imei {
                ImeiValue::Text(text) => text,
                ImeiValue::Number(number) => number.to_string(),
            };
            resolve_change(&port, record.slot, imei).map_err(|e| {
                PortSpecError::csv_format(
                    path.display().to_string(),
                    format!("invalid data in item {}: {}", idx, e),
                )
            })
        })
        .collect()
}

fn import_from_csv(path: &Path) -> Result<Vec<ImeiChange>> {
    let file = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let (Some(port_idx), Some(imei_idx)) = (column("port"), column("imei")) else {
        let missing: Vec<&str> = ["port", "imei"]
            .into_iter()
            .filter(|name| column(name).is_none())
            .collect();
        return Err(PortSpecError::csv_format(
            &file,
            format!("missing required CSV columns: {}", missing.join(", ")),
        ));
    };
    let slot_idx = column("slot");

    let mut changes = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record_line(&record);
        let row_error = |detail: String| {
            PortSpecError::csv_format(&file, format!("invalid data in row {}: {}", line, detail))
        };

        let port = record.get(port_idx).unwrap_or_default();
        let imei = record.get(imei_idx).unwrap_or_default();
        if port.is_empty() && imei.is_empty() {
            continue;
        }
        if imei.is_empty() {
            return Err(row_error("missing IMEI".to_string()));
        }

        let slot = match slot_idx.and_then(|i| record.get(i)).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<u8>()
                    .map_err(|_| row_error(format!("invalid slot '{}'", raw)))?,
            ),
            None => None,
        };

        let change =
            resolve_change(port, slot, imei.to_string()).map_err(|e| row_error(e.to_string()))?;
        changes.push(change);
    }
    Ok(changes)
}

/// Imports an IMEI change batch. `.json` files hold an array of
/// `{"port": .., "slot": .., "imei": ..}` objects; anything else is read as
/// CSV with `port` and `imei` columns and an optional `slot` column.
pub fn import_imei_changes(path: &Path) -> Result<Vec<ImeiChange>> {
    if !path.exists() {
        return Err(PortSpecError::CsvFileNotFound {
            path: path.display().to_string(),
        });
    }

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let changes = if is_json {
        import_from_json(path)?
    } else {
        import_from_csv(path)?
    };

    if changes.is_empty() {
        return Err(PortSpecError::csv_format(
            path.display().to_string(),
            "no valid IMEI changes found in file",
        ));
    }

    tracing::info!(file = %path.display(), changes = changes.len(), "📥 imported IMEI changes");
    Ok(changes)
}

/// Writes a `port,imei,slot` template with a placeholder IMEI per port, or
/// three sample rows when no ports are given.
pub fn write_imei_template(path: &Path, ports: Option<&PortList>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["port", "imei", "slot"])?;

    match ports {
        Some(ports) => {
            for port in ports {
                writer.write_record([
                    port.to_string(),
                    TEMPLATE_IMEI.to_string(),
                    port.slot().to_string(),
                ])?;
            }
        }
        None => {
            for (port, imei) in [
                ("1A", "123456789012345"),
                ("2A", "987654321098765"),
                ("3A", "456789123456789"),
            ] {
                writer.write_record([port, imei, "1"])?;
            }
        }
    }

    writer.flush()?;
    tracing::info!(file = %path.display(), "📝 wrote IMEI template");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spec::parse_port_spec;

    #[test]
    fn test_split_imei_list() {
        let imeis = split_imei_list(" 111, ,222,111 ,");
        assert_eq!(imeis.as_slice(), ["111", "222", "111"]);
    }

    #[test]
    fn test_expand_imeis_literal() {
        let imeis = expand_imeis("123456789012345,987654321098765").unwrap();
        assert_eq!(imeis.len(), 2);
        assert!(expand_imeis(" , ").is_err());
    }

    #[test]
    fn test_plan_pairs_by_position() {
        let ports = parse_port_spec("2.03,4D,7").unwrap();
        let imeis = split_imei_list("111111111111111,222222222222222,333333333333333");
        let changes = plan_imei_changes(&ports, &imeis).unwrap();

        let pairs: Vec<_> = changes.iter().map(|c| (c.board, c.slot)).collect();
        assert_eq!(pairs, vec![(2, 3), (4, 4), (7, 1)]);
        assert_eq!(changes[1].imei, "222222222222222");
    }

    #[test]
    fn test_plan_requires_equal_lengths() {
        let ports = parse_port_spec("1A-1D").unwrap();
        let imeis = split_imei_list("111,222");
        assert!(matches!(
            plan_imei_changes(&ports, &imeis),
            Err(PortSpecError::ImeiCountMismatch { ports: 4, imeis: 2 })
        ));
    }

    #[test]
    fn test_validate_warnings() {
        let change = |board, slot, imei: &str| ImeiChange {
            board,
            slot,
            imei: imei.to_string(),
        };
        let warnings = validate_imei_changes(&[
            change(1, 1, "123456789012345"),
            change(1, 1, "86012345678901X"),
            change(2, 1, "000000000000000"),
            change(65, 5, "123456789012345"),
        ]);

        assert_eq!(warnings.len(), 5);
        assert!(warnings[0].contains("Duplicate port/slot: 1.01"));
        assert!(warnings.iter().any(|w| w.contains("non-digit")));
        assert!(warnings.iter().any(|w| w.contains("test pattern")));
        assert!(warnings.iter().any(|w| w.contains("Port 65 is unusually high")));
        assert!(warnings.iter().any(|w| w.contains("Slot 5")));
    }

    #[test]
    fn test_resolve_change_slot_precedence() {
        let change = resolve_change("3B", None, "1".into()).unwrap();
        assert_eq!((change.board, change.slot), (3, 2));

        let change = resolve_change("3B", Some(4), "1".into()).unwrap();
        assert_eq!((change.board, change.slot), (3, 4));

        let change = resolve_change("3", None, "1".into()).unwrap();
        assert_eq!((change.board, change.slot), (3, 1));

        assert!(resolve_change("3", Some(7), "1".into()).is_err());
    }
}
