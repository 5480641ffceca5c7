use anyhow::Result;
use boxofports::core::csv_loader::{load_imeis_from_csv, load_ports_from_csv};
use boxofports::{expand_imeis_if_csv, expand_ports, expand_ports_if_csv, PortSpecError};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

/// 測試 port + slot 欄位組合
#[test]
fn test_port_and_slot_columns() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "ports.csv", "port,slot\n3,01\n1,A\n")?;

    let ports = load_ports_from_csv(&path)?;
    assert_eq!(ports.to_strings(), vec!["3.01", "1A"]);
    Ok(())
}

#[test]
fn test_ports_only_column() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "ports.csv", "port\n1A\n2B\n3.01\n4\n1A\n")?;

    let ports = load_ports_from_csv(&path)?;
    assert_eq!(ports.to_strings(), vec!["1A", "2B", "3.01", "4A"]);
    Ok(())
}

#[test]
fn test_missing_port_column() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "ports.csv", "slot,imei\nA,123456789012345\n")?;

    match load_ports_from_csv(&path) {
        Err(PortSpecError::CsvFormat { detail, .. }) => {
            assert!(detail.contains("'port' column"), "{}", detail)
        }
        other => panic!("unexpected: {:?}", other),
    }
    Ok(())
}

#[test]
fn test_empty_csv() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "ports.csv", "")?;

    match load_ports_from_csv(&path) {
        Err(PortSpecError::CsvFormat { detail, .. }) => {
            assert!(detail.contains("empty or has no headers"), "{}", detail)
        }
        other => panic!("unexpected: {:?}", other),
    }
    Ok(())
}

#[test]
fn test_all_rows_skipped_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "ports.csv", "port,slot\n,A\n,B\n")?;

    assert!(matches!(
        load_ports_from_csv(&path),
        Err(PortSpecError::CsvFormat { .. })
    ));
    Ok(())
}

/// 副檔名不是 .csv 但標頭像 port 欄位時也視為 CSV
#[test]
fn test_header_sniffing_without_extension() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "selection.txt", "Port,Slot\n5,2\n")?;

    let ports = expand_ports(path.to_str().unwrap_or_default())?;
    assert_eq!(ports.to_strings(), vec!["5.02"]);
    Ok(())
}

#[test]
fn test_non_csv_input_returns_none() -> Result<()> {
    assert!(expand_ports_if_csv("1A,2B,3C")?.is_none());
    assert!(expand_imeis_if_csv("123456789012345,987654321098765")?.is_none());
    Ok(())
}

#[test]
fn test_missing_csv_file() {
    let result = expand_ports("/nonexistent/dir/ports.csv");
    assert!(matches!(result, Err(PortSpecError::CsvFileNotFound { .. })));
}

#[test]
fn test_imei_csv_keeps_duplicates_and_order() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(
        &dir,
        "imeis.csv",
        "imei\n123456789012345\n987654321098765\n123456789012345\n",
    )?;

    let imeis = expand_imeis_if_csv(path.to_str().unwrap_or_default())?.unwrap_or_default();
    assert_eq!(
        imeis.as_slice(),
        ["123456789012345", "987654321098765", "123456789012345"]
    );
    Ok(())
}

#[test]
fn test_missing_imei_column() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "imeis.csv", "port,slot\n1A,1\n")?;

    match load_imeis_from_csv(&path) {
        Err(PortSpecError::CsvFormat { detail, .. }) => {
            assert!(detail.contains("'imei' column"), "{}", detail)
        }
        other => panic!("unexpected: {:?}", other),
    }
    Ok(())
}
