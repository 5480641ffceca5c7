use anyhow::Result;
use boxofports::{
    extract_board_and_slot, parse_port_spec, port_to_alpha, port_to_decimal, PortSpecError,
};

fn ports(spec: &str) -> Result<Vec<String>> {
    Ok(parse_port_spec(spec)?.to_strings())
}

/// 測試範圍展開的邊界
#[test]
fn test_range_expansion_boundaries() -> Result<()> {
    assert_eq!(ports("1A-1D")?, vec!["1A", "1B", "1C", "1D"]);
    assert_eq!(ports("2.01-2.04")?, vec!["2.01", "2.02", "2.03", "2.04"]);
    assert_eq!(ports("1-3")?, vec!["1A", "2A", "3A"]);
    Ok(())
}

/// 測試跨板範圍：首板部分、中間全部、末板部分
#[test]
fn test_multi_board_alpha_window() -> Result<()> {
    let expanded = ports("1C-3B")?;
    assert_eq!(&expanded[..2], ["1C", "1D"]);
    assert_eq!(&expanded[2..6], ["2A", "2B", "2C", "2D"]);
    assert_eq!(&expanded[6..], ["3A", "3B"]);
    Ok(())
}

#[test]
fn test_deduplication_preserves_order() -> Result<()> {
    assert_eq!(ports("1A,2B,1A")?, vec!["1A", "2B"]);
    assert_eq!(ports("1A-1C,1B,4")?, vec!["1A", "1B", "1C", "4A"]);
    Ok(())
}

#[test]
fn test_mixed_family_range_rejected() {
    assert!(matches!(
        parse_port_spec("1A-2.01"),
        Err(PortSpecError::InvalidFormat { .. })
    ));
}

#[test]
fn test_cross_board_decimal_range_rejected() {
    assert!(matches!(
        parse_port_spec("1.01-2.02"),
        Err(PortSpecError::InvalidFormat { .. })
    ));
}

#[test]
fn test_empty_input_rejected() {
    assert!(matches!(
        parse_port_spec(""),
        Err(PortSpecError::EmptySpecification)
    ));
}

#[test]
fn test_error_message_names_offending_token() {
    let err = parse_port_spec("1A,2B,7Q").unwrap_err();
    assert!(err.to_string().contains("'7Q'"), "{}", err);
}

/// 已正規化的輸出再解析一次應得到相同結果
#[test]
fn test_parse_is_idempotent() -> Result<()> {
    for spec in ["1-4,2.01-2.03", "1C-3B,1a", "*", "5,5.2,5B"] {
        let first = parse_port_spec(spec)?;
        let again = parse_port_spec(&first.to_strings().join(","))?;
        assert_eq!(first, again, "spec {}", spec);
    }
    Ok(())
}

#[test]
fn test_notation_round_trip() -> Result<()> {
    for board in 1..=32u32 {
        for letter in ['A', 'B', 'C', 'D'] {
            let alpha = format!("{}{}", board, letter);
            let decimal = port_to_decimal(&alpha)?;
            assert_eq!(port_to_alpha(&decimal)?, alpha);
            assert_eq!(port_to_decimal(&port_to_alpha(&decimal)?)?, decimal);
        }
    }
    Ok(())
}

#[test]
fn test_extract_board_and_slot() -> Result<()> {
    assert_eq!(extract_board_and_slot("2.03")?, (2, 3));
    assert_eq!(extract_board_and_slot("4D")?, (4, 4));
    assert_eq!(extract_board_and_slot("7")?, (7, 1));
    Ok(())
}
