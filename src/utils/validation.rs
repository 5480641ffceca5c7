use crate::utils::error::{PortSpecError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(PortSpecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PortSpecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(PortSpecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_max_number(field_name: &str, value: u32, max_value: u32) -> Result<()> {
    if value > max_value {
        return Err(PortSpecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at most {}", max_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PortSpecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_slot_letters(field_name: &str, slots: &[char]) -> Result<()> {
    if slots.is_empty() {
        return Err(PortSpecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "At least one slot letter is required".to_string(),
        });
    }

    for slot in slots {
        if !matches!(slot.to_ascii_uppercase(), 'A'..='D') {
            return Err(PortSpecError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: slot.to_string(),
                reason: "Slot letters must be one of A, B, C, D".to_string(),
            });
        }
    }

    Ok(())
}
