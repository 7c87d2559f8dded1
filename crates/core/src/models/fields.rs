//! Field-level checks shared by the request types.

use crate::errors::{LexError, LexResult};

pub fn require(field: &str, value: &str) -> LexResult<()> {
    if value.trim().is_empty() {
        return Err(LexError::Validation(format!("El campo '{}' es obligatorio", field)));
    }
    Ok(())
}

pub fn is_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

pub fn email(field: &str, value: &str) -> LexResult<()> {
    require(field, value)?;
    if !is_email(value) {
        return Err(LexError::Validation(format!("El campo '{}' no es un correo válido", field)));
    }
    Ok(())
}

/// Phones are free-form but must carry at least seven digits.
pub fn phone(field: &str, value: Option<&str>) -> LexResult<()> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(());
    };
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !allowed || !(7..=15).contains(&digits) {
        return Err(LexError::Validation(format!(
            "El campo '{}' no es un teléfono válido",
            field
        )));
    }
    Ok(())
}

/// Trims and drops empty optional strings.
pub fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
