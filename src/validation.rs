// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Field validators for submitted forms.
//!
//! Form fields arrive as strings, so numeric rules parse before checking.
//! Rule messages are attached at each `#[validate(...)]` site.

use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

fn invalid(code: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed("Giá trị không hợp lệ"))
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Non-blank after trimming.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required"));
    }
    Ok(())
}

pub fn positive_number(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if n > 0.0 => Ok(()),
        _ => Err(invalid("positive_number")),
    }
}

pub fn non_negative_number(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if n >= 0.0 => Ok(()),
        _ => Err(invalid("non_negative_number")),
    }
}

pub fn positive_integer(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(invalid("positive_integer")),
    }
}

pub fn latitude(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if (-90.0..=90.0).contains(&n) => Ok(()),
        _ => Err(invalid("latitude")),
    }
}

pub fn longitude(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if (-180.0..=180.0).contains(&n) => Ok(()),
        _ => Err(invalid("longitude")),
    }
}

/// Six ASCII digits.
pub fn otp_code(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid("otp_code"))
    }
}

/// RFC 3339 timestamp.
pub fn timestamp(value: &str) -> Result<(), ValidationError> {
    chrono::DateTime::parse_from_rfc3339(value.trim())
        .map(|_| ())
        .map_err(|_| invalid("timestamp"))
}

/// Number from a field that already passed validation.
pub fn number(value: &str) -> f64 {
    parse_number(value).unwrap_or_default()
}

/// Integer from a field that already passed validation.
pub fn integer(value: &str) -> u32 {
    value.trim().parse().unwrap_or_default()
}

/// Join every violated rule message, ordered by field name.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .map(|e| match &e.message {
            Some(message) => message.to_string(),
            None => e.code.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_rules() {
        assert!(positive_number("10").is_ok());
        assert!(positive_number(" 2.5 ").is_ok());
        assert!(positive_number("0").is_err());
        assert!(positive_number("abc").is_err());
        assert!(positive_number("NaN").is_err());
        assert!(non_negative_number("0").is_ok());
        assert!(positive_integer("30").is_ok());
        assert!(positive_integer("1.5").is_err());
    }

    #[test]
    fn test_coordinates() {
        assert!(latitude("10.7769").is_ok());
        assert!(latitude("91").is_err());
        assert!(longitude("106.7009").is_ok());
        assert!(longitude("-181").is_err());
    }

    #[test]
    fn test_otp_and_required() {
        assert!(otp_code("123456").is_ok());
        assert!(otp_code("12345").is_err());
        assert!(otp_code("12a456").is_err());
        assert!(required("   ").is_err());
        assert!(required("x").is_ok());
    }

    #[test]
    fn test_timestamp() {
        assert!(timestamp("2026-10-16T08:00:00+07:00").is_ok());
        assert!(timestamp("tomorrow").is_err());
    }
}
