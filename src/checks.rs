//! Argument checks shared by every validated constructor and builder.
//!
//! Each check returns `Error::InvalidArgument` naming the field it guards,
//! so the first failing check decides the error a caller sees.

use crate::error::{Error, Result};

/// Length of a string in characters.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Fail with `reason` unless `condition` holds.
pub fn check(condition: bool, field: &'static str, reason: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::invalid_argument(field, reason))
    }
}

/// Fail if `value` is empty or only whitespace.
pub fn not_blank(value: &str, field: &'static str) -> Result<()> {
    check(!value.trim().is_empty(), field, "may not be blank")
}

/// Fail if `value` is empty.
pub fn not_empty(value: &str, field: &'static str) -> Result<()> {
    check(!value.is_empty(), field, "may not be empty")
}

/// Fail if `value` is longer than `max` characters.
pub fn not_longer(value: &str, max: usize, field: &'static str) -> Result<()> {
    let len = char_len(value);
    if len > max {
        return Err(Error::invalid_argument(
            field,
            format!("may not be longer than {max} characters (got {len})"),
        ));
    }
    Ok(())
}

/// Fail if a collection holds more than `max` elements.
pub fn not_more(count: usize, max: usize, field: &'static str) -> Result<()> {
    if count > max {
        return Err(Error::invalid_argument(
            field,
            format!("may not have more than {max} elements (got {count})"),
        ));
    }
    Ok(())
}

/// Fail if a numeric value is larger than `max`.
pub fn not_above(value: u64, max: u64, field: &'static str) -> Result<()> {
    if value > max {
        return Err(Error::invalid_argument(
            field,
            format!("must be at most {max} (got {value})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_longer_counts_chars() {
        // 3 chars, 9 bytes
        assert!(not_longer("日本語", 3, "Label").is_ok());
        assert!(not_longer("日本語", 2, "Label").is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = not_empty("", "Id").unwrap_err();
        assert_eq!(err.field(), Some("Id"));
        assert_eq!(err.to_string(), "Id may not be empty");
    }

    #[test]
    fn test_not_more() {
        assert!(not_more(5, 5, "ActionRows").is_ok());
        let err = not_more(6, 5, "ActionRows").unwrap_err();
        assert!(err.to_string().contains("more than 5"));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("  ", "Name").is_err());
        assert!(not_blank(" a ", "Name").is_ok());
    }
}
