//! Shape constraints of catalogued users.
//!
//! Each check inspects a single field and reports the violated constraints,
//! independently of what is currently stored.

use std::ops::RangeInclusive;

use crate::error::resource::{ValidationError, ValidationErrorKind, ValidationFieldError};

pub const NAME_MAX_LENGTH: usize = 100;
pub const AGE_RANGE: RangeInclusive<i32> = 1..=99;
pub const ADDRESS_MAX_LENGTH: usize = 500;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Whether the value is absent or made only of spaces and control characters.
///
/// Unicode spaces such as U+00A0 are content, not blanks.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.chars().all(|c| c <= ' '))
}

pub fn check_name(name: Option<&str>, required: bool) -> Option<ValidationFieldError> {
    let mut kinds = Vec::new();

    if required && is_blank(name) {
        kinds.push(ValidationErrorKind::Required);
    }
    if let Some(name) = name {
        if name.chars().count() > NAME_MAX_LENGTH {
            kinds.push(ValidationErrorKind::MaxLength(NAME_MAX_LENGTH as u64));
        }
    }

    field_error("name", kinds)
}

pub fn check_age(age: Option<i32>, required: bool) -> Option<ValidationFieldError> {
    let kinds = match age {
        None if required => vec![ValidationErrorKind::Required],
        None => Vec::new(),
        Some(age) if age < *AGE_RANGE.start() => {
            vec![ValidationErrorKind::Minimum(*AGE_RANGE.start() as i64)]
        }
        Some(age) if age > *AGE_RANGE.end() => {
            vec![ValidationErrorKind::Maximum(*AGE_RANGE.end() as i64)]
        }
        Some(_) => Vec::new(),
    };

    field_error("age", kinds)
}

pub fn check_address(address: Option<&str>) -> Option<ValidationFieldError> {
    let kinds = match address {
        Some(address) if address.chars().count() > ADDRESS_MAX_LENGTH => {
            vec![ValidationErrorKind::MaxLength(ADDRESS_MAX_LENGTH as u64)]
        }
        _ => Vec::new(),
    };

    field_error("address", kinds)
}

fn field_error(path: &str, kinds: Vec<ValidationErrorKind>) -> Option<ValidationFieldError> {
    if kinds.is_empty() {
        return None;
    }
    Some(ValidationFieldError::new(path, kinds))
}
