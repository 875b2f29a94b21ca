//! Validation system for configuration values

pub use crate::error::ValidationError;

/// Trait for configuration sections that can validate themselves
///
/// Each section (ApiConfig, PlayerConfig, AppConfig) implements this so the
/// root config can aggregate errors without knowing section internals.
pub trait ConfigSection: Default {
    /// Validates the section; an empty error list means valid
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Returns the section name for error reporting
    fn section_name(&self) -> &'static str;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a numeric value is within a range
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            Err(ValidationError::with_value(
                field,
                format!("must be between {} and {}", min, max),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Collects individual results into the section-level shape
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_accepts_bounds() {
        assert!(Validator::in_range(1, 1, 100, "x").is_ok());
        assert!(Validator::in_range(100, 1, 100, "x").is_ok());
    }

    #[test]
    fn test_in_range_rejects_outside() {
        assert!(Validator::in_range(0, 1, 100, "x").is_err());
        assert!(Validator::in_range(101, 1, 100, "x").is_err());
    }

    #[test]
    fn test_not_empty() {
        assert!(Validator::not_empty("value", "x").is_ok());
        assert!(Validator::not_empty("", "x").is_err());
        assert!(Validator::not_empty("   ", "x").is_err());
    }

    #[test]
    fn test_collect_errors() {
        let ok = Validator::collect_errors(vec![Ok(()), Ok(())]);
        assert!(ok.is_ok());

        let err = Validator::collect_errors(vec![
            Ok(()),
            Err(ValidationError::new("a", "bad")),
            Err(ValidationError::new("b", "bad")),
        ]);
        assert_eq!(err.unwrap_err().len(), 2);
    }
}
