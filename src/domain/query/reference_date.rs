use chrono::NaiveDate;

use crate::domain::DomainError;

/// Parse a `YYYY-MM-DD` reference date (`/` accepted as separator)
///
/// Dates after `today` are rejected rather than clamped.
pub fn parse_reference_date(input: &str, today: NaiveDate) -> Result<NaiveDate, DomainError> {
    let normalized = input.trim().replace('/', "-");

    let date = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").map_err(|_| {
        DomainError::validation(format!(
            "Invalid date '{}'. Expected format YYYY-MM-DD",
            input.trim()
        ))
    })?;

    if date > today {
        return Err(DomainError::validation(format!(
            "Cannot provide data for future date {}",
            date
        )));
    }

    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_valid_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        assert_eq!(parse_reference_date("2024-01-05", today()).unwrap(), expected);
        assert_eq!(parse_reference_date(" 2024/01/05 ", today()).unwrap(), expected);
        assert_eq!(parse_reference_date("2024-06-01", today()).unwrap(), today());
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let err = parse_reference_date("05-01-2024", today()).unwrap_err();
        assert!(err.to_string().contains("Invalid date '05-01-2024'"));

        assert!(parse_reference_date("2024-02-30", today()).is_err());
        assert!(parse_reference_date("yesterday", today()).is_err());
    }

    #[test]
    fn test_future_date_is_rejected() {
        let err = parse_reference_date("2024-06-02", today()).unwrap_err();
        assert!(err.to_string().contains("future date 2024-06-02"));
    }
}
