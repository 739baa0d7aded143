use uuid::Uuid;

use crate::error::AppError;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Parse a path identifier, naming the resource in the error.
///
/// Example: `parse_id("not-a-uuid", "car")` fails with
/// `"car id is an invalid uuid"`.
pub fn parse_id(raw: &str, resource: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::Validation(format!("{resource} id is an invalid uuid")))
}

/// Validated `offset`/`limit` pair for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Parse raw query values. Absent or empty values fall back to defaults.
    pub fn parse(offset: Option<&str>, limit: Option<&str>) -> Result<Self, AppError> {
        let offset = match non_empty(offset) {
            None => 0,
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                AppError::Validation(format!(
                    "offset must be a non-negative integer, got '{raw}'"
                ))
            })?,
        };

        let limit = match non_empty(limit) {
            None => DEFAULT_LIMIT,
            Some(raw) => {
                let parsed = raw.parse::<u32>().ok().filter(|l| (1..=MAX_LIMIT).contains(l));
                parsed.ok_or_else(|| {
                    AppError::Validation(format!(
                        "limit must be an integer between 1 and {MAX_LIMIT}, got '{raw}'"
                    ))
                })?
            }
        };

        Ok(Self { offset, limit })
    }
}

/// Return the value of a required query parameter, rejecting absent or blank input.
pub fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    non_empty(value).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

/// Accepts an optional leading `+` followed by 7 to 15 ASCII digits.
pub fn validate_phone_number(phone: &str) -> Result<(), AppError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let well_formed =
        (7..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit());

    if well_formed {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "phone number '{phone}' is malformed"
        )))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
