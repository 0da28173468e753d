//! Request validation building blocks.
//!
//! Bodies and query strings deserialize into loose option-typed structs,
//! then run through these checks, which accumulate per-field failures into a
//! [`FieldErrors`]. All failures for a request are reported together in one
//! 400 response, and no store call happens until validation has passed.
//!
//! Optional fields pass when absent; the `check_required_*` variants record
//! a failure for absence as well.

use std::str::FromStr;

use axum::{
  Json,
  extract::{
    Path,
    rejection::{JsonRejection, PathRejection},
  },
};
use chrono::NaiveDate;
use url::Url;

use crate::error::{ApiError, FieldError};

// ─── Accumulator ─────────────────────────────────────────────────────────────

/// Collects field failures across all checks for one request.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
  pub fn push(&mut self, field: &'static str, message: &'static str) {
    self.0.push(FieldError { field, message });
  }

  /// `Err(ApiError::Validation)` when anything was recorded.
  pub fn finish(self) -> Result<(), ApiError> {
    if self.0.is_empty() {
      Ok(())
    } else {
      Err(ApiError::Validation(self.0))
    }
  }
}

// ─── Extractor unwrapping ────────────────────────────────────────────────────

/// Unwrap a JSON body extraction, mapping malformed payloads onto a 400.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
  match body {
    Ok(Json(body)) => Ok(body),
    Err(_) => Err(ApiError::BadRequest("Invalid JSON body")),
  }
}

/// Path ids must be positive integers; anything else is a field-level 400,
/// never a 404.
pub fn path_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
  match id {
    Ok(Path(id)) if id >= 1 => Ok(id),
    _ => Err(ApiError::Validation(vec![FieldError {
      field:   "id",
      message: "must be a positive integer",
    }])),
  }
}

// ─── Field checks ────────────────────────────────────────────────────────────

/// Trim and bounds-check an optional string field.
pub fn check_text(
  errors: &mut FieldErrors,
  field: &'static str,
  value: Option<&str>,
  min: usize,
  max: usize,
  message: &'static str,
) -> Option<String> {
  let trimmed = value?.trim();
  if trimmed.len() < min || trimmed.len() > max {
    errors.push(field, message);
    return None;
  }
  Some(trimmed.to_owned())
}

/// Like [`check_text`], but absence is itself a failure.
pub fn check_required_text(
  errors: &mut FieldErrors,
  field: &'static str,
  value: Option<&str>,
  min: usize,
  max: usize,
  message: &'static str,
) -> Option<String> {
  match value {
    Some(value) => check_text(errors, field, Some(value), min, max, message),
    None => {
      errors.push(field, "is required");
      None
    }
  }
}

/// Loose email shape check: one `@`, a non-empty local part, a dotted
/// domain. Accepted addresses are lowercased.
pub fn check_email(
  errors: &mut FieldErrors,
  field: &'static str,
  value: Option<&str>,
) -> Option<String> {
  let raw = value?.trim();
  let ok = raw.split_once('@').is_some_and(|(local, domain)| {
    !local.is_empty()
      && domain.contains('.')
      && !domain.starts_with('.')
      && !domain.ends_with('.')
  });
  if ok {
    Some(raw.to_lowercase())
  } else {
    errors.push(field, "must be a valid email address");
    None
  }
}

/// URL fields must parse absolute with an http or https scheme.
pub fn check_url(
  errors: &mut FieldErrors,
  field: &'static str,
  value: Option<&str>,
) -> Option<String> {
  let raw = value?.trim();
  match Url::parse(raw) {
    Ok(url) if matches!(url.scheme(), "http" | "https") => Some(raw.to_owned()),
    _ => {
      errors.push(field, "must be a valid URL");
      None
    }
  }
}

/// Phone numbers may mix digits, `+`, separators, and parentheses, with at
/// least seven digits overall.
pub fn check_phone(
  errors: &mut FieldErrors,
  field: &'static str,
  value: Option<&str>,
) -> Option<String> {
  let raw = value?.trim();
  let digits = raw.chars().filter(char::is_ascii_digit).count();
  let shape_ok = raw
    .chars()
    .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'));
  if digits >= 7 && shape_ok {
    Some(raw.to_owned())
  } else {
    errors.push(field, "must be a valid phone number");
    None
  }
}

/// Parse an optional enum-valued field, recording `message` when the value
/// is not in the allowed set.
pub fn check_enum<T: FromStr>(
  errors: &mut FieldErrors,
  field: &'static str,
  value: Option<&str>,
  message: &'static str,
) -> Option<T> {
  match value?.parse() {
    Ok(parsed) => Some(parsed),
    Err(_) => {
      errors.push(field, message);
      None
    }
  }
}

/// Like [`check_enum`], but absence is itself a failure.
pub fn check_required_enum<T: FromStr>(
  errors: &mut FieldErrors,
  field: &'static str,
  value: Option<&str>,
  message: &'static str,
) -> Option<T> {
  match value {
    Some(value) => check_enum(errors, field, Some(value), message),
    None => {
      errors.push(field, "is required");
      None
    }
  }
}

/// Bounds-check an optional integer field.
pub fn check_int(
  errors: &mut FieldErrors,
  field: &'static str,
  value: Option<i64>,
  min: i64,
  max: i64,
  message: &'static str,
) -> Option<i64> {
  let value = value?;
  if value < min || value > max {
    errors.push(field, message);
    return None;
  }
  Some(value)
}

/// Dates arrive as `YYYY-MM-DD` strings.
pub fn check_date(
  errors: &mut FieldErrors,
  field: &'static str,
  value: Option<&str>,
) -> Option<NaiveDate> {
  let raw = value?.trim();
  match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    Ok(date) => Some(date),
    Err(_) => {
      errors.push(field, "must be a valid ISO 8601 date (YYYY-MM-DD)");
      None
    }
  }
}

// ─── Query-window checks ─────────────────────────────────────────────────────

/// `limit` query parameter: integer 1 to 100, `default` when absent.
pub fn check_limit(errors: &mut FieldErrors, raw: Option<&str>, default: u32) -> u32 {
  let Some(raw) = raw else { return default };
  match raw.parse::<u32>() {
    Ok(limit) if (1..=100).contains(&limit) => limit,
    _ => {
      errors.push("limit", "must be an integer between 1 and 100");
      default
    }
  }
}

/// `offset` query parameter: non-negative integer, zero when absent.
pub fn check_offset(errors: &mut FieldErrors, raw: Option<&str>) -> u32 {
  let Some(raw) = raw else { return 0 };
  match raw.parse::<u32>() {
    Ok(offset) => offset,
    Err(_) => {
      errors.push("offset", "must be a non-negative integer");
      0
    }
  }
}

/// Boolean query parameters accept exactly `true` or `false`.
pub fn check_bool(
  errors: &mut FieldErrors,
  field: &'static str,
  raw: Option<&str>,
) -> Option<bool> {
  match raw? {
    "true" => Some(true),
    "false" => Some(false),
    _ => {
      errors.push(field, "must be true or false");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_is_trimmed_and_bounded() {
    let mut errors = FieldErrors::default();
    assert_eq!(
      check_text(&mut errors, "bio", Some("  hello  "), 0, 10, "too long"),
      Some("hello".to_owned())
    );
    assert!(errors.finish().is_ok());

    let mut errors = FieldErrors::default();
    assert!(check_text(&mut errors, "bio", Some("0123456789ab"), 0, 10, "too long").is_none());
    assert!(errors.finish().is_err());
  }

  #[test]
  fn absent_optional_fields_pass() {
    let mut errors = FieldErrors::default();
    assert_eq!(check_text(&mut errors, "bio", None, 1, 10, "bad"), None);
    assert_eq!(check_url(&mut errors, "website", None), None);
    assert_eq!(check_date(&mut errors, "start_date", None), None);
    assert!(errors.finish().is_ok());
  }

  #[test]
  fn required_text_records_absence() {
    let mut errors = FieldErrors::default();
    assert!(check_required_text(&mut errors, "name", None, 1, 100, "bad").is_none());
    assert!(errors.finish().is_err());
  }

  #[test]
  fn urls_must_be_http_or_https() {
    let mut errors = FieldErrors::default();
    assert!(check_url(&mut errors, "website", Some("https://example.com")).is_some());
    assert!(check_url(&mut errors, "website", Some("ftp://example.com")).is_none());
    assert!(check_url(&mut errors, "website", Some("not a url")).is_none());
  }

  #[test]
  fn email_shape_and_lowercasing() {
    let mut errors = FieldErrors::default();
    assert_eq!(
      check_email(&mut errors, "email", Some("Ada@Example.COM")),
      Some("ada@example.com".to_owned())
    );
    assert!(check_email(&mut errors, "email", Some("nope")).is_none());
    assert!(check_email(&mut errors, "email", Some("a@b")).is_none());
  }

  #[test]
  fn phone_needs_seven_digits_and_clean_shape() {
    let mut errors = FieldErrors::default();
    assert!(check_phone(&mut errors, "phone", Some("+1 (555) 123-4567")).is_some());
    assert!(check_phone(&mut errors, "phone", Some("call me")).is_none());
    assert!(check_phone(&mut errors, "phone", Some("12345")).is_none());
  }

  #[test]
  fn limit_bounds_and_default() {
    let mut errors = FieldErrors::default();
    assert_eq!(check_limit(&mut errors, None, 20), 20);
    assert_eq!(check_limit(&mut errors, Some("100"), 20), 100);
    assert!(errors.finish().is_ok());

    let mut errors = FieldErrors::default();
    assert_eq!(check_limit(&mut errors, Some("0"), 20), 20);
    assert_eq!(check_limit(&mut errors, Some("101"), 20), 20);
    assert_eq!(check_limit(&mut errors, Some("abc"), 20), 20);
    assert!(errors.finish().is_err());
  }

  #[test]
  fn offset_rejects_negatives() {
    let mut errors = FieldErrors::default();
    assert_eq!(check_offset(&mut errors, Some("3")), 3);
    assert_eq!(check_offset(&mut errors, Some("-1")), 0);
    assert!(errors.finish().is_err());
  }

  #[test]
  fn enums_parse_from_the_allowed_set() {
    use folio_core::project::ProjectStatus;

    let mut errors = FieldErrors::default();
    assert_eq!(
      check_enum::<ProjectStatus>(&mut errors, "status", Some("In Progress"), "bad"),
      Some(ProjectStatus::InProgress)
    );
    assert!(check_enum::<ProjectStatus>(&mut errors, "status", Some("Ongoing"), "bad").is_none());
  }

  #[test]
  fn dates_must_be_ymd() {
    let mut errors = FieldErrors::default();
    assert!(check_date(&mut errors, "start_date", Some("2023-01-15")).is_some());
    assert!(check_date(&mut errors, "start_date", Some("15/01/2023")).is_none());
    assert!(check_date(&mut errors, "start_date", Some("2023-13-01")).is_none());
  }
}
