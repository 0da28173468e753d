//! Error type for `folio-store-sqlite`.

use folio_core::store::{StoreError, StoreErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] folio_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A write collided with an existing unique value (profile email, skill
  /// name, project/skill pair).
  #[error("duplicate value for {0}")]
  Duplicate(&'static str),

  /// The profile is a singleton; a second one may not be created.
  #[error("a profile already exists")]
  ProfileExists,

  /// An owned row was submitted before any profile exists.
  #[error("profile not found")]
  ProfileMissing,
}

impl StoreError for Error {
  fn kind(&self) -> StoreErrorKind {
    match self {
      Self::Duplicate(_) | Self::ProfileExists => StoreErrorKind::Conflict,
      Self::ProfileMissing => StoreErrorKind::NotFound,
      _ => StoreErrorKind::Other,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
