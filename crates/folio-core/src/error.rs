//! Error types for `folio-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown skill category: {0:?}")]
  UnknownCategory(String),

  #[error("unknown proficiency level: {0:?}")]
  UnknownProficiency(String),

  #[error("unknown project status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown employment type: {0:?}")]
  UnknownEmploymentType(String),

  #[error("unknown sort field: {0:?}")]
  UnknownSortField(String),

  #[error("unknown sort order: {0:?}")]
  UnknownSortOrder(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
