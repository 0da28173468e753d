//! Success envelope and pagination metadata.

use folio_core::store::Page;
use serde::Serialize;

/// The uniform success body: `{success: true, data, message?, pagination?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<&'static str>,
  pub data: T,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
  pub fn data(data: T) -> Self {
    Self { success: true, message: None, data, pagination: None }
  }

  pub fn message(data: T, message: &'static str) -> Self {
    Self { success: true, message: Some(message), data, pagination: None }
  }

  pub fn paginated(data: T, pagination: Pagination) -> Self {
    Self { success: true, message: None, data, pagination: Some(pagination) }
  }
}

/// List metadata. `pages` counts full-or-partial windows of `limit` rows in
/// the unpaginated result.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pagination {
  pub total:  u64,
  pub limit:  u32,
  pub offset: u32,
  pub pages:  u64,
}

impl Pagination {
  /// `page.limit` has already been validated to be at least one.
  pub fn new(total: u64, page: Page) -> Self {
    Self {
      total,
      limit:  page.limit,
      offset: page.offset,
      pages:  total.div_ceil(u64::from(page.limit)),
    }
  }
}
