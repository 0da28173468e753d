//! One degree or program at one institution.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A persisted education row. `gpa` is on a 0.00 to 4.00 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
  pub id:               i64,
  pub profile_id:       i64,
  pub institution_name: String,
  pub degree:           String,
  pub field_of_study:   Option<String>,
  pub description:      Option<String>,
  pub gpa:              Option<f64>,
  pub location:         Option<String>,
  pub start_date:       NaiveDate,
  pub end_date:         Option<NaiveDate>,
  pub is_current:       bool,
  pub institution_url:  Option<String>,
  pub achievements:     Vec<String>,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

/// Input to [`crate::store::PortfolioStore::add_education`].
#[derive(Debug, Clone, Default)]
pub struct NewEducation {
  pub institution_name: String,
  pub degree:           String,
  pub field_of_study:   Option<String>,
  pub description:      Option<String>,
  pub gpa:              Option<f64>,
  pub location:         Option<String>,
  pub start_date:       NaiveDate,
  pub end_date:         Option<NaiveDate>,
  pub is_current:       bool,
  pub institution_url:  Option<String>,
  pub achievements:     Vec<String>,
}
