//! One role at one company, with ordered highlight lists.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Contractual form of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmploymentType {
  #[default]
  #[serde(rename = "Full-time")]
  FullTime,
  #[serde(rename = "Part-time")]
  PartTime,
  Contract,
  Freelance,
  Internship,
}

impl EmploymentType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::FullTime => "Full-time",
      Self::PartTime => "Part-time",
      Self::Contract => "Contract",
      Self::Freelance => "Freelance",
      Self::Internship => "Internship",
    }
  }
}

impl FromStr for EmploymentType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Full-time" => Ok(Self::FullTime),
      "Part-time" => Ok(Self::PartTime),
      "Contract" => Ok(Self::Contract),
      "Freelance" => Ok(Self::Freelance),
      "Internship" => Ok(Self::Internship),
      other => Err(Error::UnknownEmploymentType(other.to_string())),
    }
  }
}

/// A persisted work-experience row.
///
/// `end_date: None` together with `is_current: true` marks an ongoing role.
/// `responsibilities` and `achievements` keep their submitted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkExperience {
  pub id:               i64,
  pub profile_id:       i64,
  pub company_name:     String,
  pub position:         String,
  pub description:      Option<String>,
  pub responsibilities: Vec<String>,
  pub achievements:     Vec<String>,
  pub location:         Option<String>,
  pub employment_type:  EmploymentType,
  pub start_date:       NaiveDate,
  pub end_date:         Option<NaiveDate>,
  pub is_current:       bool,
  pub company_url:      Option<String>,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

/// Input to [`crate::store::PortfolioStore::add_work_experience`].
#[derive(Debug, Clone, Default)]
pub struct NewWorkExperience {
  pub company_name:     String,
  pub position:         String,
  pub description:      Option<String>,
  pub responsibilities: Vec<String>,
  pub achievements:     Vec<String>,
  pub location:         Option<String>,
  pub employment_type:  EmploymentType,
  pub start_date:       NaiveDate,
  pub end_date:         Option<NaiveDate>,
  pub is_current:       bool,
  pub company_url:      Option<String>,
}
