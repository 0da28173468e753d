//! Named technologies and competencies, optionally featured.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The fixed vocabulary a skill is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SkillCategory {
  #[serde(rename = "Programming Languages")]
  ProgrammingLanguages,
  Frameworks,
  Databases,
  Tools,
  #[serde(rename = "Cloud Services")]
  CloudServices,
  #[default]
  Other,
}

impl SkillCategory {
  /// The exact string stored in the database and accepted on the wire.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::ProgrammingLanguages => "Programming Languages",
      Self::Frameworks => "Frameworks",
      Self::Databases => "Databases",
      Self::Tools => "Tools",
      Self::CloudServices => "Cloud Services",
      Self::Other => "Other",
    }
  }
}

impl FromStr for SkillCategory {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Programming Languages" => Ok(Self::ProgrammingLanguages),
      "Frameworks" => Ok(Self::Frameworks),
      "Databases" => Ok(Self::Databases),
      "Tools" => Ok(Self::Tools),
      "Cloud Services" => Ok(Self::CloudServices),
      "Other" => Ok(Self::Other),
      other => Err(Error::UnknownCategory(other.to_string())),
    }
  }
}

/// Ordinal skill rating. The derive order encodes
/// `Beginner < Intermediate < Advanced < Expert`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize,
  Deserialize,
)]
pub enum Proficiency {
  Beginner,
  #[default]
  Intermediate,
  Advanced,
  Expert,
}

impl Proficiency {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Beginner => "Beginner",
      Self::Intermediate => "Intermediate",
      Self::Advanced => "Advanced",
      Self::Expert => "Expert",
    }
  }
}

impl FromStr for Proficiency {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Beginner" => Ok(Self::Beginner),
      "Intermediate" => Ok(Self::Intermediate),
      "Advanced" => Ok(Self::Advanced),
      "Expert" => Ok(Self::Expert),
      other => Err(Error::UnknownProficiency(other.to_string())),
    }
  }
}

/// A persisted skill row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
  pub id:                  i64,
  pub name:                String,
  pub category:            SkillCategory,
  pub proficiency_level:   Proficiency,
  pub years_of_experience: Option<u32>,
  pub is_featured:         bool,
  pub icon_url:            Option<String>,
  pub description:         Option<String>,
  pub created_at:          DateTime<Utc>,
  pub updated_at:          DateTime<Utc>,
}

/// Input to [`crate::store::PortfolioStore::create_skill`].
#[derive(Debug, Clone, Default)]
pub struct NewSkill {
  pub name:                String,
  pub category:            SkillCategory,
  pub proficiency_level:   Proficiency,
  pub years_of_experience: Option<u32>,
  pub is_featured:         bool,
  pub icon_url:            Option<String>,
  pub description:         Option<String>,
}
