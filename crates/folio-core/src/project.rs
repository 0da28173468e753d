//! Portfolio work items, linked to the skills they used.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error,
  skill::{Proficiency, Skill},
};

/// Where a project sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
  Planning,
  #[serde(rename = "In Progress")]
  InProgress,
  #[default]
  Completed,
  #[serde(rename = "On Hold")]
  OnHold,
  Archived,
}

impl ProjectStatus {
  /// The exact string stored in the database and accepted on the wire.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Planning => "Planning",
      Self::InProgress => "In Progress",
      Self::Completed => "Completed",
      Self::OnHold => "On Hold",
      Self::Archived => "Archived",
    }
  }
}

impl FromStr for ProjectStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Planning" => Ok(Self::Planning),
      "In Progress" => Ok(Self::InProgress),
      "Completed" => Ok(Self::Completed),
      "On Hold" => Ok(Self::OnHold),
      "Archived" => Ok(Self::Archived),
      other => Err(Error::UnknownStatus(other.to_string())),
    }
  }
}

/// A persisted project row, without its skill associations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
  pub id:                i64,
  pub profile_id:        i64,
  pub title:             String,
  pub description:       String,
  pub short_description: Option<String>,
  pub project_url:       Option<String>,
  pub github_url:        Option<String>,
  pub demo_url:          Option<String>,
  pub image_url:         Option<String>,
  pub status:            ProjectStatus,
  pub priority:          u8,
  pub is_featured:       bool,
  pub start_date:        Option<NaiveDate>,
  pub end_date:          Option<NaiveDate>,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

/// A skill attached to a project, carrying the proficiency that was applied
/// on that particular project (which may differ from the skill's own level).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillUsage {
  #[serde(flatten)]
  pub skill:            Skill,
  pub proficiency_used: Option<Proficiency>,
}

/// The project read model: the row plus its attached skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWithSkills {
  #[serde(flatten)]
  pub project: Project,
  pub skills:  Vec<SkillUsage>,
}

/// A reference to a skill in a project create/update payload.
///
/// References that do not resolve to an existing skill are skipped, not
/// rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SkillLink {
  pub skill_id:         i64,
  pub proficiency_used: Option<Proficiency>,
}

/// Input to [`crate::store::PortfolioStore::create_project`].
#[derive(Debug, Clone, Default)]
pub struct NewProject {
  pub title:             String,
  pub description:       String,
  pub short_description: Option<String>,
  pub project_url:       Option<String>,
  pub github_url:        Option<String>,
  pub demo_url:          Option<String>,
  pub image_url:         Option<String>,
  pub status:            ProjectStatus,
  pub priority:          u8,
  pub is_featured:       bool,
  pub start_date:        Option<NaiveDate>,
  pub end_date:          Option<NaiveDate>,
  pub skills:            Vec<SkillLink>,
}

/// Field-wise merge applied by project updates. `None` leaves the stored
/// value untouched; `skills: Some(_)` replaces the whole association set.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
  pub title:             Option<String>,
  pub description:       Option<String>,
  pub short_description: Option<String>,
  pub project_url:       Option<String>,
  pub github_url:        Option<String>,
  pub demo_url:          Option<String>,
  pub image_url:         Option<String>,
  pub status:            Option<ProjectStatus>,
  pub priority:          Option<u8>,
  pub is_featured:       Option<bool>,
  pub start_date:        Option<NaiveDate>,
  pub end_date:          Option<NaiveDate>,
  pub skills:            Option<Vec<SkillLink>>,
}
