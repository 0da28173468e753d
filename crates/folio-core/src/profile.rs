//! The singleton portfolio owner and its attached career overview.
//!
//! Exactly one profile exists per deployment. Every project, work experience,
//! and education row belongs to it. Callers never address the profile by id;
//! the store exposes singleton accessors instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{education::Education, experience::WorkExperience};

/// The portfolio owner's identity and contact surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  pub id:                i64,
  pub name:              String,
  pub email:             String,
  pub bio:               Option<String>,
  pub title:             Option<String>,
  pub location:          Option<String>,
  pub phone:             Option<String>,
  pub website:           Option<String>,
  pub github_url:        Option<String>,
  pub linkedin_url:      Option<String>,
  pub twitter_url:       Option<String>,
  pub profile_image_url: Option<String>,
  pub resume_url:        Option<String>,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

/// The profile together with its career history, as served by the overview
/// read. History lists are ordered by start date, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOverview {
  #[serde(flatten)]
  pub profile:          Profile,
  pub work_experiences: Vec<WorkExperience>,
  pub educations:       Vec<Education>,
}

/// Input to [`crate::store::PortfolioStore::create_profile`].
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
  pub name:              String,
  pub email:             String,
  pub bio:               Option<String>,
  pub title:             Option<String>,
  pub location:          Option<String>,
  pub phone:             Option<String>,
  pub website:           Option<String>,
  pub github_url:        Option<String>,
  pub linkedin_url:      Option<String>,
  pub twitter_url:       Option<String>,
  pub profile_image_url: Option<String>,
  pub resume_url:        Option<String>,
}

/// Field-wise merge applied by profile updates.
///
/// `None` means "leave the stored value untouched"; there is no way to null
/// a field out through an update.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
  pub name:              Option<String>,
  pub email:             Option<String>,
  pub bio:               Option<String>,
  pub title:             Option<String>,
  pub location:          Option<String>,
  pub phone:             Option<String>,
  pub website:           Option<String>,
  pub github_url:        Option<String>,
  pub linkedin_url:      Option<String>,
  pub twitter_url:       Option<String>,
  pub profile_image_url: Option<String>,
  pub resume_url:        Option<String>,
}
