//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! string lists (responsibilities, achievements) as compact JSON arrays, and
//! enum fields as their exact wire strings.

use chrono::{DateTime, NaiveDate, Utc};
use folio_core::{
  education::Education,
  experience::WorkExperience,
  profile::Profile,
  project::{Project, SkillUsage},
  skill::Skill,
};
use rusqlite::Row;

use crate::{Error, Result};

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Calendar dates ──────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── String lists ────────────────────────────────────────────────────────────

pub fn encode_string_list(items: &[String]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_string_list(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────
//
// Each `Raw*` struct mirrors its table's column order (see the `*_COLS`
// constants in `store.rs`); `from_row` reads by index and `into_*` finishes
// the decode into the domain type.

/// Raw values read directly from a `profiles` row.
pub struct RawProfile {
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
  pub created_at:        String,
  pub updated_at:        String,
}

impl RawProfile {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      name:              row.get(1)?,
      email:             row.get(2)?,
      bio:               row.get(3)?,
      title:             row.get(4)?,
      location:          row.get(5)?,
      phone:             row.get(6)?,
      website:           row.get(7)?,
      github_url:        row.get(8)?,
      linkedin_url:      row.get(9)?,
      twitter_url:       row.get(10)?,
      profile_image_url: row.get(11)?,
      resume_url:        row.get(12)?,
      created_at:        row.get(13)?,
      updated_at:        row.get(14)?,
    })
  }

  pub fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      id:                self.id,
      name:              self.name,
      email:             self.email,
      bio:               self.bio,
      title:             self.title,
      location:          self.location,
      phone:             self.phone,
      website:           self.website,
      github_url:        self.github_url,
      linkedin_url:      self.linkedin_url,
      twitter_url:       self.twitter_url,
      profile_image_url: self.profile_image_url,
      resume_url:        self.resume_url,
      created_at:        decode_dt(&self.created_at)?,
      updated_at:        decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `skills` row.
pub struct RawSkill {
  pub id:                  i64,
  pub name:                String,
  pub category:            String,
  pub proficiency_level:   String,
  pub years_of_experience: Option<u32>,
  pub is_featured:         bool,
  pub icon_url:            Option<String>,
  pub description:         Option<String>,
  pub created_at:          String,
  pub updated_at:          String,
}

impl RawSkill {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      name:                row.get(1)?,
      category:            row.get(2)?,
      proficiency_level:   row.get(3)?,
      years_of_experience: row.get(4)?,
      is_featured:         row.get(5)?,
      icon_url:            row.get(6)?,
      description:         row.get(7)?,
      created_at:          row.get(8)?,
      updated_at:          row.get(9)?,
    })
  }

  pub fn into_skill(self) -> Result<Skill> {
    Ok(Skill {
      id:                  self.id,
      name:                self.name,
      category:            self.category.parse()?,
      proficiency_level:   self.proficiency_level.parse()?,
      years_of_experience: self.years_of_experience,
      is_featured:         self.is_featured,
      icon_url:            self.icon_url,
      description:         self.description,
      created_at:          decode_dt(&self.created_at)?,
      updated_at:          decode_dt(&self.updated_at)?,
    })
  }
}

/// A `skills` row joined with its `project_skills.proficiency_used` column.
pub struct RawSkillUsage {
  pub skill:            RawSkill,
  pub proficiency_used: Option<String>,
}

impl RawSkillUsage {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      skill:            RawSkill::from_row(row)?,
      proficiency_used: row.get(10)?,
    })
  }

  pub fn into_usage(self) -> Result<SkillUsage> {
    Ok(SkillUsage {
      skill:            self.skill.into_skill()?,
      proficiency_used: self
        .proficiency_used
        .as_deref()
        .map(str::parse)
        .transpose()?,
    })
  }
}

/// Raw values read directly from a `projects` row.
pub struct RawProject {
  pub id:                i64,
  pub profile_id:        i64,
  pub title:             String,
  pub description:       String,
  pub short_description: Option<String>,
  pub project_url:       Option<String>,
  pub github_url:        Option<String>,
  pub demo_url:          Option<String>,
  pub image_url:         Option<String>,
  pub status:            String,
  pub priority:          u8,
  pub is_featured:       bool,
  pub start_date:        Option<String>,
  pub end_date:          Option<String>,
  pub created_at:        String,
  pub updated_at:        String,
}

impl RawProject {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      profile_id:        row.get(1)?,
      title:             row.get(2)?,
      description:       row.get(3)?,
      short_description: row.get(4)?,
      project_url:       row.get(5)?,
      github_url:        row.get(6)?,
      demo_url:          row.get(7)?,
      image_url:         row.get(8)?,
      status:            row.get(9)?,
      priority:          row.get(10)?,
      is_featured:       row.get(11)?,
      start_date:        row.get(12)?,
      end_date:          row.get(13)?,
      created_at:        row.get(14)?,
      updated_at:        row.get(15)?,
    })
  }

  pub fn into_project(self) -> Result<Project> {
    Ok(Project {
      id:                self.id,
      profile_id:        self.profile_id,
      title:             self.title,
      description:       self.description,
      short_description: self.short_description,
      project_url:       self.project_url,
      github_url:        self.github_url,
      demo_url:          self.demo_url,
      image_url:         self.image_url,
      status:            self.status.parse()?,
      priority:          self.priority,
      is_featured:       self.is_featured,
      start_date:        self.start_date.as_deref().map(decode_date).transpose()?,
      end_date:          self.end_date.as_deref().map(decode_date).transpose()?,
      created_at:        decode_dt(&self.created_at)?,
      updated_at:        decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `work_experiences` row.
pub struct RawWorkExperience {
  pub id:               i64,
  pub profile_id:       i64,
  pub company_name:     String,
  pub position:         String,
  pub description:      Option<String>,
  pub responsibilities: String,
  pub achievements:     String,
  pub location:         Option<String>,
  pub employment_type:  String,
  pub start_date:       String,
  pub end_date:         Option<String>,
  pub is_current:       bool,
  pub company_url:      Option<String>,
  pub created_at:       String,
  pub updated_at:       String,
}

impl RawWorkExperience {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      profile_id:       row.get(1)?,
      company_name:     row.get(2)?,
      position:         row.get(3)?,
      description:      row.get(4)?,
      responsibilities: row.get(5)?,
      achievements:     row.get(6)?,
      location:         row.get(7)?,
      employment_type:  row.get(8)?,
      start_date:       row.get(9)?,
      end_date:         row.get(10)?,
      is_current:       row.get(11)?,
      company_url:      row.get(12)?,
      created_at:       row.get(13)?,
      updated_at:       row.get(14)?,
    })
  }

  pub fn into_experience(self) -> Result<WorkExperience> {
    Ok(WorkExperience {
      id:               self.id,
      profile_id:       self.profile_id,
      company_name:     self.company_name,
      position:         self.position,
      description:      self.description,
      responsibilities: decode_string_list(&self.responsibilities)?,
      achievements:     decode_string_list(&self.achievements)?,
      location:         self.location,
      employment_type:  self.employment_type.parse()?,
      start_date:       decode_date(&self.start_date)?,
      end_date:         self.end_date.as_deref().map(decode_date).transpose()?,
      is_current:       self.is_current,
      company_url:      self.company_url,
      created_at:       decode_dt(&self.created_at)?,
      updated_at:       decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from an `educations` row.
pub struct RawEducation {
  pub id:               i64,
  pub profile_id:       i64,
  pub institution_name: String,
  pub degree:           String,
  pub field_of_study:   Option<String>,
  pub description:      Option<String>,
  pub gpa:              Option<f64>,
  pub location:         Option<String>,
  pub start_date:       String,
  pub end_date:         Option<String>,
  pub is_current:       bool,
  pub institution_url:  Option<String>,
  pub achievements:     String,
  pub created_at:       String,
  pub updated_at:       String,
}

impl RawEducation {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      profile_id:       row.get(1)?,
      institution_name: row.get(2)?,
      degree:           row.get(3)?,
      field_of_study:   row.get(4)?,
      description:      row.get(5)?,
      gpa:              row.get(6)?,
      location:         row.get(7)?,
      start_date:       row.get(8)?,
      end_date:         row.get(9)?,
      is_current:       row.get(10)?,
      institution_url:  row.get(11)?,
      achievements:     row.get(12)?,
      created_at:       row.get(13)?,
      updated_at:       row.get(14)?,
    })
  }

  pub fn into_education(self) -> Result<Education> {
    Ok(Education {
      id:               self.id,
      profile_id:       self.profile_id,
      institution_name: self.institution_name,
      degree:           self.degree,
      field_of_study:   self.field_of_study,
      description:      self.description,
      gpa:              self.gpa,
      location:         self.location,
      start_date:       decode_date(&self.start_date)?,
      end_date:         self.end_date.as_deref().map(decode_date).transpose()?,
      is_current:       self.is_current,
      institution_url:  self.institution_url,
      achievements:     decode_string_list(&self.achievements)?,
      created_at:       decode_dt(&self.created_at)?,
      updated_at:       decode_dt(&self.updated_at)?,
    })
  }
}
