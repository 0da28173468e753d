//! The `PortfolioStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `folio-store-sqlite`).
//! Higher layers (`folio-api`, `folio-server`) depend on this abstraction,
//! not on any concrete backend.

use std::{future::Future, str::FromStr};

use crate::{
  Error,
  education::{Education, NewEducation},
  experience::{NewWorkExperience, WorkExperience},
  profile::{NewProfile, Profile, ProfileOverview, ProfileUpdate},
  project::{NewProject, ProjectStatus, ProjectUpdate, ProjectWithSkills},
  skill::{NewSkill, Proficiency, Skill, SkillCategory},
};

// ─── Error classification ────────────────────────────────────────────────────

/// Coarse failure category, used by HTTP layers to pick a status code
/// without knowing the concrete backend error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
  /// The addressed row (or the singleton profile) does not exist.
  NotFound,
  /// The write lost to an existing row: duplicate unique value, or a second
  /// profile where only one may exist.
  Conflict,
  /// Anything else: I/O, corruption, decoding.
  Other,
}

/// Classification hook every backend error type must provide.
pub trait StoreError {
  fn kind(&self) -> StoreErrorKind;
}

// ─── Query types ─────────────────────────────────────────────────────────────

/// A pagination window. `limit` rows are returned starting `offset` rows in.
#[derive(Debug, Clone, Copy)]
pub struct Page {
  pub limit:  u32,
  pub offset: u32,
}

impl Page {
  pub const fn new(limit: u32, offset: u32) -> Self {
    Self { limit, offset }
  }
}

impl Default for Page {
  /// First fifty rows. Routes with their own default window construct the
  /// page explicitly.
  fn default() -> Self {
    Self { limit: 50, offset: 0 }
  }
}

/// Parameters for [`PortfolioStore::list_skills`].
#[derive(Debug, Clone, Default)]
pub struct SkillQuery {
  pub category:    Option<SkillCategory>,
  pub proficiency: Option<Proficiency>,
  pub featured:    Option<bool>,
  pub page:        Page,
}

/// The fixed set of columns a project listing may be ordered by.
///
/// Client sort input is parsed into this enum and never interpolated into
/// SQL as-is; an unrecognised field fails at the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSort {
  #[default]
  Priority,
  CreatedAt,
  UpdatedAt,
  Title,
  StartDate,
}

impl ProjectSort {
  /// The ORDER BY column this sort key maps to.
  pub fn column(&self) -> &'static str {
    match self {
      Self::Priority => "priority",
      Self::CreatedAt => "created_at",
      Self::UpdatedAt => "updated_at",
      Self::Title => "title",
      Self::StartDate => "start_date",
    }
  }
}

impl FromStr for ProjectSort {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "priority" => Ok(Self::Priority),
      "created_at" => Ok(Self::CreatedAt),
      "updated_at" => Ok(Self::UpdatedAt),
      "title" => Ok(Self::Title),
      "start_date" => Ok(Self::StartDate),
      other => Err(Error::UnknownSortField(other.to_string())),
    }
  }
}

/// Sort direction. Listings default to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  Asc,
  #[default]
  Desc,
}

impl SortOrder {
  pub fn as_sql(&self) -> &'static str {
    match self {
      Self::Asc => "ASC",
      Self::Desc => "DESC",
    }
  }
}

impl FromStr for SortOrder {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "ASC" => Ok(Self::Asc),
      "DESC" => Ok(Self::Desc),
      other => Err(Error::UnknownSortOrder(other.to_string())),
    }
  }
}

/// Parameters for [`PortfolioStore::list_projects`].
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
  /// Case-insensitive substring over attached skill names; only projects
  /// with at least one matching skill are returned.
  pub skill:    Option<String>,
  pub status:   Option<ProjectStatus>,
  pub featured: Option<bool>,
  pub sort:     ProjectSort,
  pub order:    SortOrder,
  pub page:     Page,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Folio portfolio store backend.
///
/// The profile is a singleton: accessors take no id, and owned rows
/// (projects, work experiences, educations) are attached to whichever
/// profile exists. Deletions are soft: a deleted row is invisible to every
/// read but remains on disk.
///
/// Listing methods return `(rows, total)` where `total` counts matches
/// before the pagination window is applied.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PortfolioStore: Send + Sync {
  type Error: StoreError + std::error::Error + Send + Sync + 'static;

  // ── Profile ───────────────────────────────────────────────────────────

  /// The bare profile row. Returns `None` if none has been created yet.
  fn get_profile(
    &self,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  /// The profile with its work experiences and educations attached, both
  /// ordered by start date descending.
  fn profile_overview(
    &self,
  ) -> impl Future<Output = Result<Option<ProfileOverview>, Self::Error>>
  + Send
  + '_;

  /// Create the singleton profile. Fails with a conflict if a profile
  /// already exists.
  fn create_profile(
    &self,
    input: NewProfile,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Merge the provided fields into the profile. Returns `None` if no
  /// profile exists.
  fn update_profile(
    &self,
    changes: ProfileUpdate,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  // ── Skills ────────────────────────────────────────────────────────────

  /// List skills filtered by `query`, ordered by name ascending.
  fn list_skills<'a>(
    &'a self,
    query: &'a SkillQuery,
  ) -> impl Future<Output = Result<(Vec<Skill>, u64), Self::Error>> + Send + 'a;

  /// The featured skills, ordered by years of experience descending then
  /// name ascending.
  fn top_skills(
    &self,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<Skill>, Self::Error>> + Send + '_;

  /// Create a skill. Fails with a conflict on a duplicate name.
  fn create_skill(
    &self,
    input: NewSkill,
  ) -> impl Future<Output = Result<Skill, Self::Error>> + Send + '_;

  /// Soft-delete a skill. Returns `false` if the id does not resolve.
  fn delete_skill(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Projects ──────────────────────────────────────────────────────────

  /// List projects filtered and ordered by `query`, each with its skills
  /// attached.
  fn list_projects<'a>(
    &'a self,
    query: &'a ProjectQuery,
  ) -> impl Future<Output = Result<(Vec<ProjectWithSkills>, u64), Self::Error>>
  + Send
  + 'a;

  /// A single project with its skills. Returns `None` if not found.
  fn get_project(
    &self,
    id: i64,
  ) -> impl Future<
    Output = Result<Option<ProjectWithSkills>, Self::Error>,
  > + Send
  + '_;

  /// Create a project and its skill associations in one transaction.
  ///
  /// Skill references that do not resolve are skipped. Fails if no profile
  /// exists to own the project.
  fn create_project(
    &self,
    input: NewProject,
  ) -> impl Future<Output = Result<ProjectWithSkills, Self::Error>> + Send + '_;

  /// Merge the provided fields into a project. When `changes.skills` is
  /// present the association set is replaced wholesale, in the same
  /// transaction. Returns `None` if the project does not exist.
  fn update_project(
    &self,
    id: i64,
    changes: ProjectUpdate,
  ) -> impl Future<
    Output = Result<Option<ProjectWithSkills>, Self::Error>,
  > + Send
  + '_;

  /// Soft-delete a project. Returns `false` if the id does not resolve.
  fn delete_project(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Career history ────────────────────────────────────────────────────

  /// Attach a work experience to the profile. Fails if no profile exists.
  fn add_work_experience(
    &self,
    input: NewWorkExperience,
  ) -> impl Future<Output = Result<WorkExperience, Self::Error>> + Send + '_;

  /// Attach an education entry to the profile. Fails if no profile exists.
  fn add_education(
    &self,
    input: NewEducation,
  ) -> impl Future<Output = Result<Education, Self::Error>> + Send + '_;

  // ── Search ────────────────────────────────────────────────────────────
  //
  // Each method matches the trimmed term as a case-insensitive substring
  // of that entity's searchable fields (OR across fields).

  /// Match profiles on name, bio, title, or location.
  fn search_profiles<'a>(
    &'a self,
    term: &'a str,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Profile>, Self::Error>> + Send + 'a;

  /// Match projects on title, description, or short description; ordered by
  /// priority descending then update recency.
  fn search_projects<'a>(
    &'a self,
    term: &'a str,
    page: Page,
  ) -> impl Future<Output = Result<Vec<ProjectWithSkills>, Self::Error>>
  + Send
  + 'a;

  /// Match skills on name, description, or category; featured first, then
  /// name ascending.
  fn search_skills<'a>(
    &'a self,
    term: &'a str,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Skill>, Self::Error>> + Send + 'a;

  /// Match work experiences on company, position, description, or location;
  /// most recent start date first.
  fn search_work_experience<'a>(
    &'a self,
    term: &'a str,
    page: Page,
  ) -> impl Future<Output = Result<Vec<WorkExperience>, Self::Error>> + Send + 'a;

  /// Match educations on institution, degree, field of study, or
  /// description; most recent start date first.
  fn search_education<'a>(
    &'a self,
    term: &'a str,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Education>, Self::Error>> + Send + 'a;

  // ── Liveness ──────────────────────────────────────────────────────────

  /// Round-trip the backend. Used by the health endpoint.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
