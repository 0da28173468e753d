//! Handler for `/search`, the cross-entity lookup endpoint.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/search` | `?q=<term>&type=<entity>&limit&offset`; `q` is required |
//!
//! With `type=all` (the default) every entity group is searched with a fixed
//! window of ten rows each and the response carries no pagination block; a
//! narrowed search honours `limit`/`offset` and echoes them back.

use axum::{
  Json,
  extract::{Query, State},
};
use folio_core::{
  education::Education,
  experience::WorkExperience,
  profile::Profile,
  project::ProjectWithSkills,
  skill::Skill,
  store::{Page, PortfolioStore},
};
use serde::{Deserialize, Serialize};

use crate::{
  ApiState,
  error::ApiError,
  validate::{FieldErrors, check_limit, check_offset},
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
  pub q:      Option<String>,
  #[serde(rename = "type")]
  pub entity: Option<String>,
  pub limit:  Option<String>,
  pub offset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchType {
  All,
  Profile,
  Projects,
  Skills,
  Experience,
  Education,
}

impl SearchType {
  fn parse(raw: &str) -> Option<Self> {
    match raw {
      "all" => Some(Self::All),
      "profile" => Some(Self::Profile),
      "projects" => Some(Self::Projects),
      "skills" => Some(Self::Skills),
      "experience" => Some(Self::Experience),
      "education" => Some(Self::Education),
      _ => None,
    }
  }
}

/// Top-level search response. Unlike the other endpoints this is not an
/// [`Envelope`](crate::response::Envelope): the body carries the echoed query
/// and a per-group result map instead of a single `data` payload.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
  success:       bool,
  query:         String,
  total_results: usize,
  data:          SearchResults,
  #[serde(skip_serializing_if = "Option::is_none")]
  pagination:    Option<Window>,
}

/// Result groups. Absent groups are omitted from the JSON entirely, so a
/// narrowed search answers with exactly one key under `data`.
#[derive(Debug, Default, Serialize)]
struct SearchResults {
  #[serde(skip_serializing_if = "Option::is_none")]
  profiles:         Option<Vec<Profile>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  projects:         Option<Vec<ProjectWithSkills>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  skills:           Option<Vec<Skill>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  work_experiences: Option<Vec<WorkExperience>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  educations:       Option<Vec<Education>>,
}

impl SearchResults {
  fn total(&self) -> usize {
    fn len<T>(group: &Option<Vec<T>>) -> usize {
      group.as_ref().map_or(0, Vec::len)
    }
    len(&self.profiles)
      + len(&self.projects)
      + len(&self.skills)
      + len(&self.work_experiences)
      + len(&self.educations)
  }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Window {
  limit:  u32,
  offset: u32,
}

pub async fn run<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let term = params
    .q
    .as_deref()
    .map(str::trim)
    .filter(|q| !q.is_empty())
    .map(str::to_owned)
    .ok_or(ApiError::BadRequest("Search query is required"))?;

  let mut errors = FieldErrors::default();
  let entity = match params.entity.as_deref() {
    None => SearchType::All,
    Some(raw) => SearchType::parse(raw).unwrap_or_else(|| {
      errors.push("type", "must be one of: all, profile, projects, skills, experience, education");
      SearchType::All
    }),
  };
  let limit = check_limit(&mut errors, params.limit.as_deref(), 50);
  let offset = check_offset(&mut errors, params.offset.as_deref());
  errors.finish()?;

  // `all` fans out over every group with a small fixed window; the client
  // window only applies once the search is narrowed to one entity.
  let page = if entity == SearchType::All {
    Page::new(10, 0)
  } else {
    Page::new(limit, offset)
  };

  let mut data = SearchResults::default();
  if matches!(entity, SearchType::All | SearchType::Profile) {
    data.profiles = Some(
      state
        .store
        .search_profiles(&term, page)
        .await
        .map_err(|e| ApiError::internal(state.env, "Error performing search", e))?,
    );
  }
  if matches!(entity, SearchType::All | SearchType::Projects) {
    data.projects = Some(
      state
        .store
        .search_projects(&term, page)
        .await
        .map_err(|e| ApiError::internal(state.env, "Error performing search", e))?,
    );
  }
  if matches!(entity, SearchType::All | SearchType::Skills) {
    data.skills = Some(
      state
        .store
        .search_skills(&term, page)
        .await
        .map_err(|e| ApiError::internal(state.env, "Error performing search", e))?,
    );
  }
  if matches!(entity, SearchType::All | SearchType::Experience) {
    data.work_experiences = Some(
      state
        .store
        .search_work_experience(&term, page)
        .await
        .map_err(|e| ApiError::internal(state.env, "Error performing search", e))?,
    );
  }
  if matches!(entity, SearchType::All | SearchType::Education) {
    data.educations = Some(
      state
        .store
        .search_education(&term, page)
        .await
        .map_err(|e| ApiError::internal(state.env, "Error performing search", e))?,
    );
  }

  let pagination = (entity != SearchType::All).then_some(Window { limit, offset });
  Ok(Json(SearchResponse {
    success: true,
    query: term,
    total_results: data.total(),
    data,
    pagination,
  }))
}
