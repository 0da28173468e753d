//! Handlers for `/projects` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/projects` | `?skill&status&featured&limit&offset&sort&order` |
//! | `GET`  | `/projects/{id}` | 404 when missing, 400 on a malformed id |
//! | `POST` | `/projects` | 201; embedded skill references resolved, unknown ids skipped |
//! | `PUT`  | `/projects/{id}` | Merge; a provided `skills` array replaces the set |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
};
use folio_core::{
  project::{NewProject, ProjectStatus, ProjectUpdate, ProjectWithSkills, SkillLink},
  skill::Proficiency,
  store::{
    Page, PortfolioStore, ProjectQuery, ProjectSort, SortOrder, StoreError as _, StoreErrorKind,
  },
};
use serde::Deserialize;

use crate::{
  ApiState,
  error::ApiError,
  response::{Envelope, Pagination},
  validate::{
    FieldErrors, check_bool, check_date, check_enum, check_int, check_limit, check_offset,
    check_required_text, check_text, check_url, json_body, path_id,
  },
};

const STATUS_MSG: &str = "must be one of: Planning, In Progress, Completed, On Hold, Archived";
const SORT_MSG: &str = "must be one of: priority, created_at, updated_at, title, start_date";
const ORDER_MSG: &str = "must be ASC or DESC";
const LINK_PROFICIENCY_MSG: &str =
  "proficiency_used must be one of: Beginner, Intermediate, Advanced, Expert";

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub skill:    Option<String>,
  pub status:   Option<String>,
  pub featured: Option<String>,
  pub limit:    Option<String>,
  pub offset:   Option<String>,
  pub sort:     Option<String>,
  pub order:    Option<String>,
}

pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Envelope<Vec<ProjectWithSkills>>>, ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let mut errors = FieldErrors::default();
  let query = ProjectQuery {
    skill: params.skill.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty()),
    status: check_enum::<ProjectStatus>(&mut errors, "status", params.status.as_deref(), STATUS_MSG),
    featured: check_bool(&mut errors, "featured", params.featured.as_deref()),
    sort: check_enum::<ProjectSort>(&mut errors, "sort", params.sort.as_deref(), SORT_MSG)
      .unwrap_or_default(),
    order: check_enum::<SortOrder>(&mut errors, "order", params.order.as_deref(), ORDER_MSG)
      .unwrap_or_default(),
    page: Page::new(
      check_limit(&mut errors, params.limit.as_deref(), 20),
      check_offset(&mut errors, params.offset.as_deref()),
    ),
  };
  errors.finish()?;

  let (projects, total) = state
    .store
    .list_projects(&query)
    .await
    .map_err(|e| ApiError::internal(state.env, "Error fetching projects", e))?;
  Ok(Json(Envelope::paginated(projects, Pagination::new(total, query.page))))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<ProjectWithSkills>>, ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let id = path_id(id)?;
  let project = state
    .store
    .get_project(id)
    .await
    .map_err(|e| ApiError::internal(state.env, "Error fetching project", e))?
    .ok_or(ApiError::NotFound("Project not found"))?;
  Ok(Json(Envelope::data(project)))
}

// ─── Body ────────────────────────────────────────────────────────────────────

/// Loose request body shared by create and update; create additionally
/// requires `title` and `description`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectBody {
  pub title:             Option<String>,
  pub description:       Option<String>,
  pub short_description: Option<String>,
  pub project_url:       Option<String>,
  pub github_url:        Option<String>,
  pub demo_url:          Option<String>,
  pub image_url:         Option<String>,
  pub status:            Option<String>,
  pub priority:          Option<i64>,
  pub is_featured:       Option<bool>,
  pub start_date:        Option<String>,
  pub end_date:          Option<String>,
  pub skills:            Option<Vec<LinkBody>>,
}

/// One embedded skill reference.
#[derive(Debug, Deserialize)]
pub struct LinkBody {
  pub skill_id:         i64,
  pub proficiency_used: Option<String>,
}

fn check_links(errors: &mut FieldErrors, links: Vec<LinkBody>) -> Vec<SkillLink> {
  links
    .into_iter()
    .map(|link| SkillLink {
      skill_id:         link.skill_id,
      proficiency_used: check_enum::<Proficiency>(
        errors,
        "skills",
        link.proficiency_used.as_deref(),
        LINK_PROFICIENCY_MSG,
      ),
    })
    .collect()
}

impl ProjectBody {
  fn into_new(mut self) -> Result<NewProject, ApiError> {
    let mut errors = FieldErrors::default();
    let title = check_required_text(
      &mut errors,
      "title",
      self.title.as_deref(),
      1,
      100,
      "must be between 1 and 100 characters",
    );
    let description = check_required_text(
      &mut errors,
      "description",
      self.description.as_deref(),
      1,
      usize::MAX,
      "must not be empty",
    );
    let short_description = check_text(
      &mut errors,
      "short_description",
      self.short_description.as_deref(),
      0,
      255,
      "must be at most 255 characters",
    );
    let project_url = check_url(&mut errors, "project_url", self.project_url.as_deref());
    let github_url = check_url(&mut errors, "github_url", self.github_url.as_deref());
    let demo_url = check_url(&mut errors, "demo_url", self.demo_url.as_deref());
    let image_url = check_url(&mut errors, "image_url", self.image_url.as_deref());
    let status = check_enum::<ProjectStatus>(&mut errors, "status", self.status.as_deref(), STATUS_MSG);
    let priority = check_int(&mut errors, "priority", self.priority, 0, 10, "must be an integer between 0 and 10");
    let start_date = check_date(&mut errors, "start_date", self.start_date.as_deref());
    let end_date = check_date(&mut errors, "end_date", self.end_date.as_deref());
    let skills = self
      .skills
      .take()
      .map(|links| check_links(&mut errors, links))
      .unwrap_or_default();
    errors.finish()?;

    Ok(NewProject {
      title:       title.unwrap_or_default(),
      description: description.unwrap_or_default(),
      short_description,
      project_url,
      github_url,
      demo_url,
      image_url,
      status:      status.unwrap_or_default(),
      priority:    priority.map_or(0, |p| p as u8),
      is_featured: self.is_featured.unwrap_or(false),
      start_date,
      end_date,
      skills,
    })
  }

  fn into_update(mut self) -> Result<ProjectUpdate, ApiError> {
    let mut errors = FieldErrors::default();
    let update = ProjectUpdate {
      title: check_text(
        &mut errors,
        "title",
        self.title.as_deref(),
        1,
        100,
        "must be between 1 and 100 characters",
      ),
      description: check_text(
        &mut errors,
        "description",
        self.description.as_deref(),
        1,
        usize::MAX,
        "must not be empty",
      ),
      short_description: check_text(
        &mut errors,
        "short_description",
        self.short_description.as_deref(),
        0,
        255,
        "must be at most 255 characters",
      ),
      project_url: check_url(&mut errors, "project_url", self.project_url.as_deref()),
      github_url:  check_url(&mut errors, "github_url", self.github_url.as_deref()),
      demo_url:    check_url(&mut errors, "demo_url", self.demo_url.as_deref()),
      image_url:   check_url(&mut errors, "image_url", self.image_url.as_deref()),
      status: check_enum::<ProjectStatus>(&mut errors, "status", self.status.as_deref(), STATUS_MSG),
      priority: check_int(&mut errors, "priority", self.priority, 0, 10, "must be an integer between 0 and 10")
        .map(|p| p as u8),
      is_featured: self.is_featured,
      start_date:  check_date(&mut errors, "start_date", self.start_date.as_deref()),
      end_date:    check_date(&mut errors, "end_date", self.end_date.as_deref()),
      skills:      self.skills.take().map(|links| check_links(&mut errors, links)),
    };
    errors.finish()?;
    Ok(update)
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<ProjectBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<ProjectWithSkills>>), ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let input = json_body(body)?.into_new()?;
  let project = state
    .store
    .create_project(input)
    .await
    .map_err(|e| match e.kind() {
      StoreErrorKind::NotFound => ApiError::NotFound("Profile not found"),
      StoreErrorKind::Conflict => ApiError::Conflict("Duplicate field value entered"),
      StoreErrorKind::Other => ApiError::internal(state.env, "Error creating project", e),
    })?;
  Ok((
    StatusCode::CREATED,
    Json(Envelope::message(project, "Project created successfully")),
  ))
}

// ─── Update ──────────────────────────────────────────────────────────────────

pub async fn update<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<i64>, PathRejection>,
  body: Result<Json<ProjectBody>, JsonRejection>,
) -> Result<Json<Envelope<ProjectWithSkills>>, ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let id = path_id(id)?;
  let changes = json_body(body)?.into_update()?;
  let project = state
    .store
    .update_project(id, changes)
    .await
    .map_err(|e| match e.kind() {
      StoreErrorKind::Conflict => ApiError::Conflict("Duplicate field value entered"),
      _ => ApiError::internal(state.env, "Error updating project", e),
    })?
    .ok_or(ApiError::NotFound("Project not found"))?;
  Ok(Json(Envelope::message(project, "Project updated successfully")))
}
