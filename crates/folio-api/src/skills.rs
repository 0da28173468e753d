//! Handlers for `/skills` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/skills` | `?category&proficiency&featured&limit&offset`; name ASC |
//! | `GET`  | `/skills/top` | `?limit` (default 10); featured, most experienced first |
//! | `POST` | `/skills` | 201; 409 on a duplicate name |

use axum::{
  Json,
  extract::{Query, State, rejection::JsonRejection},
  http::StatusCode,
};
use folio_core::{
  skill::{NewSkill, Proficiency, Skill, SkillCategory},
  store::{Page, PortfolioStore, SkillQuery, StoreError as _, StoreErrorKind},
};
use serde::Deserialize;

use crate::{
  ApiState,
  error::ApiError,
  response::{Envelope, Pagination},
  validate::{
    FieldErrors, check_bool, check_enum, check_int, check_limit, check_offset,
    check_required_enum, check_required_text, check_text, check_url, json_body,
  },
};

const CATEGORY_MSG: &str =
  "must be one of: Programming Languages, Frameworks, Databases, Tools, Cloud Services, Other";
const PROFICIENCY_MSG: &str = "must be one of: Beginner, Intermediate, Advanced, Expert";

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub category:    Option<String>,
  pub proficiency: Option<String>,
  pub featured:    Option<String>,
  pub limit:       Option<String>,
  pub offset:      Option<String>,
}

pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Envelope<Vec<Skill>>>, ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let mut errors = FieldErrors::default();
  let query = SkillQuery {
    category: check_enum::<SkillCategory>(
      &mut errors,
      "category",
      params.category.as_deref(),
      CATEGORY_MSG,
    ),
    proficiency: check_enum::<Proficiency>(
      &mut errors,
      "proficiency",
      params.proficiency.as_deref(),
      PROFICIENCY_MSG,
    ),
    featured: check_bool(&mut errors, "featured", params.featured.as_deref()),
    page: Page::new(
      check_limit(&mut errors, params.limit.as_deref(), 50),
      check_offset(&mut errors, params.offset.as_deref()),
    ),
  };
  errors.finish()?;

  let (skills, total) = state
    .store
    .list_skills(&query)
    .await
    .map_err(|e| ApiError::internal(state.env, "Error fetching skills", e))?;
  Ok(Json(Envelope::paginated(skills, Pagination::new(total, query.page))))
}

// ─── Top ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct TopParams {
  pub limit: Option<String>,
}

pub async fn top<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<TopParams>,
) -> Result<Json<Envelope<Vec<Skill>>>, ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let mut errors = FieldErrors::default();
  let limit = check_limit(&mut errors, params.limit.as_deref(), 10);
  errors.finish()?;

  let skills = state
    .store
    .top_skills(limit)
    .await
    .map_err(|e| ApiError::internal(state.env, "Error fetching top skills", e))?;
  Ok(Json(Envelope::data(skills)))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SkillBody {
  pub name:                Option<String>,
  pub category:            Option<String>,
  pub proficiency_level:   Option<String>,
  pub years_of_experience: Option<i64>,
  pub is_featured:         Option<bool>,
  pub icon_url:            Option<String>,
  pub description:         Option<String>,
}

impl SkillBody {
  fn into_new(self) -> Result<NewSkill, ApiError> {
    let mut errors = FieldErrors::default();
    let name = check_required_text(
      &mut errors,
      "name",
      self.name.as_deref(),
      1,
      50,
      "must be between 1 and 50 characters",
    );
    let category = check_required_enum::<SkillCategory>(
      &mut errors,
      "category",
      self.category.as_deref(),
      CATEGORY_MSG,
    );
    let proficiency = check_required_enum::<Proficiency>(
      &mut errors,
      "proficiency_level",
      self.proficiency_level.as_deref(),
      PROFICIENCY_MSG,
    );
    let years = check_int(
      &mut errors,
      "years_of_experience",
      self.years_of_experience,
      0,
      50,
      "must be an integer between 0 and 50",
    );
    let icon_url = check_url(&mut errors, "icon_url", self.icon_url.as_deref());
    let description = check_text(
      &mut errors,
      "description",
      self.description.as_deref(),
      0,
      500,
      "must be at most 500 characters",
    );
    errors.finish()?;

    Ok(NewSkill {
      name:                name.unwrap_or_default(),
      category:            category.unwrap_or_default(),
      proficiency_level:   proficiency.unwrap_or_default(),
      years_of_experience: years.map(|y| y as u32),
      is_featured:         self.is_featured.unwrap_or(false),
      icon_url,
      description,
    })
  }
}

pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<SkillBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Skill>>), ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let input = json_body(body)?.into_new()?;
  let skill = state
    .store
    .create_skill(input)
    .await
    .map_err(|e| match e.kind() {
      StoreErrorKind::Conflict => ApiError::Conflict("Duplicate field value entered"),
      _ => ApiError::internal(state.env, "Error creating skill", e),
    })?;
  Ok((
    StatusCode::CREATED,
    Json(Envelope::message(skill, "Skill created successfully")),
  ))
}
