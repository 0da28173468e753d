//! Handlers for `/profile` endpoints. The portfolio owner is a singleton.
//!
//! | Method  | Path       | Notes |
//! |---------|------------|-------|
//! | `GET`   | `/profile` | Overview with work history and education; 404 until created |
//! | `POST`  | `/profile` | Create the singleton; 409 when one already exists |
//! | `PUT`   | `/profile` | Merge provided fields, respond with the refreshed overview |
//! | `PATCH` | `/profile` | Merge provided fields, respond with the bare profile |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
};
use folio_core::{
  profile::{NewProfile, Profile, ProfileOverview, ProfileUpdate},
  store::{PortfolioStore, StoreError as _, StoreErrorKind},
};
use serde::Deserialize;

use crate::{
  ApiState,
  error::ApiError,
  response::Envelope,
  validate::{FieldErrors, check_email, check_phone, check_text, check_url, json_body},
};

// ─── Body ────────────────────────────────────────────────────────────────────

/// Loose request body. Every field is optional so the same shape serves
/// create and merge; create additionally requires `name` and `email`.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileBody {
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

impl ProfileBody {
  fn checked_fields(self, errors: &mut FieldErrors) -> ProfileUpdate {
    ProfileUpdate {
      name: check_text(
        errors,
        "name",
        self.name.as_deref(),
        1,
        100,
        "must be between 1 and 100 characters",
      ),
      email:    check_email(errors, "email", self.email.as_deref()),
      bio:      check_text(errors, "bio", self.bio.as_deref(), 0, 1000, "must be at most 1000 characters"),
      title:    check_text(errors, "title", self.title.as_deref(), 0, 100, "must be at most 100 characters"),
      location: check_text(errors, "location", self.location.as_deref(), 0, 100, "must be at most 100 characters"),
      phone:    check_phone(errors, "phone", self.phone.as_deref()),
      website:  check_url(errors, "website", self.website.as_deref()),
      github_url:        check_url(errors, "github_url", self.github_url.as_deref()),
      linkedin_url:      check_url(errors, "linkedin_url", self.linkedin_url.as_deref()),
      twitter_url:       check_url(errors, "twitter_url", self.twitter_url.as_deref()),
      profile_image_url: check_url(errors, "profile_image_url", self.profile_image_url.as_deref()),
      resume_url:        check_url(errors, "resume_url", self.resume_url.as_deref()),
    }
  }

  fn into_update(self) -> Result<ProfileUpdate, ApiError> {
    let mut errors = FieldErrors::default();
    let update = self.checked_fields(&mut errors);
    errors.finish()?;
    Ok(update)
  }

  fn into_new(self) -> Result<NewProfile, ApiError> {
    let mut errors = FieldErrors::default();
    if self.name.is_none() {
      errors.push("name", "is required");
    }
    if self.email.is_none() {
      errors.push("email", "is required");
    }
    let fields = self.checked_fields(&mut errors);
    errors.finish()?;

    // Required fields are Some once finish has passed.
    Ok(NewProfile {
      name:              fields.name.unwrap_or_default(),
      email:             fields.email.unwrap_or_default(),
      bio:               fields.bio,
      title:             fields.title,
      location:          fields.location,
      phone:             fields.phone,
      website:           fields.website,
      github_url:        fields.github_url,
      linkedin_url:      fields.linkedin_url,
      twitter_url:       fields.twitter_url,
      profile_image_url: fields.profile_image_url,
      resume_url:        fields.resume_url,
    })
  }
}

// ─── Overview ────────────────────────────────────────────────────────────────

pub async fn overview<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Envelope<ProfileOverview>>, ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let overview = state
    .store
    .profile_overview()
    .await
    .map_err(|e| ApiError::internal(state.env, "Error fetching profile", e))?
    .ok_or(ApiError::NotFound("Profile not found"))?;
  Ok(Json(Envelope::data(overview)))
}

// ─── Create ──────────────────────────────────────────────────────────────────

pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<ProfileBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Profile>>), ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let input = json_body(body)?.into_new()?;
  let profile = state
    .store
    .create_profile(input)
    .await
    .map_err(|e| match e.kind() {
      StoreErrorKind::Conflict => ApiError::Conflict("Profile already exists"),
      _ => ApiError::internal(state.env, "Error creating profile", e),
    })?;
  Ok((
    StatusCode::CREATED,
    Json(Envelope::message(profile, "Profile created successfully")),
  ))
}

// ─── Update (PUT) ────────────────────────────────────────────────────────────

/// PUT merges like PATCH but answers with the refreshed overview, so a
/// client replacing its cached copy gets the attached history back too.
pub async fn replace<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<ProfileBody>, JsonRejection>,
) -> Result<Json<Envelope<ProfileOverview>>, ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let changes = json_body(body)?.into_update()?;
  state
    .store
    .update_profile(changes)
    .await
    .map_err(|e| ApiError::internal(state.env, "Error updating profile", e))?
    .ok_or(ApiError::NotFound("Profile not found"))?;

  let overview = state
    .store
    .profile_overview()
    .await
    .map_err(|e| ApiError::internal(state.env, "Error updating profile", e))?
    .ok_or(ApiError::NotFound("Profile not found"))?;
  Ok(Json(Envelope::message(overview, "Profile updated successfully")))
}

// ─── Update (PATCH) ──────────────────────────────────────────────────────────

pub async fn patch<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<ProfileBody>, JsonRejection>,
) -> Result<Json<Envelope<Profile>>, ApiError>
where
  S: PortfolioStore + Clone + 'static,
{
  let changes = json_body(body)?.into_update()?;
  let profile = state
    .store
    .update_profile(changes)
    .await
    .map_err(|e| ApiError::internal(state.env, "Error updating profile", e))?
    .ok_or(ApiError::NotFound("Profile not found"))?;
  Ok(Json(Envelope::message(profile, "Profile updated successfully")))
}
