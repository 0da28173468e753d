//! [`SqliteStore`], the SQLite implementation of [`PortfolioStore`].

use std::path::Path;

use chrono::Utc;
use folio_core::{
  education::{Education, NewEducation},
  experience::{NewWorkExperience, WorkExperience},
  profile::{NewProfile, Profile, ProfileOverview, ProfileUpdate},
  project::{NewProject, ProjectUpdate, ProjectWithSkills, SkillLink},
  skill::{NewSkill, Skill},
  store::{Page, PortfolioStore, ProjectQuery, SkillQuery},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{
    RawEducation, RawProfile, RawProject, RawSkill, RawSkillUsage,
    RawWorkExperience, encode_date, encode_dt, encode_string_list,
  },
  schema::SCHEMA,
};

// ─── Column lists ────────────────────────────────────────────────────────────
//
// Shared between the page queries and the re-reads after writes. The order
// here is the order the `from_row` readers in `encode.rs` use.

const PROFILE_COLS: &str = "id, name, email, bio, title, location, phone, \
   website, github_url, linkedin_url, twitter_url, profile_image_url, \
   resume_url, created_at, updated_at";

const SKILL_COLS: &str = "id, name, category, proficiency_level, \
   years_of_experience, is_featured, icon_url, description, created_at, \
   updated_at";

// Project queries always alias the table as `p` so the skill-name filter can
// correlate its EXISTS subquery.
const PROJECT_COLS: &str = "p.id, p.profile_id, p.title, p.description, \
   p.short_description, p.project_url, p.github_url, p.demo_url, \
   p.image_url, p.status, p.priority, p.is_featured, p.start_date, \
   p.end_date, p.created_at, p.updated_at";

const SKILL_USAGE_COLS: &str = "s.id, s.name, s.category, \
   s.proficiency_level, s.years_of_experience, s.is_featured, s.icon_url, \
   s.description, s.created_at, s.updated_at, ps.proficiency_used";

const EXPERIENCE_COLS: &str = "id, profile_id, company_name, position, \
   description, responsibilities, achievements, location, employment_type, \
   start_date, end_date, is_current, company_url, created_at, updated_at";

const EDUCATION_COLS: &str = "id, profile_id, institution_name, degree, \
   field_of_study, description, gpa, location, start_date, end_date, \
   is_current, institution_url, achievements, created_at, updated_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Folio portfolio store backed by a single SQLite file.
///
/// Cloning is cheap; clones share the reference-counted connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a store backed by an in-memory database, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PortfolioStore impl ─────────────────────────────────────────────────────

impl PortfolioStore for SqliteStore {
  type Error = Error;

  // ── Profile ───────────────────────────────────────────────────────────────

  async fn get_profile(&self) -> Result<Option<Profile>> {
    let raw: Option<RawProfile> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PROFILE_COLS} FROM profiles
                 WHERE deleted_at IS NULL LIMIT 1"
              ),
              [],
              RawProfile::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn profile_overview(&self) -> Result<Option<ProfileOverview>> {
    let raw: Option<(
      RawProfile,
      Vec<RawWorkExperience>,
      Vec<RawEducation>,
    )> = self
      .conn
      .call(|conn| {
        let profile = conn
          .query_row(
            &format!(
              "SELECT {PROFILE_COLS} FROM profiles
               WHERE deleted_at IS NULL LIMIT 1"
            ),
            [],
            RawProfile::from_row,
          )
          .optional()?;
        let Some(profile) = profile else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(&format!(
          "SELECT {EXPERIENCE_COLS} FROM work_experiences
           WHERE profile_id = ?1 AND deleted_at IS NULL
           ORDER BY start_date DESC"
        ))?;
        let experiences = stmt
          .query_map([profile.id], RawWorkExperience::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {EDUCATION_COLS} FROM educations
           WHERE profile_id = ?1 AND deleted_at IS NULL
           ORDER BY start_date DESC"
        ))?;
        let educations = stmt
          .query_map([profile.id], RawEducation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((profile, experiences, educations)))
      })
      .await?;

    let Some((profile, experiences, educations)) = raw else {
      return Ok(None);
    };

    Ok(Some(ProfileOverview {
      profile:          profile.into_profile()?,
      work_experiences: experiences
        .into_iter()
        .map(RawWorkExperience::into_experience)
        .collect::<Result<_>>()?,
      educations:       educations
        .into_iter()
        .map(RawEducation::into_education)
        .collect::<Result<_>>()?,
    }))
  }

  async fn create_profile(&self, input: NewProfile) -> Result<Profile> {
    let now_str = encode_dt(Utc::now());

    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        let live: i64 = conn.query_row(
          "SELECT COUNT(*) FROM profiles WHERE deleted_at IS NULL",
          [],
          |r| r.get(0),
        )?;
        if live > 0 {
          return Ok(None);
        }

        conn.execute(
          "INSERT INTO profiles (
             name, email, bio, title, location, phone, website, github_url,
             linkedin_url, twitter_url, profile_image_url, resume_url,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     ?13, ?13)",
          rusqlite::params![
            input.name,
            input.email,
            input.bio,
            input.title,
            input.location,
            input.phone,
            input.website,
            input.github_url,
            input.linkedin_url,
            input.twitter_url,
            input.profile_image_url,
            input.resume_url,
            now_str,
          ],
        )?;

        let raw = conn.query_row(
          &format!("SELECT {PROFILE_COLS} FROM profiles WHERE id = ?1"),
          [conn.last_insert_rowid()],
          RawProfile::from_row,
        )?;
        Ok(Some(raw))
      })
      .await
      .map_err(map_unique)?;

    let Some(raw) = raw else {
      return Err(Error::ProfileExists);
    };
    raw.into_profile()
  }

  async fn update_profile(
    &self,
    changes: ProfileUpdate,
  ) -> Result<Option<Profile>> {
    let now_str = encode_dt(Utc::now());

    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE profiles SET
             name              = COALESCE(?1, name),
             email             = COALESCE(?2, email),
             bio               = COALESCE(?3, bio),
             title             = COALESCE(?4, title),
             location          = COALESCE(?5, location),
             phone             = COALESCE(?6, phone),
             website           = COALESCE(?7, website),
             github_url        = COALESCE(?8, github_url),
             linkedin_url      = COALESCE(?9, linkedin_url),
             twitter_url       = COALESCE(?10, twitter_url),
             profile_image_url = COALESCE(?11, profile_image_url),
             resume_url        = COALESCE(?12, resume_url),
             updated_at        = ?13
           WHERE deleted_at IS NULL",
          rusqlite::params![
            changes.name,
            changes.email,
            changes.bio,
            changes.title,
            changes.location,
            changes.phone,
            changes.website,
            changes.github_url,
            changes.linkedin_url,
            changes.twitter_url,
            changes.profile_image_url,
            changes.resume_url,
            now_str,
          ],
        )?;

        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PROFILE_COLS} FROM profiles
                 WHERE deleted_at IS NULL LIMIT 1"
              ),
              [],
              RawProfile::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(map_unique)?;

    raw.map(RawProfile::into_profile).transpose()
  }

  // ── Skills ────────────────────────────────────────────────────────────────

  async fn list_skills(&self, query: &SkillQuery) -> Result<(Vec<Skill>, u64)> {
    let category = query.category.map(|c| c.as_str());
    let proficiency = query.proficiency.map(|p| p.as_str());
    let featured = query.featured;
    let limit = i64::from(query.page.limit);
    let offset = i64::from(query.page.offset);

    let (raws, total): (Vec<RawSkill>, i64) = self
      .conn
      .call(move |conn| {
        const FILTER: &str = "deleted_at IS NULL
             AND (?1 IS NULL OR category = ?1)
             AND (?2 IS NULL OR proficiency_level = ?2)
             AND (?3 IS NULL OR is_featured = ?3)";

        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM skills WHERE {FILTER}"),
          rusqlite::params![category, proficiency, featured],
          |r| r.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {SKILL_COLS} FROM skills
           WHERE {FILTER}
           ORDER BY name ASC
           LIMIT ?4 OFFSET ?5"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![category, proficiency, featured, limit, offset],
            RawSkill::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((rows, total))
      })
      .await?;

    let skills = raws
      .into_iter()
      .map(RawSkill::into_skill)
      .collect::<Result<_>>()?;
    Ok((skills, total as u64))
  }

  async fn top_skills(&self, limit: u32) -> Result<Vec<Skill>> {
    let limit = i64::from(limit);

    let raws: Vec<RawSkill> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SKILL_COLS} FROM skills
           WHERE deleted_at IS NULL AND is_featured = 1
           ORDER BY years_of_experience DESC, name ASC
           LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map([limit], RawSkill::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSkill::into_skill).collect()
  }

  async fn create_skill(&self, input: NewSkill) -> Result<Skill> {
    let now_str = encode_dt(Utc::now());

    let raw: RawSkill = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO skills (
             name, category, proficiency_level, years_of_experience,
             is_featured, icon_url, description, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          rusqlite::params![
            input.name,
            input.category.as_str(),
            input.proficiency_level.as_str(),
            input.years_of_experience,
            input.is_featured,
            input.icon_url,
            input.description,
            now_str,
          ],
        )?;

        let raw = conn.query_row(
          &format!("SELECT {SKILL_COLS} FROM skills WHERE id = ?1"),
          [conn.last_insert_rowid()],
          RawSkill::from_row,
        )?;
        Ok(raw)
      })
      .await
      .map_err(map_unique)?;

    raw.into_skill()
  }

  async fn delete_skill(&self, id: i64) -> Result<bool> {
    let now_str = encode_dt(Utc::now());

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE skills SET deleted_at = ?2
           WHERE id = ?1 AND deleted_at IS NULL",
          rusqlite::params![id, now_str],
        )?)
      })
      .await?;

    Ok(affected > 0)
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  async fn list_projects(
    &self,
    query: &ProjectQuery,
  ) -> Result<(Vec<ProjectWithSkills>, u64)> {
    let status = query.status.map(|s| s.as_str());
    let featured = query.featured;
    let skill_pattern = query.skill.as_deref().map(|s| format!("%{s}%"));
    let order_by = format!("p.{} {}", query.sort.column(), query.order.as_sql());
    let limit = i64::from(query.page.limit);
    let offset = i64::from(query.page.offset);

    let (pairs, total): (Vec<(RawProject, Vec<RawSkillUsage>)>, i64) = self
      .conn
      .call(move |conn| {
        const FILTER: &str = "p.deleted_at IS NULL
             AND (?1 IS NULL OR p.status = ?1)
             AND (?2 IS NULL OR p.is_featured = ?2)
             AND (?3 IS NULL OR EXISTS (
               SELECT 1 FROM project_skills ps
               JOIN skills s ON s.id = ps.skill_id AND s.deleted_at IS NULL
               WHERE ps.project_id = p.id
                 AND ps.deleted_at IS NULL
                 AND s.name LIKE ?3))";

        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM projects p WHERE {FILTER}"),
          rusqlite::params![status, featured, skill_pattern],
          |r| r.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {PROJECT_COLS} FROM projects p
           WHERE {FILTER}
           ORDER BY {order_by}
           LIMIT ?4 OFFSET ?5"
        ))?;
        let page = stmt
          .query_map(
            rusqlite::params![status, featured, skill_pattern, limit, offset],
            RawProject::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut pairs = Vec::with_capacity(page.len());
        for raw in page {
          let usages = project_usages(conn, raw.id)?;
          pairs.push((raw, usages));
        }

        Ok((pairs, total))
      })
      .await?;

    let projects = pairs
      .into_iter()
      .map(|(raw, usages)| into_project_with_skills(raw, usages))
      .collect::<Result<_>>()?;
    Ok((projects, total as u64))
  }

  async fn get_project(&self, id: i64) -> Result<Option<ProjectWithSkills>> {
    let found: Option<(RawProject, Vec<RawSkillUsage>)> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            &format!(
              "SELECT {PROJECT_COLS} FROM projects p
               WHERE p.id = ?1 AND p.deleted_at IS NULL"
            ),
            [id],
            RawProject::from_row,
          )
          .optional()?;
        let Some(raw) = raw else {
          return Ok(None);
        };

        let usages = project_usages(conn, raw.id)?;
        Ok(Some((raw, usages)))
      })
      .await?;

    found
      .map(|(raw, usages)| into_project_with_skills(raw, usages))
      .transpose()
  }

  async fn create_project(
    &self,
    input: NewProject,
  ) -> Result<ProjectWithSkills> {
    let now_str = encode_dt(Utc::now());

    let created: Option<(RawProject, Vec<RawSkillUsage>)> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let profile_id: Option<i64> = tx
          .query_row(
            "SELECT id FROM profiles WHERE deleted_at IS NULL LIMIT 1",
            [],
            |r| r.get(0),
          )
          .optional()?;
        let Some(profile_id) = profile_id else {
          return Ok(None);
        };

        tx.execute(
          "INSERT INTO projects (
             profile_id, title, description, short_description, project_url,
             github_url, demo_url, image_url, status, priority, is_featured,
             start_date, end_date, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     ?13, ?14, ?14)",
          rusqlite::params![
            profile_id,
            input.title,
            input.description,
            input.short_description,
            input.project_url,
            input.github_url,
            input.demo_url,
            input.image_url,
            input.status.as_str(),
            i64::from(input.priority),
            input.is_featured,
            input.start_date.map(encode_date),
            input.end_date.map(encode_date),
            now_str,
          ],
        )?;
        let project_id = tx.last_insert_rowid();

        link_skills(&tx, project_id, &input.skills, &now_str)?;

        let raw = tx.query_row(
          &format!(
            "SELECT {PROJECT_COLS} FROM projects p WHERE p.id = ?1"
          ),
          [project_id],
          RawProject::from_row,
        )?;
        let usages = project_usages(&tx, project_id)?;

        tx.commit()?;
        Ok(Some((raw, usages)))
      })
      .await
      .map_err(map_unique)?;

    let Some((raw, usages)) = created else {
      return Err(Error::ProfileMissing);
    };
    into_project_with_skills(raw, usages)
  }

  async fn update_project(
    &self,
    id: i64,
    changes: ProjectUpdate,
  ) -> Result<Option<ProjectWithSkills>> {
    let now_str = encode_dt(Utc::now());

    let updated: Option<(RawProject, Vec<RawSkillUsage>)> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists: Option<i64> = tx
          .query_row(
            "SELECT id FROM projects WHERE id = ?1 AND deleted_at IS NULL",
            [id],
            |r| r.get(0),
          )
          .optional()?;
        if exists.is_none() {
          return Ok(None);
        }

        tx.execute(
          "UPDATE projects SET
             title             = COALESCE(?2, title),
             description       = COALESCE(?3, description),
             short_description = COALESCE(?4, short_description),
             project_url       = COALESCE(?5, project_url),
             github_url        = COALESCE(?6, github_url),
             demo_url          = COALESCE(?7, demo_url),
             image_url         = COALESCE(?8, image_url),
             status            = COALESCE(?9, status),
             priority          = COALESCE(?10, priority),
             is_featured       = COALESCE(?11, is_featured),
             start_date        = COALESCE(?12, start_date),
             end_date          = COALESCE(?13, end_date),
             updated_at        = ?14
           WHERE id = ?1 AND deleted_at IS NULL",
          rusqlite::params![
            id,
            changes.title,
            changes.description,
            changes.short_description,
            changes.project_url,
            changes.github_url,
            changes.demo_url,
            changes.image_url,
            changes.status.map(|s| s.as_str()),
            changes.priority.map(i64::from),
            changes.is_featured,
            changes.start_date.map(encode_date),
            changes.end_date.map(encode_date),
            now_str,
          ],
        )?;

        // A provided skill set replaces the old one wholesale.
        if let Some(links) = &changes.skills {
          tx.execute(
            "UPDATE project_skills SET deleted_at = ?2
             WHERE project_id = ?1 AND deleted_at IS NULL",
            rusqlite::params![id, now_str],
          )?;
          link_skills(&tx, id, links, &now_str)?;
        }

        let raw = tx.query_row(
          &format!(
            "SELECT {PROJECT_COLS} FROM projects p
             WHERE p.id = ?1 AND p.deleted_at IS NULL"
          ),
          [id],
          RawProject::from_row,
        )?;
        let usages = project_usages(&tx, id)?;

        tx.commit()?;
        Ok(Some((raw, usages)))
      })
      .await
      .map_err(map_unique)?;

    updated
      .map(|(raw, usages)| into_project_with_skills(raw, usages))
      .transpose()
  }

  async fn delete_project(&self, id: i64) -> Result<bool> {
    let now_str = encode_dt(Utc::now());

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE projects SET deleted_at = ?2
           WHERE id = ?1 AND deleted_at IS NULL",
          rusqlite::params![id, now_str],
        )?)
      })
      .await?;

    Ok(affected > 0)
  }

  // ── Career history ────────────────────────────────────────────────────────

  async fn add_work_experience(
    &self,
    input: NewWorkExperience,
  ) -> Result<WorkExperience> {
    let responsibilities = encode_string_list(&input.responsibilities)?;
    let achievements = encode_string_list(&input.achievements)?;
    let start_date = encode_date(input.start_date);
    let end_date = input.end_date.map(encode_date);
    let now_str = encode_dt(Utc::now());

    let raw: Option<RawWorkExperience> = self
      .conn
      .call(move |conn| {
        let profile_id: Option<i64> = conn
          .query_row(
            "SELECT id FROM profiles WHERE deleted_at IS NULL LIMIT 1",
            [],
            |r| r.get(0),
          )
          .optional()?;
        let Some(profile_id) = profile_id else {
          return Ok(None);
        };

        conn.execute(
          "INSERT INTO work_experiences (
             profile_id, company_name, position, description,
             responsibilities, achievements, location, employment_type,
             start_date, end_date, is_current, company_url, created_at,
             updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     ?13, ?13)",
          rusqlite::params![
            profile_id,
            input.company_name,
            input.position,
            input.description,
            responsibilities,
            achievements,
            input.location,
            input.employment_type.as_str(),
            start_date,
            end_date,
            input.is_current,
            input.company_url,
            now_str,
          ],
        )?;

        let raw = conn.query_row(
          &format!(
            "SELECT {EXPERIENCE_COLS} FROM work_experiences WHERE id = ?1"
          ),
          [conn.last_insert_rowid()],
          RawWorkExperience::from_row,
        )?;
        Ok(Some(raw))
      })
      .await?;

    let Some(raw) = raw else {
      return Err(Error::ProfileMissing);
    };
    raw.into_experience()
  }

  async fn add_education(&self, input: NewEducation) -> Result<Education> {
    let achievements = encode_string_list(&input.achievements)?;
    let start_date = encode_date(input.start_date);
    let end_date = input.end_date.map(encode_date);
    let now_str = encode_dt(Utc::now());

    let raw: Option<RawEducation> = self
      .conn
      .call(move |conn| {
        let profile_id: Option<i64> = conn
          .query_row(
            "SELECT id FROM profiles WHERE deleted_at IS NULL LIMIT 1",
            [],
            |r| r.get(0),
          )
          .optional()?;
        let Some(profile_id) = profile_id else {
          return Ok(None);
        };

        conn.execute(
          "INSERT INTO educations (
             profile_id, institution_name, degree, field_of_study,
             description, gpa, location, start_date, end_date, is_current,
             institution_url, achievements, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     ?13, ?13)",
          rusqlite::params![
            profile_id,
            input.institution_name,
            input.degree,
            input.field_of_study,
            input.description,
            input.gpa,
            input.location,
            start_date,
            end_date,
            input.is_current,
            input.institution_url,
            achievements,
            now_str,
          ],
        )?;

        let raw = conn.query_row(
          &format!("SELECT {EDUCATION_COLS} FROM educations WHERE id = ?1"),
          [conn.last_insert_rowid()],
          RawEducation::from_row,
        )?;
        Ok(Some(raw))
      })
      .await?;

    let Some(raw) = raw else {
      return Err(Error::ProfileMissing);
    };
    raw.into_education()
  }

  // ── Search ────────────────────────────────────────────────────────────────

  async fn search_profiles(
    &self,
    term: &str,
    page: Page,
  ) -> Result<Vec<Profile>> {
    let pattern = like_pattern(term);
    let limit = i64::from(page.limit);
    let offset = i64::from(page.offset);

    let raws: Vec<RawProfile> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROFILE_COLS} FROM profiles
           WHERE deleted_at IS NULL
             AND (name LIKE ?1 OR bio LIKE ?1 OR title LIKE ?1
                  OR location LIKE ?1)
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![pattern, limit, offset],
            RawProfile::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProfile::into_profile).collect()
  }

  async fn search_projects(
    &self,
    term: &str,
    page: Page,
  ) -> Result<Vec<ProjectWithSkills>> {
    let pattern = like_pattern(term);
    let limit = i64::from(page.limit);
    let offset = i64::from(page.offset);

    let pairs: Vec<(RawProject, Vec<RawSkillUsage>)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROJECT_COLS} FROM projects p
           WHERE p.deleted_at IS NULL
             AND (p.title LIKE ?1 OR p.description LIKE ?1
                  OR p.short_description LIKE ?1)
           ORDER BY p.priority DESC, p.updated_at DESC
           LIMIT ?2 OFFSET ?3"
        ))?;
        let page = stmt
          .query_map(
            rusqlite::params![pattern, limit, offset],
            RawProject::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut pairs = Vec::with_capacity(page.len());
        for raw in page {
          let usages = project_usages(conn, raw.id)?;
          pairs.push((raw, usages));
        }
        Ok(pairs)
      })
      .await?;

    pairs
      .into_iter()
      .map(|(raw, usages)| into_project_with_skills(raw, usages))
      .collect()
  }

  async fn search_skills(&self, term: &str, page: Page) -> Result<Vec<Skill>> {
    let pattern = like_pattern(term);
    let limit = i64::from(page.limit);
    let offset = i64::from(page.offset);

    let raws: Vec<RawSkill> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SKILL_COLS} FROM skills
           WHERE deleted_at IS NULL
             AND (name LIKE ?1 OR description LIKE ?1 OR category LIKE ?1)
           ORDER BY is_featured DESC, name ASC
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![pattern, limit, offset],
            RawSkill::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSkill::into_skill).collect()
  }

  async fn search_work_experience(
    &self,
    term: &str,
    page: Page,
  ) -> Result<Vec<WorkExperience>> {
    let pattern = like_pattern(term);
    let limit = i64::from(page.limit);
    let offset = i64::from(page.offset);

    let raws: Vec<RawWorkExperience> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EXPERIENCE_COLS} FROM work_experiences
           WHERE deleted_at IS NULL
             AND (company_name LIKE ?1 OR position LIKE ?1
                  OR description LIKE ?1 OR location LIKE ?1)
           ORDER BY start_date DESC
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![pattern, limit, offset],
            RawWorkExperience::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawWorkExperience::into_experience)
      .collect()
  }

  async fn search_education(
    &self,
    term: &str,
    page: Page,
  ) -> Result<Vec<Education>> {
    let pattern = like_pattern(term);
    let limit = i64::from(page.limit);
    let offset = i64::from(page.offset);

    let raws: Vec<RawEducation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EDUCATION_COLS} FROM educations
           WHERE deleted_at IS NULL
             AND (institution_name LIKE ?1 OR degree LIKE ?1
                  OR field_of_study LIKE ?1 OR description LIKE ?1)
           ORDER BY start_date DESC
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![pattern, limit, offset],
            RawEducation::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEducation::into_education).collect()
  }

  // ── Liveness ──────────────────────────────────────────────────────────────

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// `%term%`, for case-insensitive substring matching via LIKE.
fn like_pattern(term: &str) -> String {
  format!("%{term}%")
}

/// Fold a UNIQUE-constraint failure into [`Error::Duplicate`]; anything else
/// stays a database error.
fn map_unique(err: tokio_rusqlite::Error) -> Error {
  if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
    code,
    Some(msg),
  )) = &err
  {
    if code.code == rusqlite::ErrorCode::ConstraintViolation
      && msg.contains("UNIQUE")
    {
      let field = if msg.contains("email") {
        "email"
      } else if msg.contains("name") {
        "name"
      } else {
        "value"
      };
      return Error::Duplicate(field);
    }
  }
  Error::Database(err)
}

/// Resolve and insert the skill links for a project. References that do not
/// resolve to a live skill are skipped, not rejected.
fn link_skills(
  conn: &rusqlite::Connection,
  project_id: i64,
  links: &[SkillLink],
  now_str: &str,
) -> rusqlite::Result<()> {
  let mut resolve =
    conn.prepare("SELECT id FROM skills WHERE id = ?1 AND deleted_at IS NULL")?;
  let mut insert = conn.prepare(
    "INSERT INTO project_skills (
       project_id, skill_id, proficiency_used, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?4)",
  )?;

  for link in links {
    let known: Option<i64> =
      resolve.query_row([link.skill_id], |r| r.get(0)).optional()?;
    if known.is_none() {
      continue;
    }
    insert.execute(rusqlite::params![
      project_id,
      link.skill_id,
      link.proficiency_used.map(|p| p.as_str()),
      now_str,
    ])?;
  }

  Ok(())
}

/// Load the live skill usages for one project, in join-insertion order.
fn project_usages(
  conn: &rusqlite::Connection,
  project_id: i64,
) -> rusqlite::Result<Vec<RawSkillUsage>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {SKILL_USAGE_COLS} FROM project_skills ps
     JOIN skills s ON s.id = ps.skill_id
     WHERE ps.project_id = ?1
       AND ps.deleted_at IS NULL
       AND s.deleted_at IS NULL
     ORDER BY ps.id"
  ))?;
  stmt
    .query_map([project_id], RawSkillUsage::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()
}

fn into_project_with_skills(
  raw: RawProject,
  usages: Vec<RawSkillUsage>,
) -> Result<ProjectWithSkills> {
  Ok(ProjectWithSkills {
    project: raw.into_project()?,
    skills:  usages
      .into_iter()
      .map(RawSkillUsage::into_usage)
      .collect::<Result<_>>()?,
  })
}
