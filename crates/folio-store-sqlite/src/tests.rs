//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use folio_core::{
  education::NewEducation,
  experience::NewWorkExperience,
  profile::{NewProfile, ProfileUpdate},
  project::{NewProject, ProjectStatus, ProjectUpdate, SkillLink},
  skill::{NewSkill, Proficiency, SkillCategory},
  store::{
    Page, PortfolioStore, ProjectQuery, ProjectSort, SkillQuery, SortOrder,
    StoreError, StoreErrorKind,
  },
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn owner() -> NewProfile {
  NewProfile {
    name: "Ada Lovelace".into(),
    email: "ada@example.com".into(),
    bio: Some("Writes compilers for fun".into()),
    title: Some("Software Engineer".into()),
    ..Default::default()
  }
}

fn skill(name: &str) -> NewSkill {
  NewSkill { name: name.into(), ..Default::default() }
}

fn project(title: &str) -> NewProject {
  NewProject {
    title: title.into(),
    description: format!("{title}, in detail"),
    ..Default::default()
  }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn link(skill_id: i64) -> SkillLink {
  SkillLink { skill_id, proficiency_used: None }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_profile() {
  let s = store().await;

  let created = s.create_profile(owner()).await.unwrap();
  assert_eq!(created.name, "Ada Lovelace");
  assert_eq!(created.email, "ada@example.com");

  let fetched = s.get_profile().await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_profile_empty_store_returns_none() {
  let s = store().await;
  assert!(s.get_profile().await.unwrap().is_none());
}

#[tokio::test]
async fn second_profile_conflicts() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();

  let mut rival = owner();
  rival.email = "rival@example.com".into();
  let err = s.create_profile(rival).await.unwrap_err();

  assert!(matches!(err, crate::Error::ProfileExists));
  assert_eq!(err.kind(), StoreErrorKind::Conflict);
}

#[tokio::test]
async fn update_merges_only_provided_fields() {
  let s = store().await;
  let before = s.create_profile(owner()).await.unwrap();

  let after = s
    .update_profile(ProfileUpdate {
      bio: Some("Now writes interpreters".into()),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(after.bio.as_deref(), Some("Now writes interpreters"));
  // everything not mentioned in the patch is untouched
  assert_eq!(after.name, before.name);
  assert_eq!(after.email, before.email);
  assert_eq!(after.title, before.title);
  assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn update_without_profile_returns_none() {
  let s = store().await;
  let result = s
    .update_profile(ProfileUpdate {
      bio: Some("no one home".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn overview_without_profile_returns_none() {
  let s = store().await;
  assert!(s.profile_overview().await.unwrap().is_none());
}

#[tokio::test]
async fn overview_orders_history_most_recent_first() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();

  s.add_work_experience(role("Older Corp", date(2015, 1, 1)))
    .await
    .unwrap();
  s.add_work_experience(role("Newer Corp", date(2020, 6, 1)))
    .await
    .unwrap();
  s.add_education(study("First University", date(2008, 9, 1)))
    .await
    .unwrap();
  s.add_education(study("Second University", date(2012, 9, 1)))
    .await
    .unwrap();

  let view = s.profile_overview().await.unwrap().unwrap();
  assert_eq!(view.profile.name, "Ada Lovelace");

  let companies: Vec<_> = view
    .work_experiences
    .iter()
    .map(|e| e.company_name.as_str())
    .collect();
  assert_eq!(companies, ["Newer Corp", "Older Corp"]);

  let institutions: Vec<_> = view
    .educations
    .iter()
    .map(|e| e.institution_name.as_str())
    .collect();
  assert_eq!(institutions, ["Second University", "First University"]);
}

// ─── Skills ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_skill_applies_defaults() {
  let s = store().await;

  let created = s.create_skill(skill("Rust")).await.unwrap();
  assert_eq!(created.name, "Rust");
  assert_eq!(created.category, SkillCategory::Other);
  assert_eq!(created.proficiency_level, Proficiency::Intermediate);
  assert!(!created.is_featured);
  assert!(created.years_of_experience.is_none());
}

#[tokio::test]
async fn list_skills_filters_by_category() {
  let s = store().await;
  s.create_skill(NewSkill {
    category: SkillCategory::Databases,
    ..skill("PostgreSQL")
  })
  .await
  .unwrap();
  s.create_skill(NewSkill {
    category: SkillCategory::Databases,
    ..skill("SQLite")
  })
  .await
  .unwrap();
  s.create_skill(NewSkill {
    category: SkillCategory::Frameworks,
    ..skill("Axum")
  })
  .await
  .unwrap();

  let (rows, total) = s
    .list_skills(&SkillQuery {
      category: Some(SkillCategory::Databases),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(total, 2);
  assert_eq!(rows.len(), 2);
  assert!(rows.iter().all(|r| r.category == SkillCategory::Databases));
}

#[tokio::test]
async fn list_skills_filters_by_proficiency_and_featured() {
  let s = store().await;
  s.create_skill(NewSkill {
    proficiency_level: Proficiency::Expert,
    is_featured: true,
    ..skill("Rust")
  })
  .await
  .unwrap();
  s.create_skill(NewSkill {
    proficiency_level: Proficiency::Expert,
    ..skill("Git")
  })
  .await
  .unwrap();
  s.create_skill(skill("Docker")).await.unwrap();

  let (experts, total) = s
    .list_skills(&SkillQuery {
      proficiency: Some(Proficiency::Expert),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(total, 2);
  assert_eq!(experts.len(), 2);

  let (featured, total) = s
    .list_skills(&SkillQuery {
      featured: Some(true),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(total, 1);
  assert_eq!(featured[0].name, "Rust");
}

#[tokio::test]
async fn list_skills_paginates_and_reports_full_total() {
  let s = store().await;
  s.create_skill(skill("Axum")).await.unwrap();
  s.create_skill(skill("Rust")).await.unwrap();
  s.create_skill(skill("Tokio")).await.unwrap();

  let (rows, total) = s
    .list_skills(&SkillQuery {
      page: Page::new(2, 1),
      ..Default::default()
    })
    .await
    .unwrap();

  // name-ascending window into the middle of the collection
  assert_eq!(total, 3);
  let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, ["Rust", "Tokio"]);
}

#[tokio::test]
async fn duplicate_skill_name_conflicts() {
  let s = store().await;
  s.create_skill(skill("Rust")).await.unwrap();

  let err = s.create_skill(skill("Rust")).await.unwrap_err();
  assert!(matches!(err, crate::Error::Duplicate("name")));
  assert_eq!(err.kind(), StoreErrorKind::Conflict);

  // the original row is unharmed
  let (rows, total) = s.list_skills(&SkillQuery::default()).await.unwrap();
  assert_eq!(total, 1);
  assert_eq!(rows[0].name, "Rust");
}

#[tokio::test]
async fn deleted_skill_name_can_be_reused() {
  let s = store().await;
  let first = s.create_skill(skill("Rust")).await.unwrap();
  assert!(s.delete_skill(first.id).await.unwrap());

  let second = s.create_skill(skill("Rust")).await.unwrap();
  assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn delete_skill_hides_it() {
  let s = store().await;
  let created = s.create_skill(skill("Rust")).await.unwrap();

  assert!(s.delete_skill(created.id).await.unwrap());
  let (rows, total) = s.list_skills(&SkillQuery::default()).await.unwrap();
  assert!(rows.is_empty());
  assert_eq!(total, 0);

  // already gone
  assert!(!s.delete_skill(created.id).await.unwrap());
}

#[tokio::test]
async fn top_skills_featured_most_experienced_first() {
  let s = store().await;
  s.create_skill(NewSkill {
    is_featured: true,
    years_of_experience: Some(3),
    ..skill("Tokio")
  })
  .await
  .unwrap();
  s.create_skill(NewSkill {
    is_featured: true,
    years_of_experience: Some(8),
    ..skill("Rust")
  })
  .await
  .unwrap();
  s.create_skill(NewSkill {
    years_of_experience: Some(20),
    ..skill("Make")
  })
  .await
  .unwrap();

  let top = s.top_skills(10).await.unwrap();
  let names: Vec<_> = top.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, ["Rust", "Tokio"]);
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_project_requires_a_profile() {
  let s = store().await;
  let err = s.create_project(project("Orphan")).await.unwrap_err();
  assert!(matches!(err, crate::Error::ProfileMissing));
  assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

#[tokio::test]
async fn create_project_attaches_resolved_skills() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  let rust = s.create_skill(skill("Rust")).await.unwrap();
  let axum = s.create_skill(skill("Axum")).await.unwrap();

  let created = s
    .create_project(NewProject {
      skills: vec![
        SkillLink {
          skill_id:         rust.id,
          proficiency_used: Some(Proficiency::Expert),
        },
        link(axum.id),
      ],
      ..project("Portfolio API")
    })
    .await
    .unwrap();

  assert_eq!(created.project.title, "Portfolio API");
  assert_eq!(created.skills.len(), 2);
  assert_eq!(created.skills[0].skill.name, "Rust");
  assert_eq!(created.skills[0].proficiency_used, Some(Proficiency::Expert));
  assert_eq!(created.skills[1].skill.name, "Axum");
  assert!(created.skills[1].proficiency_used.is_none());
}

#[tokio::test]
async fn unknown_skill_reference_is_skipped() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();

  let created = s
    .create_project(NewProject {
      skills: vec![link(999_999)],
      ..project("Loner")
    })
    .await
    .unwrap();

  assert!(created.skills.is_empty());
}

#[tokio::test]
async fn deleted_skill_reference_is_skipped() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  let rust = s.create_skill(skill("Rust")).await.unwrap();
  s.delete_skill(rust.id).await.unwrap();

  let created = s
    .create_project(NewProject {
      skills: vec![link(rust.id)],
      ..project("Stale link")
    })
    .await
    .unwrap();

  assert!(created.skills.is_empty());
}

#[tokio::test]
async fn duplicate_skill_link_rolls_the_whole_create_back() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  let rust = s.create_skill(skill("Rust")).await.unwrap();

  let err = s
    .create_project(NewProject {
      skills: vec![link(rust.id), link(rust.id)],
      ..project("Doubled")
    })
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Duplicate(_)));

  // the project row must not survive the failed association step
  let (rows, total) = s.list_projects(&ProjectQuery::default()).await.unwrap();
  assert!(rows.is_empty());
  assert_eq!(total, 0);
}

#[tokio::test]
async fn get_project_missing_returns_none() {
  let s = store().await;
  assert!(s.get_project(42).await.unwrap().is_none());
}

#[tokio::test]
async fn list_projects_filters_by_status_and_featured() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  s.create_project(NewProject {
    status: ProjectStatus::InProgress,
    ..project("Active one")
  })
  .await
  .unwrap();
  s.create_project(NewProject {
    is_featured: true,
    ..project("Shiny one")
  })
  .await
  .unwrap();
  s.create_project(project("Plain one")).await.unwrap();

  let (active, total) = s
    .list_projects(&ProjectQuery {
      status: Some(ProjectStatus::InProgress),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(total, 1);
  assert_eq!(active[0].project.title, "Active one");

  let (featured, total) = s
    .list_projects(&ProjectQuery {
      featured: Some(true),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(total, 1);
  assert_eq!(featured[0].project.title, "Shiny one");
}

#[tokio::test]
async fn list_projects_filters_by_skill_name_substring() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  let pg = s.create_skill(skill("PostgreSQL")).await.unwrap();

  s.create_project(NewProject {
    skills: vec![link(pg.id)],
    ..project("Database thing")
  })
  .await
  .unwrap();
  s.create_project(project("Frontend thing")).await.unwrap();

  let (rows, total) = s
    .list_projects(&ProjectQuery {
      skill: Some("postgres".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(total, 1);
  assert_eq!(rows[0].project.title, "Database thing");
}

#[tokio::test]
async fn list_projects_default_order_is_priority_descending() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  for (title, priority) in [("Low", 1), ("High", 9), ("Mid", 4)] {
    s.create_project(NewProject { priority, ..project(title) })
      .await
      .unwrap();
  }

  let (rows, _) = s.list_projects(&ProjectQuery::default()).await.unwrap();
  let priorities: Vec<_> = rows.iter().map(|r| r.project.priority).collect();
  assert_eq!(priorities, [9, 4, 1]);
}

#[tokio::test]
async fn list_projects_sorts_by_whitelisted_column() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  for title in ["Charlie", "Alpha", "Bravo"] {
    s.create_project(project(title)).await.unwrap();
  }

  let (rows, _) = s
    .list_projects(&ProjectQuery {
      sort: ProjectSort::Title,
      order: SortOrder::Asc,
      ..Default::default()
    })
    .await
    .unwrap();

  let titles: Vec<_> = rows.iter().map(|r| r.project.title.as_str()).collect();
  assert_eq!(titles, ["Alpha", "Bravo", "Charlie"]);
}

#[tokio::test]
async fn list_projects_paginates_and_reports_full_total() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  for title in ["One", "Two", "Three"] {
    s.create_project(project(title)).await.unwrap();
  }

  let (rows, total) = s
    .list_projects(&ProjectQuery {
      page: Page::new(2, 1),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(rows.len(), 2);
  assert_eq!(total, 3);
}

#[tokio::test]
async fn update_project_merges_fields() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  let created = s.create_project(project("Draft")).await.unwrap();

  let updated = s
    .update_project(created.project.id, ProjectUpdate {
      title: Some("Shipped".into()),
      status: Some(ProjectStatus::Completed),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.project.title, "Shipped");
  assert_eq!(updated.project.status, ProjectStatus::Completed);
  assert_eq!(updated.project.description, created.project.description);
}

#[tokio::test]
async fn update_project_replaces_skill_set_wholesale() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  let rust = s.create_skill(skill("Rust")).await.unwrap();
  let go = s.create_skill(skill("Go")).await.unwrap();

  let created = s
    .create_project(NewProject {
      skills: vec![link(rust.id)],
      ..project("Rewrite")
    })
    .await
    .unwrap();

  // an update without `skills` leaves the links alone
  let untouched = s
    .update_project(created.project.id, ProjectUpdate {
      priority: Some(5),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(untouched.skills.len(), 1);
  assert_eq!(untouched.skills[0].skill.name, "Rust");

  // an update with `skills` swaps the whole set
  let swapped = s
    .update_project(created.project.id, ProjectUpdate {
      skills: Some(vec![link(go.id)]),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(swapped.skills.len(), 1);
  assert_eq!(swapped.skills[0].skill.name, "Go");
}

#[tokio::test]
async fn update_missing_project_returns_none() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();

  let result = s
    .update_project(42, ProjectUpdate {
      title: Some("Ghost".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_project_hides_it() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  let created = s.create_project(project("Short-lived")).await.unwrap();

  assert!(s.delete_project(created.project.id).await.unwrap());
  assert!(s.get_project(created.project.id).await.unwrap().is_none());
  assert!(!s.delete_project(created.project.id).await.unwrap());
}

// ─── Career history ──────────────────────────────────────────────────────────

fn role(company: &str, start: NaiveDate) -> NewWorkExperience {
  NewWorkExperience {
    company_name: company.into(),
    position: "Engineer".into(),
    start_date: start,
    ..Default::default()
  }
}

fn study(institution: &str, start: NaiveDate) -> NewEducation {
  NewEducation {
    institution_name: institution.into(),
    degree: "BSc".into(),
    start_date: start,
    ..Default::default()
  }
}

#[tokio::test]
async fn career_rows_require_a_profile() {
  let s = store().await;

  let err = s
    .add_work_experience(role("Nowhere Inc", date(2020, 1, 1)))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::ProfileMissing));

  let err = s
    .add_education(study("Nowhere U", date(2020, 1, 1)))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::ProfileMissing));
}

#[tokio::test]
async fn work_experience_round_trips_highlight_lists() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();

  let mut input = role("Analytical Engines Ltd", date(2019, 3, 1));
  input.responsibilities =
    vec!["Led the rewrite".into(), "Mentored juniors".into()];
  input.achievements = vec!["Cut build times in half".into()];
  input.is_current = true;

  let created = s.add_work_experience(input).await.unwrap();
  assert_eq!(created.responsibilities, [
    "Led the rewrite",
    "Mentored juniors"
  ]);
  assert_eq!(created.achievements, ["Cut build times in half"]);
  assert!(created.is_current);
  assert!(created.end_date.is_none());
}

#[tokio::test]
async fn education_round_trips() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();

  let mut input = study("University of London", date(2010, 9, 1));
  input.field_of_study = Some("Mathematics".into());
  input.gpa = Some(3.9);
  input.end_date = Some(date(2013, 6, 30));

  let created = s.add_education(input).await.unwrap();
  assert_eq!(created.institution_name, "University of London");
  assert_eq!(created.field_of_study.as_deref(), Some("Mathematics"));
  assert_eq!(created.gpa, Some(3.9));
  assert_eq!(created.end_date, Some(date(2013, 6, 30)));
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_projects_substring_case_insensitive() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  s.create_project(project("E-Commerce Platform")).await.unwrap();

  let hits = s.search_projects("commerce", Page::default()).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].project.title, "E-Commerce Platform");

  let hits = s.search_projects("COMMERCE", Page::default()).await.unwrap();
  assert_eq!(hits.len(), 1);

  let hits = s.search_projects("zzz", Page::default()).await.unwrap();
  assert!(hits.is_empty());
}

#[tokio::test]
async fn search_profiles_matches_bio() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();

  let hits = s.search_profiles("compilers", Page::default()).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Ada Lovelace");

  let hits = s.search_profiles("gardening", Page::default()).await.unwrap();
  assert!(hits.is_empty());
}

#[tokio::test]
async fn search_skills_lists_featured_first() {
  let s = store().await;
  s.create_skill(skill("Rust")).await.unwrap();
  s.create_skill(NewSkill { is_featured: true, ..skill("Rustls") })
    .await
    .unwrap();

  let hits = s.search_skills("rust", Page::default()).await.unwrap();
  let names: Vec<_> = hits.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, ["Rustls", "Rust"]);
}

#[tokio::test]
async fn search_work_experience_matches_company() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  s.add_work_experience(role("Analytical Engines Ltd", date(2019, 3, 1)))
    .await
    .unwrap();

  let hits = s
    .search_work_experience("engines", Page::default())
    .await
    .unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].company_name, "Analytical Engines Ltd");
}

#[tokio::test]
async fn search_education_matches_institution() {
  let s = store().await;
  s.create_profile(owner()).await.unwrap();
  s.add_education(study("University of London", date(2010, 9, 1)))
    .await
    .unwrap();

  let hits = s.search_education("london", Page::default()).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].institution_name, "University of London");
}

#[tokio::test]
async fn search_respects_the_page_window() {
  let s = store().await;
  for name in ["Rust", "Rustls", "Trust"] {
    s.create_skill(skill(name)).await.unwrap();
  }

  let hits = s.search_skills("rust", Page::new(2, 0)).await.unwrap();
  assert_eq!(hits.len(), 2);

  let hits = s.search_skills("rust", Page::new(2, 2)).await.unwrap();
  assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn ping_round_trips() {
  let s = store().await;
  s.ping().await.unwrap();
}
