//! Demo fixture: one profile with a representative set of skills, projects,
//! work history, and education.

use std::collections::HashMap;

use chrono::NaiveDate;
use folio_core::{
  education::NewEducation,
  experience::{EmploymentType, NewWorkExperience},
  profile::NewProfile,
  project::{NewProject, ProjectStatus, SkillLink},
  skill::{NewSkill, Proficiency, SkillCategory},
  store::PortfolioStore,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| (*s).to_string()).collect()
}

/// Populate `store` with the demo portfolio. Fails with a conflict on a
/// store that already holds a profile.
pub async fn run<S: PortfolioStore>(store: &S) -> Result<(), S::Error> {
  store
    .create_profile(NewProfile {
      name:              "Alex Johnson".to_string(),
      email:             "alex.johnson@example.com".to_string(),
      bio:               Some(
        "Full-stack developer with 5+ years of experience building scalable \
         web applications. Passionate about clean code, user experience, and \
         emerging technologies."
          .to_string(),
      ),
      title:             Some("Senior Full-Stack Developer".to_string()),
      location:          Some("San Francisco, CA".to_string()),
      phone:             Some("+1 (555) 123-4567".to_string()),
      website:           Some("https://alexjohnson.dev".to_string()),
      github_url:        Some("https://github.com/alexjohnson".to_string()),
      linkedin_url:      Some("https://linkedin.com/in/alexjohnson-dev".to_string()),
      twitter_url:       Some("https://twitter.com/alexjohnsondev".to_string()),
      profile_image_url: None,
      resume_url:        Some("https://alexjohnson.dev/resume.pdf".to_string()),
    })
    .await?;
  tracing::info!("profile created");

  let skills = [
    ("JavaScript", SkillCategory::ProgrammingLanguages, Proficiency::Expert, 5, true),
    ("TypeScript", SkillCategory::ProgrammingLanguages, Proficiency::Advanced, 3, true),
    ("Python", SkillCategory::ProgrammingLanguages, Proficiency::Advanced, 4, true),
    ("React", SkillCategory::Frameworks, Proficiency::Expert, 4, true),
    ("Node.js", SkillCategory::Frameworks, Proficiency::Expert, 4, true),
    ("Next.js", SkillCategory::Frameworks, Proficiency::Advanced, 2, true),
    ("PostgreSQL", SkillCategory::Databases, Proficiency::Advanced, 3, true),
    ("AWS", SkillCategory::CloudServices, Proficiency::Advanced, 3, true),
    ("Docker", SkillCategory::Tools, Proficiency::Advanced, 3, false),
  ];
  let mut ids: HashMap<String, i64> = HashMap::new();
  for (name, category, proficiency_level, years, is_featured) in skills {
    let created = store
      .create_skill(NewSkill {
        name: name.to_string(),
        category,
        proficiency_level,
        years_of_experience: Some(years),
        is_featured,
        icon_url: None,
        description: None,
      })
      .await?;
    ids.insert(created.name.clone(), created.id);
  }
  tracing::info!(count = ids.len(), "skills created");

  store
    .add_work_experience(NewWorkExperience {
      company_name:     "TechCorp Inc.".to_string(),
      position:         "Senior Full-Stack Developer".to_string(),
      description:      Some(
        "Led development of customer-facing web applications serving 100K+ \
         users daily."
          .to_string(),
      ),
      responsibilities: strings(&[
        "Developed and maintained React-based web applications",
        "Built RESTful APIs using Node.js and Express",
        "Mentored 3 junior developers and conducted code reviews",
      ]),
      achievements:     strings(&[
        "Increased user engagement by 25% through UI/UX improvements",
        "Reduced deployment time by 60% with automated CI/CD pipeline",
      ]),
      location:         Some("San Francisco, CA".to_string()),
      employment_type:  EmploymentType::FullTime,
      start_date:       date(2021, 3, 1),
      end_date:         None,
      is_current:       true,
      company_url:      Some("https://techcorp.com".to_string()),
    })
    .await?;
  store
    .add_work_experience(NewWorkExperience {
      company_name:     "StartupXYZ".to_string(),
      position:         "Full-Stack Developer".to_string(),
      description:      Some(
        "Built the entire web platform from scratch using modern technologies."
          .to_string(),
      ),
      responsibilities: strings(&[
        "Developed MVP from concept to production in 6 months",
        "Designed and implemented PostgreSQL database schema",
      ]),
      achievements:     strings(&[
        "Successfully launched platform with 1000+ beta users",
        "Achieved 99.9% uptime in production environment",
      ]),
      location:         Some("San Francisco, CA".to_string()),
      employment_type:  EmploymentType::FullTime,
      start_date:       date(2019, 6, 1),
      end_date:         Some(date(2021, 2, 28)),
      is_current:       false,
      company_url:      Some("https://startupxyz.com".to_string()),
    })
    .await?;
  tracing::info!("work experiences created");

  store
    .add_education(NewEducation {
      institution_name: "University of California, Berkeley".to_string(),
      degree:           "Bachelor of Science".to_string(),
      field_of_study:   Some("Computer Science".to_string()),
      description:      Some(
        "Focused on software engineering, algorithms, and web development."
          .to_string(),
      ),
      gpa:              Some(3.7),
      location:         Some("Berkeley, CA".to_string()),
      start_date:       date(2014, 8, 25),
      end_date:         Some(date(2018, 5, 15)),
      is_current:       false,
      institution_url:  Some("https://berkeley.edu".to_string()),
      achievements:     strings(&[
        "Dean's List for 3 consecutive semesters",
        "Winner of HackBerkeley 2017",
      ]),
    })
    .await?;
  store
    .add_education(NewEducation {
      institution_name: "freeCodeCamp".to_string(),
      degree:           "Full Stack Web Development Certification".to_string(),
      field_of_study:   Some("Web Development".to_string()),
      description:      None,
      gpa:              None,
      location:         Some("Online".to_string()),
      start_date:       date(2017, 6, 1),
      end_date:         Some(date(2017, 12, 15)),
      is_current:       false,
      institution_url:  Some("https://freecodecamp.org".to_string()),
      achievements:     strings(&["Built 5 full-stack projects"]),
    })
    .await?;
  tracing::info!("education records created");

  let link = |name: &str, used: Proficiency| SkillLink {
    skill_id:         ids.get(name).copied().unwrap_or_default(),
    proficiency_used: Some(used),
  };
  let projects = [
    NewProject {
      title:             "E-Commerce Platform".to_string(),
      description:       "A full-featured e-commerce platform with user \
                          authentication, product catalog, shopping cart, and \
                          payment processing."
        .to_string(),
      short_description: Some(
        "Full-stack e-commerce platform with React and Node.js".to_string(),
      ),
      project_url:       Some("https://ecommerce-demo.alexjohnson.dev".to_string()),
      github_url:        Some("https://github.com/alexjohnson/ecommerce-platform".to_string()),
      demo_url:          Some("https://ecommerce-demo.alexjohnson.dev".to_string()),
      image_url:         None,
      status:            ProjectStatus::Completed,
      priority:          10,
      is_featured:       true,
      start_date:        Some(date(2023, 1, 15)),
      end_date:          Some(date(2023, 4, 30)),
      skills:            vec![
        link("React", Proficiency::Expert),
        link("Node.js", Proficiency::Expert),
        link("PostgreSQL", Proficiency::Advanced),
        link("JavaScript", Proficiency::Expert),
      ],
    },
    NewProject {
      title:             "Task Management Dashboard".to_string(),
      description:       "A project management tool with drag-and-drop task \
                          boards, team collaboration, and real-time \
                          notifications."
        .to_string(),
      short_description: Some(
        "Next.js project management tool with real-time collaboration".to_string(),
      ),
      project_url:       Some("https://taskmanager.alexjohnson.dev".to_string()),
      github_url:        Some("https://github.com/alexjohnson/task-manager".to_string()),
      demo_url:          Some("https://taskmanager.alexjohnson.dev".to_string()),
      image_url:         None,
      status:            ProjectStatus::Completed,
      priority:          9,
      is_featured:       true,
      start_date:        Some(date(2023, 6, 1)),
      end_date:          Some(date(2023, 8, 15)),
      skills:            vec![
        link("Next.js", Proficiency::Advanced),
        link("React", Proficiency::Expert),
        link("TypeScript", Proficiency::Advanced),
      ],
    },
    NewProject {
      title:             "Weather Analytics API".to_string(),
      description:       "RESTful API service that aggregates weather data \
                          from multiple sources and provides analytics \
                          endpoints."
        .to_string(),
      short_description: Some(
        "Python API for weather data analytics and forecasting".to_string(),
      ),
      project_url:       None,
      github_url:        Some("https://github.com/alexjohnson/weather-analytics-api".to_string()),
      demo_url:          Some("https://weather-api.alexjohnson.dev/docs".to_string()),
      image_url:         None,
      status:            ProjectStatus::Completed,
      priority:          8,
      is_featured:       true,
      start_date:        Some(date(2023, 9, 1)),
      end_date:          Some(date(2023, 11, 30)),
      skills:            vec![
        link("Python", Proficiency::Advanced),
        link("PostgreSQL", Proficiency::Advanced),
        link("AWS", Proficiency::Advanced),
        link("Docker", Proficiency::Advanced),
      ],
    },
  ];
  let count = projects.len();
  for project in projects {
    store.create_project(project).await?;
  }
  tracing::info!(count, "projects created");

  Ok(())
}

#[cfg(test)]
mod tests {
  use folio_core::store::{PortfolioStore as _, ProjectQuery, SkillQuery};
  use folio_store_sqlite::SqliteStore;

  #[tokio::test]
  async fn seeds_a_complete_portfolio() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    super::run(&store).await.unwrap();

    let overview = store.profile_overview().await.unwrap().unwrap();
    assert_eq!(overview.profile.name, "Alex Johnson");
    assert_eq!(overview.work_experiences.len(), 2);
    assert_eq!(overview.educations.len(), 2);

    let (_, total) = store.list_skills(&SkillQuery::default()).await.unwrap();
    assert_eq!(total, 9);

    let (projects, _) = store.list_projects(&ProjectQuery::default()).await.unwrap();
    assert_eq!(projects[0].project.title, "E-Commerce Platform");
    assert!(!projects[0].skills.is_empty());
  }

  #[tokio::test]
  async fn seeding_twice_fails_on_the_singleton() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    super::run(&store).await.unwrap();
    assert!(super::run(&store).await.is_err());
  }
}
