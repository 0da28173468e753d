//! SQL schema for the Folio SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.
//!
//! Deletion is soft everywhere: rows gain a `deleted_at` timestamp and every
//! read filters on `deleted_at IS NULL`. Unique indexes are partial so that
//! a soft-deleted row does not block re-use of its value.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- The portfolio owner. Exactly one live row is expected; the store enforces
-- the singleton at write time, not in the schema.
CREATE TABLE IF NOT EXISTS profiles (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    name              TEXT NOT NULL,
    email             TEXT NOT NULL,
    bio               TEXT,
    title             TEXT,
    location          TEXT,
    phone             TEXT,
    website           TEXT,
    github_url        TEXT,
    linkedin_url      TEXT,
    twitter_url       TEXT,
    profile_image_url TEXT,
    resume_url        TEXT,
    created_at        TEXT NOT NULL,   -- ISO 8601 UTC
    updated_at        TEXT NOT NULL,
    deleted_at        TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS profiles_email_unique
    ON profiles(email) WHERE deleted_at IS NULL;

CREATE TABLE IF NOT EXISTS skills (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT NOT NULL,
    category            TEXT NOT NULL DEFAULT 'Other',
    proficiency_level   TEXT NOT NULL DEFAULT 'Intermediate',
    years_of_experience INTEGER,
    is_featured         INTEGER NOT NULL DEFAULT 0,
    icon_url            TEXT,
    description         TEXT,
    created_at          TEXT NOT NULL,
    updated_at          TEXT NOT NULL,
    deleted_at          TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS skills_name_unique
    ON skills(name) WHERE deleted_at IS NULL;
CREATE INDEX IF NOT EXISTS skills_category_idx    ON skills(category);
CREATE INDEX IF NOT EXISTS skills_featured_idx    ON skills(is_featured);
CREATE INDEX IF NOT EXISTS skills_proficiency_idx ON skills(proficiency_level);

CREATE TABLE IF NOT EXISTS projects (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_id        INTEGER NOT NULL REFERENCES profiles(id),
    title             TEXT NOT NULL,
    description       TEXT NOT NULL,
    short_description TEXT,
    project_url       TEXT,
    github_url        TEXT,
    demo_url          TEXT,
    image_url         TEXT,
    status            TEXT NOT NULL DEFAULT 'Completed',
    priority          INTEGER NOT NULL DEFAULT 0,
    is_featured       INTEGER NOT NULL DEFAULT 0,
    start_date        TEXT,            -- YYYY-MM-DD
    end_date          TEXT,            -- YYYY-MM-DD
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL,
    deleted_at        TEXT
);

CREATE INDEX IF NOT EXISTS projects_profile_idx  ON projects(profile_id);
CREATE INDEX IF NOT EXISTS projects_status_idx   ON projects(status);
CREATE INDEX IF NOT EXISTS projects_featured_idx ON projects(is_featured);
CREATE INDEX IF NOT EXISTS projects_priority_idx ON projects(priority);

CREATE TABLE IF NOT EXISTS work_experiences (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_id       INTEGER NOT NULL REFERENCES profiles(id),
    company_name     TEXT NOT NULL,
    position         TEXT NOT NULL,
    description      TEXT,
    responsibilities TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    achievements     TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    location         TEXT,
    employment_type  TEXT NOT NULL DEFAULT 'Full-time',
    start_date       TEXT NOT NULL,   -- YYYY-MM-DD
    end_date         TEXT,
    is_current       INTEGER NOT NULL DEFAULT 0,
    company_url      TEXT,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL,
    deleted_at       TEXT
);

CREATE INDEX IF NOT EXISTS work_experiences_profile_idx
    ON work_experiences(profile_id);
CREATE INDEX IF NOT EXISTS work_experiences_current_idx
    ON work_experiences(is_current);
CREATE INDEX IF NOT EXISTS work_experiences_start_idx
    ON work_experiences(start_date);

CREATE TABLE IF NOT EXISTS educations (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_id       INTEGER NOT NULL REFERENCES profiles(id),
    institution_name TEXT NOT NULL,
    degree           TEXT NOT NULL,
    field_of_study   TEXT,
    description      TEXT,
    gpa              REAL,            -- 0.00 .. 4.00
    location         TEXT,
    start_date       TEXT NOT NULL,   -- YYYY-MM-DD
    end_date         TEXT,
    is_current       INTEGER NOT NULL DEFAULT 0,
    institution_url  TEXT,
    achievements     TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL,
    deleted_at       TEXT
);

CREATE INDEX IF NOT EXISTS educations_profile_idx ON educations(profile_id);
CREATE INDEX IF NOT EXISTS educations_current_idx ON educations(is_current);
CREATE INDEX IF NOT EXISTS educations_start_idx   ON educations(start_date);

-- Project/skill association. Replacing a project's skill set soft-deletes
-- the old links, so the pair uniqueness only binds live rows.
CREATE TABLE IF NOT EXISTS project_skills (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id       INTEGER NOT NULL REFERENCES projects(id),
    skill_id         INTEGER NOT NULL REFERENCES skills(id),
    proficiency_used TEXT,            -- 'Beginner'..'Expert' or NULL
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL,
    deleted_at       TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS project_skills_pair_unique
    ON project_skills(project_id, skill_id) WHERE deleted_at IS NULL;
CREATE INDEX IF NOT EXISTS project_skills_project_idx
    ON project_skills(project_id);
CREATE INDEX IF NOT EXISTS project_skills_skill_idx
    ON project_skills(skill_id);

PRAGMA user_version = 1;
";
