//! SQL schema for the Indaba SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS community_updates (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    category    TEXT NOT NULL,   -- 'meeting' | 'gathering' | 'funeral' | 'wedding' | 'party'
    date        TEXT NOT NULL,   -- ISO 8601 calendar date
    time        TEXT NOT NULL,   -- HH:MM:SS
    location    TEXT NOT NULL,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; backend-assigned
);

CREATE TABLE IF NOT EXISTS jobs (
    id              TEXT PRIMARY KEY,
    title           TEXT NOT NULL,
    description     TEXT NOT NULL,
    requirements    TEXT NOT NULL DEFAULT '[]',  -- JSON array of strings
    employment_type TEXT NOT NULL,
    posted          TEXT NOT NULL,
    company         TEXT NOT NULL,
    salary          TEXT NOT NULL,
    location        TEXT NOT NULL,
    contact         TEXT NOT NULL,               -- JSON {phone, email}
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS alerts (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    category    TEXT NOT NULL,   -- 'water' | 'electricity' | 'crime' | 'general'
    severity    TEXT NOT NULL,   -- 'high' | 'medium' | 'low'
    icon        TEXT NOT NULL,
    posted      TEXT NOT NULL,
    timeline    TEXT,
    locations   TEXT NOT NULL DEFAULT '[]',      -- JSON array of strings
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS news (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,   -- sanitized HTML
    image       TEXT,
    video_link  TEXT,
    featured    INTEGER NOT NULL DEFAULT 0,
    category    TEXT NOT NULL,
    author      TEXT NOT NULL,
    date        TEXT NOT NULL,   -- publish date shown to readers
    summary     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

-- Submissions from the public apply form. Append-only; no admin editing.
CREATE TABLE IF NOT EXISTS job_applications (
    id           TEXT PRIMARY KEY,
    job_id       TEXT NOT NULL,
    name         TEXT NOT NULL,
    email        TEXT NOT NULL,
    cover_letter TEXT NOT NULL DEFAULT '',
    resume_url   TEXT,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS admin_users (
    email         TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL,  -- argon2 PHC string
    created_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS updates_created_idx  ON community_updates(created_at);
CREATE INDEX IF NOT EXISTS jobs_created_idx     ON jobs(created_at);
CREATE INDEX IF NOT EXISTS alerts_created_idx   ON alerts(created_at);
CREATE INDEX IF NOT EXISTS news_created_idx     ON news(created_at);
CREATE INDEX IF NOT EXISTS applications_job_idx ON job_applications(job_id);

PRAGMA user_version = 1;
";
