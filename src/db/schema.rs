//! SQL DDL for initializing the site storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - UUID-style TEXT primary keys for rows created through the API
/// - RFC3339 timestamps stored as TEXT
/// - Booleans stored as INTEGER 0/1
/// - `contact_info` pinned to a single row via `CHECK (id = 1)`, so
///   concurrent upserts converge on the same row instead of racing to
///   insert duplicates
/// - Index on `testimonials.display_order` backing the public listing
///   order
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    is_admin INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS sessions (
    session_id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    username TEXT NOT NULL,
    is_admin INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL, -- RFC3339
    expires_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON sessions(expires_at);

CREATE TABLE IF NOT EXISTS site_sections (
    key TEXT PRIMARY KEY,
    title TEXT NULL,
    subtitle TEXT NULL,
    content TEXT NULL,
    cta_label TEXT NULL,
    cta_url TEXT NULL,
    metadata TEXT NULL, -- JSON object, serialized as text
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS testimonials (
    id TEXT PRIMARY KEY,
    quote TEXT NOT NULL,
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    company TEXT NOT NULL,
    is_featured INTEGER NOT NULL DEFAULT 1,
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_testimonials_display_order ON testimonials(display_order);

CREATE TABLE IF NOT EXISTS contact_info (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    headline TEXT NULL,
    description TEXT NULL,
    phone TEXT NULL,
    email TEXT NULL,
    support_email TEXT NULL,
    address TEXT NULL,
    office_hours TEXT NULL,
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS contact_submissions (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    company TEXT NULL,
    service_interest TEXT NULL,
    message TEXT NOT NULL,
    submitted_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_contact_submissions_submitted_at ON contact_submissions(submitted_at);
"#;
