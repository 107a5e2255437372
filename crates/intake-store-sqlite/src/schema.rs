//! SQL schema for the applicant store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `seq` records insertion order and breaks timestamp ties on retrieval.
-- Rows are never deleted.
CREATE TABLE IF NOT EXISTS applicants (
    seq                   INTEGER PRIMARY KEY AUTOINCREMENT,
    id                    TEXT NOT NULL UNIQUE,
    property_id           TEXT NOT NULL,
    email                 TEXT NOT NULL,
    first_name            TEXT,
    last_name             TEXT NOT NULL,
    user_comment          TEXT,
    applicant_comment     TEXT,
    salutation            TEXT,             -- 'MR' | 'MRS' | 'MS'
    creation_source       TEXT NOT NULL,    -- 'MANUAL' | 'PORTAL'
    status                TEXT NOT NULL DEFAULT 'CREATED',
    creation_timestamp    TEXT NOT NULL,    -- RFC 3339, microseconds, 'Z'
    wbs_present           INTEGER NOT NULL DEFAULT 0,
    pets                  INTEGER NOT NULL DEFAULT 0,
    number_of_persons     INTEGER,
    earliest_move_in_date TEXT
);

CREATE INDEX IF NOT EXISTS applicants_property_idx
    ON applicants(property_id, creation_timestamp);

PRAGMA user_version = 1;
";
