//! # Todoapp (single-user TODO list service)
//!
//! `todoapp` serves a small TODO list over HTTP together with the single-page
//! frontend that consumes it.
//!
//! ## Storage
//!
//! Todos live in an in-memory list owned by the server process. Nothing is
//! persisted; restarting the process resets the list to its seed data.
//!
//! - **Ids:** assigned by the server as `max(id) + 1`, starting at `1`.
//! - **Titles:** unique among existing todos, compared case-insensitively.
//!
//! ## Authentication
//!
//! `POST /api/auth/login` checks the submitted username and password against a
//! single configured credential and returns an HS256-signed JWT. Every
//! `/api/todo` route requires that token as `Authorization: Bearer <token>`;
//! signature, expiry, issuer and audience are all validated.

pub mod api;
pub mod cli;
pub mod todo;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
