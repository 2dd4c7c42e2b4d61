//! API handlers for todoapp.
//!
//! `auth` owns login and bearer token checks; `todos` is the protected CRUD
//! surface; `health` and `root` are public.

pub mod auth;
pub mod health;
pub mod root;
pub mod todos;
