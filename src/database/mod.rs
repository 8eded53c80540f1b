//! Persistence for highlight history. Postgres when `DATABASE_URL` is set, memory otherwise.

pub mod highlights;
pub mod init;
