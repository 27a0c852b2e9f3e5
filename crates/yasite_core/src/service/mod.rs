//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate access policy, validation and repository calls into
//!   request-level use-cases for the news site and the notes app.
//! - Report request results as `Outcome` values; reserve `Err` for
//!   infrastructure failures.

pub mod error;
pub mod feed;
pub mod moderation;
pub mod news_service;
pub mod note_service;
pub mod outcome;
pub mod slug;
