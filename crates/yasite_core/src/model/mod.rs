//! Domain model for the news site and the notes app.
//!
//! # Responsibility
//! - Define canonical records shared by repositories, policy and services.
//! - Describe ownership and visibility of every record via `Authorizable`.
//!
//! # Invariants
//! - Every `Comment` and `Note` has exactly one author, fixed at creation.
//! - `NewsItem` has no author and no edit path.

pub mod comment;
pub mod identity;
pub mod news;
pub mod note;
pub mod user;
