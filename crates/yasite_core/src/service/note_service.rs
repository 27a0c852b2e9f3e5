//! Notes app use-case service.
//!
//! # Responsibility
//! - Render the per-user notes list, note detail and note form pages.
//! - Create, edit and delete notes on behalf of an identity.
//! - Derive slugs from titles and report slug collisions as form errors.
//!
//! # Invariants
//! - Slug uniqueness is global, not per author.
//! - A colliding slug is reported from the store write itself; nothing is
//!   persisted.
//! - Notes are private: other identities get `NotFound` for every slug route.

use crate::config::SiteConfig;
use crate::model::identity::Identity;
use crate::model::note::{Note, NoteDraft};
use crate::policy::{can_mutate, can_view, mutation_denial};
use crate::repo::error::RepoError;
use crate::repo::note_repo::NoteRepository;
use crate::route::Route;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::feed::notes_feed;
use crate::service::outcome::{Field, FieldError, Outcome};
use crate::service::slug::{is_valid_slug, slugify, INVALID_SLUG_MESSAGE};
use log::info;

/// Maximum title length in characters.
pub const TITLE_MAX_LENGTH: usize = 100;

/// Note submission form. A blank `slug` is derived from `title`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    pub slug: Option<String>,
}

impl NoteForm {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            slug: None,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Form pre-filled from a stored note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: Some(note.slug.clone()),
        }
    }
}

/// Notes list context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListPage {
    /// Only the requester's notes, in insertion order.
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetailPage {
    pub note: Note,
}

/// Add/edit page context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFormPage {
    pub form: NoteForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDeletePage {
    pub note: Note,
}

/// Notes app facade over a note repository.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    config: SiteConfig,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R, config: SiteConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// The requester's own notes; anonymous identities must log in.
    pub fn list_page(&self, identity: &Identity) -> ServiceResult<Outcome<NotesListPage>> {
        if !identity.is_authenticated() {
            return Ok(Outcome::auth_required(Route::NotesList.path()));
        }
        let notes = notes_feed(&self.repo, identity)?;
        Ok(Outcome::Render(NotesListPage { notes }))
    }

    pub fn detail_page(
        &self,
        identity: &Identity,
        slug: &str,
    ) -> ServiceResult<Outcome<NoteDetailPage>> {
        if !identity.is_authenticated() {
            return Ok(Outcome::auth_required(
                Route::NotesDetail(slug.to_string()).path(),
            ));
        }
        Ok(match self.repo.get_note_by_slug(slug)? {
            Some(note) if can_view(identity, &note) => Outcome::Render(NoteDetailPage { note }),
            _ => Outcome::NotFound,
        })
    }

    /// Empty add form for authenticated identities.
    pub fn add_page(&self, identity: &Identity) -> ServiceResult<Outcome<NoteFormPage>> {
        if !identity.is_authenticated() {
            return Ok(Outcome::auth_required(Route::NotesAdd.path()));
        }
        Ok(Outcome::Render(NoteFormPage {
            form: NoteForm::default(),
        }))
    }

    /// Creates a note owned by `identity`.
    pub fn add_note(&self, identity: &Identity, form: &NoteForm) -> ServiceResult<Outcome<()>> {
        let Some(author) = identity.user_id() else {
            info!("event=note_create module=notes status=denied reason=anonymous");
            return Ok(Outcome::auth_required(Route::NotesAdd.path()));
        };
        let draft = match self.resolve_draft(form) {
            Ok(draft) => draft,
            Err(errors) => {
                info!("event=note_create module=notes status=invalid");
                return Ok(Outcome::ValidationFailed(errors));
            }
        };

        match self.repo.create_note(author, &draft) {
            Ok(note) => {
                info!(
                    "event=note_create module=notes status=ok note_id={} slug={}",
                    note.id, note.slug
                );
                Ok(Outcome::Redirect(Route::NotesSuccess.path()))
            }
            Err(RepoError::Conflict { value, .. }) => Ok(self.duplicate_slug(value)),
            Err(err) => Err(err.into()),
        }
    }

    /// Edit page pre-filled from the note owned by `identity`.
    pub fn edit_page(
        &self,
        identity: &Identity,
        slug: &str,
    ) -> ServiceResult<Outcome<NoteFormPage>> {
        let resume_url = Route::NotesEdit(slug.to_string()).path();
        Ok(match self.owned_note(identity, slug, resume_url)? {
            Ok(note) => Outcome::Render(NoteFormPage {
                form: NoteForm::from_note(&note),
            }),
            Err(denied) => denied,
        })
    }

    /// Replaces title, text and slug of a note owned by `identity`.
    pub fn edit_note(
        &self,
        identity: &Identity,
        slug: &str,
        form: &NoteForm,
    ) -> ServiceResult<Outcome<()>> {
        let resume_url = Route::NotesEdit(slug.to_string()).path();
        let note = match self.owned_note(identity, slug, resume_url)? {
            Ok(note) => note,
            Err(denied) => return Ok(denied),
        };
        let draft = match self.resolve_draft(form) {
            Ok(draft) => draft,
            Err(errors) => {
                info!("event=note_update module=notes status=invalid note_id={}", note.id);
                return Ok(Outcome::ValidationFailed(errors));
            }
        };

        match self.repo.update_note(note.id, &draft) {
            Ok(()) => {
                info!(
                    "event=note_update module=notes status=ok note_id={} slug={}",
                    note.id, draft.slug
                );
                Ok(Outcome::Redirect(Route::NotesSuccess.path()))
            }
            Err(RepoError::Conflict { value, .. }) => Ok(self.duplicate_slug(value)),
            Err(RepoError::NotFound { .. }) => Ok(Outcome::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    pub fn delete_page(
        &self,
        identity: &Identity,
        slug: &str,
    ) -> ServiceResult<Outcome<NoteDeletePage>> {
        let resume_url = Route::NotesDelete(slug.to_string()).path();
        Ok(match self.owned_note(identity, slug, resume_url)? {
            Ok(note) => Outcome::Render(NoteDeletePage { note }),
            Err(denied) => denied,
        })
    }

    /// Deletes a note owned by `identity`.
    pub fn delete_note(&self, identity: &Identity, slug: &str) -> ServiceResult<Outcome<()>> {
        let resume_url = Route::NotesDelete(slug.to_string()).path();
        let note = match self.owned_note(identity, slug, resume_url)? {
            Ok(note) => note,
            Err(denied) => return Ok(denied),
        };

        match self.repo.delete_note(note.id) {
            Ok(()) => {
                info!("event=note_delete module=notes status=ok note_id={}", note.id);
                Ok(Outcome::Redirect(Route::NotesSuccess.path()))
            }
            Err(RepoError::NotFound { .. }) => Ok(Outcome::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    /// Loads a note by slug and checks ownership; the inner `Err` is the
    /// outcome to return for missing or foreign notes.
    fn owned_note<T>(
        &self,
        identity: &Identity,
        slug: &str,
        resume_url: String,
    ) -> Result<Result<Note, Outcome<T>>, ServiceError> {
        match self.repo.get_note_by_slug(slug)? {
            Some(note) if can_mutate(identity, &note) => Ok(Ok(note)),
            _ => {
                info!("event=note_access module=notes status=denied slug={slug}");
                let denial = mutation_denial(identity, self.config.anonymous_mutation);
                Ok(Err(Outcome::from_denial(denial, resume_url)))
            }
        }
    }

    fn duplicate_slug<T>(&self, slug: String) -> Outcome<T> {
        info!("event=note_slug module=notes status=conflict slug={slug}");
        let message = format!("{slug}{}", self.config.duplicate_slug_suffix);
        Outcome::invalid(FieldError::new(Field::Slug, message))
    }

    /// Validates form fields and resolves the final slug.
    fn resolve_draft(&self, form: &NoteForm) -> Result<NoteDraft, Vec<FieldError>> {
        let title = form.title.trim();
        let text = form.text.trim();
        let mut errors = Vec::new();

        if title.is_empty() {
            errors.push(FieldError::required(Field::Title));
        } else {
            let title_len = title.chars().count();
            if title_len > TITLE_MAX_LENGTH {
                errors.push(FieldError::new(
                    Field::Title,
                    too_long_message(TITLE_MAX_LENGTH, title_len),
                ));
            }
        }
        if text.is_empty() {
            errors.push(FieldError::required(Field::Text));
        }

        let supplied = form
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty());
        let slug = match supplied {
            Some(slug) => {
                if !is_valid_slug(slug) {
                    errors.push(FieldError::new(Field::Slug, INVALID_SLUG_MESSAGE));
                } else if slug.len() > self.config.slug_max_length {
                    errors.push(FieldError::new(
                        Field::Slug,
                        too_long_message(self.config.slug_max_length, slug.len()),
                    ));
                }
                slug.to_string()
            }
            None => {
                let derived = slugify(title, self.config.slug_max_length);
                if derived.is_empty() && !title.is_empty() {
                    errors.push(FieldError::required(Field::Slug));
                }
                derived
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NoteDraft {
            title: title.to_string(),
            text: text.to_string(),
            slug,
        })
    }
}

fn too_long_message(limit: usize, actual: usize) -> String {
    format!("Убедитесь, что это значение содержит не более {limit} символов (сейчас {actual}).")
}
