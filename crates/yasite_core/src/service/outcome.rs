//! Request-level outcome of page and mutation use-cases.
//!
//! Business logic reports *what happened*; the request boundary turns it into
//! a status code and an optional location via `status()` and `location()`.

use crate::policy::Denial;
use crate::route::login_url_with_next;
use std::fmt::{Display, Formatter};

/// Required-field error message.
pub const REQUIRED_FIELD_MESSAGE: &str = "Обязательное поле.";

/// Form field that a validation error is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Text,
    Slug,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Text => "text",
            Self::Slug => "slug",
        }
    }
}

/// One field-scoped validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: Field) -> Self {
        Self::new(field, REQUIRED_FIELD_MESSAGE)
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

/// HTTP-equivalent status of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok,
    Found,
    NotFound,
}

impl HttpStatus {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Found => 302,
            Self::NotFound => 404,
        }
    }
}

/// Tagged result of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Page rendered with its context.
    Render(T),
    /// Mutation applied; continue at this path.
    Redirect(String),
    /// Form rejected; nothing was persisted.
    ValidationFailed(Vec<FieldError>),
    /// Target does not exist, or is hidden from this identity.
    NotFound,
    /// Anonymous identity must log in, then resume at `resume_url`.
    AuthRequired { resume_url: String },
}

impl<T> Outcome<T> {
    pub fn invalid(error: FieldError) -> Self {
        Self::ValidationFailed(vec![error])
    }

    pub fn auth_required(resume_url: impl Into<String>) -> Self {
        Self::AuthRequired {
            resume_url: resume_url.into(),
        }
    }

    /// Answer for a refused edit/delete request.
    pub fn from_denial(denial: Denial, resume_url: impl Into<String>) -> Self {
        match denial {
            Denial::NotFound => Self::NotFound,
            Denial::LoginRequired => Self::auth_required(resume_url),
        }
    }

    pub fn status(&self) -> HttpStatus {
        match self {
            Self::Render(_) | Self::ValidationFailed(_) => HttpStatus::Ok,
            Self::Redirect(_) | Self::AuthRequired { .. } => HttpStatus::Found,
            Self::NotFound => HttpStatus::NotFound,
        }
    }

    /// Redirect target, including the login URL for `AuthRequired`.
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Redirect(target) => Some(target.clone()),
            Self::AuthRequired { resume_url } => Some(login_url_with_next(resume_url)),
            _ => None,
        }
    }

    /// Rendered page context, if any.
    pub fn page(&self) -> Option<&T> {
        match self {
            Self::Render(page) => Some(page),
            _ => None,
        }
    }

    pub fn into_page(self) -> Option<T> {
        match self {
            Self::Render(page) => Some(page),
            _ => None,
        }
    }

    /// Validation messages scoped to `field`.
    pub fn field_errors(&self, field: Field) -> Vec<&str> {
        match self {
            Self::ValidationFailed(errors) => errors
                .iter()
                .filter(|error| error.field == field)
                .map(|error| error.message.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Render(page) => Outcome::Render(f(page)),
            Self::Redirect(target) => Outcome::Redirect(target),
            Self::ValidationFailed(errors) => Outcome::ValidationFailed(errors),
            Self::NotFound => Outcome::NotFound,
            Self::AuthRequired { resume_url } => Outcome::AuthRequired { resume_url },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, FieldError, HttpStatus, Outcome};

    #[test]
    fn status_codes_follow_outcome_kind() {
        assert_eq!(Outcome::Render(()).status().code(), 200);
        assert_eq!(Outcome::<()>::Redirect("/done/".into()).status(), HttpStatus::Found);
        assert_eq!(
            Outcome::<()>::invalid(FieldError::required(Field::Text)).status(),
            HttpStatus::Ok
        );
        assert_eq!(Outcome::<()>::NotFound.status().code(), 404);
        assert_eq!(Outcome::<()>::auth_required("/add/").status().code(), 302);
    }

    #[test]
    fn auth_required_location_points_to_login_with_next() {
        let outcome = Outcome::<()>::auth_required("/news/5/");
        assert_eq!(
            outcome.location().as_deref(),
            Some("/auth/login/?next=/news/5/")
        );
        assert_eq!(Outcome::Render(1).location(), None);
    }

    #[test]
    fn field_errors_filters_by_field() {
        let outcome = Outcome::<()>::ValidationFailed(vec![
            FieldError::required(Field::Title),
            FieldError::new(Field::Slug, "taken"),
        ]);
        assert_eq!(outcome.field_errors(Field::Slug), vec!["taken"]);
        assert!(outcome.field_errors(Field::Text).is_empty());
    }
}
