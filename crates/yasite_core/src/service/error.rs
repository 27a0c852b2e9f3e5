//! Infrastructure error surfaced by use-case services.

use crate::repo::error::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ServiceError {
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::repo::error::RepoError;
    use std::error::Error;

    #[test]
    fn repo_failure_is_wrapped_with_source() {
        let err = ServiceError::from(RepoError::MissingRequiredTable("notes"));
        assert_eq!(err.to_string(), "required table is missing: notes");
        assert!(err.source().is_some());
    }
}
