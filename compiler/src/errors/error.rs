use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

/// A query which cannot be turned into a request. Raised before anything is sent.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, message: String) -> Error {
        Error { kind, message }
    }

    pub(crate) fn unsupported(message: String) -> Error {
        Error::new(ErrorKind::UnsupportedOperation, message)
    }

    pub(crate) fn invalid_pagination(message: String) -> Error {
        Error::new(ErrorKind::InvalidPagination, message)
    }

    pub(crate) fn malformed_condition(message: String) -> Error {
        Error::new(ErrorKind::MalformedCondition, message)
    }

    /// Return the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The kind of an error that can occur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum ErrorKind {
    /// The API has no way to express the requested operation.
    #[error("Unsupported operation")]
    UnsupportedOperation,
    /// A row offset was requested without a page size to address it with.
    #[error("Invalid pagination")]
    InvalidPagination,
    /// A condition combines an operator with a value it is not defined for.
    #[error("Malformed condition")]
    MalformedCondition,
    /// The query could not be decoded from its serialized form.
    #[error("Invalid query")]
    InvalidQuery,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = Error::invalid_pagination("Offset 5 requires a page size.".to_string());
        assert_eq!(error.kind(), ErrorKind::InvalidPagination);
        assert_eq!(
            error.to_string(),
            "Invalid pagination: Offset 5 requires a page size."
        );
    }
}
