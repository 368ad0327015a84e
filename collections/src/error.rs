use thiserror::Error;

/// The two structural failure classes of collection operations.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// An argument was malformed: a negative index or an element of the wrong type.
    InvalidArgument,
    /// A well-formed index pointed past the last element.
    OutOfRange,
}

/// An enum containing the errors that indexed access and insertion can produce.
///
/// Search misses are not errors, they are reported as `None` or `false`.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CollectionError {
    #[error("Index must be a non-negative integer.")]
    InvalidIndex,
    #[error("Collection type must be {expected}, passed {found}.")]
    TypeMismatch { expected: String, found: String },
    #[error("Index {index} is out of range for a collection of {len} elements.")]
    OutOfRange { index: usize, len: usize },
}

impl CollectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CollectionError::InvalidIndex | CollectionError::TypeMismatch { .. } => {
                ErrorKind::InvalidArgument
            }
            CollectionError::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_variants_to_kinds() {
        assert_eq!(
            CollectionError::InvalidIndex.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            CollectionError::TypeMismatch {
                expected: "Number".to_string(),
                found: "String".to_string(),
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            CollectionError::OutOfRange { index: 3, len: 3 }.kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn it_formats_messages() {
        let err = CollectionError::OutOfRange { index: 10, len: 3 };
        assert_eq!(
            err.to_string(),
            "Index 10 is out of range for a collection of 3 elements."
        );
    }
}
