use std::fmt;

use thiserror::Error;

/// The entity an operation was addressing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Venue,
    Artist,
    Show,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Entity::Venue => "venue",
            Entity::Artist => "artist",
            Entity::Show => "show",
        };
        f.write_str(label)
    }
}

/// Error taxonomy for the booking directory.
///
/// The boundary layer maps these onto pages: `NotFound` renders a 404,
/// `Validation` is flashed back at the form, `Persistence` gets a generic
/// failure message while the underlying fault is logged server-side.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("no {entity} with id {id}")]
    NotFound { entity: Entity, id: i64 },

    #[error("invalid submission: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),
}

impl DirectoryError {
    pub fn not_found(entity: Entity, id: i64) -> Self {
        DirectoryError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = DirectoryError::not_found(Entity::Venue, 42);
        assert_eq!(err.to_string(), "no venue with id 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_joins_field_messages() {
        let err = DirectoryError::Validation(vec![
            "name is required".to_string(),
            "city is required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid submission: name is required; city is required"
        );
    }
}
