//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A unique column already holds this value.
    #[error("{entity_type} with {field} '{value}' already exists")]
    Duplicate {
        entity_type: &'static str,
        field: &'static str,
        value: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Business constraint violated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Duplicate error for a unique-column collision.
    pub fn duplicate(entity_type: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::Duplicate {
            entity_type,
            field,
            value: value.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_error_names_the_field_and_value() {
        let err = RepoError::duplicate("Hero", "heroName", "Superman");
        assert_eq!(err.to_string(), "Hero with heroName 'Superman' already exists");
    }

    #[test]
    fn database_error_carries_operation() {
        let err = RepoError::database("insert_hero", "disk I/O error");
        assert!(err.to_string().contains("insert_hero"));
    }
}
