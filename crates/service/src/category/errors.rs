use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use super::domain::CategoryId;
use crate::errors::ServiceError;

/// Every way a category operation can fail.
///
/// All variants except `Unavailable` are validation outcomes; none of them
/// leave partial writes behind.
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("category name is required and cannot be empty")]
    InvalidName,
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: CategoryId },
    #[error("category with name '{name}' already exists at this level")]
    DuplicateName { name: String },
    #[error("category cannot be its own parent")]
    SelfParent,
    #[error("cannot set parent to a descendant category")]
    CircularReference,
    #[error("cannot delete category with child categories; delete or move them first")]
    HasChildren,
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl CategoryError {
    pub fn category_not_found(id: CategoryId) -> Self { Self::NotFound { entity: "service category", id } }

    pub fn parent_not_found(id: CategoryId) -> Self { Self::NotFound { entity: "parent category", id } }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            CategoryError::InvalidName => 2001,
            CategoryError::NotFound { .. } => 2002,
            CategoryError::DuplicateName { .. } => 2003,
            CategoryError::SelfParent => 2004,
            CategoryError::CircularReference => 2005,
            CategoryError::HasChildren => 2006,
            CategoryError::ConstraintViolation(_) => 2101,
            CategoryError::Unavailable(_) => 2200,
        }
    }

    /// Stable identifier the presentation layer translates.
    pub fn kind(&self) -> &'static str {
        match self {
            CategoryError::InvalidName => "invalid_name",
            CategoryError::NotFound { .. } => "not_found",
            CategoryError::DuplicateName { .. } => "duplicate_name",
            CategoryError::SelfParent => "self_parent",
            CategoryError::CircularReference => "circular_reference",
            CategoryError::HasChildren => "has_children",
            CategoryError::ConstraintViolation(_) => "constraint_violation",
            CategoryError::Unavailable(_) => "unavailable",
        }
    }
}

impl From<DbErr> for CategoryError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) | Some(SqlErr::UniqueConstraintViolation(msg)) => {
                CategoryError::ConstraintViolation(msg)
            }
            _ => CategoryError::Unavailable(e.to_string()),
        }
    }
}

impl From<ServiceError> for CategoryError {
    fn from(e: ServiceError) -> Self {
        CategoryError::Unavailable(e.to_string())
    }
}
