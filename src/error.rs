// Error types shared by the catalog store and the session layer

use std::fmt;

use thiserror::Error;

use crate::models::BookingStatus;

pub type CatalogResult<T> = Result<T, CatalogError>;

// Which collection a failed lookup was aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Destination,
    Review,
    Booking,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Destination => "Destination",
            Entity::Review => "Review",
            Entity::Booking => "Booking",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    #[error("Booking status cannot move from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
}

impl CatalogError {
    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
