// ABOUTME: Structured error types for repository operations
// ABOUTME: Returned by persistence collaborators and propagated unchanged by the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors reported by repository implementations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Entity does not exist
    #[error("{entity_type} not found: {id}")]
    NotFound {
        /// Kind of entity that was requested
        entity_type: &'static str,
        /// Identifier of the missing entity
        id: String,
    },

    /// Query execution failed
    #[error("Query failed: {context}")]
    QueryError {
        /// What the query was doing when it failed
        context: String,
    },

    /// Backend connection is unavailable
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Stored value could not be encoded or decoded
    #[error("Serialization failed: {context}")]
    SerializationError {
        /// Which value failed to (de)serialize
        context: String,
    },
}
