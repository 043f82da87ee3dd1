//! Error types for `pmdash-lib`.
//!
//! Lookups and filters never fail: a missing record is `None` and a
//! filter that matches nothing is an empty `Vec`. The variants below cover
//! strict enum parsing and loading seed data from disk.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for pmdash-lib operations.
#[derive(Error, Debug)]
pub enum DashError {
    // === Enum Parsing ===
    /// Unknown issue status.
    #[error("Invalid issue status: {status}")]
    InvalidStatus { status: String },

    /// Unknown issue priority.
    #[error("Invalid priority: {priority}")]
    InvalidPriority { priority: String },

    /// Unknown team.
    #[error("Invalid team: {team}")]
    InvalidTeam { team: String },

    /// Unknown project status.
    #[error("Invalid project status: {status}")]
    InvalidProjectStatus { status: String },

    /// Unknown notification severity.
    #[error("Invalid notification severity: {severity}")]
    InvalidSeverity { severity: String },

    /// Unknown notification category.
    #[error("Invalid notification category: {category}")]
    InvalidCategory { category: String },

    /// Unknown release status.
    #[error("Invalid release status: {status}")]
    InvalidReleaseStatus { status: String },

    // === Seed Errors ===
    /// The seed document could not be deserialized.
    #[error("Seed parse error at line {line}, column {column}: {reason}")]
    SeedParse {
        line: usize,
        column: usize,
        reason: String,
    },

    /// Seed file not found at the specified path.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashError {
    #[must_use]
    pub fn seed_parse(err: &serde_json::Error) -> Self {
        Self::SeedParse {
            line: err.line(),
            column: err.column(),
            reason: err.to_string(),
        }
    }
}

/// Result type using `DashError`.
pub type Result<T> = std::result::Result<T, DashError>;
