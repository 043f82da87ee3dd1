//! Colour tones for every enum the dashboard renders as a badge.
//!
//! Each mapping is an exhaustive `match`, so adding a variant without a
//! tone fails to compile.

use serde::Serialize;

use crate::model::{IssueStatus, Priority, ProjectStatus, ReleaseStatus, Severity, Team};
use crate::stats::{DeadlineUrgency, SprintHealth};

/// Badge colour family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Gray,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Pink,
}

impl Tone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }
}

/// Values with a badge colour.
pub trait Toned {
    fn tone(&self) -> Tone;
}

impl Toned for IssueStatus {
    fn tone(&self) -> Tone {
        match self {
            Self::ToDo => Tone::Gray,
            Self::InProgress => Tone::Blue,
            Self::Blocked => Tone::Red,
            Self::Done => Tone::Green,
        }
    }
}

impl Toned for Priority {
    fn tone(&self) -> Tone {
        match self {
            Self::Low => Tone::Gray,
            Self::Medium => Tone::Yellow,
            Self::High => Tone::Orange,
            Self::Critical => Tone::Red,
        }
    }
}

impl Toned for Team {
    fn tone(&self) -> Tone {
        match self {
            Self::Dev => Tone::Blue,
            Self::Design => Tone::Purple,
            Self::Product => Tone::Green,
            Self::Qa => Tone::Orange,
            Self::Marketing => Tone::Pink,
        }
    }
}

impl Toned for ProjectStatus {
    fn tone(&self) -> Tone {
        match self {
            Self::Active => Tone::Green,
            Self::Planning => Tone::Blue,
            Self::Archived => Tone::Gray,
        }
    }
}

impl Toned for Severity {
    fn tone(&self) -> Tone {
        match self {
            Self::Critical => Tone::Red,
            Self::High => Tone::Orange,
            Self::Medium => Tone::Yellow,
            Self::Low => Tone::Blue,
        }
    }
}

impl Toned for ReleaseStatus {
    fn tone(&self) -> Tone {
        match self {
            Self::Released => Tone::Green,
            Self::Beta => Tone::Blue,
            Self::Alpha => Tone::Purple,
            Self::Planned => Tone::Gray,
        }
    }
}

impl Toned for DeadlineUrgency {
    fn tone(&self) -> Tone {
        match self {
            Self::Critical => Tone::Red,
            Self::Warning => Tone::Yellow,
            Self::Calm => Tone::Green,
        }
    }
}

impl Toned for SprintHealth {
    fn tone(&self) -> Tone {
        match self {
            Self::Good => Tone::Green,
            Self::Warning => Tone::Yellow,
            Self::Critical => Tone::Red,
        }
    }
}

/// Hex colour of a status slice in the dashboard chart.
#[must_use]
pub const fn chart_color(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::ToDo => "#6b7280",
        IssueStatus::InProgress => "#3b82f6",
        IssueStatus::Blocked => "#ef4444",
        IssueStatus::Done => "#10b981",
    }
}
