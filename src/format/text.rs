//! Text formatting functions for `pmdash`.
//!
//! Provides plain text (non-ANSI) building blocks for terminal output:
//! - Status icons (○ ◐ ● ✓)
//! - Priority badges ([High], [Critical], ...)
//! - Issue line formatting
//! - Width-aware padding and progress bars

use pmdash_lib::{Issue, IssueStatus, Priority};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Status icon characters.
pub mod icons {
    /// To do - not started (hollow circle).
    pub const TODO: &str = "○";
    /// In progress - active work (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Blocked - needs attention (filled circle).
    pub const BLOCKED: &str = "●";
    /// Done (checkmark).
    pub const DONE: &str = "✓";
}

const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';
const ELLIPSIS: char = '…';

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::ToDo => icons::TODO,
        IssueStatus::InProgress => icons::IN_PROGRESS,
        IssueStatus::Blocked => icons::BLOCKED,
        IssueStatus::Done => icons::DONE,
    }
}

/// Format priority as a bracketed badge.
#[must_use]
pub fn format_priority(priority: Priority) -> String {
    format!("[{priority}]")
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {id} {priority} {title}` plus ` @{assignee}` when known.
#[must_use]
pub fn format_issue_line(issue: &Issue, assignee: Option<&str>) -> String {
    let mut line = format!(
        "{} {} {} {}",
        format_status_icon(issue.status),
        issue.id,
        format_priority(issue.priority),
        issue.title,
    );
    if let Some(name) = assignee {
        line.push_str(" @");
        line.push_str(name);
    }
    line
}

/// Pad or truncate `text` to exactly `width` terminal columns.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let current = text.width();
    if current <= width {
        let mut padded = String::with_capacity(text.len() + width - current);
        padded.push_str(text);
        padded.extend(std::iter::repeat_n(' ', width - current));
        return padded;
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    used += 1;
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

/// Width of the widest item, for column alignment.
#[must_use]
pub fn column_width<'a>(items: impl IntoIterator<Item = &'a str>) -> usize {
    items.into_iter().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

/// Render `percent` (clamped to 100) as a bar `width` cells wide.
#[must_use]
pub fn progress_bar(percent: u32, width: usize) -> String {
    let percent = usize::try_from(percent.min(100)).unwrap_or(100);
    let filled = (percent * width + 50) / 100;
    let mut bar = String::with_capacity(width * BAR_FULL.len_utf8());
    bar.extend(std::iter::repeat_n(BAR_FULL, filled));
    bar.extend(std::iter::repeat_n(BAR_EMPTY, width - filled));
    bar
}

/// `"1 issue"` / `"3 issues"`.
#[must_use]
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
