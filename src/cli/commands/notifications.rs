//! Notifications command implementation.
//!
//! Mutations (mark read, delete) apply to this run's copy of the inbox and
//! are reflected in the listing that follows them.

use anyhow::{Result, bail};
use pmdash_lib::{NotificationFilter, NotificationInbox, Toned};

use super::CommandContext;
use crate::cli::NotificationsArgs;
use crate::format::{InboxOutput, pad};

const UNREAD_MARK: &str = "●";

/// Execute the notifications command.
///
/// # Errors
///
/// Returns an error if an id to mark or delete does not exist or JSON
/// serialization fails.
pub fn execute(args: &NotificationsArgs, ctx: &CommandContext) -> Result<()> {
    let mut inbox = NotificationInbox::from_store(&ctx.store);
    inbox.filter = NotificationFilter::parse(&args.filter);
    if let Some(search) = &args.search {
        inbox.search.clone_from(search);
    }

    let mut marked_read = 0;
    for id in &args.mark_read {
        if !inbox.mark_read(id) {
            bail!("Notification not found: {id}");
        }
        marked_read += 1;
    }
    if args.mark_all_read {
        marked_read += inbox.mark_all_read();
    }

    let mut deleted = Vec::with_capacity(args.delete.len());
    for id in &args.delete {
        match inbox.delete(id) {
            Some(notification) => deleted.push(notification.id),
            None => bail!("Notification not found: {id}"),
        }
    }

    if ctx.output.is_json() {
        let output = InboxOutput {
            filter: inbox.filter.clone(),
            unread: inbox.unread_count(),
            total: inbox.all().len(),
            marked_read,
            deleted,
            notifications: inbox.visible(),
        };
        return ctx.output.json(&output);
    }

    let out = &ctx.output;
    if marked_read > 0 {
        println!("Marked {marked_read} read");
    }
    if !deleted.is_empty() {
        println!("Deleted {}", deleted.join(", "));
    }
    println!(
        "{}",
        out.heading(&format!(
            "{} unread of {} ({})",
            inbox.unread_count(),
            inbox.all().len(),
            inbox.filter
        ))
    );

    let visible = inbox.visible();
    if visible.is_empty() {
        println!("  {}", out.dim("No notifications."));
        return Ok(());
    }
    for notification in visible {
        let mark = if notification.read { " " } else { UNREAD_MARK };
        println!(
            "{} {} {} {} {}",
            mark,
            pad(&notification.id, 3),
            out.paint(
                &pad(notification.severity.as_str(), 8),
                notification.severity.tone()
            ),
            pad(&notification.title, 32),
            out.dim(&notification.timestamp)
        );
        println!("      {}", notification.description);
    }

    Ok(())
}
