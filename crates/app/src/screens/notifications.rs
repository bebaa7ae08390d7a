//! Notifications screen.

use submanager_application::NotificationInbox;
use submanager_application::ports::UserApi;
use submanager_domain::NotificationPreferences;

use super::ScreenResult;
use crate::cli::NotificationCommand;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, command: NotificationCommand) -> ScreenResult {
    let inbox = NotificationInbox::new(ctx.backend.clone()).with_limit(ctx.config.notification_limit);

    match command {
        NotificationCommand::List => {
            let ticket = ctx.ticket().await;
            let loaded = inbox.load().await?;
            let Some(loaded) = ticket.accept(loaded) else {
                return Ok(());
            };
            println!("{} unread", loaded.unread);
            for notification in &loaded.notifications {
                let marker = if notification.is_read { ' ' } else { '*' };
                println!("{marker} {:<26} {}", notification.id, notification.message);
            }
        }
        NotificationCommand::Unread => println!("{}", inbox.unread().await?),
        NotificationCommand::Read { id } => {
            inbox.mark_read(&id).await?;
            println!("Marked {id} as read");
        }
        NotificationCommand::CheckRenewals => {
            let outcome = inbox.check_renewals().await?;
            match (outcome.message, outcome.notifications_created) {
                (Some(message), _) => println!("{message}"),
                (None, Some(created)) => println!("{created} reminder(s) created"),
                (None, None) => println!("Renewal check finished"),
            }
        }
        NotificationCommand::Preferences {
            no_email,
            days_before,
        } => {
            let preferences = NotificationPreferences {
                email_enabled: !no_email,
                reminder_days_before: days_before,
            };
            ctx.backend
                .update_notification_preferences(&preferences)
                .await?;
            println!(
                "Reminders {} days before renewal, email {}",
                preferences.reminder_days_before,
                if preferences.email_enabled { "on" } else { "off" }
            );
        }
    }
    Ok(())
}
