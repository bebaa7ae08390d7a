//! Admin screens: user management and the overview.

use submanager_application::{LoadAdminOverview, ManageUsers};
use submanager_application::ports::UserApi;
use submanager_domain::NewUser;

use super::{ScreenResult, money};
use crate::cli::UserCommand;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, command: UserCommand) -> ScreenResult {
    match command {
        UserCommand::List => {
            let ticket = ctx.ticket().await;
            let users = ctx.backend.list_users().await?;
            for user in ticket.accept(users).unwrap_or_default() {
                let role = if user.is_admin { "admin" } else { "" };
                println!("{:<26} {:<32} {role}", user.id, user.email);
            }
        }
        UserCommand::Add {
            email,
            password,
            admin,
        } => {
            let new_user = NewUser {
                email: email.trim().to_string(),
                password,
                is_admin: admin,
            };
            let created = ManageUsers::new(ctx.backend.clone()).create(&new_user).await?;
            println!("Created {} ({})", created.email, created.id);
        }
        UserCommand::Delete { id } => {
            ManageUsers::new(ctx.backend.clone()).delete(&id).await?;
            println!("Deleted user {id}");
        }
    }
    Ok(())
}

pub async fn overview(ctx: &AppContext) -> ScreenResult {
    let ticket = ctx.ticket().await;
    let view = LoadAdminOverview::new(ctx.backend.clone(), ctx.backend.clone())
        .execute()
        .await?;
    let Some(view) = ticket.accept(view) else {
        return Ok(());
    };

    println!(
        "Users: {} ({} admin)   Subscriptions: {}   Monthly spend: {}",
        view.user_stats.total,
        view.user_stats.admins,
        view.spending.count,
        money(view.spending.total_monthly),
    );
    for subscription in &view.subscriptions {
        println!(
            "  {:<24} {:>10}  owner {}",
            subscription.service_name,
            money(subscription.cost),
            subscription.user_id.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
