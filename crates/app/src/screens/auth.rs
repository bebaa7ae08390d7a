//! Login screen and account commands.

use submanager_domain::{DomainError, validate_email};

use super::{ScreenError, ScreenResult};
use crate::context::AppContext;

/// Signs in. A rejected password leaves any existing session untouched.
pub async fn login(ctx: &AppContext, email: &str, password: &str) -> ScreenResult {
    validate_email(email)?;
    if password.is_empty() {
        return Err(ScreenError::Input(DomainError::MissingField("password")));
    }

    let identity = ctx.session.login(email.trim(), password).await?;
    let role = if identity.is_admin { "administrator" } else { "member" };
    println!("Logged in as {} ({role})", identity.email);
    Ok(())
}

/// Clears the stored session.
pub async fn logout(ctx: &AppContext) -> ScreenResult {
    ctx.session.logout().await;
    println!("Logged out");
    Ok(())
}

/// Prints the resolved identity.
pub fn whoami(ctx: &AppContext) -> ScreenResult {
    if let Some(identity) = ctx.snapshot().identity() {
        println!("{}", identity.email);
        if identity.is_admin {
            println!("role: administrator");
        } else {
            println!("role: member");
        }
    }
    Ok(())
}
