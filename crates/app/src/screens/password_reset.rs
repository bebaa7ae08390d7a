//! Forgot-password screen.
//!
//! Each step is its own invocation, so later steps resume the wizard with the
//! email and code given on the command line.

use submanager_application::PasswordResetWizard;
use submanager_domain::ResetStep;

use super::ScreenResult;
use crate::cli::ResetCommand;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, command: ResetCommand) -> ScreenResult {
    let api = ctx.backend.clone();
    match command {
        ResetCommand::Send { email } => {
            let mut wizard = PasswordResetWizard::new(api);
            wizard.submit_email(&email).await?;
            if let Some(message) = wizard.message() {
                println!("{message}");
            }
            println!(
                "Next: submanager forgot-password verify --email {} --code <code>",
                wizard.email()
            );
        }
        ResetCommand::Verify { email, code } => {
            let mut wizard = PasswordResetWizard::resume(api, ResetStep::VerifyCode, &email, "");
            wizard.submit_code(&code).await?;
            println!("Code accepted.");
            println!(
                "Next: submanager forgot-password reset --email {} --code {} --new-password <password>",
                wizard.email(),
                code.trim()
            );
        }
        ResetCommand::Reset {
            email,
            code,
            new_password,
        } => {
            let mut wizard = PasswordResetWizard::resume(api, ResetStep::NewPassword, &email, &code);
            wizard.submit_password(&new_password).await?;
            println!("Password updated. You can log in now.");
        }
    }
    Ok(())
}
