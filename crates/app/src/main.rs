//! SubManager - Main Entry Point
//!
//! Loads configuration, resolves the stored session and runs one screen
//! behind the route guard.

mod cli;
mod context;
mod screens;

use std::process::ExitCode;

use clap::Parser;
use submanager_domain::{GuardDecision, Route};
use submanager_infrastructure::AppConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::context::AppContext;
use crate::screens::ScreenError;

const EXIT_FAILURE: u8 = 1;
const EXIT_LOGIN_REQUIRED: u8 = 2;
const EXIT_ADMIN_REQUIRED: u8 = 3;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    // Logs go to stderr so command output stays clean.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = AppContext::start(config).await?;
    let route = cli.command.route();

    let navigation = ctx.enter(route).await;
    match navigation.decision {
        GuardDecision::Render => {}
        GuardDecision::RedirectLogin | GuardDecision::Pending => {
            eprintln!("Please log in");
            return Ok(ExitCode::from(EXIT_LOGIN_REQUIRED));
        }
        GuardDecision::RedirectHome => {
            eprintln!("Administrator access required");
            return Ok(ExitCode::from(EXIT_ADMIN_REQUIRED));
        }
    }

    let outcome = run(&ctx, cli.command).await;
    let invalidated = route != Route::Login && ctx.current_route().await == Route::Login;

    match outcome {
        Ok(()) if !invalidated => Ok(ExitCode::SUCCESS),
        Err(error) if !error.is_unauthorized() => {
            eprintln!("{error}");
            Ok(ExitCode::from(EXIT_FAILURE))
        }
        // Credential rejected mid-screen: the navigator is already on login.
        _ => {
            eprintln!("Please log in");
            Ok(ExitCode::from(EXIT_LOGIN_REQUIRED))
        }
    }
}

async fn run(ctx: &AppContext, command: Command) -> Result<(), ScreenError> {
    match command {
        Command::Login { email, password } => screens::auth::login(ctx, &email, &password).await,
        Command::Logout => screens::auth::logout(ctx).await,
        Command::Whoami => screens::auth::whoami(ctx),
        Command::ForgotPassword(step) => screens::password_reset::run(ctx, step).await,
        Command::Subscriptions(command) => screens::subscriptions::run(ctx, command).await,
        Command::Notifications(command) => screens::notifications::run(ctx, command).await,
        Command::Users(command) => screens::users::run(ctx, command).await,
        Command::Admin => screens::users::overview(ctx).await,
    }
}
