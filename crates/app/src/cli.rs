//! Command-line surface.
//!
//! Every command opens one screen, and every screen sits behind a route.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use submanager_domain::{BillingCycle, Route, Visibility};

#[derive(Debug, Parser)]
#[command(name = "submanager", author, version, about = "Track and share subscriptions", long_about = None)]
pub struct Cli {
    /// Config file (default: <config_dir>/submanager/config.toml)
    #[arg(long, global = true, env = "SUBMANAGER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SUBMANAGER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Reset a forgotten password
    #[command(subcommand)]
    ForgotPassword(ResetCommand),
    /// Dashboard: list and manage subscriptions
    #[command(subcommand, alias = "subs")]
    Subscriptions(SubscriptionCommand),
    /// Renewal notifications
    #[command(subcommand)]
    Notifications(NotificationCommand),
    /// Manage accounts (administrators)
    #[command(subcommand)]
    Users(UserCommand),
    /// Spending and account overview (administrators)
    Admin,
}

impl Command {
    /// Screen the command opens.
    pub const fn route(&self) -> Route {
        match self {
            Self::Login { .. } | Self::Logout => Route::Login,
            Self::ForgotPassword(_) => Route::ForgotPassword,
            Self::Whoami | Self::Subscriptions(_) | Self::Notifications(_) => Route::Dashboard,
            Self::Users(_) => Route::Users,
            Self::Admin => Route::Admin,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ResetCommand {
    /// Step 1: email a one-time code
    Send {
        #[arg(long)]
        email: String,
    },
    /// Step 2: check the code
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
    },
    /// Step 3: choose a new password
    Reset {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
        #[arg(long, env = "SUBMANAGER_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SubscriptionCommand {
    /// Dashboard summary with every subscription
    List,
    /// Renewals coming up
    Upcoming {
        /// Window in days (default from config)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Add a subscription
    Add(SubscriptionFields),
    /// Replace a subscription's fields
    Edit {
        id: String,
        #[command(flatten)]
        fields: SubscriptionFields,
    },
    /// Delete a subscription
    Delete { id: String },
    /// AI insights for one subscription
    Insights { id: String },
}

#[derive(Debug, Args)]
pub struct SubscriptionFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub cost: f64,
    /// monthly, yearly, quarterly or weekly
    #[arg(long, default_value = "monthly", value_parser = parse_cycle)]
    pub cycle: BillingCycle,
    /// Next renewal, YYYY-MM-DD
    #[arg(long)]
    pub renewal: String,
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Share with other users
    #[arg(long)]
    pub shared: bool,
}

impl SubscriptionFields {
    pub const fn visibility(&self) -> Visibility {
        if self.shared {
            Visibility::Shared
        } else {
            Visibility::Private
        }
    }
}

fn parse_cycle(raw: &str) -> Result<BillingCycle, String> {
    BillingCycle::parse(raw).map_err(|e| e.to_string())
}

#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// Recent notifications
    List,
    /// Unread count
    Unread,
    /// Mark one notification as read
    Read { id: String },
    /// Create reminders for upcoming renewals now
    CheckRenewals,
    /// Reminder settings
    Preferences {
        /// Disable reminder emails
        #[arg(long)]
        no_email: bool,
        #[arg(long, default_value_t = 7)]
        days_before: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Every account
    List,
    /// Create an account
    Add {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SUBMANAGER_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        admin: bool,
    },
    /// Delete an account
    Delete { id: String },
}
