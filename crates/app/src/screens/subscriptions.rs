//! Dashboard screen: subscriptions, renewals and insights.

use submanager_application::{InsightsCache, LoadDashboard, ManageSubscriptions};
use submanager_domain::{
    Necessity, RecommendedAction, Subscription, SubscriptionDraft, SubscriptionInsights,
    parse_date,
};
use submanager_infrastructure::SystemClock;

use super::{ScreenResult, money};
use crate::cli::{SubscriptionCommand, SubscriptionFields};
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, command: SubscriptionCommand) -> ScreenResult {
    match command {
        SubscriptionCommand::List => dashboard(ctx).await,
        SubscriptionCommand::Upcoming { days } => upcoming(ctx, days).await,
        SubscriptionCommand::Add(fields) => {
            let created = ManageSubscriptions::new(ctx.backend.clone())
                .create(&draft(&fields)?)
                .await?;
            println!("Added {} ({})", created.service_name, created.id);
            Ok(())
        }
        SubscriptionCommand::Edit { id, fields } => {
            let updated = ManageSubscriptions::new(ctx.backend.clone())
                .update(&id, &draft(&fields)?)
                .await?;
            println!("Updated {}", updated.service_name);
            Ok(())
        }
        SubscriptionCommand::Delete { id } => {
            ManageSubscriptions::new(ctx.backend.clone())
                .delete(&id)
                .await?;
            println!("Deleted {id}");
            Ok(())
        }
        SubscriptionCommand::Insights { id } => insights(ctx, &id).await,
    }
}

fn draft(fields: &SubscriptionFields) -> Result<SubscriptionDraft, submanager_domain::DomainError> {
    let renewal = parse_date(&fields.renewal)?;
    Ok(
        SubscriptionDraft::new(fields.name.trim(), fields.cost, fields.cycle, renewal)
            .with_visibility(fields.visibility())
            .with_notes(fields.notes.clone()),
    )
}

async fn dashboard(ctx: &AppContext) -> ScreenResult {
    let ticket = ctx.ticket().await;
    let view = LoadDashboard::new(ctx.backend.clone(), SystemClock::new())
        .with_window(ctx.config.upcoming_window_days)
        .execute()
        .await?;
    let Some(view) = ticket.accept(view) else {
        return Ok(());
    };

    println!(
        "Monthly spend: {}   Yearly: {}   Subscriptions: {}   Shared: {}",
        money(view.summary.total_monthly),
        money(view.summary.total_yearly()),
        view.summary.count,
        view.summary.shared_count,
    );
    println!();
    if view.subscriptions.is_empty() {
        println!("No subscriptions yet. Add one with `submanager subscriptions add`.");
    }
    for subscription in &view.subscriptions {
        print_row(subscription);
    }

    if !view.upcoming.is_empty() {
        println!();
        println!("Renewing in the next {} days:", view.window_days);
        for (subscription, days) in view.upcoming_with_days() {
            println!("  {:<24} in {days} day(s)", subscription.service_name);
        }
    }
    Ok(())
}

async fn upcoming(ctx: &AppContext, days: Option<u32>) -> ScreenResult {
    let ticket = ctx.ticket().await;
    let view = LoadDashboard::new(ctx.backend.clone(), SystemClock::new())
        .with_window(days.unwrap_or(ctx.config.upcoming_window_days))
        .execute()
        .await?;
    let Some(view) = ticket.accept(view) else {
        return Ok(());
    };

    if view.upcoming.is_empty() {
        println!("No renewals in the next {} days", view.window_days);
    }
    for (subscription, days) in view.upcoming_with_days() {
        println!(
            "{}  {:<24} {:>10}  in {days} day(s)",
            subscription.renewal_date,
            subscription.service_name,
            money(subscription.cost),
        );
    }
    Ok(())
}

async fn insights(ctx: &AppContext, id: &str) -> ScreenResult {
    let ticket = ctx.ticket().await;
    let cache = InsightsCache::new(ctx.backend.clone());
    let insights = cache.get_or_fetch(id).await?;
    if let Some(insights) = ticket.accept(insights) {
        print_insights(&insights);
    }
    Ok(())
}

fn print_row(subscription: &Subscription) {
    let shared = if subscription.is_shared() { "shared" } else { "" };
    println!(
        "{:<26} {:<24} {:>10} {:<10} renews {}  {shared}",
        subscription.id,
        subscription.service_name,
        money(subscription.cost),
        subscription.billing_cycle.as_str(),
        subscription.renewal_date,
    );
}

fn print_insights(insights: &SubscriptionInsights) {
    if let Some(classification) = &insights.classification {
        let necessity = match classification.necessity() {
            Necessity::Necessary => "necessary",
            Necessity::Optional => "optional",
            Necessity::Luxury => "luxury",
            Necessity::Unknown => "unknown",
        };
        println!(
            "Category: {}  ({necessity})",
            classification.category.as_deref().unwrap_or("uncategorized")
        );
        if let Some(reasoning) = &classification.reasoning {
            println!("  {reasoning}");
        }
    }

    if let Some(cost) = &insights.cost_analysis {
        if let Some(monthly) = cost.monthly_equivalent {
            println!("Monthly equivalent: {}", money(monthly));
        }
        if let Some(annual) = cost.annual_total {
            println!("Annual total: {}", money(annual));
        }
        if let Some(assessment) = &cost.value_assessment {
            println!("Value: {assessment}");
        }
    }

    if let Some(recommendation) = &insights.recommendations {
        let action = match recommendation.action_kind() {
            RecommendedAction::Keep => "keep".to_string(),
            RecommendedAction::Downgrade => "downgrade".to_string(),
            RecommendedAction::Cancel => "cancel".to_string(),
            RecommendedAction::Switch => "switch".to_string(),
            RecommendedAction::Optimize => "optimize".to_string(),
            RecommendedAction::Other(other) => other,
        };
        match recommendation.positive_savings() {
            Some(savings) => println!("Recommendation: {action} (save {})", money(savings)),
            None => println!("Recommendation: {action}"),
        }
        for step in &recommendation.implementation_steps {
            println!("  - {step}");
        }
    }

    if !insights.alternatives.is_empty() {
        println!("Alternatives:");
        for alternative in &insights.alternatives {
            let cost = alternative.cost.map(money).unwrap_or_default();
            println!("  {} {cost}", alternative.name);
        }
    }

    if !insights.usage_tips.is_empty() {
        println!("Tips:");
        for tip in &insights.usage_tips {
            println!("  - {tip}");
        }
    }

    if let Some(risk) = &insights.risk_assessment
        && let Some(impact) = &risk.cancellation_impact
    {
        println!("If cancelled: {impact}");
    }
}
