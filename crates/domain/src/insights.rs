//! AI-generated cost insights.
//!
//! The backend produces these documents; the client only reads them. Every
//! field is optional and unknown fields are ignored, so a partially filled
//! document still deserializes.

use serde::{Deserialize, Serialize};

/// Wire envelope: `{"insights": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsEnvelope {
    /// The insight document.
    pub insights: SubscriptionInsights,
}

/// Insight document for a single subscription.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionInsights {
    /// What kind of expense this is.
    pub classification: Option<Classification>,
    /// Cost breakdown.
    pub cost_analysis: Option<CostAnalysis>,
    /// Suggested action.
    pub recommendations: Option<Recommendation>,
    /// Cheaper or better services.
    pub alternatives: Vec<Alternative>,
    /// How to get more value.
    pub usage_tips: Vec<String>,
    /// What could go wrong when changing the subscription.
    pub risk_assessment: Option<RiskAssessment>,
}

/// Expense classification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    /// Category, e.g. "entertainment".
    pub category: Option<String>,
    /// Necessity level: necessary, optional or luxury.
    pub necessity_level: Option<String>,
    /// Model reasoning.
    pub reasoning: Option<String>,
}

impl Classification {
    /// Parsed necessity level.
    #[must_use]
    pub fn necessity(&self) -> Necessity {
        self.necessity_level
            .as_deref()
            .map_or(Necessity::Unknown, Necessity::parse)
    }
}

/// How necessary an expense is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Necessity {
    /// Essential.
    Necessary,
    /// Nice to have.
    Optional,
    /// Discretionary.
    Luxury,
    /// Not reported or not recognized.
    Unknown,
}

impl Necessity {
    /// Case-insensitive parse; anything unrecognized is `Unknown`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "necessary" => Self::Necessary,
            "optional" => Self::Optional,
            "luxury" => Self::Luxury,
            _ => Self::Unknown,
        }
    }
}

/// Cost breakdown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAnalysis {
    /// Monthly cost.
    pub monthly_equivalent: Option<f64>,
    /// Yearly cost.
    pub annual_total: Option<f64>,
    /// Daily cost.
    pub cost_per_day: Option<f64>,
    /// Value for money, in words.
    pub value_assessment: Option<String>,
    /// Why the cost is or is not justified.
    pub cost_justification: Option<String>,
}

/// Suggested action for a subscription.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    /// keep, downgrade, cancel, switch or optimize.
    pub action: Option<String>,
    /// Monthly savings if the action is taken.
    pub estimated_savings: Option<f64>,
    /// Ordered steps.
    pub implementation_steps: Vec<String>,
}

impl Recommendation {
    /// Parsed action.
    #[must_use]
    pub fn action_kind(&self) -> RecommendedAction {
        self.action
            .as_deref()
            .map_or(RecommendedAction::Other(String::new()), RecommendedAction::parse)
    }

    /// Savings, only when positive.
    #[must_use]
    pub fn positive_savings(&self) -> Option<f64> {
        self.estimated_savings.filter(|s| *s > 0.0)
    }
}

/// Recommended action kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecommendedAction {
    /// Keep as is.
    Keep,
    /// Move to a cheaper tier.
    Downgrade,
    /// Cancel.
    Cancel,
    /// Move to an alternative.
    Switch,
    /// Change how it is used.
    Optimize,
    /// Anything else, verbatim.
    Other(String),
}

impl RecommendedAction {
    /// Case-insensitive parse.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "keep" => Self::Keep,
            "downgrade" => Self::Downgrade,
            "cancel" => Self::Cancel,
            "switch" => Self::Switch,
            "optimize" => Self::Optimize,
            _ => Self::Other(value.to_string()),
        }
    }
}

/// An alternative service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Alternative {
    /// Service name.
    pub name: String,
    /// Monthly cost.
    pub cost: Option<f64>,
    /// Advantages.
    pub pros: Vec<String>,
    /// Drawbacks.
    pub cons: Vec<String>,
    /// Monthly savings compared to the current service.
    pub savings_potential: Option<f64>,
}

/// Risks of changing a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssessment {
    /// Impact of cancelling.
    pub cancellation_impact: Option<String>,
    /// Impact of downgrading.
    pub downgrade_impact: Option<String>,
    /// Risks of switching.
    pub switching_risks: Option<String>,
}
