//! Subscription records and spending math.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// How often a subscription bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    /// Once a month.
    #[default]
    Monthly,
    /// Once a year.
    Yearly,
    /// Every three months.
    Quarterly,
    /// Every week. Unknown cycles from the backend land here too.
    #[serde(other)]
    Weekly,
}

impl BillingCycle {
    /// Converts a cost for one billing period into a monthly cost.
    #[must_use]
    pub fn monthly_equivalent(self, cost: f64) -> f64 {
        match self {
            Self::Monthly => cost,
            Self::Yearly => cost / 12.0,
            Self::Quarterly => cost / 4.0,
            Self::Weekly => cost * 4.0,
        }
    }

    /// Parses a user-supplied cycle name.
    ///
    /// # Errors
    /// Returns an error for anything other than the four known cycles.
    pub fn parse(value: &str) -> DomainResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annual" | "annually" => Ok(Self::Yearly),
            "quarterly" => Ok(Self::Quarterly),
            "weekly" => Ok(Self::Weekly),
            other => Err(DomainError::InvalidBillingCycle(other.to_string())),
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Quarterly => "quarterly",
            Self::Weekly => "weekly",
        }
    }
}

/// Who can see a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only the owner.
    #[default]
    Private,
    /// Shared with other users.
    Shared,
}

/// Serde adapter for renewal dates: accepts `YYYY-MM-DD` or an ISO datetime,
/// always writes `YYYY-MM-DD`.
pub mod renewal_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    /// Serializes the date part only.
    ///
    /// # Errors
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    /// Deserializes a date or datetime string.
    ///
    /// # Errors
    /// Fails when the string holds no parseable date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parses the date part of a date or datetime string.
///
/// # Errors
/// Returns [`DomainError::InvalidDate`] when no date can be read.
pub fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(raw.to_string()))
}

/// A subscription record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Backend id.
    #[serde(alias = "_id")]
    pub id: String,
    /// Name of the service, e.g. "Netflix".
    pub service_name: String,
    /// Cost per billing period.
    pub cost: f64,
    /// Billing period.
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    /// Next renewal.
    #[serde(with = "renewal_date")]
    pub renewal_date: NaiveDate,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Legacy sharing flag.
    #[serde(default)]
    pub is_shared: bool,
    /// Visibility setting.
    #[serde(default)]
    pub visibility: Visibility,
    /// Owner id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Subscription {
    /// Cost normalized to one month.
    #[must_use]
    pub fn monthly_cost(&self) -> f64 {
        self.billing_cycle.monthly_equivalent(self.cost)
    }

    /// Whether the subscription is visible to other users.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.is_shared || self.visibility == Visibility::Shared
    }

    /// Days from `today` until renewal; negative if already past.
    #[must_use]
    pub fn days_until_renewal(&self, today: NaiveDate) -> i64 {
        (self.renewal_date - today).num_days()
    }
}

/// Payload for creating or updating a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionDraft {
    /// Name of the service.
    pub service_name: String,
    /// Cost per billing period.
    pub cost: f64,
    /// Billing period.
    pub billing_cycle: BillingCycle,
    /// Next renewal.
    #[serde(with = "renewal_date")]
    pub renewal_date: NaiveDate,
    /// Free-form notes.
    pub notes: String,
    /// Sharing flag, kept in sync with `visibility` on create.
    pub is_shared: bool,
    /// Visibility setting.
    pub visibility: Visibility,
}

impl SubscriptionDraft {
    /// A new private draft.
    #[must_use]
    pub fn new(
        service_name: impl Into<String>,
        cost: f64,
        billing_cycle: BillingCycle,
        renewal_date: NaiveDate,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            cost,
            billing_cycle,
            renewal_date,
            notes: String::new(),
            is_shared: false,
            visibility: Visibility::Private,
        }
    }

    /// Sets visibility and derives the sharing flag from it.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self.is_shared = visibility == Visibility::Shared;
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Checks the fields a form would reject.
    ///
    /// # Errors
    /// Returns an error for an empty service name or a negative/non-finite cost.
    pub fn validate(&self) -> DomainResult<()> {
        if self.service_name.trim().is_empty() {
            return Err(DomainError::MissingField("service_name"));
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(DomainError::InvalidCost(self.cost.to_string()));
        }
        Ok(())
    }
}

impl From<&Subscription> for SubscriptionDraft {
    /// Prefills an edit form from an existing record.
    fn from(subscription: &Subscription) -> Self {
        Self {
            service_name: subscription.service_name.clone(),
            cost: subscription.cost,
            billing_cycle: subscription.billing_cycle,
            renewal_date: subscription.renewal_date,
            notes: subscription.notes.clone().unwrap_or_default(),
            is_shared: subscription.is_shared,
            visibility: subscription.visibility,
        }
    }
}

/// Aggregate spending figures for a list of subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpendingSummary {
    /// Sum of monthly-equivalent costs.
    pub total_monthly: f64,
    /// Number of subscriptions.
    pub count: usize,
    /// Number of shared subscriptions.
    pub shared_count: usize,
}

impl SpendingSummary {
    /// Summarizes `subscriptions`.
    #[must_use]
    pub fn of(subscriptions: &[Subscription]) -> Self {
        subscriptions
            .iter()
            .fold(Self::default(), |mut summary, subscription| {
                summary.total_monthly += subscription.monthly_cost();
                summary.count += 1;
                if subscription.is_shared() {
                    summary.shared_count += 1;
                }
                summary
            })
    }

    /// Yearly projection of the monthly total.
    #[must_use]
    pub fn total_yearly(&self) -> f64 {
        self.total_monthly * 12.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subscription(cost: f64, cycle: BillingCycle, visibility: Visibility) -> Subscription {
        Subscription {
            id: "s1".to_string(),
            service_name: "Netflix".to_string(),
            cost,
            billing_cycle: cycle,
            renewal_date: date(2025, 3, 1),
            notes: None,
            is_shared: false,
            visibility,
            user_id: None,
        }
    }

    #[test]
    fn test_monthly_equivalents() {
        assert_eq!(BillingCycle::Monthly.monthly_equivalent(12.0), 12.0);
        assert_eq!(BillingCycle::Yearly.monthly_equivalent(120.0), 10.0);
        assert_eq!(BillingCycle::Quarterly.monthly_equivalent(30.0), 7.5);
        assert_eq!(BillingCycle::Weekly.monthly_equivalent(5.0), 20.0);
    }

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "_id": "65f0c",
            "service_name": "Spotify",
            "cost": 9.99,
            "billing_cycle": "monthly",
            "renewal_date": "2025-02-14T00:00:00",
            "notes": null,
            "is_shared": false,
            "visibility": "shared"
        }"#;
        let subscription: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(subscription.id, "65f0c");
        assert_eq!(subscription.renewal_date, date(2025, 2, 14));
        assert!(subscription.is_shared());
    }

    #[test]
    fn test_unknown_billing_cycle_falls_back_to_weekly() {
        let cycle: BillingCycle = serde_json::from_str(r#""fortnightly""#).unwrap();
        assert_eq!(cycle, BillingCycle::Weekly);
    }

    #[test]
    fn test_draft_serializes_plain_date() {
        let draft = SubscriptionDraft::new("Hulu", 7.99, BillingCycle::Monthly, date(2025, 1, 5))
            .with_visibility(Visibility::Shared);
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["renewal_date"], "2025-01-05");
        assert_eq!(value["is_shared"], true);
        assert_eq!(value["visibility"], "shared");
    }

    #[test]
    fn test_draft_validation() {
        let ok = SubscriptionDraft::new("Hulu", 0.0, BillingCycle::Monthly, date(2025, 1, 5));
        assert!(ok.validate().is_ok());

        let mut blank = ok.clone();
        blank.service_name = "   ".to_string();
        assert_eq!(
            blank.validate(),
            Err(DomainError::MissingField("service_name"))
        );

        let mut negative = ok;
        negative.cost = -1.0;
        assert!(matches!(
            negative.validate(),
            Err(DomainError::InvalidCost(_))
        ));
    }

    #[test]
    fn test_edit_draft_prefill() {
        let mut existing = subscription(15.0, BillingCycle::Yearly, Visibility::Private);
        existing.notes = Some("family plan".to_string());
        let draft = SubscriptionDraft::from(&existing);
        assert_eq!(draft.notes, "family plan");
        assert_eq!(draft.billing_cycle, BillingCycle::Yearly);
    }

    #[test]
    fn test_spending_summary() {
        let subscriptions = vec![
            subscription(10.0, BillingCycle::Monthly, Visibility::Private),
            subscription(120.0, BillingCycle::Yearly, Visibility::Shared),
            subscription(2.5, BillingCycle::Weekly, Visibility::Private),
        ];
        let summary = SpendingSummary::of(&subscriptions);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.shared_count, 1);
        assert_eq!(summary.total_monthly, 30.0);
        assert_eq!(summary.total_yearly(), 360.0);
    }

    #[test]
    fn test_days_until_renewal() {
        let subscription = subscription(1.0, BillingCycle::Monthly, Visibility::Private);
        assert_eq!(subscription.days_until_renewal(date(2025, 2, 22)), 7);
        assert_eq!(subscription.days_until_renewal(date(2025, 3, 2)), -1);
    }

    #[test]
    fn test_parse_billing_cycle() {
        assert_eq!(BillingCycle::parse("Yearly").unwrap(), BillingCycle::Yearly);
        assert!(BillingCycle::parse("daily").is_err());
    }
}
