//! Test doubles shared by the use-case tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use submanager_domain::{
    BillingCycle, ForgotPasswordRequest, NewUser, Notification, NotificationPreferences,
    RenewalCheck, ResetPasswordRequest, Subscription, SubscriptionDraft, SubscriptionInsights,
    UserAccount, VerifyOtpRequest, Visibility, parse_date,
};

use tokio::sync::Notify;

use crate::gateway::ApiError;
use crate::ports::{Clock, NotificationApi, PasswordResetApi, SubscriptionApi, UserApi};

pub fn subscription(id: &str, cost: f64, renewal: &str) -> Subscription {
    Subscription {
        id: id.to_string(),
        service_name: format!("service-{id}"),
        cost,
        billing_cycle: BillingCycle::Monthly,
        renewal_date: parse_date(renewal).unwrap(),
        notes: None,
        is_shared: false,
        visibility: Visibility::Private,
        user_id: None,
    }
}

pub fn user(id: &str, is_admin: bool) -> UserAccount {
    UserAccount {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        is_admin,
        created_at: None,
    }
}

pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn on(date: &str) -> Self {
        Self(parse_date(date).unwrap())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Default)]
struct State {
    subscriptions: Vec<Subscription>,
    users: Vec<UserAccount>,
    failure: Option<ApiError>,
    insight_calls: usize,
    last_upcoming_window: Option<u32>,
    reset_calls: Vec<&'static str>,
    valid_otp: Option<String>,
    held_insights: HashMap<String, Arc<Notify>>,
    waiting_insights: Vec<String>,
}

/// In-memory backend implementing every data port.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    /// Base date for the upcoming-renewal window.
    const TODAY: &'static str = "2025-03-01";

    pub fn put_subscriptions(&self, subscriptions: Vec<Subscription>) {
        self.state.lock().unwrap().subscriptions = subscriptions;
    }

    pub fn put_users(&self, users: Vec<UserAccount>) {
        self.state.lock().unwrap().users = users;
    }

    pub fn fail_with(&self, error: ApiError) {
        self.state.lock().unwrap().failure = Some(error);
    }

    pub fn recover(&self) {
        self.state.lock().unwrap().failure = None;
    }

    pub fn accept_otp(&self, otp: &str) {
        self.state.lock().unwrap().valid_otp = Some(otp.to_string());
    }

    /// Parks insight fetches for `id` until the returned gate is notified.
    pub fn hold_insights(&self, id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state
            .lock()
            .unwrap()
            .held_insights
            .insert(id.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn is_waiting_for_insights(&self, id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .waiting_insights
            .iter()
            .any(|waiting| waiting == id)
    }

    pub fn insight_calls(&self) -> usize {
        self.state.lock().unwrap().insight_calls
    }

    pub fn last_upcoming_window(&self) -> Option<u32> {
        self.state.lock().unwrap().last_upcoming_window
    }

    pub fn reset_calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().reset_calls.clone()
    }

    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.state.lock().unwrap().subscriptions.clone()
    }

    pub fn users(&self) -> Vec<UserAccount> {
        self.state.lock().unwrap().users.clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        self.state
            .lock()
            .unwrap()
            .failure
            .clone()
            .map_or(Ok(()), Err)
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            detail: format!("{id} not found"),
        }
    }
}

#[async_trait]
impl SubscriptionApi for FakeBackend {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        self.check()?;
        Ok(self.subscriptions())
    }

    async fn upcoming_renewals(&self, within_days: u32) -> Result<Vec<Subscription>, ApiError> {
        self.check()?;
        let today = parse_date(Self::TODAY).unwrap();
        let mut state = self.state.lock().unwrap();
        state.last_upcoming_window = Some(within_days);
        Ok(state
            .subscriptions
            .iter()
            .filter(|s| (0..=i64::from(within_days)).contains(&s.days_until_renewal(today)))
            .cloned()
            .collect())
    }

    async fn create_subscription(
        &self,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, ApiError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let created = Subscription {
            id: format!("new-{}", state.subscriptions.len() + 1),
            service_name: draft.service_name.clone(),
            cost: draft.cost,
            billing_cycle: draft.billing_cycle,
            renewal_date: draft.renewal_date,
            notes: Some(draft.notes.clone()),
            is_shared: draft.is_shared,
            visibility: draft.visibility,
            user_id: None,
        };
        state.subscriptions.push(created.clone());
        Ok(created)
    }

    async fn update_subscription(
        &self,
        id: &str,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, ApiError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let existing = state
            .subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        existing.service_name.clone_from(&draft.service_name);
        existing.cost = draft.cost;
        existing.billing_cycle = draft.billing_cycle;
        existing.renewal_date = draft.renewal_date;
        existing.visibility = draft.visibility;
        Ok(existing.clone())
    }

    async fn delete_subscription(&self, id: &str) -> Result<(), ApiError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let before = state.subscriptions.len();
        state.subscriptions.retain(|s| s.id != id);
        if state.subscriptions.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn subscription_insights(&self, id: &str) -> Result<SubscriptionInsights, ApiError> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            let gate = state.held_insights.get(id).cloned();
            if gate.is_some() {
                state.waiting_insights.push(id.to_string());
            }
            gate
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.insight_calls += 1;
        if !state.subscriptions.iter().any(|s| s.id == id) {
            return Err(Self::not_found(id));
        }
        Ok(SubscriptionInsights {
            usage_tips: vec![format!("tip for {id}")],
            ..SubscriptionInsights::default()
        })
    }
}

#[async_trait]
impl UserApi for FakeBackend {
    async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.check()?;
        Ok(self.users())
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<UserAccount, ApiError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let created = UserAccount {
            id: format!("u{}", state.users.len() + 1),
            email: new_user.email.clone(),
            is_admin: new_user.is_admin,
            created_at: None,
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.check()?;
        self.state.lock().unwrap().users.retain(|u| u.id != id);
        Ok(())
    }

    async fn update_notification_preferences(
        &self,
        _preferences: &NotificationPreferences,
    ) -> Result<(), ApiError> {
        self.check()
    }
}

#[async_trait]
impl NotificationApi for FakeBackend {
    async fn list_notifications(&self, _limit: u32) -> Result<Vec<Notification>, ApiError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn unread_count(&self) -> Result<u64, ApiError> {
        self.check()?;
        Ok(0)
    }

    async fn mark_read(&self, _id: &str) -> Result<(), ApiError> {
        self.check()
    }

    async fn check_renewals(&self) -> Result<RenewalCheck, ApiError> {
        self.check()?;
        Ok(RenewalCheck::default())
    }
}

#[async_trait]
impl PasswordResetApi for FakeBackend {
    async fn request_reset_code(&self, _request: &ForgotPasswordRequest) -> Result<(), ApiError> {
        self.state.lock().unwrap().reset_calls.push("send");
        self.check()
    }

    async fn verify_reset_code(&self, request: &VerifyOtpRequest) -> Result<(), ApiError> {
        self.state.lock().unwrap().reset_calls.push("verify");
        self.check()?;
        let state = self.state.lock().unwrap();
        if state.valid_otp.as_deref() == Some(request.otp.as_str()) {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: 400,
                detail: "Invalid or expired OTP".to_string(),
            })
        }
    }

    async fn reset_password(&self, _request: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.state.lock().unwrap().reset_calls.push("reset");
        self.check()
    }
}

#[allow(dead_code)]
pub fn date(raw: &str) -> NaiveDate {
    parse_date(raw).unwrap()
}
