use serde::{Deserialize, Serialize};

use super::role::Role;

/// Destinations the guard may send a principal to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTargets {
    pub login_path: String,
    /// Query parameter carrying the originally requested path to the login page.
    pub return_param: String,
    /// Page inviting professionals to install the dedicated professional app.
    pub pro_app_path: String,
    /// The client's job list.
    pub client_home_path: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            return_param: "returnUrl".to_string(),
            pro_app_path: "/pro/download-app".to_string(),
            client_home_path: "/client/jobs".to_string(),
        }
    }
}

impl RedirectTargets {
    /// Login destination, annotated with the requested path when there is one worth returning to.
    pub fn login_returning_to(&self, requested_path: Option<&str>) -> String {
        let path = match requested_path.map(str::trim) {
            Some(path) if !path.is_empty() && path != self.login_path => path,
            _ => return self.login_path.clone(),
        };

        let separator = if self.login_path.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            self.login_path,
            separator,
            urlencoding::encode(&self.return_param),
            urlencoding::encode(path)
        )
    }
}

/// One navigation attempt as seen by the guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGuardRequest {
    #[serde(default)]
    pub current_role: Option<Role>,
    #[serde(default)]
    pub required_role: Option<Role>,
    #[serde(default)]
    pub is_auth_loading: bool,
    #[serde(default)]
    pub requested_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardOutcome {
    Allow,
    Redirect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGuardDecision {
    pub outcome: GuardOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl RouteGuardDecision {
    pub const fn allow() -> Self {
        Self {
            outcome: GuardOutcome::Allow,
            destination: None,
        }
    }

    pub fn redirect(destination: impl Into<String>) -> Self {
        Self {
            outcome: GuardOutcome::Redirect,
            destination: Some(destination.into()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.outcome == GuardOutcome::Allow
    }
}

/// Where a navigation attempt stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GuardState {
    /// The auth collaborator has not resolved the principal yet.
    Loading,
    Decided(RouteGuardDecision),
}

impl GuardState {
    pub fn decision(&self) -> Option<&RouteGuardDecision> {
        match self {
            Self::Loading => None,
            Self::Decided(decision) => Some(decision),
        }
    }
}

/// Pure allow/redirect rules for protected routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessDecisionEngine {
    targets: RedirectTargets,
}

impl AccessDecisionEngine {
    pub fn new(targets: RedirectTargets) -> Self {
        Self { targets }
    }

    /// Same input, same state. Holds no memory of earlier calls.
    pub fn decide(&self, request: &RouteGuardRequest) -> GuardState {
        let Some(required) = request.required_role else {
            return GuardState::Decided(RouteGuardDecision::allow());
        };

        if request.is_auth_loading {
            return GuardState::Loading;
        }

        if request.current_role == Some(required) {
            return GuardState::Decided(RouteGuardDecision::allow());
        }

        let destination = match (required, request.current_role) {
            (Role::Client, Some(Role::Pro)) => self.targets.pro_app_path.clone(),
            (Role::Pro, Some(Role::Client)) => self.targets.client_home_path.clone(),
            (_, None) => self
                .targets
                .login_returning_to(request.requested_path.as_deref()),
            // A principal with the wrong role is never bounced back to the route it failed.
            (_, Some(_)) => self.targets.login_path.clone(),
        };

        GuardState::Decided(RouteGuardDecision::redirect(destination))
    }
}
