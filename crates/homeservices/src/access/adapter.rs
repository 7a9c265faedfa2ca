use tracing::{debug, warn};

use super::guard::{
    AccessDecisionEngine, GuardOutcome, GuardState, RouteGuardDecision, RouteGuardRequest,
};
use super::role::Role;

/// Navigation collaborator performing the actual redirect.
pub trait Navigator {
    fn redirect(&mut self, destination: &str);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn redirect(&mut self, destination: &str) {
        (**self).redirect(destination);
    }
}

/// What the auth collaborator knows about the current principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSnapshot {
    Loading,
    Anonymous,
    Authenticated(Role),
    /// Resolution itself failed; distinct from "nobody is signed in".
    Failed(String),
}

impl AuthSnapshot {
    pub fn from_session(is_loading: bool, role: Option<Role>) -> Self {
        match (is_loading, role) {
            (true, _) => Self::Loading,
            (false, Some(role)) => Self::Authenticated(role),
            (false, None) => Self::Anonymous,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("unable to resolve the current principal: {0}")]
    RoleResolution(String),
}

/// Drives one navigation attempt and fires at most one redirect for it.
///
/// Re-evaluating (a re-render, a late auth update) after the redirect fired returns the
/// recorded decision without touching the navigator again.
pub struct RouteGuard<N> {
    engine: AccessDecisionEngine,
    navigator: N,
    required_role: Option<Role>,
    requested_path: Option<String>,
    redirected_to: Option<String>,
}

impl<N: Navigator> RouteGuard<N> {
    pub fn new(
        engine: AccessDecisionEngine,
        navigator: N,
        required_role: Option<Role>,
        requested_path: Option<String>,
    ) -> Self {
        Self {
            engine,
            navigator,
            required_role,
            requested_path,
            redirected_to: None,
        }
    }

    pub fn evaluate(&mut self, auth: &AuthSnapshot) -> Result<GuardState, GuardError> {
        if let Some(destination) = &self.redirected_to {
            return Ok(GuardState::Decided(RouteGuardDecision::redirect(
                destination.clone(),
            )));
        }

        let (is_auth_loading, current_role) = match auth {
            AuthSnapshot::Loading => (true, None),
            AuthSnapshot::Anonymous => (false, None),
            AuthSnapshot::Authenticated(role) => (false, Some(*role)),
            // Public routes do not depend on who is signed in.
            AuthSnapshot::Failed(_) if self.required_role.is_none() => {
                return Ok(GuardState::Decided(RouteGuardDecision::allow()));
            }
            AuthSnapshot::Failed(reason) => {
                warn!(
                    required_role = ?self.required_role,
                    %reason,
                    "auth resolution failed; blocking navigation"
                );
                return Err(GuardError::RoleResolution(reason.clone()));
            }
        };

        let request = RouteGuardRequest {
            current_role,
            required_role: self.required_role,
            is_auth_loading,
            requested_path: self.requested_path.clone(),
        };
        let state = self.engine.decide(&request);

        if let GuardState::Decided(RouteGuardDecision {
            outcome: GuardOutcome::Redirect,
            destination: Some(destination),
        }) = &state
        {
            debug!(
                required_role = ?self.required_role,
                current_role = ?current_role,
                %destination,
                "redirecting guarded navigation"
            );
            self.navigator.redirect(destination);
            self.redirected_to = Some(destination.clone());
        }

        Ok(state)
    }

    pub fn has_redirected(&self) -> bool {
        self.redirected_to.is_some()
    }

    pub fn into_navigator(self) -> N {
        self.navigator
    }
}
