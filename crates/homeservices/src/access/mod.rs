//! Route guard: whether a principal may enter a protected view, and where to go instead.
//!
//! [`AccessDecisionEngine::decide`] is pure; [`RouteGuard`] wraps it for callers that own a
//! [`Navigator`] and need the redirect fired exactly once per navigation attempt.

mod adapter;
mod guard;
mod role;

pub use adapter::{AuthSnapshot, GuardError, Navigator, RouteGuard};
pub use guard::{
    AccessDecisionEngine, GuardOutcome, GuardState, RedirectTargets, RouteGuardDecision,
    RouteGuardRequest,
};
pub use role::{Role, UnknownRole};
