use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::Role;
use crate::status::{OrderStatus, StatusBadge};

/// Identifier wrapper for service orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier issued by the external auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated caller of a use-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: UserId(user_id.into()),
            role,
        }
    }
}

/// Client request for a professional's service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub pro_id: UserId,
    pub client_name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub rating: u8,
    pub comment: Option<String>,
    pub author_id: UserId,
    pub submitted_at: DateTime<Utc>,
}

/// Stored order with its participants and current lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub title: String,
    pub client_id: UserId,
    pub client_name: String,
    pub pro_id: UserId,
    pub status: OrderStatus,
    pub review: Option<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    pub fn is_client(&self, actor: &Principal) -> bool {
        actor.role == Role::Client && actor.user_id == self.client_id
    }

    pub fn is_pro(&self, actor: &Principal) -> bool {
        actor.role == Role::Pro && actor.user_id == self.pro_id
    }

    pub fn is_participant(&self, actor: &Principal) -> bool {
        self.is_client(actor) || self.is_pro(actor)
    }
}

/// Status changes an actor can request on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    Accept,
    Confirm,
    Start,
    RequestApproval,
    ApproveCompletion,
    Dispute,
    MarkPaid,
    Cancel,
}

/// Who, besides an administrator, may perform an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActingParty {
    Client,
    Pro,
    Participant,
    AdminOnly,
}

impl OrderAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Confirm => "confirm",
            Self::Start => "start",
            Self::RequestApproval => "request approval for",
            Self::ApproveCompletion => "approve completion of",
            Self::Dispute => "dispute",
            Self::MarkPaid => "mark as paid",
            Self::Cancel => "cancel",
        }
    }

    pub(crate) const fn party(self) -> ActingParty {
        match self {
            Self::Accept | Self::Start | Self::RequestApproval => ActingParty::Pro,
            Self::Confirm | Self::ApproveCompletion | Self::Dispute => ActingParty::Client,
            Self::Cancel => ActingParty::Participant,
            Self::MarkPaid => ActingParty::AdminOnly,
        }
    }

    /// Statuses the action may start from.
    pub const fn allowed_from(self) -> &'static [OrderStatus] {
        match self {
            Self::Accept => &[OrderStatus::PendingProConfirmation],
            Self::Confirm => &[OrderStatus::Accepted],
            Self::Start => &[OrderStatus::Accepted, OrderStatus::Confirmed],
            Self::RequestApproval => &[OrderStatus::InProgress],
            Self::ApproveCompletion | Self::Dispute => &[OrderStatus::AwaitingClientApproval],
            Self::MarkPaid => &[OrderStatus::Completed],
            Self::Cancel => &[
                OrderStatus::Draft,
                OrderStatus::PendingProConfirmation,
                OrderStatus::Accepted,
                OrderStatus::Confirmed,
            ],
        }
    }

    pub const fn target(self) -> OrderStatus {
        match self {
            Self::Accept => OrderStatus::Accepted,
            Self::Confirm => OrderStatus::Confirmed,
            Self::Start => OrderStatus::InProgress,
            Self::RequestApproval => OrderStatus::AwaitingClientApproval,
            Self::ApproveCompletion => OrderStatus::Completed,
            Self::Dispute => OrderStatus::Disputed,
            Self::MarkPaid => OrderStatus::Paid,
            Self::Cancel => OrderStatus::Canceled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub action: OrderAction,
}

/// Order as rendered to either party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderView {
    pub id: OrderId,
    pub title: String,
    pub status: StatusBadge,
    pub client_name: String,
    pub pro_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewView {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub author_name: String,
    pub submitted_at: DateTime<Utc>,
}

/// Conversation room shared by the two parties of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatChannel {
    pub order_id: OrderId,
    pub channel: String,
    pub participants: Vec<UserId>,
}
