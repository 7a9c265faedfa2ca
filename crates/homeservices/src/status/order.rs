use serde::{Deserialize, Serialize};

use super::{LifecycleStatus, Locale, StatusVariant};

/// Lifecycle of a service order, from draft to payout-ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Draft,
    PendingProConfirmation,
    Accepted,
    Confirmed,
    InProgress,
    AwaitingClientApproval,
    Disputed,
    Completed,
    Paid,
    Canceled,
}

impl OrderStatus {
    /// Work is finished and the client signed it off.
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed | Self::Paid)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Canceled)
    }
}

impl LifecycleStatus for OrderStatus {
    const ALL: &'static [Self] = &[
        Self::Draft,
        Self::PendingProConfirmation,
        Self::Accepted,
        Self::Confirmed,
        Self::InProgress,
        Self::AwaitingClientApproval,
        Self::Disputed,
        Self::Completed,
        Self::Paid,
        Self::Canceled,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::PendingProConfirmation => "PENDING_PRO_CONFIRMATION",
            Self::Accepted => "ACCEPTED",
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::AwaitingClientApproval => "AWAITING_CLIENT_APPROVAL",
            Self::Disputed => "DISPUTED",
            Self::Completed => "COMPLETED",
            Self::Paid => "PAID",
            Self::Canceled => "CANCELED",
        }
    }

    fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Draft => "Draft",
                Self::PendingProConfirmation => "Awaiting professional confirmation",
                Self::Accepted => "Accepted",
                Self::Confirmed => "Confirmed",
                Self::InProgress => "In progress",
                Self::AwaitingClientApproval => "Awaiting client approval",
                Self::Disputed => "Disputed",
                Self::Completed => "Completed",
                Self::Paid => "Paid",
                Self::Canceled => "Canceled",
            },
            Locale::PtBr => match self {
                Self::Draft => "Rascunho",
                Self::PendingProConfirmation => "Aguardando confirmação do profissional",
                Self::Accepted => "Aceito",
                Self::Confirmed => "Confirmado",
                Self::InProgress => "Em andamento",
                Self::AwaitingClientApproval => "Aguardando aprovação do cliente",
                Self::Disputed => "Em disputa",
                Self::Completed => "Concluído",
                Self::Paid => "Pago",
                Self::Canceled => "Cancelado",
            },
        }
    }

    fn variant(self) -> StatusVariant {
        match self {
            Self::Draft | Self::Accepted | Self::Confirmed | Self::InProgress => {
                StatusVariant::Info
            }
            Self::PendingProConfirmation | Self::AwaitingClientApproval => StatusVariant::Warning,
            Self::Completed | Self::Paid => StatusVariant::Success,
            Self::Disputed | Self::Canceled => StatusVariant::Danger,
        }
    }
}
