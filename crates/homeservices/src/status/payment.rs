use serde::{Deserialize, Serialize};

use super::{LifecycleStatus, Locale, StatusVariant};

/// Client-side charge for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Authorized,
    Captured,
    Refunded,
    Failed,
    Cancelled,
}

impl LifecycleStatus for PaymentStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Authorized,
        Self::Captured,
        Self::Refunded,
        Self::Failed,
        Self::Cancelled,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Authorized => "AUTHORIZED",
            Self::Captured => "CAPTURED",
            Self::Refunded => "REFUNDED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Pending => "Pending",
                Self::Authorized => "Authorized",
                Self::Captured => "Captured",
                Self::Refunded => "Refunded",
                Self::Failed => "Failed",
                Self::Cancelled => "Cancelled",
            },
            Locale::PtBr => match self {
                Self::Pending => "Pendente",
                Self::Authorized => "Autorizado",
                Self::Captured => "Capturado",
                Self::Refunded => "Reembolsado",
                Self::Failed => "Falhou",
                Self::Cancelled => "Cancelado",
            },
        }
    }

    fn variant(self) -> StatusVariant {
        match self {
            Self::Pending => StatusVariant::Warning,
            Self::Authorized | Self::Refunded => StatusVariant::Info,
            Self::Captured => StatusVariant::Success,
            Self::Failed | Self::Cancelled => StatusVariant::Danger,
        }
    }
}
