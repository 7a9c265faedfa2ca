use serde::{Deserialize, Serialize};

use super::{LifecycleStatus, Locale, StatusVariant};

/// Scheduled visit of a professional. Uses the `CANCELLED` spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Rejected,
    Cancelled,
}

impl LifecycleStatus for BookingStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Confirmed,
        Self::InProgress,
        Self::Completed,
        Self::Rejected,
        Self::Cancelled,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Pending => "Pending",
                Self::Confirmed => "Confirmed",
                Self::InProgress => "In progress",
                Self::Completed => "Completed",
                Self::Rejected => "Rejected",
                Self::Cancelled => "Cancelled",
            },
            Locale::PtBr => match self {
                Self::Pending => "Pendente",
                Self::Confirmed => "Confirmado",
                Self::InProgress => "Em andamento",
                Self::Completed => "Concluído",
                Self::Rejected => "Recusado",
                Self::Cancelled => "Cancelado",
            },
        }
    }

    fn variant(self) -> StatusVariant {
        match self {
            Self::Pending => StatusVariant::Warning,
            Self::Confirmed | Self::InProgress => StatusVariant::Info,
            Self::Completed => StatusVariant::Success,
            Self::Rejected | Self::Cancelled => StatusVariant::Danger,
        }
    }
}
