use serde::{Deserialize, Serialize};

use super::{LifecycleStatus, Locale, StatusVariant};

/// Transfer of earnings to a professional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutStatus {
    Pending,
    Processing,
    Paid,
    Failed,
}

impl LifecycleStatus for PayoutStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Processing, Self::Paid, Self::Failed];

    fn code(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
        }
    }

    fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::Pending) => "Pending",
            (Locale::En, Self::Processing) => "Processing",
            (Locale::En, Self::Paid) => "Paid",
            (Locale::En, Self::Failed) => "Failed",
            (Locale::PtBr, Self::Pending) => "Pendente",
            (Locale::PtBr, Self::Processing) => "Em processamento",
            (Locale::PtBr, Self::Paid) => "Pago",
            (Locale::PtBr, Self::Failed) => "Falhou",
        }
    }

    fn variant(self) -> StatusVariant {
        match self {
            Self::Pending => StatusVariant::Warning,
            Self::Processing => StatusVariant::Info,
            Self::Paid => StatusVariant::Success,
            Self::Failed => StatusVariant::Danger,
        }
    }
}
