//! Lifecycle status catalog for orders, bookings, payments and payouts.
//!
//! Every entity owns an independent table: names that coincide across entities
//! (`PENDING`, `CONFIRMED`, ...) are never shared, and the Booking/Payment spelling
//! `CANCELLED` stays distinct from the Order spelling `CANCELED`. Lookups are total:
//! values the tables do not know degrade to the raw code with an [`StatusVariant::Info`]
//! variant so a newer backend can never break a badge.

mod booking;
mod order;
mod payment;
mod payout;

pub use booking::BookingStatus;
pub use order::OrderStatus;
pub use payment::PaymentStatus;
pub use payout::PayoutStatus;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language the labels are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl Locale {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Some(Self::En),
            "pt" | "pt-br" => Some(Self::PtBr),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::PtBr => "pt-BR",
        }
    }
}

/// Domain entities that carry their own status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Order,
    Booking,
    Payment,
    Payout,
}

impl EntityType {
    pub const fn ordered() -> [Self; 4] {
        [Self::Order, Self::Booking, Self::Payment, Self::Payout]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Booking => "booking",
            Self::Payment => "payment",
            Self::Payout => "payout",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|entity| entity.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity classification driving badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusVariant {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl StatusVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for StatusVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavior shared by every per-entity status table.
pub trait LifecycleStatus: Copy + Sized + 'static {
    /// Known values in lifecycle order.
    const ALL: &'static [Self];

    fn code(self) -> &'static str;
    fn label(self, locale: Locale) -> &'static str;
    fn variant(self) -> StatusVariant;

    /// Exact, case-sensitive match against the wire code.
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.code() == raw)
    }
}

/// Rendered view of a single status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub status: String,
    pub label: String,
    pub variant: StatusVariant,
}

#[derive(Debug, Clone, Copy)]
struct KnownStatus {
    code: &'static str,
    label: &'static str,
    variant: StatusVariant,
}

fn known<S: LifecycleStatus>(status: S, locale: Locale) -> KnownStatus {
    KnownStatus {
        code: status.code(),
        label: status.label(locale),
        variant: status.variant(),
    }
}

fn resolve<S: LifecycleStatus>(raw: &str, locale: Locale) -> Option<KnownStatus> {
    S::parse(raw).map(|status| known(status, locale))
}

fn table<S: LifecycleStatus>(locale: Locale) -> Vec<KnownStatus> {
    S::ALL.iter().map(|status| known(*status, locale)).collect()
}

/// Stateless lookup from `(entity, status)` to label and variant for one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusRegistry {
    locale: Locale,
}

impl StatusRegistry {
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Canonical label, or `status` itself when the entity does not know it.
    pub fn label_for<'a>(&self, entity: EntityType, status: &'a str) -> &'a str {
        match self.lookup(entity, status) {
            Some(found) => found.label,
            None => status,
        }
    }

    /// Severity variant, [`StatusVariant::Info`] when the entity does not know `status`.
    pub fn variant_for(&self, entity: EntityType, status: &str) -> StatusVariant {
        self.lookup(entity, status)
            .map(|found| found.variant)
            .unwrap_or_default()
    }

    pub fn is_known(&self, entity: EntityType, status: &str) -> bool {
        self.lookup(entity, status).is_some()
    }

    pub fn badge(&self, entity: EntityType, status: &str) -> StatusBadge {
        StatusBadge {
            status: status.to_string(),
            label: self.label_for(entity, status).to_string(),
            variant: self.variant_for(entity, status),
        }
    }

    /// Every known status of `entity` in lifecycle order.
    pub fn catalog(&self, entity: EntityType) -> Vec<StatusBadge> {
        let rows = match entity {
            EntityType::Order => table::<OrderStatus>(self.locale),
            EntityType::Booking => table::<BookingStatus>(self.locale),
            EntityType::Payment => table::<PaymentStatus>(self.locale),
            EntityType::Payout => table::<PayoutStatus>(self.locale),
        };

        rows.into_iter()
            .map(|row| StatusBadge {
                status: row.code.to_string(),
                label: row.label.to_string(),
                variant: row.variant,
            })
            .collect()
    }

    fn lookup(&self, entity: EntityType, status: &str) -> Option<KnownStatus> {
        match entity {
            EntityType::Order => resolve::<OrderStatus>(status, self.locale),
            EntityType::Booking => resolve::<BookingStatus>(status, self.locale),
            EntityType::Payment => resolve::<PaymentStatus>(status, self.locale),
            EntityType::Payout => resolve::<PayoutStatus>(status, self.locale),
        }
    }
}
