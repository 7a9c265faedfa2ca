//! Domain core shared by the marketplace front-ends and API.
//!
//! * [`status`] turns lifecycle tags of orders, bookings, payments and payouts into badge
//!   labels and severity variants.
//! * [`access`] decides whether a principal may enter a route and where to send them otherwise.
//! * [`boundary`] translates domain failures into the categories exposed over the wire.
//!
//! [`orders`] holds the order use-cases that raise those domain failures.

pub mod access;
pub mod boundary;
pub mod config;
pub mod display;
pub mod error;
pub mod orders;
pub mod status;
pub mod telemetry;
