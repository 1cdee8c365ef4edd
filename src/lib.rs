//! Registration service for agencies requesting authorization to read card
//! data or mobile ID data.
//!
//! The crate validates registration submissions against a fixed form schema,
//! derives the combined subscription plan and surcharge-inclusive total from
//! the selected offerings, and persists accepted registrations behind a
//! repository trait. The [`registration`] module holds the domain; [`config`],
//! [`telemetry`], and [`error`] carry the service plumbing shared by the
//! binary.

pub mod config;
pub mod error;
pub mod registration;
pub mod telemetry;
