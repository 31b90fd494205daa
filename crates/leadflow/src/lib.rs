//! Lead intake, segmentation, and campaign targeting for a real-estate
//! sales pipeline.
//!
//! The library is transport-agnostic: persistence and email delivery are
//! collaborator traits (`LeadStore`, `EmailGateway`) so the HTTP service and
//! the test suites can wire in their own implementations.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
