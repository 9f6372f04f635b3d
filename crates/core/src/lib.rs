//! Domain logic for the academy service.
//!
//! This crate has zero internal dependencies so it can be shared by the
//! repository layer, the HTTP API and any future tooling.

pub mod attendance;
pub mod billing;
pub mod error;
pub mod lesson_status;
pub mod pagination;
pub mod schedule;
pub mod types;
pub mod validation;
