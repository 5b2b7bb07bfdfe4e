//! Working-time compliance and hour accounting for staff time tracking.
//!
//! The engine answers two kinds of questions over an employee's recorded
//! shifts, absences and contract history:
//!
//! - accounting: monthly target and actual hours, the cumulative overtime
//!   account, the vacation account, team and absence reports
//!   ([`accounting`])
//! - compliance: whether a shift may be written (breaks, daily ceiling),
//!   which warnings accompany it, and audits of rest between working days
//!   and compensatory rest after Sunday and holiday work ([`compliance`])
//!
//! Records are read through the [`store::EntryStore`] trait; an in-memory
//! implementation backs the tests and the stateless HTTP surface in [`api`].

#![warn(missing_docs)]

pub mod accounting;
pub mod api;
pub mod clock;
pub mod compliance;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
