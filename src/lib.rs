//! HR payroll client
//!
//! This crate provides the payslip totals calculator, form state and
//! validation for every HR resource, a typed async client for the HR REST
//! API, login session handling, and a small HTTP service that previews
//! payslip totals and validates drafts.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod session;
