//! Rule-based product recommendation service for the storefront, the
//! embeddable widget, and the admin dashboard.
//!
//! The interesting part lives in [`services`]: a deterministic pipeline that
//! turns a session's recent interaction history (and an optional current
//! product) into a ranked, explainable list of candidate products. The rest
//! is plumbing: axum routes, boundary validation, and the store traits the
//! engine reads from.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod stores;
