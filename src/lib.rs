//! Pivot Frame
//!
//! An in-memory pivot table with SUM, COUNT, AVG, MAX and MIN
//! aggregation over categorical pivot columns.
//!
//! This crate provides the frame engine, the single-instance HTTP
//! service around it, and a blocking client for the `pivot-frame` CLI.
//!
//! ## Getting Started
//!
//! ```bash
//! pivot-frame serve --port 8080
//! pivot-frame load --file rows.json
//! pivot-frame query --kind sum --pivots A,B --column 0
//! ```

pub mod api;
pub mod commands;
pub mod frame;
pub mod output;
pub mod remote;
pub mod service;
pub mod utils;
