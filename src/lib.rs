//! Interactive data-science job salary dashboard.
//!
//! [`data`] loads and filters the salary table, [`chart`] turns a filtered
//! view into renderer-agnostic chart specs, and [`app`] / [`ui`] draw them
//! in an eframe window.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
