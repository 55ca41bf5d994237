//! Host resource monitor: samples per-thread CPU, memory and root disk
//! usage into immutable snapshots and renders them in a terminal UI.

pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod logging;
pub mod metrics;
pub mod ui;
