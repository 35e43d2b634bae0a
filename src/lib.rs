//! Core library for the `http-bench` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration parsing, the raw HTTP/1.1 worker engine, metrics
//! aggregation, and the run coordinator with its report. The primary
//! user-facing interface is the `http-bench` command-line application;
//! library APIs may evolve as the CLI grows.
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;
pub mod shutdown_handlers;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
