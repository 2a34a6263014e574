//! # Notes API Library
//!
//! This library provides the core functionality for the Notes API service,
//! including handlers, the note service, persistence and server configuration.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod note_service;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub use migration;
