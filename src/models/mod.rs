//! # Data Models
//!
//! This module contains all the data models used throughout the Notes API.

pub mod note;

pub use note::Entity as Note;
