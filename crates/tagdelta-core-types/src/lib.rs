//! Core types shared across tagdelta facilities
//!
//! This crate provides the canonical schema used by the logging facility
//! and by anything that consumes its structured output:
//!
//! - **Schema constants**: canonical field keys and event names

pub mod schema;
