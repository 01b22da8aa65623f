//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain logic. It translates
//! JSON:API requests into domain operations and formats domain results and
//! failures as JSON:API documents.

pub mod rest;

pub use rest::*;
