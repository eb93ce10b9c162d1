//! Modules layer - Infrastructure adapters behind the feature services
//!
//! Contains the report store seam and its PostgreSQL implementation.

pub mod storage;
