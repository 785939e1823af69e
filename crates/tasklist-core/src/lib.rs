//! # tasklist-core
//!
//! Core types, ID prefixes, input parsing, and error types for Tasklist.
//!
//! This crate provides the foundational types shared across all Tasklist crates:
//! - The `Task` entity
//! - The list status filter enum
//! - ID prefix constants
//! - Cross-cutting error types with field-level validation details
//! - Procedure input types and due-date parsing
//! - RPC paths, response types and the error body

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod inputs;
pub mod procedures;
pub mod responses;
