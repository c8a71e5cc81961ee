//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! - **Identity**: the `x-user-id` header is resolved to a domain identity
//!   before any protected handler runs
//! - **Mapping**: `shared` DTOs in, domain commands down, DTOs back out
//! - **Errors**: domain errors become a status code plus `{error, kind}`

pub mod rest;
