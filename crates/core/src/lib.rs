//! Business logic for the pet adoption backend.
//!
//! Services own repositories and enforce validation, authorization and
//! workflow rules. HTTP concerns live in `petgallery-api`.

pub mod policy;
pub mod services;
