//! Core types and collaborator traits for the Salmon comment endpoint.
//!
//! This crate is free of HTTP and XML dependencies. The Atom parser, the
//! WebFinger client and the endpoint all depend on it.

pub mod comment;
pub mod entry;
pub mod error;
pub mod mapper;
pub mod memory;
pub mod signature;
pub mod store;

pub use error::{Error, Result};
