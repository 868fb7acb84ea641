//! Error types for the Atom entry decoder.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed XML: {0}")]
  MalformedXml(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
