//! WebFinger discovery for Salmon authors.
//!
//! [`WebFingerClient`] implements [`salmon_core::store::AccountResolver`]:
//! it turns an `acct:` URI into an
//! [`AccountDescriptor`](salmon_core::entry::AccountDescriptor) by fetching
//! the host's JRD document. Every failure is logged and reported as an
//! unresolved account.

pub mod acct;
mod client;
pub mod error;
pub mod jrd;

pub use acct::AcctUri;
pub use client::{WebFingerClient, WebFingerConfig};
pub use error::{Error, Result};
