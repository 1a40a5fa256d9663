//! Online dictionary lookups.
//!
//! Fetching is done here; turning a page into a record is left to
//! [`omni_core::RecordAssembler`].

pub mod client;
mod error;

use async_trait::async_trait;
use omni_core::DictionaryRecord;

pub use client::CambridgeClient;
pub use error::LookupError;

/// A source of dictionary records.
#[async_trait]
pub trait Dictionary: Send + Sync {
    /// Human readable name, e.g. "Cambridge Dictionary"
    fn name(&self) -> &str;

    /// Looks up `term`.
    ///
    /// `Ok(None)` means the page was fetched but held no usable definitions.
    async fn lookup(&self, term: &str) -> Result<Option<DictionaryRecord>, LookupError>;
}
