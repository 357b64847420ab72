//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::errors::{ClientError, Result};

/// Hard ceiling on the page size sent to the RPC endpoint.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Configuration for the events client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// RPC endpoint URL.
    pub rpc_url: String,
    /// Page size used by `list_events` when none is given.
    pub default_page_size: u32,
}

impl ClientConfig {
    /// Create a configuration for the given endpoint.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the default page size (still subject to [`MAX_PAGE_SIZE`]).
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.is_empty() {
            return Err(ClientError::InvalidArgument(
                "rpc_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
