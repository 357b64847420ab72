//! Ledger events committed into the accumulator.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One ledger event to be committed as an MMR leaf.
///
/// Constructed per verification call and not persisted by this subsystem.
/// An event is addressed by `(checkpoint, transaction_index, event_index)`,
/// the ledger's position of the emitting transaction and the event's slot
/// within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    /// Fully-qualified event type string.
    pub event_type: String,
    /// Package that emitted the event.
    pub package_id: String,
    /// Raw BCS-encoded event payload.
    pub bcs_payload: Vec<u8>,
    /// Checkpoint (block height) the event was committed under.
    pub checkpoint: u64,
    /// Position of the transaction within the checkpoint.
    pub transaction_index: u32,
    /// Position of the event within the transaction.
    pub event_index: u32,
}

impl EventData {
    /// Validate the event's invariants.
    ///
    /// `event_type`, `package_id` and `bcs_payload` must all be non-empty.
    /// Violations are caller errors, surfaced before any hashing happens.
    pub fn validate(&self) -> Result<()> {
        if self.event_type.is_empty() {
            return Err(Error::InvalidEvent("event_type is empty".to_string()));
        }
        if self.package_id.is_empty() {
            return Err(Error::InvalidEvent("package_id is empty".to_string()));
        }
        if self.bcs_payload.is_empty() {
            return Err(Error::InvalidEvent("bcs_payload is empty".to_string()));
        }
        Ok(())
    }
}
