//! Wire types and defensive decoding.
//!
//! The RPC endpoint serializes 64-bit numerics as decimal strings (JSON
//! numbers lose precision above 2^53) and byte fields as base64. Wire
//! structs accept either representation for numerics and are converted
//! into the typed forms the client exposes; malformed values are rejected
//! rather than coerced.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use authlog_core::EventData;

use crate::errors::{ClientError, Result};

/// Deserialize a u64 that may arrive as a JSON number or decimal string.
pub(crate) mod u64_flex {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u64),
        Str(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        match NumOrStr::deserialize(d)? {
            NumOrStr::Num(n) => Ok(n),
            NumOrStr::Str(s) => s
                .parse()
                .map_err(|_| de::Error::custom(format!("not a decimal u64: {:?}", s))),
        }
    }
}

/// One event as decoded from the RPC wire. Identical fields to
/// [`EventData`]; this is the fetch-side representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedEvent {
    /// Fully-qualified event type string.
    pub event_type: String,
    /// Package that emitted the event.
    pub package_id: String,
    /// Raw BCS-encoded payload (empty if the wire omitted it).
    pub bcs_payload: Vec<u8>,
    /// Checkpoint the event was committed under.
    pub checkpoint: u64,
    /// Transaction position within the checkpoint.
    pub transaction_index: u32,
    /// Event position within the transaction.
    pub event_index: u32,
}

impl From<AuthenticatedEvent> for EventData {
    fn from(e: AuthenticatedEvent) -> Self {
        EventData {
            event_type: e.event_type,
            package_id: e.package_id,
            bcs_payload: e.bcs_payload,
            checkpoint: e.checkpoint,
            transaction_index: e.transaction_index,
            event_index: e.event_index,
        }
    }
}

impl AuthenticatedEvent {
    /// Borrow-convert into the engine-side event record.
    pub fn to_event_data(&self) -> EventData {
        self.clone().into()
    }
}

/// Parameters for `list_events`.
#[derive(Debug, Clone)]
pub struct ListEventsParams {
    /// Stream to list events for.
    pub stream_id: String,
    /// Only return events at or after this checkpoint.
    pub start_checkpoint: Option<u64>,
    /// Requested page size (clamped to the hard ceiling).
    pub page_size: Option<u32>,
    /// Continuation token from a previous page.
    pub page_token: Option<String>,
}

impl ListEventsParams {
    /// Parameters with defaults for the given stream.
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            start_checkpoint: None,
            page_size: None,
            page_token: None,
        }
    }

    /// Set the starting checkpoint.
    pub fn with_start_checkpoint(mut self, checkpoint: u64) -> Self {
        self.start_checkpoint = Some(checkpoint);
        self
    }

    /// Set the requested page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Set the continuation token.
    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }
}

/// One page of events from `list_events`.
#[derive(Debug, Clone)]
pub struct EventPage {
    /// Decoded events, in ledger order.
    pub events: Vec<AuthenticatedEvent>,
    /// Highest checkpoint the server has indexed for the stream.
    pub highest_indexed_checkpoint: u64,
    /// Continuation token, absent on the last page.
    pub next_page_token: Option<String>,
}

/// The authoritative on-chain commitment for a stream.
///
/// Untrusted input: always matched against a locally recomputed MMR, never
/// taken at face value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStreamHead {
    /// Committed peak values, one big-endian unsigned integer per peak.
    pub mmr: Vec<U256>,
    /// Checkpoint at which the head was last updated.
    pub checkpoint_seq: u64,
    /// Total committed leaf count.
    pub num_events: u64,
    /// Stream this head commits to.
    pub stream_id: String,
}

/// Reference to an object at a specific version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Object id.
    pub object_id: String,
    /// Object version.
    #[serde(deserialize_with = "u64_flex::deserialize")]
    pub version: u64,
    /// Content digest.
    pub digest: String,
}

/// Proof that an object's state was present in a checkpoint's state tree.
///
/// Distinct from the event MMR; fetched through the same client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInclusionProof {
    /// The object the proof covers.
    pub object_ref: ObjectRef,
    /// Opaque Merkle path bytes.
    pub merkle_proof: Vec<u8>,
    /// Leaf index within the state tree.
    pub leaf_index: u64,
    /// Root of the state tree.
    pub tree_root: Vec<u8>,
    /// Raw object bytes, if returned.
    pub object_data: Vec<u8>,
    /// Signed checkpoint summary bytes, if returned.
    pub checkpoint_summary: Vec<u8>,
}

/// Output of a verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventVerificationResult {
    /// Whether the recomputed peaks matched the head's commitment.
    pub verified: bool,
    /// Stream that was verified.
    pub stream_id: String,
    /// Number of events folded into the MMR.
    pub event_count: u64,
    /// Checkpoint of the last event verified, or the head's checkpoint for
    /// an empty batch.
    pub checkpoint: u64,
    /// Diagnostic, present iff `verified` is false.
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ListEventsResultWire {
    #[serde(default)]
    pub events: Vec<EventRecordWire>,
    #[serde(with = "u64_flex", default)]
    pub highest_indexed_checkpoint: u64,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventRecordWire {
    #[serde(with = "u64_flex")]
    pub checkpoint: u64,
    #[serde(with = "u64_flex")]
    pub transaction_index: u64,
    #[serde(with = "u64_flex")]
    pub event_index: u64,
    #[serde(rename = "type")]
    pub event_type: String,
    pub package_id: String,
    #[serde(default)]
    pub bcs_payload: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetObjectResultWire {
    pub data: Option<ObjectDataWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObjectDataWire {
    pub content: Option<ObjectContentWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObjectContentWire {
    pub fields: Option<StreamHeadFieldsWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamHeadFieldsWire {
    #[serde(default)]
    pub mmr: Vec<String>,
    #[serde(with = "u64_flex", default)]
    pub checkpoint_seq: u64,
    #[serde(with = "u64_flex", default)]
    pub num_events: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InclusionProofResultWire {
    pub object_ref: Option<ObjectRef>,
    pub inclusion_proof: Option<MerkleProofWire>,
    #[serde(default)]
    pub object_data: Option<String>,
    #[serde(default)]
    pub checkpoint_summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MerkleProofWire {
    pub merkle_proof: String,
    #[serde(with = "u64_flex")]
    pub leaf_index: u64,
    pub tree_root: String,
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

pub(crate) fn decode_event_page(result: Value) -> Result<EventPage> {
    let wire: ListEventsResultWire = serde_json::from_value(result)?;
    let events = wire
        .events
        .into_iter()
        .map(decode_event)
        .collect::<Result<Vec<_>>>()?;

    Ok(EventPage {
        events,
        highest_indexed_checkpoint: wire.highest_indexed_checkpoint,
        next_page_token: wire.next_page_token.filter(|t| !t.is_empty()),
    })
}

pub(crate) fn decode_event(wire: EventRecordWire) -> Result<AuthenticatedEvent> {
    let bcs_payload = match wire.bcs_payload.as_deref() {
        None | Some("") => Vec::new(),
        Some(b64) => BASE64.decode(b64)?,
    };

    Ok(AuthenticatedEvent {
        event_type: wire.event_type,
        package_id: wire.package_id,
        bcs_payload,
        checkpoint: wire.checkpoint,
        transaction_index: narrow_index(wire.transaction_index, "transaction_index")?,
        event_index: narrow_index(wire.event_index, "event_index")?,
    })
}

pub(crate) fn decode_stream_head(result: Value, stream_id: &str) -> Result<Option<EventStreamHead>> {
    let wire: GetObjectResultWire = serde_json::from_value(result)?;

    // Missing content fields means the stream exists but is uninitialized,
    // not a hard error.
    let fields = match wire.data.and_then(|d| d.content).and_then(|c| c.fields) {
        Some(fields) => fields,
        None => return Ok(None),
    };

    let mmr = fields
        .mmr
        .iter()
        .map(|s| {
            U256::from_dec_str(s).map_err(|_| {
                ClientError::MalformedResponse(format!("mmr entry is not a decimal integer: {:?}", s))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(EventStreamHead {
        mmr,
        checkpoint_seq: fields.checkpoint_seq,
        num_events: fields.num_events,
        stream_id: stream_id.to_string(),
    }))
}

pub(crate) fn decode_inclusion_proof(result: Value) -> Result<Option<ObjectInclusionProof>> {
    let wire: InclusionProofResultWire = serde_json::from_value(result)?;

    // Either field absent means "proof not available", not an error.
    let (object_ref, proof) = match (wire.object_ref, wire.inclusion_proof) {
        (Some(r), Some(p)) => (r, p),
        _ => return Ok(None),
    };

    Ok(Some(ObjectInclusionProof {
        object_ref,
        merkle_proof: BASE64.decode(&proof.merkle_proof)?,
        leaf_index: proof.leaf_index,
        tree_root: BASE64.decode(&proof.tree_root)?,
        object_data: decode_optional_b64(wire.object_data.as_deref())?,
        checkpoint_summary: decode_optional_b64(wire.checkpoint_summary.as_deref())?,
    }))
}

fn decode_optional_b64(field: Option<&str>) -> Result<Vec<u8>> {
    match field {
        None | Some("") => Ok(Vec::new()),
        Some(b64) => Ok(BASE64.decode(b64)?),
    }
}

fn narrow_index(value: u64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        ClientError::MalformedResponse(format!("{} out of range: {}", field, value))
    })
}
