//! The authenticated events client.
//!
//! Bridges the MMR engine and the remote ledger RPC: fetches events, heads
//! and proofs, and replays candidate event batches against the on-chain
//! commitment. The client holds no mutable state; every call fetches a
//! fresh snapshot, and pairing an event batch with a compatible head is
//! the caller's responsibility.

use serde_json::{json, Map};
use tracing::{debug, warn};

use authlog_core::EventData;
use authlog_mmr::{hash_event, MmrState};

use crate::config::{ClientConfig, MAX_PAGE_SIZE};
use crate::errors::{ClientError, Result};
use crate::resolver::{IdentityResolver, StreamHeadResolver};
use crate::rpc::{HttpTransport, RpcTransport};
use crate::stream::EventStream;
use crate::types::{
    decode_event_page, decode_inclusion_proof, decode_stream_head, EventPage,
    EventStreamHead, EventVerificationResult, ListEventsParams, ObjectInclusionProof,
};

/// RPC method for listing authenticated events.
const METHOD_LIST_EVENTS: &str = "sui_listAuthenticatedEvents";
/// RPC method for fetching an object with content.
const METHOD_GET_OBJECT: &str = "sui_getObject";
/// RPC method for fetching an object inclusion proof.
const METHOD_GET_INCLUSION_PROOF: &str = "sui_getObjectInclusionProof";

/// Diagnostic attached to a failed verification.
const MMR_MISMATCH: &str = "MMR commitment mismatch: recomputed peaks do not match stream head";

/// Client for an authenticated event stream endpoint.
pub struct EventsClient<T: RpcTransport> {
    config: ClientConfig,
    transport: T,
    resolver: Box<dyn StreamHeadResolver>,
}

impl EventsClient<HttpTransport> {
    /// Connect to the configured RPC endpoint over HTTP.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.rpc_url.clone())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: RpcTransport> EventsClient<T> {
    /// Build a client over an existing transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            resolver: Box::new(IdentityResolver),
        }
    }

    /// Replace the stream-head resolver.
    pub fn with_resolver(mut self, resolver: impl StreamHeadResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// List raw events for a stream, one page per call.
    ///
    /// The page size defaults to the configured value and is clamped to
    /// [`MAX_PAGE_SIZE`] before it reaches the wire.
    pub async fn list_events(&self, params: ListEventsParams) -> Result<EventPage> {
        require_non_empty(&params.stream_id, "stream_id")?;

        let page_size = params
            .page_size
            .unwrap_or(self.config.default_page_size)
            .min(MAX_PAGE_SIZE);

        let mut filter = Map::new();
        filter.insert("stream_id".to_string(), json!(params.stream_id));
        filter.insert("page_size".to_string(), json!(page_size));
        if let Some(checkpoint) = params.start_checkpoint {
            filter.insert("start_checkpoint".to_string(), json!(checkpoint.to_string()));
        }
        if let Some(token) = params.page_token {
            filter.insert("page_token".to_string(), json!(token));
        }

        let result = self
            .transport
            .call(METHOD_LIST_EVENTS, json!([filter]))
            .await?;
        let page = decode_event_page(result)?;
        debug!(
            stream_id = %params.stream_id,
            events = page.events.len(),
            "listed events"
        );
        Ok(page)
    }

    /// Fetch the current on-chain head for a stream.
    ///
    /// Returns `Ok(None)` when the head object has no decodable content
    /// fields: the stream exists but is uninitialized.
    pub async fn get_stream_head(&self, stream_id: &str) -> Result<Option<EventStreamHead>> {
        require_non_empty(stream_id, "stream_id")?;

        let object_id = self.resolver.head_object_id(stream_id);
        let result = self
            .transport
            .call(
                METHOD_GET_OBJECT,
                json!([object_id, {"showContent": true}]),
            )
            .await?;
        decode_stream_head(result, stream_id)
    }

    /// Fetch a Merkle inclusion proof for an object at a checkpoint.
    ///
    /// Returns `Ok(None)` when the response carries no object reference or
    /// no proof: the proof is not available, which is not an error.
    pub async fn get_object_inclusion_proof(
        &self,
        object_id: &str,
        checkpoint: u64,
    ) -> Result<Option<ObjectInclusionProof>> {
        require_non_empty(object_id, "object_id")?;

        let result = self
            .transport
            .call(
                METHOD_GET_INCLUSION_PROOF,
                json!([object_id, checkpoint.to_string()]),
            )
            .await?;
        decode_inclusion_proof(result)
    }

    /// Replay a batch of events through a fresh MMR and compare the
    /// resulting peaks against the head's commitment.
    ///
    /// Events are folded strictly in the order supplied; the caller is
    /// responsible for ascending checkpoint/transaction/event order. An
    /// empty batch trivially verifies ("no new events to check"). A peak
    /// mismatch is a normal outcome, reported in the result rather than as
    /// an error; only precondition violations return `Err`.
    pub fn verify_events(
        &self,
        stream_id: &str,
        events: &[EventData],
        expected_head: &EventStreamHead,
    ) -> Result<EventVerificationResult> {
        require_non_empty(stream_id, "stream_id")?;

        if events.is_empty() {
            return Ok(EventVerificationResult {
                verified: true,
                stream_id: stream_id.to_string(),
                event_count: 0,
                checkpoint: expected_head.checkpoint_seq,
                error: None,
            });
        }

        let mut state = MmrState::new();
        for event in events {
            state = state.append_leaf(hash_event(event)?);
        }

        let verified = state.verify_against_commitment(&expected_head.mmr);
        if !verified {
            warn!(
                stream_id,
                local_peaks = state.peaks().len(),
                committed_peaks = expected_head.mmr.len(),
                "event batch does not match stream head"
            );
        }

        // Last event in the batch, not the head's checkpoint.
        let checkpoint = events[events.len() - 1].checkpoint;

        Ok(EventVerificationResult {
            verified,
            stream_id: stream_id.to_string(),
            event_count: events.len() as u64,
            checkpoint,
            error: (!verified).then(|| MMR_MISMATCH.to_string()),
        })
    }

    /// Lazily iterate every event of a stream, fetching max-size pages on
    /// demand. Dropping the stream abandons it without leaking resources;
    /// restart by calling again with a new `start_checkpoint`.
    pub fn stream_events(
        &self,
        stream_id: &str,
        start_checkpoint: Option<u64>,
    ) -> EventStream<'_, T> {
        EventStream::new(self, stream_id.to_string(), start_checkpoint)
    }
}

fn require_non_empty(value: &str, name: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ClientError::InvalidArgument(format!(
            "{} must not be empty",
            name
        )));
    }
    Ok(())
}
