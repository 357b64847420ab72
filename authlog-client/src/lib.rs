//! Client for authenticated event streams.
//!
//! Fetches paginated events, stream heads and object inclusion proofs from
//! a ledger RPC endpoint, replays event batches through the MMR engine and
//! checks the recomputed peak set against the on-chain commitment.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      EVENTS CLIENT                        │
//! │                                                           │
//! │  list_events ───────► sui_listAuthenticatedEvents         │
//! │  get_stream_head ───► sui_getObject (head object)         │
//! │  get_object_inclusion_proof ─► sui_getObjectInclusionProof│
//! │  stream_events ─────► lazy paging over list_events        │
//! │                                                           │
//! │  verify_events: replay batch ─► authlog-mmr ─► compare    │
//! │                 peaks against the head's commitment       │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use authlog_client::{ClientConfig, EventsClient};
//!
//! let client = EventsClient::connect(ClientConfig::new("http://localhost:9000"))?;
//!
//! let head = client.get_stream_head(stream_id).await?
//!     .ok_or("stream not initialized")?;
//!
//! let page = client.list_events(ListEventsParams::new(stream_id)).await?;
//! let events: Vec<_> = page.events.iter().map(|e| e.to_event_data()).collect();
//!
//! let result = client.verify_events(stream_id, &events, &head)?;
//! assert!(result.verified);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod client;
pub mod config;
pub mod errors;
pub mod mock;
pub mod resolver;
pub mod rpc;
pub mod stream;
pub mod types;

pub use client::EventsClient;
pub use config::{ClientConfig, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use errors::{ClientError, Result};
pub use mock::MockTransport;
pub use resolver::{IdentityResolver, StreamHeadResolver};
pub use rpc::{HttpTransport, RpcTransport};
pub use stream::EventStream;
pub use types::{
    AuthenticatedEvent, EventPage, EventStreamHead, EventVerificationResult, ListEventsParams,
    ObjectInclusionProof, ObjectRef,
};
