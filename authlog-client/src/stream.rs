//! Lazy event iteration over paginated fetches.

use std::collections::VecDeque;

use crate::client::EventsClient;
use crate::config::MAX_PAGE_SIZE;
use crate::errors::Result;
use crate::rpc::RpcTransport;
use crate::types::{AuthenticatedEvent, ListEventsParams};

/// Pull-based cursor over a stream's events.
///
/// Each refill fetches one max-size page. The cursor terminates as soon as
/// the server returns an empty page or omits the continuation token; it is
/// not restartable mid-iteration, and dropping it abandons the remaining
/// pages cleanly.
pub struct EventStream<'a, T: RpcTransport> {
    client: &'a EventsClient<T>,
    stream_id: String,
    start_checkpoint: Option<u64>,
    page_token: Option<String>,
    buffer: VecDeque<AuthenticatedEvent>,
    exhausted: bool,
}

impl<'a, T: RpcTransport> EventStream<'a, T> {
    pub(crate) fn new(
        client: &'a EventsClient<T>,
        stream_id: String,
        start_checkpoint: Option<u64>,
    ) -> Self {
        Self {
            client,
            stream_id,
            start_checkpoint,
            page_token: None,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// The next event, fetching a page when the buffer runs dry.
    ///
    /// `Ok(None)` terminates the sequence; subsequent calls keep returning
    /// `Ok(None)` without further fetches.
    pub async fn next(&mut self) -> Result<Option<AuthenticatedEvent>> {
        loop {
            if let Some(event) = self.buffer.pop_front() {
                return Ok(Some(event));
            }
            if self.exhausted {
                return Ok(None);
            }

            let mut params =
                ListEventsParams::new(&self.stream_id).with_page_size(MAX_PAGE_SIZE);
            // start_checkpoint applies to the first fetch only; continuation
            // runs on the token afterwards.
            if let Some(checkpoint) = self.start_checkpoint.take() {
                params = params.with_start_checkpoint(checkpoint);
            }
            if let Some(token) = self.page_token.take() {
                params = params.with_page_token(token);
            }

            let page = self.client.list_events(params).await?;

            // Continue only while the page is non-empty AND a continuation
            // token came back with it.
            match page.next_page_token {
                Some(token) if !page.events.is_empty() => self.page_token = Some(token),
                _ => self.exhausted = true,
            }
            self.buffer.extend(page.events);
        }
    }

    /// Collect every remaining event. Unbounded in principle; intended for
    /// streams known to be finite.
    pub async fn collect_remaining(mut self) -> Result<Vec<AuthenticatedEvent>> {
        let mut events = Vec::new();
        while let Some(event) = self.next().await? {
            events.push(event);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::mock::MockTransport;
    use serde_json::json;

    const METHOD: &str = "sui_listAuthenticatedEvents";

    fn wire_event(checkpoint: u64, event_index: u32) -> serde_json::Value {
        json!({
            "checkpoint": checkpoint.to_string(),
            "transaction_index": 0,
            "event_index": event_index,
            "type": "t::T",
            "package_id": "p",
        })
    }

    fn test_client(mock: MockTransport) -> EventsClient<MockTransport> {
        EventsClient::with_transport(ClientConfig::new("http://localhost:9000"), mock)
    }

    #[tokio::test]
    async fn test_stream_walks_pages_in_order() {
        let mock = MockTransport::new();
        mock.push_response(
            METHOD,
            json!({
                "events": [wire_event(1, 0), wire_event(1, 1)],
                "highest_indexed_checkpoint": "3",
                "next_page_token": "p2",
            }),
        );
        mock.push_response(
            METHOD,
            json!({
                "events": [wire_event(2, 0)],
                "highest_indexed_checkpoint": "3",
            }),
        );

        let client = test_client(mock.clone());
        let mut stream = client.stream_events("0xstream", Some(1));

        let mut seen = Vec::new();
        while let Some(event) = stream.next().await.unwrap() {
            seen.push((event.checkpoint, event.event_index));
        }
        assert_eq!(seen, vec![(1, 0), (1, 1), (2, 0)]);

        // Two fetches: first with start_checkpoint, second with the token.
        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1[0]["page_size"], json!(1000));
        assert_eq!(calls[0].1[0]["start_checkpoint"], json!("1"));
        assert_eq!(calls[1].1[0]["page_token"], json!("p2"));
        assert_eq!(calls[1].1[0].get("start_checkpoint"), None);
    }

    #[tokio::test]
    async fn test_stream_stops_on_empty_page() {
        let mock = MockTransport::new();
        mock.push_response(
            METHOD,
            json!({
                "events": [],
                "highest_indexed_checkpoint": "0",
                "next_page_token": "more",
            }),
        );

        let client = test_client(mock.clone());
        let mut stream = client.stream_events("0xstream", None);

        assert!(stream.next().await.unwrap().is_none());
        // Token alone does not continue the walk past an empty page.
        assert_eq!(mock.calls().len(), 1);
        assert!(stream.next().await.unwrap().is_none());
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_stream_yields_final_page_without_token() {
        let mock = MockTransport::new();
        mock.push_response(
            METHOD,
            json!({
                "events": [wire_event(9, 0)],
                "highest_indexed_checkpoint": "9",
            }),
        );

        let client = test_client(mock.clone());
        let events = client
            .stream_events("0xstream", None)
            .collect_remaining()
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_stream_surfaces_transport_errors() {
        let mock = MockTransport::new();
        let client = test_client(mock);
        let mut stream = client.stream_events("0xstream", None);
        assert!(stream.next().await.is_err());
    }
}
