//! Stream-id to head-object-id resolution.
//!
//! Current deployments store the head object under the stream id itself.
//! That 1:1 mapping is a deployment policy, not a protocol guarantee, so
//! the lookup is a trait the client takes at construction.

/// Maps a stream id to the object id its head is stored under.
pub trait StreamHeadResolver: Send + Sync {
    /// Object id to fetch for the given stream's head.
    fn head_object_id(&self, stream_id: &str) -> String;
}

/// The identity mapping: head object id equals stream id.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl StreamHeadResolver for IdentityResolver {
    fn head_object_id(&self, stream_id: &str) -> String {
        stream_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_resolver() {
        assert_eq!(IdentityResolver.head_object_id("0xabc"), "0xabc");
    }
}
