//! Canonical event serialization and leaf hashing.

use authlog_core::{hash_leaf, EventData, Hash, Result};

/// Hash an event into an MMR leaf.
///
/// The event is validated, then serialized deterministically:
///
/// ```text
/// u32-BE len || event_type bytes
/// u32-BE len || package_id bytes
/// u32-BE len || bcs_payload bytes
/// u64-BE checkpoint
/// u32-BE transaction_index
/// u32-BE event_index
/// ```
///
/// The length prefixes are mandatory: without them, adjacent
/// variable-length fields could be resliced into a colliding encoding.
pub fn hash_event(event: &EventData) -> Result<Hash> {
    event.validate()?;
    Ok(hash_leaf(&canonical_bytes(event)))
}

fn canonical_bytes(event: &EventData) -> Vec<u8> {
    let mut buf = Vec::with_capacity(
        4 + event.event_type.len() + 4 + event.package_id.len() + 4 + event.bcs_payload.len() + 16,
    );
    put_prefixed(&mut buf, event.event_type.as_bytes());
    put_prefixed(&mut buf, event.package_id.as_bytes());
    put_prefixed(&mut buf, &event.bcs_payload);
    buf.extend_from_slice(&event.checkpoint.to_be_bytes());
    buf.extend_from_slice(&event.transaction_index.to_be_bytes());
    buf.extend_from_slice(&event.event_index.to_be_bytes());
    buf
}

fn put_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    buf.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EventData {
        EventData {
            event_type: "0x2::registry::NameRegistered".to_string(),
            package_id: "0x2".to_string(),
            bcs_payload: vec![0xde, 0xad, 0xbe, 0xef],
            checkpoint: 42,
            transaction_index: 1,
            event_index: 2,
        }
    }

    #[test]
    fn test_hash_event_deterministic() {
        assert_eq!(hash_event(&sample()).unwrap(), hash_event(&sample()).unwrap());
    }

    #[test]
    fn test_invalid_event_rejected() {
        let mut e = sample();
        e.bcs_payload.clear();
        assert!(hash_event(&e).is_err());
    }

    #[test]
    fn test_event_index_changes_leaf() {
        let a = sample();
        let mut b = sample();
        b.event_index += 1;
        assert_ne!(hash_event(&a).unwrap(), hash_event(&b).unwrap());
    }

    #[test]
    fn test_payload_changes_leaf() {
        let a = sample();
        let mut b = sample();
        b.bcs_payload.push(0x00);
        assert_ne!(hash_event(&a).unwrap(), hash_event(&b).unwrap());
    }

    #[test]
    fn test_checkpoint_and_tx_index_change_leaf() {
        let a = sample();

        let mut b = sample();
        b.checkpoint += 1;
        assert_ne!(hash_event(&a).unwrap(), hash_event(&b).unwrap());

        let mut c = sample();
        c.transaction_index += 1;
        assert_ne!(hash_event(&a).unwrap(), hash_event(&c).unwrap());
    }

    #[test]
    fn test_length_prefixes_prevent_field_sliding() {
        // Moving a byte across the type/package boundary must change the
        // encoding, not just re-slice it.
        let a = EventData {
            event_type: "ab".to_string(),
            package_id: "c".to_string(),
            ..sample()
        };
        let b = EventData {
            event_type: "a".to_string(),
            package_id: "bc".to_string(),
            ..sample()
        };
        assert_ne!(hash_event(&a).unwrap(), hash_event(&b).unwrap());
    }

    #[test]
    fn test_canonical_layout() {
        let e = EventData {
            event_type: "t".to_string(),
            package_id: "p".to_string(),
            bcs_payload: vec![0x01],
            checkpoint: 0x0102030405060708,
            transaction_index: 3,
            event_index: 4,
        };
        let bytes = canonical_bytes(&e);
        let expected: Vec<u8> = [
            &[0, 0, 0, 1][..],
            b"t",
            &[0, 0, 0, 1],
            b"p",
            &[0, 0, 0, 1],
            &[0x01],
            &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08],
            &[0, 0, 0, 3],
            &[0, 0, 0, 4],
        ]
        .concat();
        assert_eq!(bytes, expected);
    }
}
