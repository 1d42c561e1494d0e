// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Opaque user identifiers in the classic 12-byte object id layout.
//!
//! `| seconds (4) | process random (5) | counter (3) |`, hex encoded.
//! Ids minted by one process sort in creation order until the counter wraps.

use ring::rand::{SecureRandom, SystemRandom};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

const OBJECT_ID_BYTES: usize = 12;
const COUNTER_MASK: u32 = 0x00FF_FFFF;

struct ProcessSeed {
    unique: [u8; 5],
    counter: AtomicU32,
}

fn process_seed() -> &'static ProcessSeed {
    static SEED: OnceLock<ProcessSeed> = OnceLock::new();
    SEED.get_or_init(|| {
        let mut unique = [0u8; 5];
        let mut counter = [0u8; 4];
        fill_random(&mut unique);
        fill_random(&mut counter);
        ProcessSeed {
            unique,
            counter: AtomicU32::new(u32::from_be_bytes(counter) & COUNTER_MASK),
        }
    })
}

fn fill_random(buf: &mut [u8]) {
    if SystemRandom::new().fill(buf).is_err() {
        // No OS entropy; fall back to clock and pid.
        tracing::warn!("System RNG unavailable, seeding object ids from the clock");
        let seed = chrono::Utc::now().timestamp_subsec_nanos() ^ std::process::id();
        for (i, b) in buf.iter_mut().enumerate() {
            *b = (seed >> ((i % 4) * 8)) as u8;
        }
    }
}

/// Mint a new 24-character hex object id.
pub fn new_object_id() -> String {
    let seed = process_seed();
    let seconds = chrono::Utc::now().timestamp() as u32;
    let counter = seed.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

    let mut bytes = [0u8; OBJECT_ID_BYTES];
    bytes[..4].copy_from_slice(&seconds.to_be_bytes());
    bytes[4..9].copy_from_slice(&seed.unique);
    bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
    hex::encode(bytes)
}

/// Whether `id` could have been produced by [`new_object_id`].
pub fn is_object_id(id: &str) -> bool {
    id.len() == OBJECT_ID_BYTES * 2
        && id
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_well_formed_and_unique() {
        let ids: Vec<String> = (0..1000).map(|_| new_object_id()).collect();
        assert!(ids.iter().all(|id| is_object_id(id)));

        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_ids_share_process_bytes() {
        let a = new_object_id();
        let b = new_object_id();
        assert_eq!(a[8..18], b[8..18]);
    }

    #[test]
    fn test_is_object_id_rejects_foreign_ids() {
        assert!(!is_object_id(""));
        assert!(!is_object_id("not-an-id"));
        assert!(!is_object_id("65A0F1C2D3E4F5A6B7C8D9E0"));
        assert!(!is_object_id("65a0f1c2d3e4f5a6b7c8d9e0ff"));
        assert!(is_object_id("65a0f1c2d3e4f5a6b7c8d9e0"));
    }
}
