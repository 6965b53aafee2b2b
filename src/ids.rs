// Identifier generation for catalog records: `<prefix>-<number>` with the
// number zero-padded to three digits (`dest-001`, `rev-014`, `book-1200`).

use std::sync::atomic::{AtomicU64, Ordering};

pub const DESTINATION_PREFIX: &str = "dest";
pub const REVIEW_PREFIX: &str = "rev";
pub const BOOKING_PREFIX: &str = "book";

// Observed numbers above this are ignored, which keeps the counter far from
// overflow. The generator would need 2^63 calls to reach them.
const MAX_OBSERVED: u64 = u64::MAX / 2;

// Monotonic per-store counter. Never hands out the same number twice, so ids
// only collide with records inserted under a caller-chosen id.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: &'static str,
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            last: AtomicU64::new(0),
        }
    }

    // Bumps the counter past `id` if it carries this generator's prefix
    pub fn observe(&self, id: &str) {
        match parse_number(self.prefix, id) {
            Some(number) if number <= MAX_OBSERVED => {
                self.last.fetch_max(number, Ordering::SeqCst);
            }
            _ => {}
        }
    }

    pub fn next_id(&self) -> String {
        let number = self.last.fetch_add(1, Ordering::SeqCst) + 1;
        format_id(self.prefix, number)
    }
}

pub fn format_id(prefix: &str, number: u64) -> String {
    format!("{prefix}-{number:03}")
}

fn parse_number(prefix: &str, id: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.strip_prefix('-')?.parse().ok()
}
