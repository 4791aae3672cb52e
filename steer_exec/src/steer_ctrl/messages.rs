//! Transient operator messages

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A message and the cycle it expires on.
#[derive(Debug, Clone, PartialEq)]
struct Msg {
    text: String,
    expires_at: u64,
}

/// Queue of short-lived messages shown in the status text.
///
/// Messages expire a fixed number of cycles after being pushed. Once the
/// queue is full the oldest message is dropped.
#[derive(Debug, Clone)]
pub struct MsgQueue {
    msgs: VecDeque<Msg>,
    lifetime_cycles: u64,
    max_len: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MsgQueue {
    pub fn new(lifetime_cycles: u64, max_len: usize) -> Self {
        Self {
            msgs: VecDeque::with_capacity(max_len),
            lifetime_cycles,
            max_len: max_len.max(1),
        }
    }

    /// Add a message on cycle `now`.
    pub fn push<S: Into<String>>(&mut self, now: u64, text: S) {
        if self.msgs.len() >= self.max_len {
            self.msgs.pop_front();
        }

        self.msgs.push_back(Msg {
            text: text.into(),
            expires_at: now.saturating_add(self.lifetime_cycles),
        });
    }

    /// Drop every message which has expired by cycle `now`.
    pub fn prune(&mut self, now: u64) {
        self.msgs.retain(|m| m.expires_at > now);
    }

    /// Messages oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.msgs.iter().map(|m| m.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.msgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.msgs.is_empty()
    }

    pub fn clear(&mut self) {
        self.msgs.clear();
    }
}

impl Default for MsgQueue {
    fn default() -> Self {
        Self::new(600, 8)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_expiry() {
        let mut q = MsgQueue::new(10, 4);
        q.push(0, "first");
        q.push(5, "second");

        q.prune(9);
        assert_eq!(q.len(), 2);

        q.prune(10);
        assert_eq!(q.iter().collect::<Vec<_>>(), vec!["second"]);

        q.prune(15);
        assert!(q.is_empty());
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut q = MsgQueue::new(100, 2);
        q.push(0, "a");
        q.push(1, String::from("b"));
        q.push(2, "c");

        assert_eq!(q.iter().collect::<Vec<_>>(), vec!["b", "c"]);
    }
}
