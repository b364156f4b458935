// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded in-memory conversation store.
//!
//! Each sender owns a [`Thread`] holding a sliding window of recent turns.
//! Threads live in an LRU-bounded [`ThreadCache`]; when the cache is over
//! capacity the least recently used thread is dropped whole. The async mutex
//! on each entry serializes the relay pipeline per sender, so two messages
//! from the same phone never interleave their completion calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use saci_core::ConversationTurn;

/// Sliding window of conversation turns for one sender.
pub struct Thread {
    turns: VecDeque<ConversationTurn>,
    window: usize,
}

impl Thread {
    fn new(window: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Copies the current window, oldest first.
    pub fn snapshot(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }

    /// Appends a turn, dropping the oldest once the window is full.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.window {
            self.turns.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Cache slot for one sender.
pub struct ThreadEntry {
    thread: Mutex<Thread>,
    last_used: AtomicU64,
}

impl ThreadEntry {
    /// Locks the thread, serializing pipeline work for this sender.
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, Thread> {
        self.thread.lock().await
    }
}

/// LRU-bounded map from sender id to conversation thread.
pub struct ThreadCache {
    threads: DashMap<String, Arc<ThreadEntry>>,
    capacity: usize,
    window: usize,
    clock: AtomicU64,
}

impl ThreadCache {
    /// `capacity` bounds the number of concurrent senders, `window` the
    /// turns retained per sender.
    pub fn new(capacity: usize, window: usize) -> Self {
        Self {
            threads: DashMap::new(),
            capacity,
            window,
            clock: AtomicU64::new(0),
        }
    }

    /// Returns the entry for `sender`, creating it lazily and bumping its
    /// recency. Evicts least recently used entries while over capacity.
    pub fn entry(&self, sender: &str) -> Arc<ThreadEntry> {
        let stamp = self.clock.fetch_add(1, Ordering::Relaxed) + 1;
        let entry = self
            .threads
            .entry(sender.to_owned())
            .or_insert_with(|| {
                Arc::new(ThreadEntry {
                    thread: Mutex::new(Thread::new(self.window)),
                    last_used: AtomicU64::new(stamp),
                })
            })
            .clone();
        entry.last_used.store(stamp, Ordering::Relaxed);

        while self.threads.len() > self.capacity {
            if !self.evict_oldest(sender) {
                break;
            }
        }
        entry
    }

    /// Evicts the least recently used entry other than `keep`. Returns
    /// false when nothing is evictable.
    ///
    /// Entries with outstanding handles are never victims: an in-flight
    /// pipeline holds its entry's `Arc`, and evicting it would let a
    /// follow-up message from the same sender run on a fresh thread
    /// concurrently. The cache may exceed capacity while every entry is
    /// in flight; it shrinks again as handles drop.
    fn evict_oldest(&self, keep: &str) -> bool {
        let mut victim: Option<(String, u64)> = None;
        for item in self.threads.iter() {
            if item.key() == keep || Arc::strong_count(item.value()) > 1 {
                continue;
            }
            let stamp = item.value().last_used.load(Ordering::Relaxed);
            if victim.as_ref().is_none_or(|(_, best)| stamp < *best) {
                victim = Some((item.key().clone(), stamp));
            }
        }
        match victim {
            Some((key, _)) => {
                self.threads.remove(&key);
                debug!(sender = %key, "evicted least recently used thread");
                true
            }
            None => false,
        }
    }

    /// Whether a thread currently exists for `sender`.
    pub fn contains(&self, sender: &str) -> bool {
        self.threads.contains_key(sender)
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Copies the window for `sender`, if a thread exists.
    pub async fn snapshot(&self, sender: &str) -> Option<Vec<ConversationTurn>> {
        let entry = self.threads.get(sender)?.clone();
        let thread = entry.lock().await;
        Some(thread.snapshot())
    }
}
