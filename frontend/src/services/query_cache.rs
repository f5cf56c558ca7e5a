//! # Query Cache
//!
//! Key-addressed cache for server data, plus the explicit mutation
//! protocol that keeps views consistent after a write.
//!
//! The cache is deliberately framework-free: hooks own the wiring to yew,
//! this module owns the rules. Views transiently showing pre-mutation data
//! while a refetch is in flight is accepted behavior, serving one id's
//! data for another id's key is not.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use shared::Trip;

/// Identity of a logical query. Keys are exact-match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The full trip collection.
    Trips,
    /// A single trip by id.
    Trip(String),
}

/// Cached value for a query key.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Trips(Vec<Trip>),
    Trip(Trip),
}

/// Lifecycle of one cached query result.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus<V> {
    /// A fetch is in flight and no prior value exists yet.
    Pending,
    Success(V),
    Error(String),
}

/// Ticket handed out by [`QueryCache::begin`]; must be presented when the
/// fetch resolves. A ticket that is no longer current is ignored, which is
/// how late results from unmounted views are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone)]
struct QueryEntry<V> {
    status: QueryStatus<V>,
    stale: bool,
    generation: u64,
    in_flight: bool,
}

/// Key-addressed cache for query results.
#[derive(Debug, Default)]
pub struct QueryCache<V> {
    entries: HashMap<QueryKey, QueryEntry<V>>,
}

/// The cache handle shared by all hooks on a page.
pub type TripCache = Rc<RefCell<QueryCache<QueryValue>>>;

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Decide whether a mount for `key` must issue a fetch.
    ///
    /// Returns a ticket when the entry is missing, stale, or errored and
    /// nothing is already in flight. Returns `None` when a fresh value
    /// exists or another mount's in-flight fetch will satisfy this one,
    /// which is what deduplicates concurrent mounts of the same key.
    pub fn begin(&mut self, key: QueryKey) -> Option<FetchTicket> {
        let entry = self.entries.entry(key).or_insert_with(|| QueryEntry {
            status: QueryStatus::Pending,
            stale: true,
            generation: 0,
            in_flight: false,
        });

        if entry.in_flight {
            return None;
        }
        if !entry.stale && matches!(entry.status, QueryStatus::Success(_)) {
            return None;
        }

        entry.generation += 1;
        entry.in_flight = true;
        Some(FetchTicket(entry.generation))
    }

    /// Store a successful result. Returns whether it was applied; a stale
    /// ticket's result is discarded.
    pub fn resolve(&mut self, key: &QueryKey, ticket: FetchTicket, value: V) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if entry.generation != ticket.0 || !entry.in_flight {
            return false;
        }

        entry.status = QueryStatus::Success(value);
        entry.stale = false;
        entry.in_flight = false;
        true
    }

    /// Store a failed result, under the same ticket rules as [`Self::resolve`].
    pub fn reject(&mut self, key: &QueryKey, ticket: FetchTicket, error: String) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if entry.generation != ticket.0 || !entry.in_flight {
            return false;
        }

        entry.status = QueryStatus::Error(error);
        entry.stale = false;
        entry.in_flight = false;
        true
    }

    /// Drop a ticket without recording a result (the view unmounted before
    /// its fetch landed). The entry stays refetchable.
    pub fn cancel(&mut self, key: &QueryKey, ticket: FetchTicket) {
        if let Some(entry) = self.entries.get_mut(key) {
            if entry.generation == ticket.0 {
                entry.in_flight = false;
                entry.stale = true;
            }
        }
    }

    /// Mark an entry stale. The previous value stays readable until a
    /// refetch lands.
    pub fn invalidate(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.stale = true;
            // A response already in flight predates the invalidation;
            // retire its ticket so the refetch starts clean.
            if entry.in_flight {
                entry.generation += 1;
                entry.in_flight = false;
            }
        }
    }

    /// Forget an entry entirely (the resource no longer exists).
    pub fn evict(&mut self, key: &QueryKey) {
        self.entries.remove(key);
    }

    /// Current status for a key, if the key has ever been begun.
    pub fn get(&self, key: &QueryKey) -> Option<&QueryStatus<V>> {
        self.entries.get(key).map(|entry| &entry.status)
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map(|e| e.stale).unwrap_or(false)
    }
}

/// Phases of the mutation protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationPhase {
    Idle,
    /// The HTTP mutation is in flight.
    Mutating,
    /// The mutation succeeded and the stale keys are being refetched.
    Invalidating,
    /// Every invalidated key has been refetched.
    Settled,
}

/// Explicit two-phase mutation protocol: run the mutation, mark a set of
/// cache keys stale, refetch them, settle.
#[derive(Debug)]
pub struct MutationFlow {
    phase: MutationPhase,
    pending_keys: Vec<QueryKey>,
}

impl MutationFlow {
    pub fn new() -> Self {
        Self {
            phase: MutationPhase::Idle,
            pending_keys: Vec::new(),
        }
    }

    pub fn phase(&self) -> &MutationPhase {
        &self.phase
    }

    /// Enter `Mutating` when the HTTP call is issued.
    pub fn start(&mut self) {
        self.phase = MutationPhase::Mutating;
        self.pending_keys.clear();
    }

    /// The mutation failed; nothing to invalidate.
    pub fn fail(&mut self) {
        self.phase = MutationPhase::Idle;
        self.pending_keys.clear();
    }

    /// The mutation resolved: mark `keys` stale in the cache and enter
    /// `Invalidating`. The caller is responsible for refetching each key
    /// and reporting back through [`Self::key_refreshed`].
    pub fn complete<V: Clone>(&mut self, cache: &mut QueryCache<V>, keys: Vec<QueryKey>) {
        for key in &keys {
            cache.invalidate(key);
        }
        self.pending_keys = keys;
        self.phase = if self.pending_keys.is_empty() {
            MutationPhase::Settled
        } else {
            MutationPhase::Invalidating
        };
    }

    /// A stale key finished refetching; settles when the last one lands.
    pub fn key_refreshed(&mut self, key: &QueryKey) {
        self.pending_keys.retain(|k| k != key);
        if self.pending_keys.is_empty() && self.phase == MutationPhase::Invalidating {
            self.phase = MutationPhase::Settled;
        }
    }
}

impl Default for MutationFlow {
    fn default() -> Self {
        Self::new()
    }
}
