//! blotto: a round-robin Colonel Blotto tournament scorer built on a
//! separately-chained associative map.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the algorithmic core (the map) small and independently
//!   verifiable, with the tournament logic layered on top as a plain
//!   consumer.
//! - Layers:
//!   - ChainMap<K, V, S>: separately-chained hash table whose entries live
//!     in a generational arena; chains are arena keys, so unlinking can
//!     never dangle. Doubling growth at load factor 1.0, mod-capacity
//!     bucket indexing, LIFO chains.
//!   - Roster: player ids mapped to fixed-length distribution vectors,
//!     parsed from a blank-line-terminated stream.
//!   - Tournament/Standings: battlefield-by-battlefield scoring over a
//!     matchup list, accumulated per player and ranked by win-rate or
//!     average score.
//!
//! Constraints
//! - Single-threaded: exclusive mutation is enforced by `&mut self`; the
//!   map has no internal locking and needs none.
//! - The map owns bucket storage, entry nodes, and the key copies it makes
//!   on first insertion. Values are moved in and moved back out on removal,
//!   never cloned.
//! - Each entry stores a precomputed `u64` hash and indexing always uses
//!   the stored hash; `K: Hash` is never invoked after insertion, so growth
//!   is a pure relink.
//! - Growth happens entirely inside one `put`; no partial-resize state is
//!   observable and capacity never decreases.
//!
//! Error handling
//! - The map never errors: absence is `None`/`false`, replacement returns
//!   the old value, and the map never logs or aborts.
//! - Everything the tournament layer can get wrong (duplicate players,
//!   malformed files, unknown ids, bad weights) is a `BlottoError`; the
//!   binary reports it on stderr and exits non-zero.
//!
//! Notes and non-goals
//! - No concurrent access; callers needing it must serialize externally.
//! - No iteration-order guarantee beyond "every key exactly once".
//! - No persistence; a tournament is scored in one pass.

pub mod chain_map;
mod chain_map_proptest;
mod error;
pub mod roster;
pub mod scoring;

// Public surface
pub use chain_map::ChainMap;
pub use error::BlottoError;
pub use roster::{Roster, MAX_ID_LEN};
pub use scoring::{
    parse_matchups, score_battlefields, Matchup, Mode, Ranking, Standing, Standings, Tournament,
};
