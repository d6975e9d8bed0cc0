//! # Codex Core
//!
//! The canonical entity resolution and incremental merge engine behind the
//! codex: a growing, de-duplicated knowledge base of named lore entities
//! extracted repeatedly from batches of generated narrative text.
//!
//! ## Core Components
//!
//! - **normalize**: surface forms to canonical comparison keys
//! - **resolve**: alias-aware character identity resolution
//! - **mentions**: boundary-safe mention scanning and provenance computation
//! - **merge**: per-category field reconciliation under non-overwrite rules
//! - **geo**: bounded geographic hierarchy normalization
//! - **audit**: advisory sovereignty/drift/link diagnostics
//! - **prune**: idempotent provenance re-validation
//! - **dedup**: explicitly invoked duplicate-merge correction
//! - **store**: whole-codex JSON persistence and archive loading
//!
//! ## Design Philosophy
//!
//! - **Conservative resolution**: an ambiguous surface form creates a new
//!   record; a wrong merge is worse than a missed one, and the pruning pass
//!   is the safety net.
//! - **Nothing fatal in merge flow**: malformed records are skipped,
//!   conflicts are reported, and a partially reconciled batch still commits
//!   what it safely resolved.
//! - **Single-threaded, load-mutate-store**: one batch mutates one
//!   in-memory codex; concurrent runs are serialized by the caller.

pub mod audit;
pub mod config;
pub mod dedup;
pub mod engine;
pub mod geo;
pub mod mentions;
pub mod merge;
pub mod normalize;
pub mod prune;
pub mod resolve;
pub mod store;

pub use audit::*;
pub use config::*;
pub use dedup::*;
pub use engine::*;
pub use geo::*;
pub use mentions::*;
pub use merge::*;
pub use normalize::*;
pub use prune::*;
pub use resolve::*;
pub use store::*;
