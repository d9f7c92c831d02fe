#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Client-side state for the sauti reporting flows.
//!
//! Each store is an explicit state container mutated only through named
//! transition methods — no field is written from outside. Fetch results
//! carry monotonic sequence numbers so that a stale response (one
//! superseded by a later-issued request against the same logical query)
//! is discarded instead of clobbering newer state.
//!
//! Execution is single-threaded and cooperative: stores are plain
//! structs driven from one task (wrap in a mutex if tasks must share
//! one). [`debounce::Debouncer`] is the one scheduling primitive:
//! a cancellable fire-once timer used for search input.

pub mod admin;
pub mod debounce;
pub mod draft;
pub mod records;

pub use admin::{AdminStore, LoadSeq, StatusCounts, allowed_transitions};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use draft::{DraftForm, LocationUpdate};
pub use records::{FetchPhase, FetchSeq, RecordsStore};
