//! Live projections over the record store.
//!
//! Each projection owns one background task fed by the change feed and
//! hands out `watch` receivers of immutable snapshots.

mod adoption_board;
mod animal_mirror;

pub use adoption_board::{AdoptionBoard, BoardRows};
pub use animal_mirror::{AnimalMirror, AnimalSnapshot};
