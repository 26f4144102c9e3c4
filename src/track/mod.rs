//! Track parameters and track file loading

mod data;
pub mod loader;

pub use data::{
    period_count_from, RepaymentMethod, TrackParams, DEFAULT_ANNUAL_INDEX_RATE, MAX_PERIOD_COUNT,
};
pub use loader::{load_tracks, load_tracks_auto, load_tracks_from_reader, load_tracks_json};
