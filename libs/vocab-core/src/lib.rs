//! Core library for the vocabulary learning site.
//!
//! Provides:
//! - JSON dataset loader with per-record validation
//! - Filtered, paginated list view shared by the card and table browsers
//! - Matching-pairs memory game state machine with a lives counter
//! - Escaping helpers and the collaborator traits the page glue implements

pub mod error;
pub mod external;
pub mod game;
pub mod list_view;
pub mod loader;
pub mod sanitize;
pub mod types;

pub use error::{LoadError, Result};
pub use external::{KeyValueStore, Renderer, SpeechService, SELECTED_TOPIC_KEY};
pub use game::{
    ClearTask, Column, MatchingGame, Phase, SelectOutcome, Tile, TileState, DEFAULT_PAIR_COUNT,
    MISMATCH_DISPLAY, STARTING_LIVES,
};
pub use list_view::{ListView, PaginationModel, ALL_CATEGORIES};
pub use loader::parse_records;
pub use types::{CardRecord, EntryRecord, PairRecord, ViewRecord, LOCKED_CATEGORIES};
