//! Collaborator interfaces provided by the embedding application.
//!
//! The core never touches storage, speech, or markup directly; page glue
//! implements these traits and wires them to the components.

use crate::game::MatchingGame;
use crate::list_view::PaginationModel;

/// Storage key under which the card browser persists the activated topic,
/// read back by the table and game pages.
pub const SELECTED_TOPIC_KEY: &str = "selected-topic";

/// Key-value storage surviving page transitions (browser local storage).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Fire-and-forget pronunciation playback.
pub trait SpeechService {
    fn speak(&self, text: &str, locale: &str);
}

/// Markup layer. Implementations must escape all record-derived text with
/// [`crate::sanitize`] before insertion.
pub trait Renderer<R> {
    fn render_list(&mut self, items: &[&R], pagination: &PaginationModel);
    fn render_game(&mut self, game: &MatchingGame);
}
