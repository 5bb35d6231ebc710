//! Matching-pairs memory game state machine.
//!
//! The game samples a handful of records, shows their prompts and answers in
//! two independently shuffled columns, and lets the player pair them up. A
//! wrong pairing costs a life; running out of lives ends the game.
//!
//! All transitions run to completion on the caller's thread. The only
//! deferred work is the mismatch flash: a wrong pairing leaves both tiles in
//! [`TileState::Mismatched`] and hands the caller a [`ClearTask`] to run
//! back after [`MISMATCH_DISPLAY`]. Tasks are tagged with the game epoch, so
//! a task scheduled before a restart can never touch the rebuilt board.

use crate::types::PairRecord;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::time::Duration;

/// Number of pairs dealt per game, unless the source has fewer records.
pub const DEFAULT_PAIR_COUNT: usize = 10;

/// Lives at the start of a game.
pub const STARTING_LIVES: u8 = 3;

/// How long mismatched tiles stay flashed before the caller runs the
/// [`ClearTask`].
pub const MISMATCH_DISPLAY: Duration = Duration::from_millis(1000);

/// The two tile columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Prompt,
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileState {
    Unselected,
    Selected,
    /// Flashed wrong, waiting for the deferred clear.
    Mismatched,
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Playing,
    GameOver,
}

/// One clickable unit in either column.
#[derive(Debug, Clone, Serialize)]
pub struct Tile {
    pub label: String,
    /// Pairing key: the prompt and answer tile with the same index match.
    pub pair_index: usize,
    pub state: TileState,
}

/// Deferred mismatch-clear action, tagged with the epoch it was issued in.
/// The caller schedules it after [`MISMATCH_DISPLAY`] and feeds it back via
/// [`MatchingGame::clear_mismatch`]; a stale task is discarded there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearTask {
    epoch: u64,
    prompt_slot: usize,
    answer_slot: usize,
}

/// What a [`MatchingGame::select_tile`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The call was a guarded no-op (game over, matched tile, bad slot).
    Ignored,
    Selected,
    /// Re-clicking the pending tile in its column toggles it off.
    Deselected,
    Matched,
    /// Wrong pairing; schedule the task after [`MISMATCH_DISPLAY`].
    Mismatched(ClearTask),
}

#[derive(Debug)]
pub struct MatchingGame {
    pairs: Vec<(String, String)>,
    prompts: Vec<Tile>,
    answers: Vec<Tile>,
    selected_prompt: Option<usize>,
    selected_answer: Option<usize>,
    lives: u8,
    phase: Phase,
    epoch: u64,
}

impl MatchingGame {
    /// Start a game by sampling `min(pair_count, records.len())` records
    /// without replacement and dealing both columns shuffled.
    pub fn start<R: PairRecord>(records: &[R], pair_count: usize, rng: &mut SmallRng) -> Self {
        let pairs = records
            .choose_multiple(rng, pair_count.min(records.len()))
            .map(|r| (r.prompt().to_string(), r.answer().to_string()))
            .collect();

        let mut game = Self {
            pairs,
            prompts: Vec::new(),
            answers: Vec::new(),
            selected_prompt: None,
            selected_answer: None,
            lives: STARTING_LIVES,
            phase: Phase::Playing,
            epoch: 0,
        };
        game.deal(rng);
        game
    }

    /// Rebuild both columns from the sampled pairs. Invalidates any pending
    /// ClearTask by advancing the epoch.
    fn deal(&mut self, rng: &mut SmallRng) {
        self.prompts = self
            .pairs
            .iter()
            .enumerate()
            .map(|(i, (prompt, _))| Tile {
                label: prompt.clone(),
                pair_index: i,
                state: TileState::Unselected,
            })
            .collect();
        self.answers = self
            .pairs
            .iter()
            .enumerate()
            .map(|(i, (_, answer))| Tile {
                label: answer.clone(),
                pair_index: i,
                state: TileState::Unselected,
            })
            .collect();
        self.prompts.shuffle(rng);
        self.answers.shuffle(rng);
        self.selected_prompt = None;
        self.selected_answer = None;
        self.epoch += 1;
    }

    pub fn prompt_tiles(&self) -> &[Tile] {
        &self.prompts
    }

    pub fn answer_tiles(&self) -> &[Tile] {
        &self.answers
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Select the tile at `slot` in `column`.
    ///
    /// No-op after game over and on matched tiles. Re-clicking the pending
    /// tile in a column deselects it; clicking a different tile in the same
    /// column moves the selection. Once both columns hold a selection the
    /// pairing is evaluated immediately.
    pub fn select_tile(&mut self, column: Column, slot: usize) -> SelectOutcome {
        if self.phase != Phase::Playing {
            return SelectOutcome::Ignored;
        }
        let tiles = self.column(column);
        match tiles.get(slot) {
            None => return SelectOutcome::Ignored,
            Some(tile) if tile.state == TileState::Matched => return SelectOutcome::Ignored,
            Some(_) => {}
        }

        let pending = self.selected_slot(column);
        if pending == Some(slot) {
            self.column_mut(column)[slot].state = TileState::Unselected;
            self.set_selected(column, None);
            return SelectOutcome::Deselected;
        }
        if let Some(prev) = pending {
            self.column_mut(column)[prev].state = TileState::Unselected;
        }
        self.column_mut(column)[slot].state = TileState::Selected;
        self.set_selected(column, Some(slot));

        match (self.selected_prompt, self.selected_answer) {
            (Some(prompt_slot), Some(answer_slot)) => self.evaluate(prompt_slot, answer_slot),
            _ => SelectOutcome::Selected,
        }
    }

    fn evaluate(&mut self, prompt_slot: usize, answer_slot: usize) -> SelectOutcome {
        self.selected_prompt = None;
        self.selected_answer = None;

        if self.prompts[prompt_slot].pair_index == self.answers[answer_slot].pair_index {
            self.prompts[prompt_slot].state = TileState::Matched;
            self.answers[answer_slot].state = TileState::Matched;
            return SelectOutcome::Matched;
        }

        self.prompts[prompt_slot].state = TileState::Mismatched;
        self.answers[answer_slot].state = TileState::Mismatched;
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = Phase::GameOver;
        }
        // The task is issued even on game over so the flash still resolves.
        SelectOutcome::Mismatched(ClearTask {
            epoch: self.epoch,
            prompt_slot,
            answer_slot,
        })
    }

    /// Run a deferred mismatch clear. A task from a previous epoch is
    /// discarded; tiles re-selected or rebuilt since the mismatch are left
    /// alone.
    pub fn clear_mismatch(&mut self, task: ClearTask) {
        if task.epoch != self.epoch {
            return;
        }
        if let Some(tile) = self.prompts.get_mut(task.prompt_slot) {
            if tile.state == TileState::Mismatched {
                tile.state = TileState::Unselected;
            }
        }
        if let Some(tile) = self.answers.get_mut(task.answer_slot) {
            if tile.state == TileState::Mismatched {
                tile.state = TileState::Unselected;
            }
        }
    }

    /// Start over after losing: same pairs, fresh shuffle, full lives.
    /// No-op unless the game is over.
    pub fn restart(&mut self, rng: &mut SmallRng) {
        if self.phase != Phase::GameOver {
            return;
        }
        self.lives = STARTING_LIVES;
        self.phase = Phase::Playing;
        self.deal(rng);
    }

    /// Reshuffle mid-game without touching lives. No-op after game over;
    /// the player has to go through `restart`.
    pub fn reset(&mut self, rng: &mut SmallRng) {
        if self.phase != Phase::Playing {
            return;
        }
        self.deal(rng);
    }

    fn column(&self, column: Column) -> &[Tile] {
        match column {
            Column::Prompt => &self.prompts,
            Column::Answer => &self.answers,
        }
    }

    fn column_mut(&mut self, column: Column) -> &mut Vec<Tile> {
        match column {
            Column::Prompt => &mut self.prompts,
            Column::Answer => &mut self.answers,
        }
    }

    fn selected_slot(&self, column: Column) -> Option<usize> {
        match column {
            Column::Prompt => self.selected_prompt,
            Column::Answer => self.selected_answer,
        }
    }

    fn set_selected(&mut self, column: Column, slot: Option<usize>) {
        match column {
            Column::Prompt => self.selected_prompt = slot,
            Column::Answer => self.selected_answer = slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryRecord;
    use rand::SeedableRng;

    fn entries(n: usize) -> Vec<EntryRecord> {
        (0..n)
            .map(|i| EntryRecord {
                letter: format!("L{i}"),
                sound: format!("S{i}"),
                pronunciation: format!("/p{i}/"),
            })
            .collect()
    }

    fn game(pairs: usize) -> MatchingGame {
        let mut rng = SmallRng::seed_from_u64(42);
        MatchingGame::start(&entries(pairs), pairs, &mut rng)
    }

    /// Display slot of the tile carrying a given pairing index.
    fn slot_of(tiles: &[Tile], pair_index: usize) -> usize {
        tiles.iter().position(|t| t.pair_index == pair_index).unwrap()
    }

    fn select_pair(game: &mut MatchingGame, prompt_pair: usize, answer_pair: usize) -> SelectOutcome {
        let p = slot_of(game.prompt_tiles(), prompt_pair);
        game.select_tile(Column::Prompt, p);
        let a = slot_of(game.answer_tiles(), answer_pair);
        game.select_tile(Column::Answer, a)
    }

    #[test]
    fn sampling_is_bounded_by_source_size() {
        let mut rng = SmallRng::seed_from_u64(7);
        let game = MatchingGame::start(&entries(4), DEFAULT_PAIR_COUNT, &mut rng);
        assert_eq!(game.pair_count(), 4);
        assert_eq!(game.prompt_tiles().len(), 4);
        assert_eq!(game.answer_tiles().len(), 4);
    }

    #[test]
    fn correct_pairing_matches_without_losing_a_life() {
        let mut game = game(4);
        let outcome = select_pair(&mut game, 2, 2);
        assert_eq!(outcome, SelectOutcome::Matched);
        assert_eq!(game.lives(), STARTING_LIVES);

        let p = slot_of(game.prompt_tiles(), 2);
        let a = slot_of(game.answer_tiles(), 2);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Matched);
        assert_eq!(game.answer_tiles()[a].state, TileState::Matched);
    }

    #[test]
    fn wrong_pairing_costs_a_life_and_clears_after_the_flash() {
        let mut game = game(4);
        let outcome = select_pair(&mut game, 0, 1);
        let SelectOutcome::Mismatched(task) = outcome else {
            panic!("expected mismatch, got {outcome:?}");
        };
        assert_eq!(game.lives(), 2);

        let p = slot_of(game.prompt_tiles(), 0);
        let a = slot_of(game.answer_tiles(), 1);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Mismatched);
        assert_eq!(game.answer_tiles()[a].state, TileState::Mismatched);

        game.clear_mismatch(task);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Unselected);
        assert_eq!(game.answer_tiles()[a].state, TileState::Unselected);
    }

    #[test]
    fn reclicking_the_pending_tile_deselects_it() {
        let mut game = game(4);
        let p = slot_of(game.prompt_tiles(), 0);
        assert_eq!(game.select_tile(Column::Prompt, p), SelectOutcome::Selected);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Selected);

        assert_eq!(game.select_tile(Column::Prompt, p), SelectOutcome::Deselected);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Unselected);
    }

    #[test]
    fn clicking_another_tile_in_the_column_moves_the_selection() {
        let mut game = game(4);
        let first = slot_of(game.prompt_tiles(), 0);
        let second = slot_of(game.prompt_tiles(), 1);
        game.select_tile(Column::Prompt, first);
        assert_eq!(game.select_tile(Column::Prompt, second), SelectOutcome::Selected);
        assert_eq!(game.prompt_tiles()[first].state, TileState::Unselected);
        assert_eq!(game.prompt_tiles()[second].state, TileState::Selected);
    }

    #[test]
    fn matched_tiles_cannot_be_reselected() {
        let mut game = game(4);
        select_pair(&mut game, 3, 3);
        let p = slot_of(game.prompt_tiles(), 3);
        assert_eq!(game.select_tile(Column::Prompt, p), SelectOutcome::Ignored);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Matched);
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut game = game(2);
        assert_eq!(game.select_tile(Column::Answer, 99), SelectOutcome::Ignored);
    }

    #[test]
    fn three_mismatches_end_the_game() {
        let mut game = game(4);
        select_pair(&mut game, 0, 1);
        select_pair(&mut game, 0, 2);
        assert_eq!(game.phase(), Phase::Playing);

        select_pair(&mut game, 0, 3);
        assert_eq!(game.lives(), 0);
        assert_eq!(game.phase(), Phase::GameOver);

        // Frozen: further selects change nothing.
        let p = slot_of(game.prompt_tiles(), 1);
        assert_eq!(game.select_tile(Column::Prompt, p), SelectOutcome::Ignored);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Unselected);
    }

    #[test]
    fn restart_only_works_from_game_over() {
        let mut game = game(4);
        let mut rng = SmallRng::seed_from_u64(1);

        select_pair(&mut game, 0, 1);
        game.restart(&mut rng);
        assert_eq!(game.lives(), 2); // still playing, restart was a no-op

        select_pair(&mut game, 0, 2);
        select_pair(&mut game, 0, 3);
        assert_eq!(game.phase(), Phase::GameOver);

        game.restart(&mut rng);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.lives(), STARTING_LIVES);
        assert!(game
            .prompt_tiles()
            .iter()
            .all(|t| t.state == TileState::Unselected));
    }

    #[test]
    fn reset_reshuffles_but_keeps_lives() {
        let mut game = game(4);
        let mut rng = SmallRng::seed_from_u64(1);

        select_pair(&mut game, 0, 1);
        select_pair(&mut game, 2, 2);
        assert_eq!(game.lives(), 2);

        game.reset(&mut rng);
        assert_eq!(game.lives(), 2);
        assert_eq!(game.phase(), Phase::Playing);
        assert!(game
            .prompt_tiles()
            .iter()
            .chain(game.answer_tiles())
            .all(|t| t.state == TileState::Unselected));
    }

    #[test]
    fn stale_clear_task_is_discarded_after_rebuild() {
        let mut game = game(4);
        let mut rng = SmallRng::seed_from_u64(9);

        let SelectOutcome::Mismatched(stale) = select_pair(&mut game, 0, 1) else {
            panic!("expected mismatch");
        };
        game.reset(&mut rng);

        // Fresh mismatch on the rebuilt board, then the stale task fires.
        let SelectOutcome::Mismatched(fresh) = select_pair(&mut game, 0, 1) else {
            panic!("expected mismatch");
        };
        game.clear_mismatch(stale);

        let p = slot_of(game.prompt_tiles(), 0);
        let a = slot_of(game.answer_tiles(), 1);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Mismatched);
        assert_eq!(game.answer_tiles()[a].state, TileState::Mismatched);

        game.clear_mismatch(fresh);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Unselected);
        assert_eq!(game.answer_tiles()[a].state, TileState::Unselected);
    }

    #[test]
    fn clear_task_leaves_reselected_tiles_alone() {
        let mut game = game(4);
        let SelectOutcome::Mismatched(task) = select_pair(&mut game, 0, 1) else {
            panic!("expected mismatch");
        };

        // Player clicks the flashed prompt again before the flash resolves.
        let p = slot_of(game.prompt_tiles(), 0);
        game.select_tile(Column::Prompt, p);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Selected);

        game.clear_mismatch(task);
        assert_eq!(game.prompt_tiles()[p].state, TileState::Selected);
        let a = slot_of(game.answer_tiles(), 1);
        assert_eq!(game.answer_tiles()[a].state, TileState::Unselected);
    }

    #[test]
    fn columns_are_shuffled_independently_of_pair_order() {
        let mut rng = SmallRng::seed_from_u64(3);
        let game = MatchingGame::start(&entries(10), DEFAULT_PAIR_COUNT, &mut rng);

        // Every pairing index appears exactly once per column.
        let mut prompt_indices: Vec<usize> =
            game.prompt_tiles().iter().map(|t| t.pair_index).collect();
        prompt_indices.sort_unstable();
        assert_eq!(prompt_indices, (0..10).collect::<Vec<_>>());

        let mut answer_indices: Vec<usize> =
            game.answer_tiles().iter().map(|t| t.pair_index).collect();
        answer_indices.sort_unstable();
        assert_eq!(answer_indices, (0..10).collect::<Vec<_>>());

        // Labels stay attached to their pairing index.
        for tile in game.prompt_tiles() {
            assert_eq!(tile.label, format!("L{}", tile.pair_index));
        }
        for tile in game.answer_tiles() {
            assert_eq!(tile.label, format!("S{}", tile.pair_index));
        }
    }
}
