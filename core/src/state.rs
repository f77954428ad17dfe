use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::*;

/// One moment of a level attempt.
///
/// Transitions never modify a state in place, they return a new one. The minefield is shared
/// between every snapshot of the same level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    level: Level,
    minefield: Arc<Minefield>,
    player_pos: Position,
    visited: HashSet<Position>,
    move_history: Vec<Position>,
    lives: u32,
    score: u32,
    move_count: u32,
    is_replay: bool,
}

impl GameState {
    /// Player on the entry cell, nothing visited beyond it.
    pub fn at_level_start(level: Level, minefield: Arc<Minefield>, score: u32, lives: u32) -> Self {
        let start = minefield.entry();
        Self {
            level,
            minefield,
            player_pos: start,
            visited: HashSet::from_iter([start]),
            move_history: vec![start],
            lives,
            score,
            move_count: 0,
            is_replay: false,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn minefield(&self) -> &Arc<Minefield> {
        &self.minefield
    }

    pub fn player_pos(&self) -> Position {
        self.player_pos
    }

    pub fn visited(&self) -> &HashSet<Position> {
        &self.visited
    }

    pub fn has_visited(&self, pos: Position) -> bool {
        self.visited.contains(&pos)
    }

    pub fn move_history(&self) -> &[Position] {
        &self.move_history
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn is_replay(&self) -> bool {
        self.is_replay
    }

    /// Moves one cell in `direction`.
    ///
    /// Leaving the playable area is a no-op that returns an identical state. Any in-bounds cell is
    /// accepted, mines included; callers check [`Self::is_on_mine`] and [`Self::is_at_exit`]
    /// afterwards.
    pub fn step(&self, direction: Direction) -> GameState {
        let next = self.player_pos.step(direction);
        if !self.minefield.contains(next) {
            return self.clone();
        }

        let mut visited = self.visited.clone();
        visited.insert(next);
        let mut move_history = Vec::with_capacity(self.move_history.len() + 1);
        move_history.extend_from_slice(&self.move_history);
        move_history.push(next);

        GameState {
            level: self.level,
            minefield: Arc::clone(&self.minefield),
            player_pos: next,
            visited,
            move_history,
            lives: self.lives,
            score: self.score,
            move_count: self.move_count + 1,
            is_replay: self.is_replay,
        }
    }

    pub fn is_on_mine(&self) -> bool {
        self.minefield.has_mine_at(self.player_pos)
    }

    pub fn is_at_exit(&self) -> bool {
        self.player_pos == self.minefield.exit()
    }

    /// Mines on the cells the player could step to next.
    pub fn nearby_mines(&self) -> u8 {
        self.minefield.adjacent_mine_count(self.player_pos)
    }

    /// Same snapshot with no lives left, for the game-over screen.
    pub(crate) fn out_of_lives(&self) -> GameState {
        GameState {
            lives: 0,
            ..self.clone()
        }
    }

    /// This attempt cut back to its first `frames` recorded positions, flagged as a replay.
    pub(crate) fn replay_prefix(&self, frames: usize) -> GameState {
        let frames = frames.clamp(1, self.move_history.len().max(1));
        let move_history: Vec<Position> = self.move_history.iter().copied().take(frames).collect();
        let player_pos = move_history.last().copied().unwrap_or(self.player_pos);

        GameState {
            level: self.level,
            minefield: Arc::clone(&self.minefield),
            player_pos,
            visited: move_history.iter().copied().collect(),
            move_history,
            lives: self.lives,
            score: self.score,
            move_count: (frames - 1) as u32,
            is_replay: true,
        }
    }
}
