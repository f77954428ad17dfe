use serde::{Deserialize, Serialize};

use crate::*;

/// Playback cursor over a recorded move history.
///
/// `current_frame` never exceeds `total_frames`; equality means playback has finished.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayState {
    current_frame: usize,
    total_frames: usize,
    speed_multiplier: f32,
}

impl ReplayState {
    pub fn new(total_frames: usize, speed_multiplier: f32) -> Self {
        Self {
            current_frame: 0,
            total_frames,
            speed_multiplier,
        }
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn is_complete(&self) -> bool {
        self.current_frame >= self.total_frames
    }

    /// One frame forward, clamped at the end.
    pub fn advance(self) -> Self {
        Self {
            current_frame: (self.current_frame + 1).min(self.total_frames),
            ..self
        }
    }

    pub fn skip_to_end(self) -> Self {
        Self {
            current_frame: self.total_frames,
            ..self
        }
    }

    /// History index shown at the current frame; the final frame keeps showing the last entry.
    pub fn history_index(&self) -> Option<usize> {
        if self.total_frames == 0 {
            None
        } else {
            Some(self.current_frame.min(self.total_frames - 1))
        }
    }
}

/// A terminal attempt captured for playback.
#[derive(Clone, Debug, PartialEq)]
pub struct Replay {
    captured: GameState,
    cursor: ReplayState,
}

impl Replay {
    /// Snapshots the full history of `captured`, terminal move included.
    pub fn capture(captured: GameState, speed_multiplier: f32) -> Self {
        let cursor = ReplayState::new(captured.move_history().len(), speed_multiplier);
        Self { captured, cursor }
    }

    pub fn captured(&self) -> &GameState {
        &self.captured
    }

    pub fn cursor(&self) -> ReplayState {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.cursor.is_complete()
    }

    pub fn advance(&self) -> Self {
        Self {
            captured: self.captured.clone(),
            cursor: self.cursor.advance(),
        }
    }

    pub fn skip_to_end(&self) -> Self {
        Self {
            captured: self.captured.clone(),
            cursor: self.cursor.skip_to_end(),
        }
    }

    pub fn position(&self) -> Option<Position> {
        self.cursor
            .history_index()
            .map(|index| self.captured.move_history()[index])
    }

    /// State a renderer should draw for the current frame.
    pub fn projection(&self) -> GameState {
        let shown = self.cursor.history_index().map_or(1, |index| index + 1);
        self.captured.replay_prefix(shown)
    }
}
