use bitflags::bitflags;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Playing,
    Replay,
    Waiting,
    GameOver,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Playing
    }
}

bitflags! {
    /// Sound cues raised by a tick, for the audio collaborator to play.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Cues: u8 {
        const STEP = 1 << 0;
        const MINE_EXPLOSION = 1 << 1;
        const LEVEL_COMPLETE = 1 << 2;
        const LIFE_LOST = 1 << 3;
        const GAME_OVER = 1 << 4;
    }
}

/// Everything the input collaborator reports for one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickInput {
    pub direction: Option<Direction>,
    pub key_pressed: bool,
    pub restart: bool,
    pub dt: Duration,
}

impl TickInput {
    pub fn idle(dt: Duration) -> Self {
        Self {
            dt,
            ..Default::default()
        }
    }

    pub fn moving(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            key_pressed: true,
            ..Default::default()
        }
    }

    pub fn key() -> Self {
        Self {
            key_pressed: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }
}

/// The authoritative mode and game state of a run, advanced one tick at a time.
#[derive(Debug)]
pub struct Session<G> {
    generator: G,
    mode: Mode,
    state: GameState,
    replay: Option<Replay>,
    waited: Duration,
    final_score: Option<u32>,
}

impl<G: MinefieldGenerator> Session<G> {
    pub fn new(mut generator: G) -> Result<Self> {
        let state = new_game(&mut generator)?;
        Ok(Self {
            generator,
            mode: Mode::Playing,
            state,
            replay: None,
            waited: Duration::ZERO,
            final_score: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn replay(&self) -> Option<&Replay> {
        self.replay.as_ref()
    }

    pub fn replay_state(&self) -> Option<ReplayState> {
        self.replay.as_ref().map(Replay::cursor)
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn config(&self) -> &GameConfig {
        self.generator.config()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// The replay frame while in REPLAY or WAITING, the live state otherwise.
    pub fn render_state(&self) -> GameState {
        match (&self.replay, self.mode) {
            (Some(replay), Mode::Replay | Mode::Waiting) => replay.projection(),
            _ => self.state.clone(),
        }
    }

    /// Runs one frame.
    ///
    /// Only generation failures are errors; blocked moves, deaths and game over are ordinary
    /// transitions.
    pub fn tick(&mut self, input: TickInput) -> Result<Cues> {
        match self.mode {
            Mode::Playing => Ok(self.tick_playing(input)),
            Mode::Replay => Ok(self.tick_replay(input)),
            Mode::Waiting => self.tick_waiting(input),
            Mode::GameOver => {
                if input.restart {
                    self.restart()?;
                }
                Ok(Cues::empty())
            }
        }
    }

    /// Throws away the whole run and starts over on level 1.
    pub fn restart(&mut self) -> Result<()> {
        let state = new_game(&mut self.generator)?;
        log::info!("Restarting run");
        self.state = state;
        self.mode = Mode::Playing;
        self.replay = None;
        self.waited = Duration::ZERO;
        self.final_score = None;
        Ok(())
    }

    fn tick_playing(&mut self, input: TickInput) -> Cues {
        let Some(direction) = input.direction else {
            return Cues::empty();
        };

        let next = self.state.step(direction);
        if next.move_count() == self.state.move_count() {
            return Cues::empty();
        }
        self.state = next;

        let mut cues = Cues::STEP;
        if self.state.is_on_mine() {
            log::debug!("Stepped on a mine at {:?}", self.state.player_pos());
            cues |= Cues::MINE_EXPLOSION;
        } else if self.state.is_at_exit() {
            log::debug!("Reached the exit after {} moves", self.state.move_count());
            cues |= Cues::LEVEL_COMPLETE;
        } else {
            return cues;
        }

        let speed = self.generator.config().replay_speed_multiplier;
        self.replay = Some(Replay::capture(self.state.clone(), speed));
        self.mode = Mode::Replay;
        cues
    }

    fn tick_replay(&mut self, input: TickInput) -> Cues {
        let Some(replay) = &self.replay else {
            self.mode = Mode::Playing;
            return Cues::empty();
        };

        let replay = if input.key_pressed {
            replay.skip_to_end()
        } else {
            replay.advance()
        };
        if replay.is_complete() {
            self.mode = Mode::Waiting;
            self.waited = Duration::ZERO;
        }
        self.replay = Some(replay);
        Cues::empty()
    }

    fn tick_waiting(&mut self, input: TickInput) -> Result<Cues> {
        self.waited += input.dt;
        if !input.key_pressed && self.waited < self.generator.config().waiting_timeout {
            return Ok(Cues::empty());
        }

        let Some(replay) = &self.replay else {
            self.mode = Mode::Playing;
            return Ok(Cues::empty());
        };
        let captured = replay.captured().clone();

        // the replay stays until the next state exists, so a failed generation fails again
        let (state, mode, cues) = if captured.is_on_mine() {
            match handle_death(&mut self.generator, &captured)? {
                Some(state) => (state, Mode::Playing, Cues::LIFE_LOST),
                None => {
                    self.final_score = Some(captured.score());
                    (
                        captured.out_of_lives(),
                        Mode::GameOver,
                        Cues::LIFE_LOST | Cues::GAME_OVER,
                    )
                }
            }
        } else if captured.is_at_exit() {
            let state = handle_level_complete(&mut self.generator, &captured)?;
            (state, Mode::Playing, Cues::empty())
        } else {
            (captured, Mode::Playing, Cues::empty())
        };

        self.state = state;
        self.mode = mode;
        self.replay = None;
        Ok(cues)
    }
}
