//! Level lifecycle: starting a level, dying, and completing one.

use alloc::sync::Arc;

use crate::*;

/// Level 1 with no score and the configured lives.
pub fn new_game<G: MinefieldGenerator + ?Sized>(generator: &mut G) -> Result<GameState> {
    let lives = generator.config().initial_lives;
    start_level(generator, 1, 0, lives)
}

/// Builds a solvable minefield for `level` and puts the player on its entry cell.
///
/// `score` and `lives` carry over unchanged.
pub fn start_level<G: MinefieldGenerator + ?Sized>(
    generator: &mut G,
    level: Level,
    score: u32,
    lives: u32,
) -> Result<GameState> {
    let minefield = generator.generate_solvable(level)?;
    log::info!(
        "Starting level {} ({:?}) with {} mines, score {}, lives {}",
        level,
        LevelTheme::for_level(level),
        minefield.mine_count(),
        score,
        lives
    );
    Ok(GameState::at_level_start(level, Arc::new(minefield), score, lives))
}

/// Costs one life and restarts the same level on a fresh minefield.
///
/// Returns `Ok(None)` when no lives remain and the run is over.
pub fn handle_death<G: MinefieldGenerator + ?Sized>(
    generator: &mut G,
    state: &GameState,
) -> Result<Option<GameState>> {
    let lives = state.lives().saturating_sub(1);
    if lives == 0 {
        log::info!("Out of lives on level {}, final score {}", state.level(), state.score());
        return Ok(None);
    }

    let score = generator.config().scoring.apply_death_penalty(state.score());
    log::info!(
        "Died on level {}, {} lives left, score {} -> {}",
        state.level(),
        lives,
        state.score(),
        score
    );
    start_level(generator, state.level(), score, lives).map(Some)
}

/// Scores the finished level against its shortest path and starts the next one.
pub fn handle_level_complete<G: MinefieldGenerator + ?Sized>(
    generator: &mut G,
    state: &GameState,
) -> Result<GameState> {
    let minefield = state.minefield();
    let optimal_moves = shortest_distance(minefield.entry(), minefield.exit(), minefield)
        .unwrap_or(state.move_count());

    let level_score =
        generator
            .config()
            .scoring
            .level_score(state.level(), state.move_count(), optimal_moves);
    let score = state.score().saturating_add(level_score);
    log::info!(
        "Level {} complete in {} moves (optimal {}), +{} points",
        state.level(),
        state.move_count(),
        optimal_moves,
        level_score
    );

    start_level(generator, state.level() + 1, score, state.lives())
}
