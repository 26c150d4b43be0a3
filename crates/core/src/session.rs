//! Session driver - timing, scoring, levels, bubbles and high scores around an [`Engine`]
//!
//! The engine only knows about cells and pieces. A [`GameSession`] adds everything a
//! playable game needs on top of it:
//!
//! - a phase machine (`Ready` → `Running` ⇄ `Paused` → `GameOver`)
//! - a gravity accumulator fed by [`GameSession::tick`]
//! - line-clear scoring and level progression (see [`crate::scoring`])
//! - the bubble mini-game (see [`crate::bubbles`])
//! - the high-score ledger, updated exactly once per finished run
//!
//! # Example
//!
//! ```
//! use gioco_core::{EngineConfig, GameSession, HighScoreLedger, Phase};
//! use gioco_types::GameAction;
//!
//! let mut session = GameSession::new(EngineConfig::seeded(3), HighScoreLedger::new()).unwrap();
//! assert_eq!(session.phase(), Phase::Ready);
//!
//! session.apply_action(GameAction::Start);
//! session.apply_action(GameAction::SoftDrop);
//! assert_eq!(session.score(), 1);
//!
//! // One second at level 1 is exactly one gravity step.
//! for _ in 0..62 {
//!     assert!(!session.tick(16));
//! }
//! assert!(session.tick(16));
//! ```

use std::cell::Cell as Flag;
use std::rc::Rc;

use chrono::Local;
use log::{debug, info};

use crate::bubbles::{BubbleField, BubbleReward};
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::ConfigError;
use crate::highscores::{HighScoreEntry, HighScoreLedger};
use crate::scoring::{drop_interval_ms, line_clear_score, LevelProgress};
use crate::snapshot::SessionSnapshot;
use crate::types::{
    GameAction, PieceKind, BUBBLE_SCORE_THRESHOLD, GRID_CLEAR_BONUS, SCORE_SOFT_DROP,
};

/// Upper bound on gravity steps replayed by a single `tick`.
pub const MAX_STEPS_PER_TICK: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the first start.
    Ready,
    Running,
    Paused,
    /// The run ended; only restart leaves this phase.
    GameOver,
}

#[derive(Debug)]
pub struct GameSession {
    engine: Engine,
    phase: Phase,
    score: u32,
    progress: LevelProgress,
    elapsed_ms: u64,
    drop_timer_ms: u32,
    bubbles: BubbleField,
    high_scores: HighScoreLedger,
    /// Set by the engine's game-over handler.
    ended: Rc<Flag<bool>>,
    /// Whether the current run is already in the ledger.
    recorded: bool,
    message: Option<String>,
}

impl GameSession {
    /// Build a session around a fresh engine. The first piece is already spawned.
    pub fn new(config: EngineConfig, high_scores: HighScoreLedger) -> Result<Self, ConfigError> {
        let mut engine = Engine::new(config)?;
        let ended = Rc::new(Flag::new(false));
        let flag = Rc::clone(&ended);
        engine.on_game_over(move || flag.set(true));

        Ok(Self {
            engine,
            phase: Phase::Ready,
            score: 0,
            progress: LevelProgress::new(),
            elapsed_ms: 0,
            drop_timer_ms: 0,
            bubbles: BubbleField::new(),
            high_scores,
            ended,
            recorded: false,
            message: None,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable engine access for scripted setups.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn lines(&self) -> u32 {
        self.progress.total_lines()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn bubbles(&self) -> &BubbleField {
        &self.bubbles
    }

    pub fn high_scores(&self) -> &HighScoreLedger {
        &self.high_scores
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.progress.level())
    }

    /// Ready or Paused → Running.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Ready | Phase::Paused => {
                self.phase = Phase::Running;
                self.message = None;
                true
            }
            Phase::Running | Phase::GameOver => false,
        }
    }

    /// Running → Paused.
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Paused;
        true
    }

    /// Advance the clock, the bubbles and gravity by `elapsed_ms`.
    ///
    /// Returns `true` if at least one gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.elapsed_ms += u64::from(elapsed_ms);
        self.bubbles.advance(1);

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        let mut steps = 0;
        while self.phase == Phase::Running && self.drop_timer_ms >= self.drop_interval_ms() {
            if steps == MAX_STEPS_PER_TICK {
                // Drop the backlog after a stall instead of replaying it.
                self.drop_timer_ms = 0;
                break;
            }
            self.drop_timer_ms -= self.drop_interval_ms();
            self.gravity_step();
            steps += 1;
        }
        steps > 0
    }

    /// Apply one input action. Returns `true` if it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => return self.start(),
            GameAction::Pause => {
                return match self.phase {
                    Phase::Running => self.pause(),
                    Phase::Paused => self.start(),
                    Phase::Ready | Phase::GameOver => false,
                }
            }
            GameAction::Restart => {
                self.restart();
                return true;
            }
            _ => {}
        }

        if self.phase != Phase::Running {
            return false;
        }

        let changed = match action {
            GameAction::MoveLeft => self.engine.attempt_move(-1, 0),
            GameAction::MoveRight => self.engine.attempt_move(1, 0),
            GameAction::SoftDrop => {
                self.score = self.score.saturating_add(SCORE_SOFT_DROP);
                self.engine.attempt_move(0, 1);
                true
            }
            GameAction::Rotate => self.engine.rotate(),
            GameAction::PopBubble(n) => self.pop_bubble(n),
            GameAction::Start | GameAction::Pause | GameAction::Restart => false,
        };

        self.check_game_over();
        changed
    }

    /// Pop the `number`-th bubble (1-based, oldest first) and apply its reward.
    pub fn pop_bubble(&mut self, number: u8) -> bool {
        if self.phase != Phase::Running || number == 0 {
            return false;
        }
        let slot = usize::from(number - 1);
        let Some(reward) = self.bubbles.pop(slot, self.engine.rng_mut()) else {
            return false;
        };
        self.apply_reward(reward);
        true
    }

    fn apply_reward(&mut self, reward: BubbleReward) {
        let message = match reward {
            BubbleReward::Points(points) => {
                self.score = self.score.saturating_add(points);
                format!("+{points} points")
            }
            BubbleReward::Penalty(points) => {
                self.score = self.score.saturating_sub(points);
                format!("-{points} points")
            }
            BubbleReward::SpecialPiece => {
                if self.engine.replace_active(PieceKind::Special) {
                    "special piece!".to_string()
                } else {
                    "special piece blocked".to_string()
                }
            }
            BubbleReward::ClearGrid => {
                self.engine.reset_board();
                self.score = self.score.saturating_add(GRID_CLEAR_BONUS);
                format!("grid cleared! +{GRID_CLEAR_BONUS}")
            }
        };
        debug!("bubble popped: {:?}", reward);
        self.message = Some(message);
    }

    /// One gravity step: fall, or lock and spawn the next piece.
    fn gravity_step(&mut self) {
        if !self.engine.attempt_move(0, 1) {
            self.lock_piece();
        }

        if self.score >= BUBBLE_SCORE_THRESHOLD {
            self.bubbles.spawn(self.engine.rng_mut());
        }

        self.check_game_over();
    }

    fn lock_piece(&mut self) {
        if !self.engine.merge_active_into_board() {
            return;
        }

        let lines = self.engine.clear_full_lines();
        if lines > 0 {
            self.score = self.score.saturating_add(line_clear_score(lines));
            if self.progress.record_lines(lines) {
                info!(
                    "level {} reached (drop interval {}ms)",
                    self.progress.level(),
                    self.drop_interval_ms()
                );
            }
        }

        self.engine.spawn_next();
    }

    fn check_game_over(&mut self) {
        if !self.ended.get() || self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;
        self.record_run();
        info!(
            "game over: score {}, level {}, lines {}",
            self.score,
            self.progress.level(),
            self.progress.total_lines()
        );
    }

    fn record_run(&mut self) {
        if self.recorded {
            return;
        }
        self.recorded = true;

        let secs = self.elapsed_ms / 1000;
        let entry = HighScoreEntry {
            score: self.score,
            level: self.progress.level(),
            minutes: secs / 60,
            seconds: secs % 60,
            date: Local::now().date_naive(),
        };
        if let Some(rank) = self.high_scores.record(entry) {
            info!("new high score #{}: {}", rank + 1, self.score);
            self.message = Some(format!("new high score #{}", rank + 1));
        }
    }

    /// Record the current run if needed, then start over from `Ready` with a fresh piece.
    pub fn restart(&mut self) {
        if self.phase != Phase::Ready || self.score > 0 {
            self.record_run();
        }

        self.engine.reset_board();
        self.engine.clear_game_over();
        self.ended.set(false);
        self.engine.spawn_next();

        self.phase = Phase::Ready;
        self.score = 0;
        self.progress = LevelProgress::new();
        self.elapsed_ms = 0;
        self.drop_timer_ms = 0;
        self.bubbles.clear();
        self.recorded = false;
        self.message = None;
        debug!("session restarted");
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.engine.snapshot_into(&mut out.engine);
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.progress.level();
        out.level_lines = self.progress.counter();
        out.total_lines = self.progress.total_lines();
        out.elapsed_ms = self.elapsed_ms;
        out.bubbles.clear();
        out.bubbles.extend_from_slice(self.bubbles.bubbles());
        out.high_scores.clear();
        out.high_scores.extend_from_slice(self.high_scores.entries());
        out.message.clone_from(&self.message);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot {
            engine: self.engine.snapshot(),
            phase: self.phase,
            score: 0,
            level: 0,
            level_lines: 0,
            total_lines: 0,
            elapsed_ms: 0,
            bubbles: Vec::new(),
            high_scores: Vec::new(),
            message: None,
        };
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    const GRAY: Color = Color::new(0x808080);

    fn session() -> GameSession {
        GameSession::new(EngineConfig::seeded(12345), HighScoreLedger::new()).unwrap()
    }

    fn running() -> GameSession {
        let mut s = session();
        s.start();
        s
    }

    #[test]
    fn test_phase_transitions() {
        let mut s = session();
        assert_eq!(s.phase(), Phase::Ready);
        assert!(!s.pause());
        assert!(s.start());
        assert!(!s.start());
        assert!(s.apply_action(GameAction::Pause));
        assert_eq!(s.phase(), Phase::Paused);
        assert!(s.apply_action(GameAction::Pause));
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn test_actions_ignored_unless_running() {
        let mut s = session();
        let x = s.engine().active().x;
        assert!(!s.apply_action(GameAction::MoveLeft));
        assert!(!s.apply_action(GameAction::SoftDrop));
        assert_eq!(s.engine().active().x, x);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_tick_does_nothing_while_paused() {
        let mut s = running();
        s.pause();
        assert!(!s.tick(5000));
        assert_eq!(s.elapsed_ms(), 0);
        assert_eq!(s.engine().active().y, 0);
    }

    #[test]
    fn test_gravity_step_per_interval() {
        let mut s = running();
        s.engine_mut().spawn(PieceKind::O);
        assert!(!s.tick(999));
        assert!(s.tick(1));
        assert_eq!(s.engine().active().y, 1);
        assert!(s.tick(2000));
        assert_eq!(s.engine().active().y, 3);
        assert_eq!(s.elapsed_ms(), 3000);
    }

    #[test]
    fn test_soft_drop_scores_even_when_blocked() {
        let mut s = running();
        s.engine_mut().spawn(PieceKind::O);
        while s.engine_mut().attempt_move(0, 1) {}
        assert!(s.apply_action(GameAction::SoftDrop));
        assert_eq!(s.score(), 1);
        assert_eq!(s.engine().active().y, 18);
    }

    #[test]
    fn test_lock_clears_and_scores() {
        let mut s = running();
        // Bottom row full except where an O piece will land.
        for x in 0..15 {
            if x != 6 && x != 7 {
                s.engine_mut().board_mut().set(x, 19, Some(GRAY));
            }
        }
        s.engine_mut().spawn(PieceKind::O);
        while s.engine_mut().attempt_move(0, 1) {}

        // Landed: the next step locks.
        assert!(s.tick(1000));
        assert_eq!(s.score(), 100);
        assert_eq!(s.lines(), 1);
        assert_eq!(s.engine().board().filled_count(), 2);
        assert_eq!(s.engine().active().y, 0);
    }

    #[test]
    fn test_game_over_records_once() {
        let mut s = running();
        // Everything below row 2 is filled except column 0, so nothing clears.
        for y in 2..20 {
            s.engine_mut().board_mut().fill_row(y, GRAY);
            s.engine_mut().board_mut().set(0, y as i32, None);
        }
        s.engine_mut().spawn(PieceKind::O);
        // The O locks in rows 0-1 and every spawn position overlaps it.
        assert!(s.tick(1000));

        assert_eq!(s.phase(), Phase::GameOver);
        assert!(s.engine().is_game_over());
        assert_eq!(s.high_scores().len(), 1);
        assert!(!s.tick(1000));
        assert!(!s.apply_action(GameAction::MoveLeft));
        assert_eq!(s.high_scores().len(), 1);

        s.restart();
        assert_eq!(s.high_scores().len(), 1);
        assert_eq!(s.phase(), Phase::Ready);
        assert!(!s.engine().is_game_over());
        assert!(s.engine().board().is_clear());
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut s = running();
        s.apply_action(GameAction::SoftDrop);
        s.tick(500);
        s.restart();
        assert_eq!(s.score(), 0);
        assert_eq!(s.level(), 1);
        assert_eq!(s.elapsed_ms(), 0);
        assert!(s.bubbles().is_empty());
        // The aborted run was recorded.
        assert_eq!(s.high_scores().len(), 1);
    }

    #[test]
    fn test_bubbles_spawn_above_threshold() {
        let mut s = running();
        s.score = BUBBLE_SCORE_THRESHOLD;
        s.engine_mut().spawn(PieceKind::O);
        s.tick(1000);
        assert_eq!(s.bubbles().len(), 1);
    }

    #[test]
    fn test_pop_bubble_applies_reward() {
        let mut s = running();
        s.score = 1000;
        s.engine_mut().spawn(PieceKind::O);
        for _ in 0..5 {
            s.tick(1000);
        }
        assert_eq!(s.bubbles().len(), 5);

        assert!(s.apply_action(GameAction::PopBubble(1)));
        assert_eq!(s.bubbles().len(), 4);
        assert!(s.message().is_some());
        assert!(!s.apply_action(GameAction::PopBubble(9)));
        assert!(!s.apply_action(GameAction::PopBubble(0)));
    }

    #[test]
    fn test_penalty_saturates_at_zero() {
        let mut s = running();
        s.score = 10;
        s.apply_reward(BubbleReward::Penalty(200));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_clear_grid_reward() {
        let mut s = running();
        s.engine_mut().board_mut().fill_row(19, GRAY);
        s.apply_reward(BubbleReward::ClearGrid);
        assert!(s.engine().board().is_clear());
        assert_eq!(s.score(), GRID_CLEAR_BONUS);
    }

    #[test]
    fn test_special_reward_keeps_anchor() {
        let mut s = running();
        s.engine_mut().spawn(PieceKind::T);
        s.engine_mut().attempt_move(0, 4);
        let (x, y) = (s.engine().active().x, s.engine().active().y);
        s.apply_reward(BubbleReward::SpecialPiece);
        assert_eq!(s.engine().active().kind, PieceKind::Special);
        assert_eq!((s.engine().active().x, s.engine().active().y), (x, y));
    }

    #[test]
    fn test_snapshot_copies_session_state() {
        let mut s = running();
        s.apply_action(GameAction::SoftDrop);
        let snap = s.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.score, 1);
        assert_eq!(snap.level, 1);
        assert!(snap.playable());
    }
}
