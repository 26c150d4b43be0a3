//! Bubble mini-game - falling bubbles that pay out random rewards when popped
//!
//! Bubbles live in their own abstract space above and around the board: `x` spans
//! `[-30, 30)` and `height` starts somewhere in `[15, 35)` and decreases every frame.
//! A bubble is discarded once it falls below [`BUBBLE_FLOOR`].

use crate::rng::GameRng;
use crate::types::MAX_BUBBLES;

/// Height lost per frame.
pub const BUBBLE_FALL_PER_TICK: f32 = 0.1;

/// Bubbles below this height are discarded.
pub const BUBBLE_FLOOR: f32 = -15.0;

const SPAWN_X: (f32, f32) = (-30.0, 30.0);
const SPAWN_HEIGHT: (f32, f32) = (15.0, 35.0);

/// Probability bands for a pop roll (cumulative upper bounds).
const GAIN_BELOW: f64 = 0.25;
const LOSS_BELOW: f64 = 0.50;
const SPECIAL_BELOW: f64 = 0.75;

/// Base points drawn from `[50, 150)` for gains and losses.
const REWARD_POINTS: (u32, u32) = (50, 150);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub id: u32,
    pub x: f32,
    pub height: f32,
}

/// Outcome of popping a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleReward {
    /// Add points to the score.
    Points(u32),
    /// Subtract points from the score (twice a regular draw).
    Penalty(u32),
    /// Turn the active piece into the single-cell special piece.
    SpecialPiece,
    /// Empty the board and award the grid-clear bonus.
    ClearGrid,
}

impl BubbleReward {
    /// Roll a reward using the cumulative bands 25% / 25% / 25% / 25%.
    pub fn roll(rng: &mut GameRng) -> Self {
        let r = rng.next_unit();
        if r < GAIN_BELOW {
            BubbleReward::Points(rng.next_range(REWARD_POINTS.0, REWARD_POINTS.1))
        } else if r < LOSS_BELOW {
            BubbleReward::Penalty(2 * rng.next_range(REWARD_POINTS.0, REWARD_POINTS.1))
        } else if r < SPECIAL_BELOW {
            BubbleReward::SpecialPiece
        } else {
            BubbleReward::ClearGrid
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BubbleField {
    bubbles: Vec<Bubble>,
    next_id: u32,
}

impl BubbleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bubbles in spawn order (oldest first).
    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Spawn a bubble at a random spot. Returns `None` when the field is full.
    pub fn spawn(&mut self, rng: &mut GameRng) -> Option<u32> {
        if self.bubbles.len() >= MAX_BUBBLES {
            return None;
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.bubbles.push(Bubble {
            id,
            x: rng.next_f32(SPAWN_X.0, SPAWN_X.1),
            height: rng.next_f32(SPAWN_HEIGHT.0, SPAWN_HEIGHT.1),
        });
        Some(id)
    }

    /// Let every bubble fall for `frames` frames and drop the ones below the floor.
    pub fn advance(&mut self, frames: u32) {
        let fall = BUBBLE_FALL_PER_TICK * frames as f32;
        for bubble in &mut self.bubbles {
            bubble.height -= fall;
        }
        self.bubbles.retain(|b| b.height >= BUBBLE_FLOOR);
    }

    /// Remove the bubble at `slot` (0-based, oldest first) and roll its reward.
    pub fn pop(&mut self, slot: usize, rng: &mut GameRng) -> Option<BubbleReward> {
        if slot >= self.bubbles.len() {
            return None;
        }
        self.bubbles.remove(slot);
        Some(BubbleReward::roll(rng))
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
    }
}
