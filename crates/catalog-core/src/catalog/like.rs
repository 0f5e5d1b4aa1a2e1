//! Per-card like button with a cooldown.

use std::time::{Duration, Instant};

/// How long a card stays "loved" before it can be liked again.
pub const LIKE_COOLDOWN: Duration = Duration::from_secs(300);

/// Local like state of one product card.
///
/// Each card owns its own cooldown; nothing is shared between cards and the
/// count is never written back to the catalog.
#[derive(Debug, Clone)]
pub struct LikeCooldown {
    likes: u32,
    loved_at: Option<Instant>,
    cooldown: Duration,
}

impl LikeCooldown {
    /// Start from the product's current like count.
    pub fn new(likes: u32) -> Self {
        Self::with_cooldown(likes, LIKE_COOLDOWN)
    }

    /// Start with a custom cooldown.
    pub fn with_cooldown(likes: u32, cooldown: Duration) -> Self {
        Self {
            likes,
            loved_at: None,
            cooldown,
        }
    }

    /// Current like count as shown on the card.
    pub fn likes(&self) -> u32 {
        self.likes
    }

    /// Whether the button is in its loved (disabled) state at `now`.
    pub fn is_loved(&self, now: Instant) -> bool {
        self.loved_at
            .map(|at| now.saturating_duration_since(at) < self.cooldown)
            .unwrap_or(false)
    }

    /// Register a like. Returns `false` while the cooldown is running.
    pub fn like(&mut self, now: Instant) -> bool {
        if self.is_loved(now) {
            return false;
        }
        self.likes = self.likes.saturating_add(1);
        self.loved_at = Some(now);
        true
    }

    /// Time left before another like is accepted.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.loved_at
            .map(|at| self.cooldown.saturating_sub(now.saturating_duration_since(at)))
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_once_per_cooldown() {
        let start = Instant::now();
        let mut card = LikeCooldown::new(4);

        assert!(card.like(start));
        assert_eq!(card.likes(), 5);
        assert!(card.is_loved(start));

        assert!(!card.like(start + Duration::from_secs(10)));
        assert_eq!(card.likes(), 5);
    }

    #[test]
    fn test_cooldown_resets() {
        let start = Instant::now();
        let mut card = LikeCooldown::with_cooldown(0, Duration::from_secs(60));
        card.like(start);

        assert_eq!(card.remaining(start + Duration::from_secs(20)), Duration::from_secs(40));
        assert!(!card.is_loved(start + Duration::from_secs(60)));
        assert!(card.like(start + Duration::from_secs(61)));
        assert_eq!(card.likes(), 2);
    }
}
