use crate::config::FOOD_REWARD;

/// Points earned in the current game. Only ever grows until a new game.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Score(u32);

impl Score {
    /// Adds the reward for one eaten food.
    pub fn award_food(&mut self) {
        self.0 = self.0.saturating_add(FOOD_REWARD);
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    pub(crate) fn reset(&mut self) {
        self.0 = 0;
    }
}
