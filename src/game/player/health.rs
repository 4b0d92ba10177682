// Health & damage model

/// What a single damage call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    pub previous: i32,
    pub current: i32,
    /// This call took the last point of health from a living owner
    pub died: bool,
}

/// Current/max health with a one-way alive flag
///
/// Health is clamped to [0, max] after every mutation. Once health reaches
/// zero the owner is dead for good: further damage still reports an outcome
/// but never reports a second death, and healing does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
    alive: bool,
}

impl Health {
    /// Full health. A non-positive max is raised to 1.
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            alive: true,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Fraction of health left, for HUDs
    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    /// Subtract `amount`. Negative amounts are treated as zero.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if amount < 0 {
            log::warn!("Ignoring negative damage amount {amount}");
        }
        let amount = amount.max(0);

        let previous = self.current;
        self.current = previous.saturating_sub(amount).clamp(0, self.max);

        let died = self.alive && self.current == 0;
        if died {
            self.alive = false;
        }

        DamageOutcome {
            previous,
            current: self.current,
            died,
        }
    }

    /// Add `amount`, up to max. Returns the health actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.alive {
            return 0;
        }
        if amount < 0 {
            log::warn!("Ignoring negative heal amount {amount}");
        }

        let previous = self.current;
        self.current = previous.saturating_add(amount.max(0)).clamp(0, self.max);
        self.current - previous
    }
}
