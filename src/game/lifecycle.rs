// Lifecycle notifier: death and level completion reported to game flow

/// External game-flow collaborator (menus, scene changes)
pub trait GameFlow {
    fn on_game_over(&mut self);
    fn on_level_won(&mut self);
}

/// Forwards terminal events to a `GameFlow`, each at most once
#[derive(Debug, Default, Clone)]
pub struct LifecycleNotifier {
    game_over_reported: bool,
    level_won_reported: bool,
}

impl LifecycleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this call reached the game flow
    pub fn report_game_over(&mut self, flow: &mut dyn GameFlow) -> bool {
        if self.game_over_reported {
            return false;
        }
        self.game_over_reported = true;
        log::info!("Reporting game over");
        flow.on_game_over();
        true
    }

    /// Returns true if this call reached the game flow
    pub fn report_level_won(&mut self, flow: &mut dyn GameFlow) -> bool {
        if self.level_won_reported {
            return false;
        }
        self.level_won_reported = true;
        log::info!("Reporting level won");
        flow.on_level_won();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingFlow {
        game_overs: u32,
        wins: u32,
    }

    impl GameFlow for CountingFlow {
        fn on_game_over(&mut self) {
            self.game_overs += 1;
        }

        fn on_level_won(&mut self) {
            self.wins += 1;
        }
    }

    #[test]
    fn test_game_over_once() {
        let mut notifier = LifecycleNotifier::new();
        let mut flow = CountingFlow::default();

        assert!(notifier.report_game_over(&mut flow));
        assert!(!notifier.report_game_over(&mut flow));
        assert_eq!(flow.game_overs, 1);
        assert!(notifier.game_over_reported);
        assert!(!notifier.level_won_reported);
    }

    #[test]
    fn test_level_won_once() {
        let mut notifier = LifecycleNotifier::new();
        let mut flow = CountingFlow::default();

        notifier.report_level_won(&mut flow);
        notifier.report_level_won(&mut flow);
        assert_eq!(flow.wins, 1);
        assert_eq!(flow.game_overs, 0);
    }
}
