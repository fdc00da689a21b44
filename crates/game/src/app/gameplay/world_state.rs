use std::time::Duration;

use grid_engine::Point;

/// Simulation-wide state shared by every creature: the optional target and
/// the decision tick length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WorldState {
    target: Option<Point>,
    tick_interval: Duration,
}

impl WorldState {
    pub(crate) fn new(tick_interval: Duration) -> Self {
        Self {
            target: None,
            tick_interval,
        }
    }

    pub(crate) fn target(&self) -> Option<Point> {
        self.target
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub(crate) fn set_target(&mut self, target: Point) {
        self.target = Some(target);
    }

    /// Returns the target that was cleared, if any.
    pub(crate) fn clear_target(&mut self) -> Option<Point> {
        self.target.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_target() {
        let state = WorldState::new(Duration::from_millis(800));
        assert_eq!(state.target(), None);
        assert_eq!(state.tick_interval(), Duration::from_millis(800));
    }

    #[test]
    fn setting_replaces_previous_target() {
        let mut state = WorldState::new(Duration::from_millis(800));
        state.set_target(Point::new(1, 2));
        state.set_target(Point::new(3, 4));
        assert_eq!(state.target(), Some(Point::new(3, 4)));
    }

    #[test]
    fn clearing_twice_is_a_no_op() {
        let mut state = WorldState::new(Duration::from_millis(800));
        state.set_target(Point::new(1, 2));
        assert_eq!(state.clear_target(), Some(Point::new(1, 2)));
        assert_eq!(state.clear_target(), None);
        assert_eq!(state.target(), None);
    }
}
