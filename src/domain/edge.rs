// Per-direction press state and edge detection.

use crate::domain::direction::Direction;

/// Polled levels for one tick, one flag per direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionLevels {
    held: [bool; 4],
}

impl DirectionLevels {
    pub fn get(self, direction: Direction) -> bool {
        self.held[direction.index()]
    }

    pub fn set(&mut self, direction: Direction, level: bool) {
        self.held[direction.index()] = level;
    }

    /// Combines two input surfaces; a direction is active if either holds it.
    pub fn merge(self, other: DirectionLevels) -> DirectionLevels {
        let mut merged = DirectionLevels::default();
        for direction in Direction::ALL {
            merged.set(direction, self.get(direction) || other.get(direction));
        }
        merged
    }
}

/// Transition reported when a direction's level changes between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdge {
    Set(Direction),
    Cleared(Direction),
}

/// Currently-held flags for the four directions.
///
/// Each direction is an independent two-state machine {released, pressed};
/// `apply` reports only transitions, never steady-state levels, so a held
/// direction produces exactly one `Set` no matter how many ticks it spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    held: DirectionLevels,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.get(direction)
    }

    /// Advances every direction's state machine to the polled level and
    /// returns the edges crossed this tick.
    pub fn apply(&mut self, levels: DirectionLevels) -> Vec<InputEdge> {
        let mut edges = Vec::new();
        for direction in Direction::ALL {
            let level = levels.get(direction);
            if level == self.held.get(direction) {
                continue;
            }
            self.held.set(direction, level);
            edges.push(if level {
                InputEdge::Set(direction)
            } else {
                InputEdge::Cleared(direction)
            });
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(direction: Direction) -> DirectionLevels {
        let mut levels = DirectionLevels::default();
        levels.set(direction, true);
        levels
    }

    #[test]
    fn reports_one_set_and_one_clear_for_a_press_release_cycle() {
        let mut keys = KeyState::new();
        let mut edges = Vec::new();
        // left polled as [false, true, true, false]
        for level in [false, true, true, false] {
            let mut levels = DirectionLevels::default();
            levels.set(Direction::Left, level);
            edges.extend(keys.apply(levels));
        }
        assert_eq!(
            edges,
            vec![
                InputEdge::Set(Direction::Left),
                InputEdge::Cleared(Direction::Left)
            ]
        );
    }

    #[test]
    fn holding_across_many_ticks_emits_a_single_set() {
        let mut keys = KeyState::new();
        let mut edges = Vec::new();
        for _ in 0..50 {
            edges.extend(keys.apply(only(Direction::Up)));
        }
        assert_eq!(edges, vec![InputEdge::Set(Direction::Up)]);
        assert!(keys.is_held(Direction::Up));
    }

    #[test]
    fn set_and_clear_counts_match_level_transitions() {
        let mut keys = KeyState::new();
        let script = [false, true, false, false, true, true, false, true];
        let mut sets = 0;
        let mut clears = 0;
        for level in script {
            let mut levels = DirectionLevels::default();
            levels.set(Direction::Right, level);
            for edge in keys.apply(levels) {
                match edge {
                    InputEdge::Set(_) => sets += 1,
                    InputEdge::Cleared(_) => clears += 1,
                }
            }
        }
        // Three false->true transitions, two true->false ones.
        assert_eq!(sets, 3);
        assert_eq!(clears, 2);
    }

    #[test]
    fn directions_track_independently() {
        let mut keys = KeyState::new();
        let both = only(Direction::Left).merge(only(Direction::Up));
        let edges = keys.apply(both);
        assert_eq!(edges.len(), 2);

        // Releasing only one of the two held directions.
        let edges = keys.apply(only(Direction::Up));
        assert_eq!(edges, vec![InputEdge::Cleared(Direction::Left)]);
        assert!(keys.is_held(Direction::Up));
    }

    #[test]
    fn merge_is_an_or_of_both_surfaces() {
        let merged = only(Direction::Down).merge(DirectionLevels::default());
        assert!(merged.get(Direction::Down));
        assert!(!merged.get(Direction::Up));
    }
}
