// Input controller: funnels keyboard levels, on-screen controls and the
// pointer through one set of per-direction state machines, so every surface
// shares the same at-most-once transition reporting.

use crate::domain::{
    Direction, DirectionLevels, InputEdge, KeyState, ShootZone, UnsupportedDirection,
};
use crate::use_cases::types::ClientEvent;

pub struct InputController {
    keys: KeyState,
    // Held state of the named on-screen controls, merged into every poll.
    control_latch: DirectionLevels,
    zone: ShootZone,
    shooting: bool,
}

impl From<InputEdge> for ClientEvent {
    fn from(edge: InputEdge) -> Self {
        match edge {
            InputEdge::Set(direction) => ClientEvent::DirectionSet(direction),
            InputEdge::Cleared(direction) => ClientEvent::DirectionCleared(direction),
        }
    }
}

impl InputController {
    pub fn new(zone: ShootZone) -> Self {
        Self {
            keys: KeyState::new(),
            control_latch: DirectionLevels::default(),
            zone,
            shooting: false,
        }
    }

    /// Per-tick poll. `levels` is the engine's current keyboard state; the
    /// on-screen control latch is merged in before edge detection, so a
    /// direction held on either surface counts as held.
    pub fn poll(&mut self, levels: DirectionLevels) -> Vec<ClientEvent> {
        self.keys
            .apply(levels.merge(self.control_latch))
            .into_iter()
            .map(ClientEvent::from)
            .collect()
    }

    /// Press of a named on-screen control. Unknown names fail fast without
    /// touching any state.
    pub fn press_control(&mut self, name: &str) -> Result<(), UnsupportedDirection> {
        let direction = Direction::from_control_name(name)?;
        self.control_latch.set(direction, true);
        Ok(())
    }

    /// Release of a named on-screen control.
    pub fn release_control(&mut self, name: &str) -> Result<(), UnsupportedDirection> {
        let direction = Direction::from_control_name(name)?;
        self.control_latch.set(direction, false);
        Ok(())
    }

    /// Pointer press in canvas coordinates. Emits at most one shot per
    /// gesture; presses outside the activation zone start nothing.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<ClientEvent> {
        if self.shooting {
            return None;
        }
        let vector = self.zone.vector_from(x, y)?;
        self.shooting = true;
        Some(ClientEvent::Shoot(vector))
    }

    /// Pointer release (or leave). Emits one clear only after a prior shot.
    pub fn pointer_up(&mut self) -> Option<ClientEvent> {
        if !self.shooting {
            return None;
        }
        self.shooting = false;
        Some(ClientEvent::ClearShooting)
    }

    pub fn is_shooting(&self) -> bool {
        self.shooting
    }
}
