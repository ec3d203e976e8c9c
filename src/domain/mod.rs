// Domain layer: input state machines and gesture geometry.

pub mod direction;
pub mod edge;
pub mod gesture;
pub mod tuning;

pub use direction::{Direction, UnsupportedDirection};
pub use edge::{DirectionLevels, InputEdge, KeyState};
pub use gesture::{ShootVector, ShootZone};
pub use tuning::ControlTuning;
