// Control-surface geometry. Fixed canvas layout so the vectors this client
// sends match what the backend was tuned against.

use crate::domain::gesture::ShootZone;

#[derive(Debug, Clone, Copy)]
pub struct ControlTuning {
    // Unscaled design space the layout was authored in.
    pub design_width: f32,
    pub design_height: f32,
    // Scale applied to the design space to get the live canvas.
    pub scale_factor: f32,
    // Firing origin and activation radius, in canvas coordinates.
    pub zone_x: f32,
    pub zone_y: f32,
    pub zone_radius: f32,
}

impl Default for ControlTuning {
    fn default() -> Self {
        Self {
            design_width: 800.0,
            design_height: 350.0,
            scale_factor: 0.6,
            zone_x: 350.0,
            zone_y: 100.0,
            zone_radius: 100.0,
        }
    }
}

impl ControlTuning {
    pub fn canvas_width(&self) -> f32 {
        self.design_width * self.scale_factor
    }

    pub fn canvas_height(&self) -> f32 {
        self.design_height * self.scale_factor
    }

    pub fn shoot_zone(&self) -> ShootZone {
        ShootZone::new(self.zone_x, self.zone_y, self.zone_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_the_authored_canvas() {
        let tuning = ControlTuning::default();
        assert_eq!(tuning.canvas_width(), 480.0);
        assert_eq!(tuning.canvas_height(), 210.0);
        let zone = tuning.shoot_zone();
        assert_eq!(zone.origin_x, 350.0);
        assert_eq!(zone.origin_y, 100.0);
        assert_eq!(zone.radius, 100.0);
    }
}
