// Shoot-gesture geometry: the activation zone and the origin-relative
// aim vector.

/// Relative aim vector computed once per press gesture; not retained after
/// forwarding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootVector {
    pub dx: f32,
    pub dy: f32,
}

/// Circular activation zone around the firing origin.
#[derive(Debug, Clone, Copy)]
pub struct ShootZone {
    pub origin_x: f32,
    pub origin_y: f32,
    pub radius: f32,
}

impl ShootZone {
    pub fn new(origin_x: f32, origin_y: f32, radius: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            radius,
        }
    }

    /// Vector from the origin to the press point, with y flipped so positive
    /// y aims up in game coordinates. `None` for presses outside the zone.
    pub fn vector_from(&self, x: f32, y: f32) -> Option<ShootVector> {
        let rel_x = x - self.origin_x;
        let rel_y = y - self.origin_y;
        if rel_x * rel_x + rel_y * rel_y > self.radius * self.radius {
            return None;
        }
        Some(ShootVector {
            dx: rel_x,
            dy: -rel_y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_inside_the_zone_yields_the_relative_vector() {
        let zone = ShootZone::new(350.0, 100.0, 100.0);
        let vector = zone.vector_from(380.0, 140.0).expect("inside the zone");
        assert_eq!(vector.dx, 30.0);
        // Screen y grows downward; the wire vector aims up-positive.
        assert_eq!(vector.dy, -40.0);
    }

    #[test]
    fn press_outside_the_radius_yields_nothing() {
        let zone = ShootZone::new(350.0, 100.0, 100.0);
        assert_eq!(zone.vector_from(350.0, 201.0), None);
        assert_eq!(zone.vector_from(100.0, 100.0), None);
    }

    #[test]
    fn press_on_the_boundary_counts_as_inside() {
        let zone = ShootZone::new(0.0, 0.0, 100.0);
        let vector = zone.vector_from(100.0, 0.0).expect("boundary is inside");
        assert_eq!(vector.dx, 100.0);
        assert_eq!(vector.dy, 0.0);
    }
}
