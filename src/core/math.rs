// Math utilities shared by the engine and the gameplay code

use glam::Vec2;
use rapier2d::prelude::{Real, Vector};

/// Count a timer down by `dt`, never going below zero
pub fn decay_timer(remaining: f32, dt: f32) -> f32 {
    (remaining - dt.max(0.0)).max(0.0)
}

/// Clamp a raw axis reading into [-1, 1]
pub fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Mirror an offset horizontally according to facing
pub fn facing_offset(offset: Vec2, facing_right: bool) -> Vec2 {
    if facing_right {
        offset
    } else {
        Vec2::new(-offset.x, offset.y)
    }
}

/// Convert a glam vector into rapier's vector type
pub fn to_vector(v: Vec2) -> Vector<Real> {
    Vector::new(v.x, v.y)
}

/// Convert a rapier vector into glam
pub fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_decay_timer() {
        assert_relative_eq!(decay_timer(0.1, 0.04), 0.06, epsilon = 1e-6);
        assert_eq!(decay_timer(0.1, 0.5), 0.0);
        assert_eq!(decay_timer(0.0, 0.016), 0.0);
    }

    #[test]
    fn test_decay_timer_ignores_negative_dt() {
        assert_eq!(decay_timer(0.1, -1.0), 0.1);
    }

    #[test]
    fn test_clamp_axis() {
        assert_eq!(clamp_axis(0.5), 0.5);
        assert_eq!(clamp_axis(-3.0), -1.0);
        assert_eq!(clamp_axis(2.0), 1.0);
        assert_eq!(clamp_axis(f32::NAN), 0.0);
    }

    #[test]
    fn test_facing_offset() {
        let offset = Vec2::new(0.8, 0.1);
        assert_eq!(facing_offset(offset, true), offset);
        assert_eq!(facing_offset(offset, false), Vec2::new(-0.8, 0.1));
    }

    #[test]
    fn test_vector_conversion() {
        let v = Vec2::new(1.5, -2.0);
        assert_eq!(to_vec2(&to_vector(v)), v);
    }
}
