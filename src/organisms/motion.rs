use std::time::Duration;

use glam::Vec2;

/// How an organism is currently moving.
///
/// Seekers glide toward a fixed destination over a fixed duration. Wanderers take
/// one bounded step toward their target on every display frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Constant-velocity glide from `origin` to `destination` over `duration`
    LinearInterpolate {
        origin: Vec2,
        destination: Vec2,
        duration: Duration,
        elapsed: Duration,
    },
    /// Frame-by-frame approach of `target`, at most `step_size` units per frame
    StepTowards {
        target: Vec2,
        step_size: f32,
        tolerance: f32,
    },
}

/// Result of advancing a motion by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionProgress {
    Moving(Vec2),
    Arrived(Vec2),
}

impl MotionProgress {
    pub fn position(&self) -> Vec2 {
        match *self {
            MotionProgress::Moving(position) | MotionProgress::Arrived(position) => position,
        }
    }

    pub fn arrived(&self) -> bool {
        matches!(self, MotionProgress::Arrived(_))
    }
}

impl Motion {
    pub fn linear(origin: Vec2, destination: Vec2, duration: Duration) -> Self {
        Motion::LinearInterpolate {
            origin,
            destination,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn step_towards(target: Vec2, step_size: f32, tolerance: f32) -> Self {
        Motion::StepTowards {
            target,
            step_size,
            tolerance,
        }
    }

    /// Where this motion ends up
    pub fn target(&self) -> Vec2 {
        match *self {
            Motion::LinearInterpolate { destination, .. } => destination,
            Motion::StepTowards { target, .. } => target,
        }
    }

    /// Advance by one frame of length `dt`, starting from `position`.
    ///
    /// Interpolation ignores `position` and derives the point from elapsed time;
    /// stepping ignores `dt` and moves one step per call.
    pub fn advance(&mut self, position: Vec2, dt: Duration) -> MotionProgress {
        match self {
            Motion::LinearInterpolate {
                origin,
                destination,
                duration,
                elapsed,
            } => {
                *elapsed = (*elapsed + dt).min(*duration);
                let t = if duration.is_zero() {
                    1.0
                } else {
                    elapsed.as_secs_f32() / duration.as_secs_f32()
                };
                let next = origin.lerp(*destination, t);
                if *elapsed >= *duration {
                    MotionProgress::Arrived(*destination)
                } else {
                    MotionProgress::Moving(next)
                }
            }
            Motion::StepTowards {
                target,
                step_size,
                tolerance,
            } => {
                let delta = *target - position;
                let step = delta.length().min(*step_size);
                let angle = delta.y.atan2(delta.x);
                let next = position + Vec2::new(angle.cos(), angle.sin()) * step;

                if (next.x - target.x).abs() < *tolerance && (next.y - target.y).abs() < *tolerance {
                    MotionProgress::Arrived(next)
                } else {
                    MotionProgress::Moving(next)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn interpolation_reaches_midpoint_halfway_through() {
        let mut motion = Motion::linear(Vec2::ZERO, Vec2::new(70.0, 140.0), Duration::from_secs(7));
        let progress = motion.advance(Vec2::ZERO, Duration::from_millis(3500));
        assert!(!progress.arrived());
        assert!(close(progress.position(), Vec2::new(35.0, 70.0)));
    }

    #[test]
    fn interpolation_ignores_current_position() {
        let mut motion = Motion::linear(Vec2::ZERO, Vec2::new(70.0, 0.0), Duration::from_secs(7));
        let progress = motion.advance(Vec2::new(400.0, 400.0), Duration::from_secs(1));
        assert!(close(progress.position(), Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn interpolation_arrives_exactly_and_does_not_overshoot() {
        let destination = Vec2::new(12.0, 30.0);
        let mut motion = Motion::linear(Vec2::ZERO, destination, Duration::from_secs(7));
        motion.advance(Vec2::ZERO, Duration::from_secs(6));
        let progress = motion.advance(Vec2::ZERO, Duration::from_secs(6));
        assert_eq!(progress, MotionProgress::Arrived(destination));
    }

    #[test]
    fn zero_duration_interpolation_jumps_to_destination() {
        let mut motion = Motion::linear(Vec2::ZERO, Vec2::new(5.0, 5.0), Duration::ZERO);
        assert!(motion.advance(Vec2::ZERO, Duration::ZERO).arrived());
    }

    #[test]
    fn stepping_moves_one_unit_toward_target() {
        let mut motion = Motion::step_towards(Vec2::new(10.0, 0.0), 1.0, 1.0);
        let progress = motion.advance(Vec2::ZERO, Duration::from_millis(16));
        assert!(!progress.arrived());
        assert!(close(progress.position(), Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn stepping_follows_the_diagonal() {
        let mut motion = Motion::step_towards(Vec2::new(30.0, 40.0), 1.0, 1.0);
        let progress = motion.advance(Vec2::ZERO, Duration::ZERO);
        assert!(close(progress.position(), Vec2::new(0.6, 0.8)));
    }

    #[test]
    fn stepping_never_overshoots_a_close_target() {
        let mut motion = Motion::step_towards(Vec2::new(0.4, 0.0), 1.0, 1.0);
        let progress = motion.advance(Vec2::ZERO, Duration::ZERO);
        assert!(progress.arrived());
        assert!(close(progress.position(), Vec2::new(0.4, 0.0)));
    }

    #[test]
    fn stepping_arrives_once_both_axes_are_within_tolerance() {
        let mut motion = Motion::step_towards(Vec2::new(5.0, 0.0), 1.0, 1.0);
        let mut position = Vec2::ZERO;
        let mut frames = 0;
        loop {
            let progress = motion.advance(position, Duration::ZERO);
            position = progress.position();
            frames += 1;
            if progress.arrived() {
                break;
            }
            assert!(frames < 10);
        }
        // 1, 2, 3, 4.0 is still exactly 1 away; 5.0 lands inside
        assert_eq!(frames, 5);
    }
}
