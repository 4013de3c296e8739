use std::time::Duration;

use rand::Rng;
use tracing::debug;

use super::spatial::nearest_target;
use super::Arena;
use crate::organisms::{BehaviorState, Motion, OrganismId};

impl Arena {
    /// Advance the dish by one display frame of length `dt`.
    ///
    /// Motion is integrated first, then lifespans that ran out are expired, then
    /// every organism whose behavior timer fired takes its turn. A `dt` spanning
    /// several behavior intervals gives one turn per interval, taken in rounds.
    /// Organisms removed earlier in the frame do not act.
    pub fn step(&mut self, dt: Duration) {
        self.elapsed += dt;
        self.integrate_motion(dt);

        let mut expired = Vec::new();
        let mut due = Vec::new();
        for (id, organism) in self.organisms.iter_mut() {
            if organism.lifespan.tick(dt).just_finished() {
                expired.push(*id);
                continue;
            }
            let turns = organism.behavior_timer.tick(dt).times_finished_this_tick();
            if turns > 0 {
                due.push((*id, turns));
            }
        }

        for id in expired {
            self.expire(id);
        }
        let rounds = due.iter().map(|&(_, turns)| turns).max().unwrap_or(0);
        for round in 0..rounds {
            for &(id, turns) in &due {
                if turns > round {
                    self.run_behavior(id);
                }
            }
        }

        if !due.is_empty() {
            debug!(
                "[ECOSYSTEM] t={:.1}s | {}",
                self.elapsed.as_secs_f32(),
                self.stats.summary_line()
            );
        }
    }

    /// Advance the dish by `duration` in frames at the configured frame rate
    pub fn run_for(&mut self, duration: Duration) {
        let frame = self.tuning.frame_duration();
        let mut remaining = duration;
        while !remaining.is_zero() {
            let dt = remaining.min(frame);
            self.step(dt);
            remaining -= dt;
        }
    }

    /// Run one behavior tick for `id`. Dead organisms do nothing.
    pub fn run_behavior(&mut self, id: OrganismId) {
        let Some(organism) = self.organisms.get(&id) else {
            return;
        };

        match BehaviorState::for_kind(organism.kind()) {
            BehaviorState::Seeking => {
                self.seek(id);
                self.resolve_collisions(id);
            }
            BehaviorState::Wandering => self.wander(id),
            BehaviorState::ReproductionCheck => {
                let draw: f32 = self.rng.gen();
                if draw < self.tuning.reproduction_chance {
                    self.attempt_reproduction(id);
                } else {
                    self.wander(id);
                }
            }
        }
        self.refresh_stats();
    }

    /// Nearest organism `id` would seek, if any
    pub fn nearest_target(&self, id: OrganismId) -> Option<OrganismId> {
        let seeker = self.organisms.get(&id)?;
        nearest_target(seeker, self.organisms.values()).map(|(target, _)| target)
    }

    /// Start a glide toward the nearest target. With no target any current glide continues.
    fn seek(&mut self, id: OrganismId) {
        let Some(seeker) = self.organisms.get(&id) else {
            return;
        };
        let Some((target, target_position)) = nearest_target(seeker, self.organisms.values()) else {
            return;
        };

        let destination = self.clamp(target_position, seeker.size());
        let duration = self.tuning.seek_duration();
        if let Some(seeker) = self.organisms.get_mut(&id) {
            seeker.motion = Some(Motion::linear(seeker.position, destination, duration));
            debug!(
                "{} {} seeking {} toward ({:.1}, {:.1})",
                seeker.kind(),
                id,
                target,
                destination.x,
                destination.y
            );
        }
    }

    /// Keep the current wander target, or pick one, and take a step toward it
    fn wander(&mut self, id: OrganismId) {
        let Some(organism) = self.organisms.get(&id) else {
            return;
        };
        let size = organism.size();
        let has_target = matches!(organism.motion, Some(Motion::StepTowards { .. }));

        if !has_target {
            let target = self.random_point(size);
            let (step, tolerance) = (self.tuning.wander_step, self.tuning.arrival_tolerance);
            if let Some(organism) = self.organisms.get_mut(&id) {
                organism.motion = Some(Motion::step_towards(target, step, tolerance));
            }
        }
        self.advance_motion(id, Duration::ZERO);
    }

    pub(super) fn integrate_motion(&mut self, dt: Duration) {
        let moving: Vec<OrganismId> = self
            .organisms
            .values()
            .filter(|organism| organism.motion.is_some())
            .map(|organism| organism.id())
            .collect();
        for id in moving {
            self.advance_motion(id, dt);
        }
    }

    /// Advance one organism's motion by a frame and apply the result.
    ///
    /// A finished glide stops. A wanderer that arrives gets a fresh target straight away.
    fn advance_motion(&mut self, id: OrganismId, dt: Duration) {
        let (width, height) = (self.width(), self.height());
        let Some(organism) = self.organisms.get_mut(&id) else {
            return;
        };
        let Some(motion) = organism.motion.as_mut() else {
            return;
        };

        let progress = motion.advance(organism.position, dt);
        organism.position = super::clamp_to_bounds(progress.position(), organism.size, width, height);
        if !progress.arrived() {
            return;
        }

        let restart = match *motion {
            Motion::LinearInterpolate { .. } => None,
            Motion::StepTowards {
                step_size,
                tolerance,
                ..
            } => Some((step_size, tolerance)),
        };
        let size = organism.size;
        match restart {
            None => organism.motion = None,
            Some((step_size, tolerance)) => {
                let target = self.random_point(size);
                if let Some(organism) = self.organisms.get_mut(&id) {
                    organism.motion = Some(Motion::step_towards(target, step_size, tolerance));
                }
            }
        }
    }
}
