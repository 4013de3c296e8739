use std::fmt;
use std::time::Duration;

use bevy::time::{Timer, TimerMode};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::organisms::motion::Motion;

/// Stable identity of an organism, unique for the lifetime of its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrganismId(pub u64);

impl OrganismId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Organism type, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganismKind {
    Predator,
    Virus,
    Prey,
    Reproducer,
}

impl OrganismKind {
    pub const ALL: [OrganismKind; 4] = [
        OrganismKind::Predator,
        OrganismKind::Virus,
        OrganismKind::Prey,
        OrganismKind::Reproducer,
    ];

    /// Short counter label shown next to the population of this kind
    pub fn label(&self) -> &'static str {
        match self {
            OrganismKind::Predator => "PRD",
            OrganismKind::Virus => "VRX",
            OrganismKind::Prey => "PRY",
            OrganismKind::Reproducer => "REP",
        }
    }
}

impl fmt::Display for OrganismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrganismKind::Predator => "predator",
            OrganismKind::Virus => "virus",
            OrganismKind::Prey => "prey",
            OrganismKind::Reproducer => "reproducer",
        };
        f.write_str(name)
    }
}

/// How an organism came into the dish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Placed by the user
    Placed,
    /// Cloned from a reproducer
    Offspring,
    /// Spawned by a virus at its victim's position
    Infection,
}

/// A single simulated organism.
///
/// The organism owns both of its schedules: the repeating behavior timer and the
/// one-shot lifespan timer. Dropping the organism drops its schedules with it.
#[derive(Debug, Clone)]
pub struct Organism {
    pub(crate) id: OrganismId,
    pub(crate) kind: OrganismKind,
    pub(crate) origin: Origin,
    pub(crate) position: Vec2,
    pub(crate) size: f32,
    pub(crate) alive: bool,
    /// Only reproducers carry a count
    pub(crate) reproduction_count: Option<u32>,
    pub(crate) motion: Option<Motion>,
    pub(crate) behavior_timer: Timer,
    pub(crate) lifespan: Timer,
}

impl Organism {
    pub(crate) fn new(
        id: OrganismId,
        kind: OrganismKind,
        origin: Origin,
        position: Vec2,
        size: f32,
        behavior_interval: Duration,
        lifespan: Duration,
    ) -> Self {
        Self {
            id,
            kind,
            origin,
            position,
            size,
            alive: true,
            reproduction_count: (kind == OrganismKind::Reproducer).then_some(0),
            motion: None,
            behavior_timer: Timer::new(behavior_interval, TimerMode::Repeating),
            lifespan: Timer::new(lifespan, TimerMode::Once),
        }
    }

    pub fn id(&self) -> OrganismId {
        self.id
    }

    pub fn kind(&self) -> OrganismKind {
        self.kind
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn reproduction_count(&self) -> Option<u32> {
        self.reproduction_count
    }

    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    /// Current wander target, if the organism is wandering
    pub fn movement_target(&self) -> Option<Vec2> {
        match self.motion {
            Some(Motion::StepTowards { target, .. }) => Some(target),
            _ => None,
        }
    }

    /// Time left before the organism dies of old age
    pub fn remaining_lifespan(&self) -> Duration {
        self.lifespan.remaining()
    }

    /// Kill the organism and stop both of its schedules
    pub(crate) fn cancel_schedules(&mut self) {
        self.alive = false;
        self.motion = None;
        self.behavior_timer.pause();
        self.lifespan.pause();
    }

    pub fn snapshot(&self) -> OrganismSnapshot {
        OrganismSnapshot {
            id: self.id,
            kind: self.kind,
            origin: self.origin,
            x: self.position.x,
            y: self.position.y,
            size: self.size,
            alive: self.alive,
        }
    }
}

/// Read-only view of an organism handed to renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrganismSnapshot {
    pub id: OrganismId,
    pub kind: OrganismKind,
    pub origin: Origin,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alive: bool,
}
