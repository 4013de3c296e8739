mod lifecycle;
mod scheduler;
mod spatial;


use std::collections::BTreeMap;
use std::time::Duration;

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::organisms::{
    EcosystemStats, EcosystemTuning, Organism, OrganismId, OrganismKind, OrganismSnapshot, Origin,
    TuningError,
};

pub use lifecycle::{ReproductionBlock, ReproductionOutcome};
pub use spatial::{clamp_to_bounds, nearest_target, Footprint};

/// The petri dish: a bounded rectangle and the authoritative registry of live organisms.
///
/// All mutation happens through `&mut self`, one operation at a time. Statistics are
/// recounted after every operation that adds or removes organisms, so
/// [`Arena::statistics`] is never stale.
#[derive(Resource)]
pub struct Arena {
    tuning: EcosystemTuning,
    /// Ordered by id, which is creation order
    organisms: BTreeMap<OrganismId, Organism>,
    next_id: u64,
    stats: EcosystemStats,
    elapsed: Duration,
    rng: StdRng,
}

impl Arena {
    pub fn new(tuning: EcosystemTuning) -> Result<Self, TuningError> {
        Self::with_rng(tuning, StdRng::from_entropy())
    }

    /// Arena whose random draws are reproducible
    pub fn seeded(tuning: EcosystemTuning, seed: u64) -> Result<Self, TuningError> {
        Self::with_rng(tuning, StdRng::seed_from_u64(seed))
    }

    fn with_rng(tuning: EcosystemTuning, rng: StdRng) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            organisms: BTreeMap::new(),
            next_id: 0,
            stats: EcosystemStats::default(),
            elapsed: Duration::ZERO,
            rng,
        })
    }

    pub fn tuning(&self) -> &EcosystemTuning {
        &self.tuning
    }

    pub fn width(&self) -> f32 {
        self.tuning.arena_width
    }

    pub fn height(&self) -> f32 {
        self.tuning.arena_height
    }

    /// Simulated time since the arena was created
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Place a new organism with its top-left corner at `position`, clamped into bounds
    pub fn place(&mut self, kind: OrganismKind, position: Vec2) -> OrganismId {
        let id = self.spawn(kind, Origin::Placed, position, self.tuning.default_size);
        info!("[PLACE] {} {} at ({:.1}, {:.1})", kind, id, position.x, position.y);
        id
    }

    /// Remove an organism, cancelling its schedules. Removing a dead id does nothing.
    pub fn remove(&mut self, id: OrganismId) -> Option<Organism> {
        let mut organism = self.organisms.remove(&id)?;
        organism.cancel_schedules();
        self.refresh_stats();
        debug!("Removed {} {}", organism.kind(), id);
        Some(organism)
    }

    /// Destroy every organism and cancel every schedule
    pub fn clear_all(&mut self) {
        let cleared = self.organisms.len();
        for organism in self.organisms.values_mut() {
            organism.cancel_schedules();
        }
        self.organisms.clear();
        self.refresh_stats();
        info!("[CLEAR] Removed {} organisms", cleared);
    }

    pub fn get(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.get(&id)
    }

    pub fn contains(&self, id: OrganismId) -> bool {
        self.organisms.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    /// Live organisms in creation order
    pub fn all(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.values()
    }

    pub fn snapshot(&self) -> Vec<OrganismSnapshot> {
        self.organisms.values().map(Organism::snapshot).collect()
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }

    pub fn statistics(&self) -> &EcosystemStats {
        &self.stats
    }

    pub fn count_by_type(&self) -> BTreeMap<OrganismKind, u32> {
        OrganismKind::ALL
            .into_iter()
            .map(|kind| (kind, self.stats.count(kind)))
            .collect()
    }

    /// Register a new organism with fresh behavior and lifespan schedules
    fn spawn(&mut self, kind: OrganismKind, origin: Origin, position: Vec2, size: f32) -> OrganismId {
        let id = OrganismId(self.next_id);
        self.next_id += 1;

        let position = clamp_to_bounds(position, size, self.width(), self.height());
        let organism = Organism::new(
            id,
            kind,
            origin,
            position,
            size,
            self.tuning.behavior_interval(),
            self.tuning.lifespan(),
        );
        self.organisms.insert(id, organism);
        self.refresh_stats();
        id
    }

    fn clamp(&self, position: Vec2, size: f32) -> Vec2 {
        clamp_to_bounds(position, size, self.width(), self.height())
    }

    /// Uniform point at which a body of `size` fits entirely
    fn random_point(&mut self, size: f32) -> Vec2 {
        let max_x = (self.width() - size).max(0.0);
        let max_y = (self.height() - size).max(0.0);
        Vec2::new(self.rng.gen::<f32>() * max_x, self.rng.gen::<f32>() * max_y)
    }

    fn refresh_stats(&mut self) {
        self.stats = EcosystemStats::collect(self.organisms.values());
    }
}
