use smallvec::SmallVec;
use tracing::{debug, info};

use super::spatial::Footprint;
use super::Arena;
use crate::organisms::{collision_effect, CollisionEffect, OrganismId, OrganismKind, Origin};

/// Why a reproduction attempt did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReproductionBlock {
    /// The parent is no longer in the dish
    Dead,
    /// The parent is not a reproducer
    NotReproducer,
    /// The dish is at its population cap
    PopulationCap,
    /// The parent has used its whole budget
    Exhausted,
}

/// Result of [`Arena::attempt_reproduction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReproductionOutcome {
    Reproduced {
        offspring: OrganismId,
        /// The parent spent its last reproduction and died
        parent_exhausted: bool,
    },
    Blocked(ReproductionBlock),
}

impl Arena {
    /// Remove an organism that has reached the end of its lifespan
    pub fn expire(&mut self, id: OrganismId) -> bool {
        match self.remove(id) {
            Some(organism) => {
                info!("[LIFESPAN] Lifespan expired for {} {}", organism.kind(), id);
                true
            }
            None => false,
        }
    }

    /// Clone a reproducer in place.
    ///
    /// The parent must be alive, the dish below its population cap and the parent's
    /// budget not yet spent. A parent that spends its last reproduction dies at once.
    pub fn attempt_reproduction(&mut self, parent: OrganismId) -> ReproductionOutcome {
        let Some(organism) = self.organisms.get(&parent) else {
            return ReproductionOutcome::Blocked(ReproductionBlock::Dead);
        };
        let Some(count) = organism.reproduction_count() else {
            return ReproductionOutcome::Blocked(ReproductionBlock::NotReproducer);
        };
        if self.organisms.len() >= self.tuning.population_cap {
            return ReproductionOutcome::Blocked(ReproductionBlock::PopulationCap);
        }
        if count >= self.tuning.max_reproductions {
            return ReproductionOutcome::Blocked(ReproductionBlock::Exhausted);
        }

        let (kind, position, size) = (organism.kind(), organism.position(), organism.size());
        let offspring = self.spawn(kind, Origin::Offspring, position, size);

        let count = count + 1;
        if let Some(organism) = self.organisms.get_mut(&parent) {
            organism.reproduction_count = Some(count);
        }
        let parent_exhausted = count >= self.tuning.max_reproductions;
        if parent_exhausted {
            self.remove(parent);
        }

        info!(
            "[REPRODUCTION] {} {} cloned into {} ({}/{}){}",
            kind,
            parent,
            offspring,
            count,
            self.tuning.max_reproductions,
            if parent_exhausted { ", parent spent" } else { "" }
        );
        ReproductionOutcome::Reproduced {
            offspring,
            parent_exhausted,
        }
    }

    /// Resolve every collision in which `actor` is the aggressor.
    ///
    /// Checks the actor's current footprint against every other organism alive at the
    /// start of the call; organisms spawned during resolution are not considered.
    /// Returns how many victims died.
    pub fn resolve_collisions(&mut self, actor: OrganismId) -> usize {
        let Some(organism) = self.organisms.get(&actor) else {
            return 0;
        };
        let actor_kind = organism.kind();
        let footprint = Footprint::of(organism);

        let victims: SmallVec<[(OrganismId, CollisionEffect); 4]> = self
            .organisms
            .values()
            .filter(|other| other.id() != actor)
            .filter_map(|other| {
                let effect = collision_effect(actor_kind, other.kind())?;
                footprint
                    .overlaps(&Footprint::of(other))
                    .then_some((other.id(), effect))
            })
            .collect();

        let mut killed = 0;
        for (victim, effect) in victims {
            let Some(removed) = self.remove(victim) else {
                continue;
            };
            killed += 1;
            match effect {
                CollisionEffect::Devour => {
                    self.grow(actor);
                    info!("[COLLISION] {} {} ate {} {}", actor_kind, actor, removed.kind(), victim);
                }
                CollisionEffect::Infect => {
                    let spawned = self.spawn(
                        OrganismKind::Virus,
                        Origin::Infection,
                        removed.position(),
                        self.tuning.default_size,
                    );
                    info!(
                        "[COLLISION] {} {} infected {} {}, spawning {}",
                        actor_kind,
                        actor,
                        removed.kind(),
                        victim,
                        spawned
                    );
                }
            }
        }
        killed
    }

    /// Grow a predator after a kill, keeping it inside the arena
    fn grow(&mut self, id: OrganismId) {
        let growth = self.tuning.predator_growth;
        let cap = self.tuning.max_predator_size;
        let (width, height) = (self.width(), self.height());
        if let Some(organism) = self.organisms.get_mut(&id) {
            organism.size = (organism.size + growth).min(cap).max(organism.size);
            organism.position =
                super::clamp_to_bounds(organism.position, organism.size, width, height);
            debug!("{} {} grew to {:.0}", organism.kind(), id, organism.size);
        }
    }
}
