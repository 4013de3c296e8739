use crate::organisms::components::OrganismKind;

/// What an organism does on its behavior tick.
///
/// The state is a pure function of the organism's kind and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorState {
    /// Glide toward the nearest valid target, then check for collisions
    Seeking,
    /// Step toward a random point, picking a new one on arrival
    Wandering,
    /// Roll for reproduction, otherwise wander
    ReproductionCheck,
}

impl BehaviorState {
    pub fn for_kind(kind: OrganismKind) -> Self {
        match kind {
            OrganismKind::Predator | OrganismKind::Virus => BehaviorState::Seeking,
            OrganismKind::Prey => BehaviorState::Wandering,
            OrganismKind::Reproducer => BehaviorState::ReproductionCheck,
        }
    }
}

/// Kinds an organism of `kind` will seek out. Never includes `kind` itself.
pub fn seek_targets(kind: OrganismKind) -> &'static [OrganismKind] {
    match kind {
        OrganismKind::Predator => &[OrganismKind::Prey, OrganismKind::Virus, OrganismKind::Reproducer],
        OrganismKind::Virus => &[OrganismKind::Prey, OrganismKind::Reproducer],
        OrganismKind::Prey => &[OrganismKind::Predator],
        OrganismKind::Reproducer => &[OrganismKind::Prey, OrganismKind::Virus],
    }
}

/// Determine if `actor` would seek an organism of kind `other`
pub fn is_target_of(actor: OrganismKind, other: OrganismKind) -> bool {
    other != actor && seek_targets(actor).contains(&other)
}

/// Outcome of an actor overlapping a victim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEffect {
    /// Victim dies, actor grows
    Devour,
    /// Victim dies, a new virus appears where it was
    Infect,
}

/// Collision outcome when `actor` overlaps `victim`.
///
/// Directional: only the actor's kind decides. Predators do not eat viruses and
/// viruses do not infect each other; prey and reproducers never act.
pub fn collision_effect(actor: OrganismKind, victim: OrganismKind) -> Option<CollisionEffect> {
    match (actor, victim) {
        (OrganismKind::Predator, OrganismKind::Prey | OrganismKind::Reproducer) => {
            Some(CollisionEffect::Devour)
        }
        (OrganismKind::Virus, victim) if victim != OrganismKind::Virus => Some(CollisionEffect::Infect),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrganismKind::*;

    #[test]
    fn state_follows_kind() {
        assert_eq!(BehaviorState::for_kind(Predator), BehaviorState::Seeking);
        assert_eq!(BehaviorState::for_kind(Virus), BehaviorState::Seeking);
        assert_eq!(BehaviorState::for_kind(Prey), BehaviorState::Wandering);
        assert_eq!(BehaviorState::for_kind(Reproducer), BehaviorState::ReproductionCheck);
    }

    #[test]
    fn no_kind_targets_itself() {
        for kind in OrganismKind::ALL {
            assert!(!seek_targets(kind).contains(&kind));
            assert!(!is_target_of(kind, kind));
        }
    }

    #[test]
    fn predators_chase_viruses_but_cannot_eat_them() {
        assert!(is_target_of(Predator, Virus));
        assert_eq!(collision_effect(Predator, Virus), None);
    }

    #[test]
    fn collision_table() {
        assert_eq!(collision_effect(Predator, Prey), Some(CollisionEffect::Devour));
        assert_eq!(collision_effect(Predator, Reproducer), Some(CollisionEffect::Devour));
        assert_eq!(collision_effect(Predator, Predator), None);

        assert_eq!(collision_effect(Virus, Predator), Some(CollisionEffect::Infect));
        assert_eq!(collision_effect(Virus, Prey), Some(CollisionEffect::Infect));
        assert_eq!(collision_effect(Virus, Reproducer), Some(CollisionEffect::Infect));
        assert_eq!(collision_effect(Virus, Virus), None);

        for victim in OrganismKind::ALL {
            assert_eq!(collision_effect(Prey, victim), None);
            assert_eq!(collision_effect(Reproducer, victim), None);
        }
    }
}
