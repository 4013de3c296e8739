use glam::Vec2;

use crate::organisms::{is_target_of, Organism, OrganismId};

/// Axis-aligned square footprint of an organism
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub min: Vec2,
    pub size: f32,
}

impl Footprint {
    pub fn new(min: Vec2, size: f32) -> Self {
        Self { min, size }
    }

    pub fn of(organism: &Organism) -> Self {
        Self::new(organism.position(), organism.size())
    }

    /// Strict overlap on both axes; shared edges do not count
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.min.x < other.min.x + other.size
            && self.min.x + self.size > other.min.x
            && self.min.y < other.min.y + other.size
            && self.min.y + self.size > other.min.y
    }
}

/// Clamp a top-left corner so a body of `size` stays inside the arena
pub fn clamp_to_bounds(position: Vec2, size: f32, width: f32, height: f32) -> Vec2 {
    let max = Vec2::new((width - size).max(0.0), (height - size).max(0.0));
    position.clamp(Vec2::ZERO, max)
}

/// Nearest organism `seeker` would target, by distance between stored positions.
///
/// Ties go to the first candidate encountered.
pub fn nearest_target<'a>(
    seeker: &Organism,
    organisms: impl IntoIterator<Item = &'a Organism>,
) -> Option<(OrganismId, Vec2)> {
    let mut best: Option<(OrganismId, Vec2, f32)> = None;
    for other in organisms {
        if other.id() == seeker.id() || !is_target_of(seeker.kind(), other.kind()) {
            continue;
        }
        let distance = seeker.position().distance(other.position());
        match best {
            Some((_, _, closest)) if distance >= closest => {}
            _ => best = Some((other.id(), other.position(), distance)),
        }
    }
    best.map(|(id, position, _)| (id, position))
}
