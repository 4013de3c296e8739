pub mod organisms;
pub mod view;
pub mod world;

pub use organisms::{EcosystemStats, EcosystemTuning, OrganismId, OrganismKind, OrganismSnapshot};
pub use world::Arena;
