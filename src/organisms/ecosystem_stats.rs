use std::collections::BTreeMap;

use serde::Serialize;

use crate::organisms::components::{Organism, OrganismKind};

/// Live population counts of the dish
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EcosystemStats {
    /// Total population count
    pub total_population: u32,
    /// Population by organism type; kinds with no members are absent
    pub population_by_type: BTreeMap<OrganismKind, u32>,
}

impl EcosystemStats {
    /// Recount from scratch
    pub fn collect<'a>(organisms: impl IntoIterator<Item = &'a Organism>) -> Self {
        let mut stats = Self::default();
        for organism in organisms {
            stats.total_population += 1;
            *stats.population_by_type.entry(organism.kind()).or_insert(0) += 1;
        }
        stats
    }

    pub fn count(&self, kind: OrganismKind) -> u32 {
        self.population_by_type.get(&kind).copied().unwrap_or(0)
    }

    /// Counter line in the dish's toolbar format
    pub fn summary_line(&self) -> String {
        let mut line = format!("Total Microbes: {}", self.total_population);
        for kind in OrganismKind::ALL {
            line.push_str(&format!(" | {}: {}", kind.label(), self.count(kind)));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_report_zero_for_every_kind() {
        let stats = EcosystemStats::collect(std::iter::empty());
        assert_eq!(stats.total_population, 0);
        for kind in OrganismKind::ALL {
            assert_eq!(stats.count(kind), 0);
        }
        assert_eq!(
            stats.summary_line(),
            "Total Microbes: 0 | PRD: 0 | VRX: 0 | PRY: 0 | REP: 0"
        );
    }
}
