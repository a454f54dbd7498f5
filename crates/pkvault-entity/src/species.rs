//! Species reference oracle.
//!
//! Entity records never interpret species data themselves; they only need an
//! upper bound for the validity check of placeholder records.

/// Highest species ordinal introduced by Gen 4.
pub const MAX_SPECIES_ID_4: u16 = 493;

/// Read-only species lookup consulted by validity checks.
pub trait SpeciesTable: std::fmt::Debug + Send + Sync {
    /// Highest valid species ordinal.
    fn max_species_id(&self) -> u16;

    /// Check whether `species` is within the table.
    fn contains(&self, species: u16) -> bool {
        species <= self.max_species_id()
    }
}

/// The Gen 4 national dex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gen4Species;

/// Shared instance used by the built-in formats.
pub static GEN4_SPECIES: Gen4Species = Gen4Species;

impl SpeciesTable for Gen4Species {
    fn max_species_id(&self) -> u16 {
        MAX_SPECIES_ID_4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen4_bounds() {
        assert!(GEN4_SPECIES.contains(0));
        assert!(GEN4_SPECIES.contains(493));
        assert!(!GEN4_SPECIES.contains(494));
    }
}
