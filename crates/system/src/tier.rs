use batmon_core::IconTier;

/// Inclusive lower bound of each tier, ascending.
const BREAKPOINTS: [(u8, IconTier); 5] = [
    (0,  IconTier::Empty),
    (10, IconTier::Quarter),
    (40, IconTier::Half),
    (60, IconTier::ThreeQuarters),
    (90, IconTier::Full),
];

/// Map a charge percentage to its icon tier.
///
/// Expects `0..=100`; larger values are clamped to 100.
pub fn tier_for(percentage: u8) -> IconTier {
    let percentage = percentage.min(100);
    BREAKPOINTS
        .iter()
        .rev()
        .find(|(lower, _)| percentage >= *lower)
        .map_or(IconTier::Empty, |&(_, tier)| tier)
}
