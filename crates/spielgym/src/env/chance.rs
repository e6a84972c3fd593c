//! Chance-node resolution.

use crate::game::{Player, State};
use crate::{Result, SpielError};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Tolerated deviation of a chance distribution's total mass from 1.
const MASS_TOLERANCE: f64 = 1e-6;

/// Sample and apply chance outcomes until the state reaches a non-chance
/// node. Chance nodes may chain; each one consumes exactly one draw.
///
/// # Returns
/// The number of chance outcomes applied
pub fn solve_chance_nodes<S, R>(state: &mut S, rng: &mut R) -> Result<usize>
where
    S: State + ?Sized,
    R: Rng + ?Sized,
{
    let mut resolved = 0;
    while state.is_chance_node() {
        debug_assert_eq!(state.current_player(), Player::Chance);

        let outcomes = state.chance_outcomes();
        let mass: f64 = outcomes.iter().map(|(_, p)| p).sum();
        if (mass - 1.0).abs() > MASS_TOLERANCE {
            tracing::warn!(mass, "Chance outcome probabilities do not sum to 1, normalizing");
        }

        let dist = WeightedIndex::new(outcomes.iter().map(|(_, p)| *p))
            .map_err(|e| SpielError::ChanceOutcomes(e.to_string()))?;
        let (action, prob) = outcomes[dist.sample(rng)];
        tracing::trace!(action, prob, "Chance outcome");

        state.apply_action(action)?;
        resolved += 1;
    }
    Ok(resolved)
}
