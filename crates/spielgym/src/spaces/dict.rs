//! Per-agent space mapping

use super::{DynSpace, Space};
use crate::env::AgentMap;
use crate::game::AgentId;
use ndarray::ArrayD;
use rand::Rng;

/// Mapping from agent id to that agent's space
#[derive(Clone, Debug, PartialEq)]
pub struct Dict {
    /// Sub-space of every agent
    pub spaces: AgentMap<DynSpace>,
    /// Cached total shape (sum of all sub-space sizes)
    shape: Vec<usize>,
}

impl Dict {
    pub fn new(spaces: AgentMap<DynSpace>) -> Self {
        let total: usize = spaces
            .values()
            .map(|s| s.shape().iter().product::<usize>())
            .sum();
        Self {
            spaces,
            shape: vec![total],
        }
    }

    /// Give every agent in `agents` the same space
    pub fn per_agent(agents: &[AgentId], space: DynSpace) -> Self {
        Self::new(agents.iter().map(|&id| (id, space.clone())).collect())
    }

    /// Get the space of one agent
    pub fn get(&self, agent: AgentId) -> Option<&DynSpace> {
        self.spaces.get(&agent)
    }

    pub fn agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.spaces.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }
}

impl Space for Dict {
    type Sample = AgentMap<ArrayD<f32>>;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Sample {
        self.spaces
            .iter()
            .map(|(&id, space)| (id, space.sample(rng)))
            .collect()
    }

    /// Every present agent's value must fit its space; absent agents are
    /// allowed since not every agent acts at every step.
    fn contains(&self, value: &Self::Sample) -> bool {
        value.iter().all(|(id, v)| {
            self.spaces
                .get(id)
                .map(|space| space.contains(v))
                .unwrap_or(false)
        })
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spaces::{Box as BoxSpace, Discrete};
    use rand::SeedableRng;

    #[test]
    fn test_per_agent() {
        let dict = Dict::per_agent(&[0, 1, 2], DynSpace::Discrete(Discrete::new(4)));

        assert_eq!(dict.len(), 3);
        assert_eq!(dict.agents().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(dict.get(1), Some(&DynSpace::Discrete(Discrete::new(4))));
        assert!(dict.get(3).is_none());
        assert_eq!(dict.shape(), &[3]);
    }

    #[test]
    fn test_contains_partial_sample() {
        let dict = Dict::per_agent(&[0, 1], DynSpace::Box(BoxSpace::uniform(&[2], 0.0, 1.0)));
        let mut rng = rand::rngs::StdRng::seed_from_u64(9);

        let mut sample = dict.sample(&mut rng);
        assert!(dict.contains(&sample));

        sample.remove(&1);
        assert!(dict.contains(&sample));

        sample.insert(5, ArrayD::zeros(ndarray::IxDyn(&[2])));
        assert!(!dict.contains(&sample));
    }
}
