//! Environment wrappers for common functionality.

use super::{AgentMap, EnvInfo, MultiAgentEnv, MultiAgentStepResult, RenderMode, ResetOptions};
use crate::game::{Action, AgentId};
use crate::spaces::Dict;
use crate::Result;
use ndarray::ArrayD;

/// Wrapper that tracks episode statistics (length and final returns).
///
/// Rewards from game environments are cumulative, so the rewards of the
/// terminating step are the episode returns.
pub struct EpisodeStats<E: MultiAgentEnv> {
    env: E,
    episode_length: u32,
}

impl<E: MultiAgentEnv> EpisodeStats<E> {
    /// Wrap an environment with episode statistics tracking
    pub fn new(env: E) -> Self {
        Self {
            env,
            episode_length: 0,
        }
    }

    /// Get a reference to the inner environment
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Get a mutable reference to the inner environment
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }
}

impl<E: MultiAgentEnv> MultiAgentEnv for EpisodeStats<E> {
    fn possible_agents(&self) -> &[AgentId] {
        self.env.possible_agents()
    }

    fn observation_space(&self) -> &Dict {
        self.env.observation_space()
    }

    fn action_space(&self) -> &Dict {
        self.env.action_space()
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&ResetOptions>,
    ) -> Result<(AgentMap<ArrayD<f32>>, EnvInfo)> {
        self.episode_length = 0;
        self.env.reset(seed, options)
    }

    fn step(&mut self, actions: &AgentMap<Action>) -> Result<MultiAgentStepResult> {
        let mut result = self.env.step(actions)?;
        self.episode_length += 1;

        if result.done() {
            result.info = result
                .info
                .with_episode_stats(result.rewards.clone(), self.episode_length);
            self.episode_length = 0;
        }

        Ok(result)
    }

    fn render(&self, mode: Option<RenderMode>) -> Option<String> {
        self.env.render(mode)
    }

    fn num_agents(&self) -> usize {
        self.env.num_agents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::DoneFlags;
    use crate::spaces::{Box as BoxSpace, Discrete, DynSpace};
    use ndarray::IxDyn;

    // Single agent, ends after five steps, reward equals step count
    struct Countdown {
        agents: Vec<AgentId>,
        obs_space: Dict,
        act_space: Dict,
        steps: u32,
    }

    impl Countdown {
        fn new() -> Self {
            let agents = vec![0];
            Self {
                obs_space: Dict::per_agent(&agents, DynSpace::Box(BoxSpace::unbounded(&[1]))),
                act_space: Dict::per_agent(&agents, DynSpace::Discrete(Discrete::new(2))),
                agents,
                steps: 0,
            }
        }
    }

    impl MultiAgentEnv for Countdown {
        fn possible_agents(&self) -> &[AgentId] {
            &self.agents
        }
        fn observation_space(&self) -> &Dict {
            &self.obs_space
        }
        fn action_space(&self) -> &Dict {
            &self.act_space
        }
        fn reset(
            &mut self,
            _seed: Option<u64>,
            _options: Option<&ResetOptions>,
        ) -> Result<(AgentMap<ArrayD<f32>>, EnvInfo)> {
            self.steps = 0;
            Ok((
                AgentMap::from([(0, ArrayD::zeros(IxDyn(&[1])))]),
                EnvInfo::new(),
            ))
        }
        fn step(&mut self, _actions: &AgentMap<Action>) -> Result<MultiAgentStepResult> {
            self.steps += 1;
            let done = self.steps >= 5;
            Ok(MultiAgentStepResult {
                observations: AgentMap::new(),
                rewards: AgentMap::from([(0, self.steps as f32)]),
                terminated: DoneFlags::uniform(&self.agents, done),
                truncated: DoneFlags::uniform(&self.agents, false),
                info: EnvInfo::new(),
            })
        }
    }

    #[test]
    fn test_episode_stats() {
        let mut wrapped = EpisodeStats::new(Countdown::new());
        wrapped.reset(None, None).unwrap();

        let action = AgentMap::from([(0, 0)]);
        for _ in 0..4 {
            let result = wrapped.step(&action).unwrap();
            assert!(!result.done());
            assert!(result.info.episode_returns.is_none());
        }

        let result = wrapped.step(&action).unwrap();
        assert!(result.done());
        assert_eq!(result.info.get("episode_length"), Some(5.0));
        assert_eq!(result.info.episode_returns, Some(AgentMap::from([(0, 5.0)])));
    }

    #[test]
    fn test_reset_clears_length() {
        let mut wrapped = EpisodeStats::new(Countdown::new());
        wrapped.reset(None, None).unwrap();
        wrapped.step(&AgentMap::from([(0, 1)])).unwrap();

        wrapped.reset(None, None).unwrap();
        for _ in 0..4 {
            wrapped.step(&AgentMap::from([(0, 1)])).unwrap();
        }
        let result = wrapped.step(&AgentMap::from([(0, 1)])).unwrap();
        assert_eq!(result.info.episode_length, Some(5));
        assert_eq!(wrapped.inner().steps, 5);
    }
}
