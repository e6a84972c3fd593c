//! Environment adapter over a [`Game`].

use super::chance::solve_chance_nodes;
use super::{
    AgentMap, DoneFlags, EnvInfo, MultiAgentEnv, MultiAgentStepResult, RecoveryPolicy,
    RenderMode, ResetOptions, SpielEnvConfig,
};
use crate::game::{Action, AgentId, Dynamics, Game, GameError, Player, State};
use crate::spaces::{Box as BoxSpace, Dict, Discrete, DynSpace};
use crate::{Result, SpielError};
use ndarray::{Array1, ArrayD};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Multi-agent environment driving one playthrough of a game at a time.
///
/// Chance nodes never surface to the caller: they are sampled away before
/// observations are produced and before actions are applied.
pub struct SpielEnv<G: Game> {
    game: G,
    dynamics: Dynamics,
    possible_agents: Vec<AgentId>,
    observation_space: Dict,
    action_space: Dict,
    /// `None` until the first reset
    state: Option<G::State>,
    rng: StdRng,
    recovery: RecoveryPolicy,
}

impl<G: Game> SpielEnv<G> {
    /// Create an environment with the default configuration
    pub fn new(game: G) -> Self {
        Self::with_config(game, SpielEnvConfig::default())
    }

    pub fn with_config(game: G, config: SpielEnvConfig) -> Self {
        let possible_agents: Vec<AgentId> = (0..game.num_players() as AgentId).collect();
        let observation_space = Dict::per_agent(
            &possible_agents,
            DynSpace::Box(BoxSpace::unbounded(&[game.observation_tensor_size()])),
        );
        let action_space = Dict::per_agent(
            &possible_agents,
            DynSpace::Discrete(Discrete::new(game.num_distinct_actions())),
        );
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::debug!(
            game = game.name(),
            players = possible_agents.len(),
            dynamics = %game.dynamics(),
            "Created environment"
        );

        Self {
            dynamics: game.dynamics(),
            game,
            possible_agents,
            observation_space,
            action_space,
            state: None,
            rng,
            recovery: config.recovery,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// The current playthrough, if the environment has been reset
    pub fn state(&self) -> Option<&G::State> {
        self.state.as_ref()
    }

    pub fn dynamics(&self) -> Dynamics {
        self.dynamics
    }

    pub fn recovery(&self) -> RecoveryPolicy {
        self.recovery
    }

    /// Observations for the agents whose turn it is, after draining chance
    /// nodes. Empty once the state is terminal.
    fn get_obs(&mut self) -> Result<AgentMap<ArrayD<f32>>> {
        let state = self.state.as_mut().ok_or(SpielError::NotReset)?;
        solve_chance_nodes(state, &mut self.rng)?;

        if state.is_terminal() {
            return Ok(AgentMap::new());
        }

        let size = self.game.observation_tensor_size();
        match self.dynamics {
            Dynamics::Sequential => match state.current_player() {
                Player::Agent(id) => {
                    let obs = flat_observation(&*state, id, size)?;
                    Ok(AgentMap::from([(id, obs)]))
                }
                other => Err(SpielError::UnexpectedNode(other)),
            },
            Dynamics::Simultaneous => {
                if !state.is_simultaneous_node() {
                    return Err(SpielError::NotSimultaneous(state.current_player()));
                }
                self.possible_agents
                    .iter()
                    .map(|&id| flat_observation(&*state, id, size).map(|obs| (id, obs)))
                    .collect()
            }
        }
    }
}

/// The agent's observation tensor as a 1-D vector of `size` floats.
fn flat_observation<S: State + ?Sized>(
    state: &S,
    agent: AgentId,
    size: usize,
) -> Result<ArrayD<f32>> {
    let tensor = state.observation_tensor(agent);
    if tensor.len() != size {
        return Err(SpielError::ShapeMismatch {
            expected: vec![size],
            actual: tensor.shape().to_vec(),
        });
    }
    Ok(Array1::from_iter(tensor.iter().copied()).into_dyn())
}

impl<G: Game> MultiAgentEnv for SpielEnv<G> {
    fn possible_agents(&self) -> &[AgentId] {
        &self.possible_agents
    }

    fn observation_space(&self) -> &Dict {
        &self.observation_space
    }

    fn action_space(&self) -> &Dict {
        &self.action_space
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        _options: Option<&ResetOptions>,
    ) -> Result<(AgentMap<ArrayD<f32>>, EnvInfo)> {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.state = Some(self.game.new_initial_state());
        tracing::debug!(game = self.game.name(), ?seed, "Episode reset");

        Ok((self.get_obs()?, EnvInfo::new()))
    }

    fn step(&mut self, actions: &AgentMap<Action>) -> Result<MultiAgentStepResult> {
        let state = self.state.as_mut().ok_or(SpielError::NotReset)?;
        // A decision can be preceded by chance, e.g. right after a
        // simultaneous move resolves.
        solve_chance_nodes(state, &mut self.rng)?;

        let mut penalties = AgentMap::new();
        match self.dynamics {
            Dynamics::Sequential => {
                let agent = match state.current_player() {
                    Player::Agent(id) => id,
                    Player::Terminal => return Err(SpielError::EpisodeFinished),
                    other => return Err(SpielError::UnexpectedNode(other)),
                };
                let &action = actions
                    .get(&agent)
                    .ok_or(SpielError::MissingAction(agent))?;

                match state.apply_action(action) {
                    Ok(()) => {}
                    Err(error @ GameError::IllegalAction { .. }) => {
                        let penalty =
                            self.recovery
                                .recover(state, agent, action, error, &mut self.rng)?;
                        penalties.insert(agent, penalty);
                    }
                    Err(error) => return Err(error.into()),
                }
            }
            Dynamics::Simultaneous => {
                match state.current_player() {
                    Player::Simultaneous => {}
                    Player::Terminal => return Err(SpielError::EpisodeFinished),
                    other => return Err(SpielError::NotSimultaneous(other)),
                }
                let joint = self
                    .possible_agents
                    .iter()
                    .map(|id| actions.get(id).copied().ok_or(SpielError::MissingAction(*id)))
                    .collect::<Result<Vec<_>>>()?;
                state.apply_actions(&joint)?;
            }
        }

        let observations = self.get_obs()?;

        let state = self.state.as_ref().ok_or(SpielError::NotReset)?;
        let mut rewards: AgentMap<f32> = self
            .possible_agents
            .iter()
            .copied()
            .zip(state.returns())
            .collect();
        for (agent, penalty) in penalties {
            *rewards.entry(agent).or_insert(0.0) += penalty;
        }

        let is_terminal = state.is_terminal();
        tracing::debug!(
            game = self.game.name(),
            terminal = is_terminal,
            next = ?observations.keys().collect::<Vec<_>>(),
            "Step"
        );

        Ok(MultiAgentStepResult {
            observations,
            rewards,
            terminated: DoneFlags::uniform(&self.possible_agents, is_terminal),
            truncated: DoneFlags::uniform(&self.possible_agents, false),
            info: EnvInfo::new(),
        })
    }

    fn render(&self, mode: Option<RenderMode>) -> Option<String> {
        let state = self.state.as_ref()?;
        match mode? {
            RenderMode::Human => {
                println!("{}", state);
                None
            }
            RenderMode::Ansi => Some(state.to_string()),
        }
    }
}
