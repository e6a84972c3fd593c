use ndarray::ArrayD;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use spielgym::prelude::*;
use spielgym_games::{KuhnPoker, RepeatedRps, TicTacToe};

/// Step budget no reference game comes close to
const MAX_STEPS: usize = 100;

fn uniform_actions(
    observations: &AgentMap<ArrayD<f32>>,
    env: &impl MultiAgentEnv,
    rng: &mut StdRng,
) -> AgentMap<Action> {
    observations
        .keys()
        .map(|&agent| {
            let space = env.action_space().get(agent).unwrap().as_discrete().unwrap();
            (agent, space.sample(rng))
        })
        .collect()
}

/// Plays one episode with uniform actions over the full action space and
/// checks the per-step payload contract. Returns the number of steps.
fn check_episode<G: Game>(env: &mut SpielEnv<G>, rng: &mut StdRng, seed: u64) -> usize {
    let (mut obs, info) = env.reset(Some(seed), None).unwrap();
    assert!(info.is_empty());

    let num_agents = env.num_agents();
    let mut terminated_count = 0;
    let mut steps = 0;

    while !obs.is_empty() {
        match env.dynamics() {
            Dynamics::Sequential => assert_eq!(obs.len(), 1),
            Dynamics::Simultaneous => assert_eq!(obs.len(), num_agents),
        }
        for o in obs.values() {
            assert_eq!(o.shape(), &[env.game().observation_tensor_size()]);
        }

        let actions = uniform_actions(&obs, &*env, rng);
        let result = env.step(&actions).unwrap();
        steps += 1;

        assert_eq!(result.rewards.len(), num_agents);
        assert_eq!(result.truncated, DoneFlags::uniform(env.possible_agents(), false));
        assert_eq!(result.terminated.agents.len(), num_agents);
        assert!(result.terminated.agents.values().all(|&t| t == result.terminated.all));
        if result.terminated.all {
            terminated_count += 1;
            assert!(result.observations.is_empty());
        }

        assert!(steps <= MAX_STEPS, "episode did not terminate");
        obs = result.observations;
    }

    assert_eq!(terminated_count, 1);
    steps
}

#[test]
fn test_kuhn_poker_episodes_terminate_once() {
    let mut env = SpielEnv::new(KuhnPoker::new());
    let mut rng = StdRng::seed_from_u64(0);
    for seed in 0..200 {
        let steps = check_episode(&mut env, &mut rng, seed);
        assert!((2..=3).contains(&steps));
    }
}

#[test]
fn test_tic_tac_toe_episodes_terminate_once() {
    let mut env = SpielEnv::new(TicTacToe::new());
    let mut rng = StdRng::seed_from_u64(1);
    for seed in 0..200 {
        let steps = check_episode(&mut env, &mut rng, seed);
        assert!((5..=9).contains(&steps));
    }
}

#[test]
fn test_repeated_rps_episodes_terminate_once() {
    let mut env = SpielEnv::new(RepeatedRps::new(4));
    let mut rng = StdRng::seed_from_u64(2);
    for seed in 0..50 {
        assert_eq!(check_episode(&mut env, &mut rng, seed), 4);
    }
}

#[test]
fn test_kuhn_reset_resolves_both_deals() {
    let mut env = SpielEnv::new(KuhnPoker::new());
    let (obs, _) = env.reset(Some(8), None).unwrap();

    let state = env.state().unwrap();
    assert_eq!(state.cards().len(), 2);
    assert_ne!(state.cards()[0], state.cards()[1]);
    assert!(!state.is_chance_node());
    assert_eq!(obs.keys().copied().collect::<Vec<_>>(), vec![0]);

    let card = state.cards()[0];
    assert_eq!(obs[&0].as_slice().unwrap()[2 + card], 1.0);
}

#[test]
fn test_kuhn_deals_are_uniform() {
    let mut env = SpielEnv::new(KuhnPoker::new());
    let mut counts = [0usize; 3];
    env.reset(Some(123), None).unwrap();
    for _ in 0..3000 {
        env.reset(None, None).unwrap();
        counts[env.state().unwrap().cards()[0]] += 1;
    }
    for count in counts {
        assert!((850..1150).contains(&count), "deal counts {:?}", counts);
    }
}

#[test]
fn test_kuhn_bet_passes_turn_to_player_one() {
    let mut env = SpielEnv::new(KuhnPoker::new());
    env.reset(Some(4), None).unwrap();

    let result = env.step(&AgentMap::from([(0, 1)])).unwrap();
    assert_eq!(result.observations.keys().copied().collect::<Vec<_>>(), vec![1]);
    assert!(!result.terminated.all);
    assert_eq!(result.rewards, AgentMap::from([(0, 0.0), (1, 0.0)]));

    // Player 1 folds
    let result = env.step(&AgentMap::from([(1, 0)])).unwrap();
    assert!(result.terminated.all);
    assert_eq!(result.rewards, AgentMap::from([(0, 1.0), (1, -1.0)]));
}

#[test]
fn test_legal_play_is_zero_sum() {
    let mut env = SpielEnv::new(TicTacToe::new());
    let mut rng = StdRng::seed_from_u64(77);

    for seed in 0..100 {
        let (mut obs, _) = env.reset(Some(seed), None).unwrap();
        let mut last = None;
        loop {
            let Some(&agent) = obs.keys().next() else {
                break;
            };
            let legal = env.state().unwrap().legal_actions();
            let &action = legal.choose(&mut rng).unwrap();
            let result = env.step(&AgentMap::from([(agent, action)])).unwrap();
            obs = result.observations.clone();
            last = Some(result);
        }
        let last = last.unwrap();
        assert!(last.terminated.all);
        let total: f32 = last.rewards.values().sum();
        assert_eq!(Some(total), env.game().utility_sum());
    }
}

#[test]
fn test_illegal_move_substituted_and_penalized() {
    let mut env = SpielEnv::new(TicTacToe::new());
    env.reset(Some(10), None).unwrap();
    env.step(&AgentMap::from([(0, 4)])).unwrap();

    // Player 1 tries the occupied centre
    let result = env.step(&AgentMap::from([(1, 4)])).unwrap();
    let state = env.state().unwrap();

    assert_eq!(state.moves(), 2);
    assert!(state.is_occupied(4));
    let returns = state.returns();
    assert_eq!(result.rewards[&1], returns[1] + DEFAULT_PENALTY);
    assert_eq!(result.rewards[&0], returns[0]);
    assert_eq!(result.observations.keys().copied().collect::<Vec<_>>(), vec![0]);
}

const DEFAULT_PENALTY: f32 = spielgym::env::DEFAULT_ILLEGAL_ACTION_PENALTY;

#[test]
fn test_penalty_does_not_carry_over() {
    let mut env = SpielEnv::new(TicTacToe::new());
    env.reset(Some(10), None).unwrap();
    env.step(&AgentMap::from([(0, 4)])).unwrap();
    let penalized = env.step(&AgentMap::from([(1, 4)])).unwrap();
    assert!(penalized.rewards[&1] < 0.0);

    let legal = env.state().unwrap().legal_actions();
    let next = env.step(&AgentMap::from([(0, legal[0])])).unwrap();
    assert_eq!(next.rewards[&1], env.state().unwrap().returns()[1]);
}

#[test]
fn test_simultaneous_step_applies_joint_action() {
    let mut env = SpielEnv::new(RepeatedRps::new(2));
    let (obs, _) = env.reset(Some(0), None).unwrap();
    assert_eq!(obs.keys().copied().collect::<Vec<_>>(), vec![0, 1]);

    let result = env.step(&AgentMap::from([(0, 0), (1, 2)])).unwrap();
    assert_eq!(env.state().unwrap().history(), &[[0, 2]]);
    assert_eq!(result.observations.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(result.rewards, AgentMap::from([(0, 1.0), (1, -1.0)]));

    let result = env.step(&AgentMap::from([(0, 0), (1, 1)])).unwrap();
    assert!(result.observations.is_empty());
    assert_eq!(result.terminated.get(AgentKey::All), Some(true));
    assert_eq!(result.rewards, AgentMap::from([(0, 0.0), (1, 0.0)]));
}

#[test]
fn test_simultaneous_engine_error_propagates() {
    let mut env = SpielEnv::new(RepeatedRps::new(2));
    env.reset(Some(0), None).unwrap();

    let err = env.step(&AgentMap::from([(0, 0), (1, 7)])).unwrap_err();
    assert!(matches!(
        err,
        SpielError::Game(GameError::IllegalAction { action: 7, .. })
    ));
    assert!(env.state().unwrap().history().is_empty());
}

#[test]
fn test_episode_stats_over_game() {
    let mut env = EpisodeStats::new(SpielEnv::new(RepeatedRps::new(3)));
    env.reset(Some(1), None).unwrap();

    let joint = AgentMap::from([(0, 1), (1, 0)]);
    env.step(&joint).unwrap();
    env.step(&joint).unwrap();
    let result = env.step(&joint).unwrap();

    assert_eq!(result.info.episode_length, Some(3));
    assert_eq!(
        result.info.episode_returns,
        Some(AgentMap::from([(0, 3.0), (1, -3.0)]))
    );
}
