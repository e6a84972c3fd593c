//! spielgym CLI
//!
//! Command-line interface for running game environments with a random policy.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ndarray::ArrayD;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use spielgym::prelude::*;
use spielgym_games::{KuhnPoker, RepeatedRps, TicTacToe, GAME_NAMES};

#[derive(Parser)]
#[command(name = "spiel")]
#[command(version, about = "spielgym - multi-agent environments over game engines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that build an environment
#[derive(clap::Args)]
struct EnvArgs {
    /// Random seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Environment config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rounds for repeated_rps
    #[arg(long, default_value = "3")]
    rounds: usize,
}

impl EnvArgs {
    fn env_config(&self) -> Result<SpielEnvConfig> {
        let mut config = match &self.config {
            Some(path) => SpielEnvConfig::from_json_file(path)?,
            None => SpielEnvConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List available games
    List,

    /// Evaluate a random policy over full episodes
    Eval {
        /// Game name
        game: String,

        /// Number of episodes
        #[arg(long, default_value = "10")]
        episodes: usize,

        #[command(flatten)]
        env: EnvArgs,
    },

    /// Demo: step a game with random actions and render it
    Demo {
        /// Game name
        #[arg(default_value = "tic_tac_toe")]
        game: String,

        /// Number of steps
        #[arg(long, default_value = "20")]
        steps: usize,

        /// Print each step as a JSON line instead of rendering
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        env: EnvArgs,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => list_games(),
        Commands::Eval {
            game,
            episodes,
            env,
        } => {
            let config = env.env_config()?;
            match game.as_str() {
                "kuhn_poker" => eval(KuhnPoker::new(), episodes, config),
                "tic_tac_toe" => eval(TicTacToe::new(), episodes, config),
                "repeated_rps" => eval(RepeatedRps::new(env.rounds), episodes, config),
                other => bail!("Unknown game: {} (try `spiel list`)", other),
            }
        }
        Commands::Demo {
            game,
            steps,
            json,
            env,
        } => {
            let config = env.env_config()?;
            match game.as_str() {
                "kuhn_poker" => demo(KuhnPoker::new(), steps, json, config),
                "tic_tac_toe" => demo(TicTacToe::new(), steps, json, config),
                "repeated_rps" => demo(RepeatedRps::new(env.rounds), steps, json, config),
                other => bail!("Unknown game: {} (try `spiel list`)", other),
            }
        }
    }
}

fn list_games() -> Result<()> {
    println!("Available games:");
    for &name in GAME_NAMES {
        let (players, dynamics, actions) = match name {
            "kuhn_poker" => describe(&KuhnPoker::new()),
            "tic_tac_toe" => describe(&TicTacToe::new()),
            "repeated_rps" => describe(&RepeatedRps::default()),
            _ => continue,
        };
        println!(
            "  {:<14} {} players, {}, {} actions",
            name, players, dynamics, actions
        );
    }
    Ok(())
}

fn describe<G: Game>(game: &G) -> (usize, Dynamics, usize) {
    (
        game.num_players(),
        game.dynamics(),
        game.num_distinct_actions(),
    )
}

/// Policy RNG, offset from the environment seed so the two streams differ.
fn policy_rng(config: &SpielEnvConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    }
}

/// Uniform actions over the full action space for every agent observed.
fn random_actions(
    observations: &AgentMap<ArrayD<f32>>,
    action_space: &Dict,
    rng: &mut StdRng,
) -> AgentMap<Action> {
    observations
        .keys()
        .filter_map(|&agent| {
            let space = action_space.get(agent)?.as_discrete()?;
            Some((agent, space.sample(rng)))
        })
        .collect()
}

fn eval<G: Game>(game: G, episodes: usize, config: SpielEnvConfig) -> Result<()> {
    println!("Starting evaluation: {} for {} episodes", game.name(), episodes);

    let mut rng = policy_rng(&config);
    let mut env = EpisodeStats::new(SpielEnv::with_config(game, config));
    let logger = ConsoleLogger::new();
    let mut summary = EpisodeSummary::new();

    for episode in 0..episodes as u64 {
        let (mut observations, _) = env.reset(None, None)?;
        loop {
            let actions = random_actions(&observations, env.action_space(), &mut rng);
            let result = env.step(&actions)?;
            if result.done() {
                let returns = result.info.episode_returns.unwrap_or_default();
                let length = result.info.episode_length.unwrap_or(0);
                logger.log_episode(episode, length, &returns);
                summary.record(length, &returns);
                break;
            }
            observations = result.observations;
        }
    }

    logger.log_summary(&summary);
    println!("Episodes: {}", summary.episodes);
    println!("Mean length: {:.2}", summary.mean_length());
    for (agent, ret) in summary.mean_returns() {
        println!("Mean return agent {}: {:.4}", agent, ret);
    }
    Ok(())
}

fn demo<G: Game>(game: G, steps: usize, json: bool, config: SpielEnvConfig) -> Result<()> {
    tracing::info!(game = game.name(), steps, "Running demo");

    let mut rng = policy_rng(&config);
    let mut env = SpielEnv::with_config(game, config);
    let (mut observations, _) = env.reset(None, None)?;
    if !json {
        env.render(Some(RenderMode::Human));
    }

    for step in 0..steps {
        let actions = random_actions(&observations, env.action_space(), &mut rng);
        let result = env.step(&actions)?;

        if json {
            let record = serde_json::json!({
                "step": step,
                "actions": actions,
                "rewards": result.rewards,
                "terminated": result.terminated,
                "truncated": result.truncated,
            });
            println!("{}", record);
        } else {
            println!("-- step {} actions {:?}", step, actions);
            env.render(Some(RenderMode::Human));
        }

        if result.done() {
            tracing::info!(step, rewards = ?result.rewards, "Episode ended, resetting");
            observations = env.reset(None, None)?.0;
        } else {
            observations = result.observations;
        }
    }
    Ok(())
}
