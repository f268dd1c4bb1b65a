use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use connect_four::ai::{hint_at_depth, Difficulty};
use connect_four::config::AppConfig;
use connect_four::game::{GameOutcome, GameState, Player};
use connect_four::record::GameMode;
use connect_four::session::GameSession;
use connect_four::store::{GameQuery, GameStore, JsonFileStore};

/// Play Connect Four against the computer or watch it play itself.
#[derive(Parser)]
#[command(name = "connect-four", about = "Connect Four with a minimax opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play on the terminal; columns are entered as 0-6
    Play {
        /// local, ai_easy or ai_hard
        #[arg(long, default_value = "ai_hard")]
        mode: GameMode,

        /// Id of the human player, for statistics
        #[arg(long)]
        player_id: Option<String>,

        /// Do not store the finished game
        #[arg(long)]
        no_save: bool,
    },
    /// Let two computer players play each other
    Watch {
        #[arg(long, value_enum, default_value = "hard")]
        red: Tier,

        #[arg(long, value_enum, default_value = "easy")]
        yellow: Tier,

        /// Seed for random players
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Suggest a move for the side to play after the given moves
    Hint {
        /// Comma-separated columns, Red first (e.g. 3,3,4)
        #[arg(long, value_delimiter = ',')]
        moves: Vec<usize>,
    },
    /// Replay a stored game and print the final board
    Replay { id: String },
    /// List stored games, newest first
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[arg(long)]
        mode: Option<GameMode>,

        /// Only games this player id took part in
        #[arg(long)]
        player: Option<String>,
    },
    /// Show a player's statistics
    Stats { player_id: String },
    /// Print the default configuration as TOML
    DefaultConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Tier {
    Easy,
    Hard,
}

impl From<Tier> for Difficulty {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Easy => Difficulty::Easy,
            Tier::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Command::Play {
            mode,
            player_id,
            no_save,
        } => play(&config, mode, player_id, !no_save),
        Command::Watch { red, yellow, seed } => watch(&config, red.into(), yellow.into(), seed),
        Command::Hint { moves } => {
            let state = replay_columns(&moves)?;
            if state.is_terminal() {
                bail!("the game is already over");
            }
            let player = state.current_player();
            println!("{}", state.board());
            match hint_at_depth(state.board(), player, config.ai.search_depth) {
                Some(col) => println!("{} should play column {col}", player.name()),
                None => println!("no legal moves"),
            }
            Ok(())
        }
        Command::Replay { id } => {
            let store = open_store(&config)?;
            let record = store.get_game(&id)?;
            let state = record.replay().context("stored game does not replay")?;
            println!("{} ({} moves)", record.mode.label(), record.moves.len());
            println!("{}", state.board());
            print_outcome(&state);
            Ok(())
        }
        Command::History {
            limit,
            mode,
            player,
        } => {
            let store = open_store(&config)?;
            let games = store.list_games(&GameQuery {
                limit,
                mode,
                player_id: player,
            })?;
            for game in games {
                let winner = match game.outcome()? {
                    GameOutcome::Winner(p) => p.name(),
                    GameOutcome::Draw => "Draw",
                };
                println!(
                    "{}  {:<11}  {:<6}  {:>2} moves",
                    game.id,
                    game.mode.label(),
                    winner,
                    game.moves.len()
                );
            }
            Ok(())
        }
        Command::Stats { player_id } => {
            let mut store = open_store(&config)?;
            let stats = store.get_statistics(&player_id)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            println!("win rate: {:.0}%", stats.win_rate() * 100.0);
            Ok(())
        }
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml());
            Ok(())
        }
    }
}

fn open_store(config: &AppConfig) -> Result<JsonFileStore> {
    JsonFileStore::open(&config.store.data_dir)
        .with_context(|| format!("opening store at {}", config.store.data_dir.display()))
}

fn replay_columns(moves: &[usize]) -> Result<GameState> {
    let mut state = GameState::initial();
    for (i, &col) in moves.iter().enumerate() {
        state = state
            .apply_move(col)
            .map_err(|e| anyhow::anyhow!("move {} (column {col}) is illegal: {e:?}", i + 1))?;
    }
    Ok(state)
}

fn print_outcome(state: &GameState) {
    match state.outcome() {
        Some(GameOutcome::Winner(player)) => {
            let line: Vec<String> = state
                .winning_line()
                .map(|l| {
                    l.positions()
                        .iter()
                        .map(|p| format!("({},{})", p.row, p.col))
                        .collect()
                })
                .unwrap_or_default();
            println!("{} wins: {}", player.name(), line.join(" "));
        }
        Some(GameOutcome::Draw) => println!("Draw"),
        None => println!("In progress"),
    }
}

fn play(config: &AppConfig, mode: GameMode, player_id: Option<String>, save: bool) -> Result<()> {
    let mut session = GameSession::new(mode, &config.ai)?;
    if let Some(id) = player_id {
        session = session.with_player_id(id);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}", session.state().board());
        if session.state().is_terminal() {
            print_outcome(session.state());
            break;
        }

        if session.is_ai_turn() {
            std::thread::sleep(session.ai_delay());
            let col = session.ai_turn()?;
            println!("AI plays column {col}");
            continue;
        }

        let player = session.state().current_player();
        print!("{} to move [0-6, h = hint, r = restart, q = quit]: ", player.name());
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        match line?.trim() {
            "q" => return Ok(()),
            "h" => match session.hint() {
                Some(col) => println!("Hint: column {col}"),
                None => println!("No hint available"),
            },
            "r" => session.reset(),
            input => match input.parse::<usize>() {
                Ok(col) => {
                    if let Err(e) = session.play(col) {
                        println!("{e}");
                    }
                }
                Err(_) => println!("enter a column number"),
            },
        }
    }

    if save {
        let mut store = open_store(config)?;
        let record = session.finish(&mut store)?;
        println!("saved game {}", record.id);
    }
    Ok(())
}

fn watch(config: &AppConfig, red: Difficulty, yellow: Difficulty, seed: Option<u64>) -> Result<()> {
    let depth = config.ai.search_depth;
    let seed = seed.or(config.ai.seed);
    let mut red_agent = red.agent(depth, seed);
    let mut yellow_agent = yellow.agent(depth, seed.map(|s| s.wrapping_add(1)));
    info!(red = red_agent.name(), yellow = yellow_agent.name(), depth, "watching");

    let mut state = GameState::initial();
    while !state.is_terminal() {
        let player = state.current_player();
        let agent = match player {
            Player::Red => &mut red_agent,
            Player::Yellow => &mut yellow_agent,
        };
        let Some(col) = agent.select_action(state.board(), player) else {
            break;
        };
        state = state
            .apply_move(col)
            .map_err(|e| anyhow::anyhow!("{} chose illegal column {col}: {e:?}", agent.name()))?;
        println!("{} -> {col}", player.name());
    }

    println!("{}", state.board());
    print_outcome(&state);
    Ok(())
}
