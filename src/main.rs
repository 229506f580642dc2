//! Warmarch - demo campaign runner
//!
//! Generates a random strategic map, raises one army per player and
//! lets the movement AI play a fixed number of turns, printing the
//! events each turn produced.

use clap::Parser;
use tokio::runtime::Runtime;

use warmarch::battle::units::{make_roster, UnitKind};
use warmarch::battle::FieldBattleHost;
use warmarch::campaign::{TurnEvent, TurnOrchestrator};
use warmarch::core::config::AiConfig;
use warmarch::core::error::Result;
use warmarch::core::types::{ArmyId, PlayerId, RegionId};
use warmarch::world::{Army, StrengthMuster, Territory, WorldMap};

#[derive(Parser, Debug)]
#[command(name = "warmarch", about = "Turn-based campaign AI demo")]
struct Args {
    /// Number of turns to play
    #[arg(long, default_value_t = 10)]
    turns: u32,

    /// Number of competing players
    #[arg(long, default_value_t = 2)]
    players: u32,

    /// Regions on the generated map
    #[arg(long, default_value_t = 32)]
    regions: u32,

    /// World and battle seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional TOML file overriding the AI defaults
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Emit each turn's events as a JSON line instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warmarch=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AiConfig::load(path)?,
        None => AiConfig::default(),
    };
    config.validate()?;

    tracing::info!(
        turns = args.turns,
        players = args.players,
        regions = args.regions,
        seed = args.seed,
        "campaign starting"
    );

    let mut map = WorldMap::generate_demo(args.regions as usize, args.players, args.seed);
    let mut armies = raise_starting_armies(&map, args.players);

    let orchestrator = TurnOrchestrator::new(&config);
    let battle = FieldBattleHost::new(args.seed, config.battle_max_rounds);
    let muster = StrengthMuster::new(
        40,
        make_roster(&[(UnitKind::Peasants, 60), (UnitKind::Swordsmen, 20)]),
    );

    let rt = Runtime::new()?;
    for turn in 1..=args.turns {
        if !args.json {
            println!("=== Turn {} ===", turn);
        }
        for player in 1..=args.players {
            let player = PlayerId(player);
            let events = rt.block_on(orchestrator.run_turn(
                &mut map,
                &mut armies,
                &battle,
                &muster,
                player,
            ))?;
            if args.json {
                println!("{}", serde_json::to_string(&events)?);
            } else {
                print_turn(player, &events);
            }
        }
    }

    for player in 1..=args.players {
        let player = PlayerId(player);
        let held = (0..map.region_count())
            .filter(|&idx| map.region_owner(RegionId(idx as u32)) == Some(player))
            .count();
        println!("Player {} holds {} regions.", player.0, held);
    }
    Ok(())
}

/// One army per player, raised at that player's fortified home
fn raise_starting_armies(map: &WorldMap, players: u32) -> Vec<Army> {
    let mut armies = Vec::new();
    for player in 1..=players {
        let player = PlayerId(player);
        let home = map
            .regions()
            .iter()
            .find(|region| region.fortified && region.is_owned_by(player))
            .map(|region| region.id);
        if let Some(home) = home {
            armies.push(
                Army::new(
                    ArmyId(player.0),
                    &format!("host of player {}", player.0),
                    player,
                    home,
                )
                .with_unit(UnitKind::Peasants, 60)
                .with_unit(UnitKind::Swordsmen, 20),
            );
        } else {
            tracing::warn!(player = player.0, "no home region, player fields no army");
        }
    }
    armies
}

fn print_turn(player: PlayerId, events: &[TurnEvent]) {
    for event in events {
        match event {
            TurnEvent::MoveStarted { army, path, mp_spent } => {
                println!(
                    "  P{} army {} marched {} legs for {} MP",
                    player.0,
                    army.0,
                    path.len() - 1,
                    mp_spent
                );
            }
            TurnEvent::BattleStarted { army, region } => {
                println!("  P{} army {} gives battle at region {}", player.0, army.0, region.0);
            }
            TurnEvent::RegionConquered { region, by } => {
                println!("  Region {} falls to player {}", region.0, by.0);
            }
            TurnEvent::ArmyReinforced { army, region } => {
                println!("  P{} army {} reinforced at region {}", player.0, army.0, region.0);
            }
            _ => {}
        }
    }
}
