use clap::Parser;
use skirmish::ai::{ChasePolicy, CommandSource, RandomPolicy};
use skirmish::command::Command;
use skirmish::events::Direction;
use skirmish::game::Game;
use tracing::info;
use tracing_subscriber::EnvFilter;

const TICK_DT: f32 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "skirmish", about = "Headless player-vs-NPC skirmish demo")]
struct Args {
    /// Number of simulation ticks to run (60 per second)
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Seed for the idle-variant and random-AI RNGs
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Use the chasing AI instead of the random one
    #[arg(long)]
    chase: bool,
}

/// Stand-in for an input device: a fixed patrol-attack-guard script the
/// demo replays every four seconds.
fn scripted_command(tick: u32) -> Command {
    match tick % 240 {
        0..=59 => Command::Move(Direction::Up),
        60..=119 => Command::Move(Direction::DownRight),
        120..=139 => Command::Attack,
        140..=159 => Command::Defend,
        _ => Command::None,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let ai: Box<dyn CommandSource> = if args.chase {
        Box::new(ChasePolicy)
    } else {
        Box::new(RandomPolicy::new(args.seed))
    };

    let mut game = Game::new(ai, args.seed).expect("state tables are statically valid");

    for tick in 0..args.ticks {
        game.update(scripted_command(tick), TICK_DT);
    }

    let (player, npc) = game.snapshots();
    info!(
        t = game.clock(),
        name = player.name,
        state = player.state_name.unwrap_or("?"),
        x = player.position.x,
        y = player.position.y,
        health = player.health_fraction,
        "final player snapshot"
    );
    info!(
        name = npc.name,
        state = npc.state_name.unwrap_or("?"),
        x = npc.position.x,
        y = npc.position.y,
        health = npc.health_fraction,
        "final npc snapshot"
    );
}
