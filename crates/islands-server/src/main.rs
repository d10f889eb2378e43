//! Islands simulation: plays one scripted game end to end through the game actor.

use anyhow::bail;
use islands_core::{Coordinate, Player};
use islands_server::{Command, GameHandle, GameRegistry, Response, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Upper-left corners for each player's islands
const LAYOUTS: [[(&str, i32, i32); 5]; 2] = [
    [
        ("atoll", 1, 1),
        ("dot", 1, 4),
        ("l_shape", 1, 5),
        ("s_shape", 5, 1),
        ("square", 5, 5),
    ],
    [
        ("atoll", 6, 6),
        ("dot", 10, 10),
        ("l_shape", 1, 1),
        ("s_shape", 8, 1),
        ("square", 1, 8),
    ],
];

async fn send(handle: &GameHandle, command: Command) -> anyhow::Result<Response> {
    match handle.dispatch(command.clone()).await {
        Response::Error { kind, message } => bail!("{:?} failed: {} ({})", command, message, kind),
        response => Ok(response),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let player1 = args.next().unwrap_or_else(|| "Chris".into());
    let player2 = args.next().unwrap_or_else(|| "Alexis".into());

    let config = ServerConfig::from_env()?;
    let registry = GameRegistry::new(config);
    let (id, handle) = registry.start(player1);
    info!("Starting simulated game {}", id);

    send(&handle, Command::AddPlayer { name: player2 }).await?;

    for (player, layout) in Player::ALL.into_iter().zip(LAYOUTS) {
        for (shape, row, col) in layout {
            send(
                &handle,
                Command::PositionIsland {
                    player,
                    island_type: shape.to_string(),
                    row,
                    col,
                },
            )
            .await?;
        }
        send(&handle, Command::SetIslands { player }).await?;
    }

    // Both players sweep the opponent's board row by row
    let size = config.game.board_size;
    let mut sweeps = [Coordinate::all(size), Coordinate::all(size)];
    let mut player = Player::Player1;

    loop {
        let seat = match player {
            Player::Player1 => 0,
            Player::Player2 => 1,
        };
        let Some(target) = sweeps[seat].next() else {
            bail!("{} ran out of coordinates", player);
        };

        let response = send(
            &handle,
            Command::Guess {
                player,
                row: target.row().into(),
                col: target.col().into(),
            },
        )
        .await?;

        if let Response::Guessed { outcome } = response {
            info!(
                "{} fires at {}: {:?}{}",
                player,
                target,
                outcome.result,
                outcome
                    .forested
                    .map(|t| format!(", {} forested", t))
                    .unwrap_or_default()
            );
            if outcome.win == islands_core::WinStatus::Win {
                break;
            }
        }
        player = player.opponent();
    }

    if let Response::Snapshot { game } = send(&handle, Command::Snapshot).await? {
        let winner = game.winner().map(|p| game.player(p).name.clone());
        info!(
            "Game over, winner: {}",
            winner.flatten().unwrap_or_else(|| "nobody".into())
        );
    }

    registry.remove(id).await?;
    Ok(())
}
