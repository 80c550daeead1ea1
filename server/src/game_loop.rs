use crate::bot::ShooterBot;
use crate::config::ServerConfig;
use crate::score::ShotOutcome;
use crate::state::{GameState, SimEvent};
use hoops_shared::protocol::{
    InputIntents, ShotResultMsg, SimSnapshot, WelcomeMsg, PROTOCOL_VERSION,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc, oneshot};

/// Commands from client connections to the game loop
pub enum GameCommand {
    ClientJoin {
        response: oneshot::Sender<(u32, WelcomeMsg)>,
    },
    ClientLeave {
        id: u32,
    },
    /// Replace the held intents. Triggers in it are latched.
    Input {
        id: u32,
        intents: InputIntents,
    },
    Shoot,
    Reset,
}

/// Broadcasts from game loop to all clients
#[derive(Debug, Clone)]
pub enum GameBroadcast {
    Snapshot(SimSnapshot),
    ShotResult(ShotResultMsg),
}

/// Intents for the next tick: the latest held set plus any trigger that
/// arrived since the last tick.
#[derive(Debug, Default)]
struct PendingInput {
    intents: InputIntents,
    held_by: Option<u32>,
}

impl PendingInput {
    fn replace(&mut self, id: u32, intents: InputIntents) {
        let mut next = intents;
        next.latch_triggers(&self.intents);
        self.intents = next;
        self.held_by = Some(id);
    }

    /// Drop held movement when the client holding it goes away.
    fn release(&mut self, id: u32) {
        if self.held_by == Some(id) {
            let mut released = InputIntents::default();
            released.latch_triggers(&self.intents);
            self.intents = released;
            self.held_by = None;
        }
    }

    fn take(&mut self) -> InputIntents {
        let intents = self.intents;
        self.intents.clear_triggers();
        intents
    }
}

/// Run the main game loop. Owns the simulation.
pub async fn run_game_loop(
    mut cmd_rx: mpsc::Receiver<GameCommand>,
    broadcast_tx: broadcast::Sender<GameBroadcast>,
    server_config: ServerConfig,
) {
    let mut state = GameState::new(server_config.sim);
    let mut rng = ChaCha8Rng::seed_from_u64(server_config.rng_seed);
    let mut bot = ShooterBot::new(state.config.court, &mut rng);

    let mut clients: HashSet<u32> = HashSet::new();
    let mut next_client_id: u32 = 1;
    let mut pending = PendingInput::default();

    let tick_duration = Duration::from_secs_f64(1.0 / server_config.tick_rate_hz as f64);
    let broadcast_every_n = server_config.broadcast_every_n();

    let mut tick_interval = tokio::time::interval(tick_duration);
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // The first interval tick fires immediately
    let mut last_tick = Instant::now()
        .checked_sub(tick_duration)
        .unwrap_or_else(Instant::now);

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                let now = Instant::now();
                let dt = now.duration_since(last_tick).as_secs_f64();
                last_tick = now;

                let intents = if clients.is_empty() && server_config.bot_enabled {
                    bot.tick(dt, &state.snapshot(), &mut rng)
                } else {
                    pending.take()
                };

                for event in state.tick(dt, &intents) {
                    if let SimEvent::Outcome(outcome) = event {
                        let _ = broadcast_tx.send(GameBroadcast::ShotResult(ShotResultMsg {
                            made: outcome == ShotOutcome::Made,
                            score: state.session.score,
                            attempts: state.session.attempts,
                            makes: state.session.makes,
                        }));
                    }
                }

                if state.tick_count() % broadcast_every_n == 0 {
                    let _ = broadcast_tx.send(GameBroadcast::Snapshot(state.snapshot()));
                }
            }

            Some(cmd) = cmd_rx.recv() => {
                match cmd {
                    GameCommand::ClientJoin { response } => {
                        let id = next_client_id;
                        next_client_id += 1;
                        let welcome = WelcomeMsg {
                            protocol_version: PROTOCOL_VERSION,
                            server_version: env!("CARGO_PKG_VERSION").to_string(),
                            self_id: id,
                            config: state.config,
                            snapshot: state.snapshot(),
                        };
                        if response.send((id, welcome)).is_ok() {
                            clients.insert(id);
                            tracing::info!(id, clients = clients.len(), "client joined");
                        }
                    }
                    GameCommand::ClientLeave { id } => {
                        clients.remove(&id);
                        pending.release(id);
                        if clients.is_empty() {
                            bot = ShooterBot::new(state.config.court, &mut rng);
                        }
                        tracing::info!(id, clients = clients.len(), "client left");
                    }
                    GameCommand::Input { id, intents } => {
                        pending.replace(id, intents);
                    }
                    GameCommand::Shoot => {
                        pending.intents.shoot = true;
                    }
                    GameCommand::Reset => {
                        pending.intents.reset = true;
                    }
                }
            }

            else => break,
        }
    }

    tracing::info!("Game loop ended");
}
