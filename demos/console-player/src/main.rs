use std::io::{self, BufRead, Write};
use std::sync::Arc;

use cardcast::prelude::*;
use cardcast_transport::MemoryEndpoint;
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Scripted host
// ---------------------------------------------------------------------------

const HAND_SIZE: usize = 7;

const RESPONSES: &[&str] = &[
    "Darth Vader.",
    "Women.",
    "World of Warcraft.",
    "A bag of cats.",
    "Gravity.",
    "An unpaid intern.",
    "The heat death of the universe.",
    "Free samples.",
    "A disappointing birthday party.",
    "Competitive yodeling.",
    "Forgetting the Alamo.",
    "A sternly worded letter.",
    "Ninety-nine problems.",
    "Grandma's secret recipe.",
    "Jazz hands.",
    "A mime having a stroke.",
];

const PROMPTS: &[(&str, u32)] = &[
    ("Thats right I killed _____.  How, you ask? ____", 2),
    ("What's that smell?", 1),
    ("I drink to forget _____.", 1),
    ("_____ + _____ = a very long weekend.", 2),
    ("Next on ESPN2: the World Series of _____.", 1),
];

/// An in-process stand-in for the game host: one player, one deck.
struct Host {
    responses: Vec<Card>,
    prompts: Vec<Card>,
    rounds: u32,
}

impl Host {
    fn new() -> Self {
        let mut rng = rand::rng();
        let mut responses: Vec<Card> = RESPONSES
            .iter()
            .zip(1..)
            .map(|(text, id)| Card::response(id, *text))
            .collect();
        let mut prompts: Vec<Card> = PROMPTS
            .iter()
            .zip(100..)
            .map(|((text, pick), id)| Card::prompt(id, *text, *pick))
            .collect();
        responses.shuffle(&mut rng);
        prompts.shuffle(&mut rng);
        Self {
            responses,
            prompts,
            rounds: 0,
        }
    }

    /// The events the host sends back for one command.
    fn respond(&mut self, command: CommandMessage) -> Vec<Value> {
        match command {
            CommandMessage::Join { name } => {
                vec![json!({"event": "PLAYER_JOIN", "player": name.as_str()})]
            }
            CommandMessage::Dropout { name } => {
                vec![json!({"event": "PLAYER_DROP", "player": name.as_str()})]
            }
            CommandMessage::CardRequest { hand_size } => self.deal(hand_size.unwrap_or(0)),
            CommandMessage::PlayCards { cards } => {
                let mut events = vec![json!({"event": "CARD_PLAYED", "cards": cards})];
                if rand::rng().random_bool(0.5) {
                    events.push(json!({"event": "GAME_STATUS_UPDATE", "status_type": "GOT_AWESOME"}));
                }
                events
            }
        }
    }

    fn deal(&mut self, held: usize) -> Vec<Value> {
        let Some(prompt) = self.prompts.pop() else {
            return vec![json!({"event": "GAME_STATUS_UPDATE", "status_type": "END_GAME"})];
        };
        let want = HAND_SIZE.saturating_sub(held).min(self.responses.len());
        let dealt = self.responses.split_off(self.responses.len() - want);

        let cards: Vec<Value> = dealt
            .iter()
            .chain(std::iter::once(&prompt))
            .filter_map(|card| serde_json::to_value(card).ok())
            .collect();
        // Every third round the player judges.
        let czar = self.rounds % 3 == 2;
        self.rounds += 1;
        vec![json!({"event": "GOT_CARDS", "czar": czar, "cards": cards})]
    }
}

async fn run_host(mut host: Host, endpoint: MemoryEndpoint) {
    let MemoryEndpoint {
        channel,
        mut inbound,
    } = endpoint;
    while let Some(frame) = inbound.recv().await {
        let command: CommandMessage = match serde_json::from_slice(&frame) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(error = %e, "host could not read command");
                continue;
            }
        };
        tracing::debug!(command = %command.command(), "host received");

        let leaving = matches!(command, CommandMessage::Dropout { .. });
        for event in host.respond(command) {
            if let Err(e) = channel.send(event.to_string().as_bytes()) {
                tracing::warn!(error = %e, "host send failed");
                return;
            }
        }
        if leaving {
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// Console front end
// ---------------------------------------------------------------------------

struct ConsoleUi;

impl UiCollaborator for ConsoleUi {
    fn render_current_card(&self, card: Option<&Card>) {
        match card {
            Some(card) => {
                let mark = if card.marked_for_submission { 'x' } else { ' ' };
                println!("  [{mark}] {}", card.content);
            }
            None => println!("  (no cards)"),
        }
    }

    fn notify(&self, message: &str) {
        println!("* {message}");
    }

    fn set_control_enabled(&self, control: Control, enabled: bool) {
        tracing::trace!(?control, enabled, "control");
    }

    fn prompt_for_player_name(&self) -> String {
        print!("Your name: ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => line,
            Err(e) => {
                tracing::warn!(error = %e, "could not read name");
                String::new()
            }
        }
    }
}

fn print_help() {
    println!("g: get cards  n/b: next/back  m: mark  s: submit  p: prompt  q: quit");
}

fn print_round(snapshot: &TableSnapshot) {
    match &snapshot.round.prompt {
        Some(prompt) => println!("Prompt (pick {}): {}", prompt.pick_count, prompt.content),
        None => println!("No prompt yet."),
    }
    if snapshot.round.czar {
        println!("You are the Card Czar this round.");
    }
    println!(
        "{} cards in hand, {} awesome points.",
        snapshot.hand.len(),
        snapshot.round.awesome_points
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let name = std::env::args()
        .nth(1)
        .map(PlayerName::new)
        .unwrap_or_default();
    let config = ClientConfig {
        send_hand_size: true,
        ..ClientConfig::default()
    };
    let session = Arc::new(GameSession::new(ConsoleUi, name, config));

    let (player_end, host_end) = MemoryChannel::pair();
    tokio::spawn(run_host(Host::new(), host_end));

    let MemoryEndpoint { channel, inbound } = player_end;
    let dispatcher = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.run(inbound).await })
    };
    session.attach(channel);

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "g" => {
                session.request_hand();
            }
            "n" => {
                session.move_cursor(MoveDirection::Next);
            }
            "b" => {
                session.move_cursor(MoveDirection::Back);
            }
            "m" => {
                session.toggle_mark();
            }
            "s" => {
                if let Err(e) = session.submit() {
                    tracing::debug!(error = %e, "submit refused");
                }
            }
            "p" => print_round(&session.snapshot()),
            "q" => break,
            "" => {}
            other => {
                println!("unknown command `{other}`");
                print_help();
            }
        }
    }

    session.end();
    dispatcher.await?;
    Ok(())
}
