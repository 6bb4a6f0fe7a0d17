//! End-to-end round flow: host payloads through the protocol client into
//! the table, with the table's controls and UI calls checked at each step.

use std::sync::{Arc, Mutex};

use cardcast_client::{ClientConfig, ProtocolClient};
use cardcast_hand::{Control, MoveDirection, RoundStatus, Table, UiCollaborator};
use cardcast_protocol::{Card, CardId, DispatchMode};
use cardcast_transport::{MemoryChannel, MemoryEndpoint};
use serde_json::{Value, json};

// =========================================================================
// Recording UI
// =========================================================================

#[derive(Default)]
struct RecordingUi {
    rendered: Mutex<Vec<Option<String>>>,
    notes: Mutex<Vec<String>>,
    controls: Mutex<Vec<(Control, bool)>>,
}

impl RecordingUi {
    fn notes(&self) -> Vec<String> {
        self.notes.lock().unwrap().clone()
    }

    fn last_rendered(&self) -> Option<String> {
        self.rendered.lock().unwrap().last().cloned().flatten()
    }

    fn enabled(&self, control: Control) -> bool {
        self.controls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(which, _)| *which == control)
            .is_some_and(|(_, on)| *on)
    }
}

impl UiCollaborator for RecordingUi {
    fn render_current_card(&self, card: Option<&Card>) {
        self.rendered
            .lock()
            .unwrap()
            .push(card.map(|c| c.content.clone()));
    }

    fn notify(&self, message: &str) {
        self.notes.lock().unwrap().push(message.to_string());
    }

    fn set_control_enabled(&self, control: Control, enabled: bool) {
        self.controls.lock().unwrap().push((control, enabled));
    }

    fn prompt_for_player_name(&self) -> String {
        "ann".to_string()
    }
}

// =========================================================================
// Helpers
// =========================================================================

type Client = ProtocolClient<Arc<Table<RecordingUi>>>;

fn setup(config: ClientConfig) -> (Arc<Table<RecordingUi>>, Client, MemoryEndpoint) {
    let table = Arc::new(Table::new(RecordingUi::default()));
    let client = ProtocolClient::new(Arc::clone(&table), config);
    let (near, far) = MemoryChannel::pair();
    client.attach(near.channel);
    (table, client, far)
}

fn got_cards(ids: &[u64]) -> Value {
    let cards: Vec<Value> = ids
        .iter()
        .map(|id| json!({"cardId": id, "content": format!("card {id}"), "type": "W"}))
        .collect();
    json!({"event": "GOT_CARDS", "cards": cards})
}

fn hand_ids(table: &Table<RecordingUi>) -> Vec<u64> {
    table.snapshot().hand.cards().iter().map(|c| c.id.0).collect()
}

fn next_payload(far: &mut MemoryEndpoint) -> Value {
    let frame = far.inbound.try_recv().expect("a frame should have been sent");
    serde_json::from_slice(&frame).unwrap()
}

// =========================================================================
// Flow
// =========================================================================

#[test]
fn test_full_round_join_deal_submit_resolve() {
    let (table, client, mut far) = setup(ClientConfig::default());

    client.dispatch(&json!({"event": "PLAYER_JOIN", "player": "ann"}));
    assert!(table.ui().enabled(Control::GetCards));
    assert!(!table.ui().enabled(Control::Submit));

    client.dispatch(&json!({
        "event": "GOT_CARDS",
        "cards": [
            {"content": "Darth Vader.", "type": "W", "cardId": 1},
            {"content": "Women.", "type": "W", "cardId": 2},
            {"content": "World of Warcraft.", "type": "W", "cardId": 3},
            {"content": "Thats right I killed _____.  How, you ask? ____", "type": "B", "pickCt": 2, "draw": 1}
        ]
    }));

    let snap = table.snapshot();
    assert_eq!(hand_ids(&table), vec![1, 2, 3]);
    assert_eq!(snap.round.status, RoundStatus::HandActive);
    assert_eq!(snap.round.pick_count(), 2);
    assert_eq!(snap.round.prompt.as_ref().map(|p| p.id), Some(CardId(0)));
    assert_eq!(table.ui().last_rendered().as_deref(), Some("Darth Vader."));
    assert!(table.ui().enabled(Control::Submit));
    assert!(!table.ui().enabled(Control::GetCards));

    // Mark c1 and c3, submit in hand order.
    table.toggle_mark();
    table.move_cursor(MoveDirection::Back);
    table.toggle_mark();
    let ids = table.begin_submission().unwrap();
    client.submit_cards(&ids);
    table.clear_marks();

    assert_eq!(next_payload(&mut far), json!({"command": "PLAY_CARDS", "cards": [1, 3]}));
    assert_eq!(table.snapshot().round.status, RoundStatus::AwaitingResolution);
    assert!(!table.ui().enabled(Control::Submit));

    client.dispatch(&json!({"event": "CARD_PLAYED", "cards": ["1", "3"]}));

    let snap = table.snapshot();
    assert_eq!(hand_ids(&table), vec![2]);
    assert_eq!(snap.hand.cursor(), Some(0));
    assert_eq!(snap.round.status, RoundStatus::AwaitingHand);
    assert!(table.ui().enabled(Control::GetCards));
    assert!(table.build_submission().is_empty());
}

#[test]
fn test_cards_played_string_id_removes_card_and_resets_cursor() {
    let (table, client, _far) = setup(ClientConfig::default());
    client.dispatch(&got_cards(&[1, 2]));
    table.move_cursor(MoveDirection::Next);

    client.dispatch(&json!({"event": "CARD_PLAYED", "cards": ["1"]}));

    assert_eq!(hand_ids(&table), vec![2]);
    assert_eq!(table.snapshot().hand.cursor(), Some(0));
    assert_eq!(table.snapshot().round.status, RoundStatus::AwaitingHand);
}

#[test]
fn test_second_deal_appends_after_existing_cards() {
    let (table, client, _far) = setup(ClientConfig::default());
    client.dispatch(&got_cards(&[1, 2]));
    client.dispatch(&got_cards(&[3]));

    assert_eq!(hand_ids(&table), vec![1, 2, 3]);
    assert_eq!(
        table.ui().notes(),
        vec!["Received 2 new cards.", "Received 1 new card."]
    );
}

#[test]
fn test_czar_deal_keeps_submit_disabled() {
    let (table, client, _far) = setup(ClientConfig::default());
    let mut payload = got_cards(&[1]);
    payload["czar"] = json!(true);

    client.dispatch(&payload);

    assert!(table.snapshot().round.czar);
    assert!(!table.ui().enabled(Control::Submit));
    assert!(table.ui().enabled(Control::Next));
}

#[test]
fn test_unknown_event_reaches_ui_as_server_error() {
    let (table, client, _far) = setup(ClientConfig::default());

    client.dispatch(&json!({"event": "SOMETHING_NEW", "message": "huh"}));

    assert_eq!(
        table.ui().notes(),
        vec!["Something went wrong on the server: huh"]
    );
}

#[test]
fn test_end_game_returns_table_to_start() {
    let (table, client, _far) = setup(ClientConfig::default());
    client.dispatch(&json!({"event": "PLAYER_JOIN", "player": "ann"}));
    client.dispatch(&got_cards(&[1, 2]));

    client.dispatch(&json!({"event": "GAME_STATUS_UPDATE", "status_type": "end_game"}));

    let snap = table.snapshot();
    assert!(snap.hand.is_empty());
    assert_eq!(snap.round.status, RoundStatus::AwaitingHand);
    assert!(table.can_request_hand());
    assert!(!table.ui().enabled(Control::Back));
    assert_eq!(table.ui().last_rendered(), None);
}

#[test]
fn test_fall_through_join_payload_touches_table_once() {
    let config = ClientConfig {
        dispatch_mode: DispatchMode::FallThrough,
        ..ClientConfig::default()
    };
    let (table, client, _far) = setup(config);

    let calls = client.dispatch(&json!({"event": "PLAYER_JOIN", "player": "ann"}));

    assert_eq!(calls, 1);
    assert_eq!(table.ui().notes(), vec!["Welcome to the game, ann"]);
}

#[tokio::test]
async fn test_run_drives_table_from_inbound_frames() {
    let table = Arc::new(Table::new(RecordingUi::default()));
    let client = ProtocolClient::new(Arc::clone(&table), ClientConfig::default());
    let (near, host) = MemoryChannel::pair();
    client.attach(near.channel);

    use cardcast_transport::Channel;
    host.channel
        .send(got_cards(&[4, 5]).to_string().as_bytes())
        .unwrap();
    host.channel
        .send(br#"{"event":"CARD_PLAYED","cards":[4]}"#)
        .unwrap();
    drop(host);

    client.run(near.inbound).await;

    assert_eq!(hand_ids(&table), vec![5]);
}
