use crate::GameWorld;
use cucumber::{given, then, when};
use grid_duel::prelude::*;

fn side(s: &str) -> Side {
    s.chars()
        .next()
        .and_then(Side::from_char)
        .unwrap_or_else(|| panic!("Unknown side '{}'", s))
}

fn cell(row: u8, col: u8) -> Cell {
    Cell::new(row, col).unwrap_or_else(|| panic!("({},{}) is off the board", row, col))
}

// ===== Given Steps =====

#[given(expr = "piece {string} at row {int} column {int}")]
async fn piece_at(world: &mut GameWorld, piece: String, row: u8, col: u8) {
    let piece: PieceId = piece.parse().unwrap();
    world
        .setup
        .get_or_insert_with(Board::empty)
        .place(piece, cell(row, col))
        .unwrap();
}

// ===== When Steps =====

#[when(expr = "{string} moves {string} {string}")]
async fn player_moves(world: &mut GameWorld, name: String, piece: String, direction: String) {
    let client_id = world.client(&name);
    let piece: PieceId = piece.parse().unwrap();
    let direction: Direction = direction.parse().unwrap();

    let envelopes = world.session().submit_move(client_id, piece, direction);
    world.deliver(envelopes);
}

// ===== Then Steps =====

#[then(expr = "{string} should be at row {int} column {int}")]
async fn piece_should_be_at(world: &mut GameWorld, piece: String, row: u8, col: u8) {
    let piece: PieceId = piece.parse().unwrap();
    assert_eq!(world.session().board().locate(piece), Some(cell(row, col)));
}

#[then(expr = "row {int} column {int} should be empty")]
async fn cell_should_be_empty(world: &mut GameWorld, row: u8, col: u8) {
    assert_eq!(world.session().board().at(cell(row, col)), None);
}

#[then(expr = "{string} should be captured")]
async fn piece_should_be_captured(world: &mut GameWorld, piece: String) {
    let piece: PieceId = piece.parse().unwrap();
    assert_eq!(world.session().board().locate(piece), None);
}

#[then(expr = "side {string} should be to move")]
async fn side_should_be_to_move(world: &mut GameWorld, expected: String) {
    assert_eq!(world.session().current_turn(), side(&expected));
}

#[then(expr = "{string} should receive an invalid move starting with {string}")]
async fn should_receive_invalid_move(world: &mut GameWorld, name: String, prefix: String) {
    match world.take_inbox(&name).last() {
        Some(ServerMessage::InvalidMove { reason }) => {
            assert!(
                reason.starts_with(&prefix),
                "Expected reason starting with '{}', got '{}'",
                prefix,
                reason
            );
        }
        other => panic!("Expected invalid_move last, got {:?}", other),
    }
}

#[then(expr = "both players should receive game over with winner {string}")]
async fn both_receive_game_over(world: &mut GameWorld, winner: String) {
    let expected = ServerMessage::GameOver {
        winner: Some(side(&winner)),
    };
    let participants: Vec<_> = world
        .session()
        .participants()
        .iter()
        .map(|p| p.client_id)
        .collect();

    for client_id in participants {
        let inbox = world.inbox.remove(&client_id).unwrap_or_default();
        assert_eq!(inbox.last(), Some(&expected));
    }
}

#[then(expr = "the move history should read {string}")]
async fn move_history_should_read(world: &mut GameWorld, line: String) {
    assert_eq!(world.session().move_log().lines(), vec![line]);
}
