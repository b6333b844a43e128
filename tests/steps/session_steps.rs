use crate::GameWorld;
use cucumber::{given, then, when};
use grid_duel::prelude::*;

// ===== Given Steps =====

#[given(expr = "a session created by {string}")]
async fn session_created_by(world: &mut GameWorld, name: String) {
    world.open_session();
    world.join(&name);
    world.inbox.clear();
}

#[given(expr = "a game between {string} and {string}")]
async fn game_between(world: &mut GameWorld, first: String, second: String) {
    world.open_session();
    world.join(&first);
    world.join(&second);
    world.inbox.clear();
}

// ===== When Steps =====

#[when(expr = "{string} tries to join")]
async fn tries_to_join(world: &mut GameWorld, name: String) {
    world.join(&name);
}

#[when(expr = "{string} leaves")]
async fn player_leaves(world: &mut GameWorld, name: String) {
    let client_id = world.client(&name);
    let envelopes = world.session().leave(client_id);
    world.deliver(envelopes);
}

// ===== Then Steps =====

#[then(expr = "the join should fail with {string}")]
async fn join_should_fail_with(world: &mut GameWorld, message: String) {
    let error = world.last_error.as_ref().expect("Join did not fail");
    assert_eq!(error.to_string(), message);
}

#[then(expr = "the session should be {string}")]
async fn session_should_be(world: &mut GameWorld, status: String) {
    let actual = serde_json::to_value(world.session().status()).unwrap();
    assert_eq!(actual, serde_json::Value::String(status));
}

#[then(expr = "{string} should receive error {string}")]
async fn should_receive_error(world: &mut GameWorld, name: String, message: String) {
    assert_eq!(world.take_inbox(&name), vec![ServerMessage::error(message)]);
}

#[then(expr = "{string} should receive nothing")]
async fn should_receive_nothing(world: &mut GameWorld, name: String) {
    assert!(world.take_inbox(&name).is_empty());
}

#[then(expr = "{string} should be playing side {string}")]
async fn should_be_playing(world: &mut GameWorld, name: String, side: String) {
    let client_id = world.client(&name);
    let actual = world.session().side_of(client_id).map(|s| s.to_string());
    assert_eq!(actual, Some(side));
}
