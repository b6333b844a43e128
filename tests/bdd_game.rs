mod steps;

use cucumber::World;
use grid_duel::prelude::*;
use grid_duel::session::{ClientId, Envelope};
use std::collections::HashMap;
use uuid::Uuid;

pub const CODE: &str = "duel01";

#[derive(Debug, World, Default)]
pub struct GameWorld {
    /// Pieces placed by `Given` steps; the initial board when unset
    pub setup: Option<Board>,

    /// The session under test
    pub session: Option<GameSession>,

    /// Client ids by player name
    pub clients: HashMap<String, ClientId>,

    /// Everything delivered so far, per client
    pub inbox: HashMap<ClientId, Vec<ServerMessage>>,

    /// Last rejected join
    pub last_error: Option<SessionError>,
}

impl GameWorld {
    pub fn session(&mut self) -> &mut GameSession {
        self.session.as_mut().expect("No session created yet")
    }

    pub fn client(&mut self, name: &str) -> ClientId {
        *self
            .clients
            .entry(name.to_string())
            .or_insert_with(Uuid::new_v4)
    }

    pub fn deliver(&mut self, envelopes: Vec<Envelope>) {
        for envelope in envelopes {
            self.inbox
                .entry(envelope.recipient)
                .or_default()
                .push(envelope.message);
        }
    }

    pub fn open_session(&mut self) {
        let board = self.setup.take().unwrap_or_else(Board::initial);
        self.session = Some(GameSession::with_board(SessionCode::from(CODE), board));
    }

    pub fn join(&mut self, name: &str) {
        let client_id = self.client(name);
        match self.session().join(client_id) {
            Ok((_, envelopes)) => self.deliver(envelopes),
            Err(e) => self.last_error = Some(e),
        }
    }

    /// Takes the messages `name` received since the last call.
    pub fn take_inbox(&mut self, name: &str) -> Vec<ServerMessage> {
        let client_id = self.client(name);
        self.inbox.remove(&client_id).unwrap_or_default()
    }
}

#[tokio::main]
async fn main() {
    GameWorld::cucumber()
        .max_concurrent_scenarios(1)
        .run_and_exit("tests/features")
        .await;
}
