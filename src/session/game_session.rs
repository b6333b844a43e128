use crate::engine::{self, MoveError, MoveLog, Outcome};
use crate::error::SessionError;
use crate::model::{Board, Direction, PieceId, Side};
use crate::protocol::ServerMessage;
use crate::session::{ClientId, Envelope, Participant, SessionCode, SessionStatus};
use tracing::{debug, info, warn};

pub const OPPONENT_DISCONNECTED: &str = "Opponent disconnected";

/// One paired match.
///
/// Every operation is a plain state transition that returns the messages to
/// deliver; nothing here touches a socket. Callers are responsible for
/// serializing access (see [`SessionHandle`](crate::session::SessionHandle)).
#[derive(Debug, Clone)]
pub struct GameSession {
    code: SessionCode,
    participants: Vec<Participant>,
    board: Board,
    current_turn: Side,
    move_log: MoveLog,
    status: SessionStatus,
    outcome: Option<Outcome>,
    /// Bumped whenever the side to move gets a fresh turn.
    turn_token: u64,
}

impl GameSession {
    pub fn new(code: SessionCode) -> Self {
        Self::with_board(code, Board::initial())
    }

    /// Session starting from a custom position. Side A moves first.
    pub fn with_board(code: SessionCode, board: Board) -> Self {
        GameSession {
            code,
            participants: Vec::with_capacity(2),
            board,
            current_turn: Side::A,
            move_log: MoveLog::new(),
            status: SessionStatus::WaitingForOpponent,
            outcome: None,
            turn_token: 0,
        }
    }

    // ===== Getters =====

    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.move_log
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn turn_token(&self) -> u64 {
        self.turn_token
    }

    pub fn side_of(&self, client_id: ClientId) -> Option<Side> {
        self.participants
            .iter()
            .find(|p| p.client_id == client_id)
            .map(|p| p.side)
    }

    /// Full snapshot for both participants.
    pub fn state_update(&self) -> ServerMessage {
        ServerMessage::StateUpdate {
            board: self.board.clone(),
            current_turn: self.current_turn,
            move_history: self.move_log.lines(),
            status: self.status,
        }
    }

    // ===== Transitions =====

    /// Adds a participant. The first joiner plays A, the second plays B and
    /// starts the game.
    pub fn join(&mut self, client_id: ClientId) -> Result<(Side, Vec<Envelope>), SessionError> {
        if self.side_of(client_id).is_some() {
            return Err(SessionError::AlreadyJoined);
        }
        if self.status.is_over() {
            return Err(SessionError::SessionNotFound(self.code.clone()));
        }
        if self.participants.len() >= 2 {
            return Err(SessionError::SessionFull(self.code.clone()));
        }

        let side = if self.participants.is_empty() {
            Side::A
        } else {
            Side::B
        };
        self.participants.push(Participant { client_id, side });
        info!(code = %self.code, %client_id, %side, "Participant joined");

        let envelopes = match side {
            Side::A => vec![
                Envelope::new(
                    client_id,
                    ServerMessage::SessionCreated {
                        code: self.code.clone(),
                        side,
                    },
                ),
                Envelope::new(client_id, self.state_update()),
            ],
            Side::B => {
                self.status = SessionStatus::Active;
                let mut envelopes = vec![Envelope::new(
                    client_id,
                    ServerMessage::SessionJoined {
                        code: self.code.clone(),
                        side,
                    },
                )];
                envelopes.extend(self.broadcast(self.state_update()));
                envelopes
            }
        };

        Ok((side, envelopes))
    }

    /// Validates and applies one move from `client_id`.
    ///
    /// Rejections go to the sender only and leave the session untouched. An
    /// accepted move is broadcast as a `state_update`, followed by `game_over`
    /// when it ends the game.
    pub fn submit_move(
        &mut self,
        client_id: ClientId,
        piece: PieceId,
        direction: Direction,
    ) -> Vec<Envelope> {
        let Some(side) = self.side_of(client_id) else {
            return vec![Envelope::new(
                client_id,
                ServerMessage::error(SessionError::NotAParticipant),
            )];
        };

        match self.status {
            SessionStatus::Active => {}
            SessionStatus::WaitingForOpponent => {
                return self.reject(client_id, MoveError::NotStarted);
            }
            SessionStatus::Finished | SessionStatus::Abandoned => {
                return self.reject(client_id, MoveError::AlreadyFinished);
            }
        }

        if side != self.current_turn {
            return vec![Envelope::new(
                client_id,
                ServerMessage::error(SessionError::NotYourTurn),
            )];
        }
        if piece.side != side {
            return self.reject(client_id, MoveError::NotYourPiece(piece));
        }

        let mv = match engine::validate(&self.board, piece, direction) {
            Ok(mv) => mv,
            Err(e) => return self.reject(client_id, e),
        };

        self.board = engine::apply(&self.board, &mv, &mut self.move_log);
        self.current_turn = self.current_turn.opponent();
        self.turn_token += 1;
        debug!(code = %self.code, %piece, %direction, to = %mv.to, captured = ?mv.captured, "Move applied");

        if let Some(outcome) = engine::check_terminal(&self.board) {
            self.status = SessionStatus::Finished;
            self.outcome = Some(outcome);
            info!(code = %self.code, ?outcome, "Game finished");
        }

        let mut envelopes = self.broadcast(self.state_update());
        if let Some(outcome) = self.outcome {
            envelopes.extend(self.broadcast(ServerMessage::GameOver {
                winner: outcome.winner(),
            }));
        }
        envelopes
    }

    /// Removes a participant. A game still in progress is abandoned and the
    /// remaining participant is told.
    pub fn leave(&mut self, client_id: ClientId) -> Vec<Envelope> {
        if self.side_of(client_id).is_none() {
            return Vec::new();
        }
        self.participants.retain(|p| p.client_id != client_id);
        info!(code = %self.code, %client_id, "Participant left");

        if self.status.is_over() {
            return Vec::new();
        }
        self.status = SessionStatus::Abandoned;
        self.broadcast(ServerMessage::error(OPPONENT_DISCONNECTED))
    }

    /// Forfeits the side to move if `token` still names the current turn.
    pub fn expire_turn(&mut self, token: u64) -> Vec<Envelope> {
        if self.status != SessionStatus::Active || token != self.turn_token {
            return Vec::new();
        }

        let loser = self.current_turn;
        let outcome = Outcome::Winner(loser.opponent());
        self.status = SessionStatus::Finished;
        self.outcome = Some(outcome);
        warn!(code = %self.code, %loser, "Turn timed out, side forfeits");

        self.broadcast(ServerMessage::GameOver {
            winner: outcome.winner(),
        })
    }

    fn reject(&self, client_id: ClientId, error: MoveError) -> Vec<Envelope> {
        debug!(code = %self.code, %client_id, %error, "Move rejected");
        vec![Envelope::new(client_id, ServerMessage::invalid_move(error))]
    }

    fn broadcast(&self, message: ServerMessage) -> Vec<Envelope> {
        self.participants
            .iter()
            .map(|p| Envelope::new(p.client_id, message.clone()))
            .collect()
    }
}
