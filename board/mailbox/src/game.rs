use std::collections::BTreeSet;

use board::{CheckStatus, Color, MatchStatus, Piece, PieceKind, Position};
use tracing::{debug, info, trace};

use crate::{Board, Error, LegalityMatrix, MatchBuilder, Occupant, PieceId, PieceState, Result};

/// A single game, from setup until checkmate
///
/// The match owns every piece that was ever put on its board. The board itself only holds
/// [`PieceId`] references, and a captured piece stays registered here (with its last position)
/// so it can be listed and put back if a capture is undone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    board: Board,
    /// Every registered piece, indexed by [`PieceId`]
    pieces: Vec<PieceState>,
    /// Pieces which are registered but currently off the board
    captured: BTreeSet<PieceId>,
    turn: u32,
    current_player: Color,
    in_check: bool,
    terminated: bool,
}
impl Match {
    /// Start a match from the standard opening position
    pub fn new() -> Self {
        MatchBuilder::standard()
            .build()
            .expect("the standard opening position is a valid setup")
    }

    /// A match on an empty board, for the builder to fill in
    pub(crate) fn empty(rows: u8, columns: u8, side_to_move: Color) -> Self {
        Self {
            board: Board::new(rows, columns),
            pieces: Vec::new(),
            captured: BTreeSet::new(),
            turn: 1,
            current_player: side_to_move,
            in_check: false,
            terminated: false,
        }
    }

    /// Register a new piece and put it on the board
    pub(crate) fn place_new_piece(&mut self, position: Position, piece: Piece) -> Result<PieceId> {
        let id = PieceId(self.pieces.len() as u16);
        self.board.place(Occupant { id, piece }, position)?;
        self.pieces.push(PieceState::new(id, piece, position));
        Ok(id)
    }

    /// Recompute whether the side to move starts out in check
    pub(crate) fn refresh_check(&mut self) -> Result<()> {
        self.in_check = self.is_in_check(self.current_player)?;
        Ok(())
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The number of the move being played, starting at 1 and counting each side's moves
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    pub const fn current_player(&self) -> Color {
        self.current_player
    }

    /// Whether the last committed move (or the setup, before any move) left the side it was
    /// played against in check
    pub const fn in_check(&self) -> bool {
        self.in_check
    }

    pub const fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub const fn status(&self) -> MatchStatus {
        if self.terminated {
            MatchStatus::Terminated
        } else {
            MatchStatus::InProgress
        }
    }

    /// The check status of the side that was last moved against
    pub const fn check_status(&self) -> CheckStatus {
        match (self.in_check, self.terminated) {
            (_, true) => CheckStatus::Checkmate,
            (true, false) => CheckStatus::Check,
            (false, false) => CheckStatus::None,
        }
    }

    /// The player who delivered checkmate, once the match is over
    ///
    /// The side to move doesn't change after the mating move, so this is the current player.
    pub const fn winner(&self) -> Option<Color> {
        if self.terminated {
            Some(self.current_player)
        } else {
            None
        }
    }

    /// Look up a piece by its handle
    pub fn piece(&self, id: PieceId) -> Option<&PieceState> {
        self.pieces.get(id.index())
    }

    /// The piece on the given square, if any
    pub fn piece_at(&self, position: Position) -> Option<&PieceState> {
        self.board
            .piece_at(position)
            .map(|occupant| &self.pieces[occupant.id.index()])
    }

    /// The pieces of the given color which are still on the board, in registration order
    pub fn pieces_in_play(&self, color: Color) -> impl Iterator<Item = &PieceState> + '_ {
        self.pieces
            .iter()
            .filter(move |state| state.color() == color && !self.captured.contains(&state.id))
    }

    /// The pieces of the given color which have been captured, in registration order
    pub fn captured_pieces(&self, color: Color) -> impl Iterator<Item = &PieceState> + '_ {
        self.captured
            .iter()
            .map(|id| &self.pieces[id.index()])
            .filter(move |state| state.color() == color)
    }

    /// Every square the piece on `position` could move to, ignoring self-check
    pub fn legality_matrix_at(&self, position: Position) -> Option<LegalityMatrix> {
        self.piece_at(position)
            .map(|state| state.legality_matrix(&self.board))
    }

    /// Move a piece onto an empty square, keeping its recorded position in step with the board
    fn put(&mut self, occupant: Occupant, position: Position) -> Result<()> {
        self.board.place(occupant, position)?;
        self.pieces[occupant.id.index()].position = position;
        Ok(())
    }

    /// Move whatever is on `origin` to `destination`, capturing anything there
    ///
    /// This does no legality checking at all. Returns the piece that was captured, which must be
    /// handed back to [`Self::undo_move`] to take the move back.
    pub fn execute_move(
        &mut self,
        origin: Position,
        destination: Position,
    ) -> Result<Option<PieceId>> {
        if !self.board.contains(destination) {
            return Err(Error::OutOfBounds(destination));
        }
        let mover = self
            .board
            .remove(origin)
            .ok_or(Error::EmptyOrigin(origin))?;
        self.pieces[mover.id.index()].increment_move_count();
        let captured = self.board.remove(destination);
        self.put(mover, destination)?;
        if let Some(captured) = captured {
            self.captured.insert(captured.id);
        }
        trace!(%origin, %destination, piece = %mover.piece, ?captured, "executed move");
        Ok(captured.map(|captured| captured.id))
    }

    /// The exact inverse of [`Self::execute_move`]
    pub fn undo_move(
        &mut self,
        origin: Position,
        destination: Position,
        captured: Option<PieceId>,
    ) -> Result<()> {
        let mover = self
            .board
            .remove(destination)
            .ok_or(Error::EmptyOrigin(destination))?;
        self.pieces[mover.id.index()].decrement_move_count();
        if let Some(id) = captured {
            let piece = self.pieces[id.index()].piece;
            self.put(Occupant { id, piece }, destination)?;
            self.captured.remove(&id);
        }
        self.put(mover, origin)?;
        trace!(%origin, %destination, piece = %mover.piece, ?captured, "undid move");
        Ok(())
    }

    /// Commit a move for the current player
    ///
    /// The origin and destination are expected to have passed [`Self::validate_origin`] and
    /// [`Self::validate_destination`]. If the move would leave the mover in check, the board is
    /// put back exactly as it was and [`Error::SelfCheck`] is returned.
    pub fn play_move(&mut self, origin: Position, destination: Position) -> Result<()> {
        if self.terminated {
            return Err(Error::MatchTerminated);
        }
        let mover = self.current_player;
        let captured = self.execute_move(origin, destination)?;
        match self.is_in_check(mover) {
            Ok(false) => {}
            Ok(true) => {
                self.undo_move(origin, destination, captured)?;
                debug!(%origin, %destination, color = %mover, "rejected move into check");
                return Err(Error::SelfCheck {
                    origin,
                    destination,
                    color: mover,
                });
            }
            Err(e) => {
                self.undo_move(origin, destination, captured)?;
                return Err(e);
            }
        }

        let opponent = mover.other();
        self.in_check = self.is_in_check(opponent)?;
        if self.is_checkmate(opponent)? {
            self.terminated = true;
            info!(turn = self.turn, winner = %mover, "checkmate");
        } else {
            debug!(
                turn = self.turn,
                %origin,
                %destination,
                check = self.in_check,
                "committed move"
            );
            self.turn += 1;
            self.current_player = opponent;
        }
        Ok(())
    }

    /// Check that the current player may move the piece on `position`
    pub fn validate_origin(&self, position: Position) -> Result<()> {
        if !self.board.contains(position) {
            return Err(Error::OutOfBounds(position));
        }
        let state = self
            .piece_at(position)
            .ok_or(Error::EmptyOrigin(position))?;
        if state.color() != self.current_player {
            return Err(Error::WrongColor {
                position,
                owner: state.color(),
                to_move: self.current_player,
            });
        }
        if !state.has_any_legal_move(&self.board) {
            return Err(Error::NoLegalMoves(position));
        }
        Ok(())
    }

    /// Check that the piece on `origin` can reach `destination`
    pub fn validate_destination(&self, origin: Position, destination: Position) -> Result<()> {
        let state = self.piece_at(origin).ok_or(Error::EmptyOrigin(origin))?;
        if !state.is_legal_target(&self.board, destination) {
            return Err(Error::IllegalDestination {
                origin,
                destination,
            });
        }
        Ok(())
    }

    /// Validate and then play a move, as an input loop would
    pub fn make_move(&mut self, origin: Position, destination: Position) -> Result<()> {
        if self.terminated {
            return Err(Error::MatchTerminated);
        }
        self.validate_origin(origin)?;
        self.validate_destination(origin, destination)?;
        self.play_move(origin, destination)
    }

    fn king(&self, color: Color) -> Option<&PieceState> {
        self.pieces_in_play(color)
            .find(|state| state.kind() == PieceKind::King)
    }

    /// Returns `true` if any enemy piece could move onto the given color's king
    pub fn is_in_check(&self, color: Color) -> Result<bool> {
        let king = self.king(color).ok_or(Error::MissingKing(color))?.position;
        Ok(self
            .pieces_in_play(color.other())
            .any(|state| state.is_legal_target(&self.board, king)))
    }

    /// Returns `true` if the given color is in check and no move of theirs gets out of it
    ///
    /// Each candidate move is tried on the board and then taken back, so the match is unchanged
    /// when this returns.
    pub fn is_checkmate(&mut self, color: Color) -> Result<bool> {
        if !self.is_in_check(color)? {
            return Ok(false);
        }
        let candidates: Vec<(Position, Position)> = self
            .pieces_in_play(color)
            .flat_map(|state| {
                state
                    .legality_matrix(&self.board)
                    .squares_iter()
                    .map(|destination| (state.position, destination))
                    .collect::<Vec<_>>()
            })
            .collect();
        for (origin, destination) in candidates {
            let captured = self.execute_move(origin, destination)?;
            let still_in_check = self.is_in_check(color);
            self.undo_move(origin, destination, captured)?;
            if !still_in_check? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}
