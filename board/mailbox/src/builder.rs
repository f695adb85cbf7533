use board::{Color, Piece, PieceKind, Position};

use crate::{Match, Result, SetupError};

/// A match setup that has *not* been checked for sanity yet
///
/// Use this to start from something other than the opening position, or on a board that isn't
/// 8x8. Pieces are registered in the order they are given, which is the order
/// [`Match::pieces_in_play`] reports them in.
///
/// ```
/// use board::{Color, Piece, PieceKind, Position};
/// use mailbox::MatchBuilder;
///
/// let game = MatchBuilder::new()
///     .piece(Position::E1, Piece::new(PieceKind::King, Color::White))
///     .piece(Position::E8, Piece::new(PieceKind::King, Color::Black))
///     .piece(Position::A2, Piece::new(PieceKind::Rook, Color::Black))
///     .side_to_move(Color::Black)
///     .build()
///     .unwrap();
/// assert_eq!(game.current_player(), Color::Black);
///
/// // White can't be in check when it's black's move
/// let res = MatchBuilder::new()
///     .piece(Position::E1, Piece::new(PieceKind::King, Color::White))
///     .piece(Position::E8, Piece::new(PieceKind::King, Color::Black))
///     .piece(Position::A1, Piece::new(PieceKind::Rook, Color::Black))
///     .side_to_move(Color::Black)
///     .build();
/// assert!(res.is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchBuilder {
    rows: u8,
    columns: u8,
    pieces: Vec<(Position, Piece)>,
    side_to_move: Color,
}
impl MatchBuilder {
    /// An empty 8x8 board with white to move
    pub fn new() -> Self {
        Self {
            rows: Position::STANDARD_SIZE,
            columns: Position::STANDARD_SIZE,
            pieces: Vec::new(),
            side_to_move: Color::White,
        }
    }

    /// The opening position of a standard game
    ///
    /// White's back rank is registered first, then white's pawns, then black in the same order.
    pub fn standard() -> Self {
        let mut builder = Self::new();
        for (color, back_row, pawn_row) in [(Color::White, 7, 6), (Color::Black, 0, 1)] {
            for (column, kind) in (0..).zip(PieceKind::BACK_RANK) {
                builder = builder.piece(Position::new(back_row, column), Piece::new(kind, color));
            }
            for column in 0..Position::STANDARD_SIZE {
                builder = builder.piece(
                    Position::new(pawn_row, column),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }
        builder
    }

    /// Change the size of the board
    pub fn dimensions(mut self, rows: u8, columns: u8) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    /// Add a piece to the setup
    pub fn piece(mut self, position: Position, piece: Piece) -> Self {
        self.pieces.push((position, piece));
        self
    }

    /// Choose who moves first
    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Check the setup and turn it into a match
    ///
    /// Fails if a piece is off the board or on top of another, if either side doesn't have
    /// exactly one king, or if the side that isn't moving is already in check.
    pub fn build(self) -> Result<Match> {
        let mut game = Match::empty(self.rows, self.columns, self.side_to_move);
        for (position, piece) in self.pieces {
            game.place_new_piece(position, piece)?;
        }
        for color in Color::COLORS {
            let count = game
                .pieces_in_play(color)
                .filter(|state| state.kind() == PieceKind::King)
                .count();
            if count != 1 {
                return Err(SetupError::KingCount { color, count }.into());
            }
        }
        let waiting = self.side_to_move.other();
        if game.is_in_check(waiting)? {
            return Err(SetupError::OpponentInCheck(waiting).into());
        }
        game.refresh_check()?;
        Ok(game)
    }
}
impl Default for MatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
impl TryFrom<MatchBuilder> for Match {
    type Error = crate::Error;

    fn try_from(builder: MatchBuilder) -> Result<Self> {
        builder.build()
    }
}
