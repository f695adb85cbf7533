//! A square-array ("mailbox") board together with the referee that owns a match on it.
//!
//! Every square holds at most one piece. Legality is worked out per piece as a
//! [`LegalityMatrix`], and the [`Match`] decides whether a move leaves the mover in check by
//! playing it, asking the opponent's pieces, and taking it back.
//!
//! ```
//! use board::{Color, Position};
//! use mailbox::Match;
//!
//! let mut game = Match::new();
//! game.make_move(Position::E2, Position::E4).unwrap();
//! assert_eq!(game.current_player(), Color::Black);
//! assert_eq!(game.turn(), 2);
//! ```

use board::{Color, Position};

mod board_array;
mod builder;
mod game;
mod legality;

pub use crate::board_array::{Board, Occupant, PieceId};
pub use crate::builder::MatchBuilder;
pub use crate::game::Match;
pub use crate::legality::{LegalityMatrix, PieceState};

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Reasons a custom setup can't be turned into a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("{color} has {count} kings, but needs exactly one")]
    KingCount { color: Color, count: usize },
    #[error("{0} is in check, but it isn't their move")]
    OpponentInCheck(Color),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("there is no piece on {0}")]
    EmptyOrigin(Position),
    #[error("the piece on {position} is {owner}, but it is {to_move}'s move")]
    WrongColor {
        position: Position,
        owner: Color,
        to_move: Color,
    },
    #[error("the piece on {0} has nowhere to move")]
    NoLegalMoves(Position),
    #[error("the piece on {origin} can't move to {destination}")]
    IllegalDestination {
        origin: Position,
        destination: Position,
    },
    #[error("moving {origin} to {destination} would leave the {color} king in check")]
    SelfCheck {
        origin: Position,
        destination: Position,
        color: Color,
    },
    #[error("no {0} king is on the board")]
    MissingKing(Color),
    #[error("{0} is not on the board")]
    OutOfBounds(Position),
    #[error("{0} already holds a piece")]
    SquareOccupied(Position),
    #[error("the match has ended")]
    MatchTerminated,
    #[error("invalid setup: {0}")]
    InvalidSetup(#[from] SetupError),
}
