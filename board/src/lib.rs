//! The vocabulary shared by every board representation: piece kinds, colors, positions, and the
//! status of a match.

use core::fmt;

mod position;

pub use position::{Position, PositionError, PositionOffset};

/// The types of pieces there are
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}
impl PieceKind {
    /// The order in which the pieces stand on the back rank, from the `a` file to the `h` file
    pub const BACK_RANK: [PieceKind; 8] = [
        Self::Rook,
        Self::Knight,
        Self::Bishop,
        Self::Queen,
        Self::King,
        Self::Bishop,
        Self::Knight,
        Self::Rook,
    ];

    /// The capitalized version of the letter used for this piece in FEN
    pub const fn fen_letter(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// The colors a piece can have
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub const COLORS: [Color; 2] = [Color::White, Color::Black];

    pub const fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The direction, in rows, that this color's pawns advance
    ///
    /// White starts on the high rows (rank 1 is the last row) and moves towards row 0.
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

/// A piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}
impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// The FEN letter, uppercase for white and lowercase for black
    ///
    /// ```
    /// use board::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(PieceKind::Knight, Color::White).fen_letter(), 'N');
    /// assert_eq!(Piece::new(PieceKind::Knight, Color::Black).fen_letter(), 'n');
    /// ```
    pub const fn fen_letter(self) -> char {
        match self.color {
            Color::White => self.kind.fen_letter().to_ascii_uppercase(),
            Color::Black => self.kind.fen_letter().to_ascii_lowercase(),
        }
    }
}
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        f.write_char(self.fen_letter())
    }
}

/// Whether the match can still be played
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MatchStatus {
    /// Moves are still being accepted
    InProgress,
    /// Checkmate was delivered and no more moves are accepted
    Terminated,
}

/// How threatened the king of the side to move is
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CheckStatus {
    None,
    Check,
    Checkmate,
}
/// Returns the status as appended to a move in algebraic notation
impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "",
            Self::Check => "+",
            Self::Checkmate => "#",
        })
    }
}
