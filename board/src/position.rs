//! Coordinates on the board, and the conversion to and from algebraic notation

use core::{fmt, str::FromStr};

/// Things that can go wrong when reading a position out of algebraic notation
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("file `{0}` is not between `a` and `h`")]
    InvalidFile(char),
    #[error("rank {0} is not between 1 and 8")]
    InvalidRank(u8),
    #[error("`{0}` is not a rank digit")]
    InvalidRankChar(char),
    #[error("a square is written as exactly one file letter and one rank digit")]
    InvalidLength,
}

/// A square on the board, addressed by zero-indexed row and column
///
/// Row 0 is the far side from white (rank 8 on a standard board), and column 0 is the `a` file.
/// Whether a position actually lies on a given board is decided by that board, since boards are
/// not required to be 8x8.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub column: u8,
}
impl Position {
    pub const A1: Self = Self::new(7, 0);
    pub const B1: Self = Self::new(7, 1);
    pub const C1: Self = Self::new(7, 2);
    pub const D1: Self = Self::new(7, 3);
    pub const E1: Self = Self::new(7, 4);
    pub const F1: Self = Self::new(7, 5);
    pub const G1: Self = Self::new(7, 6);
    pub const H1: Self = Self::new(7, 7);
    pub const A2: Self = Self::new(6, 0);
    pub const B2: Self = Self::new(6, 1);
    pub const C2: Self = Self::new(6, 2);
    pub const D2: Self = Self::new(6, 3);
    pub const E2: Self = Self::new(6, 4);
    pub const F2: Self = Self::new(6, 5);
    pub const G2: Self = Self::new(6, 6);
    pub const H2: Self = Self::new(6, 7);
    pub const A3: Self = Self::new(5, 0);
    pub const B3: Self = Self::new(5, 1);
    pub const C3: Self = Self::new(5, 2);
    pub const D3: Self = Self::new(5, 3);
    pub const E3: Self = Self::new(5, 4);
    pub const F3: Self = Self::new(5, 5);
    pub const G3: Self = Self::new(5, 6);
    pub const H3: Self = Self::new(5, 7);
    pub const A4: Self = Self::new(4, 0);
    pub const B4: Self = Self::new(4, 1);
    pub const C4: Self = Self::new(4, 2);
    pub const D4: Self = Self::new(4, 3);
    pub const E4: Self = Self::new(4, 4);
    pub const F4: Self = Self::new(4, 5);
    pub const G4: Self = Self::new(4, 6);
    pub const H4: Self = Self::new(4, 7);
    pub const A5: Self = Self::new(3, 0);
    pub const B5: Self = Self::new(3, 1);
    pub const C5: Self = Self::new(3, 2);
    pub const D5: Self = Self::new(3, 3);
    pub const E5: Self = Self::new(3, 4);
    pub const F5: Self = Self::new(3, 5);
    pub const G5: Self = Self::new(3, 6);
    pub const H5: Self = Self::new(3, 7);
    pub const A6: Self = Self::new(2, 0);
    pub const B6: Self = Self::new(2, 1);
    pub const C6: Self = Self::new(2, 2);
    pub const D6: Self = Self::new(2, 3);
    pub const E6: Self = Self::new(2, 4);
    pub const F6: Self = Self::new(2, 5);
    pub const G6: Self = Self::new(2, 6);
    pub const H6: Self = Self::new(2, 7);
    pub const A7: Self = Self::new(1, 0);
    pub const B7: Self = Self::new(1, 1);
    pub const C7: Self = Self::new(1, 2);
    pub const D7: Self = Self::new(1, 3);
    pub const E7: Self = Self::new(1, 4);
    pub const F7: Self = Self::new(1, 5);
    pub const G7: Self = Self::new(1, 6);
    pub const H7: Self = Self::new(1, 7);
    pub const A8: Self = Self::new(0, 0);
    pub const B8: Self = Self::new(0, 1);
    pub const C8: Self = Self::new(0, 2);
    pub const D8: Self = Self::new(0, 3);
    pub const E8: Self = Self::new(0, 4);
    pub const F8: Self = Self::new(0, 5);
    pub const G8: Self = Self::new(0, 6);
    pub const H8: Self = Self::new(0, 7);

    /// The number of ranks (and files) on a standard board, which algebraic notation assumes
    pub const STANDARD_SIZE: u8 = 8;

    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Convert from algebraic notation, where `rank -> row = 8 - rank` and
    /// `file -> column = file - 'a'`
    ///
    /// ```
    /// use board::Position;
    /// assert_eq!(Position::from_algebraic('e', 2), Ok(Position::new(6, 4)));
    /// assert_eq!(Position::from_algebraic('a', 8), Ok(Position::new(0, 0)));
    /// assert!(Position::from_algebraic('i', 2).is_err());
    /// assert!(Position::from_algebraic('a', 0).is_err());
    /// ```
    pub const fn from_algebraic(file: char, rank: u8) -> Result<Self, PositionError> {
        if !matches!(file, 'a'..='h') {
            return Err(PositionError::InvalidFile(file));
        }
        if rank == 0 || rank > Self::STANDARD_SIZE {
            return Err(PositionError::InvalidRank(rank));
        }
        Ok(Self::new(Self::STANDARD_SIZE - rank, file as u8 - b'a'))
    }

    /// The `(file, rank)` pair for this position, if it lies on a standard board
    ///
    /// ```
    /// use board::Position;
    /// assert_eq!(Position::E1.to_algebraic(), Some(('e', 1)));
    /// assert_eq!(Position::new(8, 0).to_algebraic(), None);
    /// ```
    pub const fn to_algebraic(self) -> Option<(char, u8)> {
        if self.row < Self::STANDARD_SIZE && self.column < Self::STANDARD_SIZE {
            Some(((b'a' + self.column) as char, Self::STANDARD_SIZE - self.row))
        } else {
            None
        }
    }

    /// Move by the given number of rows and columns
    ///
    /// Returns `None` if either coordinate would become negative. Whether the result is on the
    /// board is left to the board.
    ///
    /// ```
    /// use board::Position;
    /// assert_eq!(Position::E2.offset(-2, 0), Some(Position::E4));
    /// assert_eq!(Position::A8.offset(-1, 0), None);
    /// assert_eq!(Position::H1.offset(1, 1), Some(Position::new(8, 8)));
    /// ```
    pub fn offset(self, rows: i8, columns: i8) -> Option<Self> {
        Some(Self::new(
            self.row.checked_add_signed(rows)?,
            self.column.checked_add_signed(columns)?,
        ))
    }

    /// An iterator over all positions on a board of the given dimensions, in row-major order
    ///
    /// ```
    /// assert_eq!(board::Position::all_positions(8, 8).count(), 64);
    /// ```
    pub fn all_positions(rows: u8, columns: u8) -> impl Iterator<Item = Self> {
        (0..rows).flat_map(move |row| (0..columns).map(move |column| Self::new(row, column)))
    }
}
impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Position");
        debug.field("row", &self.row).field("column", &self.column);
        if let Some((file, rank)) = self.to_algebraic() {
            debug.field("readable", &format_args!("{file}{rank}"));
        }
        debug.finish()
    }
}
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some((file, rank)) => write!(f, "{file}{rank}"),
            None => write!(f, "({}, {})", self.row, self.column),
        }
    }
}
impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PositionError::InvalidLength);
        };
        let rank = match rank.to_digit(10) {
            Some(rank) => rank as u8,
            None => return Err(PositionError::InvalidRankChar(rank)),
        };
        Self::from_algebraic(file, rank)
    }
}

/// A displacement between two positions, in rows and columns
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionOffset {
    pub rows: i8,
    pub columns: i8,
}
impl PositionOffset {
    /// The offsets corresponding to all possible knight moves
    pub const KNIGHT_MOVES: [PositionOffset; 8] = [
        Self::new(2, 1),
        Self::new(2, -1),
        Self::new(-2, 1),
        Self::new(-2, -1),
        Self::new(1, 2),
        Self::new(1, -2),
        Self::new(-1, 2),
        Self::new(-1, -2),
    ];

    /// The offsets corresponding to all possible king moves
    pub const KING_MOVES: [PositionOffset; 8] = [
        Self::new(1, 1),
        Self::new(1, 0),
        Self::new(1, -1),
        Self::new(0, 1),
        Self::new(0, -1),
        Self::new(-1, 1),
        Self::new(-1, 0),
        Self::new(-1, -1),
    ];

    /// Unit steps along the diagonals, as a bishop slides
    pub const DIAGONALS: [PositionOffset; 4] = [
        Self::new(1, 1),
        Self::new(1, -1),
        Self::new(-1, 1),
        Self::new(-1, -1),
    ];

    /// Unit steps along ranks and files, as a rook slides
    pub const ORTHOGONALS: [PositionOffset; 4] = [
        Self::new(1, 0),
        Self::new(-1, 0),
        Self::new(0, 1),
        Self::new(0, -1),
    ];

    pub const fn new(rows: i8, columns: i8) -> Self {
        Self { rows, columns }
    }

    /// Apply this offset to the given position
    pub fn offset(self, position: Position) -> Option<Position> {
        position.offset(self.rows, self.columns)
    }
}
