use core::fmt;

use board::{Piece, Position};

use crate::{Error, Result};

/// Boards wider than this get numbered files instead of letters
const LETTERED_FILES: u8 = 26;

/// A stable handle to a piece registered with a match
///
/// Handles are handed out in the order pieces are registered, and they never change even as the
/// piece moves around the board.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u16);
impl PieceId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a square on the [`Board`] holds: a reference to a piece, not the piece's state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub id: PieceId,
    pub piece: Piece,
}

/// A fixed-size grid of squares, each holding at most one piece
///
/// This is pure storage and knows nothing about how pieces move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: u8,
    columns: u8,
    /// Row-major storage of every square
    squares: Vec<Option<Occupant>>,
}
impl Board {
    /// Create an empty board
    pub fn new(rows: u8, columns: u8) -> Self {
        Self {
            rows,
            columns,
            squares: vec![None; rows as usize * columns as usize],
        }
    }

    pub const fn rows(&self) -> u8 {
        self.rows
    }

    pub const fn columns(&self) -> u8 {
        self.columns
    }

    /// Returns if the position lies on this board
    pub const fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.column < self.columns
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.row as usize * self.columns as usize + position.column as usize)
    }

    /// Find the piece, if any, at the given position
    ///
    /// Returns `None` for positions off the board.
    pub fn piece_at(&self, position: Position) -> Option<Occupant> {
        self.index(position).and_then(|idx| self.squares[idx])
    }

    /// Put a piece on an empty square
    pub fn place(&mut self, occupant: Occupant, position: Position) -> Result<()> {
        let idx = self.index(position).ok_or(Error::OutOfBounds(position))?;
        let square = &mut self.squares[idx];
        if square.is_some() {
            return Err(Error::SquareOccupied(position));
        }
        *square = Some(occupant);
        Ok(())
    }

    /// Take whatever piece is on the given square off the board
    pub fn remove(&mut self, position: Position) -> Option<Occupant> {
        let idx = self.index(position)?;
        self.squares[idx].take()
    }

    /// All the positions on this board, in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        Position::all_positions(self.rows, self.columns)
    }

    /// Every occupied square and what is on it
    pub fn occupants(&self) -> impl Iterator<Item = (Position, Occupant)> + '_ {
        self.positions()
            .zip(&self.squares)
            .filter_map(|(position, square)| square.map(|occupant| (position, occupant)))
    }
}

/// Display as a grid with the rank on the left, files along the bottom, and `-` for empty
///
/// Files are lettered from `a` while there are few enough of them, and numbered from 1 otherwise.
///
/// ```
/// use mailbox::Match;
///
/// let rendered = Match::new().board().to_string();
/// let mut lines = rendered.lines();
/// assert_eq!(lines.next(), Some("8 r n b q k b n r"));
/// assert_eq!(lines.next(), Some("7 p p p p p p p p"));
/// assert_eq!(lines.next(), Some("6 - - - - - - - -"));
/// assert_eq!(lines.last(), Some("  a b c d e f g h"));
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.rows.to_string().len();
        let numbered_files = self.columns > LETTERED_FILES;
        let cell_width = if numbered_files {
            self.columns.to_string().len()
        } else {
            1
        };
        for row in 0..self.rows {
            write!(f, "{:>label_width$}", self.rows - row)?;
            for column in 0..self.columns {
                let cell = match self.piece_at(Position::new(row, column)) {
                    Some(occupant) => occupant.piece.fen_letter(),
                    None => '-',
                };
                write!(f, " {cell:>cell_width$}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{:label_width$}", "")?;
        for column in 0..self.columns {
            if numbered_files {
                write!(f, " {:>cell_width$}", u16::from(column) + 1)?;
            } else {
                write!(f, " {}", char::from(b'a' + column))?;
            }
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use board::{Color, PieceKind};

    fn occupant(id: u16, kind: PieceKind, color: Color) -> Occupant {
        Occupant {
            id: PieceId(id),
            piece: Piece::new(kind, color),
        }
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::new(8, 8);
        let rook = occupant(0, PieceKind::Rook, Color::White);
        board.place(rook, Position::A1).unwrap();
        assert_eq!(board.piece_at(Position::A1), Some(rook));
        assert_eq!(board.piece_at(Position::A2), None);
        assert_eq!(board.remove(Position::A1), Some(rook));
        assert_eq!(board.piece_at(Position::A1), None);
        assert_eq!(board.remove(Position::A1), None);
    }

    #[test]
    fn test_place_rejects_out_of_bounds_and_occupied() {
        let mut board = Board::new(8, 8);
        let king = occupant(0, PieceKind::King, Color::White);
        assert_eq!(
            board.place(king, Position::new(8, 0)),
            Err(Error::OutOfBounds(Position::new(8, 0))),
        );
        board.place(king, Position::E1).unwrap();
        assert_eq!(
            board.place(occupant(1, PieceKind::Queen, Color::Black), Position::E1),
            Err(Error::SquareOccupied(Position::E1)),
        );
        assert_eq!(board.piece_at(Position::E1), Some(king));
    }

    #[test]
    fn test_non_square_board() {
        let board = Board::new(5, 3);
        assert!(board.contains(Position::new(4, 2)));
        assert!(!board.contains(Position::new(2, 4)));
        assert!(!board.contains(Position::new(5, 0)));
        assert_eq!(board.positions().count(), 15);
        assert_eq!(board.piece_at(Position::new(7, 7)), None);
    }

    #[test]
    fn test_occupants_are_row_major() {
        let mut board = Board::new(8, 8);
        board
            .place(occupant(0, PieceKind::King, Color::White), Position::E1)
            .unwrap();
        board
            .place(occupant(1, PieceKind::King, Color::Black), Position::E8)
            .unwrap();
        let found: Vec<_> = board.occupants().map(|(position, _)| position).collect();
        assert_eq!(found, vec![Position::E8, Position::E1]);
    }

    #[test]
    fn test_display_small_board() {
        let mut board = Board::new(2, 3);
        board
            .place(occupant(0, PieceKind::King, Color::Black), Position::new(0, 1))
            .unwrap();
        board
            .place(occupant(1, PieceKind::Pawn, Color::White), Position::new(1, 2))
            .unwrap();
        assert_eq!(board.to_string(), "2 - k -\n1 - - P\n  a b c\n");
    }

    #[test]
    fn test_display_wide_board_numbers_files() {
        let mut board = Board::new(2, 200);
        board
            .place(occupant(0, PieceKind::King, Color::Black), Position::new(0, 0))
            .unwrap();
        board
            .place(occupant(1, PieceKind::King, Color::White), Position::new(1, 199))
            .unwrap();
        let rendered = board.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("2   k   -"));
        assert!(lines[1].ends_with("-   K"));
        let files: Vec<u16> = lines[2]
            .split_whitespace()
            .map(|label| label.parse().unwrap())
            .collect();
        assert_eq!(files, (1..=200).collect::<Vec<_>>());

        // The last lettered board still uses letters
        let board = Board::new(1, 26);
        assert!(board.to_string().ends_with("x y z\n"));
    }
}
