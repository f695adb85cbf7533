//! Where each kind of piece may move, judged on movement geometry alone

use core::fmt;

use board::{Color, Piece, PieceKind, Position, PositionOffset};

use crate::{Board, PieceId};

/// A board-shaped grid marking every square a piece could move to
///
/// This does not account for whether the move would leave the mover's own king in check; that is
/// up to the [`Match`](crate::Match).
#[derive(Clone, PartialEq, Eq)]
pub struct LegalityMatrix {
    rows: u8,
    columns: u8,
    cells: Vec<bool>,
}
impl LegalityMatrix {
    /// A matrix with nothing marked, shaped like the given board
    pub fn empty(board: &Board) -> Self {
        Self {
            rows: board.rows(),
            columns: board.columns(),
            cells: vec![false; board.rows() as usize * board.columns() as usize],
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        (position.row < self.rows && position.column < self.columns)
            .then(|| position.row as usize * self.columns as usize + position.column as usize)
    }

    /// Whether the given square is marked; squares off the board never are
    pub fn get(&self, position: Position) -> bool {
        self.index(position).is_some_and(|idx| self.cells[idx])
    }

    fn mark(&mut self, position: Position) {
        if let Some(idx) = self.index(position) {
            self.cells[idx] = true;
        }
    }

    /// Query if any square is marked
    pub fn any(&self) -> bool {
        self.cells.iter().any(|&cell| cell)
    }

    /// Returns the number of marked squares
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Produce an iterator of all marked squares, in row-major order
    pub fn squares_iter(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all_positions(self.rows, self.columns)
            .zip(&self.cells)
            .filter_map(|(position, &cell)| cell.then_some(position))
    }
}
impl fmt::Debug for LegalityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.squares_iter()).finish()
    }
}
/// Display as a TUI version of a grid
///
/// ```
/// use board::Position;
/// use mailbox::Match;
///
/// let game = Match::new();
/// let matrix = game.legality_matrix_at(Position::G1).unwrap();
/// assert_eq!(
///     matrix.to_string(),
///     "        \n        \n        \n        \n        \n     X X\n        \n        \n",
/// );
/// ```
impl fmt::Display for LegalityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for row in self.cells.chunks(self.columns.max(1) as usize) {
            for &cell in row {
                f.write_char(if cell { 'X' } else { ' ' })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

/// A piece registered with a match, along with where it is and how often it has moved
///
/// The position is only meaningful while the piece is on the board; a captured piece keeps the
/// square it was taken on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceState {
    pub(crate) id: PieceId,
    pub(crate) piece: Piece,
    pub(crate) position: Position,
    pub(crate) move_count: u32,
}
impl PieceState {
    pub(crate) const fn new(id: PieceId, piece: Piece, position: Position) -> Self {
        Self {
            id,
            piece,
            position,
            move_count: 0,
        }
    }

    pub const fn id(&self) -> PieceId {
        self.id
    }

    pub const fn piece(&self) -> Piece {
        self.piece
    }

    pub const fn kind(&self) -> PieceKind {
        self.piece.kind
    }

    pub const fn color(&self) -> Color {
        self.piece.color
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    /// The number of moves this piece has made, counting moves that were later taken back only
    /// until they were taken back
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    pub(crate) fn increment_move_count(&mut self) {
        self.move_count += 1;
    }

    pub(crate) fn decrement_move_count(&mut self) {
        debug_assert!(self.move_count > 0, "undoing a move that was never made");
        self.move_count = self.move_count.saturating_sub(1);
    }

    /// Every square this piece could move to on the given board
    pub fn legality_matrix(&self, board: &Board) -> LegalityMatrix {
        let mut matrix = LegalityMatrix::empty(board);
        match self.piece.kind {
            PieceKind::Pawn => self.mark_pawn_moves(board, &mut matrix),
            PieceKind::Knight => self.mark_steps(board, &PositionOffset::KNIGHT_MOVES, &mut matrix),
            PieceKind::King => self.mark_steps(board, &PositionOffset::KING_MOVES, &mut matrix),
            PieceKind::Bishop => self.mark_rays(board, &PositionOffset::DIAGONALS, &mut matrix),
            PieceKind::Rook => self.mark_rays(board, &PositionOffset::ORTHOGONALS, &mut matrix),
            // A queen moves as a rook and a bishop together
            PieceKind::Queen => {
                self.mark_rays(board, &PositionOffset::ORTHOGONALS, &mut matrix);
                self.mark_rays(board, &PositionOffset::DIAGONALS, &mut matrix);
            }
        }
        matrix
    }

    /// Returns `true` if there is anywhere at all for this piece to go
    pub fn has_any_legal_move(&self, board: &Board) -> bool {
        self.legality_matrix(board).any()
    }

    /// Returns `true` if the geometry of this piece allows it to reach `destination`
    pub fn is_legal_target(&self, board: &Board, destination: Position) -> bool {
        self.legality_matrix(board).get(destination)
    }

    /// Whether the square is on the board and is either empty or holds an enemy
    fn can_land_on(&self, board: &Board, position: Position) -> bool {
        board.contains(position)
            && board
                .piece_at(position)
                .map_or(true, |occupant| occupant.piece.color != self.color())
    }

    fn holds_enemy(&self, board: &Board, position: Position) -> bool {
        board
            .piece_at(position)
            .is_some_and(|occupant| occupant.piece.color != self.color())
    }

    fn is_empty_square(board: &Board, position: Position) -> bool {
        board.contains(position) && board.piece_at(position).is_none()
    }

    fn mark_steps(&self, board: &Board, offsets: &[PositionOffset], matrix: &mut LegalityMatrix) {
        for target in offsets.iter().filter_map(|offset| offset.offset(self.position)) {
            if self.can_land_on(board, target) {
                matrix.mark(target);
            }
        }
    }

    /// Slide in each direction until something is in the way, capturing it if it's an enemy
    fn mark_rays(&self, board: &Board, directions: &[PositionOffset], matrix: &mut LegalityMatrix) {
        for direction in directions {
            let mut square = direction.offset(self.position);
            while let Some(target) = square.filter(|&target| board.contains(target)) {
                if board.piece_at(target).is_some() {
                    if self.holds_enemy(board, target) {
                        matrix.mark(target);
                    }
                    break;
                }
                matrix.mark(target);
                square = direction.offset(target);
            }
        }
    }

    /// The second row from this piece's own edge of the board
    fn is_on_starting_row(&self, board: &Board) -> bool {
        match self.color() {
            Color::White => board.rows().checked_sub(2) == Some(self.position.row),
            Color::Black => self.position.row == 1,
        }
    }

    fn mark_pawn_moves(&self, board: &Board, matrix: &mut LegalityMatrix) {
        let forward = self.color().forward();
        if let Some(one_step) = self.position.offset(forward, 0) {
            if Self::is_empty_square(board, one_step) {
                matrix.mark(one_step);
                if self.move_count == 0 && self.is_on_starting_row(board) {
                    if let Some(two_steps) = one_step.offset(forward, 0) {
                        if Self::is_empty_square(board, two_steps) {
                            matrix.mark(two_steps);
                        }
                    }
                }
            }
        }
        for side in [-1, 1] {
            if let Some(target) = self.position.offset(forward, side) {
                if self.holds_enemy(board, target) {
                    matrix.mark(target);
                }
            }
        }
    }
}
