//! Move application and win detection.

use super::board::{Board, Position, COLS, CONNECT_COUNT, ROWS};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
    GameOver,
}

/// The four line orientations a win can lie along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right, `\`.
    DiagonalDown,
    /// Top-right to bottom-left, `/`.
    DiagonalUp,
}

impl Direction {
    /// Scan order used by [`check_win`].
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// Step as `(d_row, d_col)`.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (1, -1),
        }
    }
}

/// Exactly `CONNECT_COUNT` consecutive positions held by one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningLine {
    positions: [Position; CONNECT_COUNT],
    direction: Direction,
    player: Player,
}

impl WinningLine {
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }
}

/// Drop `player`'s piece into `col`.
///
/// Returns the new board and where the piece landed. `board` itself is never
/// touched; a failed move produces no board at all.
pub fn apply_move(
    board: &Board,
    col: usize,
    player: Player,
) -> Result<(Board, Position), MoveError> {
    if col >= COLS {
        return Err(MoveError::InvalidColumn);
    }
    let row = board.drop_row(col).ok_or(MoveError::ColumnFull)?;
    let pos = Position::new(row, col);
    Ok((board.with_cell(pos, player.to_cell()), pos))
}

fn offset(pos: Position, (dr, dc): (isize, isize), step: isize) -> Option<Position> {
    let row = pos.row as isize + dr * step;
    let col = pos.col as isize + dc * step;
    if (0..ROWS as isize).contains(&row) && (0..COLS as isize).contains(&col) {
        Some(Position::new(row as usize, col as usize))
    } else {
        None
    }
}

fn is_consecutive(run: &[Position], (dr, dc): (isize, isize)) -> bool {
    run.windows(2).all(|pair| {
        pair[1].row as isize == pair[0].row as isize + dr
            && pair[1].col as isize == pair[0].col as isize + dc
    })
}

/// Look for a win through the piece at `last_move`.
///
/// Only lines through the latest piece are examined: the check runs after
/// every move, so any new win must include it.
pub fn check_win(board: &Board, last_move: Position) -> Option<WinningLine> {
    if last_move.row >= ROWS || last_move.col >= COLS {
        return None;
    }
    let player = Player::from_cell(board.at(last_move))?;
    let reach = CONNECT_COUNT as isize - 1;

    for direction in Direction::ALL {
        let delta = direction.delta();
        let mut run: Vec<Position> = Vec::with_capacity(CONNECT_COUNT);

        for step in -reach..=reach {
            match offset(last_move, delta, step) {
                Some(pos) if board.at(pos) == player.to_cell() => {
                    run.push(pos);
                    if run.len() == CONNECT_COUNT && is_consecutive(&run, delta) {
                        let mut positions = [last_move; CONNECT_COUNT];
                        positions.copy_from_slice(&run);
                        return Some(WinningLine {
                            positions,
                            direction,
                            player,
                        });
                    }
                }
                _ => run.clear(),
            }
        }
    }

    None
}

/// A position is terminal once the last move won or the board filled up.
pub fn is_terminal(board: &Board, last_move: Option<Position>) -> bool {
    last_move.is_some_and(|pos| check_win(board, pos).is_some()) || board.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    /// Play `moves` in order, alternating from Red. Returns the board and the
    /// last landing position.
    fn play(moves: &[usize]) -> (Board, Position) {
        let mut board = Board::new();
        let mut player = Player::Red;
        let mut last = Position::new(0, 0);
        for &col in moves {
            let (next, pos) = apply_move(&board, col, player).unwrap();
            board = next;
            last = pos;
            player = player.other();
        }
        (board, last)
    }

    /// Drop pieces for a single player, ignoring turn order.
    fn drop_all(board: Board, cols: &[usize], player: Player) -> (Board, Position) {
        let mut board = board;
        let mut last = Position::new(0, 0);
        for &col in cols {
            let (next, pos) = apply_move(&board, col, player).unwrap();
            board = next;
            last = pos;
        }
        (board, last)
    }

    #[test]
    fn test_apply_move_lands_at_bottom() {
        let board = Board::new();
        let (next, pos) = apply_move(&board, 3, Player::Red).unwrap();
        assert_eq!(pos, Position::new(5, 3));
        assert_eq!(next.get(5, 3), Cell::Red);

        let (next, pos) = apply_move(&next, 3, Player::Yellow).unwrap();
        assert_eq!(pos, Position::new(4, 3));
        assert_eq!(next.get(4, 3), Cell::Yellow);
    }

    #[test]
    fn test_apply_move_leaves_input_untouched() {
        let (board, _) = play(&[3, 3, 2, 4]);
        let before = board;
        let (next, pos) = apply_move(&board, 2, Player::Red).unwrap();

        assert_eq!(board, before);
        let mut differing = Vec::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                if board.get(row, col) != next.get(row, col) {
                    differing.push(Position::new(row, col));
                }
            }
        }
        assert_eq!(differing, vec![pos]);
    }

    #[test]
    fn test_full_column_rejected() {
        let (board, _) = play(&[0, 0, 0, 0, 0, 0]);
        assert!(!board.is_legal_column(0));
        assert_eq!(
            apply_move(&board, 0, Player::Red),
            Err(MoveError::ColumnFull)
        );
    }

    #[test]
    fn test_invalid_column() {
        let board = Board::new();
        assert_eq!(
            apply_move(&board, 7, Player::Red),
            Err(MoveError::InvalidColumn)
        );
        assert_eq!(
            apply_move(&board, usize::MAX, Player::Red),
            Err(MoveError::InvalidColumn)
        );
    }

    #[test]
    fn test_legality_matches_apply_move() {
        let (board, _) = play(&[0, 0, 0, 0, 0, 0, 6, 6, 6]);
        for col in 0..=COLS + 1 {
            assert_eq!(
                board.is_legal_column(col),
                apply_move(&board, col, Player::Red).is_ok(),
                "column {col}"
            );
        }
    }

    #[test]
    fn test_gravity_holds_after_moves() {
        let (board, _) = play(&[3, 3, 2, 4, 4, 1, 5, 6, 6, 6, 0, 3, 3]);
        for col in 0..COLS {
            let mut seen_empty = false;
            for row in (0..ROWS).rev() {
                match board.get(row, col) {
                    Cell::Empty => seen_empty = true,
                    _ => assert!(!seen_empty, "floating piece at ({row}, {col})"),
                }
            }
        }
    }

    #[test]
    fn test_horizontal_win() {
        let (board, last) = drop_all(Board::new(), &[0, 1, 2, 3], Player::Red);
        let line = check_win(&board, last).expect("horizontal win");
        assert_eq!(line.direction(), Direction::Horizontal);
        assert_eq!(line.player(), Player::Red);
        assert_eq!(
            line.positions(),
            &[
                Position::new(5, 0),
                Position::new(5, 1),
                Position::new(5, 2),
                Position::new(5, 3),
            ]
        );
    }

    #[test]
    fn test_win_detected_from_middle_piece() {
        let (board, _) = drop_all(Board::new(), &[0, 1, 3], Player::Red);
        let (board, last) = drop_all(board, &[2], Player::Red);
        assert_eq!(last, Position::new(5, 2));
        let line = check_win(&board, last).expect("win through the gap");
        assert!(line.contains(Position::new(5, 0)));
        assert!(line.contains(Position::new(5, 3)));
    }

    #[test]
    fn test_vertical_win() {
        let (board, last) = drop_all(Board::new(), &[3, 3, 3, 3], Player::Yellow);
        let line = check_win(&board, last).expect("vertical win");
        assert_eq!(line.direction(), Direction::Vertical);
        assert_eq!(line.positions()[0], Position::new(2, 3));
        assert_eq!(line.positions()[3], Position::new(5, 3));
    }

    #[test]
    fn test_diagonal_up_win() {
        // Rising diagonal (5,0) (4,1) (3,2) (2,3)
        let (board, _) = drop_all(Board::new(), &[1, 2, 2, 3, 3, 3], Player::Yellow);
        let (board, _) = drop_all(board, &[0, 1, 2], Player::Red);
        let (board, last) = drop_all(board, &[3], Player::Red);
        let line = check_win(&board, last).expect("diagonal win");
        assert_eq!(line.direction(), Direction::DiagonalUp);
        assert!(line.contains(Position::new(5, 0)));
        assert!(line.contains(Position::new(2, 3)));
    }

    #[test]
    fn test_diagonal_down_win() {
        // Falling diagonal (2,3) (3,4) (4,5) (5,6)
        let (board, _) = drop_all(Board::new(), &[5, 4, 4, 3, 3, 3], Player::Yellow);
        let (board, _) = drop_all(board, &[6, 5, 4], Player::Red);
        let (board, last) = drop_all(board, &[3], Player::Red);
        let line = check_win(&board, last).expect("diagonal win");
        assert_eq!(line.direction(), Direction::DiagonalDown);
        assert_eq!(line.positions()[0], Position::new(2, 3));
        assert_eq!(line.positions()[3], Position::new(5, 6));
    }

    #[test]
    fn test_no_win_with_three() {
        let (board, last) = drop_all(Board::new(), &[0, 1, 2], Player::Red);
        assert!(check_win(&board, last).is_none());
    }

    #[test]
    fn test_broken_line_is_not_a_win() {
        // X X . X X on the bottom row, then Yellow fills the gap.
        let (board, _) = drop_all(Board::new(), &[0, 1, 3, 4], Player::Red);
        let (board, last) = drop_all(board, &[2], Player::Yellow);
        assert!(check_win(&board, last).is_none());
    }

    #[test]
    fn test_win_only_reported_for_completing_move() {
        // Four in a row exists, but the piece checked is an unrelated one.
        let (board, _) = drop_all(Board::new(), &[0, 1, 2, 3], Player::Red);
        let (board, last) = drop_all(board, &[6], Player::Yellow);
        assert!(check_win(&board, last).is_none());
    }

    #[test]
    fn test_empty_cell_never_wins() {
        let board = Board::new();
        assert!(check_win(&board, Position::new(5, 3)).is_none());
        assert!(check_win(&board, Position::new(ROWS, COLS)).is_none());
    }

    #[test]
    fn test_full_board_draw() {
        // Columns filled in pairs so no line of four can form.
        let order = [0, 1, 0, 1, 1, 0, 1, 0, 0, 1, 0, 1];
        let mut board = Board::new();
        let mut last = Position::new(0, 0);
        for block in 0..3 {
            let offset = block * 2;
            for (i, &col) in order.iter().enumerate() {
                let player = if i % 2 == 0 { Player::Red } else { Player::Yellow };
                let (next, pos) = apply_move(&board, col + offset, player).unwrap();
                board = next;
                last = pos;
            }
        }
        for i in 0..ROWS {
            let player = if (i / 2) % 2 == 0 { Player::Red } else { Player::Yellow };
            let (next, pos) = apply_move(&board, 6, player).unwrap();
            board = next;
            last = pos;
        }

        assert!(board.is_full());
        assert!(check_win(&board, last).is_none());
        assert!(is_terminal(&board, Some(last)));
    }

    #[test]
    fn test_is_terminal() {
        let (board, last) = play(&[3, 4]);
        assert!(!is_terminal(&board, Some(last)));
        assert!(!is_terminal(&Board::new(), None));

        let (board, last) = drop_all(Board::new(), &[2, 2, 2, 2], Player::Red);
        assert!(is_terminal(&board, Some(last)));
    }
}
