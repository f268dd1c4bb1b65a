use super::board::Cell;

/// A side that can act. Red moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Red => Cell::Red,
            Player::Yellow => Cell::Yellow,
        }
    }

    /// Owner of an occupied cell; `None` for an empty one.
    pub fn from_cell(cell: Cell) -> Option<Player> {
        match cell {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }

    /// Numeric code used in stored game records (1 = Red, 2 = Yellow).
    pub fn code(self) -> u8 {
        match self {
            Player::Red => 1,
            Player::Yellow => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Player> {
        match code {
            1 => Some(Player::Red),
            2 => Some(Player::Yellow),
            _ => None,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Yellow => "Yellow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::Red.other(), Player::Yellow);
        assert_eq!(Player::Yellow.other(), Player::Red);
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::Red.name(), "Red");
        assert_eq!(Player::Yellow.name(), "Yellow");
    }

    #[test]
    fn test_codes() {
        assert_eq!(Player::Red.code(), 1);
        assert_eq!(Player::Yellow.code(), 2);
        assert_eq!(Player::from_code(1), Some(Player::Red));
        assert_eq!(Player::from_code(2), Some(Player::Yellow));
        assert_eq!(Player::from_code(0), None);
        assert_eq!(Player::from_code(3), None);
    }

    #[test]
    fn test_empty_cell_has_no_owner() {
        assert_eq!(Player::from_cell(Cell::Empty), None);
        assert_eq!(Player::from_cell(Cell::Yellow), Some(Player::Yellow));
    }
}
