//! Board state validation logic

use super::board::{BoardState, Cell, Player};

impl BoardState {
    /// Check that this grid with `turn` to move can arise in a real game.
    ///
    /// Either player may have opened, so piece counts may differ by one in
    /// either direction. The player to move must be the one with fewer or
    /// equal pieces, at most one side may hold a line, and a line must belong
    /// to whoever moved last.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] describing the first rule the
    /// position breaks.
    pub fn validate(&self, turn: Player) -> Result<(), crate::Error> {
        let ones = self.count(Cell::PlayerOne);
        let twos = self.count(Cell::PlayerTwo);
        let invalid = |reason: String| crate::Error::InvalidPosition {
            label: self.encode(turn),
            reason,
        };

        if ones.abs_diff(twos) > 1 {
            return Err(invalid(format!(
                "piece counts (one={ones}, two={twos}) differ by more than one"
            )));
        }

        // The side to move never has more pieces than its opponent.
        let consistent = match turn {
            Player::One => ones <= twos,
            Player::Two => twos <= ones,
        };
        if !consistent {
            return Err(invalid(format!(
                "piece counts (one={ones}, two={twos}) are inconsistent with {turn} to move"
            )));
        }

        match (self.check_win(Player::One), self.check_win(Player::Two)) {
            (true, true) => Err(invalid("both players have a line".to_string())),
            (true, false) if turn == Player::One => Err(invalid(format!(
                "{turn} has already won but is recorded to move"
            ))),
            (false, true) if turn == Player::Two => Err(invalid(format!(
                "{turn} has already won but is recorded to move"
            ))),
            _ => Ok(()),
        }
    }

    fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> BoardState {
        BoardState::from_string(s).unwrap()
    }

    #[test]
    fn empty_board_is_valid_for_either_opener() {
        assert!(BoardState::new().validate(Player::One).is_ok());
        assert!(BoardState::new().validate(Player::Two).is_ok());
    }

    #[test]
    fn turn_must_follow_piece_counts() {
        let one_ahead = board("X.. ... ...");
        assert!(one_ahead.validate(Player::Two).is_ok());
        assert!(one_ahead.validate(Player::One).is_err());

        let two_ahead = board("O.. ... ...");
        assert!(two_ahead.validate(Player::One).is_ok());
        assert!(two_ahead.validate(Player::Two).is_err());
    }

    #[test]
    fn unreachable_counts_are_rejected() {
        let err = board("XX. ... ...").validate(Player::Two).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidPosition { .. }));
        assert!(board("OO. O.. ...").validate(Player::One).is_err());
    }

    #[test]
    fn double_winner_is_rejected() {
        let both = board("XXX OOO ...");
        for turn in [Player::One, Player::Two] {
            let err = both.validate(turn).unwrap_err();
            assert!(err.to_string().contains("both players"), "{err}");
        }
    }

    #[test]
    fn winner_must_have_moved_last() {
        let one_won = board("XXX OO. ...");
        assert!(one_won.validate(Player::Two).is_ok());

        // Equal counts, so the turn alone is consistent; the line is not.
        let one_won_even = board("XXX OO. O..");
        assert!(one_won_even.validate(Player::Two).is_ok());
        assert!(one_won_even.validate(Player::One).is_err());

        let two_won = board("OOO XX. ...");
        assert!(two_won.validate(Player::One).is_ok());
    }
}
