//! Turn bookkeeping shared by the GUI and the console front end
//!
//! [`Game`] owns the board and tracks whose turn it is, the outcome, each
//! side's last move and whether the automated side has moved yet. Moves only
//! enter through [`Game::apply_move`], which checks the outcome right after
//! every stone, before the turn passes.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::board::{Board, Pos, Side};
use crate::engine::{AIEngine, MoveResult};
use crate::error::{BoardError, GameError};
use crate::eval::{connection_cost, Cost};
use crate::rules::{outcome, GameOutcome};
use crate::search::TurnContext;

/// Who sits in the two seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// One human, the engine plays the other side
    VsAi { human: Side },
    /// Two humans on one board
    TwoPlayer,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::VsAi { human: Side::Red }
    }
}

impl GameMode {
    /// Side played by the engine, if any
    pub fn automated_side(self) -> Option<Side> {
        match self {
            GameMode::VsAi { human } => Some(human.opponent()),
            GameMode::TwoPlayer => None,
        }
    }
}

/// A game in progress. Red always moves first.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    mode: GameMode,
    to_move: Side,
    outcome: GameOutcome,
    last_red: Option<Pos>,
    last_blue: Option<Pos>,
    automated_first_move: bool,
    moves_played: usize,
}

impl Game {
    pub fn new(size: usize, mode: GameMode) -> Result<Self, BoardError> {
        Ok(Self {
            board: Board::new(size)?,
            mode,
            to_move: Side::Red,
            outcome: GameOutcome::Ongoing,
            last_red: None,
            last_blue: None,
            automated_first_move: true,
            moves_played: 0,
        })
    }

    /// Start over on the same size and mode
    pub fn reset(&mut self) {
        self.board.reset();
        self.to_move = Side::Red;
        self.outcome = GameOutcome::Ongoing;
        self.last_red = None;
        self.last_blue = None;
        self.automated_first_move = true;
        self.moves_played = 0;
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    #[inline]
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    #[inline]
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn last_move(&self, side: Side) -> Option<Pos> {
        match side {
            Side::Red => self.last_red,
            Side::Blue => self.last_blue,
        }
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_over() && self.mode.automated_side() != Some(self.to_move)
    }

    pub fn is_automated_turn(&self) -> bool {
        !self.is_over() && self.mode.automated_side() == Some(self.to_move)
    }

    /// What the engine needs to know to move for the side to move.
    pub fn turn_context(&self) -> TurnContext {
        let side = self.to_move;
        TurnContext {
            side,
            last_opponent_move: self.last_move(side.opponent()),
            is_first_move: self.mode.automated_side() == Some(side) && self.automated_first_move,
        }
    }

    /// Opponent of the side to move and the stones it still needs.
    pub fn threat_level(&self) -> (Side, Cost) {
        let opponent = self.to_move.opponent();
        (opponent, connection_cost(&self.board, opponent))
    }

    /// Play `pos` for the side to move.
    pub fn apply_move(&mut self, pos: Pos) -> Result<GameOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let side = self.to_move;
        self.board.try_move(pos, side)?;

        match side {
            Side::Red => self.last_red = Some(pos),
            Side::Blue => self.last_blue = Some(pos),
        }
        if self.mode.automated_side() == Some(side) {
            self.automated_first_move = false;
        }
        self.moves_played += 1;
        info!(%side, %pos, "move");

        self.outcome = outcome(&self.board);
        match self.outcome {
            GameOutcome::Win(winner) => info!(%winner, moves = self.moves_played, "game won"),
            GameOutcome::Draw => info!(moves = self.moves_played, "game drawn"),
            GameOutcome::Ongoing => self.to_move = side.opponent(),
        }
        Ok(self.outcome)
    }

    /// Play a move entered by a person; refused on the engine's turn.
    pub fn human_move(&mut self, pos: Pos) -> Result<GameOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if !self.is_human_turn() {
            return Err(GameError::NotYourTurn(self.to_move));
        }
        self.apply_move(pos)
    }

    /// Play a uniformly random empty cell for the side to move (turn timer
    /// ran out).
    pub fn play_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Pos, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let cells = self.board.empty_cells();
        let pos = *cells.choose(rng).ok_or(GameError::GameOver)?;
        info!(side = %self.to_move, %pos, "turn timer expired, random move");
        self.apply_move(pos)?;
        Ok(pos)
    }

    /// Let `engine` move for the automated side.
    pub fn automated_turn(&mut self, engine: &mut AIEngine) -> Result<MoveResult, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if !self.is_automated_turn() {
            return Err(GameError::NotYourTurn(self.to_move));
        }
        let ctx = self.turn_context();
        let result = engine.get_move_with_stats(
            &mut self.board,
            ctx.side,
            ctx.last_opponent_move,
            ctx.is_first_move,
        );
        match result.best_move {
            Some(pos) => {
                self.apply_move(pos)?;
            }
            None => return Err(GameError::GameOver),
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CascadeRule;
    use crate::engine::SearchType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_game() {
        let game = Game::new(7, GameMode::default()).unwrap();
        assert_eq!(game.to_move(), Side::Red);
        assert!(game.is_human_turn());
        assert!(!game.is_automated_turn());
        assert_eq!(game.outcome(), GameOutcome::Ongoing);
        assert!(Game::new(30, GameMode::TwoPlayer).is_err());
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new(5, GameMode::TwoPlayer).unwrap();
        assert_eq!(game.apply_move(Pos::new(0, 0)), Ok(GameOutcome::Ongoing));
        assert_eq!(game.to_move(), Side::Blue);
        assert_eq!(game.last_move(Side::Red), Some(Pos::new(0, 0)));
        assert_eq!(game.last_move(Side::Blue), None);
        assert!(game.is_human_turn());
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut game = Game::new(5, GameMode::TwoPlayer).unwrap();
        game.apply_move(Pos::new(1, 1)).unwrap();
        let err = game.apply_move(Pos::new(1, 1)).unwrap_err();
        assert_eq!(err, GameError::Board(BoardError::Occupied(Pos::new(1, 1))));
        assert_eq!(game.to_move(), Side::Blue);
        assert_eq!(game.moves_played(), 1);
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = Game::new(2, GameMode::TwoPlayer).unwrap();
        game.apply_move(Pos::new(1, 0)).unwrap(); // Red
        game.apply_move(Pos::new(0, 0)).unwrap(); // Blue
        let outcome = game.apply_move(Pos::new(0, 1)).unwrap(); // Red
        assert_eq!(outcome, GameOutcome::Win(Side::Red));
        assert!(game.is_over());
        assert_eq!(game.apply_move(Pos::new(1, 1)), Err(GameError::GameOver));
        // The winner stays recorded as the last mover
        assert_eq!(game.to_move(), Side::Red);
    }

    #[test]
    fn test_human_move_refused_on_engine_turn() {
        let mut game = Game::new(5, GameMode::VsAi { human: Side::Red }).unwrap();
        game.human_move(Pos::new(2, 2)).unwrap();
        assert!(game.is_automated_turn());
        assert_eq!(
            game.human_move(Pos::new(0, 0)),
            Err(GameError::NotYourTurn(Side::Blue))
        );
    }

    #[test]
    fn test_automated_turn_first_move_flag() {
        let mut game = Game::new(7, GameMode::VsAi { human: Side::Red }).unwrap();
        let mut engine = AIEngine::new();
        game.human_move(Pos::new(0, 0)).unwrap();

        assert!(game.turn_context().is_first_move);
        let result = game.automated_turn(&mut engine).unwrap();
        assert_eq!(result.search_type, SearchType::Cascade(CascadeRule::Opening));
        assert_eq!(result.best_move, Some(Pos::new(3, 3)));
        assert_eq!(game.to_move(), Side::Red);

        game.human_move(Pos::new(0, 1)).unwrap();
        let ctx = game.turn_context();
        assert!(!ctx.is_first_move);
        assert_eq!(ctx.last_opponent_move, Some(Pos::new(0, 1)));
    }

    #[test]
    fn test_automated_turn_refused_for_human() {
        let mut game = Game::new(5, GameMode::TwoPlayer).unwrap();
        let mut engine = AIEngine::new();
        assert_eq!(
            game.automated_turn(&mut engine).unwrap_err(),
            GameError::NotYourTurn(Side::Red)
        );
    }

    #[test]
    fn test_play_random_fills_to_the_end() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = Game::new(4, GameMode::TwoPlayer).unwrap();
        while !game.is_over() {
            let pos = game.play_random(&mut rng).unwrap();
            assert!(!game.board().is_cell_empty(pos));
        }
        // Hex has no draws: some side connected before the board filled up
        assert!(matches!(game.outcome(), GameOutcome::Win(_)));
        assert!(game.play_random(&mut rng).is_err());
    }

    #[test]
    fn test_threat_level() {
        let mut game = Game::new(5, GameMode::TwoPlayer).unwrap();
        for (red, blue) in [((2, 0), (0, 0)), ((2, 1), (0, 1)), ((2, 3), (0, 2))] {
            game.apply_move(Pos::new(red.0, red.1)).unwrap();
            game.apply_move(Pos::new(blue.0, blue.1)).unwrap();
        }
        game.apply_move(Pos::new(2, 4)).unwrap();
        // Blue to move, Red one stone away
        assert_eq!(game.threat_level(), (Side::Red, Cost::Finite(1)));
    }

    #[test]
    fn test_reset() {
        let mut game = Game::new(5, GameMode::VsAi { human: Side::Blue }).unwrap();
        assert!(game.is_automated_turn());
        let mut engine = AIEngine::new();
        game.automated_turn(&mut engine).unwrap();
        game.reset();
        assert_eq!(game.board().total_stones(), 0);
        assert_eq!(game.to_move(), Side::Red);
        assert!(game.turn_context().is_first_move);
    }
}
