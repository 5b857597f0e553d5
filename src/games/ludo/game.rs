//! Ludo turn engine.
//!
//! A turn is: roll, then either move one eligible token or pass when nothing
//! can move. After a move the engine resolves captures and home entry, checks
//! for finished colors and the end of the game, then advances the turn.
//! Rolling a six grants the same seat another turn unless the game just ended.

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::board::{board_geometry, is_safe_cell, LAST_HOME_SLOT, RING_SIZE, TOKENS_PER_PLAYER};
use crate::core::{
    roll_die, Action, ActionRecord, Color, Dice, EngineError, GameRng, MoveKind, MoveOutcome,
    Player, PlayerId, PlayerMap, SetupError, DIE_FACES, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::rules::{movable_tokens, Choice, GameResult, Ranking, RulesEngine, TokenIndices, ENTRY_ROLL};
use crate::tokens::{Token, TokenRef, TokenState};

use super::snapshot::GameSnapshot;

/// The four tokens of one seat.
pub type TokenSet = [Token; TOKENS_PER_PLAYER];

/// A game in progress (or finished).
///
/// Seats are in turn order. The game owns every token through its seats.
#[derive(Clone, Debug)]
pub struct LudoGame {
    players: PlayerMap<Player>,
    tokens: PlayerMap<TokenSet>,

    current: PlayerId,
    dice_value: u8,
    has_rolled: bool,
    extra_turn_pending: bool,
    round: u32,

    /// Finished colors in finishing order.
    finished: SmallVec<[Color; MAX_PLAYERS]>,
    rankings: Vec<Ranking>,
    game_over: bool,

    rng: GameRng,
    history: Vector<ActionRecord>,
    sequence: u32,
}

/// Builder for creating a `LudoGame`.
pub struct LudoGameBuilder {
    players: Vec<Player>,
    rng: GameRng,
}

impl Default for LudoGameBuilder {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            rng: GameRng::new(42),
        }
    }
}

impl LudoGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a player. Seats are filled in call order.
    pub fn player(mut self, name: impl Into<String>, color: Color) -> Self {
        self.players.push(Player::new(name, color));
        self
    }

    /// Seat several players at once.
    pub fn players(mut self, players: impl IntoIterator<Item = Player>) -> Self {
        self.players.extend(players);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = GameRng::new(seed);
        self
    }

    /// Use an existing RNG (e.g. a fork of a registry's RNG).
    pub fn rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    /// Validate the roster and build the game.
    pub fn build(self) -> Result<LudoGame, SetupError> {
        validate_roster(&self.players)?;

        let tokens = PlayerMap::from_vec(self.players.iter().map(|p| new_token_set(p.color)).collect());
        let players = PlayerMap::from_vec(self.players);

        info!(
            players = players.player_count(),
            colors = ?players.values().map(|p| p.color).collect::<Vec<_>>(),
            "Starting game"
        );

        Ok(LudoGame {
            players,
            tokens,
            current: PlayerId::new(0),
            dice_value: 1,
            has_rolled: false,
            extra_turn_pending: false,
            round: 1,
            finished: SmallVec::new(),
            rankings: Vec::new(),
            game_over: false,
            rng: self.rng,
            history: Vector::new(),
            sequence: 0,
        })
    }
}

pub(crate) fn validate_roster(players: &[Player]) -> Result<(), SetupError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(SetupError::PlayerCount(players.len()));
    }
    for (i, player) in players.iter().enumerate() {
        let earlier = &players[..i];
        if earlier.iter().any(|p| p.color == player.color) {
            return Err(SetupError::DuplicateColor(player.color));
        }
        if earlier.iter().any(|p| p.name == player.name) {
            return Err(SetupError::DuplicateName(player.name.clone()));
        }
    }
    Ok(())
}

fn validate_token_set(color: Color, tokens: &TokenSet) -> Result<(), SetupError> {
    let has_home_lane = board_geometry(color).home_threshold.is_some();
    for (index, token) in tokens.iter().enumerate() {
        let state = token.state();
        let valid = token.id() == TokenRef::new(color, index as u8)
            && state.is_on_board()
            && (has_home_lane || state.home_slot().is_none());
        if !valid {
            return Err(SetupError::InvalidToken { color, index });
        }
    }
    Ok(())
}

/// Finished colors must be seated, distinct and fully home, and rankings
/// must list them first, in order. A finished game ranks every seat.
fn validate_finish_order(snapshot: &GameSnapshot) -> Result<(), SetupError> {
    let seat_of = |color: Color| snapshot.players.iter().find(|(_, p)| p.color == color);
    let player_count = snapshot.players.player_count();

    for (i, &color) in snapshot.finished_colors.iter().enumerate() {
        let (seat, _) = seat_of(color).ok_or(SetupError::InconsistentRankings)?;
        let all_home = snapshot.tokens[seat].iter().all(Token::is_home);
        if !all_home || snapshot.finished_colors[..i].contains(&color) {
            return Err(SetupError::InconsistentRankings);
        }
    }

    let expected_rankings = if snapshot.game_over {
        if player_count - snapshot.finished_colors.len() > 1 {
            return Err(SetupError::InconsistentRankings);
        }
        player_count
    } else {
        if player_count - snapshot.finished_colors.len() <= 1 {
            return Err(SetupError::InconsistentRankings);
        }
        snapshot.finished_colors.len()
    };
    if snapshot.rankings.len() != expected_rankings {
        return Err(SetupError::InconsistentRankings);
    }

    let mut ranked: SmallVec<[Color; MAX_PLAYERS]> = SmallVec::new();
    for (i, ranking) in snapshot.rankings.iter().enumerate() {
        let (_, player) = seat_of(ranking.color).ok_or(SetupError::InconsistentRankings)?;
        let in_order = snapshot.finished_colors.get(i).map_or(true, |&c| c == ranking.color);
        if usize::from(ranking.position) != i + 1
            || player.name != ranking.name
            || !in_order
            || ranked.contains(&ranking.color)
        {
            return Err(SetupError::InconsistentRankings);
        }
        ranked.push(ranking.color);
    }
    Ok(())
}

fn new_token_set(color: Color) -> TokenSet {
    std::array::from_fn(|i| Token::new(color, i as u8))
}

impl LudoGame {
    /// Start building a game.
    pub fn builder() -> LudoGameBuilder {
        LudoGameBuilder::new()
    }

    // === Read-only accessors ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Seats in turn order.
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_seat(&self) -> PlayerId {
        self.current
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Value of the last roll (1 before the first roll).
    #[must_use]
    pub fn dice_value(&self) -> u8 {
        self.dice_value
    }

    #[must_use]
    pub fn has_rolled(&self) -> bool {
        self.has_rolled
    }

    #[must_use]
    pub fn extra_turn_pending(&self) -> bool {
        self.extra_turn_pending
    }

    /// Current round, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Finished colors in finishing order.
    #[must_use]
    pub fn finished_colors(&self) -> &[Color] {
        &self.finished
    }

    #[must_use]
    pub fn rankings(&self) -> &[Ranking] {
        &self.rankings
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Every roll, move and pass so far.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Seat of `color`.
    pub fn seat_of(&self, color: Color) -> Result<PlayerId, EngineError> {
        self.players
            .iter()
            .find(|(_, p)| p.color == color)
            .map(|(id, _)| id)
            .ok_or(EngineError::UnknownColor(color))
    }

    /// The tokens of `color`, by index.
    pub fn tokens(&self, color: Color) -> Result<&TokenSet, EngineError> {
        let seat = self.seat_of(color)?;
        Ok(&self.tokens[seat])
    }

    pub fn token(&self, color: Color, index: usize) -> Result<Token, EngineError> {
        let tokens = self.tokens(color)?;
        tokens.get(index).copied().ok_or(EngineError::TokenIndexOutOfRange(index))
    }

    /// Indices of `color`'s tokens that can move with the current dice value.
    pub fn movable_tokens(&self, color: Color) -> Result<TokenIndices, EngineError> {
        Ok(movable_tokens(self.tokens(color)?, self.dice_value))
    }

    /// True when the current seat has rolled and has nothing it can move.
    ///
    /// The caller is expected to surface this and then call `pass_turn`.
    #[must_use]
    pub fn must_pass(&self) -> bool {
        !self.game_over
            && self.has_rolled
            && movable_tokens(&self.tokens[self.current], self.dice_value).is_empty()
    }

    /// Serializable read-only view of the game.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            tokens: self.tokens.clone(),
            current_player: self.current,
            dice_value: self.dice_value,
            has_rolled: self.has_rolled,
            extra_turn_pending: self.extra_turn_pending,
            round: self.round,
            finished_colors: self.finished.to_vec(),
            rankings: self.rankings.clone(),
            game_over: self.game_over,
            rng: self.rng.state(),
        }
    }

    /// Resume a game from a snapshot. History starts empty.
    ///
    /// Snapshots are untrusted input: the roster, every token, the dice value
    /// and the finish order are checked before anything is built.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, SetupError> {
        let players: Vec<Player> = snapshot.players.values().cloned().collect();
        validate_roster(&players)?;
        if snapshot.tokens.player_count() != players.len() {
            return Err(SetupError::PlayerCount(snapshot.tokens.player_count()));
        }
        if snapshot.current_player.index() >= players.len() {
            return Err(SetupError::CurrentSeat(snapshot.current_player.0));
        }
        if !(1..=DIE_FACES).contains(&snapshot.dice_value) {
            return Err(SetupError::DiceValue(snapshot.dice_value));
        }
        for (seat, player) in snapshot.players.iter() {
            validate_token_set(player.color, &snapshot.tokens[seat])?;
        }
        validate_finish_order(&snapshot)?;

        Ok(Self {
            players: snapshot.players,
            tokens: snapshot.tokens,
            current: snapshot.current_player,
            dice_value: snapshot.dice_value,
            has_rolled: snapshot.has_rolled,
            extra_turn_pending: snapshot.extra_turn_pending,
            round: snapshot.round,
            finished: snapshot.finished_colors.into_iter().collect(),
            rankings: snapshot.rankings,
            game_over: snapshot.game_over,
            rng: GameRng::from_state(&snapshot.rng),
            history: Vector::new(),
            sequence: 0,
        })
    }

    // === Dice ===

    /// Roll with the game's own RNG.
    pub fn roll_dice(&mut self) -> Result<u8, EngineError> {
        self.check_can_roll()?;
        let value = roll_die(&mut self.rng)?;
        Ok(self.apply_roll(value))
    }

    /// Roll with an injected dice source.
    ///
    /// A source that yields a value outside 1..=6 is refused and the game is
    /// left as it was.
    pub fn roll_dice_with(&mut self, dice: &mut impl Dice) -> Result<u8, EngineError> {
        self.check_can_roll()?;
        let result = roll_die(dice);
        if let Err(err) = &result {
            debug!(error = %err, "Rejected roll");
        }
        Ok(self.apply_roll(result?))
    }

    fn check_can_roll(&self) -> Result<(), EngineError> {
        if self.game_over {
            return Err(EngineError::GameOver);
        }
        if self.has_rolled {
            return Err(EngineError::AlreadyRolled);
        }
        Ok(())
    }

    fn apply_roll(&mut self, value: u8) -> u8 {
        self.dice_value = value;
        self.has_rolled = true;
        self.extra_turn_pending = value == ENTRY_ROLL;

        debug!(color = %self.current_player().color, value, "Rolled dice");
        self.record(Action::Roll(value));
        value
    }

    // === Moves ===

    /// Move `color`'s token `index` by the current dice value.
    ///
    /// On success the move is resolved, finishing and game end are checked,
    /// and the turn advances (or stays, after a six). On error nothing changes.
    pub fn move_token(&mut self, color: Color, index: usize) -> Result<MoveOutcome, EngineError> {
        let seat = self.seat_of(color)?;
        if index >= TOKENS_PER_PLAYER {
            return Err(EngineError::TokenIndexOutOfRange(index));
        }

        let result = self.check_move(seat, color, index);
        if let Err(err) = &result {
            debug!(%color, index, error = %err, "Rejected move");
        }
        result?;

        let kind = self.resolve_move(seat, index);
        self.has_rolled = false;

        let finished = self.check_seat_finished(seat);
        let game_over = self.check_game_end();

        let outcome = MoveOutcome {
            token: TokenRef::new(color, index as u8),
            kind,
            finished,
            game_over,
        };
        self.record(Action::Move(outcome.clone()));

        if !game_over {
            self.advance_turn();
        }

        Ok(outcome)
    }

    fn check_move(&self, seat: PlayerId, color: Color, index: usize) -> Result<(), EngineError> {
        if self.game_over {
            return Err(EngineError::GameOver);
        }
        if seat != self.current {
            return Err(EngineError::NotYourTurn {
                current: self.current_player().color,
                requested: color,
            });
        }
        if !self.has_rolled {
            return Err(EngineError::DiceNotRolled);
        }
        if !movable_tokens(&self.tokens[seat], self.dice_value).contains(&(index as u8)) {
            return Err(EngineError::TokenNotMovable {
                color,
                index,
                dice: self.dice_value,
            });
        }
        Ok(())
    }

    /// Apply an eligible move to the board.
    fn resolve_move(&mut self, seat: PlayerId, index: usize) -> MoveKind {
        let dice = self.dice_value;
        let token = &mut self.tokens[seat][index];
        let color = token.color();

        match token.state() {
            TokenState::InBase => {
                let cell = token.enter_play();
                debug!(token = %token.id(), cell, "Entered play");
                MoveKind::Entered { cell }
            }
            TokenState::Active(from) => {
                // Threshold test uses the unwrapped sum.
                let reach = from + dice;
                let threshold = board_geometry(color)
                    .home_threshold
                    .filter(|&t| from < t && t <= reach);

                if let Some(threshold) = threshold {
                    let slot = (reach - threshold).min(LAST_HOME_SLOT);
                    token.enter_home(slot);
                    info!(token = %token.id(), slot, "Token reached home");
                    MoveKind::ReachedHome { slot }
                } else {
                    let to = reach % RING_SIZE;
                    token.move_to(to);
                    let captured = self.resolve_capture(color, to);
                    MoveKind::Advanced { from, to, captured }
                }
            }
            TokenState::Home(_) => unreachable!("home tokens are never eligible to move"),
        }
    }

    /// Send every unsafe opposing token on `position` back to base.
    fn resolve_capture(&mut self, mover: Color, position: u8) -> SmallVec<[TokenRef; 4]> {
        let mut captured = SmallVec::new();
        if is_safe_cell(position) {
            return captured;
        }

        for (_, tokens) in self.tokens.iter_mut() {
            for token in tokens.iter_mut() {
                if token.color() == mover {
                    continue;
                }
                if token.state() == TokenState::Active(position) && !token.is_safe() {
                    token.capture();
                    captured.push(token.id());
                }
            }
        }

        for victim in &captured {
            info!(%mover, victim = %victim, position, "Captured token");
        }
        captured
    }

    // === Finish and game end ===

    /// Record `color` as finished if all its tokens are home.
    ///
    /// Idempotent: a color is ranked the first time it is seen finished.
    /// Returns whether the color is finished.
    pub fn check_player_finished(&mut self, color: Color) -> Result<bool, EngineError> {
        let seat = self.seat_of(color)?;
        Ok(self.check_seat_finished(seat))
    }

    fn check_seat_finished(&mut self, seat: PlayerId) -> bool {
        let color = self.players[seat].color;
        let all_home = self.tokens[seat].iter().all(Token::is_home);

        if all_home && !self.finished.contains(&color) {
            self.finished.push(color);
            let position = self.push_ranking(seat);
            info!(%color, name = %self.players[seat].name, position, "Player finished");
        }

        all_home
    }

    /// Detect newly finished colors and end the game once at most one
    /// color remains unfinished. The last unfinished color is ranked last.
    ///
    /// Returns whether the game is over.
    pub fn check_game_end(&mut self) -> bool {
        if self.game_over {
            return true;
        }

        for seat in (0..self.player_count()).map(|i| PlayerId::new(i as u8)) {
            self.check_seat_finished(seat);
        }

        let unfinished = self.player_count() - self.finished.len();
        if unfinished > 1 {
            return false;
        }

        self.game_over = true;
        self.extra_turn_pending = false;
        let last = self
            .players
            .iter()
            .find(|(_, p)| !self.finished.contains(&p.color))
            .map(|(seat, _)| seat);
        if let Some(seat) = last {
            self.push_ranking(seat);
        }

        debug_assert_eq!(self.rankings.len(), self.player_count());
        info!(
            winner = ?self.rankings.first().map(|r| &r.name),
            rounds = self.round,
            "Game over"
        );
        true
    }

    fn push_ranking(&mut self, seat: PlayerId) -> u8 {
        let position = self.rankings.len() as u8 + 1;
        let player = &self.players[seat];
        self.rankings.push(Ranking {
            position,
            name: player.name.clone(),
            color: player.color,
        });
        position
    }

    // === Turns ===

    /// Hand the turn on.
    ///
    /// After a six the same seat goes again. Otherwise the next seat plays,
    /// and wrapping back to seat 0 starts a new round. Always clears the roll.
    pub fn advance_turn(&mut self) {
        if self.extra_turn_pending {
            self.extra_turn_pending = false;
            debug!(color = %self.current_player().color, "Extra turn");
        } else {
            let next = (self.current.index() + 1) % self.player_count();
            self.current = PlayerId::new(next as u8);
            if next == 0 {
                self.round += 1;
                debug!(round = self.round, "New round");
            }
        }
        self.has_rolled = false;
    }

    /// Pass after a roll that left nothing to move.
    pub fn pass_turn(&mut self) -> Result<(), EngineError> {
        if self.game_over {
            return Err(EngineError::GameOver);
        }
        if !self.has_rolled {
            return Err(EngineError::DiceNotRolled);
        }
        if !self.must_pass() {
            return Err(EngineError::MovesAvailable(self.current_player().color));
        }

        debug!(color = %self.current_player().color, dice = self.dice_value, "No movable tokens");
        self.record(Action::Pass);
        self.advance_turn();
        Ok(())
    }

    // === Scenario setup ===

    /// Put a token in an arbitrary state, bypassing the rules.
    ///
    /// For setting up positions (puzzles, tests, resuming from an external
    /// record). Finishing is not re-evaluated until the next move.
    pub fn place_token(&mut self, color: Color, index: usize, state: TokenState) -> Result<(), EngineError> {
        let seat = self.seat_of(color)?;
        if !state.is_on_board() {
            return Err(EngineError::PositionOutOfRange(state));
        }
        let token = self.tokens[seat]
            .get_mut(index)
            .ok_or(EngineError::TokenIndexOutOfRange(index))?;
        token.place(state);
        Ok(())
    }

    fn record(&mut self, action: Action) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.history
            .push_back(ActionRecord::new(self.current, action, self.round, sequence));
    }
}

impl RulesEngine for LudoGame {
    fn active_player(&self) -> PlayerId {
        self.current
    }

    fn legal_choices(&self, player: PlayerId) -> Vec<Choice> {
        if self.game_over || player != self.current {
            return vec![];
        }
        if !self.has_rolled {
            return vec![Choice::Roll];
        }

        let movable = movable_tokens(&self.tokens[player], self.dice_value);
        if movable.is_empty() {
            vec![Choice::Pass]
        } else {
            movable.into_iter().map(Choice::Move).collect()
        }
    }

    fn apply_choice(
        &mut self,
        player: PlayerId,
        choice: Choice,
        dice: &mut impl Dice,
    ) -> Result<(), EngineError> {
        if player.index() >= self.player_count() {
            return Err(EngineError::UnknownSeat(player.0));
        }
        let color = self.players[player].color;
        if player != self.current && !self.game_over {
            return Err(EngineError::NotYourTurn {
                current: self.current_player().color,
                requested: color,
            });
        }

        match choice {
            Choice::Roll => self.roll_dice_with(dice).map(|_| ()),
            Choice::Move(index) => self.move_token(color, index as usize).map(|_| ()),
            Choice::Pass => self.pass_turn(),
        }
    }

    fn is_terminal(&self) -> Option<GameResult> {
        self.game_over.then(|| GameResult {
            rankings: self.rankings.clone(),
        })
    }
}
