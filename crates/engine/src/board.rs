//! Board engine - the phase state machine around a [`Grid`]
//!
//! A swap request exchanges two pieces immediately and then waits for the
//! swap animation. When it completes, both cells are checked for matches:
//!
//! | Outcome  | Effect                                                   |
//! |----------|----------------------------------------------------------|
//! | No match | pieces swapped back, `SwapReverted`, no move consumed    |
//! | Match    | `SwapConsumed`, the matched cells seed a cascade         |
//!
//! A cascade runs passes of clear -> collapse -> refill -> rescan until a
//! rescan finds nothing. Every stage applies its data change on entry, emits
//! events for it, then waits the configured time. Hosts drive the waits with
//! [`Board::tick`] and pull events with [`Board::drain_events`].

use serde::Serialize;
use tracing::{debug, trace, warn};

use match3_core::{
    finder, BoardConfig, ConfigError, Grid, MatchSet, PassTally, PieceFactory, PieceTemplate,
    StartingTile, TimingConfig,
};

use crate::hint;
use crate::types::{BoardEvent, Coord, TileType, FILL_MAX_ATTEMPTS, REFILL_DROP_OFFSET};

/// Stage transitions a single tick may perform before yielding
const MAX_ADVANCES_PER_TICK: u32 = 1024;

/// Ticks [`Board::settle`] spends before giving up on a cycle
const MAX_SETTLE_TICKS: u32 = 10_000;

/// What a resolving board is busy with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    Swap,
    Cascade,
}

/// Externally visible board phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Idle,
    /// A gesture has selected a cell but not submitted a swap yet
    AwaitingInput,
    Resolving(Resolution),
}

/// Why a swap request was refused. A refused request changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    NotIdle,
    OutOfBounds,
    EmptyCell,
    NotAdjacent,
    NotPlaying,
}

impl SwapRejection {
    pub fn code(self) -> &'static str {
        match self {
            SwapRejection::NotIdle | SwapRejection::NotPlaying => "busy",
            SwapRejection::OutOfBounds
            | SwapRejection::EmptyCell
            | SwapRejection::NotAdjacent => "invalid_swap",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SwapRejection::NotIdle => "board is resolving a previous swap",
            SwapRejection::OutOfBounds => "swap coordinate is outside the board",
            SwapRejection::EmptyCell => "swap cell holds no piece",
            SwapRejection::NotAdjacent => "swap cells are not orthogonally adjacent",
            SwapRejection::NotPlaying => "game is not being played",
        }
    }
}

/// Outcome of [`Board::setup_board`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub placed: u32,
    /// Cells that kept a matching piece after the retry budget ran out
    pub exhausted: Vec<Coord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Ready,
    SwapForward { a: Coord, b: Coord },
    SwapBack,
    Cleared { cascade: u32, columns: Vec<i8> },
    Collapsed { cascade: u32, touched: Vec<Coord> },
    Refilled { cascade: u32, touched: Vec<Coord> },
    Settling,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Selection {
    clicked: Option<Coord>,
    target: Option<Coord>,
}

/// A match-3 board: grid, piece factory and the resolution state machine
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    timing: TimingConfig,
    grid: Grid,
    factory: PieceFactory,
    stage: Stage,
    timer_ms: u32,
    selection: Selection,
    events: Vec<BoardEvent>,
    cycles: u32,
}

impl Board {
    /// Validate `config` and lay out the tiles. The board holds no pieces
    /// until [`Board::setup_board`] is called.
    pub fn new(config: BoardConfig, timing: TimingConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height);
        for tile in &config.starting_tiles {
            grid.set_tile(tile.x, tile.y, tile.tile)?;
        }
        grid.fill_remaining_tiles(TileType::Normal);

        let factory = PieceFactory::new(config.pieces.clone(), seed);
        Ok(Self::assemble(config, timing, grid, factory))
    }

    /// Wrap a prepared grid (pieces included), refilling from `pieces`.
    ///
    /// Tiles missing from `grid` become Normal.
    pub fn from_grid(
        mut grid: Grid,
        pieces: Vec<PieceTemplate>,
        timing: TimingConfig,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        grid.fill_remaining_tiles(TileType::Normal);

        let starting_tiles = grid
            .coords()
            .filter_map(|at| match grid.tile(at.x, at.y) {
                Some(TileType::Normal) | None => None,
                Some(tile) => Some(StartingTile { x: at.x, y: at.y, tile }),
            })
            .collect();
        let config = BoardConfig {
            width: grid.width(),
            height: grid.height(),
            starting_tiles,
            pieces,
            ..BoardConfig::default()
        };
        config.validate()?;

        let next_id = grid.pieces().map(|p| p.id().0 + 1).max().unwrap_or(0);
        let factory = PieceFactory::new(config.pieces.clone(), seed).starting_at(next_id);
        Ok(Self::assemble(config, timing, grid, factory))
    }

    fn assemble(config: BoardConfig, timing: TimingConfig, grid: Grid, factory: PieceFactory) -> Self {
        Self {
            config,
            timing,
            grid,
            factory,
            stage: Stage::Ready,
            timer_ms: 0,
            selection: Selection::default(),
            events: Vec::new(),
            cycles: 0,
        }
    }

    /// Fill every Normal cell, column by column from the bottom, avoiding
    /// ready-made matches to the left and below.
    ///
    /// Any pieces already on the board are discarded first.
    pub fn setup_board(&mut self) -> FillReport {
        self.grid.clear_pieces();
        self.stage = Stage::Ready;
        self.timer_ms = 0;
        self.selection = Selection::default();

        let mut report = FillReport::default();
        for at in self.grid.empty_normal_cells() {
            let mut attempts = 0;
            loop {
                let Some(piece) = self.factory.spawn() else {
                    break;
                };
                if self.grid.place_piece(piece, at.x, at.y).is_err() {
                    break;
                }
                if !finder::has_match_on_fill(&self.grid, at.x, at.y) {
                    break;
                }
                attempts += 1;
                if attempts >= FILL_MAX_ATTEMPTS {
                    warn!(
                        x = at.x,
                        y = at.y,
                        attempts,
                        "no match-free piece found, keeping a matching one"
                    );
                    report.exhausted.push(at);
                    self.events.push(BoardEvent::FillExhausted { x: at.x, y: at.y });
                    break;
                }
                self.grid.take_piece(at.x, at.y);
            }

            if let Some(piece) = self.grid.piece_at(at) {
                report.placed += 1;
                self.events.push(BoardEvent::PieceSpawned {
                    x: at.x,
                    y: at.y,
                    match_value: piece.match_value(),
                    drop_from: REFILL_DROP_OFFSET,
                });
            }
        }

        debug!(placed = report.placed, exhausted = report.exhausted.len(), "board filled");
        report
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn width(&self) -> u8 {
        self.grid.width()
    }

    pub fn height(&self) -> u8 {
        self.grid.height()
    }

    /// RNG state; a board built with it continues the same piece sequence
    pub fn seed(&self) -> u32 {
        self.factory.seed()
    }

    /// Number of cascades that have run to completion
    pub fn cycles_completed(&self) -> u32 {
        self.cycles
    }

    pub fn phase(&self) -> Phase {
        match self.stage {
            Stage::Ready if self.selection.clicked.is_some() => Phase::AwaitingInput,
            Stage::Ready => Phase::Idle,
            Stage::SwapForward { .. } | Stage::SwapBack => Phase::Resolving(Resolution::Swap),
            Stage::Cleared { .. }
            | Stage::Collapsed { .. }
            | Stage::Refilled { .. }
            | Stage::Settling => Phase::Resolving(Resolution::Cascade),
        }
    }

    /// True when a swap request could be accepted
    pub fn accepts_input(&self) -> bool {
        self.stage == Stage::Ready
    }

    pub fn is_resolving(&self) -> bool {
        !self.accepts_input()
    }

    /// Time left in the current wait (0 when idle)
    pub fn pending_wait_ms(&self) -> u32 {
        self.timer_ms
    }

    /// True if some adjacent swap on the current grid would make a match
    pub fn has_available_swap(&self) -> bool {
        hint::find_matching_swap(&self.grid).is_some()
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[BoardEvent] {
        &self.events
    }

    pub fn request_swap(&mut self, a: Coord, b: Coord) -> bool {
        self.try_swap(a, b).is_ok()
    }

    /// Swap the pieces at `a` and `b` and start resolving.
    pub fn try_swap(&mut self, a: Coord, b: Coord) -> Result<(), SwapRejection> {
        if !self.accepts_input() {
            return Err(SwapRejection::NotIdle);
        }
        if !self.grid.is_within_bounds(a.x, a.y) || !self.grid.is_within_bounds(b.x, b.y) {
            return Err(SwapRejection::OutOfBounds);
        }
        if !a.is_adjacent(b) {
            return Err(SwapRejection::NotAdjacent);
        }
        if self.grid.piece_at(a).is_none() || self.grid.piece_at(b).is_none() {
            return Err(SwapRejection::EmptyCell);
        }
        self.grid
            .swap_pieces(a, b)
            .map_err(|_| SwapRejection::EmptyCell)?;

        debug!(?a, ?b, "swap accepted");
        self.selection = Selection::default();
        self.push_swap_moves(a, b);
        self.begin(Stage::SwapForward { a, b }, self.timing.swap_ms);
        Ok(())
    }

    /// Select the first cell of a drag gesture
    pub fn click(&mut self, x: i8, y: i8) -> bool {
        if !self.accepts_input()
            || !self.grid.is_within_bounds(x, y)
            || self.selection.clicked.is_some()
        {
            return false;
        }
        self.selection.clicked = Some(Coord::new(x, y));
        true
    }

    /// Record the drag target; only a neighbour of the clicked cell counts
    pub fn drag_to(&mut self, x: i8, y: i8) -> bool {
        let at = Coord::new(x, y);
        match self.selection.clicked {
            Some(clicked) if clicked.is_adjacent(at) && self.grid.is_within_bounds(x, y) => {
                self.selection.target = Some(at);
                true
            }
            _ => false,
        }
    }

    /// End the gesture, submitting the swap if a target was recorded
    pub fn release(&mut self) -> bool {
        let selection = std::mem::take(&mut self.selection);
        match (selection.clicked, selection.target) {
            (Some(a), Some(b)) => self.request_swap(a, b),
            _ => false,
        }
    }

    pub fn cancel_selection(&mut self) {
        self.selection = Selection::default();
    }

    /// Clicked cell and drag target of the current gesture
    pub fn selection(&self) -> (Option<Coord>, Option<Coord>) {
        (self.selection.clicked, self.selection.target)
    }

    /// Advance the current wait by `elapsed_ms`. Returns true if any stage
    /// completed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.accepts_input() {
            return false;
        }

        self.timer_ms = self.timer_ms.saturating_sub(elapsed_ms);

        let mut advances = 0;
        while self.timer_ms == 0 && self.is_resolving() && advances < MAX_ADVANCES_PER_TICK {
            self.advance();
            advances += 1;
        }
        advances > 0
    }

    /// Tick until the board accepts input again. Returns false if the
    /// cascade was still running after the tick budget.
    pub fn settle(&mut self) -> bool {
        for _ in 0..MAX_SETTLE_TICKS {
            if self.accepts_input() {
                return true;
            }
            self.tick(u32::MAX);
        }
        self.accepts_input()
    }

    fn begin(&mut self, stage: Stage, wait_ms: u32) {
        self.stage = stage;
        self.timer_ms = wait_ms;
    }

    fn advance(&mut self) {
        match std::mem::replace(&mut self.stage, Stage::Ready) {
            Stage::Ready | Stage::SwapBack => {}
            Stage::SwapForward { a, b } => self.finish_swap(a, b),
            Stage::Cleared { cascade, columns } => self.collapse(cascade, &columns),
            Stage::Collapsed { cascade, touched } => self.refill(cascade, touched),
            Stage::Refilled { cascade, touched } => self.rescan(cascade, &touched),
            Stage::Settling => trace!("board settled"),
        }
    }

    fn push_swap_moves(&mut self, a: Coord, b: Coord) {
        let duration_ms = self.timing.swap_ms;
        self.events.push(BoardEvent::PieceMoved {
            x: b.x,
            y: b.y,
            from_x: a.x,
            from_y: a.y,
            duration_ms,
        });
        self.events.push(BoardEvent::PieceMoved {
            x: a.x,
            y: a.y,
            from_x: b.x,
            from_y: b.y,
            duration_ms,
        });
    }

    fn finish_swap(&mut self, a: Coord, b: Coord) {
        let mut matches = finder::matches_through_cell(&self.grid, a.x, a.y);
        matches.union(&finder::matches_through_cell(&self.grid, b.x, b.y));

        if matches.is_empty() {
            if self.grid.swap_pieces(a, b).is_ok() {
                self.push_swap_moves(b, a);
            }
            debug!(?a, ?b, "swap made no match, reverting");
            self.events.push(BoardEvent::SwapReverted { a, b });
            self.begin(Stage::SwapBack, self.timing.swap_ms);
            return;
        }

        self.events.push(BoardEvent::SwapConsumed { a, b });
        self.clear(&matches, 1);
    }

    fn clear(&mut self, matches: &MatchSet, cascade: u32) {
        let mut tally = PassTally::default();
        for at in matches.iter() {
            if let Some(piece) = self.grid.take_piece(at.x, at.y) {
                tally.add(&piece);
                self.events.push(BoardEvent::PieceCleared {
                    x: at.x,
                    y: at.y,
                    match_value: piece.match_value(),
                });
            }
        }

        trace!(cascade, pieces = tally.pieces, score_sum = tally.score_sum, "pass cleared");
        self.events.push(BoardEvent::PassScored {
            pieces: tally.pieces,
            score_sum: tally.score_sum,
            cascade,
        });
        self.begin(
            Stage::Cleared {
                cascade,
                columns: matches.columns(),
            },
            self.timing.clear_ms,
        );
    }

    fn collapse(&mut self, cascade: u32, columns: &[i8]) {
        let mut touched = Vec::new();
        let mut longest = 0;
        for &x in columns {
            for mv in self.grid.collapse_column(x) {
                let duration_ms = self.timing.collapse_ms_per_cell.saturating_mul(mv.distance());
                longest = longest.max(duration_ms);
                self.events.push(BoardEvent::PieceMoved {
                    x: mv.to.x,
                    y: mv.to.y,
                    from_x: mv.from.x,
                    from_y: mv.from.y,
                    duration_ms,
                });
                touched.push(mv.to);
            }
        }
        self.begin(Stage::Collapsed { cascade, touched }, longest);
    }

    fn refill(&mut self, cascade: u32, mut touched: Vec<Coord>) {
        let mut spawned = 0;
        for at in self.grid.empty_normal_cells() {
            let Some(piece) = self.factory.spawn() else {
                break;
            };
            let match_value = piece.match_value();
            if self.grid.place_piece(piece, at.x, at.y).is_ok() {
                spawned += 1;
                self.events.push(BoardEvent::PieceSpawned {
                    x: at.x,
                    y: at.y,
                    match_value,
                    drop_from: REFILL_DROP_OFFSET,
                });
                touched.push(at);
            }
        }

        let wait_ms = if spawned > 0 { self.timing.refill_ms } else { 0 };
        self.begin(Stage::Refilled { cascade, touched }, wait_ms);
    }

    fn rescan(&mut self, cascade: u32, touched: &[Coord]) {
        let matches = finder::matches_for_cells(&self.grid, touched.iter().copied());
        if matches.is_empty() {
            self.cycles += 1;
            debug!(passes = cascade, "cascade finished");
            self.events.push(BoardEvent::CycleFinished { passes: cascade });
            self.begin(Stage::Settling, self.timing.settle_ms);
        } else {
            self.clear(&matches, cascade + 1);
        }
    }
}
