use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// Whether the minefield exists yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinefieldPhase {
    /// No mines until the first reveal, so it can never hit one.
    Pending,
    /// Mines placed and counted, `start_time` in milliseconds since the Unix epoch.
    Armed { start_time: u64 },
}

impl Default for MinefieldPhase {
    fn default() -> Self {
        Self::Pending
    }
}

/// One game session.
///
/// Every action takes `&self` and returns the next state, the receiver is never modified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedGameState")]
pub struct GameState {
    config: BoardConfig,
    grid: Grid,
    status: GameStatus,
    flags_used: CellCount,
    revealed_count: CellCount,
    phase: MinefieldPhase,
}

/// Deserialized fields before the board is checked against its counters.
#[derive(Deserialize)]
struct UncheckedGameState {
    config: BoardConfig,
    grid: Grid,
    status: GameStatus,
    flags_used: CellCount,
    revealed_count: CellCount,
    phase: MinefieldPhase,
}

impl TryFrom<UncheckedGameState> for GameState {
    type Error = GameError;

    fn try_from(state: UncheckedGameState) -> Result<Self> {
        let UncheckedGameState {
            config,
            grid,
            status,
            flags_used,
            revealed_count,
            phase,
        } = state;

        if grid.size() != config.size() || grid.revealed_safe_count() != revealed_count {
            return Err(GameError::InconsistentState);
        }

        let expected_mines = match phase {
            MinefieldPhase::Pending => 0,
            MinefieldPhase::Armed { .. } => config.mines,
        };
        if grid.mine_count() != expected_mines {
            return Err(GameError::InconsistentState);
        }

        let mut counted = grid.clone();
        counted.calculate_adjacent_mines();
        if counted != grid {
            return Err(GameError::InconsistentState);
        }

        let exploded = grid.iter().any(|(_, cell)| cell.is_mine && cell.is_revealed);
        let expected_status = if exploded {
            GameStatus::Lost
        } else if expected_mines == config.mines && revealed_count == config.safe_cell_count() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        };
        if status != expected_status {
            return Err(GameError::InconsistentState);
        }
        if phase == MinefieldPhase::Pending && (revealed_count != 0 || !status.is_playing()) {
            return Err(GameError::InconsistentState);
        }

        // winning flags every mine without counting them as the player's flags
        let flags_match = match status {
            GameStatus::Won => flags_used <= grid.flagged_count(),
            _ => flags_used == grid.flagged_count(),
        };
        if !flags_match {
            return Err(GameError::InconsistentState);
        }

        Ok(Self {
            config,
            grid,
            status,
            flags_used,
            revealed_count,
            phase,
        })
    }
}

impl GameState {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_config(difficulty.config())
    }

    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            config,
            grid: Grid::new(config.rows, config.cols),
            status: Default::default(),
            flags_used: 0,
            revealed_count: 0,
            phase: Default::default(),
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn cols(&self) -> Coord {
        self.config.cols
    }

    pub fn mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn flags_used(&self) -> CellCount {
        self.flags_used
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn phase(&self) -> MinefieldPhase {
        self.phase
    }

    /// True until the first reveal places the mines.
    pub fn first_click(&self) -> bool {
        matches!(self.phase, MinefieldPhase::Pending)
    }

    pub fn start_time(&self) -> Option<u64> {
        match self.phase {
            MinefieldPhase::Pending => None,
            MinefieldPhase::Armed { start_time } => Some(start_time),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.grid.get(coords).copied()
    }

    /// Mines minus flags, negative when the player over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flags_used as isize)
    }

    /// Milliseconds between the first reveal and `now_ms`, 0 before the first reveal.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.start_time()
            .map_or(0, |start_time| now_ms.saturating_sub(start_time))
    }

    /// Reveals a cell, arming the minefield with random mines on the first call.
    pub fn reveal_cell(&self, coords: Coord2) -> Result<Self> {
        self.reveal(coords, RandomMinefieldGenerator::from_entropy)
    }

    /// Like [`GameState::reveal_cell`], `generator` is only consulted on the first reveal.
    pub fn reveal_cell_with<G>(&self, coords: Coord2, generator: &mut G) -> Result<Self>
    where
        G: MinefieldGenerator + ?Sized,
    {
        self.reveal(coords, || generator)
    }

    fn reveal<G, F>(&self, coords: Coord2, make_generator: F) -> Result<Self>
    where
        G: MinefieldGenerator,
        F: FnOnce() -> G,
    {
        let coords = self.grid.validate_coords(coords)?;

        let mut next = self.clone();
        if self.status.is_finished() {
            return Ok(next);
        }

        next.arm(coords, make_generator);
        next.open(coords);
        Ok(next)
    }

    pub fn toggle_flag(&self, coords: Coord2) -> Result<Self> {
        let coords = self.grid.validate_coords(coords)?;

        let mut next = self.clone();
        if self.status.is_finished() || self.grid[coords].is_revealed {
            return Ok(next);
        }

        let cell = &mut next.grid[coords];
        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            next.flags_used += 1;
        } else {
            next.flags_used = next.flags_used.saturating_sub(1);
        }
        Ok(next)
    }

    /// Whether chording at `coords` would open at least one cell.
    pub fn can_chord_reveal_at(&self, coords: Coord2) -> bool {
        if self.status.is_finished() {
            return false;
        }

        match self.grid.get(coords) {
            Some(cell) if cell.is_numbered() => {
                self.grid.count_flagged_neighbors(coords) == cell.adjacent_mines
                    && self
                        .grid
                        .iter_neighbors(coords)
                        .any(|pos| self.grid[pos].is_hidden())
            }
            _ => false,
        }
    }

    /// Reveals every unflagged neighbor of a numbered cell once its flags add up.
    pub fn chord_reveal(&self, coords: Coord2) -> Result<Self> {
        let coords = self.grid.validate_coords(coords)?;

        let cell = self.grid[coords];
        if self.status.is_finished() || !cell.is_revealed || cell.adjacent_mines == 0 {
            return Ok(self.clone());
        }

        let flagged = self.grid.count_flagged_neighbors(coords);
        if flagged != cell.adjacent_mines {
            log::trace!(
                "Chord at {:?} skipped, {} flags for {} mines",
                coords,
                flagged,
                cell.adjacent_mines
            );
            return Ok(self.clone());
        }

        let mut next = self.clone();
        for neighbor in self.grid.iter_neighbors(coords) {
            if !next.grid[neighbor].is_hidden() {
                continue;
            }
            next.open(neighbor);
            if matches!(next.status, GameStatus::Lost) {
                break;
            }
        }
        Ok(next)
    }

    /// Places the mines around `start` the first time a reveal happens.
    fn arm<G, F>(&mut self, start: Coord2, make_generator: F)
    where
        G: MinefieldGenerator,
        F: FnOnce() -> G,
    {
        if !self.first_click() {
            return;
        }

        let placed = make_generator().generate(&mut self.grid, self.config.mines, start);
        if placed != self.config.mines {
            log::warn!(
                "Requested {} mines but only {} fit",
                self.config.mines,
                placed
            );
            self.config.mines = placed;
        }
        self.grid.calculate_adjacent_mines();

        let start_time = now_millis();
        self.phase = MinefieldPhase::Armed { start_time };
        log::debug!(
            "Armed {} mines around {:?}, started at {}",
            placed,
            start,
            start_time
        );
    }

    fn open(&mut self, coords: Coord2) {
        if self.status.is_finished() {
            return;
        }

        let cell = self.grid[coords];
        if !cell.is_hidden() {
            return;
        }

        if cell.is_mine {
            self.explode(coords);
            return;
        }

        self.flood_fill(coords);

        if self.revealed_count == self.config.safe_cell_count() {
            self.win();
        }
    }

    fn flood_fill(&mut self, start: Coord2) {
        let mut to_visit = vec![start];

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.grid[visit_coords];

            // skip flagged, opened or mined cells
            if cell.is_revealed || cell.is_flagged || cell.is_mine {
                continue;
            }

            cell.is_revealed = true;
            let adjacent_mines = cell.adjacent_mines;
            self.revealed_count += 1;
            log::trace!(
                "Opened cell at {:?}, mine count: {}",
                visit_coords,
                adjacent_mines
            );

            // zero cells open their whole neighborhood
            if adjacent_mines == 0 {
                to_visit.extend(
                    self.grid
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| !self.grid[pos].is_revealed),
                );
            }
        }
    }

    fn explode(&mut self, coords: Coord2) {
        let (rows, cols) = self.grid.size();
        for row in 0..rows {
            for col in 0..cols {
                let cell = &mut self.grid[(row, col)];
                if cell.is_mine {
                    cell.is_revealed = true;
                }
            }
        }
        self.status = GameStatus::Lost;
        log::debug!("Hit mine at {:?}, game lost", coords);
    }

    fn win(&mut self) {
        let (rows, cols) = self.grid.size();
        for row in 0..rows {
            for col in 0..cols {
                let cell = &mut self.grid[(row, col)];
                if cell.is_mine {
                    cell.is_flagged = true;
                }
            }
        }
        self.status = GameStatus::Won;
        log::debug!("All {} safe cells open, game won", self.revealed_count);
    }
}
