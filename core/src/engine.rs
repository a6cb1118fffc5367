use alloc::vec::Vec;
use core::time::Duration;

use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Ready,
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Per-frame summary read by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub total_monsters: CellCount,
    pub remaining_unmarked: CellCount,
    pub correctly_marked: CellCount,
    pub lives: u8,
    pub phase: Phase,
    pub elapsed: Duration,
}

impl RoundStats {
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

/// Game state of one board, from generation through win or loss.
#[derive(Debug)]
pub struct Engine<R = SeededRandom, C = SystemClock> {
    config: RoundConfig,
    roster: &'static [MonsterType],
    layout: MonsterLayout,
    board: Array2<Cell>,
    lives: u8,
    phase: Phase,
    started_at: Option<Instant>,
    elapsed: Duration,
    correctly_marked: CellCount,
    revealed_safe: CellCount,
    triggered_monster: Option<Coord2>,
    random: R,
    clock: C,
}

impl Engine {
    /// Engine on the wall clock with a host-provided seed.
    pub fn seeded(config: RoundConfig, seed: u64) -> Result<Self> {
        Self::new(config, SeededRandom::new(seed), SystemClock)
    }
}

impl<R: RandomSource, C: Clock> Engine<R, C> {
    /// Validates `config` and generates a random round.
    pub fn new(config: RoundConfig, mut random: R, clock: C) -> Result<Self> {
        let layout = RandomLayoutGenerator::new(&mut random).generate(&config)?;
        Self::with_layout(config, layout, random, clock)
    }

    /// Starts a round on a prepared layout instead of a generated one.
    pub fn with_layout(config: RoundConfig, layout: MonsterLayout, random: R, clock: C) -> Result<Self> {
        config.validate()?;
        if layout.size() != config.size {
            return Err(GameError::LayoutSizeMismatch {
                layout: layout.size(),
                config: config.size,
            });
        }

        let mut engine = Self {
            config,
            roster: &[],
            board: Array2::default((0, 0)),
            layout,
            lives: 0,
            phase: Phase::Ready,
            started_at: None,
            elapsed: Duration::ZERO,
            correctly_marked: 0,
            revealed_safe: 0,
            triggered_monster: None,
            random,
            clock,
        };
        engine.load_round();
        Ok(engine)
    }

    /// Replaces the current round with a fresh one for `config`.
    ///
    /// On error the current round is left untouched.
    pub fn init(&mut self, config: RoundConfig) -> Result<()> {
        let layout = RandomLayoutGenerator::new(&mut self.random).generate(&config)?;
        self.config = config;
        self.layout = layout;
        self.load_round();
        Ok(())
    }

    /// New random layout with the same settings, including the full life count.
    pub fn restart(&mut self) -> Result<()> {
        log::debug!("Restarting round");
        self.init(self.config)
    }

    fn load_round(&mut self) {
        self.roster = MonsterCatalog::list_for_mode(self.config.mode);
        self.board = self.layout.build_cells();
        self.lives = self.config.lives;
        self.phase = Phase::Ready;
        self.started_at = None;
        self.elapsed = Duration::ZERO;
        self.correctly_marked = 0;
        self.revealed_safe = 0;
        self.triggered_monster = None;
    }

    pub fn start_round(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        let now = self.clock.now();
        self.started_at = Some(now);
        self.phase = Phase::Playing;
        log::debug!(
            "Round started on {:?} with {} monsters",
            self.size(),
            self.total_monsters()
        );
    }

    /// Refreshes the elapsed time while the round is being played.
    pub fn update(&mut self) {
        if !self.phase.is_playing() {
            return;
        }
        if let Some(started_at) = self.started_at {
            self.elapsed = self.clock.now().duration_since(started_at);
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn total_monsters(&self) -> CellCount {
        self.layout.monster_count()
    }

    pub fn layout(&self) -> &MonsterLayout {
        &self.layout
    }

    pub fn placed_monsters(&self) -> &[PlacedMonster] {
        self.layout.placed()
    }

    /// Last monster cell opened by the player, if any.
    pub fn triggered_monster(&self) -> Option<Coord2> {
        self.triggered_monster
    }

    /// Monster types of this round, for the label palette.
    pub fn eligible_monster_types(&self) -> &'static [MonsterType] {
        self.roster
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        let coords = self.validate_coords(coords)?;
        Some(self.board[coords.to_nd_index()])
    }

    pub(crate) fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    pub fn stats(&self) -> RoundStats {
        RoundStats {
            total_monsters: self.total_monsters(),
            remaining_unmarked: self.total_monsters() - self.correctly_marked,
            correctly_marked: self.correctly_marked,
            lives: self.lives,
            phase: self.phase,
            elapsed: self.elapsed,
        }
    }

    pub fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.phase.is_playing() {
            return NoChange;
        }
        let Some(coords) = self.validate_coords(coords) else {
            return NoChange;
        };

        let cell = &mut self.board[coords.to_nd_index()];
        if cell.is_marked() || cell.is_revealed() {
            return NoChange;
        }

        if cell.reveal() {
            self.triggered_monster = Some(coords);
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                self.end_round(false);
                return Lost;
            }
            log::debug!("Hit monster at {:?}, {} lives left", coords, self.lives);
            return SurvivedHit;
        }

        self.revealed_safe += 1;
        let value = cell.value();
        log::debug!("Revealed cell at {:?}, value: {}", coords, value);
        if value == 0 {
            self.flood_reveal(coords);
        }

        if self.check_won() { Won } else { Safe }
    }

    /// Opens the zero region around `origin` and its border.
    ///
    /// Bounds and visited checks happen when a position is popped. Marked and monster cells are
    /// never opened here.
    fn flood_reveal(&mut self, origin: Coord2) {
        let size = self.size();
        let mut visited = HashSet::<_>::from([origin]);
        let mut to_visit: Vec<(i16, i16)> = Vec::new();
        push_neighbors(&mut to_visit, origin);

        while let Some(signed) = to_visit.pop() {
            let Some(visit_coords) = signed_to_coords(signed, size) else {
                continue;
            };
            if !visited.insert(visit_coords) {
                continue;
            }

            let cell = &mut self.board[visit_coords.to_nd_index()];
            if cell.is_revealed() || cell.is_marked() || cell.is_monster() {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }

            cell.reveal();
            self.revealed_safe += 1;
            log::trace!(
                "Flood revealed cell at {:?}, value: {}",
                visit_coords,
                cell.value()
            );

            if cell.value() == 0 {
                push_neighbors(&mut to_visit, visit_coords);
            }
        }
    }

    pub fn mark_cell(&mut self, coords: Coord2, label: Option<MonsterId>) -> MarkOutcome {
        if !self.phase.is_playing() {
            return MarkOutcome::NoChange;
        }
        let Some(coords) = self.validate_coords(coords) else {
            return MarkOutcome::NoChange;
        };

        if !self.board[coords.to_nd_index()].mark(label) {
            return MarkOutcome::NoChange;
        }

        self.correctly_marked = self.count_correctly_marked();
        log::debug!(
            "Marked {:?} as {:?}, {} of {} identified",
            coords,
            label,
            self.correctly_marked,
            self.total_monsters()
        );

        if self.check_won() {
            MarkOutcome::Won
        } else {
            MarkOutcome::Changed
        }
    }

    fn count_correctly_marked(&self) -> CellCount {
        self.layout
            .placed()
            .iter()
            .filter(|monster| self.board[monster.position.to_nd_index()].is_correctly_marked())
            .count() as CellCount
    }

    /// Every monster labelled with its own type and every safe cell open.
    fn check_won(&mut self) -> bool {
        let won = self.correctly_marked == self.total_monsters()
            && self.revealed_safe == self.layout.safe_cell_count();
        if won {
            self.end_round(true);
        }
        won
    }

    fn end_round(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }

        self.update();
        self.phase = if won { Phase::Won } else { Phase::Lost };

        for monster in self.layout.placed() {
            let cell = &mut self.board[monster.position.to_nd_index()];
            if won {
                cell.force_mark(monster.id);
            } else if !cell.is_revealed() {
                cell.force_reveal();
            }
        }

        log::debug!(
            "Round {} after {:?}",
            if won { "won" } else { "lost" },
            self.elapsed
        );
    }

    fn validate_coords(&self, coords: Coord2) -> Option<Coord2> {
        let size = self.size();
        (coords.0 < size.0 && coords.1 < size.1).then_some(coords)
    }
}

fn push_neighbors(stack: &mut Vec<(i16, i16)>, (x, y): Coord2) {
    for (dx, dy) in NEIGHBOR_OFFSETS {
        stack.push((i16::from(x) + i16::from(dx), i16::from(y) + i16::from(dy)));
    }
}
