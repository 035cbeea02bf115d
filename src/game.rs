//! Game ledger.
//!
//! Keeps the per-phase history of one game: the board at the start of every
//! phase, the orders and builds submitted, and the result of every movement
//! phase. Submissions are validated against the current phase; adjudication
//! is supplied by the caller through [`Adjudicator`].

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{MapState, Nation, Order, Orders};
use crate::map::{CompiledMap, FleetLoc, ProvinceKey};
use crate::phase::{self, GamePhase, History, MvmtInfo};
use crate::resolve::{
    adjustments, apply_adjudication, apply_builds, resolve_retreats, update_ownership,
    validate_build, Adjudicator, Builds,
};

/// Errors from submitting to or advancing a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("{action} cannot be submitted during {phase}")]
    WrongPhase {
        phase: GamePhase,
        action: &'static str,
    },

    #[error("{power} has no unit at {province}")]
    NotYourUnit { province: String, power: String },

    #[error("only move orders are allowed during retreats (got one for {0})")]
    NonMoveRetreat(String),

    #[error("no movement results recorded for {0}")]
    MissingMovementInfo(GamePhase),

    #[error("cannot retreat {province} to {dest}")]
    IllegalRetreat { province: String, dest: FleetLoc },

    #[error("{province} belongs to {owner}, not {power}")]
    ForeignRetreat {
        province: String,
        owner: String,
        power: String,
    },

    #[error("build location {0} is occupied")]
    BuildOccupied(String),

    #[error("build location {province} is not controlled by {power}")]
    BuildNotOwned { province: String, power: String },

    #[error("build at {province} places '{unit}' elsewhere")]
    BuildMismatch { province: String, unit: String },

    #[error("{power} may build at most {allowed} unit(s)")]
    TooManyBuilds { power: String, allowed: i64 },

    #[error("{players} players but only {powers} powers")]
    TooManyPlayers { players: usize, powers: usize },

    #[error("no board recorded for {0}")]
    MissingState(GamePhase),
}

/// The bookkeeping of one game from its first phase onward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// The phase awaiting adjudication.
    pub phase: GamePhase,
    /// Board at the start of every phase reached so far.
    pub states: BTreeMap<GamePhase, MapState>,
    /// Orders of every movement and retreat phase reached so far.
    pub orders: BTreeMap<GamePhase, Orders>,
    /// Results of every resolved movement phase.
    pub mvmt_info: History,
    /// Accepted builds of every build phase.
    pub builds: BTreeMap<GamePhase, Builds>,
    pub supply_centers: BTreeSet<ProvinceKey>,
    /// Player id -> power.
    pub players: BTreeMap<String, Nation>,
}

impl Game {
    /// Starts a game at `start` with the given board.
    pub fn new(
        start: GamePhase,
        initial: MapState,
        supply_centers: impl IntoIterator<Item = ProvinceKey>,
    ) -> Self {
        Game {
            phase: start,
            states: BTreeMap::from([(start, initial)]),
            orders: BTreeMap::from([(start, Orders::new())]),
            mvmt_info: History::new(),
            builds: BTreeMap::new(),
            supply_centers: supply_centers.into_iter().collect(),
            players: BTreeMap::new(),
        }
    }

    /// Returns the board at the start of the current phase.
    pub fn current_state(&self) -> Result<&MapState, GameError> {
        self.state_at(self.phase)
    }

    /// Returns the board at the start of `phase`.
    pub fn state_at(&self, phase: GamePhase) -> Result<&MapState, GameError> {
        self.states.get(&phase).ok_or(GameError::MissingState(phase))
    }

    /// Returns the orders submitted so far for the current phase.
    pub fn current_orders(&self) -> Option<&Orders> {
        self.orders.get(&self.phase)
    }

    /// Randomly assigns one distinct power to each player.
    pub fn assign_powers<R: Rng + ?Sized>(
        &mut self,
        players: &[String],
        powers: &[Nation],
        rng: &mut R,
    ) -> Result<(), GameError> {
        if players.len() > powers.len() {
            return Err(GameError::TooManyPlayers {
                players: players.len(),
                powers: powers.len(),
            });
        }
        let mut shuffled = powers.to_vec();
        shuffled.shuffle(rng);
        self.players = players.iter().cloned().zip(shuffled).collect();
        for (player, power) in &self.players {
            log::info!("{} plays {}", player, power);
        }
        Ok(())
    }

    /// Returns the power assigned to `player`.
    pub fn power_of(&self, player: &str) -> Option<&str> {
        self.players.get(player).map(String::as_str)
    }

    /// Validates and records `power`'s orders for the current phase.
    ///
    /// Orders are merged with earlier submissions; a later order for the same
    /// unit replaces the earlier one. Nothing is recorded if any order fails.
    pub fn submit_orders(&mut self, power: &str, orders: Orders) -> Result<(), GameError> {
        self.check_orders(power, &orders).inspect_err(|e| {
            log::warn!("rejected orders from {} in {}: {}", power, self.phase, e);
        })?;
        log::info!("{} submitted {} order(s) for {}", power, orders.len(), self.phase);
        self.orders.entry(self.phase).or_default().extend(orders);
        Ok(())
    }

    fn check_orders(&self, power: &str, orders: &Orders) -> Result<(), GameError> {
        if self.phase.is_build() {
            return Err(GameError::WrongPhase {
                phase: self.phase,
                action: "orders",
            });
        }

        if self.phase.is_movement() {
            let state = self.current_state()?;
            for prov in orders.keys() {
                if !state.unit_at(prov).is_some_and(|s| s.nation == power) {
                    return Err(GameError::NotYourUnit {
                        province: prov.clone(),
                        power: power.to_string(),
                    });
                }
            }
            return Ok(());
        }

        let movement = self.phase.movement_phase();
        for (prov, order) in orders {
            let Some(dest) = order.dest() else {
                return Err(GameError::NonMoveRetreat(prov.clone()));
            };
            let info = self
                .mvmt_info
                .get(&movement)
                .ok_or(GameError::MissingMovementInfo(movement))?;
            let options = info
                .retreats
                .get(prov)
                .filter(|o| o.allows(dest))
                .ok_or_else(|| GameError::IllegalRetreat {
                    province: prov.clone(),
                    dest: dest.clone(),
                })?;
            if options.src.nation != power {
                return Err(GameError::ForeignRetreat {
                    province: prov.clone(),
                    owner: options.src.nation.clone(),
                    power: power.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Validates and records `power`'s builds for the current build phase.
    ///
    /// A new submission replaces the power's earlier builds.
    pub fn submit_builds(&mut self, power: &str, builds: Builds) -> Result<(), GameError> {
        self.check_builds(power, &builds).inspect_err(|e| {
            log::warn!("rejected builds from {} in {}: {}", power, self.phase, e);
        })?;
        log::info!("{} submitted {} build(s) for {}", power, builds.len(), self.phase);
        let accepted = self.builds.entry(self.phase).or_default();
        accepted.retain(|_, b| b.nation != power);
        accepted.extend(builds);
        Ok(())
    }

    fn check_builds(&self, power: &str, builds: &Builds) -> Result<(), GameError> {
        if !self.phase.is_build() {
            return Err(GameError::WrongPhase {
                phase: self.phase,
                action: "builds",
            });
        }
        let state = self.current_state()?;
        for (prov, build) in builds {
            validate_build(state, power, prov, build)?;
        }
        let allowed = adjustments(state).get(power).copied().unwrap_or(0).max(0);
        if builds.len() as i64 > allowed {
            return Err(GameError::TooManyBuilds {
                power: power.to_string(),
                allowed,
            });
        }
        Ok(())
    }

    /// Gives every unit without an order a hold.
    fn fill_default_holds(&mut self) -> Result<(), GameError> {
        let occupied: Vec<ProvinceKey> = self.current_state()?.units.keys().cloned().collect();
        let orders = self.orders.entry(self.phase).or_default();
        for prov in occupied {
            orders.entry(prov).or_insert(Order::Hold);
        }
        Ok(())
    }

    /// Resolves the current phase and moves to the next one.
    ///
    /// Returns the new current phase.
    pub fn advance<A>(&mut self, map: &CompiledMap, adjudicator: &A) -> Result<GamePhase, GameError>
    where
        A: Adjudicator + ?Sized,
    {
        let phase = self.phase;
        log::info!("adjudicating {}", phase);

        let next_state = if phase.is_movement() {
            self.fill_default_holds()?;
            let state = self.current_state()?;
            let orders = self.orders.get(&phase).cloned().unwrap_or_default();
            let order_status = adjudicator.adjudicate(map, state, &orders);
            let (next_state, retreats) = apply_adjudication(map, state, &orders, &order_status);
            if !retreats.is_empty() {
                log::info!("{} unit(s) dislodged in {}", retreats.len(), phase);
            }
            self.mvmt_info.insert(phase, MvmtInfo { order_status, retreats });
            next_state
        } else if phase.is_retreat() {
            let state = self.current_state()?;
            match self.mvmt_info.get(&phase.movement_phase()) {
                Some(info) => {
                    let orders = self.orders.get(&phase).cloned().unwrap_or_default();
                    resolve_retreats(state, &info.retreats, &orders)
                }
                None => state.clone(),
            }
        } else {
            apply_builds(self.current_state()?, self.builds.get(&phase))
        };

        self.enter(phase.next(), next_state);
        Ok(self.phase)
    }

    /// Advances, then keeps advancing past retreat phases with nothing to retreat.
    pub fn advance_nonempty<A>(
        &mut self,
        map: &CompiledMap,
        adjudicator: &A,
    ) -> Result<GamePhase, GameError>
    where
        A: Adjudicator + ?Sized,
    {
        self.advance(map, adjudicator)?;
        while self.is_vacuous() {
            self.advance(map, adjudicator)?;
        }
        Ok(self.phase)
    }

    fn enter(&mut self, phase: GamePhase, mut state: MapState) {
        if phase.is_build() {
            update_ownership(&mut state, &self.supply_centers);
        }
        log::info!("entering {} with {} unit(s)", phase, state.units.len());
        self.phase = phase;
        self.states.insert(phase, state);
        if !phase.is_build() {
            self.orders.insert(phase, Orders::new());
        }
    }

    /// Returns true if the current phase is a retreat phase with nothing to retreat.
    pub fn is_vacuous(&self) -> bool {
        phase::is_vacuous(self.phase, &self.mvmt_info)
    }

    /// The phase after `from`, skipping empty retreat phases.
    pub fn next_nonempty_phase(&self, from: GamePhase) -> GamePhase {
        phase::next_nonempty_phase(from, &self.mvmt_info)
    }

    /// The phase before `from`, skipping empty retreat phases.
    pub fn prev_nonempty_phase(&self, from: GamePhase) -> GamePhase {
        phase::prev_nonempty_phase(from, &self.mvmt_info)
    }
}
