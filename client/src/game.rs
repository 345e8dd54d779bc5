//! Local mirror of the mobs the server reports, reconciled snapshot by
//! snapshot.
//!
//! Every `WorldState` is a complete picture: an id missing from a snapshot is
//! gone as of that snapshot. Each id goes Unknown -> Live -> Gone, and a later
//! reappearance starts over as a new mob.

use log::{debug, warn};
use shared::{Indicator, MobId, MobRecord, MobState, PlayerRelation, Species, Vec2, WorldState};
use std::collections::HashMap;

/// What changed for a single mob during one reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum MobEffect {
    Spawned {
        id: MobId,
        species: Species,
        pos: Vec2,
        heading: f32,
        state: MobState,
        relation: PlayerRelation,
    },
    Moved {
        id: MobId,
        pos: Vec2,
        heading: f32,
    },
    StateChanged {
        id: MobId,
        state: MobState,
    },
    RelationChanged {
        id: MobId,
        relation: PlayerRelation,
    },
    Despawned {
        id: MobId,
    },
}

impl MobEffect {
    pub fn id(&self) -> MobId {
        match self {
            MobEffect::Spawned { id, .. }
            | MobEffect::Moved { id, .. }
            | MobEffect::StateChanged { id, .. }
            | MobEffect::RelationChanged { id, .. }
            | MobEffect::Despawned { id } => *id,
        }
    }
}

/// A live mob as last reported.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedMob {
    pub id: MobId,
    pub species: Species,
    pub pos: Vec2,
    pub heading: f32,
    pub state: MobState,
    pub relation: PlayerRelation,
    seen: bool,
}

impl TrackedMob {
    fn from_record(record: &MobRecord) -> Self {
        Self {
            id: record.id,
            species: record.species,
            pos: record.pos,
            heading: record.heading,
            state: record.state,
            relation: record.relation,
            seen: true,
        }
    }
}

pub struct ClientGameState {
    mobs: HashMap<MobId, TrackedMob>,
    indicators: Vec<Indicator>,
    steps_remaining: u64,
    snapshots_applied: u64,
}

impl ClientGameState {
    pub fn new() -> Self {
        Self {
            mobs: HashMap::new(),
            indicators: Vec::new(),
            steps_remaining: 0,
            snapshots_applied: 0,
        }
    }

    /// Diffs `snapshot` against the live set and returns the effects in the
    /// order they happened: per record in delivery order, then despawns.
    pub fn apply_world_state(&mut self, snapshot: &WorldState) -> Vec<MobEffect> {
        let mut effects = Vec::with_capacity(snapshot.mobs.len());

        for mob in self.mobs.values_mut() {
            mob.seen = false;
        }

        for record in &snapshot.mobs {
            match self.mobs.get_mut(&record.id) {
                None => {
                    self.mobs.insert(record.id, TrackedMob::from_record(record));
                    effects.push(MobEffect::Spawned {
                        id: record.id,
                        species: record.species,
                        pos: record.pos,
                        heading: record.heading,
                        state: record.state,
                        relation: record.relation,
                    });
                }
                Some(mob) => {
                    if mob.seen {
                        warn!(
                            "Mob {} reported twice in one snapshot, keeping the later record",
                            record.id
                        );
                    }
                    if mob.species != record.species {
                        debug!(
                            "Mob {} reported species {} but was spawned as {}",
                            record.id, record.species, mob.species
                        );
                    }

                    mob.pos = record.pos;
                    mob.heading = record.heading;
                    mob.seen = true;
                    effects.push(MobEffect::Moved {
                        id: record.id,
                        pos: record.pos,
                        heading: record.heading,
                    });

                    if mob.state != record.state {
                        mob.state = record.state;
                        effects.push(MobEffect::StateChanged {
                            id: record.id,
                            state: record.state,
                        });
                    }

                    if mob.relation != record.relation {
                        mob.relation = record.relation;
                        effects.push(MobEffect::RelationChanged {
                            id: record.id,
                            relation: record.relation,
                        });
                    }
                }
            }
        }

        let mut gone: Vec<MobId> = self
            .mobs
            .values()
            .filter(|mob| !mob.seen)
            .map(|mob| mob.id)
            .collect();
        gone.sort_unstable();

        for id in gone {
            self.mobs.remove(&id);
            effects.push(MobEffect::Despawned { id });
        }

        self.indicators = snapshot.indicators.clone();
        self.indicators.sort_by(|a, b| a.force.total_cmp(&b.force));
        self.steps_remaining = snapshot.steps_remaining;
        self.snapshots_applied += 1;

        effects
    }

    pub fn mob(&self, id: MobId) -> Option<&TrackedMob> {
        self.mobs.get(&id)
    }

    /// The local player's own mob, if currently visible.
    pub fn self_mob(&self, self_id: Option<MobId>) -> Option<&TrackedMob> {
        self_id.and_then(|id| self.mobs.get(&id))
    }

    pub fn mobs(&self) -> impl Iterator<Item = &TrackedMob> {
        self.mobs.values()
    }

    pub fn mob_count(&self) -> usize {
        self.mobs.len()
    }

    /// Indicators from the latest snapshot, weakest first.
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn steps_remaining(&self) -> u64 {
        self.steps_remaining
    }

    pub fn snapshots_applied(&self) -> u64 {
        self.snapshots_applied
    }

    /// Forgets every mob without producing effects.
    pub fn clear(&mut self) {
        self.mobs.clear();
        self.indicators.clear();
        self.steps_remaining = 0;
        self.snapshots_applied = 0;
    }
}

impl Default for ClientGameState {
    fn default() -> Self {
        Self::new()
    }
}
