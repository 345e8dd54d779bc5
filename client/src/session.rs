//! The client's view of the match outside of the mob mirror: who we are,
//! the level, the roster, the score table and whether the round is running.
//!
//! One `SessionState` lives for exactly one connection. A reconnect starts
//! from a fresh value.

use log::{info, warn};
use shared::{HighscoreUpdate, InitMetadata, Level, MobId, PlayerId, PlayerInfo};

/// A single row of the score table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub name: String,
    pub points: i32,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    nickname: String,
    identity: Option<MobId>,
    level_id: Option<u16>,
    level: Option<Level>,
    roster: Vec<PlayerInfo>,
    highscores: Vec<ScoreRow>,
    running: bool,
}

impl SessionState {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            identity: None,
            level_id: None,
            level: None,
            roster: Vec::new(),
            highscores: Vec::new(),
            running: true,
        }
    }

    /// Stores identity, level id and roster.
    ///
    /// A repeat within the same session overwrites the previous values.
    pub fn apply_init_metadata(&mut self, metadata: InitMetadata) {
        if self.identity.is_some() {
            warn!(
                "InitMetadata received twice in one session, replacing identity {:?} with {}",
                self.identity, metadata.self_id
            );
        }

        info!(
            "Joined as mob {} on level {} with {} players",
            metadata.self_id,
            metadata.level_id,
            metadata.players.len()
        );

        self.identity = Some(metadata.self_id);
        self.level_id = Some(metadata.level_id);
        self.roster = metadata.players;
    }

    pub fn apply_level(&mut self, level: Level) {
        if self.level.is_some() {
            warn!("Level received twice in one session, replacing geometry");
        }
        info!(
            "Level loaded: {} bushes, {} stones",
            level.bushes.len(),
            level.stones.len()
        );
        self.level = Some(level);
    }

    /// Replaces the score table wholesale.
    ///
    /// Duplicate names collapse to their last entry. Rows are sorted by
    /// descending points; ties keep the order the server sent them in.
    pub fn apply_highscores(&mut self, update: HighscoreUpdate) {
        let mut rows: Vec<ScoreRow> = Vec::with_capacity(update.players.len());

        for entry in update.players {
            match rows.iter_mut().find(|row| row.name == entry.name) {
                Some(row) => row.points = entry.points,
                None => rows.push(ScoreRow {
                    name: entry.name,
                    points: entry.points,
                }),
            }
        }

        // sort_by is stable
        rows.sort_by(|a, b| b.points.cmp(&a.points));
        self.highscores = rows;
    }

    /// Marks the round as over. There is no way back for this session.
    pub fn end_game(&mut self) {
        if self.running {
            info!("Game ended");
        }
        self.running = false;
    }

    /// Name the server knows us by after a later join request.
    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = nickname.into();
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn identity(&self) -> Option<MobId> {
        self.identity
    }

    pub fn level_id(&self) -> Option<u16> {
        self.level_id
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn roster(&self) -> &[PlayerInfo] {
        &self.roster
    }

    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.roster
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    pub fn highscores(&self) -> &[ScoreRow] {
        &self.highscores
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
