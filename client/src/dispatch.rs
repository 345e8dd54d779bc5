//! Inbound message handling for one session.
//!
//! Frames are decoded, routed and applied one at a time, in arrival order.
//! Nothing here blocks or performs I/O.

use crate::game::ClientGameState;
use crate::presentation::{MessageStyle, Presentation, Presenter, Screen};
use crate::session::SessionState;
use log::{debug, info};
use shared::{
    decode_envelope, route, DeathReport, ProtocolError, ServerMessage, SimpleServerEventKind,
    WorldState, SERVER_TICK_RATE,
};

pub struct Dispatcher<P: Presentation> {
    session: SessionState,
    game: ClientGameState,
    presenter: Presenter<P>,
    screen: Screen,
}

impl<P: Presentation> Dispatcher<P> {
    pub fn new(nickname: impl Into<String>, presentation: P) -> Self {
        Self {
            session: SessionState::new(nickname),
            game: ClientGameState::new(),
            presenter: Presenter::new(presentation),
            screen: Screen::Lobby,
        }
    }

    /// Decodes and applies one frame.
    ///
    /// A malformed frame is returned as an error and has no effect; the
    /// caller drops it and carries on with the next one.
    pub fn handle_frame(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        let envelope = decode_envelope(bytes)?;
        let message = route(&envelope)?;
        self.handle_message(message);
        Ok(())
    }

    pub fn handle_message(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::InitMetadata(metadata) => {
                self.session.apply_init_metadata(metadata);
            }
            ServerMessage::Level(level) => {
                self.session.apply_level(level);
                self.transition(Screen::Gameplay);
            }
            ServerMessage::SimpleServerEvent(kind) => self.handle_simple_event(kind),
            ServerMessage::WorldState(state) => self.handle_world_state(&state),
            ServerMessage::DeathReport(report) => self.handle_death_report(&report),
            ServerMessage::HighscoreUpdate(update) => {
                self.session.apply_highscores(update);
            }
            ServerMessage::Unexpected(kind) => {
                debug!("Ignoring message of kind {:?}", kind);
            }
        }
    }

    fn handle_simple_event(&mut self, kind: SimpleServerEventKind) {
        match kind {
            SimpleServerEventKind::TooFarToKill => {
                self.presenter
                    .presentation_mut()
                    .show_transient_message("too far to kill", MessageStyle::Warning);
            }
            SimpleServerEventKind::KilledCivilian => {
                self.presenter
                    .presentation_mut()
                    .show_transient_message("you killed a civilian", MessageStyle::Danger);
            }
            SimpleServerEventKind::GameStart => {
                info!("Game started");
                self.transition(Screen::Gameplay);
            }
            SimpleServerEventKind::GameEnded => {
                self.session.end_game();
                self.transition(Screen::Highscores);
            }
        }
    }

    // Snapshots keep being reconciled after the game ended; gating on
    // `is_running` is up to the presentation.
    fn handle_world_state(&mut self, state: &WorldState) {
        let effects = self.game.apply_world_state(state);
        self.presenter.apply(&effects);
        // Indicators are drawn around our own mob
        if self.game.self_mob(self.session.identity()).is_some() {
            self.presenter.render_indicators(self.game.indicators());
        }
        self.presenter
            .presentation_mut()
            .show_remaining_time(state.steps_remaining / SERVER_TICK_RATE);
    }

    fn handle_death_report(&mut self, report: &DeathReport) {
        let me = self.session.nickname();
        let (text, style) = if report.killer_name == me {
            (
                format!("you killed {}", report.killed_name),
                MessageStyle::Success,
            )
        } else if report.killed_name == me {
            (
                format!("you have been killed by {}", report.killer_name),
                MessageStyle::Danger,
            )
        } else {
            (
                format!("{} killed {}", report.killer_name, report.killed_name),
                MessageStyle::Neutral,
            )
        };
        self.presenter
            .presentation_mut()
            .show_transient_message(&text, style);
    }

    fn transition(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        self.screen = screen;
        self.presenter.presentation_mut().show_screen_transition(screen);
    }

    /// Tears the session down: every view is released and all state is
    /// forgotten. Used before reconnecting.
    pub fn reset(&mut self) {
        self.presenter.destroy_all();
        self.game.clear();
        self.session = SessionState::new(self.session.nickname().to_string());
        self.screen = Screen::Lobby;
    }

    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.session.set_nickname(nickname);
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn game(&self) -> &ClientGameState {
        &self.game
    }

    pub fn presenter(&self) -> &Presenter<P> {
        &self.presenter
    }

    pub fn presentation(&self) -> &P {
        self.presenter.presentation()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::{PresentationCall, RecordingPresentation};
    use shared::{
        encode, HighscoreEntry, HighscoreUpdate, InitMetadata, Level, MessageKind, MobRecord,
        MobState, PlayerRelation, SimpleServerEvent, Vec2,
    };

    fn dispatcher() -> Dispatcher<RecordingPresentation> {
        Dispatcher::new("nemo", RecordingPresentation::new())
    }

    fn world(ids: &[u16]) -> WorldState {
        WorldState {
            mobs: ids
                .iter()
                .map(|&id| MobRecord {
                    id,
                    species: 0,
                    pos: Vec2::new(1.0, 1.0),
                    heading: 0.0,
                    state: MobState::Idle,
                    relation: PlayerRelation::None,
                })
                .collect(),
            indicators: vec![],
            steps_remaining: 200,
        }
    }

    fn event(kind: SimpleServerEventKind) -> Vec<u8> {
        encode(MessageKind::SimpleServerEvent, &SimpleServerEvent { kind }).unwrap()
    }

    #[test]
    fn test_malformed_frame_is_dropped() {
        let mut d = dispatcher();
        assert!(matches!(
            d.handle_frame(&[]),
            Err(ProtocolError::MalformedFrame(_))
        ));
        assert!(d.presentation().calls.is_empty());
        assert!(d.session().is_running());
    }

    #[test]
    fn test_unknown_kind_is_a_no_op() {
        let mut d = dispatcher();
        let mut frame = 999u16.to_le_bytes().to_vec();
        frame.extend_from_slice(&0u32.to_le_bytes());

        assert!(d.handle_frame(&frame).is_ok());
        assert!(d.presentation().calls.is_empty());
    }

    #[test]
    fn test_lobby_to_gameplay() {
        let mut d = dispatcher();
        let init = encode(
            MessageKind::InitMetadata,
            &InitMetadata {
                self_id: 4,
                level_id: 0,
                players: vec![],
            },
        )
        .unwrap();
        let level = encode(MessageKind::Level, &Level::default()).unwrap();

        d.handle_frame(&init).unwrap();
        assert_eq!(d.screen(), Screen::Lobby);
        d.handle_frame(&level).unwrap();

        assert_eq!(d.session().identity(), Some(4));
        assert!(d.session().level().is_some());
        assert_eq!(d.screen(), Screen::Gameplay);
        assert_eq!(d.presentation().screens(), vec![Screen::Gameplay]);
    }

    #[test]
    fn test_game_ended_stops_running_but_keeps_reconciling() {
        let mut d = dispatcher();
        d.handle_frame(&event(SimpleServerEventKind::GameEnded)).unwrap();
        assert!(!d.session().is_running());
        assert_eq!(d.screen(), Screen::Highscores);

        d.handle_message(ServerMessage::WorldState(world(&[1, 2])));
        assert_eq!(d.game().mob_count(), 2);
        assert_eq!(d.presenter().view_count(), 2);
        assert!(!d.session().is_running());
    }

    #[test]
    fn test_transient_messages() {
        let mut d = dispatcher();
        d.handle_frame(&event(SimpleServerEventKind::TooFarToKill)).unwrap();
        d.handle_frame(&event(SimpleServerEventKind::KilledCivilian)).unwrap();

        assert_eq!(
            d.presentation().messages(),
            vec![
                ("too far to kill", MessageStyle::Warning),
                ("you killed a civilian", MessageStyle::Danger),
            ]
        );
    }

    #[test]
    fn test_death_reports_relative_to_self() {
        let mut d = dispatcher();
        let report = |killer: &str, killed: &str| {
            ServerMessage::DeathReport(DeathReport {
                killer_name: killer.to_string(),
                killed_name: killed.to_string(),
            })
        };

        d.handle_message(report("nemo", "dory"));
        d.handle_message(report("bruce", "nemo"));
        d.handle_message(report("bruce", "dory"));

        assert_eq!(
            d.presentation().messages(),
            vec![
                ("you killed dory", MessageStyle::Success),
                ("you have been killed by bruce", MessageStyle::Danger),
                ("bruce killed dory", MessageStyle::Neutral),
            ]
        );
    }

    #[test]
    fn test_world_state_reports_remaining_seconds() {
        let mut d = dispatcher();
        d.handle_message(ServerMessage::WorldState(world(&[])));

        assert_eq!(
            d.presentation().calls.last(),
            Some(&PresentationCall::RemainingTime(10))
        );
    }

    #[test]
    fn test_indicators_need_own_mob_on_screen() {
        let mut d = dispatcher();
        d.handle_message(ServerMessage::InitMetadata(InitMetadata {
            self_id: 5,
            level_id: 0,
            players: vec![],
        }));
        let indicator_calls = |d: &Dispatcher<RecordingPresentation>| {
            d.presentation()
                .calls
                .iter()
                .filter(|c| matches!(c, PresentationCall::Indicators(_)))
                .count()
        };

        d.handle_message(ServerMessage::WorldState(world(&[1, 2])));
        assert_eq!(indicator_calls(&d), 0);

        d.handle_message(ServerMessage::WorldState(world(&[1, 5])));
        assert_eq!(indicator_calls(&d), 1);

        d.handle_message(ServerMessage::WorldState(world(&[1])));
        assert_eq!(indicator_calls(&d), 1);
    }

    #[test]
    fn test_death_report_follows_nickname_change() {
        let mut d = dispatcher();
        d.set_nickname("marlin");
        d.handle_message(ServerMessage::DeathReport(DeathReport {
            killer_name: "bruce".to_string(),
            killed_name: "marlin".to_string(),
        }));

        assert_eq!(d.session().nickname(), "marlin");
        assert_eq!(
            d.presentation().messages(),
            vec![("you have been killed by bruce", MessageStyle::Danger)]
        );
    }

    #[test]
    fn test_highscore_update_reaches_session() {
        let mut d = dispatcher();
        d.handle_message(ServerMessage::HighscoreUpdate(HighscoreUpdate {
            players: vec![
                HighscoreEntry {
                    name: "a".to_string(),
                    points: 1,
                },
                HighscoreEntry {
                    name: "b".to_string(),
                    points: 6,
                },
            ],
        }));

        assert_eq!(d.session().highscores()[0].name, "b");
    }

    #[test]
    fn test_reset_releases_views_and_session() {
        let mut d = dispatcher();
        d.handle_message(ServerMessage::WorldState(world(&[1, 2, 3])));
        d.handle_frame(&event(SimpleServerEventKind::GameEnded)).unwrap();

        d.reset();

        assert_eq!(d.game().mob_count(), 0);
        assert_eq!(d.presenter().view_count(), 0);
        assert!(d.session().is_running());
        assert_eq!(d.session().nickname(), "nemo");
        assert_eq!(d.screen(), Screen::Lobby);
    }
}
