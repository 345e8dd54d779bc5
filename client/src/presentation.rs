//! Boundary to whatever draws the match.
//!
//! The reconciler never touches views. [`Presenter`] owns the mob id -> view
//! handle table and turns [`MobEffect`]s into [`Presentation`] calls. This is
//! also the only place where server units are scaled to pixels.

use crate::game::MobEffect;
use log::{debug, info, warn};
use shared::{
    Indicator, MobId, MobState, PlayerRelation, Species, Vec2, CIVILIAN_SPECIES, METERS_TO_PIXELS,
};
use std::collections::HashMap;

/// Opaque reference to a view owned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Lobby,
    Gameplay,
    Highscores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Neutral,
    Success,
    Warning,
    Danger,
}

/// Indicators spanning less than one degree of arc are not drawn.
pub const MIN_INDICATOR_FORCE: f32 = 1.0 / 360.0;

pub trait Presentation {
    fn create_entity_view(&mut self, species: Species) -> ViewHandle;
    fn destroy_entity_view(&mut self, handle: ViewHandle);
    /// `x` and `y` in pixels, `heading` in radians.
    fn set_entity_transform(&mut self, handle: ViewHandle, x: f32, y: f32, heading: f32);
    fn set_entity_animation(&mut self, handle: ViewHandle, state: MobState);
    fn set_entity_marker(&mut self, handle: ViewHandle, relation: PlayerRelation);
    /// Weakest first, strongest drawn last.
    fn render_indicators(&mut self, indicators: &[Indicator]);
    fn show_screen_transition(&mut self, screen: Screen);
    fn show_transient_message(&mut self, text: &str, style: MessageStyle);
    fn show_remaining_time(&mut self, seconds: u64);
}

pub fn to_pixels(pos: Vec2) -> (f32, f32) {
    (pos.x * METERS_TO_PIXELS, pos.y * METERS_TO_PIXELS)
}

pub struct Presenter<P: Presentation> {
    presentation: P,
    views: HashMap<MobId, ViewHandle>,
}

impl<P: Presentation> Presenter<P> {
    pub fn new(presentation: P) -> Self {
        Self {
            presentation,
            views: HashMap::new(),
        }
    }

    pub fn apply(&mut self, effects: &[MobEffect]) {
        for effect in effects {
            self.apply_one(effect);
        }
    }

    fn apply_one(&mut self, effect: &MobEffect) {
        match *effect {
            MobEffect::Spawned {
                id,
                species,
                pos,
                heading,
                state,
                relation,
            } => {
                if let Some(stale) = self.views.remove(&id) {
                    warn!("Mob {} spawned while it still had a view, replacing it", id);
                    self.presentation.destroy_entity_view(stale);
                }

                let handle = self.presentation.create_entity_view(species);
                let (x, y) = to_pixels(pos);
                self.presentation.set_entity_transform(handle, x, y, heading);
                self.presentation.set_entity_animation(handle, state);
                if relation != PlayerRelation::None {
                    self.presentation.set_entity_marker(handle, relation);
                }
                self.views.insert(id, handle);
            }
            MobEffect::Moved { id, pos, heading } => {
                if let Some(&handle) = self.views.get(&id) {
                    let (x, y) = to_pixels(pos);
                    self.presentation.set_entity_transform(handle, x, y, heading);
                } else {
                    debug!("Move for mob {} without a view", id);
                }
            }
            MobEffect::StateChanged { id, state } => {
                if let Some(&handle) = self.views.get(&id) {
                    self.presentation.set_entity_animation(handle, state);
                }
            }
            MobEffect::RelationChanged { id, relation } => {
                if let Some(&handle) = self.views.get(&id) {
                    self.presentation.set_entity_marker(handle, relation);
                }
            }
            MobEffect::Despawned { id } => {
                if let Some(handle) = self.views.remove(&id) {
                    self.presentation.destroy_entity_view(handle);
                }
            }
        }
    }

    /// Expects `indicators` already ordered weakest first.
    pub fn render_indicators(&mut self, indicators: &[Indicator]) {
        let visible: Vec<Indicator> = indicators
            .iter()
            .filter(|ind| ind.force >= MIN_INDICATOR_FORCE)
            .copied()
            .collect();
        self.presentation.render_indicators(&visible);
    }

    /// Releases every view, e.g. when the session ends.
    pub fn destroy_all(&mut self) {
        let mut views: Vec<(MobId, ViewHandle)> = self.views.drain().collect();
        views.sort_unstable_by_key(|(id, _)| *id);
        for (_, handle) in views {
            self.presentation.destroy_entity_view(handle);
        }
    }

    pub fn view(&self, id: MobId) -> Option<ViewHandle> {
        self.views.get(&id).copied()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }
}

/// Headless presentation that only logs what would be drawn.
#[derive(Debug, Default)]
pub struct LogPresentation {
    next_handle: u32,
}

impl LogPresentation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presentation for LogPresentation {
    fn create_entity_view(&mut self, species: Species) -> ViewHandle {
        self.next_handle += 1;
        let handle = ViewHandle(self.next_handle);
        if species == CIVILIAN_SPECIES {
            debug!("view {:?}: civilian", handle);
        } else {
            debug!("view {:?}: species {}", handle, species);
        }
        handle
    }

    fn destroy_entity_view(&mut self, handle: ViewHandle) {
        debug!("view {:?}: destroyed", handle);
    }

    fn set_entity_transform(&mut self, handle: ViewHandle, x: f32, y: f32, heading: f32) {
        debug!(
            "view {:?}: at ({:.0}, {:.0}) heading {:.2}",
            handle, x, y, heading
        );
    }

    fn set_entity_animation(&mut self, handle: ViewHandle, state: MobState) {
        debug!("view {:?}: animation {:?}", handle, state);
    }

    fn set_entity_marker(&mut self, handle: ViewHandle, relation: PlayerRelation) {
        debug!("view {:?}: marker {:?}", handle, relation);
    }

    fn render_indicators(&mut self, indicators: &[Indicator]) {
        debug!("{} indicators", indicators.len());
    }

    fn show_screen_transition(&mut self, screen: Screen) {
        info!("Screen: {:?}", screen);
    }

    fn show_transient_message(&mut self, text: &str, style: MessageStyle) {
        match style {
            MessageStyle::Danger | MessageStyle::Warning => warn!("{}", text),
            MessageStyle::Neutral | MessageStyle::Success => info!("{}", text),
        }
    }

    fn show_remaining_time(&mut self, seconds: u64) {
        debug!("{}:{:02} remaining", seconds / 60, seconds % 60);
    }
}

/// A single call made on a [`RecordingPresentation`].
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationCall {
    Create(ViewHandle, Species),
    Destroy(ViewHandle),
    Transform(ViewHandle, f32, f32, f32),
    Animation(ViewHandle, MobState),
    Marker(ViewHandle, PlayerRelation),
    Indicators(Vec<Indicator>),
    Screen(Screen),
    Message(String, MessageStyle),
    RemainingTime(u64),
}

/// Presentation that records every call, for tests and replay tooling.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    next_handle: u32,
    pub calls: Vec<PresentationCall>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(&str, MessageStyle)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresentationCall::Message(text, style) => Some((text.as_str(), *style)),
                _ => None,
            })
            .collect()
    }

    pub fn screens(&self) -> Vec<Screen> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresentationCall::Screen(screen) => Some(*screen),
                _ => None,
            })
            .collect()
    }
}

impl Presentation for RecordingPresentation {
    fn create_entity_view(&mut self, species: Species) -> ViewHandle {
        self.next_handle += 1;
        let handle = ViewHandle(self.next_handle);
        self.calls.push(PresentationCall::Create(handle, species));
        handle
    }

    fn destroy_entity_view(&mut self, handle: ViewHandle) {
        self.calls.push(PresentationCall::Destroy(handle));
    }

    fn set_entity_transform(&mut self, handle: ViewHandle, x: f32, y: f32, heading: f32) {
        self.calls.push(PresentationCall::Transform(handle, x, y, heading));
    }

    fn set_entity_animation(&mut self, handle: ViewHandle, state: MobState) {
        self.calls.push(PresentationCall::Animation(handle, state));
    }

    fn set_entity_marker(&mut self, handle: ViewHandle, relation: PlayerRelation) {
        self.calls.push(PresentationCall::Marker(handle, relation));
    }

    fn render_indicators(&mut self, indicators: &[Indicator]) {
        self.calls.push(PresentationCall::Indicators(indicators.to_vec()));
    }

    fn show_screen_transition(&mut self, screen: Screen) {
        self.calls.push(PresentationCall::Screen(screen));
    }

    fn show_transient_message(&mut self, text: &str, style: MessageStyle) {
        self.calls.push(PresentationCall::Message(text.to_string(), style));
    }

    fn show_remaining_time(&mut self, seconds: u64) {
        self.calls.push(PresentationCall::RemainingTime(seconds));
    }
}
