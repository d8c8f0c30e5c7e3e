//! Bevy integration.
//!
//! `GachaPlugin` opens a session at build time and exposes it as an ECS
//! resource. Hosts drive it with request events; results come back as
//! [`GachaNotice`] events and every presentation change is emitted as a
//! [`PresentationEvent`] and folded into the [`PageResource`] snapshot.

use bevy::prelude::*;
use std::sync::{Arc, RwLock};

use crate::config::GachaConfig;
use crate::item::Item;
use crate::presentation::EffectCommand;
use crate::rarity::RarityWeights;
use crate::render::PageState;
use crate::session::{GachaSession, PullOutcome};

pub struct GachaPlugin {
    pub config: GachaConfig,
}

impl Default for GachaPlugin {
    fn default() -> Self {
        Self {
            config: GachaConfig::default(),
        }
    }
}

impl Plugin for GachaPlugin {
    fn build(&self, app: &mut App) {
        let (session, replay) = match GachaSession::open(&self.config) {
            Ok(opened) => opened,
            Err(e) => {
                tracing::error!(error = %e, "blob store unavailable; falling back to memory");
                let memory = GachaConfig {
                    data_dir: None,
                    ..self.config.clone()
                };
                match GachaSession::open(&memory) {
                    Ok(opened) => opened,
                    Err(e) => {
                        tracing::error!(error = %e, "gacha session could not be opened");
                        return;
                    }
                }
            }
        };

        app.insert_resource(GachaSessionResource(Arc::new(RwLock::new(session))))
            .insert_resource(PageResource::default())
            .insert_resource(StartupReplay(replay))
            .add_event::<PullRequested>()
            .add_event::<CollectRequested>()
            .add_event::<EquipToggleRequested>()
            .add_event::<RarityChangeRequested>()
            .add_event::<RarityWeightsRequested>()
            .add_event::<CreditRequested>()
            .add_event::<GachaNotice>()
            .add_event::<PresentationEvent>()
            .add_systems(Startup, replay_equipped)
            .add_systems(
                Update,
                (
                    handle_pulls,
                    handle_collects,
                    handle_equip_toggles,
                    handle_rarity_changes,
                    handle_weight_updates,
                    handle_credits,
                    apply_presentation,
                )
                    .chain(),
            );
    }
}

#[derive(Resource)]
pub struct GachaSessionResource(pub Arc<RwLock<GachaSession>>);

/// Headless snapshot of the page presentation
#[derive(Resource, Default, Debug)]
pub struct PageResource(pub PageState);

/// Apply commands restoring the persisted equip slots
#[derive(Resource, Default)]
struct StartupReplay(Vec<EffectCommand>);

// ========================
// Requests
// ========================

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PullRequested;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct CollectRequested;

#[derive(Event, Debug, Clone)]
pub struct EquipToggleRequested {
    pub item_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct RarityChangeRequested {
    pub item_id: String,
    pub rarity: String,
}

#[derive(Event, Debug, Clone)]
pub struct RarityWeightsRequested {
    pub weights: RarityWeights,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct CreditRequested {
    pub amount: u64,
}

// ========================
// Results
// ========================

#[derive(Event, Debug, Clone, PartialEq)]
pub enum GachaNotice {
    Pulled(PullOutcome),
    Collected(Item),
    EquipToggled { item_id: String, equipped: bool },
    BalanceChanged(u64),
    /// Player-facing failure message
    Failed(String),
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct PresentationEvent(pub EffectCommand);

// ========================
// Systems
// ========================

fn replay_equipped(
    mut replay: ResMut<StartupReplay>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    for command in replay.0.drain(..) {
        presentation.send(PresentationEvent(command));
    }
}

fn handle_pulls(
    mut requests: EventReader<PullRequested>,
    session: Res<GachaSessionResource>,
    mut notices: EventWriter<GachaNotice>,
) {
    if requests.is_empty() {
        return;
    }
    let Ok(mut session) = session.0.write() else {
        tracing::error!("gacha session lock poisoned");
        return;
    };
    for _ in requests.read() {
        let notice = match session.pull() {
            Ok(outcome) => GachaNotice::Pulled(outcome),
            Err(e) => GachaNotice::Failed(e.user_message()),
        };
        notices.send(notice);
    }
}

fn handle_collects(
    mut requests: EventReader<CollectRequested>,
    session: Res<GachaSessionResource>,
    mut notices: EventWriter<GachaNotice>,
) {
    if requests.is_empty() {
        return;
    }
    let Ok(mut session) = session.0.write() else {
        tracing::error!("gacha session lock poisoned");
        return;
    };
    for _ in requests.read() {
        let notice = match session.collect() {
            Ok(item) => GachaNotice::Collected(item),
            Err(e) => GachaNotice::Failed(e.user_message()),
        };
        notices.send(notice);
    }
}

fn handle_equip_toggles(
    mut requests: EventReader<EquipToggleRequested>,
    session: Res<GachaSessionResource>,
    mut notices: EventWriter<GachaNotice>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    if requests.is_empty() {
        return;
    }
    let Ok(mut session) = session.0.write() else {
        tracing::error!("gacha session lock poisoned");
        return;
    };
    for request in requests.read() {
        match session.toggle_equip(&request.item_id) {
            Ok(outcome) => {
                presentation.send_batch(outcome.commands.into_iter().map(PresentationEvent));
                notices.send(GachaNotice::EquipToggled {
                    item_id: request.item_id.clone(),
                    equipped: outcome.equipped,
                });
            }
            Err(e) => {
                notices.send(GachaNotice::Failed(e.user_message()));
            }
        }
    }
}

fn handle_rarity_changes(
    mut requests: EventReader<RarityChangeRequested>,
    session: Res<GachaSessionResource>,
    mut notices: EventWriter<GachaNotice>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    if requests.is_empty() {
        return;
    }
    let Ok(mut session) = session.0.write() else {
        tracing::error!("gacha session lock poisoned");
        return;
    };
    for request in requests.read() {
        match session.change_item_rarity(&request.item_id, &request.rarity) {
            Ok(commands) => {
                presentation.send_batch(commands.into_iter().map(PresentationEvent));
            }
            Err(e) => {
                notices.send(GachaNotice::Failed(e.user_message()));
            }
        }
    }
}

fn handle_weight_updates(
    mut requests: EventReader<RarityWeightsRequested>,
    session: Res<GachaSessionResource>,
) {
    if requests.is_empty() {
        return;
    }
    let Ok(mut session) = session.0.write() else {
        tracing::error!("gacha session lock poisoned");
        return;
    };
    for request in requests.read() {
        session.set_rarity_weights(request.weights);
    }
}

fn handle_credits(
    mut requests: EventReader<CreditRequested>,
    session: Res<GachaSessionResource>,
    mut notices: EventWriter<GachaNotice>,
) {
    if requests.is_empty() {
        return;
    }
    let Ok(mut session) = session.0.write() else {
        tracing::error!("gacha session lock poisoned");
        return;
    };
    for request in requests.read() {
        let balance = session.credit(request.amount);
        notices.send(GachaNotice::BalanceChanged(balance));
    }
}

fn apply_presentation(
    mut events: EventReader<PresentationEvent>,
    mut page: ResMut<PageResource>,
) {
    for PresentationEvent(command) in events.read() {
        page.0.apply(command);
    }
}
