use anyhow::Context;
use bevy::ecs::event::Events;
use bevy::prelude::*;
use std::path::PathBuf;

use gacha_core::balance::SimConfig;
use gacha_core::config::GachaConfig;
use gacha_core::logging::LoggingPlugin;
use gacha_core::plugin::{
    CollectRequested, EquipToggleRequested, GachaNotice, GachaPlugin, GachaSessionResource,
    PageResource, PullRequested,
};

const PULLS: usize = 10;

/// Headless run: open the session, pull and collect a few items, equip
/// each one, then print the page snapshot and a balance report.
///
/// Usage: gacha-sim [config.json]
fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config/gacha.json"));
    let config = GachaConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let mut app = App::new();
    app.add_plugins(LoggingPlugin {
        config: config.tracing.clone(),
    })
    .add_plugins(GachaPlugin {
        config: config.clone(),
    });
    // The subscriber exists only once LoggingPlugin has been built
    tracing::info!(
        path = %config_path.display(),
        seed = ?config.seed,
        data_dir = ?config.data_dir,
        "gacha-sim config loaded"
    );
    app.update();

    for _ in 0..PULLS {
        app.world_mut().send_event(PullRequested);
        app.update();
        app.world_mut().send_event(CollectRequested);
        app.update();

        let collected = app
            .world()
            .resource::<Events<GachaNotice>>()
            .iter_current_update_events()
            .find_map(|notice| match notice {
                GachaNotice::Collected(item) => Some(item.clone()),
                _ => None,
            });
        let Some(item) = collected else {
            tracing::warn!("nothing collected; stopping");
            break;
        };
        println!(
            "{} {:<10} {:<14} {}",
            item.badge(),
            item.rarity.label(),
            item.category,
            item.display_name
        );

        app.world_mut()
            .send_event(EquipToggleRequested { item_id: item.id });
        app.update();
    }

    let page = &app.world().resource::<PageResource>().0;
    println!("{}", page.to_json());

    let report = {
        let session = app
            .world()
            .resource::<GachaSessionResource>()
            .0
            .read()
            .map_err(|_| anyhow::anyhow!("gacha session lock poisoned"))?;
        println!("balance: {}", session.wallet().balance);
        session.simulate(&SimConfig::default())
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
