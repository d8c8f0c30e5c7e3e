//! Headless page renderer.
//!
//! Folds [`EffectCommand`]s into a snapshot of what the page would show.
//! Used by the Bevy plugin and by tests that check a command sequence
//! leaves the page in the expected state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

use crate::catalog::ItemCategory;
use crate::presentation::{
    default_background, default_border, default_color_scheme, default_font, default_icon,
    default_special_effect, default_title, BackgroundDirective, BorderDirective,
    ColorSchemeDirective, EffectCommand, FontDirective, IconDirective, PresentationDirective,
    SpecialEffectDirective, TitleDirective,
};

/// Current page presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    pub title: TitleDirective,
    pub background: BackgroundDirective,
    pub font: FontDirective,
    pub colors: ColorSchemeDirective,
    pub pull_button: SpecialEffectDirective,
    pub border: BorderDirective,
    pub icon: IconDirective,
    /// Item whose effects are showing, per category
    pub active: BTreeMap<ItemCategory, String>,
    /// Commands applied since creation
    pub commands_applied: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            title: default_title(),
            background: default_background(),
            font: default_font(),
            colors: default_color_scheme(),
            pull_button: default_special_effect(),
            border: default_border(),
            icon: default_icon(),
            active: BTreeMap::new(),
            commands_applied: 0,
        }
    }
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, command: &EffectCommand) {
        let directive = command.directive();
        let category = directive.category();
        match command {
            EffectCommand::Apply { item_id, .. } => {
                self.active.insert(category, item_id.clone());
            }
            EffectCommand::Remove { .. } => {
                self.active.remove(&category);
            }
        }
        self.set(directive.clone());
        self.commands_applied += 1;
        trace!(category = %category, item = command.item_id(), apply = command.is_apply(), "page updated");
    }

    pub fn apply_all<'a, I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = &'a EffectCommand>,
    {
        for command in commands {
            self.apply(command);
        }
    }

    fn set(&mut self, directive: PresentationDirective) {
        match directive {
            PresentationDirective::Title(d) => self.title = d,
            PresentationDirective::Background(d) => self.background = d,
            PresentationDirective::Font(d) => self.font = d,
            PresentationDirective::ColorScheme(d) => self.colors = d,
            PresentationDirective::SpecialEffect(d) => self.pull_button = d,
            PresentationDirective::Border(d) => self.border = d,
            PresentationDirective::Icon(d) => self.icon = d,
        }
    }

    pub fn active_item(&self, category: ItemCategory) -> Option<&str> {
        self.active.get(&category).map(String::as_str)
    }

    /// True when every category shows its default look
    pub fn is_pristine(&self) -> bool {
        let fresh = Self::default();
        self.active.is_empty()
            && self.title == fresh.title
            && self.background == fresh.background
            && self.font == fresh.font
            && self.colors == fresh.colors
            && self.pull_button == fresh.pull_button
            && self.border == fresh.border
            && self.icon == fresh.icon
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
