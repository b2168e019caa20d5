//! Recipe kinds, the draft builder used during registration, and the
//! immutable registered form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ingredient::Ingredient;
use crate::output::RecipeOutput;

// ===========================================================================
// Recipe kinds
// ===========================================================================

/// The closed set of processing recipe kinds the mill machinery supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    Mixing,
    Crushing,
    Compacting,
    Cutting,
    Deploying,
    Emptying,
    Filling,
    Haunting,
    MechanicalCrafting,
    Milling,
    Pressing,
    SandpaperPolishing,
    Splashing,
}

impl RecipeKind {
    pub const ALL: [RecipeKind; 13] = [
        RecipeKind::Mixing,
        RecipeKind::Crushing,
        RecipeKind::Compacting,
        RecipeKind::Cutting,
        RecipeKind::Deploying,
        RecipeKind::Emptying,
        RecipeKind::Filling,
        RecipeKind::Haunting,
        RecipeKind::MechanicalCrafting,
        RecipeKind::Milling,
        RecipeKind::Pressing,
        RecipeKind::SandpaperPolishing,
        RecipeKind::Splashing,
    ];

    /// The data-file tag for this kind.
    pub fn name(self) -> &'static str {
        match self {
            RecipeKind::Mixing => "mixing",
            RecipeKind::Crushing => "crushing",
            RecipeKind::Compacting => "compacting",
            RecipeKind::Cutting => "cutting",
            RecipeKind::Deploying => "deploying",
            RecipeKind::Emptying => "emptying",
            RecipeKind::Filling => "filling",
            RecipeKind::Haunting => "haunting",
            RecipeKind::MechanicalCrafting => "mechanical_crafting",
            RecipeKind::Milling => "milling",
            RecipeKind::Pressing => "pressing",
            RecipeKind::SandpaperPolishing => "sandpaper_polishing",
            RecipeKind::Splashing => "splashing",
        }
    }

    /// Case-insensitive lookup by data-file tag.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ===========================================================================
// Ingredients and modifiers
// ===========================================================================

/// The consumed side of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientList {
    /// Ordinary processing input(s).
    Items(Vec<Ingredient>),
    /// A shaped crafting pattern: rows of symbols plus a symbol-to-ingredient
    /// key table. Spaces in a row are empty cells.
    Pattern {
        rows: Vec<String>,
        keys: BTreeMap<char, Ingredient>,
    },
}

/// Basin heat requirement for mixing and compacting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatRequirement {
    #[default]
    None,
    Heated,
    Superheated,
}

// ===========================================================================
// Drafts
// ===========================================================================

/// A recipe under construction. Drafts are assembled with chainable setters
/// and become [`Recipe`]s through
/// [`RecipeRegistry::register`](crate::registry::RecipeRegistry::register),
/// which validates the whole draft before committing anything.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub(crate) kind: RecipeKind,
    pub(crate) outputs: Vec<RecipeOutput>,
    pub(crate) ingredients: IngredientList,
    pub(crate) heat: HeatRequirement,
    pub(crate) processing_time: Option<u32>,
    pub(crate) keep_held_item: bool,
    pub(crate) key: Option<String>,
}

impl RecipeDraft {
    /// A draft for any input-driven kind (everything except mechanical
    /// crafting).
    pub fn processing(
        kind: RecipeKind,
        outputs: Vec<RecipeOutput>,
        inputs: Vec<Ingredient>,
    ) -> Self {
        Self {
            kind,
            outputs,
            ingredients: IngredientList::Items(inputs),
            heat: HeatRequirement::None,
            processing_time: None,
            keep_held_item: false,
            key: None,
        }
    }

    /// A draft for a shaped mechanical-crafting recipe.
    pub fn mechanical_crafting(
        outputs: Vec<RecipeOutput>,
        rows: Vec<String>,
        keys: BTreeMap<char, Ingredient>,
    ) -> Self {
        Self {
            kind: RecipeKind::MechanicalCrafting,
            outputs,
            ingredients: IngredientList::Pattern { rows, keys },
            heat: HeatRequirement::None,
            processing_time: None,
            keep_held_item: false,
            key: None,
        }
    }

    /// Require a heated basin. A later [`superheated`](Self::superheated)
    /// call overrides this.
    pub fn heated(mut self) -> Self {
        self.heat = HeatRequirement::Heated;
        self
    }

    /// Require a superheated basin.
    pub fn superheated(mut self) -> Self {
        self.heat = HeatRequirement::Superheated;
        self
    }

    /// Override the kind's default processing duration, in ticks.
    pub fn processing_time(mut self, ticks: u32) -> Self {
        self.processing_time = Some(ticks);
        self
    }

    /// Keep the held tool instead of consuming it (deploying).
    pub fn keep_held_item(mut self) -> Self {
        self.keep_held_item = true;
        self
    }

    /// Give the recipe a stable explicit key instead of a generated one.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

// ===========================================================================
// Registered recipes
// ===========================================================================

/// A registered recipe. Immutable once inside the registry.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub kind: RecipeKind,
    pub outputs: Vec<RecipeOutput>,
    pub ingredients: IngredientList,
    pub heat: HeatRequirement,
    pub processing_time: Option<u32>,
    pub keep_held_item: bool,
    pub key: Option<String>,
}

impl From<RecipeDraft> for Recipe {
    fn from(draft: RecipeDraft) -> Self {
        Self {
            kind: draft.kind,
            outputs: draft.outputs,
            ingredients: draft.ingredients,
            heat: draft.heat,
            processing_time: draft.processing_time,
            keep_held_item: draft.keep_held_item,
            key: draft.key,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
