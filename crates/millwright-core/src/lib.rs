//! Millwright Core -- the host-side recipe model for data-driven mill
//! machinery recipes.
//!
//! This crate holds everything the game side of the system owns: output
//! stacks, ingredient identifiers, the closed set of [`recipe::RecipeKind`]s,
//! the draft builder, and the [`registry::RecipeRegistry`] recipe book.
//! Registration is atomic: a draft is validated as a whole and either
//! commits or leaves the book untouched, so a bad recipe definition can
//! never half-register.
//!
//! The companion `millwright-data` crate reads recipe packs from disk and
//! feeds drafts into the registry; this crate knows nothing about files or
//! JSON documents.

pub mod ingredient;
pub mod output;
pub mod recipe;
pub mod registry;

pub use ingredient::Ingredient;
pub use output::{FluidStack, ItemStack, RecipeOutput};
pub use recipe::{HeatRequirement, IngredientList, Recipe, RecipeDraft, RecipeKind};
pub use registry::{RecipeId, RecipeRegistry, RegistryError};
