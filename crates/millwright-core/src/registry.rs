//! The recipe book: additive, single-writer registration of recipe drafts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ingredient::validate_location;
use crate::output::RecipeOutput;
use crate::recipe::{IngredientList, Recipe, RecipeDraft};

/// Identifies a registered recipe. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub u32);

/// Largest crafting grid the mechanical crafter supports.
const MAX_PATTERN_DIM: usize = 9;

/// Errors raised when a draft is rejected at registration time.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// An output, ingredient, or explicit key is not a valid resource
    /// location.
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// The draft produced nothing.
    #[error("recipe has no outputs")]
    NoOutputs,

    /// The draft consumes nothing.
    #[error("recipe has no ingredients")]
    NoIngredients,

    /// Pattern rows or the key table are missing entirely.
    #[error("crafting pattern and keys must both be non-empty")]
    EmptyPattern,

    /// The pattern does not fit the crafting grid.
    #[error("crafting pattern exceeds the 9x9 grid")]
    PatternTooLarge,

    /// A pattern cell uses a symbol the key table does not bind.
    #[error("pattern symbol '{symbol}' has no key binding")]
    UnboundPatternSymbol { symbol: char },

    /// The key table was not a map of single-character symbols.
    #[error("pattern key '{0}' must be a single character")]
    InvalidPatternKey(String),

    /// The pattern rows were not a list of strings.
    #[error("crafting pattern must be a list of strings")]
    MalformedPattern,

    /// The key table was not a map of symbols to identifiers.
    #[error("crafting keys must be a map of symbols to identifiers")]
    MalformedKeys,
}

/// The recipe book. Registration is additive; a rejected draft leaves the
/// book untouched. Re-registering an explicit key replaces the earlier
/// entry, matching datapack override semantics.
#[derive(Debug, Default)]
pub struct RecipeRegistry {
    recipes: Vec<Recipe>,
    key_to_id: HashMap<String, RecipeId>,
}

impl RecipeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a draft and commit it to the book.
    pub fn register(&mut self, draft: RecipeDraft) -> Result<RecipeId, RegistryError> {
        validate_outputs(&draft.outputs)?;
        validate_ingredients(&draft.ingredients)?;
        if let Some(key) = &draft.key {
            validate_location(key)?;
        }

        let recipe = Recipe::from(draft);
        if let Some(key) = recipe.key.clone() {
            if let Some(&existing) = self.key_to_id.get(&key) {
                self.recipes[existing.0 as usize] = recipe;
                return Ok(existing);
            }
            let id = RecipeId(self.recipes.len() as u32);
            self.recipes.push(recipe);
            self.key_to_id.insert(key, id);
            Ok(id)
        } else {
            let id = RecipeId(self.recipes.len() as u32);
            self.recipes.push(recipe);
            Ok(id)
        }
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(id.0 as usize)
    }

    /// Lookup a recipe by its explicit key.
    pub fn key_id(&self, key: &str) -> Option<RecipeId> {
        self.key_to_id.get(key).copied()
    }

    /// The stable identifier of a registered recipe: its explicit key, or a
    /// generated `millwright:<kind>/<index>` location.
    pub fn identifier_of(&self, id: RecipeId) -> Option<String> {
        let recipe = self.recipes.get(id.0 as usize)?;
        Some(match &recipe.key {
            Some(key) => key.clone(),
            None => format!("millwright:{}/{}", recipe.kind.name(), id.0),
        })
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecipeId, &Recipe)> {
        self.recipes
            .iter()
            .enumerate()
            .map(|(index, recipe)| (RecipeId(index as u32), recipe))
    }
}

fn validate_outputs(outputs: &[RecipeOutput]) -> Result<(), RegistryError> {
    if outputs.is_empty() {
        return Err(RegistryError::NoOutputs);
    }
    for output in outputs {
        match output {
            RecipeOutput::Item(stack) => validate_location(&stack.item)?,
            RecipeOutput::Fluid(stack) => validate_location(&stack.fluid)?,
        }
    }
    Ok(())
}

fn validate_ingredients(ingredients: &IngredientList) -> Result<(), RegistryError> {
    match ingredients {
        IngredientList::Items(items) => {
            if items.is_empty() {
                return Err(RegistryError::NoIngredients);
            }
            Ok(())
        }
        IngredientList::Pattern { rows, keys } => {
            if rows.is_empty() || keys.is_empty() {
                return Err(RegistryError::EmptyPattern);
            }
            if rows.len() > MAX_PATTERN_DIM
                || rows.iter().any(|row| row.chars().count() > MAX_PATTERN_DIM)
            {
                return Err(RegistryError::PatternTooLarge);
            }
            for row in rows {
                for symbol in row.chars() {
                    if symbol != ' ' && !keys.contains_key(&symbol) {
                        return Err(RegistryError::UnboundPatternSymbol { symbol });
                    }
                }
            }
            Ok(())
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::Ingredient;
    use crate::output::{FluidStack, ItemStack};
    use crate::recipe::RecipeKind;
    use std::collections::BTreeMap;

    fn item(id: &str) -> RecipeOutput {
        RecipeOutput::Item(ItemStack::of(id))
    }

    fn crushing_draft() -> RecipeDraft {
        RecipeDraft::processing(
            RecipeKind::Crushing,
            vec![item("create:crushed_raw_iron")],
            vec![Ingredient::parse("minecraft:raw_iron").unwrap()],
        )
    }

    fn pattern_draft(rows: Vec<&str>, symbols: &[(char, &str)]) -> RecipeDraft {
        let keys: BTreeMap<char, Ingredient> = symbols
            .iter()
            .map(|(symbol, id)| (*symbol, Ingredient::parse(id).unwrap()))
            .collect();
        RecipeDraft::mechanical_crafting(
            vec![item("create:gearbox")],
            rows.into_iter().map(str::to_string).collect(),
            keys,
        )
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    #[test]
    fn register_assigns_sequential_ids() {
        let mut registry = RecipeRegistry::new();
        let a = registry.register(crushing_draft()).unwrap();
        let b = registry.register(crushing_draft()).unwrap();
        assert_eq!(a, RecipeId(0));
        assert_eq!(b, RecipeId(1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn register_stores_draft_fields() {
        let mut registry = RecipeRegistry::new();
        let id = registry
            .register(crushing_draft().processing_time(350))
            .unwrap();
        let recipe = registry.get(id).unwrap();
        assert_eq!(recipe.kind, RecipeKind::Crushing);
        assert_eq!(recipe.processing_time, Some(350));
        assert_eq!(recipe.outputs.len(), 1);
    }

    #[test]
    fn rejected_draft_leaves_book_untouched() {
        let mut registry = RecipeRegistry::new();
        registry.register(crushing_draft()).unwrap();

        let bad = RecipeDraft::processing(
            RecipeKind::Crushing,
            vec![item("not a location")],
            vec![Ingredient::parse("a:b").unwrap()],
        );
        assert!(registry.register(bad).is_err());
        assert_eq!(registry.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn reject_no_outputs() {
        let mut registry = RecipeRegistry::new();
        let draft = RecipeDraft::processing(
            RecipeKind::Milling,
            vec![],
            vec![Ingredient::parse("a:b").unwrap()],
        );
        assert!(matches!(
            registry.register(draft),
            Err(RegistryError::NoOutputs)
        ));
    }

    #[test]
    fn reject_no_ingredients() {
        let mut registry = RecipeRegistry::new();
        let draft = RecipeDraft::processing(RecipeKind::Milling, vec![item("a:b")], vec![]);
        assert!(matches!(
            registry.register(draft),
            Err(RegistryError::NoIngredients)
        ));
    }

    #[test]
    fn reject_invalid_output_fluid() {
        let mut registry = RecipeRegistry::new();
        let draft = RecipeDraft::processing(
            RecipeKind::Emptying,
            vec![RecipeOutput::Fluid(FluidStack::of("NOT VALID", 1000))],
            vec![Ingredient::parse("a:b").unwrap()],
        );
        assert!(matches!(
            registry.register(draft),
            Err(RegistryError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn reject_invalid_explicit_key() {
        let mut registry = RecipeRegistry::new();
        let draft = crushing_draft().with_key("spaces in keys");
        assert!(registry.register(draft).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn reject_empty_pattern() {
        let mut registry = RecipeRegistry::new();
        let draft = pattern_draft(vec![], &[('i', "a:b")]);
        assert!(matches!(
            registry.register(draft),
            Err(RegistryError::EmptyPattern)
        ));
    }

    #[test]
    fn reject_oversized_pattern() {
        let mut registry = RecipeRegistry::new();
        let draft = pattern_draft(vec!["iiiiiiiiii"], &[('i', "a:b")]);
        assert!(matches!(
            registry.register(draft),
            Err(RegistryError::PatternTooLarge)
        ));
    }

    #[test]
    fn reject_unbound_pattern_symbol() {
        let mut registry = RecipeRegistry::new();
        let draft = pattern_draft(vec!["ix"], &[('i', "a:b")]);
        assert!(matches!(
            registry.register(draft),
            Err(RegistryError::UnboundPatternSymbol { symbol: 'x' })
        ));
    }

    #[test]
    fn pattern_spaces_are_empty_cells() {
        let mut registry = RecipeRegistry::new();
        let draft = pattern_draft(vec!["i i", " i "], &[('i', "a:b")]);
        assert!(registry.register(draft).is_ok());
    }

    // -----------------------------------------------------------------------
    // Keys and identifiers
    // -----------------------------------------------------------------------

    #[test]
    fn explicit_key_lookup() {
        let mut registry = RecipeRegistry::new();
        let id = registry
            .register(crushing_draft().with_key("mypack:crush_iron"))
            .unwrap();
        assert_eq!(registry.key_id("mypack:crush_iron"), Some(id));
        assert_eq!(
            registry.identifier_of(id).as_deref(),
            Some("mypack:crush_iron")
        );
    }

    #[test]
    fn reregistering_explicit_key_replaces() {
        let mut registry = RecipeRegistry::new();
        let first = registry
            .register(crushing_draft().with_key("mypack:crush_iron"))
            .unwrap();
        let second = registry
            .register(
                crushing_draft()
                    .processing_time(100)
                    .with_key("mypack:crush_iron"),
            )
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(first).unwrap().processing_time, Some(100));
    }

    #[test]
    fn generated_identifier_names_kind_and_index() {
        let mut registry = RecipeRegistry::new();
        let id = registry.register(crushing_draft()).unwrap();
        assert_eq!(
            registry.identifier_of(id).as_deref(),
            Some("millwright:crushing/0")
        );
    }

    #[test]
    fn identifier_of_unknown_id() {
        let registry = RecipeRegistry::new();
        assert!(registry.identifier_of(RecipeId(7)).is_none());
    }

    #[test]
    fn iter_yields_ids_in_registration_order() {
        let mut registry = RecipeRegistry::new();
        registry.register(crushing_draft()).unwrap();
        registry.register(crushing_draft()).unwrap();
        let ids: Vec<_> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![RecipeId(0), RecipeId(1)]);
    }
}
