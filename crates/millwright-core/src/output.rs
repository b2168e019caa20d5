//! Recipe output stacks: quantified items, chance-weighted items, and fluids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantified item output. A `chance` of `Some(p)` marks the stack as a
/// processing byproduct dropped with probability `p`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: String,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance: Option<f64>,
}

impl ItemStack {
    /// A single item with no chance weighting.
    pub fn of(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            count: 1,
            chance: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = Some(chance);
        self
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count != 1 {
            write!(f, "{}x ", self.count)?;
        }
        f.write_str(&self.item)?;
        if let Some(chance) = self.chance {
            write!(f, " (chance {chance})")?;
        }
        Ok(())
    }
}

/// A quantified fluid output. Amounts are in millibuckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluidStack {
    pub fluid: String,
    pub amount: u32,
}

impl FluidStack {
    pub fn of(fluid: impl Into<String>, amount: u32) -> Self {
        Self {
            fluid: fluid.into(),
            amount,
        }
    }
}

impl fmt::Display for FluidStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}mb)", self.fluid, self.amount)
    }
}

/// One produced output of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecipeOutput {
    Item(ItemStack),
    Fluid(FluidStack),
}

impl RecipeOutput {
    pub fn as_item(&self) -> Option<&ItemStack> {
        match self {
            RecipeOutput::Item(stack) => Some(stack),
            RecipeOutput::Fluid(_) => None,
        }
    }

    pub fn as_fluid(&self) -> Option<&FluidStack> {
        match self {
            RecipeOutput::Item(_) => None,
            RecipeOutput::Fluid(stack) => Some(stack),
        }
    }
}

impl fmt::Display for RecipeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeOutput::Item(stack) => stack.fmt(f),
            RecipeOutput::Fluid(stack) => stack.fmt(f),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
