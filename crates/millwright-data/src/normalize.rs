//! Output normalization: raw output fragments to typed stacks.
//!
//! An output spec may be a bare identifier string or an object carrying
//! `item`/`fluid` plus optional `count`/`chance`/`amount`. Shapes are checked
//! in a fixed priority order because a hand-edited spec can loosely satisfy
//! more than one (an object with both `chance` and `count` is read as
//! chance-weighted). Malformed numeric fields degrade to documented defaults
//! with a warning; nothing in here fails or panics.

use serde_json::Value;

use millwright_core::{FluidStack, ItemStack, RecipeOutput};

use crate::diagnostics::Diagnostics;
use crate::schema::{coerce_string, json_type_name, truthy};

/// Fallback fluid amount, in millibuckets, when `amount` is unusable.
const DEFAULT_FLUID_AMOUNT: u32 = 1000;

/// Normalize one output spec. Returns `None` for unparsable specs; never
/// panics and never rejects a merely *suspicious* value (that is the
/// registry's job).
pub fn normalize_output(spec: &Value, diags: &mut Diagnostics) -> Option<RecipeOutput> {
    match spec {
        Value::String(id) => Some(RecipeOutput::Item(ItemStack::of(id.clone()))),
        Value::Object(fields) => {
            if let Some(item) = fields.get("item").filter(|v| truthy(v)) {
                let id = coerce_string(item);
                // `chance` wins over `count` when both are supplied.
                if let Some(chance) = fields.get("chance") {
                    let chance = parse_chance(chance, diags);
                    return Some(RecipeOutput::Item(ItemStack::of(id).with_chance(chance)));
                }
                if let Some(count) = fields.get("count") {
                    let count = parse_count(count, diags);
                    return Some(RecipeOutput::Item(ItemStack::of(id).with_count(count)));
                }
                return Some(RecipeOutput::Item(ItemStack::of(id)));
            }
            if let Some(fluid) = fields.get("fluid").filter(|v| truthy(v)) {
                if let Some(amount) = fields.get("amount") {
                    let amount = parse_amount(amount, diags);
                    return Some(RecipeOutput::Fluid(FluidStack::of(
                        coerce_string(fluid),
                        amount,
                    )));
                }
            }
            diags.warn(format!("cannot parse output object: {spec}"));
            None
        }
        other => {
            diags.warn(format!("invalid output type: {}", json_type_name(other)));
            None
        }
    }
}

/// Normalize the `output` field of a record: a sequence is normalized
/// element-wise with failures dropped; a single spec yields a one- or
/// zero-element list.
pub fn normalize_output_list(spec: &Value, diags: &mut Diagnostics) -> Vec<RecipeOutput> {
    match spec {
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| normalize_output(entry, diags))
            .collect(),
        single => normalize_output(single, diags).into_iter().collect(),
    }
}

fn parse_chance(value: &Value, diags: &mut Diagnostics) -> f64 {
    match coerce_f64(value) {
        Some(chance) if chance.is_finite() && (0.0..=1.0).contains(&chance) => chance,
        _ => {
            diags.warn(format!("invalid chance: {value}, defaulting to 1.0"));
            1.0
        }
    }
}

fn parse_count(value: &Value, diags: &mut Diagnostics) -> u32 {
    match coerce_positive_u32(value) {
        Some(count) => count,
        None => {
            diags.warn(format!("invalid count: {value}, defaulting to 1"));
            1
        }
    }
}

fn parse_amount(value: &Value, diags: &mut Diagnostics) -> u32 {
    match coerce_positive_u32(value) {
        Some(amount) => amount,
        None => {
            diags.warn(format!(
                "invalid fluid amount: {value}, defaulting to {DEFAULT_FLUID_AMOUNT}"
            ));
            DEFAULT_FLUID_AMOUNT
        }
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Lenient integer coercion: integers as-is, floats truncated, numeric
/// strings parsed. `None` for everything else.
pub(crate) fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

fn coerce_positive_u32(value: &Value) -> Option<u32> {
    coerce_int(value)
        .filter(|n| *n > 0)
        .map(|n| n.min(i64::from(u32::MAX)) as u32)
}

// ===========================================================================
// Tests
// ===========================================================================
