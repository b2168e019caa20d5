//! The recipe ingestion pipeline.
//!
//! One pass over one document: validate the document shape, then process
//! each record independently (validate required fields, normalize outputs,
//! dispatch to the kind's constructor, apply modifiers, register). Failures
//! are isolated per record; nothing below the pipeline boundary propagates
//! out. The only caller-visible effects are registry additions and the
//! returned report.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use millwright_core::{
    Ingredient, RecipeDraft, RecipeId, RecipeOutput, RecipeRegistry, RegistryError,
};

use crate::diagnostics::Diagnostics;
use crate::kinds::{self, InputRule, KindSpec, Modifier, OutputRule, Requirement};
use crate::normalize::{coerce_int, normalize_output_list};
use crate::pack;
use crate::schema::{RecordData, coerce_string, json_type_name};

// ===========================================================================
// Report
// ===========================================================================

/// The outcome of one ingestion run.
#[derive(Debug)]
pub struct IngestReport {
    /// Ids of every recipe registered by this run, in document order.
    pub registered: Vec<RecipeId>,
    /// How many record candidates the document contained.
    pub definitions: usize,
    /// Everything the pipeline had to say, in emission order.
    pub diagnostics: Diagnostics,
}

impl IngestReport {
    fn empty(diagnostics: Diagnostics) -> Self {
        Self {
            registered: Vec::new(),
            definitions: 0,
            diagnostics,
        }
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }
}

// ===========================================================================
// Entry points
// ===========================================================================

/// Load the pack named `base_name` from `dir` and ingest it.
///
/// A pack that cannot be located or parsed is fatal for the run but not for
/// the caller: the failure becomes an error diagnostic and zero recipes are
/// registered.
pub fn ingest_dir(registry: &mut RecipeRegistry, dir: &Path, base_name: &str) -> IngestReport {
    let mut diagnostics = Diagnostics::new();
    diagnostics.info(format!(
        "reading recipe pack '{base_name}' from {}",
        dir.display()
    ));

    match pack::load_pack(dir, base_name) {
        Ok(document) => ingest_value_with(registry, &document, diagnostics),
        Err(err) => {
            diagnostics.error(format!(
                "failed to load recipe pack: {err}; no recipes will be added"
            ));
            IngestReport::empty(diagnostics)
        }
    }
}

/// Ingest an already-parsed document.
pub fn ingest_value(registry: &mut RecipeRegistry, document: &Value) -> IngestReport {
    ingest_value_with(registry, document, Diagnostics::new())
}

fn ingest_value_with(
    registry: &mut RecipeRegistry,
    document: &Value,
    mut diagnostics: Diagnostics,
) -> IngestReport {
    // Records are the values of a top-level object (keys ignored) or the
    // elements of a top-level array. Anything else, or an empty container,
    // aborts the run with a diagnostic.
    let records: Vec<&Value> = match document {
        Value::Object(fields) => fields.values().collect(),
        Value::Array(entries) => entries.iter().collect(),
        other => {
            diagnostics.error(format!(
                "recipe document must be an object of records, got {}; no recipes will be added",
                json_type_name(other)
            ));
            return IngestReport::empty(diagnostics);
        }
    };
    if records.is_empty() {
        diagnostics.error(format!(
            "recipe document is an empty {}; no recipes will be added",
            json_type_name(document)
        ));
        return IngestReport::empty(diagnostics);
    }

    let definitions = records.len();
    diagnostics.info(format!("loading {definitions} recipe definitions"));

    let mut registered = Vec::new();
    for record in records {
        if let Some(id) = process_record(registry, record, &mut diagnostics) {
            registered.push(id);
        }
    }

    diagnostics.info(format!(
        "finished processing {definitions} recipe definitions, {} registered",
        registered.len()
    ));

    IngestReport {
        registered,
        definitions,
        diagnostics,
    }
}

// ===========================================================================
// Per-record processing
// ===========================================================================

/// Why a record failed after field validation.
enum RecordFailure {
    /// Already diagnosed with a warning; move on silently.
    Skip,
    /// Rejected at the host boundary.
    Construction(RegistryError),
}

fn process_record(
    registry: &mut RecipeRegistry,
    value: &Value,
    diags: &mut Diagnostics,
) -> Option<RecipeId> {
    let Some(record) = RecordData::from_value(value) else {
        diags.warn(format!(
            "skipping recipe definition (not an object): {value}"
        ));
        return None;
    };
    let display_id = record.display_id();

    let missing = record.missing_fields();
    if !missing.is_empty() {
        diags.warn(format!(
            "skipping recipe (id: {display_id}) due to missing fields: {}",
            missing.join(", ")
        ));
        return None;
    }
    // Both are present once validation passes.
    let tag = record.kind_tag()?;
    let output_value = record.output()?;

    let outputs = normalize_output_list(output_value, diags);
    if outputs.is_empty() {
        diags.error(format!(
            "no valid outputs for recipe (id: {display_id}); output was: {output_value}"
        ));
        return None;
    }
    let outputs_desc = describe_outputs(&outputs);

    let Some(spec) = kinds::kind_spec(&tag) else {
        diags.warn(format!(
            "unknown recipe type '{tag}' (id: {display_id}), skipping"
        ));
        return None;
    };

    let draft = match build_draft(spec, &record, outputs, &display_id, diags) {
        Ok(draft) => draft,
        Err(RecordFailure::Skip) => return None,
        Err(RecordFailure::Construction(err)) => {
            diags.error(format!(
                "error creating recipe (id: {display_id}): {err}; definition: {value}"
            ));
            return None;
        }
    };

    match registry.register(draft) {
        Ok(id) => {
            match record.id() {
                Some(key) => diags.info(format!("added recipe: {key}")),
                None => diags.info(format!(
                    "added recipe (auto-id): type '{}', output(s) '{outputs_desc}', input(s) '{}'",
                    spec.kind.name(),
                    describe_input(&record)
                )),
            }
            Some(id)
        }
        Err(err) => {
            diags.error(format!(
                "error creating recipe (id: {display_id}): {err}; definition: {value}"
            ));
            None
        }
    }
}

fn build_draft(
    spec: &KindSpec,
    record: &RecordData,
    outputs: Vec<RecipeOutput>,
    display_id: &str,
    diags: &mut Diagnostics,
) -> Result<RecipeDraft, RecordFailure> {
    if spec.output_rule == OutputRule::ExactlyTwo && outputs.len() != 2 {
        diags.warn(format!(
            "invalid output for {} (id: {display_id}): expected 2 entries, got {}; skipping",
            spec.kind.name(),
            outputs.len()
        ));
        return Err(RecordFailure::Skip);
    }

    let mut draft = match spec.requirement {
        Requirement::PatternAndKeys => {
            // Field validation guarantees both are present.
            let pattern = record.pattern().ok_or(RecordFailure::Skip)?;
            let keys = record.keys().ok_or(RecordFailure::Skip)?;
            RecipeDraft::mechanical_crafting(
                outputs,
                pattern_rows(pattern).map_err(RecordFailure::Construction)?,
                pattern_keys(keys).map_err(RecordFailure::Construction)?,
            )
        }
        Requirement::Input => {
            let input = record.input().ok_or(RecordFailure::Skip)?;
            let entries = select_inputs(spec, input, display_id, diags)?;
            let ingredients = entries
                .iter()
                .map(|entry| Ingredient::parse(&coerce_string(entry)))
                .collect::<Result<Vec<_>, _>>()
                .map_err(RecordFailure::Construction)?;
            RecipeDraft::processing(spec.kind, outputs, ingredients)
        }
    };

    for modifier in spec.modifiers {
        draft = match modifier {
            Modifier::Heated if record.heated() => draft.heated(),
            Modifier::Superheated if record.superheated() => draft.superheated(),
            Modifier::KeepHeldItem if record.keep_held_item() => draft.keep_held_item(),
            Modifier::ProcessingTime => match record.processing_time() {
                Some(value) => match coerce_ticks(value) {
                    Some(ticks) => draft.processing_time(ticks),
                    None => {
                        diags.warn(format!(
                            "invalid processingTime {value} (id: {display_id}), ignoring"
                        ));
                        draft
                    }
                },
                None => draft,
            },
            _ => draft,
        };
    }

    if let Some(key) = record.id() {
        draft = draft.with_key(key);
    }
    Ok(draft)
}

/// Apply the kind's input-shape rule and return the raw input entries to
/// turn into ingredients.
fn select_inputs<'a>(
    spec: &KindSpec,
    input: &'a Value,
    display_id: &str,
    diags: &mut Diagnostics,
) -> Result<Vec<&'a Value>, RecordFailure> {
    match spec.input_rule {
        InputRule::ExactlyTwo => match input.as_array() {
            Some(entries) if entries.len() == 2 => Ok(entries.iter().collect()),
            _ => {
                diags.warn(format!(
                    "invalid input for {} (id: {display_id}): expected a 2-element list; skipping",
                    spec.kind.name()
                ));
                Err(RecordFailure::Skip)
            }
        },
        InputRule::FirstOnly => match input.as_array() {
            Some(entries) => {
                diags.warn(format!(
                    "{} expects a single input, using the first (id: {display_id})",
                    spec.kind.name()
                ));
                Ok(entries.iter().take(1).collect())
            }
            None => Ok(vec![input]),
        },
        InputRule::AsGiven => match input.as_array() {
            Some(entries) => Ok(entries.iter().collect()),
            None => Ok(vec![input]),
        },
    }
}

fn pattern_rows(pattern: &Value) -> Result<Vec<String>, RegistryError> {
    let rows = pattern.as_array().ok_or(RegistryError::MalformedPattern)?;
    rows.iter()
        .map(|row| {
            row.as_str()
                .map(str::to_string)
                .ok_or(RegistryError::MalformedPattern)
        })
        .collect()
}

fn pattern_keys(keys: &Value) -> Result<BTreeMap<char, Ingredient>, RegistryError> {
    let table = keys.as_object().ok_or(RegistryError::MalformedKeys)?;
    let mut bindings = BTreeMap::new();
    for (symbol, target) in table {
        let mut chars = symbol.chars();
        let symbol_char = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(RegistryError::InvalidPatternKey(symbol.clone())),
        };
        bindings.insert(symbol_char, Ingredient::parse(&coerce_string(target))?);
    }
    Ok(bindings)
}

/// Processing-time coercion at the host boundary: positive integers (or
/// numeric strings) only; anything else is rejected.
fn coerce_ticks(value: &Value) -> Option<u32> {
    coerce_int(value)
        .filter(|n| *n > 0)
        .map(|n| n.min(i64::from(u32::MAX)) as u32)
}

fn describe_outputs(outputs: &[RecipeOutput]) -> String {
    outputs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_input(record: &RecordData) -> String {
    match record.input() {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(coerce_string)
            .collect::<Vec<_>>()
            .join(", "),
        Some(value) => coerce_string(value),
        None => "pattern/keys".to_string(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
