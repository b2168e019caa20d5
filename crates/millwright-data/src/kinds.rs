//! Per-kind ingestion contracts.
//!
//! Each recipe kind's required fields, input/output shape rules, and allowed
//! optional modifiers live in one static table, so adding a kind is a data
//! change and the contracts are testable as data.

use millwright_core::RecipeKind;

/// Which field set a kind requires beyond `type` and `output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Requires `input`.
    Input,
    /// Requires `pattern` and `keys` instead of `input`.
    PatternAndKeys,
}

/// Shape rule applied to the raw `input` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    /// Single value or sequence, taken as given.
    AsGiven,
    /// Must be a 2-element sequence; anything else skips the record.
    ExactlyTwo,
    /// Single-input kind: a sequence is reduced to its first element with a
    /// warning.
    FirstOnly,
}

/// Shape rule applied to the normalized output list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputRule {
    AsGiven,
    /// Must normalize to exactly two outputs; anything else skips the record.
    ExactlyTwo,
}

/// Optional modifiers a kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Heated,
    Superheated,
    ProcessingTime,
    KeepHeldItem,
}

/// The full ingestion contract for one recipe kind.
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: RecipeKind,
    pub requirement: Requirement,
    pub input_rule: InputRule,
    pub output_rule: OutputRule,
    pub modifiers: &'static [Modifier],
}

pub static KIND_TABLE: [KindSpec; 13] = [
    KindSpec {
        kind: RecipeKind::Mixing,
        requirement: Requirement::Input,
        input_rule: InputRule::AsGiven,
        output_rule: OutputRule::AsGiven,
        modifiers: &[
            Modifier::Heated,
            Modifier::Superheated,
            Modifier::ProcessingTime,
        ],
    },
    KindSpec {
        kind: RecipeKind::Crushing,
        requirement: Requirement::Input,
        input_rule: InputRule::AsGiven,
        output_rule: OutputRule::AsGiven,
        modifiers: &[Modifier::ProcessingTime],
    },
    KindSpec {
        kind: RecipeKind::Compacting,
        requirement: Requirement::Input,
        input_rule: InputRule::AsGiven,
        output_rule: OutputRule::AsGiven,
        modifiers: &[Modifier::Heated, Modifier::Superheated],
    },
    KindSpec {
        kind: RecipeKind::Cutting,
        requirement: Requirement::Input,
        input_rule: InputRule::AsGiven,
        output_rule: OutputRule::AsGiven,
        modifiers: &[Modifier::ProcessingTime],
    },
    KindSpec {
        kind: RecipeKind::Deploying,
        requirement: Requirement::Input,
        input_rule: InputRule::ExactlyTwo,
        output_rule: OutputRule::AsGiven,
        modifiers: &[Modifier::KeepHeldItem],
    },
    KindSpec {
        kind: RecipeKind::Emptying,
        requirement: Requirement::Input,
        input_rule: InputRule::AsGiven,
        output_rule: OutputRule::ExactlyTwo,
        modifiers: &[],
    },
    KindSpec {
        kind: RecipeKind::Filling,
        requirement: Requirement::Input,
        input_rule: InputRule::ExactlyTwo,
        output_rule: OutputRule::AsGiven,
        modifiers: &[],
    },
    KindSpec {
        kind: RecipeKind::Haunting,
        requirement: Requirement::Input,
        input_rule: InputRule::AsGiven,
        output_rule: OutputRule::AsGiven,
        modifiers: &[],
    },
    KindSpec {
        kind: RecipeKind::MechanicalCrafting,
        requirement: Requirement::PatternAndKeys,
        input_rule: InputRule::AsGiven,
        output_rule: OutputRule::AsGiven,
        modifiers: &[],
    },
    KindSpec {
        kind: RecipeKind::Milling,
        requirement: Requirement::Input,
        input_rule: InputRule::AsGiven,
        output_rule: OutputRule::AsGiven,
        modifiers: &[Modifier::ProcessingTime],
    },
    KindSpec {
        kind: RecipeKind::Pressing,
        requirement: Requirement::Input,
        input_rule: InputRule::FirstOnly,
        output_rule: OutputRule::AsGiven,
        modifiers: &[Modifier::ProcessingTime],
    },
    KindSpec {
        kind: RecipeKind::SandpaperPolishing,
        requirement: Requirement::Input,
        input_rule: InputRule::AsGiven,
        output_rule: OutputRule::AsGiven,
        modifiers: &[],
    },
    KindSpec {
        kind: RecipeKind::Splashing,
        requirement: Requirement::Input,
        input_rule: InputRule::AsGiven,
        output_rule: OutputRule::AsGiven,
        modifiers: &[],
    },
];

/// Case-insensitive lookup of a kind's contract by its data-file tag.
pub fn kind_spec(tag: &str) -> Option<&'static KindSpec> {
    KIND_TABLE
        .iter()
        .find(|spec| spec.kind.name().eq_ignore_ascii_case(tag))
}

// ===========================================================================
// Tests
// ===========================================================================
