use indexmap::IndexSet;
use thiserror::Error;

use crate::spec::question::{FlagName, QuestionCode, QuestionConfig};
use crate::spec::rule::RuleSet;

/// Failure detected while defining a rule set.
///
/// `UnknownTargets` and `UnsatisfiedDeps` come from whole-set validation when
/// `define` closes; every other variant fails the individual `question` call
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("question code cannot be empty")]
    EmptyQuestionCode,
    #[error("question '{code}' has args but no transitions defined")]
    ArgsWithoutTransitions { code: QuestionCode },
    #[error("question '{code}' has targets but no transitions defined")]
    TargetsWithoutTransitions { code: QuestionCode },
    #[error("question '{code}' has transitions but no args defined")]
    TransitionsWithoutArgs { code: QuestionCode },
    #[error("question '{code}' has transitions but no targets defined")]
    TransitionsWithoutTargets { code: QuestionCode },
    #[error("question '{code}' cannot target itself in its own targets list")]
    SelfTarget { code: QuestionCode },
    #[error("question '{code}' has deps that overlap with its effects: {overlap:?}")]
    DepsOverlapEffects {
        code: QuestionCode,
        overlap: Vec<FlagName>,
    },
    #[error("'target' should be called inside transitions, not in the definition of question '{code}'")]
    TargetInQuestionScope { code: QuestionCode },
    #[error("targets {targets:?} are not defined in question codes {codes:?}")]
    UnknownTargets {
        targets: Vec<QuestionCode>,
        codes: Vec<QuestionCode>,
    },
    #[error("deps {deps:?} are not defined in effects {effects:?}")]
    UnsatisfiedDeps {
        deps: Vec<FlagName>,
        effects: Vec<FlagName>,
    },
}

/// Validates the cross-question invariants of a finished rule set: every
/// declared target must be a known code and every dep flag must be produced
/// by some question's effects. Each pass reports all offenders at once.
pub fn validate(rules: &RuleSet) -> Result<(), DefinitionError> {
    validate_targets(rules)?;
    validate_deps(rules)
}

/// Structural checks for one question's finished config.
pub(crate) fn validate_question(
    code: &str,
    config: &QuestionConfig,
) -> Result<(), DefinitionError> {
    let has_transitions = config.transitions.is_some();
    if !config.args.is_empty() && !has_transitions {
        return Err(DefinitionError::ArgsWithoutTransitions {
            code: code.to_string(),
        });
    }
    if !config.targets.is_empty() && !has_transitions {
        return Err(DefinitionError::TargetsWithoutTransitions {
            code: code.to_string(),
        });
    }
    if has_transitions && config.args.is_empty() {
        return Err(DefinitionError::TransitionsWithoutArgs {
            code: code.to_string(),
        });
    }
    if has_transitions && config.targets.is_empty() {
        return Err(DefinitionError::TransitionsWithoutTargets {
            code: code.to_string(),
        });
    }
    if config.targets.contains(code) {
        return Err(DefinitionError::SelfTarget {
            code: code.to_string(),
        });
    }
    let overlap: Vec<FlagName> = config
        .deps
        .iter()
        .filter(|dep| config.effects.contains(dep.as_str()))
        .cloned()
        .collect();
    if !overlap.is_empty() {
        return Err(DefinitionError::DepsOverlapEffects {
            code: code.to_string(),
            overlap,
        });
    }
    Ok(())
}

fn validate_targets(rules: &RuleSet) -> Result<(), DefinitionError> {
    let mut unknown: IndexSet<QuestionCode> = IndexSet::new();
    for (_, config) in rules.configs() {
        for target in &config.targets {
            if rules.position(target).is_none() {
                unknown.insert(target.clone());
            }
        }
    }
    if unknown.is_empty() {
        return Ok(());
    }
    Err(DefinitionError::UnknownTargets {
        targets: unknown.into_iter().collect(),
        codes: rules.codes().to_vec(),
    })
}

fn validate_deps(rules: &RuleSet) -> Result<(), DefinitionError> {
    let mut effects: IndexSet<FlagName> = IndexSet::new();
    let mut deps: IndexSet<FlagName> = IndexSet::new();
    for (_, config) in rules.configs() {
        effects.extend(config.effects.iter().cloned());
        deps.extend(config.deps.iter().cloned());
    }
    let unsatisfied: Vec<FlagName> = deps
        .iter()
        .filter(|dep| !effects.contains(dep.as_str()))
        .cloned()
        .collect();
    if unsatisfied.is_empty() {
        return Ok(());
    }
    Err(DefinitionError::UnsatisfiedDeps {
        deps: unsatisfied,
        effects: effects.into_iter().collect(),
    })
}
