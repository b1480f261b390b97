use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::action::Action;
use crate::spec::question::{FlagName, QuestionCode};
use crate::spec::rule::RuleSet;
use crate::transition::{Transition, TransitionError};

/// Effect flag mapped to the codes of every question depending on it, in
/// definition order.
pub type EffectIndex = IndexMap<FlagName, Vec<QuestionCode>>;

/// The chosen next question does not advance the flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid question flow: current={current}, next={next}")]
pub struct FlowError {
    pub current: QuestionCode,
    pub next: QuestionCode,
}

/// Failure while applying an answered question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// The applied question code was empty.
    #[error("question code cannot be empty")]
    EmptyQuestionCode,
    /// Argument binding or the decision function failed.
    #[error(transparent)]
    Transition(#[from] TransitionError),
    /// The decision did not move the flow forward.
    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Evaluates answered questions against a finalized rule set.
///
/// The engine snapshots the rule set at construction and derives the effect
/// index once. `apply` never mutates the engine, so a shared reference can
/// evaluate from any number of threads.
#[derive(Debug, Clone)]
pub struct Engine {
    rules: RuleSet,
    effect_index: EffectIndex,
}

impl Engine {
    /// Wraps a rule set and indexes its dependencies.
    pub fn new(rules: RuleSet) -> Self {
        let effect_index = build_effect_index(&rules);
        Self {
            rules,
            effect_index,
        }
    }

    /// The wrapped rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The flag-to-dependents index derived from the rule set.
    pub fn effect_index(&self) -> &EffectIndex {
        &self.effect_index
    }

    /// Applies an answered question and computes which questions the chosen
    /// branch skips and which previously answered questions to recover.
    ///
    /// `args` is read as an object map; any other JSON value binds no
    /// arguments. Codes without configuration yield an empty action.
    pub fn apply(&self, code: &str, args: &Value) -> Result<Action, ApplyError> {
        if code.is_empty() {
            return Err(ApplyError::EmptyQuestionCode);
        }
        if self.rules.is_empty() {
            return Ok(Action::default());
        }
        let Some(config) = self.rules.config(code) else {
            return Ok(Action::default());
        };

        let empty_args = Map::new();
        let bound = args.as_object().unwrap_or(&empty_args);
        let next = match &config.transitions {
            Some(decide) => {
                Transition::new(code, &config.args, bound, &config.targets)?
                    .resolve(decide.as_ref())?
            }
            None => None,
        };

        let skip = self.skip_range(code, next.as_deref())?;
        let mut recover: IndexSet<QuestionCode> = IndexSet::new();
        recover.extend(self.range_recover(next.as_deref(), &config.targets));
        recover.extend(self.dep_recover(&config.effects));
        let recover = recover
            .into_iter()
            .filter(|candidate| !skip.contains(candidate))
            .collect();

        Ok(Action { skip, recover })
    }

    /// Codes strictly between the current question and the chosen next one.
    fn skip_range(&self, current: &str, next: Option<&str>) -> Result<Vec<QuestionCode>, FlowError> {
        let Some(next) = next else {
            return Ok(Vec::new());
        };
        let flow_error = || FlowError {
            current: current.to_string(),
            next: next.to_string(),
        };
        let (Some(i), Some(j)) = (self.rules.position(current), self.rules.position(next)) else {
            return Err(flow_error());
        };
        if i >= j {
            return Err(flow_error());
        }
        Ok(self.rules.codes()[i + 1..j].to_vec())
    }

    /// Codes from the chosen next question up to the furthest declared
    /// target, exclusive. Branching away from them may have left their
    /// answers stale.
    fn range_recover(
        &self,
        next: Option<&str>,
        targets: &IndexSet<QuestionCode>,
    ) -> Vec<QuestionCode> {
        let Some(next) = next else {
            return Vec::new();
        };
        if targets.is_empty() {
            return Vec::new();
        }
        let Some(j) = self.rules.position(next) else {
            return Vec::new();
        };
        let Some(m) = targets
            .iter()
            .filter_map(|target| self.rules.position(target))
            .max()
        else {
            return Vec::new();
        };
        if j > m {
            return Vec::new();
        }
        self.rules.codes()[j..m].to_vec()
    }

    /// Codes of every question depending on a flag this question effects.
    fn dep_recover(&self, effects: &IndexSet<FlagName>) -> Vec<QuestionCode> {
        let mut recover: IndexSet<QuestionCode> = IndexSet::new();
        for flag in effects {
            if let Some(dependents) = self.effect_index.get(flag) {
                recover.extend(dependents.iter().cloned());
            }
        }
        recover.into_iter().collect()
    }
}

/// Builds the flag-to-dependents index for a rule set by walking every
/// config's deps in definition order.
pub fn build_effect_index(rules: &RuleSet) -> EffectIndex {
    let mut index = EffectIndex::new();
    for (code, config) in rules.configs() {
        for dep in &config.deps {
            let dependents = index.entry(dep.clone()).or_default();
            if !dependents.contains(code) {
                dependents.push(code.clone());
            }
        }
    }
    index
}
