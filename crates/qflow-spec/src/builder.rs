use std::sync::Arc;

use indexmap::IndexMap;

use crate::spec::question::{QuestionCode, QuestionConfig};
use crate::spec::rule::{RuleSet, normalize};
use crate::transition::{Transition, TransitionError};
use crate::validate::{self, DefinitionError};

/// Defines a rule set: seeds the flow order, runs the configurator, then
/// validates the whole set.
pub fn define<I, S, F>(codes: I, configure: F) -> Result<RuleSet, DefinitionError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: FnOnce(&mut RuleBuilder) -> Result<(), DefinitionError>,
{
    let mut builder = RuleBuilder::new(codes);
    configure(&mut builder)?;
    builder.finish()
}

/// Accumulates question configurations in flow order.
#[derive(Debug, Default)]
pub struct RuleBuilder {
    codes: Vec<QuestionCode>,
    configs: IndexMap<QuestionCode, QuestionConfig>,
}

impl RuleBuilder {
    /// Starts a builder seeded with the given flow order. Empty and duplicate
    /// codes are dropped.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: normalize(codes),
            configs: IndexMap::new(),
        }
    }

    /// Configures one question. A new code is appended to the flow order; an
    /// already-known code keeps its position and receives the new config.
    pub fn question<S, F>(&mut self, code: S, configure: F) -> Result<(), DefinitionError>
    where
        S: Into<String>,
        F: FnOnce(&mut QuestionBuilder),
    {
        let code = code.into();
        if code.is_empty() {
            return Err(DefinitionError::EmptyQuestionCode);
        }
        let mut question = QuestionBuilder::new(code.clone());
        configure(&mut question);
        let config = question.finish()?;
        if !self.codes.iter().any(|known| known == &code) {
            self.codes.push(code.clone());
        }
        self.configs.insert(code, config);
        Ok(())
    }

    /// Drops everything accumulated so far.
    pub fn reset(&mut self) {
        self.codes.clear();
        self.configs.clear();
    }

    /// Finalizes the rule set, validating cross-question invariants.
    pub fn finish(self) -> Result<RuleSet, DefinitionError> {
        let rules = RuleSet::new(self.codes, self.configs);
        validate::validate(&rules)?;
        Ok(rules)
    }
}

/// Per-question configurator.
///
/// The declaring methods union-merge across repeated calls, keep first-seen
/// order, and drop empty names and duplicates.
#[derive(Debug)]
pub struct QuestionBuilder {
    code: QuestionCode,
    config: QuestionConfig,
    misuse: Option<DefinitionError>,
}

impl QuestionBuilder {
    fn new(code: QuestionCode) -> Self {
        Self {
            code,
            config: QuestionConfig::default(),
            misuse: None,
        }
    }

    /// Declares flags this question establishes once answered.
    pub fn effects<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.effects.extend(normalize(names));
        self
    }

    /// Declares flags whose producing questions this question depends on.
    pub fn deps<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.deps.extend(normalize(names));
        self
    }

    /// Declares the runtime arguments the decision function requires.
    pub fn args<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.args.extend(normalize(names));
        self
    }

    /// Declares the codes the decision function may jump to.
    pub fn targets<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.targets.extend(normalize(names));
        self
    }

    /// Installs the branching logic for this question. A later call replaces
    /// an earlier one.
    pub fn transitions<F>(&mut self, decide: F) -> &mut Self
    where
        F: Fn(&mut Transition<'_>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.config.transitions = Some(Arc::new(decide));
        self
    }

    /// Next-question selection belongs inside `transitions`; calling it here
    /// fails the whole question definition.
    pub fn target<S: Into<String>>(&mut self, _code: S) -> &mut Self {
        if self.misuse.is_none() {
            self.misuse = Some(DefinitionError::TargetInQuestionScope {
                code: self.code.clone(),
            });
        }
        self
    }

    fn finish(self) -> Result<QuestionConfig, DefinitionError> {
        if let Some(err) = self.misuse {
            return Err(err);
        }
        validate::validate_question(&self.code, &self.config)?;
        Ok(self.config)
    }
}
