use serde_json::Value;

pub use qflow_spec::{
    Action, ApplyError, DefinitionError, Engine, FlowError, QuestionBuilder, QuestionSummary,
    RuleBuilder, RuleSet, RuleSummary, Transition, TransitionError, define, summarize,
};

/// A rule set prepared for repeated `apply` calls.
#[derive(Clone, Debug)]
pub struct Applier {
    engine: Engine,
}

impl Applier {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            engine: Engine::new(rules),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn apply(&self, code: &str, args: &Value) -> Result<Action, ApplyError> {
        self.engine.apply(code, args)
    }
}

/// Builds an `Applier` from a finalized rule set.
pub fn use_rules(rules: RuleSet) -> Applier {
    Applier::new(rules)
}
