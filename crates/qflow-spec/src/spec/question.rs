use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::transition::{Transition, TransitionError};

/// Identifier for a question in a flow.
pub type QuestionCode = String;

/// Name of a state flag produced or consumed by a question.
pub type FlagName = String;

/// Name of a runtime argument declared by a question.
pub type ParamName = String;

/// Branching logic evaluated when an answered question is applied.
///
/// The function reads declared arguments off the [`Transition`] and picks the
/// next question with [`Transition::target`]. Leaving the choice unset means
/// the flow continues linearly.
pub type DecisionFn =
    dyn Fn(&mut Transition<'_>) -> Result<(), TransitionError> + Send + Sync;

/// Everything declared for a single question.
///
/// The name sets keep first-seen insertion order and hold no duplicates and
/// no empty names; the builder guarantees both.
#[derive(Clone, Default)]
pub struct QuestionConfig {
    /// Flags this question establishes once answered.
    pub effects: IndexSet<FlagName>,
    /// Flags whose producing questions this question depends on.
    pub deps: IndexSet<FlagName>,
    /// Runtime arguments the decision function requires.
    pub args: IndexSet<ParamName>,
    /// Question codes the decision function may jump to.
    pub targets: IndexSet<QuestionCode>,
    /// Branching logic, for questions that branch at all.
    pub transitions: Option<Arc<DecisionFn>>,
}

impl fmt::Debug for QuestionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionConfig")
            .field("effects", &self.effects)
            .field("deps", &self.deps)
            .field("args", &self.args)
            .field("targets", &self.targets)
            .field("transitions", &self.transitions.is_some())
            .finish()
    }
}
