#![allow(missing_docs)]

pub mod action;
pub mod builder;
pub mod engine;
pub mod spec;
pub mod summary;
pub mod transition;
pub mod validate;

pub use action::Action;
pub use builder::{QuestionBuilder, RuleBuilder, define};
pub use engine::{ApplyError, EffectIndex, Engine, FlowError, build_effect_index};
pub use spec::{DecisionFn, FlagName, ParamName, QuestionCode, QuestionConfig, RuleSet};
pub use summary::{QuestionSummary, RuleSummary, summarize};
pub use transition::{Transition, TransitionError};
pub use validate::{DefinitionError, validate};
