pub mod question;
pub mod rule;

pub use question::{DecisionFn, FlagName, ParamName, QuestionCode, QuestionConfig};
pub use rule::RuleSet;
