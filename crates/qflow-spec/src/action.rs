use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::QuestionCode;

/// Outcome of applying one answered question.
///
/// `skip` lists the questions bypassed by the chosen branch, in flow order.
/// `recover` lists the questions whose existing answers need re-validation.
/// The two lists never overlap and neither contains duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Action {
    #[serde(default)]
    pub skip: Vec<QuestionCode>,
    #[serde(default)]
    pub recover: Vec<QuestionCode>,
}

impl Action {
    /// True when the answer changes nothing downstream.
    pub fn is_empty(&self) -> bool {
        self.skip.is_empty() && self.recover.is_empty()
    }
}
