use indexmap::{IndexMap, IndexSet};

use super::question::{QuestionCode, QuestionConfig};

/// Finalized set of question rules for one linear flow.
///
/// Built through [`crate::builder::define`]; the builder has already checked
/// that every declared target is a known code, that every dep flag is
/// produced by some effect, and that each config is structurally coherent, so
/// holders of a `RuleSet` can rely on those invariants.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    codes: Vec<QuestionCode>,
    configs: IndexMap<QuestionCode, QuestionConfig>,
}

impl RuleSet {
    pub(crate) fn new(
        codes: Vec<QuestionCode>,
        configs: IndexMap<QuestionCode, QuestionConfig>,
    ) -> Self {
        Self { codes, configs }
    }

    /// Question codes in flow order.
    pub fn codes(&self) -> &[QuestionCode] {
        &self.codes
    }

    /// Config for one question, if that question was configured.
    pub fn config(&self, code: &str) -> Option<&QuestionConfig> {
        self.configs.get(code)
    }

    /// Configured questions in definition order.
    pub fn configs(&self) -> impl Iterator<Item = (&QuestionCode, &QuestionConfig)> {
        self.configs.iter()
    }

    /// True when no question carries any configuration.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Position of `code` in the flow order.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|c| c == code)
    }

    /// Discards every code and config, leaving an empty set.
    pub fn clear(&mut self) {
        self.codes.clear();
        self.configs.clear();
    }
}

/// Drops empty names and duplicates, keeping first occurrences in order.
pub(crate) fn normalize<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen: IndexSet<String> = IndexSet::new();
    for name in names {
        let name = name.into();
        if !name.is_empty() {
            seen.insert(name);
        }
    }
    seen.into_iter().collect()
}
