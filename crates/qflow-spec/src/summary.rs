use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::{FlagName, ParamName, QuestionCode};
use crate::spec::rule::RuleSet;

/// Declarative view of one configured question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSummary {
    pub code: QuestionCode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<FlagName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<FlagName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ParamName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<QuestionCode>,
    #[serde(default)]
    pub has_transitions: bool,
}

/// Rule set projected to plain data, for inspection and tooling. Decision
/// functions are opaque code, so they appear only as a presence flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleSummary {
    pub codes: Vec<QuestionCode>,
    pub questions: Vec<QuestionSummary>,
}

/// Projects a rule set into its serializable summary.
pub fn summarize(rules: &RuleSet) -> RuleSummary {
    let questions = rules
        .configs()
        .map(|(code, config)| QuestionSummary {
            code: code.clone(),
            effects: config.effects.iter().cloned().collect(),
            deps: config.deps.iter().cloned().collect(),
            args: config.args.iter().cloned().collect(),
            targets: config.targets.iter().cloned().collect(),
            has_transitions: config.transitions.is_some(),
        })
        .collect();
    RuleSummary {
        codes: rules.codes().to_vec(),
        questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::define;
    use serde_json::json;

    #[test]
    fn summarize_projects_codes_and_configs() {
        let rules = define(["q1", "q2", "q3"], |rule| {
            rule.question("q1", |q| {
                q.args(["a1"]);
                q.effects(["flag1"]);
                q.targets(["q2", "q3"]);
                q.transitions(|t| {
                    if t.arg("a1") == true {
                        t.target("q3")
                    } else {
                        t.target("q2")
                    }
                });
            })?;
            rule.question("q2", |q| {
                q.deps(["flag1"]);
            })
        })
        .expect("rules should build");

        let summary = summarize(&rules);
        assert_eq!(summary.codes, ["q1", "q2", "q3"]);
        assert_eq!(summary.questions.len(), 2);

        let q1 = &summary.questions[0];
        assert_eq!(q1.code, "q1");
        assert_eq!(q1.args, ["a1"]);
        assert_eq!(q1.effects, ["flag1"]);
        assert_eq!(q1.targets, ["q2", "q3"]);
        assert!(q1.has_transitions);

        let q2 = &summary.questions[1];
        assert_eq!(q2.deps, ["flag1"]);
        assert!(!q2.has_transitions);
        assert!(q2.targets.is_empty());
    }

    #[test]
    fn summary_serializes_without_empty_lists() {
        let rules = define(["q1", "q2"], |rule| {
            rule.question("q1", |q| {
                q.effects(["flag1"]);
            })
        })
        .expect("rules should build");

        let value = serde_json::to_value(summarize(&rules)).expect("summary serializes");
        assert_eq!(
            value,
            json!({
                "codes": ["q1", "q2"],
                "questions": [
                    { "code": "q1", "effects": ["flag1"], "has_transitions": false }
                ]
            })
        );
    }
}
