use indexmap::IndexSet;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::spec::question::{DecisionFn, ParamName, QuestionCode};

/// Failure raised while evaluating a question's decision function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Declared arguments absent from the runtime argument map, in
    /// declaration order.
    #[error("question '{current}' missing parameters: {}", .missing.join(", "))]
    MissingArgs {
        current: QuestionCode,
        missing: Vec<ParamName>,
    },
    /// `target` was called with an empty code.
    #[error("question '{current}' has defined a target but it is empty")]
    EmptyTarget { current: QuestionCode },
    /// `target` pointed back at the question being applied.
    #[error("question '{current}' cannot target itself")]
    SelfTarget { current: QuestionCode },
    /// `target` named a code outside the declared target set.
    #[error("question '{current}' target '{target}' is not in defined targets: {allowed:?}")]
    TargetNotAllowed {
        current: QuestionCode,
        target: QuestionCode,
        allowed: Vec<QuestionCode>,
    },
    /// A question-scope configuration call was made during evaluation.
    #[error("'{operation}' should be called in the question definition, not inside transitions")]
    ConfigCallInTransitions { operation: &'static str },
}

/// Evaluation context handed to a question's decision function.
///
/// Binds the declared arguments of one `apply` call and records the chosen
/// next question. `target` may be called more than once; the last successful
/// call wins.
#[derive(Debug)]
pub struct Transition<'a> {
    current: &'a str,
    declared: &'a IndexSet<ParamName>,
    args: &'a Map<String, Value>,
    allowed: &'a IndexSet<QuestionCode>,
    chosen: Option<QuestionCode>,
}

impl<'a> Transition<'a> {
    /// Binds `args` against the declared parameter names. Every declared name
    /// must be present in the map; all missing names are reported in one
    /// error, in declaration order. Entries for undeclared names are ignored.
    pub fn new(
        current: &'a str,
        declared: &'a IndexSet<ParamName>,
        args: &'a Map<String, Value>,
        allowed: &'a IndexSet<QuestionCode>,
    ) -> Result<Self, TransitionError> {
        let missing: Vec<ParamName> = declared
            .iter()
            .filter(|name| !args.contains_key(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(TransitionError::MissingArgs {
                current: current.to_string(),
                missing,
            });
        }
        Ok(Self {
            current,
            declared,
            args,
            allowed,
            chosen: None,
        })
    }

    /// Code of the question being applied.
    pub fn current(&self) -> &str {
        self.current
    }

    /// Value bound to a declared argument. Undeclared names read as null.
    pub fn arg(&self, name: &str) -> &Value {
        if self.declared.contains(name) {
            self.args.get(name).unwrap_or(&Value::Null)
        } else {
            &Value::Null
        }
    }

    /// Chooses the next question. The code must be non-empty, must differ
    /// from the current question, and must sit in the declared target set.
    pub fn target<S: Into<String>>(&mut self, code: S) -> Result<(), TransitionError> {
        let code = code.into();
        if code.is_empty() {
            return Err(TransitionError::EmptyTarget {
                current: self.current.to_string(),
            });
        }
        if code == self.current {
            return Err(TransitionError::SelfTarget {
                current: self.current.to_string(),
            });
        }
        if !self.allowed.is_empty() && !self.allowed.contains(&code) {
            return Err(TransitionError::TargetNotAllowed {
                current: self.current.to_string(),
                target: code,
                allowed: self.allowed.iter().cloned().collect(),
            });
        }
        self.chosen = Some(code);
        Ok(())
    }

    /// Runs the decision function and yields the chosen next question.
    pub fn resolve(mut self, decide: &DecisionFn) -> Result<Option<QuestionCode>, TransitionError> {
        decide(&mut self)?;
        Ok(self.chosen)
    }

    /// Effects are declared in the question scope; calling this here fails.
    pub fn effects<I, S>(&mut self, _names: I) -> Result<(), TransitionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Err(TransitionError::ConfigCallInTransitions {
            operation: "effects",
        })
    }

    /// Deps are declared in the question scope; calling this here fails.
    pub fn deps<I, S>(&mut self, _names: I) -> Result<(), TransitionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Err(TransitionError::ConfigCallInTransitions { operation: "deps" })
    }

    /// Args are declared in the question scope; calling this here fails.
    pub fn args<I, S>(&mut self, _names: I) -> Result<(), TransitionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Err(TransitionError::ConfigCallInTransitions { operation: "args" })
    }

    /// Targets are declared in the question scope; calling this here fails.
    pub fn targets<I, S>(&mut self, _names: I) -> Result<(), TransitionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Err(TransitionError::ConfigCallInTransitions {
            operation: "targets",
        })
    }
}
