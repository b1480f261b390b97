use indexmap::IndexSet;
use serde_json::{Map, Value, json};

use qflow_spec::{Transition, TransitionError};

fn names(values: &[&str]) -> IndexSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn args_map(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn binds_declared_args_and_ignores_the_rest() {
    let declared = names(&["a1", "a2"]);
    let allowed = names(&["q2"]);
    let args = args_map(json!({ "a1": "yes", "a2": 7, "extra": "ignored" }));

    let transition =
        Transition::new("q1", &declared, &args, &allowed).expect("args should bind");
    assert_eq!(transition.current(), "q1");
    assert_eq!(transition.arg("a1"), "yes");
    assert_eq!(transition.arg("a2").as_i64(), Some(7));
    assert!(transition.arg("extra").is_null());
    assert!(transition.arg("never_declared").is_null());
}

#[test]
fn missing_args_reported_in_declaration_order() {
    let declared = names(&["a1", "a2", "required_arg1", "required_arg2"]);
    let allowed = names(&["q2"]);
    let args = args_map(json!({ "a2": "value", "a1": "ok" }));

    let err = Transition::new("q1", &declared, &args, &allowed).unwrap_err();
    assert_eq!(
        err,
        TransitionError::MissingArgs {
            current: "q1".into(),
            missing: vec!["required_arg1".into(), "required_arg2".into()],
        }
    );
    assert_eq!(
        err.to_string(),
        "question 'q1' missing parameters: required_arg1, required_arg2"
    );
}

#[test]
fn null_argument_values_count_as_present() {
    let declared = names(&["answer"]);
    let allowed = names(&["q2"]);
    let args = args_map(json!({ "answer": null }));

    let transition =
        Transition::new("q1", &declared, &args, &allowed).expect("args should bind");
    assert!(transition.arg("answer").is_null());
}

#[test]
fn last_target_call_wins() {
    let declared = names(&["a1"]);
    let allowed = names(&["q2", "q3"]);
    let args = args_map(json!({ "a1": "ok" }));

    let next = Transition::new("q1", &declared, &args, &allowed)
        .expect("args should bind")
        .resolve(&|t: &mut Transition<'_>| {
            t.target("q2")?;
            t.target("q3")
        })
        .expect("decision should run");
    assert_eq!(next.as_deref(), Some("q3"));
}

#[test]
fn decision_without_target_yields_none() {
    let declared = names(&["a1"]);
    let allowed = names(&["q2"]);
    let args = args_map(json!({ "a1": "ok" }));

    let next = Transition::new("q1", &declared, &args, &allowed)
        .expect("args should bind")
        .resolve(&|_: &mut Transition<'_>| Ok(()))
        .expect("decision should run");
    assert!(next.is_none());
}

#[test]
fn empty_target_is_rejected() {
    let declared = names(&["a1"]);
    let allowed = names(&["q2"]);
    let args = args_map(json!({ "a1": "ok" }));

    let mut transition =
        Transition::new("q1", &declared, &args, &allowed).expect("args should bind");
    let err = transition.target("").unwrap_err();
    assert_eq!(err, TransitionError::EmptyTarget { current: "q1".into() });
    assert_eq!(
        err.to_string(),
        "question 'q1' has defined a target but it is empty"
    );
}

#[test]
fn self_target_is_rejected() {
    let declared = names(&["a1"]);
    let allowed = names(&["q1", "q2"]);
    let args = args_map(json!({ "a1": "ok" }));

    let mut transition =
        Transition::new("q1", &declared, &args, &allowed).expect("args should bind");
    let err = transition.target("q1").unwrap_err();
    assert_eq!(err, TransitionError::SelfTarget { current: "q1".into() });
}

#[test]
fn target_outside_declared_set_is_rejected() {
    let declared = names(&["a1"]);
    let allowed = names(&["q2", "q3"]);
    let args = args_map(json!({ "a1": "ok" }));

    let mut transition =
        Transition::new("q1", &declared, &args, &allowed).expect("args should bind");
    let err = transition.target("q4").unwrap_err();
    assert_eq!(
        err,
        TransitionError::TargetNotAllowed {
            current: "q1".into(),
            target: "q4".into(),
            allowed: vec!["q2".into(), "q3".into()],
        }
    );
    assert_eq!(
        err.to_string(),
        "question 'q1' target 'q4' is not in defined targets: [\"q2\", \"q3\"]"
    );
}

#[test]
fn any_target_allowed_when_none_declared() {
    let declared = names(&["a1"]);
    let allowed = names(&[]);
    let args = args_map(json!({ "a1": "ok" }));

    let next = Transition::new("q1", &declared, &args, &allowed)
        .expect("args should bind")
        .resolve(&|t: &mut Transition<'_>| t.target("anywhere"))
        .expect("decision should run");
    assert_eq!(next.as_deref(), Some("anywhere"));
}

#[test]
fn config_calls_inside_transitions_fail() {
    let declared = names(&["a1"]);
    let allowed = names(&["q2"]);
    let args = args_map(json!({ "a1": "ok" }));

    let mut transition =
        Transition::new("q1", &declared, &args, &allowed).expect("args should bind");

    let err = transition.effects(["flag1"]).unwrap_err();
    assert_eq!(
        err,
        TransitionError::ConfigCallInTransitions {
            operation: "effects"
        }
    );
    let err = transition.deps(["flag1"]).unwrap_err();
    assert_eq!(
        err,
        TransitionError::ConfigCallInTransitions { operation: "deps" }
    );
    let err = transition.args(["a2"]).unwrap_err();
    assert_eq!(
        err,
        TransitionError::ConfigCallInTransitions { operation: "args" }
    );
    let err = transition.targets(["q2"]).unwrap_err();
    assert_eq!(
        err,
        TransitionError::ConfigCallInTransitions {
            operation: "targets"
        }
    );
    assert_eq!(
        transition.args(["a2"]).unwrap_err().to_string(),
        "'args' should be called in the question definition, not inside transitions"
    );
}
