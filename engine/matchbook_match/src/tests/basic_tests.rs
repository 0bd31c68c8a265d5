//! Chain evaluation basics: literals, ordering, policies, markers.

use crate::{caseof, head, tail, wildcard, CaseError, Pattern, TypePattern};
use matchbook_value::{FunctionValue, MatchErrorKind, MatchResult, Value};
use pretty_assertions::assert_eq;

#[test]
fn literal_match() -> Result<(), CaseError> {
    assert_eq!(
        caseof(3).case(3, true)?.force(),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        caseof(3).case(wildcard(), true)?.force(),
        Ok(Value::Bool(true))
    );
    Ok(())
}

#[test]
fn first_match_wins_in_declaration_order() -> Result<(), CaseError> {
    let result = caseof(3)
        .case(1, false)?
        .case(2, false)?
        .case(3, true)?
        .force();
    assert_eq!(result, Ok(Value::Bool(true)));
    Ok(())
}

#[test]
fn sequence_literal_arity_is_exact() -> Result<(), CaseError> {
    let result = caseof(Value::list(vec![Value::int(1), Value::int(2)]))
        .case(vec![Pattern::from(1)], false)?
        .case(vec![Pattern::from(1), Pattern::from(2)], true)?
        .force();
    assert_eq!(result, Ok(Value::Bool(true)));
    Ok(())
}

#[test]
fn float_literals_match_exactly() -> Result<(), CaseError> {
    // Nearby but distinct floats are different values, not a match
    let result = caseof(Value::float(1e-20))
        .case(Pattern::literal(Value::float(5e-17)), true)?
        .non_strict()
        .force();
    assert_eq!(result, Ok(Value::Bool(false)));

    let result = caseof(Value::float(1e-20))
        .case(Pattern::literal(Value::float(1e-20)), true)?
        .force();
    assert_eq!(result, Ok(Value::Bool(true)));
    Ok(())
}

#[test]
fn nil_matches_nil() -> Result<(), CaseError> {
    let result = caseof(Value::Nil)
        .case(Value::Nil, "none")?
        .case(wildcard(), "else")?
        .force();
    assert_eq!(result, Ok(Value::string("none")));
    Ok(())
}

#[test]
fn literal_matching_is_equality_not_identity() -> Result<(), CaseError> {
    let a = Value::string("x".repeat(1_000_000));
    let b = Value::string("x".repeat(1_000_000));
    assert_eq!(caseof(a).case(b, true)?.force(), Ok(Value::Bool(true)));
    Ok(())
}

fn list_len(list: &Value) -> MatchResult {
    caseof(list.clone())
        .case(Vec::new(), 0)
        .and_then(|chain| {
            chain.case(
                vec![head(), tail()],
                FunctionValue::new("succ", |args: &[Value]| {
                    let rest_len = list_len(&args[1])?;
                    Ok(Value::int(rest_len.as_int().unwrap_or(0) + 1))
                }),
            )
        })
        .map_err(|e| matchbook_value::MatchError::new(e.to_string()))?
        .force()
}

#[test]
fn head_tail_recursion_computes_length() {
    let cases = [
        (Value::list(vec![]), 0),
        (Value::list(vec![Value::int(1)]), 1),
        (
            Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]),
            3,
        ),
    ];
    for (list, expected) in cases {
        assert_eq!(list_len(&list), Ok(Value::int(expected)));
    }
}

#[test]
fn tail_of_singleton_is_empty_list() -> Result<(), CaseError> {
    let result = caseof(Value::list(vec![Value::int(1)]))
        .case(
            vec![head(), tail()],
            FunctionValue::new("pair", |args: &[Value]| {
                Ok(Value::tuple(args.to_vec()))
            }),
        )?
        .force();
    assert_eq!(
        result,
        Ok(Value::tuple(vec![Value::int(1), Value::list(vec![])]))
    );
    Ok(())
}

#[test]
fn strict_exhaustion_is_an_error() -> Result<(), CaseError> {
    let result = caseof(3).case(2, true)?.force();
    let err = result.unwrap_err();
    assert!(matches!(err.kind, MatchErrorKind::NoCaseMatched { .. }));
    assert!(err.message.contains('3'));
    Ok(())
}

#[test]
fn non_strict_exhaustion_returns_false() -> Result<(), CaseError> {
    let result = caseof(3).non_strict().case(2, true)?.force();
    assert_eq!(result, Ok(Value::Bool(false)));
    Ok(())
}

#[test]
fn default_is_returned_verbatim() -> Result<(), CaseError> {
    assert_eq!(
        caseof(3).with_default(false).case(2, true)?.force(),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        caseof(3).with_default(6).case(2, true)?.force(),
        Ok(Value::int(6))
    );
    // A callable default is still never invoked
    let never = Value::function("never", |_: &[Value]| Ok(Value::Nil));
    assert_eq!(
        caseof(3).with_default(never.clone()).case(2, true)?.force(),
        Ok(never)
    );
    Ok(())
}

#[test]
fn captures_become_action_arguments() -> Result<(), CaseError> {
    let subject = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
    let first_arg = FunctionValue::new("first", |args: &[Value]| Ok(args[0].clone()));

    // One wildcard capture: the action sees just that element
    let result = caseof(subject.clone())
        .case(
            vec![Pattern::from(1), wildcard(), Pattern::from(3)],
            first_arg.clone(),
        )?
        .force();
    assert_eq!(result, Ok(Value::int(2)));

    // No captures: the action sees the whole subject
    let result = caseof(subject.clone())
        .case(
            vec![Pattern::from(1), Pattern::from(2), Pattern::from(3)],
            first_arg,
        )?
        .force();
    assert_eq!(result, Ok(subject));
    Ok(())
}

#[test]
fn action_can_be_an_empty_list() -> Result<(), CaseError> {
    let result = caseof(true).case(true, Value::list(vec![]))?.force();
    assert_eq!(result, Ok(Value::list(vec![])));
    Ok(())
}

#[test]
fn failing_action_is_wrapped_with_its_name() -> Result<(), CaseError> {
    let broken = FunctionValue::new("describe", |_: &[Value]| {
        Err(matchbook_value::MatchError::new("xxxxx missing argument"))
    });
    let result = caseof(Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]))
        .case(vec![Pattern::from(1), wildcard(), Pattern::from(3)], broken)?
        .force();
    let err = result.unwrap_err();
    assert!(err.message.contains("lambda"));
    assert!(err.message.contains("describe"));
    assert!(err.message.contains("xxxxx"));
    Ok(())
}

#[test]
fn type_patterns_honor_the_record_parent_chain() -> Result<(), CaseError> {
    use matchbook_value::{RecordType, RecordValue};

    let pet = RecordType::new("Pet", vec![]);
    let dog = RecordType::with_parent("Dog", vec![], &pet);
    let cat = RecordType::with_parent("Cat", vec![], &pet);
    let hamster = RecordType::with_parent("Hamster", vec![], &pet);

    let what_is = |value: Value| -> MatchResult {
        caseof(value)
            .case(TypePattern::Record(dog.clone()), "dog")
            .and_then(|c| c.case(TypePattern::Record(cat.clone()), "cat"))
            .and_then(|c| c.case(TypePattern::Record(pet.clone()), "any other pet"))
            .and_then(|c| c.case(wildcard(), "this is not a pet at all"))
            .map_err(|e| matchbook_value::MatchError::new(e.to_string()))?
            .force()
    };

    let instance = |ty: &std::sync::Arc<RecordType>| {
        Value::Record(RecordValue::new(ty, vec![]).unwrap())
    };

    assert_eq!(what_is(instance(&cat)), Ok(Value::string("cat")));
    assert_eq!(what_is(instance(&dog)), Ok(Value::string("dog")));
    assert_eq!(
        what_is(instance(&hamster)),
        Ok(Value::string("any other pet"))
    );
    assert_eq!(what_is(instance(&pet)), Ok(Value::string("any other pet")));
    assert_eq!(
        what_is(Value::Bool(true)),
        Ok(Value::string("this is not a pet at all"))
    );
    Ok(())
}

#[test]
fn regex_groups_extract_left_to_right() -> Result<(), CaseError> {
    let what_is = |pet: &str| -> MatchResult {
        let named = |prefix: &'static str| {
            FunctionValue::new("named", move |args: &[Value]| {
                Ok(Value::string(format!(
                    "{prefix} {}",
                    args[0].as_str().unwrap_or("")
                )))
            })
        };
        caseof(pet)
            .case(Pattern::regex(r"(\w+)-(\w+)-cat$").unwrap(), named("cat"))
            .and_then(|c| c.case(Pattern::regex(r"(\w+)-(\w+)-dog$").unwrap(), named("dog")))
            .and_then(|c| c.case(wildcard(), "something else"))
            .map_err(|e| matchbook_value::MatchError::new(e.to_string()))?
            .force()
    };

    assert_eq!(what_is("fuffy-my-dog"), Ok(Value::string("dog fuffy")));
    assert_eq!(what_is("puffy-her-dog"), Ok(Value::string("dog puffy")));
    assert_eq!(what_is("carla-your-cat"), Ok(Value::string("cat carla")));
    assert_eq!(
        what_is("roger-my-hamster"),
        Ok(Value::string("something else"))
    );
    Ok(())
}

#[test]
fn groupless_regex_hands_the_action_the_subject() -> Result<(), CaseError> {
    let result = caseof("my-fuffy-cat")
        .case(
            Pattern::regex(r"fuffy-cat$").unwrap(),
            FunctionValue::new("tag", |_: &[Value]| Ok(Value::string("fuffy-cat"))),
        )?
        .case(wildcard(), "something else")?
        .force();
    assert_eq!(result, Ok(Value::string("fuffy-cat")));
    Ok(())
}

#[test]
fn regex_never_matches_non_strings() -> Result<(), CaseError> {
    let result = caseof(3)
        .case(Pattern::regex(r"\d+").unwrap(), "digits")?
        .case(wildcard(), "not text")?
        .force();
    assert_eq!(result, Ok(Value::string("not text")));
    Ok(())
}

#[test]
fn type_pattern_sequences() -> Result<(), CaseError> {
    let f = |value: Value| -> MatchResult {
        caseof(value)
            .case(
                vec![TypePattern::Int.into(), TypePattern::Int.into()],
                "[int, int]",
            )
            .and_then(|c| {
                c.case(
                    vec![TypePattern::Int.into(), TypePattern::Str.into()],
                    "[int, str]",
                )
            })
            .and_then(|c| {
                c.case(
                    vec![
                        TypePattern::Int.into(),
                        vec![TypePattern::Int.into(), TypePattern::Str.into()].into(),
                        TypePattern::Int.into(),
                    ],
                    "[int, [int, str], int]",
                )
            })
            .and_then(|c| c.case(wildcard(), "other"))
            .map_err(|e| matchbook_value::MatchError::new(e.to_string()))?
            .force()
    };

    assert_eq!(
        f(Value::list(vec![Value::int(1), Value::int(1)])),
        Ok(Value::string("[int, int]"))
    );
    assert_eq!(
        f(Value::list(vec![Value::int(1), Value::string("1")])),
        Ok(Value::string("[int, str]"))
    );
    assert_eq!(
        f(Value::list(vec![
            Value::int(1),
            Value::list(vec![Value::int(1), Value::string("a")]),
            Value::int(2),
        ])),
        Ok(Value::string("[int, [int, str], int]"))
    );
    assert_eq!(
        f(Value::list(vec![
            Value::int(1),
            Value::list(vec![Value::int(1), Value::string("a"), Value::string("c")]),
            Value::int(2),
        ])),
        Ok(Value::string("other"))
    );
    assert_eq!(f(Value::int(1)), Ok(Value::string("other")));
    Ok(())
}

#[test]
fn sequence_patterns_are_kind_agnostic() -> Result<(), CaseError> {
    // The same pattern matches both the list and the tuple rendition
    let pattern = || vec![Pattern::from(1), Pattern::from(2)];
    assert_eq!(
        caseof(Value::list(vec![Value::int(1), Value::int(2)]))
            .case(pattern(), true)?
            .force(),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        caseof(Value::tuple(vec![Value::int(1), Value::int(2)]))
            .case(pattern(), true)?
            .force(),
        Ok(Value::Bool(true))
    );
    Ok(())
}

// Marker placement is validated when the case is built

#[test]
fn head_must_come_first() {
    let err = caseof(Value::list(vec![]))
        .case(vec![Pattern::from(1), head()], true)
        .unwrap_err();
    assert_eq!(err, CaseError::HeadNotFirst { position: 1 });
}

#[test]
fn tail_must_come_last() {
    let err = caseof(Value::list(vec![]))
        .case(vec![tail(), Pattern::from(1)], true)
        .unwrap_err();
    assert_eq!(
        err,
        CaseError::MarkerNotLast {
            marker: "tail",
            position: 0
        }
    );
}

#[test]
fn markers_may_not_repeat() {
    let err = caseof(Value::list(vec![]))
        .case(vec![head(), tail(), tail()], true)
        .unwrap_err();
    assert_eq!(err, CaseError::DuplicateMarker { marker: "tail" });
}

#[test]
fn markers_are_rejected_outside_sequences() {
    let err = caseof(3).case(tail(), true).unwrap_err();
    assert_eq!(err, CaseError::MarkerOutsideSequence { marker: "tail" });

    // Nested positions are checked too
    let err = caseof(3)
        .case(Pattern::map(vec![(head(), wildcard())]), true)
        .unwrap_err();
    assert_eq!(err, CaseError::MarkerOutsideSequence { marker: "head" });
}
