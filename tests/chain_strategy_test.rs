//! Integration tests for chain evaluation and execution strategies.
//!
//! Covers short-circuiting, error accumulation, and the optional-member
//! guard, observed through the public schema API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulechain::prelude::*;

struct Form {
    name: Option<String>,
    nickname: Option<String>,
    age: i64,
}

fn form(age: i64) -> Form {
    Form {
        name: Some("Ada".into()),
        nickname: None,
        age,
    }
}

/// Counts how many times it runs, then passes or fails as configured.
struct Counting {
    calls: Arc<AtomicUsize>,
    pass: bool,
}

impl Rule for Counting {
    type Input = i64;

    fn code(&self) -> &'static str {
        "counting"
    }

    fn check(&self, member: &str, _value: &i64) -> RuleCheck {
        self.calls.fetch_add(1, Ordering::SeqCst);
        RuleCheck::from_condition(self.pass, || {
            RuleCheck::fail("The field {0} failed.").with_arg(member)
        })
    }
}

fn counting_schema(
    calls: &Arc<AtomicUsize>,
    first_passes: bool,
    strategy: ExecutionStrategy,
) -> Schema<Form> {
    let first = Counting {
        calls: Arc::clone(calls),
        pass: first_passes,
    };
    let second = Counting {
        calls: Arc::clone(calls),
        pass: true,
    };
    Schema::builder()
        .member("Age", |m| {
            m.chain(
                |f: &Form| &f.age,
                |c| c.rule_with(first, strategy).rule(second),
            )
        })
        .build()
}

// ============================================================================
// SHORT-CIRCUITING
// ============================================================================

#[test]
fn validate_and_stop_skips_later_rules_after_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let schema = counting_schema(&calls, false, ExecutionStrategy::ValidateAndStop);

    let result = schema.validate(&form(30)).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(result.has_errors());
    assert_eq!(result.property("Age").unwrap().chains()[0].outcomes().len(), 1);
}

#[test]
fn validate_and_stop_continues_after_success() {
    let calls = Arc::new(AtomicUsize::new(0));
    let schema = counting_schema(&calls, true, ExecutionStrategy::ValidateAndStop);

    let result = schema.validate(&form(30)).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(result.is_valid());
}

#[test]
fn validate_and_continue_runs_every_rule() {
    let calls = Arc::new(AtomicUsize::new(0));
    let schema = counting_schema(&calls, false, ExecutionStrategy::ValidateAndContinue);

    let result = schema.validate(&form(30)).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let outcomes = result.property("Age").unwrap().chains()[0].outcomes();
    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].is_success());
    assert!(outcomes[1].is_success());
}

#[test]
fn stop_decision_belongs_to_the_rule_that_ran() {
    // A failing ValidateAndContinue rule before a ValidateAndStop rule must
    // not stop the chain: the stopper's strategy only applies to itself.
    let calls = Arc::new(AtomicUsize::new(0));
    let first = Counting {
        calls: Arc::clone(&calls),
        pass: false,
    };
    let second = Counting {
        calls: Arc::clone(&calls),
        pass: true,
    };
    let schema = Schema::builder()
        .member("Age", |m| {
            m.chain(
                |f: &Form| &f.age,
                |c| {
                    c.rule_with(first, ExecutionStrategy::ValidateAndContinue)
                        .rule_with(second, ExecutionStrategy::ValidateAndStop)
                },
            )
        })
        .build();

    schema.validate(&form(30)).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// OPTIONAL MEMBERS (SkipErrorAndStop)
// ============================================================================

fn nickname_schema() -> Schema<Form> {
    Schema::builder()
        .member("Nickname", |m| {
            m.chain(
                |f: &Form| &f.nickname,
                |c| c.optional_deref().rule(min_length(2)),
            )
        })
        .build()
}

#[test]
fn absent_optional_records_one_forced_success_and_stops() {
    let result = nickname_schema().validate(&form(30)).unwrap();

    assert!(result.is_valid());
    let outcomes = result.property("Nickname").unwrap().chains()[0].outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[0].code(), "optional");
}

#[test]
fn absent_optional_never_invokes_later_rules() {
    struct Wrapper {
        value: Option<i64>,
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Counting {
        calls: Arc::clone(&calls),
        pass: true,
    };
    let schema: Schema<Wrapper> = Schema::builder()
        .member("Value", |m| {
            m.chain(|w: &Wrapper| &w.value, move |c| c.optional().rule(counter))
        })
        .build();

    let result = schema.validate(&Wrapper { value: None }).unwrap();

    assert!(result.is_valid());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn present_optional_runs_the_remaining_rules() {
    let mut subject = form(30);
    subject.nickname = Some("x".into());

    let result = nickname_schema().validate(&subject).unwrap();

    assert!(result.has_errors_at(&["Nickname"]));
    let outcomes = result.property("Nickname").unwrap().chains()[0].outcomes();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[1].code(), "min_length");
}

// ============================================================================
// SCENARIOS FROM THE MESSAGE CONTRACT
// ============================================================================

#[test]
fn required_failure_formats_the_member_name() {
    let schema: Schema<Form> = Schema::builder()
        .member("Name", |m| {
            m.chain(|f: &Form| &f.name, |c| c.rule(required::<String>()))
        })
        .build();
    let subject = Form {
        name: None,
        nickname: None,
        age: 30,
    };

    let errors = schema.validate(&subject).unwrap().errors();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "The field Name cannot be null.");
    assert_eq!(errors[0].code, "not_null");
    assert_eq!(errors[0].rule, "Required");
}

#[rstest]
#[case(30, true)]
#[case(0, true)]
#[case(120, true)]
#[case(150, false)]
#[case(-1, false)]
fn age_range_scenarios(#[case] age: i64, #[case] valid: bool) {
    let schema: Schema<Form> = Schema::builder()
        .member("Age", |m| m.chain(|f: &Form| &f.age, |c| c.rule(in_range(0, 120))))
        .build();

    let result = schema.validate(&form(age)).unwrap();

    assert_eq!(result.is_valid(), valid);
    if !valid {
        assert_eq!(
            result.errors()[0].message,
            "The field Age must be within 0 and 120."
        );
    }
}

// ============================================================================
// EDGE CASES
// ============================================================================

#[test]
fn empty_chain_yields_a_valid_empty_chain_result() {
    let schema: Schema<Form> = Schema::builder()
        .member("Age", |m| m.chain(|f: &Form| &f.age, |c| c))
        .build();

    let result = schema.validate(&form(30)).unwrap();

    assert!(result.is_valid());
    let chains = result.property("Age").unwrap().chains();
    assert_eq!(chains.len(), 1);
    assert!(chains[0].outcomes().is_empty());
}

#[test]
fn misconfigured_rule_aborts_the_whole_call() {
    let schema: Schema<Form> = Schema::builder()
        .member("Age", |m| {
            // Inverted bounds are a registration bug, not a value failure.
            m.chain(|f: &Form| &f.age, |c| c.rule(in_range(120, 0)))
        })
        .build();

    let err = schema.validate(&form(30)).unwrap_err();
    assert!(matches!(err, EngineError::Misconfigured { rule: "InRange", .. }), "{err}");
}

#[test]
fn named_chains_record_independently() {
    let schema: Schema<Form> = Schema::builder()
        .member("Age", |m| {
            m.named_chain("bounds", |f: &Form| &f.age, |c| c.rule(in_range(0, 120)))
                .named_chain("positive", |f: &Form| &f.age, |c| c.rule(greater_than(0)))
        })
        .build();

    let result = schema.validate(&form(0)).unwrap();
    let property = result.property("Age").unwrap();

    assert!(!property.has_errors_in("bounds"));
    assert!(property.has_errors_in("positive"));
    assert_eq!(result.errors()[0].chain, "positive");
}

#[test]
fn successes_are_recorded_not_just_failures() {
    let schema: Schema<Form> = Schema::builder()
        .member("Age", |m| {
            m.chain(
                |f: &Form| &f.age,
                |c| {
                    c.rule_with(greater_than(0), ExecutionStrategy::ValidateAndContinue)
                        .rule_with(less_than(200), ExecutionStrategy::ValidateAndContinue)
                },
            )
        })
        .build();

    let result = schema.validate(&form(30)).unwrap();
    let outcomes = result.property("Age").unwrap().chains()[0].outcomes();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(RuleOutcome::is_success));
}
