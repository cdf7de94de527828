// ABOUTME: End-to-end tests driving the parser and evaluator together

use slisp::builtins::register_builtins;
use slisp::env::Environment;
use slisp::eval::{apply_lambda, evaluate};
use slisp::parser::parse_forms;
use slisp::value::{Symbol, Value};
use std::io::Write;
use std::rc::Rc;

fn setup() -> Rc<Environment> {
    let env = Environment::new();
    register_builtins(&env);
    env
}

/// Evaluates every form in `src` and returns each printed result, the way
/// the REPL would show them.
fn results(env: &Rc<Environment>, src: &str) -> Vec<String> {
    parse_forms(src)
        .expect("parse failed")
        .into_iter()
        .map(|form| match evaluate(env, form) {
            Ok(value) => value.to_string(),
            Err(e) => format!("Error: {}", e),
        })
        .collect()
}

/// Printed result of the last form in `src`.
fn printed(env: &Rc<Environment>, src: &str) -> String {
    results(env, src).pop().expect("no forms in input")
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_addition() {
    let env = setup();
    assert_eq!(printed(&env, "(+ 1 2 3)"), "6");
}

#[test]
fn test_def_then_use() {
    let env = setup();
    assert_eq!(results(&env, "(def {x} 10) (+ x x)"), vec!["()", "20"]);
}

#[test]
fn test_head() {
    let env = setup();
    assert_eq!(printed(&env, "(head {1 2 3})"), "{1}");
}

#[test]
fn test_eval_unquotes() {
    let env = setup();
    assert_eq!(printed(&env, "(eval {+ 1 2})"), "3");
}

#[test]
fn test_immediate_lambda_call() {
    let env = setup();
    assert_eq!(printed(&env, r"((\ {x y} {+ x y}) 3 4)"), "7");
}

#[test]
fn test_variadic_lambda() {
    let env = setup();
    assert_eq!(
        results(
            &env,
            r"(def {add-mul} (\ {x & ys} {+ x (eval (join {*} ys))})) (add-mul 10 2 3 4)"
        ),
        vec!["()", "34"]
    );
}

#[test]
fn test_if_picks_then_branch() {
    let env = setup();
    assert_eq!(printed(&env, "(if (< 2 3) {+ 10 20} {+ 100 200})"), "30");
}

#[test]
fn test_division_by_zero() {
    let env = setup();
    assert_eq!(printed(&env, "(/ 10 0)"), "Error: Division by zero");
}

#[test]
fn test_structural_equality() {
    let env = setup();
    assert_eq!(printed(&env, "(eq {1 2 3} {1 2 3})"), "true");
    assert_eq!(printed(&env, "(eq 1 1.0)"), "false");
    assert_eq!(printed(&env, "(neq 1 2)"), "true");
    assert_eq!(printed(&env, "(eq 1 1 1 2)"), "false");
}

// ============================================================================
// Quantified properties
// ============================================================================

#[test]
fn test_qexpr_inertness() {
    let env = setup();
    assert_eq!(printed(&env, "(head {(+ 1 2)})"), "{(+ 1 2)}");
    assert_eq!(printed(&env, "(tail {(+ 1 2)})"), "{}");
}

#[test]
fn test_reduce_once() {
    let env = setup();
    for src in ["(+ 1 2)", "{a b}", "(list 1 2)", r"(\ {x} {x})", "true"] {
        let once = evaluate(&env, parse_forms(src).unwrap().remove(0)).unwrap();
        let twice = evaluate(&env, once.clone()).unwrap();
        assert_eq!(once, twice, "evaluation not idempotent for {}", src);
    }
}

#[test]
fn test_quote_round_trip() {
    let env = setup();
    // eval of a packed list equals direct reduction of the same cells.
    assert_eq!(
        printed(&env, "(eval (list + 1 2))"),
        printed(&env, "(+ 1 2)")
    );
    assert_eq!(
        printed(&env, "(eval (list head {3 4}))"),
        printed(&env, "(head {3 4})")
    );
}

#[test]
fn test_numeric_folds() {
    let env = setup();
    assert_eq!(printed(&env, "(+ 1 2 3 4 5)"), "15");
    assert_eq!(printed(&env, "(- 10 1 2)"), "7");
    assert_eq!(printed(&env, "(* 2 3 4)"), "24");
    assert_eq!(printed(&env, "(/ 100 5 2)"), "10");
    // Integer division truncates.
    assert_eq!(printed(&env, "(/ 7 2)"), "3");
    // Unary negation.
    assert_eq!(printed(&env, "(- 5)"), "-5");
    assert_eq!(printed(&env, "(- 2.5)"), "-2.5");
    // Double variant folds.
    assert_eq!(printed(&env, "(+ 1.5 2.5)"), "4");
}

#[test]
fn test_partial_application_law() {
    let env = setup();
    results(&env, r"(def {add3} (\ {x y z} {+ x y z}))");
    let direct = printed(&env, "(add3 1 2 3)");
    assert_eq!(printed(&env, "((add3 1) 2 3)"), direct);
    assert_eq!(printed(&env, "((add3 1 2) 3)"), direct);
    assert_eq!(printed(&env, "(((add3 1) 2) 3)"), direct);
}

#[test]
fn test_root_def_from_nested_scope() {
    let env = setup();
    results(&env, r"((\ {x} {def {captured} (* x 2)}) 21)");
    assert_eq!(printed(&env, "captured"), "42");
}

#[test]
fn test_closure_independence() {
    let env = setup();
    let partial = evaluate(
        &env,
        parse_forms(r"((\ {x y} {+ x y}) 1)").unwrap().remove(0),
    )
    .unwrap();

    let Value::Lambda(mut original) = partial else {
        panic!("expected a lambda");
    };
    let copy = original.clone();

    // Mutating the original's captured environment leaves the copy alone.
    original
        .captured
        .insert(Symbol::from("x"), Value::Integer(999));

    let from_original = apply_lambda(*original, &env, vec![Value::Integer(1)]).unwrap();
    let from_copy = apply_lambda(*copy, &env, vec![Value::Integer(1)]).unwrap();
    assert_eq!(from_original, Value::Integer(1000));
    assert_eq!(from_copy, Value::Integer(2));
}

// ============================================================================
// Error contracts
// ============================================================================

#[test]
fn test_lookup_failure_message() {
    let env = setup();
    assert_eq!(printed(&env, "(+ 1 ghost)"), "Error: ghost not found");
}

#[test]
fn test_mixed_numeric_arguments_error() {
    let env = setup();
    assert_eq!(
        printed(&env, "(+ 1 2.0)"),
        "Error: +: expected an integer, got a double at argument 2"
    );
    assert_eq!(
        printed(&env, "(< 1 2.0)"),
        "Error: <: expected an integer, got a double at argument 2"
    );
}

#[test]
fn test_quote_primitive_contracts() {
    let env = setup();
    assert!(printed(&env, "(head {})").starts_with("Error: head"));
    assert!(printed(&env, "(tail {})").starts_with("Error: tail"));
    assert!(printed(&env, "(head (list))").starts_with("Error: head"));
    assert!(printed(&env, "(head 1)").starts_with("Error: head"));
    assert!(printed(&env, "(join {1} 2)").starts_with("Error: join"));
    assert!(printed(&env, "(eval 1)").starts_with("Error: eval"));
    assert!(printed(&env, "(head {1} {2})").starts_with("Error: head"));
}

#[test]
fn test_if_contracts() {
    let env = setup();
    assert!(printed(&env, "(if 1 {2} {3})").starts_with("Error: if"));
    assert!(printed(&env, "(if true 2 {3})").starts_with("Error: if"));
    // The unchosen branch is never inspected, so a bare atom there is fine.
    assert_eq!(printed(&env, "(if true {2} 3)"), "2");
}

#[test]
fn test_def_contracts() {
    let env = setup();
    assert!(printed(&env, "(def {} 1)").starts_with("Error: def"));
    assert!(printed(&env, "(def {a b} 1)").starts_with("Error: def"));
    assert!(printed(&env, "(def {1} 2)").starts_with("Error: def"));
    assert!(printed(&env, "(def 1 2)").starts_with("Error: def"));
}

#[test]
fn test_lambda_contracts() {
    let env = setup();
    assert!(printed(&env, r"(\ {1} {x})").starts_with("Error: \\"));
    assert!(printed(&env, r"(\ {x & y z} {x})").starts_with("Error: \\"));
    assert!(printed(&env, r"(\ {x &} {x})").starts_with("Error: \\"));
    assert!(printed(&env, r"(\ {&} {1})").starts_with("Error: \\"));
    assert!(printed(&env, r"(\ {x} 1)").starts_with("Error: \\"));
}

#[test]
fn test_user_error_absorbs_reduction() {
    let env = setup();
    assert_eq!(
        printed(&env, r#"(+ 1 (error "custom failure"))"#),
        "Error: custom failure"
    );
    assert_eq!(
        printed(&env, r#"(error "standalone")"#),
        "Error: standalone"
    );
}

#[test]
fn test_show_reduces_to_unit() {
    let env = setup();
    assert_eq!(printed(&env, "(show {1 (+ 2 3)})"), "()");
    assert_eq!(printed(&env, "(show 1 2)"), "()");
}

#[test]
fn test_double_division_follows_ieee754() {
    let env = setup();
    assert_eq!(printed(&env, "(/ 1.0 0.0)"), "inf");
    assert_eq!(printed(&env, "(/ -1.0 0.0)"), "-inf");
}

// ============================================================================
// load
// ============================================================================

#[test]
fn test_load_defines_and_continues_past_errors() {
    let env = setup();
    let mut script = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(script, "(def {{from-file}} 41)").expect("write");
    writeln!(script, "(/ 1 0)").expect("write");
    writeln!(script, "(def {{after-error}} 1)").expect("write");
    script.flush().expect("flush");

    let form = format!(r#"(load "{}")"#, script.path().display());
    assert_eq!(printed(&env, &form), "()");

    // Both defs ran even though the middle form failed.
    assert_eq!(printed(&env, "(+ from-file after-error)"), "42");
}

#[test]
fn test_load_contracts() {
    let env = setup();
    assert!(printed(&env, "(load 1)").starts_with("Error: load"));
    assert!(printed(&env, r#"(load "no-such-file.slisp")"#).starts_with("Error: load"));
}
