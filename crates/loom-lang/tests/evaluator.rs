use loom_lang::{parse_module, EvalLimits, Interpreter, Value};

fn run(source: &str) -> Interpreter {
    let module = parse_module(source).expect("source should parse");
    let interpreter = Interpreter::new(EvalLimits::default());
    interpreter.run(&module).expect("source should evaluate");
    interpreter
}

fn var(interp: &Interpreter, name: &str) -> Value {
    interp.globals.get(name).unwrap_or_else(|| panic!("'{name}' was never bound"))
}

#[test]
fn arithmetic_precedence() {
    let interp = run("x = 2 + 3 * 4\n");
    assert_eq!(var(&interp, "x"), Value::Int(14));
}

#[test]
fn floor_division_and_modulo() {
    let interp = run("a = 7 // 2\nb = 7 % 2\n");
    assert_eq!(var(&interp, "a"), Value::Int(3));
    assert_eq!(var(&interp, "b"), Value::Int(1));
}

#[test]
fn integer_overflow_promotes_to_bigint() {
    let interp = run("x = 9223372036854775807 + 1\n");
    assert!(matches!(var(&interp, "x"), Value::BigInt(_)));
}

#[test]
fn integer_literal_wider_than_i64_parses_as_bigint() {
    let interp = run("x = 170141183460469231731687303715884105728\n");
    assert!(matches!(var(&interp, "x"), Value::BigInt(_)));
}

#[test]
fn string_concatenation_and_repetition() {
    let interp = run("a = 'ab' + 'cd'\nb = 'ab' * 3\n");
    assert_eq!(var(&interp, "a"), Value::str("abcd"));
    assert_eq!(var(&interp, "b"), Value::str("ababab"));
}

#[test]
fn list_mutation_is_shared_through_aliases() {
    let interp = run("a = [1, 2]\nb = a\nb.append(3)\n");
    assert_eq!(var(&interp, "a"), Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
}

#[test]
fn for_loop_over_list_accumulates() {
    let interp = run("total = 0\nfor x in [1, 2, 3]:\n    total += x\n");
    assert_eq!(var(&interp, "total"), Value::Int(6));
}

#[test]
fn for_else_runs_when_no_break() {
    let interp = run("hit = False\nfor x in [1, 2]:\n    pass\nelse:\n    hit = True\n");
    assert_eq!(var(&interp, "hit"), Value::Bool(true));
}

#[test]
fn for_else_skipped_on_break() {
    let interp = run("hit = False\nfor x in [1, 2]:\n    break\nelse:\n    hit = True\n");
    assert_eq!(var(&interp, "hit"), Value::Bool(false));
}

#[test]
fn while_loop_with_continue() {
    let interp = run(
        "n = 0\ntotal = 0\nwhile n < 5:\n    n += 1\n    if n % 2 == 0:\n        continue\n    total += n\n",
    );
    assert_eq!(var(&interp, "total"), Value::Int(9));
}

#[test]
fn closures_capture_defining_scope() {
    let source = "\
def make_counter():
    count = [0]
    def bump():
        count[0] += 1
        return count[0]
    return bump

bump = make_counter()
bump()
bump()
result = bump()
";
    let interp = run(source);
    assert_eq!(var(&interp, "result"), Value::Int(3));
}

#[test]
fn plain_assignment_inside_a_function_shadows_instead_of_mutating_outer_scope() {
    // spec.md §3: "Assignment always writes to the innermost scope." With no
    // `global`/`nonlocal` in this language, `x = 10` inside `shadow()` must
    // create a local `x` and leave the module-level `x` at `5`.
    let source = "\
x = 5

def shadow():
    x = 10
    return x

result = shadow()
";
    let interp = run(source);
    assert_eq!(var(&interp, "result"), Value::Int(10));
    assert_eq!(var(&interp, "x"), Value::Int(5));
}

#[test]
fn nested_closures_still_see_an_enclosing_functions_local_rebinding() {
    // Adapted from the original project's worked example
    // (tests/interpreted_test.py): `bar`'s local `x = 10` shadows the
    // module's `x = 5`, and the doubly-nested closure resolves `x` through
    // `bar`'s call scope, not the module globals.
    let source = "\
x = 5

def bar():
    x = 10

    def baz():
        def foo():
            return x
        return foo

    return baz

result = bar()()()
";
    let interp = run(source);
    assert_eq!(var(&interp, "result"), Value::Int(10));
    assert_eq!(var(&interp, "x"), Value::Int(5));
}

#[test]
fn decorators_apply_nearest_to_def_first() {
    let source = "\
order = []
def decorator_a(f):
    order.append('a')
    return f

def decorator_b(f):
    order.append('b')
    return f

@decorator_a
@decorator_b
def target():
    pass
";
    let interp = run(source);
    assert_eq!(var(&interp, "order"), Value::list(vec![Value::str("b"), Value::str("a")]));
}

#[test]
fn function_arity_mismatch_is_a_runtime_error() {
    let module = parse_module("def f(a, b):\n    return a + b\n\nf(1)\n").expect("should parse");
    let interpreter = Interpreter::new(EvalLimits::default());
    assert!(interpreter.run(&module).is_err());
}

#[test]
fn deep_recursion_hits_the_configured_limit() {
    let module = parse_module("def rec(n):\n    return rec(n + 1)\n\nrec(0)\n").expect("should parse");
    let interpreter = Interpreter::new(EvalLimits { max_call_depth: 50 });
    let err = interpreter.run(&module).unwrap_err();
    assert_eq!(err.kind, loom_lang::InterpreterErrorKind::Recursion);
}

#[test]
fn dict_and_tuple_literals() {
    let interp = run("d = {'a': 1, 'b': 2}\nt = (1, 2, 3)\n");
    let d = var(&interp, "d");
    assert!(matches!(d, Value::Dict(_)));
    assert_eq!(var(&interp, "t"), Value::Tuple(std::rc::Rc::new(vec![Value::Int(1), Value::Int(2), Value::Int(3)])));
}

#[test]
fn range_and_enumerate_builtins() {
    let interp = run("pairs = enumerate(range(3))\n");
    let pairs = var(&interp, "pairs");
    match pairs {
        Value::List(items) => assert_eq!(items.borrow().len(), 3),
        other => panic!("expected a list, got {other:?}"),
    }
}

#[test]
fn byte_string_indexing_yields_int() {
    let interp = run("x = b'abc'[0]\n");
    assert_eq!(var(&interp, "x"), Value::Int(97));
}

#[test]
fn escape_decoding_handles_unicode_forms() {
    let interp = run("x = '\\x41'\ny = '\\u2603'\nz = '\\U0001F643'\n");
    assert_eq!(var(&interp, "x"), Value::str("A"));
    assert_eq!(var(&interp, "y"), Value::str("\u{2603}"));
    assert_eq!(var(&interp, "z"), Value::str("\u{1F643}"));
}

#[test]
fn deque_supports_integer_subscripting() {
    let interp = run("x = deque()\nx.append(1)\nx.append(2)\nfirst = x[0]\nx[1] = 9\n");
    assert_eq!(var(&interp, "first"), Value::Int(1));
    let updated = var(&interp, "x");
    match updated {
        Value::Deque(items) => assert_eq!(items.borrow()[1], Value::Int(9)),
        other => panic!("expected a deque, got {other:?}"),
    }
}

#[test]
fn relational_comparisons_are_lexicographic_on_bytes_and_sequences() {
    let interp = run(
        "a = b'a' < b'b'\nb = [1, 2] < [1, 3]\nc = (1, 2) < (1, 2, 0)\nd = [1, 2, 3] < [1, 2]\n",
    );
    assert_eq!(var(&interp, "a"), Value::Bool(true));
    assert_eq!(var(&interp, "b"), Value::Bool(true));
    assert_eq!(var(&interp, "c"), Value::Bool(true));
    assert_eq!(var(&interp, "d"), Value::Bool(false));
}
