use std::{
    cell::{Cell, RefCell},
    fs, io,
    path::Path,
    rc::Rc,
};

use pretty_assertions::assert_eq;
use sprig::{
    Session,
    config::Config,
    error::{Error, ParseError, RuntimeError},
    interpreter::value::{core::Value, types::ValueType},
};
use walkdir::WalkDir;

#[test]
fn scripts_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "sp"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = expected_output(path);

        count += 1;
        let (result, output) = run_capturing(Config::default(), &source);
        if let Err(e) = result {
            panic!("Script {path:?} failed:\n{source}\nError: {e}");
        }
        assert_eq!(output, expected, "output of {path:?}");
    }

    assert!(count > 0, "No scripts found in scripts/");
}

fn expected_output(script: &Path) -> String {
    let path = script.with_extension("out");
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn run_capturing(config: Config, src: &str) -> (Result<Value, Error>, String) {
    let sink = Rc::new(RefCell::new(Vec::new()));
    let mut session = Session::with_output(config, Rc::clone(&sink));
    let result = session.run(src);
    let output = String::from_utf8(sink.borrow().clone()).expect("cout writes UTF-8");
    (result, output)
}

fn assert_success(src: &str) -> Value {
    match run_capturing(Config::default(), src).0 {
        Ok(value) => value,
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn output_of(src: &str) -> String {
    let (result, output) = run_capturing(Config::default(), src);
    if let Err(e) = result {
        panic!("Script failed: {e}");
    }
    output
}

fn runtime_error(src: &str) -> RuntimeError {
    match run_capturing(Config::default(), src).0 {
        Err(Error::Runtime(e)) => e,
        other => panic!("Expected a runtime error, got {other:?}"),
    }
}

fn parse_error(src: &str) -> ParseError {
    match run_capturing(Config::default(), src).0 {
        Err(Error::Parse(e)) => e,
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn check_type_accepts_only_the_exact_tag() {
    let values = [Value::None,
                  Value::Int(1),
                  Value::Float(1.0),
                  Value::Bool(true),
                  Value::from("s"),
                  Value::from(vec![Value::Int(1)])];
    let tags = [ValueType::None,
                ValueType::Int,
                ValueType::Float,
                ValueType::Bool,
                ValueType::String,
                ValueType::Array];

    for value in &values {
        for tag in tags {
            let result = value.check_type(tag, 1);
            if tag == value.value_type() {
                assert!(result.is_ok(), "{value:?} should satisfy {tag}");
            } else {
                assert_eq!(result,
                           Err(RuntimeError::TypeMismatch { expected: tag,
                                                            found:    value.value_type(),
                                                            line:     1, }));
            }
        }
    }
}

#[test]
fn arithmetic_demotes_integral_results() {
    assert_eq!(assert_success("2 * 1.5;"), Value::Int(3));
    assert_eq!(assert_success("1.5 + 1.5;"), Value::Int(3));
    assert_eq!(assert_success("7 - 0.5;"), Value::Float(6.5));
    assert_eq!(assert_success("3 + 4;"), Value::Int(7));
}

#[test]
fn division_always_yields_float() {
    assert_eq!(assert_success("10 / 2;"), Value::Float(5.0));
    assert_eq!(assert_success("1 / 4;"), Value::Float(0.25));
    assert_eq!(output_of("cout(10 / 2);"), "5.000000\n");
}

#[test]
fn operators_fold_left_to_right() {
    assert_eq!(assert_success("2 + 3 * 4;"), Value::Int(20));
    assert_eq!(assert_success("2 + (3 * 4);"), Value::Int(14));
    assert_eq!(assert_success("10 - 2 - 3;"), Value::Int(5));
}

#[test]
fn large_integers_stay_usable() {
    assert_eq!(assert_success("x = 9007199254740993; x == x;"), Value::Bool(true));
    assert_eq!(assert_success("9007199254740993 > 9007199254740992;"), Value::Bool(true));
    assert_eq!(assert_success("9007199254740993 + 0;"), Value::Int(9_007_199_254_740_992));
}

#[test]
fn minus_after_an_operand_is_subtraction() {
    assert_eq!(assert_success("x = 5; x-1;"), Value::Int(4));
    assert_eq!(assert_success("(4)-1;"), Value::Int(3));
    assert_eq!(assert_success("-3 + 1;"), Value::Int(-2));
    assert_eq!(assert_success("x = -2.5; x;"), Value::Float(-2.5));
}

#[test]
fn comparisons_and_logic() {
    assert_eq!(assert_success("1 < 2;"), Value::Bool(true));
    assert_eq!(assert_success("2.0 == 2;"), Value::Bool(true));
    assert_eq!(assert_success("3 >= 4;"), Value::Bool(false));
    assert_eq!(assert_success("true && false;"), Value::Bool(false));
    assert_eq!(assert_success("true || false;"), Value::Bool(true));
    assert_eq!(assert_success("true != false;"), Value::Bool(true));
    assert_eq!(assert_success("'abc' == \"abc\";"), Value::Bool(true));
    assert_eq!(assert_success("'a' + 'b';"), Value::from("ab"));
}

#[test]
fn unsupported_operand_pairs_fail() {
    assert_eq!(runtime_error("'a' - 'b';"),
               RuntimeError::UnsupportedOperator { op:    "-".to_string(),
                                                   left:  ValueType::String,
                                                   right: ValueType::String,
                                                   line:  1, });
    assert!(matches!(runtime_error("1 + 'a';"), RuntimeError::UnsupportedOperator { .. }));
    assert!(matches!(runtime_error("[1] + [2];"), RuntimeError::UnsupportedOperator { .. }));
    assert!(matches!(runtime_error("1 < 2 && 'a';"), RuntimeError::UnsupportedOperator { .. }));
}

#[test]
fn reassignment_keeps_the_type_of_the_binding() {
    assert_eq!(assert_success("x = 1; x = 2; x;"), Value::Int(2));
    assert_eq!(runtime_error("x = 1;\nx = 'one';"),
               RuntimeError::TypeMismatch { expected: ValueType::Int,
                                            found:    ValueType::String,
                                            line:     2, });
    assert!(matches!(runtime_error("x = 1; x = 1.0;"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn assignment_is_an_expression() {
    assert_eq!(assert_success("a = b = 3; a + b;"), Value::Int(6));
}

#[test]
fn blocks_update_enclosing_bindings() {
    let output = output_of("x = 1;\nif (true) (x = x + 1; y = 'inner'; cout(x, y);)\ncout(x);");
    assert_eq!(output, "2inner\n2\n");

    assert!(matches!(runtime_error("x = 1; if (true) (x = 'text';)"),
                     RuntimeError::TypeMismatch { .. }));
}

#[test]
fn block_definitions_do_not_leak() {
    assert!(matches!(runtime_error("if (true) (y = 1;) y;"),
                     RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn loop_bodies_accumulate() {
    assert_eq!(assert_success("s = 0; for (i = 0; 4) (s = s + i;) s;"), Value::Int(6));

    let src = "fn sum(n: num) num (t = 0; for (i = 1; n + 1) { t = t + i; } return t;)\nsum(10);";
    assert_eq!(assert_success(src), Value::Int(55));
}

#[test]
fn condition_loop_counts_down() {
    assert_eq!(output_of("n = 3; for (n > 0) (cout(n); n = n - 1;)"), "3\n2\n1\n");
    assert_eq!(assert_success("n = 3; for (n > 0) (n = n - 1;) n;"), Value::Int(0));
}

#[test]
fn parameters_can_be_updated_in_nested_blocks() {
    assert_eq!(assert_success("fn f(n: num) (if (true) (n = n + 1;) return n;) f(1);"),
               Value::Int(2));
}

#[test]
fn callee_cannot_overwrite_caller_bindings() {
    let src = "fn f() (x = 'callee'; return x;)\nx = 1;\ncout(f());\nx;";
    let (result, output) = run_capturing(Config::default(), src);

    assert_eq!(result.unwrap(), Value::Int(1));
    assert_eq!(output, "callee\n");
}

#[test]
fn undefined_variable_reports_its_line() {
    assert_eq!(runtime_error("x = 1;\n\ncout(y);"),
               RuntimeError::UndefinedVariable { name: "y".to_string(),
                                                 line: 3, });
}

#[test]
fn if_without_match_is_none() {
    assert_eq!(assert_success("if (false) (1;)"), Value::None);
    assert_eq!(assert_success("if (1) (2;)"), Value::Int(2));
    assert_eq!(assert_success("if ('') (2;)"), Value::None);
    assert_eq!(assert_success("if ([0]) { 3; }"), Value::Int(3));
}

#[test]
fn counting_loop_runs_body_until_limit() {
    let src = "i = 0; for(i = 0; 5) { cout(i); }";
    assert_eq!(output_of(src), "0\n1\n2\n3\n4\n");
    assert_eq!(assert_success(&format!("{src} i;")), Value::Int(5));

    let parens = "i = 0; for(i = 0; 5) (cout(i);) i;";
    assert_eq!(assert_success(parens), Value::Int(5));
}

#[test]
fn counting_loop_ignores_writes_to_the_variable() {
    assert_eq!(output_of("for (i = 0; 3) (i = 10; cout(i);)"), "10\n10\n10\n");
}

#[test]
fn counting_loop_reevaluates_its_limit() {
    let mut session = Session::with_output(Config::default(), Rc::new(RefCell::new(io::sink())));
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    session.register_native("limit", move |_, _| {
               counter.set(counter.get() + 1);
               Ok(Value::Int(3))
           });

    session.run("for (i = 0; limit()) ()").unwrap();

    assert_eq!(calls.get(), 4);
}

#[test]
fn counting_loop_with_float_variable() {
    assert_eq!(output_of("for (x = 0.5; 2) (cout(x);)"), "0.500000\n1.500000\n");
}

#[test]
fn malformed_counting_loops_fail() {
    assert!(matches!(runtime_error("for (1; 3) ()"), RuntimeError::MalformedLoop { .. }));
    assert!(matches!(runtime_error("for (i = 'a'; 3) ()"),
                     RuntimeError::InvalidLoopBounds { .. }));
    assert!(matches!(runtime_error("for (i = 0; true) ()"),
                     RuntimeError::InvalidLoopBounds { .. }));
}

#[test]
fn condition_loop_checks_before_every_iteration() {
    assert_eq!(output_of("for (false) (cout('never');)"), "");

    let sink = Rc::new(RefCell::new(Vec::new()));
    let mut session = Session::with_output(Config::default(), Rc::clone(&sink));
    let ticks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&ticks);
    session.register_native("more", move |_, _| {
               counter.set(counter.get() + 1);
               Ok(Value::Bool(counter.get() <= 3))
           });

    session.run("for (more()) (cout('tick');)").unwrap();

    assert_eq!(ticks.get(), 4);
    assert_eq!(String::from_utf8(sink.borrow().clone()).unwrap(), "tick\ntick\ntick\n");
}

#[test]
fn return_leaves_loops_inside_functions() {
    let src = "fn find() num (for (true) (return 7;)) find();";
    assert_eq!(assert_success(src), Value::Int(7));
}

#[test]
fn recursive_factorial() {
    let src = "fn fact(n: num) (if (n <= 1) (return 1;) return n*fact(n-1);)\nfact(5);";
    assert_eq!(assert_success(src), Value::Int(120));
}

#[test]
fn array_literal_display() {
    assert_eq!(assert_success("[1,2,3];").to_string(), "[1, 2, 3]");
    assert_eq!(output_of("cout([1, 'two', [3.5]], []);"), "[1, two, [3.500000]][]\n");
}

#[test]
fn cout_concatenates_its_arguments() {
    assert_eq!(output_of("cout('a', 1, true);"), "a1true\n");
    assert_eq!(output_of("cout();"), "\n");
    assert_eq!(assert_success("cout('x');"), Value::None);
}

#[test]
fn unknown_function_fails() {
    assert_eq!(runtime_error("nope(1);"),
               RuntimeError::UnknownFunction { name: "nope".to_string(),
                                               line: 1, });
}

#[test]
fn arity_is_checked_before_arguments() {
    let src = "fn f(a: num) (return a;)\nf('wrong', undefined);";
    assert_eq!(runtime_error(src),
               RuntimeError::ArityMismatch { name:     "f".to_string(),
                                             expected: 1,
                                             found:    2,
                                             line:     2, });
}

#[test]
fn parameters_are_type_checked() {
    assert_eq!(runtime_error("fn half(x: flo) (return x / 2;) half(3);"),
               RuntimeError::TypeMismatch { expected: ValueType::Float,
                                            found:    ValueType::Int,
                                            line:     1, });
    assert_eq!(assert_success("fn half(x: flo) (return x / 2;) half(3.0);"),
               Value::Float(1.5));
}

#[test]
fn explicit_return_is_type_checked() {
    assert_eq!(runtime_error("fn f() num (return 'text';) f();"),
               RuntimeError::TypeMismatch { expected: ValueType::Int,
                                            found:    ValueType::String,
                                            line:     1, });
}

#[test]
fn implicit_result_skips_return_type_check() {
    assert_eq!(assert_success("fn f() num ('text';) f();"), Value::from("text"));
    assert_eq!(assert_success("fn g() num () g();"), Value::None);
}

#[test]
fn arguments_are_evaluated_in_the_caller_scope() {
    let src = "fn f(a: num, b: num) (return b;)\na = 10;\nf(1, a);";
    assert_eq!(assert_success(src), Value::Int(10));
}

#[test]
fn callee_sees_caller_bindings() {
    let src = "fn outer() (inner_value = 4; return inner();)\nfn inner() (return inner_value;)\nouter();";
    assert_eq!(assert_success(src), Value::Int(4));
}

#[test]
fn duplicate_parameter_names_fail() {
    assert!(matches!(runtime_error("fn f(a: num, a: num) (return a;) f(1, 2);"),
                     RuntimeError::AlreadyDefined { .. }));
}

#[test]
fn later_declaration_replaces_earlier() {
    assert_eq!(assert_success("fn f() (return 1;) fn f() (return 2;) f();"),
               Value::Int(2));
}

#[test]
fn natives_take_priority_over_declarations() {
    let mut session = Session::with_output(Config::default(), Rc::new(RefCell::new(io::sink())));
    session.register_native("answer", |args, _| Ok(Value::Int(40 + i64::try_from(args.len()).unwrap())));

    let value = session.run("fn answer() (return 0;) answer(1, 2);").unwrap();

    assert_eq!(value, Value::Int(42));
}

#[test]
fn return_outside_function_fails() {
    assert_eq!(runtime_error("x = 1;\nreturn x;"),
               RuntimeError::ReturnOutsideFunction { line: 2 });
    assert!(matches!(runtime_error("if (true) (return 1;)"),
                     RuntimeError::ReturnOutsideFunction { .. }));
}

#[test]
fn recursion_is_bounded() {
    let src = "fn forever(n: num) (return forever(n + 1);) forever(0);";
    let (result, _) = run_capturing(Config::default().with_max_call_depth(16), src);

    match result {
        Err(Error::Runtime(RuntimeError::RecursionLimit { name, limit, .. })) => {
            assert_eq!(name, "forever");
            assert_eq!(limit, 16);
        },
        other => panic!("Expected a recursion limit error, got {other:?}"),
    }
}

/// Runs `src` on a thread with a 2 MiB stack and returns the display form
/// of its result.
fn run_on_small_stack(config: Config, src: String) -> Result<String, String> {
    std::thread::Builder::new().stack_size(2 * 1024 * 1024)
                               .spawn(move || {
                                   run_capturing(config, &src).0
                                                              .map(|value| value.to_string())
                                                              .map_err(|e| e.to_string())
                               })
                               .unwrap()
                               .join()
                               .unwrap()
}

const COUNT_DOWN: &str = "fn down(n: num) num (if (n <= 0) (return 0;) return down(n - 1) + 1;)\n";

#[test]
fn recursion_below_the_limit_survives_a_small_stack() {
    let depth = Config::default().max_call_depth - 1;
    let result = run_on_small_stack(Config::default(), format!("{COUNT_DOWN}down({depth});"));

    assert_eq!(result, Ok(depth.to_string()));
}

#[test]
fn deep_recursion_with_raised_limit_survives_a_small_stack() {
    let config = Config::default().with_max_call_depth(10_000);
    let result = run_on_small_stack(config, format!("{COUNT_DOWN}down(5000);"));

    assert_eq!(result, Ok("5000".to_string()));
}

#[test]
fn deeply_nested_parentheses_survive_a_small_stack() {
    let depth = 20_000;
    let src = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(run_on_small_stack(Config::default(), src), Ok("1".to_string()));
}

#[test]
fn scopes_are_restored_after_errors() {
    let mut session = Session::with_output(Config::default(), Rc::new(RefCell::new(io::sink())));

    assert!(session.run("fn f() (if (true) (return missing;)) f();").is_err());
    assert_eq!(session.evaluator().scopes().depth(), 1);

    assert!(session.run("for (i = 0; 3) (undefined;)").is_err());
    assert_eq!(session.evaluator().scopes().depth(), 1);
}

#[test]
fn session_keeps_state_between_runs() {
    let sink = Rc::new(RefCell::new(Vec::new()));
    let mut session = Session::with_output(Config::default(), Rc::clone(&sink));

    session.run("total = 5; fn add(a: num, b: num) num (return a + b;)").unwrap();
    let value = session.run("add(total, 2);").unwrap();

    assert_eq!(value, Value::Int(7));
    assert!(session.evaluator().functions().is_defined("add"));
}

#[test]
fn parse_errors_prevent_any_output() {
    let (result, output) = run_capturing(Config::default(), "cout('hi');\nx = ;");

    assert!(matches!(result, Err(Error::Parse(ParseError::UnexpectedToken { line: 2, .. }))));
    assert_eq!(output, "");
}

#[test]
fn trailing_comma_in_parameters_fails() {
    assert_eq!(parse_error("fn f(a: num,) (return a;)"),
               ParseError::TrailingComma { line:   1,
                                           column: 13, });
}

#[test]
fn missing_semicolon_fails() {
    assert!(matches!(parse_error("x = 1"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("x = 1 y = 2;"), ParseError::UnexpectedToken { .. }));
}

#[test]
fn unterminated_block_fails() {
    assert!(matches!(parse_error("if (true) (cout(1);"),
                     ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("if (true) (cout(1);}"), ParseError::UnexpectedToken { .. }));
}

#[test]
fn oversized_integer_literal_fails() {
    assert!(matches!(parse_error("x = 99999999999999999999;"),
                     ParseError::LiteralTooLarge { .. }));
}

#[test]
fn empty_program_is_none() {
    assert_eq!(assert_success(""), Value::None);
    assert_eq!(assert_success("# only a comment\n"), Value::None);
}

struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn output_failures_are_runtime_errors() {
    let mut session = Session::with_output(Config::default(), Rc::new(RefCell::new(BrokenPipe)));

    match session.run("\ncout('hi');") {
        Err(Error::Runtime(RuntimeError::Output { line, .. })) => assert_eq!(line, 2),
        other => panic!("Expected an output error, got {other:?}"),
    }
}
