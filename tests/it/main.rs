
use expect_test::Expect;
use flagterp::Interpreter;

fn check(interpreter: &Interpreter, args: &str, expect: Expect) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let args = args.split_ascii_whitespace().collect::<Vec<_>>();
    match interpreter.interpret(args) {
        Ok(res) => expect.assert_debug_eq(&res),
        Err(err) => expect.assert_eq(&err.to_string()),
    }
}
