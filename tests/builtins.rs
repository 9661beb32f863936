use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use wtfscript::builtins::NativeFn;
use wtfscript::{Interpreter, Value};

/// Output sink the test keeps a handle to after the interpreter takes it
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(source: &str) -> (Interpreter, String) {
    let buffer = SharedBuffer::default();
    let mut interp = Interpreter::with_output(None, Box::new(buffer.clone()));
    interp.run(source).unwrap();
    (interp, buffer.contents())
}

#[test]
fn test_print() {
    let (_, out) = capture(
        r#"
        int x = 5;
        print("x is", x);
        print(true, 1.5, "tab\there");
        "#,
    );
    assert_eq!(out, "x is 5\ntrue 1.500000 tab\there\n");
}

#[test]
fn test_print_unofloat_and_uint() {
    let (_, out) = capture("unofloat p = 0.25; uint u = 7; print(p, u);");
    assert_eq!(out, "0.250000 7\n");
}

#[test]
fn test_print_without_arguments_does_not_abort() {
    let (interp, out) = capture("print(); int after = 1; print(after);");
    assert_eq!(out, "1\n");
    assert_eq!(interp.variable("after").unwrap().value, Value::Int(1));
}

#[test]
fn test_print_returns_nil() {
    let buffer = SharedBuffer::default();
    let mut interp = Interpreter::with_output(None, Box::new(buffer.clone()));
    assert_eq!(interp.run("print(\"hi\")").unwrap(), Value::Nil);
    assert_eq!(buffer.contents(), "hi\n");
}

#[test]
fn test_seed_makes_output_reproducible() {
    let source = "seed(7); string s; int(1, 1000) n; float f; print(s, n, f);";
    let (_, first) = capture(source);
    let (_, second) = capture(source);
    assert_eq!(first, second);

    let (_, other) = capture("seed(8); string s; int(1, 1000) n; float f; print(s, n, f);");
    assert_ne!(first, other);
}

#[test]
fn test_seed_accepts_uint_and_rejects_strings() {
    let (_, first) = capture("uint k = 99; seed(k); int(0, 1000000) n; print(n);");
    let (_, second) = capture("seed(99); int(0, 1000000) n; print(n);");
    assert_eq!(first, second);

    let (interp, _) = capture("seed(\"nope\"); int ok = 1;");
    assert_eq!(interp.variable("ok").unwrap().value, Value::Int(1));
}

#[test]
fn test_seed_wrong_arity_yields_nil() {
    let buffer = SharedBuffer::default();
    let mut interp = Interpreter::with_output(None, Box::new(buffer));
    assert_eq!(interp.run("seed(1, 2)").unwrap(), Value::Nil);
}

#[test]
fn test_typeof() {
    let (_, out) = capture(
        r#"
        int i = 1; uint u = 1; float f = 1.0; unofloat p = 0.5; bool b = true; string s = "s";
        print(typeof(i), typeof(u), typeof(f), typeof(p), typeof(b), typeof(s));
        "#,
    );
    assert_eq!(out, "int uint float unofloat bool string\n");

    let mut interp = Interpreter::with_output(None, Box::new(io::sink()));
    assert_eq!(interp.run("typeof(print(\"x\"))").unwrap(), Value::from("nil"));
    assert_eq!(interp.run("typeof(1 + 2.5)").unwrap(), Value::from("int"));
}

#[test]
fn test_register_custom_builtin() {
    let buffer = SharedBuffer::default();
    let mut interp = Interpreter::with_output(None, Box::new(buffer.clone()));
    interp.register(NativeFn::new("double", Some(1), |_host, args| match &args[0] {
        Value::Int(n) => Ok(Value::Int(n * 2)),
        other => Err(format!("double expects an int, got {}", other.type_name())),
    }));

    interp.run("int x = double(21); print(x);").unwrap();
    assert_eq!(buffer.contents(), "42\n");
    assert_eq!(interp.run("double(\"a\")").unwrap(), Value::Nil);
}

#[test]
fn test_builtin_reading_host_config() {
    let mut interp = Interpreter::with_output(None, Box::new(io::sink()));
    interp.register(NativeFn::new("token", Some(0), |host, _args| {
        let charset = host.config().charset.clone();
        Ok(Value::String(host.random_string(4, &charset)))
    }));

    match interp.run("token()").unwrap() {
        Value::String(s) => {
            assert_eq!(s.chars().count(), 4);
            assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        }
        other => panic!("expected string, got {:?}", other),
    }
}

#[test]
fn test_assignment_value_runs_before_target_check() {
    let buffer = SharedBuffer::default();
    let mut interp = Interpreter::with_output(None, Box::new(buffer.clone()));
    assert!(interp.run("undeclared = print(\"side effect\");").is_err());
    assert_eq!(buffer.contents(), "side effect\n");
}
