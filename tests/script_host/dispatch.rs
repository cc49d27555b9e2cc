//! Nested command dispatch: argument marshalling and command outcomes.

use marisdb::{render_reply, ClientId, HostBindings};

use crate::common::{evaljs, new_host, TestValue};

#[test]
fn script_reads_back_what_it_wrote() {
    let mut host = new_host();
    host.engine_mut().enqueue(|engine, bindings| {
        bindings.call(
            engine,
            &[
                TestValue::str("SET"),
                TestValue::str("k"),
                TestValue::str("v"),
            ],
        )?;
        let got = bindings.call(engine, &[TestValue::str("GET"), TestValue::str("k")])?;
        assert_eq!(got, TestValue::str("v"));
        Ok(TestValue::Undefined)
    });

    host.eval_command(ClientId(1), &evaljs("set then get")).unwrap();
    assert_eq!(host.store().value(b"k"), Some(&b"v"[..]));
    assert_eq!(host.store().calls().len(), 2);
}

#[test]
fn number_arguments_reach_the_store_formatted() {
    let mut host = new_host();
    host.engine_mut().enqueue(|engine, bindings| {
        bindings.call(
            engine,
            &[
                TestValue::str("SET"),
                TestValue::str("int"),
                TestValue::Num(42.0),
            ],
        )?;
        bindings.call(
            engine,
            &[
                TestValue::str("SET"),
                TestValue::str("float"),
                TestValue::Num(2.5),
            ],
        )?;
        bindings.call(
            engine,
            &[
                TestValue::str("SET"),
                TestValue::str("big"),
                TestValue::Num(9007199254740992.0),
            ],
        )
    });

    host.eval_command(ClientId(1), &evaljs("set numbers")).unwrap();
    assert_eq!(host.store().value(b"int"), Some(&b"42"[..]));
    assert_eq!(host.store().value(b"float"), Some(&b"2.5"[..]));
    assert_eq!(host.store().value(b"big"), Some(&b"9007199254740992"[..]));
}

#[test]
fn unsupported_argument_kinds_abort_the_call() {
    let mut host = new_host();
    host.engine_mut().enqueue(|engine, bindings| {
        bindings.call(
            engine,
            &[
                TestValue::str("SET"),
                TestValue::Undefined,
                TestValue::str("v"),
            ],
        )
    });

    let err = host
        .eval_command(ClientId(1), &evaljs("bad arg"))
        .unwrap_err();
    assert_eq!(err.to_string(), "argv must be string or number");
    assert!(host.store().calls().is_empty());
}

#[test]
fn unknown_commands_surface_with_their_name() {
    let mut host = new_host();
    host.engine_mut()
        .enqueue(|engine, bindings| bindings.call(engine, &[TestValue::str("TYPO")]));

    let err = host.eval_command(ClientId(1), &evaljs("typo")).unwrap_err();
    assert_eq!(err.to_string(), "unknown command 'TYPO'");
}

#[test]
fn arity_failures_surface_with_the_command_name() {
    let mut host = new_host();
    host.engine_mut()
        .enqueue(|engine, bindings| bindings.call(engine, &[TestValue::str("GET")]));

    let err = host.eval_command(ClientId(1), &evaljs("get")).unwrap_err();
    assert_eq!(err.to_string(), "wrong number of arguments for 'get' command");
}

#[test]
fn binary_payloads_survive_the_round_trip() {
    let mut host = new_host();
    host.engine_mut().enqueue(|engine, bindings| {
        let payload = TestValue::Str(vec![0, 1, 2, b'\r', b'\n', 0xff]);
        let echoed = bindings.call(engine, &[TestValue::str("ECHO"), payload.clone()])?;
        assert_eq!(echoed, payload);
        Ok(TestValue::Undefined)
    });

    host.eval_command(ClientId(1), &evaljs("echo binary")).unwrap();
}

#[test]
fn successful_evaluations_render_ok() {
    let mut host = new_host();
    host.engine_mut()
        .enqueue(|_engine, _bindings| Ok(TestValue::Undefined));

    let outcome = host.eval_command(ClientId(1), &evaljs("no-op"));
    assert_eq!(render_reply(&outcome), b"+OK\r\n");
}

#[test]
fn eval_failures_render_as_error_lines() {
    let mut host = new_host();
    host.engine_mut()
        .enqueue_parse_error("SyntaxError: unexpected end of input");

    let outcome = host.eval_command(ClientId(1), &evaljs("syntax {"));
    assert_eq!(
        render_reply(&outcome),
        b"-SyntaxError: unexpected end of input\r\n"
    );
}
