//! Entry-point validation: arity, numkeys parsing, and script encoding.
//!
//! Every failure here aborts before any script runs; the exact reply
//! text is part of the command's contract.

use marisdb::{render_reply, ClientId, Error, HostBindings, StoreArg};

use crate::common::{argv, evaljs, new_host, TestValue};

#[test]
fn wrong_arity_is_rejected() {
    let mut host = new_host();
    for short in [&["EVALJS"][..], &["EVALJS", "x"][..]] {
        let err = host.eval_command(ClientId(1), &argv(short)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "wrong number of arguments for 'evaljs' command"
        );
    }
}

#[test]
fn numkeys_must_be_an_integer() {
    let mut host = new_host();
    for bad in ["abc", "1.5", ""] {
        let err = host
            .eval_command(ClientId(1), &argv(&["EVALJS", "x", bad]))
            .unwrap_err();
        assert_eq!(err.to_string(), "value is not an integer or out of range");
    }
}

#[test]
fn numkeys_cannot_exceed_remaining_args() {
    let mut host = new_host();
    let err = host
        .eval_command(ClientId(1), &argv(&["EVALJS", "x", "3", "k1", "k2"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Number of keys can't be greater than number of args"
    );
}

#[test]
fn numkeys_cannot_be_negative() {
    let mut host = new_host();
    let err = host
        .eval_command(ClientId(1), &argv(&["EVALJS", "x", "-1"]))
        .unwrap_err();
    assert_eq!(err.to_string(), "Number of keys can't be negative");
}

#[test]
fn script_must_be_utf8() {
    let mut host = new_host();
    let argv = vec![
        StoreArg::from("EVALJS"),
        StoreArg::from_bytes(&[0xff, 0xfe, 0xfd]),
        StoreArg::from("0"),
    ];
    let err = host.eval_command(ClientId(1), &argv).unwrap_err();
    assert!(matches!(err, Error::ScriptNotUtf8));
}

#[test]
fn validation_failures_render_as_error_lines() {
    let mut host = new_host();
    let outcome = host.eval_command(ClientId(1), &argv(&["EVALJS", "x", "-1"]));
    assert_eq!(
        render_reply(&outcome),
        b"-Number of keys can't be negative\r\n"
    );
}

#[test]
fn validation_failure_precedes_evaluation() {
    let mut host = new_host();
    host.engine_mut()
        .enqueue(|engine, bindings| bindings.call(engine, &[TestValue::str("PING")]));

    // Bad numkeys: the queued program must not run.
    assert!(host
        .eval_command(ClientId(1), &argv(&["EVALJS", "x", "-1"]))
        .is_err());
    assert!(host.store().calls().is_empty());

    // The program is still queued; a valid invocation runs it.
    host.eval_command(ClientId(1), &evaljs("maris.call('PING')"))
        .unwrap();
    assert_eq!(host.store().calls().len(), 1);
}

#[test]
fn declared_keys_are_validated_but_not_executed() {
    let mut host = new_host();
    host.engine_mut()
        .enqueue(|_engine, _bindings| Ok(TestValue::Undefined));

    host.eval_command(
        ClientId(1),
        &argv(&["EVALJS", "x", "2", "k1", "k2", "extra"]),
    )
    .unwrap();
    // Keys route the invocation; they never become store commands.
    assert!(host.store().calls().is_empty());
}
