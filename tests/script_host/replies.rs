//! Reply collection and conversion: inline buffer, overflow blocks, and
//! the reply-to-value mapping.

use marisdb::{ClientId, HostBindings};

use crate::common::{evaljs, new_host, small_reply_host, TestValue};

#[test]
fn replies_larger_than_the_inline_buffer_arrive_intact() {
    let mut host = small_reply_host(8);
    host.engine_mut().enqueue(|engine, bindings| {
        let payload = TestValue::Str(vec![b'x'; 100]);
        let echoed = bindings.call(engine, &[TestValue::str("ECHO"), payload.clone()])?;
        assert_eq!(echoed, payload);
        Ok(TestValue::Undefined)
    });

    host.eval_command(ClientId(1), &evaljs("echo big")).unwrap();
    assert!(host.client().reply().is_empty());
}

#[test]
fn block_order_is_first_in_first_out() {
    let mut host = small_reply_host(4);
    host.store_mut().insert(b"k1", b"ab");
    host.store_mut().insert(b"k2", b"cd");
    host.engine_mut().enqueue(|engine, bindings| {
        let got = bindings.call(
            engine,
            &[
                TestValue::str("MGET"),
                TestValue::str("k1"),
                TestValue::str("k2"),
            ],
        )?;
        assert_eq!(
            got,
            TestValue::Array(vec![TestValue::str("ab"), TestValue::str("cd")])
        );
        Ok(TestValue::Undefined)
    });

    host.eval_command(ClientId(1), &evaljs("mget")).unwrap();
}

#[test]
fn null_replies_become_undefined() {
    let mut host = new_host();
    host.engine_mut().enqueue(|engine, bindings| {
        let got = bindings.call(engine, &[TestValue::str("GET"), TestValue::str("missing")])?;
        assert_eq!(got, TestValue::Undefined);
        Ok(TestValue::Undefined)
    });

    host.eval_command(ClientId(1), &evaljs("get missing")).unwrap();
}

#[test]
fn integer_replies_become_numbers() {
    let mut host = new_host();
    host.store_mut().insert(b"k1", b"v");
    host.engine_mut().enqueue(|engine, bindings| {
        let got = bindings.call(
            engine,
            &[
                TestValue::str("DEL"),
                TestValue::str("k1"),
                TestValue::str("k2"),
            ],
        )?;
        assert_eq!(got, TestValue::Num(1.0));
        Ok(TestValue::Undefined)
    });

    host.eval_command(ClientId(1), &evaljs("del")).unwrap();
}

#[test]
fn simple_string_replies_become_strings() {
    let mut host = new_host();
    host.engine_mut().enqueue(|engine, bindings| {
        let got = bindings.call(engine, &[TestValue::str("PING")])?;
        assert_eq!(got, TestValue::str("PONG"));
        Ok(TestValue::Undefined)
    });

    host.eval_command(ClientId(1), &evaljs("ping")).unwrap();
}

#[test]
fn error_replies_surface_as_eval_errors() {
    let mut host = new_host();
    host.store_mut().force_error_reply("READONLY write rejected");
    host.engine_mut().enqueue(|engine, bindings| {
        bindings.call(
            engine,
            &[
                TestValue::str("SET"),
                TestValue::str("k"),
                TestValue::str("v"),
            ],
        )
    });

    let err = host.eval_command(ClientId(1), &evaljs("set")).unwrap_err();
    assert_eq!(err.to_string(), "READONLY write rejected");
}
