//! Client cleanup: the pseudo-client carries nothing across calls or
//! evaluations, on success and on every failure path.

use marisdb::{ClientId, HostBindings};

use crate::common::{evaljs, new_host, MemoryStore, ScriptedEngine, ScriptHost, TestValue};

fn assert_clean(host: &ScriptHost<ScriptedEngine, MemoryStore>) {
    assert_eq!(host.client().argc(), 0);
    assert!(host.client().reply().is_empty());
    assert!(host.client().run().is_none());
    assert_eq!(host.engine().live_exports(), 0);
}

#[test]
fn client_is_clean_after_success() {
    let mut host = new_host();
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

    host.eval_command(ClientId(1), &evaljs("set")).unwrap();
    assert_clean(&host);
}

#[test]
fn client_is_clean_after_a_conversion_failure() {
    let mut host = new_host();
    host.engine_mut().enqueue(|engine, bindings| {
        bindings.call(
            engine,
            &[
                TestValue::str("SET"),
                TestValue::Array(vec![]),
                TestValue::str("v"),
            ],
        )
    });

    assert!(host.eval_command(ClientId(1), &evaljs("bad arg")).is_err());
    assert_clean(&host);
}

#[test]
fn client_is_clean_after_a_command_failure() {
    let mut host = new_host();
    host.engine_mut()
        .enqueue(|engine, bindings| bindings.call(engine, &[TestValue::str("TYPO")]));

    assert!(host.eval_command(ClientId(1), &evaljs("typo")).is_err());
    assert_clean(&host);
}

#[test]
fn cleanup_does_not_depend_on_the_script_failing() {
    let mut host = new_host();
    host.engine_mut().enqueue(|engine, bindings| {
        // The script catches the failed call and finishes normally.
        let _ = bindings.call(engine, &[TestValue::str("TYPO")]);
        Ok(TestValue::Undefined)
    });

    host.eval_command(ClientId(1), &evaljs("try/catch")).unwrap();
    assert_clean(&host);
}

#[test]
fn exports_never_leak_across_evaluations() {
    let mut host = new_host();
    for _ in 0..4 {
        host.engine_mut().enqueue(|engine, bindings| {
            bindings.call(
                engine,
                &[
                    TestValue::str("SET"),
                    TestValue::str("key with text"),
                    TestValue::Num(1.25),
                ],
            )?;
            let _ = bindings.call(engine, &[TestValue::str("TYPO")]);
            Ok(TestValue::Undefined)
        });
        host.eval_command(ClientId(1), &evaljs("mixed")).unwrap();
        assert_clean(&host);
    }
}
