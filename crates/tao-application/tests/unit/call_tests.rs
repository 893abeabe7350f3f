//! Tests for deferred invocations

use std::sync::Arc;
use std::sync::atomic::Ordering;

use serde_json::json;
use tao_application::call::{BoundTarget, Call};
use tao_application::factory::ObjectFactory;
use tao_domain::error::Error;
use tao_domain::ports::{Component, Invoke};

use crate::fixtures::TICKS;

#[test]
fn test_bound_and_call_time_arguments_concatenate() {
    let mut factory = ObjectFactory::default();
    let mut call = factory.call("Fixture.Math", "add", Vec::new());
    call.update_args([json!(2)]);

    assert_eq!(call.invoke(&[json!(3), json!(4)]).unwrap(), json!(9));
    assert_eq!(call.args(), &[json!(2)]);
}

#[test]
fn test_cache_memoises_per_argument_list() {
    let mut factory = ObjectFactory::default();
    let mut call = factory.call("Fixture.Math", "tick", Vec::new());
    call.with_cache(true);

    let start = TICKS.load(Ordering::SeqCst);
    let first = call.invoke(&[json!(1)]).unwrap();
    assert_eq!(call.invoke(&[json!(1)]).unwrap(), first);
    assert_eq!(TICKS.load(Ordering::SeqCst), start + 1);

    call.invoke(&[json!(2)]).unwrap();
    assert_eq!(TICKS.load(Ordering::SeqCst), start + 2);

    call.with_cache(false);
    call.invoke(&[json!(1)]).unwrap();
    assert_eq!(TICKS.load(Ordering::SeqCst), start + 3);
}

#[test]
fn test_text_round_trip() {
    let mut factory = ObjectFactory::default();
    let call = factory.call("Fixture.Math", "add", vec![json!(2), json!(3)]);
    let text = call.to_text();
    assert_eq!(text, "Core.Call|Fixture::Math|add|2+3|");

    let mut decoded = Call::from_text(&mut factory, &text).unwrap().unwrap();
    assert_eq!(decoded.method(), "add");
    assert_eq!(decoded.args(), &[json!(2), json!(3)]);
    assert_eq!(decoded.invoke(&[]).unwrap(), json!(5));
}

#[test]
fn test_named_target_is_bound_at_construction() {
    let mut factory = ObjectFactory::default();
    factory.register_override("Fixture.Shape", "Fixture.Shape.Circle");

    let call = factory.call("Fixture.Shape", "area", Vec::new());
    match call.target() {
        BoundTarget::Static { implementation, .. } => {
            assert_eq!(implementation.to_string(), "Fixture::Shape");
        }
        BoundTarget::Instance(_) => panic!("expected a static target"),
    }
}

#[test]
fn test_instance_target() {
    let mut factory = ObjectFactory::default();
    let circle: Arc<dyn Component> = factory
        .build_shared("Fixture.Shape.Circle", &[json!(2.0)])
        .unwrap();

    let mut call = factory.call(Arc::clone(&circle), "scaled", Vec::new());
    assert_eq!(Invoke::invoke(&mut call, &[json!(3.0)]).unwrap(), json!(6.0));
    assert_eq!(call.to_text(), "Core.Call|Fixture::Shape::Circle|scaled||");

    let mut missing = factory.call(circle, "perimeter", Vec::new());
    let err = missing.invoke(&[]).unwrap_err();
    assert!(matches!(err, Error::ObjectAccess(_)));
}
