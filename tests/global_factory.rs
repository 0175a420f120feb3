//! Integration tests for the process-wide factory.
//!
//! NOTE: All tests use #[serial] because they share the same global factory.

use named_registry::{constructor, global_factory, Constructor, Object, RegistryError};
use serial_test::serial;
use std::error::Error as _;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct Connection {
    url: String,
}

fn connection() -> Constructor<Object> {
    constructor(|args: &[Object]| {
        let url = args
            .first()
            .and_then(|arg| arg.downcast_ref::<&str>())
            .copied()
            .unwrap_or("memory://");
        Ok(Some(Arc::new(Connection {
            url: url.to_string(),
        }) as Object))
    })
}

fn refusing() -> Constructor<Object> {
    constructor(|_: &[Object]| Err("connection refused".into()))
}

fn empty() -> Constructor<Object> {
    constructor(|_: &[Object]| Ok(None))
}

#[test]
#[serial]
fn test_create() {
    global_factory::remove_all();
    global_factory::add("connection", connection()).unwrap();

    let object: Arc<Connection> = global_factory::create_as("connection", &[]).unwrap();

    assert_eq!(object.url, "memory://");
}

#[test]
#[serial]
fn test_create_with_arguments() {
    global_factory::remove_all();
    global_factory::add("connection", connection()).unwrap();

    let object: Arc<Connection> =
        global_factory::create_as("connection", &[Arc::new("tcp://db") as Object]).unwrap();

    assert_eq!(object.url, "tcp://db");
}

#[test]
#[serial]
fn test_create_no_exist() {
    global_factory::remove_all();

    let err = global_factory::create("connection", &[]).unwrap_err();

    assert!(matches!(err, RegistryError::NotRegistered { .. }));
}

#[test]
#[serial]
fn test_create_error() {
    global_factory::remove_all();
    global_factory::add("refusing", refusing()).unwrap();

    let err = global_factory::create("refusing", &[]).unwrap_err();

    assert!(matches!(err, RegistryError::CreationFailed { ref name, .. } if name == "refusing"));
    assert_eq!(err.source().unwrap().to_string(), "connection refused");
}

#[test]
#[serial]
fn test_create_nil() {
    global_factory::remove_all();
    global_factory::add("empty", empty()).unwrap();

    let err = global_factory::create("empty", &[]).unwrap_err();

    assert!(matches!(err, RegistryError::ObjectNotCreated { ref name } if name == "empty"));
}

#[test]
#[serial]
fn test_creates() {
    global_factory::remove_all();
    global_factory::adds([("a", connection()), ("b", connection()), ("c", connection())])
        .unwrap();

    let (objects, result) = global_factory::creates(["c", "a"], &[]);

    assert!(result.is_ok());
    assert_eq!(objects.len(), 2);
}

#[test]
#[serial]
fn test_creates_error() {
    global_factory::remove_all();
    global_factory::adds([("good", connection()), ("bad", refusing())]).unwrap();

    let (objects, result) = global_factory::creates(["good", "bad"], &[]);

    assert_eq!(objects.len(), 1);
    assert!(objects[0].downcast_ref::<Connection>().is_some());
    assert!(matches!(result, Err(RegistryError::Aggregate(ref aggregate)) if aggregate.len() == 1));
}

#[test]
#[serial]
fn test_add_error() {
    global_factory::remove_all();

    let err = global_factory::add("connection", None::<Constructor<Object>>).unwrap_err();

    assert!(matches!(err, RegistryError::InvalidConstructor { .. }));
    assert!(global_factory::is_empty());
}

#[test]
#[serial]
fn test_adds_error() {
    global_factory::remove_all();

    let result = global_factory::adds([
        ("a", Some(connection())),
        ("b", None),
        ("c", Some(connection())),
    ]);

    assert!(result.is_err());
    assert_eq!(global_factory::size(), 2);
}

#[test]
#[serial]
fn test_set() {
    global_factory::remove_all();
    global_factory::set("connection", refusing()).unwrap();
    global_factory::set("connection", connection()).unwrap();

    assert_eq!(global_factory::size(), 1);
    assert!(global_factory::create("connection", &[]).is_ok());
}

#[test]
#[serial]
fn test_sets() {
    global_factory::remove_all();

    global_factory::sets([("a", connection()), ("b", connection())]).unwrap();

    assert!(global_factory::is_exists(["a", "b"]));
    assert!(global_factory::sets([("c", None::<Constructor<Object>>)]).is_err());
    assert_eq!(global_factory::size(), 2);
}

#[test]
#[serial]
fn test_get_and_gets() {
    global_factory::remove_all();
    global_factory::add("connection", connection()).unwrap();

    let ctor = global_factory::get("connection").unwrap();
    assert!(ctor(&[]).unwrap().is_some());

    let (constructors, result) = global_factory::gets(["connection", "missing"]);
    assert_eq!(constructors.len(), 1);
    assert!(result.is_err());
    assert_eq!(global_factory::get_all().len(), 1);
}

#[test]
#[serial]
fn test_remove_and_removes() {
    global_factory::remove_all();
    global_factory::adds([("a", connection()), ("b", connection()), ("c", connection())])
        .unwrap();

    global_factory::remove("missing");
    assert_eq!(global_factory::size(), 3);

    global_factory::remove("a");
    global_factory::removes(["b"]);

    assert!(!global_factory::is_exist("a"));
    assert!(!global_factory::is_exist("b"));
    assert!(global_factory::is_exist("c"));
}

#[test]
#[serial]
fn test_remove_all() {
    global_factory::add("connection", connection()).ok();

    global_factory::remove_all();

    assert!(global_factory::is_empty());
    assert_eq!(global_factory::size(), 0);
}
