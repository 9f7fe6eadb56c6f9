//! Property-based tests for the access policy.
//!
//! Each case builds a table at runtime for a single key in one of the policies (read-only, write-only, read-write,
//! plain field, unknown) and checks how `get` / `set` / `has` / `delete` resolve against it.

use std::collections::HashMap;

use proptest::prelude::*;
use virtprop::prelude::*;
use virtprop::{Access, Direction, ErrorKind};

#[derive(Debug, Default, Clone, PartialEq)]
struct Bag {
    values: HashMap<String, Value>,
    writes: Vec<(String, Value)>,
}

impl ClassInfo for Bag {
    fn class_name() -> &'static str {
        "Bag"
    }
}

impl Accessors for Bag {
    fn register_accessors(_table: &mut PropertyTable<Self>) {}
}

#[derive(Debug, Clone, Copy)]
enum Policy {
    ReadOnly,
    WriteOnly,
    ReadWrite,
    Field,
    Unknown,
}

fn proxy_for(key: &str, policy: Policy, initial: Value) -> Proxy<Bag> {
    let mut bag = Bag::default();
    bag.values.insert(key.to_string(), initial);

    let mut table = PropertyTable::new();
    let read_key = key.to_string();
    let write_key = key.to_string();
    let getter = move |b: &Bag| b.values.get(&read_key).cloned().unwrap_or_default();
    let setter = move |b: &mut Bag, v: Value| {
        b.writes.push((write_key.clone(), v.clone()));
        b.values.insert(write_key.clone(), v);
    };

    match policy {
        Policy::ReadOnly => table.define_getter(key, getter),
        Policy::WriteOnly => table.define_setter(key, setter),
        Policy::ReadWrite => {
            table.define_getter(key, getter);
            table.define_setter(key, setter);
        }
        Policy::Field => table.define_field(key, getter),
        Policy::Unknown => {}
    }
    Proxy::with_table(bag, table)
}

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,10}"
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<bool>().prop_map(Value::Bool),
        "[ -~]{0,16}".prop_map(Value::Str),
    ]
}

proptest! {
    #[test]
    fn read_only_keys(key in key(), initial in value(), v in value()) {
        let mut proxy = proxy_for(&key, Policy::ReadOnly, initial.clone());
        let before = (*proxy).clone();

        let err = proxy.set(&key, v).unwrap_err();
        prop_assert_eq!(err, PropertyError::invalid_call("Bag", &key, Direction::Setting, Access::ReadOnly));
        prop_assert_eq!(proxy.get(&key), Ok(initial));
        prop_assert!(proxy.has(&key));

        let err = proxy.delete(&key).unwrap_err();
        prop_assert_eq!(err, PropertyError::invalid_call("Bag", &key, Direction::Unsetting, Access::ReadOnly));
        prop_assert_eq!(&*proxy, &before);
    }

    #[test]
    fn write_only_keys(key in key(), initial in value(), v in value()) {
        let mut proxy = proxy_for(&key, Policy::WriteOnly, initial);

        let err = proxy.get(&key).unwrap_err();
        prop_assert_eq!(err, PropertyError::invalid_call("Bag", &key, Direction::Getting, Access::WriteOnly));
        prop_assert!(proxy.set(&key, v.clone()).is_ok());
        prop_assert!(!proxy.has(&key));

        prop_assert_eq!(proxy.delete(&key), Ok(true));
        prop_assert_eq!(
            &proxy.writes,
            &vec![(key.clone(), v), (key.clone(), Value::Null)]
        );
    }

    #[test]
    fn unknown_keys(key in key(), other in key(), v in value()) {
        prop_assume!(key != other);
        let mut proxy = proxy_for(&other, Policy::ReadWrite, Value::Null);
        let before = (*proxy).clone();

        prop_assert_eq!(proxy.get(&key).unwrap_err().kind(), ErrorKind::UnknownProperty);
        prop_assert_eq!(proxy.set(&key, v).unwrap_err().kind(), ErrorKind::UnknownProperty);
        prop_assert!(!proxy.has(&key));
        prop_assert_eq!(proxy.delete(&key), Ok(true));
        prop_assert_eq!(&*proxy, &before);
    }

    #[test]
    fn empty_table_knows_nothing(key in key(), v in value()) {
        let mut proxy = proxy_for(&key, Policy::Unknown, Value::Int(1));

        let err = proxy.get(&key).unwrap_err();
        prop_assert_eq!(err, PropertyError::unknown("Bag", &key, Direction::Getting));
        let err = proxy.set(&key, v).unwrap_err();
        prop_assert_eq!(err, PropertyError::unknown("Bag", &key, Direction::Setting));
        prop_assert_eq!(proxy.delete(&key), Ok(true));
        prop_assert!(proxy.writes.is_empty());
    }

    #[test]
    fn plain_fields_read_directly(key in key(), initial in value()) {
        let proxy = proxy_for(&key, Policy::Field, initial.clone());
        prop_assert_eq!(proxy.get(&key), Ok(initial));
        prop_assert!(proxy.has(&key));
    }

    #[test]
    fn read_write_round_trips(key in key(), initial in value(), v in value()) {
        let mut proxy = proxy_for(&key, Policy::ReadWrite, initial);
        proxy.set(&key, v.clone()).unwrap();
        prop_assert_eq!(proxy.get(&key), Ok(v.clone()));
        // Repeated reads with no intervening write agree.
        prop_assert_eq!(proxy.get(&key), proxy.get(&key));
    }
}

#[test]
fn null_field_falls_back_to_getter() {
    let mut table = PropertyTable::new();
    table.define_field("mode", |b: &Bag| b.values.get("mode").cloned().unwrap_or_default());
    table.define_getter("mode", |_: &Bag| "auto");
    let mut proxy = Proxy::with_table(Bag::default(), table);

    assert_eq!(proxy.get("mode").unwrap(), "auto");
    proxy.values.insert("mode".into(), Value::from("manual"));
    assert_eq!(proxy.get("mode").unwrap(), "manual");
}

#[test]
fn setter_wins_over_plain_field_on_write() {
    let mut table = PropertyTable::new();
    table.define_field("level", |b: &Bag| b.values.get("level").cloned().unwrap_or_default());
    table.define_setter("level", |b: &mut Bag, level: i64| {
        b.values.insert("level".into(), Value::Int(level * 10));
    });
    let mut proxy = Proxy::with_table(Bag::default(), table);

    proxy.set("level", 2).unwrap();
    assert_eq!(proxy.get("level").unwrap(), 20_i64);
}

#[test]
fn capitalization_decides_which_accessor_serves_a_key() {
    let mut table = PropertyTable::new();
    table.insert_getter("getUrl", |_: &Bag| Value::from("https://example.test"));
    let proxy = Proxy::with_table(Bag::default(), table);

    assert!(proxy.has("url"));
    assert!(proxy.has("Url"));
    assert!(!proxy.has("URL"));
}

#[test]
fn empty_key_resolves_to_bare_prefix_accessors() {
    let mut table = PropertyTable::new();
    table.insert_getter("get", |_: &Bag| Value::Int(0));
    let mut proxy = Proxy::with_table(Bag::default(), table);

    assert_eq!(proxy.get("").unwrap(), 0_i64);
    assert_eq!(
        proxy.set("", 1).unwrap_err().to_string(),
        "Setting read-only property: Bag::"
    );
}
