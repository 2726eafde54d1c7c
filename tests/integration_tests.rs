// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading keyval files from disk.

mod common;

use common::{init_tracing, write_file};
use keyval::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_end_to_end_example() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "a: 1,2,3").unwrap();
    writeln!(temp_file, "b: hello").unwrap();
    writeln!(temp_file, "// comment").unwrap();
    writeln!(temp_file, "c: 3.14").unwrap();
    temp_file.flush().unwrap();

    let doc = load_file(temp_file.path()).unwrap();

    assert_eq!(doc.len(), 3);
    assert_eq!(doc.get("a").unwrap().best_type(), DataType::IntList);
    assert_eq!(doc.get("a").unwrap().as_int_list(), Some(&[1, 2, 3][..]));
    assert_eq!(doc.get("b").unwrap().best_type(), DataType::String);
    assert_eq!(doc.get("c").unwrap().best_type(), DataType::Float);
    assert_eq!(doc.get("c").unwrap().as_float(), Some(3.14));
}

#[test]
fn test_every_best_type() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "types.kv",
        "a: hello\n\
         b: a,b,c, d,e,f\n\
         c: 1\n\
         d: 3.2\n\
         e: 1,2,3,4\n\
         f: 1.1, 3,4,5,8.9\n\
         g: 2023-10-15\n\
         h: 2023-10-15, 2024-01-01\n",
    );

    let doc = load_file(&path).unwrap();
    let best: Vec<(&str, DataType)> = doc
        .iter()
        .map(|(key, value)| (key.as_str(), value.best_type()))
        .collect();

    assert_eq!(
        best,
        vec![
            ("a", DataType::String),
            ("b", DataType::StringList),
            ("c", DataType::Int),
            ("d", DataType::Float),
            ("e", DataType::IntList),
            ("f", DataType::FloatList),
            ("g", DataType::Date),
            ("h", DataType::DateList),
        ]
    );
    assert_eq!(
        doc.get("f").unwrap().as_float_list(),
        Some(&[1.1, 3.0, 4.0, 5.0, 8.9][..])
    );
}

#[test]
fn test_queries_on_loaded_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "q.kv",
        "a: A\nb: B\nc: C\neqn: pi=3.14159\neqn: a=b\n",
    );
    let doc = load_file(&path).unwrap();

    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "b", "c", "eqn1", "eqn2"]);
    assert!(doc.missing("a, b, eqn").is_empty());
    assert_eq!(doc.missing("a,z,c,y"), vec!["z", "y"]);
    assert_eq!(doc.present("a,eqn,eqn2"), vec!["a", "eqn2"]);
    assert_eq!(doc.unknown("a,b,eqn*"), vec!["c"]);

    let group: Vec<&str> = doc
        .get_multiple("eqn")
        .iter()
        .map(|value| value.as_str())
        .collect();
    assert_eq!(group, vec!["pi=3.14159", "a=b"]);
}

#[test]
fn test_multi_line_values() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "multi.kv",
        "primes: 2, 3, 5,\n    7, 11, 13\n\n// trailing comment\nname: keyval",
    );
    let doc = load_file(&path).unwrap();

    assert_eq!(
        doc.get("primes").unwrap().as_int_list(),
        Some(&[2, 3, 5, 7, 11, 13][..])
    );
    assert_eq!(doc.get("name").unwrap().as_str(), "keyval");
}

#[test]
fn test_include_by_absolute_path() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let inner = write_file(dir.path(), "inner.kv", "port: 8080\nhost: localhost\n");
    let outer = write_file(
        dir.path(),
        "outer.kv",
        &format!("name: demo\ninclude: {}\nhost: example.org\n", inner.display()),
    );

    let loader = KeyValLoader::new();
    let entries = loader.read_entries(&outer).unwrap();
    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["name", "port", "host", "host"]);

    let doc = loader.load(&outer).unwrap();
    assert_eq!(doc.get("port").unwrap().as_int(), Some(8080));
    assert_eq!(doc.get("host1").unwrap().as_str(), "localhost");
    assert_eq!(doc.get("host2").unwrap().as_str(), "example.org");
    assert!(doc.get("include").is_none());
}

#[test]
fn test_include_cycle_on_disk() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.kv");
    let b = write_file(
        dir.path(),
        "b.kv",
        &format!("b: 2\ninclude: {}/./a.kv\n", dir.path().display()),
    );
    write_file(dir.path(), "a.kv", &format!("a: 1\ninclude: {}\n", b.display()));

    let err = load_file(&a).unwrap_err();
    assert!(matches!(err, KeyValError::IncludeCycle { .. }));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_file(dir.path().join("absent.kv")).unwrap_err();
    assert!(matches!(err, KeyValError::Io { .. }));
}

#[test]
fn test_malformed_entry_reports_location() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "bad.kv", "// header\n\nno delimiter here\n");

    let err = load_file(&path).unwrap_err();
    match &err {
        KeyValError::MalformedEntry { entry, line, .. } => {
            assert_eq!(entry, "no delimiter here");
            assert_eq!(*line, 3);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.to_string().starts_with("bad key val: no delimiter here in file"));
}

#[test]
fn test_latin1_bytes_in_comment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.kv");
    std::fs::write(&path, b"a: 1\n// caf\xE9 comment\nb: 2\n").unwrap();

    let doc = load_file(&path).unwrap();
    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(doc.get("b").unwrap().as_int(), Some(2));
}

#[test]
fn test_comment_only_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "empty.kv", "// nothing\n// at all\n");
    assert!(load_file(&path).unwrap().is_empty());
}

#[test]
fn test_custom_format_options() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "custom.kv",
        "# ini style\nname = demo\nids = 1;2;3 # inline\n",
    );

    let loader = KeyValLoader::builder()
        .with_kv_delimiter("=")
        .with_list_delimiter(";")
        .with_comment_marker("#")
        .build()
        .unwrap();
    let doc = loader.load(&path).unwrap();

    assert_eq!(doc.get("name").unwrap().as_str(), "demo");
    assert_eq!(doc.get("ids").unwrap().as_int_list(), Some(&[1, 2, 3][..]));
}

#[test]
fn test_format_options_from_yaml() {
    let yaml = "kv_delimiter: \"=\"\ncomment_marker: \"#\"\n";
    let options: FormatOptions = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(options.kv_delimiter(), "=");
    assert_eq!(options.list_delimiter(), ",");
    assert_eq!(options.comment_marker(), "#");

    let loader = KeyValLoader::builder().with_options(options).build().unwrap();
    assert_eq!(loader.options().kv_delimiter(), "=");
}

#[test]
fn test_load_then_validate() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "service.kv",
        "name: demo\nport: 8080\nmode: fast\nreplica: a.example.org\nreplica: b.example.org\n",
    );
    let doc = load_file(&path).unwrap();

    let rules = "\
        name:required-yes\n\
        port:type-int\n\
        port:requires-name\n\
        mode:values-fast,slow\n\
        replica:multiple-yes\n\
        replica:required-yes\n";
    assert!(check_legals(&doc, rules).is_ok());

    let strict = format!("{}mode:values-slow\n", rules);
    let err = check_legals(&doc, &strict).unwrap_err();
    assert!(matches!(
        err.as_schema(),
        Some(SchemaError::DisallowedValue { key, .. }) if key == "mode"
    ));
}
