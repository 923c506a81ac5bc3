use serde::Serialize;
use serde_json::json;
use std::fs;
use test_log::test;
use ztp_template::{
    Error, FunctionError, LocalSource, Logger, MemorySource, Template, TemplateBuilder,
};

fn build(source: MemorySource) -> Template {
    TemplateBuilder::new().logger(Logger::default()).source(source).build().unwrap()
}

#[test]
fn test_json_of_input() {
    let template = build(MemorySource::new().with_file("a.json", "{{ json(data) }}"));
    assert_eq!(template.render("a.json", &json!({"a": 1})).unwrap(), r#"{"a":1}"#);
}

#[test]
fn test_base64_of_text() {
    let template = build(MemorySource::new().with_file("a.txt", r#"{{ base64("hello") }}"#));
    assert_eq!(template.render("a.txt", &()).unwrap(), "aGVsbG8=");
}

#[test]
fn test_execute_piped_into_base64() {
    let template = build(MemorySource::from_iter([
        ("outer.tmpl", r#"{{ execute("inner.tmpl", data) | base64 }}"#),
        ("inner.tmpl", "hi"),
    ]));
    assert_eq!(template.render("outer.tmpl", &()).unwrap(), "aGk=");
}

#[test]
fn test_execute_piped_into_json() {
    let template = build(MemorySource::from_iter([
        ("secret.json", r#"{"content": {{ execute("body.yaml", data) | json }}}"#),
        ("body.yaml", "name: {{ name }}\nreplicas: {{ replicas }}\n"),
    ]));
    let text = template.render("secret.json", &json!({"name": "sno", "replicas": 1})).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!({"content": "name: sno\nreplicas: 1\n"}));
}

#[derive(Serialize)]
struct Node {
    hostname: String,
    mac: String,
}

#[derive(Serialize)]
struct Cluster {
    name: String,
    nodes: Vec<Node>,
}

#[test]
fn test_struct_input() {
    let template = build(MemorySource::new().with_file(
        "hosts.txt",
        "{% for node in nodes %}{{ node.hostname }}={{ node.mac }};{% endfor %}{{ data.name }}",
    ));
    let cluster = Cluster {
        name: "edge".into(),
        nodes: vec![
            Node {
                hostname: "master-0".into(),
                mac: "aa:bb".into(),
            },
            Node {
                hostname: "master-1".into(),
                mac: "cc:dd".into(),
            },
        ],
    };
    assert_eq!(
        template.render("hosts.txt", &cluster).unwrap(),
        "master-0=aa:bb;master-1=cc:dd;edge"
    );
}

#[test]
fn test_include_resolves_in_shared_namespace() {
    let template = build(MemorySource::from_iter([
        ("a.yaml", "{% include 'parts/labels.yaml' %}"),
        ("parts/labels.yaml", "app: {{ app }}"),
    ]));
    assert_eq!(template.render("a.yaml", &json!({"app": "agent"})).unwrap(), "app: agent");
}

#[test]
fn test_unknown_name_writes_nothing() {
    let template = build(MemorySource::new().with_file("a", "x"));
    let mut out = Vec::new();
    let err = template.execute(&mut out, "b", &()).unwrap_err();
    assert!(matches!(err, Error::TemplateNotFound { ref name } if name == "b"));
    assert!(err.is_template_not_found());
    assert!(out.is_empty());
}

#[test]
fn test_nested_failure_writes_nothing() {
    let template = build(MemorySource::new().with_file(
        "a",
        r#"long prefix that must not leak {{ execute("missing.tmpl", data) }}"#,
    ));
    let mut out = Vec::new();
    let err = template.execute(&mut out, "a", &()).unwrap_err();
    assert!(matches!(err, Error::Execution { ref name, .. } if name == "a"));
    assert!(matches!(
        err.function_error(),
        Some(FunctionError::TemplateNotFound { name }) if name == "missing.tmpl"
    ));
    assert!(err.is_template_not_found());
    assert!(out.is_empty());
}

#[test]
fn test_self_execution_is_an_execution_error() {
    let template = build(MemorySource::new().with_file("a", r#"{{ execute("a", data) }}"#));
    let mut out = Vec::new();
    let err = template.execute(&mut out, "a", &()).unwrap_err();
    assert!(matches!(err, Error::Execution { ref name, .. } if name == "a"));
    assert!(matches!(
        err.function_error(),
        Some(FunctionError::RecursionLimit { name, .. }) if name == "a"
    ));
    assert!(!err.is_template_not_found());
    assert!(out.is_empty());
}

#[test]
fn test_execution_cycle_is_an_execution_error() {
    let template = build(MemorySource::from_iter([
        ("a.yaml", r#"{{ execute("b.yaml", data) }}"#),
        ("b.yaml", r#"{{ execute("a.yaml", data) }}"#),
        ("c.yaml", r#"{{ execute("d.yaml", data) }}"#),
        ("d.yaml", "ok"),
    ]));
    let err = template.render("b.yaml", &()).unwrap_err();
    assert!(matches!(err, Error::Execution { ref name, .. } if name == "b.yaml"));
    assert!(matches!(
        err.function_error(),
        Some(FunctionError::RecursionLimit { .. })
    ));
    assert_eq!(template.render("c.yaml", &()).unwrap(), "ok");
}

#[test]
fn test_unsupported_base64_input() {
    let template = build(MemorySource::new().with_file("a", "{{ data.items | base64 }}"));
    let mut out = Vec::new();
    let err = template.execute(&mut out, "a", &json!({"items": [1, 2]})).unwrap_err();
    assert!(matches!(err.function_error(), Some(FunctionError::UnsupportedType { .. })));
    assert!(out.is_empty());
}

#[test]
fn test_execute_appends_to_writer() {
    let template = build(MemorySource::new().with_file("a", "{{ data }}\n"));
    let mut out = b"# generated\n".to_vec();
    template.execute(&mut out, "a", "x").unwrap();
    assert_eq!(out, b"# generated\nx\n");
}

#[test]
fn test_concurrent_execution_matches_sequential() {
    let template = build(MemorySource::from_iter([
        ("outer", r#"{{ name }}:{{ execute("inner", data) | base64 }}"#),
        ("inner", "{{ name }}-{{ index }}"),
    ]));
    let inputs: Vec<_> =
        (0..32).map(|index| json!({"name": format!("node-{index}"), "index": index})).collect();
    let sequential: Vec<String> =
        inputs.iter().map(|input| template.render("outer", input).unwrap()).collect();

    let concurrent: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let template = &template;
                scope.spawn(move || template.render("outer", input).unwrap())
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });
    assert_eq!(concurrent, sequential);
}

#[test]
fn test_local_source_names_match_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("manifests/nodes")).unwrap();
    fs::create_dir_all(root.join("empty/nested")).unwrap();
    fs::write(root.join("manifests/cluster.json"), "{}").unwrap();
    fs::write(root.join("manifests/nodes/master-0.yaml"), "name: master-0").unwrap();
    fs::write(root.join("README.md"), "docs").unwrap();

    let template = TemplateBuilder::new()
        .logger(Logger::default())
        .source(LocalSource::new(root))
        .build()
        .unwrap();
    assert_eq!(
        template.names(),
        vec!["README.md", "manifests/cluster.json", "manifests/nodes/master-0.yaml"]
    );

    let narrowed = TemplateBuilder::new()
        .logger(Logger::default())
        .source(LocalSource::new(root))
        .dir("manifests")
        .build()
        .unwrap();
    assert_eq!(narrowed.names(), vec!["cluster.json", "nodes/master-0.yaml"]);
    assert_eq!(narrowed.render("nodes/master-0.yaml", &()).unwrap(), "name: master-0");
}

#[test]
fn test_local_syntax_error_fails_build() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.yaml"), "ok").unwrap();
    fs::write(dir.path().join("b.yaml"), "{{ unclosed").unwrap();

    let result = TemplateBuilder::new()
        .logger(Logger::default())
        .source(LocalSource::new(dir.path()))
        .build();
    assert!(matches!(result, Err(Error::TemplateSyntax { name, .. }) if name == "b.yaml"));
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_is_a_filesystem_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a")).unwrap();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("a/loop")).unwrap();

    let result = TemplateBuilder::new()
        .logger(Logger::default())
        .source(LocalSource::new(dir.path()))
        .build();
    assert!(matches!(result, Err(Error::Filesystem { .. })));
}
