//! End-to-end builds over in-memory and instrumented parameter sources.

use std::error::Error as _;
use std::time::Instant;

use anyhow::{Result, anyhow, ensure};
use param_config::source::FetchError;
use param_config::{BuildError, BuildOptions, ConfigBuilder, FetchContext, MemoryStore};
use param_config_test_helpers::store::{FailingStore, RecordingStore};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn layered_store() -> MemoryStore {
    MemoryStore::from_pairs([
        ("/base/db/primary/host", "\"localhost\""),
        ("/base/db/primary/port", "5432"),
        ("/base/features/flags", "[\"search\"]"),
        ("/override/db/primary/host", "\"db.internal\""),
        ("/override/features/flags", "[\"billing\"]"),
    ])
}

fn options(prefixes: &[&str], json_output: bool) -> BuildOptions {
    BuildOptions {
        prefixes: prefixes.iter().map(|p| (*p).to_owned()).collect(),
        strip_prefix: true,
        json_output,
        yaml_rules: false,
        sort_by_dependencies: false,
    }
}

fn decode(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|err| anyhow!(err))
}

#[rstest]
fn prefixes_are_fetched_and_merged_in_order(layered_store: MemoryStore) -> Result<()> {
    let store = RecordingStore::new(layered_store);
    let builder = ConfigBuilder::new(&store);
    let bytes = builder.build_from_prefixes(
        &FetchContext::new(),
        &options(&["/base", "/override"], false),
    )?;

    ensure!(store.calls() == vec!["/base".to_owned(), "/override".to_owned()]);
    let doc = decode(&bytes)?;
    let expected = json!({
        "db": {"primary": {"host": "db.internal", "port": 5432}},
        "features": {"flags": ["search", "billing"]},
    });
    ensure!(doc == expected, "unexpected document: {doc}");
    Ok(())
}

#[rstest]
fn reversing_prefixes_reverses_precedence(layered_store: MemoryStore) -> Result<()> {
    let builder = ConfigBuilder::new(layered_store);
    let bytes = builder.build_from_prefixes(
        &FetchContext::new(),
        &options(&["/override", "/base"], false),
    )?;
    let doc = decode(&bytes)?;
    ensure!(doc["db"]["primary"]["host"] == "localhost");
    ensure!(doc["features"]["flags"] == json!(["billing", "search"]));
    Ok(())
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(50)]
fn page_size_does_not_change_the_document(
    layered_store: MemoryStore,
    #[case] page_size: usize,
) -> Result<()> {
    let reference = ConfigBuilder::new(layered_store.clone())
        .build_from_prefixes(&FetchContext::new(), &options(&["/base"], false))?;
    let paged = ConfigBuilder::new(layered_store.with_page_size(page_size))
        .build_from_prefixes(&FetchContext::new(), &options(&["/base"], false))?;
    ensure!(reference == paged);
    Ok(())
}

#[rstest]
fn source_failure_names_the_prefix(layered_store: MemoryStore) -> Result<()> {
    let store = FailingStore::new(layered_store, "/override", "access denied");
    let builder = ConfigBuilder::new(store);
    let err = builder
        .build_from_prefixes(&FetchContext::new(), &options(&["/base", "/override"], true))
        .err()
        .ok_or_else(|| anyhow!("expected a fetch failure"))?;
    match &err {
        BuildError::SourceFetch { path, .. } => ensure!(path == "/override"),
        other => return Err(anyhow!("unexpected error: {other}")),
    }
    ensure!(err.to_string().contains("access denied"));
    Ok(())
}

#[rstest]
fn expired_deadline_surfaces_as_a_fetch_error(layered_store: MemoryStore) -> Result<()> {
    let builder = ConfigBuilder::new(layered_store);
    let cx = FetchContext::with_deadline(Instant::now());
    let err = builder
        .build_from_prefixes(&cx, &options(&["/base"], false))
        .err()
        .ok_or_else(|| anyhow!("expected deadline failure"))?;
    let source = err
        .source()
        .and_then(|source| source.downcast_ref::<FetchError>())
        .ok_or_else(|| anyhow!("missing fetch error source: {err}"))?;
    ensure!(matches!(source, FetchError::DeadlineExceeded { page: 1, .. }));
    Ok(())
}

#[rstest]
fn pretty_and_compact_json_decode_to_the_same_document(
    layered_store: MemoryStore,
) -> Result<()> {
    let builder = ConfigBuilder::new(layered_store);
    let cx = FetchContext::new();
    let pretty = builder.build_from_prefixes(&cx, &options(&["/base"], true))?;
    let compact = builder.build_from_prefixes(&cx, &options(&["/base"], false))?;
    ensure!(pretty.contains(&b'\n'));
    ensure!(!compact.contains(&b'\n'));
    ensure!(decode(&pretty)? == decode(&compact)?);
    Ok(())
}

#[rstest]
fn unstripped_keys_nest_under_an_empty_segment() -> Result<()> {
    let store = MemoryStore::from_pairs([("/app/name", "\"svc\""), ("/app/port", "8080")]);
    let builder = ConfigBuilder::new(store);
    let mut opts = options(&["/app"], false);
    opts.strip_prefix = false;
    let doc = decode(&builder.build_from_prefixes(&FetchContext::new(), &opts)?)?;
    ensure!(
        doc == json!({"": {"app": {"name": "svc", "port": 8080}}}),
        "unexpected document: {doc}"
    );
    Ok(())
}

#[rstest]
fn schema_build_sorts_types_and_keeps_other_keys() -> Result<()> {
    let store = MemoryStore::from_pairs([
        (
            "/schema/types/Comment",
            r#"{"name":"Comment","fields":[{"ofType":"Post","args":[{"ofType":"User"}]}]}"#,
        ),
        ("/schema/types/Post", r#"{"name":"Post","fields":[{"ofType":"User"}]}"#),
        ("/schema/types/User", r#"{"name":"User","fields":[{"ofType":"String"}]}"#),
        ("/schema/query", r#"{"name":"Query"}"#),
    ]);
    let builder = ConfigBuilder::new(store);
    let doc = decode(&builder.build_json_from_prefix(&FetchContext::new(), "/schema", true)?)?;
    let names: Vec<&str> = doc["types"]
        .as_array()
        .ok_or_else(|| anyhow!("types is not an array"))?
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect();
    ensure!(names == ["User", "Post", "Comment"], "unexpected order: {names:?}");
    ensure!(doc["query"] == json!({"name": "Query"}));
    Ok(())
}

#[rstest]
fn sort_failure_produces_no_output() -> Result<()> {
    let store = MemoryStore::from_pairs([
        ("/schema/types/A", r#"{"name":"A","fields":[{"ofType":"B"}]}"#),
        ("/schema/types/B", r#"{"name":"B","fields":[{"ofType":"C"}]}"#),
        ("/schema/types/C", r#"{"name":"C","fields":[{"ofType":"A"}]}"#),
    ]);
    let builder = ConfigBuilder::new(store);
    let result = builder.build_json_from_prefix(&FetchContext::new(), "/schema", true);
    match result {
        Err(BuildError::CyclicDependency { participants }) => {
            ensure!(participants == ["A", "B", "C"]);
            Ok(())
        }
        other => Err(anyhow!("expected a cycle, got {other:?}")),
    }
}

#[rstest]
fn sorting_without_types_is_a_malformed_schema() -> Result<()> {
    let store = MemoryStore::from_pairs([("/schema/query", r#"{"name":"Query"}"#)]);
    let builder = ConfigBuilder::new(store);
    let result = builder.build_json_from_prefix(&FetchContext::new(), "/schema", true);
    ensure!(
        matches!(result, Err(BuildError::MalformedSchema { ref path, .. }) if path == "types"),
        "unexpected result: {result:?}"
    );
    Ok(())
}
