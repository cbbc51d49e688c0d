//! Step rewriting scenarios
//!
//! A scenario captures values into the registry, then later steps reference
//! them. Steps are rewritten right before dispatch.

use fixture_params::placeholder::StaticInterfaces;
use fixture_params::step::{DataTableRow, DocString, Step, StepRewriter};
use fixture_params::{FailureLog, FixtureError, Registry, ResolutionError, Resolver};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

fn create_rewriter(registry: Registry) -> StepRewriter {
    let mut props = HashMap::new();
    props.insert("ENV".to_string(), "Staging".to_string());

    let interfaces = StaticInterfaces::new().with_interface(
        "lo",
        vec![IpAddr::V4(Ipv4Addr::LOCALHOST)],
    );

    StepRewriter::new(
        Resolver::new()
            .with_properties(props)
            .with_registry(registry)
            .with_interfaces(interfaces),
    )
}

fn scenario() -> Vec<Step> {
    vec![
        Step::new("Given ", "I target ${ENV.toLower} at @{IP.lo}", 3),
        Step::new("When ", "I send a request", 4).with_rows(vec![
            DataTableRow::from_cells(&["Authorization", "Bearer !{token}"]).at_line(5),
            DataTableRow::from_cells(&["X-Env", "${ENV.toUpper}"]).at_line(6),
        ]),
        Step::new("Then ", "the body matches", 7)
            .with_doc_string(DocString::new("{\"env\": \"${ENV}\"}", 8)),
    ]
}

#[test]
fn test_scenario_rewritten_with_captured_values() {
    let registry = Registry::new();
    registry
        .capture(r#"{"auth": {"token": "abc"}}"#, "auth.token", "token")
        .unwrap();

    let steps = create_rewriter(registry).rewrite_all(&scenario()).unwrap();

    assert_eq!(steps[0].text, "I target staging at 127.0.0.1");
    assert_eq!(
        steps[1].cells(),
        vec![
            vec!["Authorization".to_string(), "Bearer abc".to_string()],
            vec!["X-Env".to_string(), "STAGING".to_string()],
        ]
    );
    assert_eq!(
        steps[2].doc_string.as_ref().map(|d| d.content.as_str()),
        Some("{\"env\": \"${ENV}\"}")
    );
}

#[test]
fn test_scenario_fails_without_captured_value() {
    let err = create_rewriter(Registry::new())
        .rewrite_all(&scenario())
        .unwrap_err();
    assert_eq!(err, ResolutionError::MissingKey("token".to_string()));
}

#[test]
fn test_intercept_with_umbrella_error() {
    let registry = Registry::new();
    registry.set("token", "abc");
    let rewriter = create_rewriter(registry);

    let dispatched: Result<usize, FixtureError> = rewriter.intercept(&scenario()[1], |step| {
        Ok(step.rows.map(|rows| rows.len()).unwrap_or(0))
    });
    assert_eq!(dispatched.unwrap(), 2);

    let failed: Result<usize, FixtureError> =
        rewriter.intercept(&Step::new("When ", "@{IP.eth42}", 1), |_| Ok(0));
    assert_eq!(failed.unwrap_err().to_string(), "Interface eth42 not available");
}

#[test]
fn test_collecting_runner_keeps_going() {
    let rewriter = create_rewriter(Registry::new());
    let failures = FailureLog::new();

    let dispatched: Vec<String> = scenario()
        .iter()
        .filter_map(|step| rewriter.intercept_collecting(step, &failures, |s| s.text))
        .collect();

    assert_eq!(
        dispatched,
        vec!["I target staging at 127.0.0.1".to_string(), "the body matches".to_string()]
    );
    assert_eq!(failures.len(), 1);
    assert_eq!(failures.last(), Some("Key not found in registry: token".to_string()));
}
