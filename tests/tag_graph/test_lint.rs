use insta::assert_snapshot;
use mediatag::core::tag_graph::{
    lint::{has_errors, LintRegistry, LintResult, LintSeverity},
    TagSchema,
};

const PROBLEM_SCHEMA: &str = r#"
tags:
  tag1: { req: "tag2" }
  tag2: { req: "tag3" }
  tag3: { req: "tag1" }
  echo: { req: "echo > 0" }
  venue: { req: "ghost == 'x'" }
  mood: { default: calm }
  always: { req: "1 > 0" }
"#;

fn render(results: &[LintResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "{} {} {}: {}",
                result.severity,
                result.code,
                result.location.as_deref().unwrap_or("-"),
                result.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn severity_rank(severity: LintSeverity) -> u8 {
    match severity {
        LintSeverity::Error => 3,
        LintSeverity::Warning => 2,
        LintSeverity::Info => 1,
    }
}

#[test]
fn every_rule_fires_on_the_problem_schema() {
    let schema = TagSchema::from_yaml_str(PROBLEM_SCHEMA).expect("parse schema");
    let results = LintRegistry::new().run(&schema);

    assert_snapshot!(render(&results), @r###"
    Error TAG-LINT-001 tag1: circular dependency: tag1 -> tag2 -> tag3 -> tag1
    Warning TAG-LINT-002 venue: condition of 'venue' references undeclared tag 'ghost'
    Warning TAG-LINT-003 echo: condition of 'echo' references the tag itself
    Info TAG-LINT-004 mood: tag 'mood' declares a default but has no condition, so the default is never applied
    Info TAG-LINT-005 always: condition '1 > 0' of 'always' reads no tags
    "###);
    assert!(has_errors(&results));
}

#[test]
fn lint_results_are_stably_sorted() {
    let schema = TagSchema::from_yaml_str(PROBLEM_SCHEMA).expect("parse schema");
    let results = LintRegistry::new().run(&schema);
    assert!(!results.is_empty());
    for pair in results.windows(2) {
        let left = &pair[0];
        let right = &pair[1];
        let left_rank = severity_rank(left.severity);
        let right_rank = severity_rank(right.severity);
        assert!(left_rank >= right_rank, "severity must be descending");
        if left_rank == right_rank {
            assert!(left.code <= right.code, "code must be ascending");
            if left.code == right.code {
                assert!(left.location <= right.location, "location must be ascending");
            }
        }
    }
}

#[test]
fn clean_schema_has_no_findings() {
    let schema = TagSchema::from_yaml_str(
        r#"
tags:
  participants: { type: int }
  girls: { req: "participants >= 1", default: 0 }
  dance_style:
    values:
      - freestyle
      - value: pair
        req: "girls > 0"
"#,
    )
    .expect("parse schema");
    let results = LintRegistry::new().run(&schema);
    assert!(results.is_empty(), "unexpected findings: {:?}", results);
    assert!(!has_errors(&results));
}

#[test]
fn constant_value_condition_is_reported() {
    let schema = TagSchema::from_yaml_str(
        r#"
tags:
  flag:
    values:
      - value: on
        req: "true"
"#,
    )
    .expect("parse schema");
    let results = LintRegistry::new().run(&schema);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].code, "TAG-LINT-005");
    assert_eq!(results[0].severity, LintSeverity::Info);
    assert!(results[0].message.contains("on value"));
}

#[test]
fn results_serialize_with_lowercase_severity() {
    let schema = TagSchema::from_yaml_str("tags:\n  a: { req: \"b\" }\n  b: { req: \"a\" }\n")
        .expect("parse schema");
    let results = LintRegistry::new().run(&schema);
    let json = serde_json::to_value(&results).expect("serialize");
    assert_eq!(json[0]["severity"], "error");
    assert_eq!(json[0]["code"], "TAG-LINT-001");
    assert_eq!(json[0]["location"], "a");
}
