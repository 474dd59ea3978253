use mediatag::core::tag_graph::{
    DependencyAnalysis, DependencyMap, OrderingOptions, TagDependencyEngine, TagSchema,
};

fn analysis(pairs: &[(&str, &[&str])]) -> DependencyAnalysis {
    let map: DependencyMap = pairs
        .iter()
        .map(|(tag, deps)| {
            (
                tag.to_string(),
                deps.iter().map(|dep| dep.to_string()).collect(),
            )
        })
        .collect();
    DependencyAnalysis::from_dependency_map(map)
}

fn order(analysis: &DependencyAnalysis, tags: &[&str]) -> Vec<String> {
    analysis
        .ordered_tags(tags, &OrderingOptions::default())
        .expect("ordering succeeds")
}

#[test]
fn tag_moves_right_after_its_only_dependency() {
    let deps = analysis(&[("a", &["c"]), ("b", &[]), ("c", &[])]);
    assert_eq!(order(&deps, &["a", "b", "c"]), vec!["b", "c", "a"]);
}

#[test]
fn multi_step_reorder_matches_expected_sequence() {
    let deps = analysis(&[
        ("dance_style", &["action", "girls", "guys", "scene"]),
        ("participants", &[]),
        ("girls", &["participants"]),
        ("guys", &["participants", "girls"]),
        ("action", &[]),
        ("scene", &[]),
    ]);
    assert_eq!(
        order(
            &deps,
            &["dance_style", "participants", "girls", "guys", "action", "scene"]
        ),
        vec!["participants", "girls", "guys", "action", "scene", "dance_style"]
    );
}

#[test]
fn reorder_through_the_engine_from_yaml() {
    let schema = TagSchema::from_yaml_str(
        r#"
tags:
  dance_style:
    req: 'action == "dancing"'
  participants:
    type: int
  girls:
    req: "participants >= 1"
  guys:
    req: "participants - girls > 0"
  action:
    values: [dancing, singing]
  scene: {}
"#,
    )
    .expect("parse schema");
    let mut engine = TagDependencyEngine::new();
    engine.analyze_dependencies(&schema);
    let ordered = engine
        .get_ordered_tags(schema.declared_order().as_slice())
        .expect("ordering succeeds");
    assert_eq!(
        ordered,
        vec!["participants", "girls", "guys", "action", "dance_style", "scene"]
    );
}

#[test]
fn satisfied_order_is_left_untouched() {
    let deps = analysis(&[
        ("participants", &[]),
        ("girls", &["participants"]),
        ("guys", &["participants", "girls"]),
    ]);
    let input = ["participants", "girls", "guys"];
    assert_eq!(order(&deps, &input), input);
}

#[test]
fn result_is_a_permutation_satisfying_every_listed_dependency() {
    let deps = analysis(&[
        ("e", &["a", "d"]),
        ("d", &["b"]),
        ("c", &["e", "missing"]),
        ("b", &[]),
        ("a", &["b"]),
    ]);
    let input = ["e", "d", "c", "b", "a"];
    let ordered = order(&deps, &input);

    let mut sorted_in = input.to_vec();
    sorted_in.sort_unstable();
    let mut sorted_out: Vec<&str> = ordered.iter().map(String::as_str).collect();
    sorted_out.sort_unstable();
    assert_eq!(sorted_in, sorted_out);

    for (index, tag) in ordered.iter().enumerate() {
        for dep in deps.dependencies_of(tag).into_iter().flatten() {
            if let Some(dep_index) = ordered.iter().position(|t| t == dep) {
                assert!(dep_index <= index, "{} must follow {}", tag, dep);
            }
        }
    }
}

#[test]
fn empty_order_and_unknown_tags() {
    let deps = analysis(&[("a", &["b"])]);
    let empty: [&str; 0] = [];
    assert!(order(&deps, &empty).is_empty());
    assert_eq!(order(&deps, &["x", "y"]), vec!["x", "y"]);
    // `b` is not listed, so it does not constrain `a`.
    assert_eq!(order(&deps, &["a", "c"]), vec!["a", "c"]);
}

#[test]
fn self_reference_does_not_move_or_fail() {
    let deps = analysis(&[("loop", &["loop"]), ("other", &[])]);
    assert_eq!(order(&deps, &["loop", "other"]), vec!["loop", "other"]);
}

#[test]
fn cyclic_list_is_rejected_with_a_distinct_code() {
    let deps = analysis(&[("a", &["b"]), ("b", &["a"])]);
    let err = deps
        .ordered_tags(&["a", "b"], &OrderingOptions::default())
        .expect_err("cycle must be rejected");
    assert_eq!(err.code, "TAG-ORDER-001");
}

#[test]
fn move_budget_stops_cycles_without_the_precheck() {
    let deps = analysis(&[("a", &["b"]), ("b", &["a"])]);
    let options = OrderingOptions {
        check_cycles: false,
        max_moves: Some(5),
    };
    let err = deps
        .ordered_tags(&["a", "b"], &options)
        .expect_err("budget must be exhausted");
    assert_eq!(err.code, "TAG-ORDER-002");
}

#[test]
fn cycle_outside_the_working_list_is_ignored() {
    let deps = analysis(&[("a", &["b"]), ("b", &["a"]), ("c", &["a"])]);
    assert_eq!(order(&deps, &["c", "a"]), vec!["a", "c"]);
}
