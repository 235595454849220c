//! End-to-end tests over event-code tables shaped like the ones in real ESS
//! containers.

use hed_hierarchy::{BuildOptions, EssDocument, EventCode, HierarchyNode, build_tag_hierarchy};
use serde_json::json;

fn rsvp_event_codes() -> Vec<EventCode> {
    let document = EssDocument::parse(
        r#"[
        {"code": "1", "taskLabel": "main", "label": "non-target",
         "tag": "Event\/Label\/Non-target image, Event\/Description\/A non-target image is displayed for about 8 milliseconds, Event\/Category\/Experimental stimulus, (Item\/Natural scene\/Arial\/Satellite, Participant\/Effect\/Cognitive\/Expected\/Non-target, Sensory presentation\/Visual\/Rendering type\/Screen\/2D), Attribute\/Onset",
         "numberOfInstances": 333917},
        {"code": "2", "taskLabel": "main", "label": "target frames",
         "tag": "Event\/Label\/Target image, Event\/Description\/A white airplane as the RSVP target superimposed on a satellite image is displayed., Event\/Category\/Experimental stimulus, (Item\/Object\/Vehicle\/Aircraft\/Airplane, Participant\/Effect\/Cognitive\/Target, Sensory presentation\/Visual\/Rendering type\/Screen\/2D), (Item\/Natural scene\/Arial\/Satellite, Sensory presentation\/Visual\/Rendering type\/Screen\/2D)",
         "numberOfInstances": 3976},
        {"code": "4", "taskLabel": "main", "label": "no targets response",
         "tag": "Event\/Label\/NoTrgt BttnPress,  Event\/Description\/No-targets response indicated by pressing left button using dominant hand , Event\/Category\/Participant response, (Participant ~ Action\/Button press\/Keyboard ~ Participant\/Effect\/Body part\/Arm\/Hand\/Finger, Attribute\/Object side\/Left)",
         "numberOfInstances": 5010},
        {"code": "6", "taskLabel": "main", "label": "block start",
         "tag": "Event\/Label\/Block start, Event\/Description\/Trials are organized into blocks, Event\/Category\/Experiment control\/Sequence\/Block, Attribute\/Onset",
         "numberOfInstances": 1224},
        {"code": "99", "taskLabel": "main", "label": "never seen",
         "tag": "Event\/Category\/Unused", "numberOfInstances": 0}
    ]"#,
    )
    .unwrap();
    document.event_codes().to_vec()
}

fn collect_names(node: &HierarchyNode, names: &mut Vec<String>) {
    for child in &node.children {
        names.push(child.name.clone());
        collect_names(child, names);
    }
}

#[test]
fn test_two_record_scenario() {
    let records = vec![EventCode::new("A/B", 10.0), EventCode::new("A/C", 5.0)];
    let tree = build_tag_hierarchy(&records, &BuildOptions::default()).unwrap();

    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(value["name"], json!("HED"));
    assert!(value.get("size").is_none());
    assert_eq!(value["children"][0]["name"], json!("A (15)"));
    assert_eq!(value["children"][0]["children"][0]["name"], json!("A/B (10)"));
    assert_eq!(value["children"][0]["children"][1]["name"], json!("A/C (5)"));
    assert!(value["children"][0]["children"][0].get("children").is_none());
}

#[test]
fn test_rsvp_counts_and_ignores() {
    let records = rsvp_event_codes();
    let tree = build_tag_hierarchy(&records, &BuildOptions::default()).unwrap();

    // every countable record names an Event/Category tag
    let total = 333917 + 3976 + 5010 + 1224;
    assert!(tree.find_by_name(&format!("Event ({})", total)).is_some());
    assert!(
        tree.find_by_name(&format!("Event/Category/Experimental stimulus ({})", 333917 + 3976))
            .is_some()
    );
    // Attribute/Onset comes from codes 1 and 6 only
    assert!(
        tree.find_by_name(&format!("Attribute/Onset ({})", 333917 + 1224))
            .is_some()
    );
    // the two grouped Sensory presentation tags in code 2 count once
    assert!(
        tree.find_by_name(&format!("Sensory presentation ({})", 333917 + 3976))
            .is_some()
    );

    let mut names = Vec::new();
    collect_names(&tree, &mut names);
    assert!(names.iter().all(|n| !n.starts_with("Event/Label")));
    assert!(names.iter().all(|n| !n.starts_with("Event/Description")));
    assert!(names.iter().all(|n| !n.starts_with("Event/Category/Unused")));
}

#[test]
fn test_rsvp_scale_selection() {
    let records = rsvp_event_codes();
    let total = 333917.0 + 3976.0 + 5010.0 + 1224.0;

    // most tags come from the dominant code, so the median is already large
    let tree = build_tag_hierarchy(&records, &BuildOptions::default()).unwrap();
    let event = tree.find_by_name(&format!("Event ({})", total)).unwrap();
    assert_eq!(event.size, Some(total));

    let options = BuildOptions::default().with_use_log_count(Some(true));
    let tree = build_tag_hierarchy(&records, &options).unwrap();
    let event = tree.find_by_name(&format!("Event ({})", total)).unwrap();
    let expected = 333917f64.ln() + 3976f64.ln() + 5010f64.ln() + 1224f64.ln();
    assert!((event.size.unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_every_tag_appears_once() {
    let records = rsvp_event_codes();
    let options = BuildOptions::default();
    let tag_counts = hed_hierarchy::aggregation::aggregate_tag_counts(&records, &options).unwrap();
    let tree = hed_hierarchy::aggregation::convert_to_hierarchy(&tag_counts, None);

    let mut names = Vec::new();
    collect_names(&tree, &mut names);
    assert_eq!(names.len(), tag_counts.tag_count());

    let mut expected: Vec<String> = tag_counts
        .iter()
        .map(|(tag, count)| format!("{} ({})", tag, count.count))
        .collect();
    expected.sort();
    names.sort();
    assert_eq!(names, expected);
}

#[test]
fn test_custom_ignore_list() {
    let records = vec![EventCode::new("Event/Label/Foo, Item/Object/Car", 2.0)];
    let options = BuildOptions::default().with_ignore_tags(["Item"]);
    let tree = build_tag_hierarchy(&records, &options).unwrap();

    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "HED",
            "children": [{
                "name": "Event (2)",
                "size": 2.0,
                "children": [{
                    "name": "Event/Label (2)",
                    "size": 2.0,
                    "children": [{"name": "Event/Label/Foo (2)", "size": 2.0}]
                }]
            }]
        })
    );
}

#[test]
fn test_build_is_repeatable() {
    let records = rsvp_event_codes();
    let options = BuildOptions::default();
    let first = build_tag_hierarchy(&records, &options).unwrap();
    let second = build_tag_hierarchy(&records, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_non_string_tag_on_unused_code_still_builds() {
    let document = EssDocument::parse(
        r#"[{"tag": "A/B", "numberOfInstances": 10}, {"tag": ["x"], "numberOfInstances": 0}]"#,
    )
    .unwrap();
    let tree = build_tag_hierarchy(document.event_codes(), &BuildOptions::default()).unwrap();
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].name, "A (10)");
    assert_eq!(tree.children[0].children[0].name, "A/B (10)");
}
