use dashdiff_json_pointer::{format_json_pointer, get, parse_json_pointer, PathStep};
use serde_json::json;

#[test]
fn pointer_parse_format_roundtrip_matrix() {
    let cases = ["", "/", "/time", "/time/from", "/a~0b/c~1d", "/panels/0", "/~0/~1"];

    for pointer in cases {
        let path = parse_json_pointer(pointer);
        assert_eq!(format_json_pointer(&path), pointer);
    }
}

#[test]
fn typed_and_parsed_paths_format_identically() {
    let typed = vec![
        PathStep::from("templating"),
        PathStep::from("list"),
        PathStep::Index(3),
        PathStep::from("current"),
    ];
    assert_eq!(format_json_pointer(&typed), "/templating/list/3/current");
}

#[test]
fn dashboard_lookup_matrix() {
    let doc = json!({
        "panels": [
            {"id": 1, "targets": [{"query": "up"}]},
            {"id": 2, "targets": []}
        ],
        "templating": {"list": [{"name": "env", "current": {"value": "prod"}}]}
    });

    assert_eq!(get(&doc, &parse_json_pointer("/panels/0/targets/0/query")), Some(&json!("up")));
    assert_eq!(get(&doc, &parse_json_pointer("/templating/list/0/current/value")), Some(&json!("prod")));
    assert_eq!(get(&doc, &parse_json_pointer("/panels/1/targets/0")), None);
    assert_eq!(get(&doc, &parse_json_pointer("/panels/-")), None);
    assert_eq!(get(&doc, &parse_json_pointer("/panels/0/id/x")), None);
    assert_eq!(get(&doc, &[]), Some(&doc));
}
