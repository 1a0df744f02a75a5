use crate::haar::errors::HaarError;
use crate::haar::topology::{validate_feature_types, Sign, Topology, TopologyRequest, FEATURE_TYPES};

#[test]
fn test_tokens_parse_back_to_topology() {
    for topology in FEATURE_TYPES {
        let parsed: Topology = topology.name().parse().unwrap();
        assert_eq!(parsed, topology);
        assert_eq!(topology.to_string(), topology.name());
    }
}

#[test]
fn test_unknown_token_reports_valid_set() {
    let err = "type-5".parse::<Topology>().unwrap_err();
    match err {
        HaarError::InvalidTopology { token, valid } => {
            assert_eq!(token, "type-5");
            assert_eq!(valid, vec!["type-2-x", "type-2-y", "type-3-x", "type-3-y", "type-4"]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unspecified_request_yields_canonical_order() {
    let topologies = validate_feature_types(&TopologyRequest::All).unwrap();
    assert_eq!(topologies, FEATURE_TYPES.to_vec());

    let from_none = validate_feature_types(&TopologyRequest::from(None::<&str>)).unwrap();
    assert_eq!(from_none, FEATURE_TYPES.to_vec());
}

#[test]
fn test_collection_request_keeps_caller_order() {
    let tokens = ["type-4", "type-2-x", "type-4"];
    let topologies = validate_feature_types(&TopologyRequest::from(&tokens[..])).unwrap();
    assert_eq!(topologies, vec![Topology::FourRect, Topology::TwoRectX, Topology::FourRect]);
}

#[test]
fn test_collection_request_fails_on_any_unknown_token() {
    let tokens = vec!["type-2-y".to_string(), "type-3".to_string()];
    let result = validate_feature_types(&TopologyRequest::from(&tokens[..]));
    assert!(matches!(result, Err(HaarError::InvalidTopology { ref token, .. }) if token == "type-3"));
}

#[test]
fn test_rect_counts() {
    let counts: Vec<usize> = FEATURE_TYPES.iter().map(|t| t.rect_count()).collect();
    assert_eq!(counts, vec![2, 2, 3, 3, 4]);
}

#[test]
fn test_strip_signs_alternate_starting_negative() {
    assert_eq!(Topology::TwoRectX.sign(0), Sign::Negative);
    assert_eq!(Topology::TwoRectX.sign(1), Sign::Positive);
    assert_eq!(Topology::ThreeRectY.sign(0), Sign::Negative);
    assert_eq!(Topology::ThreeRectY.sign(1), Sign::Positive);
    assert_eq!(Topology::ThreeRectY.sign(2), Sign::Negative);
}

#[test]
fn test_grid_signs_form_checkerboard() {
    let signs: Vec<Sign> = (0..4).map(|i| Topology::FourRect.sign(i)).collect();
    assert_eq!(signs, vec![Sign::Negative, Sign::Positive, Sign::Positive, Sign::Negative]);
}
