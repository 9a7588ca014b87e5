use super::*;

#[test]
fn basic_parse_matches_commands() {
    let parsed = PathCodec::parse("M 10 20 L 30 -40");
    assert!(parsed.is_complete());
    assert_eq!(
        parsed.pattern.as_slice(),
        &[
            PathCommand::new('M', 10.0, 20.0),
            PathCommand::new('L', 30.0, -40.0)
        ]
    );
}

#[test]
fn fractional_input_truncates_toward_zero() {
    let parsed = PathCodec::parse("M 1.9 -2.7 L -0.5 0.99");
    let p = parsed.pattern;
    assert_eq!(p.get(0), Some(&PathCommand::new('M', 1.0, -2.0)));
    assert_eq!(p.get(1), Some(&PathCommand::new('L', 0.0, 0.0)));
    assert!(p.get(1).unwrap().x.is_sign_positive());
}

#[test]
fn other_arities_are_skipped_and_reported() {
    let parsed = PathCodec::parse("M 0 0 Z L 5 5 H 3");
    assert_eq!(parsed.pattern.len(), 2);
    assert_eq!(parsed.unrecognized, vec!["Z".to_string(), "H 3".to_string()]);
    assert!(!parsed.is_complete());
}

#[test]
fn whitespace_between_tokens_is_flexible() {
    let parsed = PathCodec::parse("  M\t10   20\nC 1 2 ");
    assert_eq!(
        parsed.pattern.as_slice(),
        &[
            PathCommand::new('M', 10.0, 20.0),
            PathCommand::new('C', 1.0, 2.0)
        ]
    );
    assert!(parsed.is_complete());
}

#[test]
fn blank_input_parses_to_nothing() {
    let parsed = PathCodec::parse("   ");
    assert!(parsed.is_empty());
    assert!(parsed.is_complete());
    assert!(matches!(
        parsed.require_commands(),
        Err(MotionError::Parse(msg)) if msg == "path contains no commands"
    ));
}

#[test]
fn malformed_input_is_distinguishable() {
    let parsed = PathCodec::parse("Z z Q");
    assert!(parsed.is_empty());
    assert!(!parsed.is_complete());
    let err = parsed.require_commands().unwrap_err();
    assert!(err.to_string().contains("no two-argument commands"));
}

#[test]
fn stringify_has_leading_space_per_segment() {
    let p = PathPattern::new(vec![
        PathCommand::new('M', 10.0, 20.0),
        PathCommand::new('L', 30.0, -40.0),
    ]);
    assert_eq!(PathCodec::stringify(&p), " M 10 20 L 30 -40");
    assert_eq!(PathCodec::stringify(&PathPattern::default()), "");
}

#[test]
fn stringify_keeps_fractions_and_drops_negative_zero() {
    let p = PathPattern::new(vec![PathCommand::new('Q', 12.5, -0.0)]);
    assert_eq!(PathCodec::stringify(&p), " Q 12.5 0");
}

#[test]
fn integral_patterns_round_trip() {
    let p = PathPattern::new(vec![
        PathCommand::new('M', -7.0, 0.0),
        PathCommand::new('C', 120.0, 45.0),
        PathCommand::new('l', 3.0, -999.0),
    ]);
    let again = PathCodec::parse(&PathCodec::stringify(&p));
    assert!(again.is_complete());
    assert_eq!(again.pattern, p);
}

#[test]
fn fractional_output_does_not_round_trip() {
    let p = PathPattern::new(vec![PathCommand::new('L', 2.75, -3.5)]);
    let again = PathCodec::parse(&PathCodec::stringify(&p)).into_pattern();
    assert_eq!(again.get(0), Some(&PathCommand::new('L', 2.0, -3.0)));
}

#[test]
fn alignment_compares_length_and_kinds() {
    let a = PathCodec::parse("M 0 0 L 1 1").into_pattern();
    let b = PathCodec::parse("M 5 5 L 9 9").into_pattern();
    let c = PathCodec::parse("M 5 5 C 9 9").into_pattern();
    let d = PathCodec::parse("M 5 5").into_pattern();
    assert!(a.is_aligned_with(&b));
    assert!(!a.is_aligned_with(&c));
    assert!(!a.is_aligned_with(&d));
}

#[test]
fn overflowing_coordinates_are_unrecognized() {
    let huge = "9".repeat(400);
    let raw = format!("M 1 2 L {huge} 3 L 4 5");
    let parsed = PathCodec::parse(&raw);
    assert_eq!(
        parsed.pattern.as_slice(),
        &[PathCommand::new('M', 1.0, 2.0), PathCommand::new('L', 4.0, 5.0)]
    );
    assert_eq!(parsed.unrecognized, vec![format!("L {huge} 3")]);
    assert!(!PathCodec::stringify(&parsed.pattern).contains("inf"));
}
