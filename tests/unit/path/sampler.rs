use super::*;
use crate::path::codec::PathCodec;

fn base() -> PathPattern {
    PathCodec::parse("M 10 10 L 50 20 Q 80 -30 L 0 0").into_pattern()
}

fn rules() -> BTreeMap<usize, PerturbationRule> {
    BTreeMap::from([
        (1, PerturbationRule::dynamic(10.0)),
        (2, PerturbationRule::dynamic(5.0)),
    ])
}

#[test]
fn static_generation_copies_the_base() {
    let annotated = AnnotatedPattern::plain(PathPattern::new(vec![PathCommand::new(
        'M', 5.0, 5.0,
    )]));
    let mut sampler = PathSampler::from_seed(Some(1));
    for _ in 0..20 {
        assert_eq!(
            sampler.generate(&annotated).as_slice(),
            &[PathCommand::new('M', 5.0, 5.0)]
        );
    }
}

#[test]
fn dynamic_coordinates_stay_within_interval() {
    let annotated = AnnotatedPattern::new(base(), &rules()).unwrap();
    let mut sampler = PathSampler::new(StdRng::seed_from_u64(42));

    for _ in 0..500 {
        let out = sampler.generate(&annotated);
        for (i, (cmd, rule)) in annotated.iter().enumerate() {
            let got = out.get(i).unwrap();
            match rule {
                PerturbationRule::Static => assert_eq!(got, cmd),
                PerturbationRule::Dynamic { interval } => {
                    assert!((got.x - cmd.x).abs() <= interval + 1e-9);
                    assert!((got.y - cmd.y).abs() <= interval + 1e-9);
                }
            }
        }
    }
}

#[test]
fn generation_preserves_shape() {
    let annotated = AnnotatedPattern::new(base(), &rules()).unwrap();
    let mut sampler = PathSampler::from_seed(None);
    let out = sampler.generate(&annotated);
    assert!(out.is_aligned_with(annotated.base()));
}

#[test]
fn axes_are_sampled_independently() {
    let annotated = AnnotatedPattern::new(
        PathPattern::new(vec![PathCommand::new('L', 0.0, 0.0)]),
        &BTreeMap::from([(0, PerturbationRule::dynamic(100.0))]),
    )
    .unwrap();
    let mut sampler = PathSampler::from_seed(Some(7));
    let differing = (0..50)
        .map(|_| sampler.generate(&annotated))
        .filter(|p| p.get(0).is_some_and(|c| c.x != c.y))
        .count();
    assert!(differing > 0);
}

#[test]
fn zero_interval_is_static() {
    let annotated = AnnotatedPattern::new(
        base(),
        &BTreeMap::from([(0, PerturbationRule::dynamic(0.0))]),
    )
    .unwrap();
    let mut sampler = PathSampler::from_seed(Some(3));
    assert_eq!(&sampler.generate(&annotated), annotated.base());
}

#[test]
fn annotation_leaves_source_untouched() {
    let plain = AnnotatedPattern::plain(base());
    let annotated = plain
        .with_rule(3, PerturbationRule::dynamic(2.0))
        .unwrap();
    assert_eq!(plain.rule(3), PerturbationRule::Static);
    assert_eq!(annotated.rule(3), PerturbationRule::dynamic(2.0));
    assert_eq!(plain.base(), annotated.base());
}

#[test]
fn out_of_range_rule_is_rejected() {
    let err = AnnotatedPattern::new(
        base(),
        &BTreeMap::from([(9, PerturbationRule::dynamic(1.0))]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("index 9 is out of range"));
}

#[test]
fn negative_or_nan_interval_is_rejected() {
    assert!(PerturbationRule::dynamic(-1.0).validate().is_err());
    assert!(PerturbationRule::dynamic(f64::NAN).validate().is_err());
    assert!(PerturbationRule::dynamic(f64::INFINITY).validate().is_err());
    assert!(PerturbationRule::Static.validate().is_ok());
}

#[test]
fn interval_with_overflowing_span_is_rejected() {
    let err = AnnotatedPattern::new(
        PathCodec::parse("M 1 2").into_pattern(),
        &BTreeMap::from([(0, PerturbationRule::dynamic(1e308))]),
    )
    .unwrap_err();
    assert!(matches!(err, MotionError::Validation(_)));

    let widest = f64::MAX / 2.0;
    let annotated = AnnotatedPattern::new(
        PathCodec::parse("M 1 2").into_pattern(),
        &BTreeMap::from([(0, PerturbationRule::dynamic(widest))]),
    )
    .unwrap();
    let out = PathSampler::from_seed(Some(5)).generate(&annotated);
    assert!(out.get(0).is_some_and(|c| c.x.is_finite() && c.y.is_finite()));
}

#[test]
fn rules_deserialize_by_mode_tag() {
    let rule: PerturbationRule =
        serde_json::from_str(r#"{"mode":"dynamic","interval":10}"#).unwrap();
    assert_eq!(rule, PerturbationRule::dynamic(10.0));
    let rule: PerturbationRule = serde_json::from_str(r#"{"mode":"static"}"#).unwrap();
    assert_eq!(rule, PerturbationRule::Static);
}
