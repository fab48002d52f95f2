use super::*;

#[test]
fn sequence_switches_at_boundary() {
    let a = Anim::constant(1.0);
    let b = ramp(10.0, 20.0, 10.0, Ease::Linear);
    let s = sequence(a, 5.0, b);
    assert_eq!(s.sample(4.9).unwrap(), 1.0);
    assert_eq!(s.sample(5.0).unwrap(), 10.0);
    assert_eq!(s.sample(10.0).unwrap(), 15.0);
}

#[test]
fn ramp_applies_ease() {
    let r = ramp(0.0, 1.0, 2.0, Ease::InQuad);
    assert_eq!(r.sample(1.0).unwrap(), 0.25);
    assert_eq!(r.sample(2.0).unwrap(), 1.0);
}

#[test]
fn builders_validate() {
    assert!(speed(Anim::constant(1.0), -1.0).validate().is_err());
    assert!(loop_(Anim::constant(1.0), 0.0, LoopMode::Repeat).validate().is_err());
    assert!(delay(Anim::constant(1.0), 2.0).validate().is_ok());
    assert!(mix(Anim::constant(0.0), Anim::constant(1.0), Anim::constant(0.5))
        .validate()
        .is_ok());
}
