use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"detwall");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"det");
    b.write_bytes(b"wall");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_distinguishes_argument_order() {
    let mut a = Fnv1a64::new_default();
    a.write_u32(1);
    a.write_u32(2);
    let mut b = Fnv1a64::new_default();
    b.write_u32(2);
    b.write_u32(1);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn unit_from_hash_stays_in_half_open_interval() {
    assert_eq!(unit_from_hash(0), 0.0);
    assert!(unit_from_hash(u64::MAX) < 1.0);
    for seed in 0..64u64 {
        let u = unit_from_hash(mix64(seed));
        assert!((0.0..1.0).contains(&u));
    }
}

#[test]
fn round_half_up_matches_contract() {
    assert_eq!(round_half_up_u8(127.5), 128);
    assert_eq!(round_half_up_u8(127.49), 127);
    assert_eq!(round_half_up_u8(0.5), 1);
    assert_eq!(round_half_up_u8(-3.0), 0);
    assert_eq!(round_half_up_u8(300.0), 255);
    assert_eq!(round_half_up_u8(f64::NAN), 0);
}
