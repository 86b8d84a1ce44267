use super::*;

#[test]
fn every_name_round_trips() {
    for hue in Hue::ALL {
        assert_eq!(hue.as_str().parse::<Hue>().unwrap(), hue);
        let json = serde_json::to_string(&hue).unwrap();
        assert_eq!(json, format!("\"{}\"", hue.as_str()));
    }
}

#[test]
fn parsing_is_case_insensitive() {
    assert_eq!(" Blue ".parse::<Hue>().unwrap(), Hue::Blue);
}

#[test]
fn unknown_hue_is_unsupported() {
    let err = "magenta".parse::<Hue>().unwrap_err();
    assert!(matches!(err, DetwallError::UnsupportedHue(_)));
    assert!(err.to_string().contains("teal"));
}

#[test]
fn saturations_are_unit_interval() {
    for hue in Hue::ALL {
        let (deg, sat) = hue.base();
        assert!((0.0..360.0).contains(&deg));
        assert!((0.0..=1.0).contains(&sat));
    }
    assert_eq!(Hue::Gray.base().1, 0.0);
}
