use crate::foundation::core::Rgba8;
use crate::turtle::palette::{Palette, ResolvedColor};

#[test]
fn named_lookup_wins_over_literal_parse() {
    let p = Palette::default();
    assert_eq!(
        p.resolve("light_green").unwrap(),
        ResolvedColor::Named(Rgba8::rgb(0xc5, 0xe8, 0xc8))
    );
    assert_eq!(
        p.resolve("flame_orange").unwrap(),
        ResolvedColor::Named(Rgba8::rgb(0xff, 0x66, 0x00))
    );
}

#[test]
fn miss_falls_back_to_hex_literal() {
    let p = Palette::default();
    assert_eq!(
        p.resolve("#2F4F4F").unwrap(),
        ResolvedColor::Literal(Rgba8::rgb(0x2f, 0x4f, 0x4f))
    );
    assert_eq!(
        p.resolve("#00000033").unwrap(),
        ResolvedColor::Literal(Rgba8::rgba(0, 0, 0, 0x33))
    );
}

#[test]
fn css_name_fallbacks() {
    let p = Palette::default();
    assert_eq!(p.resolve("white").unwrap().rgba(), Rgba8::WHITE);
    assert_eq!(p.resolve("Gold").unwrap().rgba(), Rgba8::rgb(0xff, 0xd7, 0x00));
    assert_eq!(p.resolve("grey").unwrap().rgba(), p.resolve("gray").unwrap().rgba());
}

#[test]
fn double_miss_is_an_error() {
    let p = Palette::default();
    let err = p.resolve("not_a_color").unwrap_err();
    assert!(err.to_string().contains("not_a_color"));
    assert!(p.resolve("#12345").is_err());
    assert!(p.resolve("#zzzzzz").is_err());
}

#[test]
fn non_ascii_hex_literal_is_rejected_not_a_panic() {
    let p = Palette::default();
    // 6 bytes but a multi-byte char straddles the first slice boundary.
    assert!(p.resolve("#a\u{e9}bab").is_err());
    assert!(p.resolve("#\u{3b1}\u{3b1}\u{3b2}\u{3b2}").is_err());
    // Same path through the serde impl, as used by palette JSON files.
    assert!(serde_json::from_str::<Rgba8>("\"#a\u{e9}bab\"").is_err());
}

#[test]
fn default_confetti_matches_theme() {
    let p = Palette::default();
    assert_eq!(p.confetti().len(), 8);
    assert_eq!(p.confetti()[0], Rgba8::rgb(0x4c, 0xaf, 0x50));
    p.validate().unwrap();
}

#[test]
fn empty_confetti_fails_validation() {
    let p: Palette = serde_json::from_str(r##"{"confetti": []}"##).unwrap();
    assert!(p.validate().is_err());
}

#[test]
fn partial_json_keeps_defaults() {
    let p: Palette = serde_json::from_str(r##"{"colors": {"teal": "#112233"}}"##).unwrap();
    // Overridden table replaces the whole map, confetti stays default.
    assert_eq!(p.resolve("teal").unwrap().rgba(), Rgba8::rgb(0x11, 0x22, 0x33));
    assert_eq!(p.confetti().len(), 8);
}

#[test]
fn rgba_serde_round_trips_as_hex_string() {
    let opaque = Rgba8::rgb(0x87, 0xce, 0xeb);
    let json = serde_json::to_string(&opaque).unwrap();
    assert_eq!(json, r##""#87ceeb""##);
    assert_eq!(serde_json::from_str::<Rgba8>(&json).unwrap(), opaque);

    let translucent = Rgba8::rgba(0, 0, 0, 51);
    let json = serde_json::to_string(&translucent).unwrap();
    assert_eq!(json, r##""#00000033""##);
    assert_eq!(serde_json::from_str::<Rgba8>(&json).unwrap(), translucent);
}
