use super::*;

#[test]
fn parses_both_tokens() {
    let o = StartPointOffset::parse("shapeW25WH60Hpng");
    assert_eq!(o.width, 0.25);
    assert_eq!(o.height, 0.6);
    assert!(o.is_set());
}

#[test]
fn token_order_is_irrelevant() {
    let o = StartPointOffset::parse("H60HshapeW25W");
    assert_eq!(o.width, 0.25);
    assert_eq!(o.height, 0.6);
}

#[test]
fn missing_height_leaves_axis_unset() {
    let o = StartPointOffset::parse("shapeW25W");
    assert_eq!(o.width, 0.25);
    assert_eq!(o.height, OFFSET_UNSET);
    assert!(!o.is_set());
}

#[test]
fn no_tokens_means_fully_unset() {
    let o = StartPointOffset::parse("shapeXYZ");
    assert_eq!(o, StartPointOffset::UNSET);
    assert!(!o.is_set());
}

#[test]
fn malformed_digits_fall_back_to_unset() {
    assert_eq!(StartPointOffset::parse("WxyzW").width, OFFSET_UNSET);
    assert_eq!(StartPointOffset::parse("WW").width, OFFSET_UNSET);
    // an unclosed token never parses
    assert_eq!(StartPointOffset::parse("W25").width, OFFSET_UNSET);
}

#[test]
fn negative_percentages_parse_but_never_show_a_mark() {
    let o = StartPointOffset::parse("W-5WH60H");
    assert_eq!(o.width, -0.05);
    assert!(!o.is_set());
    assert_eq!(o.resolve(PixelRect::new(0, 0, 100, 100)), None);
}

#[test]
fn resolve_scales_into_bounds() {
    let o = StartPointOffset::parse("W25WH60H");
    let p = o.resolve(PixelRect::new(100, 50, 300, 250)).unwrap();
    assert_eq!(p.x, 150.0);
    assert!((p.y - 170.0).abs() < 1e-4);
}

#[test]
fn unset_offset_resolves_to_nothing() {
    assert_eq!(
        StartPointOffset::UNSET.resolve(PixelRect::new(0, 0, 10, 10)),
        None
    );
}
