use dynflags_codec::{Marker, RefKind};

use super::run_common::{FlagsError, SiteInput, format_flags, format_site, parse_marker};

#[test]
fn marker_keywords() {
    assert_eq!(parse_marker("none"), Ok(Marker::Absent));
    assert_eq!(parse_marker(" bare "), Ok(Marker::Bare));
}

#[test]
fn flag_lists() {
    assert_eq!(
        parse_marker("false,true"),
        Ok(Marker::Flags(vec![false, true]))
    );
    assert_eq!(
        parse_marker("[0, 1, 1]"),
        Ok(Marker::Flags(vec![false, true, true]))
    );
    assert_eq!(parse_marker("[]"), Ok(Marker::Flags(Vec::new())));
}

#[test]
fn single_true_stays_explicit() {
    // Only the `bare` keyword means the zero-argument marker.
    assert_eq!(parse_marker("true"), Ok(Marker::Flags(vec![true])));
}

#[test]
fn invalid_flags() {
    assert_eq!(parse_marker(""), Err(FlagsError::Empty));

    let err = parse_marker("false,yes").unwrap_err();
    assert_eq!(
        err,
        FlagsError::InvalidFlag {
            token: "yes".to_string(),
            position: 1
        }
    );
    insta::assert_snapshot!(err, @"invalid flag `yes` at position 1 (expected true, false, 1 or 0)");
}

#[test]
fn formatting() {
    assert_eq!(format_flags(&[false, true]), "[false, true]");
    assert_eq!(format_flags(&[]), "[]");

    let input = SiteInput {
        ty: "dynamic[]".to_string(),
        ref_kind: RefKind::Ref,
        modifiers: 1,
        max_depth: 512,
    };
    assert_eq!(format_site(&input.load()), "modifier ref dynamic[]");
    assert_eq!(format_site(&input.load_erased()), "modifier ref object[]");
}

#[test]
fn site_input_limits() {
    let input = SiteInput {
        ty: "int".to_string(),
        ref_kind: RefKind::None,
        modifiers: 0,
        max_depth: 7,
    };
    assert_eq!(input.limits().get_recursion_limit(), 7);
}
