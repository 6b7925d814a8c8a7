use dynflags_core::{ModelError, TypeExpr, parse_type};

use crate::codec::{DecodePolicy, DynamicFlagCodec};
use crate::error::CodecError;
use crate::marker::Marker;
use crate::site::{RefKind, SignatureSite};

fn site(notation: &str) -> SignatureSite {
    SignatureSite::new(parse_type(notation).unwrap())
}

fn encode_site(site: &SignatureSite) -> Vec<bool> {
    DynamicFlagCodec::new().encode_site(site).unwrap()
}

#[test]
fn by_value_site_has_no_prefix() {
    let site = site("dynamic");
    assert_eq!(site.prefix_len(), 0);
    assert_eq!(encode_site(&site), vec![true]);
}

#[test]
fn ref_dynamic() {
    let site = site("dynamic").by_ref(RefKind::Ref);
    assert_eq!(encode_site(&site), vec![false, true]);
}

#[test]
fn modifiers_precede_ref_kind() {
    let site = site("dynamic[]").custom_modifiers(2).by_ref(RefKind::Out);
    assert_eq!(site.prefix_len(), 3);
    assert_eq!(
        site.prefix_labels().collect::<Vec<_>>(),
        vec!["modifier", "modifier", "out"]
    );
    assert_eq!(encode_site(&site), vec![false, false, false, false, true]);
}

#[test]
fn in_counts_as_by_ref() {
    assert!(RefKind::In.is_by_ref());
    assert!(!RefKind::None.is_by_ref());
    assert_eq!(site("object").by_ref(RefKind::In).prefix_len(), 1);
}

#[test]
fn ref_kind_names() {
    for name in RefKind::NAMES {
        let kind = RefKind::from_name(name).unwrap();
        assert_eq!(kind.name(), name);
    }
    assert_eq!(RefKind::from_name("byref"), None);
}

#[test]
fn site_round_trips() {
    let original = site("Dictionary<dynamic, (int, dynamic)>")
        .custom_modifiers(1)
        .by_ref(RefKind::Ref);
    let flags = encode_site(&original);
    let decoded = DynamicFlagCodec::new()
        .decode_site(&original.erase(), &flags)
        .unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn flagged_prefix_is_rejected() {
    let skeleton = site("object").by_ref(RefKind::Ref).erase();
    let err = DynamicFlagCodec::new()
        .decode_site(&skeleton, &[true, true])
        .unwrap_err();
    assert_eq!(
        err,
        CodecError::ShapeMismatch {
            slot: 0,
            found: "ref".to_string()
        }
    );
}

#[test]
fn type_errors_report_site_positions() {
    let skeleton = site("List<int>").by_ref(RefKind::Ref).erase();
    let err = DynamicFlagCodec::new()
        .decode_site(&skeleton, &[false, false, true])
        .unwrap_err();
    assert_eq!(
        err,
        CodecError::ShapeMismatch {
            slot: 2,
            found: "int".to_string()
        }
    );
}

#[test]
fn count_covers_prefix_and_type() {
    let skeleton = site("object[]").custom_modifiers(1).erase();
    let err = DynamicFlagCodec::new()
        .decode_site(&skeleton, &[false, true])
        .unwrap_err();
    assert_eq!(
        err,
        CodecError::FlagCountMismatch {
            expected: 3,
            actual: 2
        }
    );
}

#[test]
fn lenient_keeps_site_unchanged() {
    let skeleton = site("object").by_ref(RefKind::Ref).erase();
    let decoded = DynamicFlagCodec::new()
        .policy(DecodePolicy::Lenient)
        .decode_site(&skeleton, &[true, true])
        .unwrap();
    assert_eq!(decoded.ty, TypeExpr::ExplicitObject);
    assert_eq!(decoded.ref_kind, RefKind::Ref);
}

#[test]
fn bare_marker_mismatch_reports_type_slot() {
    let skeleton = site("int").by_ref(RefKind::Ref).custom_modifiers(2).erase();
    let err = DynamicFlagCodec::new()
        .decode_site_marker(&skeleton, &Marker::Bare)
        .unwrap_err();
    assert_eq!(
        err,
        CodecError::ShapeMismatch {
            slot: 3,
            found: "int".to_string()
        }
    );

    let decoded = DynamicFlagCodec::new()
        .policy(DecodePolicy::Lenient)
        .decode_site_marker(&skeleton, &Marker::Bare)
        .unwrap();
    assert_eq!(decoded, site("int").by_ref(RefKind::Ref).custom_modifiers(2));
}

#[test]
fn try_erase_keeps_prefix() {
    let site = site("dynamic[][]").by_ref(RefKind::Out);
    let erased = site.try_erase(2).unwrap();
    assert_eq!(erased, site.erase());
    assert_eq!(erased.ref_kind, RefKind::Out);
    assert_eq!(site.try_erase(1), Err(ModelError::TooDeep { limit: 1 }));
}
