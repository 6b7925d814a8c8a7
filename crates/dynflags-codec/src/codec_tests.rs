use dynflags_core::{TypeExpr, parse_type};

use crate::codec::{DecodePolicy, DynamicFlagCodec, decode, encode};
use crate::error::CodecError;
use crate::limits::WalkLimits;
use crate::walker::TypeShapeWalker;

fn ty(notation: &str) -> TypeExpr {
    parse_type(notation).unwrap()
}

/// `"FTF"` -> `[false, true, false]`.
fn bits(pattern: &str) -> Vec<bool> {
    pattern.chars().map(|c| c == 'T').collect()
}

fn render(flags: &[bool]) -> String {
    flags.iter().map(|&f| if f { 'T' } else { 'F' }).collect()
}

fn encoded(notation: &str) -> String {
    render(&encode(&ty(notation)).unwrap())
}

fn lenient() -> DynamicFlagCodec {
    DynamicFlagCodec::new().policy(DecodePolicy::Lenient)
}

#[test]
fn bare_dynamic() {
    assert_eq!(encoded("dynamic"), "T");
}

#[test]
fn arrays() {
    assert_eq!(encoded("dynamic[]"), "FT");
    assert_eq!(encoded("dynamic[][]"), "FFT");
    assert_eq!(encoded("dynamic[,]"), "FT");
}

#[test]
fn generic_base() {
    assert_eq!(encoded("Base1<dynamic>"), "FT");
    assert_eq!(encoded("Base2<dynamic, V>"), "FTF");
}

#[test]
fn nested_generic_is_one_container() {
    assert_eq!(
        encoded("Outer<T>.Inner<int, T>.InnerInner<Outer<dynamic>>"),
        "FFFFFT"
    );
    assert_eq!(encoded("Outer3.Inner3<dynamic>"), "FT");
}

#[test]
fn tuple_uses_carrier_slot() {
    assert_eq!(encoded("(dynamic, object, dynamic)"), "FTFT");
}

#[test]
fn long_tuple_continues_in_eighth_argument() {
    assert_eq!(
        encoded("(int, int, int, int, int, int, int, dynamic, dynamic)"),
        "FFFFFFFFFTT"
    );
}

#[test]
fn nullable_value_type() {
    assert_eq!(encoded("Outer<dynamic>.Inner<dynamic, Struct?>"), "FTTFF");
}

#[test]
fn pointers() {
    assert_eq!(encoded("int*[]"), "FFF");
    assert_eq!(encoded("Base<dynamic, int*>"), "FTFF");
}

#[test]
fn all_false_is_still_full_length() {
    assert_eq!(encoded("Dictionary<string, int[]>"), "FFFF");
    assert_eq!(encoded("object"), "F");
}

#[test]
fn derived_base_type() {
    let base = "Outer<dynamic>.Inner<Outer<dynamic>.Inner<T[], dynamic>.InnerInner<int>[], \
                dynamic>.InnerInner<dynamic>";
    assert_eq!(encoded(base), "FTFFTFFTFTT");
}

#[test]
fn nested_field_shapes() {
    let cases = [
        ("Outer<T>.Inner<int, T>.InnerInner<Outer<dynamic>>", "FFFFFT"),
        ("Outer<dynamic>.Inner<T, T>.InnerInner<T>", "FTFFF"),
        (
            "Outer<Outer<dynamic>.Inner<T, dynamic>>.Inner<dynamic, T>.InnerInner<T>",
            "FFTFTTFF",
        ),
        ("Outer<T>.Inner<dynamic, dynamic>.InnerInner<T>", "FFTTF"),
        (
            "Outer<T>.Inner<T, T>.InnerInner<Outer<dynamic>.Inner<T, dynamic>.InnerInner<int>>",
            "FFFFFTFTF",
        ),
        ("Outer<dynamic>.Inner<Outer<T>, T>.InnerInner<dynamic>", "FTFFFT"),
        ("Outer<dynamic>.Inner<dynamic, dynamic>.InnerInner<dynamic>", "FTTTT"),
        ("Outer<dynamic>.Inner<Outer<dynamic>, T>.InnerInner<dynamic>[]", "FFTFTFT"),
        (
            "Outer<dynamic>.Inner<Outer<dynamic>.Inner<T, dynamic>.InnerInner<int>, dynamic[]>\
             .InnerInner<dynamic>[][]",
            "FFFTFTFTFFTT",
        ),
        (
            "Outer<dynamic>.Inner<Outer<dynamic>.Inner<T[], dynamic>.InnerInner<int>[], dynamic>\
             .InnerInner<dynamic>[][]",
            "FFFTFFTFFTFTT",
        ),
    ];

    for (notation, expected) in cases {
        assert_eq!(encoded(notation), expected, "{notation}");
    }
}

#[test]
fn pointer_containing_base() {
    let base = "Base2<int*[], Outer<dynamic>.Inner<Outer<dynamic>.Inner<T[], dynamic>\
                .InnerInner<int*[][]>[], dynamic>.InnerInner<dynamic>[][]>";
    assert_eq!(encoded(base), "FFFFFFFTFFTFFTFFFFTT");
}

const CORPUS: &[&str] = &[
    "dynamic",
    "object",
    "int",
    "dynamic[]",
    "dynamic[][]",
    "object[,][]",
    "dynamic*",
    "int*[]",
    "Base1<dynamic>",
    "List<object>",
    "Dictionary<dynamic, List<dynamic[]>>",
    "Outer<T>.Inner<int, T>.InnerInner<Outer<dynamic>>",
    "Outer<dynamic>.Inner<dynamic, Struct?>",
    "Outer<dynamic>.Inner<Outer<dynamic>.Inner<T[], dynamic>.InnerInner<int>[], dynamic>.InnerInner<dynamic>[][]",
    "(dynamic, object, dynamic)",
    "(dynamic, (object, dynamic))[]",
    "(int, int, int, int, int, int, int, dynamic)",
    "(int, int, int, int, int, int, int, List<dynamic>)",
    "(int, int, int, int, int, int, int, (dynamic, object))",
    "(a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, dynamic)",
    "Func<(dynamic, int), dynamic*[]>",
];

#[test]
fn corpus_round_trips() {
    for notation in CORPUS {
        let original = ty(notation);
        let flags = encode(&original).unwrap();
        let decoded = decode(&original.erase(), &flags).unwrap();
        assert_eq!(decoded, original, "{notation}");
    }
}

#[test]
fn corpus_flag_count_matches_slot_count() {
    let walker = TypeShapeWalker::new();
    for notation in CORPUS {
        let original = ty(notation);
        let flags = encode(&original).unwrap();
        assert_eq!(flags.len(), walker.slot_count(&original).unwrap(), "{notation}");
        // Erasure never changes the shape.
        assert_eq!(
            flags.len(),
            walker.slot_count(original.erase().as_type()).unwrap(),
            "{notation}"
        );
    }
}

#[test]
fn corpus_true_flags_are_dynamic_leaves() {
    for notation in CORPUS {
        let original = ty(notation);
        let flags = encode(&original).unwrap();
        let trues = flags.iter().filter(|&&f| f).count();
        assert_eq!(trues, notation.matches("dynamic").count(), "{notation}");
        assert_eq!(trues > 0, original.contains_dynamic(), "{notation}");
    }
}

#[test]
fn decode_restores_tuple_sugar() {
    let skeleton = ty("(dynamic, object, dynamic)").erase();
    let decoded = decode(&skeleton, &bits("FTFT")).unwrap();
    assert!(matches!(decoded, TypeExpr::Tuple(ref elements) if elements.len() == 3));
    assert_eq!(decoded.to_string(), "(dynamic, object, dynamic)");
}

#[test]
fn decode_leaves_false_objects_alone() {
    let skeleton = ty("Dictionary<object, object>").erase();
    let decoded = decode(&skeleton, &bits("FFT")).unwrap();
    assert_eq!(decoded.to_string(), "Dictionary<object, dynamic>");
}

#[test]
fn decode_ignores_flag_on_container() {
    let skeleton = ty("object[]").erase();
    let decoded = decode(&skeleton, &bits("TT")).unwrap();
    assert_eq!(decoded, ty("dynamic[]"));
}

#[test]
fn decode_rejects_flag_on_named_leaf() {
    let skeleton = ty("List<int>").erase();
    let err = decode(&skeleton, &bits("FT")).unwrap_err();
    assert_eq!(
        err,
        CodecError::ShapeMismatch {
            slot: 1,
            found: "int".to_string()
        }
    );
    insta::assert_snapshot!(err, @"slot 1 is flagged dynamic but `int` cannot be dynamic");
}

#[test]
fn decode_rejects_wrong_length() {
    let skeleton = ty("List<object>").erase();

    let short = decode(&skeleton, &bits("F")).unwrap_err();
    assert_eq!(
        short,
        CodecError::FlagCountMismatch {
            expected: 2,
            actual: 1
        }
    );

    let long = decode(&skeleton, &bits("FTF")).unwrap_err();
    insta::assert_snapshot!(long, @"flag count mismatch: type has 2 slots, marker has 3 flags");
}

#[test]
fn decode_rejects_empty_flags() {
    let skeleton = ty("object").erase();
    let err = decode(&skeleton, &[]).unwrap_err();
    assert!(err.is_malformed_flags());
}

#[test]
fn lenient_ignores_wrong_length() {
    let skeleton = ty("List<object>").erase();
    let decoded = lenient().decode(&skeleton, &bits("FTF")).unwrap();
    assert_eq!(decoded, ty("List<object>"));
}

#[test]
fn lenient_never_applies_a_partial_prefix() {
    // Slot 1 is valid on its own; slot 2 is not.
    let skeleton = ty("Dictionary<object, int>").erase();

    let strict = DynamicFlagCodec::new().decode(&skeleton, &bits("FTT"));
    assert!(matches!(strict, Err(CodecError::ShapeMismatch { slot: 2, .. })));

    let decoded = lenient().decode(&skeleton, &bits("FTT")).unwrap();
    assert_eq!(decoded, ty("Dictionary<object, int>"));
}

#[test]
fn lenient_applies_well_formed_flags() {
    let skeleton = ty("Dictionary<object, int>").erase();
    let decoded = lenient().decode(&skeleton, &bits("FTF")).unwrap();
    assert_eq!(decoded, ty("Dictionary<dynamic, int>"));
}

#[test]
fn recursion_limit() {
    let limits = WalkLimits::new().recursion_limit(2);
    let mut codec = DynamicFlagCodec::new().limits(limits);

    assert_eq!(codec.encode(&ty("dynamic[][]")).unwrap(), bits("FFT"));

    let err = codec.encode(&ty("dynamic[][][]")).unwrap_err();
    assert_eq!(err, CodecError::RecursionLimitExceeded { limit: 2 });
    assert!(!err.is_malformed_flags());
}

#[test]
fn lenient_does_not_hide_recursion_limit() {
    let limits = WalkLimits::new().recursion_limit(1);
    let mut codec = lenient().limits(limits);
    let skeleton = ty("List<List<object>>").erase();

    let err = codec.decode(&skeleton, &bits("FFT")).unwrap_err();
    assert_eq!(err, CodecError::RecursionLimitExceeded { limit: 1 });
}

#[test]
fn default_configuration() {
    let codec = DynamicFlagCodec::new();
    assert_eq!(codec.get_policy(), DecodePolicy::Strict);
    assert_eq!(codec.get_limits().get_recursion_limit(), 512);
}

#[test]
fn deep_nesting_within_default_limit() {
    let mut original = TypeExpr::DynamicPlaceholder;
    for _ in 0..500 {
        original = TypeExpr::array(original);
    }

    let flags = encode(&original).unwrap();
    assert_eq!(flags.len(), 501);
    assert_eq!(flags.last(), Some(&true));
    assert_eq!(decode(&original.erase(), &flags).unwrap(), original);
}

#[test]
fn codec_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DynamicFlagCodec>();
}
