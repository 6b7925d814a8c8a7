use crate::types::TypeExpr;

fn leaf(name: &str) -> TypeExpr {
    TypeExpr::named(name)
}

#[test]
fn display_leaves() {
    assert_eq!(TypeExpr::DynamicPlaceholder.to_string(), "dynamic");
    assert_eq!(TypeExpr::ExplicitObject.to_string(), "object");
    assert_eq!(leaf("Struct").to_string(), "Struct");
}

#[test]
fn display_arrays_and_pointers() {
    assert_eq!(TypeExpr::array(leaf("dynamic")).to_string(), "dynamic[]");
    assert_eq!(
        TypeExpr::array_of_rank(leaf("int"), 3).unwrap().to_string(),
        "int[,,]"
    );
    assert_eq!(
        TypeExpr::array(TypeExpr::pointer(leaf("int"))).to_string(),
        "int*[]"
    );
}

#[test]
fn display_nested_generic() {
    let ty = TypeExpr::nested([
        ("Outer", vec![leaf("T")]),
        ("Inner", vec![leaf("int"), leaf("T")]),
        (
            "InnerInner",
            vec![TypeExpr::generic("Outer", vec![leaf("dynamic")])],
        ),
    ])
    .unwrap();
    assert_eq!(
        ty.to_string(),
        "Outer<T>.Inner<int, T>.InnerInner<Outer<dynamic>>"
    );
}

#[test]
fn display_non_generic_enclosing_level() {
    let ty = TypeExpr::nested([("Outer3", vec![]), ("Inner3", vec![leaf("dynamic")])]).unwrap();
    assert_eq!(ty.to_string(), "Outer3.Inner3<dynamic>");
}

#[test]
fn display_nullable_and_tuple() {
    assert_eq!(TypeExpr::nullable(leaf("Struct")).to_string(), "Struct?");
    let ty = TypeExpr::tuple(vec![leaf("dynamic"), leaf("object"), leaf("dynamic")]).unwrap();
    assert_eq!(ty.to_string(), "(dynamic, object, dynamic)");
}

#[test]
fn checked_shapes_parse_back() {
    let checked = [
        TypeExpr::nested([("Outer", vec![leaf("T")]), ("Inner", vec![leaf("dynamic")])]).unwrap(),
        TypeExpr::tuple(vec![leaf("int"), TypeExpr::array(leaf("dynamic"))]).unwrap(),
        TypeExpr::array_of_rank(TypeExpr::nullable(leaf("Struct")), 2).unwrap(),
    ];
    for ty in checked {
        assert_eq!(crate::parse_type(&ty.to_string()), Ok(ty));
    }
}

#[test]
fn unchecked_shapes_still_render() {
    assert_eq!(TypeExpr::generic("X", vec![]).to_string(), "X");
    assert_eq!(TypeExpr::Tuple(vec![leaf("int")]).to_string(), "(int)");
    assert_eq!(
        crate::parse_type("X"),
        Ok(TypeExpr::Leaf("X".to_string()))
    );
}
