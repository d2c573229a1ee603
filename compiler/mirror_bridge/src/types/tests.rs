#![allow(clippy::unwrap_used, clippy::expect_used)]

use mirror_host::{MemoryHost, PrimitiveKind, SymbolKind};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;

use super::*;
use crate::{ElementKind, Session};

struct Fixture {
    host: MemoryHost,
    string: NodeId,
    list_of_string: NodeId,
    serializable: NodeId,
    comparable: NodeId,
}

fn fixture() -> Fixture {
    let mut host = MemoryHost::new();
    let string_decl = host.declaration(SymbolKind::Class, "java.lang.String");
    let list_decl = host.declaration(SymbolKind::Interface, "java.util.List");
    let serializable_decl = host.declaration(SymbolKind::Interface, "java.io.Serializable");
    let comparable_decl = host.declaration(SymbolKind::Interface, "java.lang.Comparable");
    let string = host.declared_type_of(string_decl, &[]);
    let list_of_string = host.declared_type_of(list_decl, &[string]);
    let serializable = host.declared_type_of(serializable_decl, &[]);
    let comparable = host.declared_type_of(comparable_decl, &[]);
    Fixture {
        host,
        string,
        list_of_string,
        serializable,
        comparable,
    }
}

#[test]
fn primitive_kinds_and_keywords() {
    let mut host = MemoryHost::new();
    let nodes: Vec<_> = PrimitiveKind::ALL
        .iter()
        .map(|&kind| (kind, host.primitive_type(kind)))
        .collect();

    let mut session = Session::new();
    let mut cx = session.bridge(&host);
    for (kind, node) in nodes {
        let ty = cx.bridge_type(node, false).unwrap();
        assert_eq!(ty.kind(), TypeKind::from(kind));
        assert!(ty.kind().is_primitive());
        assert_eq!(ty.canonical_text(&cx).unwrap(), kind.keyword());
        assert_eq!(ty.key(), &TypeKey::Primitive(kind));
    }
}

#[test]
fn leaf_kinds() {
    let mut host = MemoryHost::new();
    let void = host.void_type();
    let null = host.null_type();
    let error = host.error_type("Missing");

    let mut session = Session::new();
    let mut cx = session.bridge(&host);
    assert_eq!(cx.bridge_type(void, false).unwrap().kind(), TypeKind::Void);
    let null = cx.bridge_type(null, false).unwrap();
    assert_eq!(null.kind(), TypeKind::Null);
    assert_eq!(null, BridgeType::no_lower_bound());
    let error = cx.bridge_type(error, false).unwrap();
    assert_eq!(error.kind(), TypeKind::Error);
    assert_eq!(error.canonical_text(&cx).unwrap(), "Missing");
}

#[test]
fn array_component_keeps_raw_flag() {
    let mut fx = fixture();
    let array = fx.host.array_type(fx.list_of_string);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    for raw in [false, true] {
        let ty = cx.bridge_type(array, raw).unwrap();
        assert_eq!(ty.kind(), TypeKind::Array);
        let component = ty.as_array().unwrap().component_type(&mut cx).unwrap();
        assert_eq!(component.kind(), TypeKind::Declared);
        assert_eq!(component.is_raw(), raw);
    }
}

#[test]
fn array_canonical_text_matches_host() {
    let mut fx = fixture();
    let array = fx.host.array_type(fx.string);
    let nested = fx.host.array_type(array);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(nested, false).unwrap();
    assert_eq!(ty.canonical_text(&cx).unwrap(), "java.lang.String[][]");
}

#[test]
fn intersection_bounds_in_declaration_order() {
    let mut fx = fixture();
    let both = fx.host.intersection_type(&[fx.serializable, fx.comparable]);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(both, true).unwrap();
    let bounds = ty.as_intersection().unwrap().bounds(&mut cx).unwrap();
    let texts: Vec<_> = bounds
        .iter()
        .map(|bound| bound.canonical_text(&cx).unwrap())
        .collect();
    assert_eq!(texts, vec!["java.io.Serializable", "java.lang.Comparable"]);
    assert!(bounds.iter().all(BridgeType::is_raw));
    assert_eq!(
        ty.canonical_text(&cx).unwrap(),
        "java.io.Serializable&java.lang.Comparable"
    );
}

#[test]
fn upper_bound_without_declared_bound_is_top_type() {
    let mut fx = fixture();
    let owner = fx.host.declaration(SymbolKind::Class, "Box");
    let parameter = fx.host.declare_type_parameter(owner, "T", &[]);
    let variable = fx.host.type_variable(parameter);
    let top = fx.host.object_type();

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(variable, false).unwrap();
    let upper = ty.as_type_variable().unwrap().upper_bound(&mut cx).unwrap();
    assert_eq!(upper, cx.bridge_type(top, false).unwrap());
    assert_eq!(upper.canonical_text(&cx).unwrap(), "java.lang.Object");
}

#[test]
fn upper_bound_with_one_bound_is_not_wrapped() {
    let mut fx = fixture();
    let owner = fx.host.declaration(SymbolKind::Class, "Box");
    let parameter = fx.host.declare_type_parameter(owner, "T", &[fx.serializable]);
    let variable = fx.host.type_variable(parameter);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(variable, false).unwrap();
    let upper = ty.as_type_variable().unwrap().upper_bound(&mut cx).unwrap();
    assert_eq!(upper.kind(), TypeKind::Declared);
    assert_eq!(upper, cx.bridge_type(fx.serializable, false).unwrap());
}

#[test]
fn upper_bound_with_two_bounds_is_intersection() {
    let mut fx = fixture();
    let owner = fx.host.declaration(SymbolKind::Class, "Box");
    let parameter = fx
        .host
        .declare_type_parameter(owner, "T", &[fx.serializable, fx.comparable]);
    let variable = fx.host.type_variable(parameter);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(variable, true).unwrap();
    let upper = ty.as_type_variable().unwrap().upper_bound(&mut cx).unwrap();
    assert_eq!(upper.kind(), TypeKind::Intersection);
    assert!(upper.is_raw());

    let bounds = upper.as_intersection().unwrap().bounds(&mut cx).unwrap();
    assert_eq!(bounds.len(), 2);
    assert_eq!(bounds[0], cx.bridge_type(fx.serializable, true).unwrap());
    assert_eq!(bounds[1], cx.bridge_type(fx.comparable, true).unwrap());
}

#[test]
fn lower_bound_is_null_sentinel() {
    let mut fx = fixture();
    let owner = fx.host.declaration(SymbolKind::Class, "Box");
    let parameter = fx.host.declare_type_parameter(owner, "T", &[fx.serializable]);
    let variable = fx.host.type_variable(parameter);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(variable, false).unwrap();
    let lower = ty.as_type_variable().unwrap().lower_bound(&cx).unwrap();
    assert_eq!(lower.kind(), TypeKind::Null);
    assert_eq!(lower.canonical_text(&cx).unwrap(), "null");
}

#[test]
fn type_variable_text_and_element() {
    let mut fx = fixture();
    let owner = fx.host.declaration(SymbolKind::Class, "Box");
    let parameter = fx.host.declare_type_parameter(owner, "T", &[]);
    let variable = fx.host.type_variable(parameter);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(variable, false).unwrap();
    assert_eq!(ty.canonical_text(&cx).unwrap(), "T");

    let element = ty.as_type_variable().unwrap().as_element(&mut cx).unwrap();
    assert_eq!(element.kind(), ElementKind::TypeParameter);
    let generic = element.generic_element(&mut cx).unwrap().unwrap();
    assert_eq!(generic.simple_name(&cx).unwrap(), "Box");
}

#[test]
fn raw_declared_type_erases_arguments() {
    let fx = fixture();

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let parameterized = cx.bridge_type(fx.list_of_string, false).unwrap();
    let raw = cx.bridge_type(fx.list_of_string, true).unwrap();

    assert_eq!(
        parameterized.canonical_text(&cx).unwrap(),
        "java.util.List<java.lang.String>"
    );
    assert_eq!(raw.canonical_text(&cx).unwrap(), "java.util.List");
    assert_ne!(parameterized, raw);

    let arguments = parameterized
        .as_declared()
        .unwrap()
        .type_arguments(&mut cx)
        .unwrap();
    assert_eq!(arguments, vec![cx.bridge_type(fx.string, false).unwrap()]);
    assert!(raw
        .as_declared()
        .unwrap()
        .type_arguments(&mut cx)
        .unwrap()
        .is_empty());
}

#[test]
fn declared_type_element() {
    let fx = fixture();

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(fx.string, false).unwrap();
    let element = ty.as_declared().unwrap().as_element(&mut cx).unwrap().unwrap();
    assert_eq!(element.kind(), ElementKind::Class);
    assert_eq!(element.simple_name(&cx).unwrap(), "java.lang.String");
}

#[test]
fn equality_is_structural() {
    let mut fx = fixture();
    // Two distinct host nodes with the same structure.
    let first = fx.host.array_type(fx.string);
    let second = fx.host.array_type(fx.string);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let a = cx.bridge_type(first, false).unwrap();
    let b = cx.bridge_type(second, false).unwrap();
    let c = cx.bridge_type(first, true).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);

    let set: FxHashSet<BridgeType> = [a.clone(), b, c].into_iter().collect();
    assert_eq!(set.len(), 2);

    // Disposal does not change identity.
    a.dispose(&mut cx);
    assert!(set.contains(&a));
}

#[test]
fn variant_views_reject_other_kinds() {
    let fx = fixture();

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(fx.string, false).unwrap();
    assert!(ty.as_array().is_none());
    assert!(ty.as_intersection().is_none());
    assert!(ty.as_type_variable().is_none());
    assert!(ty.as_declared().is_some());
}

#[test]
fn disposed_type_is_stale() {
    let mut fx = fixture();
    let array = fx.host.array_type(fx.string);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(array, false).unwrap();
    assert!(ty.dispose(&mut cx));
    assert!(!ty.dispose(&mut cx));

    assert!(matches!(
        ty.canonical_text(&cx),
        Err(StaleReferenceError::Disposed { .. })
    ));
    let err = ty.as_array().unwrap().component_type(&mut cx).unwrap_err();
    assert!(err.is_stale());
    // Tag dispatch still works on a disposed value.
    assert_eq!(ty.kind(), TypeKind::Array);
}

#[test]
fn type_variable_disposes_both_handles() {
    let mut fx = fixture();
    let owner = fx.host.declaration(SymbolKind::Class, "Box");
    let parameter = fx.host.declare_type_parameter(owner, "T", &[]);
    let variable = fx.host.type_variable(parameter);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let ty = cx.bridge_type(variable, false).unwrap();
    assert_eq!(cx.registry().live_count(), 2);
    ty.dispose(&mut cx);
    assert_eq!(cx.registry().live_count(), 0);
}

#[test]
fn host_invalidation_makes_type_stale() {
    let mut fx = fixture();
    let array = fx.host.array_type(fx.string);

    let mut session = Session::new();
    let ty = session.bridge(&fx.host).bridge_type(array, false).unwrap();

    fx.host.invalidate(array);
    let cx = session.bridge(&fx.host);
    assert_eq!(
        ty.canonical_text(&cx),
        Err(StaleReferenceError::HostInvalidated { node: array })
    );
}

#[test]
fn construction_from_invalid_node_fails() {
    let mut fx = fixture();
    fx.host.reparse();

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let err = cx.bridge_type(fx.string, false).unwrap_err();
    assert_eq!(
        err,
        BridgeError::Stale(StaleReferenceError::HostInvalidated { node: fx.string })
    );
    assert_eq!(cx.registry().live_count(), 0);
}

struct KindNames;

impl TypeVisitor for KindNames {
    type Output = String;

    fn visit_default(&mut self, ty: &BridgeType) -> String {
        ty.kind().name().to_lowercase()
    }

    fn visit_primitive(&mut self, _ty: &BridgeType, kind: PrimitiveKind) -> String {
        format!("primitive {kind}")
    }

    fn visit_array(&mut self, ty: ArrayType<'_>) -> String {
        format!("array (raw: {})", ty.ty().is_raw())
    }
}

#[test]
fn visitor_dispatches_by_variant() {
    let mut fx = fixture();
    let int = fx.host.primitive_type(PrimitiveKind::Int);
    let array = fx.host.array_type(int);

    let mut session = Session::new();
    let mut cx = session.bridge(&fx.host);
    let int = cx.bridge_type(int, false).unwrap();
    let array = cx.bridge_type(array, true).unwrap();
    let declared = cx.bridge_type(fx.string, false).unwrap();

    let mut visitor = KindNames;
    assert_eq!(int.accept(&mut visitor), "primitive int");
    assert_eq!(array.accept(&mut visitor), "array (raw: true)");
    assert_eq!(declared.accept(&mut visitor), "declared");
    assert_eq!(BridgeType::no_lower_bound().accept(&mut visitor), "null");
}
