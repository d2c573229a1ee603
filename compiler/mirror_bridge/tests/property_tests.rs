//! Property-based tests for the bridge.
//!
//! 1. Structural equality: two independently built host types with the same
//!    structure bridge to equal, equally hashed values.
//! 2. Registry bookkeeping: after any sequence of registrations and
//!    disposals, exactly the undisposed handles resolve.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use mirror_bridge::{BridgeType, HandleId, Registry, Session, StaleReferenceError};
use mirror_host::{MemoryHost, NodeId, PrimitiveKind, SymbolKind};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

// -- Type Strategies --

/// Shape of a host type to build.
#[derive(Clone, Debug)]
enum TypeTree {
    Primitive(PrimitiveKind),
    /// Usage of one of the fixture declarations.
    Named(usize),
    Array(Box<TypeTree>),
    Intersection(Vec<TypeTree>),
}

const NAMES: [&str; 4] = [
    "java.lang.String",
    "java.lang.Number",
    "java.io.Serializable",
    "java.lang.Runnable",
];

fn leaf_strategy() -> impl Strategy<Value = TypeTree> {
    prop_oneof![
        prop::sample::select(PrimitiveKind::ALL.to_vec()).prop_map(TypeTree::Primitive),
        (0..NAMES.len()).prop_map(TypeTree::Named),
    ]
}

fn type_strategy(depth: u32) -> BoxedStrategy<TypeTree> {
    if depth == 0 {
        return leaf_strategy().boxed();
    }
    prop_oneof![
        2 => leaf_strategy(),
        1 => type_strategy(depth - 1).prop_map(|t| TypeTree::Array(Box::new(t))),
        1 => prop::collection::vec(type_strategy(depth - 1), 2..4)
            .prop_map(TypeTree::Intersection),
    ]
    .boxed()
}

/// Build fresh host nodes for `tree`. Nothing is shared between calls
/// except the declarations.
fn build(host: &mut MemoryHost, declarations: &[NodeId], tree: &TypeTree) -> NodeId {
    match tree {
        TypeTree::Primitive(kind) => host.primitive_type(*kind),
        TypeTree::Named(index) => host.declared_type_of(declarations[*index], &[]),
        TypeTree::Array(component) => {
            let component = build(host, declarations, component);
            host.array_type(component)
        }
        TypeTree::Intersection(bounds) => {
            let bounds: Vec<_> = bounds
                .iter()
                .map(|bound| build(host, declarations, bound))
                .collect();
            host.intersection_type(&bounds)
        }
    }
}

fn fixture_host() -> (MemoryHost, Vec<NodeId>) {
    let mut host = MemoryHost::new();
    let declarations = NAMES
        .iter()
        .map(|name| host.declaration(SymbolKind::Class, name))
        .collect();
    (host, declarations)
}

// -- Registry Strategies --

#[derive(Clone, Debug)]
enum Op {
    Register,
    /// Dispose the n-th handle issued so far (modulo the count).
    Dispose(usize),
    DisposeAll,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Register),
        3 => any::<usize>().prop_map(Op::Dispose),
        1 => Just(Op::DisposeAll),
    ]
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Equal structure gives equal bridge types, whatever the host nodes.
    #[test]
    fn prop_structural_equality(tree in type_strategy(3)) {
        let (mut host, declarations) = fixture_host();
        let first = build(&mut host, &declarations, &tree);
        let second = build(&mut host, &declarations, &tree);
        prop_assert_ne!(first, second);

        let mut session = Session::new();
        let mut cx = session.bridge(&host);
        let a = cx.bridge_type(first, false).unwrap();
        let b = cx.bridge_type(second, false).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.canonical_text(&cx).unwrap(), b.canonical_text(&cx).unwrap());

        let set: FxHashSet<BridgeType> = [a, b].into_iter().collect();
        prop_assert_eq!(set.len(), 1);
    }

    /// The raw flag is part of identity for everything but primitives.
    #[test]
    fn prop_raw_flag_distinguishes(tree in type_strategy(3)) {
        let (mut host, declarations) = fixture_host();
        let node = build(&mut host, &declarations, &tree);

        let mut session = Session::new();
        let mut cx = session.bridge(&host);
        let plain = cx.bridge_type(node, false).unwrap();
        let raw = cx.bridge_type(node, true).unwrap();
        prop_assert!(raw.is_raw());
        if matches!(tree, TypeTree::Primitive(_)) {
            prop_assert_eq!(plain, raw);
        } else {
            prop_assert_ne!(plain, raw);
        }
    }

    /// Exactly the undisposed handles resolve, and the live count agrees.
    #[test]
    fn prop_registry_tracks_disposal(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut registry = Registry::new();
        let mut issued: Vec<(HandleId, NodeId, bool)> = Vec::new();

        for op in ops {
            match op {
                Op::Register => {
                    let node = NodeId::new(u32::try_from(issued.len()).unwrap());
                    issued.push((registry.register(node), node, true));
                }
                Op::Dispose(n) if !issued.is_empty() => {
                    let index = n % issued.len();
                    let entry = &mut issued[index];
                    prop_assert_eq!(registry.dispose(entry.0), entry.2);
                    entry.2 = false;
                }
                Op::Dispose(_) => {}
                Op::DisposeAll => {
                    let live = issued.iter().filter(|entry| entry.2).count();
                    prop_assert_eq!(registry.dispose_all(), live);
                    for entry in &mut issued {
                        entry.2 = false;
                    }
                }
            }

            for &(handle, node, live) in &issued {
                if live {
                    prop_assert_eq!(registry.resolve(handle), Ok(node));
                } else {
                    prop_assert_eq!(
                        registry.resolve(handle),
                        Err(StaleReferenceError::Disposed { handle })
                    );
                }
            }
            prop_assert_eq!(
                registry.live_count(),
                issued.iter().filter(|entry| entry.2).count()
            );
        }
    }
}
