//! Property tests for the differ

use proptest::prelude::*;
use semrel_diff::{DiffOptions, diff, diff_against_baseline};
use semrel_foundation::{Action, NodeKind};
use semrel_model::{DeclarationModel, DeclarationNode, ModelBuilder, NodeId, NodeSpec};

fn type_text() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "string",
        "number",
        "string | number",
        "boolean",
        "'a' | 'b'",
        "Array<string>",
        "Promise<void>",
        "Map<string",
        "any",
        "never",
        "",
    ])
    .prop_map(str::to_string)
}

fn parameter() -> impl Strategy<Value = NodeSpec> {
    ("[a-d]", type_text(), any::<bool>()).prop_map(|(name, ty, optional)| {
        let spec = NodeSpec::parameter(name, ty);
        if optional { spec.optional() } else { spec }
    })
}

fn property() -> impl Strategy<Value = NodeSpec> {
    ("[p-r]", type_text(), any::<bool>(), any::<bool>()).prop_map(
        |(name, ty, readonly, deprecated)| {
            let mut spec = NodeSpec::property(name, ty);
            if readonly {
                spec = spec.readonly();
            }
            if deprecated {
                spec = spec.deprecated();
            }
            spec
        },
    )
}

fn export() -> impl Strategy<Value = NodeSpec> {
    prop_oneof![
        ("[f-h]", prop::collection::vec(parameter(), 0..4), type_text()).prop_map(
            |(name, params, returns)| {
                params
                    .into_iter()
                    .fold(NodeSpec::function(name), NodeSpec::child)
                    .returns(returns)
            }
        ),
        ("[I-K]", prop::collection::vec(property(), 0..4)).prop_map(|(name, props)| {
            props.into_iter().fold(NodeSpec::interface(name), NodeSpec::child)
        }),
        ("[v-w]", type_text()).prop_map(|(name, ty)| NodeSpec::variable(name, ty)),
    ]
}

fn model() -> impl Strategy<Value = DeclarationModel> {
    prop::collection::vec(export(), 0..5).prop_map(|exports| {
        exports
            .into_iter()
            .fold(ModelBuilder::new(), ModelBuilder::export)
            .build()
    })
}

/// Arena models whose handles may dangle, repeat, or point back up the tree.
fn raw_model() -> impl Strategy<Value = DeclarationModel> {
    let kind = prop::sample::select(vec![
        NodeKind::Function,
        NodeKind::Interface,
        NodeKind::Namespace,
        NodeKind::Parameter,
        NodeKind::Property,
    ]);
    let handle = (0u32..10).prop_map(NodeId::from_raw);
    let node = ("[a-c]", kind, type_text(), prop::collection::vec(handle.clone(), 0..4)).prop_map(
        |(name, kind, text, children)| {
            let mut node = DeclarationNode::new(name, kind);
            node.signature.text = text;
            node.children = children;
            node
        },
    );
    (
        prop::collection::vec(node, 1..9),
        prop::collection::vec(handle, 0..4),
    )
        .prop_map(|(nodes, exports)| DeclarationModel::from_parts(nodes, exports, Vec::new()))
}

proptest! {
    #[test]
    fn diff_never_panics(old in model(), new in model(), nested in any::<bool>()) {
        let options = DiffOptions::default().with_nested(nested);
        let result = diff(&old, &new, &options);
        for change in result.flatten() {
            prop_assert_eq!(change.context.is_nested, change.context.depth > 0);
        }
    }

    #[test]
    fn malformed_handles_never_block(
        old in raw_model(),
        new in raw_model(),
        nested in any::<bool>(),
    ) {
        let options = DiffOptions::default().with_nested(nested);
        let result = diff(&old, &new, &options);
        for change in result.flatten() {
            prop_assert!(change.context.depth <= semrel_diff::differ::MAX_DEPTH);
        }
        prop_assert!(diff(&old, &old, &options).is_empty());
    }

    #[test]
    fn self_diff_is_empty(m in model()) {
        prop_assert!(diff(&m, &m, &DiffOptions::flat()).is_empty());
        prop_assert!(diff(&m, &m, &DiffOptions::nested()).is_empty());
    }

    #[test]
    fn no_baseline_is_all_additions(m in model()) {
        let result = diff_against_baseline(None, &m, &DiffOptions::default());
        prop_assert!(!result.baseline);
        prop_assert!(result.changes.len() <= m.exports().len());
        for change in &result.changes {
            prop_assert_eq!(change.action(), Action::Added);
        }
    }
}
