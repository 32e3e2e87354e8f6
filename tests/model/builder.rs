//! Integration tests for ModelBuilder and DeclarationModel

use semrel_foundation::NodeKind;
use semrel_model::{
    DiagnosticSeverity, ModelBuilder, ModelDiagnostic, Modifier, NodeSpec, Span, Visibility,
};

#[test]
fn nested_specs_become_handles() {
    let model = ModelBuilder::new()
        .export(
            NodeSpec::class("Account")
                .child(NodeSpec::property("id", "string").readonly())
                .child(NodeSpec::method("close").param("reason", "string").returns("void")),
        )
        .build();

    let account = model.export("Account").unwrap();
    let close = model.child(account, "close").unwrap();
    let reason = model.child(close, "reason").unwrap();

    assert_eq!(model.node(account).unwrap().kind, NodeKind::Class);
    assert_eq!(model.node(reason).unwrap().kind, NodeKind::Parameter);
    assert_eq!(
        model.node(close).unwrap().signature.returns.as_deref(),
        Some("void")
    );
    assert!(model.node(model.child(account, "id").unwrap()).unwrap().has(Modifier::Readonly));
    assert_eq!(model.len(), 4);
}

#[test]
fn node_facets() {
    let model = ModelBuilder::new()
        .export(
            NodeSpec::function("connect")
                .child(
                    NodeSpec::parameter("timeout", "number")
                        .optional()
                        .default_value("30"),
                )
                .deprecated(),
        )
        .export(NodeSpec::variable("secret", "string").modifier(Modifier::Private))
        .build();

    let connect = model.node(model.export("connect").unwrap()).unwrap();
    assert!(connect.is_deprecated());
    let timeout = model.node(connect.children[0]).unwrap();
    assert!(timeout.is_optional());
    assert_eq!(timeout.default_value(), Some("30"));

    let secret = model.node(model.export("secret").unwrap()).unwrap();
    assert_eq!(secret.visibility(), Visibility::Private);
    assert!(Visibility::Public < Visibility::Private);
}

#[test]
fn diagnostics_and_spans_are_kept() {
    let model = ModelBuilder::new()
        .export(NodeSpec::function("f").span(Span::new(10, 20, 2, 1)))
        .diagnostic(ModelDiagnostic::new(DiagnosticSeverity::Warning, "skipped a declaration"))
        .build();

    assert_eq!(model.diagnostics().len(), 1);
    let f = model.node(model.export("f").unwrap()).unwrap();
    assert_eq!(f.span.len(), 10);
}
