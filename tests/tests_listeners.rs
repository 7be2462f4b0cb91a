#![allow(clippy::unwrap_used)]
//! Listener registry behavior: enrichment, ordering, and failure handling.

mod helpers;

use std::cell::RefCell;
use std::rc::Rc;

use helpers::{Fixture, foreign_file, unit_file};
use stubgen::event::NodeAdded;
use stubgen::listeners::{
    ForeignConstantsListener, Listener, MethodsListener, MixinsListener, SubconstantsListener,
};
use stubgen::pipeline::{CompileError, Pipeline};
use stubgen::runtime::trackers::MixinKind;
use stubgen::runtime::{MethodDef, Param};
use stubgen::tree::{Node, ScopeKind};

#[test]
fn test_mixins_are_attached_in_registration_order() {
    let mut fixture = Fixture::new();
    let helper = fixture.universe.define_module("Acme::Helper");
    fixture.universe.add_file(helper, unit_file("helper.src"));
    let util = fixture.universe.define_module("Acme::Util");
    fixture.universe.add_file(util, unit_file("util.src"));
    let widget = fixture.universe.define_class("Acme::Widget", None);
    fixture.universe.add_file(widget, unit_file("widget.src"));

    fixture.mixins.register(
        widget,
        helper,
        MixinKind::Include,
        Some(unit_file("widget.src").into()),
    );
    fixture
        .mixins
        .register(widget, util, MixinKind::Extend, None);

    let mut pipeline = fixture.enriched_pipeline();
    pipeline.seed("Acme::Widget");
    pipeline.compile().unwrap();

    let tree = pipeline.tree();
    let scope = tree.get(tree.roots()[0]).and_then(Node::as_scope).unwrap();
    assert_eq!(scope.mixins.len(), 2);
    assert_eq!(scope.mixins[0].kind, MixinKind::Include);
    assert_eq!(scope.mixins[0].name, "Acme::Helper");
    assert_eq!(scope.mixins[1].kind, MixinKind::Extend);
    assert_eq!(scope.mixins[1].name, "Acme::Util");
}

#[test]
fn test_unnamed_mixin_is_not_annotated() {
    let mut fixture = Fixture::new();
    let anon = fixture.universe.define_anonymous_module();
    let widget = fixture.universe.define_class("Acme::Widget", None);
    fixture.universe.add_file(widget, unit_file("widget.src"));
    fixture
        .mixins
        .register(widget, anon, MixinKind::Include, None);

    let mut pipeline = fixture.enriched_pipeline();
    pipeline.seed("Acme::Widget");
    pipeline.compile().unwrap();

    let tree = pipeline.tree();
    let scope = tree.get(tree.roots()[0]).and_then(Node::as_scope).unwrap();
    assert!(scope.mixins.is_empty());
}

#[test]
fn test_foreign_mixin_is_promoted_to_foreign_scope() {
    let mut fixture = Fixture::new();
    let support = fixture.universe.define_module("Ext::Support");
    fixture.universe.add_file(support, foreign_file("support.src"));

    // A nested constant of the foreign module; foreign scopes are recorded
    // but not recursed into.
    let hidden = fixture.universe.define_module("Ext::Support::Hidden");
    fixture.universe.add_member(support, "Hidden", hidden);

    let widget = fixture.universe.define_class("Acme::Widget", None);
    fixture.universe.add_file(widget, unit_file("widget.src"));
    fixture
        .mixins
        .register(widget, support, MixinKind::Include, None);

    let mut pipeline = fixture.enriched_pipeline();
    pipeline.seed("Acme::Widget");
    pipeline.compile().unwrap();

    let tree = pipeline.tree();
    let support_id = tree
        .scope_by_name("Ext::Support")
        .expect("foreign mixin should be recorded as a scope");
    let support_scope = tree.get(support_id).and_then(Node::as_scope).unwrap();
    assert_eq!(support_scope.kind, ScopeKind::Module);
    assert!(tree.scope_by_name("Ext::Support::Hidden").is_none());
}

#[test]
fn test_local_mixin_is_not_promoted() {
    let mut fixture = Fixture::new();
    let helper = fixture.universe.define_module("Acme::Helper");
    fixture.universe.add_file(helper, unit_file("helper.src"));
    let widget = fixture.universe.define_class("Acme::Widget", None);
    fixture.universe.add_file(widget, unit_file("widget.src"));
    fixture
        .mixins
        .register(widget, helper, MixinKind::Include, None);

    let mut pipeline = fixture.enriched_pipeline();
    pipeline.seed("Acme::Widget");
    pipeline.compile().unwrap();

    // Annotated on the widget, but not pulled in as a foreign scope.
    assert!(pipeline.tree().scope_by_name("Acme::Helper").is_none());
}

#[test]
fn test_methods_are_filtered_by_source_location() {
    let mut fixture = Fixture::new();
    let widget = fixture.universe.define_class("Acme::Widget", None);
    fixture.universe.add_file(widget, unit_file("widget.src"));
    fixture.universe.add_method(
        widget,
        MethodDef::instance(
            "visible",
            vec![Param::required("input")],
            Some(unit_file("widget.src").into()),
        ),
    );
    fixture.universe.add_method(
        widget,
        MethodDef::instance("hidden", vec![], Some(foreign_file("patch.src").into())),
    );
    fixture
        .universe
        .add_method(widget, MethodDef::singleton("sourceless", vec![], None));

    let mut pipeline = fixture.enriched_pipeline();
    pipeline.seed("Acme::Widget");
    pipeline.compile().unwrap();

    let tree = pipeline.tree();
    let scope = tree.get(tree.roots()[0]).and_then(Node::as_scope).unwrap();
    let methods: Vec<&str> = scope
        .children
        .iter()
        .filter_map(|&id| tree.get(id))
        .filter_map(Node::as_method)
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(methods, vec!["visible"]);
}

#[test]
fn test_unit_methods_on_foreign_scope_are_kept() {
    // The unit reopens a constant it does not own; the source-location
    // filter keeps exactly the unit's own additions.
    let mut fixture = Fixture::new();
    let support = fixture.universe.define_module("Ext::Support");
    fixture.universe.add_file(support, foreign_file("support.src"));
    fixture.universe.add_method(
        support,
        MethodDef::instance("added_here", vec![], Some(unit_file("patch.src").into())),
    );
    fixture.universe.add_method(
        support,
        MethodDef::instance("native", vec![], Some(foreign_file("support.src").into())),
    );

    let widget = fixture.universe.define_class("Acme::Widget", None);
    fixture.universe.add_file(widget, unit_file("widget.src"));
    fixture
        .mixins
        .register(widget, support, MixinKind::Include, None);

    let mut pipeline = fixture.enriched_pipeline();
    pipeline.seed("Acme::Widget");
    pipeline.compile().unwrap();

    let tree = pipeline.tree();
    let support_id = tree.scope_by_name("Ext::Support").unwrap();
    let scope = tree.get(support_id).and_then(Node::as_scope).unwrap();
    let methods: Vec<&str> = scope
        .children
        .iter()
        .filter_map(|&id| tree.get(id))
        .filter_map(Node::as_method)
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(methods, vec!["added_here"]);
}

/// Records the signature of every method node-added event it sees.
struct CollectingListener {
    signatures: Rc<RefCell<Vec<String>>>,
}

impl Listener for CollectingListener {
    fn name(&self) -> &'static str {
        "collecting"
    }

    fn on_node(
        &mut self,
        _pipeline: &mut Pipeline<'_>,
        event: &NodeAdded,
    ) -> Result<(), CompileError> {
        if let NodeAdded::Method { signature, .. } = event {
            self.signatures.borrow_mut().push(signature.clone());
        }
        Ok(())
    }
}

#[test]
fn test_method_node_events_carry_signatures() {
    let mut fixture = Fixture::new();
    let widget = fixture.universe.define_class("Acme::Widget", None);
    fixture.universe.add_file(widget, unit_file("widget.src"));
    fixture.universe.add_method(
        widget,
        MethodDef::singleton(
            "build",
            vec![Param::required("spec"), Param::block("blk")],
            Some(unit_file("widget.src").into()),
        ),
    );

    let signatures = Rc::new(RefCell::new(Vec::new()));
    let mut pipeline = fixture.pipeline();
    pipeline.add_listener(Box::new(MethodsListener));
    pipeline.add_listener(Box::new(CollectingListener {
        signatures: Rc::clone(&signatures),
    }));
    pipeline.seed("Acme::Widget");
    pipeline.compile().unwrap();

    let signatures = signatures.borrow();
    assert_eq!(signatures.len(), 1);
    assert_eq!(signatures[0], "def self.build(spec, &blk)");
}

/// Fails on every scope node.
struct FailingListener;

impl Listener for FailingListener {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn on_node(
        &mut self,
        _pipeline: &mut Pipeline<'_>,
        event: &NodeAdded,
    ) -> Result<(), CompileError> {
        match event {
            NodeAdded::Scope { symbol, .. } => Err(CompileError::listener(
                self.name(),
                symbol.clone(),
                "enrichment backend unavailable",
            )),
            _ => Ok(()),
        }
    }
}

#[test]
fn test_failing_listener_aborts_compilation() {
    let mut fixture = Fixture::new();
    let widget = fixture.universe.define_class("Acme::Widget", None);
    fixture.universe.add_file(widget, unit_file("widget.src"));

    let mut pipeline = fixture.pipeline();
    pipeline.add_listener(Box::new(FailingListener));
    pipeline.seed("Acme::Widget");

    let error = pipeline.compile().unwrap_err();
    let CompileError::Listener {
        listener, symbol, ..
    } = error;
    assert_eq!(listener, "failing");
    assert_eq!(symbol, "Acme::Widget");
}

#[test]
fn test_foreign_promotion_requires_mixins_listener_first() {
    // Registered before the mixins listener, the foreign-constants listener
    // sees no annotations and promotes nothing. Ordering is significant.
    let mut fixture = Fixture::new();
    let support = fixture.universe.define_module("Ext::Support");
    fixture.universe.add_file(support, foreign_file("support.src"));
    let widget = fixture.universe.define_class("Acme::Widget", None);
    fixture.universe.add_file(widget, unit_file("widget.src"));
    fixture
        .mixins
        .register(widget, support, MixinKind::Include, None);

    let mut pipeline = fixture.pipeline();
    pipeline.add_listener(Box::new(SubconstantsListener));
    pipeline.add_listener(Box::new(ForeignConstantsListener));
    pipeline.add_listener(Box::new(MixinsListener::new(&fixture.mixins)));
    pipeline.seed("Acme::Widget");
    pipeline.compile().unwrap();

    assert!(pipeline.tree().scope_by_name("Ext::Support").is_none());
}
