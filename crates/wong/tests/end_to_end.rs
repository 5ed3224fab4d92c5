use std::sync::Arc;

use wong::{
    AttributeSet, ConstructionError, CreateInput, Dom, ElementClass, ElementId, ElementInit,
    Engine, EngineConfig, ExpandError, ParseError, ParserKind, RegistrationError, SchemaNode,
    SchemaParser, WongError,
};

struct Card;

impl ElementClass for Card {
    fn schema(&self) -> &str {
        r#"
        Header{
          c card-header
          k header
        }[
          Title{k title t "Untitled card"}
        ]
        Body{k body}
        "#
    }

    fn tag(&self) -> Option<&str> {
        Some("article")
    }
}

struct TodoList {
    items: Vec<&'static str>,
}

impl ElementClass for TodoList {
    fn schema(&self) -> &str {
        "h2{t Todo}"
    }

    fn tag(&self) -> Option<&str> {
        Some("ul")
    }

    fn dynamic_children(&self, _dom: &Dom, _el: ElementId) -> Result<CreateInput, ConstructionError> {
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(i, text)| {
                SchemaNode::new("li")
                    .with_attribute("k", format!("item-{i}"))
                    .with_attribute("t", *text)
            })
            .collect::<Vec<_>>();
        Ok(items.into())
    }

    fn on_create(&self, dom: &mut Dom, el: ElementId) -> Result<(), ConstructionError> {
        let count = dom.children(el).len().to_string();
        dom.set_attribute(el, "data-count", &count)
            .map_err(|e| ConstructionError::new("TodoList", e.to_string()))
    }
}

struct RequiresId;

impl ElementClass for RequiresId {
    fn construct(&self, dom: &mut Dom, init: ElementInit<'_>) -> Result<ElementId, ConstructionError> {
        match init.attributes.and_then(AttributeSet::id) {
            Some(_) => Ok(dom.create_element("section", init.attributes)),
            None => Err(ConstructionError::new(init.name, "an id attribute is required")),
        }
    }
}

fn tags(engine: &Engine, elements: &[ElementId]) -> Vec<String> {
    elements
        .iter()
        .map(|&el| engine.dom().tag(el).unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_card_expands_own_schema_then_caller_children() {
    let mut engine = Engine::new();
    engine.register(Card).unwrap();

    let roots = engine
        .create(r#"Card{i welcome c "card wide"}[Footer{t "Read more"}]"#)
        .unwrap();
    let card = roots[0];
    let dom = engine.dom();

    assert_eq!(dom.tag(card), Some("article"));
    assert_eq!(dom.attribute(card, "class"), Some("card wide"));
    assert_eq!(engine.element_by_id("welcome"), Some(card));
    assert_eq!(tags(&engine, dom.children(card)), vec!["Header", "Body", "Footer"]);

    let header = dom.child(card, "header").unwrap();
    assert_eq!(dom.attribute(header, "class"), Some("card-header"));
    let title = dom.search_descendant(card, "title").unwrap();
    assert_eq!(dom.text(title), Some("Untitled card"));
}

#[test]
fn test_dynamic_children_and_on_create() {
    let mut engine = Engine::new();
    engine
        .register(TodoList { items: vec!["write parser", "write expander"] })
        .unwrap();

    let list = engine.create("TodoList").unwrap()[0];
    let dom = engine.dom();

    assert_eq!(tags(&engine, dom.children(list)), vec!["h2", "li", "li"]);
    assert_eq!(dom.attribute(list, "data-count"), Some("3"));
    let second = dom.child(list, "item-1").unwrap();
    assert_eq!(dom.text(second), Some("write expander"));
}

#[test]
fn test_failed_create_leaves_document_unchanged() {
    let mut engine = Engine::new();
    engine.register(RequiresId).unwrap();

    let kept = engine.create("nav{i top}[a b]").unwrap();
    let before = engine.dom().len();

    let err = engine
        .create("main{i content}[RequiresId{i ok} RequiresId]")
        .unwrap_err();

    assert!(matches!(err, ExpandError::Construction(_)));
    assert_eq!(engine.dom().len(), before);
    assert_eq!(engine.element_by_id("top"), Some(kept[0]));
    assert_eq!(engine.element_by_id("content"), None);
    assert_eq!(engine.element_by_id("ok"), None);
    assert_eq!(engine.dom().children(kept[0]).len(), 2);
}

#[test]
fn test_duplicate_id_first_claim_wins() {
    let mut engine = Engine::new();

    let roots = engine.create("p{i note} p{i note}").unwrap();

    assert_eq!(engine.element_by_id("note"), Some(roots[0]));
    assert_eq!(engine.dom().attribute(roots[1], "id"), Some("note"));
}

#[test]
fn test_circular_classes() {
    struct Tree;
    impl ElementClass for Tree {
        fn schema(&self) -> &str {
            "Branch"
        }
    }
    struct Branch;
    impl ElementClass for Branch {
        fn schema(&self) -> &str {
            "leaf Tree"
        }
    }

    let mut engine = Engine::new();
    engine
        .register_all(vec![
            Arc::new(Tree) as Arc<dyn ElementClass>,
            Arc::new(Branch) as Arc<dyn ElementClass>,
        ])
        .unwrap();

    let err = engine.create("Tree").unwrap_err();
    assert!(matches!(
        err,
        ExpandError::CircularComponent { ref cycle } if cycle == &["Tree", "Branch", "Tree"]
    ));
    assert!(engine.dom().is_empty());

    // Caller-supplied nesting of the same class is not a cycle.
    engine.register_as("Box", Card).unwrap();
    assert!(engine.create("Box[Box[Box]]").is_ok());
}

#[test]
fn test_registration_errors() {
    struct Broken;
    impl ElementClass for Broken {
        fn schema(&self) -> &str {
            "Header{c"
        }
    }

    let mut engine = Engine::new();
    engine.register(Card).unwrap();

    assert!(matches!(
        engine.register(Card),
        Err(RegistrationError::DuplicateClass { .. })
    ));
    assert!(matches!(
        engine.register(Broken),
        Err(RegistrationError::InvalidSchema { .. })
    ));
    assert!(engine.class("Broken").is_none());
}

#[test]
fn test_xml_parser() {
    let mut engine = Engine::new();
    engine.register(Card).unwrap();
    engine.use_parser(ParserKind::Xml);

    let roots = engine
        .create(r#"<Card i="c1"><Footer text="bye"/></Card><hr/>"#)
        .unwrap();

    assert_eq!(tags(&engine, &roots), vec!["article", "hr"]);
    assert_eq!(engine.element_by_id("c1"), Some(roots[0]));
    let footer = engine.dom().children(roots[0])[2];
    assert_eq!(engine.dom().text(footer), Some("bye"));
}

#[test]
fn test_xml_config_schemas() {
    struct Menu;
    impl ElementClass for Menu {
        fn schema(&self) -> &str {
            r#"<item k="first"/><item k="second"/>"#
        }
    }

    let mut engine = Engine::with_config(EngineConfig::new().with_parser(ParserKind::Xml));
    engine.register(Menu).unwrap();

    let menu = engine.create("<Menu/>").unwrap()[0];
    assert!(engine.dom().child(menu, "second").is_some());
}

#[test]
fn test_custom_parser() {
    #[derive(Debug)]
    struct Lines;
    impl SchemaParser for Lines {
        fn name(&self) -> &'static str {
            "lines"
        }
        fn parse(&self, source: &str) -> Result<Vec<SchemaNode>, ParseError> {
            Ok(source.split_whitespace().map(SchemaNode::new).collect())
        }
    }

    let mut engine = Engine::new();
    engine.set_parser(Arc::new(Lines));

    let roots = engine.create("a{b} c[d]").unwrap();
    assert_eq!(tags(&engine, &roots), vec!["a{b}", "c[d]"]);
}

#[test]
fn test_parse_only_does_not_touch_document() {
    let engine = Engine::new();
    let nodes = engine.parse("A{k v}[B[C]]").unwrap();

    assert_eq!(nodes[0].to_string(), "A{key v}[B[C]]");
    assert!(engine.dom().is_empty());
}

#[test]
fn test_errors_convert_to_top_level() {
    let mut engine = Engine::new();
    let err: WongError = engine.create("A{k}").unwrap_err().into();
    assert!(matches!(err, WongError::Expand(ExpandError::Parse(ParseError::AttributeSyntax { .. }))));
}

#[test]
fn test_logging_try_init() {
    let _ = wong::logging::try_init();
    assert!(wong::logging::try_init().is_err());

    let mut engine = Engine::new();
    assert!(engine.create("traced[element]").is_ok());
}
