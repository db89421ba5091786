//! End-to-end mapping behaviour against a local registry.

use std::collections::{BTreeMap, HashMap};

use sconv_core::{
    Arguments, Mapper, MapperConfig, MappingWarning, RuleDefinition, RuleGroup, RuleRegistry,
    RuleSet, args, reflect_struct,
};

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct UserSource {
        user_id: i64,
        name: String,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct UserTarget {
        id: i64,
        full_name: String,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Item {
        f: String,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct ItemView {
        f: String,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Basket {
        items: Vec<Item>,
        maybe_items: Vec<Option<Item>>,
        by_name: HashMap<String, Item>,
        slots: [Item; 3],
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct BasketView {
        items: Vec<ItemView>,
        maybe_items: Vec<ItemView>,
        by_name: BTreeMap<String, ItemView>,
        slots: [ItemView; 2],
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Account {
        login: String,
        password: String,
        nickname: Option<String>,
        home: Option<Item>,
        work: Item,
        count: Option<i64>,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct AccountView {
        login: String,
        password: String,
        nickname: String,
        home: Option<ItemView>,
        work: Option<ItemView>,
        count: i64,
        missing: u8,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Line {
        sku: String,
        quantity: u32,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct LineView {
        sku: String,
        label: String,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Order {
        id: u64,
        lines: Vec<Line>,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct OrderView {
        id: u64,
        lines: Vec<LineView>,
        stamp: String,
    }
}

fn item(f: &str) -> Item {
    Item { f: f.to_string() }
}

fn view(f: &str) -> ItemView {
    ItemView { f: f.to_string() }
}

#[test]
fn rename_and_compute_fill_target() {
    let mut registry = RuleRegistry::new();
    registry
        .register(RuleDefinition::between::<UserSource, UserTarget>(
            RuleSet::new()
                .rename("id", "user_id")
                .compute("full_name", |source: UserSource| source.name),
        ))
        .unwrap();

    let source = UserSource {
        user_id: 7,
        name: "Al".to_string(),
    };
    let mut target = UserTarget::default();
    let report = Mapper::new(&registry)
        .map(&source, &mut target, &Arguments::new())
        .unwrap();

    assert_eq!(
        target,
        UserTarget {
            id: 7,
            full_name: "Al".to_string(),
        }
    );
    assert!(report.is_clean());
}

#[test]
fn unmatched_fields_warn_without_rules() {
    let registry = RuleRegistry::new();
    let mut target = UserTarget::default();
    let report = Mapper::new(&registry)
        .map(&UserSource::default(), &mut target, &Arguments::new())
        .unwrap();
    assert_eq!(report.unmapped_fields(), vec!["id", "full_name"]);
}

#[test]
fn sequences_keep_order_and_length() {
    let registry = RuleRegistry::new();
    let source = Basket {
        items: vec![item("a"), item("b")],
        ..Basket::default()
    };
    let mut target = BasketView::default();
    let report = Mapper::new(&registry)
        .map(&source, &mut target, &Arguments::new())
        .unwrap();
    assert_eq!(target.items, vec![view("a"), view("b")]);
    assert!(report.is_clean());
}

#[test]
fn null_sequence_elements_become_defaults() {
    let registry = RuleRegistry::new();
    let source = Basket {
        maybe_items: vec![Some(item("a")), None, Some(item("c"))],
        ..Basket::default()
    };
    let mut target = BasketView::default();
    Mapper::new(&registry)
        .map(&source, &mut target, &Arguments::new())
        .unwrap();
    assert_eq!(
        target.maybe_items,
        vec![view("a"), ItemView::default(), view("c")]
    );
}

#[test]
fn maps_are_rebuilt_by_key() {
    let registry = RuleRegistry::new();
    let source = Basket {
        by_name: HashMap::from([("x".to_string(), item("1")), ("y".to_string(), item("2"))]),
        ..Basket::default()
    };
    let mut target = BasketView {
        by_name: BTreeMap::from([("stale".to_string(), view("0"))]),
        ..BasketView::default()
    };
    Mapper::new(&registry)
        .map(&source, &mut target, &Arguments::new())
        .unwrap();
    assert_eq!(
        target.by_name,
        BTreeMap::from([("x".to_string(), view("1")), ("y".to_string(), view("2"))])
    );
}

#[test]
fn arrays_map_up_to_the_shorter_length() {
    let registry = RuleRegistry::new();
    let source = Basket {
        slots: [item("a"), item("b"), item("c")],
        ..Basket::default()
    };
    let mut target = BasketView::default();
    Mapper::new(&registry)
        .map(&source, &mut target, &Arguments::new())
        .unwrap();
    assert_eq!(target.slots, [view("a"), view("b")]);
}

#[test]
fn appending_mode_keeps_existing_elements() {
    let registry = RuleRegistry::new();
    let config = MapperConfig::default().with_clear_collections(false);
    let source = Basket {
        items: vec![item("new")],
        ..Basket::default()
    };
    let mut target = BasketView {
        items: vec![view("old")],
        ..BasketView::default()
    };
    Mapper::with_config(&registry, config)
        .map(&source, &mut target, &Arguments::new())
        .unwrap();
    assert_eq!(target.items, vec![view("old"), view("new")]);
}

#[test]
fn ignored_field_stays_default() {
    let mut registry = RuleRegistry::new();
    registry
        .register(RuleDefinition::between::<Account, AccountView>(
            RuleSet::new().ignore("password").ignore("missing"),
        ))
        .unwrap();

    let source = Account {
        login: "al".to_string(),
        password: "hunter2".to_string(),
        ..Account::default()
    };
    let mut target = AccountView::default();
    let report = Mapper::new(&registry)
        .map(&source, &mut target, &Arguments::new())
        .unwrap();

    assert_eq!(target.login, "al");
    assert_eq!(target.password, "");
    assert!(report.is_clean());
}

#[test]
fn null_pointers_leave_target_untouched() {
    let registry = RuleRegistry::new();
    let source = Account {
        nickname: None,
        home: None,
        count: None,
        ..Account::default()
    };
    let mut target = AccountView {
        nickname: "kept".to_string(),
        home: Some(view("keep")),
        count: 3,
        ..AccountView::default()
    };
    Mapper::new(&registry)
        .map(&source, &mut target, &Arguments::new())
        .unwrap();

    assert_eq!(target.nickname, "kept");
    assert_eq!(target.home, Some(view("keep")));
    assert_eq!(target.count, 3);
}

#[test]
fn pointers_are_unwrapped_and_allocated() {
    let registry = RuleRegistry::new();
    let source = Account {
        nickname: Some("ally".to_string()),
        home: Some(item("home")),
        work: item("work"),
        count: Some(3),
        ..Account::default()
    };
    let mut target = AccountView::default();
    let report = Mapper::new(&registry)
        .map(&source, &mut target, &Arguments::new())
        .unwrap();

    assert_eq!(target.nickname, "ally");
    assert_eq!(target.home, Some(view("home")));
    assert_eq!(target.work, Some(view("work")));
    assert_eq!(target.count, 3);
    assert_eq!(report.unmapped_fields(), vec!["missing"]);
}

#[test]
fn nested_rules_see_current_and_root_sources() {
    let mut registry = RuleRegistry::new();
    registry
        .register(RuleDefinition::between::<Line, LineView>(
            RuleSet::new().compute("label", |line: Line, order: Order| {
                format!("{}/{}x{}", order.id, line.quantity, line.sku)
            }),
        ))
        .unwrap();
    registry
        .register(RuleDefinition::between::<Order, OrderView>(
            RuleSet::new().compute("stamp", |prefix: String, order: Order| {
                format!("{prefix}-{}", order.lines.len())
            }),
        ))
        .unwrap();

    let source = Order {
        id: 9,
        lines: vec![
            Line {
                sku: "pen".to_string(),
                quantity: 2,
            },
            Line {
                sku: "ink".to_string(),
                quantity: 1,
            },
        ],
    };
    let mut target = OrderView::default();
    let report = Mapper::new(&registry)
        .map(&source, &mut target, &args!["order".to_string()])
        .unwrap();

    assert_eq!(target.id, 9);
    assert_eq!(target.stamp, "order-2");
    let labels: Vec<&str> = target.lines.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["9/2xpen", "9/1xink"]);
    assert!(report.is_clean());
}

#[test]
fn extra_arguments_are_injected_by_type() {
    let mut registry = RuleRegistry::new();
    registry
        .register(RuleDefinition::between::<UserSource, UserTarget>(
            RuleSet::new()
                .compute("id", |a: i64| a)
                .compute("full_name", |a: i64, b: String| format!("{b}{a}")),
        ))
        .unwrap();

    let mut target = UserTarget::default();
    Mapper::new(&registry)
        .map(&UserSource::default(), &mut target, &args![42_i64, "x".to_string()])
        .unwrap();
    assert_eq!(target.id, 42);
    assert_eq!(target.full_name, "x42");
}

#[test]
fn unmet_parameters_get_defaults_and_warn() {
    let mut registry = RuleRegistry::new();
    registry
        .register(RuleDefinition::between::<UserSource, UserTarget>(
            RuleSet::new()
                .rename("id", "user_id")
                .compute("full_name", |suffix: String| format!("user{suffix}")),
        ))
        .unwrap();

    let mut target = UserTarget::default();
    let report = Mapper::with_config(&registry, MapperConfig::default().with_warnings(false))
        .map(&UserSource::default(), &mut target, &Arguments::new())
        .unwrap();

    assert_eq!(target.full_name, "user");
    assert!(matches!(
        report.warnings(),
        [MappingWarning::ZeroValueArgument { position: 1, .. }]
    ));
}

struct StoreRules;

impl RuleGroup for StoreRules {
    fn rule_definitions(&self) -> Vec<RuleDefinition> {
        vec![
            RuleDefinition::between::<UserSource, UserTarget>(
                RuleSet::new().rename("id", "user_id").rename("full_name", "name"),
            ),
            RuleDefinition::between::<Line, LineView>(RuleSet::new().ignore("label")),
        ]
    }
}

struct NoRules;

impl RuleGroup for NoRules {
    fn rule_definitions(&self) -> Vec<RuleDefinition> {
        Vec::new()
    }
}

#[test]
fn rule_groups_register_every_definition() {
    let mut registry = RuleRegistry::new();
    registry
        .register_rule_groups(&[&StoreRules, &NoRules])
        .unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.contains::<Line, LineView>());

    let err = registry.register_rule_groups(&[&StoreRules]).unwrap_err();
    assert!(err.to_string().contains("already exist"));
    assert_eq!(registry.len(), 2);
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Packet {
        bytes: Vec<u8>,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct PacketView {
        strs: Vec<String>,
    }
}

#[test]
fn renamed_sequences_with_different_elements_warn_at_mapping_time() {
    let mut registry = RuleRegistry::new();
    registry
        .register(RuleDefinition::between::<Packet, PacketView>(
            RuleSet::new().rename("strs", "bytes"),
        ))
        .unwrap();

    let source = Packet { bytes: vec![1, 2] };
    let mut target = PacketView::default();
    let report = Mapper::with_config(&registry, MapperConfig::default().with_warnings(false))
        .map(&source, &mut target, &Arguments::new())
        .unwrap();

    assert!(target.strs.is_empty());
    assert!(matches!(
        report.warnings(),
        [MappingWarning::IncompatibleTypes { field, .. }] if field == "strs"
    ));
}
