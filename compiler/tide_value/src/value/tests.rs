use super::*;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;
use tide_ir::{sym, StringInterner};

fn int(n: i64) -> Value {
    Value::Integer(n)
}

#[test]
fn only_none_and_false_are_conditionally_false() {
    assert!(!Value::None.is_truthy());
    assert!(!Value::Logic(false).is_truthy());
    assert!(Value::Logic(true).is_truthy());
    assert!(int(0).is_truthy());
    assert!(Value::string("").is_truthy());
    assert!(Value::block(vec![]).is_truthy());
    assert!(Value::Unset.is_truthy());
}

#[test]
fn coerced_equality() {
    assert!(equal(&int(1), &Value::Decimal(1.0)));
    assert!(!strict_equal(&int(1), &Value::Decimal(1.0)));
    assert!(equal(&Value::string("Abc"), &Value::string("aBC")));
    assert!(!strict_equal(&Value::string("Abc"), &Value::string("aBC")));
    assert!(equal(&Value::word(sym::BREAK), &Value::lit_word(sym::BREAK)));
    assert!(!strict_equal(&Value::word(sym::BREAK), &Value::lit_word(sym::BREAK)));
    assert!(!equal(&Value::None, &Value::Logic(false)));
}

#[test]
fn blocks_compare_structurally() {
    let a = Value::block(vec![int(1), Value::block(vec![int(2)])]);
    let b = Value::block(vec![int(1), Value::block(vec![int(2)])]);
    let c = Value::block(vec![int(1), Value::block(vec![int(3)])]);
    assert!(equal(&a, &b));
    assert!(!equal(&a, &c));
    assert!(!equal(&a, &Value::Paren(BlockRef::new(vec![]))));
}

#[test]
fn cyclic_blocks_compare_without_looping() {
    let a = BlockRef::new(vec![int(1)]);
    let b = BlockRef::new(vec![int(1)]);
    a.series().borrow_mut().data_mut().unwrap().push(Value::Block(b.clone()));
    b.series().borrow_mut().data_mut().unwrap().push(Value::Block(a.clone()));
    assert!(equal(&Value::Block(a), &Value::Block(b)));
}

#[test]
fn block_position_affects_length_and_items() {
    let block = BlockRef::new(vec![int(1), int(2), int(3)]);
    let tail = block.at(1);
    assert_eq!(tail.len(), 2);
    assert_eq!(tail.series_len(), 3);
    assert!(matches!(tail.item(0), Some(Value::Integer(2))));
    assert!(block.at(5).is_empty());
    assert!(block.at(5).to_vec().is_empty());
}

#[test]
fn protected_series_refuses_mutation() {
    let block = BlockRef::new(vec![]);
    block.series().borrow_mut().set_protected(true);
    let err = block.series().borrow_mut().data_mut().map(|_| ()).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Protected);
    block.series().borrow_mut().set_protected(false);
    assert!(block.series().borrow_mut().data_mut().is_ok());
}

#[test]
fn frame_locks_and_hides_fields() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let b = interner.intern("b");
    let mut frame = Frame::with_fields([(a, int(1)), (b, int(2))]);

    frame.key_mut(0).unwrap().locked = true;
    assert_eq!(frame.define(a, int(10)), Err(WriteDenied::Locked(a)));
    assert_eq!(frame.define(b, int(20)), Ok(1));

    frame.key_mut(1).unwrap().hidden = true;
    assert_eq!(frame.find(b), None);
    assert_eq!(frame.words(), vec![a]);

    frame.set_protected(true);
    let c = interner.intern("c");
    assert_eq!(frame.define(c, int(3)), Err(WriteDenied::Protected));
}

#[test]
fn handler_shape_follows_parameter_list() {
    let interner = StringInterner::new();
    let param = |name: &str, kind| Param {
        name: interner.intern(name),
        kind,
    };
    let function = |params| Function {
        params,
        body: FunctionBody::Native(NativeId(0)),
        infix: false,
    };

    assert_eq!(function(vec![]).handler_shape(), HandlerShape::Nullary);
    assert_eq!(
        function(vec![param("only", ParamKind::Refinement)]).handler_shape(),
        HandlerShape::Nullary
    );
    assert_eq!(
        function(vec![param("e", ParamKind::Normal)]).handler_shape(),
        HandlerShape::Unary
    );
    assert_eq!(
        function(vec![
            param("e", ParamKind::Normal),
            param("opt", ParamKind::Refinement),
            param("x", ParamKind::Normal),
        ])
        .handler_shape(),
        HandlerShape::Unary
    );
    assert_eq!(
        function(vec![param("v", ParamKind::Normal), param("n", ParamKind::Normal)])
            .handler_shape(),
        HandlerShape::Binary
    );
}

#[test]
fn mold_and_form() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let block = Value::block(vec![
        int(1),
        Value::Decimal(2.5),
        Value::string("a\"b"),
        Value::Word(WordKind::SetWord, x),
        Value::Word(WordKind::GetWord, x),
        Value::lit_word(x),
        Value::Word(WordKind::Refinement, x),
        Value::None,
    ]);
    assert_eq!(mold(&block, &interner), r#"[1 2.5 "a^"b" x: :x 'x /x none]"#);
    assert_eq!(
        form(&Value::block(vec![Value::string("hi"), int(2)]), &interner),
        "hi 2"
    );
    assert_eq!(form(&Value::Unset, &interner), "");
    assert_eq!(mold(&Value::Datatype(Kind::Integer), &interner), "integer!");
}

#[test]
fn mold_renders_cycles_as_ellipsis() {
    let interner = StringInterner::new();
    let block = BlockRef::new(vec![int(1)]);
    block
        .series()
        .borrow_mut()
        .data_mut()
        .unwrap()
        .push(Value::Block(block.clone()));
    assert_eq!(mold(&Value::Block(block), &interner), "[1 [...]]");
}

#[test]
fn kind_names_round_trip() {
    for kind in Kind::ALL {
        assert_eq!(Kind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(Kind::from_name("nothing!"), None);
}
