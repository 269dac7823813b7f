use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tide_value::{mold, Kind};

fn load_mold(source: &str) -> String {
    let interner = StringInterner::new();
    let block = load(source, &interner).unwrap();
    mold(&Value::Block(block), &interner)
}

fn load_err(source: &str) -> LoadError {
    let interner = StringInterner::new();
    load(source, &interner).unwrap_err()
}

fn kinds(source: &str) -> Vec<Kind> {
    let interner = StringInterner::new();
    load(source, &interner)
        .unwrap()
        .to_vec()
        .iter()
        .map(Value::kind)
        .collect()
}

#[test]
fn scalars_and_words() {
    assert_eq!(
        kinds("1 -2 3.5 .5 a b: :c 'd /e + <= // /"),
        vec![
            Kind::Integer,
            Kind::Integer,
            Kind::Decimal,
            Kind::Decimal,
            Kind::Word,
            Kind::SetWord,
            Kind::GetWord,
            Kind::LitWord,
            Kind::Refinement,
            Kind::Word,
            Kind::Word,
            Kind::Word,
            Kind::Word,
        ]
    );
}

#[test]
fn paths() {
    assert_eq!(
        kinds("a/b a/b: :a/b 'a/b obj/1"),
        vec![
            Kind::Path,
            Kind::SetPath,
            Kind::GetPath,
            Kind::LitPath,
            Kind::Path
        ]
    );
    assert_eq!(load_mold("catch/name/any x"), "[catch/name/any x]");
}

#[test]
fn nested_blocks_and_parens() {
    assert_eq!(load_mold("a [b (c [d])] ()"), "[a [b (c [d])] ()]");
    assert_eq!(load_mold("[x][y]"), "[[x] [y]]");
}

#[test]
fn comments_are_skipped() {
    assert_eq!(load_mold("1 ; one\n2 ;two"), "[1 2]");
}

#[test]
fn strings_and_escapes() {
    assert_eq!(load_mold(r#""a^"b^/c""#), r#"["a^"b^/c"]"#);
    assert_eq!(load_mold("{multi\nline {nested}}"), "[\"multi^/line {nested}\"]");
    assert_eq!(load_mold(r#""x"y"#), r#"["x" y]"#);
}

#[test]
fn unicode_in_words_and_strings() {
    assert_eq!(load_mold("héllo \"wörld\""), "[héllo \"wörld\"]");
}

#[test]
fn unclosed_block_points_at_opener() {
    let err = load_err("a [b [c]");
    assert_eq!(err.kind, LoadErrorKind::UnclosedDelimiter { close: ']' });
    assert_eq!(err.span, Span::new(2, 3));
}

#[test]
fn mismatched_close() {
    let err = load_err("[a)");
    assert_eq!(err.kind, LoadErrorKind::UnexpectedDelimiter { found: ')' });
    assert_eq!(err.span, Span::new(2, 3));
    assert_eq!(
        load_err("a]").kind,
        LoadErrorKind::UnexpectedDelimiter { found: ']' }
    );
}

#[test]
fn unterminated_strings() {
    assert_eq!(load_err("\"abc").kind, LoadErrorKind::UnterminatedString);
    assert_eq!(load_err("\"abc\ndef\"").kind, LoadErrorKind::UnterminatedString);
    assert_eq!(load_err("{abc {x}").kind, LoadErrorKind::UnterminatedString);
}

#[test]
fn invalid_tokens() {
    assert_eq!(
        load_err("12abc").kind,
        LoadErrorKind::InvalidNumber {
            text: "12abc".to_string()
        }
    );
    assert_eq!(
        load_err("a//b").kind,
        LoadErrorKind::MalformedPath {
            text: "a//b".to_string()
        }
    );
    assert_eq!(
        load_err("1/a").kind,
        LoadErrorKind::InvalidNumber {
            text: "1/a".to_string()
        }
    );
    assert_eq!(
        load_err("a:b").kind,
        LoadErrorKind::InvalidWord {
            text: "a:b".to_string()
        }
    );
}

#[test]
fn deep_nesting_loads_iteratively() {
    let depth = 2_000;
    let source = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let interner = StringInterner::new();
    let block = load(&source, &interner).unwrap();
    assert_eq!(block.len(), 1);
}

proptest! {
    #[test]
    fn integers_load_as_themselves(n in any::<i64>()) {
        let interner = StringInterner::new();
        let block = load(&n.to_string(), &interner).unwrap();
        prop_assert!(matches!(block.item(0), Some(Value::Integer(m)) if m == n));
    }

    #[test]
    fn balanced_brackets_always_load(shape in "[\\[\\]a ]{0,40}") {
        let mut depth = 0i32;
        let balanced = shape.chars().all(|c| {
            match c {
                '[' => depth += 1,
                ']' => depth -= 1,
                _ => {}
            }
            depth >= 0
        }) && depth == 0;
        let interner = StringInterner::new();
        prop_assert_eq!(load(&shape, &interner).is_ok(), balanced);
    }
}
