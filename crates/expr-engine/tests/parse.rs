use expr_engine::{parse, tokenize, Ast, BinaryOp, Engine, EngineOptions, TokenKind, UnaryOp};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_token_stream() {
    use TokenKind::*;
    assert_eq!(
        kinds("countIf(arr, x => x >= 3.5)"),
        vec![
            Identifier, Punctuation, Identifier, Punctuation, Identifier, Operator, Identifier,
            Operator, Number, Punctuation, EndOfInput
        ]
    );
    let texts: Vec<std::string::String> = tokenize("a===b!==c").unwrap().into_iter().map(|t| t.text).collect();
    assert_eq!(texts, vec!["a", "===", "b", "!==", "c", ""]);
}

#[test]
fn test_canonical_forms() {
    let cases = [
        ("1+2*3", "(1 + (2 * 3))"),
        ("(1+2)*3", "((1 + 2) * 3)"),
        ("a || b && c", "(a || (b && c))"),
        ("a == b < c", "(a == (b < c))"),
        ("a % b * c", "((a % b) * c)"),
        ("!a == b", "(!a == b)"),
        ("a ? b : c ? d : e", "(a ? b : (c ? d : e))"),
        ("x.y[0].z", "x.y[0].z"),
        ("items[i + 1]", "items[(i + 1)]"),
        ("f(a, 'b', 3)", "f(a, \"b\", 3)"),
        ("filter(xs, x => x.ok)", "filter(xs, x => x.ok)"),
        ("true && false", "(1 && 0)"),
        ("'say \"hi\"'", "\"say \\\"hi\\\"\""),
    ];
    for (source, expected) in cases {
        let printed = parse(source).unwrap().to_string();
        assert_eq!(printed, expected, "source: {}", source);
    }
}

#[test]
fn test_tree_shapes() {
    assert_eq!(
        parse("-a + b").unwrap(),
        Ast::binary(
            BinaryOp::Add,
            Ast::unary(UnaryOp::Neg, Ast::var("a")),
            Ast::var("b")
        )
    );
    assert_eq!(
        parse("x => y => x").unwrap(),
        Ast::lambda("x", Ast::lambda("y", Ast::var("x")))
    );
    assert_eq!(
        parse("x => x + 1").unwrap(),
        Ast::lambda(
            "x",
            Ast::binary(BinaryOp::Add, Ast::var("x"), Ast::num(1.0))
        )
    );
}

#[test]
fn test_error_positions() {
    let cases = [
        ("1 +", 3),
        ("(1 + 2", 6),
        ("a[", 2),
        ("f(1,", 4),
        ("a.", 2),
        ("1 2", 2),
        ("a ? b", 5),
        ("x => ", 5),
        (")", 0),
        ("a $ b", 2),
    ];
    for (source, position) in cases {
        let err = parse(source).unwrap_err();
        assert_eq!(err.position, position, "source: {} ({})", source, err);
    }
}

#[test]
fn test_positions_count_characters() {
    let err = parse("'héllo' +").unwrap_err();
    assert_eq!(err.position, 9);
}

#[test]
fn test_unterminated_string() {
    assert_eq!(parse("'abc").unwrap().to_string(), "\"abc\"");
    assert_eq!(parse("\"abc\\").unwrap().to_string(), "\"abc\\\\\"");

    let strict = Engine::new(EngineOptions::default().with_strict_strings(true));
    let err = strict.parse("1 + 'abc").unwrap_err();
    assert_eq!(err.position, 4);
    assert!(strict.parse("1 + 'abc'").is_ok());
}
