use tsapa::{
    classifier::{arguments, classify, extract_literals, split_top_level, Statement},
    diagnostics::DiagnosticKind,
};

fn classified(text: &str) -> Statement<'_> {
    classify(text).unwrap_or_else(|err| panic!("`{text}` did not classify: {err}"))
}

#[test]
fn literal_forms() {
    assert_eq!(classified("42"), Statement::Integer("42"));
    assert_eq!(classified("-7"), Statement::Integer("-7"));
    assert_eq!(classified("-3.5"), Statement::Float("-3.5"));
    assert_eq!(classified("true"), Statement::Boolean(true));
    assert_eq!(classified("false"), Statement::Boolean(false));
    assert_eq!(classified("object"), Statement::Object);
    assert_eq!(classified(""), Statement::Empty);
}

#[test]
fn keywords_and_numbers_win_over_identifiers() {
    assert_eq!(classified("foo").label(), "identifier");
    assert_eq!(classified("12").label(), "integer");
    assert_eq!(classified("true").label(), "boolean");
    assert_eq!(classified("object").label(), "object");
}

#[test]
fn comment_wins_over_everything() {
    assert_eq!(classified("// a <- 1; b <- 2"), Statement::Comment);
}

#[test]
fn separator_wins_over_assignment() {
    assert_eq!(
        classified("a <- 1; b <- 2"),
        Statement::Sequence(vec!["a <- 1", "b <- 2"])
    );
}

#[test]
fn nested_semicolons_are_not_separators() {
    assert_eq!(
        classified("f <- [x|a <- x; inc:a]"),
        Statement::Assign {
            name: "f",
            expr: "[x|a <- x; inc:a]",
        }
    );
    assert_eq!(classified("(a; b)").label(), "parenthesized");
}

#[test]
fn assignment_forms() {
    assert_eq!(
        classified("total <- add:1,2"),
        Statement::Assign {
            name: "total",
            expr: "add:1,2",
        }
    );
    assert_eq!(
        classified("x <- 5 extends point"),
        Statement::Extend {
            field: "x",
            expr: "5",
            target: "point",
        }
    );
}

#[test]
fn field_call_wins_over_bare_call() {
    assert_eq!(
        classified("point move:1, 2"),
        Statement::FieldCall {
            receiver: "point",
            field: "move",
            args: vec!["1", "2"],
        }
    );
    assert_eq!(
        classified("point x:"),
        Statement::FieldCall {
            receiver: "point",
            field: "x",
            args: vec![],
        }
    );
}

#[test]
fn bare_calls() {
    assert_eq!(
        classified("add:1, 2"),
        Statement::Call {
            callee: "add",
            args: vec!["1", "2"],
        }
    );
    assert_eq!(
        classified("add:(add:1,2),3"),
        Statement::Call {
            callee: "add",
            args: vec!["(add:1,2)", "3"],
        }
    );
    assert_eq!(
        classified("answer:"),
        Statement::Call {
            callee: "answer",
            args: vec![],
        }
    );
}

#[test]
fn copy_and_blocks() {
    assert_eq!(classified("copy proto"), Statement::Copy { source: "proto" });
    assert_eq!(
        classified("[x, y|add:x,y]"),
        Statement::Block {
            params: vec!["x", "y"],
            body: "add:x,y",
        }
    );
    assert_eq!(
        classified("[|42]"),
        Statement::Block {
            params: vec![],
            body: "42",
        }
    );
}

#[test]
fn macros_and_parentheses() {
    assert_eq!(
        classified("!inspect add:1,2"),
        Statement::Macro {
            name: "inspect",
            rest: "add:1,2",
        }
    );
    assert_eq!(
        classified("!scope"),
        Statement::Macro {
            name: "scope",
            rest: "",
        }
    );
    assert_eq!(classified("((x))"), Statement::Parenthesized("(x)"));
}

#[test]
fn unmatched_text_is_a_syntax_error() {
    for text in ["1 +", "a.b", "!", "[x|y"] {
        let err = classify(text).expect_err(text);
        assert_eq!(err.kind(), Some(DiagnosticKind::Syntax), "{text}");
    }
}

#[test]
fn top_level_splitting() {
    assert_eq!(split_top_level("a;b;c", ';'), vec!["a", "b", "c"]);
    assert_eq!(split_top_level("a;[b;c];(d;e)", ';'), vec!["a", "[b;c]", "(d;e)"]);
    assert_eq!(split_top_level("plain", ';'), vec!["plain"]);
    assert_eq!(arguments("  "), Vec::<&str>::new());
    assert_eq!(arguments(" 1 , (inc:2) "), vec!["1", "(inc:2)"]);
}

#[test]
fn literals_are_lifted_in_order() {
    let mut seen = Vec::new();
    let text = extract_literals(r#"add:"a","b \"c\"""#, |literal| {
        seen.push(literal);
        format!("_s_{}", seen.len())
    })
    .expect("balanced quotes");
    assert_eq!(text, "add:_s_1,_s_2");
    assert_eq!(seen, vec!["a".to_string(), r#"b "c""#.to_string()]);

    let untouched = extract_literals("inc:1", |_| unreachable!()).expect("no quotes");
    assert_eq!(untouched, "inc:1");

    let err = extract_literals(r#"x <- "abc"#, |l| l).expect_err("unbalanced");
    assert_eq!(err.kind(), Some(DiagnosticKind::Syntax));
}
