//! Tests for regex syntax trees.

use super::RegexAst;

#[test]
fn post_order_visits_operands_before_operators() {
    // .(a)(*(b))
    let ast = RegexAst::concat(
        RegexAst::Symbol('a'),
        RegexAst::star(RegexAst::Symbol('b')),
    );

    let order: Vec<String> = ast
        .post_order()
        .iter()
        .map(|node| match node {
            RegexAst::Symbol(c) => c.to_string(),
            RegexAst::Star(_) => "*".to_owned(),
            RegexAst::Concat(..) => ".".to_owned(),
            RegexAst::Union(..) => "|".to_owned(),
        })
        .collect();

    // Left subtree first, so a fold pops binary operands right-then-left.
    assert_eq!(order, ["a", "b", "*", "."]);
}

#[test]
fn post_order_of_leaf_is_the_leaf() {
    let ast = RegexAst::Symbol('a');
    assert_eq!(ast.post_order(), [&RegexAst::Symbol('a')]);
}

#[test]
fn display_renders_canonical_prefix_form() {
    let ast = RegexAst::concat(
        RegexAst::Symbol('a'),
        RegexAst::star(RegexAst::union(
            RegexAst::Symbol('a'),
            RegexAst::Symbol('b'),
        )),
    );
    assert_eq!(ast.to_string(), ".(a)(*(|(a)(b)))");
}
