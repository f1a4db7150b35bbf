//! Edge case and end-to-end tests for brimc-par.

#[cfg(test)]
mod tests {
    use crate::ast::{Ast, NodeId, NodeKind};
    use crate::{parse, Parse};

    fn tree(source: &str) -> String {
        parse(source).debug_tree()
    }

    /// Walk the reachable tree checking the sibling/parent link contract:
    /// following first_child/next_sibling visits exactly the children,
    /// ends at last_child, and every child points back at its parent.
    fn check_links(ast: &Ast, id: NodeId) {
        let children: Vec<_> = ast.children(id).collect();
        match children.last() {
            None => {
                assert!(ast.first_child(id).is_none());
                assert!(ast.last_child(id).is_none());
            }
            Some(last) => {
                assert_eq!(ast.first_child(id), Some(children[0]));
                assert_eq!(ast.last_child(id), Some(*last));
            }
        }
        for child in children {
            assert_eq!(ast.parent(child), Some(id));
            check_links(ast, child);
        }
    }

    fn parse_checked(source: &str) -> Parse {
        let result = parse(source);
        check_links(result.ast(), result.root());
        result
    }

    // ==================== BOUNDARIES ====================

    #[test]
    fn test_empty_input_is_empty_scope() {
        let result = parse_checked("");
        assert_eq!(result.debug_tree(), "scope");
        assert!(result.ok());
    }

    #[test]
    fn test_whitespace_only_is_empty_scope() {
        let result = parse_checked("  \n\t\n   \n");
        assert_eq!(result.debug_tree(), "scope");
    }

    #[test]
    fn test_malformed_number_still_parses() {
        let result = parse_checked("1.2.3");
        assert_eq!(result.debug_tree(), "scope[literal(1.2.3)]");
        assert!(!result.ok());
    }

    #[test]
    fn test_unterminated_string_still_parses() {
        let result = parse_checked("\"abc");
        assert_eq!(result.debug_tree(), "scope[literal(abc)]");
        assert!(!result.ok());
    }

    #[test]
    fn test_invalid_operator_reports_and_continues() {
        let result = parse_checked("a , b\nx := 1");
        assert!(!result.ok());
        assert!(result.debug_tree().contains("statement(x)[literal(1)]"));
    }

    // ==================== SPEC SCENARIOS ====================

    #[test]
    fn test_scenario_simple_binding() {
        assert_eq!(tree("a := 55"), "scope[statement(a)[literal(55)]]");
    }

    #[test]
    fn test_scenario_precedence_and_grouping() {
        assert_eq!(
            tree("c := a + b * 2 * (1 + 3)"),
            "scope[statement(c)[expression(+)[literal(a),expression(*)[\
             expression(*)[literal(b),literal(2)],expression(()[\
             expression(+)[literal(1),literal(3)]]]]]]"
        );
    }

    #[test]
    fn test_scenario_struct_declaration() {
        assert_eq!(
            tree("point :: struct {\n    x int32\n    y int32\n}"),
            "scope[struct(point)[struct-field(x),struct-field(y)]]"
        );
    }

    #[test]
    fn test_scenario_fat_arrow_function_has_empty_body() {
        // `=>` is not grammar: the function keeps its arguments and an
        // empty body; the stray tokens fall through to the file scope
        let result = parse_checked("increment :: function(a) => a + 1");
        let rendered = result.debug_tree();
        assert!(rendered.starts_with("scope[function(increment)[arguments,scope]"));
        // the parameter without a type and the missing `{` are warnings,
        // not errors
        assert!(result.ok());
        assert!(!result.diagnostics().is_empty());
    }

    #[test]
    fn test_scenario_if_then_statement() {
        assert_eq!(
            tree("if a > b {\n    x := a\n}\nz := 1"),
            "scope[if[if(IF_TRUE)[if(CONDITION)[expression(>)[literal(a),literal(b)]],\
             scope[statement(x)[literal(a)]]]],statement(z)[literal(1)]]"
        );
    }

    #[test]
    fn test_scenario_for_loop() {
        assert_eq!(
            tree("for i := 0; i < 10; i++ {\n    grid[i] = 0\n}"),
            "scope[for[for(ARGUMENTS)[\
             for(ARGUMENT_EXPRESSION)[statement(i)[literal(0)]],\
             for(ARGUMENT_EXPRESSION)[expression(<)[literal(i),literal(10)]],\
             for(ARGUMENT_EXPRESSION)[expression(++)[literal(i)]]],\
             scope[expression(INDEX_OPERATOR)[literal(grid),literal(i)],\
             literal(=),literal(0)]]]"
        );
    }

    // ==================== DECLARATIONS ====================

    #[test]
    fn test_const_value_binding() {
        assert_eq!(tree("b :: 22"), "scope[statement(b)[literal(22)]]");
    }

    #[test]
    fn test_function_with_typed_parameters() {
        assert_eq!(
            tree("scale :: function(p point, f f32) {\n    p\n}"),
            "scope[function(scale)[arguments[literal(p),literal(f)],scope[literal(p)]]]"
        );
    }

    #[test]
    fn test_function_parameter_without_type_is_dropped() {
        let result = parse_checked("inc :: function(a) {\n    a\n}");
        assert_eq!(
            result.debug_tree(),
            "scope[function(inc)[arguments,scope[literal(a)]]]"
        );
        assert!(!result.diagnostics().is_empty());
    }

    #[test]
    fn test_nested_function_declarations() {
        assert_eq!(
            tree("a :: function() {\n    b :: function() {\n        x2 := 2\n    }\n    y2 := b(1 + 2)\n}"),
            "scope[function(a)[arguments,scope[\
             function(b)[arguments,scope[statement(x2)[literal(2)]]],\
             statement(y2)[call(b)[expression(+)[literal(1),literal(2)]]]]]]"
        );
    }

    #[test]
    fn test_struct_fields_on_one_line_with_semicolons() {
        assert_eq!(
            tree("circle :: struct { p point; r f32 }"),
            "scope[struct(circle)[struct-field(p),struct-field(r)]]"
        );
    }

    #[test]
    fn test_struct_extra_tokens_after_field_ignored() {
        // readiness flag: the third token on a field line is ignored
        assert_eq!(
            tree("s :: struct { a b c\n    d e\n}"),
            "scope[struct(s)[struct-field(a),struct-field(d)]]"
        );
    }

    #[test]
    fn test_declaration_value_on_next_line_is_abandoned() {
        let result = parse_checked("a :=\n    55");
        // the binding is dropped; 55 still parses as a bare literal
        assert_eq!(result.debug_tree(), "scope[literal(55)]");
    }

    // ==================== EXPRESSIONS ====================

    #[test]
    fn test_call_with_arguments() {
        assert_eq!(
            tree("d := 5 + test(6 + 1, 2) * 1"),
            "scope[statement(d)[expression(+)[literal(5),expression(*)[\
             call(test)[expression(+)[literal(6),literal(1)],literal(2)],\
             literal(1)]]]]"
        );
    }

    #[test]
    fn test_prefix_not() {
        assert_eq!(
            tree("x := !a"),
            "scope[statement(x)[expression(!)[literal(a)]]]"
        );
    }

    #[test]
    fn test_left_shift_is_infix() {
        assert_eq!(
            tree("x := a << 2"),
            "scope[statement(x)[expression(<<)[literal(a),literal(2)]]]"
        );
    }

    #[test]
    fn test_equality_uses_fused_name() {
        assert_eq!(
            tree("x := a == b"),
            "scope[statement(x)[expression(==)[literal(a),literal(b)]]]"
        );
    }

    #[test]
    fn test_member_access_is_right_tight() {
        assert_eq!(
            tree("x := a.b.c"),
            "scope[statement(x)[expression(.)[literal(a),\
             expression(.)[literal(b),literal(c)]]]]"
        );
    }

    #[test]
    fn test_ternary_three_children() {
        assert_eq!(
            tree("x := a ? b : c"),
            "scope[statement(x)[expression(?)[literal(a),literal(b),literal(c)]]]"
        );
    }

    #[test]
    fn test_postfix_decrement() {
        assert_eq!(tree("i--"), "scope[expression(--)[literal(i)]]");
    }

    #[test]
    fn test_comment_inside_expression_line() {
        assert_eq!(
            tree("x := 1 // trailing note\ny := 2"),
            "scope[statement(x)[literal(1)],statement(y)[literal(2)]]"
        );
    }

    #[test]
    fn test_comment_line_at_scope_level() {
        assert_eq!(
            tree("// header\nx := 1"),
            "scope[statement(x)[literal(1)]]"
        );
    }

    #[test]
    fn test_expression_stops_before_compound_assign() {
        // `+=` binds nothing; the expression ends in front of it
        assert_eq!(
            tree("a += 1"),
            "scope[literal(a),literal(+),literal(=),literal(1)]"
        );
    }

    // ==================== CONTROL FLOW ====================

    #[test]
    fn test_while_loop() {
        assert_eq!(
            tree("while a < 10 {\n    a++\n}"),
            "scope[while[while(CONDITION)[expression(<)[literal(a),literal(10)]],\
             scope[expression(++)[literal(a)]]]]"
        );
    }

    #[test]
    fn test_do_while_loop() {
        assert_eq!(
            tree("do {\n    x := a\n} while 2 > 3\nz := 1"),
            "scope[do-while[do-while(CONDITION)[expression(>)[literal(2),literal(3)]],\
             scope[statement(x)[literal(a)]]],statement(z)[literal(1)]]"
        );
    }

    #[test]
    fn test_if_else() {
        assert_eq!(
            tree("if a > b { x := 1 } else { y := 2 }"),
            "scope[if[if(IF_TRUE)[if(CONDITION)[expression(>)[literal(a),literal(b)]],\
             scope[statement(x)[literal(1)]]],if(ELSE)[scope[statement(y)[literal(2)]]]]]"
        );
    }

    #[test]
    fn test_else_if_chains_control_flow() {
        assert_eq!(
            tree("if a { x := 1 } else if b { y := 2 }"),
            "scope[if[if(IF_TRUE)[if(CONDITION)[literal(a)],scope[statement(x)[literal(1)]]],\
             if(ELSE)[if[if(IF_TRUE)[if(CONDITION)[literal(b)],\
             scope[statement(y)[literal(2)]]]]]]]"
        );
    }

    #[test]
    fn test_continue_and_break_are_standalone() {
        assert_eq!(
            tree("while 1 {\n    continue\n    break\n}"),
            "scope[while[while(CONDITION)[literal(1)],scope[continue,break]]]"
        );
    }

    #[test]
    fn test_for_without_header() {
        assert_eq!(
            tree("for {\n    x := 1\n}"),
            "scope[for[scope[statement(x)[literal(1)]]]]"
        );
    }

    #[test]
    fn test_for_with_empty_slots() {
        assert_eq!(
            tree("for ;; {\n    x := 1\n}"),
            "scope[for[for(ARGUMENTS)[for(ARGUMENT_PART_EMPTY),for(ARGUMENT_PART_EMPTY)],\
             scope[statement(x)[literal(1)]]]]"
        );
    }

    #[test]
    fn test_for_with_middle_slot_empty() {
        assert_eq!(
            tree("for i := 0;; i++ {\n    x := 1\n}"),
            "scope[for[for(ARGUMENTS)[\
             for(ARGUMENT_EXPRESSION)[statement(i)[literal(0)]],\
             for(ARGUMENT_PART_EMPTY),\
             for(ARGUMENT_EXPRESSION)[expression(++)[literal(i)]]],\
             scope[statement(x)[literal(1)]]]]"
        );
    }

    #[test]
    fn test_nested_for_loops() {
        let result = parse_checked(
            "for i := 0; i < 10; i++ {\n    for j := 0; j < 10; j++ {\n        grid[i][j] = 0\n    }\n}\nz := 1",
        );
        let rendered = result.debug_tree();
        assert_eq!(rendered.matches("for(ARGUMENTS)").count(), 2);
        assert!(rendered.contains(
            "expression(INDEX_OPERATOR)[expression(INDEX_OPERATOR)[literal(grid),literal(i)],literal(j)]"
        ));
        assert!(rendered.ends_with("statement(z)[literal(1)]]"));
    }

    #[test]
    fn test_do_without_brace_yields_nothing() {
        let result = parse_checked("do x while 1");
        assert!(!result.diagnostics().is_empty());
        // no do-while node survives
        assert!(!result.debug_tree().contains("do-while"));
    }

    // ==================== SCOPES ====================

    #[test]
    fn test_bare_nested_scope() {
        assert_eq!(
            tree("{\n    a := 1\n}"),
            "scope[scope[statement(a)[literal(1)]]]"
        );
    }

    #[test]
    fn test_statements_without_indentation_are_kept() {
        assert_eq!(
            tree("a := 1\nb := 2"),
            "scope[statement(a)[literal(1)],statement(b)[literal(2)]]"
        );
    }

    #[test]
    fn test_every_node_kind_is_walkable() {
        let source = "\
point :: struct { x int32 }\n\
f :: function(a int32) {\n\
    if a > 1 { b := a.x } else { continue }\n\
    for i := 0; i < 2; i++ { break }\n\
    while a < 4 { g(a, 1) }\n\
    do { g(a, 1) } while a < 3\n\
    s := `multi\nline`\n\
}\n";
        let result = parse_checked(source);
        let mut kinds = Vec::new();
        collect_kinds(result.ast(), result.root(), &mut kinds);
        for expected in [
            NodeKind::Root,
            NodeKind::Scope,
            NodeKind::Struct,
            NodeKind::StructField,
            NodeKind::Function,
            NodeKind::Arguments,
            NodeKind::Statement,
            NodeKind::Expression,
            NodeKind::Call,
            NodeKind::If,
            NodeKind::For,
            NodeKind::While,
            NodeKind::DoWhile,
            NodeKind::Continue,
            NodeKind::Break,
            NodeKind::Literal,
        ] {
            assert!(kinds.contains(&expected), "missing {:?}", expected);
        }
    }

    fn collect_kinds(ast: &Ast, id: NodeId, out: &mut Vec<NodeKind>) {
        out.push(ast.kind(id));
        for child in ast.children(id) {
            collect_kinds(ast, child, out);
        }
    }

    #[test]
    fn test_token_names_appear_at_most_once() {
        // pre-order walking the tree names every token at most once
        let result = parse_checked(
            "c := a + b * 2 * (1 + 3)\nf :: function(a int32) {\n    g(a, 1)\n}\n",
        );
        let mut seen = std::collections::HashSet::new();
        collect_token_names(result.ast(), result.root(), &mut seen);
    }

    fn collect_token_names(
        ast: &Ast,
        id: NodeId,
        seen: &mut std::collections::HashSet<brimc_lex::TokenId>,
    ) {
        if let Some(crate::ast::NodeName::Token(token)) = ast.get(id).name {
            assert!(seen.insert(token), "token used as a name twice");
        }
        for child in ast.children(id) {
            collect_token_names(ast, child, seen);
        }
    }
}
