#[cfg(test)]
/// Parser unit tests.
///
/// These tests cover each syntactic form, the two lookahead decisions (declarator boundary, same-line `*`), and
/// the wording of terminator errors.
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;
    use crate::lexer;

    fn tokens(source: &str) -> Vec<Token> {
        lexer::lex(source).unwrap_or_else(|e| panic!("lex({source:?}) failed: {e}"))
    }

    fn program(source: &str) -> Program {
        parse(&tokens(source)).unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    fn program_err(source: &str) -> CompileError {
        parse(&tokens(source)).expect_err("parse should fail")
    }

    fn fragment(source: &str) -> Vec<Spanned<Statement>> {
        parse_fragment(&tokens(source)).unwrap_or_else(|e| panic!("parse_fragment failed: {e}"))
    }

    fn fragment_err(source: &str) -> CompileError {
        parse_fragment(&tokens(source)).expect_err("parse_fragment should fail")
    }

    fn expr(source: &str) -> String {
        parse_expression(&tokens(source))
            .unwrap_or_else(|e| panic!("parse_expression({source:?}) failed: {e}"))
            .to_string()
    }

    fn code_declarations(source: &str) -> Vec<Spanned<Declaration>> {
        let program = program(source);
        assert_eq!(program.units.len(), 1);
        match program.units.into_iter().next().map(|u| u.node) {
            Some(Unit::Code(code)) => code.declarations,
            other => panic!("expected code unit, got {other:?}"),
        }
    }

    fn only_function_body(source: &str) -> Body {
        match code_declarations(source).into_iter().next().map(|d| d.node) {
            Some(Declaration::Function(f)) => f.body,
            other => panic!("expected function, got {other:?}"),
        }
    }

    // ========================================================================
    // Declarator boundary
    // ========================================================================

    #[test]
    fn test_two_var_sections_yield_two_declarators() {
        let decls = code_declarations("code M var a, b: int = 1 var c: int = 2 endCode");
        let declarators: Vec<&VarDeclarator> = decls
            .iter()
            .filter_map(|d| match &d.node {
                Declaration::Var(v) => Some(v.declarators.iter().map(|d| &d.node)),
                _ => None,
            })
            .flatten()
            .collect();
        assert_eq!(declarators.len(), 2);
        assert_eq!(declarators[0].names, vec!["a", "b"]);
        assert_eq!(declarators[1].names, vec!["c"]);
    }

    #[test]
    fn test_one_var_section_continues_at_name_list_colon() {
        let decls = code_declarations("code M var a: int = 1 b, c: char endCode");
        assert_eq!(decls.len(), 1);
        let Declaration::Var(var) = &decls[0].node else {
            panic!("expected var");
        };
        assert_eq!(var.declarators.len(), 2);
        assert_eq!(var.declarators[1].node.names, vec!["b", "c"]);
        assert!(var.declarators[1].node.value.is_none());
    }

    #[test]
    fn test_var_section_ends_before_assignment() {
        let body = only_function_body("code M function f() var a: int b = 2 endFunction endCode");
        assert_eq!(body.vars.len(), 1);
        assert_eq!(body.vars[0].node.declarators.len(), 1);
        assert_eq!(body.statements.len(), 1);
        assert!(matches!(body.statements[0].node, Statement::Assignment(_)));
    }

    #[test]
    fn test_var_after_statement_is_rejected() {
        let err = program_err("code M function f() x = 1 var a: int endFunction endCode");
        assert!(err.message.contains("before the first statement"), "{}", err.message);
    }

    // ========================================================================
    // Same-line `*`
    // ========================================================================

    #[test]
    fn test_star_on_new_line_starts_dereference_statement() {
        let stmts = fragment("a\n* b");
        assert_eq!(stmts.len(), 2);
        match (&stmts[0].node, &stmts[1].node) {
            (Statement::Expr(first), Statement::Expr(second)) => {
                assert_eq!(first.to_string(), "a");
                assert_eq!(second.to_string(), "(* b)");
                assert!(matches!(
                    second.node,
                    Expr::Unary {
                        operator: UnaryOp::Deref,
                        ..
                    }
                ));
            }
            other => panic!("expected two expression statements, got {other:?}"),
        }
    }

    #[test]
    fn test_star_on_same_line_multiplies() {
        let stmts = fragment("a * b");
        assert_eq!(stmts.len(), 1);
        let Statement::Expr(e) = &stmts[0].node else {
            panic!("expected expression statement");
        };
        assert!(matches!(
            e.node,
            Expr::Binary {
                operator: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn test_trailing_star_continues_onto_next_line() {
        let stmts = fragment("a *\nb");
        assert_eq!(stmts.len(), 1);
        let Statement::Expr(e) = &stmts[0].node else {
            panic!("expected expression statement");
        };
        assert_eq!(e.to_string(), "(* a b)");
    }

    #[test]
    fn test_assignment_followed_by_dereference_assignment() {
        let stmts = fragment("x = a\n*p = 3");
        assert_eq!(stmts.len(), 2);
        let Statement::Assignment(second) = &stmts[1].node else {
            panic!("expected assignment");
        };
        assert_eq!(second.left.to_string(), "(* p)");
        assert_eq!(second.right.to_string(), "3");
    }

    #[test]
    fn test_newline_only_matters_for_star() {
        let stmts = fragment("x = a\n- b");
        assert_eq!(stmts.len(), 1);
        let Statement::Assignment(assign) = &stmts[0].node else {
            panic!("expected assignment");
        };
        assert_eq!(assign.right.to_string(), "(- a b)");
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_precedence() {
        insta::assert_snapshot!(expr("1 + 2 * 3"), @"(+ 1 (* 2 3))");
        insta::assert_snapshot!(expr("1 * 2 + 3"), @"(+ (* 1 2) 3)");
        insta::assert_snapshot!(expr("a || b && c"), @"(|| a (&& b c))");
        insta::assert_snapshot!(expr("a & b ^ c | d"), @"(| (^ (& a b) c) d)");
        insta::assert_snapshot!(expr("a == b < c"), @"(== a (< b c))");
        insta::assert_snapshot!(expr("x << 1 + 2"), @"(<< x (+ 1 2))");
        insta::assert_snapshot!(expr("x >>> 2 >= y"), @"(>= (>>> x 2) y)");
    }

    #[test]
    fn test_left_associativity() {
        insta::assert_snapshot!(expr("a - b - c"), @"(- (- a b) c)");
        insta::assert_snapshot!(expr("a / b % c * d"), @"(* (% (/ a b) c) d)");
        insta::assert_snapshot!(expr("a || b || c"), @"(|| (|| a b) c)");
    }

    #[test]
    fn test_prefix_operators_stack() {
        insta::assert_snapshot!(expr("!*p"), @"(! (* p))");
        insta::assert_snapshot!(expr("- - x"), @"(- (- x))");
        insta::assert_snapshot!(expr("&a.b"), @"(& (field a b))");
        insta::assert_snapshot!(expr("-a * b"), @"(* (- a) b)");
    }

    #[test]
    fn test_postfix_chains() {
        insta::assert_snapshot!(expr("a.b[0].c asInteger"), @"(asInteger (field (index (field a b) 0) c))");
        insta::assert_snapshot!(expr("a.m(1, 2).n"), @"(field (method a m 1 2) n)");
        insta::assert_snapshot!(expr("list arraySize - 1"), @"(- (arraySize list) 1)");
        insta::assert_snapshot!(expr("p asPtrTo ptr to int"), @"(asPtrTo p ptr to int)");
        insta::assert_snapshot!(expr("x isKindOf List[int]"), @"(isKindOf x List[int])");
        insta::assert_snapshot!(expr("x isInstanceOf Shape"), @"(isInstanceOf x Shape)");
        insta::assert_snapshot!(expr("self.count + super.size()"), @"(+ (field self count) (method super size))");
    }

    #[test]
    fn test_primaries() {
        insta::assert_snapshot!(expr("f(x) + g()"), @"(+ (call f x) (call g))");
        insta::assert_snapshot!(expr("(1 + 2) * 3"), @"(* (paren (+ 1 2)) 3)");
        insta::assert_snapshot!(expr("0xFF + 1.5"), @"(+ 0xFF 1.5)");
        insta::assert_snapshot!(expr("sizeOf array [*, 3] of char"), @"(sizeOf array [*, 3] of char)");
        insta::assert_snapshot!(expr("true && null == false"), @"(&& true (== null false))");
    }

    #[test]
    fn test_constructors_pick_initializer_form() {
        insta::assert_snapshot!(expr("new Point {x = 1, y = 2}"), @"(new Point (fields (x 1) (y 2)))");
        insta::assert_snapshot!(expr("new array of int {10 of 0, 1}"), @"(new array of int (array (of 10 0) 1))");
        insta::assert_snapshot!(expr("alloc Node"), @"(alloc Node)");
        insta::assert_snapshot!(expr("new Box {y}"), @"(new Box (array y))");
    }

    #[test]
    fn test_closure_in_expression_position() {
        insta::assert_snapshot!(
            expr("function (a, b: int) returns int return a + b endFunction"),
            @"(closure (a b) 1)"
        );
    }

    #[test]
    fn test_expression_must_span_input() {
        let err = parse_expression(&tokens("a b")).unwrap_err();
        assert_eq!(err.message, "expected end of expression, found identifier `b`");
    }

    #[test]
    fn test_missing_operand_at_end_is_unexpected_eof() {
        let err = parse_expression(&tokens("1 +")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEof);
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_if_without_else() {
        let stmts = fragment("if true\n  x = 1\nendIf");
        assert_eq!(stmts.len(), 1);
        let Statement::If(stmt) = &stmts[0].node else {
            panic!("expected if");
        };
        assert_eq!(stmt.then_body.len(), 1);
        assert!(stmt.else_ifs.is_empty());
        assert!(stmt.else_body.is_none());
        assert_eq!(stmts[0].node.kind().name(), "if_statement");
    }

    #[test]
    fn test_if_elseif_else() {
        let stmts = fragment("if a x = 1 elseIf b x = 2 elseIf c x = 3 else x = 4 y = 5 endIf");
        let Statement::If(stmt) = &stmts[0].node else {
            panic!("expected if");
        };
        assert_eq!(stmt.else_ifs.len(), 2);
        assert_eq!(stmt.else_ifs[1].condition.to_string(), "c");
        assert_eq!(stmt.else_body.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_elseif_after_else_is_rejected() {
        let err = fragment_err("if a x = 1 else x = 2 elseIf b x = 3 endIf");
        assert!(err.message.contains("expected `endIf`"), "{}", err.message);
        assert!(err.hints.iter().any(|h| h.contains("last clause")));
    }

    #[test]
    fn test_mismatched_terminator_names_both_ends() {
        let err = fragment_err("while true x = 1 endIf");
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(
            err.message,
            "expected `endWhile` to close `while` opened at 1:1, found `endIf`"
        );
        assert_eq!(err.position, Position::new(1, 18));
        assert!(err.notes.iter().any(|n| n.contains("`endIf` closes `if`")));
    }

    #[test]
    fn test_unclosed_block_is_unexpected_eof() {
        let err = fragment_err("while true\n  x = 1\n");
        assert_eq!(err.kind, ErrorKind::UnexpectedEof);
        assert_eq!(
            err.message,
            "expected `endWhile` to close `while` opened at 1:1, found end of input"
        );
    }

    #[test]
    fn test_inner_block_is_reported_first() {
        let err = fragment_err("while a\n  if b\n    x = 1\nendWhile");
        assert!(err.message.starts_with("expected `endIf` to close `if` opened at 2:3"), "{}", err.message);
    }

    #[test]
    fn test_do_until() {
        let stmts = fragment("do x = x + 1 until x > 10");
        let Statement::DoUntil(stmt) = &stmts[0].node else {
            panic!("expected do/until");
        };
        assert_eq!(stmt.body.len(), 1);
        assert_eq!(stmt.condition.to_string(), "(> x 10)");
    }

    #[test]
    fn test_both_for_forms() {
        let stmts = fragment(
            "for i = 0 to 10 by 2 sum = sum + i endFor\n\
             for (x = 0 ; x < 10 ; x = x + 1) sum = sum + x endFor",
        );
        assert_eq!(stmts.len(), 2);
        match &stmts[0].node {
            Statement::For(ForStmt::Range {
                iterator, by, body, ..
            }) => {
                assert_eq!(iterator.to_string(), "i");
                assert_eq!(by.as_ref().map(ToString::to_string).as_deref(), Some("2"));
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected range for, got {other:?}"),
        }
        match &stmts[1].node {
            Statement::For(ForStmt::Classic {
                init,
                condition,
                increment,
                body,
            }) => {
                assert_eq!(init.len(), 1);
                assert_eq!(condition.as_ref().map(ToString::to_string).as_deref(), Some("(< x 10)"));
                assert_eq!(increment.len(), 1);
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected classic for, got {other:?}"),
        }
    }

    #[test]
    fn test_classic_for_with_empty_parts() {
        let stmts = fragment("for ( ; ; ) break endFor");
        let Statement::For(ForStmt::Classic {
            init,
            condition,
            increment,
            body,
        }) = &stmts[0].node
        else {
            panic!("expected classic for");
        };
        assert!(init.is_empty());
        assert!(condition.is_none());
        assert!(increment.is_empty());
        assert!(matches!(body[0].node, Statement::Break));
    }

    #[test]
    fn test_switch_cases_keep_order() {
        let stmts = fragment("switch c case 'a': x = 1 case 'b': case 'c': x = 2 default: x = 3 endSwitch");
        let Statement::Switch(stmt) = &stmts[0].node else {
            panic!("expected switch");
        };
        let values: Vec<String> = stmt.cases.iter().map(|c| c.value.to_string()).collect();
        assert_eq!(values, vec!["'a'", "'b'", "'c'"]);
        assert!(stmt.cases[1].body.is_empty());
        assert_eq!(stmt.default.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_second_default_is_syntax_error() {
        let err = fragment_err("switch x case 1: y = 1 default: y = 2 default: y = 3 endSwitch");
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.message.contains("expected `endSwitch`"), "{}", err.message);
        assert!(err.message.ends_with("found `default`"), "{}", err.message);
        assert!(err.hints.iter().any(|h| h.contains("at most one `default`")));
    }

    #[test]
    fn test_switch_needs_a_case() {
        let err = fragment_err("switch x default: y = 1 endSwitch");
        assert_eq!(err.message, "expected `case`, found `default`");
    }

    #[test]
    fn test_try_without_catch_is_rejected() {
        let err = fragment_err("try x = 1 endTry");
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.message, "expected `catch`, found `endTry`");
        assert!(err.hints.iter().any(|h| h.contains("at least one `catch`")));
    }

    #[test]
    fn test_try_catches_keep_order() {
        let stmts = fragment("try foo() catch Oops(code: int): x = code catch Other(): debug endTry");
        let Statement::Try(stmt) = &stmts[0].node else {
            panic!("expected try");
        };
        let names: Vec<&str> = stmt.catches.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Oops", "Other"]);
        assert_eq!(stmt.catches[0].params[0].names, vec!["code"]);
        assert!(stmt.catches[1].params.is_empty());
    }

    #[test]
    fn test_simple_statements() {
        let stmts = fragment("return\nbreak continue debug throw Oops(1, 2) free p return x + 1");
        let kinds: Vec<&str> = stmts.iter().map(|s| s.node.kind().name()).collect();
        assert_eq!(
            kinds,
            vec![
                "return_statement",
                "break_statement",
                "continue_statement",
                "debug_statement",
                "throw_statement",
                "free_statement",
                "return_statement"
            ]
        );
        assert!(matches!(stmts[0].node, Statement::Return(None)));
        let Statement::Throw(throw) = &stmts[4].node else {
            panic!("expected throw");
        };
        assert_eq!(throw.args.len(), 2);
    }

    #[test]
    fn test_statement_spans_cover_the_construct() {
        let source = "x = 1\nwhile a b() endWhile";
        let stmts = fragment(source);
        let span = stmts[1].span;
        assert_eq!(&source[span.start..span.end], "while a b() endWhile");
    }

    // ========================================================================
    // Units and declarations
    // ========================================================================

    const HEADER: &str = "\
header Lib
  uses System renaming print to sysPrint, Collections
  const
    MAX = 10
    MIN = -1
  enum Red, Green = 5, Blue
  type
    Count = int
    Buffer = array [*] of char
  errors
    NotFound(key: int)
    Full()
  var total: int = 0
  functions
    add(a, b: int) returns int
    external puts(s: ptr to array of char)
  interface Shape
    messages
      area() returns double
  endInterface
  class Circle
    implements Shape
    superclass Object
    fields
      radius: double
      x, y: int
    methods
      area() returns double
  endClass
endHeader
";

    #[test]
    fn test_header_unit() {
        let program = program(HEADER);
        let Some(Unit::Header(header)) = program.units.first().map(|u| &u.node) else {
            panic!("expected header");
        };
        assert_eq!(header.name, "Lib");

        let uses = header.uses.as_ref().expect("uses clause");
        assert_eq!(uses.packages.len(), 2);
        assert_eq!(
            uses.packages[0].renamings,
            vec![Renaming {
                from: "print".into(),
                to: "sysPrint".into()
            }]
        );

        let kinds: Vec<&str> = header.declarations.iter().map(|d| d.node.kind().name()).collect();
        assert_eq!(
            kinds,
            vec![
                "const_declaration",
                "enum_declaration",
                "type_declaration",
                "error_declaration",
                "var_declaration",
                "functions_section",
                "interface_declaration",
                "class_declaration"
            ]
        );

        let Declaration::Const(consts) = &header.declarations[0].node else {
            panic!("expected const");
        };
        assert_eq!(consts.declarators.len(), 2);
        let Declaration::Errors(errs) = &header.declarations[3].node else {
            panic!("expected errors");
        };
        assert_eq!(errs.declarators.len(), 2);
        let Declaration::Functions(functions) = &header.declarations[5].node else {
            panic!("expected functions");
        };
        assert!(!functions.prototypes[0].node.external);
        assert!(functions.prototypes[1].node.external);
        let Declaration::Class(class) = &header.declarations[7].node else {
            panic!("expected class");
        };
        assert_eq!(class.fields.len(), 2);
        assert_eq!(class.superclass.as_ref().map(|s| s.node.name.as_str()), Some("Object"));
    }

    #[test]
    fn test_header_rejects_function_bodies() {
        let err = program_err("header H function f() endFunction endHeader");
        assert_eq!(err.message, "function bodies are not allowed in a header");
    }

    #[test]
    fn test_code_rejects_functions_section() {
        let err = program_err("code C functions f() endCode");
        assert!(err.message.contains("only allowed in a header"), "{}", err.message);
    }

    #[test]
    fn test_code_unit_with_behavior() {
        let source = "\
code Lib
  function add(a, b: int) returns int
    var sum: int
    sum = a + b
    return sum
  endFunction

  behavior Circle for Circle
    method area() returns double
      return 3.14 * radius * radius
    endMethod
    method infix plus(other: Circle) returns Circle
      return self
    endMethod
    method prefix -() returns Circle
      return self
    endMethod
    method at: int put: char
      debug
    endMethod
  endBehavior
endCode
";
        let decls = code_declarations(source);
        assert_eq!(decls.len(), 2);
        let Declaration::Behavior(behavior) = &decls[1].node else {
            panic!("expected behavior");
        };
        assert_eq!(behavior.for_type.as_ref().map(|t| t.node.name.as_str()), Some("Circle"));
        let selectors: Vec<String> = behavior.methods.iter().map(|m| m.node.prototype.node.selector()).collect();
        assert_eq!(selectors, vec!["area", "plus", "-", "at:put:"]);
        assert!(matches!(
            behavior.methods[1].node.prototype.node.kind,
            MethodKind::Infix { .. }
        ));
        assert!(matches!(
            behavior.methods[2].node.prototype.node.kind,
            MethodKind::Prefix {
                operator: OperatorId::Minus,
                ..
            }
        ));
    }

    #[test]
    fn test_behavior_needs_a_method() {
        let err = program_err("code C behavior B endBehavior endCode");
        assert_eq!(err.message, "expected `method`, found `endBehavior`");
    }

    #[test]
    fn test_generic_class_and_interface() {
        let decls = code_declarations(
            "code C
               interface Container [T: anyType] extends Sized, Printable
                 messages
                   get(i: int) returns T
                   at: int put: T
               endInterface
               class Box [T: anyType, U: int] implements Container[T]
               endClass
             endCode",
        );
        let Declaration::Interface(iface) = &decls[0].node else {
            panic!("expected interface");
        };
        assert_eq!(iface.type_params.len(), 1);
        assert_eq!(iface.extends.len(), 2);
        assert_eq!(iface.messages.len(), 2);
        let Declaration::Class(class) = &decls[1].node else {
            panic!("expected class");
        };
        assert_eq!(class.type_params.len(), 2);
        assert_eq!(class.implements[0].node.args.len(), 1);
        assert!(class.fields.is_empty());
    }

    #[test]
    fn test_type_forms() {
        let decls = code_declarations(
            "code C type
               Pair = record a, b: int next: ptr to Pair endRecord
               Callback = function (int, char) returns bool
               Grid = array [10, *] of double
             endCode",
        );
        let Declaration::Type(types) = &decls[0].node else {
            panic!("expected type");
        };
        let rendered: Vec<String> = types.declarators.iter().map(|d| d.node.ty.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "record a, b: int next: ptr to Pair endRecord",
                "function (int, char) returns bool",
                "array [10, *] of double"
            ]
        );
    }

    #[test]
    fn test_empty_record_is_rejected() {
        let err = program_err("code C type R = record endRecord endCode");
        assert_eq!(err.message, "expected record field, found `endRecord`");
    }

    #[test]
    fn test_reserved_word_cannot_be_a_name() {
        let err = program_err("code C var if: int endCode");
        assert_eq!(err.message, "expected variable name, found `if`");
        assert!(err.hints.iter().any(|h| h.contains("reserved word")));
    }

    #[test]
    fn test_multiple_units_in_order() {
        let program = program("header A endHeader code A endCode header B endHeader");
        let names: Vec<&str> = program
            .units
            .iter()
            .map(|u| match &u.node {
                Unit::Header(h) => h.name.as_str(),
                Unit::Code(c) => c.name.as_str(),
                Unit::Expression(_) => "<expr>",
            })
            .collect();
        assert_eq!(names, vec!["A", "A", "B"]);
    }

    #[test]
    fn test_empty_input_is_an_empty_program() {
        assert!(program("-- nothing here\n").units.is_empty());
    }

    #[test]
    fn test_unclosed_unit_names_it() {
        let err = program_err("code Main\n  var x: int\n");
        assert_eq!(err.kind, ErrorKind::UnexpectedEof);
        assert_eq!(
            err.message,
            "expected `endCode` to close `code` opened at 1:1, found end of input"
        );
    }

    // ========================================================================
    // Options and robustness
    // ========================================================================

    #[test]
    fn test_bare_expressions_are_opt_in() {
        let toks = tokens("1 + 2 code M endCode");
        let err = parse(&toks).unwrap_err();
        assert_eq!(err.message, "expected `header` or `code`, found integer `1`");
        assert!(!err.hints.is_empty());

        let program = parse_with_options(&toks, ParseOptions::new().with_bare_expressions(true)).unwrap();
        assert_eq!(program.units.len(), 2);
        let Unit::Expression(e) = &program.units[0].node else {
            panic!("expected bare expression");
        };
        assert_eq!(e.to_string(), "(+ 1 2)");
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        let toks = tokens(&source);
        let options = ParseOptions::new().with_max_nesting_depth(8);
        let err = Parser::with_options(&toks, options).parse_expression_to_end().unwrap_err();
        assert!(err.message.contains("nesting too deep (limit is 8)"), "{}", err.message);

        let within = ParseOptions::new().with_max_nesting_depth(64);
        assert!(Parser::with_options(&toks, within).parse_expression_to_end().is_ok());
    }

    #[test]
    fn test_deep_nesting_fails_cleanly_with_defaults() {
        let handle = std::thread::spawn(|| {
            let source = format!("{}x{}", "(".repeat(5000), ")".repeat(5000));
            parse_expression(&tokens(&source)).unwrap_err()
        });
        let err = handle.join().unwrap();
        assert!(err.message.contains("nesting too deep"), "{}", err.message);
    }

    #[test]
    fn test_nesting_within_the_limit_fits_a_default_thread() {
        let handle = std::thread::spawn(|| {
            let parens = format!("{}x{}", "(".repeat(250), ")".repeat(250));
            let expr = parse_expression(&tokens(&parens)).map(|e| matches!(e.node, Expr::Paren(_)));

            let whiles = format!(
                "code M\n  function f()\n{}x = 1\n{}  endFunction\nendCode\n",
                "while true\n".repeat(200),
                "endWhile\n".repeat(200)
            );
            let program = parse(&tokens(&whiles)).map(|p| p.units.len());
            (expr, program)
        });
        let (expr, program) = handle.join().unwrap();
        assert!(expr.unwrap());
        assert_eq!(program.unwrap(), 1);
    }

    #[test]
    fn test_stream_without_eof_is_rejected() {
        let mut toks = tokens("code M endCode");
        toks.pop();
        let err = parse(&toks).unwrap_err();
        assert!(err.message.contains("end-of-input token"), "{}", err.message);
        assert!(parse(&[]).is_err());
    }
}
