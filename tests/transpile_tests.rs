use nova_py::{compile, lexer, transpile, CompileError, Compiler, LexError, ParseError};

fn wrap(body: &str) -> String {
    format!("PROGRAM BEGIN\n{}\nPROGRAM END", body)
}

// ============================================================================
// BASIC TRANSPILATION
// ============================================================================

#[test]
fn test_minimal_program() {
    let py = compile("PROGRAM BEGIN\ndisplay \"hi\"\nPROGRAM END");
    assert_eq!(py, "# Generated Python code\n\nprint(\"hi\")");
}

#[test]
fn test_empty_program() {
    assert_eq!(compile("PROGRAM BEGIN PROGRAM END"), "# Generated Python code\n");
}

#[test]
fn test_variable_declaration_and_assignment() {
    let py = transpile(&wrap("num x = 1\nx = x + 2\nstr s = \"a\"\nbool ok = true")).unwrap();
    assert!(py.contains("\nx = 1.0\n"));
    assert!(py.contains("\nx = (x + 2.0)\n"));
    assert!(py.contains("\ns = \"a\"\n"));
    assert!(py.ends_with("\nok = True"));
}

#[test]
fn test_deterministic_output() {
    let source = std::fs::read_to_string("demos/geometry.nova").unwrap();
    assert_eq!(compile(&source), compile(&source));
    assert_eq!(Compiler::new().compile(&source), compile(&source));
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[test]
fn test_multiplication_binds_tighter() {
    let py = transpile(&wrap("display 2 + 3 * 4")).unwrap();
    assert!(py.contains("print((2.0 + (3.0 * 4.0)))"));
}

#[test]
fn test_parentheses_are_preserved() {
    let py = transpile(&wrap("display (2 + 3) * 4")).unwrap();
    assert!(py.contains("print(((2.0 + 3.0) * 4.0))"));
}

#[test]
fn test_mixed_operands_pass_through() {
    let py = transpile(&wrap("display \"n = \" + 1 / total")).unwrap();
    assert!(py.contains("print((\"n = \" + (1.0 / total)))"));
}

#[test]
fn test_strings_are_not_escaped() {
    let py = transpile(&wrap(r#"display "C:\temp\new""#)).unwrap();
    assert!(py.contains(r#"print("C:\temp\new")"#));
}

// ============================================================================
// METADATA
// ============================================================================

#[test]
fn test_description_becomes_header_comment() {
    let py = compile(&wrap("DESCRIPTION \"x\"\ndisplay 1"));
    assert_eq!(py, "# Generated Python code\n# Description: x\n\nprint(1.0)");
}

#[test]
fn test_empty_description_emits_no_header_line() {
    let py = compile(&wrap("DESCRIPTION \"\"\ndisplay 1"));
    assert_eq!(py, "# Generated Python code\n\nprint(1.0)");
}

#[test]
fn test_metadata_header_order() {
    let py = compile(&wrap("date \"d\"\nauthor \"a\"\ndescription \"x\""));
    assert_eq!(
        py,
        "# Generated Python code\n# Description: x\n# Author: a\n# Date: d\n"
    );
}

#[test]
fn test_metadata_after_statement_is_rejected() {
    let py = compile(&wrap("display 1\nDESCRIPTION \"late\""));
    assert!(py.starts_with("Compilation error:"), "{}", py);
    assert!(py.contains("Expected ASSIGN, got STRING"));
}

// ============================================================================
// FUNCTIONS
// ============================================================================

#[test]
fn test_function_declaration() {
    let py = transpile(&wrap("func add(a: number, b: number) return number\n  display a + b\nEND")).unwrap();
    assert!(py.contains(
        "def add(a, b):\n    # Parameter a: number\n    # Parameter b: number\n    # Returns: number\n    print((a + b))\n"
    ));
}

#[test]
fn test_function_block_ends_with_one_blank_line() {
    let py = transpile(&wrap("func f()\n  display 1\nEND\ndisplay 2")).unwrap();
    assert!(py.ends_with("def f():\n    print(1.0)\n\nprint(2.0)"));
}

#[test]
fn test_typed_params_need_identifier_types() {
    let py = compile(&wrap("func f(a: num)\nEND"));
    assert!(py.starts_with("Compilation error: Expected IDENTIFIER, got NUM"), "{}", py);
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_invalid_character() {
    let py = compile(&wrap("num x = 1 @ 2"));
    assert_eq!(py, "Compilation error: Invalid character '@' at line 2, column 11");
}

#[test]
fn test_control_flow_keywords_are_not_statements() {
    let py = compile(&wrap("if x"));
    assert_eq!(py, "Compilation error: Unexpected token IF at line 2, column 1");
}

#[test]
fn test_missing_program_end() {
    let err = transpile("PROGRAM BEGIN\ndisplay 1\n").unwrap_err();
    assert_eq!(err, CompileError::Parse(ParseError::UnexpectedEof { line: 3, column: 1 }));
    assert_eq!(err.position(), (3, 1));
}

#[test]
fn test_malformed_number_is_a_parse_error() {
    let err = transpile(&wrap("display 1.2.3")).unwrap_err();
    assert!(matches!(err, CompileError::Parse(ParseError::InvalidNumber { .. })));
}

#[test]
fn test_unterminated_string_is_not_a_lex_error() {
    let tokens = lexer::tokenize("PROGRAM BEGIN display \"open").unwrap();
    assert_eq!(tokens[3].text, "open");

    // The string swallows PROGRAM END, so parsing runs out of input.
    let err = transpile("PROGRAM BEGIN display \"open PROGRAM END").unwrap_err();
    assert!(!matches!(err, CompileError::Lex(_)));
}

#[test]
fn test_unterminated_block_comment_is_not_a_lex_error() {
    let err = transpile("PROGRAM BEGIN /* display 1 PROGRAM END").unwrap_err();
    assert!(matches!(err, CompileError::Parse(ParseError::UnexpectedEof { .. })));
}

#[test]
fn test_one_token_after_program_end_is_lexed() {
    let py = compile("PROGRAM BEGIN\ndisplay 1\nPROGRAM END @");
    assert_eq!(py, "Compilation error: Invalid character '@' at line 3, column 13");

    let py = compile("PROGRAM BEGIN\ndisplay 1\nPROGRAM END\ndisplay 2 @");
    assert_eq!(py, "# Generated Python code\n\nprint(1.0)");
}

#[test]
fn test_lex_error_type() {
    let err = transpile("PROGRAM BEGIN ;").unwrap_err();
    assert_eq!(
        err,
        CompileError::Lex(LexError::InvalidCharacter {
            ch: ';',
            line: 1,
            column: 15
        })
    );
}

// ============================================================================
// FULL EXAMPLE TRANSPILATION
// ============================================================================

#[test]
fn test_hello_example() {
    let source = std::fs::read_to_string("demos/hello.nova").unwrap();
    let py = transpile(&source).unwrap();
    assert_eq!(
        py,
        "# Generated Python code\n\
         # Description: Prints a greeting\n\
         # Author: Nova Team\n\
         # Date: 2024-03-01\n\
         \n\
         print(\"Hello, world!\")"
    );
}

#[test]
fn test_geometry_example() {
    let _ = env_logger::builder().is_test(true).try_init();
    let source = std::fs::read_to_string("demos/geometry.nova").unwrap();
    let py = transpile(&source).unwrap();
    let expected = [
        "# Generated Python code",
        "# Description: Area and perimeter of a rectangle",
        "",
        "width = 12.0",
        "height = 7.5",
        "def area(w, h):",
        "    # Parameter w: number",
        "    # Parameter h: number",
        "    # Returns: number",
        "    result = (w * h)",
        "    print(result)",
        "",
        "def perimeter(w, h):",
        "    print((2.0 * (w + h)))",
        "",
        "label = \"rectangle\"",
        "square = False",
        "print(label)",
        "print(((width * height) - (1.0 / 2.0)))",
    ]
    .join("\n");
    assert_eq!(py, expected);
}

#[test]
fn test_counter_example() {
    let source = std::fs::read_to_string("demos/counter.nova").unwrap();
    let py = transpile(&source).unwrap();
    assert!(py.contains("# Author: Nova Team"));
    assert!(py.contains("count = 0.0\ncount = (count + 1.0)\ncount = (count + 1.0)"));
    assert!(py.contains("print(\"count:\")\nprint(count)"));
    assert!(py.ends_with("def reset():\n    count = 0.0\n"));
}
