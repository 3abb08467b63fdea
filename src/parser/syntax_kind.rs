//! Token kinds produced by the lexer and consumed by the parser.

/// Kind of a lexed token.
///
/// Trivia kinds are produced by the lexer but filtered out before parsing.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    // Trivia
    WHITESPACE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // Literals and names
    IDENT,
    INT_NUMBER,
    FLOAT_NUMBER,
    STRING,
    CHAR,

    // Punctuation
    L_BRACE,
    R_BRACE,
    L_PAREN,
    R_PAREN,
    L_BRACKET,
    R_BRACKET,
    SEMICOLON,
    COMMA,
    DOT,
    ELLIPSIS,
    AT,
    QUESTION,
    COLON,
    COLON_COLON,
    ARROW,
    EQ,
    EQ_EQ,
    BANG_EQ,
    LT,
    GT,
    LT_EQ,
    GT_EQ,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    BANG,
    TILDE,
    AMP_AMP,
    PIPE_PIPE,
    PLUS_PLUS,
    MINUS_MINUS,
    SHL,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    SHL_EQ,
    SHR_EQ,
    USHR_EQ,

    // Keywords
    ABSTRACT_KW,
    BOOLEAN_KW,
    BREAK_KW,
    BYTE_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CLASS_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EXTENDS_KW,
    FALSE_KW,
    FINAL_KW,
    FINALLY_KW,
    FLOAT_KW,
    FOR_KW,
    IF_KW,
    IMPLEMENTS_KW,
    IMPORT_KW,
    INSTANCEOF_KW,
    INT_KW,
    INTERFACE_KW,
    LONG_KW,
    NATIVE_KW,
    NEW_KW,
    NULL_KW,
    PACKAGE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RETURN_KW,
    SHORT_KW,
    STATIC_KW,
    SUPER_KW,
    SWITCH_KW,
    SYNCHRONIZED_KW,
    THIS_KW,
    THROW_KW,
    THROWS_KW,
    TRANSIENT_KW,
    TRUE_KW,
    TRY_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,

    /// Unrecognized input.
    ERROR,
    /// Virtual end-of-input marker returned by the parser's lookahead.
    EOF,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE | SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT
        )
    }

    /// Primitive type keywords, including `void`.
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::BOOLEAN_KW
                | SyntaxKind::BYTE_KW
                | SyntaxKind::CHAR_KW
                | SyntaxKind::DOUBLE_KW
                | SyntaxKind::FLOAT_KW
                | SyntaxKind::INT_KW
                | SyntaxKind::LONG_KW
                | SyntaxKind::SHORT_KW
                | SyntaxKind::VOID_KW
        )
    }

    /// Declaration modifiers the parser accepts in any order.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::ABSTRACT_KW
                | SyntaxKind::DEFAULT_KW
                | SyntaxKind::FINAL_KW
                | SyntaxKind::NATIVE_KW
                | SyntaxKind::PRIVATE_KW
                | SyntaxKind::PROTECTED_KW
                | SyntaxKind::PUBLIC_KW
                | SyntaxKind::STATIC_KW
                | SyntaxKind::SYNCHRONIZED_KW
                | SyntaxKind::TRANSIENT_KW
                | SyntaxKind::VOLATILE_KW
        )
    }

    /// Assignment operators, simple and compound.
    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            SyntaxKind::EQ
                | SyntaxKind::PLUS_EQ
                | SyntaxKind::MINUS_EQ
                | SyntaxKind::STAR_EQ
                | SyntaxKind::SLASH_EQ
                | SyntaxKind::PERCENT_EQ
                | SyntaxKind::AMP_EQ
                | SyntaxKind::PIPE_EQ
                | SyntaxKind::CARET_EQ
                | SyntaxKind::SHL_EQ
                | SyntaxKind::SHR_EQ
                | SyntaxKind::USHR_EQ
        )
    }
}
