//! Recursive descent parser for the Java-like source subset
//!
//! Builds the owned AST in [`crate::syntax`] directly from tokens.
//! Supports error recovery: a malformed member or statement is reported and
//! skipped, and parsing continues with the next one.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use crate::base::{Name, TextRange, TextSize};
use crate::syntax::{
    Annotation, BinaryOp, Block, CatchClause, ClassDecl, ClassKind, Expr, ExprKind, FieldDecl,
    LiteralKind, Member, MethodDecl, Modifiers, Param, SourceFile, Stmt, StmtKind, TypeRef,
    VarDeclarator,
};

/// Parse result containing the AST and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub file: SourceFile,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

/// Parse source code into an AST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input)
        .filter(|t| !t.kind.is_trivia())
        .collect();
    let mut parser = Parser::new(tokens, TextSize::new(input.len() as u32));
    let file = parser.parse_source_file();
    Parse {
        file,
        errors: parser.errors,
    }
}

/// The parser state
struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    errors: Vec<SyntaxError>,
    eof: TextSize,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token<'a>>, eof: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            eof,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map_or(SyntaxKind::EOF, |t| t.kind)
    }

    fn kind_at(&self, pos: usize) -> SyntaxKind {
        self.tokens.get(pos).map_or(SyntaxKind::EOF, |t| t.kind)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn text(&self) -> &'a str {
        self.tokens.get(self.pos).map_or("", |t| t.text)
    }

    fn start(&self) -> TextSize {
        self.tokens.get(self.pos).map_or(self.eof, |t| t.offset)
    }

    fn current_range(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or(TextRange::empty(self.eof), |t| {
                TextRange::new(t.offset, t.end())
            })
    }

    /// End offset of the last consumed token.
    fn prev_end(&self) -> TextSize {
        if self.pos == 0 {
            return TextSize::new(0);
        }
        self.tokens
            .get(self.pos - 1)
            .map_or(self.eof, |t| t.end())
    }

    fn range_from(&self, start: TextSize) -> TextRange {
        let end = self.prev_end().max(start);
        TextRange::new(start, end)
    }

    /// Whether two consecutive tokens starting at `self.pos + n` touch.
    fn adjacent(&self, n: usize) -> bool {
        match (self.tokens.get(self.pos + n), self.tokens.get(self.pos + n + 1)) {
            (Some(a), Some(b)) => a.end() == b.offset,
            _ => false,
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}, found {:?}", kind, self.current()));
            false
        }
    }

    fn expect_ident(&mut self) -> Option<(Name, TextRange)> {
        if self.at(SyntaxKind::IDENT) {
            let result = (Name::from(self.text()), self.current_range());
            self.bump();
            Some(result)
        } else {
            self.error(format!("expected identifier, found {:?}", self.current()));
            None
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Skip a balanced `open ... close` group. Must be positioned on `open`.
    fn skip_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) {
        let mut depth = 0usize;
        while !self.at(SyntaxKind::EOF) {
            let kind = self.current();
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
    }

    /// Skip tokens until one of `stop` (not consumed) or a closing brace at depth zero.
    fn recover_until(&mut self, stop: &[SyntaxKind]) {
        while !self.at(SyntaxKind::EOF) && !stop.contains(&self.current()) {
            match self.current() {
                SyntaxKind::L_BRACE => self.skip_balanced(SyntaxKind::L_BRACE, SyntaxKind::R_BRACE),
                SyntaxKind::L_PAREN => self.skip_balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN),
                SyntaxKind::R_BRACE => return,
                _ => self.bump(),
            }
        }
    }

    // =========================================================================
    // Files and declarations
    // =========================================================================

    fn parse_source_file(&mut self) -> SourceFile {
        let mut file = SourceFile::default();
        while !self.at(SyntaxKind::EOF) {
            match self.current() {
                SyntaxKind::PACKAGE_KW => {
                    self.bump();
                    file.package = self.parse_qualified_name();
                    self.expect(SyntaxKind::SEMICOLON);
                }
                SyntaxKind::IMPORT_KW => {
                    self.recover_until(&[SyntaxKind::SEMICOLON]);
                    self.eat(SyntaxKind::SEMICOLON);
                }
                SyntaxKind::SEMICOLON => self.bump(),
                _ => {
                    let before = self.pos;
                    match self.parse_type_decl() {
                        Some(class) => file.classes.push(class),
                        None => {
                            self.error("expected class, interface or enum declaration");
                            if self.pos == before {
                                self.bump();
                            }
                        }
                    }
                }
            }
        }
        file
    }

    fn parse_qualified_name(&mut self) -> Option<Name> {
        let (first, _) = self.expect_ident()?;
        let mut name = first.to_string();
        while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
            self.bump();
            name.push('.');
            name.push_str(self.text());
            self.bump();
        }
        Some(Name::from(name))
    }

    fn at_annotation(&self) -> bool {
        self.at(SyntaxKind::AT) && self.nth(1) == SyntaxKind::IDENT
    }

    fn parse_annotation(&mut self) -> Annotation {
        let start = self.start();
        self.bump(); // @
        let mut name = Name::from(self.text());
        self.bump();
        while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
            self.bump();
            name = Name::from(self.text());
            self.bump();
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.skip_balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
        }
        Annotation {
            name,
            range: self.range_from(start),
        }
    }

    /// Annotations and modifiers in any interleaving.
    fn parse_decl_prefix(&mut self) -> (Vec<Annotation>, Modifiers) {
        let mut annotations = Vec::new();
        let mut modifiers = Modifiers::default();
        loop {
            if self.at_annotation() {
                annotations.push(self.parse_annotation());
                continue;
            }
            let kind = self.current();
            if !kind.is_modifier() {
                break;
            }
            // `default` inside a switch is handled by the statement parser; here it is a modifier
            match kind {
                SyntaxKind::STATIC_KW => modifiers.is_static = true,
                SyntaxKind::ABSTRACT_KW => modifiers.is_abstract = true,
                SyntaxKind::FINAL_KW => modifiers.is_final = true,
                SyntaxKind::DEFAULT_KW => modifiers.is_default = true,
                _ => {}
            }
            self.bump();
        }
        (annotations, modifiers)
    }

    fn at_type_decl_keyword(&self) -> bool {
        matches!(
            self.current(),
            SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW | SyntaxKind::ENUM_KW
        ) || (self.at(SyntaxKind::AT) && self.nth(1) == SyntaxKind::INTERFACE_KW)
    }

    fn parse_type_decl(&mut self) -> Option<ClassDecl> {
        let start = self.start();
        let (annotations, modifiers) = self.parse_decl_prefix();
        if !self.at_type_decl_keyword() {
            return None;
        }
        Some(self.parse_class_rest(start, annotations, modifiers))
    }

    fn parse_class_rest(
        &mut self,
        start: TextSize,
        annotations: Vec<Annotation>,
        modifiers: Modifiers,
    ) -> ClassDecl {
        let kind = match self.current() {
            SyntaxKind::CLASS_KW => ClassKind::Class,
            SyntaxKind::ENUM_KW => ClassKind::Enum,
            _ => {
                // `@interface` declares an annotation type; model it as an interface
                self.eat(SyntaxKind::AT);
                ClassKind::Interface
            }
        };
        self.bump();

        let (name, name_range) = self
            .expect_ident()
            .unwrap_or_else(|| (Name::new_static("<anonymous>"), self.current_range()));
        if self.at(SyntaxKind::LT) {
            self.skip_type_params();
        }

        let mut superclass = None;
        let mut interfaces = Vec::new();
        if self.eat(SyntaxKind::EXTENDS_KW) {
            if kind == ClassKind::Interface {
                interfaces.extend(self.parse_type_list());
            } else {
                superclass = self.expect_type();
            }
        }
        if self.eat(SyntaxKind::IMPLEMENTS_KW) {
            interfaces.extend(self.parse_type_list());
        }

        let mut members = Vec::new();
        if self.expect(SyntaxKind::L_BRACE) {
            if kind == ClassKind::Enum {
                self.skip_enum_constants();
            }
            while !self.at(SyntaxKind::R_BRACE) && !self.at(SyntaxKind::EOF) {
                let before = self.pos;
                if let Some(member) = self.parse_member(&name) {
                    members.push(member);
                }
                if self.pos == before {
                    self.error(format!("unexpected {:?} in class body", self.current()));
                    self.bump();
                }
            }
            self.expect(SyntaxKind::R_BRACE);
        }

        ClassDecl {
            kind,
            name,
            name_range,
            annotations,
            modifiers,
            superclass,
            interfaces,
            members,
            range: self.range_from(start),
        }
    }

    fn skip_type_params(&mut self) {
        let mut depth = 0usize;
        while !self.at(SyntaxKind::EOF) {
            match self.current() {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::GT => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        return;
                    }
                }
                SyntaxKind::EXTENDS_KW | SyntaxKind::SUPER_KW | SyntaxKind::AMP => {
                    let next = self.nth(1);
                    if next != SyntaxKind::IDENT
                        && next != SyntaxKind::QUESTION
                        && !next.is_primitive_type()
                    {
                        self.bump();
                        self.error(format!("expected type, found {:?}", self.current()));
                        continue;
                    }
                }
                SyntaxKind::L_BRACE | SyntaxKind::SEMICOLON => {
                    self.error(format!("expected GT, found {:?}", self.current()));
                    return;
                }
                _ => {}
            }
            self.bump();
        }
    }

    fn skip_enum_constants(&mut self) {
        while self.at(SyntaxKind::IDENT) || self.at_annotation() {
            while self.at_annotation() {
                self.parse_annotation();
            }
            self.eat(SyntaxKind::IDENT);
            if self.at(SyntaxKind::L_PAREN) {
                self.skip_balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
            }
            if self.at(SyntaxKind::L_BRACE) {
                self.skip_balanced(SyntaxKind::L_BRACE, SyntaxKind::R_BRACE);
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.eat(SyntaxKind::SEMICOLON);
    }

    fn parse_type_list(&mut self) -> Vec<TypeRef> {
        let mut types = Vec::new();
        loop {
            match self.expect_type() {
                Some(ty) => types.push(ty),
                None => break,
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        types
    }

    fn parse_member(&mut self, class_name: &Name) -> Option<Member> {
        if self.eat(SyntaxKind::SEMICOLON) {
            return None;
        }
        if self.at(SyntaxKind::L_BRACE)
            || (self.at(SyntaxKind::STATIC_KW) && self.nth(1) == SyntaxKind::L_BRACE)
        {
            self.eat(SyntaxKind::STATIC_KW);
            return Some(Member::Initializer(self.parse_block()));
        }

        let start = self.start();
        let (annotations, modifiers) = self.parse_decl_prefix();
        if self.at_type_decl_keyword() {
            return Some(Member::Class(
                self.parse_class_rest(start, annotations, modifiers),
            ));
        }
        if self.at(SyntaxKind::LT) {
            self.skip_type_params();
        }

        if self.at(SyntaxKind::IDENT)
            && self.text() == class_name.as_str()
            && self.nth(1) == SyntaxKind::L_PAREN
        {
            let name_range = self.current_range();
            self.bump();
            return Some(Member::Method(self.parse_method_rest(
                start,
                annotations,
                modifiers,
                None,
                class_name.clone(),
                name_range,
            )));
        }

        let ty = match self.parse_type() {
            Some(ty) => ty,
            None => {
                self.error("expected member declaration");
                self.recover_until(&[SyntaxKind::SEMICOLON]);
                self.eat(SyntaxKind::SEMICOLON);
                return None;
            }
        };
        let Some((name, name_range)) = self.expect_ident() else {
            self.recover_until(&[SyntaxKind::SEMICOLON]);
            self.eat(SyntaxKind::SEMICOLON);
            return None;
        };

        if self.at(SyntaxKind::L_PAREN) {
            return Some(Member::Method(self.parse_method_rest(
                start,
                annotations,
                modifiers,
                Some(ty),
                name,
                name_range,
            )));
        }

        let declarators = self.parse_declarators(name, name_range);
        self.expect(SyntaxKind::SEMICOLON);
        Some(Member::Field(FieldDecl {
            annotations,
            modifiers,
            ty,
            declarators,
            range: self.range_from(start),
        }))
    }

    fn parse_method_rest(
        &mut self,
        start: TextSize,
        annotations: Vec<Annotation>,
        modifiers: Modifiers,
        return_type: Option<TypeRef>,
        name: Name,
        name_range: TextRange,
    ) -> MethodDecl {
        let is_constructor = return_type.is_none();
        let params = self.parse_params();
        while self.at(SyntaxKind::L_BRACKET) && self.nth(1) == SyntaxKind::R_BRACKET {
            self.bump();
            self.bump();
        }
        if self.eat(SyntaxKind::THROWS_KW) {
            self.parse_type_list();
        }
        if self.eat(SyntaxKind::DEFAULT_KW) {
            // annotation element default value
            self.parse_expr();
        }
        let body = if self.at(SyntaxKind::L_BRACE) {
            Some(self.parse_block())
        } else {
            self.expect(SyntaxKind::SEMICOLON);
            None
        };
        MethodDecl {
            annotations,
            modifiers,
            return_type,
            name,
            name_range,
            params,
            body,
            is_constructor,
            range: self.range_from(start),
        }
    }

    fn parse_params(&mut self) -> Vec<Param> {
        let mut params = Vec::new();
        if !self.expect(SyntaxKind::L_PAREN) {
            return params;
        }
        while !self.at(SyntaxKind::R_PAREN) && !self.at(SyntaxKind::EOF) {
            match self.parse_param() {
                Some(param) => params.push(param),
                None => {
                    self.recover_until(&[SyntaxKind::COMMA, SyntaxKind::R_PAREN]);
                }
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        params
    }

    fn parse_param(&mut self) -> Option<Param> {
        let start = self.start();
        self.parse_decl_prefix();
        let mut ty = self.parse_type()?;
        let is_varargs = self.eat(SyntaxKind::ELLIPSIS);
        if is_varargs {
            ty.dims += 1;
        }
        let (name, name_range) = self.expect_ident()?;
        while self.at(SyntaxKind::L_BRACKET) && self.nth(1) == SyntaxKind::R_BRACKET {
            self.bump();
            self.bump();
            ty.dims += 1;
        }
        Some(Param {
            ty,
            name,
            name_range,
            is_varargs,
            range: self.range_from(start),
        })
    }

    /// Declarators after the first name has been consumed.
    fn parse_declarators(&mut self, name: Name, name_range: TextRange) -> Vec<VarDeclarator> {
        let mut declarators = Vec::new();
        let mut current = Some((name, name_range));
        while let Some((name, name_range)) = current.take() {
            while self.at(SyntaxKind::L_BRACKET) && self.nth(1) == SyntaxKind::R_BRACKET {
                self.bump();
                self.bump();
            }
            let init = if self.eat(SyntaxKind::EQ) {
                Some(self.parse_var_init())
            } else {
                None
            };
            declarators.push(VarDeclarator {
                name,
                name_range,
                init,
                range: self.range_from(name_range.start()),
            });
            if self.eat(SyntaxKind::COMMA) {
                current = self.expect_ident();
            }
        }
        declarators
    }

    fn parse_var_init(&mut self) -> Expr {
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_array_init()
        } else {
            self.parse_expr()
        }
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn parse_type(&mut self) -> Option<TypeRef> {
        let start = self.start();
        let kind = self.current();
        let mut ty = if kind.is_primitive_type() {
            let ty = TypeRef::simple(self.text(), self.current_range());
            self.bump();
            ty
        } else if kind == SyntaxKind::IDENT {
            let mut name = Name::from(self.text());
            self.bump();
            let mut args = self.parse_type_args();
            while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
                self.bump();
                name = Name::from(self.text());
                self.bump();
                args = self.parse_type_args();
            }
            TypeRef {
                name,
                args,
                dims: 0,
                range: TextRange::empty(start),
            }
        } else if kind == SyntaxKind::QUESTION {
            // wildcard inside type arguments
            self.bump();
            if self.eat(SyntaxKind::EXTENDS_KW) || self.eat(SyntaxKind::SUPER_KW) {
                return self.parse_type();
            }
            TypeRef::simple("?", self.range_from(start))
        } else {
            return None;
        };
        while self.at(SyntaxKind::L_BRACKET) && self.nth(1) == SyntaxKind::R_BRACKET {
            self.bump();
            self.bump();
            ty.dims += 1;
        }
        ty.range = self.range_from(start);
        Some(ty)
    }

    fn expect_type(&mut self) -> Option<TypeRef> {
        let ty = self.parse_type();
        if ty.is_none() {
            self.error(format!("expected type, found {:?}", self.current()));
        }
        ty
    }

    fn parse_type_args(&mut self) -> Vec<TypeRef> {
        let mut args = Vec::new();
        if !self.eat(SyntaxKind::LT) {
            return args;
        }
        while !self.at(SyntaxKind::GT) && !self.at(SyntaxKind::EOF) {
            match self.parse_type() {
                Some(arg) => args.push(arg),
                None => break,
            }
            while self.eat(SyntaxKind::AMP) {
                self.parse_type();
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::GT);
        args
    }

    /// Non-consuming scan over a type starting at `pos`; returns the position after it.
    fn scan_type(&self, mut pos: usize) -> Option<usize> {
        let kind = self.kind_at(pos);
        if kind.is_primitive_type() {
            pos += 1;
        } else if kind == SyntaxKind::IDENT {
            pos += 1;
            loop {
                if self.kind_at(pos) == SyntaxKind::LT {
                    let mut depth = 0usize;
                    loop {
                        match self.kind_at(pos) {
                            SyntaxKind::LT => depth += 1,
                            SyntaxKind::GT => {
                                depth -= 1;
                                if depth == 0 {
                                    pos += 1;
                                    break;
                                }
                            }
                            SyntaxKind::IDENT
                            | SyntaxKind::DOT
                            | SyntaxKind::COMMA
                            | SyntaxKind::QUESTION
                            | SyntaxKind::EXTENDS_KW
                            | SyntaxKind::SUPER_KW
                            | SyntaxKind::AMP
                            | SyntaxKind::L_BRACKET
                            | SyntaxKind::R_BRACKET => {}
                            k if k.is_primitive_type() => {}
                            _ => return None,
                        }
                        pos += 1;
                    }
                }
                if self.kind_at(pos) == SyntaxKind::DOT && self.kind_at(pos + 1) == SyntaxKind::IDENT
                {
                    pos += 2;
                    continue;
                }
                break;
            }
        } else {
            return None;
        }
        while self.kind_at(pos) == SyntaxKind::L_BRACKET
            && self.kind_at(pos + 1) == SyntaxKind::R_BRACKET
        {
            pos += 2;
        }
        Some(pos)
    }

    /// `Type name` followed by something a declarator can continue with.
    fn at_local_decl(&self) -> bool {
        if self.at(SyntaxKind::FINAL_KW) || self.at_annotation() {
            return true;
        }
        let Some(after) = self.scan_type(self.pos) else {
            return false;
        };
        self.kind_at(after) == SyntaxKind::IDENT
            && matches!(
                self.kind_at(after + 1),
                SyntaxKind::EQ
                    | SyntaxKind::SEMICOLON
                    | SyntaxKind::COMMA
                    | SyntaxKind::COLON
                    | SyntaxKind::L_BRACKET
            )
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_block(&mut self) -> Block {
        let start = self.start();
        let mut stmts = Vec::new();
        if self.expect(SyntaxKind::L_BRACE) {
            while !self.at(SyntaxKind::R_BRACE) && !self.at(SyntaxKind::EOF) {
                let before = self.pos;
                let stmt = self.parse_stmt();
                if self.pos == before {
                    self.error(format!("unexpected {:?} in block", self.current()));
                    self.bump();
                    continue;
                }
                stmts.push(stmt);
            }
            self.expect(SyntaxKind::R_BRACE);
        }
        Block {
            stmts,
            range: self.range_from(start),
        }
    }

    fn parse_stmt(&mut self) -> Stmt {
        let start = self.start();
        let kind = match self.current() {
            SyntaxKind::L_BRACE => StmtKind::Block(self.parse_block()),
            SyntaxKind::SEMICOLON => {
                self.bump();
                StmtKind::Empty
            }
            SyntaxKind::IF_KW => self.parse_if(),
            SyntaxKind::WHILE_KW => {
                self.bump();
                let cond = self.parse_paren_condition();
                let body = Box::new(self.parse_stmt());
                StmtKind::While { cond, body }
            }
            SyntaxKind::DO_KW => {
                self.bump();
                let body = Box::new(self.parse_stmt());
                self.expect(SyntaxKind::WHILE_KW);
                let cond = self.parse_paren_condition();
                self.expect(SyntaxKind::SEMICOLON);
                StmtKind::DoWhile { body, cond }
            }
            SyntaxKind::FOR_KW => self.parse_for(),
            SyntaxKind::RETURN_KW => {
                self.bump();
                let value = if self.at(SyntaxKind::SEMICOLON) {
                    None
                } else {
                    Some(self.parse_expr())
                };
                self.expect(SyntaxKind::SEMICOLON);
                StmtKind::Return(value)
            }
            SyntaxKind::THROW_KW => {
                self.bump();
                let value = self.parse_expr();
                self.expect(SyntaxKind::SEMICOLON);
                StmtKind::Throw(value)
            }
            SyntaxKind::TRY_KW => self.parse_try(),
            SyntaxKind::SWITCH_KW => self.parse_switch(),
            SyntaxKind::SYNCHRONIZED_KW => {
                self.bump();
                self.parse_paren_condition();
                StmtKind::Block(self.parse_block())
            }
            SyntaxKind::BREAK_KW | SyntaxKind::CONTINUE_KW => {
                self.recover_until(&[SyntaxKind::SEMICOLON]);
                self.eat(SyntaxKind::SEMICOLON);
                StmtKind::Empty
            }
            SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW | SyntaxKind::ENUM_KW => {
                // local type declarations are not modelled
                self.error("local type declarations are not supported");
                self.recover_until(&[SyntaxKind::L_BRACE]);
                if self.at(SyntaxKind::L_BRACE) {
                    self.skip_balanced(SyntaxKind::L_BRACE, SyntaxKind::R_BRACE);
                }
                StmtKind::Empty
            }
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::COLON => {
                // labeled statement
                self.bump();
                self.bump();
                return self.parse_stmt();
            }
            _ if self.at_local_decl() => {
                let kind = self.parse_local_decl();
                self.expect(SyntaxKind::SEMICOLON);
                kind
            }
            _ => {
                let expr = self.parse_expr();
                self.expect(SyntaxKind::SEMICOLON);
                StmtKind::Expr(expr)
            }
        };
        Stmt {
            kind,
            range: self.range_from(start),
        }
    }

    fn parse_paren_condition(&mut self) -> Expr {
        self.expect(SyntaxKind::L_PAREN);
        let cond = self.parse_expr();
        self.expect(SyntaxKind::R_PAREN);
        cond
    }

    fn parse_if(&mut self) -> StmtKind {
        self.bump();
        let cond = self.parse_paren_condition();
        let then_branch = Box::new(self.parse_stmt());
        let else_branch = if self.eat(SyntaxKind::ELSE_KW) {
            Some(Box::new(self.parse_stmt()))
        } else {
            None
        };
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        }
    }

    /// Local variable declaration without the trailing `;`.
    fn parse_local_decl(&mut self) -> StmtKind {
        self.parse_decl_prefix();
        let ty = match self.parse_type() {
            Some(ty) => ty,
            None => {
                self.error("expected type");
                return StmtKind::Empty;
            }
        };
        let Some((name, name_range)) = self.expect_ident() else {
            return StmtKind::Empty;
        };
        let declarators = self.parse_declarators(name, name_range);
        StmtKind::Local { ty, declarators }
    }

    fn parse_for(&mut self) -> StmtKind {
        self.bump();
        self.expect(SyntaxKind::L_PAREN);

        // for (Type name : iterable)
        let checkpoint = self.pos;
        self.parse_decl_prefix();
        if let Some(after) = self.scan_type(self.pos) {
            if self.kind_at(after) == SyntaxKind::IDENT
                && self.kind_at(after + 1) == SyntaxKind::COLON
            {
                if let Some(ty) = self.parse_type() {
                    if let Some((name, name_range)) = self.expect_ident() {
                        self.expect(SyntaxKind::COLON);
                        let iterable = self.parse_expr();
                        self.expect(SyntaxKind::R_PAREN);
                        let body = Box::new(self.parse_stmt());
                        return StmtKind::ForEach {
                            ty,
                            name,
                            name_range,
                            iterable,
                            body,
                        };
                    }
                }
            }
        }
        self.pos = checkpoint;

        let mut init = Vec::new();
        if !self.at(SyntaxKind::SEMICOLON) {
            let start = self.start();
            if self.at_local_decl() {
                let kind = self.parse_local_decl();
                init.push(Stmt {
                    kind,
                    range: self.range_from(start),
                });
            } else {
                loop {
                    let expr_start = self.start();
                    let expr = self.parse_expr();
                    init.push(Stmt {
                        kind: StmtKind::Expr(expr),
                        range: self.range_from(expr_start),
                    });
                    if !self.eat(SyntaxKind::COMMA) {
                        break;
                    }
                }
            }
        }
        self.expect(SyntaxKind::SEMICOLON);
        let cond = if self.at(SyntaxKind::SEMICOLON) {
            None
        } else {
            Some(self.parse_expr())
        };
        self.expect(SyntaxKind::SEMICOLON);
        let mut update = Vec::new();
        while !self.at(SyntaxKind::R_PAREN) && !self.at(SyntaxKind::EOF) {
            update.push(self.parse_expr());
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        let body = Box::new(self.parse_stmt());
        StmtKind::For {
            init,
            cond,
            update,
            body,
        }
    }

    fn parse_try(&mut self) -> StmtKind {
        self.bump();
        let mut resources = Vec::new();
        if self.eat(SyntaxKind::L_PAREN) {
            while !self.at(SyntaxKind::R_PAREN) && !self.at(SyntaxKind::EOF) {
                let start = self.start();
                let kind = if self.at_local_decl() {
                    self.parse_local_decl()
                } else {
                    StmtKind::Expr(self.parse_expr())
                };
                resources.push(Stmt {
                    kind,
                    range: self.range_from(start),
                });
                if !self.eat(SyntaxKind::SEMICOLON) {
                    break;
                }
            }
            self.expect(SyntaxKind::R_PAREN);
        }
        let mut body = self.parse_block();
        if !resources.is_empty() {
            resources.append(&mut body.stmts);
            body.stmts = resources;
        }

        let mut catches = Vec::new();
        while self.at(SyntaxKind::CATCH_KW) {
            self.bump();
            self.expect(SyntaxKind::L_PAREN);
            let start = self.start();
            self.parse_decl_prefix();
            let ty = self.parse_type();
            while self.eat(SyntaxKind::PIPE) {
                self.parse_type();
            }
            let ident = self.expect_ident();
            self.expect(SyntaxKind::R_PAREN);
            let block = self.parse_block();
            if let (Some(ty), Some((name, name_range))) = (ty, ident) {
                catches.push(CatchClause {
                    param: Param {
                        ty,
                        name,
                        name_range,
                        is_varargs: false,
                        range: TextRange::new(start, name_range.end()),
                    },
                    body: block,
                });
            }
        }
        let finally = if self.eat(SyntaxKind::FINALLY_KW) {
            Some(self.parse_block())
        } else {
            None
        };
        StmtKind::Try {
            body,
            catches,
            finally,
        }
    }

    /// `switch` is flattened into a block of its case bodies.
    fn parse_switch(&mut self) -> StmtKind {
        let start = self.start();
        self.bump();
        self.parse_paren_condition();
        let mut stmts = Vec::new();
        if self.expect(SyntaxKind::L_BRACE) {
            while !self.at(SyntaxKind::R_BRACE) && !self.at(SyntaxKind::EOF) {
                match self.current() {
                    SyntaxKind::CASE_KW => {
                        self.recover_until(&[SyntaxKind::COLON, SyntaxKind::ARROW]);
                        self.bump();
                    }
                    SyntaxKind::DEFAULT_KW => {
                        self.bump();
                        self.bump(); // `:` or `->`
                    }
                    _ => {
                        let before = self.pos;
                        let stmt = self.parse_stmt();
                        if self.pos == before {
                            self.bump();
                            continue;
                        }
                        stmts.push(stmt);
                    }
                }
            }
            self.expect(SyntaxKind::R_BRACE);
        }
        StmtKind::Block(Block {
            stmts,
            range: self.range_from(start),
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expr(&mut self) -> Expr {
        self.parse_assignment()
    }

    /// Position just after the `)` matching the `(` at `pos`.
    fn matching_paren(&self, pos: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = pos;
        loop {
            match self.kind_at(i) {
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                SyntaxKind::EOF | SyntaxKind::L_BRACE | SyntaxKind::SEMICOLON => return None,
                _ => {}
            }
            i += 1;
        }
    }

    fn at_lambda(&self) -> bool {
        match self.current() {
            SyntaxKind::IDENT => self.nth(1) == SyntaxKind::ARROW,
            SyntaxKind::L_PAREN => self
                .matching_paren(self.pos)
                .is_some_and(|after| self.kind_at(after) == SyntaxKind::ARROW),
            _ => false,
        }
    }

    fn parse_lambda(&mut self) -> Expr {
        let start = self.start();
        if self.at(SyntaxKind::L_PAREN) {
            self.skip_balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
        } else {
            self.bump();
        }
        self.expect(SyntaxKind::ARROW);
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
        } else {
            self.parse_expr();
        }
        Expr::new(ExprKind::Lambda, self.range_from(start))
    }

    fn parse_assignment(&mut self) -> Expr {
        if self.at_lambda() {
            return self.parse_lambda();
        }
        let start = self.start();
        let lhs = self.parse_conditional();
        if self.current().is_assign_op() {
            let op = Name::from(self.text());
            self.bump();
            let rhs = if self.at(SyntaxKind::L_BRACE) {
                self.parse_array_init()
            } else {
                self.parse_assignment()
            };
            return Expr::new(
                ExprKind::Assign {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                self.range_from(start),
            );
        }
        lhs
    }

    fn parse_conditional(&mut self) -> Expr {
        let start = self.start();
        let cond = self.parse_binary(0);
        if !self.eat(SyntaxKind::QUESTION) {
            return cond;
        }
        let then_expr = self.parse_expr();
        self.expect(SyntaxKind::COLON);
        let else_expr = if self.at_lambda() {
            self.parse_lambda()
        } else {
            self.parse_conditional()
        };
        Expr::new(
            ExprKind::Conditional {
                cond: Box::new(cond),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            self.range_from(start),
        )
    }

    /// The binary operator at the cursor and how many tokens spell it.
    fn peek_binary_op(&self) -> Option<(BinaryOp, usize)> {
        let op = match self.current() {
            SyntaxKind::PIPE_PIPE => BinaryOp::Or,
            SyntaxKind::AMP_AMP => BinaryOp::And,
            SyntaxKind::PIPE => BinaryOp::BitOr,
            SyntaxKind::CARET => BinaryOp::BitXor,
            SyntaxKind::AMP => BinaryOp::BitAnd,
            SyntaxKind::EQ_EQ => BinaryOp::Eq,
            SyntaxKind::BANG_EQ => BinaryOp::Ne,
            SyntaxKind::LT => BinaryOp::Lt,
            SyntaxKind::LT_EQ => BinaryOp::Le,
            SyntaxKind::GT_EQ => BinaryOp::Ge,
            SyntaxKind::SHL => BinaryOp::Shl,
            SyntaxKind::PLUS => BinaryOp::Add,
            SyntaxKind::MINUS => BinaryOp::Sub,
            SyntaxKind::STAR => BinaryOp::Mul,
            SyntaxKind::SLASH => BinaryOp::Div,
            SyntaxKind::PERCENT => BinaryOp::Rem,
            SyntaxKind::GT => {
                if self.nth(1) == SyntaxKind::GT && self.adjacent(0) {
                    if self.nth(2) == SyntaxKind::GT && self.adjacent(1) {
                        return Some((BinaryOp::UShr, 3));
                    }
                    return Some((BinaryOp::Shr, 2));
                }
                BinaryOp::Gt
            }
            _ => return None,
        };
        Some((op, 1))
    }

    fn parse_binary(&mut self, min_prec: u8) -> Expr {
        let start = self.start();
        let mut lhs = self.parse_unary();
        loop {
            // instanceof binds like a relational operator
            if self.at(SyntaxKind::INSTANCEOF_KW) && 7 >= min_prec {
                self.bump();
                self.eat(SyntaxKind::FINAL_KW);
                let ty = self
                    .parse_type()
                    .unwrap_or_else(|| TypeRef::simple("?", self.current_range()));
                // pattern binding: `x instanceof Foo foo`
                self.eat(SyntaxKind::IDENT);
                lhs = Expr::new(
                    ExprKind::InstanceOf {
                        operand: Box::new(lhs),
                        ty,
                    },
                    self.range_from(start),
                );
                continue;
            }
            let Some((op, width)) = self.peek_binary_op() else {
                break;
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            for _ in 0..width {
                self.bump();
            }
            let rhs = self.parse_binary(prec + 1);
            lhs = Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                self.range_from(start),
            );
        }
        lhs
    }

    fn at_cast(&self) -> bool {
        if !self.at(SyntaxKind::L_PAREN) {
            return false;
        }
        let first = self.nth(1);
        let Some(after_type) = self.scan_type(self.pos + 1) else {
            return false;
        };
        // intersection casts: (A & B) x
        let mut close = after_type;
        while self.kind_at(close) == SyntaxKind::AMP {
            match self.scan_type(close + 1) {
                Some(next) => close = next,
                None => return false,
            }
        }
        if self.kind_at(close) != SyntaxKind::R_PAREN {
            return false;
        }
        if first.is_primitive_type() {
            return true;
        }
        matches!(
            self.kind_at(close + 1),
            SyntaxKind::IDENT
                | SyntaxKind::L_PAREN
                | SyntaxKind::THIS_KW
                | SyntaxKind::SUPER_KW
                | SyntaxKind::NEW_KW
                | SyntaxKind::INT_NUMBER
                | SyntaxKind::FLOAT_NUMBER
                | SyntaxKind::STRING
                | SyntaxKind::CHAR
                | SyntaxKind::TRUE_KW
                | SyntaxKind::FALSE_KW
                | SyntaxKind::NULL_KW
                | SyntaxKind::BANG
                | SyntaxKind::TILDE
        )
    }

    fn parse_unary(&mut self) -> Expr {
        let start = self.start();
        match self.current() {
            SyntaxKind::PLUS
            | SyntaxKind::MINUS
            | SyntaxKind::BANG
            | SyntaxKind::TILDE
            | SyntaxKind::PLUS_PLUS
            | SyntaxKind::MINUS_MINUS => {
                let op = Name::from(self.text());
                self.bump();
                let operand = self.parse_unary();
                Expr::new(
                    ExprKind::Unary {
                        op,
                        operand: Box::new(operand),
                    },
                    self.range_from(start),
                )
            }
            SyntaxKind::L_PAREN if self.at_cast() => {
                self.bump();
                let ty = self
                    .parse_type()
                    .unwrap_or_else(|| TypeRef::simple("?", self.current_range()));
                while self.eat(SyntaxKind::AMP) {
                    self.parse_type();
                }
                self.expect(SyntaxKind::R_PAREN);
                let operand = if self.at_lambda() {
                    self.parse_lambda()
                } else {
                    self.parse_unary()
                };
                Expr::new(
                    ExprKind::Cast {
                        ty,
                        operand: Box::new(operand),
                    },
                    self.range_from(start),
                )
            }
            _ => {
                let primary = self.parse_primary();
                self.parse_postfix(start, primary)
            }
        }
    }

    fn parse_postfix(&mut self, start: TextSize, mut expr: Expr) -> Expr {
        loop {
            match self.current() {
                SyntaxKind::DOT => {
                    self.bump();
                    if self.at(SyntaxKind::LT) {
                        // explicit type arguments: obj.<T>method()
                        self.skip_type_params();
                    }
                    match self.current() {
                        SyntaxKind::IDENT => {
                            let name = Name::from(self.text());
                            let name_range = self.current_range();
                            self.bump();
                            expr = if self.at(SyntaxKind::L_PAREN) {
                                let args = self.parse_args();
                                Expr::new(
                                    ExprKind::Call {
                                        qualifier: Some(Box::new(expr)),
                                        name,
                                        name_range,
                                        args,
                                    },
                                    self.range_from(start),
                                )
                            } else {
                                Expr::new(
                                    ExprKind::FieldAccess {
                                        qualifier: Box::new(expr),
                                        name,
                                        name_range,
                                    },
                                    self.range_from(start),
                                )
                            };
                        }
                        SyntaxKind::CLASS_KW | SyntaxKind::THIS_KW => {
                            // Foo.class / Outer.this
                            let name = Name::from(self.text());
                            let name_range = self.current_range();
                            self.bump();
                            expr = Expr::new(
                                ExprKind::FieldAccess {
                                    qualifier: Box::new(expr),
                                    name,
                                    name_range,
                                },
                                self.range_from(start),
                            );
                        }
                        SyntaxKind::NEW_KW => {
                            // qualified inner class creation: outer.new Inner()
                            expr = self.parse_new();
                        }
                        _ => {
                            self.error("expected member name after '.'");
                            return expr;
                        }
                    }
                }
                SyntaxKind::L_BRACKET => {
                    self.bump();
                    let index = self.parse_expr();
                    self.expect(SyntaxKind::R_BRACKET);
                    expr = Expr::new(
                        ExprKind::Index {
                            base: Box::new(expr),
                            index: Box::new(index),
                        },
                        self.range_from(start),
                    );
                }
                SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                    let op = Name::from(self.text());
                    self.bump();
                    expr = Expr::new(
                        ExprKind::Unary {
                            op,
                            operand: Box::new(expr),
                        },
                        self.range_from(start),
                    );
                }
                SyntaxKind::COLON_COLON => {
                    self.bump();
                    if self.at(SyntaxKind::IDENT) || self.at(SyntaxKind::NEW_KW) {
                        self.bump();
                    }
                    expr = Expr::new(ExprKind::MethodRef, self.range_from(start));
                }
                _ => return expr,
            }
        }
    }

    fn parse_args(&mut self) -> Vec<Expr> {
        let mut args = Vec::new();
        if !self.expect(SyntaxKind::L_PAREN) {
            return args;
        }
        while !self.at(SyntaxKind::R_PAREN) && !self.at(SyntaxKind::EOF) {
            let before = self.pos;
            args.push(self.parse_expr());
            if self.pos == before {
                break;
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        args
    }

    fn parse_primary(&mut self) -> Expr {
        let start = self.start();
        let range = self.current_range();
        let literal = |kind| Expr::new(ExprKind::Literal(kind), range);
        match self.current() {
            SyntaxKind::INT_NUMBER => {
                self.bump();
                literal(LiteralKind::Int)
            }
            SyntaxKind::FLOAT_NUMBER => {
                self.bump();
                literal(LiteralKind::Float)
            }
            SyntaxKind::STRING => {
                self.bump();
                literal(LiteralKind::String)
            }
            SyntaxKind::CHAR => {
                self.bump();
                literal(LiteralKind::Char)
            }
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => {
                self.bump();
                literal(LiteralKind::Bool)
            }
            SyntaxKind::NULL_KW => {
                self.bump();
                literal(LiteralKind::Null)
            }
            SyntaxKind::THIS_KW | SyntaxKind::SUPER_KW => {
                let is_this = self.at(SyntaxKind::THIS_KW);
                let name = Name::from(self.text());
                self.bump();
                if self.at(SyntaxKind::L_PAREN) {
                    // constructor delegation: this(...) / super(...)
                    let args = self.parse_args();
                    return Expr::new(
                        ExprKind::Call {
                            qualifier: None,
                            name,
                            name_range: range,
                            args,
                        },
                        self.range_from(start),
                    );
                }
                let kind = if is_this {
                    ExprKind::This
                } else {
                    ExprKind::Super
                };
                Expr::new(kind, range)
            }
            SyntaxKind::IDENT => {
                let name = Name::from(self.text());
                self.bump();
                if self.at(SyntaxKind::L_PAREN) {
                    let args = self.parse_args();
                    return Expr::new(
                        ExprKind::Call {
                            qualifier: None,
                            name,
                            name_range: range,
                            args,
                        },
                        self.range_from(start),
                    );
                }
                Expr::new(ExprKind::Name(name), range)
            }
            kind if kind.is_primitive_type() => {
                // int.class, int[]::new
                let ty = self
                    .parse_type()
                    .unwrap_or_else(|| TypeRef::simple("?", range));
                Expr::new(ExprKind::Name(ty.name), self.range_from(start))
            }
            SyntaxKind::NEW_KW => self.parse_new(),
            SyntaxKind::L_PAREN => {
                self.bump();
                let inner = self.parse_expr();
                self.expect(SyntaxKind::R_PAREN);
                Expr::new(ExprKind::Paren(Box::new(inner)), self.range_from(start))
            }
            SyntaxKind::L_BRACE => self.parse_array_init(),
            SyntaxKind::SWITCH_KW => {
                // switch expressions are not modelled
                self.bump();
                if self.at(SyntaxKind::L_PAREN) {
                    self.skip_balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
                }
                if self.at(SyntaxKind::L_BRACE) {
                    self.skip_balanced(SyntaxKind::L_BRACE, SyntaxKind::R_BRACE);
                }
                Expr::new(ExprKind::Error, self.range_from(start))
            }
            kind => {
                self.error(format!("expected expression, found {:?}", kind));
                if !matches!(
                    kind,
                    SyntaxKind::R_PAREN
                        | SyntaxKind::R_BRACE
                        | SyntaxKind::R_BRACKET
                        | SyntaxKind::SEMICOLON
                        | SyntaxKind::COMMA
                        | SyntaxKind::EOF
                ) {
                    self.bump();
                }
                Expr::new(ExprKind::Error, range)
            }
        }
    }

    fn parse_new(&mut self) -> Expr {
        let start = self.start();
        self.bump(); // new
        while self.at_annotation() {
            self.parse_annotation();
        }
        let Some(mut ty) = self.parse_type() else {
            self.error("expected type after 'new'");
            return Expr::new(ExprKind::Error, self.range_from(start));
        };

        if self.at(SyntaxKind::L_BRACKET) || ty.dims > 0 {
            let mut dims = Vec::new();
            while self.eat(SyntaxKind::L_BRACKET) {
                if self.eat(SyntaxKind::R_BRACKET) {
                    ty.dims += 1;
                    continue;
                }
                dims.push(self.parse_expr());
                self.expect(SyntaxKind::R_BRACKET);
                ty.dims += 1;
            }
            let init = if self.at(SyntaxKind::L_BRACE) {
                Some(Box::new(self.parse_array_init()))
            } else {
                None
            };
            return Expr::new(ExprKind::NewArray { ty, dims, init }, self.range_from(start));
        }

        let args = self.parse_args();
        if self.at(SyntaxKind::L_BRACE) {
            // anonymous class body
            self.skip_balanced(SyntaxKind::L_BRACE, SyntaxKind::R_BRACE);
        }
        Expr::new(ExprKind::New { ty, args }, self.range_from(start))
    }

    fn parse_array_init(&mut self) -> Expr {
        let start = self.start();
        let mut elements = Vec::new();
        self.expect(SyntaxKind::L_BRACE);
        while !self.at(SyntaxKind::R_BRACE) && !self.at(SyntaxKind::EOF) {
            let before = self.pos;
            elements.push(self.parse_var_init());
            if self.pos == before {
                break;
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        Expr::new(ExprKind::ArrayInit(elements), self.range_from(start))
    }
}
