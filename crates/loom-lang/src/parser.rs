//! Recursive-descent statement parser plus a precedence-climbing expression
//! parser (spec.md §4.2). One token of lookahead (`peek`) and, for `is not`
//! / `not in`, a second (`peek_at(1)`).

use std::rc::Rc;

use crate::ast::{
    Alias, BinOpKind, BoolOpKind, CompareOp, Expr, FunctionDef, ImportFromNames, Literal, Module, Stmt, UnaryOpKind,
};
use crate::error::{locate, ParseError, ParseErrorKind};
use crate::literal::decode_string_token;
use crate::token::{Token, TokenKind};

const KEYWORDS: &[&str] = &[
    "def", "if", "elif", "else", "while", "for", "in", "return", "pass", "break", "continue", "import", "from",
    "as", "and", "or", "not", "is", "True", "False", "None",
];

/// Parses a full token stream into a [`Module`].
pub fn parse(source: &str, tokens: Vec<Token>) -> Result<Module, ParseError> {
    Parser { source, tokens, index: 0 }.parse_module()
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    index: usize,
}

impl<'a> Parser<'a> {
    fn is_at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.index + offset)
    }

    fn advance(&mut self) -> &Token {
        let token = &self.tokens[self.index];
        self.index += 1;
        token
    }

    fn current_offset(&self) -> usize {
        match self.peek() {
            Some(token) => token.start,
            None => self.tokens.last().map_or(0, |t| t.end + 1),
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError { kind, location: locate(self.source, self.current_offset()) }
    }

    fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn check_op(&self, op: &str) -> bool {
        self.peek().is_some_and(|t| t.is_op(op))
    }

    fn check_name(&self, name: &str) -> bool {
        self.peek().is_some_and(|t| t.is_name(name))
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check_kind(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, op: &str) -> bool {
        if self.check_op(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_name(&mut self, name: &str) -> bool {
        if self.check_name(name) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_op(&mut self, op: &str) -> Result<(), ParseError> {
        if self.match_op(op) {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::Expected(format!("'{op}'"))))
        }
    }

    fn expect_name(&mut self, name: &str) -> Result<(), ParseError> {
        if self.match_name(name) {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::Expected(format!("'{name}'"))))
        }
    }

    fn expect_name_token(&mut self) -> Result<String, ParseError> {
        if self.check_kind(TokenKind::Name) {
            Ok(self.advance().lexeme.clone())
        } else {
            Err(self.error(ParseErrorKind::Expected("a name".to_owned())))
        }
    }

    fn expect_statement_end(&mut self) -> Result<(), ParseError> {
        if self.match_kind(TokenKind::Newline) || self.is_at_end() {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::Expected("NEWLINE".to_owned())))
        }
    }

    fn skip_newlines(&mut self) {
        while self.match_kind(TokenKind::Newline) {}
    }

    // ---- statements ----------------------------------------------------

    fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut body = Vec::new();
        self.skip_newlines();
        while !self.is_at_end() {
            body.push(self.parse_statement()?);
            self.skip_newlines();
        }
        Ok(Module { body })
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.check_op("@") {
            let decorators = self.parse_decorators()?;
            return self.parse_function_def(decorators);
        }
        if self.check_name("def") {
            return self.parse_function_def(Vec::new());
        }
        if self.check_name("if") {
            return self.parse_if();
        }
        if self.check_name("while") {
            return self.parse_while();
        }
        if self.check_name("for") {
            return self.parse_for();
        }
        self.parse_single_line_statement()
    }

    fn parse_decorators(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut decorators = Vec::new();
        while self.match_op("@") {
            decorators.push(self.parse_expression()?);
            self.expect_statement_end()?;
            self.skip_newlines();
        }
        if !self.check_name("def") {
            return Err(self.error(ParseErrorKind::Expected("'def' after decorator".to_owned())));
        }
        Ok(decorators)
    }

    fn parse_function_def(&mut self, decorators: Vec<Expr>) -> Result<Stmt, ParseError> {
        self.expect_name("def")?;
        let name = self.expect_name_token()?;
        self.expect_op("(")?;
        let params = self.parse_params()?;
        self.expect_op(")")?;
        self.expect_op(":")?;
        let body = self.parse_block()?;
        Ok(Stmt::FunctionDef(Rc::new(FunctionDef { name, params, body, decorators })))
    }

    fn parse_params(&mut self) -> Result<Vec<String>, ParseError> {
        let mut params = Vec::new();
        if self.check_op(")") {
            return Ok(params);
        }
        loop {
            params.push(self.expect_name_token()?);
            if !self.match_op(",") {
                break;
            }
            if self.check_op(")") {
                break;
            }
        }
        Ok(params)
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.expect_name("if")?;
        let condition = self.parse_expression()?;
        self.expect_op(":")?;
        let body = self.parse_block()?;
        let orelse = self.parse_elif_or_else()?;
        Ok(Stmt::If { condition, body, orelse })
    }

    fn parse_elif_or_else(&mut self) -> Result<Vec<Stmt>, ParseError> {
        if self.match_name("elif") {
            let condition = self.parse_expression()?;
            self.expect_op(":")?;
            let body = self.parse_block()?;
            let orelse = self.parse_elif_or_else()?;
            Ok(vec![Stmt::If { condition, body, orelse }])
        } else if self.match_name("else") {
            self.expect_op(":")?;
            self.parse_block()
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.expect_name("while")?;
        let condition = self.parse_expression()?;
        self.expect_op(":")?;
        let body = self.parse_block()?;
        let orelse = if self.match_name("else") {
            self.expect_op(":")?;
            self.parse_block()?
        } else {
            Vec::new()
        };
        Ok(Stmt::While { condition, body, orelse })
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        self.expect_name("for")?;
        let targets = self.parse_target_list()?;
        for target in &targets {
            self.validate_target(target)?;
        }
        self.expect_name("in")?;
        let iterables = self.parse_expr_list()?;
        self.expect_op(":")?;
        let body = self.parse_block()?;
        let orelse = if self.match_name("else") {
            self.expect_op(":")?;
            self.parse_block()?
        } else {
            Vec::new()
        };
        Ok(Stmt::For { targets, iterables, body, orelse })
    }

    fn parse_target_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut targets = vec![self.parse_primary()?];
        while self.match_op(",") {
            if self.check_name("in") {
                break;
            }
            targets.push(self.parse_primary()?);
        }
        Ok(targets)
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        if self.match_kind(TokenKind::Newline) {
            if !self.match_kind(TokenKind::Indent) {
                // An empty block body with nothing indented under it is a
                // syntax error: the caller always requires at least `pass`.
                return Err(self.error(ParseErrorKind::Expected("an indented block".to_owned())));
            }
            let mut stmts = Vec::new();
            self.skip_newlines();
            while !self.check_kind(TokenKind::Dedent) && !self.is_at_end() {
                stmts.push(self.parse_statement()?);
                self.skip_newlines();
            }
            self.match_kind(TokenKind::Dedent);
            Ok(stmts)
        } else {
            Ok(vec![self.parse_single_line_statement()?])
        }
    }

    fn parse_single_line_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.match_name("pass") {
            self.expect_statement_end()?;
            return Ok(Stmt::Pass);
        }
        if self.match_name("break") {
            self.expect_statement_end()?;
            return Ok(Stmt::Break);
        }
        if self.match_name("continue") {
            self.expect_statement_end()?;
            return Ok(Stmt::Continue);
        }
        if self.match_name("return") {
            let value = if self.check_kind(TokenKind::Newline) || self.is_at_end() {
                None
            } else {
                Some(promote(self.parse_expr_list()?))
            };
            self.expect_statement_end()?;
            return Ok(Stmt::Return(value));
        }
        if self.check_name("import") {
            return self.parse_import();
        }
        if self.check_name("from") {
            return self.parse_import_from();
        }
        self.parse_assign_or_exprstmt()
    }

    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_name_token()?;
        while self.match_op(".") {
            name.push('.');
            name.push_str(&self.expect_name_token()?);
        }
        Ok(name)
    }

    fn parse_import(&mut self) -> Result<Stmt, ParseError> {
        self.expect_name("import")?;
        let mut names = Vec::new();
        loop {
            let name = self.parse_dotted_name()?;
            let asname = if self.match_name("as") { Some(self.expect_name_token()?) } else { None };
            names.push(Alias { name, asname });
            if !self.match_op(",") {
                break;
            }
        }
        self.expect_statement_end()?;
        Ok(Stmt::Import(names))
    }

    fn parse_import_from(&mut self) -> Result<Stmt, ParseError> {
        self.expect_name("from")?;
        let module = self.parse_dotted_name()?;
        self.expect_name("import")?;
        let names = if self.match_op("*") {
            ImportFromNames::Star
        } else {
            let mut aliases = Vec::new();
            loop {
                let name = self.expect_name_token()?;
                let asname = if self.match_name("as") { Some(self.expect_name_token()?) } else { None };
                aliases.push(Alias { name, asname });
                if !self.match_op(",") {
                    break;
                }
            }
            ImportFromNames::Named(aliases)
        };
        self.expect_statement_end()?;
        Ok(Stmt::ImportFrom { module, names })
    }

    fn parse_assign_or_exprstmt(&mut self) -> Result<Stmt, ParseError> {
        let mut groups = vec![self.parse_expr_list()?];

        if let Some(op) = self.match_aug_assign_op() {
            if groups[0].len() != 1 {
                return Err(self.error(ParseErrorKind::InvalidAssignTarget("expression list".to_owned())));
            }
            let target = groups.remove(0).remove(0);
            self.validate_target(&target)?;
            let value = promote(self.parse_expr_list()?);
            self.expect_statement_end()?;
            return Ok(Stmt::AugAssign { target, op, value });
        }

        loop {
            if self.match_op("=") {
                groups.push(self.parse_expr_list()?);
            } else {
                break;
            }
        }

        if groups.len() == 1 {
            self.expect_statement_end()?;
            return Ok(Stmt::ExprStmt(promote(groups.remove(0))));
        }

        let value = promote(groups.pop().expect("at least two groups when chained"));
        let mut targets = Vec::with_capacity(groups.len());
        for group in groups {
            let target = promote(group);
            self.validate_target(&target)?;
            targets.push(target);
        }
        self.expect_statement_end()?;
        Ok(Stmt::Assign { targets, value })
    }

    fn match_aug_assign_op(&mut self) -> Option<BinOpKind> {
        const OPS: &[(&str, BinOpKind)] = &[
            ("+=", BinOpKind::Add),
            ("-=", BinOpKind::Sub),
            ("*=", BinOpKind::Mul),
            ("/=", BinOpKind::Div),
            ("//=", BinOpKind::FloorDiv),
            ("%=", BinOpKind::Mod),
            ("@=", BinOpKind::MatMul),
            ("**=", BinOpKind::Pow),
        ];
        for (lexeme, op) in OPS {
            if self.check_op(lexeme) {
                self.advance();
                return Some(*op);
            }
        }
        None
    }

    fn validate_target(&self, expr: &Expr) -> Result<(), ParseError> {
        match expr {
            Expr::Name(_) | Expr::Subscript(_, _) => Ok(()),
            other => Err(self.error(ParseErrorKind::InvalidAssignTarget(expr_node_name(other).to_owned()))),
        }
    }

    /// A comma-separated list of expressions, tolerating one optional
    /// trailing comma before whatever ends the list (NEWLINE/EOF, `:`, `=`,
    /// or the `in` keyword in a `for` header).
    fn parse_expr_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![self.parse_expression()?];
        while self.match_op(",") {
            if self.at_list_terminator() {
                break;
            }
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }

    fn at_list_terminator(&self) -> bool {
        self.is_at_end()
            || self.check_kind(TokenKind::Newline)
            || self.check_op(":")
            || self.check_op("=")
            || self.check_op(")")
            || self.check_op("]")
            || self.check_op("}")
            || self.check_name("in")
    }

    // ---- expressions -----------------------------------------------------

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.match_name("or") {
            let right = self.parse_and()?;
            left = Expr::BoolOp(Box::new(left), BoolOpKind::Or, Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;
        while self.match_name("and") {
            let right = self.parse_not()?;
            left = Expr::BoolOp(Box::new(left), BoolOpKind::And, Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.match_name("not") {
            let operand = self.parse_not()?;
            return Ok(Expr::UnaryOp(UnaryOpKind::Not, Box::new(operand)));
        }
        self.parse_compare()
    }

    /// Deliberately not chained (`a < b < c` is a parse error, not
    /// `a < b and b < c`): at most one comparison operator per expression.
    fn parse_compare(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_additive()?;
        let Some(op) = self.match_compare_op() else {
            return Ok(left);
        };
        let right = self.parse_additive()?;
        let expr = Expr::Compare(Box::new(left), op, Box::new(right));
        if self.match_compare_op().is_some() {
            return Err(self.error(ParseErrorKind::Unimplemented("chained comparisons".to_owned())));
        }
        Ok(expr)
    }

    fn match_compare_op(&mut self) -> Option<CompareOp> {
        if self.match_op("<") {
            return Some(CompareOp::Lt);
        }
        if self.match_op(">") {
            return Some(CompareOp::Gt);
        }
        if self.match_op("<=") {
            return Some(CompareOp::Le);
        }
        if self.match_op(">=") {
            return Some(CompareOp::Ge);
        }
        if self.match_op("==") {
            return Some(CompareOp::Eq);
        }
        if self.match_op("!=") {
            return Some(CompareOp::NotEq);
        }
        if self.check_name("not") && self.peek_at(1).is_some_and(|t| t.is_name("in")) {
            self.advance();
            self.advance();
            return Some(CompareOp::NotIn);
        }
        if self.match_name("in") {
            return Some(CompareOp::In);
        }
        if self.check_name("is") {
            self.advance();
            if self.match_name("not") {
                return Some(CompareOp::IsNot);
            }
            return Some(CompareOp::Is);
        }
        None
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = if self.match_op("+") {
                BinOpKind::Add
            } else if self.match_op("-") {
                BinOpKind::Sub
            } else {
                break;
            };
            let right = self.parse_multiplicative()?;
            left = Expr::BinOp(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.match_op("*") {
                BinOpKind::Mul
            } else if self.match_op("//") {
                BinOpKind::FloorDiv
            } else if self.match_op("/") {
                BinOpKind::Div
            } else if self.match_op("%") {
                BinOpKind::Mod
            } else if self.match_op("@") {
                BinOpKind::MatMul
            } else {
                break;
            };
            let right = self.parse_unary()?;
            left = Expr::BinOp(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_op("+") {
            return Ok(Expr::UnaryOp(UnaryOpKind::Plus, Box::new(self.parse_unary()?)));
        }
        if self.match_op("-") {
            return Ok(Expr::UnaryOp(UnaryOpKind::Minus, Box::new(self.parse_unary()?)));
        }
        if self.match_op("~") {
            return Ok(Expr::UnaryOp(UnaryOpKind::Invert, Box::new(self.parse_unary()?)));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_primary()?;
        if self.match_op("**") {
            let exponent = self.parse_unary()?;
            return Ok(Expr::BinOp(Box::new(base), BinOpKind::Pow, Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_atom()?;
        loop {
            if self.match_op(".") {
                let attr = self.expect_name_token()?;
                expr = Expr::Attribute(Box::new(expr), attr);
            } else if self.match_op("[") {
                let key = self.parse_subscript_key()?;
                self.expect_op("]")?;
                expr = Expr::Subscript(Box::new(expr), Box::new(key));
            } else if self.match_op("(") {
                let args = self.parse_arguments()?;
                self.expect_op(")")?;
                expr = Expr::Call(Box::new(expr), args);
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_subscript_key(&mut self) -> Result<Expr, ParseError> {
        let start = if self.check_op(":") { None } else { Some(self.parse_expression()?) };
        if self.match_op(":") {
            let end = if self.check_op("]") { None } else { Some(self.parse_expression()?) };
            let start = start.unwrap_or(Expr::Constant(Literal::None));
            let end = end.unwrap_or(Expr::Constant(Literal::None));
            Ok(Expr::Slice(Box::new(start), Box::new(end)))
        } else {
            start.ok_or_else(|| self.error(ParseErrorKind::Expected("a subscript expression".to_owned())))
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.check_op(")") {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.match_op(",") {
                break;
            }
            if self.check_op(")") {
                break;
            }
        }
        Ok(args)
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        if self.is_at_end() {
            return Err(self.error(ParseErrorKind::Expected("an expression".to_owned())));
        }

        if self.check_op("(") {
            return self.parse_paren_expr();
        }
        if self.check_op("[") {
            return self.parse_list_literal();
        }
        if self.check_op("{") {
            return self.parse_dict_literal();
        }

        let token = self.peek().expect("checked is_at_end above").clone();
        match token.kind {
            TokenKind::Name => self.parse_name_literal(&token),
            TokenKind::Number => {
                self.advance();
                Ok(Expr::Constant(parse_number(&token.lexeme)))
            }
            TokenKind::String => {
                self.advance();
                let literal =
                    decode_string_token(&token.lexeme).map_err(|kind| ParseError { kind, location: locate(self.source, token.start) })?;
                Ok(Expr::Constant(literal))
            }
            _ => Err(self.error(ParseErrorKind::Expected("an expression".to_owned()))),
        }
    }

    fn parse_name_literal(&mut self, token: &Token) -> Result<Expr, ParseError> {
        match token.lexeme.as_str() {
            "True" => {
                self.advance();
                Ok(Expr::Constant(Literal::Bool(true)))
            }
            "False" => {
                self.advance();
                Ok(Expr::Constant(Literal::Bool(false)))
            }
            "None" => {
                self.advance();
                Ok(Expr::Constant(Literal::None))
            }
            word if KEYWORDS.contains(&word) => Err(self.error(ParseErrorKind::UnexpectedKeyword(word.to_owned()))),
            word => {
                let name = word.to_owned();
                self.advance();
                Ok(Expr::Name(name))
            }
        }
    }

    fn parse_paren_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect_op("(")?;
        if self.match_op(")") {
            return Ok(Expr::Tuple(Vec::new()));
        }
        let items = self.parse_expr_list()?;
        self.expect_op(")")?;
        Ok(if items.len() > 1 { Expr::Tuple(items) } else { items.into_iter().next().expect("checked non-empty") })
    }

    fn parse_list_literal(&mut self) -> Result<Expr, ParseError> {
        self.expect_op("[")?;
        if self.match_op("]") {
            return Ok(Expr::List(Vec::new()));
        }
        let items = self.parse_expr_list()?;
        self.expect_op("]")?;
        Ok(Expr::List(items))
    }

    fn parse_dict_literal(&mut self) -> Result<Expr, ParseError> {
        self.expect_op("{")?;
        let mut keys = Vec::new();
        let mut values = Vec::new();
        if !self.check_op("}") {
            loop {
                keys.push(self.parse_expression()?);
                self.expect_op(":")?;
                values.push(self.parse_expression()?);
                if !self.match_op(",") {
                    break;
                }
                if self.check_op("}") {
                    break;
                }
            }
        }
        self.expect_op("}")?;
        Ok(Expr::Dict(keys, values))
    }
}

fn promote(mut exprs: Vec<Expr>) -> Expr {
    if exprs.len() == 1 {
        exprs.remove(0)
    } else {
        Expr::Tuple(exprs)
    }
}

fn parse_number(lexeme: &str) -> Literal {
    if lexeme.contains('.') || lexeme.contains('e') || lexeme.contains('E') {
        Literal::Float(lexeme.parse().unwrap_or(f64::NAN))
    } else {
        match lexeme.parse::<i64>() {
            Ok(value) => Literal::Int(value),
            // Overflows i64: still a well-formed integer, not a float (spec.md
            // §3 allows arbitrary-range Int; see SPEC_FULL.md §11).
            Err(_) => match lexeme.parse::<num_bigint::BigInt>() {
                Ok(big) => Literal::BigInt(big),
                Err(_) => Literal::Float(lexeme.parse().unwrap_or(f64::NAN)),
            },
        }
    }
}

fn expr_node_name(expr: &Expr) -> &'static str {
    match expr {
        Expr::Constant(_) => "Constant",
        Expr::Name(_) => "Name",
        Expr::List(_) => "List",
        Expr::Tuple(_) => "Tuple",
        Expr::Dict(_, _) => "Dict",
        Expr::Attribute(_, _) => "Attribute",
        Expr::Subscript(_, _) => "Subscript",
        Expr::Slice(_, _) => "Slice",
        Expr::Call(_, _) => "Call",
        Expr::BinOp(_, _, _) => "BinOp",
        Expr::BoolOp(_, _, _) => "BoolOp",
        Expr::UnaryOp(_, _) => "UnaryOp",
        Expr::Compare(_, _, _) => "Compare",
    }
}
