//! Statements and blocks.

use super::ParseState;
use crate::kind::SyntaxKind as K;

impl ParseState<'_> {
    pub(super) fn block(&mut self) {
        self.start(K::Block);
        self.expect(K::OpenBraceToken);
        while !self.at(K::CloseBraceToken) && !self.at_eof() {
            self.statement();
        }
        self.expect(K::CloseBraceToken);
        self.finish_node();
    }

    /// Parses one statement. At `}` or end of file an empty statement with
    /// a missing `;` stands in for the absent one.
    pub(super) fn statement(&mut self) {
        match self.current() {
            K::SemicolonToken => {
                self.start(K::EmptyStatement);
                self.bump();
                self.finish_node();
                return;
            }
            K::CloseBraceToken | K::EndOfFileToken => {
                self.start(K::EmptyStatement);
                self.missing(K::SemicolonToken);
                self.finish_node();
                return;
            }
            _ => {}
        }
        if !self.enter() {
            self.skip_construct();
            return;
        }
        match self.current() {
            K::OpenBraceToken => self.block(),
            K::ForKeyword => self.for_statement(),
            K::WhileKeyword => self.while_statement(),
            K::IfKeyword => self.if_statement(),
            K::ReturnKeyword => self.return_statement(),
            _ if self.at_local_declaration() => {
                self.start(K::LocalDeclarationStatement);
                self.variable_declaration();
                self.expect(K::SemicolonToken);
                self.finish_node();
            }
            kind if can_start_expression(kind) => {
                self.start(K::ExpressionStatement);
                self.expression();
                self.expect(K::SemicolonToken);
                self.finish_node();
            }
            _ => {
                let checkpoint = self.checkpoint();
                self.error_at(checkpoint);
            }
        }
        self.leave();
    }

    /// A type followed by an identifier: `int x`, `A.B x`.
    fn at_local_declaration(&self) -> bool {
        let current = self.current();
        if current.is_predefined_type_keyword() {
            return self.nth(1) == K::IdentifierToken;
        }
        if current != K::IdentifierToken {
            return false;
        }
        let mut n = 1;
        while self.nth(n) == K::DotToken && self.nth(n + 1) == K::IdentifierToken {
            n += 2;
        }
        self.nth(n) == K::IdentifierToken
    }

    fn variable_declaration(&mut self) {
        self.start(K::VariableDeclaration);
        self.parse_type();
        self.expect(K::IdentifierToken);
        if self.at(K::EqualsToken) {
            self.equals_value_clause();
        }
        self.finish_node();
    }

    fn for_statement(&mut self) {
        self.start(K::ForStatement);
        self.bump();
        self.expect(K::OpenParenToken);
        if self.at_local_declaration() {
            self.variable_declaration();
        } else if can_start_expression(self.current()) {
            self.expression_list();
        }
        self.expect(K::SemicolonToken);
        if can_start_expression(self.current()) {
            self.expression();
        }
        self.expect(K::SemicolonToken);
        if can_start_expression(self.current()) {
            self.expression_list();
        }
        self.expect(K::CloseParenToken);
        self.statement();
        self.finish_node();
    }

    fn expression_list(&mut self) {
        self.expression();
        while self.at(K::CommaToken) {
            self.bump();
            self.expression();
        }
    }

    fn while_statement(&mut self) {
        self.start(K::WhileStatement);
        self.bump();
        self.expect(K::OpenParenToken);
        self.expression();
        self.expect(K::CloseParenToken);
        self.statement();
        self.finish_node();
    }

    fn if_statement(&mut self) {
        self.start(K::IfStatement);
        self.bump();
        self.expect(K::OpenParenToken);
        self.expression();
        self.expect(K::CloseParenToken);
        self.statement();
        if self.at(K::ElseKeyword) {
            self.start(K::ElseClause);
            self.bump();
            self.statement();
            self.finish_node();
        }
        self.finish_node();
    }

    fn return_statement(&mut self) {
        self.start(K::ReturnStatement);
        self.bump();
        if can_start_expression(self.current()) {
            self.expression();
        }
        self.expect(K::SemicolonToken);
        self.finish_node();
    }
}

/// Returns whether a token of `kind` can begin an expression.
pub(super) fn can_start_expression(kind: K) -> bool {
    kind.is_literal_token()
        || kind.is_prefix_operator()
        || kind.is_predefined_type_keyword()
        || matches!(
            kind,
            K::IdentifierToken
                | K::ThisKeyword
                | K::BaseKeyword
                | K::NewKeyword
                | K::DelegateKeyword
                | K::OpenParenToken
        )
}
