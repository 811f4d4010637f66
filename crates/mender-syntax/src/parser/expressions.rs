//! Expressions, by precedence climbing.

use rowan::Checkpoint;

use super::ParseState;
use super::statements::can_start_expression;
use crate::kind::SyntaxKind as K;

impl ParseState<'_> {
    pub(super) fn expression(&mut self) {
        let checkpoint = self.checkpoint();
        if !self.enter() {
            self.skip_expression(checkpoint);
            return;
        }
        self.binary(0);
        if self.current().is_assignment_operator() {
            self.start_at(checkpoint, K::AssignmentExpression);
            self.bump();
            self.expression();
            self.finish_node();
        }
        self.leave();
    }

    fn binary(&mut self, min_precedence: u8) {
        let checkpoint = self.checkpoint();
        self.unary();
        let mut wraps = 0;
        loop {
            let precedence = self.current().binary_precedence();
            if precedence == 0 || precedence <= min_precedence {
                return;
            }
            if self.nesting_exhausted(wraps) {
                self.skip_expression(checkpoint);
                return;
            }
            self.start_at(checkpoint, K::BinaryExpression);
            self.bump();
            self.binary(precedence);
            self.finish_node();
            wraps += 1;
        }
    }

    fn unary(&mut self) {
        let checkpoint = self.checkpoint();
        if self.current().is_prefix_operator() {
            if !self.enter() {
                self.skip_expression(checkpoint);
                return;
            }
            self.start(K::PrefixUnaryExpression);
            self.bump();
            self.unary();
            self.finish_node();
            self.leave();
            return;
        }
        self.primary();
        self.postfix(checkpoint);
    }

    fn postfix(&mut self, checkpoint: Checkpoint) {
        let mut wraps = 0;
        loop {
            let kind = match self.current() {
                K::DotToken => K::MemberAccessExpression,
                K::OpenParenToken => K::InvocationExpression,
                K::OpenBracketToken => K::ElementAccessExpression,
                kind if kind.is_postfix_operator() => K::PostfixUnaryExpression,
                _ => return,
            };
            if self.nesting_exhausted(wraps) {
                self.skip_expression(checkpoint);
                return;
            }
            self.start_at(checkpoint, kind);
            match kind {
                K::MemberAccessExpression => {
                    self.bump();
                    self.identifier_name();
                }
                K::InvocationExpression => self.argument_list(K::ArgumentList),
                K::ElementAccessExpression => self.argument_list(K::BracketedArgumentList),
                _ => self.bump(),
            }
            self.finish_node();
            wraps += 1;
        }
    }

    fn primary(&mut self) {
        let current = self.current();
        if current.is_literal_token() {
            self.start(K::LiteralExpression);
            self.bump();
            self.finish_node();
            return;
        }
        if current.is_predefined_type_keyword() {
            self.start(K::PredefinedType);
            self.bump();
            self.finish_node();
            return;
        }
        match current {
            K::IdentifierToken => self.identifier_name(),
            K::ThisKeyword => {
                self.start(K::ThisExpression);
                self.bump();
                self.finish_node();
            }
            K::BaseKeyword => {
                self.start(K::BaseExpression);
                self.bump();
                self.finish_node();
            }
            K::OpenParenToken => {
                self.start(K::ParenthesizedExpression);
                self.bump();
                self.expression();
                self.expect(K::CloseParenToken);
                self.finish_node();
            }
            K::NewKeyword => {
                self.start(K::ObjectCreationExpression);
                self.bump();
                self.parse_type();
                if self.at(K::OpenParenToken) {
                    self.argument_list(K::ArgumentList);
                }
                self.finish_node();
            }
            K::DelegateKeyword => self.anonymous_method(),
            _ => self.missing_name(),
        }
    }

    /// `delegate (T a) { ... }`; the parameter list is optional.
    fn anonymous_method(&mut self) {
        self.start(K::AnonymousMethodExpression);
        self.bump();
        if self.at(K::OpenParenToken) {
            self.parameter_list(K::ParameterList);
        }
        self.block();
        self.finish_node();
    }

    fn argument_list(&mut self, kind: K) {
        let (open, close) = if kind == K::BracketedArgumentList {
            (K::OpenBracketToken, K::CloseBracketToken)
        } else {
            (K::OpenParenToken, K::CloseParenToken)
        };
        self.start(kind);
        self.expect(open);
        if can_start_expression(self.current()) {
            self.argument();
            while self.at(K::CommaToken) {
                self.bump();
                self.argument();
            }
        }
        self.expect(close);
        self.finish_node();
    }

    fn argument(&mut self) {
        self.start(K::Argument);
        if self.at(K::IdentifierToken) && self.nth(1) == K::ColonToken {
            self.start(K::NameColon);
            self.identifier_name();
            self.bump();
            self.finish_node();
        }
        self.expression();
        self.finish_node();
    }
}
