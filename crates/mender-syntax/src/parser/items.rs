//! Type and member declarations.

use rowan::Checkpoint;

use super::{MAX_NESTING, ParseState};
use crate::kind::SyntaxKind as K;

impl ParseState<'_> {
    /// Parses one member of a type or compilation unit. Always consumes at
    /// least one token unless at end of file.
    pub(super) fn member(&mut self) {
        if !self.enter() {
            self.skip_construct();
            return;
        }
        let checkpoint = self.checkpoint();
        let has_modifiers = self.current().is_modifier();
        self.modifiers();

        match self.current() {
            K::ClassKeyword => self.type_declaration(checkpoint, K::ClassDeclaration),
            K::InterfaceKeyword => self.type_declaration(checkpoint, K::InterfaceDeclaration),
            K::StructKeyword => self.type_declaration(checkpoint, K::StructDeclaration),
            K::EventKeyword => self.event_declaration(checkpoint),
            K::IdentifierToken if self.nth(1) == K::OpenParenToken => {
                self.constructor_declaration(checkpoint);
            }
            kind if kind == K::IdentifierToken || kind.is_predefined_type_keyword() => {
                self.typed_member(checkpoint);
            }
            K::CloseBraceToken | K::EndOfFileToken if has_modifiers => {
                self.start_at(checkpoint, K::Error);
                self.finish_node();
            }
            _ => self.error_at(checkpoint),
        }
        self.leave();
    }

    fn type_declaration(&mut self, checkpoint: Checkpoint, kind: K) {
        self.start_at(checkpoint, kind);
        self.bump();
        self.expect(K::IdentifierToken);
        if self.at(K::ColonToken) {
            self.base_list();
        }
        self.expect(K::OpenBraceToken);
        while !self.at(K::CloseBraceToken) && !self.at_eof() {
            self.member();
        }
        self.expect(K::CloseBraceToken);
        self.finish_node();
    }

    fn base_list(&mut self) {
        self.start(K::BaseList);
        self.bump();
        self.parse_type();
        while self.at(K::CommaToken) {
            self.bump();
            self.parse_type();
        }
        self.finish_node();
    }

    fn constructor_declaration(&mut self, checkpoint: Checkpoint) {
        self.start_at(checkpoint, K::ConstructorDeclaration);
        self.bump();
        self.parameter_list(K::ParameterList);
        self.body_or_semicolon();
        self.finish_node();
    }

    fn event_declaration(&mut self, checkpoint: Checkpoint) {
        self.start_at(checkpoint, K::EventDeclaration);
        self.bump();
        self.parse_type();
        if self.at_explicit_interface() {
            self.explicit_interface_specifier();
        }
        self.expect(K::IdentifierToken);
        if self.at(K::OpenBraceToken) {
            self.accessor_list();
        } else {
            self.expect(K::SemicolonToken);
        }
        self.finish_node();
    }

    /// Methods, properties, indexers and fields all start with a type.
    fn typed_member(&mut self, checkpoint: Checkpoint) {
        let type_checkpoint = self.checkpoint();
        self.parse_type();
        let explicit = self.at_explicit_interface();
        if explicit {
            self.explicit_interface_specifier();
        }

        let is_field = !explicit
            && !self.at(K::ThisKeyword)
            && !matches!(self.nth(1), K::OpenParenToken | K::OpenBraceToken);
        if is_field {
            self.field_declaration(checkpoint, type_checkpoint);
            return;
        }

        if self.at(K::ThisKeyword) {
            self.start_at(checkpoint, K::IndexerDeclaration);
            self.bump();
            self.parameter_list(K::BracketedParameterList);
            self.accessor_list();
            self.finish_node();
            return;
        }

        self.expect(K::IdentifierToken);
        if self.at(K::OpenParenToken) {
            self.start_at(checkpoint, K::MethodDeclaration);
            self.parameter_list(K::ParameterList);
            self.body_or_semicolon();
            self.finish_node();
            return;
        }

        self.start_at(checkpoint, K::PropertyDeclaration);
        if self.at(K::OpenBraceToken) {
            self.accessor_list();
            if self.at(K::EqualsToken) {
                self.equals_value_clause();
                self.expect(K::SemicolonToken);
            }
        } else {
            self.missing_accessor_list();
        }
        self.finish_node();
    }

    fn field_declaration(&mut self, checkpoint: Checkpoint, type_checkpoint: Checkpoint) {
        self.start_at(type_checkpoint, K::VariableDeclaration);
        self.expect(K::IdentifierToken);
        if self.at(K::EqualsToken) {
            self.equals_value_clause();
        }
        self.finish_node();
        self.start_at(checkpoint, K::FieldDeclaration);
        self.expect(K::SemicolonToken);
        self.finish_node();
    }

    /// `I.M`, `N.I.M` or `I.this` ahead.
    fn at_explicit_interface(&self) -> bool {
        self.at(K::IdentifierToken)
            && self.nth(1) == K::DotToken
            && matches!(self.nth(2), K::IdentifierToken | K::ThisKeyword)
    }

    fn explicit_interface_specifier(&mut self) {
        let checkpoint = self.checkpoint();
        self.identifier_name();
        let mut wraps = 0;
        while wraps < MAX_NESTING
            && self.nth(1) == K::IdentifierToken
            && self.nth(2) == K::DotToken
            && matches!(self.nth(3), K::IdentifierToken | K::ThisKeyword)
        {
            self.start_at(checkpoint, K::QualifiedName);
            self.bump();
            self.identifier_name();
            self.finish_node();
            wraps += 1;
        }
        self.start_at(checkpoint, K::ExplicitInterfaceSpecifier);
        self.expect(K::DotToken);
        self.finish_node();
    }

    pub(super) fn parse_type(&mut self) {
        if self.current().is_predefined_type_keyword() {
            self.start(K::PredefinedType);
            self.bump();
            self.finish_node();
            return;
        }
        if !self.at(K::IdentifierToken) {
            self.missing_name();
            return;
        }
        let checkpoint = self.checkpoint();
        self.identifier_name();
        let mut wraps = 0;
        while wraps < MAX_NESTING && self.at(K::DotToken) && self.nth(1) == K::IdentifierToken {
            self.start_at(checkpoint, K::QualifiedName);
            self.bump();
            self.identifier_name();
            self.finish_node();
            wraps += 1;
        }
    }

    pub(super) fn parameter_list(&mut self, kind: K) {
        let (open, close) = if kind == K::BracketedParameterList {
            (K::OpenBracketToken, K::CloseBracketToken)
        } else {
            (K::OpenParenToken, K::CloseParenToken)
        };
        self.start(kind);
        self.expect(open);
        if !self.at(close) && !self.at_eof() {
            self.parameter();
            while self.at(K::CommaToken) {
                self.bump();
                self.parameter();
            }
        }
        self.expect(close);
        self.finish_node();
    }

    fn parameter(&mut self) {
        self.start(K::Parameter);
        while self.at(K::ParamsKeyword) {
            self.bump();
        }
        self.parse_type();
        self.expect(K::IdentifierToken);
        if self.at(K::EqualsToken) {
            self.equals_value_clause();
        }
        self.finish_node();
    }

    pub(super) fn equals_value_clause(&mut self) {
        self.start(K::EqualsValueClause);
        self.bump();
        self.expression();
        self.finish_node();
    }

    fn accessor_list(&mut self) {
        self.start(K::AccessorList);
        self.expect(K::OpenBraceToken);
        while !self.at(K::CloseBraceToken) && !self.at_eof() {
            self.accessor();
        }
        self.expect(K::CloseBraceToken);
        self.finish_node();
    }

    fn accessor(&mut self) {
        let checkpoint = self.checkpoint();
        let has_modifiers = self.current().is_modifier();
        self.modifiers();
        let Some(keyword) = self.at_contextual() else {
            if self.at(K::CloseBraceToken) && has_modifiers {
                self.start_at(checkpoint, K::Error);
                self.finish_node();
            } else {
                self.error_at(checkpoint);
            }
            return;
        };
        self.start_at(checkpoint, K::AccessorDeclaration);
        self.bump_as(keyword);
        self.body_or_semicolon();
        self.finish_node();
    }

    fn body_or_semicolon(&mut self) {
        if self.at(K::OpenBraceToken) {
            self.block();
        } else {
            self.expect(K::SemicolonToken);
        }
    }

    fn missing_accessor_list(&mut self) {
        self.start(K::AccessorList);
        self.missing(K::OpenBraceToken);
        self.missing(K::CloseBraceToken);
        self.finish_node();
    }
}
