//! Built-in rules.
//!
//! | Id | Mode | Matches |
//! |----|------|---------|
//! | `explicit-to-implicit-interface-impl` | refactoring | explicit interface members |
//! | `redundant-true-loop-condition` | analyzer | `for (...; true; ...)` |
//! | `mistaken-type-introspection-call` | analyzer | `GetType()` called on a `System.Type` value |
//! | `optional-parameter-mismatch` | analyzer | overrides whose defaults differ from the base |
//! | `add-argument-name` | refactoring | positional arguments |
//! | `base-call-with-implicit-defaults` | analyzer | `base` calls that lean on defaults |
//! | `initialize-auto-property-from-parameter` | refactoring | constructor parameters |
//! | `method-group-to-anonymous-method` | refactoring | method groups converted to delegates |

mod add_argument_name;
mod auto_property;
mod base_call_defaults;
mod explicit_to_implicit;
mod method_group_to_anonymous_method;
mod mistaken_get_type;
mod optional_parameter;
mod redundant_true_condition;

use mender_syntax::{GreenNode, Role, SyntaxError, SyntaxKind, SyntaxNode};

pub use add_argument_name::AddArgumentName;
pub use auto_property::InitializeAutoPropertyFromParameter;
pub use base_call_defaults::BaseCallWithImplicitDefaults;
pub use explicit_to_implicit::ExplicitToImplicitInterfaceImpl;
pub use method_group_to_anonymous_method::MethodGroupToAnonymousMethod;
pub use mistaken_get_type::MistakenTypeIntrospectionCall;
pub use optional_parameter::OptionalParameterMismatch;
pub use redundant_true_condition::RedundantTrueLoopCondition;

use crate::error::RegistryError;
use crate::registry::RuleRegistryBuilder;

/// Registers every built-in rule, in report order.
///
/// # Errors
///
/// Returns [`RegistryError::DuplicateRule`] if `builder` already holds a
/// rule with a built-in id.
pub fn register_builtin(builder: RuleRegistryBuilder) -> Result<RuleRegistryBuilder, RegistryError> {
    builder
        .register(ExplicitToImplicitInterfaceImpl)?
        .register(RedundantTrueLoopCondition)?
        .register(MistakenTypeIntrospectionCall)?
        .register(OptionalParameterMismatch)?
        .register(AddArgumentName)?
        .register(BaseCallWithImplicitDefaults)?
        .register(InitializeAutoPropertyFromParameter)?
        .register(MethodGroupToAnonymousMethod)
}

/// Returns the argument nodes of an argument list, or of the list owned by
/// an invocation, element access or object creation.
fn arguments(node: &SyntaxNode) -> Vec<SyntaxNode> {
    let list = match node.kind() {
        SyntaxKind::ArgumentList | SyntaxKind::BracketedArgumentList => Some(node.clone()),
        _ => node.node_by_role(Role::ArgumentList),
    };
    list.map(|owned| owned.nodes_by_role(Role::Argument))
        .unwrap_or_default()
}

/// Returns the index of the first child of `node` playing `role`.
fn role_index(node: &GreenNode, role: Role) -> Result<usize, SyntaxError> {
    node.roles()
        .iter()
        .position(|candidate| *candidate == role)
        .ok_or_else(|| SyntaxError::malformed(node.kind(), format!("no {role} child")))
}
