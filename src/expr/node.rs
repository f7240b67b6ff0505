//! The expression node hierarchy
//!
//! A single sum type over the closed kind set. Nodes are immutable;
//! factories validate at construction and precompute whether a subtree
//! needs a resolution context. Rewrites always build fresh nodes.

use crate::error::{Error, Result};
use crate::expr::context::{Invocation, MethodLookup, MethodResolver, ReduceContext};
use crate::operators::{self, BinaryOp, UnaryOp};
use crate::types::{DataType, QueryPlan, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A possibly schema-qualified object name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub qualifier: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn bare(name: impl Into<String>) -> QualifiedName {
        QualifiedName {
            qualifier: None,
            name: name.into(),
        }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> QualifiedName {
        QualifiedName {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.qualifier.is_some()
    }

    pub fn qualify_with(&self, qualifier: &str) -> QualifiedName {
        QualifiedName {
            qualifier: Some(qualifier.to_string()),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{}.{}", q, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Discriminant of the closed expression set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    Constant,
    Binary,
    Unary,
    Cast,
    Condition,
    StringMatch,
    Reference,
    Variable,
    VariableAssign,
    ReferenceAssign,
    Function,
    Parameter,
    Group,
    Quantify,
    TabularQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(ConstantExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Cast(CastExpr),
    Condition(ConditionExpr),
    StringMatch(StringMatchExpr),
    Reference(ReferenceExpr),
    Variable(VariableExpr),
    VariableAssign(VariableAssignExpr),
    ReferenceAssign(ReferenceAssignExpr),
    Function(FunctionExpr),
    Parameter(ParameterExpr),
    Group(GroupExpr),
    Quantify(QuantifyExpr),
    TabularQuery(TabularQueryExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantExpr {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    is_reference: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expression>,
    is_reference: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub value: Box<Expression>,
    pub target: DataType,
    is_reference: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionExpr {
    pub test: Box<Expression>,
    pub if_true: Box<Expression>,
    pub if_false: Option<Box<Expression>>,
    is_reference: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringMatchExpr {
    pub negated: bool,
    pub left: Box<Expression>,
    pub pattern: Box<Expression>,
    pub escape: Option<Box<Expression>>,
    is_reference: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceExpr {
    pub name: QualifiedName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableAssignExpr {
    pub name: String,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceAssignExpr {
    pub name: QualifiedName,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub name: QualifiedName,
    pub args: Vec<FunctionArg>,
}

/// A named-or-positional function argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionArg {
    pub name: Option<String>,
    pub value: Expression,
}

impl FunctionArg {
    pub fn positional(value: Expression) -> FunctionArg {
        FunctionArg { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: Expression) -> FunctionArg {
        FunctionArg {
            name: Some(name.into()),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterExpr {
    pub ordinal: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupExpr {
    pub inner: Box<Expression>,
    is_reference: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    Any,
    All,
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Any => write!(f, "ANY"),
            Quantifier::All => write!(f, "ALL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantifyExpr {
    pub quantifier: Quantifier,
    pub op: BinaryOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    is_reference: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabularQueryExpr {
    pub plan: QueryPlan,
}

impl Expression {
    pub fn constant(value: Value) -> Expression {
        Expression::Constant(ConstantExpr { value })
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Expression {
        let is_reference = left.is_reference() || right.is_reference();
        Expression::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
            is_reference,
        })
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Expression {
        let is_reference = operand.is_reference();
        Expression::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            is_reference,
        })
    }

    pub fn cast(value: Expression, target: DataType) -> Expression {
        let is_reference = value.is_reference();
        Expression::Cast(CastExpr {
            value: Box::new(value),
            target,
            is_reference,
        })
    }

    pub fn condition(
        test: Expression,
        if_true: Expression,
        if_false: Option<Expression>,
    ) -> Expression {
        let is_reference = test.is_reference()
            || if_true.is_reference()
            || if_false.as_ref().is_some_and(|e| e.is_reference());
        Expression::Condition(ConditionExpr {
            test: Box::new(test),
            if_true: Box::new(if_true),
            if_false: if_false.map(Box::new),
            is_reference,
        })
    }

    pub fn string_match(
        negated: bool,
        left: Expression,
        pattern: Expression,
        escape: Option<Expression>,
    ) -> Expression {
        let is_reference = left.is_reference()
            || pattern.is_reference()
            || escape.as_ref().is_some_and(|e| e.is_reference());
        Expression::StringMatch(StringMatchExpr {
            negated,
            left: Box::new(left),
            pattern: Box::new(pattern),
            escape: escape.map(Box::new),
            is_reference,
        })
    }

    pub fn reference(name: QualifiedName) -> Expression {
        Expression::Reference(ReferenceExpr { name })
    }

    pub fn variable(name: impl Into<String>) -> Expression {
        Expression::Variable(VariableExpr { name: name.into() })
    }

    pub fn variable_assign(name: impl Into<String>, value: Expression) -> Expression {
        Expression::VariableAssign(VariableAssignExpr {
            name: name.into(),
            value: Box::new(value),
        })
    }

    pub fn reference_assign(name: QualifiedName, value: Expression) -> Expression {
        Expression::ReferenceAssign(ReferenceAssignExpr {
            name,
            value: Box::new(value),
        })
    }

    pub fn function(name: QualifiedName, args: Vec<FunctionArg>) -> Expression {
        Expression::Function(FunctionExpr { name, args })
    }

    pub fn parameter(ordinal: usize) -> Expression {
        Expression::Parameter(ParameterExpr { ordinal })
    }

    pub fn group(inner: Expression) -> Expression {
        let is_reference = inner.is_reference();
        Expression::Group(GroupExpr {
            inner: Box::new(inner),
            is_reference,
        })
    }

    /// A quantified comparison. Only comparison operators are valid.
    pub fn quantify(
        quantifier: Quantifier,
        op: BinaryOp,
        left: Expression,
        right: Expression,
    ) -> Result<Expression> {
        if !op.is_comparison() {
            return Err(Error::InvalidQuantifierOperator(op.symbol().to_string()));
        }
        let is_reference = left.is_reference() || right.is_reference();
        Ok(Expression::Quantify(QuantifyExpr {
            quantifier,
            op,
            left: Box::new(left),
            right: Box::new(right),
            is_reference,
        }))
    }

    pub fn tabular_query(plan: QueryPlan) -> Expression {
        Expression::TabularQuery(TabularQueryExpr { plan })
    }

    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Constant(_) => ExpressionKind::Constant,
            Expression::Binary(_) => ExpressionKind::Binary,
            Expression::Unary(_) => ExpressionKind::Unary,
            Expression::Cast(_) => ExpressionKind::Cast,
            Expression::Condition(_) => ExpressionKind::Condition,
            Expression::StringMatch(_) => ExpressionKind::StringMatch,
            Expression::Reference(_) => ExpressionKind::Reference,
            Expression::Variable(_) => ExpressionKind::Variable,
            Expression::VariableAssign(_) => ExpressionKind::VariableAssign,
            Expression::ReferenceAssign(_) => ExpressionKind::ReferenceAssign,
            Expression::Function(_) => ExpressionKind::Function,
            Expression::Parameter(_) => ExpressionKind::Parameter,
            Expression::Group(_) => ExpressionKind::Group,
            Expression::Quantify(_) => ExpressionKind::Quantify,
            Expression::TabularQuery(_) => ExpressionKind::TabularQuery,
        }
    }

    /// False only for the terminal kinds: constants and parameters.
    pub fn can_reduce(&self) -> bool {
        !matches!(self, Expression::Constant(_) | Expression::Parameter(_))
    }

    /// Whether this node or any descendant needs a resolution context.
    /// Precomputed at construction for composite nodes.
    pub fn is_reference(&self) -> bool {
        match self {
            Expression::Constant(_) | Expression::Parameter(_) | Expression::TabularQuery(_) => {
                false
            }
            Expression::Reference(_)
            | Expression::Variable(_)
            | Expression::VariableAssign(_)
            | Expression::ReferenceAssign(_)
            | Expression::Function(_) => true,
            Expression::Binary(e) => e.is_reference,
            Expression::Unary(e) => e.is_reference,
            Expression::Cast(e) => e.is_reference,
            Expression::Condition(e) => e.is_reference,
            Expression::StringMatch(e) => e.is_reference,
            Expression::Group(e) => e.is_reference,
            Expression::Quantify(e) => e.is_reference,
        }
    }

    /// Position on the fixed precedence ladder; a higher value binds
    /// tighter. Drives the binary reduction tie-break and defensive
    /// parenthesization when printing.
    pub fn precedence(&self) -> u8 {
        use BinaryOp::*;
        match self {
            Expression::Group(_) => 151,
            Expression::Reference(_)
            | Expression::Function(_)
            | Expression::Variable(_)
            | Expression::Parameter(_)
            | Expression::VariableAssign(_)
            | Expression::ReferenceAssign(_)
            | Expression::TabularQuery(_) => 150,
            Expression::Unary(_) => 140,
            Expression::Cast(_) => 139,
            Expression::Binary(b) => match b.op {
                Multiply | Divide | Modulo => 130,
                Add | Subtract => 120,
                GreaterThan | GreaterThanOrEqual | LessThan | LessThanOrEqual | Is | IsNot => 110,
                Equal | NotEqual => 100,
                And => 90,
                Or => 89,
                XOr => 88,
            },
            Expression::StringMatch(_) | Expression::Quantify(_) => 110,
            Expression::Condition(_) => 80,
            Expression::Constant(_) => 70,
        }
    }

    /// Static type determination. Reference, variable and function types
    /// come from the resolution context; requesting them without one is
    /// an error, never a silent default. Parameters cannot be statically
    /// typed at all outside a binding context.
    pub fn static_type(&self, ctx: Option<&ReduceContext<'_>>) -> Result<DataType> {
        match self {
            Expression::Constant(c) => Ok(c.value.data_type()),
            Expression::Binary(b) => {
                let left = b.left.static_type(ctx)?;
                let right = b.right.static_type(ctx)?;
                operators::validate_binary(b.op, &left, &right)
            }
            Expression::Unary(u) => {
                let operand = u.operand.static_type(ctx)?;
                operators::validate_unary(u.op, &operand)
            }
            Expression::Cast(c) => Ok(c.target.clone()),
            Expression::Condition(c) => c.if_true.static_type(ctx),
            Expression::StringMatch(_) => Ok(DataType::Boolean),
            Expression::Reference(r) => {
                let ctx = ctx.ok_or(Error::NoContext)?;
                let references = ctx
                    .references
                    .ok_or(Error::ServiceNotConfigured("reference resolver"))?;
                references
                    .reference_type(&r.name)
                    .ok_or_else(|| Error::UnresolvedReference(r.name.to_string()))
            }
            Expression::Variable(v) => {
                let ctx = ctx.ok_or(Error::NoContext)?;
                let variables = ctx
                    .variables
                    .ok_or(Error::ServiceNotConfigured("variable resolver"))?;
                variables
                    .variable_type(&v.name)
                    .ok_or_else(|| Error::UnresolvedReference(v.name.clone()))
            }
            Expression::VariableAssign(a) => a.value.static_type(ctx),
            Expression::ReferenceAssign(a) => a.value.static_type(ctx),
            Expression::Function(f) => {
                let ctx = ctx.ok_or(Error::NoContext)?;
                let methods = ctx
                    .methods
                    .ok_or(Error::ServiceNotConfigured("method resolution"))?;
                let invocation = f.invocation(ctx.current_schema, methods);
                match methods.resolve(&invocation) {
                    MethodLookup::Found(descriptor) => Ok(descriptor.returns),
                    MethodLookup::NotFound => {
                        Err(Error::FunctionNotFound(invocation.name.to_string()))
                    }
                    MethodLookup::Ambiguous => {
                        Err(Error::AmbiguousFunction(invocation.name.to_string()))
                    }
                    MethodLookup::NotAFunction => {
                        Err(Error::NotAFunction(invocation.name.to_string()))
                    }
                    MethodLookup::ArgumentMismatch(reason) => Err(Error::ArgumentMismatch {
                        function: invocation.name.to_string(),
                        reason,
                    }),
                }
            }
            Expression::Parameter(p) => Err(Error::UntypedParameter(p.ordinal)),
            Expression::Group(g) => g.inner.static_type(ctx),
            Expression::Quantify(_) => Ok(DataType::Boolean),
            Expression::TabularQuery(_) => Ok(DataType::Tabular),
        }
    }
}

impl FunctionExpr {
    /// The invocation descriptor for resolution. An unqualified name
    /// that is not a recognized built-in is qualified with the current
    /// schema.
    pub fn invocation(
        &self,
        current_schema: Option<&str>,
        methods: &dyn MethodResolver,
    ) -> Invocation {
        let mut name = self.name.clone();
        if !name.is_qualified() && !methods.is_builtin(&name.name) {
            if let Some(schema) = current_schema {
                name = name.qualify_with(schema);
            }
        }
        Invocation {
            name,
            arguments: self.args.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ladder() {
        let one = Expression::constant(Value::integer(1));
        let add = Expression::binary(BinaryOp::Add, one.clone(), one.clone());
        let mul = Expression::binary(BinaryOp::Multiply, one.clone(), one.clone());
        assert!(mul.precedence() > add.precedence());
        assert_eq!(Expression::group(one.clone()).precedence(), 151);
        assert_eq!(one.precedence(), 70);
    }

    #[test]
    fn test_can_reduce() {
        assert!(!Expression::constant(Value::Null).can_reduce());
        assert!(!Expression::parameter(0).can_reduce());
        assert!(Expression::variable("x").can_reduce());
    }

    #[test]
    fn test_is_reference_propagates() {
        let constant = Expression::constant(Value::integer(1));
        assert!(!constant.is_reference());
        let reference = Expression::reference(QualifiedName::bare("a"));
        assert!(reference.is_reference());
        let tree = Expression::binary(
            BinaryOp::Add,
            constant.clone(),
            Expression::group(reference),
        );
        assert!(tree.is_reference());
        let pure = Expression::binary(BinaryOp::Add, constant.clone(), constant);
        assert!(!pure.is_reference());
    }

    #[test]
    fn test_quantify_rejects_non_comparison() {
        let one = Expression::constant(Value::integer(1));
        let err = Expression::quantify(Quantifier::Any, BinaryOp::Add, one.clone(), one.clone());
        assert_eq!(
            err.unwrap_err(),
            Error::InvalidQuantifierOperator("+".into())
        );
        assert!(
            Expression::quantify(Quantifier::All, BinaryOp::LessThan, one.clone(), one).is_ok()
        );
    }

    #[test]
    fn test_parameter_has_no_static_type() {
        let err = Expression::parameter(2).static_type(None).unwrap_err();
        assert_eq!(err, Error::UntypedParameter(2));
    }
}
