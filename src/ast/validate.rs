//! Structural and semantic checks over a syntax tree.
//!
//! Validation walks the tree depth-first in field order and stops at the first
//! broken rule. Rendering never re-checks anything, so callers that accept
//! trees from elsewhere should validate before rendering.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::debug;

use super::error::{ValidationError, ValidationResult};
use super::{Arguments, Literal, Module, Node, Parameters};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

static KEYWORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
    ]
    .into_iter()
    .collect()
});

const BINARY_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "//", "%", "**", "<<", ">>", "&", "|", "^", "@", "and", "or", "==", "!=",
    "<", "<=", ">", ">=", "is", "is not", "in", "not in",
];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(name)
}

pub fn is_binary_operator(op: &str) -> bool {
    BINARY_OPERATORS.contains(&op)
}

/// Whether `name` can be used as a variable, function, class or parameter name.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name) && !is_keyword(name)
}

fn check_identifier(name: &str) -> ValidationResult {
    if !IDENTIFIER.is_match(name) {
        return Err(ValidationError::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    if is_keyword(name) {
        return Err(ValidationError::ReservedKeyword {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_rvalue(node: &Node, position: &'static str) -> ValidationResult {
    if !node.is_rvalue() {
        return Err(ValidationError::NotAnRValue {
            position,
            found: node.kind(),
        });
    }
    node.check()
}

fn check_lvalue(node: &Node, position: &'static str) -> ValidationResult {
    if !node.is_lvalue() {
        return Err(ValidationError::NotAnLValue {
            position,
            found: node.kind(),
        });
    }
    node.check()
}

fn check_statement(node: &Node) -> ValidationResult {
    if !node.is_statement() {
        return Err(ValidationError::NotAStatement { found: node.kind() });
    }
    node.check()
}

fn check_block(owner: &'static str, body: &[Node]) -> ValidationResult {
    if body.is_empty() {
        return Err(ValidationError::EmptyBlock { owner });
    }
    body.iter().try_for_each(check_statement)
}

fn check_parameters(params: &Parameters) -> ValidationResult {
    let mut seen = FxHashSet::default();
    for name in params.names() {
        check_identifier(name)?;
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateParameter {
                name: name.to_string(),
            });
        }
    }
    for (_, default) in &params.defaults {
        check_rvalue(default, "Parameter default")?;
    }
    Ok(())
}

fn check_arguments(args: &Arguments) -> ValidationResult {
    for arg in &args.positional {
        check_rvalue(arg, "Positional argument")?;
    }

    let mut seen = FxHashSet::default();
    for (name, value) in &args.keywords {
        check_identifier(name)?;
        if !seen.insert(name.as_str()) {
            return Err(ValidationError::DuplicateKeyword { name: name.clone() });
        }
        check_rvalue(value, "Keyword argument")?;
    }

    if let Some(star) = &args.star {
        check_rvalue(star, "Positional spread")?;
    }
    if let Some(double_star) = &args.double_star {
        check_rvalue(double_star, "Keyword spread")?;
    }
    Ok(())
}

impl Node {
    /// Checks this node and its whole subtree.
    pub fn validate(&self) -> ValidationResult {
        self.check().inspect_err(|err| {
            debug!(node = self.kind(), error = %err, "syntax tree rejected");
        })
    }

    fn check(&self) -> ValidationResult {
        match self {
            Node::Constant { value } => match value {
                Literal::Node(node) => Err(ValidationError::NonScalarConstant { found: node.kind() }),
                Literal::Bool(_) | Literal::Int(_) | Literal::Float(_) | Literal::Str(_) => Ok(()),
            },
            Node::Variable { name } => check_identifier(name),
            Node::BinaryOp { left, op, right } => {
                check_rvalue(left, "BinaryOp left operand")?;
                if !is_binary_operator(op) {
                    return Err(ValidationError::UnknownOperator { op: op.clone() });
                }
                check_rvalue(right, "BinaryOp right operand")
            }
            Node::Call { callee, args } => {
                check_rvalue(callee, "Call target")?;
                check_arguments(args)
            }
            Node::Lambda { params, body } => {
                check_parameters(params)?;
                check_rvalue(body, "Lambda body")
            }
            Node::Assign { target, value } => {
                check_lvalue(target, "Assignment target")?;
                check_rvalue(value, "Assigned value")
            }
            Node::ExpressionStatement { expr } => check_rvalue(expr, "ExpressionStatement"),
            Node::While { condition, body } => {
                check_rvalue(condition, "While condition")?;
                check_block("While", body)
            }
            Node::For { target, iter, body } => {
                check_lvalue(target, "For target")?;
                check_rvalue(iter, "For iterable")?;
                check_block("For", body)
            }
            Node::Pass => Ok(()),
            Node::FunctionDef { name, params, body } => {
                check_identifier(name)?;
                check_parameters(params)?;
                check_block("FunctionDef", body)
            }
            Node::ClassDef { name, bases, body } => {
                check_identifier(name)?;
                for base in bases {
                    check_rvalue(base, "Base class")?;
                }
                check_block("ClassDef", body)
            }
        }
    }
}

impl Module {
    /// Checks every top-level statement. An empty module is valid.
    pub fn validate(&self) -> ValidationResult {
        self.body.iter().try_for_each(check_statement).inspect_err(|err| {
            debug!(error = %err, "module rejected");
        })
    }
}
