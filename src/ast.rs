//! Syntax tree for the emitted Python subset.
//!
//! Nodes are plain owned data: callers build a tree once, optionally check it
//! with [`Node::validate`], and render it as many times as they like through
//! an [`IndentWriter`](crate::writer::IndentWriter).

use serde::{Deserialize, Serialize};

pub mod error;
mod literal;
pub mod render;
pub mod validate;

pub use error::ValidationError;
pub use render::{Fragment, Render};

/// Payload of a [`Node::Constant`].
///
/// Only the scalar arms are legal Python constants. `Node` exists so that a
/// tree built from loosely typed input can still carry a misplaced node and
/// have validation reject it.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Node(Box<Node>),
}

impl Literal {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Literal::Node(_))
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value.into())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl From<Node> for Literal {
    fn from(value: Node) -> Self {
        Literal::Node(Box::new(value))
    }
}

/// Arguments of a call, emitted in field order.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Arguments {
    pub positional: Vec<Node>,
    pub keywords: Vec<(String, Node)>,
    pub star: Option<Box<Node>>,
    pub double_star: Option<Box<Node>>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positional(mut self, value: Node) -> Self {
        self.positional.push(value);
        self
    }

    pub fn keyword(mut self, name: impl Into<String>, value: Node) -> Self {
        self.keywords.push((name.into(), value));
        self
    }

    pub fn star(mut self, value: Node) -> Self {
        self.star = Some(Box::new(value));
        self
    }

    pub fn double_star(mut self, value: Node) -> Self {
        self.double_star = Some(Box::new(value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
            && self.keywords.is_empty()
            && self.star.is_none()
            && self.double_star.is_none()
    }
}

/// Parameter list shared by function definitions and lambdas.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub args: Vec<String>,
    pub defaults: Vec<(String, Node)>,
    pub varargs: Option<String>,
    pub kwargs: Option<String>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, name: impl Into<String>) -> Self {
        self.args.push(name.into());
        self
    }

    pub fn default_arg(mut self, name: impl Into<String>, value: Node) -> Self {
        self.defaults.push((name.into(), value));
        self
    }

    pub fn varargs(mut self, name: impl Into<String>) -> Self {
        self.varargs = Some(name.into());
        self
    }

    pub fn kwargs(mut self, name: impl Into<String>) -> Self {
        self.kwargs = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
            && self.defaults.is_empty()
            && self.varargs.is_none()
            && self.kwargs.is_none()
    }

    /// Every bound name in emission order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.args
            .iter()
            .map(String::as_str)
            .chain(self.defaults.iter().map(|(name, _)| name.as_str()))
            .chain(self.varargs.as_deref())
            .chain(self.kwargs.as_deref())
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Constant {
        value: Literal,
    },
    Variable {
        name: String,
    },
    BinaryOp {
        left: Box<Node>,
        op: String,
        right: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        #[serde(default)]
        args: Arguments,
    },
    Lambda {
        #[serde(default)]
        params: Parameters,
        body: Box<Node>,
    },
    Assign {
        target: Box<Node>,
        value: Box<Node>,
    },
    ExpressionStatement {
        expr: Box<Node>,
    },
    While {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    For {
        target: Box<Node>,
        iter: Box<Node>,
        body: Vec<Node>,
    },
    Pass,
    FunctionDef {
        name: String,
        #[serde(default)]
        params: Parameters,
        body: Vec<Node>,
    },
    ClassDef {
        name: String,
        #[serde(default)]
        bases: Vec<Node>,
        body: Vec<Node>,
    },
}

impl Node {
    pub fn constant(value: impl Into<Literal>) -> Self {
        Node::Constant {
            value: value.into(),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable { name: name.into() }
    }

    pub fn binary_op(left: Node, op: impl Into<String>, right: Node) -> Self {
        Node::BinaryOp {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        }
    }

    pub fn call(callee: Node, args: Arguments) -> Self {
        Node::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn lambda(params: Parameters, body: Node) -> Self {
        Node::Lambda {
            params,
            body: Box::new(body),
        }
    }

    pub fn assign(target: Node, value: Node) -> Self {
        Node::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn expr_stmt(expr: Node) -> Self {
        Node::ExpressionStatement {
            expr: Box::new(expr),
        }
    }

    pub fn while_loop(condition: Node, body: Vec<Node>) -> Self {
        Node::While {
            condition: Box::new(condition),
            body,
        }
    }

    pub fn for_loop(target: Node, iter: Node, body: Vec<Node>) -> Self {
        Node::For {
            target: Box::new(target),
            iter: Box::new(iter),
            body,
        }
    }

    pub fn pass() -> Self {
        Node::Pass
    }

    pub fn function_def(name: impl Into<String>, params: Parameters, body: Vec<Node>) -> Self {
        Node::FunctionDef {
            name: name.into(),
            params,
            body,
        }
    }

    pub fn class_def(name: impl Into<String>, bases: Vec<Node>, body: Vec<Node>) -> Self {
        Node::ClassDef {
            name: name.into(),
            bases,
            body,
        }
    }

    /// Short variant name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Constant { .. } => "Constant",
            Node::Variable { .. } => "Variable",
            Node::BinaryOp { .. } => "BinaryOp",
            Node::Call { .. } => "Call",
            Node::Lambda { .. } => "Lambda",
            Node::Assign { .. } => "Assign",
            Node::ExpressionStatement { .. } => "ExpressionStatement",
            Node::While { .. } => "While",
            Node::For { .. } => "For",
            Node::Pass => "Pass",
            Node::FunctionDef { .. } => "FunctionDef",
            Node::ClassDef { .. } => "ClassDef",
        }
    }

    /// Whether the node may appear as a member of a block.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Node::Assign { .. }
                | Node::ExpressionStatement { .. }
                | Node::While { .. }
                | Node::For { .. }
                | Node::Pass
                | Node::FunctionDef { .. }
                | Node::ClassDef { .. }
        )
    }

    /// Whether the node may be assigned to or used as a loop target.
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Node::Variable { .. })
    }

    /// Whether the node produces a value.
    pub fn is_rvalue(&self) -> bool {
        matches!(
            self,
            Node::Constant { .. }
                | Node::Variable { .. }
                | Node::BinaryOp { .. }
                | Node::Call { .. }
                | Node::Lambda { .. }
        )
    }
}

/// A top-level sequence of statements.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Module {
    pub body: Vec<Node>,
}

impl Module {
    pub fn new(body: Vec<Node>) -> Self {
        Self { body }
    }
}
