use thiserror::Error;

/// Structural or semantic rule broken by a syntax tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{name}' is not a valid identifier")]
    InvalidIdentifier { name: String },
    #[error("'{name}' is a reserved keyword and cannot be used as an identifier")]
    ReservedKeyword { name: String },
    #[error("Constant payload must be a bool, float, int or str, got a {found} node")]
    NonScalarConstant { found: &'static str },
    #[error("'{op}' is not a known binary operator")]
    UnknownOperator { op: String },
    #[error("{position} requires a value-producing expression, got {found}")]
    NotAnRValue {
        position: &'static str,
        found: &'static str,
    },
    #[error("{position} requires an assignable expression, got {found}")]
    NotAnLValue {
        position: &'static str,
        found: &'static str,
    },
    #[error("{found} cannot appear in a block; wrap expressions in ExpressionStatement")]
    NotAStatement { found: &'static str },
    #[error("{owner} body must contain at least one statement")]
    EmptyBlock { owner: &'static str },
    #[error("Duplicate parameter '{name}'")]
    DuplicateParameter { name: String },
    #[error("Keyword argument '{name}' repeated")]
    DuplicateKeyword { name: String },
}

pub type ValidationResult<T = ()> = Result<T, ValidationError>;
