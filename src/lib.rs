pub mod ast;
pub mod fixtures;
pub mod writer;

pub use ast::{Arguments, Fragment, Literal, Module, Node, Parameters, Render, ValidationError};
pub use writer::{IndentStyle, IndentWriter, Indented, IoSink};
