//! Source emission for syntax trees.
//!
//! Rendering trusts the tree: nothing is re-checked here, so an invalid tree
//! produces text that is not guaranteed to be meaningful Python.

use std::fmt::{self, Write};
use std::io;

use tracing::trace_span;

use super::literal::literal_repr;
use super::{Arguments, Module, Node, Parameters};
use crate::writer::{IndentStyle, IndentWriter, IoSink};

/// Anything that can emit itself through an [`IndentWriter`].
pub trait Render {
    fn render<W: fmt::Write>(&self, out: &mut IndentWriter<W>) -> fmt::Result;

    /// Renders into a plain sink at level zero with the default style.
    fn render_into<S: fmt::Write>(&self, sink: S) -> fmt::Result {
        let mut out = IndentWriter::new(sink);
        self.render(&mut out)?;
        out.flush()
    }

    fn to_source_with(&self, style: IndentStyle) -> String {
        let mut out = IndentWriter::with_style(String::new(), style);
        // Writing into a String cannot fail.
        let _ = self.render(&mut out).and_then(|()| out.flush());
        out.into_inner()
    }

    fn to_source(&self) -> String {
        self.to_source_with(IndentStyle::default())
    }

    /// Renders into a byte sink, returning the sink once everything is flushed.
    fn write_to<S: io::Write>(&self, sink: S, style: IndentStyle) -> io::Result<S> {
        let _span = trace_span!("write_to").entered();
        let mut out = IndentWriter::with_style(IoSink::new(sink), style);
        let result = self.render(&mut out).and_then(|()| out.flush());
        out.into_inner().finish(result)
    }
}

/// A piece of output: a node, literal text, or a run of further fragments.
#[derive(Debug, Clone)]
pub enum Fragment<'a> {
    Node(&'a Node),
    Text(&'a str),
    Seq(Vec<Fragment<'a>>),
}

use self::Fragment::{Seq, Text};

impl<'a> Fragment<'a> {
    /// Joins `items` with `", "`.
    pub fn comma_separated(items: impl IntoIterator<Item = Fragment<'a>>) -> Self {
        let mut joined = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                joined.push(Text(", "));
            }
            joined.push(item);
        }
        Seq(joined)
    }
}

impl Render for Fragment<'_> {
    fn render<W: fmt::Write>(&self, out: &mut IndentWriter<W>) -> fmt::Result {
        match self {
            Fragment::Node(node) => node.render(out),
            Text(text) => out.write_str(text),
            Seq(items) => emit(out, items),
        }
    }
}

fn emit<W: fmt::Write>(out: &mut IndentWriter<W>, fragments: &[Fragment<'_>]) -> fmt::Result {
    fragments.iter().try_for_each(|fragment| fragment.render(out))
}

fn argument_list(args: &Arguments) -> Fragment<'_> {
    let positional = args.positional.iter().map(Fragment::Node);
    let keywords = args
        .keywords
        .iter()
        .map(|(name, value)| Seq(vec![Text(name), Text("="), Fragment::Node(value)]));
    let star = args
        .star
        .iter()
        .map(|value| Seq(vec![Text("*"), Fragment::Node(value)]));
    let double_star = args
        .double_star
        .iter()
        .map(|value| Seq(vec![Text("**"), Fragment::Node(value)]));

    Fragment::comma_separated(positional.chain(keywords).chain(star).chain(double_star))
}

fn parameter_list(params: &Parameters) -> Fragment<'_> {
    let plain = params.args.iter().map(|name| Text(name));
    let defaults = params
        .defaults
        .iter()
        .map(|(name, value)| Seq(vec![Text(name), Text("="), Fragment::Node(value)]));
    let varargs = params
        .varargs
        .iter()
        .map(|name| Seq(vec![Text("*"), Text(name)]));
    let kwargs = params
        .kwargs
        .iter()
        .map(|name| Seq(vec![Text("**"), Text(name)]));

    Fragment::comma_separated(plain.chain(defaults).chain(varargs).chain(kwargs))
}

/// Emits `header:` and then each statement of `body` on its own line, one
/// level deeper. No newline follows the last statement.
fn render_block<W: fmt::Write>(
    out: &mut IndentWriter<W>,
    header: &[Fragment<'_>],
    body: &[Node],
) -> fmt::Result {
    emit(out, header)?;
    out.write_str(":")?;
    let mut block = out.indent();
    for stmt in body {
        block.end_line()?;
        stmt.render(&mut *block)?;
    }
    Ok(())
}

impl Render for Node {
    fn render<W: fmt::Write>(&self, out: &mut IndentWriter<W>) -> fmt::Result {
        match self {
            Node::Constant { value } => out.write_str(&literal_repr(value)),
            Node::Variable { name } => out.write_str(name),
            Node::BinaryOp { left, op, right } => emit(
                out,
                &[
                    Text("("),
                    Fragment::Node(left),
                    Text(" "),
                    Text(op),
                    Text(" "),
                    Fragment::Node(right),
                    Text(")"),
                ],
            ),
            Node::Call { callee, args } => emit(
                out,
                &[Fragment::Node(callee), Text("("), argument_list(args), Text(")")],
            ),
            Node::Lambda { params, body } if params.is_empty() => {
                emit(out, &[Text("(lambda: "), Fragment::Node(body), Text(")")])
            }
            Node::Lambda { params, body } => emit(
                out,
                &[
                    Text("(lambda "),
                    parameter_list(params),
                    Text(": "),
                    Fragment::Node(body),
                    Text(")"),
                ],
            ),
            Node::Assign { target, value } => emit(
                out,
                &[Fragment::Node(target), Text(" = "), Fragment::Node(value)],
            ),
            Node::ExpressionStatement { expr } => expr.render(out),
            Node::While { condition, body } => {
                render_block(out, &[Text("while "), Fragment::Node(condition)], body)
            }
            Node::For { target, iter, body } => render_block(
                out,
                &[
                    Text("for "),
                    Fragment::Node(target),
                    Text(" in "),
                    Fragment::Node(iter),
                ],
                body,
            ),
            Node::Pass => out.write_str("pass"),
            Node::FunctionDef { name, params, body } => render_block(
                out,
                &[
                    Text("def "),
                    Text(name),
                    Text("("),
                    parameter_list(params),
                    Text(")"),
                ],
                body,
            ),
            Node::ClassDef { name, bases, body } => render_block(
                out,
                &[
                    Text("class "),
                    Text(name),
                    Text("("),
                    Fragment::comma_separated(bases.iter().map(Fragment::Node)),
                    Text(")"),
                ],
                body,
            ),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_into(f)
    }
}

impl Render for Module {
    /// Emits each statement followed by a newline.
    fn render<W: fmt::Write>(&self, out: &mut IndentWriter<W>) -> fmt::Result {
        let _span = trace_span!("render_module", statements = self.body.len()).entered();
        for stmt in &self.body {
            stmt.render(out)?;
            out.end_line()?;
        }
        Ok(())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_into(f)
    }
}
