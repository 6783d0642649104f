#![allow(dead_code)]
use std::path::Path;

use pyemit::fixtures::load_cases;
use pyemit::{Arguments, Module, Node, Parameters};

/// Golden fixture trees, reused as small workloads.
pub fn fixture_trees() -> Vec<(String, Node)> {
    load_cases(Path::new("tests/cases"))
        .unwrap_or_else(|err| panic!("load fixtures: {err:#}"))
        .into_iter()
        .map(|case| (case.name, case.spec.tree))
        .collect()
}

/// A module of `functions` definitions, each nesting loops `depth` deep.
pub fn synthetic_module(functions: usize, depth: usize) -> Module {
    let body = (0..functions)
        .map(|index| {
            let mut inner = vec![Node::expr_stmt(Node::call(
                Node::variable("emit"),
                Arguments::new()
                    .positional(Node::variable("value"))
                    .keyword("label", Node::constant(format!("fn {index}")))
                    .star(Node::variable("extra")),
            ))];
            for level in 0..depth {
                let target = format!("i{level}");
                inner = vec![
                    Node::assign(
                        Node::variable("value"),
                        Node::binary_op(Node::variable("value"), "+", Node::variable(target.as_str())),
                    ),
                    Node::for_loop(
                        Node::variable(target),
                        Node::call(
                            Node::variable("range"),
                            Arguments::new().positional(Node::constant(10)),
                        ),
                        inner,
                    ),
                ];
            }
            Node::function_def(
                format!("work_{index}"),
                Parameters::new()
                    .arg("value")
                    .default_arg("scale", Node::constant(1.5))
                    .varargs("extra"),
                inner,
            )
        })
        .collect();
    Module::new(body)
}

pub const WORKLOADS: [(&str, usize, usize); 2] = [("wide", 200, 2), ("deep", 10, 40)];
