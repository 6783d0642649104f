use std::fmt::{self, Write};
use std::thread;

use indoc::indoc;

use pyemit::{Arguments, IndentWriter, Module, Node, Parameters, Render};

fn render(node: &Node) -> String {
    node.validate().expect("tree should validate");
    let mut buf = String::new();
    let mut out = IndentWriter::new(&mut buf);
    node.render(&mut out).expect("rendering into a String cannot fail");
    buf
}

#[test]
fn test_constant_zero() {
    assert_eq!(render(&Node::constant(0)), "0");
}

#[test]
fn test_constant_text_is_quoted() {
    assert_eq!(render(&Node::constant("Hello")), "'Hello'");
}

#[test]
fn test_binary_op_is_parenthesized() {
    let sum = Node::binary_op(Node::constant(4), "+", Node::constant(2));
    assert_eq!(render(&sum), "(4 + 2)");
}

#[test]
fn test_while_true_pass() {
    let tree = Node::while_loop(Node::constant(true), vec![Node::pass()]);
    assert_eq!(
        render(&tree),
        indoc! {"
            while True:
                pass"}
    );
}

#[test]
fn test_call_with_keyword_and_spread() {
    let call = Node::call(
        Node::variable("f"),
        Arguments::new()
            .keyword("x", Node::constant(4))
            .star(Node::variable("my_args")),
    );
    assert_eq!(render(&call), "f(x=4, *my_args)");
}

#[test]
fn test_class_body() {
    let tree = Node::class_def(
        "Foo",
        vec![Node::variable("object")],
        vec![
            Node::assign(Node::variable("x"), Node::constant(4)),
            Node::assign(Node::variable("y"), Node::constant(36)),
        ],
    );
    assert_eq!(
        render(&tree),
        indoc! {"
            class Foo(object):
                x = 4
                y = 36"}
    );
}

#[test]
fn test_writer_levels() -> fmt::Result {
    let mut buf = String::new();
    let mut out = IndentWriter::new(&mut buf);
    out.write_str("0\n")?;
    {
        let mut one = out.indent();
        one.write_str("1\n")?;
        {
            let mut two = one.indent();
            two.write_str("2-")?;
            two.write_str("2\n")?;
            {
                let mut three = two.indent();
                three.write_str("3\n")?;
            }
            two.write_str("2\n")?;
        }
        one.write_str("1\n")?;
    }
    out.write_str("0\n")?;

    assert_eq!(buf, "0\n    1\n        2-2\n            3\n        2\n    1\n0\n");
    Ok(())
}

#[test]
fn test_writer_chunking_with_scope_changes() -> fmt::Result {
    // Scope changes happen between these pieces; each piece is further split
    // at every possible offset.
    let pieces = ["class A:\n", "x = 1\ny = 2\n", "def f():\n", "return y\n", "z = 3\n"];
    let levels = [0, 1, 1, 2, 1];

    let run = |split: usize| -> Result<String, fmt::Error> {
        let mut buf = String::new();
        let mut out = IndentWriter::new(&mut buf);
        for (piece, level) in pieces.iter().zip(levels) {
            let (head, tail) = piece.split_at(split.min(piece.len()));
            write_at_level(&mut out, level, head, tail)?;
        }
        Ok(buf)
    };

    let reference = run(usize::MAX)?;
    assert_eq!(
        reference,
        indoc! {"
            class A:
                x = 1
                y = 2
                def f():
                    return y
                z = 3
        "}
    );
    for split in 0..16 {
        assert_eq!(run(split)?, reference, "split at {split}");
    }
    Ok(())
}

fn write_at_level<W: fmt::Write>(
    out: &mut IndentWriter<W>,
    level: usize,
    head: &str,
    tail: &str,
) -> fmt::Result {
    if level == 0 {
        out.write_str(head)?;
        return out.write_str(tail);
    }
    let mut inner = out.indent();
    write_at_level(&mut *inner, level - 1, head, tail)
}

#[test]
fn test_render_is_repeatable_across_writers() {
    let tree = Node::function_def(
        "count",
        Parameters::new().arg("limit").default_arg("step", Node::constant(1)),
        vec![
            Node::assign(Node::variable("i"), Node::constant(0)),
            Node::while_loop(
                Node::binary_op(Node::variable("i"), "<", Node::variable("limit")),
                vec![Node::assign(
                    Node::variable("i"),
                    Node::binary_op(Node::variable("i"), "+", Node::variable("step")),
                )],
            ),
        ],
    );

    let first = render(&tree);
    let second = render(&tree);
    assert_eq!(first, second);
    assert_eq!(
        first,
        indoc! {"
            def count(limit, step=1):
                i = 0
                while (i < limit):
                    i = (i + step)"}
    );
}

#[test]
fn test_shared_tree_renders_concurrently() {
    let module = Module::new(vec![
        Node::assign(Node::variable("x"), Node::constant(1)),
        Node::for_loop(
            Node::variable("item"),
            Node::variable("items"),
            vec![Node::expr_stmt(Node::call(
                Node::variable("print"),
                Arguments::new().positional(Node::variable("item")),
            ))],
        ),
    ]);
    module.validate().expect("module should validate");
    let expected = module.to_source();

    let outputs: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| module.to_source())).collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("render thread panicked"))
            .collect()
    });

    assert!(outputs.iter().all(|output| *output == expected));
    assert_eq!(expected, "x = 1\nfor item in items:\n    print(item)\n");
}

#[test]
fn test_illegal_trees_are_rejected() {
    let illegal = [
        Node::variable("def"),
        Node::variable("5eep"),
        Node::variable("list?"),
        Node::constant(Node::binary_op(Node::constant(4), "+", Node::constant(2))),
        Node::constant(Node::pass()),
        Node::assign(Node::constant(4), Node::constant(5)),
        Node::while_loop(Node::pass(), vec![Node::pass()]),
        Node::while_loop(Node::constant(true), vec![Node::constant(4)]),
        Node::while_loop(Node::constant(true), vec![]),
        Node::for_loop(Node::constant(1), Node::variable("xs"), vec![Node::pass()]),
        Node::class_def("Foo", vec![Node::pass()], vec![Node::pass()]),
        Node::binary_op(Node::constant(4), "5", Node::constant(6)),
        Node::function_def(
            "f",
            Parameters::new().arg("a").varargs("a"),
            vec![Node::pass()],
        ),
    ];

    for tree in &illegal {
        assert!(tree.validate().is_err(), "expected rejection of {tree:?}");
    }
}
