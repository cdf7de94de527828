// ABOUTME: Iterative walks over expression trees and an indented tree renderer

use crate::value::Value;
use std::collections::VecDeque;

/// Visits `root` and every descendant, parents before children,
/// siblings left to right. Uses an explicit stack, not recursion.
pub fn preorder<'a>(root: &'a Value, mut visit: impl FnMut(&'a Value)) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node);
        if let Some(cells) = node.cells() {
            for child in cells.iter().rev() {
                stack.push(child);
            }
        }
    }
}

/// Visits nodes level by level, passing each node's depth (root is 0).
pub fn level_order<'a>(root: &'a Value, mut visit: impl FnMut(&'a Value, usize)) {
    let mut queue: VecDeque<(&Value, usize)> = VecDeque::new();
    queue.push_back((root, 0));
    while let Some((node, depth)) = queue.pop_front() {
        visit(node, depth);
        if let Some(cells) = node.cells() {
            for child in cells {
                queue.push_back((child, depth + 1));
            }
        }
    }
}

fn node_label(node: &Value) -> String {
    match node {
        Value::Sexpr(_) => "sexpr".to_string(),
        Value::Qexpr(_) => "qexpr".to_string(),
        atom => atom.to_string(),
    }
}

/// Renders the tree one node per line, indented two spaces per level.
/// Cell-bearing nodes print their kind; atoms print their display form.
pub fn render_tree(root: &Value) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node_label(node));
        out.push('\n');
        if let Some(cells) = node.cells() {
            for child in cells.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
    out
}
