//! Извлечение значений из XML-дерева по упрощённым путям в духе XPath.
//!
//! Поддерживается ровно то, что нужно разбору: `/A/B` от корня документа,
//! `A/B` и `./A` от текущего узла, `//A` и `.//A` по потомкам.
//! «Не найдено» — это пустой результат, а не ошибка.

use roxmltree::{Node, NodeId};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug)]
struct Step<'p> {
    axis: Axis,
    name: &'p str,
}

#[derive(Debug)]
struct Path<'p> {
    absolute: bool,
    steps: Vec<Step<'p>>,
}

impl<'p> Path<'p> {
    fn parse(expr: &'p str) -> Self {
        let mut rest = expr.trim();
        // `/A` и `//A` считаются от корня документа, `./A` и `.//A` — от узла
        let absolute = rest.starts_with('/');
        if let Some(r) = rest.strip_prefix('.') {
            rest = r;
        }

        let mut steps = Vec::new();
        let mut axis = Axis::Child;
        for part in rest.split('/') {
            match part {
                // пустой сегмент между "//" -> ось потомков для следующего шага
                "" => {
                    if !steps.is_empty() || rest.starts_with("//") {
                        axis = Axis::Descendant;
                    }
                }
                "." => {}
                name => {
                    steps.push(Step { axis, name });
                    axis = Axis::Child;
                }
            }
        }

        Path { absolute, steps }
    }
}

/// Все совпадения в порядке документа, без повторов.
pub fn select_nodes<'a, 'input>(node: Node<'a, 'input>, expr: &str) -> Vec<Node<'a, 'input>> {
    let path = Path::parse(expr);
    let start = if path.absolute {
        node.document().root()
    } else {
        node
    };

    let mut current = vec![start];
    for step in &path.steps {
        let mut next = Vec::new();
        let mut seen = HashSet::new();
        for n in &current {
            match step.axis {
                Axis::Child => collect(n.children(), step.name, &mut seen, &mut next),
                // descendants() включает сам узел, его пропускаем
                Axis::Descendant => {
                    collect(n.descendants().skip(1), step.name, &mut seen, &mut next)
                }
            }
        }
        // id растут в порядке разбора, то есть в порядке документа
        next.sort_by_key(|n| n.id().get());
        current = next;
        if current.is_empty() {
            break;
        }
    }

    if path.steps.is_empty() {
        return Vec::new();
    }
    current
}

fn collect<'a, 'input>(
    candidates: impl Iterator<Item = Node<'a, 'input>>,
    name: &str,
    seen: &mut HashSet<NodeId>,
    out: &mut Vec<Node<'a, 'input>>,
) {
    for c in candidates {
        if c.is_element() && c.tag_name().name() == name && seen.insert(c.id()) {
            out.push(c);
        }
    }
}

pub fn select_single<'a, 'input>(node: Node<'a, 'input>, expr: &str) -> Option<Node<'a, 'input>> {
    select_nodes(node, expr).into_iter().next()
}

/// Текст первого дочернего узла первого совпадения, обрезанный по краям.
/// Пустая строка, если узла нет или его первый потомок не текст.
pub fn value(node: Node<'_, '_>, expr: &str) -> String {
    select_single(node, expr)
        .and_then(own_text)
        .unwrap_or_default()
}

/// Как `value`, но пустое значение превращается в `None`.
pub fn optional(node: Node<'_, '_>, expr: &str) -> Option<String> {
    Some(value(node, expr)).filter(|v| !v.is_empty())
}

pub(crate) fn own_text(node: Node<'_, '_>) -> Option<String> {
    node.first_child()
        .filter(|c| c.is_text())
        .and_then(|c| c.text())
        .map(|t| t.trim().to_string())
}
