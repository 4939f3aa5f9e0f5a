//! Test fixtures and a sketch recognizer for assembled grammars.
//!
//! [`SketchParser`] is a plain backtracking recognizer. It enumerates every
//! complete parse of a small input, builds trees with fields and placeholders
//! the way the generated parser would, and uses dynamic precedence to pick
//! among them. Left recursion is cut off, so fixture grammars avoid it.

use std::collections::HashMap;
use std::fmt::Write;

use indexmap::IndexMap;
use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};

use graft_core::{Grammar, Precedence, Rule, is_hidden_name};

use crate::analyze::patterns;
use crate::base::BaseGrammar;
use crate::diagnostics::Diagnostics;
use crate::dsl::*;
use crate::precedence::PrecedenceTable;

/// Grammar with rules in the given order.
pub fn grammar(name: &str, rules: Vec<(&str, Rule)>) -> Grammar {
    let mut grammar = Grammar::new(name);
    grammar.rules = rules
        .into_iter()
        .map(|(n, r)| (n.to_owned(), r))
        .collect::<IndexMap<_, _>>();
    grammar
}

/// Small C-like base: declarations, an `if` statement and expressions.
pub fn mini_c() -> BaseGrammar {
    let mut g = grammar(
        "mini_c",
        vec![
            ("translation_unit", repeat(sym("_top_level_item"))),
            (
                "_top_level_item",
                choice([sym("declaration"), sym("_statement")]),
            ),
            (
                "declaration",
                seq([
                    field("type", sym("type_specifier")),
                    field("declarator", sym("identifier")),
                    ";".into(),
                ]),
            ),
            (
                "type_specifier",
                choice([sym("primitive_type"), sym("type_identifier")]),
            ),
            ("primitive_type", token(choice(["int", "char"].map(Rule::from)))),
            ("type_identifier", pat("[A-Z][A-Za-z0-9_]*")),
            (
                "_statement",
                choice([sym("if_statement"), sym("expression_statement")]),
            ),
            (
                "if_statement",
                seq([
                    "if".into(),
                    field("condition", sym("condition_clause")),
                    field("consequence", sym("_statement")),
                ]),
            ),
            (
                "condition_clause",
                seq(["(".into(), field("value", sym("expression")), ")".into()]),
            ),
            ("expression_statement", seq([sym("expression"), ";".into()])),
            (
                "expression",
                choice([
                    sym("identifier"),
                    sym("number_literal"),
                    sym("binary_expression"),
                ]),
            ),
            (
                "binary_expression",
                prec_left(
                    10,
                    seq([
                        field("left", sym("number_literal")),
                        field("operator", "+"),
                        field("right", sym("expression")),
                    ]),
                ),
            ),
            ("number_literal", pat("[0-9]+")),
            ("identifier", pat("[a-z_][a-z0-9_]*")),
        ],
    );
    g.extras = vec![pat("\\s")];
    g.conflicts = vec![vec!["type_specifier".into(), "expression".into()]];
    g.word = Some("identifier".into());
    BaseGrammar::new(g).with_precedence(PrecedenceTable::from_levels([
        ("ASSIGNMENT", -2),
        ("ADD", 10),
        ("CALL", 14),
    ]))
}

pub fn render(diag: &Diagnostics) -> String {
    diag.printer().render()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: String,
    pub text: String,
    pub children: Vec<Child>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub field: Option<String>,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Node(Node),
    Token(String),
    /// A field that matched nothing.
    Placeholder,
}

impl Node {
    /// First child carrying `name`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.children
            .iter()
            .find(|c| c.field.as_deref() == Some(name))
            .map(|c| &c.value)
    }

    /// Distinct field names, in child order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for child in &self.children {
            if let Some(field) = child.field.as_deref()
                && !names.contains(&field)
            {
                names.push(field);
            }
        }
        names
    }

    /// S-expression with fields. Unfielded tokens are left out.
    pub fn sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        out.push_str(&self.kind);
        for child in &self.children {
            if child.field.is_none() && matches!(child.value, Value::Token(_)) {
                continue;
            }
            out.push(' ');
            if let Some(field) = &child.field {
                out.push_str(field);
                out.push_str(": ");
            }
            match &child.value {
                Value::Node(node) => node.write_sexp(out),
                Value::Token(text) => write!(out, "{text:?}").unwrap(),
                Value::Placeholder => out.push_str("()"),
            }
        }
        out.push(')');
    }
}

impl Value {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SketchError {
    NoParse,
    /// Several parses share the best dynamic precedence.
    Ambiguous(usize),
}

#[derive(Debug, Clone)]
struct Partial {
    end: usize,
    children: Vec<Child>,
    score: i32,
}

impl Partial {
    fn empty(pos: usize) -> Self {
        Self {
            end: pos,
            children: Vec::new(),
            score: 0,
        }
    }

    fn join(&self, next: Partial) -> Self {
        let mut children = self.children.clone();
        children.extend(next.children);
        Self {
            end: next.end,
            children,
            score: self.score + next.score,
        }
    }
}

pub struct SketchParser<'g> {
    grammar: &'g Grammar,
    regexes: HashMap<(String, Option<String>), Regex>,
}

impl<'g> SketchParser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            regexes: HashMap::new(),
        }
    }

    /// Parse `input` as rule `start` and return the single best tree.
    pub fn parse(&mut self, start: &str, input: &str) -> Result<Node, SketchError> {
        let mut run = Run {
            parser: self,
            input,
            active: Vec::new(),
        };
        let partials = run.symbol(start, 0, false);
        let end = input.trim_end().len();

        let mut complete: Vec<(Node, i32)> = Vec::new();
        for partial in partials {
            if partial.end != end {
                continue;
            }
            let Some(Child {
                value: Value::Node(node),
                ..
            }) = partial.children.into_iter().next()
            else {
                continue;
            };
            if !complete.iter().any(|(n, _)| *n == node) {
                complete.push((node, partial.score));
            }
        }

        let best = complete
            .iter()
            .map(|(_, score)| *score)
            .max()
            .ok_or(SketchError::NoParse)?;
        let mut winners: Vec<Node> = complete
            .into_iter()
            .filter(|(_, score)| *score == best)
            .map(|(node, _)| node)
            .collect();
        match winners.len() {
            1 => Ok(winners.remove(0)),
            n => Err(SketchError::Ambiguous(n)),
        }
    }

    fn regex(&mut self, value: &str, flags: Option<&str>) -> &Regex {
        self.regexes
            .entry((value.to_owned(), flags.map(str::to_owned)))
            .or_insert_with(|| patterns::compile(value, flags).expect("fixture pattern compiles"))
    }
}

struct Run<'p, 'g, 'i> {
    parser: &'p mut SketchParser<'g>,
    input: &'i str,
    active: Vec<(&'g str, usize)>,
}

impl<'g> Run<'_, 'g, '_> {
    fn skip_ws(&self, pos: usize) -> usize {
        let rest = &self.input[pos..];
        pos + rest.len() - rest.trim_start().len()
    }

    fn start(&self, pos: usize, lexical: bool) -> usize {
        if lexical { pos } else { self.skip_ws(pos) }
    }

    fn rule(&mut self, rule: &'g Rule, pos: usize, lexical: bool) -> Vec<Partial> {
        match rule {
            Rule::Blank => vec![Partial::empty(pos)],
            Rule::String(literal) => {
                let start = self.start(pos, lexical);
                self.literal(literal, start)
                    .map(|end| self.token(start, end))
                    .into_iter()
                    .collect()
            }
            Rule::Pattern { value, flags } => {
                let start = self.start(pos, lexical);
                let input = Input::new(self.input)
                    .range(start..)
                    .anchored(Anchored::Yes);
                let found = self.parser.regex(value, flags.as_deref()).find(input);
                found
                    .filter(|m| m.end() > start)
                    .map(|m| self.token(start, m.end()))
                    .into_iter()
                    .collect()
            }
            Rule::Symbol(name) => self.symbol(name, pos, lexical),
            Rule::Seq(members) => {
                let mut results = vec![Partial::empty(pos)];
                for member in members {
                    let mut next = Vec::new();
                    for partial in &results {
                        for more in self.rule(member, partial.end, lexical) {
                            next.push(partial.join(more));
                        }
                    }
                    results = next;
                    if results.is_empty() {
                        break;
                    }
                }
                results
            }
            Rule::Choice(members) => members
                .iter()
                .flat_map(|m| self.rule(m, pos, lexical))
                .collect(),
            Rule::Repeat(content) => self.repeat(content, pos, lexical, false),
            Rule::Repeat1(content) => self.repeat(content, pos, lexical, true),
            Rule::Field { name, content } => self
                .rule(content, pos, lexical)
                .into_iter()
                .map(|mut partial| {
                    if partial.children.is_empty() {
                        partial.children.push(Child {
                            field: Some(name.clone()),
                            value: Value::Placeholder,
                        });
                    }
                    for child in &mut partial.children {
                        child.field.get_or_insert_with(|| name.clone());
                    }
                    partial
                })
                .collect(),
            Rule::Alias {
                content,
                value,
                named,
            } => {
                let start = self.start(pos, lexical);
                self.rule(content, pos, lexical)
                    .into_iter()
                    .map(|partial| {
                        let text = self.text(start, partial.end);
                        let value = if *named {
                            Value::Node(Node {
                                kind: value.clone(),
                                text,
                                children: unwrap_single_node(partial.children),
                            })
                        } else {
                            Value::Token(value.clone())
                        };
                        Partial {
                            end: partial.end,
                            children: vec![Child { field: None, value }],
                            score: partial.score,
                        }
                    })
                    .collect()
            }
            Rule::Token(content) => {
                let start = self.start(pos, lexical);
                self.lexical_token(content, start)
            }
            Rule::ImmediateToken(content) => self.lexical_token(content, pos),
            Rule::Prec { content, .. }
            | Rule::PrecLeft { content, .. }
            | Rule::PrecRight { content, .. }
            | Rule::Reserved { content, .. } => self.rule(content, pos, lexical),
            Rule::PrecDynamic { value, content } => self
                .rule(content, pos, lexical)
                .into_iter()
                .map(|mut partial| {
                    if let Precedence::Integer(value) = value {
                        partial.score += value;
                    }
                    partial
                })
                .collect(),
        }
    }

    fn symbol(&mut self, name: &str, pos: usize, lexical: bool) -> Vec<Partial> {
        let grammar = self.parser.grammar;
        let Some((name, body)) = grammar.rules.get_key_value(name) else {
            return Vec::new();
        };
        let name = name.as_str();
        if lexical {
            return self.rule(body, pos, true);
        }
        if self.active.contains(&(name, pos)) {
            return Vec::new();
        }

        self.active.push((name, pos));
        let partials = self.rule(body, pos, false);
        self.active.pop();

        if is_hidden_name(name) || grammar.inline.iter().any(|n| n == name) {
            return partials;
        }
        let start = self.skip_ws(pos);
        partials
            .into_iter()
            .map(|partial| {
                let node = Node {
                    kind: name.to_owned(),
                    text: self.text(start, partial.end),
                    children: partial.children,
                };
                Partial {
                    end: partial.end,
                    children: vec![Child {
                        field: None,
                        value: Value::Node(node),
                    }],
                    score: partial.score,
                }
            })
            .collect()
    }

    fn repeat(&mut self, content: &'g Rule, pos: usize, lexical: bool, at_least_one: bool) -> Vec<Partial> {
        let mut out = if at_least_one {
            Vec::new()
        } else {
            vec![Partial::empty(pos)]
        };
        let mut frontier = vec![Partial::empty(pos)];
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for partial in &frontier {
                for more in self.rule(content, partial.end, lexical) {
                    if more.end > partial.end {
                        next.push(partial.join(more));
                    }
                }
            }
            out.extend(next.iter().cloned());
            frontier = next;
        }
        out
    }

    fn lexical_token(&mut self, content: &'g Rule, start: usize) -> Vec<Partial> {
        let mut ends: Vec<Partial> = Vec::new();
        for partial in self.rule(content, start, true) {
            if partial.end > start && !ends.iter().any(|p| p.end == partial.end) {
                ends.push(self.token(start, partial.end));
            }
        }
        ends
    }

    fn literal(&self, literal: &str, start: usize) -> Option<usize> {
        if !self.input[start..].starts_with(literal) {
            return None;
        }
        let end = start + literal.len();
        let is_word = |c: char| c.is_alphanumeric() || c == '_';
        let ends_in_word = literal.chars().next_back().is_some_and(is_word);
        let followed_by_word = self.input[end..].chars().next().is_some_and(is_word);
        (!(ends_in_word && followed_by_word)).then_some(end)
    }

    fn token(&self, start: usize, end: usize) -> Partial {
        Partial {
            end,
            children: vec![Child {
                field: None,
                value: Value::Token(self.input[start..end].to_owned()),
            }],
            score: 0,
        }
    }

    fn text(&self, start: usize, end: usize) -> String {
        if end > start {
            self.input[start..end].to_owned()
        } else {
            String::new()
        }
    }
}

fn unwrap_single_node(children: Vec<Child>) -> Vec<Child> {
    match children.as_slice() {
        [Child {
            field: None,
            value: Value::Node(node),
        }] => node.children.clone(),
        _ => children,
    }
}
