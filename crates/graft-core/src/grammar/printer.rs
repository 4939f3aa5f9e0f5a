//! DSL-style rendering of rules.
//!
//! Rules print the way they are written in a tree-sitter `grammar.js`:
//! `seq("if", field("condition", $.condition_clause))`. The renderer also records
//! the byte span of every node, indexed in pre-order (the same order as
//! [`Rule::walk`]), so diagnostics can underline a sub-rule inside the text.

use std::fmt;
use std::ops::Range;

use super::types::{Precedence, Rule};

/// Printed rule text with one span per rule node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRule {
    pub text: String,
    /// Byte range of each node, by pre-order index.
    pub spans: Vec<Range<usize>>,
}

impl RenderedRule {
    /// Span of the node at pre-order index `node`, if it exists.
    pub fn span(&self, node: usize) -> Option<Range<usize>> {
        self.spans.get(node).cloned()
    }
}

pub fn render_rule(rule: &Rule) -> RenderedRule {
    let mut renderer = Renderer {
        text: String::new(),
        spans: Vec::with_capacity(rule.node_count()),
    };
    renderer.rule(rule);
    RenderedRule {
        text: renderer.text,
        spans: renderer.spans,
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_rule(self).text)
    }
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

struct Renderer {
    text: String,
    spans: Vec<Range<usize>>,
}

impl Renderer {
    fn rule(&mut self, rule: &Rule) {
        let index = self.spans.len();
        let start = self.text.len();
        self.spans.push(start..start);

        match rule {
            Rule::Blank => self.text.push_str("blank()"),
            Rule::String(value) => self.quoted(value),
            Rule::Pattern { value, flags } => {
                self.text.push('/');
                self.text.push_str(value);
                self.text.push('/');
                if let Some(flags) = flags {
                    self.text.push_str(flags);
                }
            }
            Rule::Symbol(name) => {
                self.text.push_str("$.");
                self.text.push_str(name);
            }
            Rule::Seq(members) => self.call("seq", members),
            Rule::Choice(members) => match rule.as_optional() {
                Some(content) => {
                    self.text.push_str("optional(");
                    self.rule(content);
                    // The blank arm is not printed; it gets an empty span after its sibling.
                    let end = self.text.len();
                    self.spans.push(end..end);
                    self.text.push(')');
                }
                None => self.call("choice", members),
            },
            Rule::Repeat(content) => self.call("repeat", std::slice::from_ref(content)),
            Rule::Repeat1(content) => self.call("repeat1", std::slice::from_ref(content)),
            Rule::Field { name, content } => {
                self.text.push_str("field(");
                self.quoted(name);
                self.text.push_str(", ");
                self.rule(content);
                self.text.push(')');
            }
            Rule::Alias {
                content,
                value,
                named,
            } => {
                self.text.push_str("alias(");
                self.rule(content);
                self.text.push_str(", ");
                if *named {
                    self.text.push_str("$.");
                    self.text.push_str(value);
                } else {
                    self.quoted(value);
                }
                self.text.push(')');
            }
            Rule::Token(content) => self.call("token", std::slice::from_ref(content)),
            Rule::ImmediateToken(content) => {
                self.call("token.immediate", std::slice::from_ref(content))
            }
            Rule::Prec { value, content } => self.prec("prec", value, content),
            Rule::PrecLeft { value, content } => self.prec("prec.left", value, content),
            Rule::PrecRight { value, content } => self.prec("prec.right", value, content),
            Rule::PrecDynamic { value, content } => self.prec("prec.dynamic", value, content),
            Rule::Reserved {
                context_name,
                content,
            } => {
                self.text.push_str("reserved(");
                self.quoted(context_name);
                self.text.push_str(", ");
                self.rule(content);
                self.text.push(')');
            }
        }

        self.spans[index] = start..self.text.len();
    }

    fn call(&mut self, func: &str, args: &[Rule]) {
        self.text.push_str(func);
        self.text.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.text.push_str(", ");
            }
            self.rule(arg);
        }
        self.text.push(')');
    }

    fn prec(&mut self, func: &str, value: &Precedence, content: &Rule) {
        self.text.push_str(func);
        self.text.push('(');
        self.text.push_str(&value.to_string());
        self.text.push_str(", ");
        self.rule(content);
        self.text.push(')');
    }

    fn quoted(&mut self, value: &str) {
        self.text.push_str(&format!("{value:?}"));
    }
}
