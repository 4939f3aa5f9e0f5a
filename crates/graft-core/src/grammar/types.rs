//! Grammar type definitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Complete tree-sitter grammar.
///
/// The start rule is the first entry of `rules`, following tree-sitter's convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Grammar name (e.g., "c", "cpp").
    pub name: String,
    /// Production rules, preserving definition order.
    pub rules: IndexMap<String, Rule>,
    /// Extra/trivia nodes (comments, whitespace).
    #[serde(default)]
    pub extras: Vec<Rule>,
    /// Precedence orderings.
    #[serde(default)]
    pub precedences: Vec<Vec<PrecedenceEntry>>,
    /// Expected conflicts.
    #[serde(default)]
    pub conflicts: Vec<Vec<String>>,
    /// External scanner tokens. Order is the binding order of the host scanner.
    #[serde(default)]
    pub externals: Vec<Rule>,
    /// Rules to inline (hidden).
    #[serde(default)]
    pub inline: Vec<String>,
    /// Supertype rules.
    #[serde(default)]
    pub supertypes: Vec<String>,
    /// Keyword identifier rule.
    #[serde(default)]
    pub word: Option<String>,
    /// Reserved word contexts.
    #[serde(default)]
    pub reserved: IndexMap<String, Vec<Rule>>,
    /// Parent grammar name (for inheritance).
    #[serde(default)]
    pub inherits: Option<String>,
}

impl Grammar {
    /// Empty grammar with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: IndexMap::new(),
            extras: Vec::new(),
            precedences: Vec::new(),
            conflicts: Vec::new(),
            externals: Vec::new(),
            inline: Vec::new(),
            supertypes: Vec::new(),
            word: None,
            reserved: IndexMap::new(),
            inherits: None,
        }
    }

    /// Name of the start rule (the first rule).
    pub fn start_rule(&self) -> Option<&str> {
        self.rules.keys().next().map(String::as_str)
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// External token names in declaration order.
    ///
    /// Externals declared as something other than a symbol or string (rare in practice)
    /// are skipped.
    pub fn external_names(&self) -> impl Iterator<Item = &str> {
        self.externals.iter().filter_map(|rule| match rule {
            Rule::Symbol(name) | Rule::String(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Whether `name` is a rule or an external token.
    pub fn defines(&self, name: &str) -> bool {
        self.rules.contains_key(name) || self.external_names().any(|ext| ext == name)
    }

    /// Named precedence levels mentioned in `precedences` orderings.
    pub fn ordered_precedence_names(&self) -> impl Iterator<Item = &str> {
        self.precedences
            .iter()
            .flatten()
            .filter_map(|entry| match entry {
                PrecedenceEntry::Name(name) => Some(name.as_str()),
                PrecedenceEntry::Symbol(_) => None,
            })
    }
}

/// Grammar rule variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// Epsilon (empty match). Inside a field it is the empty placeholder.
    Blank,
    /// Literal token.
    String(String),
    /// Regex token.
    Pattern {
        value: String,
        #[serde(default)]
        flags: Option<String>,
    },
    /// Reference to another rule.
    Symbol(String),
    /// Sequence of rules (must match in order).
    Seq(Vec<Rule>),
    /// Alternation.
    Choice(Vec<Rule>),
    /// Zero or more repetitions.
    Repeat(Box<Rule>),
    /// One or more repetitions.
    Repeat1(Box<Rule>),
    /// Named field.
    Field { name: String, content: Box<Rule> },
    /// Rename node.
    Alias {
        content: Box<Rule>,
        value: String,
        named: bool,
    },
    /// Force tokenization.
    Token(Box<Rule>),
    /// Immediate tokenization.
    ImmediateToken(Box<Rule>),
    /// Precedence.
    Prec {
        value: Precedence,
        content: Box<Rule>,
    },
    /// Left-associative precedence.
    PrecLeft {
        value: Precedence,
        content: Box<Rule>,
    },
    /// Right-associative precedence.
    PrecRight {
        value: Precedence,
        content: Box<Rule>,
    },
    /// Dynamic precedence, used by the runtime to rank complete parses.
    ///
    /// A named value refers to a level and only exists before assembly.
    PrecDynamic {
        value: Precedence,
        content: Box<Rule>,
    },
    /// Reserved word context.
    Reserved {
        context_name: String,
        content: Box<Rule>,
    },
}

/// Precedence value (numeric or named).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precedence {
    Integer(i32),
    Name(String),
}

/// Entry in precedence ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrecedenceEntry {
    /// Named precedence level.
    Name(String),
    /// Symbol reference.
    Symbol(String),
}

impl Rule {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn pattern(value: impl Into<String>) -> Self {
        Self::Pattern {
            value: value.into(),
            flags: None,
        }
    }

    /// `choice(rule, blank())`.
    pub fn optional(rule: Rule) -> Self {
        Self::Choice(vec![rule, Self::Blank])
    }

    pub fn field(name: impl Into<String>, content: Rule) -> Self {
        Self::Field {
            name: name.into(),
            content: Box::new(content),
        }
    }

    /// The optional content if this is `choice(x, blank())`.
    pub fn as_optional(&self) -> Option<&Rule> {
        match self {
            Self::Choice(members) if members.len() == 2 && members[1] == Self::Blank => {
                Some(&members[0])
            }
            _ => None,
        }
    }

    /// Direct children in pre-order traversal order.
    pub fn children(&self) -> &[Rule] {
        match self {
            Self::Blank | Self::String(_) | Self::Pattern { .. } | Self::Symbol(_) => &[],
            Self::Seq(members) | Self::Choice(members) => members,
            Self::Repeat(content)
            | Self::Repeat1(content)
            | Self::Field { content, .. }
            | Self::Alias { content, .. }
            | Self::Token(content)
            | Self::ImmediateToken(content)
            | Self::Prec { content, .. }
            | Self::PrecLeft { content, .. }
            | Self::PrecRight { content, .. }
            | Self::PrecDynamic { content, .. }
            | Self::Reserved { content, .. } => std::slice::from_ref(content),
        }
    }

    /// Visit every node in pre-order. The index is the node's pre-order position,
    /// which is also the span index produced by [`render_rule`](super::render_rule).
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(usize, &'a Rule)) {
        fn go<'a>(rule: &'a Rule, next: &mut usize, f: &mut impl FnMut(usize, &'a Rule)) {
            f(*next, rule);
            *next += 1;
            for child in rule.children() {
                go(child, next, f);
            }
        }
        let mut next = 0;
        go(self, &mut next, f);
    }

    /// Rebuild the rule bottom-up, applying `f` to every node after its children.
    pub fn map(self, f: &mut impl FnMut(Rule) -> Rule) -> Rule {
        let mapped = match self {
            Self::Seq(members) => Self::Seq(members.into_iter().map(|m| m.map(f)).collect()),
            Self::Choice(members) => {
                Self::Choice(members.into_iter().map(|m| m.map(f)).collect())
            }
            Self::Repeat(content) => Self::Repeat(Box::new(content.map(f))),
            Self::Repeat1(content) => Self::Repeat1(Box::new(content.map(f))),
            Self::Field { name, content } => Self::Field {
                name,
                content: Box::new(content.map(f)),
            },
            Self::Alias {
                content,
                value,
                named,
            } => Self::Alias {
                content: Box::new(content.map(f)),
                value,
                named,
            },
            Self::Token(content) => Self::Token(Box::new(content.map(f))),
            Self::ImmediateToken(content) => Self::ImmediateToken(Box::new(content.map(f))),
            Self::Prec { value, content } => Self::Prec {
                value,
                content: Box::new(content.map(f)),
            },
            Self::PrecLeft { value, content } => Self::PrecLeft {
                value,
                content: Box::new(content.map(f)),
            },
            Self::PrecRight { value, content } => Self::PrecRight {
                value,
                content: Box::new(content.map(f)),
            },
            Self::PrecDynamic { value, content } => Self::PrecDynamic {
                value,
                content: Box::new(content.map(f)),
            },
            Self::Reserved {
                context_name,
                content,
            } => Self::Reserved {
                context_name,
                content: Box::new(content.map(f)),
            },
            leaf => leaf,
        };
        f(mapped)
    }

    /// Referenced rule names, in first-occurrence order, deduplicated.
    pub fn symbols(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        self.walk(&mut |_, rule| {
            if let Rule::Symbol(name) = rule
                && !out.contains(&name.as_str())
            {
                out.push(name);
            }
        });
        out
    }

    /// Number of nodes in the rule tree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }
}

impl From<&str> for Rule {
    /// String literals become `STRING` rules.
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

/// Hidden rules (leading underscore) never materialize their own node.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('_')
}
