//! JSON reading and writing for grammar.json files.
//!
//! Tree-sitter's grammar.json uses internally-tagged enums with a `type` field.
//! Writing goes through the same raw structures, so a grammar read from JSON and
//! written back keeps every field.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::{Grammar, Precedence, PrecedenceEntry, Rule};

/// Error during grammar parsing.
#[derive(Debug)]
pub enum GrammarError {
    Json(serde_json::Error),
    Binary(postcard::Error),
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary decode error: {e}"),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
        }
    }
}

impl Grammar {
    /// Parse grammar from JSON string.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw: RawGrammar = serde_json::from_str(json).map_err(GrammarError::Json)?;
        Ok(raw.into())
    }

    /// Parse grammar from JSON bytes. Invalid UTF-8 is an error.
    pub fn from_json_slice(json: &[u8]) -> Result<Self, GrammarError> {
        let raw: RawGrammar = serde_json::from_slice(json).map_err(GrammarError::Json)?;
        Ok(raw.into())
    }

    /// Serialize to tree-sitter's compact grammar.json form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&RawGrammar::from(self)).expect("grammar is always valid JSON")
    }

    /// Serialize to indented grammar.json, as written next to a parser's sources.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&RawGrammar::from(self))
            .expect("grammar is always valid JSON")
    }
}

/// Raw grammar structure matching tree-sitter's JSON format.
#[derive(Debug, Serialize, Deserialize)]
struct RawGrammar {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inherits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    word: Option<String>,
    rules: IndexMap<String, RawRule>,
    #[serde(default)]
    extras: Vec<RawRule>,
    #[serde(default)]
    conflicts: Vec<Vec<String>>,
    #[serde(default)]
    precedences: Vec<Vec<RawPrecedenceEntry>>,
    #[serde(default)]
    externals: Vec<RawRule>,
    #[serde(default, rename = "inline")]
    inline_rules: Vec<String>,
    #[serde(default)]
    supertypes: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    reserved: IndexMap<String, Vec<RawRule>>,
}

impl From<RawGrammar> for Grammar {
    fn from(raw: RawGrammar) -> Self {
        // IndexMap preserves insertion order, which matches tree-sitter's definition order.
        // The entry rule is always first.
        Self {
            name: raw.name,
            rules: raw.rules.into_iter().map(|(k, v)| (k, v.into())).collect(),
            extras: raw.extras.into_iter().map(Into::into).collect(),
            precedences: raw
                .precedences
                .into_iter()
                .map(|v| v.into_iter().map(Into::into).collect())
                .collect(),
            conflicts: raw.conflicts,
            externals: raw.externals.into_iter().map(Into::into).collect(),
            inline: raw.inline_rules,
            supertypes: raw.supertypes,
            word: raw.word,
            reserved: raw
                .reserved
                .into_iter()
                .map(|(k, v)| (k, v.into_iter().map(Into::into).collect()))
                .collect(),
            inherits: raw.inherits,
        }
    }
}

impl From<&Grammar> for RawGrammar {
    fn from(grammar: &Grammar) -> Self {
        Self {
            name: grammar.name.clone(),
            inherits: grammar.inherits.clone(),
            word: grammar.word.clone(),
            rules: grammar
                .rules
                .iter()
                .map(|(k, v)| (k.clone(), v.into()))
                .collect(),
            extras: grammar.extras.iter().map(Into::into).collect(),
            conflicts: grammar.conflicts.clone(),
            precedences: grammar
                .precedences
                .iter()
                .map(|v| v.iter().map(Into::into).collect())
                .collect(),
            externals: grammar.externals.iter().map(Into::into).collect(),
            inline_rules: grammar.inline.clone(),
            supertypes: grammar.supertypes.clone(),
            reserved: grammar
                .reserved
                .iter()
                .map(|(k, v)| (k.clone(), v.iter().map(Into::into).collect()))
                .collect(),
        }
    }
}

/// Raw rule matching tree-sitter's JSON format.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
enum RawRule {
    BLANK,
    STRING {
        value: String,
    },
    PATTERN {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flags: Option<String>,
    },
    SYMBOL {
        name: String,
    },
    SEQ {
        members: Vec<RawRule>,
    },
    CHOICE {
        members: Vec<RawRule>,
    },
    REPEAT {
        content: Box<RawRule>,
    },
    REPEAT1 {
        content: Box<RawRule>,
    },
    FIELD {
        name: String,
        content: Box<RawRule>,
    },
    ALIAS {
        content: Box<RawRule>,
        value: String,
        named: bool,
    },
    TOKEN {
        content: Box<RawRule>,
    },
    IMMEDIATE_TOKEN {
        content: Box<RawRule>,
    },
    PREC {
        value: RawPrecedence,
        content: Box<RawRule>,
    },
    PREC_LEFT {
        value: RawPrecedence,
        content: Box<RawRule>,
    },
    PREC_RIGHT {
        value: RawPrecedence,
        content: Box<RawRule>,
    },
    PREC_DYNAMIC {
        value: RawPrecedence,
        content: Box<RawRule>,
    },
    RESERVED {
        context_name: String,
        content: Box<RawRule>,
    },
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        #[allow(clippy::boxed_local)] // Fields are Box<RawRule>, output needs Box<Rule>
        fn conv(content: Box<RawRule>) -> Box<Rule> {
            Box::new(Rule::from(*content))
        }

        match raw {
            RawRule::BLANK => Rule::Blank,
            RawRule::STRING { value } => Rule::String(value),
            RawRule::PATTERN { value, flags } => Rule::Pattern { value, flags },
            RawRule::SYMBOL { name } => Rule::Symbol(name),
            RawRule::SEQ { members } => Rule::Seq(members.into_iter().map(Into::into).collect()),
            RawRule::CHOICE { members } => {
                Rule::Choice(members.into_iter().map(Into::into).collect())
            }
            RawRule::REPEAT { content } => Rule::Repeat(conv(content)),
            RawRule::REPEAT1 { content } => Rule::Repeat1(conv(content)),
            RawRule::FIELD { name, content } => Rule::Field {
                name,
                content: conv(content),
            },
            RawRule::ALIAS {
                content,
                value,
                named,
            } => Rule::Alias {
                content: conv(content),
                value,
                named,
            },
            RawRule::TOKEN { content } => Rule::Token(conv(content)),
            RawRule::IMMEDIATE_TOKEN { content } => Rule::ImmediateToken(conv(content)),
            RawRule::PREC { value, content } => Rule::Prec {
                value: value.into(),
                content: conv(content),
            },
            RawRule::PREC_LEFT { value, content } => Rule::PrecLeft {
                value: value.into(),
                content: conv(content),
            },
            RawRule::PREC_RIGHT { value, content } => Rule::PrecRight {
                value: value.into(),
                content: conv(content),
            },
            RawRule::PREC_DYNAMIC { value, content } => Rule::PrecDynamic {
                value: value.into(),
                content: conv(content),
            },
            RawRule::RESERVED {
                context_name,
                content,
            } => Rule::Reserved {
                context_name,
                content: conv(content),
            },
        }
    }
}

impl From<&Rule> for RawRule {
    fn from(rule: &Rule) -> Self {
        fn conv(content: &Rule) -> Box<RawRule> {
            Box::new(RawRule::from(content))
        }

        match rule {
            Rule::Blank => RawRule::BLANK,
            Rule::String(value) => RawRule::STRING {
                value: value.clone(),
            },
            Rule::Pattern { value, flags } => RawRule::PATTERN {
                value: value.clone(),
                flags: flags.clone(),
            },
            Rule::Symbol(name) => RawRule::SYMBOL { name: name.clone() },
            Rule::Seq(members) => RawRule::SEQ {
                members: members.iter().map(Into::into).collect(),
            },
            Rule::Choice(members) => RawRule::CHOICE {
                members: members.iter().map(Into::into).collect(),
            },
            Rule::Repeat(content) => RawRule::REPEAT {
                content: conv(content),
            },
            Rule::Repeat1(content) => RawRule::REPEAT1 {
                content: conv(content),
            },
            Rule::Field { name, content } => RawRule::FIELD {
                name: name.clone(),
                content: conv(content),
            },
            Rule::Alias {
                content,
                value,
                named,
            } => RawRule::ALIAS {
                content: conv(content),
                value: value.clone(),
                named: *named,
            },
            Rule::Token(content) => RawRule::TOKEN {
                content: conv(content),
            },
            Rule::ImmediateToken(content) => RawRule::IMMEDIATE_TOKEN {
                content: conv(content),
            },
            Rule::Prec { value, content } => RawRule::PREC {
                value: value.into(),
                content: conv(content),
            },
            Rule::PrecLeft { value, content } => RawRule::PREC_LEFT {
                value: value.into(),
                content: conv(content),
            },
            Rule::PrecRight { value, content } => RawRule::PREC_RIGHT {
                value: value.into(),
                content: conv(content),
            },
            Rule::PrecDynamic { value, content } => RawRule::PREC_DYNAMIC {
                value: value.into(),
                content: conv(content),
            },
            Rule::Reserved {
                context_name,
                content,
            } => RawRule::RESERVED {
                context_name: context_name.clone(),
                content: conv(content),
            },
        }
    }
}

/// Raw precedence value (can be integer or string).
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPrecedence {
    Integer(i32),
    Name(String),
}

impl From<RawPrecedence> for Precedence {
    fn from(raw: RawPrecedence) -> Self {
        match raw {
            RawPrecedence::Integer(n) => Precedence::Integer(n),
            RawPrecedence::Name(s) => Precedence::Name(s),
        }
    }
}

impl From<&Precedence> for RawPrecedence {
    fn from(value: &Precedence) -> Self {
        match value {
            Precedence::Integer(n) => RawPrecedence::Integer(*n),
            Precedence::Name(s) => RawPrecedence::Name(s.clone()),
        }
    }
}

/// Raw precedence entry (STRING or SYMBOL).
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
#[allow(clippy::upper_case_acronyms)]
enum RawPrecedenceEntry {
    STRING { value: String },
    SYMBOL { name: String },
}

impl From<RawPrecedenceEntry> for PrecedenceEntry {
    fn from(raw: RawPrecedenceEntry) -> Self {
        match raw {
            RawPrecedenceEntry::STRING { value } => PrecedenceEntry::Name(value),
            RawPrecedenceEntry::SYMBOL { name } => PrecedenceEntry::Symbol(name),
        }
    }
}

impl From<&PrecedenceEntry> for RawPrecedenceEntry {
    fn from(entry: &PrecedenceEntry) -> Self {
        match entry {
            PrecedenceEntry::Name(value) => RawPrecedenceEntry::STRING {
                value: value.clone(),
            },
            PrecedenceEntry::Symbol(name) => RawPrecedenceEntry::SYMBOL { name: name.clone() },
        }
    }
}
