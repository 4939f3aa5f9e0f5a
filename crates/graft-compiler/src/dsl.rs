//! Rule constructors named after the tree-sitter grammar DSL.
//!
//! ```
//! use graft_compiler::dsl::*;
//! use graft_compiler::seq;
//!
//! let rule = seq!["decltype", "(", field("argument", sym("expression")), ")"];
//! assert_eq!(rule.to_string(), r#"seq("decltype", "(", field("argument", $.expression), ")")"#);
//! ```

use graft_core::{Precedence, Rule};

/// `seq(a, b, ...)` with literals and rules mixed freely.
#[macro_export]
macro_rules! seq {
    ($($x:expr),+ $(,)?) => {
        $crate::Rule::Seq(vec![$($crate::Rule::from($x)),+])
    };
}

/// `choice(a, b, ...)` with literals and rules mixed freely.
#[macro_export]
macro_rules! choice {
    ($($x:expr),+ $(,)?) => {
        $crate::Rule::Choice(vec![$($crate::Rule::from($x)),+])
    };
}

pub fn blank() -> Rule {
    Rule::Blank
}

pub fn sym(name: &str) -> Rule {
    Rule::symbol(name)
}

pub fn pat(value: &str) -> Rule {
    Rule::pattern(value)
}

/// Pattern with JavaScript regex flags, e.g. `"i"`.
pub fn pat_flags(value: &str, flags: &str) -> Rule {
    Rule::Pattern {
        value: value.to_owned(),
        flags: Some(flags.to_owned()),
    }
}

pub fn seq(members: impl IntoIterator<Item = Rule>) -> Rule {
    Rule::Seq(members.into_iter().collect())
}

pub fn choice(members: impl IntoIterator<Item = Rule>) -> Rule {
    Rule::Choice(members.into_iter().collect())
}

pub fn optional(rule: impl Into<Rule>) -> Rule {
    Rule::optional(rule.into())
}

pub fn repeat(rule: impl Into<Rule>) -> Rule {
    Rule::Repeat(Box::new(rule.into()))
}

pub fn repeat1(rule: impl Into<Rule>) -> Rule {
    Rule::Repeat1(Box::new(rule.into()))
}

pub fn field(name: &str, rule: impl Into<Rule>) -> Rule {
    Rule::field(name, rule.into())
}

/// `alias(rule, $.name)`: the node is renamed to a named node.
pub fn alias_sym(rule: impl Into<Rule>, name: &str) -> Rule {
    Rule::Alias {
        content: Box::new(rule.into()),
        value: name.to_owned(),
        named: true,
    }
}

/// `alias(rule, "text")`: the node becomes anonymous.
pub fn alias_lit(rule: impl Into<Rule>, text: &str) -> Rule {
    Rule::Alias {
        content: Box::new(rule.into()),
        value: text.to_owned(),
        named: false,
    }
}

pub fn token(rule: impl Into<Rule>) -> Rule {
    Rule::Token(Box::new(rule.into()))
}

/// `token.immediate(rule)`.
pub fn immediate(rule: impl Into<Rule>) -> Rule {
    Rule::ImmediateToken(Box::new(rule.into()))
}

pub fn prec(value: i32, rule: impl Into<Rule>) -> Rule {
    Rule::Prec {
        value: Precedence::Integer(value),
        content: Box::new(rule.into()),
    }
}

pub fn prec_left(value: i32, rule: impl Into<Rule>) -> Rule {
    Rule::PrecLeft {
        value: Precedence::Integer(value),
        content: Box::new(rule.into()),
    }
}

pub fn prec_right(value: i32, rule: impl Into<Rule>) -> Rule {
    Rule::PrecRight {
        value: Precedence::Integer(value),
        content: Box::new(rule.into()),
    }
}

pub fn prec_dynamic(value: i32, rule: impl Into<Rule>) -> Rule {
    Rule::PrecDynamic {
        value: Precedence::Integer(value),
        content: Box::new(rule.into()),
    }
}

/// `prec(PREC.NAME, rule)`, resolved against the precedence table at assembly.
pub fn prec_level(level: &str, rule: impl Into<Rule>) -> Rule {
    Rule::Prec {
        value: Precedence::Name(level.to_owned()),
        content: Box::new(rule.into()),
    }
}

pub fn prec_left_level(level: &str, rule: impl Into<Rule>) -> Rule {
    Rule::PrecLeft {
        value: Precedence::Name(level.to_owned()),
        content: Box::new(rule.into()),
    }
}

pub fn prec_right_level(level: &str, rule: impl Into<Rule>) -> Rule {
    Rule::PrecRight {
        value: Precedence::Name(level.to_owned()),
        content: Box::new(rule.into()),
    }
}

/// `prec.dynamic(PREC.NAME, rule)`, resolved to the level's number at assembly.
pub fn prec_dynamic_level(level: &str, rule: impl Into<Rule>) -> Rule {
    Rule::PrecDynamic {
        value: Precedence::Name(level.to_owned()),
        content: Box::new(rule.into()),
    }
}

/// `seq(rule, repeat(seq(",", rule)))`.
pub fn comma_sep1(rule: impl Into<Rule>) -> Rule {
    let rule = rule.into();
    Rule::Seq(vec![rule.clone(), repeat(Rule::Seq(vec![",".into(), rule]))])
}

/// `optional(comma_sep1(rule))`.
pub fn comma_sep(rule: impl Into<Rule>) -> Rule {
    optional(comma_sep1(rule))
}
