//! Places in a grammar that mention rule names.

use std::fmt;

use graft_core::{Grammar, PrecedenceEntry, Rule};

/// Where a reference occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefSite<'g> {
    /// Node `node` (pre-order index) of rule `rule`.
    Rule { rule: &'g str, node: usize },
    Extras,
    Conflicts,
    Inline,
    Supertypes,
    Word,
    Precedences,
    Reserved(&'g str),
}

impl fmt::Display for RefSite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule { rule, .. } => write!(f, "rules.{rule}"),
            Self::Extras => f.write_str("extras"),
            Self::Conflicts => f.write_str("conflicts"),
            Self::Inline => f.write_str("inline"),
            Self::Supertypes => f.write_str("supertypes"),
            Self::Word => f.write_str("word"),
            Self::Precedences => f.write_str("precedences"),
            Self::Reserved(context) => write!(f, "reserved.{context}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'g> {
    pub name: &'g str,
    pub site: RefSite<'g>,
}

/// Every rule name mentioned anywhere in the grammar, in grammar order.
pub fn references(grammar: &Grammar) -> Vec<Reference<'_>> {
    let mut out = Vec::new();

    for (rule_name, rule) in &grammar.rules {
        rule.walk(&mut |node, r| {
            if let Rule::Symbol(name) = r {
                out.push(Reference {
                    name,
                    site: RefSite::Rule {
                        rule: rule_name,
                        node,
                    },
                });
            }
        });
    }

    for extra in &grammar.extras {
        push_symbols(&mut out, extra, RefSite::Extras);
    }
    for name in grammar.conflicts.iter().flatten() {
        out.push(Reference {
            name,
            site: RefSite::Conflicts,
        });
    }
    for name in &grammar.inline {
        out.push(Reference {
            name,
            site: RefSite::Inline,
        });
    }
    for name in &grammar.supertypes {
        out.push(Reference {
            name,
            site: RefSite::Supertypes,
        });
    }
    if let Some(name) = &grammar.word {
        out.push(Reference {
            name,
            site: RefSite::Word,
        });
    }
    for entry in grammar.precedences.iter().flatten() {
        if let PrecedenceEntry::Symbol(name) = entry {
            out.push(Reference {
                name,
                site: RefSite::Precedences,
            });
        }
    }
    for (context, words) in &grammar.reserved {
        for word in words {
            push_symbols(&mut out, word, RefSite::Reserved(context));
        }
    }

    out
}

fn push_symbols<'g>(out: &mut Vec<Reference<'g>>, rule: &'g Rule, site: RefSite<'g>) {
    for name in rule.symbols() {
        out.push(Reference { name, site });
    }
}

/// Rule names referenced from outside rule bodies. These keep a rule alive
/// even when no other rule mentions it.
pub fn grammar_level_names(grammar: &Grammar) -> Vec<&str> {
    references(grammar)
        .into_iter()
        .filter(|r| !matches!(r.site, RefSite::Rule { .. }))
        .map(|r| r.name)
        .collect()
}
