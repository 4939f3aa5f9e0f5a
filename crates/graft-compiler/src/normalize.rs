//! Placeholder fields.
//!
//! An optional child written with [`optional_field`] is a choice between the field
//! holding real content and the same field holding nothing. Either way the node
//! carries the field, so consumers check whether a field is empty instead of
//! whether it exists.

use indexmap::IndexSet;

use graft_core::Rule;

/// Prefix of literals that no input can contain.
pub const UNMATCHABLE_PREFIX: &str = "!!UNMATCHABLE_";

/// `choice(field(name, rule), field(name, blank()))`.
pub fn optional_field(name: &str, rule: impl Into<Rule>) -> Rule {
    Rule::Choice(vec![Rule::field(name, rule.into()), Rule::field(name, Rule::Blank)])
}

/// A field that exists on every node and is always empty.
///
/// Reserves a slot in the node shape for content the grammar does not parse yet.
pub fn reserved_field(name: &str) -> Rule {
    optional_field(name, unmatchable(name))
}

/// Literal that cannot occur in source text, tagged by `seed`.
pub fn unmatchable(seed: &str) -> Rule {
    Rule::String(format!(
        "{UNMATCHABLE_PREFIX}{:08x}",
        crc32fast::hash(seed.as_bytes())
    ))
}

pub fn is_unmatchable(rule: &Rule) -> bool {
    matches!(rule, Rule::String(value) if value.starts_with(UNMATCHABLE_PREFIX))
}

/// Field name of a placeholder choice built by [`optional_field`].
pub fn is_placeholder_choice(rule: &Rule) -> Option<&str> {
    let Rule::Choice(members) = rule else {
        return None;
    };
    let [Rule::Field { name, .. }, Rule::Field { name: empty, content }] = members.as_slice()
    else {
        return None;
    };
    (name == empty && **content == Rule::Blank).then_some(name.as_str())
}

/// Field names a rule produces, over all of its alternatives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldShape {
    /// Present on every match.
    pub always: IndexSet<String>,
    /// Present on some matches only.
    pub sometimes: IndexSet<String>,
}

impl FieldShape {
    pub fn is_uniform(&self) -> bool {
        self.sometimes.is_empty()
    }

    fn all(&self) -> IndexSet<String> {
        self.always.union(&self.sometimes).cloned().collect()
    }
}

/// Compute the field shape of a rule body.
///
/// Only fields written in the body itself are counted; referenced rules
/// produce their own nodes.
pub fn field_shape(rule: &Rule) -> FieldShape {
    match rule {
        Rule::Blank
        | Rule::String(_)
        | Rule::Pattern { .. }
        | Rule::Symbol(_)
        | Rule::Token(_)
        | Rule::ImmediateToken(_) => FieldShape::default(),

        Rule::Field { name, content } => {
            let mut shape = field_shape(content);
            shape.sometimes.shift_remove(name);
            shape.always.insert(name.clone());
            shape
        }

        Rule::Seq(members) => {
            let mut shape = FieldShape::default();
            for member in members {
                let inner = field_shape(member);
                shape.always.extend(inner.always);
                shape.sometimes.extend(inner.sometimes);
            }
            shape.sometimes.retain(|name| !shape.always.contains(name));
            shape
        }

        Rule::Choice(members) => {
            let shapes: Vec<FieldShape> = members.iter().map(field_shape).collect();
            let mut all = IndexSet::new();
            for shape in &shapes {
                all.extend(shape.all());
            }
            let always: IndexSet<String> = all
                .iter()
                .filter(|name| shapes.iter().all(|s| s.always.contains(*name)))
                .cloned()
                .collect();
            let sometimes = all.into_iter().filter(|name| !always.contains(name)).collect();
            FieldShape { always, sometimes }
        }

        // A repeated field is a list and counts as present when empty.
        Rule::Repeat(content) => FieldShape {
            always: field_shape(content).all(),
            sometimes: IndexSet::new(),
        },

        Rule::Repeat1(content)
        | Rule::Alias { content, .. }
        | Rule::Prec { content, .. }
        | Rule::PrecLeft { content, .. }
        | Rule::PrecRight { content, .. }
        | Rule::PrecDynamic { content, .. }
        | Rule::Reserved { content, .. } => field_shape(content),
    }
}

/// Whether the rule contains at least one placeholder choice.
pub fn uses_placeholders(rule: &Rule) -> bool {
    let mut found = false;
    rule.walk(&mut |_, node| found |= is_placeholder_choice(node).is_some());
    found
}
