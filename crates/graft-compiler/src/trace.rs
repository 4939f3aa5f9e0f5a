//! Assembly tracing.
//!
//! The assembler reports what it does to a [`Tracer`]. [`NoopTracer`] is the
//! default and compiles away; [`PrintTracer`] collects colored lines for `-v`
//! output on stderr.

use graft_core::{Colors, Rule};

use crate::precedence::{Associativity, LevelSource, PrecedenceLevel};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Overrides, additions and pass results (-v).
    #[default]
    Default,
    /// Also precedence levels, conflicts and external tokens (-vv).
    Verbose,
    /// Also the printed text of every overridden and added rule (-vvv).
    VeryVerbose,
}

/// Instrumentation points of an assembly, in the order they fire.
pub trait Tracer {
    /// The base grammar was accepted.
    fn trace_base_loaded(&mut self, name: &str, rules: usize);

    fn trace_precedence_declared(&mut self, level: &PrecedenceLevel);

    /// An override replaced the base definition of `name`.
    fn trace_override_applied(&mut self, name: &str, rule: &Rule);

    fn trace_rule_added(&mut self, name: &str, rule: &Rule);

    /// Base and extension conflicts were unioned.
    fn trace_conflicts_merged(&mut self, base: usize, total: usize);

    /// An external token was appended at `index`.
    fn trace_external_declared(&mut self, name: &str, index: usize);

    /// An analysis pass finished with the given counts.
    fn trace_pass_finished(&mut self, pass: &str, errors: usize, warnings: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_base_loaded(&mut self, _name: &str, _rules: usize) {}

    #[inline(always)]
    fn trace_precedence_declared(&mut self, _level: &PrecedenceLevel) {}

    #[inline(always)]
    fn trace_override_applied(&mut self, _name: &str, _rule: &Rule) {}

    #[inline(always)]
    fn trace_rule_added(&mut self, _name: &str, _rule: &Rule) {}

    #[inline(always)]
    fn trace_conflicts_merged(&mut self, _base: usize, _total: usize) {}

    #[inline(always)]
    fn trace_external_declared(&mut self, _name: &str, _index: usize) {}

    #[inline(always)]
    fn trace_pass_finished(&mut self, _pass: &str, _errors: usize, _warnings: usize) {}
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn trace_base_loaded(&mut self, name: &str, rules: usize) {
        (**self).trace_base_loaded(name, rules)
    }

    fn trace_precedence_declared(&mut self, level: &PrecedenceLevel) {
        (**self).trace_precedence_declared(level)
    }

    fn trace_override_applied(&mut self, name: &str, rule: &Rule) {
        (**self).trace_override_applied(name, rule)
    }

    fn trace_rule_added(&mut self, name: &str, rule: &Rule) {
        (**self).trace_rule_added(name, rule)
    }

    fn trace_conflicts_merged(&mut self, base: usize, total: usize) {
        (**self).trace_conflicts_merged(base, total)
    }

    fn trace_external_declared(&mut self, name: &str, index: usize) {
        (**self).trace_external_declared(name, index)
    }

    fn trace_pass_finished(&mut self, pass: &str, errors: usize, warnings: usize) {
        (**self).trace_pass_finished(pass, errors, warnings)
    }
}

/// Tracer that collects human-readable lines.
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{}", line);
        }
    }

    fn push(&mut self, tag: &str, content: String) {
        let c = self.colors;
        self.lines
            .push(format!("{}{tag:>9}{} {content}", c.dim, c.reset));
    }

    fn rule_text(&mut self, rule: &Rule) {
        if self.verbosity < Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        self.lines
            .push(format!("{:>9} {}{rule}{}", "", c.green, c.reset));
    }
}

impl Tracer for PrintTracer {
    fn trace_base_loaded(&mut self, name: &str, rules: usize) {
        let content = format!("{} ({rules} rules)", self.colors.rule(name));
        self.push("base", content);
    }

    fn trace_precedence_declared(&mut self, level: &PrecedenceLevel) {
        if self.verbosity < Verbosity::Verbose || level.source == LevelSource::Base {
            return;
        }
        let assoc = match level.associativity {
            None => "",
            Some(Associativity::Left) => " left",
            Some(Associativity::Right) => " right",
            Some(Associativity::Dynamic) => " dynamic",
        };
        self.push("prec", format!("{} = {}{assoc}", level.name, level.value));
    }

    fn trace_override_applied(&mut self, name: &str, rule: &Rule) {
        let content = self.colors.rule(name);
        self.push("override", content);
        self.rule_text(rule);
    }

    fn trace_rule_added(&mut self, name: &str, rule: &Rule) {
        let content = self.colors.rule(name);
        self.push("add", content);
        self.rule_text(rule);
    }

    fn trace_conflicts_merged(&mut self, base: usize, total: usize) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        self.push("conflicts", format!("{total} ({base} from base)"));
    }

    fn trace_external_declared(&mut self, name: &str, index: usize) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let content = format!("#{index} {}", self.colors.rule(name));
        self.push("external", content);
    }

    fn trace_pass_finished(&mut self, pass: &str, errors: usize, warnings: usize) {
        let c = self.colors;
        let status = match (errors, warnings) {
            (0, 0) => "ok".to_string(),
            (0, w) => format!("{}{w} warnings{}", c.yellow, c.reset),
            (e, w) => format!("{}{e} errors{}, {w} warnings", c.red, c.reset),
        };
        self.push("pass", format!("{pass}: {status}"));
    }
}
