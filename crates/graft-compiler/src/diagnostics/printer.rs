//! Builder-pattern printer for rendering diagnostics.
//!
//! Diagnostics that point into a rule are rendered against the rule's printed DSL
//! form, with `rules.<name>` as the snippet path. Grammar-level diagnostics (a bad
//! conflict entry, a duplicate rule name) render as a single line.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    colored: bool,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            colored: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match &diag.origin {
                Some(_) => self.format_snippet(w, &renderer, diag)?,
                None => format_line(w, diag)?,
            }
        }

        Ok(())
    }

    fn format_snippet(
        &self,
        w: &mut impl Write,
        renderer: &Renderer,
        diag: &DiagnosticMessage,
    ) -> std::fmt::Result {
        let Some(origin) = &diag.origin else {
            return Ok(());
        };
        let path = format!("rules.{}", origin.rule);
        let source = origin.text.as_str();
        let range = adjust_range(origin.span.clone(), source.len());

        let snippet = Snippet::source(source)
            .line_start(1)
            .path(path.as_str())
            .annotation(AnnotationKind::Primary.span(range.clone()));

        let level = severity_to_level(diag.severity);
        let mut report: Vec<Group> = vec![level.primary_title(&diag.message).element(snippet)];

        if let Some(fix) = &diag.fix {
            report.push(
                Level::HELP.secondary_title(&fix.description).element(
                    Snippet::source(source)
                        .line_start(1)
                        .patch(Patch::new(range, &fix.replacement)),
                ),
            );
        }

        for hint in &diag.hints {
            report.push(Group::with_title(Level::HELP.secondary_title(hint)));
        }

        write!(w, "{}", renderer.render(&report))
    }
}

fn format_line(w: &mut impl Write, diag: &DiagnosticMessage) -> std::fmt::Result {
    write!(w, "{}: {}", diag.severity, diag.message)?;
    for hint in &diag.hints {
        write!(w, "\nhelp: {hint}")?;
    }
    Ok(())
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: Range<usize>, limit: usize) -> Range<usize> {
    if range.start == range.end {
        return range.start..(range.start + 1).min(limit);
    }
    range
}
