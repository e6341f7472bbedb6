//! Placeholder substitution for argument templates.
//!
//! Templates are plain argument lists where any element may contain the
//! tokens `{regex}`, `{file}`, `{dir}`, `{line}` and `{selection}`. Matching is
//! exact and case-sensitive, there is no escaping, and substituted values are
//! never scanned again for further tokens.

use std::fmt::Write as _;

use crate::domain::model::ContextSnapshot;

/// Placeholder tokens recognized inside template arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Regex,
    File,
    Dir,
    Line,
    Selection,
}

impl Placeholder {
    pub const ALL: [Placeholder; 5] = [
        Placeholder::Regex,
        Placeholder::File,
        Placeholder::Dir,
        Placeholder::Line,
        Placeholder::Selection,
    ];

    /// Literal token as written in templates.
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::Regex => "{regex}",
            Placeholder::File => "{file}",
            Placeholder::Dir => "{dir}",
            Placeholder::Line => "{line}",
            Placeholder::Selection => "{selection}",
        }
    }

    /// Append the snapshot value for this placeholder, or nothing when absent.
    fn render_into(&self, ctx: &ContextSnapshot, out: &mut String) {
        match self {
            Placeholder::Regex => out.push_str(ctx.regex.as_deref().unwrap_or_default()),
            Placeholder::File => {
                if let Some(file) = &ctx.file {
                    out.push_str(&file.to_string_lossy());
                }
            }
            Placeholder::Dir => {
                if let Some(dir) = &ctx.dir {
                    out.push_str(&dir.to_string_lossy());
                }
            }
            Placeholder::Line => {
                if let Some(line) = ctx.line {
                    let _ = write!(out, "{line}");
                }
            }
            Placeholder::Selection => out.push_str(ctx.selection.as_deref().unwrap_or_default()),
        }
    }
}

/// Replace every placeholder occurrence in every template element.
///
/// The output has the same length and order as `template`.
pub fn substitute_args<S: AsRef<str>>(template: &[S], ctx: &ContextSnapshot) -> Vec<String> {
    template
        .iter()
        .map(|arg| substitute_one(arg.as_ref(), ctx))
        .collect()
}

fn substitute_one(arg: &str, ctx: &ContextSnapshot) -> String {
    let mut out = String::with_capacity(arg.len());
    let mut rest = arg;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match Placeholder::ALL
            .iter()
            .find(|placeholder| tail.starts_with(placeholder.token()))
        {
            Some(placeholder) => {
                placeholder.render_into(ctx, &mut out);
                rest = &tail[placeholder.token().len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
