//! Diagnostic rendering for lex and parse errors.

use chord_compiler::token::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use termcolor::{ColorChoice, StandardStream};

/// Render one error against its source file on stderr.
pub fn report(path: &str, source: &str, span: Span, message: &str) {
    let file = SimpleFile::new(path, source);
    let diagnostic = Diagnostic::error()
        .with_message(message)
        .with_labels(vec![Label::primary((), span.start..span.end)]);

    let writer = StandardStream::stderr(ColorChoice::Auto);
    let config = term::Config::default();
    // Rendering failures must not mask the error being reported
    let _ = term::emit(&mut writer.lock(), &config, &file, &diagnostic);
}
