use crate::lexer::MarkupDiagnostic;
use std::io::{self, Write};

pub type DiagnosticHandler<'h> = Box<dyn FnMut(&MarkupDiagnostic<'_>) + 'h>;

/// Tokenizer settings.
///
/// The default settings report nothing.
#[derive(Default)]
pub struct Settings<'h> {
    pub(super) diagnostic_handler: Option<DiagnosticHandler<'h>>,
}

impl<'h> Settings<'h> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `handler` for every run of malformed markup.
    ///
    /// ```
    /// use shallow_xml::{Settings, Tokenizer};
    ///
    /// let mut spans = Vec::new();
    ///
    /// let settings = Settings::new().diagnostics(|d| spans.push(d.span()));
    ///
    /// Tokenizer::new("<p>Some <i text.</p>", settings).for_each(drop);
    ///
    /// assert_eq!(spans, [8..11]);
    /// ```
    #[inline]
    pub fn diagnostics(mut self, handler: impl FnMut(&MarkupDiagnostic<'_>) + 'h) -> Self {
        self.diagnostic_handler = Some(Box::new(handler));

        self
    }

    /// Writes the caret-annotated rendering of every diagnostic to `writer`.
    /// Write errors are ignored: diagnostics never interrupt tokenization.
    #[inline]
    pub fn diagnostics_to(self, mut writer: impl Write + 'h) -> Self {
        self.diagnostics(move |diagnostic| {
            let _ = write!(writer, "{diagnostic}");
        })
    }

    #[inline]
    pub fn stderr_diagnostics() -> Self {
        Settings::new().diagnostics_to(io::stderr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reports_nothing() {
        assert!(Settings::default().diagnostic_handler.is_none());
    }

    #[test]
    fn renders_into_a_writer() {
        let mut out = Vec::new();

        {
            let mut settings = Settings::new().diagnostics_to(&mut out);

            if let Some(handler) = settings.diagnostic_handler.as_mut() {
                handler(&MarkupDiagnostic::new("a <b", 2..4));
            }
        }

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "syntax error in markup at 2..4:\n    a <b\n      ^^\n"
        );
    }
}
