//! Terminal rendering of annotations with Ariadne
//!
//! Used by `jargon check` to show each jargon occurrence with its source
//! line, the term it resolved to and the explanation.

use crate::error::Result;
use crate::scan::Annotation;
use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

/// Annotation renderer using ariadne
#[derive(Debug, Clone, Copy)]
pub struct AnnotationRenderer {
    color: bool,
}

impl AnnotationRenderer {
    /// Create new renderer
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Render a single annotation to string
    ///
    /// # Arguments
    /// * `annotation` - The annotation to render
    /// * `filename` - Name shown in the report header
    /// * `source` - The complete source text
    pub fn render(&self, annotation: &Annotation, filename: &str, source: &str) -> Result<String> {
        let mut buf = Vec::new();

        let span = annotation.range.clone();
        let message = annotation.message();
        let label_message = if message.is_empty() {
            format!("jargon term '{}'", annotation.term.term_name)
        } else {
            message
        };

        let label = Label::new((filename, span))
            .with_message(label_message)
            .with_color(Color::Blue);

        Report::build(ReportKind::Advice, filename, annotation.range.start)
            .with_config(
                Config::default()
                    .with_color(self.color)
                    .with_index_type(IndexType::Byte),
            )
            .with_message(format!(
                "{} [{}: {}]",
                annotation.word, annotation.term.namespace_name, annotation.term.term_name
            ))
            .with_label(label)
            .finish()
            .write((filename, Source::from(source)), &mut buf)?;

        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    /// Render all annotations of one file
    pub fn render_all(
        &self,
        annotations: &[Annotation],
        filename: &str,
        source: &str,
    ) -> Result<String> {
        let mut output = String::new();
        for annotation in annotations {
            output.push_str(&self.render(annotation, filename, source)?);
            output.push('\n');
        }
        Ok(output)
    }
}

impl Default for AnnotationRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
