//! Driver-level errors.

use enc_ir::Span;

/// Precondition failures when mapping an active statement.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("active statement {span} lies outside the body envelope {envelope}")]
    SpanOutsideEnvelope { span: Span, envelope: Span },

    #[error("active statement {span} belongs to another body sharing this envelope")]
    ExcludedSpan { span: Span },
}
