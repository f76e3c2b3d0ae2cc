//! The Minutes of Meeting document model.
//!
//! This is the core of Referat: a canonical structured record extracted from
//! noisy model output, a keyword redaction pass for external audiences, and
//! deterministic rendering into Markdown and paginated PDF.

mod extract;
mod markdown;
mod pdf;
mod record;
mod redact;

pub use extract::extract_record;
pub use markdown::render_markdown;
pub use pdf::render_pdf;
pub use record::{ActionEntry, ActionItem, DiscussionSection, MoMRecord, Point};
pub use redact::{redact, SENSITIVE_KEYWORDS};
