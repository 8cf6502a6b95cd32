//! Лексер, LL(1) парсер и таблица символов для выражений
//! из идентификаторов, `+`, `*` и скобок.

pub mod analysis;
pub mod error;
pub mod ir;
pub mod parser;
pub mod render;
pub mod span;
pub mod symbols;

pub use analysis::{analyze, analyze_batch, AnalysisResult, EXAMPLES};
pub use error::{AnalysisError, ErrorKind, ReportError};

// Запас стека перед очередным уровнем рекурсии и размер нового сегмента
// для `stacker::maybe_grow`
pub(crate) const STACK_RED_ZONE: usize = 64 * 1024;
pub(crate) const STACK_SEGMENT: usize = 1024 * 1024;
