//! AnalysisHost and Analysis — state management for trace requests.
//!
//! The `AnalysisHost` owns all mutable state (file texts, parse results,
//! the program model and the trace configuration) and provides `Analysis`
//! snapshots for querying.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_file_content("Main.java", source);
//!
//! let analysis = host.analysis();
//! let file = analysis.file_id("Main.java").unwrap();
//! let result = analysis.trace_at(file, offset)?;
//! println!("{}", analysis.render(&result));
//! ```

use indexmap::IndexMap;
use tracing::debug;

use super::error::TraceError;
use super::render::render_tree;
use super::target::{TraceTarget, target_at};
use crate::base::{FileId, LineCol, LineIndex, TextSize};
use crate::hir::{Program, SourceInput};
use crate::parser::{Parse, SyntaxError, parse};
use crate::syntax::SourceFile;
use crate::trace::{ConfigError, ProvenanceResult, SemanticModel, SymbolKind, TraceConfig, TraceEngine};

/// A parsed file as stored by the host.
#[derive(Debug, Clone)]
pub(crate) struct FileData {
    pub id: FileId,
    pub text: String,
    pub ast: SourceFile,
    pub line_index: LineIndex,
}

/// Owns all mutable state for trace requests.
///
/// Apply changes via `set_file_content()` and `remove_file()`,
/// then get a consistent snapshot via `analysis()`.
#[derive(Debug)]
pub struct AnalysisHost {
    /// Files by path, in insertion order.
    files: IndexMap<String, FileData>,
    program: Program,
    config: TraceConfig,
    next_file_id: u32,
    /// Whether the program needs rebuilding
    dirty: bool,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    pub fn with_config(config: TraceConfig) -> Self {
        Self {
            files: IndexMap::new(),
            program: Program::default(),
            config,
            next_file_id: 0,
            dirty: false,
        }
    }

    /// Set the content of a file, parsing it and storing the result.
    ///
    /// A path keeps its `FileId` across updates. Returns parse errors if any;
    /// the file is stored either way.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> Vec<SyntaxError> {
        self.set_parsed_file(path, content.to_string(), parse(content))
    }

    /// Store a file parsed elsewhere, such as on a loader thread.
    pub fn set_parsed_file(&mut self, path: &str, content: String, parse: Parse) -> Vec<SyntaxError> {
        let id = match self.files.get(path) {
            Some(existing) => existing.id,
            None => {
                let id = FileId::new(self.next_file_id);
                self.next_file_id += 1;
                id
            }
        };
        self.files.insert(
            path.to_string(),
            FileData {
                id,
                line_index: LineIndex::new(&content),
                text: content,
                ast: parse.file,
            },
        );
        self.dirty = true;
        parse.errors
    }

    /// Remove a file. Returns whether it was present.
    pub fn remove_file(&mut self, path: &str) -> bool {
        let removed = self.files.shift_remove(path).is_some();
        self.dirty |= removed;
        removed
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Replace the trace configuration after validating it.
    pub fn set_config(&mut self, config: TraceConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Rebuild the program model from the current files.
    ///
    /// This is called automatically by `analysis()` if any file changed.
    pub fn rebuild(&mut self) {
        let inputs = self.files.values().map(|data| SourceInput {
            file: data.id,
            text: &data.text,
            ast: &data.ast,
        });
        self.program = Program::build(inputs);
        self.dirty = false;
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&mut self) -> Analysis<'_> {
        if self.dirty {
            self.rebuild();
        }
        Analysis {
            files: &self.files,
            program: &self.program,
            config: &self.config,
        }
    }
}

/// An immutable snapshot of the analysis state.
#[derive(Clone, Copy)]
pub struct Analysis<'a> {
    files: &'a IndexMap<String, FileData>,
    program: &'a Program,
    config: &'a TraceConfig,
}

impl<'a> Analysis<'a> {
    pub fn program(&self) -> &'a Program {
        self.program
    }

    pub fn config(&self) -> &'a TraceConfig {
        self.config
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files.get(path).map(|data| data.id)
    }

    pub fn file_path(&self, file: FileId) -> Option<&'a str> {
        self.files
            .iter()
            .find(|(_, data)| data.id == file)
            .map(|(path, _)| path.as_str())
    }

    pub fn file_text(&self, file: FileId) -> Option<&'a str> {
        self.file(file).map(|data| data.text.as_str())
    }

    /// Offset of a 0-indexed line/column position.
    pub fn offset(&self, file: FileId, pos: LineCol) -> Option<TextSize> {
        self.file(file)?.line_index.offset(pos)
    }

    pub fn line_col(&self, file: FileId, offset: TextSize) -> Option<LineCol> {
        self.file(file).map(|data| data.line_index.line_col(offset))
    }

    fn file(&self, file: FileId) -> Option<&'a FileData> {
        self.files.values().find(|data| data.id == file)
    }

    // ==================== Tracing ====================

    /// The traceable element at `offset`, if any.
    pub fn target_at(&self, file: FileId, offset: TextSize) -> Option<TraceTarget> {
        target_at(self.program, file, offset)
    }

    /// Trace whatever is under the cursor.
    pub fn trace_at(&self, file: FileId, offset: TextSize) -> Result<ProvenanceResult, TraceError> {
        if self.file(file).is_none() {
            return Err(TraceError::UnknownFile(file));
        }
        debug!(%file, offset = u32::from(offset), "trace requested");
        match self.target_at(file, offset) {
            Some(target) => self.trace(target),
            None => Err(match self.program.expr_at(file, offset) {
                Some(expr) => {
                    TraceError::not_traceable(self.program.expr(expr).map_or("", |e| e.text.as_str()))
                }
                None => TraceError::no_symbol_at(file, offset),
            }),
        }
    }

    /// Trace a target with the host's configuration.
    pub fn trace(&self, target: TraceTarget) -> Result<ProvenanceResult, TraceError> {
        self.config.validate()?;
        let mut engine = TraceEngine::with_config(self.program, self.config.clone());
        match target {
            TraceTarget::Variable { symbol, function } => {
                let Some(info) = self.program.symbol(symbol) else {
                    return Err(TraceError::not_traceable(format!("{symbol:?}")));
                };
                if info.kind == SymbolKind::Local && function.is_none() {
                    return Err(TraceError::NoEnclosingMethod(info.name.to_string()));
                }
                Ok(engine.trace_variable(symbol, function))
            }
            TraceTarget::Getter {
                call,
                getter,
                field,
                function,
            } => Ok(engine.trace_getter(call, getter, field, function)),
        }
    }

    /// Indented text rendering of `result` with `path:line:col` locations.
    pub fn render(&self, result: &ProvenanceResult) -> String {
        render_tree(result, self.program, self.files)
    }
}
