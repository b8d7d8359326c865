//! Editor session - the object a host drives.
//!
//! Owns the mapping editor, the gesture state machine, the viewport, the
//! active page and hover feedback. Pointer handlers live in `crate::input`
//! (`mouse_down`, `drag`, `mouse_up`, `transform`) as `impl EditorSession`
//! blocks; this module holds the state, the commit/cancel flow and the host
//! boundary calls.

use crate::config::EditorConfig;
use crate::editor::{IndexShift, MappingEditor};
use crate::error::{EditorError, IoResult, ValidationError, ValidationResult};
use crate::geometry::{Point, Rect};
use crate::hit_test::{HitTarget, HitTester};
use crate::host::{MappingStore, PageImage, PageImageSource, PathSuggester, PathSuggestion};
use crate::input::coords::Viewport;
use crate::input::{AuthoringMode, InputResponse, InputState, Pending};
use crate::render::{DrawCommand, OverlayInput, render_overlay};
use crate::types::{Segment, Template, parse_row_count};
use tracing::{debug, info, warn};

pub struct EditorSession {
    pub(crate) editor: MappingEditor,
    pub(crate) config: EditorConfig,
    pub(crate) viewport: Viewport,
    /// Page currently displayed and edited
    pub(crate) page: u32,
    pub(crate) input: InputState,
    pub(crate) mode: AuthoringMode,
    pub(crate) hover: HitTarget,
    pub(crate) pending: Option<Pending>,
    /// Lazily built for `page`; dropped on every model change
    hit_tester: Option<HitTester>,
    page_image: Option<PageImage>,
}

impl EditorSession {
    pub fn new(template: Template, config: EditorConfig) -> Self {
        Self {
            editor: MappingEditor::with_min_size(template, config.min_size),
            config,
            viewport: Viewport::default(),
            page: 0,
            input: InputState::Idle,
            mode: AuthoringMode::Normal,
            hover: HitTarget::None,
            pending: None,
            hit_tester: None,
            page_image: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn template(&self) -> &Template {
        self.editor.template()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    pub fn mode(&self) -> AuthoringMode {
        self.mode
    }

    pub fn hover(&self) -> HitTarget {
        self.hover
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn page_image(&self) -> Option<&PageImage> {
        self.page_image.as_ref()
    }

    // ========================================================================
    // Hit testing
    // ========================================================================

    /// Topmost target at a document-space point on the active page.
    pub fn hit_at(&mut self, doc: Point) -> HitTarget {
        let tolerance = self
            .viewport
            .tolerance_to_document(self.config.handle_tolerance_px);
        let page = self.page;
        let template = self.editor.template();
        let tester = self
            .hit_tester
            .get_or_insert_with(|| HitTester::new(template, page));
        tester.hit_test(template, doc, tolerance)
    }

    /// Drop cached hit-test data after the template changed.
    pub(crate) fn invalidate(&mut self) {
        self.hit_tester = None;
    }

    // ========================================================================
    // Facade access
    // ========================================================================

    /// Run an explicit command against the facade (remove, rename, rows...).
    ///
    /// Any active gesture is cancelled first. Removals and reorders are
    /// followed so authoring and the staged selection keep their loop.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut MappingEditor) -> R) -> R {
        if !self.input.is_idle() {
            self.cancel();
        }
        self.editor.take_shifts();
        let result = f(&mut self.editor);
        for shift in self.editor.take_shifts() {
            self.follow_shift(shift);
        }
        self.after_structural_change();
        result
    }

    fn follow_shift(&mut self, shift: IndexShift) {
        if let Some(index) = self.mode.loop_index() {
            match shift.apply(index) {
                Some(moved) => self.mode = self.mode.retarget(moved),
                None => {
                    debug!(index, "Authored loop removed, leaving authoring mode");
                    self.mode = AuthoringMode::Normal;
                }
            }
        }
        if let Some(pending) = self.pending {
            if let Some(index) = pending.loop_index() {
                self.pending = shift.apply(index).map(|moved| pending.retarget(moved));
            }
        }
    }

    fn after_structural_change(&mut self) {
        self.invalidate();
        self.hover = HitTarget::None;
        let template = self.editor.template();
        if let Some(index) = self.mode.loop_index() {
            if template.mapping(index).is_none_or(|m| !m.is_loop()) {
                debug!(index, "Authoring target gone, leaving authoring mode");
                self.mode = AuthoringMode::Normal;
                self.pending = None;
            }
        }
    }

    // ========================================================================
    // Loop authoring
    // ========================================================================

    /// Every following selection becomes a column of loop `mapping`.
    pub fn begin_loop_field_authoring(&mut self, mapping: usize) -> ValidationResult<()> {
        self.require_loop(mapping)?;
        self.input.reset();
        self.pending = None;
        self.hover = HitTarget::None;
        self.mode = AuthoringMode::LoopField { mapping };
        debug!(mapping, "Authoring loop fields");
        Ok(())
    }

    /// Every following selection becomes a continuation of loop `mapping`.
    pub fn begin_loop_page_authoring(&mut self, mapping: usize) -> ValidationResult<()> {
        self.require_loop(mapping)?;
        self.input.reset();
        self.pending = None;
        self.hover = HitTarget::None;
        self.mode = AuthoringMode::LoopPage { mapping };
        debug!(mapping, "Authoring loop pages");
        Ok(())
    }

    pub fn exit_authoring(&mut self) {
        self.mode = AuthoringMode::Normal;
        self.pending = None;
    }

    fn require_loop(&self, mapping: usize) -> ValidationResult<()> {
        match self.editor.template().mapping(mapping) {
            None => Err(ValidationError::NoSuchMapping(mapping)),
            Some(m) if !m.is_loop() => Err(ValidationError::NotALoop(mapping)),
            Some(_) => Ok(()),
        }
    }

    // ========================================================================
    // Committing staged selections
    // ========================================================================

    /// Turn the staged selection into a text mapping.
    pub fn commit_text(&mut self, path: &str) -> ValidationResult<usize> {
        let Some(Pending::Mapping { page, rect }) = self.pending else {
            return Err(ValidationError::NothingPending);
        };
        let index = self.editor.add_text_field(page, rect, path)?;
        self.pending = None;
        self.invalidate();
        Ok(index)
    }

    /// Turn the staged selection into a loop with `rows` rows on its page.
    pub fn commit_loop(&mut self, path: &str, rows: Option<u32>) -> ValidationResult<usize> {
        let Some(Pending::Mapping { page, rect }) = self.pending else {
            return Err(ValidationError::NothingPending);
        };
        let rows = rows.unwrap_or(self.config.default_rows);
        let index = self.editor.add_loop(page, rect, path, rows)?;
        self.pending = None;
        self.invalidate();
        Ok(index)
    }

    /// Turn the staged selection into a loop column.
    pub fn commit_loop_field(&mut self, path: &str) -> ValidationResult<usize> {
        let Some(Pending::LoopField {
            mapping,
            segment,
            rect,
        }) = self.pending
        else {
            return Err(ValidationError::NothingPending);
        };
        let field = self.editor.add_loop_field(mapping, segment, rect, path)?;
        self.pending = None;
        self.invalidate();
        Ok(field)
    }

    /// Turn the staged selection into a loop continuation.
    pub fn commit_loop_page(&mut self, rows: u32) -> ValidationResult<usize> {
        let Some(Pending::LoopPage {
            mapping,
            page,
            rect,
        }) = self.pending
        else {
            return Err(ValidationError::NothingPending);
        };
        let continuation = self.editor.add_loop_page(mapping, page, rect, rows)?;
        self.pending = None;
        self.invalidate();
        Ok(continuation)
    }

    /// Same as [`EditorSession::commit_loop_page`] with the operator's raw
    /// prompt answer.
    pub fn commit_loop_page_input(&mut self, input: &str) -> ValidationResult<usize> {
        let rows = parse_row_count(input)?;
        self.commit_loop_page(rows)
    }

    /// Escape: revert the active gesture, else drop the staged selection,
    /// else leave the authoring mode.
    pub fn cancel(&mut self) -> InputResponse {
        match self.input.take() {
            InputState::DraggingMove {
                target, snapshot, ..
            }
            | InputState::DraggingResize {
                target, snapshot, ..
            } => {
                if let Err(e) = self.editor.restore(target.mapping(), snapshot) {
                    warn!(error = %e, "Could not revert cancelled gesture");
                }
                self.invalidate();
                debug!(?target, "Gesture cancelled");
                InputResponse::Redraw
            }
            InputState::Selecting { .. } => InputResponse::Redraw,
            InputState::Idle => {
                if self.pending.take().is_some() {
                    InputResponse::Redraw
                } else if self.mode.is_authoring() {
                    self.mode = AuthoringMode::Normal;
                    InputResponse::Redraw
                } else {
                    InputResponse::Ignored
                }
            }
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Drawing commands for the current frame.
    pub fn render(&self) -> Vec<DrawCommand> {
        render_overlay(&OverlayInput {
            page_image: self.page_image.as_ref(),
            page: self.page,
            template: self.editor.template(),
            viewport: &self.viewport,
            selection: self.input.selection(),
            hover: self.hover,
            config: &self.config,
        })
    }

    // ========================================================================
    // Host boundary
    // ========================================================================

    /// Fetch the backdrop for the active page at the current scale.
    /// On failure the previous image is kept.
    pub fn refresh_page_image(&mut self, source: &mut dyn PageImageSource) -> IoResult<()> {
        let scale = self.viewport.scale();
        if self
            .page_image
            .as_ref()
            .is_some_and(|img| img.page == self.page && img.scale == scale)
        {
            return Ok(());
        }
        match source.page_image(self.page, scale) {
            Ok(image) => {
                self.page_image = Some(image);
                Ok(())
            }
            Err(e) => {
                warn!(page = self.page, scale, error = %e, "Page image unavailable");
                Err(e)
            }
        }
    }

    /// Replace the template wholesale from the store. On failure the
    /// current template is kept.
    pub fn load(&mut self, store: &mut dyn MappingStore) -> Result<(), EditorError> {
        let template = store.load().inspect_err(|e| warn!(error = %e, "Load failed"))?;
        self.input.reset();
        self.pending = None;
        self.mode = AuthoringMode::Normal;
        self.editor.replace_template(template);
        self.after_structural_change();
        info!(
            mappings = self.editor.template().len(),
            document = %self.editor.template().document,
            "Template loaded"
        );
        Ok(())
    }

    /// Validate and persist the whole template.
    pub fn save(&self, store: &mut dyn MappingStore) -> Result<(), EditorError> {
        let template = self.editor.template();
        template
            .validate(self.editor.min_size())
            .inspect_err(|e| warn!(error = %e, "Template not persistable"))?;
        store
            .save(template)
            .inspect_err(|e| warn!(error = %e, "Save failed"))?;
        info!(mappings = template.len(), "Template saved");
        Ok(())
    }

    /// Path suggestions for the text being typed. A new loop column is
    /// suggested relative to its loop's list.
    pub fn suggest_paths(&self, suggester: &dyn PathSuggester, partial: &str) -> Vec<PathSuggestion> {
        let template = self.editor.template();
        let loop_path = match self.pending {
            Some(Pending::LoopField { mapping, .. }) => {
                template.mapping(mapping).map(|m| m.path().to_string())
            }
            _ => None,
        };
        match loop_path {
            Some(path) => suggester.suggest_in_loop(&template.example_data, &path, partial),
            None => suggester.suggest(&template.example_data, partial),
        }
    }

    /// Row-0 rectangle of the loop segment authoring targets on this page.
    pub fn authoring_area(&self) -> Option<(Segment, Rect)> {
        let mapping = self.mode.loop_index()?;
        let seg = self
            .editor
            .template()
            .mapping(mapping)?
            .as_loop()?
            .segment_on_page(self.page)?;
        Some((seg.segment, seg.area))
    }
}
