#![forbid(unsafe_code)]

//! Pane body renderer.
//!
//! Renders exactly one tab body per pane, the selected one, by looking
//! up the tab's render function in the [`TabDirectory`]. Tab content is
//! arbitrary, independently developed widgetry, so each render call runs
//! inside a fault boundary: a panic is contained to that tab's content
//! area and the rest of the workspace stays interactive.

use std::panic::{AssertUnwindSafe, catch_unwind};

use ahash::AHashMap;
use chartspace_core::PaneTabs;
use chartspace_render::{Buffer, Rect, Style};

use crate::Widget;

/// Render function for one tab kind.
///
/// Receives the tab's payload and a zero-origin area matching the scratch
/// buffer it draws into. Payload validation is the render function's
/// responsibility; the workspace never inspects payloads. The lifetime
/// lets hosts rebuild the directory each frame over borrowed state.
pub type RenderFn<'a, P> = Box<dyn Fn(&P, Rect, &mut Buffer) + 'a>;

/// Tab name → render function, supplied by the hosting screen.
#[derive(Default)]
pub struct TabDirectory<'a, P> {
    renderers: AHashMap<String, RenderFn<'a, P>>,
}

impl<'a, P> TabDirectory<'a, P> {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderers: AHashMap::new(),
        }
    }

    /// Register the renderer for a tab name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, render: RenderFn<'a, P>) -> Self {
        self.renderers.insert(name.into(), render);
        self
    }

    /// Look up a renderer.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RenderFn<'a, P>> {
        self.renderers.get(name)
    }
}

/// Renders the selected tab of one pane.
pub struct PaneView<'a, P> {
    tabs: &'a PaneTabs<P>,
    directory: &'a TabDirectory<'a, P>,
    notice_style: Style,
}

impl<'a, P> PaneView<'a, P> {
    /// Create a pane view over a pane's tabs and the shared directory.
    #[must_use]
    pub fn new(tabs: &'a PaneTabs<P>, directory: &'a TabDirectory<'a, P>) -> Self {
        Self {
            tabs,
            directory,
            notice_style: Style::default(),
        }
    }

    /// Style for fallback/placeholder notices.
    #[must_use]
    pub fn notice_style(mut self, style: Style) -> Self {
        self.notice_style = style;
        self
    }

    fn draw_notice(&self, area: Rect, buf: &mut Buffer, lines: &[&str]) {
        for (row, line) in lines.iter().enumerate() {
            let y = area.y + 1 + row as u16;
            if y >= area.bottom() {
                break;
            }
            buf.draw_span(area.x + 2, y, line, self.notice_style, area.right());
        }
    }
}

impl<P> Widget for PaneView<'_, P> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        // Closing the last tab is not an error; the pane just goes blank.
        let Some(entry) = self.tabs.selected_entry() else {
            return;
        };
        let Some(render_fn) = self.directory.get(&entry.name) else {
            // Consumer configuration error: visible, non-fatal.
            tracing::warn!(message = "pane.missing_renderer", tab = %entry.name);
            let notice = format!("No view is registered for \"{}\".", entry.name);
            self.draw_notice(area, buf, &[&notice]);
            return;
        };

        // Render into a scratch buffer and commit only on success, so a
        // partially drawn, panicking tab never reaches the screen.
        let mut scratch = Buffer::new(area.width, area.height);
        let bounds = Rect::from_size(area.width, area.height);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            render_fn(&entry.payload, bounds, &mut scratch);
        }));
        match outcome {
            Ok(()) => buf.blit(&scratch, area.x, area.y),
            Err(_) => {
                tracing::error!(message = "pane.render_panic", tab = %entry.name);
                self.draw_notice(
                    area,
                    buf,
                    &[
                        "This tab failed to render.",
                        "Other tabs and panes are unaffected.",
                    ],
                );
            }
        }
    }
}
