#![forbid(unsafe_code)]

//! Scrolling timeline event list.
//!
//! Renders date-bucketed events as a flat row stream: a header row per
//! bucket, then for each event a title row, a detail row, and one row
//! per sub-item. The cursor addresses events; scrolling works in rows,
//! and the current bucket's header sticks to the top line while its
//! events are scrolled through.

use chartspace_render::{Buffer, Rect, Style};
use chartspace_timeline::{DateBucket, Event};

use crate::StatefulWidget;

/// View state for an [`EventList`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventListState {
    /// Index of the selected event, counted across all buckets.
    pub cursor: usize,
    /// First visible row of the flattened row stream.
    pub scroll: usize,
}

impl EventListState {
    /// Move the cursor up one event.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one event, clamped to the event count.
    pub fn move_down(&mut self, event_count: usize) {
        if self.cursor + 1 < event_count {
            self.cursor += 1;
        }
    }
}

enum Row<'a> {
    Header(&'a DateBucket),
    Title { event_index: usize, event: &'a Event },
    Detail { event_index: usize, event: &'a Event },
    Sub { event_index: usize, label: &'a str, value: &'a str },
}

impl Row<'_> {
    fn event_index(&self) -> Option<usize> {
        match self {
            Row::Header(_) => None,
            Row::Title { event_index, .. }
            | Row::Detail { event_index, .. }
            | Row::Sub { event_index, .. } => Some(*event_index),
        }
    }
}

/// Timeline event list widget.
pub struct EventList<'a> {
    buckets: &'a [DateBucket],
    style: Style,
    header_style: Style,
    cursor_style: Style,
    tag_style: Style,
}

impl<'a> EventList<'a> {
    /// Create a list over grouped events.
    #[must_use]
    pub fn new(buckets: &'a [DateBucket]) -> Self {
        Self {
            buckets,
            style: Style::default(),
            header_style: Style::default(),
            cursor_style: Style::default(),
            tag_style: Style::default(),
        }
    }

    /// Set base style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the date-header style.
    #[must_use]
    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    /// Set the selected-event style.
    #[must_use]
    pub fn cursor_style(mut self, style: Style) -> Self {
        self.cursor_style = style;
        self
    }

    /// Set the attention-tag style.
    #[must_use]
    pub fn tag_style(mut self, style: Style) -> Self {
        self.tag_style = style;
        self
    }

    /// Total number of events across all buckets.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.events.len()).sum()
    }

    /// Event the cursor points at, if any.
    #[must_use]
    pub fn selected(&self, state: &EventListState) -> Option<&'a Event> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.events.iter())
            .nth(state.cursor)
    }

    fn rows(&self) -> Vec<Row<'a>> {
        let mut rows = Vec::new();
        let mut event_index = 0;
        for bucket in self.buckets {
            rows.push(Row::Header(bucket));
            for event in &bucket.events {
                rows.push(Row::Title { event_index, event });
                if !event.details.is_empty() || !event.author.is_empty() {
                    rows.push(Row::Detail { event_index, event });
                }
                for sub in &event.sub_items {
                    rows.push(Row::Sub {
                        event_index,
                        label: &sub.label,
                        value: &sub.value,
                    });
                }
                event_index += 1;
            }
        }
        rows
    }

    /// Event under a row (relative to the list's area), honoring the
    /// scroll and the sticky header line.
    #[must_use]
    pub fn hit_test(&self, state: &EventListState, row: u16) -> Option<usize> {
        let rows = self.rows();
        let scroll = state.scroll.min(rows.len().saturating_sub(1));
        let sticky = scroll > 0 && !matches!(rows.get(scroll), Some(Row::Header(_)));
        if sticky && row == 0 {
            return None;
        }
        let offset = usize::from(row) - usize::from(sticky);
        rows.get(scroll + offset).and_then(Row::event_index)
    }

    fn scroll_cursor_into_view(&self, rows: &[Row<'_>], state: &mut EventListState, height: usize) {
        let Some(first_row) = rows
            .iter()
            .position(|row| row.event_index() == Some(state.cursor))
        else {
            return;
        };
        let last_row = rows
            .iter()
            .rposition(|row| row.event_index() == Some(state.cursor))
            .unwrap_or(first_row);
        if first_row < state.scroll + 1 {
            state.scroll = first_row.saturating_sub(1);
        }
        if height <= 1 {
            state.scroll = first_row;
            return;
        }
        // The pinned header line costs one row of capacity when the top
        // visible row is mid-bucket.
        let visible_through = |scroll: usize| {
            let pinned = scroll > 0 && !matches!(rows[scroll], Row::Header(_));
            scroll + height - usize::from(pinned)
        };
        while state.scroll < last_row && last_row + 1 > visible_through(state.scroll) {
            state.scroll += 1;
        }
    }
}

impl StatefulWidget for EventList<'_> {
    type State = EventListState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }
        buf.set_style_area(area, self.style);
        let rows = self.rows();
        if rows.is_empty() {
            buf.draw_span(area.x + 1, area.y, "No events match the current filters.", self.style, area.right());
            return;
        }
        let event_count = self.event_count();
        state.cursor = state.cursor.min(event_count.saturating_sub(1));
        self.scroll_cursor_into_view(&rows, state, usize::from(area.height));
        state.scroll = state.scroll.min(rows.len().saturating_sub(1));

        let mut y = area.y;
        let mut next = state.scroll;
        // Sticky header: when the top visible row is mid-bucket, pin that
        // bucket's header to the first line.
        if state.scroll > 0 && !matches!(rows[state.scroll], Row::Header(_)) {
            let bucket = rows[..state.scroll]
                .iter()
                .rev()
                .find_map(|row| match row {
                    Row::Header(bucket) => Some(*bucket),
                    _ => None,
                });
            if let Some(bucket) = bucket {
                self.draw_header(bucket, area, y, buf);
                y += 1;
            }
        }
        while y < area.bottom() {
            let Some(row) = rows.get(next) else { break };
            self.draw_row(row, state, area, y, buf);
            next += 1;
            y += 1;
        }
    }
}

impl EventList<'_> {
    fn draw_header(&self, bucket: &DateBucket, area: Rect, y: u16, buf: &mut Buffer) {
        buf.set_style_area(Rect::new(area.x, y, area.width, 1), self.header_style);
        buf.draw_span(area.x, y, &bucket.label, self.header_style, area.right());
    }

    fn draw_row(&self, row: &Row<'_>, state: &EventListState, area: Rect, y: u16, buf: &mut Buffer) {
        let selected = row.event_index() == Some(state.cursor);
        let base = if selected {
            let style = self.cursor_style.merge(&self.style);
            buf.set_style_area(Rect::new(area.x, y, area.width, 1), style);
            style
        } else {
            self.style
        };
        match row {
            Row::Header(bucket) => self.draw_header(bucket, area, y, buf),
            Row::Title { event, .. } => {
                let marker = if selected { '>' } else { ' ' };
                let mut x = buf.draw_span(area.x, y, &format!("{marker} {}", event.title), base, area.right());
                if let Some(tag) = &event.tag {
                    x = buf.draw_span(x, y, "  ", base, area.right());
                    buf.draw_span(x, y, tag, self.tag_style.merge(&base), area.right());
                }
            }
            Row::Detail { event, .. } => {
                let line = match (event.details.is_empty(), event.author.is_empty()) {
                    (false, false) => format!("    {} · {}", event.details, event.author),
                    (false, true) => format!("    {}", event.details),
                    (true, _) => format!("    {}", event.author),
                };
                buf.draw_span(area.x, y, &line, base, area.right());
            }
            Row::Sub { label, value, .. } => {
                let line = format!("      {label}: {value}");
                buf.draw_span(area.x, y, &line, base, area.right());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartspace_timeline::SubItem;

    fn event(id: &str, title: &str, tag: Option<&str>, subs: &[(&str, &str)]) -> Event {
        Event {
            id: id.into(),
            category: "labs".into(),
            title: title.into(),
            timestamp: "2024-03-04T08:00".into(),
            details: "Final".into(),
            tag: tag.map(Into::into),
            author: "Dr. Osei".into(),
            sub_items: subs
                .iter()
                .map(|(label, value)| SubItem {
                    label: (*label).into(),
                    value: (*value).into(),
                })
                .collect(),
        }
    }

    fn buckets() -> Vec<DateBucket> {
        vec![
            DateBucket {
                date: "2024-03-04".into(),
                label: "Mar 04, 2024".into(),
                events: vec![
                    event("lab-1", "CBC", Some("Abnormal"), &[("WBC", "14.2 K/uL (H)")]),
                    event("lab-2", "BMP", None, &[]),
                ],
            },
            DateBucket {
                date: "2024-03-03".into(),
                label: "Mar 03, 2024".into(),
                events: vec![event("note-1", "Progress Note", None, &[])],
            },
        ]
    }

    #[test]
    fn renders_headers_events_and_sub_items() {
        let buckets = buckets();
        let list = EventList::new(&buckets);
        let mut buf = Buffer::new(50, 10);
        let mut state = EventListState::default();
        StatefulWidget::render(&list, Rect::new(0, 0, 50, 10), &mut buf, &mut state);
        assert!(buf.row_text(0).contains("Mar 04, 2024"));
        assert!(buf.row_text(1).contains("> CBC"));
        assert!(buf.row_text(1).contains("Abnormal"));
        assert!(buf.row_text(2).contains("Final · Dr. Osei"));
        assert!(buf.row_text(3).contains("WBC: 14.2 K/uL (H)"));
        assert!(buf.row_text(4).contains("BMP"));
        assert!(buf.row_text(6).contains("Mar 03, 2024"));
        assert!(buf.row_text(7).contains("Progress Note"));
    }

    #[test]
    fn empty_list_reports_no_matches() {
        let list = EventList::new(&[]);
        let mut buf = Buffer::new(50, 3);
        let mut state = EventListState::default();
        StatefulWidget::render(&list, Rect::new(0, 0, 50, 3), &mut buf, &mut state);
        assert!(buf.row_text(0).contains("No events match"));
    }

    #[test]
    fn cursor_tracks_events_across_buckets() {
        let buckets = buckets();
        let list = EventList::new(&buckets);
        let mut state = EventListState::default();
        assert_eq!(list.event_count(), 3);
        state.move_down(list.event_count());
        state.move_down(list.event_count());
        assert_eq!(list.selected(&state).map(|e| e.id.as_str()), Some("note-1"));
        state.move_down(list.event_count());
        assert_eq!(state.cursor, 2);
        state.move_up();
        assert_eq!(list.selected(&state).map(|e| e.id.as_str()), Some("lab-2"));
    }

    #[test]
    fn scrolling_pins_the_current_bucket_header() {
        let buckets = buckets();
        let list = EventList::new(&buckets);
        let mut buf = Buffer::new(50, 3);
        let mut state = EventListState { cursor: 1, scroll: 0 };
        // Height 3 forces the view past the first events; row 4 (" BMP")
        // must be visible, so the scroll lands mid-bucket.
        StatefulWidget::render(&list, Rect::new(0, 0, 50, 3), &mut buf, &mut state);
        assert!(buf.row_text(0).contains("Mar 04, 2024"));
        assert!(buf.row_text(1).contains("BMP") || buf.row_text(2).contains("BMP"));
    }

    #[test]
    fn cursor_is_clamped_when_the_list_shrinks() {
        let buckets = buckets();
        let list = EventList::new(&buckets);
        let mut buf = Buffer::new(50, 10);
        let mut state = EventListState { cursor: 99, scroll: 0 };
        StatefulWidget::render(&list, Rect::new(0, 0, 50, 10), &mut buf, &mut state);
        assert_eq!(state.cursor, 2);
    }
}
