#![forbid(unsafe_code)]

//! Demo application model: state, message handling, and the frame view.

use std::cell::RefCell;

use chartspace_core::{
    DefaultTabSets, DraftCache, DraftKey, DragContext, PaneId, SplitState, TabAddress, TabStore,
    apply_drag, reopenable,
};
use chartspace_render::{Buffer, Color, Rect, Style};
use chartspace_timeline::{
    CategoryFilter, DateBucket, Event, aggregate, filter_events, group_by_date,
};
use chartspace_widgets::{
    EventList, EventListState, FilterPanel, FilterPanelState, OverflowItem, OverflowMenu,
    OverflowMenuState, SplitView, SplitViewState, StatefulWidget, TabBar, TabDirectory, TabHit,
    resolve_regions,
};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::data::{ChartData, TabKind, category_catalog, default_tabs, sample_chart};

/// Input translated from the terminal.
pub enum Msg {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Per-frame widget view state.
#[derive(Default)]
struct ViewState {
    split: SplitViewState,
    timeline: RefCell<EventListState>,
    filters: RefCell<FilterPanelState>,
    overflow: OverflowMenuState,
}

/// The demo application.
pub struct App {
    chart: ChartData,
    defaults: DefaultTabSets<TabKind>,
    store: TabStore<TabKind>,
    split: SplitState,
    filter: CategoryFilter,
    drafts: DraftCache<String>,
    view_state: ViewState,
    focused_pane: PaneId,
    filters_focused: bool,
    overflow_open: bool,
    drag: Option<DragContext>,
    inspected: Option<Event>,
    viewport: (u16, u16),
    should_quit: bool,
}

impl App {
    /// Build the app with the sample chart and default tabs.
    pub fn new(viewport: (u16, u16)) -> Self {
        let defaults = default_tabs();
        if let Err(err) = defaults.validate() {
            tracing::warn!(message = "demo.bad_tab_config", error = %err);
        }
        let store = defaults.initial_store();
        Self {
            chart: sample_chart(),
            defaults,
            store,
            split: SplitState::new(),
            filter: CategoryFilter::all_selected(category_catalog()),
            drafts: DraftCache::new(),
            view_state: ViewState::default(),
            focused_pane: PaneId::Main,
            filters_focused: false,
            overflow_open: false,
            drag: None,
            inspected: None,
            viewport,
            should_quit: false,
        }
    }

    /// Whether the main loop should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn buckets(&self) -> Vec<DateBucket> {
        group_by_date(filter_events(
            aggregate(&self.chart.sources()),
            &self.filter,
        ))
    }

    fn workspace_area(&self) -> Rect {
        let (w, h) = self.viewport;
        Rect::new(0, 0, w, h.saturating_sub(1))
    }

    fn regions(&self) -> chartspace_widgets::SplitRegions {
        resolve_regions(
            self.workspace_area(),
            &self.split,
            self.store.pane(PaneId::Side).is_empty(),
        )
    }

    /// Handle one message.
    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            Msg::Key(_) => {}
            Msg::Mouse(mouse) => self.on_mouse(mouse),
            Msg::Resize(w, h) => self.viewport = (w, h),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                self.overflow_open = false;
                self.drag = None;
            }
            KeyCode::Char('o') => self.overflow_open = !self.overflow_open,
            KeyCode::Char('s') => self.split.toggle(),
            KeyCode::Char('f') => self.filters_focused = !self.filters_focused,
            KeyCode::Tab => self.focused_pane = self.focused_pane.other(),
            KeyCode::Left => self.select_adjacent(-1),
            KeyCode::Right => self.select_adjacent(1),
            KeyCode::Up => self.cursor_up(),
            KeyCode::Down => self.cursor_down(),
            KeyCode::Enter => self.activate(),
            KeyCode::Char(' ') if self.filters_focused => self.toggle_filter_at_cursor(),
            KeyCode::Char('a') if self.filters_focused => self.filter.select_all(),
            KeyCode::Char('n') if self.filters_focused => self.filter.clear(),
            KeyCode::Char('w') => {
                let pane = self.focused_pane;
                let selected = self.store.pane(pane).selected();
                self.store.close_tab(pane, selected);
            }
            KeyCode::Char('m') => self.move_focused_tab(),
            KeyCode::Char('[') => self.nudge_split(-4),
            KeyCode::Char(']') => self.nudge_split(4),
            _ => {}
        }
    }

    fn select_adjacent(&mut self, delta: isize) {
        let pane = self.focused_pane;
        let tabs = self.store.pane(pane);
        if tabs.is_empty() {
            return;
        }
        let len = tabs.len() as isize;
        let next = (tabs.selected() as isize + delta).rem_euclid(len) as usize;
        self.store.select(pane, next);
    }

    fn cursor_up(&mut self) {
        if self.overflow_open {
            self.view_state.overflow.move_up();
        } else if self.filters_focused {
            self.view_state.filters.borrow_mut().move_up();
        } else {
            self.view_state.timeline.borrow_mut().move_up();
        }
    }

    fn cursor_down(&mut self) {
        if self.overflow_open {
            let count = reopenable(&self.defaults, &self.store).len();
            self.view_state.overflow.move_down(count);
        } else if self.filters_focused {
            let len = self.filter.catalog().len();
            self.view_state.filters.borrow_mut().move_down(len);
        } else {
            let buckets = self.buckets();
            let count = EventList::new(&buckets).event_count();
            self.view_state.timeline.borrow_mut().move_down(count);
        }
    }

    fn toggle_filter_at_cursor(&mut self) {
        let cursor = self.view_state.filters.borrow().cursor;
        if let Some(category) = self.filter.catalog().get(cursor) {
            let id = category.id.clone();
            self.filter.toggle(&id);
        }
    }

    fn activate(&mut self) {
        if self.overflow_open {
            self.reopen_at_cursor();
        } else if self.filters_focused {
            self.toggle_filter_at_cursor();
        } else {
            self.activate_timeline_event();
        }
    }

    fn reopen_at_cursor(&mut self) {
        let cursor = self.view_state.overflow.cursor;
        let candidates = reopenable(&self.defaults, &self.store);
        if let Some(candidate) = candidates.get(cursor) {
            let name = candidate.name.to_string();
            let payload = *candidate.payload;
            let pane = candidate.pane;
            self.store.open_tab(name, payload, pane, true);
        }
        self.overflow_open = false;
    }

    fn activate_timeline_event(&mut self) {
        let buckets = self.buckets();
        let state = *self.view_state.timeline.borrow();
        let Some(event) = EventList::new(&buckets).selected(&state).cloned() else {
            return;
        };
        if event.category == "notes" {
            // Jump to the notes editor and seed an addendum draft for it.
            let key = DraftKey::new(&self.chart.patient_id, &self.chart.encounter_id);
            self.drafts
                .get_or_insert_with(key, || format!("Addendum to {}: ", event.title));
            self.store
                .open_tab("Notes", TabKind::Notes, PaneId::Main, true);
        } else {
            self.inspected = Some(event);
            self.store
                .open_tab("Event Detail", TabKind::EventDetail, PaneId::Main, true);
        }
    }

    fn move_focused_tab(&mut self) {
        let source = self.focused_pane;
        let index = self.store.pane(source).selected();
        let dest = source.other();
        let dest_index = self.store.pane(dest).len();
        self.store.move_between_panes(source, index, dest, dest_index);
    }

    fn nudge_split(&mut self, delta: i32) {
        let (w, _) = self.viewport;
        let side_empty = self.store.pane(PaneId::Side).is_empty();
        let layout = self.split.layout(w, side_empty);
        if !layout.side_visible() {
            return;
        }
        let side = i32::from(layout.side_cols) + delta;
        self.split.observe_side_size(side.max(1) as u16, w);
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let regions = self.regions();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if regions.divider.contains(mouse.column, mouse.row) {
                    self.split.begin_drag();
                    return;
                }
                for pane in [PaneId::Main, PaneId::Side] {
                    let bar = if pane == PaneId::Main {
                        regions.main_bar
                    } else {
                        regions.side_bar
                    };
                    if !bar.contains(mouse.column, mouse.row) {
                        continue;
                    }
                    self.focused_pane = pane;
                    let state = self.bar_state(pane);
                    let hit = TabBar::from_pane(self.store.pane(pane))
                        .closable(true)
                        .hit_test(&state, bar.width, mouse.column - bar.x);
                    match hit {
                        Some(TabHit::Close(index)) => {
                            self.store.close_tab(pane, index);
                        }
                        Some(TabHit::Tab(index)) => {
                            self.store.select(pane, index);
                            self.drag = Some(DragContext::start(TabAddress::new(pane, index)));
                        }
                        None => {}
                    }
                    return;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.split.is_dragging() {
                    self.split.drag_to(mouse.column, self.viewport.0);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.split.is_dragging() {
                    self.split.end_drag();
                }
                if let Some(drag) = self.drag.take() {
                    self.finish_tab_drag(drag, regions, mouse.column, mouse.row);
                }
            }
            _ => {}
        }
    }

    fn finish_tab_drag(
        &mut self,
        drag: DragContext,
        regions: chartspace_widgets::SplitRegions,
        column: u16,
        row: u16,
    ) {
        let target = [
            (PaneId::Main, regions.main_bar),
            (PaneId::Side, regions.side_bar),
        ]
        .into_iter()
        .find(|(_, bar)| bar.contains(column, row));
        let Some((pane, bar)) = target else {
            // Released outside both bars: cancelled.
            apply_drag(&mut self.store, drag);
            return;
        };
        let state = self.bar_state(pane);
        let index = TabBar::from_pane(self.store.pane(pane)).closable(true).drop_index(
            &state,
            bar.width,
            column - bar.x,
        );
        apply_drag(&mut self.store, drag.drop_at(TabAddress::new(pane, index)));
    }

    fn bar_state(&self, pane: PaneId) -> chartspace_widgets::TabBarState {
        match pane {
            PaneId::Main => self.view_state.split.main_bar,
            PaneId::Side => self.view_state.split.side_bar,
        }
    }

    /// Render one frame.
    pub fn view(&mut self, buf: &mut Buffer) {
        buf.clear();
        let workspace = self.workspace_area();
        let buckets = self.buckets();
        let directory = self.directory(&buckets);

        let mut split_state = self.view_state.split;
        SplitView::new(&self.store, &self.split, &directory)
            .bar_style(Style::new().fg(Color::Gray))
            .active_tab_style(Style::new().fg(Color::White).bold())
            .divider_style(Style::new().fg(Color::DarkGray))
            .render(workspace, buf, &mut split_state);
        drop(directory);
        self.view_state.split = split_state;

        if self.overflow_open {
            self.render_overflow(buf);
        }
        self.render_status(buf);
    }

    fn directory<'a>(&'a self, buckets: &'a [DateBucket]) -> TabDirectory<'a, TabKind> {
        let chart = &self.chart;
        let filter = &self.filter;
        let drafts = &self.drafts;
        let inspected = &self.inspected;
        let timeline_state = &self.view_state.timeline;
        let filter_state = &self.view_state.filters;
        let filters_focused = self.filters_focused;

        TabDirectory::new()
            .with(
                "Chart Review",
                Box::new(move |_, area, buf| render_chart_review(chart, area, buf)),
            )
            .with(
                "Timeline",
                Box::new(move |_, area, buf| {
                    render_timeline(
                        buckets,
                        filter,
                        filters_focused,
                        timeline_state,
                        filter_state,
                        area,
                        buf,
                    );
                }),
            )
            .with(
                "Notes",
                Box::new(move |_, area, buf| render_notes(chart, drafts, area, buf)),
            )
            .with(
                "Orders",
                Box::new(move |_, area, buf| render_orders(chart, area, buf)),
            )
            .with(
                "Flowsheets",
                Box::new(move |_, area, buf| render_flowsheets(chart, area, buf)),
            )
            .with(
                "Allergies",
                Box::new(|_, area, buf| {
                    render_lines(area, buf, &["No known drug allergies.".to_string()]);
                }),
            )
            .with(
                "Growth Chart",
                Box::new(|_, area, buf| {
                    render_lines(
                        area,
                        buf,
                        &["Height 131 cm (62nd centile), weight 28 kg (55th centile).".to_string()],
                    );
                }),
            )
            .with(
                "Event Detail",
                Box::new(move |_, area, buf| render_event_detail(inspected, area, buf)),
            )
    }

    fn render_overflow(&mut self, buf: &mut Buffer) {
        let items: Vec<OverflowItem> = reopenable(&self.defaults, &self.store)
            .iter()
            .map(OverflowItem::from_candidate)
            .collect();
        let workspace = self.workspace_area();
        let height = (items.len().max(1) as u16).min(workspace.height);
        let width = 32.min(workspace.width);
        let area = Rect::new(workspace.right().saturating_sub(width), 1, width, height);
        OverflowMenu::new(&items)
            .style(Style::new().fg(Color::Black).bg(Color::Gray))
            .highlight_style(Style::new().reversed())
            .render(area, buf, &mut self.view_state.overflow);
    }

    fn render_status(&self, buf: &mut Buffer) {
        let (w, h) = self.viewport;
        if h == 0 {
            return;
        }
        let y = h - 1;
        let style = Style::new().fg(Color::Black).bg(Color::Gray);
        buf.set_style_area(Rect::new(0, y, w, 1), style);
        let line = format!(
            " {}  {}  drafts: {}  [q quit, o reopen, s split, f filters]",
            self.chart.patient_name,
            self.chart.encounter_id,
            self.drafts.len(),
        );
        buf.draw_span(0, y, &line, style, w);
    }
}

fn render_lines(area: Rect, buf: &mut Buffer, lines: &[String]) {
    for (row, line) in lines.iter().enumerate() {
        let y = row as u16;
        if y >= area.height {
            break;
        }
        buf.draw_span(1, y, line, Style::default(), area.right());
    }
}

fn render_chart_review(chart: &ChartData, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        format!("Patient: {}  ({})", chart.patient_name, chart.patient_id),
        format!("Encounter: {}", chart.encounter_id),
        String::new(),
        format!(
            "{} labs, {} imaging, {} notes, {} orders on file.",
            chart.labs.len(),
            chart.imaging.len(),
            chart.notes.len(),
            chart.orders.len(),
        ),
    ];
    render_lines(area, buf, &lines);
}

fn render_notes(chart: &ChartData, drafts: &DraftCache<String>, area: Rect, buf: &mut Buffer) {
    let mut lines = Vec::new();
    for note in &chart.notes {
        lines.push(format!("{}  ({})", note.title, note.created_at));
        lines.push(format!("  {}", note.body));
    }
    let key = DraftKey::new(&chart.patient_id, &chart.encounter_id);
    if let Some(draft) = drafts.get(&key) {
        lines.push(String::new());
        lines.push(format!("Unsaved draft: {draft}"));
    }
    render_lines(area, buf, &lines);
}

fn render_orders(chart: &ChartData, area: Rect, buf: &mut Buffer) {
    let lines: Vec<String> = chart
        .orders
        .iter()
        .map(|order| format!("{}  [{}]  {}", order.name, order.status, order.placed_at))
        .collect();
    render_lines(area, buf, &lines);
}

fn render_flowsheets(chart: &ChartData, area: Rect, buf: &mut Buffer) {
    let mut lines = Vec::new();
    for entry in &chart.flowsheets {
        lines.push(entry.recorded_at.clone());
        for (key, value) in &entry.fields {
            let label = chart
                .field_defs
                .iter()
                .find(|def| def.key == *key)
                .map_or(key.as_str(), |def| def.label.as_str());
            lines.push(format!("  {label}: {value}"));
        }
    }
    render_lines(area, buf, &lines);
}

fn render_event_detail(inspected: &Option<Event>, area: Rect, buf: &mut Buffer) {
    let Some(event) = inspected else {
        render_lines(area, buf, &["Select a timeline event to inspect.".to_string()]);
        return;
    };
    let mut lines = vec![
        event.title.clone(),
        format!("{}  {}", event.timestamp, event.author),
        event.details.clone(),
    ];
    if let Some(tag) = &event.tag {
        lines.push(format!("Flag: {tag}"));
    }
    for sub in &event.sub_items {
        lines.push(format!("  {}: {}", sub.label, sub.value));
    }
    render_lines(area, buf, &lines);
}

fn render_timeline(
    buckets: &[DateBucket],
    filter: &CategoryFilter,
    filters_focused: bool,
    timeline_state: &RefCell<EventListState>,
    filter_state: &RefCell<FilterPanelState>,
    area: Rect,
    buf: &mut Buffer,
) {
    let filter_width = if area.width >= 60 { 24 } else { 0 };
    if filter_width > 0 {
        let panel_area = Rect::new(0, 0, filter_width, area.height);
        let highlight = if filters_focused {
            Style::new().reversed()
        } else {
            Style::new().bold()
        };
        FilterPanel::new(filter)
            .highlight_style(highlight)
            .render(panel_area, buf, &mut filter_state.borrow_mut());
    }
    let list_x = if filter_width > 0 { filter_width + 1 } else { 0 };
    let list_area = Rect::new(list_x, 0, area.width.saturating_sub(list_x), area.height);
    EventList::new(buckets)
        .header_style(Style::new().fg(Color::Cyan).bold())
        .cursor_style(Style::new().reversed())
        .tag_style(Style::new().fg(Color::Red).bold())
        .render(list_area, buf, &mut timeline_state.borrow_mut());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        App::new((120, 40))
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        assert!(!app.should_quit());
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn closing_and_reopening_a_default_tab() {
        let mut app = app();
        // Close "Chart Review" in the main pane.
        app.update(key(KeyCode::Char('w')));
        assert!(!app.store.contains_name("Chart Review"));
        // Open the reopen menu and take the first candidate.
        app.update(key(KeyCode::Char('o')));
        app.update(key(KeyCode::Enter));
        assert!(app.store.contains_name("Chart Review"));
        assert!(!app.overflow_open);
    }

    #[test]
    fn split_toggle_collapses_the_side_pane() {
        let mut app = app();
        app.update(key(KeyCode::Char('s')));
        assert!(app.split.is_collapsed());
        app.update(key(KeyCode::Char('s')));
        assert!(!app.split.is_collapsed());
    }

    #[test]
    fn moving_a_tab_between_panes() {
        let mut app = app();
        let side_before = app.store.pane(PaneId::Side).len();
        app.update(key(KeyCode::Char('m')));
        assert_eq!(app.store.pane(PaneId::Side).len(), side_before + 1);
    }

    #[test]
    fn filter_toggle_removes_events_from_the_timeline() {
        let mut app = app();
        let all = {
            let buckets = app.buckets();
            EventList::new(&buckets).event_count()
        };
        app.update(key(KeyCode::Char('f')));
        // Cursor starts on "labs"; toggling it off hides lab events.
        app.update(key(KeyCode::Char(' ')));
        let fewer = {
            let buckets = app.buckets();
            EventList::new(&buckets).event_count()
        };
        assert!(fewer < all);
    }

    #[test]
    fn activating_a_note_event_seeds_a_draft_and_opens_notes() {
        let mut app = app();
        let note_index = {
            let buckets = app.buckets();
            let list = EventList::new(&buckets);
            (0..list.event_count())
                .find(|index| {
                    list.selected(&EventListState {
                        cursor: *index,
                        scroll: 0,
                    })
                    .is_some_and(|event| event.category == "notes")
                })
                .unwrap()
        };
        app.view_state.timeline.borrow_mut().cursor = note_index;
        app.update(key(KeyCode::Enter));
        assert_eq!(app.drafts.len(), 1);
        assert_eq!(
            app.store.pane(PaneId::Main).selected_entry().unwrap().name,
            "Notes"
        );
    }

    #[test]
    fn activating_a_lab_event_opens_the_detail_tab() {
        let mut app = app();
        let lab_index = {
            let buckets = app.buckets();
            let list = EventList::new(&buckets);
            (0..list.event_count())
                .find(|index| {
                    list.selected(&EventListState {
                        cursor: *index,
                        scroll: 0,
                    })
                    .is_some_and(|event| event.category == "labs")
                })
                .unwrap()
        };
        app.view_state.timeline.borrow_mut().cursor = lab_index;
        app.update(key(KeyCode::Enter));
        assert!(app.store.contains_name("Event Detail"));
        assert!(app.inspected.is_some());
    }

    #[test]
    fn view_renders_tabs_status_and_timeline() {
        let mut app = app();
        let mut buf = Buffer::new(120, 40);
        app.view(&mut buf);
        let bar = buf.row_text(0);
        assert!(bar.contains("[Chart Review x]"));
        assert!(bar.contains("[Timeline x]"));
        assert!(buf.row_text(39).contains("Rivera, Marisol"));
    }

    #[test]
    fn mouse_click_closes_a_tab_via_its_close_marker() {
        let mut app = app();
        let mut buf = Buffer::new(120, 40);
        app.view(&mut buf);
        // "[Chart Review x]" spans columns 0..16; the marker sits at 14.
        app.update(Msg::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 14,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));
        assert!(!app.store.contains_name("Chart Review"));
    }
}
