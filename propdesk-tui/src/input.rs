//! Keyboard input dispatch: overlays → search box → global keys → screen handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::debug;

use propdesk_core::{TableAction, TableEvent};

use crate::app::{AppState, InputMode, Overlay, Screen};
use crate::views::{self, ViewKind};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::Detail { .. } => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. The search box owns every key while it is focused.
    if app.input_mode == InputMode::Search {
        handle_search_key(app, key);
        return;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        _ => {}
    }

    // 4. Screen-specific keys.
    match app.screen {
        Screen::Home => handle_home_key(app, key),
        Screen::Console => handle_console_key(app, key),
    }
}

fn handle_home_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Enter | KeyCode::Char('l') = key.code {
        app.enter_console();
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    let now = app.now();
    let Some(session) = app.session.as_mut() else {
        app.input_mode = InputMode::Normal;
        return;
    };
    let mut term = session.view().search().to_string();
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            return;
        }
        KeyCode::Esc => {
            term.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            term.pop();
        }
        KeyCode::Char(c) => term.push(c),
        _ => return,
    }
    session.act(TableAction::Search(term), &now);
}

fn handle_console_key(app: &mut AppState, key: KeyEvent) {
    let now = app.now();
    let Some(session) = app.session.as_mut() else {
        app.screen = Screen::Home;
        return;
    };

    // Status text to show once the session borrow ends.
    let mut status: Option<String> = None;
    let mut warning: Option<String> = None;

    match key.code {
        KeyCode::Esc => {
            app.leave_console();
            return;
        }
        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            if let Some(kind) = ViewKind::from_index(index) {
                session.switch_to(kind);
            }
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            return;
        }

        // Global filter axes, shared by every view.
        KeyCode::Char('d') => {
            let next = session.filters().filters().date_range.next();
            session.filters_mut().set_date_range(next);
            status = Some(format!("Date: {}", next.label()));
        }
        KeyCode::Char('p') => {
            let plans = views::plans();
            let next = views::cycle_value(&plans, &session.filters().filters().plan);
            session.filters_mut().set_plan_filter(next);
            status = Some(format!("Plan: {next}"));
        }
        KeyCode::Char('t') => {
            let statuses = session.active_kind().statuses();
            let next = views::cycle_value(&statuses, &session.filters().filters().status);
            session.filters_mut().set_status_filter(next);
            status = Some(format!("Status: {next}"));
        }
        KeyCode::Char('r') => {
            session.filters_mut().reset();
            status = Some("Filters reset".to_string());
        }

        KeyCode::Char('f') => {
            let active = session.view_mut().cycle_quick();
            status = Some(format!("Quick filter: {}", active.as_deref().unwrap_or("all")));
        }
        KeyCode::Char('h') | KeyCode::Left => session.view_mut().move_column(-1),
        KeyCode::Char('l') | KeyCode::Right => session.view_mut().move_column(1),
        KeyCode::Char('j') | KeyCode::Down => session.move_cursor(1, &now),
        KeyCode::Char('k') | KeyCode::Up => session.move_cursor(-1, &now),
        KeyCode::PageDown => session.move_cursor(10, &now),
        KeyCode::PageUp => session.move_cursor(-10, &now),
        KeyCode::Char('o') => {
            if let Some(key) = session.view().column_key() {
                match session.act(TableAction::ToggleSort(key.clone()), &now) {
                    TableEvent::SortChanged(sort) => {
                        status = Some(format!("Sorted by {key} {}", sort.direction));
                    }
                    _ if session.is_loaded() => {
                        warning = Some(format!("{key} is not sortable"));
                    }
                    _ => {}
                }
            }
        }
        KeyCode::Char(' ') => {
            let cursor = session.view().cursor();
            if let TableEvent::SelectionChanged { selected } =
                session.act(TableAction::ToggleRow(cursor), &now)
            {
                status = Some(format!("{selected} selected"));
            }
        }
        KeyCode::Char('a') => {
            if let TableEvent::SelectionChanged { selected } =
                session.act(TableAction::ToggleAll, &now)
            {
                status = Some(format!("{selected} selected"));
            }
        }
        KeyCode::Char('c') => {
            session.view_mut().clear_selection();
            status = Some("Selection cleared".to_string());
        }
        KeyCode::Enter => {
            let cursor = session.view().cursor();
            if let TableEvent::RowActivated { id, .. } =
                session.act(TableAction::Activate(cursor), &now)
            {
                debug!(%id, "row activated");
                if let Some(fields) = session.view().detail(&id) {
                    app.overlay = Overlay::Detail {
                        title: format!("{} {id}", session.active_kind().label()),
                        fields,
                    };
                }
            }
        }
        _ => {}
    }

    if let Some(msg) = status {
        app.set_status(msg);
    }
    if let Some(msg) = warning {
        app.set_warning(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use chrono::Utc;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use proptest::prelude::*;

    use propdesk_core::sample::sample_set;
    use propdesk_core::{AppConfig, DateRange};

    use crate::admin::SnapshotBody;
    use crate::loader::LoaderResponse;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    /// App already on the console with data loaded and every date matching.
    fn console() -> AppState {
        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let mut app = AppState::new(AppConfig::default(), cmd_tx, resp_rx);
        handle_key(&mut app, press(KeyCode::Enter));
        let request = app.session.as_ref().unwrap().request;
        app.handle_loader_response(LoaderResponse::Loaded {
            request,
            set: Box::new(sample_set(&app.config.sample, Utc::now())),
        });
        app.session
            .as_mut()
            .unwrap()
            .filters_mut()
            .set_date_range(DateRange::Custom);
        app
    }

    fn session(app: &AppState) -> &crate::admin::AdminSession {
        app.session.as_ref().unwrap()
    }

    #[test]
    fn release_events_are_ignored() {
        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let mut app = AppState::new(AppConfig::default(), cmd_tx, resp_rx);
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        handle_key(&mut app, key);
        assert!(app.running);
    }

    #[test]
    fn enter_mounts_and_esc_unmounts() {
        let mut app = console();
        assert_eq!(app.screen, Screen::Console);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Home);
        assert!(app.session.is_none());
    }

    #[test]
    fn number_keys_switch_views() {
        let mut app = console();
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(session(&app).active_kind(), ViewKind::Alerts);
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(session(&app).active_kind(), ViewKind::Payouts);
    }

    #[test]
    fn search_mode_types_into_the_table() {
        let mut app = console();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Search);

        // 'q' is text here, not quit.
        type_str(&mut app, "qa");
        assert!(app.running);
        assert_eq!(session(&app).view().search(), "qa");

        handle_key(&mut app, press(KeyCode::Backspace));
        assert_eq!(session(&app).view().search(), "q");

        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(session(&app).view().search(), "q");

        handle_key(&mut app, press(KeyCode::Char('/')));
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(session(&app).view().search(), "");
        assert_eq!(app.screen, Screen::Console);
    }

    #[test]
    fn filter_keys_cycle_global_axes() {
        let mut app = console();
        handle_key(&mut app, press(KeyCode::Char('d')));
        assert_eq!(
            session(&app).filters().filters().date_range,
            DateRange::Custom.next()
        );

        handle_key(&mut app, press(KeyCode::Char('p')));
        assert_eq!(session(&app).filters().filters().plan, "Standard");

        handle_key(&mut app, press(KeyCode::Char('t')));
        assert_eq!(session(&app).filters().filters().status, "Evaluation");

        handle_key(&mut app, press(KeyCode::Char('r')));
        assert_eq!(session(&app).filters().filters(), &app.config.filters);
    }

    #[test]
    fn sort_key_sorts_the_column_under_cursor() {
        let mut app = console();
        // Column 1 is "trader".
        handle_key(&mut app, press(KeyCode::Char('l')));
        handle_key(&mut app, press(KeyCode::Char('o')));
        let snap = session(&app).snapshot(&app.now());
        let trader = snap.headers.iter().find(|h| h.key == "trader").unwrap();
        assert!(trader.sorted.is_some());
    }

    #[test]
    fn space_and_a_drive_selection() {
        let mut app = console();
        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert_eq!(session(&app).snapshot(&app.now()).selected, 1);

        handle_key(&mut app, press(KeyCode::Char('a')));
        let snap = session(&app).snapshot(&app.now());
        assert_eq!(snap.selected, snap.visible);
        assert!(snap.all_selected);

        handle_key(&mut app, press(KeyCode::Char('a')));
        assert_eq!(session(&app).snapshot(&app.now()).selected, 0);
    }

    #[test]
    fn enter_opens_detail_and_esc_closes_it() {
        let mut app = console();
        handle_key(&mut app, press(KeyCode::Enter));
        match &app.overlay {
            Overlay::Detail { title, fields } => {
                assert!(title.starts_with("Accounts "));
                assert!(fields.iter().any(|(k, _)| k == "trader"));
            }
            other => panic!("expected detail, got {other:?}"),
        }
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.screen, Screen::Console);
    }

    #[test]
    fn quick_filter_key_narrows_rows() {
        let mut app = console();
        let before = session(&app).snapshot(&app.now()).visible;
        handle_key(&mut app, press(KeyCode::Char('f')));
        let snap = session(&app).snapshot(&app.now());
        let high_dd = snap.quick.iter().find(|p| p.id == "high-dd").unwrap();
        assert!(high_dd.active);
        assert_eq!(snap.visible, high_dd.count);
        assert!(snap.visible <= before);
        if let SnapshotBody::Rows(rows) = &snap.body {
            assert_eq!(rows.len(), high_dd.count);
        }
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = console();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(session(&app).active_kind(), ViewKind::Accounts);
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::None);
    }

    fn any_key() -> impl Strategy<Value = KeyCode> {
        prop_oneof![
            prop::char::range(' ', '~').prop_map(KeyCode::Char),
            Just(KeyCode::Enter),
            Just(KeyCode::Esc),
            Just(KeyCode::Backspace),
            Just(KeyCode::Up),
            Just(KeyCode::Down),
            Just(KeyCode::Left),
            Just(KeyCode::Right),
            Just(KeyCode::PageUp),
            Just(KeyCode::PageDown),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn random_keys_keep_cursor_in_bounds(keys in prop::collection::vec(any_key(), 1..60)) {
            let mut app = console();
            for code in keys {
                handle_key(&mut app, press(code));
                if !app.running {
                    break;
                }
                if let Some(session) = app.session.as_ref() {
                    let snap = session.snapshot(&app.now());
                    prop_assert!(snap.visible == 0 || snap.cursor < snap.visible);
                    prop_assert!(snap.selected <= snap.total);
                }
            }
        }
    }
}
