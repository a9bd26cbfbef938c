//! Keyboard input dispatch: overlays → global keys → focused pane.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Focus, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::OpenFile => {
            handle_open_file_overlay(app, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.running = false;
            return;
        }
        KeyCode::Char('r') if ctrl => {
            app.request_analysis();
            return;
        }
        KeyCode::F(5) => {
            app.request_analysis();
            return;
        }
        KeyCode::Char('o') if ctrl => {
            app.open_file_prompt();
            return;
        }
        KeyCode::Char('e') if ctrl => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::F(1) => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.toggle();
            return;
        }
        _ => {}
    }

    // 3. Focused pane.
    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::Dashboard => handle_dashboard_key(app, key),
    }
}

fn handle_input_key(app: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let accepted = match key.code {
        KeyCode::Char('u') if ctrl => app.controller.clear_input(),
        KeyCode::Char(_) if ctrl => return,
        KeyCode::Char(c) => app.controller.insert_char(c),
        KeyCode::Enter => app.controller.newline(),
        KeyCode::Backspace => app.controller.backspace(),
        KeyCode::Esc => {
            app.focus = Focus::Dashboard;
            return;
        }
        _ => return,
    };
    if !accepted {
        app.set_warning("Input is locked while an analysis runs");
    }
}

fn handle_dashboard_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('i') | KeyCode::Enter => app.focus = Focus::Input,
        KeyCode::Char('o') => app.open_file_prompt(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.examples_scroll = app.examples_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.examples_scroll = app.examples_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_open_file_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.path_input.clear();
        }
        KeyCode::Enter => {
            let path = app.path_input.trim().to_string();
            app.overlay = Overlay::None;
            app.path_input.clear();
            if !path.is_empty() {
                app.request_import(PathBuf::from(path));
            }
        }
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Char(c) => app.path_input.push(c),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.overlay = Overlay::None,
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use crate::worker::WorkerCommand;

    fn app() -> (AppState, mpsc::Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(cmd_tx, resp_rx, "http://test".into(), 0), cmd_rx)
    }

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut AppState, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    #[test]
    fn typing_edits_the_input() {
        let (mut app, _rx) = app();
        for c in "hi".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.input(), "hi\n");

        ctrl(&mut app, 'u');
        assert_eq!(app.controller.input(), "");
    }

    #[test]
    fn q_types_in_input_but_quits_from_dashboard() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.controller.input(), "q");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn ctrl_r_and_f5_start_analysis() {
        let (mut app, rx) = app();
        app.controller.set_input("nice");
        ctrl(&mut app, 'r');
        assert!(matches!(rx.try_recv(), Ok(WorkerCommand::Analyze { .. })));

        // Locked while loading: typing is refused, a second trigger is ignored.
        press(&mut app, KeyCode::Char('z'));
        assert_eq!(app.controller.input(), "nice");
        press(&mut app, KeyCode::F(5));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn open_file_prompt_sends_path() {
        let (mut app, rx) = app();
        ctrl(&mut app, 'o');
        assert_eq!(app.overlay, Overlay::OpenFile);
        for c in "a.csv".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.overlay, Overlay::None);
        match rx.try_recv() {
            Ok(WorkerCommand::ImportFile { path }) => assert_eq!(path, PathBuf::from("a.csv")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn help_closes_on_any_key() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.controller.input(), "");
    }
}
