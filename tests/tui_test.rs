//! State-machine tests for the terminal adapter's key transitions.
//! Pure logic only; no terminal is created.

#![cfg(feature = "tui")]

use crossterm::event::{KeyCode, KeyEvent};

use snipstash::store::Snippet;
use snipstash::tui::{transition, Flow, Mode, Step, ViewState};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

fn snippet(id: i64, title: &str) -> Snippet {
    Snippet {
        id,
        title: title.to_string(),
        content: String::new(),
        language: String::new(),
        tags: String::new(),
        created_at: "2026-01-01T00:00:00.000Z".to_string(),
        updated_at: "2026-01-01T00:00:00.000Z".to_string(),
    }
}

fn three() -> Vec<Snippet> {
    vec![snippet(1, "one"), snippet(2, "two"), snippet(3, "three")]
}

#[test]
fn selection_moves_within_bounds_without_wraparound() {
    let snippets = three();
    let mut state = ViewState::default();

    transition(&mut state, key(KeyCode::Down), &snippets, 10);
    transition(&mut state, key(KeyCode::Down), &snippets, 10);
    assert_eq!(state.selected, 2);

    // no wraparound at the bottom
    transition(&mut state, key(KeyCode::Down), &snippets, 10);
    assert_eq!(state.selected, 2);

    for _ in 0..5 {
        transition(&mut state, key(KeyCode::Up), &snippets, 10);
    }
    assert_eq!(state.selected, 0);
}

#[test]
fn selection_is_clamped_to_the_visible_rows() {
    let snippets = three();
    let mut state = ViewState::default();

    // only two rows fit on screen
    transition(&mut state, key(KeyCode::Down), &snippets, 2);
    assert_eq!(state.selected, 1);
    transition(&mut state, key(KeyCode::Down), &snippets, 2);
    assert_eq!(state.selected, 1);
}

#[test]
fn slash_enters_search_and_enter_confirms() {
    let snippets = three();
    let mut state = ViewState {
        selected: 2,
        ..ViewState::default()
    };

    transition(&mut state, key(KeyCode::Char('/')), &snippets, 10);
    assert!(matches!(state.mode, Mode::Search { .. }));

    // typed characters echo into the buffer, not into list commands
    transition(&mut state, key(KeyCode::Char('q')), &snippets, 10);
    transition(&mut state, key(KeyCode::Char('a')), &snippets, 10);
    transition(&mut state, key(KeyCode::Backspace), &snippets, 10);
    transition(&mut state, key(KeyCode::Char('y')), &snippets, 10);

    let step = transition(&mut state, key(KeyCode::Enter), &snippets, 10);
    assert_eq!(step, Step::Redraw);
    assert_eq!(state.mode, Mode::List);
    assert_eq!(state.search_term, "qy");
    assert_eq!(state.selected, 0);
}

#[test]
fn escape_cancels_search_and_keeps_the_previous_term() {
    let snippets = three();
    let mut state = ViewState {
        search_term: "kept".to_string(),
        ..ViewState::default()
    };

    transition(&mut state, key(KeyCode::Char('/')), &snippets, 10);
    transition(&mut state, key(KeyCode::Char('x')), &snippets, 10);
    transition(&mut state, key(KeyCode::Esc), &snippets, 10);

    assert_eq!(state.mode, Mode::List);
    assert_eq!(state.search_term, "kept");
}

#[test]
fn list_keys_map_to_flows_on_the_selected_record() {
    let snippets = three();
    let mut state = ViewState {
        selected: 1,
        ..ViewState::default()
    };

    assert_eq!(
        transition(&mut state, key(KeyCode::Char('a')), &snippets, 10),
        Step::Flow(Flow::Add)
    );
    assert_eq!(
        transition(&mut state, key(KeyCode::Char('e')), &snippets, 10),
        Step::Flow(Flow::Edit(2))
    );
    assert_eq!(
        transition(&mut state, key(KeyCode::Char('d')), &snippets, 10),
        Step::Flow(Flow::Delete(2))
    );
    assert_eq!(
        transition(&mut state, key(KeyCode::Enter), &snippets, 10),
        Step::Flow(Flow::View(2))
    );
    assert_eq!(
        transition(&mut state, key(KeyCode::Char('y')), &snippets, 10),
        Step::Copy
    );
    assert_eq!(
        transition(&mut state, key(KeyCode::Char('q')), &snippets, 10),
        Step::Quit
    );
}

#[test]
fn record_keys_are_inert_on_an_empty_list() {
    let mut state = ViewState::default();

    for code in [
        KeyCode::Char('e'),
        KeyCode::Char('d'),
        KeyCode::Char('y'),
        KeyCode::Enter,
    ] {
        assert_eq!(transition(&mut state, key(code), &[], 10), Step::Redraw);
    }

    // add works regardless of the list being empty
    assert_eq!(
        transition(&mut state, key(KeyCode::Char('a')), &[], 10),
        Step::Flow(Flow::Add)
    );
}
