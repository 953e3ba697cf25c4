use tuiwin::{Rect, TextStyle, Window};

#[test]
fn test_print_advances_cursor() {
    let mut win = Window::new(Rect::new(0, 0, 20, 2));
    win.print("/SOFTWARE/");
    assert_eq!(win.cursor(), (10, 0));
    assert_eq!(win.line(0), "/SOFTWARE/");
}

#[test]
fn test_print_clips_at_right_edge() {
    let mut win = Window::new(Rect::new(0, 0, 5, 1));
    win.print("abcdefgh");
    assert_eq!(win.line(0), "abcde");
    assert_eq!(win.cursor(), (5, 0));
}

#[test]
fn test_print_wide_char_that_does_not_fit_is_dropped() {
    let mut win = Window::new(Rect::new(0, 0, 3, 1));
    win.print("ab日");
    assert_eq!(win.line(0), "ab");
}

#[test]
fn test_wide_char_marks_continuation() {
    let mut win = Window::new(Rect::new(0, 0, 4, 1));
    win.print("日x");
    assert!(win.buffer().get(1, 0).unwrap().wide_continuation);
    assert_eq!(win.line(0), "日x");
}

#[test]
fn test_clear_to_eol_keeps_prefix() {
    let mut win = Window::new(Rect::new(0, 0, 10, 1));
    win.print("/alpha/beta/");
    win.move_to(3, 0);
    win.clear_to_eol();
    assert_eq!(win.line(0), "/al");
    assert_eq!(win.cursor(), (3, 0));
}

#[test]
fn test_clear_homes_cursor() {
    let mut win = Window::new(Rect::new(0, 0, 10, 2));
    win.move_to(4, 1);
    win.print("x");
    win.clear();
    assert_eq!(win.cursor(), (0, 0));
    assert_eq!(win.line(1), "");
}

#[test]
fn test_move_to_clamps() {
    let mut win = Window::new(Rect::new(0, 0, 4, 2));
    win.move_to(10, 10);
    assert_eq!(win.cursor(), (3, 1));
}

#[test]
fn test_print_styled_sets_cell_style() {
    let mut win = Window::new(Rect::new(0, 0, 4, 1));
    win.print_styled("ab", TextStyle::new().bold());
    assert!(win.buffer().get(0, 0).unwrap().style.bold);
    assert!(!win.buffer().get(2, 0).unwrap().style.bold);
}

#[test]
fn test_refresh_flag_is_consumed() {
    let mut win = Window::new(Rect::new(0, 0, 4, 1));
    assert!(!win.is_refresh_pending());
    win.refresh();
    assert!(win.take_refresh());
    assert!(!win.take_refresh());
}

#[test]
fn test_derive_is_relative_and_clipped() {
    let parent = Window::new(Rect::new(2, 3, 20, 10));
    let child = parent.derive(4, 8, 1, 2);
    assert_eq!(child.area(), Rect::new(4, 4, 8, 4));

    let clipped = parent.derive(50, 50, 8, 15);
    assert_eq!(clipped.area(), Rect::new(17, 11, 5, 2));
}

#[test]
fn test_split_top() {
    let (top, rest) = Rect::new(0, 0, 80, 24).split_top(1);
    assert_eq!(top, Rect::new(0, 0, 80, 1));
    assert_eq!(rest, Rect::new(0, 1, 80, 23));
}
