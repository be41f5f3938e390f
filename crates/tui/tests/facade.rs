//! Exercises the `tui` façade end to end: decode an input byte stream,
//! paint a buffer, and present it through one `Terminal`.

use std::io::Cursor;

use tui::prelude::*;

fn caps() -> Capabilities {
    Capabilities::builder().true_color(true).scroll_region(true).build()
}

#[test]
fn reading_an_event_and_presenting_a_frame_share_one_terminal() {
    let reader = Cursor::new(b"\x1b[A".to_vec());
    let writer: Vec<u8> = Vec::new();
    let mut term = Terminal::new(reader, writer, caps(), 10, 2);

    let event = term.read_event().unwrap();
    assert!(matches!(
        event,
        Some(Event::KeyPress(tui::event::KeyEvent {
            code: tui::event::KeyCode::Up,
            ..
        }))
    ));

    let mut ingest = Ingest::new(Wcwidth);
    let mut frame = Buffer::new(10, 2);
    let rect = tui::buffer::Rect::new(0, 0, 10, 2);
    ingest.write_str(&mut frame, rect, 0, 0, true, None, "hi");

    let stats = term.present(&mut frame).unwrap();
    assert!(stats.full_redraw);
    assert!(stats.cells_written >= 2);
}

#[test]
fn cancelling_the_token_stops_further_reads() {
    let reader = Cursor::new(b"abc".to_vec());
    let writer: Vec<u8> = Vec::new();
    let mut term = Terminal::new(reader, writer, caps(), 10, 2);

    let token = term.cancellation_token();
    token.cancel();

    assert_eq!(term.read_event().unwrap(), None);
}

#[test]
fn alt_screen_round_trip_through_the_facade() {
    let reader = Cursor::new(Vec::new());
    let writer: Vec<u8> = Vec::new();
    let mut term = Terminal::new(reader, writer, caps(), 4, 2);

    term.enter_alt_screen().unwrap();
    let mut frame = Buffer::new(4, 2);
    term.present(&mut frame).unwrap();
    term.leave_alt_screen().unwrap();
}
