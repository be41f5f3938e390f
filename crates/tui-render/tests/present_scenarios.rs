//! End-to-end scenarios exercising [`Renderer::present`] against small
//! buffers, covering the cases a diff renderer most often gets wrong:
//! first-frame full redraw, idempotent re-render, wide-glyph overwrite,
//! and alt-screen toggling.

use tui_render::{Buffer, Capabilities, Cell, Renderer};

fn ascii_caps() -> Capabilities {
    Capabilities::builder()
        .scroll_region(true)
        .sync_output(false)
        .build()
}

#[test]
fn first_frame_forces_a_full_redraw_and_writes_every_cell() {
    let mut out = Vec::new();
    let mut renderer = Renderer::new(&mut out, ascii_caps(), 5, 3);

    let mut frame = Buffer::new(5, 3);
    frame.set(0, 0, Cell::from_char('X'));
    frame.set(1, 1, Cell::from_char('X'));
    frame.set(2, 2, Cell::from_char('X'));

    let stats = renderer.present(&mut frame).unwrap();
    assert!(stats.full_redraw);
    assert_eq!(stats.rows_touched, 3);
    assert!(!out.is_empty());
    // A full redraw clears the screen and homes the cursor before writing.
    assert!(out.windows(4).any(|w| w == b"\x1b[2J"));
    assert!(out.windows(6).any(|w| w == b"\x1b[1;1H"));
}

#[test]
fn rendering_the_same_buffer_twice_writes_nothing_the_second_time() {
    let mut out = Vec::new();
    let mut renderer = Renderer::new(&mut out, ascii_caps(), 10, 2);

    let mut frame = Buffer::new(10, 2);
    frame.set(0, 0, Cell::from_char('A'));
    frame.set(1, 0, Cell::from_char('B'));
    frame.set(2, 0, Cell::from_char('C'));
    renderer.present(&mut frame).unwrap();

    // Present the identical content again; nothing changed so the buffer
    // has no touched rows and the renderer has nothing new to say.
    let mut frame2 = Buffer::new(10, 2);
    frame2.set(0, 0, Cell::from_char('A'));
    frame2.set(1, 0, Cell::from_char('B'));
    frame2.set(2, 0, Cell::from_char('C'));
    frame2.clear_touched();

    out.clear();
    let stats = renderer.present(&mut frame2).unwrap();
    assert!(!stats.full_redraw);
    assert_eq!(stats.rows_touched, 0);
    assert!(out.is_empty());
}

#[test]
fn style_diff_is_stable_across_a_second_identical_render() {
    use tui_style::{Attributes, Style};

    let mut out = Vec::new();
    let mut renderer = Renderer::new(&mut out, ascii_caps(), 8, 1);

    let styled = Style {
        attrs: Attributes::BOLD,
        ..Style::new()
    };
    let mut frame = Buffer::new(8, 1);
    frame.set(0, 0, Cell::new('A', &[], 1, styled, Default::default()));
    frame.set(1, 0, Cell::new('B', &[], 1, styled, Default::default()));
    renderer.present(&mut frame).unwrap();

    let mut frame2 = Buffer::new(8, 1);
    frame2.set(0, 0, Cell::new('A', &[], 1, styled, Default::default()));
    frame2.set(1, 0, Cell::new('B', &[], 1, styled, Default::default()));
    frame2.clear_touched();

    out.clear();
    let stats = renderer.present(&mut frame2).unwrap();
    assert_eq!(stats.rows_touched, 0);
    assert!(out.is_empty());
}

#[test]
fn overwriting_a_wide_cell_with_a_narrow_one_blanks_the_orphaned_column() {
    let mut buf = Buffer::new(10, 1);
    buf.set(2, 0, Cell::new('\u{4f60}', &[], 2, Default::default(), Default::default()));
    assert_eq!(buf.cell(3, 0).unwrap().width(), 0);

    buf.set(2, 0, Cell::from_char('a'));
    assert_eq!(buf.cell(2, 0).unwrap().as_str(), "a");
    assert_eq!(buf.cell(2, 0).unwrap().width(), 1);
    // The column the wide glyph used to occupy is blanked, not left as a
    // dangling continuation with no origin.
    let orphan = buf.cell(3, 0).unwrap();
    assert_eq!(orphan.width(), 1);
    assert_eq!(orphan.as_str(), " ");
}

#[test]
fn alt_screen_enter_then_leave_emits_the_matching_dec_1049_pair() {
    let mut out = Vec::new();
    let mut renderer = Renderer::new(&mut out, ascii_caps(), 3, 3);

    renderer.enter_alt_screen().unwrap();
    assert!(out.windows(8).any(|w| w == b"\x1b[?1049h"));

    let mut frame = Buffer::new(3, 3);
    renderer.present(&mut frame).unwrap();

    out.clear();
    renderer.leave_alt_screen().unwrap();
    assert_eq!(&out, b"\x1b[?1049l");
}

#[test]
fn entering_alt_screen_twice_in_a_row_is_a_no_op_the_second_time() {
    let mut out = Vec::new();
    let mut renderer = Renderer::new(&mut out, ascii_caps(), 3, 3);

    renderer.enter_alt_screen().unwrap();
    out.clear();
    renderer.enter_alt_screen().unwrap();
    assert!(out.is_empty());
}

#[test]
fn a_long_run_of_identical_narrow_cells_collapses_to_rep() {
    let mut out = Vec::new();
    let mut renderer = Renderer::new(&mut out, ascii_caps(), 20, 1);

    let mut frame = Buffer::new(20, 1);
    for x in 0..10 {
        frame.set(x, 0, Cell::from_char('-'));
    }
    let stats = renderer.present(&mut frame).unwrap();
    assert_eq!(stats.cells_written, 10);
    // REP (`CSI n b`) should appear rather than nine more literal dashes.
    assert!(out.windows(4).any(|w| w == b"\x1b[9b"));
}

#[test]
fn resizing_the_frame_between_presents_forces_another_full_redraw() {
    let mut out = Vec::new();
    let mut renderer = Renderer::new(&mut out, ascii_caps(), 4, 4);

    let mut frame = Buffer::new(4, 4);
    renderer.present(&mut frame).unwrap();

    let mut bigger = Buffer::new(6, 4);
    bigger.set(5, 0, Cell::from_char('Z'));
    out.clear();
    let stats = renderer.present(&mut bigger).unwrap();
    assert!(stats.full_redraw);
}
