#![forbid(unsafe_code)]

//! Terminal session and event loop.
//!
//! Raw mode, alternate screen, and mouse capture for the duration of the
//! run; every frame is drawn into a [`Buffer`] and presented whole.

use std::io::{self, Write};

use chartspace_render::{Buffer, CONTINUATION, Color, Style, StyleFlags};
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::{cursor, event, execute, queue, terminal};

use crate::app::{App, Msg};

/// Run the demo until the user quits.
pub fn run() -> io::Result<()> {
    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )?;
    let result = event_loop(&mut out);
    execute!(
        out,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn event_loop(out: &mut impl Write) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let mut app = App::new((width, height));
    let mut buf = Buffer::new(width, height);
    loop {
        app.view(&mut buf);
        present(out, &buf)?;
        match event::read()? {
            event::Event::Key(key) => app.update(Msg::Key(key)),
            event::Event::Mouse(mouse) => app.update(Msg::Mouse(mouse)),
            event::Event::Resize(w, h) => {
                app.update(Msg::Resize(w, h));
                buf = Buffer::new(w, h);
            }
            _ => {}
        }
        if app.should_quit() {
            return Ok(());
        }
    }
}

fn present(out: &mut impl Write, buf: &Buffer) -> io::Result<()> {
    let mut last_style: Option<Style> = None;
    for y in 0..buf.height() {
        queue!(out, cursor::MoveTo(0, y))?;
        for x in 0..buf.width() {
            let Some(cell) = buf.get(x, y) else { continue };
            // Wide glyphs already advanced the cursor past their trailer.
            if cell.ch == CONTINUATION {
                continue;
            }
            if last_style != Some(cell.style) {
                apply_style(out, cell.style)?;
                last_style = Some(cell.style);
            }
            queue!(out, Print(cell.ch))?;
        }
    }
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    out.flush()
}

fn apply_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(term_color(fg)))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(term_color(bg)))?;
    }
    if let Some(attrs) = style.attrs {
        for (flag, attribute) in [
            (StyleFlags::BOLD, Attribute::Bold),
            (StyleFlags::DIM, Attribute::Dim),
            (StyleFlags::ITALIC, Attribute::Italic),
            (StyleFlags::UNDERLINE, Attribute::Underlined),
            (StyleFlags::REVERSED, Attribute::Reverse),
        ] {
            if attrs.contains(flag) {
                queue!(out, SetAttribute(attribute))?;
            }
        }
    }
    Ok(())
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
    }
}
