//! Calculator display rendering.
//!
//! The panel is drawn into a ratatui [`Buffer`]: a rounded block with the
//! pending expression as a muted line on top, the display right-aligned below
//! it, and an optional caption naming the background image. The buffer is then
//! written out row by row, styled with crossterm unless plain output is asked
//! for.

use crossterm::style::{Attribute, Color as TermColor, ContentStyle};
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::calculator::Readout;

use super::theme::{Theme, ThemeName, theme};

/// Inner width of the panel in columns.
pub const PANEL_WIDTH: usize = 24;

/// Rows taken by the bordered panel.
const PANEL_HEIGHT: u16 = 4;

/// Everything the renderer needs besides the readout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameStyle {
    pub theme: Theme,
    /// Emit no escape sequences.
    pub plain: bool,
    /// File name of the background image, shown as a caption.
    pub background: Option<String>,
}

impl FrameStyle {
    pub fn new(name: ThemeName, translucent: bool) -> Self {
        let base = theme(name);
        Self {
            theme: if translucent { base.translucent() } else { base },
            plain: false,
            background: None,
        }
    }

    pub fn plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    pub fn with_background(mut self, background: Option<String>) -> Self {
        self.background = background;
        self
    }
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self::new(ThemeName::default(), false)
    }
}

/// Draw the calculator panel into a buffer sized to fit it.
pub fn draw_frame(readout: &Readout, tape: &str, style: &FrameStyle) -> Buffer {
    let t = &style.theme;
    let text = readout.display();
    let value_style = if readout.is_error() { t.error } else { t.value };

    let inner_width = PANEL_WIDTH.max(Line::from(text).width() + 2);
    let panel = Rect::new(0, 0, (inner_width + 2) as u16, PANEL_HEIGHT);

    let caption = style
        .background
        .as_ref()
        .map(|name| Line::styled(format!("  background: {}", name), t.caption));
    let caption_width = caption.as_ref().map_or(0, |c| c.width() as u16);

    let height = if caption.is_some() { PANEL_HEIGHT + 1 } else { PANEL_HEIGHT };
    let mut buf = Buffer::empty(Rect::new(0, 0, panel.width.max(caption_width), height));

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(t.frame);
    let inner = block.inner(panel);
    block.render(panel, &mut buf);
    buf.set_style(inner, t.panel);

    // Keep one column of fill before the right border.
    let text_area = Rect {
        width: inner.width.saturating_sub(1),
        ..inner
    };
    Paragraph::new(vec![
        Line::styled(tape, t.tape),
        Line::styled(text, value_style),
    ])
    .alignment(Alignment::Right)
    .render(text_area, &mut buf);

    if let Some(caption) = caption {
        caption.render(Rect::new(0, PANEL_HEIGHT, caption_width, 1), &mut buf);
    }

    buf
}

/// Render the calculator panel as terminal text.
pub fn render_frame(readout: &Readout, tape: &str, style: &FrameStyle) -> String {
    let buf = draw_frame(readout, tape, style);
    let area = buf.area;

    (area.top()..area.bottom())
        .map(|y| {
            let cells: Vec<&Cell> = (area.left()..area.right()).map(|x| &buf[(x, y)]).collect();
            let end = cells.iter().rposition(|c| !is_blank(c)).map_or(0, |i| i + 1);
            write_row(&cells[..end], style.plain)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Untouched trailing cells are not written.
fn is_blank(cell: &Cell) -> bool {
    cell.symbol() == " "
        && cell.fg == Color::Reset
        && cell.bg == Color::Reset
        && cell.modifier.is_empty()
}

fn write_row(cells: &[&Cell], plain: bool) -> String {
    if plain {
        return cells.iter().map(|c| c.symbol()).collect();
    }

    cells
        .chunk_by(|a, b| (a.fg, a.bg, a.modifier) == (b.fg, b.bg, b.modifier))
        .map(|run| {
            let text: String = run.iter().map(|c| c.symbol()).collect();
            content_style(run[0]).apply(text).to_string()
        })
        .collect()
}

fn content_style(cell: &Cell) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = term_color(cell.fg);
    style.background_color = term_color(cell.bg);
    if cell.modifier.contains(Modifier::BOLD) {
        style.attributes.set(Attribute::Bold);
    }
    if cell.modifier.contains(Modifier::DIM) {
        style.attributes.set(Attribute::Dim);
    }
    style
}

fn term_color(color: Color) -> Option<TermColor> {
    let mapped = match color {
        Color::Reset => return None,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(i) => TermColor::AnsiValue(i),
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(display: &str) -> Readout {
        Readout::Value {
            display: display.to_string(),
            value: display.parse().unwrap_or(0.0),
            clipboard: display.to_string(),
        }
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_plain_frame_layout() {
        let style = FrameStyle::default().plain(true);
        let frame = render_frame(&value("16"), "8 ×", &style);
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!("╭{}╮", "─".repeat(PANEL_WIDTH)));
        assert_eq!(lines[1], format!("│{}8 × │", " ".repeat(PANEL_WIDTH - 4)));
        assert_eq!(lines[2], format!("│{}16 │", " ".repeat(PANEL_WIDTH - 3)));
        assert_eq!(lines[3], format!("╰{}╯", "─".repeat(PANEL_WIDTH)));
    }

    #[test]
    fn test_error_uses_error_style() {
        let style = FrameStyle::new(ThemeName::Dark, false);
        let buf = draw_frame(&Readout::error(), "", &style);

        let line = row(&buf, 2);
        let x = line.chars().position(|c| c == 'E').unwrap() as u16;
        let cell = &buf[(x, 2)];
        assert_eq!(Some(cell.fg), style.theme.error.fg);
        assert_eq!(Some(cell.bg), style.theme.panel.bg);
        assert!(cell.modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_styled_output_uses_escapes() {
        let style = FrameStyle::new(ThemeName::Ocean, false);
        let styled = render_frame(&value("42"), "7 +", &style);
        let plain = render_frame(&value("42"), "7 +", &style.clone().plain(true));

        assert!(styled.contains('\x1b'));
        assert!(!plain.contains('\x1b'));
        assert_eq!(styled.lines().count(), plain.lines().count());
        assert!(styled.contains("42"));
    }

    #[test]
    fn test_background_caption() {
        let style = FrameStyle::default()
            .plain(true)
            .with_background(Some("beach.png".to_string()));
        let frame = render_frame(&value("0"), "", &style);
        assert_eq!(frame.lines().last(), Some("  background: beach.png"));
    }

    #[test]
    fn test_translucent_frame_has_no_fill() {
        let style = FrameStyle::new(ThemeName::Classic, true);
        let buf = draw_frame(&value("3"), "", &style);
        assert!(buf.content().iter().all(|c| c.bg == Color::Reset));

        let border = &buf[(0, 0)];
        assert!(border.modifier.contains(Modifier::DIM));
        assert!(!render_frame(&value("3"), "", &style).contains("\x1b[48;5;"));
    }

    #[test]
    fn test_long_display_widens_panel() {
        let style = FrameStyle::default().plain(true);
        let text = "-0.000000000000000000000001";
        let frame = render_frame(&value(text), "", &style);
        let widest = frame.lines().map(|l| l.chars().count()).max().unwrap();
        assert_eq!(widest, text.chars().count() + 4);
    }
}
