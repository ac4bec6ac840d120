pub mod display;
pub mod theme;

pub use display::{FrameStyle, PANEL_WIDTH, draw_frame, render_frame};
pub use theme::{Theme, ThemeName, UnknownTheme, theme};
