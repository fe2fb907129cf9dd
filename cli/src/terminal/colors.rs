use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 160 };
pub const ACCENT: Color = Color::TrueColor { r: 230, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const GOOD: Color = Color::Green;
pub const WARN: Color = Color::Yellow;
