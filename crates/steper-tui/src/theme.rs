use ratatui::style::Color;

/// Gruvbox Material palette used by the carousel widgets
pub struct GruvboxMaterial;

impl GruvboxMaterial {
    pub const BG0: Color = Color::Rgb(0x28, 0x28, 0x28);
    pub const BG1: Color = Color::Rgb(0x32, 0x30, 0x2f);
    pub const BG2: Color = Color::Rgb(0x45, 0x40, 0x3d);
    pub const FG0: Color = Color::Rgb(0xd4, 0xbe, 0x98);
    pub const GREY0: Color = Color::Rgb(0x7c, 0x6f, 0x64);
    pub const GREY2: Color = Color::Rgb(0xa8, 0x99, 0x84);
    pub const ORANGE: Color = Color::Rgb(0xe7, 0x8a, 0x4e);
    pub const AQUA: Color = Color::Rgb(0x89, 0xb4, 0x82);
    pub const BLUE: Color = Color::Rgb(0x7d, 0xae, 0xa3);
}

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub slide: Color,
    pub slide_active: Color,
    pub border: Color,
    pub border_active: Color,
    pub text: Color,
    pub muted: Color,
    pub status_bg: Color,
    pub dragging: Color,
    pub sliding: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: GruvboxMaterial::BG0,
            slide: GruvboxMaterial::BG1,
            slide_active: GruvboxMaterial::BG2,
            border: GruvboxMaterial::GREY0,
            border_active: GruvboxMaterial::AQUA,
            text: GruvboxMaterial::FG0,
            muted: GruvboxMaterial::GREY2,
            status_bg: GruvboxMaterial::BG2,
            dragging: GruvboxMaterial::ORANGE,
            sliding: GruvboxMaterial::BLUE,
        }
    }
}
