use sdl2::pixels::Color as SdlColor;

use crate::engine::piece::Color as SemanticColor;

// lives here rather than on the semantic color so the engine stays free
// of sdl2 types
pub trait ScreenColor {
    fn screen_color(&self) -> SdlColor;
}

impl ScreenColor for SemanticColor {
    fn screen_color(&self) -> SdlColor {
        match self {
            SemanticColor::Blue => SdlColor::RGB(0, 162, 232),
            SemanticColor::Green => SdlColor::RGB(34, 177, 76),
            SemanticColor::Orange => SdlColor::RGB(255, 127, 39),
            SemanticColor::Yellow => SdlColor::RGB(255, 201, 14),
            SemanticColor::Red => SdlColor::RGB(237, 28, 36),
            SemanticColor::Pink => SdlColor::RGB(255, 174, 201),
            SemanticColor::Purple => SdlColor::RGB(163, 73, 164),
            SemanticColor::Grey => SdlColor::RGB(128, 128, 128),
        }
    }
}
