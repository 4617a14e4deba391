pub mod device;
pub mod info_screen;
pub mod nameplate;
pub mod sprite_screen;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use device::{PokedexDevice, PokedexDeviceProps};
pub use info_screen::{InfoScreen, InfoScreenProps};
pub use nameplate::{Nameplate, NameplateProps};
pub use sprite_screen::{SpriteScreen, SpriteScreenProps};

use ratatui::style::Color;

pub(crate) const DEVICE_RED: Color = Color::Rgb(196, 32, 44);
pub(crate) const SCREEN_BG: Color = Color::Rgb(20, 32, 46);
pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub(crate) const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub(crate) const ACCENT_ERROR: Color = Color::Rgb(231, 76, 60);
pub(crate) const ACCENT_LOADING: Color = Color::Rgb(243, 156, 18);
