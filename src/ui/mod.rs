mod app;
mod colors;
mod slider;

pub use app::TuiApp;
pub use colors::TableColors;
pub use slider::TopNSlider;
