mod activity;
mod carousel;
mod status_bar;

pub use activity::ActivityWidget;
pub use carousel::CarouselWidget;
pub use status_bar::StatusBarWidget;
