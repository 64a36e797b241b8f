pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod error;
pub mod events;
pub mod position;
pub mod sequence;
pub mod throttle;
pub mod view;
pub mod tasks {
    pub mod manager;
    pub mod viewer;
}

pub use carousel::Carousel;
pub use error::Error;
