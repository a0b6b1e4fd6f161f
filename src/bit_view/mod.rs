pub mod render;
pub mod view;

pub use view::BitView;
