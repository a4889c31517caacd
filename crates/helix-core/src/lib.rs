pub mod animation;
pub mod constants;
pub mod controls;
pub mod error;
pub mod frame_loop;
pub mod helix;
pub mod particles;
pub mod preset;
pub mod render_data;
pub mod scene;
pub mod viewer;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static BACKDROP_WGSL: &str = include_str!("../shaders/backdrop.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use animation::*;
pub use constants::*;
pub use controls::*;
pub use error::*;
pub use frame_loop::*;
pub use helix::*;
pub use particles::*;
pub use preset::*;
pub use render_data::*;
pub use scene::*;
pub use viewer::*;
