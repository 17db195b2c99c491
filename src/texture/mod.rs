//! Image handles and frame animations.
//!
//! The core never touches pixels: images are opaque [`sprite::Sprite`] handles issued by the
//! presentation layer, and animations only track which handle is current.

pub mod animated;
pub mod sprite;
