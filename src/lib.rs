//! Slingshot game library
//!
//! A turn-based artillery prototype: players take turns aiming ships placed
//! among planets while a free camera pans and zooms over the field.
//!
//! The game core (`world`, `turn`, `camera`, `input`, `render`, `frame::tick`)
//! is plain data and functions; `frame::SlingshotPlugin` and `graphics` wire it
//! into Bevy.

pub mod assets;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod graphics;
pub mod input;
pub mod render;
pub mod turn;
pub mod world;
