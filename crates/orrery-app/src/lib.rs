//! Headless orrery viewer: configuration, platform directories, and the frame loop.

pub mod frame_loop;
pub mod platform;
pub mod viewer;
