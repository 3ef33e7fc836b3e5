//! Utility modules for route and hotlink rendering.

pub mod html;
pub mod inflect;
