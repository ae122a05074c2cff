//! Saran M's portfolio: a Yew single-page app rendered into `#app`, plus a
//! small native host that serves the built bundle.

pub mod chat;
pub mod config;
pub mod contact;
pub mod content;
pub mod cursor;
pub mod devops;
pub mod loader;
pub mod motion;
pub mod prefs;
pub mod scene;
pub mod scroll;

#[cfg(not(target_arch = "wasm32"))]
pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod frontend;
