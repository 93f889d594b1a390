mod menu;
mod state;

pub use state::{AppConfig, AppState, InputAction, Scene, Tone};
