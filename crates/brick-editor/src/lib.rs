pub mod activity;
pub mod controller;
pub mod editor;
pub mod history;
pub mod input;
pub mod persist;

pub use editor::{Dashboard, Editor, EditorError, Notice, Outcome};
pub use input::{Button, InputEvent};
pub use persist::{KeyValueStore, MemoryStore, PersistError, SavedModel, Theme};
