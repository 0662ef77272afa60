//! Notebook domain: company-shared notebooks and the notes filed in them.

pub mod note;
pub mod notebook;

pub use note::{NewNote, Note, NotePatch, NoteType};
pub use notebook::{NewNotebook, Notebook};
