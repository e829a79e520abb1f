pub mod modal_editing;
pub mod open_file;
pub mod quit;
pub mod rendering;
pub mod save;
