pub mod cursor;
pub mod error;
pub mod export;
pub mod input;
pub mod results;

pub use cursor::resume_index;
pub use error::StoreError;
pub use export::export_csv;
pub use input::read_input_rows;
pub use results::ResultStore;
