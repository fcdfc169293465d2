pub mod cells;
pub mod records;
pub mod token;

pub use cells::{select_day_cells, DateExtraction, DayCell};
pub use records::{DayRecord, RecordPattern};
pub use token::extract_token;
