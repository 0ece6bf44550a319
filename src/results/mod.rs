mod mapper;
mod result_set;
mod row;

pub use mapper::{map_row, map_rows};
pub use result_set::{DataSet, ResultSet};
pub use row::CustomDbRow;
