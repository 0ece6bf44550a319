use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use futures_util::TryStreamExt;
use tiberius::{ColumnData, FromSql, QueryItem, QueryStream};

use crate::error::SqlDaoError;
use crate::results::{DataSet, ResultSet};
use crate::types::RowValues;

/// Drain a query stream into one `ResultSet` per result the server sent.
///
/// # Errors
/// Returns `SqlDaoError` if fetching a row fails or a column type is unsupported.
pub async fn build_data_set(mut stream: QueryStream<'_>) -> Result<DataSet, SqlDaoError> {
    let mut tables: Vec<ResultSet> = Vec::new();

    while let Some(item) = stream.try_next().await? {
        match item {
            QueryItem::Metadata(meta) => {
                let column_names: Vec<String> = meta
                    .columns()
                    .iter()
                    .map(|col| col.name().to_string())
                    .collect();
                let mut result_set = ResultSet::with_capacity(10);
                result_set.set_column_names(Arc::new(column_names));
                tables.push(result_set);
            }
            QueryItem::Row(row) => {
                let result_set = tables.last_mut().ok_or_else(|| {
                    SqlDaoError::ExecutionError("SQL Server sent a row before its metadata".into())
                })?;
                let mut row_values = Vec::with_capacity(row.len());
                for data in row {
                    row_values.push(column_value(data)?);
                }
                result_set.add_row_values(row_values);
            }
        }
    }

    Ok(DataSet::new(tables))
}

/// Convert one cell into `RowValues`.
fn column_value(data: ColumnData<'static>) -> Result<RowValues, SqlDaoError> {
    let value = match data {
        ColumnData::U8(v) => v.map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))),
        ColumnData::I16(v) => v.map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))),
        ColumnData::I32(v) => v.map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))),
        ColumnData::I64(v) => v.map_or(RowValues::Null, RowValues::Int),
        ColumnData::F32(v) => v.map_or(RowValues::Null, |v| RowValues::Float(f64::from(v))),
        ColumnData::F64(v) => v.map_or(RowValues::Null, RowValues::Float),
        ColumnData::Bit(v) => v.map_or(RowValues::Null, RowValues::Bool),
        ColumnData::String(v) => v.map_or(RowValues::Null, |s| RowValues::Text(s.into_owned())),
        ColumnData::Guid(v) => v.map_or(RowValues::Null, |g| RowValues::Text(g.to_string())),
        ColumnData::Binary(v) => v.map_or(RowValues::Null, |b| RowValues::Blob(b.into_owned())),
        ColumnData::Numeric(v) => v.map_or(RowValues::Null, |n| {
            let text = n.to_string();
            text.parse::<f64>()
                .map_or(RowValues::Text(text), RowValues::Float)
        }),
        other => return temporal_value(&other),
    };
    Ok(value)
}

fn temporal_value(data: &ColumnData<'static>) -> Result<RowValues, SqlDaoError> {
    if let Ok(v) = NaiveDateTime::from_sql(data) {
        return Ok(v.map_or(RowValues::Null, RowValues::Timestamp));
    }
    if let Ok(v) = DateTime::<FixedOffset>::from_sql(data) {
        return Ok(v.map_or(RowValues::Null, |dt| RowValues::Timestamp(dt.naive_utc())));
    }
    if let Ok(v) = NaiveDate::from_sql(data) {
        return Ok(v
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map_or(RowValues::Null, RowValues::Timestamp));
    }
    Err(SqlDaoError::Unimplemented(format!(
        "unsupported SQL Server column value: {data:?}"
    )))
}
