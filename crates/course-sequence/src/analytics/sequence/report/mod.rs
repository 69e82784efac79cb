mod render;
mod summary;
pub mod views;

pub use render::{format_decimal, ReportWriteError, SequenceReportDocument};
pub use summary::{emit_three_year_rows, emit_year_rows, CohortTally, PeriodTally, ReportRange};
pub use views::{
    ColumnStats, PriorScope, ReportBlock, ReportColumn, ReportPeriod, ReportRow, SequenceReport,
};
