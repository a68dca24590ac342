//! Report handlers

mod assemble_report;

pub use assemble_report::{
    AssembleReportCommand, AssembleReportHandler, AssembleReportSettings, AssembledReport,
    ReportError,
};
