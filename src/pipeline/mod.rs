// Comparison pipeline — normalized corpus in, explicit report out.

pub mod compare;

pub use compare::{
    run, CompareSettings, ComparisonError, ComparisonReport, DocumentWarning, PairRecord,
    PairReport, WarningKind,
};
