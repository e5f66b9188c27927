pub mod autocorrelation;
pub mod binning;
pub mod results;
pub mod series;

pub use autocorrelation::{autocorrelation_function, integrated_time};
pub use binning::BinningAccum;
pub use results::{ResultRow, RESULT_HEADER};
pub use series::{Estimate, SampleSeries};
