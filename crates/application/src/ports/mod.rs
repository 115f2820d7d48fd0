pub mod descriptor_parser;
pub mod intro_points;
pub mod responsibility;
pub mod statistics;

pub use descriptor_parser::{DescriptorParser, ParseMode, ParsedRecord};
pub use intro_points::{IntroPointDecryptor, IntroPointParser};
pub use responsibility::ResponsibilityOracle;
pub use statistics::{NoopStatisticsSink, StatisticsSink};
