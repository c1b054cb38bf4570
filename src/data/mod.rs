mod load;
mod parse;
mod record;

pub use load::Source;
pub use record::Record;
