pub mod assemble;
pub mod dictionary;
pub mod extract;
pub mod language;
pub mod patterns;
pub mod preprocess;

pub use assemble::{RecordAssembler, assemble};
pub use dictionary::DictionaryRecord;
pub use extract::{FieldPattern, FnPattern, extract_first};
pub use language::Language;
