mod docid;
mod document;
mod tokenize;

pub use docid::DocId;
pub use document::Document;
pub use tokenize::tokenise;
