pub mod catalog;
pub mod editor;
pub mod errors;
pub mod favicon;
pub mod generation;
pub mod http;
pub mod media;
pub mod models;
pub mod textclean;
pub mod workspace;

pub use editor::{
    Draft,
    Editor,
    FieldChecks,
    VerifyField,
};
pub use errors::ReflinksError;
pub use generation::GenerationKind;
pub use models::{
    NaturalKey,
    Record,
};
pub use workspace::Workspace;
