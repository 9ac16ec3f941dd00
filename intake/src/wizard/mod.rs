// Intake wizard core: steps, validation, visibility, drafts, attachments, submission.

pub mod attachments;
pub mod autocomplete;
pub mod controller;
pub mod draft;
pub mod entry;
pub mod step;
pub mod summary;
pub mod validation;
pub mod visibility;
