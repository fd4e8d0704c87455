pub mod draft;
pub mod record;
