pub mod json_object;
pub mod page;

pub use json_object::JsonObject;
pub use page::Page;
