pub mod about;
pub mod contact;
pub mod experience;
pub mod json_field;
pub mod media;
pub mod option_fields;
pub mod project;
