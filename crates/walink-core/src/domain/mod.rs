pub mod link;
pub mod phone;
pub mod table;

pub use link::whatsapp_link;
pub use phone::{normalize_phone, normalize_phone_str, NormalizedPhone, PhoneNote, PhoneRule};
pub use table::{Row, Table};
