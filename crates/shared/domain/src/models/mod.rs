mod event;
mod principal;
mod registration;

pub use event::Event;
pub use principal::{Principal, PrincipalProfile};
pub use registration::Registration;
