pub mod prelude;

pub mod autos;
pub mod users;
