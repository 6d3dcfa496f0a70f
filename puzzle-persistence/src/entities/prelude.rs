pub use super::autos::Entity as Autos;
pub use super::users::Entity as Users;
