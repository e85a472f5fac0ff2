pub use super::account::Entity as Account;
pub use super::company::Entity as Company;
pub use super::company_member::Entity as CompanyMember;
pub use super::customer::Entity as Customer;
pub use super::game::Entity as Game;
pub use super::settings::Entity as Settings;
pub use super::user::Entity as User;
