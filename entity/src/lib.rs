pub mod prelude;

pub mod account;
pub mod company;
pub mod company_member;
pub mod customer;
pub mod game;
pub mod settings;
pub mod user;
