pub mod account;
pub mod product;

pub use account::{NewSignin, NewSignup, SigninRecord, SignupRecord};
pub use product::{Product, Recommendation};
