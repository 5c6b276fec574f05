/// Signup submission to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSignup {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Signin attempt to be persisted. Not checked against signups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSignin {
    pub username: String,
    pub password: String,
}

/// Stored signup row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Stored signin row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigninRecord {
    pub id: i64,
    pub username: String,
    pub password: String,
}

impl SignupRecord {
    pub fn new(id: i64, signup: NewSignup) -> Self {
        Self {
            id,
            username: signup.username,
            email: signup.email,
            password: signup.password,
        }
    }
}

impl SigninRecord {
    pub fn new(id: i64, signin: NewSignin) -> Self {
        Self {
            id,
            username: signin.username,
            password: signin.password,
        }
    }
}
