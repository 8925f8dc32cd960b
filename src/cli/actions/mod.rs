pub mod signin;
pub mod signup;

use crate::flows::types::{Credentials, SignupFields};

/// Action to be executed by the binary.
#[derive(Debug)]
pub enum Action {
    Signin { credentials: Credentials },
    Signup { fields: SignupFields },
}
