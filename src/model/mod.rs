mod appearance;
mod user;
mod validation;

pub use appearance::Appearance;
pub use user::{Auth, SessionProvider, SharedData, User, VERIFICATION_LINK_SENT};
pub use validation::{
    MAX_LENGTH, MIN_PASSWORD_LENGTH, ValidationError, normalize_email, validate_current_password,
    validate_email, validate_name, validate_new_password,
};
