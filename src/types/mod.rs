pub mod requests;

pub use requests::{
    CreateAccountRequest, UpdateEmailRequest, UpdateProfileImageRequest, UpdateUserRequest,
};
