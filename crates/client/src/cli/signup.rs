//! Signup CLI command.

use clap::Parser;

use bookclub_core::signup::SignupRequest;

/// Submit a book club signup.
#[derive(Debug, Parser)]
pub struct SignupCommand {
    /// Name of the person signing up.
    #[arg(long)]
    pub name: String,

    /// Contact email.
    #[arg(long)]
    pub email: String,

    /// Genre whose club to join.
    #[arg(long)]
    pub genre: String,
}

impl SignupCommand {
    pub fn into_request(self) -> SignupRequest {
        SignupRequest::new(self.name, self.email, self.genre)
    }
}
