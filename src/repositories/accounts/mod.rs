//! 계정과 인증 상태 리포지토리

pub mod account_repo;
pub mod credentials_repo;
pub mod session_repo;
pub mod reset_token_repo;

pub use account_repo::{AccountStore, AdminRepository, CustomerRepository};
pub use credentials_repo::CredentialsRepository;
pub use session_repo::SessionRepository;
pub use reset_token_repo::ResetTokenRepository;
