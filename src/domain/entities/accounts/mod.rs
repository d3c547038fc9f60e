//! 계정, 자격 증명, 세션, 비밀번호 재설정 토큰 엔티티

pub mod account;
pub mod credentials;
pub mod session;
pub mod reset_token;

pub use account::{Account, AccountKind};
pub use credentials::{Credentials, OtpRejection, OtpSecurity};
pub use session::{Session, SessionStatus};
pub use reset_token::ResetToken;
