//! Login use-case service.
//!
//! # Invariants
//! - Wrong credentials are an ordinary `LoginStatus`, never an error.
//! - Only a `Valid` outcome marks the login as used.

use crate::model::login::{Login, LoginStatus};
use crate::model::unix_now;
use crate::repo::login_repo::LoginRepository;
use crate::repo::RepoResult;
use log::debug;

/// Use-case service wrapper for login operations.
pub struct LoginService<R: LoginRepository> {
    repo: R,
}

impl<R: LoginRepository> LoginService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_login(&self, username: &str, password: &str) -> RepoResult<Login> {
        self.repo.create_login(username, password)
    }

    /// Checks a username/password pair.
    ///
    /// # Errors
    /// - Returns repository errors only for storage failures.
    pub fn validate_login(&self, username: &str, password: &str) -> RepoResult<LoginStatus> {
        let Some(login) = self.repo.find_by_username(username)? else {
            debug!("event=login_validate module=service status=ok outcome=unknown_username");
            return Ok(LoginStatus::UnknownUsername);
        };

        if login.password != password {
            debug!(
                "event=login_validate module=service status=ok outcome=incorrect_password login_id={}",
                login.id
            );
            return Ok(LoginStatus::IncorrectPassword);
        }

        self.repo.mark_used(login.id, unix_now())?;
        debug!(
            "event=login_validate module=service status=ok outcome=valid login_id={}",
            login.id
        );
        Ok(LoginStatus::Valid)
    }
}
