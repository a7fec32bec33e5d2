//! Account service.
//!
//! Local pseudo-authentication over the key-value store: signup, login,
//! logout, profile update and password change. Nothing here is a security
//! boundary; see [`PasswordCipher`].

mod cipher;
mod error;

pub use cipher::{CipherError, PasswordCipher};
pub use error::AuthError;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_core::validation;
use tracing::{info, instrument, warn};

use crate::db::KeyValueStore;
use crate::db::users::UserRepository;
use crate::models::user::UserRecord;

/// Most accounts kept in the store; signing up beyond this evicts the oldest.
pub const MAX_USERS: usize = 5;

/// Signup form input.
#[derive(Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login form input.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Password change form input.
#[derive(Clone, Default)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Profile form input.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
}

impl From<&UserRecord> for ProfileForm {
    fn from(user: &UserRecord) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.to_string(),
            mobile: user.mobile.to_string(),
        }
    }
}

/// Account service.
///
/// Every read-modify-write of the store runs under one writer lock, so
/// concurrent callers in this process are serialized. Separate processes
/// sharing a data file are not coordinated.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn KeyValueStore>,
    cipher: PasswordCipher,
    writer: Arc<Mutex<()>>,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, cipher: PasswordCipher) -> Self {
        Self {
            store,
            cipher,
            writer: Arc::new(Mutex::new(())),
        }
    }

    fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self.store.as_ref())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Registration and Login
    // =========================================================================

    /// Register a new account and log it in.
    ///
    /// When the store already holds [`MAX_USERS`] accounts the oldest one is
    /// removed first, even if it is the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for an invalid form.
    /// Returns `AuthError::DuplicateEmail` if the email is already registered.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn signup(&self, form: &SignupForm) -> Result<UserRecord, AuthError> {
        let first_name = validation::required("firstName", "First Name", &form.first_name)?;
        let last_name = validation::required("lastName", "Last Name", &form.last_name)?;
        let email = validation::email(&form.email)?;
        let mobile = validation::mobile(&form.mobile)?;
        validation::password("password", "Password", &form.password)?;
        validation::confirmation(
            "confirmPassword",
            "Confirm Password",
            &form.confirm_password,
            &form.password,
        )?;

        let _guard = self.lock();
        let users = self.users();
        let mut registered = users.get_users()?;
        if registered.iter().any(|user| user.email == email) {
            return Err(AuthError::DuplicateEmail);
        }

        let record = UserRecord {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email,
            mobile,
            password: self.cipher.encrypt(&form.password)?,
        };

        if registered.len() >= MAX_USERS {
            let evicted = registered.remove(0);
            info!(evicted = %evicted.email, "Store full, evicting oldest account");
        }
        registered.push(record.clone());
        users.save_users(&registered)?;
        users.save_session(&record)?;

        info!("Account created");
        Ok(record)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownEmail` if no account has the email.
    /// Returns `AuthError::InvalidPassword` if the password is wrong; the
    /// current session is left as it was.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn login(&self, form: &LoginForm) -> Result<UserRecord, AuthError> {
        let email = validation::email(&form.email)?;
        validation::password("password", "Password", &form.password)?;

        let _guard = self.lock();
        let users = self.users();
        let user = users
            .get_by_email(&email)?
            .ok_or(AuthError::UnknownEmail)?;

        if !self.cipher.matches(&user.password, &form.password) {
            return Err(AuthError::InvalidPassword);
        }

        users.save_session(&user)?;
        info!("Logged in");
        Ok(user)
    }

    /// Log out. Logging out without a session is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store cannot be written.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        let _guard = self.lock();
        self.users().clear_session()?;
        info!("Logged out");
        Ok(())
    }

    /// The logged-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store cannot be read.
    pub fn current_user(&self) -> Result<Option<UserRecord>, AuthError> {
        Ok(self.users().get_session()?)
    }

    // =========================================================================
    // Account Management
    // =========================================================================

    /// Change the logged-in user's password.
    ///
    /// The new envelope is written to both the session and the registered
    /// account with the session's email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NoActiveSession` when logged out.
    /// Returns `AuthError::IncorrectCurrentPassword` if the current password
    /// is wrong.
    #[instrument(skip(self, form))]
    pub fn change_password(&self, form: &PasswordChangeForm) -> Result<UserRecord, AuthError> {
        validation::required(
            "currentPassword",
            "Current Password",
            &form.current_password,
        )?;
        validation::password("newPassword", "New Password", &form.new_password)?;
        validation::confirmation(
            "confirmNewPassword",
            "Confirm New Password",
            &form.confirm_new_password,
            &form.new_password,
        )?;

        let _guard = self.lock();
        let users = self.users();
        let mut session = users.get_session()?.ok_or(AuthError::NoActiveSession)?;
        if !self.cipher.matches(&session.password, &form.current_password) {
            return Err(AuthError::IncorrectCurrentPassword);
        }

        session.password = self.cipher.encrypt(&form.new_password)?;

        let mut registered = users.get_users()?;
        if let Some(stored) = registered
            .iter_mut()
            .find(|user| user.email == session.email)
        {
            stored.password.clone_from(&session.password);
            users.save_users(&registered)?;
        } else {
            warn!(email = %session.email, "Logged-in account is no longer registered, updating session only");
        }
        users.save_session(&session)?;

        info!(email = %session.email, "Password changed");
        Ok(session)
    }

    /// Update the logged-in user's name, email and mobile number.
    ///
    /// The stored account is matched by the email it had before the update;
    /// its password is kept.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for an invalid form.
    /// Returns `AuthError::NoActiveSession` when logged out.
    /// Returns `AuthError::DuplicateEmail` if the new email belongs to another
    /// account.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn update_profile(&self, form: &ProfileForm) -> Result<UserRecord, AuthError> {
        let first_name = validation::required("firstName", "First Name", &form.first_name)?;
        let last_name = validation::required("lastName", "Last Name", &form.last_name)?;
        let email = validation::email(&form.email)?;
        let mobile = validation::mobile(&form.mobile)?;

        let _guard = self.lock();
        let users = self.users();
        let session = users.get_session()?.ok_or(AuthError::NoActiveSession)?;
        let mut registered = users.get_users()?;

        if email != session.email && registered.iter().any(|user| user.email == email) {
            return Err(AuthError::DuplicateEmail);
        }

        let apply = |user: &mut UserRecord| {
            first_name.clone_into(&mut user.first_name);
            last_name.clone_into(&mut user.last_name);
            user.email.clone_from(&email);
            user.mobile.clone_from(&mobile);
        };

        for stored in registered
            .iter_mut()
            .filter(|user| user.email == session.email)
        {
            apply(stored);
        }
        let mut merged = session;
        apply(&mut merged);

        users.save_users(&registered)?;
        users.save_session(&merged)?;

        info!("Profile updated");
        Ok(merged)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::EMBEDDED_CIPHER_SECRET;
    use crate::db::MemoryStore;

    fn service() -> (AccountService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let cipher = PasswordCipher::new(&SecretString::from(EMBEDDED_CIPHER_SECRET));
        (AccountService::new(store.clone(), cipher), store)
    }

    fn signup_form(email: &str) -> SignupForm {
        SignupForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            mobile: "0123456789".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        }
    }

    fn login_form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn registered(store: &MemoryStore) -> Vec<UserRecord> {
        UserRepository::new(store).get_users().unwrap()
    }

    fn session(store: &MemoryStore) -> Option<UserRecord> {
        UserRepository::new(store).get_session().unwrap()
    }

    // =========================================================================
    // Signup
    // =========================================================================

    #[test]
    fn test_signup_persists_account_and_session() {
        let (accounts, store) = service();
        let user = accounts.signup(&signup_form("jane@example.com")).unwrap();

        assert_eq!(user.email.as_str(), "jane@example.com");
        assert_ne!(user.password, "hunter22");
        assert_eq!(registered(&store), vec![user.clone()]);
        assert_eq!(session(&store), Some(user));
    }

    #[test]
    fn test_signup_duplicate_email_leaves_store_unchanged() {
        let (accounts, store) = service();
        accounts.signup(&signup_form("jane@example.com")).unwrap();
        accounts.signup(&signup_form("john@example.com")).unwrap();
        let before = registered(&store);

        let result = accounts.signup(&signup_form("jane@example.com"));
        assert!(matches!(result, Err(AuthError::DuplicateEmail)));
        assert_eq!(registered(&store), before);
        assert_eq!(
            session(&store).unwrap().email.as_str(),
            "john@example.com"
        );
    }

    #[test]
    fn test_sixth_signup_evicts_oldest() {
        let (accounts, store) = service();
        for n in 1..=5 {
            accounts
                .signup(&signup_form(&format!("user{n}@example.com")))
                .unwrap();
        }
        accounts.signup(&signup_form("user6@example.com")).unwrap();

        let emails: Vec<String> = registered(&store)
            .iter()
            .map(|user| user.email.to_string())
            .collect();
        assert_eq!(
            emails,
            [
                "user2@example.com",
                "user3@example.com",
                "user4@example.com",
                "user5@example.com",
                "user6@example.com",
            ]
        );
    }

    #[test]
    fn test_eviction_ignores_logged_in_user() {
        let (accounts, store) = service();
        accounts.signup(&signup_form("user1@example.com")).unwrap();
        for n in 2..=5 {
            accounts
                .signup(&signup_form(&format!("user{n}@example.com")))
                .unwrap();
        }
        accounts.login(&login_form("user1@example.com", "hunter22")).unwrap();

        accounts.signup(&signup_form("user6@example.com")).unwrap();
        assert_eq!(registered(&store).len(), MAX_USERS);
        assert!(
            accounts
                .login(&login_form("user1@example.com", "hunter22"))
                .is_err()
        );
    }

    #[test]
    fn test_signup_validation() {
        let (accounts, store) = service();
        let cases = [
            (
                SignupForm {
                    first_name: String::new(),
                    ..signup_form("jane@example.com")
                },
                "firstName",
            ),
            (signup_form("not-an-email"), "email"),
            (
                SignupForm {
                    mobile: "12345".to_string(),
                    ..signup_form("jane@example.com")
                },
                "mobile",
            ),
            (
                SignupForm {
                    password: "short".to_string(),
                    confirm_password: "short".to_string(),
                    ..signup_form("jane@example.com")
                },
                "password",
            ),
            (
                SignupForm {
                    confirm_password: "different".to_string(),
                    ..signup_form("jane@example.com")
                },
                "confirmPassword",
            ),
        ];

        for (form, expected) in cases {
            match accounts.signup(&form) {
                Err(AuthError::Validation { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected validation error on {expected}, got {other:?}"),
            }
        }
        assert!(registered(&store).is_empty());
    }

    // =========================================================================
    // Login / Logout
    // =========================================================================

    #[test]
    fn test_login_sets_matched_record_as_session() {
        let (accounts, store) = service();
        let jane = accounts.signup(&signup_form("jane@example.com")).unwrap();
        accounts.signup(&signup_form("john@example.com")).unwrap();

        let user = accounts
            .login(&login_form("jane@example.com", "hunter22"))
            .unwrap();
        assert_eq!(user, jane);
        assert_eq!(session(&store), Some(jane));
    }

    #[test]
    fn test_login_wrong_password_keeps_session() {
        let (accounts, store) = service();
        accounts.signup(&signup_form("jane@example.com")).unwrap();
        let john = accounts.signup(&signup_form("john@example.com")).unwrap();

        let result = accounts.login(&login_form("jane@example.com", "wrong-password"));
        assert!(matches!(result, Err(AuthError::InvalidPassword)));
        assert_eq!(session(&store), Some(john));
    }

    #[test]
    fn test_login_unknown_email() {
        let (accounts, _) = service();
        let result = accounts.login(&login_form("nobody@example.com", "hunter22"));
        assert!(matches!(result, Err(AuthError::UnknownEmail)));
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (accounts, store) = service();
        accounts.signup(&signup_form("jane@example.com")).unwrap();
        accounts.logout().unwrap();
        assert!(session(&store).is_none());
        accounts.logout().unwrap();
        assert!(accounts.current_user().unwrap().is_none());
        assert_eq!(registered(&store).len(), 1);
    }

    // =========================================================================
    // Password Change
    // =========================================================================

    fn password_form(current: &str, new: &str) -> PasswordChangeForm {
        PasswordChangeForm {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_new_password: new.to_string(),
        }
    }

    #[test]
    fn test_change_password_updates_session_and_account() {
        let (accounts, store) = service();
        accounts.signup(&signup_form("jane@example.com")).unwrap();

        let updated = accounts
            .change_password(&password_form("hunter22", "correct-horse"))
            .unwrap();
        assert_eq!(session(&store), Some(updated.clone()));
        assert_eq!(registered(&store)[0].password, updated.password);

        accounts.logout().unwrap();
        assert!(matches!(
            accounts.login(&login_form("jane@example.com", "hunter22")),
            Err(AuthError::InvalidPassword)
        ));
        assert!(
            accounts
                .login(&login_form("jane@example.com", "correct-horse"))
                .is_ok()
        );
    }

    #[test]
    fn test_change_password_wrong_current() {
        let (accounts, store) = service();
        let user = accounts.signup(&signup_form("jane@example.com")).unwrap();

        let result = accounts.change_password(&password_form("not-it", "correct-horse"));
        assert!(matches!(result, Err(AuthError::IncorrectCurrentPassword)));
        assert_eq!(session(&store), Some(user));
    }

    #[test]
    fn test_change_password_requires_session() {
        let (accounts, _) = service();
        let result = accounts.change_password(&password_form("hunter22", "correct-horse"));
        assert!(matches!(result, Err(AuthError::NoActiveSession)));
    }

    #[test]
    fn test_change_password_confirmation_mismatch() {
        let (accounts, _) = service();
        accounts.signup(&signup_form("jane@example.com")).unwrap();
        let form = PasswordChangeForm {
            confirm_new_password: "something-else".to_string(),
            ..password_form("hunter22", "correct-horse")
        };
        assert!(matches!(
            accounts.change_password(&form),
            Err(AuthError::Validation {
                field: "confirmNewPassword",
                ..
            })
        ));
    }

    // =========================================================================
    // Profile Update
    // =========================================================================

    fn profile_form(email: &str) -> ProfileForm {
        ProfileForm {
            first_name: "Janet".to_string(),
            last_name: "Roe".to_string(),
            email: email.to_string(),
            mobile: "9876543210".to_string(),
        }
    }

    #[test]
    fn test_update_profile_keeps_password() {
        let (accounts, store) = service();
        let before = accounts.signup(&signup_form("jane@example.com")).unwrap();

        let after = accounts
            .update_profile(&profile_form("janet@example.com"))
            .unwrap();
        assert_eq!(after.full_name(), "Janet Roe");
        assert_eq!(after.password, before.password);
        assert_eq!(registered(&store), vec![after.clone()]);
        assert_eq!(session(&store), Some(after));

        accounts.logout().unwrap();
        assert!(
            accounts
                .login(&login_form("janet@example.com", "hunter22"))
                .is_ok()
        );
    }

    #[test]
    fn test_update_profile_same_email() {
        let (accounts, _) = service();
        accounts.signup(&signup_form("jane@example.com")).unwrap();
        let after = accounts
            .update_profile(&profile_form("jane@example.com"))
            .unwrap();
        assert_eq!(after.mobile.as_str(), "9876543210");
    }

    #[test]
    fn test_update_profile_email_collision() {
        let (accounts, store) = service();
        accounts.signup(&signup_form("john@example.com")).unwrap();
        accounts.signup(&signup_form("jane@example.com")).unwrap();
        let before = registered(&store);

        let result = accounts.update_profile(&profile_form("john@example.com"));
        assert!(matches!(result, Err(AuthError::DuplicateEmail)));
        assert_eq!(registered(&store), before);
    }

    #[test]
    fn test_update_profile_requires_session() {
        let (accounts, _) = service();
        let result = accounts.update_profile(&profile_form("jane@example.com"));
        assert!(matches!(result, Err(AuthError::NoActiveSession)));
    }

    #[test]
    fn test_profile_form_from_record() {
        let (accounts, _) = service();
        let user = accounts.signup(&signup_form("jane@example.com")).unwrap();
        let form = ProfileForm::from(&user);
        assert_eq!(form.email, "jane@example.com");
        assert_eq!(form.mobile, "0123456789");
    }
}
