//! Account commands: signup, login, logout, profile and password changes.

use std::io::Write;

use clap::Args;
use shopfront_storefront::error::{clear_sentry_user, set_sentry_user};
use shopfront_storefront::services::auth::{
    AuthError, LoginForm, PasswordChangeForm, ProfileForm, SignupForm,
};
use shopfront_storefront::state::AppState;

use super::CommandError;
use crate::render;

#[derive(Debug, Clone, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    /// Ten-digit mobile number
    #[arg(long)]
    pub mobile: String,
    /// At least six characters
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

/// Profile fields to change; omitted fields keep their current value.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct PasswordArgs {
    /// Current password
    #[arg(long)]
    pub current: String,
    /// New password, at least six characters
    #[arg(long)]
    pub new: String,
    /// New password again
    #[arg(long)]
    pub confirm: String,
}

/// Register and log in.
///
/// # Errors
///
/// Returns `CommandError` if the signup is rejected or output fails.
pub fn signup(state: &AppState, args: SignupArgs, out: &mut impl Write) -> Result<(), CommandError> {
    let user = state.accounts().signup(&SignupForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        mobile: args.mobile,
        password: args.password,
        confirm_password: args.confirm_password,
    })?;
    set_sentry_user(user.email.as_str());
    writeln!(out, "Welcome, {}!", user.full_name())?;
    Ok(())
}

/// Log in.
///
/// # Errors
///
/// Returns `CommandError` if the credentials are rejected or output fails.
pub fn login(state: &AppState, args: LoginArgs, out: &mut impl Write) -> Result<(), CommandError> {
    let user = state.accounts().login(&LoginForm {
        email: args.email,
        password: args.password,
    })?;
    set_sentry_user(user.email.as_str());
    writeln!(out, "Logged in as {}", user.email)?;
    Ok(())
}

/// Log out.
///
/// # Errors
///
/// Returns `CommandError` if the store cannot be written or output fails.
pub fn logout(state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    state.accounts().logout()?;
    clear_sentry_user();
    writeln!(out, "Logged out")?;
    Ok(())
}

/// Show the logged-in user.
///
/// # Errors
///
/// Returns `CommandError` if the store cannot be read or output fails.
pub fn whoami(state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    let user = state.accounts().current_user()?;
    render::account(out, user.as_ref())?;
    Ok(())
}

/// Update the logged-in user's profile.
///
/// # Errors
///
/// Returns `CommandError` when logged out, if the update is rejected, or if
/// output fails.
pub fn profile(state: &AppState, args: ProfileArgs, out: &mut impl Write) -> Result<(), CommandError> {
    let accounts = state.accounts();
    let current = accounts
        .current_user()?
        .ok_or(AuthError::NoActiveSession)?;

    let mut form = ProfileForm::from(&current);
    if let Some(first_name) = args.first_name {
        form.first_name = first_name;
    }
    if let Some(last_name) = args.last_name {
        form.last_name = last_name;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(mobile) = args.mobile {
        form.mobile = mobile;
    }

    let user = accounts.update_profile(&form)?;
    if user.email != current.email {
        set_sentry_user(user.email.as_str());
    }
    writeln!(out, "Profile updated successfully!")?;
    render::account(out, Some(&user))?;
    Ok(())
}

/// Change the logged-in user's password.
///
/// # Errors
///
/// Returns `CommandError` when logged out, if the current password is wrong,
/// or if output fails.
pub fn password(state: &AppState, args: PasswordArgs, out: &mut impl Write) -> Result<(), CommandError> {
    state.accounts().change_password(&PasswordChangeForm {
        current_password: args.current,
        new_password: args.new,
        confirm_new_password: args.confirm,
    })?;
    writeln!(out, "Password changed successfully!")?;
    Ok(())
}
