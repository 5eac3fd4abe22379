/// Account registration shared by the CLI and tests
use crate::{error::Result, services::AuthService};
use dottify_core::{
    validation::validate_text, Account, CatalogStore, Profile, Registration, Role,
    ValidationErrors,
};

/// Everything needed to register a user
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub roles: Vec<Role>,
}

/// Create an account with its profile and role memberships
pub async fn register(
    store: &dyn CatalogStore,
    auth: &AuthService,
    new: NewAccount,
) -> Result<(Account, Profile)> {
    let mut errors = ValidationErrors::default();
    errors.check(validate_text("username", &new.username));
    errors.check(validate_text("display_name", &new.display_name));
    if new.password.is_empty() {
        errors.push(
            "password",
            dottify_core::Violation::Required,
            "This field is required.",
        );
    }
    errors.into_result()?;

    let password_hash = auth.hash_password(&new.password)?;
    let (account, profile) = store
        .register(Registration {
            username: new.username.trim().to_string(),
            password_hash,
            display_name: new.display_name.trim().to_string(),
            roles: new.roles.clone(),
        })
        .await?;

    tracing::info!(
        account_id = account.id,
        profile_id = profile.id,
        roles = ?new.roles,
        "Registered account {}",
        account.username
    );

    Ok((account, profile))
}
