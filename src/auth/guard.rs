use crate::error::AppError;

/// Enforces that a resource's owner matches the authenticated caller.
///
/// This equality check is the entire authorization model; there are no roles
/// or admin overrides. Handlers must locate the target resource first and call
/// this before applying any mutation, so absent resources surface as 404
/// rather than 403.
pub fn authorize_owner(resource_owner: &str, caller_email: &str) -> Result<(), AppError> {
    if resource_owner == caller_email {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You are not allowed to edit this task".into(),
        ))
    }
}
