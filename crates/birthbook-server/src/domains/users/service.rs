use birthbook_core::{
    age_on, filter_by_age, parse_date, today, AgeError, AgeRange, User, UserPatch,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::domains::errors::ServiceError;
use crate::infra::metrics;

pub struct CreateUserCommand {
    pub name: Option<String>,
    pub birthday: Option<String>,
}

pub struct UpdateUserCommand {
    pub id: String,
    pub name: Option<String>,
    pub birthday: Option<String>,
}

pub struct UserAgeCommand {
    pub id: String,
    pub date: Option<String>,
}

pub struct SearchUsersCommand {
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub date: Option<String>,
}

fn parse_user_id(value: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(value.trim()).map_err(|_| ServiceError::BadRequest("invalid_id"))
}

fn parse_reference_date(value: Option<&str>) -> Result<chrono::NaiveDate, ServiceError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_date(value).map_err(|_| ServiceError::BadRequest("invalid_date")),
        None => Ok(today()),
    }
}

fn parse_bound(value: Option<&str>, code: &'static str) -> Result<Option<i64>, ServiceError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ServiceError::BadRequest(code)),
        None => Ok(None),
    }
}

fn validate_birthday(value: &str) -> Result<(), ServiceError> {
    parse_date(value)
        .map(|_| ())
        .map_err(|_| ServiceError::BadRequest("invalid_birthday"))
}

async fn load_active(state: &AppState, id: Uuid, operation: &str) -> Result<User, ServiceError> {
    match state.store.find_active(id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            metrics::user_operation(operation, "not_found");
            tracing::info!(
                event = "user_not_found",
                operation,
                user_id = %id,
                "User not found or already deleted"
            );
            Err(ServiceError::NotFound)
        }
        Err(err) => {
            metrics::user_operation(operation, "error");
            tracing::error!(event = "user_lookup_failed", operation, user_id = %id, error = %err);
            Err(err.into())
        }
    }
}

pub async fn create_user(state: &AppState, cmd: CreateUserCommand) -> Result<User, ServiceError> {
    let Some(name) = cmd.name else {
        metrics::user_operation("create", "invalid");
        return Err(ServiceError::BadRequest("name_required"));
    };
    let Some(birthday) = cmd.birthday else {
        metrics::user_operation("create", "invalid");
        return Err(ServiceError::BadRequest("birthday_required"));
    };
    if let Err(err) = validate_birthday(&birthday) {
        metrics::user_operation("create", "invalid");
        return Err(err);
    }

    let user = User::new_active(name, birthday);
    if let Err(err) = state.store.insert(&user).await {
        metrics::user_operation("create", "error");
        tracing::error!(event = "user_create_failed", error = %err);
        return Err(err.into());
    }

    metrics::user_operation("create", "ok");
    tracing::info!(event = "user_created", user_id = %user.id, "User created");
    Ok(user)
}

pub async fn get_user(state: &AppState, id: &str) -> Result<User, ServiceError> {
    let id = parse_user_id(id)?;
    let user = load_active(state, id, "get").await?;
    metrics::user_operation("get", "ok");
    Ok(user)
}

pub async fn update_user(state: &AppState, cmd: UpdateUserCommand) -> Result<User, ServiceError> {
    let id = parse_user_id(&cmd.id)?;
    load_active(state, id, "update").await?;

    let patch = UserPatch {
        name: cmd.name,
        birthday: cmd.birthday,
    };
    if patch.is_empty() {
        metrics::user_operation("update", "invalid");
        return Err(ServiceError::BadRequest("no_changes"));
    }
    if let Some(birthday) = patch.birthday.as_deref() {
        if let Err(err) = validate_birthday(birthday) {
            metrics::user_operation("update", "invalid");
            return Err(err);
        }
    }

    let updated = match state.store.update_fields(id, &patch).await {
        Ok(Some(user)) => user,
        // Soft-deleted between the lookup and the write.
        Ok(None) => {
            metrics::user_operation("update", "not_found");
            return Err(ServiceError::NotFound);
        }
        Err(err) => {
            metrics::user_operation("update", "error");
            tracing::error!(event = "user_update_failed", user_id = %id, error = %err);
            return Err(err.into());
        }
    };

    metrics::user_operation("update", "ok");
    tracing::info!(
        event = "user_updated",
        user_id = %id,
        name_changed = patch.name.is_some(),
        birthday_changed = patch.birthday.is_some(),
        "User updated"
    );
    Ok(updated)
}

pub async fn delete_user(state: &AppState, id: &str) -> Result<(), ServiceError> {
    let id = parse_user_id(id)?;
    load_active(state, id, "delete").await?;

    match state.store.soft_delete(id).await {
        Ok(true) => {
            metrics::user_operation("delete", "ok");
            tracing::info!(event = "user_soft_deleted", user_id = %id, "User soft-deleted");
            Ok(())
        }
        Ok(false) => {
            metrics::user_operation("delete", "not_found");
            Err(ServiceError::NotFound)
        }
        Err(err) => {
            metrics::user_operation("delete", "error");
            tracing::error!(event = "user_delete_failed", user_id = %id, error = %err);
            Err(err.into())
        }
    }
}

pub async fn user_age(state: &AppState, cmd: UserAgeCommand) -> Result<u32, ServiceError> {
    let id = parse_user_id(&cmd.id)?;
    let reference = parse_reference_date(cmd.date.as_deref())?;
    let user = load_active(state, id, "age").await?;

    let age = parse_date(&user.birthday).and_then(|birthday| age_on(birthday, reference));
    match age {
        Ok(age) => {
            metrics::user_operation("age", "ok");
            tracing::info!(event = "user_age_computed", user_id = %id, %reference, age);
            Ok(age)
        }
        Err(err) => {
            metrics::user_operation("age", "invalid");
            tracing::warn!(event = "user_age_failed", user_id = %id, error = %err);
            Err(age_error_code(&err))
        }
    }
}

pub async fn search_users(
    state: &AppState,
    cmd: SearchUsersCommand,
) -> Result<Vec<User>, ServiceError> {
    let range = AgeRange::new(
        parse_bound(cmd.min_age.as_deref(), "invalid_min_age")?,
        parse_bound(cmd.max_age.as_deref(), "invalid_max_age")?,
    );
    let reference = parse_reference_date(cmd.date.as_deref())?;

    let candidates = match state.store.list_active().await {
        Ok(users) => users,
        Err(err) => {
            metrics::user_operation("search", "error");
            tracing::error!(event = "user_search_failed", error = %err);
            return Err(err.into());
        }
    };
    let scanned = candidates.len();
    let policy = state.config.search.malformed_birthdays;
    let outcome = match filter_by_age(candidates, range, reference, policy) {
        Ok(outcome) => outcome,
        Err(err) => {
            metrics::user_operation("search", "invalid");
            tracing::warn!(event = "user_search_rejected", error = %err);
            return Err(age_error_code(&err));
        }
    };
    if !outcome.skipped.is_empty() {
        metrics::search_skipped(outcome.skipped.len());
    }

    metrics::user_operation("search", "ok");
    tracing::info!(
        event = "user_search_completed",
        min_age = ?range.min_age,
        max_age = ?range.max_age,
        %reference,
        scanned,
        matched = outcome.users.len(),
        skipped = outcome.skipped.len(),
    );
    Ok(outcome.users)
}

fn age_error_code(err: &AgeError) -> ServiceError {
    match err {
        AgeError::InvalidDate { .. } => ServiceError::BadRequest("invalid_birthday"),
        AgeError::BeforeBirth { .. } => ServiceError::BadRequest("date_before_birthday"),
    }
}
