use myflix_api_models::UserUpdate;
use myflix_client::notice::{PROFILE_UPDATED, deletion_notice};

use crate::cli::{ProfileDeleteArgs, ProfileUpdateArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::{require_text, resolve_password};
use crate::output::{render_message, render_profile};

pub(crate) async fn handle_profile_show(ctx: &AppContext) -> CliResult<()> {
    let profile = ctx.service.load_profile().await?;
    render_profile(&profile, ctx.output)
}

pub(crate) async fn handle_profile_update(
    ctx: &AppContext,
    args: ProfileUpdateArgs,
) -> CliResult<()> {
    if args.username.is_none()
        && args.email.is_none()
        && args.birthday.is_none()
        && !args.change_password
    {
        return Err(CliError::validation(
            "nothing to update; pass --username, --email, --birthday or --change-password",
        ));
    }

    let current = ctx.service.current_user().await?;
    let update = apply_changes(
        UserUpdate::from_user(&current),
        args.username.as_deref(),
        args.email.as_deref(),
        args.birthday,
    )?;
    let update = UserUpdate {
        password: if args.change_password {
            Some(resolve_password(None, "New password: ")?)
        } else {
            None
        },
        ..update
    };

    ctx.service.update_user(&update).await?;
    render_message(PROFILE_UPDATED, ctx.output)
}

/// Deletes the account; the stored session is cleared even when the server
/// refuses, and the failure is still reported.
pub(crate) async fn handle_profile_delete(
    ctx: &AppContext,
    args: ProfileDeleteArgs,
) -> CliResult<()> {
    if !args.yes {
        return Err(CliError::validation(
            "account deletion is permanent; re-run with --yes to confirm",
        ));
    }
    let result = ctx.service.delete_account().await;
    let notice = deletion_notice(&result);
    match result {
        Ok(()) => render_message(notice, ctx.output),
        Err(err) => Err(match CliError::from(err) {
            CliError::Failure(source) => CliError::failure(source.context(notice)),
            CliError::Validation(detail) | CliError::Unauthorized(detail) => {
                CliError::validation(format!("{notice} {detail}"))
            }
        }),
    }
}

fn apply_changes(
    base: UserUpdate,
    username: Option<&str>,
    email: Option<&str>,
    birthday: Option<chrono::NaiveDate>,
) -> CliResult<UserUpdate> {
    Ok(UserUpdate {
        username: username
            .map(|value| require_text(value, "username"))
            .transpose()?
            .unwrap_or(base.username),
        email: email
            .map(|value| require_text(value, "email"))
            .transpose()?
            .unwrap_or(base.email),
        birthday: birthday.or(base.birthday),
        password: base.password,
    })
}
