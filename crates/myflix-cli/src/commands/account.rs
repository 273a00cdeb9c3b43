use myflix_api_models::{Credentials, Registration};
use myflix_client::notice::{LOGGED_IN, LOGGED_OUT, LOGIN_FAILED, REGISTERED};

use crate::cli::{LoginArgs, RegisterArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::{require_text, resolve_password};
use crate::output::{render_message, render_user};

pub(crate) async fn handle_register(ctx: &AppContext, args: RegisterArgs) -> CliResult<()> {
    let registration = Registration {
        username: require_text(&args.username, "username")?,
        password: resolve_password(args.password, "Password: ")?,
        email: require_text(&args.email, "email")?,
        birthday: args.birthday,
    };
    ctx.service.register(&registration).await?;
    render_message(REGISTERED, ctx.output)
}

pub(crate) async fn handle_login(ctx: &AppContext, args: LoginArgs) -> CliResult<()> {
    let credentials = Credentials {
        username: require_text(&args.username, "username")?,
        password: resolve_password(args.password, "Password: ")?,
    };
    match ctx.service.login(&credentials).await {
        Ok(_) => render_message(LOGGED_IN, ctx.output),
        Err(err) => Err(match CliError::from(err) {
            CliError::Validation(detail) => {
                CliError::validation(format!("{LOGIN_FAILED} {detail}"))
            }
            CliError::Unauthorized(_) => CliError::validation(LOGIN_FAILED),
            other @ CliError::Failure(_) => other,
        }),
    }
}

pub(crate) fn handle_logout(ctx: &AppContext) -> CliResult<()> {
    ctx.service.logout()?;
    render_message(LOGGED_OUT, ctx.output)
}

pub(crate) fn handle_whoami(ctx: &AppContext) -> CliResult<()> {
    let session = ctx.service.session();
    let user = session
        .user()
        .ok_or_else(|| CliError::validation("not logged in; run `myflix login` first"))?;
    render_user(user, ctx.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{context_for, sample_user, seed_session};
    use httpmock::prelude::*;
    use myflix_client::session::{TOKEN_KEY, USERNAME_KEY};
    use myflix_client::SessionBackend;
    use serde_json::json;

    #[tokio::test]
    async fn register_posts_account_without_logging_in() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/users").json_body(json!({
                "Username": "ada",
                "Password": "secret",
                "Email": "ada@example.com",
                "Birthday": "1990-04-01"
            }));
            then.status(201).json_body(json!({
                "Username": "ada",
                "Email": "ada@example.com",
                "Birthday": "1990-04-01T00:00:00.000Z",
                "FavouriteMovies": []
            }));
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_for(&server.base_url(), &dir.path().join("session.json"));
        handle_register(
            &ctx,
            RegisterArgs {
                username: "ada".into(),
                password: Some("secret".into()),
                email: "ada@example.com".into(),
                birthday: myflix_api_models::parse_birthday("1990-04-01").ok(),
            },
        )
        .await
        .expect("registration succeeds");
        mock.assert();
        assert!(!ctx.service.is_authenticated());
    }

    #[tokio::test]
    async fn login_writes_session_file() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/login")
                .json_body(json!({ "Username": "ada", "Password": "secret" }));
            then.status(200).json_body(json!({
                "user": { "Username": "ada", "Email": "ada@example.com", "FavouriteMovies": [] },
                "token": "tok"
            }));
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("session.json");
        let ctx = context_for(&server.base_url(), &path);
        handle_login(
            &ctx,
            LoginArgs {
                username: "ada".into(),
                password: Some("secret".into()),
            },
        )
        .await
        .expect("login succeeds");

        let reopened = context_for(&server.base_url(), &path);
        assert!(reopened.service.is_authenticated());
        let backend = reopened.service.store().backend();
        assert_eq!(backend.read(TOKEN_KEY).expect("read").as_deref(), Some("tok"));
        assert_eq!(backend.read(USERNAME_KEY).expect("read").as_deref(), Some("ada"));
    }

    #[tokio::test]
    async fn failed_login_reports_server_detail() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/login");
            then.status(400).json_body(json!({ "message": "Incorrect password" }));
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_for(&server.base_url(), &dir.path().join("session.json"));
        let err = handle_login(
            &ctx,
            LoginArgs {
                username: "ada".into(),
                password: Some("wrong".into()),
            },
        )
        .await
        .expect_err("login rejected");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "Unable to log in. Incorrect password");
        assert!(!ctx.service.is_authenticated());
    }

    #[test]
    fn logout_and_whoami_follow_session_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        seed_session(&path, &sample_user(&["m1"]));

        let ctx = context_for("http://127.0.0.1:9", &path);
        handle_whoami(&ctx).expect("logged in");
        handle_logout(&ctx).expect("logout succeeds");

        let reopened = context_for("http://127.0.0.1:9", &path);
        let err = handle_whoami(&reopened).expect_err("logged out");
        assert_eq!(err.exit_code(), 2);
    }
}
