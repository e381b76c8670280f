//! Account operations, independent of HTTP.

use crate::error::AuthError;
use crate::model::{AdminProfile, AdminRecord, RegisterRequest};
use crate::password;
use lobby_database::{Database, DatabaseError};
use lobby_domain::config::BootstrapAdmin;
use lobby_domain::constants::ADMIN_TABLE;
use lobby_kernel::safe_nanoid;
use tracing::{debug, info, warn};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;

/// Lowercases and checks a username against `[a-z0-9_.-]{3,32}`.
pub(crate) fn normalize_username(raw: &str) -> Result<String, AuthError> {
    let username = raw.trim().to_lowercase();
    let valid_length = (USERNAME_MIN..=USERNAME_MAX).contains(&username.len());
    let valid_chars = username
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'_' | b'.' | b'-'));

    if valid_length && valid_chars {
        Ok(username)
    } else {
        Err(AuthError::validation(format!(
            "Username must be {USERNAME_MIN}-{USERNAME_MAX} characters of a-z, 0-9, '_', '.' or '-'"
        )))
    }
}

/// Checks `username`/`password` and stamps `lastLoginAt` on success.
///
/// Unknown users and wrong passwords fail identically; an unknown user is still checked
/// against `decoy_hash` so both take the same bcrypt time.
pub(crate) async fn authenticate(
    db: &Database,
    decoy_hash: &str,
    username: &str,
    password: &str,
) -> Result<AdminProfile, AuthError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AuthError::validation("Username and password are required"));
    }

    let username = username.trim().to_lowercase();
    let Some(mut record) = db.find_by::<AdminRecord>(ADMIN_TABLE, "username", username.as_str()).await?
    else {
        password::verify(password, decoy_hash).await?;
        return Err(AuthError::credentials(format!("unknown user `{username}`")));
    };

    if !password::verify(password, &record.password_hash).await? {
        return Err(AuthError::credentials(format!("wrong password for `{username}`")));
    }

    record.last_login_at = Some(lobby_kernel::time::now());
    db.upsert(ADMIN_TABLE, &record.id, &record).await?;

    info!(admin = %record.id, username = %record.username, "Admin logged in");
    Ok(record.into())
}

/// Current profile of the admin behind a token.
pub(crate) async fn profile(db: &Database, id: &str) -> Result<AdminProfile, AuthError> {
    load(db, id).await.map(Into::into)
}

/// Creates an account.
///
/// # Errors
/// [`AuthError::Validation`] for malformed input, [`AuthError::Conflict`] when the username is taken.
pub(crate) async fn register(
    db: &Database,
    cost: u32,
    request: RegisterRequest,
) -> Result<AdminProfile, AuthError> {
    let username = normalize_username(&request.username)?;
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AuthError::validation("Name must not be empty"));
    }
    password::check_strength(&request.password)?;

    if db.exists_with(ADMIN_TABLE, "username", username.as_str(), None).await? {
        return Err(AuthError::Conflict {
            message: format!("Username `{username}` is already taken").into(),
            context: None,
        });
    }

    let record = AdminRecord {
        id: safe_nanoid!(),
        username,
        name: name.to_owned(),
        password_hash: password::hash(&request.password, cost).await?,
        created_at: lobby_kernel::time::now(),
        last_login_at: None,
    };

    match db.create(ADMIN_TABLE, &record.id, &record).await {
        Ok(()) => {},
        Err(DatabaseError::Conflict { .. }) => {
            return Err(AuthError::Conflict {
                message: format!("Username `{}` is already taken", record.username).into(),
                context: Some("unique index".into()),
            });
        },
        Err(err) => return Err(err.into()),
    }

    info!(admin = %record.id, username = %record.username, "Admin account created");
    Ok(record.into())
}

/// Replaces the password of `id` after checking the current one.
pub(crate) async fn change_password(
    db: &Database,
    cost: u32,
    id: &str,
    current: &str,
    new: &str,
) -> Result<(), AuthError> {
    let mut record = load(db, id).await?;
    if !password::verify(current, &record.password_hash).await? {
        return Err(AuthError::validation("Current password is incorrect"));
    }
    password::check_strength(new)?;

    record.password_hash = password::hash(new, cost).await?;
    db.upsert(ADMIN_TABLE, id, &record).await?;

    info!(admin = %id, "Admin password changed");
    Ok(())
}

/// Creates the configured first account when the admin table is empty.
///
/// Returns the new profile, or `None` when nothing had to be done.
pub async fn bootstrap(
    db: &Database,
    cost: u32,
    admin: Option<&BootstrapAdmin>,
) -> Result<Option<AdminProfile>, AuthError> {
    let existing = db.count(ADMIN_TABLE).await?;
    if existing > 0 {
        debug!(existing, "Admin accounts present, skipping bootstrap");
        return Ok(None);
    }

    let Some(admin) = admin else {
        warn!("No admin account exists and no bootstrap admin is configured; logins are impossible");
        return Ok(None);
    };

    let request = RegisterRequest {
        username: admin.username.clone(),
        password: admin.password.clone(),
        name: admin.name.clone(),
    };
    let profile = register(db, cost, request).await?;
    info!(username = %profile.username, "Bootstrap admin created");

    Ok(Some(profile))
}

async fn load(db: &Database, id: &str) -> Result<AdminRecord, AuthError> {
    db.fetch::<AdminRecord>(ADMIN_TABLE, id).await?.ok_or_else(|| AuthError::NotFound {
        message: "Account no longer exists".into(),
        context: Some(id.to_owned().into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;

    const COST: u32 = 4;

    async fn database(name: &str) -> Database {
        Database::builder()
            .url("mem://")
            .session("auth_test", name)
            .migrations(migrations())
            .init()
            .await
            .expect("in-memory database")
    }

    fn decoy() -> String {
        password::decoy(COST).expect("decoy hash")
    }

    fn request(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest { username: username.into(), password: password.into(), name: "Site Admin".into() }
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let db = database("login").await;
        let created = register(&db, COST, request("Editor", "s3cret-pass")).await.unwrap();
        assert_eq!(created.username, "editor");
        assert_eq!(created.id.len(), 12);
        assert!(created.last_login_at.is_none());

        let profile = authenticate(&db, &decoy(), "EDITOR", "s3cret-pass").await.unwrap();
        assert_eq!(profile.id, created.id);
        assert!(profile.last_login_at.is_some());
        assert!(super::profile(&db, &created.id).await.unwrap().last_login_at.is_some());
    }

    #[tokio::test]
    async fn failed_logins_share_one_message() {
        let db = database("failures").await;
        register(&db, COST, request("editor", "s3cret-pass")).await.unwrap();

        let wrong = authenticate(&db, &decoy(), "editor", "not-the-pass").await.unwrap_err();
        let unknown = authenticate(&db, &decoy(), "nobody", "not-the-pass").await.unwrap_err();
        let (AuthError::Credentials { message: a, .. }, AuthError::Credentials { message: b, .. }) =
            (wrong, unknown)
        else {
            panic!("expected credential errors");
        };
        assert_eq!(a, b);

        let missing = authenticate(&db, &decoy(), " ", "").await.unwrap_err();
        assert!(matches!(missing, AuthError::Validation { .. }));
    }

    #[tokio::test]
    async fn unknown_users_still_pay_for_a_hash_check() {
        let db = database("decoy").await;
        let decoy = password::decoy(10).unwrap();

        let started = std::time::Instant::now();
        password::verify("not-the-pass", &decoy).await.unwrap();
        let one_check = started.elapsed();

        let started = std::time::Instant::now();
        let err = authenticate(&db, &decoy, "nobody", "not-the-pass").await.unwrap_err();
        assert!(matches!(err, AuthError::Credentials { .. }));
        assert!(started.elapsed() >= one_check / 4, "{:?} vs {one_check:?}", started.elapsed());
    }

    #[tokio::test]
    async fn duplicate_usernames_conflict() {
        let db = database("duplicates").await;
        register(&db, COST, request("editor", "s3cret-pass")).await.unwrap();

        let err = register(&db, COST, request("EDITOR", "another-pass")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict { .. }));
    }

    #[tokio::test]
    async fn register_validates_input() {
        let db = database("validation").await;
        assert!(matches!(
            register(&db, COST, request("x", "s3cret-pass")).await,
            Err(AuthError::Validation { .. })
        ));
        assert!(matches!(
            register(&db, COST, request("editor", "short")).await,
            Err(AuthError::Validation { .. })
        ));

        let mut nameless = request("editor", "s3cret-pass");
        nameless.name = "  ".into();
        assert!(matches!(register(&db, COST, nameless).await, Err(AuthError::Validation { .. })));
        assert_eq!(db.count(ADMIN_TABLE).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn password_change_requires_current_password() {
        let db = database("password").await;
        let admin = register(&db, COST, request("editor", "s3cret-pass")).await.unwrap();

        let err = change_password(&db, COST, &admin.id, "wrong-pass", "new-s3cret").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation { .. }));

        change_password(&db, COST, &admin.id, "s3cret-pass", "new-s3cret").await.unwrap();
        assert!(authenticate(&db, &decoy(), "editor", "s3cret-pass").await.is_err());
        assert!(authenticate(&db, &decoy(), "editor", "new-s3cret").await.is_ok());
    }

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let db = database("missing").await;
        assert!(matches!(profile(&db, "ghost").await, Err(AuthError::NotFound { .. })));
    }

    #[tokio::test]
    async fn bootstrap_runs_once() {
        let db = database("bootstrap").await;
        let seed = BootstrapAdmin {
            username: "owner".into(),
            password: "first-s3cret".into(),
            name: "Owner".into(),
        };

        assert!(bootstrap(&db, COST, None).await.unwrap().is_none());
        let created = bootstrap(&db, COST, Some(&seed)).await.unwrap().expect("created");
        assert_eq!(created.username, "owner");
        assert!(bootstrap(&db, COST, Some(&seed)).await.unwrap().is_none());
        assert_eq!(db.count(ADMIN_TABLE).await.unwrap(), 1);
    }

    #[test]
    fn usernames_are_lowercased_and_checked() {
        assert_eq!(normalize_username("  Site.Admin_1 ").unwrap(), "site.admin_1");
        assert!(normalize_username("ab").is_err());
        assert!(normalize_username(&"a".repeat(33)).is_err());
        assert!(normalize_username("no spaces").is_err());
        assert!(normalize_username("émile").is_err());
    }
}
