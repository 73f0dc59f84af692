//! Interactive terminal session.
//!
//! Renders the login screen while logged out and the role's workspace
//! while logged in. Every prompt answer counts as user activity; idle
//! notices from the monitor are drained before that activity is stamped
//! so an expired session is never revived.

use std::collections::VecDeque;
use std::sync::Arc;

use dialoguer::{Confirm, Input, Password, Select};
use tabled::Tabled;
use tokio::sync::{broadcast, mpsc};

use erp_auth::{
    AccessGate, AuthError, NavigationOutcome, NavigationShell, PasswordHasher, SessionManager,
    SessionNotice, StaticCredentialStore,
};
use erp_core::config::AppConfig;
use erp_core::error::AppError;
use erp_core::result::AppResult;
use erp_core::events::{AccessEvent, DomainEvent, EventBus, EventPayload, SessionEvent};
use erp_core::traits::SystemClock;
use erp_entity::ViewId;

use crate::output::{print_error, print_list, print_success, print_warning};

/// Number of audit entries kept for the administration view.
const AUDIT_HISTORY: usize = 20;

/// What the main loop does after a screen returns.
enum Flow {
    Continue,
    Quit,
}

/// Runs the interactive session until the user quits.
pub async fn run(config: AppConfig) -> AppResult<()> {
    let password_hasher = PasswordHasher::new(&config.auth)?;
    let credentials = StaticCredentialStore::seeded(&password_hasher, &config.auth.seed_password)?;
    let events = EventBus::default();
    let mut audit = AuditLog::new(events.subscribe());

    let sessions = Arc::new(SessionManager::new(
        Arc::new(credentials),
        password_hasher,
        Arc::new(SystemClock),
        events,
        config.auth.clone(),
        config.session.clone(),
    ));
    let (mut shell, mut notices) = NavigationShell::new(sessions, AccessGate::new(), &config.session);

    println!("AM Group ERP: Enterprise Resource Planning System");

    loop {
        audit.drain();
        let flow = if shell.current_role().await.is_some() {
            workspace_screen(&mut shell, &mut notices, &audit).await?
        } else {
            login_screen(&mut shell).await?
        };
        if let Flow::Quit = flow {
            break;
        }
    }

    if let Some(user) = shell.logout().await {
        tracing::debug!(user_id = %user.id, "Logged out on exit");
    }
    Ok(())
}

async fn login_screen(shell: &mut NavigationShell) -> AppResult<Flow> {
    let choice = prompt(|| {
        Select::new()
            .with_prompt("Sign in to continue")
            .items(&["Sign in", "Forgot password", "Quit"])
            .default(0)
            .interact()
    })
    .await?;

    match choice {
        Some(0) => {
            let Some(username) = prompt(|| {
                Input::<String>::new()
                    .with_prompt("Username")
                    .allow_empty(true)
                    .interact_text()
            })
            .await?
            else {
                return Ok(Flow::Quit);
            };
            let Some(password) = prompt(|| {
                Password::new()
                    .with_prompt("Password")
                    .allow_empty_password(true)
                    .interact()
            })
            .await?
            else {
                return Ok(Flow::Quit);
            };

            match shell.login(&username, &password).await {
                Ok(user) => print_success(&format!("Welcome, {} ({})", user.username, user.role)),
                Err(AuthError::Backend(e)) => return Err(e),
                Err(e) => print_error(&e.to_string()),
            }
            Ok(Flow::Continue)
        }
        Some(1) => {
            let Some(email) = prompt(|| {
                Input::<String>::new()
                    .with_prompt("Email address")
                    .allow_empty(true)
                    .interact_text()
            })
            .await?
            else {
                return Ok(Flow::Quit);
            };

            match shell.sessions().request_password_reset(&email).await {
                Ok(()) => print_success(&format!(
                    "If an account exists for {}, a reset link has been sent.",
                    email.trim()
                )),
                Err(e) => print_error(&e.to_string()),
            }
            Ok(Flow::Continue)
        }
        _ => Ok(Flow::Quit),
    }
}

async fn workspace_screen(
    shell: &mut NavigationShell,
    notices: &mut mpsc::Receiver<SessionNotice>,
    audit: &AuditLog,
) -> AppResult<Flow> {
    render_view(shell, audit).await;

    let menu = shell.menu().await;
    let mut labels: Vec<String> = menu.iter().map(|entry| entry.label.to_string()).collect();
    labels.push("Open module by name".to_string());
    labels.push("Logout".to_string());
    labels.push("Quit".to_string());

    let choice = prompt(move || {
        Select::new()
            .with_prompt("Navigate")
            .items(&labels[..])
            .default(0)
            .interact()
    })
    .await?;

    if expire_if_idle(shell, notices).await {
        return Ok(Flow::Continue);
    }
    shell.record_activity().await;

    let Some(index) = choice else {
        return Ok(Flow::Quit);
    };

    if let Some(entry) = menu.get(index) {
        navigate(shell, entry.view).await?;
        return Ok(Flow::Continue);
    }

    match index - menu.len() {
        0 => {
            let Some(name) = prompt(|| {
                Input::<String>::new()
                    .with_prompt("Module id (e.g. financial, gdpr)")
                    .interact_text()
            })
            .await?
            else {
                return Ok(Flow::Quit);
            };
            if expire_if_idle(shell, notices).await {
                return Ok(Flow::Continue);
            }
            match name.trim().parse::<ViewId>() {
                Ok(view) => navigate(shell, view).await?,
                Err(e) => print_error(&e.to_string()),
            }
            Ok(Flow::Continue)
        }
        1 => {
            if let Some(user) = shell.logout().await {
                print_success(&format!("Signed out {}", user.username));
            }
            Ok(Flow::Continue)
        }
        _ => Ok(Flow::Quit),
    }
}

/// Applies any pending idle notice. Returns `true` if the session ended.
async fn expire_if_idle(
    shell: &mut NavigationShell,
    notices: &mut mpsc::Receiver<SessionNotice>,
) -> bool {
    while let Ok(notice) = notices.try_recv() {
        if shell.expire(&notice).await.is_some() {
            print_warning(&notice.message());
            return true;
        }
    }
    false
}

async fn navigate(shell: &mut NavigationShell, view: ViewId) -> AppResult<()> {
    if let NavigationOutcome::Denied(_) = shell.navigate(view).await {
        if let Some(notice) = shell.denial_notice().await {
            print_error(&format!("Access denied: {}", notice.attempted.title()));
            println!("  {}", notice.headline);
            println!("  {}", notice.summary);
        }
        prompt(|| {
            Confirm::new()
                .with_prompt("Continue")
                .default(true)
                .show_default(false)
                .interact()
        })
        .await?;
        shell.acknowledge_denial();
    }
    Ok(())
}

async fn render_view(shell: &NavigationShell, audit: &AuditLog) {
    let view = shell.current_view();
    let access = match shell.current_access().await {
        Some(level) if level.can_edit() => "read-write",
        Some(_) => "read-only",
        None => "no access",
    };
    let role = shell
        .current_role()
        .await
        .map(|role| role.to_string())
        .unwrap_or_default();

    println!();
    println!("== {} [{}] ({}) ==", view.title(), role, access);
    if view == ViewId::AdminDashboard {
        println!("Recent activity:");
        print_list(&audit.rows());
    }
}

/// Bounded history of audit events collected from the bus.
struct AuditLog {
    receiver: broadcast::Receiver<DomainEvent>,
    entries: VecDeque<DomainEvent>,
}

/// Audit table row.
#[derive(Debug, Tabled)]
struct AuditRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Actor")]
    actor: String,
    #[tabled(rename = "Event")]
    event: String,
}

impl AuditLog {
    fn new(receiver: broadcast::Receiver<DomainEvent>) -> Self {
        Self {
            receiver,
            entries: VecDeque::with_capacity(AUDIT_HISTORY),
        }
    }

    fn drain(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.entries.len() == AUDIT_HISTORY {
                        self.entries.pop_front();
                    }
                    self.entries.push_back(event);
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Audit log lagged behind event bus");
                }
                Err(_) => break,
            }
        }
    }

    fn rows(&self) -> Vec<AuditRow> {
        self.entries
            .iter()
            .rev()
            .map(|event| AuditRow {
                time: event.timestamp.format("%H:%M:%S").to_string(),
                actor: event.actor_id.clone().unwrap_or_else(|| "-".to_string()),
                event: describe(&event.payload),
            })
            .collect()
    }
}

fn describe(payload: &EventPayload) -> String {
    match payload {
        EventPayload::Session(event) => match event {
            SessionEvent::LoggedIn { role, .. } => format!("login ({role})"),
            SessionEvent::LoginFailed { username, attempts } => {
                format!("login failed for '{username}' ({attempts})")
            }
            SessionEvent::LockedOut { locked_until, .. } => {
                format!("locked until {}", locked_until.format("%H:%M:%S"))
            }
            SessionEvent::LockoutReset => "lockout reset".to_string(),
            SessionEvent::LoggedOut { .. } => "logout".to_string(),
            SessionEvent::IdleExpired { idle_seconds, .. } => {
                format!("expired after {idle_seconds}s idle")
            }
            SessionEvent::PasswordResetRequested { email } => format!("reset requested for {email}"),
        },
        EventPayload::Access(event) => match event {
            AccessEvent::Granted { view, .. } => format!("opened {view}"),
            AccessEvent::Denied { view, .. } => format!("denied {view}"),
        },
    }
}

/// Runs a blocking dialoguer prompt off the async runtime.
///
/// Returns `None` when the prompt was aborted (e.g. Ctrl-C or closed stdin).
async fn prompt<T, F>(f: F) -> AppResult<Option<T>>
where
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let answer = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("Prompt task failed: {e}")))?;

    match answer {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!(error = %e, "Prompt aborted");
            Ok(None)
        }
    }
}
