//! Exclusion commands - load the snapshot, run one operation, persist changes

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::{Cli, Command};
use crate::config::AppConfig;
use crate::domain::audit::UserInfo;
use crate::infrastructure::audit::TracingAuditRecorder;
use crate::infrastructure::logging;
use crate::infrastructure::services::ExclusionService;
use crate::infrastructure::snapshot::Snapshot;

/// Execute a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging)?;

    let path = cli
        .data
        .unwrap_or_else(|| PathBuf::from(&config.data.snapshot_path));
    let (directory, store) = Snapshot::load(&path).await?.into_collaborators()?;

    let service = ExclusionService::new(
        directory.clone(),
        store.clone(),
        Arc::new(TracingAuditRecorder::new()),
    );

    let mutated = match cli.command {
        Command::Exclusions { experiment_id } => {
            print_json(&service.get_exclusions(&experiment_id).await?)?;
            false
        }
        Command::NonExclusions { experiment_id } => {
            print_json(&service.get_non_exclusions(&experiment_id).await?)?;
            false
        }
        Command::Create {
            base_id,
            candidates,
            user,
            email,
        } => {
            let outcomes = service
                .create_exclusions(&base_id, candidates.as_slice(), &author(user, email))
                .await?;
            print_json(&outcomes)?;
            outcomes.iter().any(|o| o.is_success())
        }
        Command::Delete {
            first_id,
            second_id,
            user,
            email,
        } => {
            service
                .delete_exclusion(&first_id, &second_id, &author(user, email))
                .await?;
            true
        }
    };

    if mutated {
        Snapshot::capture(&directory, &store)?.save(&path).await?;
        info!(path = %path.display(), "Snapshot updated");
    }

    Ok(())
}

fn author(username: String, email: Option<String>) -> UserInfo {
    match email {
        Some(email) => UserInfo::new(username).with_email(email),
        None => UserInfo::new(username),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
