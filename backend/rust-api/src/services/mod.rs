use tokio::sync::Mutex;

use crate::config::Config;
use crate::models::Role;

use self::account_service::AccountService;
use self::catalog_service::CatalogService;
use self::exam_engine::ExamEngine;

pub struct AppState {
    pub config: Config,
    /// One mutex serializes every session mutation (user commands, proctor
    /// signals, timer ticks) onto a single logical thread of control.
    pub engine: Mutex<ExamEngine>,
    pub catalog: Mutex<CatalogService>,
    pub accounts: Mutex<AccountService>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let seed = [
            (
                config.admin_email.clone(),
                config.admin_password.clone(),
                Role::Admin,
            ),
            (
                config.student_email.clone(),
                config.student_password.clone(),
                Role::Student,
            ),
        ];
        let accounts = AccountService::new(&seed)?;
        let catalog = CatalogService::new(config.default_test_duration_seconds);

        tracing::info!(
            "Application state initialized ({} seeded accounts)",
            seed.len()
        );

        Ok(Self {
            config,
            engine: Mutex::new(ExamEngine::new()),
            catalog: Mutex::new(catalog),
            accounts: Mutex::new(accounts),
        })
    }
}

pub mod account_service;
pub mod catalog_service;
pub mod exam_engine;
pub mod proctoring;
pub mod scoring;
pub mod shuffle;
pub mod status;
