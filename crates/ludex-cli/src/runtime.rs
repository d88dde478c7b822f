// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use ludex_app::{ExternalPage, RecoveryService};

/// Stands in for the storefront backend: nothing leaves the process, every
/// request is counted and logged.
#[derive(Debug, Default)]
pub struct LocalRuntime {
    codes_requested: usize,
    resets: usize,
    pages_opened: usize,
}

impl LocalRuntime {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_domain(email: &str) -> &str {
    email.rsplit_once('@').map_or("", |(_, domain)| domain)
}

impl RecoveryService for LocalRuntime {
    fn send_reset_code(&mut self, email: &str) -> Result<()> {
        self.codes_requested += 1;
        tracing::info!(
            domain = email_domain(email),
            total = self.codes_requested,
            "reset code requested"
        );
        Ok(())
    }

    fn reset_password(&mut self, code: &str, _new_password: &str) -> Result<()> {
        self.resets += 1;
        tracing::info!(
            code_digits = code.len(),
            total = self.resets,
            "password reset submitted"
        );
        Ok(())
    }
}

impl ludex_tui::AppRuntime for LocalRuntime {
    fn open_page(&mut self, page: ExternalPage) -> Result<()> {
        self.pages_opened += 1;
        tracing::info!(
            page = page.label(),
            total = self.pages_opened,
            "external page requested"
        );
        Ok(())
    }
}
