// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const CODE_MIN_DIGITS: usize = 4;
pub const CODE_MAX_DIGITS: usize = 6;
pub const PASSWORD_MIN_CHARS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStep {
    #[default]
    RequestCode,
    ResetPassword,
}

impl RecoveryStep {
    pub const fn number(self) -> u8 {
        match self {
            Self::RequestCode => 1,
            Self::ResetPassword => 2,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::RequestCode => "request a code",
            Self::ResetPassword => "set a new password",
        }
    }

    pub const fn fields(self) -> &'static [RecoveryField] {
        match self {
            Self::RequestCode => &[RecoveryField::Email],
            Self::ResetPassword => &[
                RecoveryField::Code,
                RecoveryField::NewPassword,
                RecoveryField::ConfirmPassword,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryField {
    Email,
    Code,
    NewPassword,
    ConfirmPassword,
}

impl RecoveryField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Code => "code",
            Self::NewPassword => "new password",
            Self::ConfirmPassword => "confirm password",
        }
    }

    pub const fn is_secret(self) -> bool {
        matches!(self, Self::NewPassword | Self::ConfirmPassword)
    }
}

/// What to do once a new password is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryCompletion {
    #[default]
    FirstStep,
    SignIn,
}

impl RecoveryCompletion {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first_step" => Some(Self::FirstStep),
            "sign_in" => Some(Self::SignIn),
            _ => None,
        }
    }
}

/// The host's password-reset backend.
pub trait RecoveryService {
    fn send_reset_code(&mut self, email: &str) -> Result<()>;
    fn reset_password(&mut self, code: &str, new_password: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecoveryForm {
    pub email: String,
    pub code: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl RecoveryForm {
    pub fn field(&self, field: RecoveryField) -> &str {
        match field {
            RecoveryField::Email => &self.email,
            RecoveryField::Code => &self.code,
            RecoveryField::NewPassword => &self.new_password,
            RecoveryField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn field_mut(&mut self, field: RecoveryField) -> &mut String {
        match field {
            RecoveryField::Email => &mut self.email,
            RecoveryField::Code => &mut self.code,
            RecoveryField::NewPassword => &mut self.new_password,
            RecoveryField::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCodeInput {
    pub email: String,
}

impl RequestCodeInput {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_email(&self.email) {
            bail!("enter a valid email address (for example user@example.com) and retry");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPasswordInput {
    pub code: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordInput {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_code(&self.code) {
            bail!("enter a valid code ({CODE_MIN_DIGITS}-{CODE_MAX_DIGITS} digits) and retry");
        }
        if self.new_password.chars().count() < PASSWORD_MIN_CHARS {
            bail!("password must be at least {PASSWORD_MIN_CHARS} characters");
        }
        if self.new_password != self.confirm_password {
            bail!("passwords do not match -- retype the confirmation and retry");
        }
        Ok(())
    }
}

/// Non-empty local part, exactly one `@`, and a domain with an inner dot.
/// Whitespace anywhere is rejected.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

pub fn is_valid_code(code: &str) -> bool {
    (CODE_MIN_DIGITS..=CODE_MAX_DIGITS).contains(&code.len())
        && code.bytes().all(|byte| byte.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverySubmitted {
    CodeSent { email: String },
    PasswordChanged { completion: RecoveryCompletion },
}

/// The two-step password recovery flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecoveryWizard {
    step: RecoveryStep,
    pub form: RecoveryForm,
}

impl RecoveryWizard {
    pub const fn step(&self) -> RecoveryStep {
        self.step
    }

    /// Jumps straight to `step` without validating anything.
    pub fn show(&mut self, step: RecoveryStep) {
        self.step = step;
    }

    pub fn request_code_input(&self) -> RequestCodeInput {
        RequestCodeInput {
            email: self.form.email.trim().to_owned(),
        }
    }

    pub fn reset_password_input(&self) -> ResetPasswordInput {
        ResetPasswordInput {
            code: self.form.code.trim().to_owned(),
            new_password: self.form.new_password.clone(),
            confirm_password: self.form.confirm_password.clone(),
        }
    }

    /// Validates and submits the current step.
    ///
    /// On error the wizard stays on the current step; the message is meant to
    /// be shown to the user as is.
    pub fn submit<S>(
        &mut self,
        service: &mut S,
        completion: RecoveryCompletion,
    ) -> Result<RecoverySubmitted>
    where
        S: RecoveryService + ?Sized,
    {
        match self.step {
            RecoveryStep::RequestCode => {
                let input = self.request_code_input();
                input.validate()?;
                service.send_reset_code(&input.email)?;
                self.show(RecoveryStep::ResetPassword);
                Ok(RecoverySubmitted::CodeSent { email: input.email })
            }
            RecoveryStep::ResetPassword => {
                let input = self.reset_password_input();
                input.validate()?;
                service.reset_password(&input.code, &input.new_password)?;
                self.show(RecoveryStep::RequestCode);
                Ok(RecoverySubmitted::PasswordChanged { completion })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        RecoveryCompletion, RecoveryService, RecoveryStep, RecoverySubmitted, RecoveryWizard,
        RequestCodeInput, ResetPasswordInput, is_valid_code, is_valid_email,
    };
    use anyhow::{Result, bail};

    #[derive(Debug, Default)]
    struct RecordingService {
        sent_to: Vec<String>,
        resets: Vec<(String, String)>,
        fail_send: bool,
    }

    impl RecoveryService for RecordingService {
        fn send_reset_code(&mut self, email: &str) -> Result<()> {
            if self.fail_send {
                bail!("mail relay unavailable");
            }
            self.sent_to.push(email.to_owned());
            Ok(())
        }

        fn reset_password(&mut self, code: &str, new_password: &str) -> Result<()> {
            self.resets.push((code.to_owned(), new_password.to_owned()));
            Ok(())
        }
    }

    fn reset(code: &str, password: &str, confirm: &str) -> ResetPasswordInput {
        ResetPasswordInput {
            code: code.to_owned(),
            new_password: password.to_owned(),
            confirm_password: confirm.to_owned(),
        }
    }

    #[test]
    fn email_rules() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn code_rules() {
        assert!(is_valid_code("1234"));
        assert!(is_valid_code("123456"));
        assert!(!is_valid_code("12"));
        assert!(!is_valid_code("1234567"));
        assert!(!is_valid_code("abcdef"));
        assert!(!is_valid_code("12 34"));
        assert!(!is_valid_code("１２３４"));
    }

    #[test]
    fn request_code_validation() {
        let bad = RequestCodeInput {
            email: "not-an-email".to_owned(),
        };
        assert!(bad.validate().is_err());
        let good = RequestCodeInput {
            email: "user@example.com".to_owned(),
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn reset_validation_reports_first_failing_rule() {
        let error = reset("12", "x", "y").validate().expect_err("short code");
        assert!(error.to_string().contains("valid code"));

        let error = reset("abcdef", "secret1", "secret1")
            .validate()
            .expect_err("non-numeric code");
        assert!(error.to_string().contains("valid code"));

        let error = reset("1234", "short", "short")
            .validate()
            .expect_err("short password");
        assert!(error.to_string().contains("at least 6"));

        let error = reset("1234", "secret1", "secret2")
            .validate()
            .expect_err("mismatch");
        assert!(error.to_string().contains("do not match"));

        assert!(reset("1234", "secret", "secret").validate().is_ok());
    }

    #[test]
    fn step_one_advances_after_sending_code() -> Result<()> {
        let mut wizard = RecoveryWizard::default();
        let mut service = RecordingService::default();
        wizard.form.email = "  user@example.com ".to_owned();

        let submitted = wizard.submit(&mut service, RecoveryCompletion::FirstStep)?;
        assert_eq!(
            submitted,
            RecoverySubmitted::CodeSent {
                email: "user@example.com".to_owned()
            }
        );
        assert_eq!(wizard.step(), RecoveryStep::ResetPassword);
        assert_eq!(service.sent_to, vec!["user@example.com".to_owned()]);
        Ok(())
    }

    #[test]
    fn invalid_email_stays_on_step_one() {
        let mut wizard = RecoveryWizard::default();
        let mut service = RecordingService::default();
        wizard.form.email = "not-an-email".to_owned();

        assert!(
            wizard
                .submit(&mut service, RecoveryCompletion::FirstStep)
                .is_err()
        );
        assert_eq!(wizard.step(), RecoveryStep::RequestCode);
        assert!(service.sent_to.is_empty());
    }

    #[test]
    fn service_failure_stays_on_step_one() {
        let mut wizard = RecoveryWizard::default();
        let mut service = RecordingService {
            fail_send: true,
            ..RecordingService::default()
        };
        wizard.form.email = "user@example.com".to_owned();

        let error = wizard
            .submit(&mut service, RecoveryCompletion::FirstStep)
            .expect_err("relay down");
        assert!(error.to_string().contains("mail relay"));
        assert_eq!(wizard.step(), RecoveryStep::RequestCode);
    }

    #[test]
    fn step_two_returns_to_step_one() -> Result<()> {
        let mut wizard = RecoveryWizard::default();
        let mut service = RecordingService::default();
        wizard.show(RecoveryStep::ResetPassword);
        wizard.form.code = "1234".to_owned();
        wizard.form.new_password = "secret1".to_owned();
        wizard.form.confirm_password = "secret1".to_owned();

        let submitted = wizard.submit(&mut service, RecoveryCompletion::SignIn)?;
        assert_eq!(
            submitted,
            RecoverySubmitted::PasswordChanged {
                completion: RecoveryCompletion::SignIn
            }
        );
        assert_eq!(wizard.step(), RecoveryStep::RequestCode);
        assert_eq!(
            service.resets,
            vec![("1234".to_owned(), "secret1".to_owned())]
        );
        Ok(())
    }

    #[test]
    fn show_bypasses_validation() {
        let mut wizard = RecoveryWizard::default();
        wizard.show(RecoveryStep::ResetPassword);
        assert_eq!(wizard.step(), RecoveryStep::ResetPassword);
        wizard.show(RecoveryStep::RequestCode);
        assert_eq!(wizard.step(), RecoveryStep::RequestCode);
    }

    #[test]
    fn completion_parse() {
        assert_eq!(
            RecoveryCompletion::parse("first_step"),
            Some(RecoveryCompletion::FirstStep)
        );
        assert_eq!(
            RecoveryCompletion::parse("sign_in"),
            Some(RecoveryCompletion::SignIn)
        );
        assert_eq!(RecoveryCompletion::parse("login"), None);
    }
}
