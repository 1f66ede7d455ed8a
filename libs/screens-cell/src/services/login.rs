use std::sync::Arc;

use tracing::debug;

use auth_cell::services::gateway::AuthGateway;
use auth_cell::services::session::SessionStore;
use shared_models::error::AppError;

use crate::models::{FieldError, Notice, Route, SubmitOutcome};
use crate::services::validation::{validate, FieldRule, FormRecord, Rule, EMAIL_PATTERN};

static LOGIN_RULES: &[FieldRule] = &[
    FieldRule {
        field: "email",
        rules: &[
            Rule::Required {
                message: "Email is required",
            },
            Rule::Matches {
                pattern: EMAIL_PATTERN,
                message: "Email invalid",
            },
        ],
    },
    FieldRule {
        field: "password",
        rules: &[Rule::Required {
            message: "Password required",
        }],
    },
];

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormRecord for LoginForm {
    fn value(&self, field: &str) -> &str {
        match field {
            "email" => &self.email,
            "password" => &self.password,
            _ => "",
        }
    }
}

impl LoginForm {
    pub fn validate(&self) -> Vec<FieldError> {
        validate(self, LOGIN_RULES)
    }
}

/// Sign-in screen state: the form, its inline errors (refreshed on every
/// field change) and the message under the submit button.
pub struct LoginScreen {
    gateway: Arc<AuthGateway>,
    pub form: LoginForm,
    pub errors: Vec<FieldError>,
    pub submit_message: Option<String>,
}

impl LoginScreen {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self {
            gateway,
            form: LoginForm::default(),
            errors: Vec::new(),
            submit_message: None,
        }
    }

    pub fn set_email(&mut self, value: &str) {
        self.form.email = value.to_string();
        self.errors = self.form.validate();
    }

    pub fn set_password(&mut self, value: &str) {
        self.form.password = value.to_string();
        self.errors = self.form.validate();
    }

    /// Submit the form. Blocked until the record validates; afterwards the
    /// gateway outcome is mapped to a notice, and navigation to Home waits
    /// for the session to publish a role.
    pub async fn submit(&mut self, session: &SessionStore) -> SubmitOutcome {
        self.submit_message = None;

        let errors = self.form.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return SubmitOutcome::Blocked(errors);
        }

        match self
            .gateway
            .sign_in(&self.form.email, &self.form.password)
            .await
        {
            Ok(identity) => {
                debug!("Login submitted for {}", identity.id);

                let state = session.snapshot();
                let navigate = if state.loading && state.role.is_none() {
                    self.submit_message = Some("Loading...".to_string());
                    None
                } else if state.role.is_some() {
                    Some(Route::Home)
                } else {
                    None
                };

                SubmitOutcome::Success {
                    notice: Notice::success("User logged in successfully"),
                    navigate,
                }
            }
            Err(err) => {
                let friendly = friendly_login_error(&err);
                self.submit_message = Some(friendly.clone());
                SubmitOutcome::Failed {
                    notice: Notice::error(friendly),
                }
            }
        }
    }

    pub fn go_to_register(&self) -> Route {
        Route::Register
    }
}

/// Fixed table from provider error code to user-facing message; unlisted
/// codes fall back to the generic line.
pub fn friendly_login_error(err: &AppError) -> String {
    let message = match err {
        AppError::Auth { code, .. } => match code.as_str() {
            "INVALID_EMAIL" => "Please enter a valid email address",
            "EMAIL_NOT_FOUND" => "No account found with this email",
            "INVALID_PASSWORD" => "Incorrect password",
            "INVALID_LOGIN_CREDENTIALS" => "Invalid login credentials",
            "USER_DISABLED" => "This account has been disabled",
            "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later",
            "INTERNAL_ERROR" => "Server error. Please try again",
            _ => "Login failed. Please try again",
        },
        AppError::Network(_) => "Network error. Check your connection",
        _ => "Login failed. Please try again",
    };

    message.to_string()
}
