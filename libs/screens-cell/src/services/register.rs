use std::sync::Arc;

use tracing::debug;

use auth_cell::models::SignUpProfile;
use auth_cell::services::gateway::AuthGateway;
use shared_models::error::AppError;

use crate::models::{FieldError, Notice, Route, SubmitOutcome};
use crate::services::validation::{
    validate, FieldRule, FormRecord, Rule, DOB_PATTERN, EMAIL_PATTERN, PHONE_PATTERN,
};

static REGISTER_RULES: &[FieldRule] = &[
    FieldRule {
        field: "email",
        rules: &[
            Rule::Required {
                message: "Email is required",
            },
            Rule::Matches {
                pattern: EMAIL_PATTERN,
                message: "Invalid Email",
            },
        ],
    },
    FieldRule {
        field: "password",
        rules: &[
            Rule::MinLen {
                min: 8,
                message: "Password must be at least 8 characters",
            },
            Rule::Password {
                message: "Password must contain at least one uppercase letter, one lowercase \
                          letter, one number, and one special character",
            },
        ],
    },
    FieldRule {
        field: "confirmPassword",
        rules: &[Rule::Required {
            message: "Confirm password is required",
        }],
    },
    FieldRule {
        field: "name",
        rules: &[
            Rule::MinLen {
                min: 3,
                message: "Name must be at least 3 characters",
            },
            Rule::MaxLen {
                max: 20,
                message: "Name must be less than 20 characters",
            },
        ],
    },
    FieldRule {
        field: "phone",
        rules: &[
            Rule::Required {
                message: "Phone is required",
            },
            Rule::Matches {
                pattern: PHONE_PATTERN,
                message: "Phone number must be 10 digits",
            },
        ],
    },
    FieldRule {
        field: "dob",
        rules: &[
            Rule::Required {
                message: "Date of birth is required",
            },
            Rule::Matches {
                pattern: DOB_PATTERN,
                message: "Invalid date format. Use DD-MM-YYYY",
            },
        ],
    },
    FieldRule {
        field: "gender",
        rules: &[
            Rule::Required {
                message: "Gender selection is required",
            },
            Rule::OneOf {
                allowed: &["male", "female"],
                message: "Please select a valid gender option",
            },
        ],
    },
];

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub phone: String,
    pub dob: String,
    pub gender: String,
}

impl FormRecord for RegisterForm {
    fn value(&self, field: &str) -> &str {
        match field {
            "email" => &self.email,
            "password" => &self.password,
            "confirmPassword" => &self.confirm_password,
            "name" => &self.name,
            "phone" => &self.phone,
            "dob" => &self.dob,
            "gender" => &self.gender,
            _ => "",
        }
    }
}

impl RegisterForm {
    /// Field rules first; the cross-field password check only runs once
    /// every field validates on its own.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = validate(self, REGISTER_RULES);

        if errors.is_empty() && self.password != self.confirm_password {
            errors.push(FieldError {
                field: "confirmPassword",
                message: "Passwords don't match".to_string(),
            });
        }

        errors
    }
}

/// Sign-up screen state.
pub struct RegisterScreen {
    gateway: Arc<AuthGateway>,
    pub form: RegisterForm,
    pub errors: Vec<FieldError>,
    pub submit_message: Option<String>,
}

impl RegisterScreen {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self {
            gateway,
            form: RegisterForm::default(),
            errors: Vec::new(),
            submit_message: None,
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) {
        let value = value.to_string();
        match field {
            "email" => self.form.email = value,
            "password" => self.form.password = value,
            "confirmPassword" => self.form.confirm_password = value,
            "name" => self.form.name = value,
            "phone" => self.form.phone = value,
            "dob" => self.form.dob = value,
            "gender" => self.form.gender = value,
            _ => {}
        }
        self.errors = self.form.validate();
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.submit_message = None;

        let errors = self.form.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return SubmitOutcome::Blocked(errors);
        }

        let profile = SignUpProfile {
            name: self.form.name.clone(),
            phone: self.form.phone.clone(),
            dob: self.form.dob.clone(),
            gender: self.form.gender.clone(),
        };

        match self
            .gateway
            .sign_up(&self.form.email, &self.form.password, &profile)
            .await
        {
            Ok(identity) => {
                debug!("Registration submitted for {}", identity.id);
                SubmitOutcome::Success {
                    notice: Notice::success("Registration successful!"),
                    navigate: Some(Route::Login),
                }
            }
            Err(err) => {
                let friendly = friendly_register_error(&err);
                self.submit_message = Some(friendly.clone());
                SubmitOutcome::Failed {
                    notice: Notice::error(friendly),
                }
            }
        }
    }

    pub fn go_to_login(&self) -> Route {
        Route::Login
    }
}

/// Fixed table from provider error code to user-facing message; unlisted
/// codes fall back to the generic line.
pub fn friendly_register_error(err: &AppError) -> String {
    let message = match err {
        AppError::Auth { code, .. } => match code.as_str() {
            "EMAIL_EXISTS" => "Email already exists",
            "WEAK_PASSWORD" => "Password should be at least 6 characters",
            "INVALID_EMAIL" => "Invalid email address",
            _ => "Signup failed. Please try again",
        },
        _ => "Signup failed. Please try again",
    };

    message.to_string()
}
