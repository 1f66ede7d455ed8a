pub mod home;
pub mod login;
pub mod medical_history;
pub mod register;
pub mod validation;

pub use home::HomeScreen;
pub use login::{friendly_login_error, LoginForm, LoginScreen};
pub use medical_history::{FilePicker, HistoryData, MedicalHistoryScreen};
pub use register::{friendly_register_error, RegisterForm, RegisterScreen};
pub use validation::{validate, FieldRule, FormRecord, Rule};
