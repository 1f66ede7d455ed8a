use crate::models::Route;

/// Landing screen. Static content plus two navigation actions; no
/// business logic lives here.
pub struct HomeScreen;

impl HomeScreen {
    pub fn book_appointment(&self) -> Route {
        Route::Booking
    }

    pub fn view_medical_history(&self) -> Route {
        Route::MedicalHistory
    }
}
