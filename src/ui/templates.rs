// Askama template definitions

use askama::Template;

use super::forms::{InventoryForm, ProfileForm, RegisterForm};
use super::middleware::Session;
use crate::db::{Classification, Vehicle};
use crate::validation::ValidationErrors;

/// Layout context shared by every page
pub struct Page {
    pub title: String,
    /// Classifications for the navigation bar, ordered by name
    pub nav: Vec<Classification>,
    pub notices: Vec<String>,
    pub logged_in: bool,
    pub first_name: String,
    pub account_id: i64,
    pub is_staff: bool,
}

impl Page {
    pub fn new(
        title: impl Into<String>,
        nav: Vec<Classification>,
        notices: Vec<String>,
        session: &Session,
    ) -> Self {
        let mut page = Self::bare(title);
        page.nav = nav;
        page.notices = notices;
        if let Some(claims) = session.claims() {
            page.logged_in = true;
            page.first_name = claims.account_firstname.clone();
            page.account_id = claims.account_id;
            page.is_staff = claims.is_staff();
        }
        page
    }

    /// Anonymous page with no navigation, used by the error boundary.
    pub fn bare(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            nav: Vec::new(),
            notices: Vec::new(),
            logged_in: false,
            first_name: String::new(),
            account_id: 0,
            is_staff: false,
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notices.push(notice.into());
        self
    }
}

// Option for the classification select of the vehicle forms
pub struct ClassificationOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

impl ClassificationOption {
    pub fn list(classifications: &[Classification], selected: &str) -> Vec<Self> {
        classifications
            .iter()
            .map(|c| Self {
                id: c.classification_id,
                name: c.classification_name.clone(),
                selected: c.classification_id.to_string() == selected.trim(),
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub page: Page,
}

#[derive(Template)]
#[template(path = "errors/error.html")]
pub struct ErrorTemplate {
    pub page: Page,
    pub message: String,
}

// Account views

#[derive(Template)]
#[template(path = "account/login.html")]
pub struct LoginTemplate {
    pub page: Page,
    pub account_email: String,
    pub errors: ValidationErrors,
}

#[derive(Template)]
#[template(path = "account/register.html")]
pub struct RegisterTemplate {
    pub page: Page,
    pub form: RegisterForm,
    pub errors: ValidationErrors,
}

#[derive(Template)]
#[template(path = "account/management.html")]
pub struct AccountTemplate {
    pub page: Page,
}

#[derive(Template)]
#[template(path = "account/update.html")]
pub struct AccountUpdateTemplate {
    pub page: Page,
    pub form: ProfileForm,
    pub errors: ValidationErrors,
}

// Inventory views

#[derive(Template)]
#[template(path = "inventory/classification.html")]
pub struct ClassificationTemplate {
    pub page: Page,
    pub vehicles: Vec<Vehicle>,
}

#[derive(Template)]
#[template(path = "inventory/detail.html")]
pub struct DetailTemplate {
    pub page: Page,
    pub vehicle: Vehicle,
}

#[derive(Template)]
#[template(path = "inventory/management.html")]
pub struct InventoryManagementTemplate {
    pub page: Page,
}

#[derive(Template)]
#[template(path = "inventory/add-classification.html")]
pub struct AddClassificationTemplate {
    pub page: Page,
    pub classification_name: String,
    pub errors: ValidationErrors,
}

#[derive(Template)]
#[template(path = "inventory/add-inventory.html")]
pub struct AddInventoryTemplate {
    pub page: Page,
    pub form: InventoryForm,
    pub options: Vec<ClassificationOption>,
    pub errors: ValidationErrors,
}

#[derive(Template)]
#[template(path = "inventory/edit-inventory.html")]
pub struct EditInventoryTemplate {
    pub page: Page,
    pub form: InventoryForm,
    pub options: Vec<ClassificationOption>,
    pub errors: ValidationErrors,
}

#[derive(Template)]
#[template(path = "inventory/delete-confirm.html")]
pub struct DeleteConfirmTemplate {
    pub page: Page,
    pub vehicle: Vehicle,
}
