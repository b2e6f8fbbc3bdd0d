//! Submitted form bodies.
//!
//! Every field is kept as the raw submitted string so a failed submission can
//! be echoed back unchanged. Password-bearing forms do not derive `Debug`.

use serde::Deserialize;

use crate::db::{Account, ProfileUpdate, Vehicle, VehicleInput};
use crate::validation::FormInput;

const NO_IMAGE: &str = "/images/vehicles/no-image.png";
const NO_IMAGE_THUMBNAIL: &str = "/images/vehicles/no-image-tn.png";

macro_rules! form_input {
    ($form:ty { $($field:ident),* $(,)? }) => {
        impl FormInput for $form {
            fn value(&self, field: &str) -> Option<&str> {
                match field {
                    $(stringify!($field) => Some(self.$field.as_str()),)*
                    _ => None,
                }
            }
        }
    };
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
    pub account_password: String,
}

impl RegisterForm {
    pub fn normalized(mut self) -> Self {
        self.account_firstname = self.account_firstname.trim().to_string();
        self.account_lastname = self.account_lastname.trim().to_string();
        self.account_email = normalize_email(&self.account_email);
        self
    }
}

form_input!(RegisterForm {
    account_firstname,
    account_lastname,
    account_email,
    account_password,
});

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub account_email: String,
    pub account_password: String,
}

impl LoginForm {
    pub fn normalized(mut self) -> Self {
        self.account_email = normalize_email(&self.account_email);
        self
    }
}

form_input!(LoginForm {
    account_email,
    account_password,
});

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub account_id: i64,
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
}

impl ProfileForm {
    pub fn normalized(mut self) -> Self {
        self.account_firstname = self.account_firstname.trim().to_string();
        self.account_lastname = self.account_lastname.trim().to_string();
        self.account_email = normalize_email(&self.account_email);
        self
    }

    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            firstname: self.account_firstname.clone(),
            lastname: self.account_lastname.clone(),
            email: self.account_email.clone(),
        }
    }
}

impl From<&Account> for ProfileForm {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id,
            account_firstname: account.account_firstname.clone(),
            account_lastname: account.account_lastname.clone(),
            account_email: account.account_email.clone(),
        }
    }
}

form_input!(ProfileForm {
    account_firstname,
    account_lastname,
    account_email,
});

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct PasswordForm {
    pub account_id: i64,
    pub account_password: String,
}

form_input!(PasswordForm { account_password });

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassificationForm {
    pub classification_name: String,
}

impl ClassificationForm {
    pub fn normalized(mut self) -> Self {
        self.classification_name = self.classification_name.trim().to_string();
        self
    }
}

form_input!(ClassificationForm { classification_name });

/// Add and edit vehicle form. `inv_id` is only sent by the edit form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InventoryForm {
    pub inv_id: Option<i64>,
    pub classification_id: String,
    pub inv_make: String,
    pub inv_model: String,
    pub inv_year: String,
    pub inv_description: String,
    pub inv_image: String,
    pub inv_thumbnail: String,
    pub inv_price: String,
    pub inv_miles: String,
    pub inv_color: String,
}

impl InventoryForm {
    /// Blank add form with the placeholder image paths filled in.
    pub fn blank() -> Self {
        Self {
            inv_image: NO_IMAGE.to_string(),
            inv_thumbnail: NO_IMAGE_THUMBNAIL.to_string(),
            ..Self::default()
        }
    }

    pub fn normalized(self) -> Self {
        Self {
            inv_id: self.inv_id,
            classification_id: self.classification_id.trim().to_string(),
            inv_make: self.inv_make.trim().to_string(),
            inv_model: self.inv_model.trim().to_string(),
            inv_year: self.inv_year.trim().to_string(),
            inv_description: self.inv_description.trim().to_string(),
            inv_image: self.inv_image.trim().to_string(),
            inv_thumbnail: self.inv_thumbnail.trim().to_string(),
            inv_price: self.inv_price.trim().to_string(),
            inv_miles: self.inv_miles.trim().to_string(),
            inv_color: self.inv_color.trim().to_string(),
        }
    }

    /// Typed payload; `None` if a numeric field does not parse.
    pub fn parse(&self) -> Option<VehicleInput> {
        Some(VehicleInput {
            classification_id: self.classification_id.trim().parse().ok()?,
            make: self.inv_make.trim().to_string(),
            model: self.inv_model.trim().to_string(),
            year: self.inv_year.trim().parse().ok()?,
            description: self.inv_description.trim().to_string(),
            image: self.inv_image.trim().to_string(),
            thumbnail: self.inv_thumbnail.trim().to_string(),
            price: self.inv_price.trim().parse().ok()?,
            miles: self.inv_miles.trim().parse().ok()?,
            color: self.inv_color.trim().to_string(),
        })
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.inv_make, self.inv_model)
    }
}

impl From<&Vehicle> for InventoryForm {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            inv_id: Some(vehicle.inv_id),
            classification_id: vehicle.classification_id.to_string(),
            inv_make: vehicle.inv_make.clone(),
            inv_model: vehicle.inv_model.clone(),
            inv_year: vehicle.inv_year.to_string(),
            inv_description: vehicle.inv_description.clone(),
            inv_image: vehicle.inv_image.clone(),
            inv_thumbnail: vehicle.inv_thumbnail.clone(),
            inv_price: vehicle.inv_price.to_string(),
            inv_miles: vehicle.inv_miles.to_string(),
            inv_color: vehicle.inv_color.clone(),
        }
    }
}

form_input!(InventoryForm {
    classification_id,
    inv_make,
    inv_model,
    inv_year,
    inv_description,
    inv_image,
    inv_thumbnail,
    inv_price,
    inv_miles,
    inv_color,
});

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteForm {
    pub inv_id: i64,
}
