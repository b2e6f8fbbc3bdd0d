//! Rule sets for each form the site accepts.

use super::{FieldRule, RuleSet};

pub fn registration_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::new("account_firstname").required("Please provide a first name."),
        FieldRule::new("account_lastname")
            .required("Please provide a last name.")
            .min_length(2, "Please provide a last name."),
        FieldRule::new("account_email")
            .required("A valid email is required.")
            .email("A valid email is required.")
            .email_available("Email exists. Please log in or use a different email."),
        FieldRule::new("account_password")
            .required("Password does not meet requirements.")
            .strong_password("Password does not meet requirements."),
    ])
}

pub fn login_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::new("account_email")
            .required("Please provide an email address.")
            .email("Please provide a valid email address."),
        FieldRule::new("account_password").required("Please provide a password."),
    ])
}

/// Profile edits; `current_email` may be kept without tripping uniqueness.
pub fn profile_rules(current_email: &str) -> RuleSet {
    RuleSet::new(vec![
        FieldRule::new("account_firstname").required("First name is required."),
        FieldRule::new("account_lastname").required("Last name is required."),
        FieldRule::new("account_email")
            .required("Email is required.")
            .email("A valid email is required.")
            .email_available_except(
                current_email,
                "That email already exists. Please use another.",
            ),
    ])
}

pub fn password_rules() -> RuleSet {
    RuleSet::new(vec![FieldRule::new("account_password")
        .min_length(12, "Password must be at least 12 characters long.")
        .has_digit("Password must contain at least one number.")
        .has_uppercase("Password must contain at least one uppercase letter.")
        .has_lowercase("Password must contain at least one lowercase letter.")
        .has_symbol("Password must contain at least one special character.")])
}

pub fn classification_rules() -> RuleSet {
    RuleSet::new(vec![FieldRule::new("classification_name")
        .required("Please provide a classification name.")
        .alphanumeric("Classification name must not contain spaces or special characters.")])
}

/// Shared by add-inventory and inventory update.
pub fn inventory_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::new("classification_id")
            .required("Please choose a classification.")
            .integer("Please choose a classification."),
        FieldRule::new("inv_make").required("Please provide a make."),
        FieldRule::new("inv_model").required("Please provide a model."),
        FieldRule::new("inv_year").integer_between(1900, 2100, "Please provide a valid year."),
        FieldRule::new("inv_price").number_at_least(0.0, "Please provide a valid price."),
        FieldRule::new("inv_miles").integer_at_least(0, "Please provide valid miles."),
        FieldRule::new("inv_color").required("Please provide a color."),
        FieldRule::new("inv_description").required("Please provide a description."),
        FieldRule::new("inv_image").required("Please provide an image path."),
        FieldRule::new("inv_thumbnail").required("Please provide a thumbnail path."),
    ])
}
