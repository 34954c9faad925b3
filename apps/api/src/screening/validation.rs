use crate::screening::models::{CandidateProfile, ProfileForm};

/// A single invalid form field, with a message fit for the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validates the intake form and builds the immutable profile.
///
/// Every field is required (after trimming). The email must contain both `@`
/// and `.`, and years of experience must be a non-negative whole number.
/// All problems are reported together.
pub fn validate_profile(form: &ProfileForm) -> Result<CandidateProfile, Vec<FieldError>> {
    let mut errors = Vec::new();

    let required = [
        ("name", form.name.trim()),
        ("email", form.email.trim()),
        ("phone", form.phone.trim()),
        ("years_of_experience", form.years_of_experience.trim()),
        ("desired_role", form.desired_role.trim()),
        ("location", form.location.trim()),
        ("tech_stack", form.tech_stack.trim()),
    ];
    for (field, value) in required {
        if value.is_empty() {
            errors.push(FieldError::new(field, "is required"));
        }
    }

    let email = form.email.trim();
    if !email.is_empty() && !(email.contains('@') && email.contains('.')) {
        errors.push(FieldError::new("email", "must contain '@' and '.'"));
    }

    let years = form.years_of_experience.trim();
    let years_of_experience = if years.is_empty() {
        None
    } else {
        match years.parse::<u32>() {
            Ok(y) => Some(y),
            Err(_) => {
                errors.push(FieldError::new(
                    "years_of_experience",
                    "must be a non-negative whole number",
                ));
                None
            }
        }
    };

    match years_of_experience {
        Some(years_of_experience) if errors.is_empty() => Ok(CandidateProfile {
            name: form.name.trim().to_string(),
            email: email.to_string(),
            phone: form.phone.trim().to_string(),
            years_of_experience,
            desired_role: form.desired_role.trim().to_string(),
            location: form.location.trim().to_string(),
            tech_stack: form.tech_stack.trim().to_string(),
        }),
        _ => Err(errors),
    }
}
