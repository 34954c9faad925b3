use maud::{html, Markup};

use crate::names;
use crate::screening::models::ProfileForm;
use crate::views::layout;

fn text_field(label: &str, name: &str, kind: &str, value: &str) -> Markup {
    html! {
        label {
            (label)
            input type=(kind) name=(name) value=(value) required;
        }
    }
}

/// Candidate intake form. `form` carries previously entered values when
/// re-rendering after a validation error.
pub fn profile_form(form: &ProfileForm, errors: &[String]) -> Markup {
    html! {
        h2 { "Tell us about yourself" }
        (layout::errors(errors))
        form method="post" action=(names::PROFILE_URL)
             onsubmit="document.getElementById('waiting').hidden = false;" {
            (text_field("Full Name", "name", "text", &form.name))
            (text_field("Email Address", "email", "email", &form.email))
            (text_field("Phone Number", "phone", "text", &form.phone))
            label {
                "Years of Experience"
                input type="number" name="years_of_experience" min="0" step="1"
                      value=(form.years_of_experience) required;
            }
            (text_field("Desired Position(s)", "desired_role", "text", &form.desired_role))
            (text_field("Current Location", "location", "text", &form.location))
            label {
                "Tech Stack (Languages, Frameworks, Databases, Tools)"
                textarea name="tech_stack" rows="3" required { (form.tech_stack) }
            }
            p { button type="submit" { "Submit" } }
            p #waiting hidden { "⏳ Generating your technical questions..." }
        }
    }
}
