//! Contact form validation.

/// The three fields of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    /// At least one field was empty; the form keeps its contents.
    Incomplete,
    /// Every field was filled in; the form has been reset.
    Sent,
}

impl FormStatus {
    pub fn message(self) -> &'static str {
        match self {
            FormStatus::Incomplete => "Please fill in all fields.",
            FormStatus::Sent => "Message sent successfully!",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, FormStatus::Sent)
    }
}

impl ContactForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }

    /// Validates the form and clears it when it was complete.
    pub fn submit(&mut self) -> FormStatus {
        if !self.is_complete() {
            tracing::debug!("contact form rejected, missing fields");
            return FormStatus::Incomplete;
        }

        tracing::info!(name = %self.name, email = %self.email, "contact form accepted");
        *self = Self::default();
        FormStatus::Sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_form_is_sent_and_reset() {
        let mut form = ContactForm::new("Ada", "ada@example.com", "Hello");
        let status = form.submit();
        assert_eq!(status, FormStatus::Sent);
        assert_eq!(status.message(), "Message sent successfully!");
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn test_any_empty_field_is_rejected() {
        for form in [
            ContactForm::new("", "a@b.c", "hi"),
            ContactForm::new("Ada", "", "hi"),
            ContactForm::new("Ada", "a@b.c", ""),
        ] {
            let mut submitted = form.clone();
            let status = submitted.submit();
            assert_eq!(status, FormStatus::Incomplete);
            assert_eq!(status.message(), "Please fill in all fields.");
            assert_eq!(submitted, form);
        }
    }
}
