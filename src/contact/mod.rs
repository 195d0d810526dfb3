/// Contact details collected after the quiz, before webhook delivery.
///
/// Name and e-mail gate submission; the WhatsApp number is optional but
/// must look like a phone number when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
}

impl ContactDetails {
    /// First word of the name, for the thank-you greeting.
    pub fn first_name(&self) -> Option<&str> {
        self.name.split_whitespace().next()
    }

    pub fn name_is_valid(&self) -> bool {
        self.name.trim().chars().count() >= 2
    }

    pub fn email_is_valid(&self) -> bool {
        is_valid_email(self.email.trim())
    }

    pub fn whatsapp_is_valid(&self) -> bool {
        let digits = self.whatsapp.trim();
        digits.is_empty() || ((10..=11).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()))
    }

    /// True when the submit action should be enabled.
    pub fn is_submittable(&self) -> bool {
        self.name_is_valid() && self.email_is_valid() && self.whatsapp_is_valid()
    }
}

/// Structural e-mail check: one `@`, non-empty local part, a dot in the
/// domain with something on both sides, no whitespace. Deliberately
/// shallow -- deliverability is the webhook consumer's problem.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Keep only digits, mirroring the input filter on the WhatsApp field.
pub fn sanitize_whatsapp(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}
