//! Prompt table and engine messages
//!
//! Every string the engine says can be overridden from the agent TOML file.
//! Missing keys fall back to [`builtin`].
//!
//! # Example
//!
//! ```toml
//! [prompts]
//! email = "Great, and your email?"
//! business_name = "Company name? (or say 'Personal')"
//!
//! [messages]
//! service_ack = "Nice, a {service} project! Let's get the details."
//! ```

use serde::{Deserialize, Serialize};

use crate::core::LeadField;

/// One question per lead slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTable {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub service: String,
    pub details: String,
    pub budget: String,
    pub timeline: String,
}

impl PromptTable {
    pub fn for_field(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Email => &self.email,
            LeadField::Phone => &self.phone,
            LeadField::BusinessName => &self.business_name,
            LeadField::Service => &self.service,
            LeadField::Details => &self.details,
            LeadField::Budget => &self.budget,
            LeadField::Timeline => &self.timeline,
        }
    }
}

impl Default for PromptTable {
    fn default() -> Self {
        Self {
            name: builtin::ASK_NAME.to_string(),
            email: builtin::ASK_EMAIL.to_string(),
            phone: builtin::ASK_PHONE.to_string(),
            business_name: builtin::ASK_BUSINESS_NAME.to_string(),
            service: builtin::ASK_SERVICE.to_string(),
            details: builtin::ASK_DETAILS.to_string(),
            budget: builtin::ASK_BUDGET.to_string(),
            timeline: builtin::ASK_TIMELINE.to_string(),
        }
    }
}

/// Everything else the engine says
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub greeting: String,
    pub reset: String,
    pub collection_intro: String,
    /// `{service}` is replaced with the detected service
    pub service_ack: String,
    pub invite_question: String,
    pub fallback: String,
    pub submitting: String,
    pub submitted: String,
    pub submission_failed: String,
    pub retrying: String,
}

impl Messages {
    pub fn service_ack(&self, service: &str) -> String {
        self.service_ack.replace("{service}", service)
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            greeting: builtin::GREETING.to_string(),
            reset: builtin::RESET.to_string(),
            collection_intro: builtin::COLLECTION_INTRO.to_string(),
            service_ack: builtin::SERVICE_ACK.to_string(),
            invite_question: builtin::INVITE_QUESTION.to_string(),
            fallback: builtin::FALLBACK.to_string(),
            submitting: builtin::SUBMITTING.to_string(),
            submitted: builtin::SUBMITTED.to_string(),
            submission_failed: builtin::SUBMISSION_FAILED.to_string(),
            retrying: builtin::RETRYING.to_string(),
        }
    }
}

/// Built-in wording
pub mod builtin {
    pub const ASK_NAME: &str = "What is your name?";
    pub const ASK_EMAIL: &str = "Thanks. What is your email address?";
    pub const ASK_PHONE: &str = "Perfect. What is your phone number?";
    pub const ASK_BUSINESS_NAME: &str =
        "What is your business or company name? (optional, say 'Personal' or 'N/A')";
    pub const ASK_SERVICE: &str =
        "What kind of service are you looking for? (e.g. Web Design, AI Agent, SEO)";
    pub const ASK_DETAILS: &str = "Could you give me a brief description of the project details?";
    pub const ASK_BUDGET: &str =
        "Do you have a rough budget range? (e.g. $1k-3k, or say 'Not sure')";
    pub const ASK_TIMELINE: &str = "When do you need this completed by? (e.g. 2 weeks, ASAP)";

    pub const GREETING: &str =
        "Hi, welcome! Are you looking to book a discovery call for your project?";
    pub const RESET: &str = "Okay, I've reset the conversation. How can I help?";
    pub const COLLECTION_INTRO: &str = "Great! Let's get your project details.";
    pub const SERVICE_ACK: &str = "Awesome! {service} it is. Let's get the details.";
    pub const INVITE_QUESTION: &str = "Sure! What would you like to know?";
    pub const FALLBACK: &str = "I'm not sure I understood. I can help you with the services below. You can say 'I need a website' or 'Book a call'.";
    pub const SUBMITTING: &str = "Perfect. I'm generating your request ticket...";
    pub const SUBMITTED: &str = "Done! Your inquiry has been sent and the team will be in touch soon. Is there anything else I can help you with?";
    pub const SUBMISSION_FAILED: &str = "I apologize, but I couldn't send your details. Please use the contact form on this page instead, or say 'retry' and I'll try again.";
    pub const RETRYING: &str = "Let me try sending your details again...";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_prompt() {
        let prompts = PromptTable::default();
        for field in LeadField::PRIORITY {
            assert!(!prompts.for_field(field).is_empty(), "{field} has no prompt");
        }
        assert!(prompts.for_field(LeadField::Email).contains("email address"));
    }

    #[test]
    fn test_partial_override() {
        let prompts: PromptTable = toml::from_str(r#"email = "Your email?""#).unwrap();
        assert_eq!(prompts.email, "Your email?");
        assert_eq!(prompts.name, builtin::ASK_NAME);
    }

    #[test]
    fn test_service_ack_template() {
        let messages = Messages::default();
        assert_eq!(
            messages.service_ack("E-commerce"),
            "Awesome! E-commerce it is. Let's get the details."
        );
        // no article to get wrong before a vowel
        assert!(!messages.service_ack("AI Agent").contains(" A AI"));
        assert!(!messages.service_ack("AI Agent").contains(" a AI"));
    }
}
