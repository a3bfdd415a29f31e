//! Communication guides
//!
//! Static reference texts agents can be briefed with. The travel assistant
//! guide also scripts the question/confirmation exchange for each travel
//! detail.

/// Stand-in for the user's answer inside confirmation texts
pub const RESPONSE_MARKER: &str = "[User's Response]";

/// Question and confirmation for one collected field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPrompt {
    /// Field label
    pub field: &'static str,
    /// Question asked to the user
    pub question: &'static str,
    /// Confirmation, containing [`RESPONSE_MARKER`]
    pub confirmation: &'static str,
}

impl FieldPrompt {
    /// Confirmation text with the user's answer filled in
    #[must_use]
    pub fn confirm(&self, response: &str) -> String {
        self.confirmation.replace(RESPONSE_MARKER, response)
    }
}

/// What a guide offers as its template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideTemplate {
    /// A message with `[bracketed]` blanks
    Message(&'static str),
    /// A scripted exchange, one prompt per field
    Fields(&'static [FieldPrompt]),
}

/// A communication guide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guide {
    /// Title
    pub title: &'static str,
    /// Introduction
    pub introduction: &'static str,
    /// Key points, in order
    pub key_points: &'static [&'static str],
    /// Template
    pub template: GuideTemplate,
    /// Read back after all fields are collected
    pub final_confirmation: Option<&'static str>,
    /// Shown while searching
    pub searching_message: Option<&'static str>,
    /// Closing summary layout
    pub information_summary: Option<&'static str>,
}

impl Guide {
    /// Key points as a bulleted list
    #[must_use]
    pub fn key_points_text(&self) -> String {
        self.key_points
            .iter()
            .map(|p| format!("- {p}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Field prompts, empty for message guides
    #[must_use]
    pub fn fields(&self) -> &'static [FieldPrompt] {
        match self.template {
            GuideTemplate::Fields(fields) => fields,
            GuideTemplate::Message(_) => &[],
        }
    }
}

/// Guide for reaching out to small businesses
pub static CUSTOMER_ENGAGEMENT: Guide = Guide {
    title: "Customer Engagement Guide for Small Businesses",
    introduction: "For small businesses, personal touch and understanding local needs are paramount. \
        Your message should reflect an understanding of their market, the challenges they face, \
        and how your solutions make their daily operations smoother and more efficient.",
    key_points: &[
        "Personalization: Show that you understand their specific business needs.",
        "Efficiency: Highlight how your solutions can streamline operations.",
        "Community: Emphasize your commitment to supporting local businesses.",
    ],
    template: GuideTemplate::Message(
        "Hello [Name],\n\n\
         As a local business owner, your dedication to [specific aspect of their business, \
         e.g., providing excellent customer service, offering high-quality products] truly stands out. \
         At [Your Company], we offer solutions that can help businesses like [Business Name] become even \
         more efficient and effective.\n\n\
         [Describe a specific feature of your product/service and how it solves a problem they face].\n\n\
         We would love to discuss how we can be part of your success story.\n\n\
         Warm regards,\n[Your Name]",
    ),
    final_confirmation: None,
    searching_message: None,
    information_summary: None,
};

/// Guide for customer care operators
pub static CUSTOMER_CARE: Guide = Guide {
    title: "Customer Care Operator Guidelines",
    introduction: "Effective communication is key to customer satisfaction. This guide provides \
        essential tips for addressing customer inquiries and concerns.",
    key_points: &[
        "Empathy: Always show understanding and compassion.",
        "Clarity: Provide clear and concise information.",
        "Follow-up: Ensure to follow up on unresolved issues.",
    ],
    template: GuideTemplate::Message(
        "Hello [Customer Name],\n\n\
         Thank you for reaching out to us. We appreciate your feedback and are here to assist you. \
         Please let us know how we can help you further.\n\n\
         Best regards,\n[Your Name]",
    ),
    final_confirmation: None,
    searching_message: None,
    information_summary: None,
};

/// Guide for assisting users with their repositories
pub static SOFTWARE_ENGINEER_ASSISTANCE: Guide = Guide {
    title: "Software Engineer Assistance Guide",
    introduction: "As a software engineer, understanding the capabilities of your tools can greatly enhance productivity. \
        This guide outlines how you can assist users with their GitHub repositories.",
    key_points: &[
        "Code Review: Offer insights on code quality and best practices.",
        "Issue Tracking: Help users manage and resolve issues effectively.",
        "Collaboration: Encourage collaboration through pull requests and discussions.",
    ],
    template: GuideTemplate::Message(
        "Hello [User],\n\n\
         I noticed you have some interesting projects on your GitHub repository. \
         I can assist you with code reviews, issue tracking, and enhancing collaboration. \
         Let me know how I can help!\n\n\
         Best,\n[Your Name]",
    ),
    final_confirmation: None,
    searching_message: None,
    information_summary: None,
};

const TRAVEL_FIELDS: &[FieldPrompt] = &[
    FieldPrompt {
        field: "Full Name",
        question: "Could you please provide your full name?",
        confirmation: "Just to confirm, your full name is [User's Response]. Is that correct?",
    },
    FieldPrompt {
        field: "Email Address",
        question: "What email address would you like to use for sending the tickets?",
        confirmation: "You provided the email address [User's Response]. Is that correct?",
    },
    FieldPrompt {
        field: "Traveling From",
        question: "What is your departure location?",
        confirmation: "You are traveling from [User's Response]. Is that correct?",
    },
    FieldPrompt {
        field: "Traveling To",
        question: "What is your destination location?",
        confirmation: "You are traveling to [User's Response]. Is that correct?",
    },
    FieldPrompt {
        field: "Travel Date",
        question: "What is your travel date? Please provide it in YYYY-MM-DD format.",
        confirmation: "Your travel date is [User's Response]. Is that correct?",
    },
    FieldPrompt {
        field: "Return Date",
        question: "Do you have a return date? If so, please provide it in YYYY-MM-DD format.",
        confirmation: "Your return date is [User's Response]. Is that correct?",
    },
    FieldPrompt {
        field: "Flight Class",
        question: "What class of travel would you prefer? (e.g., economy, business)",
        confirmation: "You prefer [User's Response] class. Is that correct?",
    },
    FieldPrompt {
        field: "Luggage Number",
        question: "How many pieces of luggage will you be taking?",
        confirmation: "You mentioned [User's Response] pieces of luggage. Is that correct?",
    },
    FieldPrompt {
        field: "Travel Companions",
        question: "How many travel companions will be joining you?",
        confirmation: "You will be traveling with [User's Response] companions. Is that correct?",
    },
    FieldPrompt {
        field: "Companion Type",
        question: "Are any of your companions minors or pets? If it's a pet, what kind?",
        confirmation: "You mentioned [User's Response] as the type of companion. Is that correct?",
    },
    FieldPrompt {
        field: "Preferred Flight",
        question: "Do you have a preferred flight, or would you like an open search?",
        confirmation: "You prefer [User's Response] for the flight. Is that correct?",
    },
];

/// Guide for collecting travel details and presenting results
pub static TRAVEL_ASSISTANT: Guide = Guide {
    title: "Travel Assistant Communication Guide",
    introduction: "This guide provides instructions for the AI assistant on how to collect the necessary information \
        from users to trigger the ticket search tool and how to convey the information received after collection.",
    key_points: &[
        "Clarity: Ensure that each question is clear and concise.",
        "Sequential Questions: Ask questions one at a time to avoid overwhelming the user.",
        "Confirmation: After collecting each piece of information, confirm with the user before proceeding.",
        "Error Handling: If the user provides invalid data, politely ask them to re-enter the information.",
        "Professional Tone: Maintain a friendly and professional tone throughout the interaction.",
        "Information Presentation: After gathering information, summarize it clearly for the user, \
         highlighting key points such as flight options, weather conditions, and accommodations.",
    ],
    template: GuideTemplate::Fields(TRAVEL_FIELDS),
    final_confirmation: Some(
        "Thank you for providing the information. Here's what I have collected:\n\
         - Full Name: [User's Full Name]\n\
         - Email: [User's Email]\n\
         - Traveling From: [User's Traveling From]\n\
         - Traveling To: [User's Traveling To]\n\
         - Travel Date: [User's Travel Date]\n\
         - Return Date: [User's Return Date]\n\
         - Flight Class: [User's Flight Class]\n\
         - Luggage Number: [User's Luggage Number]\n\
         - Travel Companions: [User's Travel Companions]\n\
         - Companion Type: [User's Companion Type]\n\
         - Preferred Flight: [User's Preferred Flight]\n\n\
         Is everything correct? If so, I will proceed to search for tickets.",
    ),
    searching_message: Some(
        "Thank you for your patience while I search for the best ticket options for you. \
         This may take a moment, but I will keep you updated with the results as soon as I have them.",
    ),
    information_summary: Some(
        "Here is a summary of the information collected:\n\
         - Available Flight Options: [Flight Options]\n\
         - Weather Conditions: [Weather Conditions]\n\
         - Hotel Options: [Hotel Options]\n\
         - Tourist Attractions: [Tourist Attractions]\n\n\
         Please review this information and let me know if you have any questions or need further assistance.",
    ),
};

/// Every guide
#[must_use]
pub fn all() -> [&'static Guide; 4] {
    [
        &CUSTOMER_ENGAGEMENT,
        &CUSTOMER_CARE,
        &SOFTWARE_ENGINEER_ASSISTANCE,
        &TRAVEL_ASSISTANT,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::placeholders;

    #[test]
    fn test_travel_fields() {
        let fields = TRAVEL_ASSISTANT.fields();
        assert_eq!(fields.len(), 11);
        assert_eq!(fields[0].field, "Full Name");
        assert_eq!(
            fields[4].confirm("2023-11-01"),
            "Your travel date is 2023-11-01. Is that correct?"
        );
        assert!(fields.iter().all(|f| f.confirmation.contains(RESPONSE_MARKER)));
        assert!(CUSTOMER_CARE.fields().is_empty());
    }

    #[test]
    fn test_guides_complete() {
        for guide in all() {
            assert!(!guide.title.is_empty());
            assert!(guide.key_points.len() >= 3);
            // Guide text is embedded in agent prompts; it must not look like placeholders.
            assert!(placeholders(guide.introduction).is_empty());
            assert!(placeholders(&guide.key_points_text()).is_empty());
        }
        assert!(TRAVEL_ASSISTANT.final_confirmation.is_some());
        assert!(CUSTOMER_ENGAGEMENT.searching_message.is_none());
    }

    #[test]
    fn test_key_points_text() {
        let text = CUSTOMER_CARE.key_points_text();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("- Empathy:"));
    }
}
