//! Canned replies served when the generation service is down.
//!
//! Deterministic and side-effect-free: lower-case the message, walk a
//! fixed ordered keyword table, first match wins, default otherwise.

/// Keyword → reply pairs, checked in order.
const KEYWORD_REPLIES: &[(&str, &str)] = &[
    (
        "google form",
        "I can help you with Google Forms! Please share the link to the form, and I'll analyze its fields and fill it with your information from the resume you uploaded.",
    ),
    (
        "linkedin",
        "For LinkedIn job applications, I can navigate the form fields and fill them with your profile information. Just provide the job posting URL.",
    ),
    (
        "indeed",
        "I can handle Indeed applications. Share the job link, and I'll fill out the application with your details.",
    ),
    (
        "resume",
        "Your resume is ready to be used. I can extract information like your name, email, work experience, skills, and education to fill out job applications automatically.",
    ),
    (
        "skill",
        "I can help customize your application based on the job requirements. Which specific skills would you like to highlight?",
    ),
    (
        "interview",
        "Would you like me to prepare any interview information that can be used in applications?",
    ),
];

/// Capability summary returned when no keyword matches.
const DEFAULT_REPLY: &str = "I've processed your request. Based on what you've shared, I can now help fill job applications for you. Here's what I can do:\n\n✓ Analyze job application forms\n✓ Extract key fields from the form\n✓ Fill fields with your resume information\n✓ Handle multiple form types (Google Forms, LinkedIn, Indeed, custom forms)\n✓ Track all your applications\n\nWhat would you like to do next?";

/// Derives a canned reply from keyword matches in the user's message.
pub fn fallback_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();

    KEYWORD_REPLIES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linkedin_keyword_returns_linkedin_reply() {
        let reply = fallback_reply("tell me about linkedin forms");
        assert_eq!(
            reply,
            "For LinkedIn job applications, I can navigate the form fields and fill them with your profile information. Just provide the job posting URL."
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            fallback_reply("Can you handle a GOOGLE FORM?"),
            fallback_reply("can you handle a google form?")
        );
    }

    #[test]
    fn test_first_table_entry_wins_when_multiple_keywords_match() {
        // "linkedin" precedes "resume" in the table.
        let reply = fallback_reply("use my resume for this linkedin posting");
        assert!(reply.contains("LinkedIn job applications"));
    }

    #[test]
    fn test_no_keyword_returns_capability_summary() {
        let reply = fallback_reply("what's the weather like?");
        assert!(reply.contains("Analyze job application forms"));
        assert!(reply.contains("What would you like to do next?"));
    }

    #[test]
    fn test_every_keyword_is_lowercase() {
        // The message is lower-cased before matching, so a keyword with an
        // upper-case letter could never match.
        for (keyword, _) in KEYWORD_REPLIES {
            assert_eq!(*keyword, keyword.to_lowercase());
        }
    }

    #[test]
    fn test_is_deterministic() {
        let msg = "interview prep please";
        assert_eq!(fallback_reply(msg), fallback_reply(msg));
    }
}
