//! Scripted advisor replies.
//!
//! Rules are checked in order against the lowercased message; the first rule
//! with any matching keyword wins. Unmatched messages get the fallback reply.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GREETING: &str = "Hi there! I'm your AI Career Advisor. How can I help with your career questions today? You can ask me about tech careers, skills to learn, or job market insights.";

pub const FALLBACK_REPLY: &str = "Thanks for your question! To provide more specific guidance, I'd need to know more about your interests, current skills, and career goals. Feel free to ask about specific tech roles, required skills, or career transition strategies, and I'll provide detailed information.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReplyRule {
    pub topic: &'static str,
    /// Lowercase substrings; any one matching selects the rule.
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

pub const REPLY_RULES: &[ReplyRule] = &[
    ReplyRule {
        topic: "full_stack",
        keywords: &["full stack"],
        reply: "Full Stack Development is a great career path! It involves both frontend (UI/UX) and backend (server, database) skills. Key technologies include JavaScript, React, Node.js, and databases like MongoDB or PostgreSQL. The average salary is around $105,000, with strong job growth expected over the next decade.",
    },
    ReplyRule {
        topic: "data_science",
        keywords: &["data sci"],
        reply: "Data Science combines statistics, programming, and domain expertise to extract insights from data. You'll need skills in Python, R, SQL, machine learning, and data visualization. This field has a high demand with an average salary of $122,000, and opportunities across various industries.",
    },
    ReplyRule {
        topic: "cloud",
        keywords: &["cloud"],
        reply: "Cloud Computing is a rapidly growing field. As a Cloud Architect or Engineer, you'll design and manage cloud infrastructure using AWS, Azure, or Google Cloud. Skills in infrastructure as code, networking, and security are valuable. The average salary is around $135,000 with excellent growth prospects.",
    },
    ReplyRule {
        topic: "skills",
        keywords: &["skill", "learn"],
        reply: "For tech careers in 2023, these skills are in high demand: 1) Cloud computing (AWS/Azure/GCP), 2) Full-stack development (JavaScript frameworks), 3) Data science & ML, 4) DevOps & CI/CD, 5) Cybersecurity. I recommend focusing on one path initially and building projects to demonstrate your skills to potential employers.",
    },
];

/// Picks the scripted reply for a user message.
pub fn reply_to(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    match REPLY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
    {
        Some(rule) => {
            debug!(topic = rule.topic, "Scripted reply matched");
            rule.reply
        }
        None => FALLBACK_REPLY,
    }
}
