//! Popular topics offered under the topic field.

pub const SUGGESTED_TOPICS: [&str; 6] = [
    "Machine Learning Fundamentals",
    "Web Development Best Practices",
    "Data Science Introduction",
    "Digital Marketing Strategies",
    "Psychology of Learning",
    "Sustainable Energy Solutions",
];

/// Exact-match lookup; suggestions are picked from a button, not typed.
pub fn find_suggestion(text: &str) -> Option<&'static str> {
    SUGGESTED_TOPICS.iter().copied().find(|s| *s == text)
}
