//! Query-set builder.
//!
//! Expands one topic into a fixed batch of Google "dork" queries restricted
//! to Instagram, each pairing the topic with a phrase that tends to appear
//! next to a contact address.

/// Platform restriction prepended to every query.
const SITE_FILTER: &str = "site:instagram.com";

/// Where the topic goes in a template.
#[derive(Debug, Clone, Copy)]
enum Subject {
    /// `"<topic>"`
    Quoted,
    /// `"#<topic-without-whitespace>"`
    Hashtag,
}

/// A static query template: subject form plus the trailing indicator terms.
struct QueryTemplate {
    subject: Subject,
    indicator: &'static str,
}

const fn quoted(indicator: &'static str) -> QueryTemplate {
    QueryTemplate {
        subject: Subject::Quoted,
        indicator,
    }
}

const QUERY_TEMPLATES: &[QueryTemplate] = &[
    quoted(r#""@gmail.com""#),
    quoted(r#""@outlook.com""#),
    quoted(r#""@hotmail.com""#),
    quoted(r#""@yahoo.com""#),
    quoted(r#""contact me at""#),
    quoted(r#""business inquiries""#),
    quoted(r#""email me""#),
    QueryTemplate {
        subject: Subject::Hashtag,
        indicator: r#""gmail.com""#,
    },
    quoted(r#""collab" gmail"#),
    quoted(r#""booking" gmail"#),
    quoted(r#""send me an email""#),
    quoted(r#""direct business""#),
    quoted(r#""reach out" email"#),
    quoted(r#""dm for booking""#),
    quoted(r#""official email""#),
    quoted(r#""for contact""#),
    quoted(r#""@icloud.com""#),
    quoted(r#""@me.com""#),
    quoted(r#""for inquiries email""#),
    quoted(r#""PR inquiries""#),
    quoted(r#""management email""#),
    quoted(r#""collab email""#),
    quoted(r#""business email""#),
    quoted(r#""get in touch email""#),
];

/// Number of queries produced per topic.
pub const QUERY_COUNT: usize = QUERY_TEMPLATES.len();

/// Topic with all whitespace removed, as used in hashtags.
pub fn hashtag(topic: &str) -> String {
    topic.split_whitespace().collect()
}

/// Build the full query set for a topic.
///
/// Always returns [`QUERY_COUNT`] queries in template order. Empty topics
/// are not rejected; they simply produce low-yield queries.
pub fn build_queries(topic: &str) -> Vec<String> {
    let topic = topic.trim();
    let tag = hashtag(topic);

    QUERY_TEMPLATES
        .iter()
        .map(|template| {
            let subject = match template.subject {
                Subject::Quoted => format!("\"{}\"", topic),
                Subject::Hashtag => format!("\"#{}\"", tag),
            };
            format!("{} {} {}", SITE_FILTER, subject, template.indicator)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_count() {
        assert_eq!(QUERY_COUNT, 24);
        for topic in ["Fitness", "home bakery", "", "   "] {
            assert_eq!(build_queries(topic).len(), QUERY_COUNT);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(build_queries("Vegan Recipes"), build_queries("Vegan Recipes"));
    }

    #[test]
    fn test_query_shape() {
        let queries = build_queries("Fitness");
        assert_eq!(queries[0], r#"site:instagram.com "Fitness" "@gmail.com""#);
        assert_eq!(queries[8], r#"site:instagram.com "Fitness" "collab" gmail"#);
        assert!(queries.iter().all(|q| q.starts_with("site:instagram.com ")));
    }

    #[test]
    fn test_hashtag_variant_strips_whitespace() {
        let topic = "home  bakery\tnyc";
        let queries = build_queries(topic);

        let hashtag_query = r##"site:instagram.com "#homebakerynyc" "gmail.com""##;
        assert!(queries.iter().any(|q| q == hashtag_query));

        // Quoted templates keep the topic verbatim.
        let quoted_query = format!("site:instagram.com \"{}\" \"@gmail.com\"", topic);
        assert_eq!(queries[0], quoted_query);
    }

    #[test]
    fn test_topic_is_trimmed() {
        assert_eq!(build_queries("  Fitness "), build_queries("Fitness"));
    }

    #[test]
    fn test_empty_topic_still_valid() {
        let queries = build_queries("");
        assert_eq!(queries[0], r#"site:instagram.com "" "@gmail.com""#);
        assert_eq!(queries[7], r##"site:instagram.com "#" "gmail.com""##);
    }
}
