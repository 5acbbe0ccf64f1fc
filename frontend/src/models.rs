use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/*                          resources read from the API                       */
/* -------------------------------------------------------------------------- */

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// A topic sits either directly under a category or under a parent topic.
#[derive(Clone, PartialEq, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, alias = "parent_slug")]
    pub parent_slug: Option<String>,
    #[serde(default, alias = "category_slug")]
    pub category_slug: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum Difficulty {
    #[serde(alias = "easy", alias = "EASY")]
    Easy,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "hard", alias = "HARD")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(raw.trim()))
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Difficulty::Easy => "badge badge-easy",
            Difficulty::Medium => "badge badge-medium",
            Difficulty::Hard => "badge badge-hard",
        }
    }
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default, alias = "leetcodeLink")]
    pub leetcode_link: Option<String>,
    #[serde(default, rename = "isSolved", alias = "is_solved")]
    pub is_solved: bool,
    #[serde(default, rename = "topicId", alias = "topic_id")]
    pub topic_id: i64,
}

/// `GET /api/topics/topic/:slug`
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct TopicDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub problems: Vec<Problem>,
}

/// `GET /api/topics/:slug`, the single-blob content model.
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct MarkdownTopic {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// `2024-03-01T10:00:00Z` → `2024-03-01`; "N/A" when unknown.
    pub fn member_since(&self) -> String {
        self.created_at
            .as_deref()
            .and_then(|ts| ts.get(..10))
            .unwrap_or("N/A")
            .to_string()
    }
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct LoginUser {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Clone, PartialEq, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReply {
    #[serde(default)]
    pub reset_link: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PasswordReply {
    pub fn text(&self) -> String {
        self.reset_link
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Done.".into())
    }
}

/* -------------------------------------------------------------------------- */
/*                              request bodies                                */
/* -------------------------------------------------------------------------- */

#[derive(Serialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct ForgotPasswordBody {
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordBody {
    pub token: String,
    pub new_password: String,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct NewCategory {
    pub name: String,
}

/// Where a new topic hangs. Serialized as exactly one of
/// `categorySlug` / `parentSlug`.
#[derive(Clone, PartialEq, Serialize, Debug)]
pub enum TopicParent {
    #[serde(rename = "categorySlug")]
    Category(String),
    #[serde(rename = "parentSlug")]
    Parent(String),
}

#[derive(Serialize, Debug)]
pub struct NewTopic {
    pub title: String,
    pub slug: String,
    #[serde(flatten)]
    pub parent: TopicParent,
}

impl NewTopic {
    pub fn new(title: &str, parent: TopicParent) -> Self {
        Self {
            title: title.trim().to_string(),
            slug: slugify(title),
            parent,
        }
    }
}

#[derive(Serialize, Clone, PartialEq, Debug, Default)]
pub struct TopicUpdate {
    pub title: String,
    pub description: String,
    pub summary: String,
}

impl TopicUpdate {
    pub fn from_detail(detail: &TopicDetail) -> Self {
        Self {
            title: detail.title.clone(),
            description: detail.description.clone().unwrap_or_default(),
            summary: detail.summary.clone().unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct NewProblem {
    pub title: String,
    pub difficulty: Difficulty,
    pub leetcode_link: Option<String>,
    pub topic_id: i64,
}

/// URL-safe slug: lower-case ASCII alphanumerics separated by single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Two Pointers"), "two-pointers");
        assert_eq!(slugify("  Load Balancing & CDN!  "), "load-balancing-cdn");
        assert_eq!(slugify("LRU--Cache"), "lru-cache");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn new_topic_sends_exactly_one_parent_key() {
        let under_category = serde_json::to_value(NewTopic::new("Arrays", TopicParent::Category("dsa".into()))).unwrap();
        assert_eq!(under_category, json!({"title": "Arrays", "slug": "arrays", "categorySlug": "dsa"}));

        let nested = serde_json::to_value(NewTopic::new("Caching", TopicParent::Parent("hld".into()))).unwrap();
        assert_eq!(nested, json!({"title": "Caching", "slug": "caching", "parentSlug": "hld"}));
    }

    #[test]
    fn problem_accepts_both_field_spellings() {
        let camel: Problem = serde_json::from_value(json!({
            "id": 1, "title": "Two Sum", "difficulty": "Easy",
            "leetcodeLink": "https://leetcode.com/problems/two-sum", "isSolved": true, "topicId": 4
        }))
        .unwrap();
        let snake: Problem = serde_json::from_value(json!({
            "id": 1, "title": "Two Sum", "difficulty": "easy",
            "leetcode_link": "https://leetcode.com/problems/two-sum", "is_solved": true, "topic_id": 4
        }))
        .unwrap();
        assert_eq!(camel, snake);
        assert!(camel.is_solved);
    }

    #[test]
    fn topic_detail_defaults_missing_problems() {
        let detail: TopicDetail = serde_json::from_value(json!({"id": 3, "title": "Graphs"})).unwrap();
        assert!(detail.problems.is_empty());
        assert_eq!(TopicUpdate::from_detail(&detail).description, "");
    }

    #[test]
    fn new_problem_uses_snake_case_keys() {
        let body = NewProblem {
            title: "3Sum".into(),
            difficulty: Difficulty::Medium,
            leetcode_link: None,
            topic_id: 9,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"title": "3Sum", "difficulty": "Medium", "leetcode_link": null, "topic_id": 9})
        );
    }

    #[test]
    fn reset_body_is_camel_case() {
        let body = ResetPasswordBody { token: "t".into(), new_password: "p".into() };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({"token": "t", "newPassword": "p"}));
    }

    #[test]
    fn member_since_trims_timestamp() {
        let mut user = UserProfile {
            name: "A".into(),
            email: "a@x".into(),
            role: "USER".into(),
            created_at: Some("2024-03-01T10:00:00Z".into()),
        };
        assert_eq!(user.member_since(), "2024-03-01");
        user.created_at = None;
        assert_eq!(user.member_since(), "N/A");
    }

    #[test]
    fn password_reply_prefers_reset_link() {
        let reply = PasswordReply { reset_link: Some("http://x/reset?token=1".into()), message: Some("sent".into()) };
        assert_eq!(reply.text(), "http://x/reset?token=1");
        assert_eq!(PasswordReply::default().text(), "Done.");
    }

    #[test]
    fn difficulty_parse_is_case_insensitive() {
        assert_eq!(Difficulty::parse("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("extreme"), None);
    }
}
