use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use crate::validation::sanitize_input;

/// What the user knows about a contact before researching them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: String,
    pub company: String,
    pub role: String,
    pub linkedin: String,
    pub website: String,
    pub industry: String,
}

impl ContactInfo {
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_linkedin(mut self, linkedin: impl Into<String>) -> Self {
        self.linkedin = linkedin.into();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    /// Name and company are both present once trimmed
    pub fn has_required_fields(&self) -> bool {
        !self.name.trim().is_empty() && !self.company.trim().is_empty()
    }
}

/// One researched contact as persisted in the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub linkedin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub industry: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub news_links: Vec<String>,
    #[serde(with = "iso8601")]
    pub created_date: DateTime<Utc>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContactRecord {
    pub fn from_info(info: &ContactInfo, summary: String, news_links: Vec<String>) -> Self {
        Self {
            name: sanitize_input(&info.name),
            role: sanitize_input(&info.role),
            linkedin: sanitize_input(&info.linkedin),
            company: sanitize_input(&info.company),
            website: sanitize_input(&info.website),
            industry: sanitize_input(&info.industry),
            summary,
            news_links,
            // Stored timestamps carry microseconds.
            created_date: Utc::now().trunc_subsecs(6),
        }
    }

    /// Identity check used by lookups and deletes. Exact and case-sensitive.
    pub fn is_identified_by(&self, name: &str, company: &str) -> bool {
        self.name == name && self.company == company
    }

    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&self.name, &self.company, &self.role, &self.industry]
            .iter()
            .map(|field| field.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
            .contains(&term)
    }

    pub fn created_day(&self) -> String {
        self.created_date.format("%Y-%m-%d").to_string()
    }
}

/// A news article as returned by the news service. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl ArticleRecord {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    pub fn has_text(&self) -> bool {
        !self.title.trim().is_empty() || !self.description.trim().is_empty()
    }
}

/// RFC 3339 on write. On read also accepts offset-less timestamps, taken as local time.
mod iso8601 {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(DateTime::<Utc>::default());
        };
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|date| date.with_timezone(&Utc))
    }
}
