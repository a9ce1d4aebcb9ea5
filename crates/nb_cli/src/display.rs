use crossterm::style::Stylize;
use nb_core::ContactRecord;
use nb_scrapers::manager::DISPLAYED_NEWS_LINKS;

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

pub fn banner(title: &str) -> String {
    let rule = "=".repeat(60);
    format!("{}\n{}\n{}", rule, title.bold(), rule)
}

/// One line per contact, as used when picking a contact to delete
pub fn contact_line(index: usize, record: &ContactRecord) -> String {
    format!(
        "  {}. {} - {} at {}",
        index,
        record.name,
        or_na(&record.role),
        record.company
    )
}

pub fn contact_details(record: &ContactRecord) -> String {
    let mut details = format!(
        "👤 Name: {}\n💼 Role: {}\n🏢 Company: {}\n🏭 Industry: {}\n🔗 LinkedIn: {}\n🌐 Website: {}\n📅 Added: {}\n\n📝 AI Summary:\n{}\n",
        or_na(&record.name),
        or_na(&record.role),
        or_na(&record.company),
        or_na(&record.industry),
        or_na(&record.linkedin),
        or_na(&record.website),
        record.created_day(),
        if record.summary.is_empty() { "No summary available." } else { record.summary.as_str() },
    );
    if !record.news_links.is_empty() {
        details.push_str(&format!("\n📰 Related News Links ({}):\n", record.news_links.len()));
        for (i, link) in record.news_links.iter().take(DISPLAYED_NEWS_LINKS).enumerate() {
            details.push_str(&format!("  {}. {}\n", i + 1, link));
        }
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::ContactInfo;

    #[test]
    fn test_contact_line_fills_missing_role() {
        let record = ContactRecord::from_info(&ContactInfo::new("Alice", "Acme"), String::new(), vec![]);
        assert_eq!(contact_line(1, &record), "  1. Alice - N/A at Acme");
    }

    #[test]
    fn test_contact_details() {
        let info = ContactInfo::new("Alice", "Acme").with_role("CTO");
        let links = (1..=6).map(|i| format!("https://news.example/{}", i)).collect();
        let record = ContactRecord::from_info(&info, String::new(), links);

        let details = contact_details(&record);
        assert!(details.contains("💼 Role: CTO"));
        assert!(details.contains("🔗 LinkedIn: N/A"));
        assert!(details.contains("No summary available."));
        assert!(details.contains("Related News Links (6)"));
        assert!(details.contains("  5. https://news.example/5"));
        assert!(!details.contains("https://news.example/6"));
    }
}
