use chrono::{DateTime, Utc};
use colored::Colorize;
use filedict::api::{CmdMessage, DictionarySummary, MessageLevel};
use filedict::config::FiledictConfig;
use serde_json::Value;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;
const COUNT_WIDTH: usize = 12;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_dictionaries(dictionaries: &[DictionarySummary]) {
    if dictionaries.is_empty() {
        println!("No dictionaries available.");
        return;
    }

    for (i, summary) in dictionaries.iter().enumerate() {
        let idx_str = format!("{}. ", i + 1);
        let available = LINE_WIDTH.saturating_sub(idx_str.width() + COUNT_WIDTH + TIME_WIDTH);
        let name = truncate_to_width(&summary.name, available);
        let padding = available.saturating_sub(name.width());

        let count = match summary.records {
            1 => "1 record".to_string(),
            n => format!("{} records", n),
        };

        println!(
            "{}{}{}{:>cw$}{}",
            idx_str.dimmed(),
            name.bold(),
            " ".repeat(padding),
            count,
            format_time_ago(summary.modified).dimmed(),
            cw = COUNT_WIDTH
        );
    }
}

pub(super) fn print_records(records: &[(String, Value)]) {
    let key_width = records.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    for (key, value) in records {
        let pad = key_width.saturating_sub(key.width());
        println!("{}{}  {}", key.yellow(), " ".repeat(pad), value);
    }
}

pub(super) fn print_config(config: &FiledictConfig) {
    println!("file-ext = {}", config.get_file_ext());
    println!("atomic-writes = {}", config.atomic_writes);
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: Option<DateTime<Utc>>) -> String {
    let Some(timestamp) = timestamp else {
        return format!("{:>width$}", "never", width = TIME_WIDTH);
    };
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_names_with_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn missing_timestamp_renders_never() {
        assert_eq!(format_time_ago(None).trim(), "never");
    }

    #[test]
    fn recent_timestamp_renders_relative() {
        let two_hours_ago = Utc::now() - chrono::Duration::hours(2);
        assert_eq!(format_time_ago(Some(two_hours_ago)).trim(), "2 hours ago");
    }
}
