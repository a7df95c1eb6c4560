use std::fmt::Display;
use std::sync::LazyLock;

use chrono::{DateTime, Local, TimeZone};
use regex::{Captures, Regex};

/// `{{date pattern}}`, the legacy `[[site]]` form, or `{name}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^{}]*)\}\}|\[\[site\]\]|\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .expect("placeholder regex is valid")
});

const UNSAFE_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

pub const DEFAULT_NAME_PATTERN: &str = "{{yyyy-MM-dd}}-Report-{site}";

/// Expand `pattern` for the focused site using the current local time.
pub fn report_base_name(pattern: &str, site: Option<&str>) -> String {
    report_base_name_at(pattern, site, &Local::now())
}

/// Expand `pattern` for the focused site at a fixed point in time.
///
/// `{site}` becomes the filename-safe site or an empty string, `{{...}}` is formatted
/// as a date, and any other `{word}` placeholder becomes an empty string.
pub fn report_base_name_at<Tz>(
    pattern: &str,
    site: Option<&str>,
    now: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let site = site.map(filename_safe_site).unwrap_or_default();
    PLACEHOLDER
        .replace_all(pattern, |caps: &Captures| {
            if let Some(date_pattern) = caps.get(1) {
                now.format(&java_date_to_strftime(date_pattern.as_str())).to_string()
            } else {
                match caps.get(2).map(|m| m.as_str()) {
                    Some("site") | None => site.clone(),
                    Some(_) => String::new(),
                }
            }
        })
        .into_owned()
}

/// Base name plus the template's extension.
pub fn report_file_name(base: &str, extension: &str) -> String {
    format!("{}.{}", base, extension)
}

/// Strip the scheme and replace characters that cannot appear in a file name.
pub fn filename_safe_site(site: &str) -> String {
    let trimmed = site
        .strip_prefix("https://")
        .or_else(|| site.strip_prefix("http://"))
        .unwrap_or(site)
        .trim_end_matches('/');
    trimmed
        .chars()
        .map(|c| if UNSAFE_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

fn java_date_to_strftime(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            // '' is a literal quote, inside or outside a quoted run
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        let conversion = match (c, run) {
            ('y', 2) => Some("%y"),
            ('y', _) => Some("%Y"),
            ('M', 1) => Some("%-m"),
            ('M', 2) => Some("%m"),
            ('M', 3) => Some("%b"),
            ('M', _) => Some("%B"),
            ('d', 1) => Some("%-d"),
            ('d', _) => Some("%d"),
            ('H', 1) => Some("%-H"),
            ('H', _) => Some("%H"),
            ('h', _) => Some("%I"),
            ('m', _) => Some("%M"),
            ('s', _) => Some("%S"),
            ('a', _) => Some("%p"),
            _ => None,
        };
        match conversion {
            Some(s) => out.push_str(s),
            None => (0..run).for_each(|_| push_literal(&mut out, c)),
        }
        i += run;
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_site_placeholder() {
        assert_eq!(
            report_base_name_at("{site}-report", Some("example.com"), &fixed()),
            "example.com-report"
        );
    }

    #[test]
    fn test_missing_site_blanks_placeholder() {
        assert_eq!(report_base_name_at("{site}-report", None, &fixed()), "-report");
    }

    #[test]
    fn test_unknown_placeholder_blanked() {
        assert_eq!(report_base_name_at("scan-{context}-{site}", Some("a"), &fixed()), "scan--a");
    }

    #[test]
    fn test_literal_text_passes_through() {
        assert_eq!(report_base_name_at("weekly report", Some("a"), &fixed()), "weekly report");
    }

    #[test]
    fn test_date_placeholder() {
        assert_eq!(
            report_base_name_at(DEFAULT_NAME_PATTERN, Some("https://example.com"), &fixed()),
            "2024-03-09-Report-example.com"
        );
        assert_eq!(report_base_name_at("{{HH.mm.ss}}", None, &fixed()), "14.05.07");
        assert_eq!(report_base_name_at("{{d-M-yy}}", None, &fixed()), "9-3-24");
    }

    #[test]
    fn test_date_quoted_literal_and_percent() {
        assert_eq!(report_base_name_at("{{yyyy'Q'}}%", None, &fixed()), "2024Q%");
        assert_eq!(report_base_name_at("{{'100%'}}", None, &fixed()), "100%");
    }

    #[test]
    fn test_doubled_quote_is_literal_quote() {
        assert_eq!(report_base_name_at("{{HH''mm}}", None, &fixed()), "14'05");
        assert_eq!(report_base_name_at("{{'o''clock' H}}", None, &fixed()), "o'clock 14");
        assert_eq!(report_base_name_at("{{''}}", None, &fixed()), "'");
    }

    #[test]
    fn test_legacy_site_placeholder() {
        assert_eq!(
            report_base_name_at("ZAP-Report-[[site]]", Some("http://a.example/"), &fixed()),
            "ZAP-Report-a.example"
        );
    }

    #[test]
    fn test_site_made_filename_safe() {
        assert_eq!(filename_safe_site("https://example.com:8443"), "example.com_8443");
        assert_eq!(filename_safe_site("http://host/../etc"), "host_.._etc");
        assert_eq!(filename_safe_site("example.com"), "example.com");
    }

    #[test]
    fn test_file_name_appends_extension() {
        assert_eq!(report_file_name("-report", "html"), "-report.html");
        assert_eq!(report_file_name("a.b", "json"), "a.b.json");
    }
}
